//! # nscache Domain Layer
//!
//! Types and contracts for a namespaced key-value cache with optimistic
//! compare-and-set / compare-and-delete.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type |
//! | [`constants`] | Cache semantics constants |
//! | [`value_objects`] | Namespace, value codec, scan/transaction types |
//! | [`ports`] | Store and cache traits |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{AtomicCache, CacheStats, KeyValueStore, WatchSession};
pub use value_objects::{
    CacheValue, ClearReport, Namespace, ScanPage, ServerVersion, StoreInfo, TransactionOp,
};
