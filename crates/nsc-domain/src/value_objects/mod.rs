//! Value Objects
//!
//! Immutable types shared between the cache adapter and the store providers.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Namespace`] | Key prefix that isolates one logical cache |
//! | [`CacheValue`] | Decoded cache payload (JSON) |
//! | [`ScanPage`] | One round-trip of a cursor-based key scan |
//! | [`TransactionOp`] | Write submitted when a watched transaction commits |
//! | [`StoreInfo`] | Server identity used by the availability probe |
//! | [`ClearReport`] | Outcome of a best-effort bulk clear |

/// Key qualification
pub mod namespace;
/// Store-level value objects
pub mod store;
/// Value encoding
pub mod value;

pub use namespace::Namespace;
pub use store::{ClearReport, ScanPage, ServerVersion, StoreInfo, TransactionOp};
pub use value::{CacheValue, decode, encode_value};
