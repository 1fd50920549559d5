// Clippy allows for complex patterns in infrastructure code
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! Everything between the store providers and an application that wants a
//! namespaced cache.
//!
//! ### Data & Storage
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | `NamespacedAtomicCache` and the store factory |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via Figment |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`health`] | Store availability probe |
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod health;
pub mod logging;

// Re-export commonly used types
pub use cache::{NamespacedAtomicCache, create_cache, create_store};
pub use error_ext::ErrorContext;
