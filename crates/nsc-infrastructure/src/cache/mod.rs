//! Namespaced cache and store wiring
//!
//! Store implementations live in nsc-providers; the port traits in nsc-domain.

pub mod factory;
pub mod provider;

pub use factory::{create_cache, create_store};
pub use provider::NamespacedAtomicCache;
