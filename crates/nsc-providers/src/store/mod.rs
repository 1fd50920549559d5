//! Key-Value Store Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryStore`] | Local | Process-local store for tests and single-process use |
//! | [`RedisStore`] | Remote | Redis-backed, shared between processes |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `InMemoryStore`, it honours the same watch semantics
//! - **Shared cache**: Use `RedisStore`

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;

#[cfg(feature = "store-memory")]
pub use memory::InMemoryStore;
#[cfg(feature = "store-redis")]
pub use redis::{RedisStore, RedisStoreConfig};
