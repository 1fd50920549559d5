//! Configuration management
//!
//! Configuration is assembled by [`loader::ConfigLoader`] from defaults, an
//! optional TOML file and `NSC__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
