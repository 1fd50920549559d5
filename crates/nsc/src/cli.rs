//! Command line interface
//!
//! Every public cache operation is one subcommand. Values on the command
//! line are parsed as JSON; anything that is not valid JSON is taken as a
//! plain string, so `nsc set greeting hello` stores `"hello"`.
//!
//! Results are printed as JSON. A `get` miss and a `dec` on an absent key
//! print nothing and exit with status 1.

use clap::{Parser, Subcommand};
use nsc_domain::constants::DEFAULT_COUNTER_STEP;
use nsc_domain::error::Result;
use nsc_domain::ports::AtomicCache;
use nsc_infrastructure::config::ConfigLoader;
use nsc_infrastructure::health::check_store;
use nsc_infrastructure::logging::init_logging;
use nsc_infrastructure::{NamespacedAtomicCache, create_cache};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Duration;

/// Command line interface for nscache
#[derive(Parser, Debug)]
#[command(name = "nsc")]
#[command(about = "nscache - Namespaced atomic cache client")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Namespace prepended to every key (overrides `cache.namespace`)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Cache operations
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the value of a key
    Get { key: String },
    /// Write a value
    Set {
        key: String,
        value: String,
        /// Expiry in seconds, 0 for none
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Whether a key exists
    Has { key: String },
    /// Delete a key
    Remove { key: String },
    /// Delete every key starting with a prefix
    Clear {
        #[arg(default_value = "")]
        prefix: String,
    },
    /// Write a value only if the key is absent
    Add {
        key: String,
        value: String,
        /// Expiry in seconds, 0 for none
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Increment a counter, creating it when absent
    Inc {
        key: String,
        #[arg(long, default_value_t = DEFAULT_COUNTER_STEP, allow_negative_numbers = true)]
        step: i64,
    },
    /// Decrement an existing counter
    Dec {
        key: String,
        #[arg(long, default_value_t = DEFAULT_COUNTER_STEP, allow_negative_numbers = true)]
        step: i64,
    },
    /// Replace a value only if it currently equals OLD
    Cas {
        key: String,
        old: String,
        new: String,
    },
    /// Delete a key only if its value currently equals OLD
    Cad { key: String, old: String },
    /// Check that the store is reachable and recent enough
    Probe,
}

/// Parse a command line value as JSON, falling back to a JSON string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn ttl_secs(ttl: Option<u64>) -> Option<Duration> {
    ttl.map(Duration::from_secs)
}

/// Load configuration, connect and run one command
///
/// Returns `None` when the command found nothing to print.
pub async fn run(cli: Cli) -> Result<Option<Value>> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    if let Some(namespace) = cli.namespace {
        config.cache.namespace = namespace;
    }

    init_logging(&config.logging)?;

    let cache = create_cache(&config).await?;
    execute(&cache, cli.command).await
}

/// Run one command against a cache
pub async fn execute(cache: &NamespacedAtomicCache, command: Command) -> Result<Option<Value>> {
    let output = match command {
        Command::Get { key } => return cache.get(&key).await,
        Command::Set { key, value, ttl } => {
            cache.set(&key, &parse_value(&value), ttl_secs(ttl)).await?;
            json!(true)
        }
        Command::Has { key } => json!(cache.has_key(&key).await?),
        Command::Remove { key } => json!(cache.remove(&key).await?),
        Command::Clear { prefix } => serde_json::to_value(cache.clear(&prefix).await)?,
        Command::Add { key, value, ttl } => {
            json!(cache.add(&key, &parse_value(&value), ttl_secs(ttl)).await?)
        }
        Command::Inc { key, step } => json!(cache.inc(&key, step).await?),
        Command::Dec { key, step } => return Ok(cache.dec(&key, step).await?.map(Value::from)),
        Command::Cas { key, old, new } => {
            json!(
                cache
                    .cas(&key, &parse_value(&old), &parse_value(&new))
                    .await?
            )
        }
        Command::Cad { key, old } => json!(cache.cad(&key, &parse_value(&old)).await?),
        Command::Probe => {
            let store = cache.store();
            serde_json::to_value(check_store(store.as_ref()).await)?
        }
    };
    Ok(Some(output))
}
