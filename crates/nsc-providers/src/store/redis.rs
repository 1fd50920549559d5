//! Redis key-value store
//!
//! Remote store implementation using Redis as the backend.
//! Suitable for caches shared between processes and hosts.
//!
//! ## Features
//!
//! - One shared multiplexed connection for plain commands
//! - Dedicated connections for WATCH/MULTI/EXEC, recycled through a small idle pool
//! - Optional logical database selection and per-command timeout
//!
//! ## Example
//!
//! ```ignore
//! use nsc_providers::store::{RedisStore, RedisStoreConfig};
//!
//! let store = RedisStore::connect(&RedisStoreConfig::default()).await?;
//! // Or with host/port
//! let store = RedisStore::connect(&RedisStoreConfig::with_host_port("cache.internal", 6380)).await?;
//! ```

use crate::constants::{
    REDIS_DEFAULT_HOST, REDIS_DEFAULT_PORT, REDIS_PROVIDER_NAME, REDIS_VERSION_FIELD,
    REDIS_WATCH_POOL_SIZE, VALKEY_VERSION_FIELD,
};
use async_trait::async_trait;
use nsc_domain::error::{Error, Result};
use nsc_domain::ports::{KeyValueStore, WatchSession};
use nsc_domain::value_objects::{ScanPage, ServerVersion, StoreInfo, TransactionOp};
use redis::{Client, RedisError, RedisResult, aio::MultiplexedConnection};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// Redis connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisStoreConfig {
    /// Server hostname or IP address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Limit for connecting and for each command, `None` for unlimited
    pub timeout: Option<Duration>,
    /// Logical database selected on every connection
    pub dbindex: Option<i64>,
    /// Idle dedicated connections kept for watch sessions
    pub watch_pool_size: usize,
}

impl RedisStoreConfig {
    /// Settings for a host and port, other fields defaulted
    pub fn with_host_port(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
            ..Self::default()
        }
    }

    /// Connection URL for the settings
    pub fn url(&self) -> String {
        let host = if self.host.contains(':') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        match self.dbindex {
            Some(db) => format!("redis://{}:{}/{}", host, self.port, db),
            None => format!("redis://{}:{}", host, self.port),
        }
    }
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            host: REDIS_DEFAULT_HOST.to_string(),
            port: REDIS_DEFAULT_PORT,
            timeout: None,
            dbindex: None,
            watch_pool_size: REDIS_WATCH_POOL_SIZE,
        }
    }
}

type WatchPool = Arc<Mutex<Vec<MultiplexedConnection>>>;

/// Redis key-value store
///
/// Plain commands share one multiplexed connection. WATCH state belongs to a
/// connection, so every watch session runs on a connection of its own.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
    connection: MultiplexedConnection,
    watch_pool: WatchPool,
    config: RedisStoreConfig,
}

impl RedisStore {
    /// Connect to Redis
    ///
    /// The connection is established here; an unreachable server is an
    /// [`Error::Network`] and nothing is retried.
    pub async fn connect(config: &RedisStoreConfig) -> Result<Self> {
        let client = Client::open(config.url()).map_err(|e| {
            Error::configuration_with_source(
                format!("Invalid Redis connection settings: {}", e),
                e,
            )
        })?;

        let connection = open_connection(&client, config.timeout).await?;
        info!(
            host = %config.host,
            port = config.port,
            dbindex = ?config.dbindex,
            "Connected to Redis"
        );

        Ok(Self {
            client,
            connection,
            watch_pool: Arc::new(Mutex::new(Vec::with_capacity(config.watch_pool_size))),
            config: config.clone(),
        })
    }

    /// Connection settings this store was created with
    pub fn config(&self) -> &RedisStoreConfig {
        &self.config
    }

    /// Get the Redis server address description
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Handle onto the shared connection
    fn connection(&self) -> MultiplexedConnection {
        self.connection.clone()
    }

    /// Take an idle dedicated connection or open a new one
    async fn dedicated_connection(&self) -> Result<MultiplexedConnection> {
        let idle = self
            .watch_pool
            .lock()
            .map_err(|_| Error::internal("Redis watch pool lock poisoned"))?
            .pop();
        match idle {
            Some(conn) => Ok(conn),
            None => open_connection(&self.client, self.config.timeout).await,
        }
    }
}

async fn open_connection(
    client: &Client,
    timeout: Option<Duration>,
) -> Result<MultiplexedConnection> {
    let connecting = client.get_multiplexed_async_connection();
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, connecting).await.map_err(|_| {
            Error::network(format!("Timed out connecting to Redis after {:?}", limit))
        })?,
        None => connecting.await,
    };
    result.map_err(|e| Error::network_with_source(format!("Failed to connect to Redis: {}", e), e))
}

/// Await a Redis command, applying the configured timeout
async fn timed<T, F>(timeout: Option<Duration>, command: &str, fut: F) -> Result<T>
where
    F: Future<Output = RedisResult<T>>,
{
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
            Error::network(format!("Redis {} timed out after {:?}", command, limit))
        })?,
        None => fut.await,
    };
    result.map_err(|e| command_error(command, e))
}

fn command_error(command: &str, e: RedisError) -> Error {
    let message = format!("Redis {} failed: {}", command, e);
    if e.is_io_error() || e.is_connection_dropped() {
        Error::network_with_source(message, e)
    } else {
        Error::infrastructure_with_source(message, e)
    }
}

fn ttl_millis(ttl: Option<Duration>) -> Option<u64> {
    ttl.filter(|ttl| !ttl.is_zero())
        .map(|ttl| u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1))
}

/// Extract name and version from an `INFO server` reply
fn parse_server_info(info: &str) -> StoreInfo {
    let field = |name: &str| {
        info.lines()
            .find_map(|line| line.trim().strip_prefix(name)?.strip_prefix(':'))
            .map(str::to_string)
    };
    let name = if field(VALKEY_VERSION_FIELD).is_some() {
        "valkey"
    } else {
        REDIS_PROVIDER_NAME
    };
    StoreInfo {
        name: name.to_string(),
        version: field(REDIS_VERSION_FIELD).and_then(|v| ServerVersion::parse(&v)),
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("GET");
        cmd.arg(key);
        timed(self.config.timeout, "GET", cmd.query_async(&mut conn)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(millis) = ttl_millis(ttl) {
            cmd.arg("PX").arg(millis);
        }
        timed(self.config.timeout, "SET", cmd.query_async(&mut conn)).await
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("EXISTS");
        cmd.arg(key);
        let count: u64 = timed(self.config.timeout, "EXISTS", cmd.query_async(&mut conn)).await?;
        Ok(count > 0)
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection();
        let mut cmd = redis::cmd("DEL");
        cmd.arg(keys);
        timed(self.config.timeout, "DEL", cmd.query_async(&mut conn)).await
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("SCAN");
        cmd.arg(cursor).arg("MATCH").arg(pattern).arg("COUNT").arg(count);
        let (cursor, keys): (u64, Vec<String>) =
            timed(self.config.timeout, "SCAN", cmd.query_async(&mut conn)).await?;
        Ok(ScanPage { cursor, keys })
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<bool> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value).arg("NX");
        if let Some(millis) = ttl_millis(ttl) {
            cmd.arg("PX").arg(millis);
        }
        let reply: Option<redis::Value> =
            timed(self.config.timeout, "SET NX", cmd.query_async(&mut conn)).await?;
        Ok(reply.is_some())
    }

    async fn increment_by(&self, key: &str, step: i64) -> Result<i64> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("INCRBY");
        cmd.arg(key).arg(step);
        timed(self.config.timeout, "INCRBY", cmd.query_async(&mut conn)).await
    }

    async fn decrement_by(&self, key: &str, step: i64) -> Result<i64> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("DECRBY");
        cmd.arg(key).arg(step);
        timed(self.config.timeout, "DECRBY", cmd.query_async(&mut conn)).await
    }

    async fn watch(&self, key: &str) -> Result<Box<dyn WatchSession>> {
        let mut conn = self.dedicated_connection().await?;
        let mut cmd = redis::cmd("WATCH");
        cmd.arg(key);
        let _: () = timed(self.config.timeout, "WATCH", cmd.query_async(&mut conn)).await?;
        debug!(key = key, "Watching key");

        Ok(Box::new(RedisWatchSession {
            conn: Some(conn),
            key: key.to_string(),
            pool: Arc::clone(&self.watch_pool),
            pool_size: self.config.watch_pool_size,
            timeout: self.config.timeout,
        }))
    }

    async fn server_info(&self) -> Result<StoreInfo> {
        let mut conn = self.connection();
        let mut cmd = redis::cmd("INFO");
        cmd.arg("server");
        let info: String = timed(self.config.timeout, "INFO", cmd.query_async(&mut conn)).await?;
        Ok(parse_server_info(&info))
    }

    fn provider_name(&self) -> &str {
        REDIS_PROVIDER_NAME
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("server", &self.server_address())
            .field("dbindex", &self.config.dbindex)
            .finish()
    }
}

/// Watch session on a dedicated Redis connection
///
/// The connection goes back to the idle pool only after EXEC or UNWATCH
/// cleared its watch state. A session dropped midway, or one whose command
/// failed, drops its connection instead, which ends the watch server-side.
pub struct RedisWatchSession {
    conn: Option<MultiplexedConnection>,
    key: String,
    pool: WatchPool,
    pool_size: usize,
    timeout: Option<Duration>,
}

impl RedisWatchSession {
    fn conn(&mut self) -> Result<&mut MultiplexedConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| Error::internal("Redis watch session already finished"))
    }

    fn release(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Ok(mut idle) = self.pool.lock() {
                if idle.len() < self.pool_size {
                    idle.push(conn);
                }
            }
        }
    }
}

#[async_trait]
impl WatchSession for RedisWatchSession {
    fn key(&self) -> &str {
        &self.key
    }

    async fn get(&mut self) -> Result<Option<String>> {
        let timeout = self.timeout;
        let mut cmd = redis::cmd("GET");
        cmd.arg(&self.key);
        let conn = self.conn()?;
        timed(timeout, "GET", cmd.query_async(conn)).await
    }

    async fn exists(&mut self) -> Result<bool> {
        let timeout = self.timeout;
        let mut cmd = redis::cmd("EXISTS");
        cmd.arg(&self.key);
        let conn = self.conn()?;
        let count: u64 = timed(timeout, "EXISTS", cmd.query_async(conn)).await?;
        Ok(count > 0)
    }

    async fn commit(mut self: Box<Self>, op: TransactionOp) -> Result<bool> {
        let timeout = self.timeout;
        let mut pipe = redis::pipe();
        pipe.atomic();
        match op {
            TransactionOp::Set(value) => {
                pipe.cmd("SET").arg(&self.key).arg(value);
            }
            TransactionOp::Delete => {
                pipe.cmd("DEL").arg(&self.key);
            }
        }
        let conn = self.conn()?;
        // EXEC replies nil when a watched key changed
        let reply: Option<redis::Value> = timed(timeout, "EXEC", pipe.query_async(conn)).await?;
        self.release();
        Ok(reply.is_some())
    }

    async fn unwatch(mut self: Box<Self>) -> Result<()> {
        let timeout = self.timeout;
        let conn = self.conn()?;
        let _: () = timed(timeout, "UNWATCH", redis::cmd("UNWATCH").query_async(conn)).await?;
        self.release();
        Ok(())
    }
}
