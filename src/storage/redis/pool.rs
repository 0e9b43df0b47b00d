//! Redis connection management
//!
//! One managed connection shared by every caller; cloning the pool clones a
//! handle to the same connection. The manager reconnects after a drop, and
//! every command is bounded by the configured timeout.

use crate::config::models::storage::RedisConfig;
use crate::utils::error::{GatewayError, Result};
use redis::RedisResult;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::Client;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Shared Redis connection
#[derive(Clone)]
pub struct RedisPool {
    pub(crate) connection: ConnectionManager,
    pub(crate) config: RedisConfig,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPool")
            .field("url", &Self::sanitize_url(&self.config.url))
            .finish()
    }
}

impl RedisPool {
    /// Connect to Redis within the configured connection timeout
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        info!("Connecting to Redis");
        debug!("Redis URL: {}", Self::sanitize_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(GatewayError::Redis)?;
        let timeout = Duration::from_secs(config.connection_timeout);
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(timeout)
            .set_response_timeout(timeout);
        let connection = tokio::time::timeout(
            timeout,
            ConnectionManager::new_with_config(client, manager_config),
        )
        .await
            .map_err(|_| {
                GatewayError::Timeout(format!("Redis connection not established within {:?}", timeout))
            })?
            .map_err(GatewayError::Redis)?;

        info!("Redis connection established");
        Ok(Self {
            connection,
            config: config.clone(),
        })
    }

    /// Connect and verify the server answers PING
    pub async fn connect_checked(config: &RedisConfig) -> Result<Self> {
        let pool = Self::new(config).await?;
        pool.health_check().await?;
        Ok(pool)
    }

    pub(crate) fn connection(&self) -> ConnectionManager {
        self.connection.clone()
    }

    pub(crate) fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.config.connection_timeout)
    }

    /// Await one Redis round trip, giving up after the command timeout
    pub(crate) async fn bounded<T>(
        &self,
        command: &str,
        call: impl Future<Output = RedisResult<T>>,
    ) -> Result<T> {
        let timeout = self.command_timeout();
        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| {
                GatewayError::Timeout(format!("Redis {} got no reply within {:?}", command, timeout))
            })?
            .map_err(GatewayError::Redis)
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing Redis health check");
        let mut conn = self.connection();
        let _: String = self
            .bounded("PING", redis::cmd("PING").query_async(&mut conn))
            .await?;

        debug!("Redis health check passed");
        Ok(())
    }

    /// Sanitize Redis URL for logging (hide password)
    pub(crate) fn sanitize_url(url: &str) -> String {
        if let Ok(parsed) = url::Url::parse(url) {
            let mut sanitized = parsed.clone();
            if sanitized.password().is_some() {
                let _ = sanitized.set_password(Some("***"));
            }
            sanitized.to_string()
        } else {
            "invalid_url".to_string()
        }
    }
}
