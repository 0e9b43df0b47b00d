//! HTTP server core implementation
//!
//! Builds the provider manager and rate limiter from configuration and serves
//! them through actix-web.

use crate::config::{Config, ServerConfig};
use crate::core::providers::OpenAICompatibleProvider;
use crate::core::rate_limiter::SlidingWindowRateLimiter;
use crate::core::router::ProviderManager;
use crate::server::middleware::RateLimitMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::DefaultHeaders,
    web,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

/// Register every enabled provider from configuration.
///
/// A provider whose adapter cannot be built is skipped with a warning.
pub fn build_manager(config: &Config) -> Arc<ProviderManager> {
    let manager = Arc::new(ProviderManager::new(config.router().manager_config()));

    for provider_config in config.gateway.enabled_providers() {
        match OpenAICompatibleProvider::new(provider_config) {
            Ok(provider) => {
                manager.register_provider(Arc::new(provider));
                info!(
                    "Registered provider: {} ({} models)",
                    provider_config.name,
                    provider_config.models.len()
                );
            }
            Err(e) => {
                warn!(
                    "Failed to initialize provider {}: {}",
                    provider_config.name, e
                );
            }
        }
    }

    if manager.provider_names().is_empty() {
        warn!("No providers registered, every dispatch will fail");
    }
    manager
}

/// Build the rate limiter on Redis when enabled, in memory otherwise.
///
/// An unreachable Redis at startup falls back to in-memory windows.
pub async fn build_limiter(config: &Config) -> Arc<SlidingWindowRateLimiter> {
    let rate_limit = config.rate_limit().clone();

    #[cfg(feature = "redis")]
    if config.redis().enabled {
        use crate::core::rate_limiter::RedisWindowStore;
        use crate::storage::redis::RedisPool;

        match RedisPool::new(config.redis()).await {
            Ok(pool) => {
                info!("Rate limiter using Redis windows");
                return Arc::new(SlidingWindowRateLimiter::new(
                    Arc::new(RedisWindowStore::new(pool)),
                    rate_limit,
                ));
            }
            Err(e) => {
                warn!("Redis unavailable, rate limiter falling back to memory: {}", e);
            }
        }
    }

    #[cfg(not(feature = "redis"))]
    if config.redis().enabled {
        warn!("Built without the redis feature, rate limiter using memory");
    }

    info!("Rate limiter using in-memory windows");
    Arc::new(SlidingWindowRateLimiter::in_memory(rate_limit))
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let limiter = Arc::clone(&state.limiter);
    let json_config = web::JsonConfig::default()
        .limit(state.config.server().max_body_size)
        .error_handler(|err, _req| GatewayError::bad_request(err.to_string()).into());

    App::new()
        .app_data(state)
        .app_data(json_config)
        .wrap(TracingLogger::default())
        .wrap(DefaultHeaders::new().add(("Server", crate::NAME)))
        .configure(routes::health::configure_routes)
        .service(
            web::scope("/v1")
                .wrap(RateLimitMiddleware::new(limiter))
                .configure(routes::ai::configure_routes),
        )
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let manager = build_manager(config);
        let limiter = build_limiter(config).await;
        let state = AppState::new(config.clone(), manager, limiter);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Start background work, serve until shutdown, then stop background work
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let manager = Arc::clone(&self.state.manager);
        manager.start_health_checker();

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || create_app(state.clone()))
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .bind(&bind_addr)
            .map_err(|e| GatewayError::Server(format!("Failed to bind {}: {}", bind_addr, e)))?;
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        info!("HTTP server listening on {}", bind_addr);
        let result = server
            .run()
            .await
            .map_err(|e| GatewayError::Server(format!("Server error: {}", e)));

        manager.shutdown().await;
        info!("HTTP server stopped");
        result
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
