//! Health check and status endpoints
//!
//! These routes sit outside admission control, so none of them reaches a
//! provider: `/health/providers` reports the background checker's last sweep.

use crate::core::router::ProviderStatus;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/providers", web::get().to(provider_health)),
    )
    .route("/metrics/providers", web::get().to(provider_metrics));
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// Liveness check
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");
    HttpResponse::Ok().json(ApiResponse::success(HealthStatus {
        status: "healthy",
        version: crate::VERSION,
        timestamp: chrono::Utc::now(),
    }))
}

/// Current status of every provider with its most recent probe
pub async fn provider_health(state: web::Data<AppState>) -> HttpResponse {
    let metrics: BTreeMap<_, _> = state.manager.get_metrics().into_iter().collect();
    let mut probes = state.manager.last_probes();

    let providers: Vec<_> = metrics
        .iter()
        .map(|(name, metrics)| {
            serde_json::json!({
                "provider": name,
                "status": metrics.status,
                "last_probe": probes.remove(name),
            })
        })
        .collect();
    let healthy = metrics
        .values()
        .filter(|m| m.status == ProviderStatus::Healthy)
        .count();

    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "healthy_providers": healthy,
        "total_providers": providers.len(),
        "providers": providers,
    })))
}

/// Snapshot of per-provider dispatch metrics and limiter usage
pub async fn provider_metrics(state: web::Data<AppState>) -> HttpResponse {
    let providers: BTreeMap<_, _> = state.manager.get_metrics().into_iter().collect();

    let rate_limit = match state.limiter.stats().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("Rate limit stats unavailable: {}", e);
            None
        }
    };

    HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "strategy": state.manager.config().strategy,
        "providers": providers,
        "rate_limit": rate_limit,
    })))
}
