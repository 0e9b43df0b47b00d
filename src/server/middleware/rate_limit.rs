//! Rate limiting middleware
//!
//! Consults the sliding-window limiter before a request reaches its handler.
//! Admitted responses carry `X-RateLimit-*` headers; rejected requests get a
//! 429 with the same headers.

use crate::core::rate_limiter::{AdmissionDecision, SlidingWindowRateLimiter};
use crate::utils::error::{ErrorResponse, GatewayError};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use futures::future::{Ready, ready};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

pub const LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit middleware for Actix-web
pub struct RateLimitMiddleware {
    limiter: Arc<SlidingWindowRateLimiter>,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<SlidingWindowRateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

/// Service implementation for rate limit middleware
pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<SlidingWindowRateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = Arc::clone(&self.limiter);

        Box::pin(async move {
            let caller = caller_identity(&req);

            match limiter.check(&caller).await {
                Ok(AdmissionDecision::Admitted(info)) => {
                    let mut res = service.call(req).await?;
                    set_limit_headers(res.headers_mut(), info.limit, info.remaining, info.reset_at);
                    Ok(res.map_into_left_body())
                }
                Ok(AdmissionDecision::Rejected(rejection)) => {
                    debug!("Rejected {} for {}", req.path(), caller);
                    let mut response =
                        HttpResponse::TooManyRequests().json(ErrorResponse::from(&rejection));
                    set_limit_headers(
                        response.headers_mut(),
                        rejection.limit,
                        rejection.remaining,
                        rejection.reset_at,
                    );
                    Ok(req.into_response(response).map_into_right_body())
                }
                Err(e) => {
                    let response = GatewayError::from(e).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn set_limit_headers(headers: &mut HeaderMap, limit: u32, remaining: u32, reset_at: i64) {
    headers.insert(HeaderName::from_static(LIMIT_HEADER), HeaderValue::from(limit));
    headers.insert(HeaderName::from_static(REMAINING_HEADER), HeaderValue::from(remaining));
    headers.insert(HeaderName::from_static(RESET_HEADER), HeaderValue::from(reset_at));
}

/// Identify the caller for the per-caller ceiling.
///
/// The presented `Authorization` credential is reduced to its SHA-256 digest
/// so raw keys never reach the window store and every instance sharing the
/// store derives the same key. Without one the peer address is used.
pub fn caller_identity(req: &ServiceRequest) -> String {
    if let Some(credential) = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
    {
        let mut hasher = Sha256::new();
        hasher.update(credential.trim().as_bytes());
        return format!("key:{}", hex::encode(hasher.finalize()));
    }

    let peer = req
        .connection_info()
        .peer_addr()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!("ip:{}", peer)
}
