//! HTTP surface tests
//!
//! The full app (routes, admission middleware, error mapping) over stub providers.

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, StubProvider};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use dispatch_gateway::config::{Config, RateLimitConfig};
    use dispatch_gateway::core::health::HealthChecker;
    use dispatch_gateway::core::rate_limiter::SlidingWindowRateLimiter;
    use dispatch_gateway::server::middleware::{LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER};
    use dispatch_gateway::server::{AppState, create_app};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    fn state(rate_limit: RateLimitConfig, providers: Vec<Arc<StubProvider>>) -> web::Data<AppState> {
        let manager = ConfigFactory::shared_manager(2);
        for provider in providers {
            manager.register_provider(provider);
        }
        let limiter = Arc::new(SlidingWindowRateLimiter::in_memory(rate_limit));
        web::Data::new(AppState::new(Config::default(), manager, limiter))
    }

    fn chat_body(model: &str) -> Value {
        json!({"model": model, "messages": [{"role": "user", "content": "Hello"}]})
    }

    fn header<B>(resp: &actix_web::dev::ServiceResponse<B>, name: &str) -> Option<String> {
        resp.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[actix_web::test]
    async fn test_chat_completion_with_limit_headers() {
        let app = test::init_service(create_app(state(
            ConfigFactory::rate_limit(100, 10),
            vec![Arc::new(StubProvider::new("alpha", &["gpt-4o"]))],
        )))
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .insert_header(("Authorization", "Bearer sk-a"))
            .set_json(chat_body("gpt-4o"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, LIMIT_HEADER).as_deref(), Some("10"));
        assert_eq!(header(&resp, REMAINING_HEADER).as_deref(), Some("9"));
        assert!(header(&resp, RESET_HEADER).is_some());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["provider"], "alpha");
        assert_eq!(body["choices"][0]["message"]["content"], "reply from alpha");
        assert_eq!(body["usage"]["total_tokens"], 7);
    }

    #[actix_web::test]
    async fn test_caller_ceiling_returns_429() {
        let app = test::init_service(create_app(state(
            ConfigFactory::rate_limit(100, 2),
            vec![Arc::new(StubProvider::new("alpha", &["gpt-4o"]))],
        )))
        .await;

        for _ in 0..2 {
            let req = test::TestRequest::get()
                .uri("/v1/models")
                .insert_header(("Authorization", "Bearer sk-a"))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get()
            .uri("/v1/models")
            .insert_header(("Authorization", "Bearer sk-a"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(header(&resp, LIMIT_HEADER).as_deref(), Some("2"));
        assert_eq!(header(&resp, REMAINING_HEADER).as_deref(), Some("0"));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["type"], "rate_limit_error");
        assert_eq!(body["error"]["code"], "user_rate_limit_exceeded");
        assert_eq!(body["error"]["details"]["limit"], 2);
        assert_eq!(body["error"]["details"]["remaining"], 0);

        // Another credential has its own window
        let req = test::TestRequest::get()
            .uri("/v1/models")
            .insert_header(("Authorization", "Bearer sk-b"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_global_ceiling_code() {
        let app = test::init_service(create_app(state(ConfigFactory::rate_limit(1, 10), vec![]))).await;

        let first = test::TestRequest::get().uri("/v1/models").to_request();
        assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

        let second = test::TestRequest::get()
            .uri("/v1/models")
            .insert_header(("Authorization", "Bearer other"))
            .to_request();
        let resp = test::call_service(&app, second).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "global_rate_limit_exceeded");
    }

    #[actix_web::test]
    async fn test_health_is_outside_admission() {
        let app = test::init_service(create_app(state(ConfigFactory::rate_limit(1, 1), vec![]))).await;

        for _ in 0..3 {
            let req = test::TestRequest::get().uri("/health").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert!(header(&resp, LIMIT_HEADER).is_none());
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["data"]["status"], "healthy");
        }
    }

    #[actix_web::test]
    async fn test_unknown_model_is_503() {
        let app = test::init_service(create_app(state(
            ConfigFactory::rate_limit(100, 10),
            vec![Arc::new(StubProvider::new("alpha", &["gpt-4o"]))],
        )))
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(chat_body("claude-3"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "no_available_provider");
    }

    #[actix_web::test]
    async fn test_exhausted_retries_surface_provider_status() {
        let app = test::init_service(create_app(state(
            ConfigFactory::rate_limit(100, 10),
            vec![Arc::new(StubProvider::new("alpha", &["gpt-4o"]).broken())],
        )))
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(chat_body("gpt-4o"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "provider_unavailable");
    }

    #[actix_web::test]
    async fn test_malformed_json_is_400() {
        let app = test::init_service(create_app(state(ConfigFactory::rate_limit(100, 10), vec![]))).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"model\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(json!({"model": "gpt-4o", "messages": []}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }

    #[actix_web::test]
    async fn test_streaming_chat_is_sse() {
        let app = test::init_service(create_app(state(
            ConfigFactory::rate_limit(100, 10),
            vec![Arc::new(StubProvider::new("alpha", &["gpt-4o"]))],
        )))
        .await;

        let mut body = chat_body("gpt-4o");
        body["stream"] = json!(true);
        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "content-type").as_deref(), Some("text/event-stream"));
        let bytes = test::read_body(resp).await;
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("\"content\":\"Hel\""));
        assert!(text.contains("\"content\":\"lo\""));
        assert!(text.ends_with("data: [DONE]\n\n"));
    }

    #[actix_web::test]
    async fn test_models_and_metrics() {
        let app = test::init_service(create_app(state(
            ConfigFactory::rate_limit(100, 10),
            vec![
                Arc::new(StubProvider::new("alpha", &["gpt-4o", "embed"])),
                Arc::new(StubProvider::new("beta", &["gpt-4o"])),
            ],
        )))
        .await;

        let req = test::TestRequest::post()
            .uri("/v1/embeddings")
            .set_json(json!({"model": "embed", "input": ["a"]}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/v1/models").to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["object"], "list");
        let models = body["data"].as_array().unwrap();
        assert_eq!(models.len(), 2);
        let gpt = models.iter().find(|m| m["id"] == "gpt-4o").unwrap();
        assert_eq!(gpt["owned_by"], json!(["alpha", "beta"]));

        let req = test::TestRequest::get().uri("/metrics/providers").to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["strategy"], "round_robin");
        assert_eq!(body["data"]["providers"]["alpha"]["request_count"], 1);
        assert_eq!(body["data"]["providers"]["beta"]["request_count"], 0);
        assert_eq!(body["data"]["rate_limit"]["backend"], "memory");
        assert_eq!(body["data"]["rate_limit"]["global_current_requests"], 2);
    }

    #[actix_web::test]
    async fn test_provider_health_reports_last_sweep_without_probing() {
        let up = Arc::new(StubProvider::new("up", &["gpt-4o"]));
        let down = Arc::new(StubProvider::new("down", &["gpt-4o"]));
        down.set_probe_ok(false);
        let state = state(
            ConfigFactory::rate_limit(100, 10),
            vec![up.clone(), down.clone()],
        );
        let app = test::init_service(create_app(state.clone())).await;

        let req = test::TestRequest::get().uri("/health/providers").to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["healthy_providers"], 2);
        assert!(body["data"]["providers"][0]["last_probe"].is_null());
        assert_eq!(down.probes(), 0);

        HealthChecker::new(
            Arc::clone(&state.manager),
            Duration::from_secs(30),
            Duration::from_secs(1),
        )
        .check_all()
        .await;

        for _ in 0..5 {
            let req = test::TestRequest::get().uri("/health/providers").to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["data"]["healthy_providers"], 1);
            assert_eq!(body["data"]["total_providers"], 2);
            let providers = body["data"]["providers"].as_array().unwrap();
            assert_eq!(providers[0]["provider"], "down");
            assert_eq!(providers[0]["status"], "unhealthy");
            assert_eq!(providers[0]["last_probe"]["healthy"], false);
            assert_eq!(providers[1]["status"], "healthy");
        }
        assert_eq!(down.probes(), 1);
        assert_eq!(up.probes(), 1);
    }
}
