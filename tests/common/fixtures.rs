//! Test fixtures and data factories

use dispatch_gateway::config::{Config, RateLimitConfig};
use dispatch_gateway::core::router::{ManagerConfig, ProviderManager};
use dispatch_gateway::core::types::{ChatMessage, ChatRequest, EmbeddingRequest};
use std::sync::Arc;
use std::time::Duration;

/// Factory for chat requests
pub struct ChatRequestFactory;

impl ChatRequestFactory {
    /// One user message for `model`
    pub fn simple(model: &str) -> ChatRequest {
        ChatRequest::new(model, vec![ChatMessage::user("Hello")])
    }

    pub fn streaming(model: &str) -> ChatRequest {
        let mut request = Self::simple(model);
        request.stream = true;
        request
    }

    pub fn embedding(model: &str) -> EmbeddingRequest {
        EmbeddingRequest {
            model: model.to_string(),
            input: vec!["first".to_string(), "second".to_string()],
            user: None,
        }
    }
}

/// Factory for configuration objects
pub struct ConfigFactory;

impl ConfigFactory {
    /// Manager settings with no delays and no background work
    pub fn manager(max_attempts: u32) -> ManagerConfig {
        ManagerConfig {
            health_check_enabled: false,
            max_attempts,
            retry_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    pub fn shared_manager(max_attempts: u32) -> Arc<ProviderManager> {
        Arc::new(ProviderManager::new(Self::manager(max_attempts)))
    }

    pub fn rate_limit(global_limit: u32, user_limit: u32) -> RateLimitConfig {
        RateLimitConfig {
            enabled: true,
            global_limit,
            user_limit,
            window_secs: 60,
            fail_open: true,
        }
    }

    /// Complete gateway configuration as YAML
    pub fn yaml() -> &'static str {
        r#"
server:
  host: 127.0.0.1
  port: 9090
logging:
  level: debug
  format: json
router:
  strategy: least_requests
  retry:
    enabled: true
    max_attempts: 4
    delay_ms: 250
  health_check:
    enabled: true
    interval_secs: 15
    timeout_secs: 3
rate_limit:
  global_limit: 500
  user_limit: 20
  window_secs: 30
  fail_open: false
redis:
  enabled: false
providers:
  - name: primary
    base_url: https://primary.invalid/v1
    api_key: sk-primary
    models:
      - name: gpt-4o
        max_tokens: 128000
  - name: backup
    base_url: https://backup.invalid/v1
    enabled: false
    models:
      - name: gpt-4o
"#
    }

    pub fn parsed() -> Config {
        Config::from_yaml_str(Self::yaml()).unwrap()
    }
}
