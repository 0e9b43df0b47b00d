//! Configuration file integration tests

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use dispatch_gateway::config::{Config, LogFormat};
    use dispatch_gateway::core::router::LoadBalanceStrategy;
    use dispatch_gateway::utils::error::GatewayError;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_full_config_from_file() {
        let file = write_config(ConfigFactory::yaml());
        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.server().address(), "127.0.0.1:9090");
        assert_eq!(config.logging().format, LogFormat::Json);
        assert_eq!(config.router().strategy, LoadBalanceStrategy::LeastRequests);
        assert!(!config.rate_limit().fail_open);
        assert_eq!(config.rate_limit().window_secs, 30);
        assert!(!config.redis().enabled);

        let enabled: Vec<_> = config.gateway.enabled_providers().map(|p| p.name.as_str()).collect();
        assert_eq!(enabled, vec!["primary"]);
        assert_eq!(config.providers()[0].models[0].max_tokens, 128_000);
        assert_eq!(config.providers()[1].models[0].max_tokens, 4096);

        let manager = config.router().manager_config();
        assert_eq!(manager.max_attempts, 4);
        assert_eq!(manager.retry_delay, Duration::from_millis(250));
        assert_eq!(manager.health_check_interval, Duration::from_secs(15));
        assert_eq!(manager.health_check_timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let err = assert_err!(Config::from_file("/nonexistent/gateway.yaml").await);
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let yaml = ConfigFactory::yaml().replace("timeout_secs: 3", "timeout_secs: 60");
        let file = write_config(&yaml);
        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(err.to_string().contains("cannot exceed the interval"));
    }

    #[test]
    fn test_yaml_round_trip_keeps_settings() {
        let config = ConfigFactory::parsed();
        let yaml = assert_ok!(config.to_yaml());
        let reparsed = assert_ok!(Config::from_yaml_str(&yaml));
        assert_eq!(reparsed, config);
    }

    #[test]
    fn test_cli_overrides_apply() {
        let config = ConfigFactory::parsed().with_server_overrides(None, Some(7000));
        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 7000);
    }
}
