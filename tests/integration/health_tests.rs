//! Health checker integration tests
//!
//! These run the real background task with short intervals.

#[cfg(test)]
mod tests {
    use crate::common::{ChatRequestFactory, StubProvider};
    use dispatch_gateway::core::health::HealthChecker;
    use dispatch_gateway::core::router::{ManagerConfig, ProviderManager, ProviderStatus};
    use std::sync::Arc;
    use std::time::Duration;

    fn manager(health_check_enabled: bool) -> Arc<ProviderManager> {
        Arc::new(ProviderManager::new(ManagerConfig {
            health_check_enabled,
            health_check_interval: Duration::from_millis(40),
            health_check_timeout: Duration::from_millis(20),
            max_attempts: 1,
            retry_delay: Duration::ZERO,
            ..Default::default()
        }))
    }

    fn status(manager: &ProviderManager, name: &str) -> ProviderStatus {
        manager.provider_metrics(name).unwrap().status
    }

    #[tokio::test]
    async fn test_background_sweeps_demote_and_heal() {
        let manager = manager(true);
        let provider = Arc::new(StubProvider::new("p", &["m1"]));
        manager.register_provider(provider.clone());
        manager.start_health_checker();

        provider.set_probe_ok(false);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(status(&manager, "p"), ProviderStatus::Unhealthy);
        assert!(manager.dispatch(ChatRequestFactory::simple("m1")).await.is_err());

        provider.set_probe_ok(true);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(status(&manager, "p"), ProviderStatus::Healthy);
        assert!(manager.dispatch(ChatRequestFactory::simple("m1")).await.is_ok());

        manager.shutdown().await;
        let probes = provider.probes();
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(provider.probes(), probes, "no sweeps after shutdown");
    }

    #[tokio::test]
    async fn test_disabled_checker_never_probes() {
        let manager = manager(false);
        let provider = Arc::new(StubProvider::new("p", &["m1"]));
        manager.register_provider(provider.clone());
        manager.start_health_checker();

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(provider.probes(), 0);
        manager.shutdown().await;
    }

    #[tokio::test]
    async fn test_check_all_reports_every_provider() {
        let manager = manager(false);
        let up = Arc::new(StubProvider::new("up", &["m1"]));
        let down = Arc::new(StubProvider::new("down", &["m1"]));
        down.set_probe_ok(false);
        manager.register_provider(up.clone());
        manager.register_provider(down.clone());

        let checker = HealthChecker::new(
            Arc::clone(&manager),
            Duration::from_secs(30),
            Duration::from_millis(200),
        );
        let mut results = checker.check_all().await;
        results.sort_by(|a, b| a.provider.cmp(&b.provider));

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].provider, "down");
        assert!(!results[0].healthy);
        assert!(results[0].status_changed);
        assert!(results[0].error.is_some());
        assert_eq!(results[1].provider, "up");
        assert!(results[1].healthy);
        assert!(!results[1].status_changed);

        assert_eq!(status(&manager, "down"), ProviderStatus::Unhealthy);
        assert_eq!(status(&manager, "up"), ProviderStatus::Healthy);
    }

    #[tokio::test]
    async fn test_manual_checker_handle_stops() {
        let manager = manager(false);
        manager.register_provider(Arc::new(StubProvider::new("p", &["m1"])));

        let handle = HealthChecker::new(
            Arc::clone(&manager),
            Duration::from_millis(20),
            Duration::from_millis(10),
        )
        .start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());
        handle.stop().await;
    }
}
