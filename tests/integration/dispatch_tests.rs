//! Dispatch integration tests
//!
//! Strategy behaviour over real elapsed latency, embeddings failover and
//! streaming through the public `ProviderManager` API. Retry, failover and
//! health exclusion are covered by the router's unit tests.

#[cfg(test)]
mod tests {
    use crate::common::{ChatRequestFactory, ConfigFactory, StubProvider};
    use dispatch_gateway::core::router::{
        LoadBalanceStrategy, ManagerConfig, ProviderManager, RouterError,
    };
    use dispatch_gateway::core::types::StreamEvent;
    use futures::StreamExt;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn manager_with(strategy: LoadBalanceStrategy, max_attempts: u32) -> Arc<ProviderManager> {
        Arc::new(ProviderManager::new(ManagerConfig {
            strategy,
            ..ConfigFactory::manager(max_attempts)
        }))
    }

    #[tokio::test]
    async fn test_least_requests_spreads_sequential_load() {
        let manager = manager_with(LoadBalanceStrategy::LeastRequests, 1);
        for name in ["x", "y", "z"] {
            manager.register_provider(Arc::new(StubProvider::new(name, &["m1"])));
        }

        for _ in 0..9 {
            assert_ok!(manager.dispatch(ChatRequestFactory::simple("m1")).await);
        }

        for (_, metrics) in manager.get_metrics() {
            assert_eq!(metrics.request_count, 3);
        }
    }

    #[tokio::test]
    async fn test_weighted_prefers_lower_latency() {
        let manager = manager_with(LoadBalanceStrategy::Weighted, 1);
        let slow = Arc::new(StubProvider::new("slow", &["m1"]).with_latency(Duration::from_millis(120)));
        let fast = Arc::new(StubProvider::new("fast", &["m1"]).with_latency(Duration::from_millis(5)));
        manager.register_provider(slow.clone());
        manager.register_provider(fast.clone());

        // Unmeasured providers score 1.0: the name tie-break picks "fast",
        // then "slow" still outranks the now slightly slower "fast" once
        for expected in ["fast", "slow"] {
            let response = assert_ok!(manager.dispatch(ChatRequestFactory::simple("m1")).await);
            assert_eq!(response.provider.as_deref(), Some(expected));
        }

        let mut served: HashMap<String, usize> = HashMap::new();
        for _ in 0..5 {
            let response = assert_ok!(manager.dispatch(ChatRequestFactory::simple("m1")).await);
            *served.entry(response.provider.unwrap_or_default()).or_default() += 1;
        }

        assert_eq!(served.get("fast"), Some(&5));
        assert_eq!(slow.calls(), 1);
        assert_eq!(fast.calls(), 6);
    }

    #[tokio::test]
    async fn test_embeddings_failover() {
        let manager = manager_with(LoadBalanceStrategy::RoundRobin, 2);
        manager.register_provider(Arc::new(StubProvider::new("a", &["embed"]).scripted(&[false])));
        manager.register_provider(Arc::new(StubProvider::new("b", &["embed"]).broken()));

        // First attempt goes to "a" and fails, the second goes to "b" and fails too
        let err = assert_err!(
            manager
                .dispatch_embeddings(ChatRequestFactory::embedding("embed"))
                .await
        );
        assert!(matches!(err, RouterError::ExhaustedRetries { attempts: 2, .. }));

        // "a" has no scripted failures left
        let response = assert_ok!(
            manager
                .dispatch_embeddings(ChatRequestFactory::embedding("embed"))
                .await
        );
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.provider.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_stream_dispatch_yields_chunks_then_done() {
        let manager = manager_with(LoadBalanceStrategy::RoundRobin, 3);
        manager.register_provider(Arc::new(StubProvider::new("s", &["m1"])));

        let stream = assert_ok!(manager.dispatch_stream(ChatRequestFactory::streaming("m1")).await);
        let events: Vec<StreamEvent> = stream.collect().await;

        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], StreamEvent::Chunk(_)));
        assert!(matches!(events[2], StreamEvent::Done));
        assert_eq!(manager.get_metrics()["s"].request_count, 1);
    }
}
