//! Background health checker
//!
//! Every interval the checker snapshots the registry, probes all providers
//! concurrently and writes the resulting status back. A failed probe always
//! marks the provider unhealthy; a successful one only restores a provider
//! that was unhealthy.

use super::types::ProbeResult;
use crate::core::router::ProviderManager;
use crate::core::traits::Provider;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Periodic prober of every registered provider
#[derive(Debug, Clone)]
pub struct HealthChecker {
    manager: Arc<ProviderManager>,
    interval: Duration,
    timeout: Duration,
}

/// Handle to a running health checker task
#[derive(Debug)]
pub struct HealthCheckerHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl HealthCheckerHandle {
    /// Signal the task to stop and wait for it to exit
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            warn!("Health checker task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl HealthChecker {
    pub fn new(manager: Arc<ProviderManager>, interval: Duration, timeout: Duration) -> Self {
        Self {
            manager,
            interval,
            timeout,
        }
    }

    /// Spawn the periodic sweep. The first sweep runs one interval after start.
    pub fn start(self) -> HealthCheckerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        info!(
            "Starting health checker (interval: {:?}, timeout: {:?})",
            self.interval, self.timeout
        );

        let task = tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval_at(tokio::time::Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        self.check_all().await;
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("Health checker stopped");
        });

        HealthCheckerHandle { stop_tx, task }
    }

    /// Probe every registered provider once and apply the results
    pub async fn check_all(&self) -> Vec<ProbeResult> {
        let providers = self.manager.providers();
        debug!("Health sweep over {} providers", providers.len());

        let probes = providers.into_iter().map(|provider| self.check_provider(provider));
        let results = join_all(probes).await;
        self.manager.record_probes(&results);
        results
    }

    async fn check_provider(&self, provider: Arc<dyn Provider>) -> ProbeResult {
        let name = provider.name().to_string();
        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, provider.health_check()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("probe timed out after {:?}", self.timeout)),
        };
        let latency_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                let status_changed = self.manager.mark_healthy(&name);
                if status_changed {
                    info!("Provider {} recovered, back in rotation", name);
                }
                ProbeResult {
                    provider: name,
                    healthy: true,
                    latency_ms,
                    error: None,
                    status_changed,
                }
            }
            Err(error) => {
                let status_changed = self.manager.mark_unhealthy(&name);
                warn!("Health probe failed for {}: {}", name, error);
                ProbeResult {
                    provider: name,
                    healthy: false,
                    latency_ms,
                    error: Some(error),
                    status_changed,
                }
            }
        }
    }
}
