//! Provider registry and dispatch entry points
//!
//! The registry and every metrics record sit behind one `parking_lot::RwLock`.
//! Guards are never held across an `.await`: selection works on a snapshot and
//! metrics are written back after the call returns.

use super::config::ManagerConfig;
use super::error::RouterError;
use super::load_balancer::{Candidate, LoadBalancer};
use super::metrics::{ProviderMetrics, ProviderStatus};
use crate::core::health::{HealthChecker, HealthCheckerHandle, ProbeResult};
use crate::core::traits::Provider;
use crate::core::types::{
    ChatRequest, ChatResponse, ChatStream, EmbeddingRequest, EmbeddingResponse, ModelListing,
};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Default)]
struct Registry {
    providers: BTreeMap<String, Arc<dyn Provider>>,
    metrics: BTreeMap<String, ProviderMetrics>,
    probes: BTreeMap<String, ProbeResult>,
}

/// Dispatch manager
///
/// Owns the provider registry, the load balancer and the background health
/// checker. Shared as `Arc<ProviderManager>` by request handlers.
pub struct ProviderManager {
    registry: RwLock<Registry>,
    pub(super) load_balancer: LoadBalancer,
    pub(super) config: ManagerConfig,
    health_task: Mutex<Option<HealthCheckerHandle>>,
}

impl std::fmt::Debug for ProviderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderManager")
            .field("providers", &self.provider_names())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for ProviderManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

impl ProviderManager {
    pub fn new(config: ManagerConfig) -> Self {
        info!(
            "Creating provider manager with {} load balancing",
            config.strategy
        );
        Self {
            registry: RwLock::new(Registry::default()),
            load_balancer: LoadBalancer::new(config.strategy),
            config,
            health_task: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Register a provider with fresh healthy metrics.
    ///
    /// Registering a name again replaces the provider and resets its metrics.
    pub fn register_provider(&self, provider: Arc<dyn Provider>) {
        let name = provider.name().to_string();
        let mut registry = self.registry.write();
        if registry.providers.contains_key(&name) {
            warn!("Provider {} registered again, metrics reset", name);
        }
        registry.providers.insert(name.clone(), provider);
        registry.metrics.insert(name.clone(), ProviderMetrics::new());
        registry.probes.remove(&name);
        info!("Registered provider: {}", name);
    }

    pub fn get_provider(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.registry.read().providers.get(name).cloned()
    }

    /// Registered provider names, sorted
    pub fn provider_names(&self) -> Vec<String> {
        self.registry.read().providers.keys().cloned().collect()
    }

    /// Snapshot of every registered provider
    pub fn providers(&self) -> Vec<Arc<dyn Provider>> {
        self.registry.read().providers.values().cloned().collect()
    }

    pub fn healthy_providers(&self) -> Vec<Arc<dyn Provider>> {
        let registry = self.registry.read();
        registry
            .providers
            .iter()
            .filter(|(name, _)| is_healthy(&registry.metrics, name))
            .map(|(_, provider)| provider.clone())
            .collect()
    }

    /// Healthy providers that advertise `model`
    pub fn providers_for_model(&self, model: &str) -> Vec<Arc<dyn Provider>> {
        self.candidates(model)
            .into_iter()
            .map(|candidate| candidate.provider)
            .collect()
    }

    /// Catalog of every model across providers, one entry per model name
    pub fn list_models(&self) -> Vec<ModelListing> {
        let registry = self.registry.read();
        let mut listings: BTreeMap<String, ModelListing> = BTreeMap::new();
        for (name, provider) in &registry.providers {
            for model in provider.models() {
                let entry = listings
                    .entry(model.name.clone())
                    .or_insert_with(|| ModelListing {
                        id: model.name.clone(),
                        object: "model",
                        owned_by: Vec::new(),
                        max_tokens: model.max_tokens,
                        supports_streaming: model.supports_streaming,
                    });
                entry.owned_by.push(name.clone());
                entry.max_tokens = entry.max_tokens.max(model.max_tokens);
                entry.supports_streaming |= model.supports_streaming;
            }
        }
        listings.into_values().collect()
    }

    /// Copy of every metrics record
    pub fn get_metrics(&self) -> HashMap<String, ProviderMetrics> {
        self.registry
            .read()
            .metrics
            .iter()
            .map(|(name, metrics)| (name.clone(), metrics.clone()))
            .collect()
    }

    pub fn provider_metrics(&self, name: &str) -> Option<ProviderMetrics> {
        self.registry.read().metrics.get(name).cloned()
    }

    /// Keep the latest probe result of each provider in a sweep
    pub fn record_probes(&self, results: &[ProbeResult]) {
        let mut registry = self.registry.write();
        for result in results {
            if registry.providers.contains_key(&result.provider) {
                registry
                    .probes
                    .insert(result.provider.clone(), result.clone());
            }
        }
    }

    /// Latest probe result per provider, absent until its first sweep
    pub fn last_probes(&self) -> BTreeMap<String, ProbeResult> {
        self.registry.read().probes.clone()
    }

    /// Restore a provider to healthy. Returns `true` if its status changed.
    pub fn mark_healthy(&self, name: &str) -> bool {
        self.set_status(name, ProviderStatus::Healthy)
    }

    /// Force a provider out of rotation. Returns `true` if its status changed.
    pub fn mark_unhealthy(&self, name: &str) -> bool {
        self.set_status(name, ProviderStatus::Unhealthy)
    }

    fn set_status(&self, name: &str, status: ProviderStatus) -> bool {
        let mut registry = self.registry.write();
        match registry.metrics.get_mut(name) {
            Some(metrics) if metrics.status != status => {
                metrics.status = status;
                true
            }
            _ => false,
        }
    }

    /// Healthy providers advertising `model`, ordered by name
    pub(super) fn candidates(&self, model: &str) -> Vec<Candidate> {
        let registry = self.registry.read();
        registry
            .providers
            .iter()
            .filter(|(_, provider)| provider.supports_model(model))
            .filter_map(|(name, provider)| {
                let metrics = registry.metrics.get(name)?;
                metrics.is_healthy().then(|| Candidate {
                    name: name.clone(),
                    provider: provider.clone(),
                    metrics: metrics.clone(),
                })
            })
            .collect()
    }

    /// Record one call outcome against a provider's metrics
    pub(super) fn record_outcome(&self, name: &str, latency: Duration, success: bool) {
        let mut registry = self.registry.write();
        let Some(metrics) = registry.metrics.get_mut(name) else {
            return;
        };
        if metrics.record(latency, success) {
            warn!(
                "Provider {} marked unhealthy: error rate {:.2} over {} requests",
                name,
                metrics.error_rate(),
                metrics.request_count
            );
        }
    }

    /// Chat completion with retry and failover
    pub async fn dispatch(&self, request: ChatRequest) -> Result<ChatResponse, RouterError> {
        let model = request.model.clone();
        self.execute_with_retry(&model, |provider| {
            let request = request.clone();
            async move {
                let mut response = provider.chat(request).await?;
                response
                    .provider
                    .get_or_insert_with(|| provider.name().to_string());
                Ok(response)
            }
        })
        .await
    }

    /// Embeddings with retry and failover
    pub async fn dispatch_embeddings(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, RouterError> {
        let model = request.model.clone();
        self.execute_with_retry(&model, |provider| {
            let request = request.clone();
            async move {
                let mut response = provider.embeddings(request).await?;
                response
                    .provider
                    .get_or_insert_with(|| provider.name().to_string());
                Ok(response)
            }
        })
        .await
    }

    /// Streaming chat: one selection, no retry.
    ///
    /// Metrics record whether the stream could be opened, with the time it
    /// took to open it.
    pub async fn dispatch_stream(&self, request: ChatRequest) -> Result<ChatStream, RouterError> {
        let candidates = self.candidates(&request.model);
        if candidates.is_empty() {
            return Err(RouterError::NoCandidate {
                model: request.model,
            });
        }
        let provider = self.load_balancer.select(&candidates)?.provider.clone();
        debug!(
            "Opening stream for model {} on {}",
            request.model,
            provider.name()
        );

        let start = Instant::now();
        let result = self
            .call_with_deadline(&provider, provider.chat_stream(request))
            .await;
        self.record_outcome(provider.name(), start.elapsed(), result.is_ok());

        result.map_err(RouterError::from)
    }

    /// Spawn the background health checker if enabled and not yet running
    pub fn start_health_checker(self: &Arc<Self>) {
        if !self.config.health_check_enabled {
            info!("Health checking disabled");
            return;
        }
        let mut task = self.health_task.lock();
        if task.is_some() {
            return;
        }
        let checker = HealthChecker::new(
            Arc::clone(self),
            self.config.health_check_interval,
            self.config.health_check_timeout,
        );
        *task = Some(checker.start());
    }

    /// Stop the background health checker and wait for it to exit
    pub async fn shutdown(&self) {
        let handle = self.health_task.lock().take();
        if let Some(handle) = handle {
            handle.stop().await;
        }
        info!("Provider manager stopped");
    }
}

fn is_healthy(metrics: &BTreeMap<String, ProviderMetrics>, name: &str) -> bool {
    metrics.get(name).is_some_and(ProviderMetrics::is_healthy)
}
