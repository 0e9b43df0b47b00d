//! Candidate selection
//!
//! The balancer never touches the registry: the manager hands it a snapshot
//! of candidates ordered by provider name.

use super::config::LoadBalanceStrategy;
use super::error::RouterError;
use super::metrics::ProviderMetrics;
use crate::core::traits::Provider;
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Lowest score the weighted strategy assigns
pub const MIN_WEIGHT: f64 = 0.1;

/// A provider eligible for one selection, with a copy of its metrics
#[derive(Clone)]
pub struct Candidate {
    pub name: String,
    pub provider: Arc<dyn Provider>,
    pub metrics: ProviderMetrics,
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("metrics", &self.metrics)
            .finish()
    }
}

/// Strategy-driven selector
#[derive(Debug)]
pub struct LoadBalancer {
    strategy: LoadBalanceStrategy,
    counter: AtomicUsize,
}

impl LoadBalancer {
    pub fn new(strategy: LoadBalanceStrategy) -> Self {
        Self {
            strategy,
            counter: AtomicUsize::new(0),
        }
    }

    pub fn strategy(&self) -> LoadBalanceStrategy {
        self.strategy
    }

    /// Pick one candidate according to the configured strategy
    pub fn select<'a>(&self, candidates: &'a [Candidate]) -> Result<&'a Candidate, RouterError> {
        if candidates.is_empty() {
            return Err(RouterError::EmptyCandidateSet);
        }

        let selected = match self.strategy {
            LoadBalanceStrategy::RoundRobin => self.select_round_robin(candidates),
            LoadBalanceStrategy::Random => Self::select_random(candidates),
            LoadBalanceStrategy::LeastRequests => Self::select_least_requests(candidates),
            LoadBalanceStrategy::Weighted => Self::select_weighted(candidates),
        };
        Ok(selected)
    }

    fn select_round_robin<'a>(&self, candidates: &'a [Candidate]) -> &'a Candidate {
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % candidates.len();
        debug!(
            "Round-robin selected provider at index {}: {}",
            index, candidates[index].name
        );
        &candidates[index]
    }

    fn select_random(candidates: &[Candidate]) -> &Candidate {
        let mut rng = rand::thread_rng();
        let index = rng.gen_range(0..candidates.len());
        debug!(
            "Random selected provider at index {}: {}",
            index, candidates[index].name
        );
        &candidates[index]
    }

    fn select_least_requests(candidates: &[Candidate]) -> &Candidate {
        let mut best = &candidates[0];
        for candidate in &candidates[1..] {
            if candidate.metrics.request_count < best.metrics.request_count {
                best = candidate;
            }
        }
        debug!(
            "Least-requests selected provider: {} ({} requests)",
            best.name, best.metrics.request_count
        );
        best
    }

    fn select_weighted(candidates: &[Candidate]) -> &Candidate {
        let mut best = &candidates[0];
        let mut best_score = weighted_score(&best.metrics);
        for candidate in &candidates[1..] {
            let score = weighted_score(&candidate.metrics);
            if score > best_score {
                best = candidate;
                best_score = score;
            }
        }
        debug!(
            "Weighted selected provider: {} (score: {:.3})",
            best.name, best_score
        );
        best
    }
}

/// Score used by the weighted strategy
///
/// Starts at 1.0, scaled by the success rate once any request was recorded and
/// by a latency penalty of half the average latency in seconds (capped at 1).
pub fn weighted_score(metrics: &ProviderMetrics) -> f64 {
    let mut score = 1.0;
    if metrics.request_count > 0 {
        score *= 1.0 - metrics.error_rate();
    }
    let latency_penalty = (metrics.avg_latency.as_secs_f64() * 0.5).min(1.0);
    score *= 1.0 - latency_penalty;
    score.max(MIN_WEIGHT)
}
