//! Retry and failover loop

use super::error::RouterError;
use super::manager::ProviderManager;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::traits::Provider;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

impl ProviderManager {
    /// Run `operation` against a selected provider, retrying on failure.
    ///
    /// Fails fast with `NoCandidate` when nothing can serve the model. Every
    /// attempt re-filters and re-selects, so a provider that just turned
    /// unhealthy is skipped. If a later attempt finds no candidate the loop
    /// stops early and reports the last provider error.
    pub async fn execute_with_retry<T, F, Fut>(
        &self,
        model: &str,
        operation: F,
    ) -> Result<T, RouterError>
    where
        F: Fn(Arc<dyn Provider>) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let max_attempts = self.config.effective_attempts();
        let mut last_error = None;
        let mut attempts_made = 0;

        for attempt in 1..=max_attempts {
            let candidates = self.candidates(model);
            if candidates.is_empty() {
                if attempt == 1 {
                    return Err(RouterError::NoCandidate {
                        model: model.to_string(),
                    });
                }
                debug!("No candidate left for model {} on attempt {}", model, attempt);
                break;
            }

            let provider = self.load_balancer.select(&candidates)?.provider.clone();
            attempts_made = attempt;

            let start = Instant::now();
            let result = self
                .call_with_deadline(&provider, operation(provider.clone()))
                .await;
            self.record_outcome(provider.name(), start.elapsed(), result.is_ok());

            match result {
                Ok(value) => {
                    debug!(
                        "Model {} served by {} on attempt {}",
                        model,
                        provider.name(),
                        attempt
                    );
                    return Ok(value);
                }
                Err(err) => {
                    warn!(
                        "Attempt {}/{} for model {} failed on {}: {}",
                        attempt,
                        max_attempts,
                        model,
                        provider.name(),
                        err
                    );
                    last_error = Some(err);
                    if attempt < max_attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        match last_error {
            Some(source) => Err(RouterError::ExhaustedRetries {
                model: model.to_string(),
                attempts: attempts_made,
                source,
            }),
            None => Err(RouterError::NoCandidate {
                model: model.to_string(),
            }),
        }
    }

    /// Await a provider call under the provider's configured timeout
    pub(super) async fn call_with_deadline<T, Fut>(
        &self,
        provider: &Arc<dyn Provider>,
        call: Fut,
    ) -> Result<T, ProviderError>
    where
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let deadline = provider.config().timeout;
        match tokio::time::timeout(deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::timeout(
                provider.name(),
                format!("no response within {:?}", deadline),
            )),
        }
    }
}
