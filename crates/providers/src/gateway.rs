//! Retry gateway in front of a generation backend.
//!
//! Transient throttling retries with exponential backoff; hard failures
//! surface immediately. An exhausted retry budget yields a distinct
//! rate-limit error so callers can tell it apart from a backend fault.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::traits::{GenerateError, GenerationBackend};

/// Reply substituted when the backend answers with an empty body.
pub const EMPTY_REPLY_TEXT: &str = "[no response from model]";

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, first call included.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

/// Backoff before retrying after attempt `attempt` (zero-based):
/// base, 2*base, 4*base, ...
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt))
}

#[derive(Clone)]
pub struct GenerationGateway {
    backend: Arc<dyn GenerationBackend>,
    policy: RetryPolicy,
}

impl GenerationGateway {
    pub fn new(backend: Arc<dyn GenerationBackend>, policy: RetryPolicy) -> Self {
        Self { backend, policy }
    }

    /// Send one prompt through the backend, retrying throttled calls up
    /// to the policy's attempt budget. Never returns an empty reply.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        for attempt in 0..self.policy.max_attempts {
            debug!(
                backend = self.backend.name(),
                attempt = attempt + 1,
                of = self.policy.max_attempts,
                "generation attempt"
            );

            match self.backend.generate(prompt).await {
                Ok(reply) => {
                    let reply = reply.trim();
                    if reply.is_empty() {
                        return Ok(EMPTY_REPLY_TEXT.to_string());
                    }
                    return Ok(reply.to_string());
                }
                Err(err) if err.is_transient() => {
                    let delay = backoff_delay(attempt, self.policy.base_delay);
                    warn!(
                        attempt = attempt + 1,
                        delay_secs = delay.as_secs_f64(),
                        error = %err,
                        "backend throttled, backing off"
                    );
                    if attempt + 1 < self.policy.max_attempts {
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(GenerateError::RateLimited {
            attempts: self.policy.max_attempts,
        })
    }
}
