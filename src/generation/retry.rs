use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

use super::{GenerationError, GenerationRequest, TextGenerator};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

// 2^16 base units is already far beyond any sensible wait.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Delay before the retry that follows failed attempt `attempt` (counted from 0):
/// `base * 2^attempt`, no jitter.
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    let capped_attempt = attempt.min(MAX_BACKOFF_EXPONENT);
    base.saturating_mul(2_u32.saturating_pow(capped_attempt))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. Zero behaves like one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

/// Wraps a [`TextGenerator`] with bounded exponential backoff on API errors.
#[derive(Clone)]
pub struct RetryingGenerator {
    inner: Arc<dyn TextGenerator>,
    policy: RetryPolicy,
}

impl RetryingGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    #[instrument(skip_all, fields(expect_json = request.expect_json))]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match self.inner.generate(request).await {
                Ok(text) => {
                    debug!(
                        "Generation succeeded on attempt {} ({} bytes)",
                        attempt + 1,
                        text.len()
                    );
                    return Ok(text);
                }
                Err(GenerationError::Api(message)) if attempt + 1 < max_attempts => {
                    let delay = backoff_delay(attempt, self.policy.base_delay);
                    warn!(
                        "Generation API error ({}), retrying in {:?} (attempt {}/{})",
                        message,
                        delay,
                        attempt + 1,
                        max_attempts
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(GenerationError::Api(message)) => {
                    error!(
                        "Generation failed after {} attempts: {}",
                        max_attempts, message
                    );
                    return Err(GenerationError::Exhausted {
                        attempts: max_attempts,
                        last: message,
                    });
                }
                Err(err) => {
                    error!("Generation failed without retry: {}", err);
                    return Err(err);
                }
            }
        }
    }
}
