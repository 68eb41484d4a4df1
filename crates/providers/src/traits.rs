use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GenerateError {
    /// Transient backend condition (HTTP 429 or exhausted quota). The
    /// gateway retries these; everything else fails fast.
    #[error("backend throttled: {0}")]
    Throttled(String),
    /// Retries exhausted on a throttled backend.
    #[error("API rate limit exceeded after {attempts} attempts. Please try again in a moment.")]
    RateLimited { attempts: u32 },
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl GenerateError {
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerateError::Throttled(_))
    }
}

/// A text-in, text-out generation backend. One call, no retry; the retry
/// policy lives in the gateway that wraps this.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    fn name(&self) -> &str;
}
