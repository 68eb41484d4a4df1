pub mod gateway;
pub mod gemini;
pub mod traits;

pub use gateway::{backoff_delay, GenerationGateway, RetryPolicy, EMPTY_REPLY_TEXT};
pub use gemini::{GeminiClient, DEFAULT_MODEL};
pub use traits::{GenerateError, GenerationBackend};
