//! Gemini `generateContent` backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::traits::{GenerateError, GenerationBackend};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    /// Point the client at a different host. Used by tests and local
    /// proxies.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Parse(e.to_string()))?;

        Ok(extract_text(&parsed))
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

/// Split transient throttling from hard API failures. HTTP 429 and quota
/// exhaustion retry; everything else surfaces immediately.
fn classify_failure(status: StatusCode, body: &str) -> GenerateError {
    let lower = body.to_ascii_lowercase();
    let throttled = status == StatusCode::TOO_MANY_REQUESTS
        || lower.contains("resource_exhausted")
        || lower.contains("resource exhausted");
    let detail = format!("{}: {}", status, body_snippet(body));
    if throttled {
        GenerateError::Throttled(detail)
    } else {
        GenerateError::Api(detail)
    }
}

fn body_snippet(body: &str) -> String {
    let flat = body.replace('\n', " ");
    if flat.len() <= 300 {
        flat
    } else {
        let mut cut = 300;
        while !flat.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &flat[..cut])
    }
}

/// Concatenate the text parts of the first candidate. Missing candidates
/// or parts produce an empty reply, which the gateway maps to its
/// no-response text.
fn extract_text(response: &GenerateResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}
