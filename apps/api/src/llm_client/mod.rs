//! LLM client: the single point of entry for all Gemini API calls.
//!
//! No other module talks to the provider directly. The interview flow only
//! sees the `TextGenerator` trait so it can run against a fake in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MAX_OUTPUT_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Network failures, 429 and 5xx are worth another attempt; everything else is final.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(_) | LlmError::RateLimited { .. } => true,
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::MissingApiKey | LlmError::Parse(_) | LlmError::EmptyContent => false,
        }
    }
}

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl LlmResponse {
    /// Joins the text parts of the first candidate. `None` when there is no text at all.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single LLM client used by the interview flow.
/// Wraps the Gemini `generateContent` endpoint with retry logic.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/{}:generateContent", self.model)
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    /// Retries transient failures with exponential backoff.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let request_body = build_request(prompt);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(self.endpoint())
                .header("x-goog-api-key", api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                let error = LlmError::Api {
                    status: status.as_u16(),
                    message,
                };
                if error.is_transient() {
                    warn!("LLM API returned {}: {}", status, error);
                    last_error = Some(error);
                    continue;
                }
                return Err(error);
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };
            let llm_response = parse_response(&body)?;

            if let Some(usage) = &llm_response.usage_metadata {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                    usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response.text().ok_or(LlmError::EmptyContent)
    }
}

/// A body that is not a `generateContent` response is a permanent `Parse` error.
fn parse_response(body: &str) -> Result<LlmResponse, LlmError> {
    Ok(serde_json::from_str(body)?)
}

fn build_request(prompt: &str) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: GenerationConfig {
            max_output_tokens: MAX_OUTPUT_TOKENS,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request("Ask one question")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "Ask one question"}]}],
                "generationConfig": {"maxOutputTokens": MAX_OUTPUT_TOKENS}
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: LlmResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Tell me about "}, {"text": "PyTorch.\n"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 5}
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("Tell me about PyTorch."));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_response_without_text_is_none() {
        let response: LlmResponse =
            serde_json::from_value(json!({"candidates": [{"content": {"parts": []}}]})).unwrap();
        assert!(response.text().is_none());

        let blocked: LlmResponse = serde_json::from_value(json!({})).unwrap();
        assert!(blocked.text().is_none());
    }

    #[test]
    fn test_undecodable_body_is_permanent_parse_error() {
        let err = parse_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
        assert!(!err.is_transient());

        let ok = parse_response(r#"{"candidates": [{"content": {"parts": [{"text": "Hi"}]}}]}"#)
            .unwrap();
        assert_eq!(ok.text().as_deref(), Some("Hi"));
    }

    #[test]
    fn test_transient_classification() {
        let rate_limited = LlmError::Api {
            status: 429,
            message: "quota".into(),
        };
        let unavailable = LlmError::Api {
            status: 503,
            message: "overloaded".into(),
        };
        let bad_key = LlmError::Api {
            status: 403,
            message: "API key not valid".into(),
        };
        assert!(rate_limited.is_transient());
        assert!(unavailable.is_transient());
        assert!(!bad_key.is_transient());
        assert!(!LlmError::MissingApiKey.is_transient());
        assert!(!LlmError::EmptyContent.is_transient());
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = GeminiClient::new(None, "gemini-1.5-flash".into());
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }

    #[test]
    fn test_endpoint_includes_model() {
        let client = GeminiClient::new(Some("k".into()), "gemini-1.5-flash".into());
        assert!(client
            .endpoint()
            .ends_with("/models/gemini-1.5-flash:generateContent"));
    }
}
