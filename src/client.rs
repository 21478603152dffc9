//! Google Gemini client for the Firebox assistant.
//!
//! This module wraps the Gemini `generateContent` endpoint behind the
//! [`GenerationProvider`] trait. The required method, [`generate`], is the
//! typed seam: it reports upstream faults as [`FireboxError::UpstreamError`]
//! and an empty/absent candidate as `Ok(None)`. The provided [`ask`] and
//! [`refine`] methods implement the user-facing contract on top of it:
//! faults are logged and degraded to sentinel or fallback text so the
//! interaction loop always has something to display.
//!
//! # Example
//! ```no_run
//! use firebox::client::{FireboxAI, GenerationProvider};
//! use firebox::config::FireboxConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = FireboxConfig::new("your-api-key").unwrap();
//!     let ai = FireboxAI::new(config);
//!     let answer = ai.ask("What is Firebox?").await;
//!     println!("{}", answer);
//! }
//! ```
//!
//! [`generate`]: GenerationProvider::generate
//! [`ask`]: GenerationProvider::ask
//! [`refine`]: GenerationProvider::refine

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{config::FireboxConfig, error::FireboxError, rewrite};

/// Sentinel returned by [`GenerationProvider::ask`] when the endpoint
/// produces an empty or absent result.
pub const NO_RESPONSE_SENTINEL: &str = "Error: No valid response from Firebox AI.";

/// Sentinel returned by [`GenerationProvider::ask`] on a transport or API
/// fault.
pub const REQUEST_FAILED_SENTINEL: &str = "An error occurred while processing the request.";

/// Client for the Gemini `generateContent` API.
///
/// Holds the validated configuration and a reusable HTTP client. The
/// instance carries no per-call mutable state and is safely reused across
/// interaction cycles.
pub struct FireboxAI {
    config: FireboxConfig,
    /// HTTP client for making API requests
    client: Client,
}

/// Request body for content generation
#[derive(Serialize)]
struct GeminiRequest<'a> {
    /// Conversation turns; a single user turn for ask/refine
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

/// Individual turn in a generation request
#[derive(Serialize)]
struct GeminiContent<'a> {
    /// Role of the message sender ("user" or "model")
    role: &'a str,
    parts: Vec<GeminiPart<'a>>,
}

/// Text content within a turn
#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

/// Generation parameters
#[derive(Serialize)]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
}

/// Response from the generation API
#[derive(Deserialize)]
struct GeminiResponse {
    /// Generated completion candidates; absent when the prompt is blocked
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// Individual completion candidate
#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiResponseContent,
}

/// Content block within a candidate
#[derive(Deserialize, Default)]
struct GeminiResponseContent {
    /// Parts may be absent when generation stopped before any text
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

/// Individual part of response content
#[derive(Deserialize)]
struct GeminiResponsePart {
    text: String,
}

impl FireboxAI {
    /// Creates a new client from a validated configuration.
    pub fn new(config: FireboxConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

/// Trait for the text-generation operations the interaction loop needs.
///
/// Implementors supply [`generate`](Self::generate); the sentinel and
/// fallback semantics of [`ask`](Self::ask) and [`refine`](Self::refine)
/// are provided on top of it, so test doubles get the full contract for
/// free.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Sends a prompt to the generation endpoint.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(text))` - the generated text, non-empty
    /// * `Ok(None)` - the endpoint answered but produced no usable text
    /// * `Err(FireboxError)` - transport or API fault
    async fn generate(&self, prompt: &str) -> Result<Option<String>, FireboxError>;

    /// Sends a prompt and degrades every failure to a sentinel string.
    ///
    /// Faults are logged, never propagated: an empty result maps to
    /// [`NO_RESPONSE_SENTINEL`] and a fault to [`REQUEST_FAILED_SENTINEL`].
    async fn ask(&self, prompt: &str) -> String {
        match self.generate(prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => NO_RESPONSE_SENTINEL.to_string(),
            Err(e) => {
                log::error!("Gemini API call error: {}", e);
                REQUEST_FAILED_SENTINEL.to_string()
            }
        }
    }

    /// Rewrites a response for tone, then substitutes possessive tokens.
    ///
    /// The rewrite instruction is either `custom_prompt` or the default
    /// template embedding `response`. On success the token substitution is
    /// applied to the rewritten text; on an empty result or a fault the
    /// original `response` is returned unchanged (the fault is logged).
    async fn refine(&self, response: &str, custom_prompt: Option<&str>) -> String {
        let prompt = match custom_prompt {
            Some(p) => p.to_string(),
            None => rewrite::default_refine_prompt(response),
        };
        match self.generate(&prompt).await {
            Ok(Some(improved)) => rewrite::replace_possessives(&improved),
            Ok(None) => response.to_string(),
            Err(e) => {
                log::error!("Response refinement error: {}", e);
                response.to_string()
            }
        }
    }
}

#[async_trait]
impl GenerationProvider for FireboxAI {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, FireboxError> {
        let req_body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            }),
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent?key={key}",
            model = self.config.model,
            key = self.config.api_key
        );

        let resp = self
            .client
            .post(&url)
            .json(&req_body)
            .send()
            .await?
            .error_for_status()?;

        log::debug!("Gemini HTTP status: {}", resp.status());

        let json_resp: GeminiResponse = resp.json().await?;
        let text = json_resp
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::FIREBOX_DESCRIPTION;

    /// Scripted provider standing in for the network client.
    struct Scripted(Result<Option<String>, ()>);

    #[async_trait]
    impl GenerationProvider for Scripted {
        async fn generate(&self, _prompt: &str) -> Result<Option<String>, FireboxError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(FireboxError::UpstreamError("status 503".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn ask_returns_text_when_generation_succeeds() {
        let provider = Scripted(Ok(Some("The sky is blue.".to_string())));
        assert_eq!(provider.ask("why is the sky blue?").await, "The sky is blue.");
    }

    #[tokio::test]
    async fn ask_maps_empty_result_to_no_response_sentinel() {
        let provider = Scripted(Ok(None));
        assert_eq!(provider.ask("hello").await, NO_RESPONSE_SENTINEL);
    }

    #[tokio::test]
    async fn ask_maps_fault_to_request_failed_sentinel() {
        let provider = Scripted(Err(()));
        assert_eq!(provider.ask("hello").await, REQUEST_FAILED_SENTINEL);
    }

    #[tokio::test]
    async fn refine_substitutes_tokens_in_rewritten_text() {
        let provider = Scripted(Ok(Some("That is your answer.".to_string())));
        assert_eq!(
            provider.refine("original", None).await,
            format!("That is {} answer.", FIREBOX_DESCRIPTION)
        );
    }

    #[tokio::test]
    async fn refine_falls_back_to_original_on_empty_result() {
        let provider = Scripted(Ok(None));
        assert_eq!(provider.refine("keep me as is", None).await, "keep me as is");
    }

    #[tokio::test]
    async fn refine_falls_back_to_original_on_fault() {
        let provider = Scripted(Err(()));
        // Fallback is verbatim: no substitution runs on the original text.
        assert_eq!(provider.refine("your answer", None).await, "your answer");
    }

    #[test]
    fn request_body_serializes_like_the_wire_format() {
        let req = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: "hello" }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: 2048,
            }),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generation_config"]["max_output_tokens"], 2048);
    }

    #[test]
    fn response_with_no_candidates_parses_as_empty() {
        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.candidates.is_empty());

        let resp: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {}}]}"#).unwrap();
        assert!(resp.candidates[0].content.parts.is_empty());
    }

    #[test]
    fn response_parts_join_into_one_text() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Hello"}, {"text": " world"}]}}]}"#,
        )
        .unwrap();
        let text: String = resp.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Hello world");
    }
}
