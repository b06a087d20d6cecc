//! Client for the external text/JSON generation API.
//!
//! The client is constructed explicitly from configuration and passed by
//! reference to whatever needs it; there is no module-level singleton. A
//! missing credential means no client is constructed at all and callers
//! surface an unavailable state instead.

mod sse;

use crate::config::GeminiConfig;
use crate::domain::{ChatMessage, Sender};
use async_trait::async_trait;
use futures_util::stream::{self, BoxStream};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

pub use sse::SseDecoder;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("generation API returned no text candidates")]
    EmptyResponse,
}

pub type ChunkStream = BoxStream<'static, Result<String, GenerationError>>;

/// Seam over the generation API so insight operations can be exercised with a
/// scripted model in tests. Failed calls are not retried; the caller decides
/// what the failure looks like in its own state.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Single-shot generation. `json_mode` asks the API for a JSON-shaped
    /// text payload; the result still goes through the response normalizer.
    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String, GenerationError>;

    /// Streaming reply to a conversation. The whole history conditions the
    /// reply; chunks are yielded strictly in arrival order.
    async fn stream_chat(&self, history: &[ChatMessage]) -> Result<ChunkStream, GenerationError>;
}

/// Talks to the Gemini REST API over HTTPS.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    system_instruction: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            system_instruction: None,
        }
    }

    /// Builds a client from configuration, or `None` when no credential is
    /// present.
    pub fn from_config(config: &GeminiConfig) -> Option<Self> {
        config
            .api_key
            .as_deref()
            .map(|key| Self::new(key, config.model.clone()))
    }

    /// Adds a system instruction sent alongside every request.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    fn request_body<'a>(&'a self, prompt: &'a str, json_mode: bool) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: self.instruction_content(),
            generation_config: json_mode.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        }
    }

    /// Maps a transcript onto the API's alternating user/model contents.
    /// Service-side system notices never travel back to the API.
    fn chat_request_body<'a>(&'a self, history: &'a [ChatMessage]) -> GenerateContentRequest<'a> {
        let contents = history
            .iter()
            .filter_map(|message| {
                let role = match message.sender {
                    Sender::User => "user",
                    Sender::Bot => "model",
                    Sender::System => return None,
                };
                Some(Content {
                    role,
                    parts: vec![Part {
                        text: &message.text,
                    }],
                })
            })
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: self.instruction_content(),
            generation_config: None,
        }
    }

    fn instruction_content(&self) -> Option<Content<'_>> {
        self.system_instruction.as_deref().map(|text| Content {
            role: "system",
            parts: vec![Part { text }],
        })
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GenerationError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read error body".to_string());
        Err(GenerationError::Api {
            status,
            message: extract_api_message(&body),
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str, json_mode: bool) -> Result<String, GenerationError> {
        let url = format!(
            "{BASE_URL}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(&self.request_body(prompt, json_mode))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let parsed: GenerateContentResponse = response.json().await?;
        extract_text(parsed).ok_or(GenerationError::EmptyResponse)
    }

    async fn stream_chat(&self, history: &[ChatMessage]) -> Result<ChunkStream, GenerationError> {
        let url = format!(
            "{BASE_URL}/{model}:streamGenerateContent?key={key}&alt=sse",
            model = self.model,
            key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(&self.chat_request_body(history))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let mut decoder = SseDecoder::new();
        let chunks = response
            .bytes_stream()
            .map(move |piece| match piece {
                Ok(bytes) => decoder.feed(&bytes).into_iter().map(Ok).collect(),
                Err(err) => vec![Err(GenerationError::Transport(err))],
            })
            .flat_map(stream::iter)
            .boxed();

        Ok(chunks)
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

pub(crate) fn extract_text(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.swap_remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
}

fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status = wrapper.error.status.unwrap_or_default();
            let message = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status.is_empty() {
                message
            } else {
                format!("{status}: {message}")
            }
        })
        .unwrap_or_else(|_| body.to_string())
}
