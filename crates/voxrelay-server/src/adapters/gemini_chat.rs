//! Gemini `generateContent` chat provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use voxrelay::{
    ChatMessage, ChatProvider, CompletionOptions, CompletionResponse, DomainError, MessageRole,
    TokenUsage,
};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone)]
pub struct GeminiChatProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiChatProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the Gemini model name if needed.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the provider at another `.../models` endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

// ============================================
// Request/Response Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

fn text_part(text: &str) -> Part {
    Part {
        text: text.to_string(),
    }
}

/// System messages are folded into `systemInstruction`; Gemini calls the
/// assistant side "model".
fn build_request(messages: &[ChatMessage], options: &CompletionOptions) -> GenerateContentRequest {
    let system_parts: Vec<Part> = messages
        .iter()
        .filter(|m| m.role == MessageRole::System)
        .map(|m| text_part(&m.content))
        .collect();

    let contents = messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .map(|m| Content {
            role: match m.role {
                MessageRole::Assistant => "model".to_string(),
                _ => "user".to_string(),
            },
            parts: vec![text_part(&m.content)],
        })
        .collect();

    GenerateContentRequest {
        system_instruction: (!system_parts.is_empty()).then_some(SystemInstruction {
            parts: system_parts,
        }),
        contents,
        generation_config: GenerationConfig {
            max_output_tokens: options.max_tokens,
            temperature: options.temperature,
        },
    }
}

#[async_trait]
impl ChatProvider for GeminiChatProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&build_request(messages, options))
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(DomainError::upstream(format!(
                "Gemini API error ({}): {}",
                status, body
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Gemini response: {e}")))?;

        let candidate = payload
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::upstream("Gemini returned no candidates"))?;

        let content = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        let usage = payload.usage_metadata.unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
            finish_reason: candidate.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
