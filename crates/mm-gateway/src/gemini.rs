//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use mm_config::GeminiConfig;
use mm_core::entities::{GroundingCitation, Message};
use mm_core::enums::MessageRole;

use crate::error::GatewayError;
use crate::http::check_response;
use crate::instruction::SYSTEM_INSTRUCTION;
use crate::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, GoogleSearch, Tool,
};
use crate::{ModelGateway, ModelReply};

/// Reply text used when the model returns no text at all.
pub const FALLBACK_TEXT: &str = "目前數據不足，無法生成完整戰略分析。";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for the Gemini API.
pub struct GeminiGateway {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    /// Build a client from configuration. A missing API key is reported when
    /// the first request is made, not here.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("marketmind/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn send(&self, history: &[Message], text: &str) -> Result<ModelReply, GatewayError> {
        if !self.config.is_configured() {
            return Err(GatewayError::NotConfigured);
        }

        let request = build_request(&self.config, history, text);
        tracing::debug!(
            model = %self.config.model,
            turns = request.contents.len(),
            grounding = !request.tools.is_empty(),
            "sending generateContent request"
        );

        let resp = self
            .http
            .post(self.url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let body = resp.text().await?;
        parse_reply(&body)
    }
}

/// Build the request body: the newest `history_limit` settled turns, then the
/// new user turn.
#[must_use]
pub fn build_request(
    config: &GeminiConfig,
    history: &[Message],
    text: &str,
) -> GenerateContentRequest {
    let settled: Vec<&Message> = history.iter().filter(|m| !m.is_pending()).collect();
    let skip = settled.len().saturating_sub(config.history_limit);

    let mut contents: Vec<Content> = settled[skip..]
        .iter()
        .map(|m| Content::text(Some(wire_role(m.role)), m.text()))
        .collect();
    contents.push(Content::text(Some("user"), text));

    let tools = if config.search_grounding {
        vec![Tool {
            google_search: GoogleSearch {},
        }]
    } else {
        Vec::new()
    };

    GenerateContentRequest {
        system_instruction: Content::text(None, SYSTEM_INSTRUCTION),
        contents,
        tools,
        generation_config: GenerationConfig {
            temperature: config.temperature,
        },
    }
}

/// Decode a `generateContent` response body.
///
/// # Errors
///
/// Returns [`GatewayError::Parse`] if the body is not a valid response.
pub fn parse_reply(body: &str) -> Result<ModelReply, GatewayError> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Parse(e.to_string()))?;
    Ok(map_response(response))
}

fn map_response(response: GenerateContentResponse) -> ModelReply {
    let Some(candidate) = response.candidates.into_iter().next() else {
        tracing::warn!("response has no candidates");
        return ModelReply {
            text: FALLBACK_TEXT.to_string(),
            citations: Vec::new(),
        };
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = if text.trim().is_empty() {
        FALLBACK_TEXT.to_string()
    } else {
        text
    };

    let citations = candidate
        .grounding_metadata
        .map(|meta| {
            meta.grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .filter(|web| !web.uri.trim().is_empty())
                .map(|web| GroundingCitation {
                    uri: web.uri,
                    title: web.title,
                })
                .collect()
        })
        .unwrap_or_default();

    ModelReply { text, citations }
}

const fn wire_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Model => "model",
    }
}
