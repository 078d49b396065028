//! # mm-gateway
//!
//! The single boundary between MarketMind and the hosted model.
//!
//! [`ModelGateway`] takes the recent conversation and a new user text and
//! returns the raw answer with any web citations from search grounding.
//! [`GeminiGateway`] implements it against the Gemini REST API. No retries,
//! back-off or caching happen here; a failure is returned to the caller as-is.

mod error;
mod gemini;
mod http;
mod instruction;
pub mod wire;

pub use error::GatewayError;
pub use gemini::{FALLBACK_TEXT, GeminiGateway, build_request, parse_reply};
pub use instruction::SYSTEM_INSTRUCTION;

use async_trait::async_trait;
use mm_core::entities::{GroundingCitation, Message};
use serde::Serialize;

/// Raw model answer before post-processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelReply {
    pub text: String,
    pub citations: Vec<GroundingCitation>,
}

/// Sends one conversation turn to a model.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// `history` is the conversation before the new user turn. Pending
    /// placeholders are ignored.
    async fn send(&self, history: &[Message], text: &str) -> Result<ModelReply, GatewayError>;
}
