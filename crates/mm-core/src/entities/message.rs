use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::instrument::{GroundingCitation, InstrumentRef, SuggestedAction};
use crate::enums::{MessageRole, MessageStatus};
use crate::errors::CoreError;

/// Displayable payload of a resolved message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<GroundingCitation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<SuggestedAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<InstrumentRef>,
    /// SVG markup extracted from the answer's chart block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_markup: Option<String>,
}

impl Reply {
    /// A reply with text only.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Two-phase state of a conversation entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MessageState {
    Pending,
    Resolved(Reply),
    Failed { message: String },
}

impl MessageState {
    #[must_use]
    pub const fn status(&self) -> MessageStatus {
        match self {
            Self::Pending => MessageStatus::Pending,
            Self::Resolved(_) => MessageStatus::Resolved,
            Self::Failed { .. } => MessageStatus::Failed,
        }
    }
}

/// One turn in the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: MessageState,
}

impl Message {
    /// A user turn. User turns never carry actions, citations or instruments.
    #[must_use]
    pub fn user(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::User,
            created_at: Utc::now(),
            state: MessageState::Resolved(Reply::plain(text)),
        }
    }

    /// A model turn awaiting its answer.
    #[must_use]
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: MessageRole::Model,
            created_at: Utc::now(),
            state: MessageState::Pending,
        }
    }

    #[must_use]
    pub const fn status(&self) -> MessageStatus {
        self.state.status()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, MessageState::Pending)
    }

    /// Display text. Empty while pending.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.state {
            MessageState::Pending => "",
            MessageState::Resolved(reply) => &reply.text,
            MessageState::Failed { message } => message,
        }
    }

    #[must_use]
    pub fn citations(&self) -> &[GroundingCitation] {
        match &self.state {
            MessageState::Resolved(reply) => &reply.citations,
            _ => &[],
        }
    }

    #[must_use]
    pub fn suggested_actions(&self) -> &[SuggestedAction] {
        match &self.state {
            MessageState::Resolved(reply) => &reply.suggested_actions,
            _ => &[],
        }
    }

    #[must_use]
    pub fn instrument(&self) -> Option<&InstrumentRef> {
        match &self.state {
            MessageState::Resolved(reply) => reply.instrument.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn chart_markup(&self) -> Option<&str> {
        match &self.state {
            MessageState::Resolved(reply) => reply.chart_markup.as_deref(),
            _ => None,
        }
    }

    /// Transition `pending → resolved`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the message is not pending.
    pub fn resolve(&mut self, reply: Reply) -> Result<(), CoreError> {
        self.transition(MessageState::Resolved(reply))
    }

    /// Transition `pending → failed`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if the message is not pending.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CoreError> {
        self.transition(MessageState::Failed {
            message: message.into(),
        })
    }

    fn transition(&mut self, next: MessageState) -> Result<(), CoreError> {
        let from = self.status();
        let to = next.status();
        if !from.can_transition_to(to) {
            return Err(CoreError::InvalidTransition {
                entity_type: "message".to_string(),
                id: self.id.clone(),
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }
}
