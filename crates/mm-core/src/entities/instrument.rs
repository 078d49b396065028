use serde::{Deserialize, Serialize};

use crate::enums::ActionKind;

/// A ticker the model discussed, extracted from its `[[STOCK:..]]` tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InstrumentRef {
    pub symbol: String,
    pub name: String,
}

impl InstrumentRef {
    #[must_use]
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

/// A web source the model's search tool used to support an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingCitation {
    pub uri: String,
    /// May be empty; display falls back to the URI host.
    pub title: String,
}

impl GroundingCitation {
    /// Title if present, else the host part of the URI, else the URI itself.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if !self.title.trim().is_empty() {
            return &self.title;
        }
        let without_scheme = self
            .uri
            .split_once("://")
            .map_or(self.uri.as_str(), |(_, rest)| rest);
        without_scheme
            .split(['/', '?', '#'])
            .next()
            .filter(|host| !host.is_empty())
            .unwrap_or(&self.uri)
    }
}

/// A one-click follow-up prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedAction {
    pub label: String,
    pub prompt: String,
    pub kind: ActionKind,
}
