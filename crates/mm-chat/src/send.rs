use mm_core::entities::Message;
use serde::Serialize;

/// Shown in place of an answer when the model call fails.
pub const FAILURE_TEXT: &str = "系統錯誤：無法連接全球市場數據流。請檢查您的網路連線或 API 金鑰。";

/// Where a send came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOrigin {
    /// Typed by the user.
    Input,
    /// A suggested action or chart timeframe toggle.
    Action,
    /// A watchlist entry was selected.
    Watchlist,
}

/// An accepted send awaiting the model's answer.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub placeholder_id: String,
    pub text: String,
    /// Settled turns before the new user turn, newest last.
    pub history: Vec<Message>,
    pub origin: SendOrigin,
}

/// Result of settling a send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendOutcome {
    /// Id of the model message that was settled.
    pub message_id: String,
    /// The answer could not be obtained and the failure text was shown.
    pub failed: bool,
    /// Input focus goes back to the text box (direct user sends only).
    pub restore_input: bool,
}
