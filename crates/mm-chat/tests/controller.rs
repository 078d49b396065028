//! Conversation controller behavior against a scripted gateway.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mm_chat::{Conversation, FAILURE_TEXT, ModelGateway, SendOrigin};
use mm_core::CoreError;
use mm_core::entities::{Message, Toggled};
use mm_core::enums::{ActionKind, MessageStatus, Timeframe, ViewMode};
use mm_gateway::{GatewayError, ModelReply};
use mm_store::{JsonFileStore, MemoryStore, WatchlistStore};
use pretty_assertions::assert_eq;

/// Returns queued results in order and records every call.
#[derive(Default)]
struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<ModelReply, GatewayError>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(usize, String)>>,
}

impl ScriptedGateway {
    fn with(replies: Vec<Result<ModelReply, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_prompt(&self) -> String {
        self.seen.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    async fn send(&self, history: &[Message], text: &str) -> Result<ModelReply, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((history.len(), text.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(answer("ok")))
    }
}

fn answer(text: &str) -> ModelReply {
    ModelReply {
        text: text.to_string(),
        citations: Vec::new(),
    }
}

const NVDA_SUMMARY: &str = "1. **目前趨勢**：多頭\n\n[[STOCK:NVDA:NVIDIA]]";
const NVDA_CHART: &str =
    "走勢如下\n```svg\n<svg><title>Daily Chart</title></svg>\n```\n[[STOCK:NVDA:NVIDIA]]";

#[tokio::test]
async fn first_send_switches_to_chat_and_resolves() {
    let gateway = ScriptedGateway::with(vec![Ok(answer(NVDA_SUMMARY))]);
    let mut chat = Conversation::new(MemoryStore::new());
    assert_eq!(chat.view(), ViewMode::Welcome);

    let outcome = chat
        .send(&gateway, "查詢 NVDA 財報與籌碼", SendOrigin::Input)
        .await
        .unwrap();

    assert_eq!(chat.view(), ViewMode::Chat);
    assert!(!chat.is_in_flight());
    assert!(!outcome.failed);
    assert!(outcome.restore_input);
    assert_eq!(chat.messages().len(), 2);

    let reply = chat.message(&outcome.message_id).unwrap();
    assert_eq!(reply.status(), MessageStatus::Resolved);
    assert_eq!(reply.text(), "1. **目前趨勢**：多頭");
    assert_eq!(reply.instrument().unwrap().symbol, "NVDA");
    assert_eq!(reply.suggested_actions().len(), 5);
}

#[tokio::test]
async fn blank_input_is_rejected() {
    let gateway = ScriptedGateway::default();
    let mut chat = Conversation::new(MemoryStore::new());
    assert!(chat.send(&gateway, "   \n", SendOrigin::Input).await.is_none());
    assert!(chat.messages().is_empty());
    assert_eq!(chat.view(), ViewMode::Welcome);
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn send_while_in_flight_is_a_noop() {
    let gateway = ScriptedGateway::default();
    let mut chat = Conversation::new(MemoryStore::new());

    let pending = chat.begin_send("first", SendOrigin::Input).unwrap();
    assert!(chat.is_in_flight());
    let len = chat.messages().len();

    assert!(chat.begin_send("second", SendOrigin::Input).is_none());
    assert!(chat.send(&gateway, "third", SendOrigin::Action).await.is_none());
    assert_eq!(chat.messages().len(), len);
    assert_eq!(gateway.calls(), 0);

    chat.complete(pending, Ok(answer("done")));
    assert!(!chat.is_in_flight());
    assert!(chat.send(&gateway, "fourth", SendOrigin::Input).await.is_some());
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn failure_only_touches_the_placeholder() {
    let gateway = ScriptedGateway::with(vec![
        Ok(answer(NVDA_SUMMARY)),
        Err(GatewayError::Api {
            status: 500,
            message: "backend".into(),
        }),
    ]);
    let mut chat = Conversation::new(MemoryStore::new());
    chat.send(&gateway, "NVDA", SendOrigin::Input).await.unwrap();
    let before: Vec<Message> = chat.messages().to_vec();

    let outcome = chat
        .send(&gateway, "again", SendOrigin::Input)
        .await
        .unwrap();

    assert!(outcome.failed);
    assert!(!chat.is_in_flight());
    assert_eq!(&chat.messages()[..before.len()], before.as_slice());
    let failed = chat.message(&outcome.message_id).unwrap();
    assert_eq!(failed.status(), MessageStatus::Failed);
    assert_eq!(failed.text(), FAILURE_TEXT);
    assert!(failed.suggested_actions().is_empty());
}

#[tokio::test]
async fn missing_credential_is_shown_as_failure() {
    let gateway = ScriptedGateway::with(vec![Err(GatewayError::NotConfigured)]);
    let mut chat = Conversation::new(MemoryStore::new());
    let outcome = chat.send(&gateway, "hi", SendOrigin::Input).await.unwrap();
    assert!(outcome.failed);
    assert_eq!(chat.messages()[1].text(), FAILURE_TEXT);
}

#[tokio::test]
async fn history_excludes_the_new_turn_and_is_capped() {
    let gateway = ScriptedGateway::default();
    let mut chat = Conversation::new(MemoryStore::new()).with_history_limit(3);

    chat.send(&gateway, "one", SendOrigin::Input).await.unwrap();
    chat.send(&gateway, "two", SendOrigin::Input).await.unwrap();
    chat.send(&gateway, "three", SendOrigin::Input).await.unwrap();

    let seen = gateway.seen.lock().unwrap().clone();
    let sizes: Vec<usize> = seen.iter().map(|(n, _)| *n).collect();
    assert_eq!(sizes, vec![0, 2, 3]);
}

#[tokio::test]
async fn action_sends_its_prompt_without_restoring_input() {
    let gateway = ScriptedGateway::with(vec![Ok(answer(NVDA_SUMMARY))]);
    let mut chat = Conversation::new(MemoryStore::new());
    let first = chat.send(&gateway, "NVDA", SendOrigin::Input).await.unwrap();

    let expected = chat.message(&first.message_id).unwrap().suggested_actions()[0].clone();
    assert_eq!(expected.kind, ActionKind::Fundamental);

    let outcome = chat
        .run_action(&gateway, &first.message_id, 0)
        .await
        .unwrap()
        .unwrap();
    assert!(!outcome.restore_input);
    assert_eq!(gateway.last_prompt(), expected.prompt);
    assert_eq!(chat.messages().len(), 4);
}

#[tokio::test]
async fn unknown_action_is_not_found() {
    let gateway = ScriptedGateway::default();
    let mut chat = Conversation::new(MemoryStore::new());
    let outcome = chat.send(&gateway, "plain", SendOrigin::Input).await.unwrap();

    let err = chat
        .run_action(&gateway, &outcome.message_id, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    let err = chat.run_action(&gateway, "msg-9999", 0).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn chart_toggle_requests_other_timeframe_only() {
    let gateway = ScriptedGateway::with(vec![Ok(answer(NVDA_CHART))]);
    let mut chat = Conversation::new(MemoryStore::new());
    let first = chat.send(&gateway, "draw", SendOrigin::Input).await.unwrap();

    let chart = chat.chart_for(&first.message_id).unwrap();
    assert_eq!(chart.timeframe, Timeframe::Daily);

    let same = chat
        .toggle_chart_timeframe(&gateway, &first.message_id, Timeframe::Daily)
        .await
        .unwrap();
    assert!(same.is_none());
    assert_eq!(gateway.calls(), 1);

    let other = chat
        .toggle_chart_timeframe(&gateway, &first.message_id, Timeframe::Weekly)
        .await
        .unwrap()
        .unwrap();
    assert!(!other.restore_input);
    assert!(gateway.last_prompt().contains("Weekly Chart"));
}

#[tokio::test]
async fn sessions_get_distinct_ids_while_message_ids_repeat() {
    let gateway = ScriptedGateway::with(vec![Ok(answer(NVDA_CHART)), Ok(answer(NVDA_CHART))]);
    let mut first = Conversation::new(MemoryStore::new());
    let mut second = Conversation::new(MemoryStore::new());

    let a = first.send(&gateway, "draw", SendOrigin::Input).await.unwrap();
    let b = second.send(&gateway, "draw", SendOrigin::Input).await.unwrap();

    assert_eq!(a.message_id, b.message_id);
    assert!(first.session_id().starts_with("ses-"));
    assert_ne!(first.session_id(), second.session_id());
}

#[tokio::test]
async fn chart_toggle_to_other_timeframe() {
    let gateway = ScriptedGateway::with(vec![Ok(answer(NVDA_CHART))]);
    let mut chat = Conversation::new(MemoryStore::new());
    let first = chat.send(&gateway, "draw", SendOrigin::Input).await.unwrap();

    let target = chat.chart_for(&first.message_id).unwrap().timeframe.other();
    assert_eq!(target, Timeframe::Weekly);
    let outcome = chat
        .toggle_chart_timeframe(&gateway, &first.message_id, target)
        .await
        .unwrap();
    assert!(outcome.is_some());
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn chart_without_own_instrument_uses_latest_one() {
    let gateway = ScriptedGateway::with(vec![
        Ok(answer(NVDA_SUMMARY)),
        Ok(answer("```svg\n<svg>週線</svg>\n```")),
    ]);
    let mut chat = Conversation::new(MemoryStore::new());
    chat.send(&gateway, "NVDA", SendOrigin::Input).await.unwrap();
    let drawn = chat.send(&gateway, "weekly", SendOrigin::Input).await.unwrap();

    let chart = chat.chart_for(&drawn.message_id).unwrap();
    assert_eq!(chart.timeframe, Timeframe::Weekly);
    assert_eq!(chart.symbol.as_deref(), Some("NVDA"));
    assert!(chat.message(&drawn.message_id).unwrap().instrument().is_none());
}

#[tokio::test]
async fn watchlist_changes_are_persisted() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("mm_watchlist.json");
    let mut chat = Conversation::new(JsonFileStore::new(&path));

    assert!(matches!(
        chat.toggle_watchlist("2330", "台積電"),
        Toggled::Added(_)
    ));
    chat.toggle_watchlist("NVDA", "NVIDIA");
    assert_eq!(JsonFileStore::new(&path).load().len(), 2);

    assert!(matches!(
        chat.toggle_watchlist("2330", "TSMC"),
        Toggled::Removed(_)
    ));
    let id = chat.watchlist().get(0).unwrap().id.clone();
    assert!(chat.remove_watchlist(&id).is_some());
    assert!(chat.remove_watchlist(&id).is_none());

    let reopened = Conversation::new(JsonFileStore::new(&path));
    assert!(reopened.watchlist().is_empty());
}

#[tokio::test]
async fn selecting_watchlist_item_sends_analysis_prompt() {
    let gateway = ScriptedGateway::default();
    let mut chat = Conversation::new(MemoryStore::new());
    chat.toggle_watchlist("2330", "台積電");

    let outcome = chat.select_watchlist(&gateway, 0).await.unwrap().unwrap();
    assert!(!outcome.restore_input);
    assert_eq!(
        gateway.last_prompt(),
        "請幫我快速分析 台積電 (2330) 目前的最新關鍵走勢與戰略建議。"
    );
    assert!(chat.select_watchlist(&gateway, 5).await.is_err());
    assert_eq!(chat.store().save_count(), 1);
}

#[test]
fn corrupt_store_starts_with_empty_watchlist() {
    let chat = Conversation::new(MemoryStore::with_raw("{broken"));
    assert!(chat.watchlist().is_empty());
}
