//! Serde checks for entities that cross a process boundary.

use chrono::DateTime;
use mm_core::entities::*;
use mm_core::enums::*;
use pretty_assertions::assert_eq;

/// Shape written by earlier builds of the watchlist (camelCase, epoch millis).
const PERSISTED: &str = r#"[
    {"id": "1718000000000", "symbol": "2330", "name": "台積電", "addedAt": 1718000000000},
    {"id": "wl-a3f8b2c1", "symbol": "NVDA", "name": "NVIDIA", "addedAt": 1718000000500}
]"#;

#[test]
fn watchlist_reads_persisted_layout() {
    let list: Watchlist = serde_json::from_str(PERSISTED).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.get(0).unwrap().name, "台積電");
    assert_eq!(
        list.get(1).unwrap().added_at,
        DateTime::from_timestamp_millis(1_718_000_000_500).unwrap()
    );
}

#[test]
fn watchlist_roundtrip_preserves_items() {
    let mut list = Watchlist::default();
    list.toggle("BTC", "Bitcoin");
    list.toggle("GOLD", "黃金");

    let json = serde_json::to_string_pretty(&list).unwrap();
    let recovered: Watchlist = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, list);
}

#[test]
fn watchlist_rejects_type_mismatch() {
    let wrong = r#"[{"id": 1, "symbol": "NVDA", "name": "NVIDIA", "addedAt": "yesterday"}]"#;
    assert!(serde_json::from_str::<Watchlist>(wrong).is_err());
    assert!(serde_json::from_str::<Watchlist>(r#"{"symbol": "NVDA"}"#).is_err());
}

#[test]
fn resolved_message_roundtrip() {
    let mut msg = Message::placeholder("msg-0002");
    msg.resolve(Reply {
        text: "## 戰略摘要".into(),
        citations: vec![GroundingCitation {
            uri: "https://example.com/nvda".into(),
            title: "NVDA earnings".into(),
        }],
        suggested_actions: vec![SuggestedAction {
            label: "消息面".into(),
            prompt: "news".into(),
            kind: ActionKind::News,
        }],
        instrument: Some(InstrumentRef::new("NVDA", "NVIDIA")),
        chart_markup: Some("<svg><title>Daily Chart</title></svg>".into()),
    })
    .unwrap();

    let json = serde_json::to_string(&msg).unwrap();
    let recovered: Message = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, msg);
    assert_eq!(recovered.status(), MessageStatus::Resolved);
}
