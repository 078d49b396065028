//! Prompt templates sent on the user's behalf.
//!
//! The product speaks Traditional Chinese; templates are kept verbatim so the
//! model sees the same phrasing as the system instruction.

use mm_core::entities::{InstrumentRef, WatchlistItem};
use mm_core::enums::{ActionKind, Timeframe};

/// Starter questions shown on the welcome view.
pub const STARTER_SUGGESTIONS: [&str; 4] = [
    "繪製 台積電 (2330) 的技術線圖",
    "分析 黃金 (Gold) 走勢",
    "查詢 NVDA 財報與籌碼",
    "比特幣 (BTC) 支撐位在哪？",
];

/// Button label for a suggested action.
#[must_use]
pub const fn action_label(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Fundamental => "基本面",
        ActionKind::Technical => "技術面",
        ActionKind::Chips => "籌碼面",
        ActionKind::Chart => "繪製線圖",
        ActionKind::News => "消息面",
    }
}

/// Follow-up prompt for a suggested action. The chart action asks for a daily chart.
#[must_use]
pub fn action_prompt(kind: ActionKind, instrument: &InstrumentRef) -> String {
    let InstrumentRef { symbol, name } = instrument;
    match kind {
        ActionKind::Fundamental => format!(
            "請專注分析 {name} ({symbol}) 的基本面數據。包括 EPS、營收成長率、本益比河流圖位階，以及證券分析師評價。"
        ),
        ActionKind::Technical => format!(
            "請對 {name} ({symbol}) 進行技術面診斷。綜合分析均線 (MA) 排列、KD/RSI 指標狀態、MACD 趨勢。"
        ),
        ActionKind::Chips => format!(
            "請深度分析 {name} ({symbol}) 的籌碼面。重點關注外資、投信買賣超，與融資融券變化。"
        ),
        ActionKind::Chart => format!(
            "請為 {name} ({symbol}) 繪製「日線」技術分析示意圖 (SVG)。\n需求：\n1. 日線 K 線結構 (綠漲紅跌)\n2. 關鍵支撐與壓力線\n3. 20日與60日均線趨勢\nSVG Title 設定為 \"Daily Chart\"。"
        ),
        ActionKind::News => {
            format!("搜集 {name} ({symbol}) 近期的市場消息、法說會重點，以及 PTT/社群論壇情緒。")
        }
    }
}

/// Prompt asking the model to redraw a chart in `timeframe`.
///
/// `title` is appended after the symbol when known (usually the instrument name).
#[must_use]
pub fn chart_timeframe_prompt(symbol: &str, title: Option<&str>, timeframe: Timeframe) -> String {
    let title = title.unwrap_or_default();
    match timeframe {
        Timeframe::Daily => format!(
            "請為 {symbol} {title} 繪製「日線」技術分析圖 (Daily Chart)，包含 MA20/60 與關鍵支撐壓力。"
        ),
        Timeframe::Weekly => format!(
            "請為 {symbol} {title} 繪製「週線」技術分析圖 (Weekly Chart)，展示中長期趨勢結構。"
        ),
    }
}

/// Prompt sent when a watchlist entry is selected.
#[must_use]
pub fn watchlist_analysis_prompt(item: &WatchlistItem) -> String {
    format!(
        "請幫我快速分析 {} ({}) 目前的最新關鍵走勢與戰略建議。",
        item.name, item.symbol
    )
}
