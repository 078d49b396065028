//! Welcome view and the macro ticker line.

use mm_parser::prompts::STARTER_SUGGESTIONS;

use super::style::{self, paint};

/// Static macro indicators: label and stance.
pub const TICKER: [(&str, &str); 7] = [
    ("加權指數 TWSE", "台股動向"),
    ("S&P 500", "觀察中"),
    ("VIX (恐慌)", "監控中"),
    ("黃金 GOLD", "避險"),
    ("原油 CRUDE", "供給面"),
    ("BTC/USD", "風險資產"),
    ("10年期美債", "利率政策"),
];

#[must_use]
pub fn render_header(color: bool) -> String {
    format!(
        "{}  {}",
        paint("MarketMind", style::BOLD_GREEN, color),
        paint("AI 戰略軍師", style::DIM, color)
    )
}

#[must_use]
pub fn render_ticker(color: bool) -> String {
    TICKER
        .iter()
        .map(|(label, value)| format!("{} {value}", paint(label, style::BOLD, color)))
        .collect::<Vec<_>>()
        .join(&paint(" │ ", style::DIM, color))
}

#[must_use]
pub fn render_welcome(show_ticker: bool, color: bool) -> String {
    let mut lines = vec![render_header(color)];
    if show_ticker {
        lines.push(render_ticker(color));
    }
    lines.push(String::new());
    lines.push(paint("全方位市場情報 / AI 戰略指揮中心", style::BOLD_WHITE, color));
    lines.push("我是您的投資軍師，由 Google Gemini 驅動。".to_string());
    lines.push(format!(
        "具備 {} 與多維度分析能力。",
        paint("自動繪製技術線圖", style::GREEN, color)
    ));
    lines.push(String::new());
    for (index, suggestion) in STARTER_SUGGESTIONS.iter().enumerate() {
        lines.push(format!(
            "  {} {suggestion}",
            paint(&format!("/s {}", index + 1), style::DIM, color)
        ));
    }
    lines.push(String::new());
    lines.push(paint(
        "輸入股票代號 (如: 2330) 或輸入「繪製線圖」...   /help 查看指令",
        style::DIM,
        color,
    ));
    lines.join("\n")
}
