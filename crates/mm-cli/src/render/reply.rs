//! One conversation turn as terminal text.

use std::path::Path;

use mm_core::entities::{GroundingCitation, Message, SuggestedAction};
use mm_core::enums::{ActionKind, MessageRole, MessageStatus};
use mm_parser::ChartBlock;

use super::chart::render_chart;
use super::markdown::render_text;
use super::style::{self, paint};

pub const THINKING_TEXT: &str = "正在連接全球市場數據庫...";

/// Everything shown with a model message besides its text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyExtras<'a> {
    pub chart: Option<&'a ChartBlock>,
    pub chart_path: Option<&'a Path>,
    /// The message's instrument is on the watchlist.
    pub tracked: bool,
}

#[must_use]
pub fn render_message(message: &Message, extras: ReplyExtras<'_>, color: bool) -> String {
    match message.role {
        MessageRole::User => format!("{} {}", paint("你 ›", style::BLUE, color), message.text()),
        MessageRole::Model => render_model(message, extras, color),
    }
}

fn render_model(message: &Message, extras: ReplyExtras<'_>, color: bool) -> String {
    let time = message
        .created_at
        .with_timezone(&chrono::Local)
        .format("%H:%M")
        .to_string();
    let mut header = format!(
        "{}  {}",
        paint("MarketMind AI 軍師", style::BOLD_GREEN, color),
        paint(&time, style::DIM, color)
    );
    if let Some(instrument) = message.instrument() {
        let badge = if extras.tracked {
            paint("★ 已追蹤", style::GREEN, color)
        } else {
            paint("☆ 加入自選 (/star)", style::DIM, color)
        };
        header.push_str(&format!("  [{} {}] {badge}", instrument.symbol, instrument.name));
    }

    let mut sections = vec![header];
    match message.status() {
        MessageStatus::Pending => sections.push(paint(THINKING_TEXT, style::DIM, color)),
        MessageStatus::Failed => sections.push(paint(message.text(), style::RED, color)),
        MessageStatus::Resolved => {
            if !message.text().is_empty() {
                sections.push(render_text(message.text(), color));
            }
            if let Some(chart) = extras.chart {
                sections.push(render_chart(chart, extras.chart_path, color));
            }
            if !message.citations().is_empty() {
                sections.push(render_citations(message.citations(), color));
            }
            if message.instrument().is_some() && !message.suggested_actions().is_empty() {
                sections.push(render_actions(message.suggested_actions(), color));
            }
        }
    }
    sections.join("\n\n")
}

#[must_use]
pub fn render_citations(citations: &[GroundingCitation], color: bool) -> String {
    let mut lines = vec![paint("資料來源", style::DIM, color)];
    for (index, citation) in citations.iter().enumerate() {
        lines.push(format!(
            "  {} {}  {}",
            paint(&format!("[{}]", index + 1), style::CYAN, color),
            citation.display_title(),
            paint(&citation.uri, style::DIM, color)
        ));
    }
    lines.join("\n")
}

#[must_use]
pub fn render_actions(actions: &[SuggestedAction], color: bool) -> String {
    let buttons = actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            format!(
                "{} {}",
                paint(&format!("/a {}", index + 1), style::DIM, color),
                paint(&action.label, action_style(action.kind), color)
            )
        })
        .collect::<Vec<_>>()
        .join("   ");
    format!("{}\n  {buttons}", paint("AI 戰略儀表板", style::DIM, color))
}

const fn action_style(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Fundamental => style::BLUE,
        ActionKind::Technical => style::MAGENTA,
        ActionKind::Chips => style::YELLOW,
        ActionKind::Chart => style::BOLD_GREEN,
        ActionKind::News => style::BOLD,
    }
}
