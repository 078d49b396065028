//! Terminal rendering of classified answer lines.

use mm_parser::markdown::{Block, Span};

use super::style::{self, display_width, paint};

#[must_use]
pub fn render_text(text: &str, color: bool) -> String {
    render_blocks(&mm_parser::parse_blocks(text), color)
}

#[must_use]
pub fn render_blocks(blocks: &[Block], color: bool) -> String {
    blocks
        .iter()
        .map(|block| render_block(block, color))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &Block, color: bool) -> String {
    match block {
        Block::Heading { level: 2, text } => format!(
            "{}\n{}",
            paint(text, style::BOLD_GREEN, color),
            paint(&"─".repeat(display_width(text).max(4)), style::DIM, color)
        ),
        Block::Heading { text, .. } => paint(text, style::GREEN, color),
        Block::BoldLine { text } => paint(text, style::BOLD_WHITE, color),
        Block::Bullet { spans } => format!(
            "  {} {}",
            paint("•", style::GREEN, color),
            render_spans(spans, color)
        ),
        Block::Numbered { marker, spans } => format!(
            "  {} {}",
            paint(&format!("{marker:>3}"), style::BLUE, color),
            render_spans(spans, color)
        ),
        Block::Spacer => String::new(),
        Block::Paragraph { spans } => render_spans(spans, color),
    }
}

fn render_spans(spans: &[Span], color: bool) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) => text.clone(),
            Span::Bold(text) if color => paint(text, style::BOLD_WHITE, true),
            Span::Bold(text) => text.clone(),
        })
        .collect()
}
