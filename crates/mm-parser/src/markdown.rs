//! Line-oriented classification of the Markdown subset the model emits.
//!
//! This is deliberately not a CommonMark parser. Each line is classified on
//! its own; inline formatting is limited to `**bold**` spans.

use serde::Serialize;

/// Inline run within a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Bold(String),
}

impl Span {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) | Self::Bold(s) => s,
        }
    }
}

/// One classified line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    /// `## ` is level 2, `### ` is level 3.
    Heading { level: u8, text: String },
    /// A line that is entirely `**...**`, rendered as an emphasized section label.
    BoldLine { text: String },
    Bullet { spans: Vec<Span> },
    Numbered { marker: String, spans: Vec<Span> },
    Spacer,
    Paragraph { spans: Vec<Span> },
}

/// Classify every line of `text`.
#[must_use]
pub fn parse_blocks(text: &str) -> Vec<Block> {
    text.lines().map(classify_line).collect()
}

/// Classify a single line. Rules are checked in order; the first match wins.
#[must_use]
pub fn classify_line(line: &str) -> Block {
    if let Some(rest) = line.strip_prefix("### ") {
        return Block::Heading {
            level: 3,
            text: rest.trim().to_string(),
        };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Block::Heading {
            level: 2,
            text: rest.trim().to_string(),
        };
    }

    let trimmed = line.trim();

    if let Some(inner) = bold_line(trimmed) {
        return Block::BoldLine {
            text: inner.to_string(),
        };
    }
    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        return Block::Bullet {
            spans: inline_spans(rest.trim_start()),
        };
    }
    if let Some((marker, rest)) = numbered_item(trimmed) {
        return Block::Numbered {
            marker: marker.to_string(),
            spans: inline_spans(rest),
        };
    }
    if trimmed.is_empty() {
        return Block::Spacer;
    }

    Block::Paragraph {
        spans: inline_spans(line),
    }
}

/// Split `text` on `**` pairs. An unmatched trailing `**` is kept literally.
#[must_use]
pub fn inline_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        if open > 0 {
            spans.push(Span::Text(rest[..open].to_string()));
        }
        let bold = &after_open[..close];
        if !bold.is_empty() {
            spans.push(Span::Bold(bold.to_string()));
        }
        rest = &after_open[close + 2..];
    }

    if !rest.is_empty() {
        spans.push(Span::Text(rest.to_string()));
    }
    spans
}

fn bold_line(trimmed: &str) -> Option<&str> {
    if trimmed.len() < 4 {
        return None;
    }
    let inner = trimmed.strip_prefix("**")?.strip_suffix("**")?;
    (!inner.contains("**")).then_some(inner)
}

/// `N.` followed by whitespace or end of line. Decimals such as `1.5%` do not match.
fn numbered_item(trimmed: &str) -> Option<(&str, &str)> {
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let after = trimmed[digits..].strip_prefix('.')?;
    match after.chars().next() {
        None => Some((&trimmed[..=digits], "")),
        Some(c) if c.is_whitespace() => Some((&trimmed[..=digits], after.trim_start())),
        Some(_) => None,
    }
}
