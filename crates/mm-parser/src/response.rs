//! Post-processing of raw model answers.
//!
//! The model is instructed to end a summary with `[[STOCK:CODE:NAME]]` and to
//! wrap drawn charts in a fenced ```` ```svg ```` block. Both are conventions,
//! not a schema: zero or one occurrence is expected. When more appear, the
//! first one is extracted and every occurrence is removed from the display
//! text, so processing the display text again finds nothing.

use std::sync::LazyLock;

use mm_core::entities::{GroundingCitation, InstrumentRef, Reply, SuggestedAction};
use mm_core::enums::ActionKind;
use regex::Regex;
use serde::Serialize;

use crate::chart::clean_markup;
use crate::prompts::{action_label, action_prompt};

static STOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[STOCK:(.+?):(.+?)\]\]").expect("stock tag pattern is valid")
});

static SVG_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```svg([\s\S]*?)```").expect("svg fence pattern is valid"));

/// A raw answer split into its displayable parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedResponse {
    pub display_text: String,
    pub chart_markup: Option<String>,
    pub instrument: Option<InstrumentRef>,
    pub suggested_actions: Vec<SuggestedAction>,
}

impl ParsedResponse {
    /// Attach the gateway's citations and produce the resolved message payload.
    #[must_use]
    pub fn into_reply(self, citations: Vec<GroundingCitation>) -> Reply {
        Reply {
            text: self.display_text,
            citations,
            suggested_actions: self.suggested_actions,
            instrument: self.instrument,
            chart_markup: self.chart_markup,
        }
    }
}

/// Split a raw model answer. Never fails.
#[must_use]
pub fn parse_response(raw: &str) -> ParsedResponse {
    let (text, instrument) = extract_instrument(raw);
    let (display_text, chart_markup) = extract_chart(&text);

    let suggested_actions = instrument
        .as_ref()
        .map(suggested_actions_for)
        .unwrap_or_default();

    tracing::debug!(
        instrument = instrument.as_ref().map(|i| i.symbol.as_str()),
        has_chart = chart_markup.is_some(),
        "parsed model response"
    );

    ParsedResponse {
        display_text,
        chart_markup,
        instrument,
        suggested_actions,
    }
}

/// The five follow-up actions for an instrument, in fixed order.
#[must_use]
pub fn suggested_actions_for(instrument: &InstrumentRef) -> Vec<SuggestedAction> {
    ActionKind::ORDER
        .iter()
        .map(|&kind| SuggestedAction {
            label: action_label(kind).to_string(),
            prompt: action_prompt(kind, instrument),
            kind,
        })
        .collect()
}

fn extract_instrument(raw: &str) -> (String, Option<InstrumentRef>) {
    let Some(caps) = STOCK_TAG.captures(raw) else {
        return (raw.trim().to_string(), None);
    };

    let symbol = caps[1].trim();
    let name = caps[2].trim();
    let instrument = (!symbol.is_empty() && !name.is_empty())
        .then(|| InstrumentRef::new(symbol, name));

    let stripped = STOCK_TAG.replace_all(raw, "");
    (stripped.trim().to_string(), instrument)
}

fn extract_chart(text: &str) -> (String, Option<String>) {
    let Some(caps) = SVG_FENCE.captures(text) else {
        return (text.to_string(), None);
    };

    let markup = clean_markup(&caps[1]);
    let markup = (!markup.is_empty()).then_some(markup);

    let stripped = SVG_FENCE.replace_all(text, "");
    (stripped.trim().to_string(), markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_without_tags_is_only_trimmed() {
        let raw = "\n## 黃金走勢\n\n* 支撐 2300\n  ";
        let parsed = parse_response(raw);
        assert_eq!(parsed.display_text, "## 黃金走勢\n\n* 支撐 2300");
        assert!(parsed.instrument.is_none());
        assert!(parsed.suggested_actions.is_empty());
        assert!(parsed.chart_markup.is_none());
    }

    #[test]
    fn trailing_tag_produces_instrument_and_actions() {
        let raw = "1. **目前趨勢**：多頭\n2. **關鍵點位**：支撐 120\n\n[[STOCK:NVDA:NVIDIA]]";
        let parsed = parse_response(raw);
        assert_eq!(
            parsed.display_text,
            "1. **目前趨勢**：多頭\n2. **關鍵點位**：支撐 120"
        );
        assert_eq!(parsed.instrument, Some(InstrumentRef::new("NVDA", "NVIDIA")));
        let kinds: Vec<ActionKind> = parsed.suggested_actions.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, ActionKind::ORDER.to_vec());
    }

    #[test]
    fn tag_with_colon_in_name_keeps_the_rest_as_name() {
        let parsed = parse_response("x [[STOCK:BTC:USD:Bitcoin]]");
        let instrument = parsed.instrument.unwrap();
        assert_eq!(instrument.symbol, "BTC");
        assert_eq!(instrument.name, "USD:Bitcoin");
    }

    #[test]
    fn svg_block_is_extracted_and_removed() {
        let raw = "走勢如下：\n```svg\n<svg width=\"700\"><title>Daily Chart</title></svg>\n```\n結論：偏多";
        let parsed = parse_response(raw);
        assert_eq!(
            parsed.chart_markup.as_deref(),
            Some("<svg width=\"700\"><title>Daily Chart</title></svg>")
        );
        assert_eq!(parsed.display_text, "走勢如下：\n\n結論：偏多");
    }

    #[test]
    fn reprocessing_display_text_finds_no_chart() {
        let raw = "a\n```svg\n<svg/>\n```\nb\n```svg\n<svg id=\"2\"/>\n```";
        let first = parse_response(raw);
        assert_eq!(first.chart_markup.as_deref(), Some("<svg/>"));
        let second = parse_response(&first.display_text);
        assert!(second.chart_markup.is_none());
        assert_eq!(second.display_text, first.display_text);
    }

    #[test]
    fn first_tag_wins_and_all_are_stripped() {
        let raw = "[[STOCK:2330:台積電]] 與 [[STOCK:2454:聯發科]]";
        let parsed = parse_response(raw);
        assert_eq!(parsed.instrument.unwrap().symbol, "2330");
        assert_eq!(parsed.display_text, "與");
    }

    #[test]
    fn blank_svg_block_is_treated_as_absent() {
        let parsed = parse_response("text\n```svg\n   \n```");
        assert!(parsed.chart_markup.is_none());
        assert_eq!(parsed.display_text, "text");
    }

    #[test]
    fn unterminated_fence_is_left_alone() {
        let raw = "```svg\n<svg>";
        let parsed = parse_response(raw);
        assert!(parsed.chart_markup.is_none());
        assert_eq!(parsed.display_text, raw);
    }

    #[test]
    fn into_reply_carries_every_part() {
        let parsed = parse_response("hi\n```svg\n<svg/>\n```\n[[STOCK:NVDA:NVIDIA]]");
        let reply = parsed.into_reply(vec![GroundingCitation {
            uri: "https://example.com".into(),
            title: String::new(),
        }]);
        assert_eq!(reply.text, "hi");
        assert_eq!(reply.chart_markup.as_deref(), Some("<svg/>"));
        assert_eq!(reply.citations.len(), 1);
        assert_eq!(reply.suggested_actions.len(), 5);
    }
}
