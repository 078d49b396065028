//! Chart markup extracted from an answer, plus the timeframe toggle.

use mm_core::entities::InstrumentRef;
use mm_core::enums::Timeframe;
use serde::Serialize;

use crate::prompts::chart_timeframe_prompt;

const WEEKLY_MARKERS: [&str; 2] = ["Weekly Chart", "週線"];

/// Strip stray fence lines and surrounding whitespace from raw chart markup.
#[must_use]
pub fn clean_markup(raw: &str) -> String {
    raw.replace("```svg", "").replace("```", "").trim().to_string()
}

/// Weekly when the markup mentions a weekly title, daily otherwise.
#[must_use]
pub fn detect_timeframe(markup: &str) -> Timeframe {
    if WEEKLY_MARKERS.iter().any(|m| markup.contains(m)) {
        Timeframe::Weekly
    } else {
        Timeframe::Daily
    }
}

/// A chart ready to be displayed, with enough context to request a redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartBlock {
    pub markup: String,
    pub timeframe: Timeframe,
    pub symbol: Option<String>,
    pub title: Option<String>,
}

impl ChartBlock {
    #[must_use]
    pub fn new(raw: &str, instrument: Option<&InstrumentRef>) -> Self {
        let markup = clean_markup(raw);
        let timeframe = detect_timeframe(&markup);
        Self {
            markup,
            timeframe,
            symbol: instrument.map(|i| i.symbol.clone()),
            title: instrument.map(|i| i.name.clone()),
        }
    }

    /// Header label; `STOCK` when the symbol is unknown.
    #[must_use]
    pub fn header(&self) -> &str {
        self.symbol.as_deref().unwrap_or("STOCK")
    }

    /// Footer label, e.g. `Strategy View • Daily`.
    #[must_use]
    pub fn footer(&self) -> String {
        format!("Strategy View • {}", self.timeframe.label())
    }

    /// Prompt that redraws this chart in `target`.
    ///
    /// `None` when `target` is already displayed or no symbol is known.
    #[must_use]
    pub fn toggle_prompt(&self, target: Timeframe) -> Option<String> {
        if target == self.timeframe {
            return None;
        }
        let symbol = self.symbol.as_deref()?;
        Some(chart_timeframe_prompt(
            symbol,
            self.title.as_deref(),
            target,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DAILY: &str = "<svg><text>Daily Chart</text></svg>";
    const WEEKLY: &str = "<svg><text>2330 週線</text></svg>";

    #[test]
    fn clean_strips_fences_and_whitespace() {
        assert_eq!(clean_markup("\n```svg\n<svg/>\n```\n"), "<svg/>");
    }

    #[test]
    fn detects_weekly_by_either_marker() {
        assert_eq!(detect_timeframe(WEEKLY), Timeframe::Weekly);
        assert_eq!(
            detect_timeframe("<svg><title>Weekly Chart</title></svg>"),
            Timeframe::Weekly
        );
        assert_eq!(detect_timeframe(DAILY), Timeframe::Daily);
        assert_eq!(detect_timeframe("<svg/>"), Timeframe::Daily);
    }

    #[test]
    fn toggle_to_same_timeframe_is_noop() {
        let nvda = InstrumentRef::new("NVDA", "NVIDIA");
        let chart = ChartBlock::new(DAILY, Some(&nvda));
        assert_eq!(chart.toggle_prompt(Timeframe::Daily), None);
    }

    #[test]
    fn toggle_to_other_timeframe_builds_prompt() {
        let nvda = InstrumentRef::new("NVDA", "NVIDIA");
        let chart = ChartBlock::new(DAILY, Some(&nvda));
        let prompt = chart.toggle_prompt(Timeframe::Weekly).unwrap();
        assert!(prompt.contains("NVDA NVIDIA"));
        assert!(prompt.contains("Weekly Chart"));
    }

    #[test]
    fn toggle_without_symbol_does_nothing() {
        let chart = ChartBlock::new(WEEKLY, None);
        assert_eq!(chart.toggle_prompt(Timeframe::Daily), None);
        assert_eq!(chart.header(), "STOCK");
        assert_eq!(chart.footer(), "Strategy View • Weekly");
    }
}
