use std::io::Read;

use anyhow::Context;
use mm_parser::markdown::Block;
use mm_parser::{ChartBlock, ParsedResponse, parse_blocks, parse_response};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ParseArgs;
use crate::output::output;
use crate::render::chart::render_chart;
use crate::render::markdown::render_blocks;
use crate::render::reply::render_actions;
use crate::ui;

#[derive(Debug, Serialize)]
struct ParseResponse {
    parsed: ParsedResponse,
    blocks: Vec<Block>,
    chart: Option<ChartBlock>,
}

/// Handle `marketmind parse`. Runs without config or network.
pub fn handle(args: &ParseArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = match &args.file {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read answer from stdin")?;
            buf
        }
    };

    let response = build(&raw);
    let color = ui::prefs().color;
    output(&response, flags.format, |r| render(r, color))
}

fn build(raw: &str) -> ParseResponse {
    let parsed = parse_response(raw);
    let blocks = parse_blocks(&parsed.display_text);
    let chart = parsed
        .chart_markup
        .as_deref()
        .map(|markup| ChartBlock::new(markup, parsed.instrument.as_ref()));
    ParseResponse {
        parsed,
        blocks,
        chart,
    }
}

fn render(response: &ParseResponse, color: bool) -> String {
    let mut sections = vec![render_blocks(&response.blocks, color)];
    if let Some(chart) = &response.chart {
        sections.push(render_chart(chart, None, color));
    }
    if !response.parsed.suggested_actions.is_empty() {
        sections.push(render_actions(&response.parsed.suggested_actions, color));
    }
    sections.join("\n\n")
}
