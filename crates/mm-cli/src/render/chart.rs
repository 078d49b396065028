//! Chart blocks: the markup goes to an `.svg` file, the terminal gets a frame
//! describing it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mm_core::enums::Timeframe;
use mm_parser::ChartBlock;

use super::style::{self, paint};

const BADGE: &str = "AI GENERATED";

/// File name of a chart: `<session_id>-<message_id>.svg`.
#[must_use]
pub fn chart_file_name(session_id: &str, message_id: &str) -> String {
    format!("{session_id}-{message_id}.svg")
}

/// Write `markup` to `<dir>/<session_id>-<message_id>.svg`.
pub fn write_chart(
    dir: &Path,
    session_id: &str,
    message_id: &str,
    markup: &str,
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(chart_file_name(session_id, message_id));
    fs::write(&path, markup).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "chart written");
    Ok(path)
}

/// [`write_chart`], logging a failure instead of returning it. The reply is
/// still shown without a file.
pub fn save_chart(
    dir: &Path,
    session_id: &str,
    message_id: &str,
    markup: &str,
) -> Option<PathBuf> {
    match write_chart(dir, session_id, message_id, markup) {
        Ok(path) => Some(path),
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "chart could not be saved");
            None
        }
    }
}

#[must_use]
pub fn render_chart(chart: &ChartBlock, path: Option<&Path>, color: bool) -> String {
    let mut title = paint(chart.header(), style::BOLD_WHITE, color);
    if let Some(name) = &chart.title {
        title.push_str("  ");
        title.push_str(name);
    }

    let toggle = [Timeframe::Daily, Timeframe::Weekly]
        .iter()
        .map(|tf| {
            if *tf == chart.timeframe {
                paint(&format!("[{tf}]"), style::BOLD_GREEN, color)
            } else {
                paint(&format!(" {tf} "), style::DIM, color)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let location = path.map_or_else(
        || paint("(chart not saved)", style::DIM, color),
        |p| format!("svg: {}", p.display()),
    );

    let edge = |s: &str| paint(s, style::DIM, color);
    [
        format!("{} {title}  {}", edge("╭─"), paint(BADGE, style::CYAN, color)),
        format!("{}  {toggle}", edge("│")),
        format!("{}  {location}", edge("│")),
        format!("{} {}", edge("╰─"), paint(&chart.footer(), style::DIM, color)),
    ]
    .join("\n")
}
