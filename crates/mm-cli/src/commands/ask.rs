use std::path::PathBuf;

use mm_chat::SendOrigin;
use mm_core::entities::Message;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AskArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;
use crate::render::chart::save_chart;
use crate::render::reply::{ReplyExtras, THINKING_TEXT, render_message};
use crate::ui;

#[derive(Debug, Serialize)]
struct AskResponse<'a> {
    question: String,
    reply: &'a Message,
    chart_path: Option<PathBuf>,
}

/// Handle `marketmind ask`.
pub async fn handle(args: &AskArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let question = args.question();
    let progress = Progress::spinner(THINKING_TEXT);
    let outcome = ctx
        .conversation
        .send(&ctx.gateway, &question, SendOrigin::Input)
        .await;
    let Some(outcome) = outcome else {
        progress.finish_clear();
        anyhow::bail!("question is empty");
    };
    if outcome.failed {
        progress.finish_err("request failed");
    } else {
        progress.finish_clear();
    }

    let reply = ctx
        .conversation
        .message(&outcome.message_id)
        .ok_or_else(|| anyhow::anyhow!("reply {} is missing", outcome.message_id))?;
    let chart = ctx.conversation.chart_for(&outcome.message_id);
    let chart_path = match (&chart, &ctx.charts_dir) {
        (Some(chart), Some(dir)) => save_chart(
            dir,
            ctx.conversation.session_id(),
            &outcome.message_id,
            &chart.markup,
        ),
        _ => None,
    };
    let tracked = reply
        .instrument()
        .is_some_and(|i| ctx.conversation.watchlist().contains(&i.symbol));

    let response = AskResponse {
        question,
        reply,
        chart_path,
    };
    let color = ui::prefs().color;
    output(&response, flags.format, |r| {
        render_message(
            r.reply,
            ReplyExtras {
                chart: chart.as_ref(),
                chart_path: r.chart_path.as_deref(),
                tracked,
            },
            color,
        )
    })?;

    if outcome.failed {
        anyhow::bail!("the model request failed; run with --verbose for details");
    }
    if ctx.config.general.auto_open_charts
        && let Some(path) = &response.chart_path
    {
        open::that(path)?;
    }
    Ok(())
}
