#[path = "chat/input.rs"]
mod input;

use std::io::Write;
use std::path::PathBuf;

use mm_chat::{SendOrigin, SendOutcome};
use mm_core::CoreError;
use mm_core::entities::Toggled;
use mm_core::enums::{Timeframe, ViewMode};
use mm_parser::prompts::STARTER_SUGGESTIONS;
use tokio::io::{AsyncBufReadExt, BufReader};

use self::input::{HELP, SessionCommand, parse_line};
use crate::cli::GlobalFlags;
use crate::commands::watchlist::render_watchlist;
use crate::context::AppContext;
use crate::progress::Progress;
use crate::render::chart::save_chart;
use crate::render::reply::{ReplyExtras, THINKING_TEXT, render_citations, render_message};
use crate::render::style::{self, paint};
use crate::render::welcome::render_welcome;
use crate::ui;

/// Handle `marketmind chat`: read lines until EOF or `/quit`.
pub async fn handle(ctx: &mut AppContext, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let color = ui::prefs().color;
    if ctx.conversation.view() == ViewMode::Welcome {
        println!("{}\n", render_welcome(ctx.config.general.show_ticker, color));
    }

    let mut session = Session::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", paint("›", style::BOLD_GREEN, color));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        match parse_line(&line) {
            SessionCommand::Quit => break,
            command => {
                if let Err(error) = session.run(command, ctx, color).await {
                    eprintln!("{}", paint(&format!("{error:#}"), style::RED, color));
                }
            }
        }
    }
    Ok(())
}

/// Per-session terminal state.
#[derive(Default)]
struct Session {
    /// Last chart file written, for `/open`.
    last_chart: Option<PathBuf>,
    /// Text of the last failed user send, offered again after a failure.
    pending_input: Option<String>,
}

impl Session {
    async fn run(
        &mut self,
        command: SessionCommand,
        ctx: &mut AppContext,
        color: bool,
    ) -> anyhow::Result<()> {
        match command {
            SessionCommand::Empty | SessionCommand::Quit => Ok(()),
            SessionCommand::Help => {
                println!("{HELP}");
                Ok(())
            }
            SessionCommand::Invalid(message) => anyhow::bail!(message),
            SessionCommand::Send(text) => self.send(ctx, &text, color).await,
            SessionCommand::Suggestion(index) => {
                let text = STARTER_SUGGESTIONS
                    .get(index)
                    .ok_or_else(|| anyhow::anyhow!("沒有第 {} 個建議問題", index + 1))?;
                self.send(ctx, text, color).await
            }
            SessionCommand::Action(index) => {
                let reply_id = latest_reply_id(ctx)?;
                let progress = Progress::spinner(THINKING_TEXT);
                let outcome = ctx
                    .conversation
                    .run_action(&ctx.gateway, &reply_id, index)
                    .await;
                progress.finish_clear();
                self.show(ctx, outcome?, color)
            }
            SessionCommand::Star => {
                let instrument = ctx
                    .conversation
                    .latest_reply()
                    .and_then(|m| m.instrument())
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("最新回覆沒有可追蹤的標的"))?;
                let line = match ctx
                    .conversation
                    .toggle_watchlist(&instrument.symbol, &instrument.name)
                {
                    Toggled::Added(item) => format!("★ 已加入 {} {}", item.symbol, item.name),
                    Toggled::Removed(item) => format!("☆ 已移除 {} {}", item.symbol, item.name),
                };
                println!("{}", paint(&line, style::GREEN, color));
                Ok(())
            }
            SessionCommand::Watchlist => {
                println!("{}", render_watchlist(ctx.conversation.watchlist().items()));
                Ok(())
            }
            SessionCommand::SelectWatchlist(index) => {
                let progress = Progress::spinner(THINKING_TEXT);
                let outcome = ctx.conversation.select_watchlist(&ctx.gateway, index).await;
                progress.finish_clear();
                self.show(ctx, outcome?, color)
            }
            SessionCommand::RemoveWatchlist(index) => {
                let id = ctx
                    .conversation
                    .watchlist()
                    .get(index)
                    .map(|item| item.id.clone())
                    .ok_or_else(|| anyhow::anyhow!("自選清單沒有第 {} 檔", index + 1))?;
                if let Some(item) = ctx.conversation.remove_watchlist(&id) {
                    println!("☆ 已移除 {} {}", item.symbol, item.name);
                }
                Ok(())
            }
            SessionCommand::Chart(target) => {
                let chart_id = ctx
                    .conversation
                    .latest_chart_message()
                    .map(|m| m.id.clone())
                    .ok_or_else(|| anyhow::anyhow!("目前沒有線圖"))?;
                let target = match target {
                    Some(target) => target,
                    None => toggle_target(ctx, &chart_id)?,
                };
                let progress = Progress::spinner(THINKING_TEXT);
                let outcome = ctx
                    .conversation
                    .toggle_chart_timeframe(&ctx.gateway, &chart_id, target)
                    .await;
                progress.finish_clear();
                match outcome? {
                    Some(outcome) => self.show(ctx, Some(outcome), color),
                    None => {
                        println!("{}", paint(&format!("線圖已是 {target}"), style::DIM, color));
                        Ok(())
                    }
                }
            }
            SessionCommand::Open => {
                let path = self
                    .last_chart
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("目前沒有已儲存的線圖"))?;
                open::that(path)?;
                Ok(())
            }
            SessionCommand::Sources => {
                let reply = ctx
                    .conversation
                    .latest_reply()
                    .ok_or_else(|| anyhow::anyhow!("尚無回覆"))?;
                if reply.citations().is_empty() {
                    println!("{}", paint("此回覆沒有引用來源", style::DIM, color));
                } else {
                    println!("{}", render_citations(reply.citations(), color));
                }
                Ok(())
            }
        }
    }

    async fn send(&mut self, ctx: &mut AppContext, text: &str, color: bool) -> anyhow::Result<()> {
        if ctx.conversation.is_in_flight() {
            anyhow::bail!("上一個問題仍在處理中");
        }
        let progress = Progress::spinner(THINKING_TEXT);
        let outcome = ctx
            .conversation
            .send(&ctx.gateway, text, SendOrigin::Input)
            .await;
        progress.finish_clear();

        if let Some(outcome) = &outcome {
            self.pending_input = (outcome.failed && outcome.restore_input).then(|| text.to_string());
        }
        self.show(ctx, outcome, color)?;
        if let Some(text) = &self.pending_input {
            println!("{}", paint(&format!("(可重新輸入: {text})"), style::DIM, color));
        }
        Ok(())
    }

    fn show(
        &mut self,
        ctx: &AppContext,
        outcome: Option<SendOutcome>,
        color: bool,
    ) -> anyhow::Result<()> {
        let Some(outcome) = outcome else {
            return Ok(());
        };
        let reply = ctx
            .conversation
            .message(&outcome.message_id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "message".to_string(),
                id: outcome.message_id.clone(),
            })?;

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

        println!(
            "\n{}\n",
            render_message(
                reply,
                ReplyExtras {
                    chart: chart.as_ref(),
                    chart_path: chart_path.as_deref(),
                    tracked,
                },
                color,
            )
        );

        if let Some(path) = chart_path {
            if ctx.config.general.auto_open_charts
                && let Err(error) = open::that(&path)
            {
                tracing::warn!(%error, path = %path.display(), "chart could not be opened");
            }
            self.last_chart = Some(path);
        }
        Ok(())
    }
}

/// Timeframe the chart of `message_id` is not drawn in.
fn toggle_target(ctx: &AppContext, message_id: &str) -> anyhow::Result<Timeframe> {
    ctx.conversation
        .chart_for(message_id)
        .map(|chart| chart.timeframe.other())
        .ok_or_else(|| anyhow::anyhow!("目前沒有線圖"))
}

fn latest_reply_id(ctx: &AppContext) -> anyhow::Result<String> {
    ctx.conversation
        .latest_reply()
        .map(|m| m.id.clone())
        .ok_or_else(|| anyhow::anyhow!("尚無回覆可執行動作"))
}
