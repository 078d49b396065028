#[path = "watchlist/edit.rs"]
mod edit;
#[path = "watchlist/list.rs"]
mod list;

use mm_core::entities::WatchlistItem;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WatchlistCommands;
use crate::context::AppContext;
use crate::output::table::TableOptions;
use crate::ui;

/// Handle `marketmind watchlist`.
pub fn handle(
    action: &WatchlistCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        WatchlistCommands::List => list::run(ctx, flags),
        WatchlistCommands::Add { symbol, name } => edit::add(symbol, name, ctx, flags),
        WatchlistCommands::Remove { target } => edit::remove(target, ctx, flags),
        WatchlistCommands::Toggle { symbol, name } => edit::toggle(symbol, name, ctx, flags),
    }
}

/// Watchlist as a numbered table, sized to the terminal.
#[must_use]
pub fn render_watchlist(items: &[WatchlistItem]) -> String {
    let prefs = ui::prefs();
    list::render_items(
        items,
        TableOptions {
            max_width: prefs.term_width,
            color: prefs.color,
        },
    )
}
