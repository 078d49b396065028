use mm_core::entities::WatchlistItem;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::output::table::{TableOptions, render_table};

pub fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let items = ctx.conversation.watchlist().items();
    output(&items, flags.format, |items| super::render_watchlist(items))
}

pub(super) fn render_items(items: &[WatchlistItem], options: TableOptions) -> String {
    if items.is_empty() {
        return "尚無追蹤標的".to_string();
    }
    let rows: Vec<Vec<String>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            vec![
                (index + 1).to_string(),
                item.symbol.clone(),
                item.name.clone(),
                item.added_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
                item.id.clone(),
            ]
        })
        .collect();
    format!(
        "{}\n{} 標的",
        render_table(&["#", "SYMBOL", "NAME", "ADDED", "ID"], &rows, options),
        items.len()
    )
}
