use mm_core::entities::{Toggled, WatchlistItem};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Change {
    Added,
    Removed,
    Unchanged,
}

#[derive(Debug, Serialize)]
struct EditResponse {
    change: Change,
    item: Option<WatchlistItem>,
}

impl EditResponse {
    fn text(&self) -> String {
        match (&self.change, &self.item) {
            (Change::Added, Some(item)) => format!("★ 已加入 {} {}", item.symbol, item.name),
            (Change::Removed, Some(item)) => format!("☆ 已移除 {} {}", item.symbol, item.name),
            (Change::Unchanged, Some(item)) => format!("{} 已在自選清單中", item.symbol),
            (_, None) => "找不到此標的".to_string(),
        }
    }
}

pub fn add(symbol: &str, name: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let symbol = required(symbol, "symbol")?;
    let name = required(name, "name")?;
    let response = if let Some(item) = ctx.conversation.watchlist().find(symbol) {
        EditResponse {
            change: Change::Unchanged,
            item: Some(item.clone()),
        }
    } else {
        from_toggle(ctx.conversation.toggle_watchlist(symbol, name))
    };
    output(&response, flags.format, EditResponse::text)
}

/// Remove by item id first, then by symbol.
pub fn remove(target: &str, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let target = required(target, "target")?;
    let id = ctx
        .conversation
        .watchlist()
        .iter()
        .find(|item| item.id == target)
        .or_else(|| ctx.conversation.watchlist().find(target))
        .map(|item| item.id.clone());

    let removed = id.and_then(|id| ctx.conversation.remove_watchlist(&id));
    let response = EditResponse {
        change: if removed.is_some() {
            Change::Removed
        } else {
            Change::Unchanged
        },
        item: removed,
    };
    output(&response, flags.format, EditResponse::text)?;
    if response.item.is_none() {
        anyhow::bail!("'{target}' is not on the watchlist");
    }
    Ok(())
}

pub fn toggle(
    symbol: &str,
    name: &str,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let symbol = required(symbol, "symbol")?;
    let name = required(name, "name")?;
    let response = from_toggle(ctx.conversation.toggle_watchlist(symbol, name));
    output(&response, flags.format, EditResponse::text)
}

fn from_toggle(toggled: Toggled) -> EditResponse {
    match toggled {
        Toggled::Added(item) => EditResponse {
            change: Change::Added,
            item: Some(item),
        },
        Toggled::Removed(item) => EditResponse {
            change: Change::Removed,
            item: Some(item),
        },
    }
}

fn required<'a>(value: &'a str, field: &str) -> anyhow::Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("{field} must not be empty");
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_maps_to_change() {
        let item = WatchlistItem::new("2330", "台積電");
        let added = from_toggle(Toggled::Added(item.clone()));
        assert_eq!(added.text(), "★ 已加入 2330 台積電");
        let removed = from_toggle(Toggled::Removed(item));
        assert_eq!(removed.text(), "☆ 已移除 2330 台積電");
    }

    #[test]
    fn missing_item_text() {
        let response = EditResponse {
            change: Change::Unchanged,
            item: None,
        };
        assert_eq!(response.text(), "找不到此標的");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(required("  ", "symbol").is_err());
        assert_eq!(required(" NVDA ", "symbol").unwrap(), "NVDA");
    }
}
