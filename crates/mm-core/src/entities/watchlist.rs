use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PREFIX_WATCHLIST, generate_id};

/// A user-pinned instrument.
///
/// Serialized with the persisted layout: `{id, symbol, name, addedAt}` where
/// `addedAt` is epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
}

impl WatchlistItem {
    #[must_use]
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        // Millisecond precision so an item survives a save/load cycle unchanged.
        let now = Utc::now();
        let added_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        Self {
            id: generate_id(PREFIX_WATCHLIST),
            symbol: symbol.into(),
            name: name.into(),
            added_at,
        }
    }
}

/// Result of [`Watchlist::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggled {
    Added(WatchlistItem),
    Removed(WatchlistItem),
}

/// Ordered set of pinned instruments, keyed by symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Watchlist {
    items: Vec<WatchlistItem>,
}

impl Watchlist {
    /// Build from raw items, keeping the first occurrence of each symbol.
    #[must_use]
    pub fn from_items(items: Vec<WatchlistItem>) -> Self {
        let mut list = Self::default();
        for item in items {
            if !list.contains(&item.symbol) {
                list.items.push(item);
            }
        }
        list
    }

    #[must_use]
    pub fn items(&self) -> &[WatchlistItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchlistItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&WatchlistItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn find(&self, symbol: &str) -> Option<&WatchlistItem> {
        self.items.iter().find(|item| item.symbol == symbol)
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.find(symbol).is_some()
    }

    /// Add `symbol` if absent, remove it if present. Membership ignores `name`.
    pub fn toggle(&mut self, symbol: &str, name: &str) -> Toggled {
        if let Some(pos) = self.items.iter().position(|item| item.symbol == symbol) {
            return Toggled::Removed(self.items.remove(pos));
        }
        let item = WatchlistItem::new(symbol, name);
        self.items.push(item.clone());
        Toggled::Added(item)
    }

    /// Remove the item with the given ID.
    pub fn remove_by_id(&mut self, id: &str) -> Option<WatchlistItem> {
        let pos = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(pos))
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a WatchlistItem;
    type IntoIter = std::slice::Iter<'a, WatchlistItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
