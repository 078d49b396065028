use mm_core::entities::Watchlist;

use crate::{StoreError, WatchlistStore, decode};

/// In-process store for `--ephemeral` sessions and tests.
///
/// Holds the serialized form so loads go through the same decoding path as
/// the file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    saves: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw stored value, as if read from disk.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            saves: 0,
        }
    }

    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl WatchlistStore for MemoryStore {
    fn load(&self) -> Watchlist {
        self.raw
            .as_deref()
            .map(|raw| decode(raw, "memory"))
            .unwrap_or_default()
    }

    fn save(&mut self, watchlist: &Watchlist) -> Result<(), StoreError> {
        self.raw = Some(serde_json::to_string(watchlist)?);
        self.saves += 1;
        Ok(())
    }
}
