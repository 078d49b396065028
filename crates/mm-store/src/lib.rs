//! # mm-store
//!
//! Durable storage for the watchlist.
//!
//! The whole list is stored as one JSON array under a single key. Loading
//! never fails: a missing, empty, unreadable or malformed value yields an
//! empty watchlist and a warning. Saving overwrites the previous value.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use mm_core::entities::Watchlist;

/// Backing storage for the watchlist.
pub trait WatchlistStore: Send {
    /// Read the persisted list, or an empty one when nothing usable is stored.
    fn load(&self) -> Watchlist;

    /// Overwrite the persisted list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the list cannot be serialized or written.
    fn save(&mut self, watchlist: &Watchlist) -> Result<(), StoreError>;
}

impl<T: WatchlistStore + ?Sized> WatchlistStore for Box<T> {
    fn load(&self) -> Watchlist {
        (**self).load()
    }

    fn save(&mut self, watchlist: &Watchlist) -> Result<(), StoreError> {
        (**self).save(watchlist)
    }
}

/// Parse a stored value, degrading to an empty list.
pub(crate) fn decode(raw: &str, origin: &str) -> Watchlist {
    if raw.trim().is_empty() {
        return Watchlist::default();
    }
    match serde_json::from_str::<Watchlist>(raw) {
        Ok(list) => Watchlist::from_items(list.items().to_vec()),
        Err(error) => {
            tracing::warn!(%error, origin, "stored watchlist is malformed; starting empty");
            Watchlist::default()
        }
    }
}
