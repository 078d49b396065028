//! Entity structs for all MarketMind domain objects.
//!
//! Conversation entities live only for the session. `WatchlistItem` is the one
//! entity that is persisted (see `mm-store`).

mod instrument;
mod message;
mod watchlist;

pub use instrument::{GroundingCitation, InstrumentRef, SuggestedAction};
pub use message::{Message, MessageState, Reply};
pub use watchlist::{Toggled, Watchlist, WatchlistItem};
