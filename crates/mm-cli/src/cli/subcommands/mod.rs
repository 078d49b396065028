mod watchlist;

pub use watchlist::WatchlistCommands;
