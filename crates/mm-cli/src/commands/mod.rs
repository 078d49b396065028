pub mod ask;
pub mod chat;
pub mod dispatch;
pub mod parse;
pub mod watchlist;
