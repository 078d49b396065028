use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum WatchlistCommands {
    /// List tracked instruments.
    List,
    /// Track an instrument (no-op if already tracked).
    Add { symbol: String, name: String },
    /// Stop tracking by symbol or item id.
    Remove { target: String },
    /// Track if untracked, otherwise stop tracking.
    Toggle { symbol: String, name: String },
}
