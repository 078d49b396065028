use clap::{Args, Subcommand};

use crate::cli::subcommands::WatchlistCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Interactive session (default).
    Chat,
    /// Ask one question and print the answer.
    Ask(AskArgs),
    /// Manage the watchlist.
    Watchlist {
        #[command(subcommand)]
        action: WatchlistCommands,
    },
    /// Post-process a saved model answer offline.
    Parse(ParseArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    /// Question text; several words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,
}

impl AskArgs {
    #[must_use]
    pub fn question(&self) -> String {
        self.words.join(" ")
    }
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    /// Read the answer from a file instead of stdin.
    #[arg(long)]
    pub file: Option<String>,
}
