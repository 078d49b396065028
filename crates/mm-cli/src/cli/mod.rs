use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `marketmind` binary.
#[derive(Debug, Parser)]
#[command(
    name = "marketmind",
    version,
    about = "MarketMind - AI market strategist in your terminal"
)]
pub struct Cli {
    /// Defaults to `chat` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: text, json
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Directory for the watchlist and generated charts
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Keep the watchlist in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            data_dir: self.data_dir.clone(),
            ephemeral: self.ephemeral,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::WatchlistCommands;
    use super::{Cli, ColorMode, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["marketmind"]).expect("cli should parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.color, ColorMode::Auto);
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "marketmind",
            "--format",
            "json",
            "--verbose",
            "--ephemeral",
            "watchlist",
            "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(cli.ephemeral);
        assert!(matches!(
            cli.command,
            Some(Commands::Watchlist {
                action: WatchlistCommands::List
            })
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "marketmind",
            "ask",
            "分析 黃金 (Gold) 走勢",
            "--quiet",
            "--color",
            "never",
        ])
        .expect("cli should parse");

        assert!(cli.quiet);
        assert_eq!(cli.color, ColorMode::Never);
        match cli.command {
            Some(Commands::Ask(args)) => assert_eq!(args.question(), "分析 黃金 (Gold) 走勢"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn ask_joins_unquoted_words() {
        let cli = Cli::try_parse_from(["marketmind", "ask", "查詢", "NVDA", "財報"])
            .expect("cli should parse");
        match cli.command {
            Some(Commands::Ask(args)) => assert_eq!(args.question(), "查詢 NVDA 財報"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn watchlist_add_takes_symbol_and_name() {
        let cli = Cli::try_parse_from(["marketmind", "watchlist", "add", "2330", "台積電"])
            .expect("cli should parse");
        match cli.command {
            Some(Commands::Watchlist {
                action: WatchlistCommands::Add { symbol, name },
            }) => {
                assert_eq!(symbol, "2330");
                assert_eq!(name, "台積電");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["marketmind", "--format", "xml", "chat"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["marketmind", "--data-dir", "/tmp/mm", "chat"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.data_dir.as_deref(), Some("/tmp/mm"));
        assert!(!flags.ephemeral);
    }
}
