use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const HOME_ENV: &str = "STOCKLEDGER_HOME";

#[derive(Parser, Debug)]
#[command(name = "stockledger", bin_name = "stockledger", version)]
#[command(about = "Confirmed stock counts: record, correct, summarize, export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $STOCKLEDGER_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a confirmed count for one product
    #[command(alias = "a")]
    Add {
        /// Product name
        product: String,

        /// Confirmed count (at least 1)
        #[arg(allow_hyphen_values = true)]
        count: i64,
    },

    /// Record the reviewed counts of one capture (label=count ...)
    #[command(alias = "r")]
    Record {
        /// Entries like milk=3 bottle=2; zero entries are skipped
        #[arg(required = true, num_args = 1..)]
        entries: Vec<String>,
    },

    /// Show the history, newest first
    #[command(alias = "ls")]
    List {
        /// Only products whose name contains this (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,

        /// Only records whose time contains this (e.g. 2026-10 or 2026-10-17)
        #[arg(short, long)]
        date: Option<String>,

        /// Oldest first (ledger order)
        #[arg(long)]
        oldest_first: bool,
    },

    /// Correct the product name and/or count of a record
    #[command(alias = "e")]
    Edit {
        /// Record position (e.g. 3) or id (e.g. #3f9c2a1b)
        selector: String,

        /// New product name
        #[arg(short, long)]
        name: Option<String>,

        /// New count
        #[arg(short, long, allow_hyphen_values = true)]
        count: Option<String>,
    },

    /// Delete one or more records
    #[command(alias = "rm")]
    Delete {
        /// Record positions or ids (e.g. 1 3 #3f9c2a1b)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Total count per product
    #[command(alias = "s")]
    Summary,

    /// Total count per day
    Daily,

    /// Daily trend per product
    #[command(alias = "t")]
    Trends {
        /// Only this product (exact name)
        product: Option<String>,
    },

    /// Export the ledger as CSV
    Export {
        /// Destination directory (default: configured export-dir, else current dir)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Write CSV to stdout instead of a file
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },

    /// Get or set configuration (ledger-file, export-dir)
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_negative_count() {
        let cli = Cli::try_parse_from(["stockledger", "add", "milk", "-2"]).unwrap();
        match cli.command {
            Some(Commands::Add { product, count }) => {
                assert_eq!(product, "milk");
                assert_eq!(count, -2);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn parses_aliases_and_globals() {
        let cli = Cli::try_parse_from(["stockledger", "rm", "1", "#ab12", "--dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { ref selectors }) if selectors.len() == 2
        ));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["stockledger"]).unwrap();
        assert!(cli.command.is_none());
    }
}
