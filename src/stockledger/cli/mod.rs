//! # CLI Layer
//!
//! One client of the `stockledger` library. This is the only place that knows about
//! stdout, stderr, environment variables and the platform data directory.
//!
//! - `setup`: clap argument definitions
//! - `commands`: `run()`, context setup, one `handle_*` per subcommand
//! - `print`: turns `CmdResult` data into terminal output

mod commands;
mod print;
pub mod setup;

pub use commands::run;
