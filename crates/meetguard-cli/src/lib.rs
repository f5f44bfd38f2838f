//! meetguard command-line driver.
//!
//! Parses the arguments, loads `config.toml`, and runs one check: list the
//! events of a window, flag those without a company attendee, and mail a
//! reminder when any are found.

pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod secret;

pub use check::{CheckOutcome, CheckRequest, run_check};
pub use cli::Cli;
pub use config::AppConfig;
pub use error::{CliError, CliResult};
