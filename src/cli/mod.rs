//! CLI argument parsing and configuration.

mod args;

pub use args::{parse_args, CliConfig};
