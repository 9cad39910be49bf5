//! CLI argument parsing and configuration.

use std::io;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable that suppresses the celebration animation,
/// equivalent to `--reduced-motion`
pub const REDUCED_MOTION_ENV: &str = "GRIND_REDUCED_MOTION";

/// Configuration from CLI arguments
pub struct CliConfig {
    /// Explicit dataset file; `None` uses the resolution chain
    pub dataset_path: Option<PathBuf>,
    /// Location of the progress database
    pub db_path: PathBuf,
    /// Skip the celebration animation entirely
    pub reduced_motion: bool,
}

/// Per-user data directory (progress database and log file)
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("grind-tui")
}

/// Print usage information
pub fn print_usage() {
    eprintln!("Grind TUI - terminal progress tracker for coding-practice problem lists");
    eprintln!();
    eprintln!("Usage: grind-tui [dataset-file] [OPTIONS]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [dataset-file]  Path to a problems.json dataset file");
    eprintln!("                  If omitted, looks for ./problems.json, then");
    eprintln!("                  <config-dir>/grind-tui/problems.json, then a");
    eprintln!("                  built-in sample dataset");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <path>        Progress database location");
    eprintln!("                     (default: <data-dir>/grind-tui/progress.db)");
    eprintln!("  --reduced-motion   Disable the celebration animation");
    eprintln!("  -h, --help         Show this help message");
    eprintln!("  -V, --version      Show version");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  grind-tui                          # Use the resolution chain");
    eprintln!("  grind-tui lists/neetcode150.json   # Track a specific list");
}

/// Parse CLI arguments and return configuration
pub fn parse_args() -> io::Result<CliConfig> {
    parse_from(std::env::args().skip(1).collect())
}

fn parse_from(args: Vec<String>) -> io::Result<CliConfig> {
    let mut dataset_path: Option<PathBuf> = None;
    let mut db_path: Option<PathBuf> = None;
    let mut reduced_motion = std::env::var(REDUCED_MOTION_ENV)
        .map(|v| !v.is_empty())
        .unwrap_or(false);

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-h" || arg == "--help" {
            print_usage();
            std::process::exit(0);
        } else if arg == "-V" || arg == "--version" {
            println!("grind-tui {}", VERSION);
            std::process::exit(0);
        } else if arg == "--reduced-motion" {
            reduced_motion = true;
            i += 1;
        } else if arg == "--db" {
            i += 1;
            if i >= args.len() {
                print_usage();
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "Missing value for --db",
                ));
            }
            db_path = Some(PathBuf::from(&args[i]));
            i += 1;
        } else if !arg.starts_with('-') {
            dataset_path = Some(PathBuf::from(arg));
            i += 1;
        } else {
            print_usage();
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unknown argument: {}", arg),
            ));
        }
    }

    Ok(CliConfig {
        dataset_path,
        db_path: db_path.unwrap_or_else(|| default_data_dir().join("progress.db")),
        reduced_motion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset_positional() {
        let config = parse_from(vec!["lists/neetcode150.json".to_string()]).unwrap();
        assert_eq!(
            config.dataset_path,
            Some(PathBuf::from("lists/neetcode150.json"))
        );
    }

    #[test]
    fn test_parse_db_override() {
        let config = parse_from(vec!["--db".to_string(), "/tmp/p.db".to_string()]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/p.db"));
    }

    #[test]
    fn test_parse_db_missing_value() {
        let result = parse_from(vec!["--db".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_flag() {
        let result = parse_from(vec!["--frobnicate".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_reduced_motion_flag() {
        let config = parse_from(vec!["--reduced-motion".to_string()]).unwrap();
        assert!(config.reduced_motion);
    }
}
