use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "triage-harness",
    about = "Drive an issue-triage analyzer with synthetic GitHub issue events",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, env = "TRIAGE_HARNESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Analyzer executable (path or name on PATH)
    #[arg(long, value_name = "COMMAND")]
    pub analyzer: Option<String>,

    /// Directory for event and result files
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// GitHub CLI used to detect the repository
    #[arg(long, value_name = "PROGRAM")]
    pub gh: Option<String>,

    /// Only run these sample numbers (can be repeated)
    #[arg(short, long = "sample", value_name = "N")]
    pub samples: Vec<u32>,

    /// Write event files without invoking the analyzer
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in samples
    Samples,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_basic() {
        let cli = Cli::parse_from(["triage-harness"]);

        assert!(cli.command.is_none());
        assert!(cli.analyzer.is_none());
        assert!(cli.samples.is_empty());
        assert!(!cli.dry_run);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parsing_overrides() {
        let cli = Cli::parse_from([
            "triage-harness",
            "--analyzer",
            "./target/release/issue-analyzer",
            "--work-dir",
            "/tmp/triage",
            "--gh",
            "/usr/local/bin/gh",
            "-vv",
        ]);

        assert_eq!(cli.analyzer.as_deref(), Some("./target/release/issue-analyzer"));
        assert_eq!(cli.work_dir, Some(PathBuf::from("/tmp/triage")));
        assert_eq!(cli.gh.as_deref(), Some("/usr/local/bin/gh"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_parsing_sample_selection() {
        let cli = Cli::parse_from(["triage-harness", "-s", "2", "--sample", "5", "--dry-run"]);

        assert_eq!(cli.samples, vec![2, 5]);
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_parsing_samples_command() {
        let cli = Cli::parse_from(["triage-harness", "samples"]);

        match cli.command {
            Some(Commands::Samples) => {}
            _ => panic!("Expected Samples command"),
        }
    }
}
