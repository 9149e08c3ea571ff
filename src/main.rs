use anyhow::{Context, Result};
use clap::Parser;
use issue_triage_harness::{
    cli::{Cli, Commands},
    environment::Environment,
    error::user_friendly_error,
    run_harness, samples, Config, RunOptions,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    match cli.command {
        Some(Commands::Samples) => {
            list_samples();
            ExitCode::SUCCESS
        }
        None => run(&cli),
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> ExitCode {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let env = Environment::capture();
    let options = RunOptions {
        only: cli.samples.clone(),
        dry_run: cli.dry_run,
    };

    let mut stdout = std::io::stdout().lock();
    match run_harness(&config, &env, &options, &mut stdout) {
        Ok(report) => {
            info!(
                "Run complete: {} event file(s) in {:?}",
                report.event_files.len(),
                config.paths.work_dir
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            user_friendly_error(&e).display();
            ExitCode::from(e.exit_status())
        }
    }
}

/// Config file first, then command-line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    info!("Loading configuration");
    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(analyzer) = &cli.analyzer {
        config.analyzer.command = analyzer.clone();
    }
    if let Some(work_dir) = &cli.work_dir {
        config.paths.work_dir = work_dir.clone();
    }
    if let Some(gh) = &cli.gh {
        config.github.cli = gh.clone();
    }

    Ok(config)
}

fn list_samples() {
    for sample in samples::default_samples() {
        let first_line = sample.body.lines().next().unwrap_or_default();
        println!("{:>3}  {}", sample.number, sample.title);
        println!("     {}", first_line);
    }
}
