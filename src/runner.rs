use crate::analyzer::{self, Analyzer};
use crate::config::Config;
use crate::environment::{self, Environment};
use crate::error::HarnessError;
use crate::event;
use crate::github::{self, RepoIdentity, RepoLookup, RepoOverrides};
use crate::result::{self, TriageResult};
use crate::samples::{self, Sample};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Per-invocation choices that are not part of the config file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Sample numbers to run; empty means all
    pub only: Vec<u32>,
    /// Write event files without invoking the analyzer
    pub dry_run: bool,
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub repository: RepoIdentity,
    /// Event files in the order they were written
    pub event_files: Vec<PathBuf>,
    /// Results in sample order; empty for dry runs
    pub results: Vec<(u32, TriageResult)>,
}

/// Validate the environment, resolve the repository and drive every selected
/// sample through the analyzer. Stops at the first failure.
pub fn run_harness(
    config: &Config,
    env: &Environment,
    options: &RunOptions,
    out: &mut impl Write,
) -> Result<RunReport, HarnessError> {
    environment::validate_required(env, &config.required_vars())?;
    environment::report_passthrough(env, &config.env.passthrough);

    let samples = samples::select(samples::default_samples(), &options.only)?;

    let analyzer = if options.dry_run {
        info!("Dry run: analyzer will not be invoked");
        None
    } else {
        let path = analyzer::locate(&config.analyzer.command, env)?;
        info!("Using analyzer at {:?}", path);
        Some(Analyzer::new(path, config.analyzer.event_path_var.clone()))
    };

    let lookup = RepoLookup::gh(config.github.cli.clone());
    let repository = github::resolve_repository(
        env,
        RepoOverrides {
            owner_var: &config.env.owner_var,
            name_var: &config.env.name_var,
        },
        &lookup,
    )?;

    let runner = Runner {
        work_dir: config.paths.work_dir.clone(),
        event_file: config.paths.event_file.clone(),
        result_file: config.paths.result_file.clone(),
        label: config.output.label.clone(),
        preview_chars: config.output.preview_chars,
        repository,
        analyzer,
    };
    runner.run(&samples, out)
}

/// Sequential per-sample driver
pub struct Runner {
    pub work_dir: PathBuf,
    /// File name patterns inside `work_dir`, `{n}` being the sample number
    pub event_file: String,
    pub result_file: String,
    pub label: String,
    pub preview_chars: usize,
    pub repository: RepoIdentity,
    /// `None` for a dry run
    pub analyzer: Option<Analyzer>,
}

impl Runner {
    /// Process `samples` in order, printing one summary block per sample to `out`
    pub fn run(&self, samples: &[Sample], out: &mut impl Write) -> Result<RunReport, HarnessError> {
        let mut report = RunReport {
            repository: self.repository.clone(),
            event_files: Vec::with_capacity(samples.len()),
            results: Vec::new(),
        };

        for sample in samples {
            info!("Processing sample {}: {}", sample.number, sample.title);

            let payload = event::build_payload(sample, &self.repository, &self.label);
            let event_path = event::write_event(&self.work_dir, &self.event_file, &payload)?;
            report.event_files.push(event_path.clone());

            let Some(analyzer) = &self.analyzer else {
                emit(out, &format!("📝 Sample {}: wrote {}\n", sample.number, event_path.display()))?;
                continue;
            };

            analyzer
                .run(sample.number, &event_path)
                .inspect_err(|e| debug!("Sample {} failed: {}", sample.number, e))?;

            let result_path = event::sample_file(&self.work_dir, &self.result_file, sample.number);
            let result = TriageResult::load(&result_path)
                .inspect_err(|e| debug!("Sample {} failed: {}", sample.number, e))?;
            info!("Loaded result for sample {} from {:?}", sample.number, result_path);

            emit(
                out,
                &result::render_summary(sample, &result_path, &result, self.preview_chars),
            )?;
            emit(out, "\n")?;
            report.results.push((sample.number, result));
        }

        let verb = if self.analyzer.is_some() { "Analyzed" } else { "Wrote events for" };
        emit(
            out,
            &format!("✓ {} {} sample(s) for {}\n", verb, samples.len(), self.repository),
        )?;
        Ok(report)
    }
}

fn emit(out: &mut impl Write, text: &str) -> Result<(), HarnessError> {
    out.write_all(text.as_bytes())
        .map_err(|e| HarnessError::io("Failed to write summary", e))
}
