use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a harness run. None of these are retried.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("missing required environment variable(s): {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("analyzer executable not found: {0}")]
    AnalyzerNotFound(String),

    #[error("could not determine repository owner/name: {reason}")]
    RepositoryUnresolved { reason: String, missing: Vec<String> },

    #[error("analyzer failed for sample {sample} with exit code {code}")]
    AnalyzerFailed { sample: u32, code: i32 },

    #[error("analyzer was terminated by a signal while processing sample {sample}")]
    AnalyzerKilled { sample: u32 },

    #[error("failed to launch analyzer {path:?}")]
    AnalyzerSpawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("result file not found: {}", .0.display())]
    ResultMissing(PathBuf),

    #[error("malformed result file {}: {source}", .path.display())]
    ResultMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown sample number(s): {}", join_numbers(.0))]
    UnknownSamples(Vec<u32>),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HarnessError {
    /// Process exit code this error should terminate the run with
    pub fn exit_code(&self) -> i32 {
        match self {
            HarnessError::AnalyzerFailed { code, .. } => *code,
            _ => 1,
        }
    }

    /// `exit_code` narrowed to what a process can report. Anything outside
    /// 1..=255 becomes 1 so a failure never reads as success.
    pub fn exit_status(&self) -> u8 {
        match u8::try_from(self.exit_code()) {
            Ok(0) | Err(_) => 1,
            Ok(code) => code,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        HarnessError::Io {
            context: context.into(),
            source,
        }
    }
}

fn join_numbers(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// User-friendly error wrapper
#[derive(Debug)]
pub struct UserError {
    message: String,
    details: Option<String>,
    suggestion: Option<String>,
}

impl UserError {
    /// Create a new user error
    pub fn new(message: impl Into<String>) -> Self {
        UserError {
            message: message.into(),
            details: None,
            suggestion: None,
        }
    }

    /// Add details about the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Add a suggestion for how to fix the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Print the error to stderr
    pub fn display(&self) {
        eprintln!("\n❌ Error: {}", self.message);

        if let Some(ref details) = self.details {
            eprintln!("\n   {}", details);
        }

        if let Some(ref suggestion) = self.suggestion {
            eprintln!("\n💡 {}", suggestion);
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref details) = self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UserError {}

/// Turn a harness error into something a person running the smoke test can act on
pub fn user_friendly_error(error: &HarnessError) -> UserError {
    match error {
        HarnessError::MissingEnv(names) => UserError::new("Required configuration is missing")
            .with_details(format!("Not set: {}", names.join(", ")))
            .with_suggestion(format!(
                "Export the variable(s) before running, e.g. export {}=...",
                names.first().map(String::as_str).unwrap_or("GITHUB_TOKEN")
            )),
        HarnessError::AnalyzerNotFound(command) => UserError::new("Analyzer executable not found")
            .with_details(format!("Looked for '{}'", command))
            .with_suggestion("Build the analyzer or pass its location with --analyzer"),
        HarnessError::RepositoryUnresolved { reason, missing } => {
            let mut err = UserError::new("Could not determine the target repository")
                .with_details(reason.clone());
            if !missing.is_empty() {
                err = err.with_suggestion(format!(
                    "Set {} explicitly, or run from a checkout where 'gh repo view' works",
                    missing.join(" and ")
                ));
            }
            err
        }
        HarnessError::AnalyzerFailed { sample, code } => {
            UserError::new(format!("Analyzer failed on sample {}", sample))
                .with_details(format!("Exit code {}", code))
                .with_suggestion("Re-run with -vv and check the analyzer output above")
        }
        HarnessError::ResultMissing(path) => UserError::new("Analyzer produced no result")
            .with_details(format!("Expected {}", path.display()))
            .with_suggestion("Check that the analyzer writes its result next to the event file"),
        HarnessError::UnknownSamples(_) => UserError::new(error.to_string())
            .with_suggestion("Run 'triage-harness samples' to list the available samples"),
        HarnessError::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => {
            UserError::new("Permission denied")
                .with_details(error.to_string())
                .with_suggestion("Check that the work directory is writable")
        }
        other => UserError::new(other.to_string()),
    }
}
