use crate::environment::Environment;
use crate::error::HarnessError;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;
use tracing::{debug, info};

/// Find the analyzer executable.
///
/// A command containing a path separator must name an existing file; a bare
/// name is searched for in the `PATH` of `env`.
pub fn locate(command: &str, env: &Environment) -> Result<PathBuf, HarnessError> {
    let direct = Path::new(command);
    if direct.components().count() > 1 || direct.is_absolute() {
        return if direct.is_file() {
            Ok(direct.to_path_buf())
        } else {
            Err(HarnessError::AnalyzerNotFound(command.to_string()))
        };
    }

    env.get("PATH")
        .into_iter()
        .flat_map(|paths| std::env::split_paths(paths))
        .map(|dir| dir.join(command))
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| HarnessError::AnalyzerNotFound(command.to_string()))
}

/// The external analyzer, invoked once per event with no arguments
#[derive(Debug, Clone)]
pub struct Analyzer {
    path: PathBuf,
    event_path_var: String,
}

impl Analyzer {
    pub fn new(path: PathBuf, event_path_var: impl Into<String>) -> Self {
        Analyzer {
            path,
            event_path_var: event_path_var.into(),
        }
    }

    /// Run the analyzer against one event file and wait for it to exit.
    ///
    /// The child inherits this process's environment and stdio; the only
    /// addition is the event path variable.
    pub fn run(&self, sample: u32, event_path: &Path) -> Result<(), HarnessError> {
        debug!(
            "Running {:?} with {}={:?}",
            self.path, self.event_path_var, event_path
        );
        let started = Instant::now();

        let status = Command::new(&self.path)
            .env(&self.event_path_var, event_path)
            .status()
            .map_err(|source| HarnessError::AnalyzerSpawn {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "Analyzer finished sample {} in {:.2?} ({})",
            sample,
            started.elapsed(),
            status
        );

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(HarnessError::AnalyzerFailed { sample, code }),
            None => Err(HarnessError::AnalyzerKilled { sample }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("issue-analyzer");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();

        let found = locate(exe.to_str().unwrap(), &Environment::default()).unwrap();
        assert_eq!(found, exe);
    }

    #[test]
    fn test_locate_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            locate(missing.to_str().unwrap(), &Environment::default()),
            Err(HarnessError::AnalyzerNotFound(_))
        ));
    }

    #[test]
    fn test_locate_searches_path() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let exe = second.path().join("issue-analyzer");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();

        let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
        let env = Environment::from_pairs([("PATH", path_var.to_str().unwrap())]);

        assert_eq!(locate("issue-analyzer", &env).unwrap(), exe);
        assert!(matches!(
            locate("other-analyzer", &env),
            Err(HarnessError::AnalyzerNotFound(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_maps_exit_codes() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("analyzer.sh");
        std::fs::write(&exe, "#!/bin/sh\ntest -n \"$EVENT_FILE\" || exit 9\nexit 3\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let analyzer = Analyzer::new(exe, "EVENT_FILE");
        match analyzer.run(5, Path::new(".github/.ai/tmp_event_5.json")) {
            Err(HarnessError::AnalyzerFailed { sample, code }) => {
                assert_eq!(sample, 5);
                assert_eq!(code, 3);
            }
            other => panic!("Expected AnalyzerFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_reports_signal_death() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("analyzer.sh");
        std::fs::write(&exe, "#!/bin/sh\nkill -9 $$\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let analyzer = Analyzer::new(exe, "EVENT_FILE");
        let err = analyzer.run(4, Path::new(".github/.ai/tmp_event_4.json")).unwrap_err();
        assert!(matches!(err, HarnessError::AnalyzerKilled { sample: 4 }));
        assert_eq!(err.exit_status(), 1);
    }
}
