use crate::config::SAMPLE_PLACEHOLDER;
use crate::error::HarnessError;
use crate::github::{Account, EventIssue, EventLabel, EventRepository, IssueEvent, RepoIdentity};
use crate::samples::Sample;
use jiff::Timestamp;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Login recorded as the author of every synthetic issue
const SYNTHETIC_AUTHOR: &str = "triage-harness";

/// `<dir>/<pattern>` with `{n}` replaced by the sample number
pub fn sample_file(dir: &Path, pattern: &str, number: u32) -> PathBuf {
    dir.join(pattern.replace(SAMPLE_PLACEHOLDER, &number.to_string()))
}

/// Build an `issues.opened` event for one sample
pub fn build_payload(sample: &Sample, repo: &RepoIdentity, label: &str) -> IssueEvent {
    IssueEvent {
        action: "opened".to_string(),
        issue: EventIssue {
            number: sample.number,
            title: sample.title.to_string(),
            body: sample.body.to_string(),
            state: "open".to_string(),
            labels: vec![EventLabel {
                name: label.to_string(),
            }],
            user: Account {
                login: SYNTHETIC_AUTHOR.to_string(),
            },
            created_at: Timestamp::now(),
        },
        repository: EventRepository {
            name: repo.name.clone(),
            full_name: repo.full_name(),
            owner: Account {
                login: repo.owner.clone(),
            },
        },
        sender: Account {
            login: SYNTHETIC_AUTHOR.to_string(),
        },
    }
}

/// Write the payload as pretty JSON to `dir/<pattern>`, creating `dir` if needed.
/// Returns the path written.
pub fn write_event(dir: &Path, pattern: &str, payload: &IssueEvent) -> Result<PathBuf, HarnessError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| HarnessError::io(format!("Failed to create directory {:?}", dir), e))?;

    let path = sample_file(dir, pattern, payload.issue.number);
    // serde_json leaves non-ASCII characters unescaped
    let contents = serde_json::to_string_pretty(payload)
        .map_err(|e| HarnessError::Other(anyhow::Error::new(e).context("Failed to serialize event")))?;

    std::fs::write(&path, contents)
        .map_err(|e| HarnessError::io(format!("Failed to write event to {:?}", path), e))?;

    debug!("Wrote event for sample {} to {:?}", payload.issue.number, path);
    Ok(path)
}
