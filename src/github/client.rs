use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::process::Command;
use tracing::debug;

/// Source of the current checkout's `owner/name`
pub enum RepoLookup {
    Gh(GhCli),
    #[cfg(test)]
    Mock(MockLookup),
}

impl RepoLookup {
    /// Lookup backed by the GitHub CLI at `program`
    pub fn gh(program: impl Into<String>) -> Self {
        RepoLookup::Gh(GhCli::new(program))
    }

    #[cfg(test)]
    pub fn mock(response: Result<String, String>) -> Self {
        RepoLookup::Mock(MockLookup::new(response))
    }

    /// Query the canonical "owner/name" of the current repository
    pub fn name_with_owner(&self) -> Result<String> {
        match self {
            RepoLookup::Gh(client) => client.name_with_owner(),
            #[cfg(test)]
            RepoLookup::Mock(client) => client.name_with_owner(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepoView {
    #[serde(rename = "nameWithOwner")]
    name_with_owner: String,
}

/// GitHub CLI wrapper; only `gh repo view` is needed here
pub struct GhCli {
    program: String,
}

impl GhCli {
    pub fn new(program: impl Into<String>) -> Self {
        GhCli {
            program: program.into(),
        }
    }

    /// Run `gh repo view --json nameWithOwner` and return the field
    pub fn name_with_owner(&self) -> Result<String> {
        debug!("Running '{} repo view --json nameWithOwner'", self.program);

        let output = Command::new(&self.program)
            .args(["repo", "view", "--json", "nameWithOwner"])
            .output()
            .with_context(|| format!("Failed to run '{}'. Is GitHub CLI installed?", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "gh repo view failed with exit code {:?}: {}",
                output.status.code(),
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8(output.stdout).context("Invalid UTF-8 in gh output")?;
        parse_repo_view(&stdout)
    }
}

fn parse_repo_view(stdout: &str) -> Result<String> {
    let view: RepoView =
        serde_json::from_str(stdout).context("Failed to parse gh JSON output")?;
    Ok(view.name_with_owner)
}

/// Canned lookup that records how often it was asked
#[cfg(test)]
pub struct MockLookup {
    response: Result<String, String>,
    pub calls: std::cell::Cell<usize>,
}

#[cfg(test)]
impl MockLookup {
    pub fn new(response: Result<String, String>) -> Self {
        MockLookup {
            response,
            calls: std::cell::Cell::new(0),
        }
    }

    pub fn name_with_owner(&self) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone().map_err(|e| anyhow!(e))
    }
}
