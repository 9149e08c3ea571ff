//! Test utilities for issue-triage-harness
#![cfg(test)]

use crate::github::RepoIdentity;
use crate::result::TriageResult;
use crate::samples::Sample;

/// A small bilingual sample that is not part of the catalogue
pub fn test_sample() -> Sample {
    Sample {
        number: 9,
        title: "测试 title",
        body: "Steps:\n1. run `app`\n2. 看到错误",
    }
}

pub fn test_repo() -> RepoIdentity {
    RepoIdentity::new("octo-org", "triage-bot")
}

/// A result as the analyzer would write it
pub fn test_result(body: &str) -> TriageResult {
    TriageResult {
        template_file: Some("bug_report.md".to_string()),
        title: Some("[Bug] Crash on startup".to_string()),
        labels: Some(vec!["bug".to_string(), "ai:triage".to_string()]),
        markdown_body: Some(body.to_string()),
    }
}
