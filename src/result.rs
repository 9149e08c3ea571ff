use crate::error::HarnessError;
use crate::samples::Sample;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

/// Shown in place of a field the analyzer left out or set to null
const ABSENT: &str = "(none)";

/// What the analyzer writes back for one event.
///
/// Every field may be missing or null; only unparseable JSON is fatal.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TriageResult {
    #[serde(default)]
    pub template_file: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub markdown_body: Option<String>,
}

impl TriageResult {
    /// Read a result file. A missing file and unparseable JSON are distinct errors.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        if !path.exists() {
            return Err(HarnessError::ResultMissing(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| HarnessError::io(format!("Failed to read result from {:?}", path), e))?;

        serde_json::from_str(&contents).map_err(|source| HarnessError::ResultMalformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Body flattened to one line and cut to at most `max_chars` characters
    pub fn preview(&self, max_chars: usize) -> String {
        let body = self.markdown_body.as_deref().unwrap_or_default();
        let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let mut cut: String = flat.chars().take(max_chars).collect();
        cut.push_str("...");
        cut
    }
}

/// Human-readable block printed after each sample
pub fn render_summary(
    sample: &Sample,
    result_path: &Path,
    result: &TriageResult,
    preview_chars: usize,
) -> String {
    let labels = match result.labels.as_deref() {
        Some(labels) if !labels.is_empty() => labels.join(", "),
        _ => ABSENT.to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "✓ Sample {}: {}", sample.number, sample.title);
    let _ = writeln!(out, "  result:   {}", result_path.display());
    let _ = writeln!(
        out,
        "  template: {}",
        result.template_file.as_deref().unwrap_or(ABSENT)
    );
    let _ = writeln!(out, "  title:    {}", result.title.as_deref().unwrap_or(ABSENT));
    let _ = writeln!(out, "  labels:   {}", labels);
    let _ = writeln!(out, "  body:     {}", result.preview(preview_chars));
    out
}
