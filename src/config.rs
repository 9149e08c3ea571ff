use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Placeholder for the sample number in file name patterns
pub const SAMPLE_PLACEHOLDER: &str = "{n}";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub env: EnvConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Names of the environment variables the harness reads
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnvConfig {
    #[serde(default = "default_token_var")]
    pub token_var: String,
    #[serde(default = "default_api_key_var")]
    pub api_key_var: String,
    #[serde(default = "default_owner_var")]
    pub owner_var: String,
    #[serde(default = "default_name_var")]
    pub name_var: String,
    /// Variables only the analyzer consumes; reported but never required
    #[serde(default = "default_passthrough")]
    pub passthrough: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_analyzer_command")]
    pub command: String,
    #[serde(default = "default_event_path_var")]
    pub event_path_var: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// Event file name inside `work_dir`; `{n}` is replaced by the sample number
    #[serde(default = "default_event_file")]
    pub event_file: String,
    /// Result file name the analyzer writes inside `work_dir`
    #[serde(default = "default_result_file")]
    pub result_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    #[serde(default = "default_gh_cli")]
    pub cli: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Label attached to every synthetic issue
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Config {
    /// Load configuration from an explicit path, or from the default location if present.
    ///
    /// A missing default file is not an error; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.paths.work_dir = expand_tilde(&config.paths.work_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// File name patterns must contain `{n}` so every sample gets its own files
    pub fn validate(&self) -> Result<()> {
        for (key, pattern) in [
            ("paths.event_file", &self.paths.event_file),
            ("paths.result_file", &self.paths.result_file),
        ] {
            if !pattern.contains(SAMPLE_PLACEHOLDER) {
                bail!("{} must contain {}, got '{}'", key, SAMPLE_PLACEHOLDER, pattern);
            }
        }
        Ok(())
    }

    /// `~/.config/triage-harness/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("triage-harness").join("config.toml"))
    }

    /// Names of the variables that must be set before any sample runs
    pub fn required_vars(&self) -> Vec<&str> {
        vec![self.env.token_var.as_str(), self.env.api_key_var.as_str()]
    }
}

/// Expand tilde in paths to home directory
fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        return Ok(home.join(rest));
    }
    Ok(path.to_path_buf())
}

// Default value functions
fn default_token_var() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_api_key_var() -> String {
    "DEEPSEEK_API_KEY".to_string()
}

fn default_owner_var() -> String {
    "TEST_OWNER".to_string()
}

fn default_name_var() -> String {
    "TEST_REPO".to_string()
}

fn default_passthrough() -> Vec<String> {
    vec!["DEEPSEEK_BASE_URL".to_string(), "DEEPSEEK_MODEL".to_string()]
}

fn default_analyzer_command() -> String {
    "./issue-analyzer".to_string()
}

fn default_event_path_var() -> String {
    "GITHUB_EVENT_PATH".to_string()
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".github/.ai")
}

fn default_event_file() -> String {
    "tmp_event_{n}.json".to_string()
}

fn default_result_file() -> String {
    "issue_{n}.json".to_string()
}

fn default_gh_cli() -> String {
    "gh".to_string()
}

fn default_label() -> String {
    "ai:triage".to_string()
}

fn default_preview_chars() -> usize {
    160
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            token_var: default_token_var(),
            api_key_var: default_api_key_var(),
            owner_var: default_owner_var(),
            name_var: default_name_var(),
            passthrough: default_passthrough(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            command: default_analyzer_command(),
            event_path_var: default_event_path_var(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            work_dir: default_work_dir(),
            event_file: default_event_file(),
            result_file: default_result_file(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            cli: default_gh_cli(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            label: default_label(),
            preview_chars: default_preview_chars(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.env.token_var, "GITHUB_TOKEN");
        assert_eq!(config.env.api_key_var, "DEEPSEEK_API_KEY");
        assert_eq!(config.env.owner_var, "TEST_OWNER");
        assert_eq!(config.env.name_var, "TEST_REPO");
        assert_eq!(config.env.passthrough, vec!["DEEPSEEK_BASE_URL", "DEEPSEEK_MODEL"]);
        assert_eq!(config.analyzer.event_path_var, "GITHUB_EVENT_PATH");
        assert_eq!(config.paths.work_dir, PathBuf::from(".github/.ai"));
        assert_eq!(config.paths.event_file, "tmp_event_{n}.json");
        assert_eq!(config.paths.result_file, "issue_{n}.json");
        assert_eq!(config.github.cli, "gh");
        assert_eq!(config.output.label, "ai:triage");
        assert_eq!(config.output.preview_chars, 160);
        assert_eq!(config.required_vars(), vec!["GITHUB_TOKEN", "DEEPSEEK_API_KEY"]);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml(
            r#"
[analyzer]
command = "/opt/triage/bin/analyze"

[output]
preview_chars = 40
"#,
        )
        .unwrap();

        assert_eq!(config.analyzer.command, "/opt/triage/bin/analyze");
        assert_eq!(config.analyzer.event_path_var, "GITHUB_EVENT_PATH");
        assert_eq!(config.output.preview_chars, 40);
        assert_eq!(config.output.label, "ai:triage");
        assert_eq!(config.env.token_var, "GITHUB_TOKEN");
        assert_eq!(config.paths.result_file, "issue_{n}.json");
    }

    #[test]
    fn test_file_name_patterns_from_toml() {
        let config = Config::from_toml(
            r#"
[paths]
work_dir = "out"
event_file = "event-{n}.json"
result_file = "triage-{n}.json"
"#,
        )
        .unwrap();

        assert_eq!(config.paths.work_dir, PathBuf::from("out"));
        assert_eq!(config.paths.event_file, "event-{n}.json");
        assert_eq!(config.paths.result_file, "triage-{n}.json");
    }

    #[test]
    fn test_pattern_without_placeholder_is_rejected() {
        let err = Config::from_toml("[paths]\nresult_file = \"issue.json\"\n").unwrap_err();
        assert!(err.to_string().contains("paths.result_file must contain {n}"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[paths\nwork_dir = 3").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_path_expansion() {
        let home = dirs::home_dir().unwrap();
        let expanded = expand_tilde(Path::new("~/triage/tmp")).unwrap();
        assert_eq!(expanded, home.join("triage/tmp"));

        let relative = PathBuf::from("tmp");
        assert_eq!(expand_tilde(&relative).unwrap(), relative);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[analyzer]"));
        assert!(toml_str.contains("[env]"));

        let config2 = Config::from_toml(&toml_str).unwrap();
        assert_eq!(config.analyzer.command, config2.analyzer.command);
    }
}
