use crate::error::HarnessError;
use std::collections::BTreeMap;
use tracing::debug;

/// Snapshot of the process environment taken once at startup.
///
/// Lookups go through this instead of `std::env` so every check sees the
/// same values and tests can supply their own.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment
    pub fn capture() -> Self {
        Environment {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Environment {
            vars: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Value of `name`, treating an empty string as unset
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Fail if any of `names` is unset. All missing names are reported together.
pub fn validate_required(env: &Environment, names: &[&str]) -> Result<(), HarnessError> {
    let missing: Vec<String> = names
        .iter()
        .filter(|name| !env.is_set(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        debug!("All required variables present: {}", names.join(", "));
        Ok(())
    } else {
        Err(HarnessError::MissingEnv(missing))
    }
}

/// Log which analyzer-only variables are set. Values are never logged.
pub fn report_passthrough(env: &Environment, names: &[String]) {
    for name in names {
        if env.is_set(name) {
            debug!("{} is set and will be passed to the analyzer", name);
        } else {
            debug!("{} not set; analyzer will use its default", name);
        }
    }
}
