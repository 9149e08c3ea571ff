use crate::environment::Environment;
use crate::error::HarnessError;
use anyhow::{anyhow, Result};
use tracing::{info, warn};

mod client;
mod models;

pub use client::*;
pub use models::*;

/// Names of the variables that override repository detection
#[derive(Debug, Clone, Copy)]
pub struct RepoOverrides<'a> {
    pub owner_var: &'a str,
    pub name_var: &'a str,
}

/// Work out which repository the synthetic events belong to.
///
/// Both override variables set: used as-is and `lookup` is never called.
/// Otherwise `lookup` supplies both parts; if it fails the error names the
/// override variables that still need to be set.
pub fn resolve_repository(
    env: &Environment,
    overrides: RepoOverrides<'_>,
    lookup: &RepoLookup,
) -> Result<RepoIdentity, HarnessError> {
    if let (Some(owner), Some(name)) = (env.get(overrides.owner_var), env.get(overrides.name_var)) {
        info!("Using repository {}/{} from environment", owner, name);
        return Ok(RepoIdentity::new(owner, name));
    }

    match lookup
        .name_with_owner()
        .and_then(|raw| parse_name_with_owner(&raw))
    {
        Ok(identity) => {
            info!("Detected repository {} via GitHub CLI", identity);
            Ok(identity)
        }
        Err(e) => {
            warn!("Repository detection failed: {:#}", e);
            let missing = [overrides.owner_var, overrides.name_var]
                .into_iter()
                .filter(|var| !env.is_set(var))
                .map(str::to_string)
                .collect();
            Err(HarnessError::RepositoryUnresolved {
                reason: format!("{:#}", e),
                missing,
            })
        }
    }
}

/// Split "owner/name", rejecting empty parts and extra segments
pub fn parse_name_with_owner(raw: &str) -> Result<RepoIdentity> {
    let raw = raw.trim();
    match raw.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(RepoIdentity::new(owner, name))
        }
        _ => Err(anyhow!("Expected 'owner/name', got '{}'", raw)),
    }
}
