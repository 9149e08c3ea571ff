use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repository an event is attributed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    pub owner: String,
    pub name: String,
}

impl RepoIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoIdentity {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// "owner/name"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Webhook-shaped `issues` event handed to the analyzer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IssueEvent {
    pub action: String,
    pub issue: EventIssue,
    pub repository: EventRepository,
    pub sender: Account,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventIssue {
    pub number: u32,
    pub title: String,
    pub body: String,
    pub state: String,
    pub labels: Vec<EventLabel>,
    pub user: Account,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventRepository {
    pub name: String,
    pub full_name: String,
    pub owner: Account,
}

/// Login-only user/owner object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    pub login: String,
}
