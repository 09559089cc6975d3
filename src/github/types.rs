// Upstream API response types.
// Defines structs for deserializing GitHub REST API payloads and the
// third-party contribution-calendar feed. Optional fields default rather
// than fail, so a sparse record never aborts an aggregation pass.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

fn unix_epoch() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// Public profile of the portfolio owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
}

/// GitHub repository, as returned by the user and organization listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub has_issues: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default = "unix_epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "unix_epoch")]
    pub updated_at: DateTime<Utc>,
}

impl Repository {
    /// The API reports homepages as empty strings as often as nulls; only a
    /// non-empty URL counts as a live demo link.
    pub fn has_homepage(&self) -> bool {
        self.homepage.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Event kind discriminator for the public event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "PushEvent")]
    Push,
    #[serde(rename = "CreateEvent")]
    Create,
    #[serde(rename = "PullRequestEvent")]
    PullRequest,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Public event from a user's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    #[serde(default)]
    pub repo: EventRepo,
    #[serde(default)]
    pub payload: EventPayload,
    #[serde(default = "unix_epoch")]
    pub created_at: DateTime<Utc>,
}

/// Repository reference attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
    #[serde(default)]
    pub name: String,
}

/// Kind-specific event payload; fields are populated per event kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Option<Vec<CommitRef>>,
    #[serde(default)]
    pub ref_type: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

/// Commit reference within a push event's batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitRef {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub message: String,
}

/// Trailing-year contribution calendar from the aggregator feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    #[serde(default)]
    pub contributions: Vec<RawContributionDay>,
}

/// One raw calendar day; the intensity level is derived locally, not taken
/// from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawContributionDay {
    #[serde(default)]
    pub date: NaiveDate,
    #[serde(default)]
    pub count: u32,
}

#[cfg(test)]
impl Repository {
    /// Baseline repository for tests; override fields as needed.
    pub fn sample(name: &str) -> Self {
        Self {
            name: name.to_string(),
            full_name: format!("acme/{name}"),
            html_url: format!("https://github.com/acme/{name}"),
            description: None,
            language: None,
            topics: Vec::new(),
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            has_issues: false,
            fork: false,
            archived: false,
            private: false,
            homepage: None,
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }
}
