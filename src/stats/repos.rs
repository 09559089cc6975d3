// Repository-level statistics.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::github::types::Repository;

/// Window for "recently updated", in days.
const RECENT_WINDOW_DAYS: i64 = 30;
/// Window for "active", in days.
const ACTIVE_WINDOW_DAYS: i64 = 180;
/// Size of the top-repository shortlist.
const TOP_REPOS: usize = 5;

/// Counts derived from the full repository list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryStats {
    pub recently_updated: usize,
    pub active_in_six_months: usize,
    pub forked: usize,
    pub original: usize,
    pub with_open_issues: usize,
    /// Top non-fork repositories by stars; ties keep upstream order.
    pub top_repositories: Vec<Repository>,
}

pub fn repository_stats(repos: &[Repository], now: DateTime<Utc>) -> RepositoryStats {
    let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let active_cutoff = now - Duration::days(ACTIVE_WINDOW_DAYS);

    let mut top: Vec<Repository> = repos.iter().filter(|repo| !repo.fork).cloned().collect();
    top.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    top.truncate(TOP_REPOS);

    RepositoryStats {
        recently_updated: repos.iter().filter(|r| r.updated_at > recent_cutoff).count(),
        active_in_six_months: repos.iter().filter(|r| r.updated_at > active_cutoff).count(),
        forked: repos.iter().filter(|r| r.fork).count(),
        original: repos.iter().filter(|r| !r.fork).count(),
        with_open_issues: repos
            .iter()
            .filter(|r| r.has_issues && r.open_issues_count > 0)
            .count(),
        top_repositories: top,
    }
}

/// Sum of stars across the list.
pub fn total_stars(repos: &[Repository]) -> u64 {
    repos.iter().map(|repo| repo.stargazers_count).sum()
}

/// Sum of forks across the list.
pub fn total_forks(repos: &[Repository]) -> u64 {
    repos.iter().map(|repo| repo.forks_count).sum()
}

/// First repository beating every earlier star count. A list with no starred
/// repositories has no winner.
pub fn most_starred(repos: &[Repository]) -> Option<&Repository> {
    repos.iter().fold(None, |best: Option<&Repository>, repo| {
        if repo.stargazers_count > best.map_or(0, |b| b.stargazers_count) {
            Some(repo)
        } else {
            best
        }
    })
}
