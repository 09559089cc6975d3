// Derived-statistics layer.
// Pure transforms from raw upstream records to the snapshot types the
// presentation layer renders. No network or storage access; callers pass
// `now` explicitly so results are reproducible.

pub mod activity;
pub mod contributions;
pub mod languages;
pub mod projects;
pub mod repos;

pub use activity::ActivityItem;
pub use contributions::ContributionDay;
pub use languages::{LanguageStat, SkillsSnapshot, skills_snapshot};
pub use projects::{ProjectEntry, SourceOrigin, curated_projects};
pub use repos::RepositoryStats;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::types::{ContributionCalendar, Event, Repository, UserProfile};

/// Headline totals for the profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalStats {
    pub total_contributions: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_repositories: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub public_repos: usize,
    pub most_starred: Option<Repository>,
}

/// Everything the profile page needs, derived in one pass and cached as a
/// single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub user: UserProfile,
    pub contributions: Vec<ContributionDay>,
    pub recent_activity: Vec<ActivityItem>,
    pub language_stats: Vec<LanguageStat>,
    pub repository_stats: RepositoryStats,
    pub totals: TotalStats,
}

/// Derive the complete snapshot from the raw upstream payloads.
pub fn aggregate(
    user: UserProfile,
    calendar: &ContributionCalendar,
    events: &[Event],
    repos: &[Repository],
    now: DateTime<Utc>,
) -> AggregateSnapshot {
    let contributions = contributions::build_calendar(&calendar.contributions);

    let totals = TotalStats {
        total_contributions: contributions::total_contributions(&contributions),
        current_streak: contributions::current_streak(&contributions),
        longest_streak: contributions::longest_streak(&contributions),
        total_repositories: repos.len(),
        total_stars: repos::total_stars(repos),
        total_forks: repos::total_forks(repos),
        public_repos: repos.iter().filter(|repo| !repo.private).count(),
        most_starred: repos::most_starred(repos).cloned(),
    };

    AggregateSnapshot {
        user,
        recent_activity: activity::recent_activity(events),
        language_stats: languages::language_distribution(repos),
        repository_stats: repos::repository_stats(repos, now),
        contributions,
        totals,
    }
}
