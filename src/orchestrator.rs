// Fetch orchestration.
// One flow per cached dataset: consult the cache, fetch all upstream pages
// concurrently on a miss, aggregate, cache, and track loading/error state
// for the presentation layer.

#![allow(dead_code)]

use chrono::Utc;
use tracing::debug;

use crate::cache::TimeBoxedCache;
use crate::config::Config;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::stats::{self, AggregateSnapshot, ProjectEntry, SkillsSnapshot};

/// Cache keys, one per logical dataset.
pub const COMPLETE_DATA_KEY: &str = "github_complete_data";
pub const PROJECTS_KEY: &str = "github_projects_data";
pub const SKILLS_KEY: &str = "github_skills_data";

/// Lifecycle of an async dataset load.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadingState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Single entry point for the portfolio's datasets.
pub struct DataFetchOrchestrator {
    client: GitHubClient,
    cache: TimeBoxedCache,
    config: Config,
    stats_state: LoadingState<AggregateSnapshot>,
    projects_state: LoadingState<Vec<ProjectEntry>>,
    skills_state: LoadingState<SkillsSnapshot>,
}

impl DataFetchOrchestrator {
    pub fn new(config: Config, cache: TimeBoxedCache) -> Result<Self> {
        let client = GitHubClient::new(&config)?;
        Ok(Self {
            client,
            cache,
            config,
            stats_state: LoadingState::Idle,
            projects_state: LoadingState::Idle,
            skills_state: LoadingState::Idle,
        })
    }

    /// Current best-effort stats snapshot. A live cache entry short-circuits
    /// the fetch, even on an explicit refetch; `clear_cache` is the only
    /// bypass. On failure nothing partial is cached or returned.
    pub async fn stats_snapshot(&mut self) -> Result<AggregateSnapshot> {
        if let Some(snapshot) = self.cache.get::<AggregateSnapshot>(COMPLETE_DATA_KEY) {
            debug!(key = COMPLETE_DATA_KEY, "serving cached snapshot");
            self.stats_state = LoadingState::Ready(snapshot.clone());
            return Ok(snapshot);
        }

        self.stats_state = LoadingState::Loading;
        let fetched = tokio::try_join!(
            self.client.get_user(&self.config.user),
            self.client.get_contribution_calendar(&self.config.user),
            self.client.get_user_events(&self.config.user),
            self.client.get_user_repos(&self.config.user),
        );
        let (user, calendar, events, repos) = match fetched {
            Ok(parts) => parts,
            Err(err) => {
                self.stats_state = LoadingState::Error(err.to_string());
                return Err(err);
            }
        };

        let snapshot = stats::aggregate(user, &calendar, &events, &repos, Utc::now());
        self.cache
            .set_with_ttl(COMPLETE_DATA_KEY, &snapshot, self.config.snapshot_ttl);
        self.stats_state = LoadingState::Ready(snapshot.clone());
        Ok(snapshot)
    }

    /// Curated project list mixed from the personal and organization pools.
    pub async fn projects(&mut self) -> Result<Vec<ProjectEntry>> {
        if let Some(projects) = self.cache.get::<Vec<ProjectEntry>>(PROJECTS_KEY) {
            debug!(key = PROJECTS_KEY, "serving cached projects");
            self.projects_state = LoadingState::Ready(projects.clone());
            return Ok(projects);
        }

        self.projects_state = LoadingState::Loading;
        let fetched = tokio::try_join!(
            self.client.get_user_repos(&self.config.user),
            self.client.get_org_repos(&self.config.org),
        );
        let (personal, org) = match fetched {
            Ok(parts) => parts,
            Err(err) => {
                self.projects_state = LoadingState::Error(err.to_string());
                return Err(err);
            }
        };

        let projects = stats::curated_projects(&personal, &org, Utc::now());
        self.cache.set(PROJECTS_KEY, &projects);
        self.projects_state = LoadingState::Ready(projects.clone());
        Ok(projects)
    }

    /// Skills breakdown over both repository pools.
    pub async fn skills(&mut self) -> Result<SkillsSnapshot> {
        if let Some(skills) = self.cache.get::<SkillsSnapshot>(SKILLS_KEY) {
            debug!(key = SKILLS_KEY, "serving cached skills");
            self.skills_state = LoadingState::Ready(skills.clone());
            return Ok(skills);
        }

        self.skills_state = LoadingState::Loading;
        let fetched = tokio::try_join!(
            self.client.get_user_repos(&self.config.user),
            self.client.get_org_repos(&self.config.org),
        );
        let (personal, org) = match fetched {
            Ok(parts) => parts,
            Err(err) => {
                self.skills_state = LoadingState::Error(err.to_string());
                return Err(err);
            }
        };

        let skills = stats::skills_snapshot(&personal, &org);
        self.cache.set(SKILLS_KEY, &skills);
        self.skills_state = LoadingState::Ready(skills.clone());
        Ok(skills)
    }

    /// Drop every cached dataset; the next call of each flow refetches.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn stats_state(&self) -> &LoadingState<AggregateSnapshot> {
        &self.stats_state
    }

    pub fn projects_state(&self) -> &LoadingState<Vec<ProjectEntry>> {
        &self.projects_state
    }

    pub fn skills_state(&self) -> &LoadingState<SkillsSnapshot> {
        &self.skills_state
    }
}
