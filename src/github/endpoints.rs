// Typed fetch methods for the upstream endpoints the portfolio consumes.
// Each call requests a single page; there is no pagination beyond that.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{ContributionCalendar, Event, Repository, UserProfile};

/// Events fetched per page, most recent first.
const EVENTS_PER_PAGE: u32 = 30;
/// Repositories fetched per page.
const REPOS_PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Fetch the public profile for a user.
    pub async fn get_user(&self, user: &str) -> Result<UserProfile> {
        let response = self.get(&format!("/users/{}", user)).await?;
        let profile: UserProfile = response.json().await?;
        Ok(profile)
    }

    /// Fetch one page of a user's repositories, most recently updated first.
    pub async fn get_user_repos(&self, user: &str) -> Result<Vec<Repository>> {
        let per_page = REPOS_PER_PAGE.to_string();
        let params = [("sort", "updated"), ("per_page", per_page.as_str())];
        let response = self
            .get_with_params(&format!("/users/{}/repos", user), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    /// Fetch one page of an organization's repositories.
    pub async fn get_org_repos(&self, org: &str) -> Result<Vec<Repository>> {
        let per_page = REPOS_PER_PAGE.to_string();
        let params = [("sort", "updated"), ("per_page", per_page.as_str())];
        let response = self
            .get_with_params(&format!("/orgs/{}/repos", org), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    /// Fetch one page of a user's public events, most recent first.
    pub async fn get_user_events(&self, user: &str) -> Result<Vec<Event>> {
        let per_page = EVENTS_PER_PAGE.to_string();
        let params = [("per_page", per_page.as_str())];
        let response = self
            .get_with_params(&format!("/users/{}/events", user), &params)
            .await?;
        let events: Vec<Event> = response.json().await?;
        Ok(events)
    }

    /// Fetch the trailing-year contribution calendar for a user.
    pub async fn get_contribution_calendar(&self, user: &str) -> Result<ContributionCalendar> {
        let response = self
            .get_contributions_feed(&format!("/v4/{}?y=last", user))
            .await?;
        let calendar: ContributionCalendar = response.json().await?;
        Ok(calendar)
    }
}
