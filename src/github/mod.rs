// Upstream API module.
// Client, typed endpoints, and response models for the APIs the portfolio
// reads from.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use types::{
    ContributionCalendar, Event, EventKind, RawContributionDay, Repository, UserProfile,
};
