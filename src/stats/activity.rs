// Recent-activity extraction from the user's public event feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::types::{Event, EventKind};

/// How many events survive into the activity feed.
const MAX_ITEMS: usize = 10;

/// One entry in the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub kind: EventKind,
    pub repo: String,
    pub occurred_at: DateTime<Utc>,
    /// Human-readable description, e.g. "Pushed 3 commit(s)".
    pub action: String,
}

/// Keep push/create/pull-request events in upstream order, capped at ten.
pub fn recent_activity(events: &[Event]) -> Vec<ActivityItem> {
    events
        .iter()
        .filter(|event| {
            matches!(
                event.kind,
                EventKind::Push | EventKind::Create | EventKind::PullRequest
            )
        })
        .take(MAX_ITEMS)
        .map(|event| ActivityItem {
            kind: event.kind,
            repo: event.repo.name.clone(),
            occurred_at: event.created_at,
            action: describe(event),
        })
        .collect()
}

/// Action string for an event. An absent or empty commit batch on a push
/// still reads as one commit.
fn describe(event: &Event) -> String {
    match event.kind {
        EventKind::Push => {
            let commits = event
                .payload
                .commits
                .as_deref()
                .map(|commits| commits.len())
                .filter(|&len| len > 0)
                .unwrap_or(1);
            format!("Pushed {} commit(s)", commits)
        }
        EventKind::Create => {
            let created = event
                .payload
                .ref_type
                .as_deref()
                .filter(|kind| !kind.is_empty())
                .unwrap_or("repository");
            format!("Created {}", created)
        }
        EventKind::PullRequest => {
            let action = event
                .payload
                .action
                .as_deref()
                .filter(|action| !action.is_empty())
                .unwrap_or("opened");
            format!("{} pull request", action)
        }
        EventKind::Unknown => "Unknown activity".to_string(),
    }
}
