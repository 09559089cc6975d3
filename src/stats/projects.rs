// Curated project list: scoring, tagging, and mixing of the two repo pools.
// Organization projects fill most of the list; a short tail of the best
// personal projects rounds it out, and the final order is by priority.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::github::types::Repository;

/// Total entries in the curated list.
const TARGET_TOTAL: usize = 12;
/// Share of the list reserved for organization projects.
const ORG_SHARE: f64 = 0.8;
/// Personal pool cap relative to the organization pool size.
const PERSONAL_POOL_RATIO: f64 = 0.25;
const PERSONAL_POOL_MIN: usize = 3;
/// Tech tags shown per project.
const MAX_TECH_TAGS: usize = 6;

const ORG_DESCRIPTION: &str = "A cutting-edge project built for the Solana ecosystem.";
const PERSONAL_DESCRIPTION: &str = "A modern application built with cutting-edge technologies.";

/// Where a project entry was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    Personal,
    Organization,
}

/// Lifecycle marker for archived organization projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Paused,
}

/// One entry in the curated project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub tech: Vec<String>,
    pub repo_url: String,
    pub homepage: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub source: SourceOrigin,
    pub status: Option<ProjectStatus>,
    pub priority: u64,
}

/// Additive ranking used to interleave the two pools. Every term is a bonus,
/// so evaluation order is irrelevant.
pub fn priority_score(repo: &Repository, origin: SourceOrigin, now: DateTime<Utc>) -> u64 {
    let mut score = 0;

    if origin == SourceOrigin::Organization {
        score += 100;
    }

    score += repo.stargazers_count * 10;
    score += repo.forks_count * 5;

    if updated_within_six_months(repo, now) {
        score += 20;
    }

    if matches!(repo.language.as_deref(), Some("TypeScript") | Some("Rust")) {
        score += 15;
    }

    if has_any_topic(repo, &["solana", "web3", "blockchain"]) {
        score += 25;
    }
    if has_any_topic(repo, &["nextjs", "react"]) {
        score += 10;
    }

    if repo
        .description
        .as_deref()
        .is_some_and(|d| d.chars().count() > 50)
    {
        score += 5;
    }

    if repo.has_homepage() {
        score += 10;
    }

    score
}

/// Build the curated list from the two pools: filter, sort, cap, mix, and
/// re-rank by priority.
pub fn curated_projects(
    personal: &[Repository],
    org: &[Repository],
    now: DateTime<Utc>,
) -> Vec<ProjectEntry> {
    let mut org_pool: Vec<&Repository> = org.iter().filter(|repo| !repo.fork).collect();
    org_pool.sort_by(|a, b| {
        b.stargazers_count
            .cmp(&a.stargazers_count)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    let mut personal_pool: Vec<&Repository> = personal
        .iter()
        .filter(|repo| !repo.fork && !repo.archived)
        .collect();
    personal_pool.sort_by(|a, b| {
        b.stargazers_count
            .cmp(&a.stargazers_count)
            .then_with(|| b.forks_count.cmp(&a.forks_count))
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
    personal_pool.truncate(personal_pool_cap(org_pool.len()));

    let org_slots = (TARGET_TOTAL as f64 * ORG_SHARE).ceil() as usize;
    let personal_slots = TARGET_TOTAL - org_slots;

    let mut projects: Vec<ProjectEntry> = org_pool
        .into_iter()
        .take(org_slots)
        .map(|repo| project_entry(repo, SourceOrigin::Organization, now))
        .chain(
            personal_pool
                .into_iter()
                .take(personal_slots)
                .map(|repo| project_entry(repo, SourceOrigin::Personal, now)),
        )
        .collect();

    // Stable sort: equal priorities keep concatenation order.
    projects.sort_by(|a, b| b.priority.cmp(&a.priority));
    projects
}

/// Personal pool cap: a quarter of the organization pool, never below three.
fn personal_pool_cap(org_pool_len: usize) -> usize {
    PERSONAL_POOL_MIN.max((org_pool_len as f64 * PERSONAL_POOL_RATIO).ceil() as usize)
}

fn project_entry(repo: &Repository, origin: SourceOrigin, now: DateTime<Utc>) -> ProjectEntry {
    let fallback = match origin {
        SourceOrigin::Organization => ORG_DESCRIPTION,
        SourceOrigin::Personal => PERSONAL_DESCRIPTION,
    };

    ProjectEntry {
        title: format_title(&repo.name),
        description: repo
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        tech: tech_tags(repo, origin),
        repo_url: repo.html_url.clone(),
        homepage: repo.homepage.clone().filter(|url| !url.is_empty()),
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        language: repo.language.clone(),
        updated_at: repo.updated_at,
        source: origin,
        status: (origin == SourceOrigin::Organization && repo.archived)
            .then_some(ProjectStatus::Paused),
        priority: priority_score(repo, origin, now),
    }
}

/// "my-repo-name" → "My Repo Name"; camelCase words are also split.
pub fn format_title(name: &str) -> String {
    let mut title = String::new();
    for word in name.split('-').filter(|word| !word.is_empty()) {
        if !title.is_empty() {
            title.push(' ');
        }
        for (i, ch) in word.chars().enumerate() {
            if i == 0 {
                title.extend(ch.to_uppercase());
            } else {
                if ch.is_uppercase() {
                    title.push(' ');
                }
                title.push(ch);
            }
        }
    }
    title
}

/// Primary language plus mapped topics, deduplicated in insertion order and
/// capped at six. Organization repos imply their platform stack.
pub fn tech_tags(repo: &Repository, origin: SourceOrigin) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
        tags.push(language.to_string());
    }

    for topic in &repo.topics {
        if let Some(label) = tech_label(&topic.to_lowercase()) {
            if !tags.iter().any(|tag| tag == label) {
                tags.push(label.to_string());
            }
        }
    }

    if origin == SourceOrigin::Organization {
        match repo.language.as_deref() {
            Some("Rust") if !tags.iter().any(|tag| tag == "Solana") => {
                tags.push("Solana".to_string());
            }
            Some("TypeScript") if !tags.iter().any(|tag| tag == "Web3") => {
                tags.push("Web3".to_string());
            }
            _ => {}
        }
    }

    tags.truncate(MAX_TECH_TAGS);
    tags
}

/// Topic → display-name table for tech tags.
fn tech_label(topic: &str) -> Option<&'static str> {
    let label = match topic {
        "react" => "React",
        "nextjs" => "Next.js",
        "nodejs" => "Node.js",
        "typescript" => "TypeScript",
        "javascript" => "JavaScript",
        "tailwindcss" => "Tailwind",
        "solana" => "Solana",
        "web3" => "Web3",
        "blockchain" => "Blockchain",
        "defi" => "DeFi",
        "nft" => "NFT",
        "rust" => "Rust",
        "anchor" => "Anchor",
        "mongodb" => "MongoDB",
        "postgresql" => "PostgreSQL",
        "firebase" => "Firebase",
        "docker" => "Docker",
        "express" => "Express",
        "graphql" => "GraphQL",
        "prisma" => "Prisma",
        "supabase" => "Supabase",
        "webrtc" => "WebRTC",
        "mediasoup" => "Mediasoup",
        "ffmpeg" => "FFMPEG",
        "arweave" => "Arweave",
        "evm" => "EVM",
        "solidity" => "Solidity",
        "redis" => "Redis",
        "timescaledb" => "TimescaleDB",
        "actix-web" => "Actix Web",
        _ => return None,
    };
    Some(label)
}

fn has_any_topic(repo: &Repository, topics: &[&str]) -> bool {
    repo.topics.iter().any(|t| topics.contains(&t.as_str()))
}

fn updated_within_six_months(repo: &Repository, now: DateTime<Utc>) -> bool {
    match now.checked_sub_months(Months::new(6)) {
        Some(cutoff) => repo.updated_at > cutoff,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2025-06-15T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_priority_score_worked_example() {
        let mut repo = Repository::sample("amm");
        repo.stargazers_count = 10;
        repo.forks_count = 2;
        repo.updated_at = "2025-04-15T00:00:00Z".parse().unwrap();
        repo.language = Some("Rust".to_string());
        repo.topics = vec!["solana".to_string()];
        repo.description = Some("x".repeat(60));
        repo.homepage = Some("https://example.com".to_string());

        assert_eq!(priority_score(&repo, SourceOrigin::Organization, now()), 285);
        // Same repo without the organization bonus.
        assert_eq!(priority_score(&repo, SourceOrigin::Personal, now()), 185);
    }

    #[test]
    fn test_priority_bonuses_are_independent() {
        let bare = Repository::sample("bare");
        assert_eq!(priority_score(&bare, SourceOrigin::Personal, now()), 0);

        let mut tagged = Repository::sample("tagged");
        tagged.topics = vec!["react".to_string(), "web3".to_string()];
        assert_eq!(priority_score(&tagged, SourceOrigin::Personal, now()), 35);
    }

    #[test]
    fn test_short_description_earns_no_bonus() {
        let mut repo = Repository::sample("r");
        repo.description = Some("short".to_string());
        assert_eq!(priority_score(&repo, SourceOrigin::Personal, now()), 0);
    }

    #[test]
    fn test_format_title() {
        assert_eq!(format_title("my-repo-name"), "My Repo Name");
        assert_eq!(format_title("defiDashboard"), "Defi Dashboard");
        assert_eq!(format_title("plain"), "Plain");
    }

    #[test]
    fn test_tech_tags_dedup_and_cap() {
        let mut repo = Repository::sample("r");
        repo.language = Some("Rust".to_string());
        repo.topics = vec![
            "rust".to_string(),
            "solana".to_string(),
            "web3".to_string(),
            "anchor".to_string(),
            "defi".to_string(),
            "nft".to_string(),
            "docker".to_string(),
        ];

        let tags = tech_tags(&repo, SourceOrigin::Personal);
        // "rust" duplicates the primary language; the rest fill up to six.
        assert_eq!(tags, vec!["Rust", "Solana", "Web3", "Anchor", "DeFi", "NFT"]);
    }

    #[test]
    fn test_org_rust_repo_implies_solana_tag() {
        let mut repo = Repository::sample("r");
        repo.language = Some("Rust".to_string());

        assert_eq!(
            tech_tags(&repo, SourceOrigin::Organization),
            vec!["Rust", "Solana"]
        );
        assert_eq!(tech_tags(&repo, SourceOrigin::Personal), vec!["Rust"]);
    }

    #[test]
    fn test_archived_org_repo_is_paused() {
        let mut archived = Repository::sample("old");
        archived.archived = true;

        let projects = curated_projects(&[], &[archived], now());
        assert_eq!(projects[0].status, Some(ProjectStatus::Paused));
    }

    fn org_repo(name: &str, stars: u64) -> Repository {
        let mut repo = Repository::sample(name);
        repo.stargazers_count = stars;
        repo
    }

    #[test]
    fn test_mixing_reserves_slots_and_sorts_by_priority() {
        // Twenty org repos with descending stars, eight personal ones.
        let org: Vec<Repository> = (0..20)
            .map(|i| org_repo(&format!("org{i}"), 40 - i as u64))
            .collect();
        let personal: Vec<Repository> = (0..8)
            .map(|i| org_repo(&format!("me{i}"), 10 - i as u64))
            .collect();

        let projects = curated_projects(&personal, &org, now());

        assert_eq!(projects.len(), 12);
        let org_count = projects
            .iter()
            .filter(|p| p.source == SourceOrigin::Organization)
            .count();
        assert_eq!(org_count, 10);
        assert!(projects.windows(2).all(|w| w[0].priority >= w[1].priority));
    }

    #[test]
    fn test_personal_pool_cap() {
        assert_eq!(personal_pool_cap(20), 5);
        assert_eq!(personal_pool_cap(0), 3);
        assert_eq!(personal_pool_cap(9), 3);
        assert_eq!(personal_pool_cap(13), 4);
    }

    #[test]
    fn test_pools_filter_forks_and_archived_personal() {
        let mut fork = org_repo("fork", 99);
        fork.fork = true;
        let mut archived = org_repo("archived", 98);
        archived.archived = true;
        let keeper = org_repo("keeper", 1);

        let projects = curated_projects(&[fork.clone(), archived, keeper], &[fork], now());
        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Keeper"]);
    }

    #[test]
    fn test_missing_description_falls_back() {
        let repo = org_repo("quiet", 0);
        let projects = curated_projects(&[], &[repo], now());
        assert_eq!(projects[0].description, ORG_DESCRIPTION);
    }
}
