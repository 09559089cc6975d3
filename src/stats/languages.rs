// Language distribution and the skills breakdown derived from it.
// Percentages are rounded per entry and never renormalized, so a
// distribution may sum to slightly more or less than 100.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::github::types::Repository;

use super::repos::total_stars;

/// Fallback color for languages missing from the lookup table.
pub const FALLBACK_COLOR: &str = "#8b949e";

/// Topics that count as skills when tagged on enough repositories.
const RELEVANT_TOPICS: &[&str] = &[
    "react",
    "nextjs",
    "nodejs",
    "typescript",
    "javascript",
    "python",
    "solana",
    "web3",
    "blockchain",
    "defi",
    "nft",
    "rust",
    "anchor",
    "mongodb",
    "postgresql",
    "firebase",
    "docker",
    "kubernetes",
    "tailwindcss",
    "express",
    "graphql",
    "prisma",
    "supabase",
];

/// A topic becomes a skill once this many repositories carry it.
const TOPIC_SKILL_THRESHOLD: usize = 2;

/// Share of one primary language across a repository set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub count: usize,
    /// Rounded to the nearest integer; shares are not renormalized.
    pub percentage: u32,
    pub color: String,
}

/// Skill grouping used by the skills page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Frontend,
    Backend,
    Blockchain,
    Database,
    DevOps,
    Systems,
    Other,
}

impl SkillCategory {
    pub fn display(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Blockchain => "Blockchain",
            SkillCategory::Database => "Database",
            SkillCategory::DevOps => "DevOps",
            SkillCategory::Systems => "Systems",
            SkillCategory::Other => "Other",
        }
    }
}

/// One named skill with its share of all fetched repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub count: usize,
    pub percentage: u32,
    pub category: SkillCategory,
    pub color: String,
}

/// Personal-vs-organization account comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountComparison {
    pub personal_repos: usize,
    pub org_repos: usize,
    pub personal_stars: u64,
    pub org_stars: u64,
    pub personal_languages: usize,
    pub org_languages: usize,
}

/// Everything the skills page renders, derived from both repo pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsSnapshot {
    /// Skill name → stats, ordered by name so identical inputs always
    /// produce identical snapshots.
    pub skills: BTreeMap<String, SkillEntry>,
    pub language_stats: Vec<LanguageStat>,
    pub total_repos: usize,
    pub accounts: AccountComparison,
}

/// Distribution of primary languages. Repositories without a language are
/// excluded, and shares are computed against the repositories that remain.
pub fn language_distribution(repos: &[Repository]) -> Vec<LanguageStat> {
    let counts = count_languages(repos.iter());
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    build_distribution(counts, total)
}

/// Skills breakdown over both pools. Shares here are of *all* fetched
/// repositories, languageless ones included.
pub fn skills_snapshot(personal: &[Repository], org: &[Repository]) -> SkillsSnapshot {
    let total = personal.len() + org.len();
    let language_counts = count_languages(personal.iter().chain(org.iter()));

    let mut skills = BTreeMap::new();
    for (language, count) in &language_counts {
        skills.insert(
            language.clone(),
            SkillEntry {
                count: *count,
                percentage: percentage_of(*count, total),
                category: language_category(language),
                color: language_color(language).to_string(),
            },
        );
    }

    // Topic-based skills; a later entry with the same display name wins.
    for (topic, count) in count_topics(personal.iter().chain(org.iter())) {
        let lower = topic.to_lowercase();
        if count >= TOPIC_SKILL_THRESHOLD && RELEVANT_TOPICS.contains(&lower.as_str()) {
            skills.insert(
                skill_display_name(&lower),
                SkillEntry {
                    count,
                    percentage: percentage_of(count, total),
                    category: topic_category(&lower),
                    color: topic_color(&lower).to_string(),
                },
            );
        }
    }

    SkillsSnapshot {
        skills,
        language_stats: build_distribution(language_counts, total),
        total_repos: total,
        accounts: AccountComparison {
            personal_repos: personal.len(),
            org_repos: org.len(),
            personal_stars: total_stars(personal),
            org_stars: total_stars(org),
            personal_languages: distinct_languages(personal),
            org_languages: distinct_languages(org),
        },
    }
}

fn build_distribution(counts: Vec<(String, usize)>, total: usize) -> Vec<LanguageStat> {
    let mut stats: Vec<LanguageStat> = counts
        .into_iter()
        .map(|(name, count)| LanguageStat {
            percentage: percentage_of(count, total),
            color: language_color(&name).to_string(),
            name,
            count,
        })
        .collect();
    // Stable sort: equal counts keep first-seen order.
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Count primary languages in first-seen order.
fn count_languages<'a>(repos: impl Iterator<Item = &'a Repository>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for repo in repos {
        let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) else {
            continue;
        };
        match counts.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => counts.push((language.to_string(), 1)),
        }
    }
    counts
}

fn count_topics<'a>(repos: impl Iterator<Item = &'a Repository>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for repo in repos {
        for topic in &repo.topics {
            match counts.iter_mut().find(|(name, _)| name == topic) {
                Some((_, count)) => *count += 1,
                None => counts.push((topic.clone(), 1)),
            }
        }
    }
    counts
}

fn distinct_languages(repos: &[Repository]) -> usize {
    repos
        .iter()
        .filter_map(|repo| repo.language.as_deref())
        .collect::<HashSet<_>>()
        .len()
}

pub(super) fn percentage_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 * 100.0 / total as f64).round() as u32
}

/// GitHub's language → display color map.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#239120",
        "PHP" => "#4F5D95",
        "Ruby" => "#701516",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Swift" => "#ffac45",
        "Kotlin" => "#F18E33",
        "Dart" => "#00B4AB",
        "HTML" => "#e34c26",
        "CSS" => "#1572B6",
        "Shell" => "#89e051",
        "Dockerfile" => "#384d54",
        _ => FALLBACK_COLOR,
    }
}

fn topic_color(topic: &str) -> &'static str {
    match topic {
        "react" => "#61dafb",
        "nextjs" => "#000000",
        "nodejs" => "#339933",
        "solana" => "#9945ff",
        "web3" => "#f16822",
        "rust" => "#dea584",
        "mongodb" => "#47a248",
        "postgresql" => "#336791",
        "docker" => "#2496ed",
        _ => "#6b7280",
    }
}

fn language_category(language: &str) -> SkillCategory {
    match language {
        "JavaScript" | "TypeScript" | "React" | "HTML" | "CSS" => SkillCategory::Frontend,
        "Python" | "Node.js" | "Go" | "Java" => SkillCategory::Backend,
        "Rust" | "Solidity" => SkillCategory::Blockchain,
        "C++" | "C" => SkillCategory::Systems,
        _ => SkillCategory::Other,
    }
}

fn topic_category(topic: &str) -> SkillCategory {
    match topic {
        "react" | "nextjs" | "tailwindcss" => SkillCategory::Frontend,
        "nodejs" | "express" | "python" => SkillCategory::Backend,
        "solana" | "web3" | "blockchain" | "defi" | "nft" | "rust" | "anchor" => {
            SkillCategory::Blockchain
        }
        "mongodb" | "postgresql" | "firebase" | "prisma" | "supabase" => SkillCategory::Database,
        "docker" | "kubernetes" => SkillCategory::DevOps,
        _ => SkillCategory::Other,
    }
}

fn skill_display_name(topic: &str) -> String {
    match topic {
        "nextjs" => "Next.js".to_string(),
        "nodejs" => "Node.js".to_string(),
        "typescript" => "TypeScript".to_string(),
        "javascript" => "JavaScript".to_string(),
        "tailwindcss" => "Tailwind CSS".to_string(),
        "mongodb" => "MongoDB".to_string(),
        "postgresql" => "PostgreSQL".to_string(),
        _ => {
            let mut chars = topic.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_language(language: Option<&str>) -> Repository {
        let mut repo = Repository::sample("r");
        repo.language = language.map(str::to_string);
        repo
    }

    fn with_topics(topics: &[&str]) -> Repository {
        let mut repo = Repository::sample("t");
        repo.topics = topics.iter().map(|t| t.to_string()).collect();
        repo
    }

    #[test]
    fn test_distribution_excludes_languageless_repos() {
        let repos = vec![
            in_language(Some("Rust")),
            in_language(None),
            in_language(Some("Rust")),
            in_language(Some("TypeScript")),
        ];

        let stats = language_distribution(&repos);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Rust");
        assert_eq!(stats[0].count, 2);
        // Share of the three repos that declare a language.
        assert_eq!(stats[0].percentage, 67);
        assert_eq!(stats[1].percentage, 33);
    }

    #[test]
    fn test_distribution_percentages_are_not_renormalized() {
        let repos = vec![
            in_language(Some("Rust")),
            in_language(Some("TypeScript")),
            in_language(Some("Go")),
        ];

        let stats = language_distribution(&repos);
        let sum: u32 = stats.iter().map(|s| s.percentage).sum();
        // Three times round(100/3) = 99, left as-is.
        assert_eq!(sum, 99);
    }

    #[test]
    fn test_known_and_unknown_colors() {
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("Brainfuck"), FALLBACK_COLOR);
    }

    #[test]
    fn test_skills_require_two_topic_hits() {
        let personal = vec![with_topics(&["solana"]), with_topics(&["solana", "webrtc"])];
        let snapshot = skills_snapshot(&personal, &[]);

        // "solana" appears twice, "webrtc" is not a relevant topic anyway.
        assert!(snapshot.skills.contains_key("Solana"));
        assert!(!snapshot.skills.contains_key("Webrtc"));

        let solana = &snapshot.skills["Solana"];
        assert_eq!(solana.count, 2);
        assert_eq!(solana.category, SkillCategory::Blockchain);
        assert_eq!(solana.percentage, 100);
    }

    #[test]
    fn test_single_topic_hit_is_ignored() {
        let personal = vec![with_topics(&["docker"]), with_topics(&["react"])];
        let snapshot = skills_snapshot(&personal, &[]);
        assert!(snapshot.skills.is_empty());
    }

    #[test]
    fn test_skill_percentages_use_all_repos() {
        let personal = vec![in_language(Some("Rust")), in_language(None)];
        let org = vec![in_language(None), in_language(None)];
        let snapshot = skills_snapshot(&personal, &org);

        // One Rust repo out of four fetched repos.
        assert_eq!(snapshot.skills["Rust"].percentage, 25);
        assert_eq!(snapshot.language_stats[0].percentage, 25);
        assert_eq!(snapshot.total_repos, 4);
    }

    #[test]
    fn test_account_comparison() {
        let mut starred = in_language(Some("Rust"));
        starred.stargazers_count = 8;
        let personal = vec![starred, in_language(Some("Go"))];
        let org = vec![in_language(Some("Rust"))];

        let snapshot = skills_snapshot(&personal, &org);
        assert_eq!(snapshot.accounts.personal_repos, 2);
        assert_eq!(snapshot.accounts.org_repos, 1);
        assert_eq!(snapshot.accounts.personal_stars, 8);
        assert_eq!(snapshot.accounts.org_stars, 0);
        assert_eq!(snapshot.accounts.personal_languages, 2);
        assert_eq!(snapshot.accounts.org_languages, 1);
    }

    #[test]
    fn test_skill_display_names() {
        assert_eq!(skill_display_name("nextjs"), "Next.js");
        assert_eq!(skill_display_name("postgresql"), "PostgreSQL");
        assert_eq!(skill_display_name("anchor"), "Anchor");
    }
}
