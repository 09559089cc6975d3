// folio: fetch-and-cache data core for a GitHub-backed developer portfolio.
// The binary fetches the portfolio datasets and prints a text summary;
// repeated runs within the TTL window are served from the cache.

mod cache;
mod config;
mod error;
mod github;
mod orchestrator;
mod stats;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::cache::TimeBoxedCache;
use crate::config::Config;
use crate::error::Result;
use crate::orchestrator::DataFetchOrchestrator;
use crate::stats::{AggregateSnapshot, ProjectEntry, SkillsSnapshot, SourceOrigin};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut config = Config::from_env();
    let mut refresh = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--refresh" {
            refresh = true;
        } else {
            positional.push(arg);
        }
    }
    let mut positional = positional.into_iter();
    if let Some(user) = positional.next() {
        config.user = user;
    }
    if let Some(org) = positional.next() {
        config.org = org;
    }

    match run(config, refresh).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config, refresh: bool) -> Result<()> {
    let cache = TimeBoxedCache::with_default_store();
    let mut orchestrator = DataFetchOrchestrator::new(config, cache)?;
    if refresh {
        orchestrator.clear_cache();
    }

    let snapshot = orchestrator.stats_snapshot().await?;
    print_snapshot(&snapshot);

    let projects = orchestrator.projects().await?;
    print_projects(&projects);

    let skills = orchestrator.skills().await?;
    print_skills(&skills);

    Ok(())
}

fn print_snapshot(snapshot: &AggregateSnapshot) {
    let user = &snapshot.user;
    println!("== {} ==", user.name.as_deref().unwrap_or(&user.login));
    if let Some(bio) = &user.bio {
        println!("{bio}");
    }
    println!(
        "{} followers / {} following / {} public repos",
        user.followers, user.following, user.public_repos
    );

    let totals = &snapshot.totals;
    println!();
    println!("{} contributions in the last year", totals.total_contributions);
    println!(
        "streak: {} current, {} longest",
        totals.current_streak, totals.longest_streak
    );
    println!(
        "{} repositories, {} stars, {} forks",
        totals.total_repositories, totals.total_stars, totals.total_forks
    );
    if let Some(repo) = &totals.most_starred {
        println!("most starred: {} ({} stars)", repo.name, repo.stargazers_count);
    }

    if !snapshot.language_stats.is_empty() {
        println!();
        println!("languages:");
        for language in &snapshot.language_stats {
            println!(
                "  {:<14} {:>3} repos  {:>3}%",
                language.name, language.count, language.percentage
            );
        }
    }

    if !snapshot.recent_activity.is_empty() {
        println!();
        println!("recent activity:");
        for item in &snapshot.recent_activity {
            println!(
                "  {}  {} ({})",
                item.occurred_at.format("%Y-%m-%d"),
                item.action,
                item.repo
            );
        }
    }
}

fn print_projects(projects: &[ProjectEntry]) {
    println!();
    println!("projects:");
    for project in projects {
        let source = match project.source {
            SourceOrigin::Organization => "org",
            SourceOrigin::Personal => "personal",
        };
        println!(
            "  [{:>8}] {} ({} stars, priority {})",
            source, project.title, project.stars, project.priority
        );
        if !project.tech.is_empty() {
            println!("             {}", project.tech.join(", "));
        }
    }
}

fn print_skills(skills: &SkillsSnapshot) {
    println!();
    println!("skills ({} repos analyzed):", skills.total_repos);
    for (name, entry) in &skills.skills {
        println!(
            "  {:<14} {:>3}%  {}",
            name,
            entry.percentage,
            entry.category.display()
        );
    }
    println!(
        "accounts: {} personal repos ({} stars), {} org repos ({} stars)",
        skills.accounts.personal_repos,
        skills.accounts.personal_stars,
        skills.accounts.org_repos,
        skills.accounts.org_stars
    );
}
