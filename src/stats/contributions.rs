// Contribution-calendar derivations: intensity bucketing and streaks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::github::types::RawContributionDay;

/// One calendar day with its bucketed intensity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    /// Intensity bucket in `0..=4`.
    pub level: u8,
}

/// Bucket a raw daily count into a display level.
pub fn bucket_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

/// Map raw days to bucketed days, preserving chronological order.
pub fn build_calendar(days: &[RawContributionDay]) -> Vec<ContributionDay> {
    days.iter()
        .map(|day| ContributionDay {
            date: day.date,
            count: day.count,
            level: bucket_level(day.count),
        })
        .collect()
}

/// Consecutive active days ending at the most recent day.
pub fn current_streak(days: &[ContributionDay]) -> u32 {
    days.iter().rev().take_while(|day| day.count > 0).count() as u32
}

/// Longest run of consecutive active days anywhere in the calendar.
pub fn longest_streak(days: &[ContributionDay]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for day in days {
        if day.count > 0 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Sum of all daily counts.
pub fn total_contributions(days: &[ContributionDay]) -> u64 {
    days.iter().map(|day| u64::from(day.count)).sum()
}
