pub mod exec;
pub mod report;

pub use report::{generate_report, render_markdown, ReportStatus};

use crate::error::{Result, StudyError};
use crate::model::{CommitRecord, DateDistribution, Signature, WeekdayCounts};
use crate::util::month_key;
use crate::vcs::VcsClient;
use chrono::{DateTime, Datelike, FixedOffset};
use console::style;
use std::collections::BTreeMap;

/// `git log` format: hash, author name/email/date, committer name/email/date, subject.
pub const LOG_FORMAT: &str = "%H|%an|%ae|%aI|%cn|%ce|%cI|%s";

const FIELD_DELIMITER: char = '|';
const FIELD_COUNT: usize = 8;

pub struct CommitAnalyzer<V: VcsClient> {
    vcs: V,
}

impl<V: VcsClient> CommitAnalyzer<V> {
    pub fn new(vcs: V) -> Self {
        Self { vcs }
    }

    /// Read every commit on `branch`, newest first.
    ///
    /// A failing `git log` yields an empty list, so an empty result can mean
    /// either "no commits" or "could not read history".
    pub fn get_commit_metadata(&self, branch: &str) -> Vec<CommitRecord> {
        match self.vcs.log(branch, LOG_FORMAT) {
            Ok(output) => parse_log(&output),
            Err(e) => {
                tracing::warn!(branch, error = %e, "failed to read commit metadata");
                println!("{} {}", style("✗").red(), style(format!("Error getting commit metadata: {e}")).red());
                Vec::new()
            }
        }
    }
}

pub fn parse_log(output: &str) -> Vec<CommitRecord> {
    output.lines().filter_map(parse_log_line).collect()
}

/// Parse one line produced with [`LOG_FORMAT`]. The subject keeps any further delimiters.
pub fn parse_log_line(line: &str) -> Option<CommitRecord> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.splitn(FIELD_COUNT, FIELD_DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return None;
    }

    Some(CommitRecord {
        hash: fields[0].to_string(),
        author: Signature {
            name: fields[1].to_string(),
            email: fields[2].to_string(),
            date: fields[3].to_string(),
        },
        committer: Signature {
            name: fields[4].to_string(),
            email: fields[5].to_string(),
            date: fields[6].to_string(),
        },
        subject: fields[7].to_string(),
    })
}

/// Parse a git timestamp, keeping its offset.
///
/// Accepts strict ISO 8601 (`%aI`), git's looser `%ai` layout and RFC 2822.
pub fn parse_git_date(input: &str) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S %z") {
        return Ok(dt);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Ok(dt);
    }

    Err(StudyError::InvalidDate(input.to_string()))
}

/// Summarize author dates. `None` when there is nothing to summarize.
pub fn analyze_date_distribution(records: &[CommitRecord]) -> Option<DateDistribution> {
    let dates: Vec<DateTime<FixedOffset>> = records
        .iter()
        .filter_map(|record| match parse_git_date(&record.author.date) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(hash = %record.hash, error = %e, "skipping commit with unreadable author date");
                None
            }
        })
        .collect();

    let earliest = *dates.iter().min()?;
    let latest = *dates.iter().max()?;

    let mut by_weekday = WeekdayCounts::default();
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for date in &dates {
        by_weekday.record(date.weekday());
        *by_month.entry(month_key(date)).or_insert(0) += 1;
    }

    Some(DateDistribution {
        total_commits: dates.len(),
        earliest_date: earliest,
        latest_date: latest,
        date_range_days: (latest - earliest).num_days(),
        commits_by_weekday: by_weekday,
        commits_by_month: by_month,
    })
}
