use crate::error::{Result, StudyError};
use crate::model::ScheduleEntry;
use crate::util::is_weekend;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDateTime, TimeZone};
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spacing strategy for scheduled commit dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// One commit per calendar day
    Daily,
    /// One commit per day, Monday to Friday
    Weekdays,
    /// One commit every 3 or 4 days
    Sparse,
}

impl Pattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pattern::Daily => "daily",
            Pattern::Weekdays => "weekdays",
            Pattern::Sparse => "sparse",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pattern {
    type Err = StudyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Pattern::Daily),
            "weekdays" => Ok(Pattern::Weekdays),
            "sparse" => Ok(Pattern::Sparse),
            _ => Err(StudyError::UnknownPattern(s.to_string())),
        }
    }
}

const SPARSE_MIN_GAP_DAYS: i64 = 3;
const SPARSE_MAX_GAP_DAYS: i64 = 4;

/// Build `count` entries starting at `start`. Only `Pattern::Sparse` draws from `rng`.
///
/// Dates advance in wall-clock time of `start`'s zone, so every entry keeps the
/// start's time of day and carries the offset that zone has on that date.
pub fn generate<Tz: TimeZone, R: Rng + ?Sized>(
    start: DateTime<Tz>,
    count: usize,
    pattern: Pattern,
    rng: &mut R,
) -> Result<Vec<ScheduleEntry>> {
    let zone = start.timezone();
    let mut schedule = Vec::new();
    let mut current = start.naive_local();

    while schedule.len() < count {
        if pattern != Pattern::Weekdays || !is_weekend(current.weekday()) {
            push_entry(&mut schedule, resolve(&zone, current)?);
            if schedule.len() == count {
                break;
            }
        }

        let step = match pattern {
            Pattern::Daily | Pattern::Weekdays => 1,
            Pattern::Sparse => rng.gen_range(SPARSE_MIN_GAP_DAYS..=SPARSE_MAX_GAP_DAYS),
        };
        current = Duration::try_days(step)
            .and_then(|days| current.checked_add_signed(days))
            .ok_or_else(|| {
                StudyError::InvalidDate(format!("schedule runs past the last supported date ({current})"))
            })?;
    }

    Ok(schedule)
}

pub fn generate_seeded<Tz: TimeZone>(
    start: DateTime<Tz>,
    count: usize,
    pattern: Pattern,
    seed: u64,
) -> Result<Vec<ScheduleEntry>> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(start, count, pattern, &mut rng)
}

fn resolve<Tz: TimeZone>(zone: &Tz, local: NaiveDateTime) -> Result<DateTime<FixedOffset>> {
    zone.from_local_datetime(&local)
        .earliest()
        .map(|date| date.fixed_offset())
        .ok_or_else(|| StudyError::InvalidDate(format!("{local} does not exist in the local timezone")))
}

fn push_entry(schedule: &mut Vec<ScheduleEntry>, date: DateTime<FixedOffset>) {
    let sequence_number = schedule.len() as u32 + 1;
    schedule.push(ScheduleEntry { date, sequence_number });
}
