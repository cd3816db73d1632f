use chrono::{DateTime, FixedOffset, Utc, Weekday};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// One scheduled commit: the timestamp it will carry and its 1-based position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: DateTime<FixedOffset>,
    pub sequence_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    /// Timestamp exactly as git printed it.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: Signature,
    pub committer: Signature,
    pub subject: String,
}

impl CommitRecord {
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(8) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Commit counts for each day of the week, always Monday through Sunday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdayCounts([usize; 7]);

impl WeekdayCounts {
    pub fn record(&mut self, day: Weekday) {
        self.0[day.num_days_from_monday() as usize] += 1;
    }

    pub fn get(&self, day: Weekday) -> usize {
        self.0[day.num_days_from_monday() as usize]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        WEEKDAYS
            .iter()
            .map(move |day| (crate::util::weekday_name(*day), self.get(*day)))
    }
}

impl Serialize for WeekdayCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (name, count) in self.iter() {
            map.serialize_entry(name, &count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DateDistribution {
    pub total_commits: usize,
    pub earliest_date: DateTime<FixedOffset>,
    pub latest_date: DateTime<FixedOffset>,
    pub date_range_days: i64,
    pub commits_by_weekday: WeekdayCounts,
    pub commits_by_month: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

impl DateSpan {
    pub fn of(schedule: &[ScheduleEntry]) -> Self {
        Self {
            start: schedule.first().map(|e| e.date),
            end: schedule.last().map(|e| e.date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySummary {
    pub version: u32,
    pub study_name: String,
    pub created_at: DateTime<Utc>,
    pub repository: String,
    pub branch: String,
    pub pattern: String,
    pub seed: u64,
    pub total_commits: usize,
    pub successful_commits: usize,
    pub date_range: DateSpan,
    pub purpose: String,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisData {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub branch: String,
    pub analysis: Option<DateDistribution>,
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub pattern: String,
    pub seed: u64,
    pub entries: Vec<ScheduleEntry>,
}
