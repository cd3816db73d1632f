use crate::model::ScheduleEntry;
use chrono::{DateTime, FixedOffset, Local};

pub const TOPICS: [&str; 15] = [
    "Git object model and SHA-1 hashing",
    "Author vs Committer timestamps in Git",
    "How GitHub computes contribution graphs",
    "Git's internal storage of temporal metadata",
    "Understanding git commit --date flag",
    "Exploring GIT_AUTHOR_DATE environment variable",
    "How platforms visualize repository activity",
    "Git commit object structure and fields",
    "Timestamp formats in Git (RFC 2822, ISO 8601)",
    "The role of timezone in Git commits",
    "Git reflog and timestamp tracking",
    "How git log uses temporal information",
    "Understanding commit ancestry and dates",
    "Git's handling of clock skew",
    "Platform-specific activity algorithms",
];

pub fn topic_for(sequence_number: u32) -> &'static str {
    TOPICS[sequence_number as usize % TOPICS.len()]
}

pub fn note_filename(entry: &ScheduleEntry) -> String {
    format!(
        "day-{:03}-{}.md",
        entry.sequence_number,
        entry.date.format("%Y-%m-%d")
    )
}

pub fn commit_message(entry: &ScheduleEntry) -> String {
    format!(
        "Learning Day {}: Git metadata study ({})",
        entry.sequence_number,
        entry.date.format("%Y-%m-%d")
    )
}

pub fn learning_note(date: &DateTime<FixedOffset>, sequence_number: u32) -> String {
    format!(
        "# Learning Note - Day {day}
**Date**: {ymd}
**Topic**: {topic}

## Key Learnings
- Studied how Git internally stores commit metadata
- Explored the difference between author and committer timestamps
- Observed how platforms parse and visualize this data

## Technical Details
- Author Date: {iso}
- Timezone: {tz}
- Git Object Type: commit

## Observations
This commit is part of a controlled learning exercise to understand
how Git's temporal metadata influences activity visualization on
source-control platforms.

## References
- Git Documentation: git-commit(1)
- Pro Git Book: Chapter 10 - Git Internals
- GitHub API: Contribution Activity

---
*This is an educational exercise, not a representation of actual work.*
",
        day = sequence_number,
        ymd = date.format("%Y-%m-%d"),
        topic = topic_for(sequence_number),
        iso = date.to_rfc3339(),
        tz = date.format("%z"),
    )
}

pub fn observations_template(study_date: &DateTime<Local>) -> String {
    format!(
        "# Study Observations

## Objective
Document observations about how Git commit metadata influences activity visualization on GitHub.

## Methodology
- Created commits with controlled timestamps using `GIT_AUTHOR_DATE` and `GIT_COMMITTER_DATE`
- Each commit contains a valid learning note file
- All commits authored under verified account

## Observations

### GitHub Contribution Graph
- [ ] How does GitHub display the timestamped commits?
- [ ] Does the contribution graph reflect the author date or committer date?
- [ ] How are timezone differences handled?

### Activity Timeline
- [ ] How does the activity feed show these commits?
- [ ] Are there any differences in visualization compared to \"natural\" commits?

### Technical Insights
- [ ] What did I learn about Git's internal timestamp handling?
- [ ] How do platforms parse and interpret commit metadata?

## Key Learnings
*Document your findings here...*

## Conclusions
*Summarize what this exercise taught you about Git and platform visualization...*

---
**Study Date**: {}
",
        study_date.format("%Y-%m-%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(seq: u32, date: &str) -> ScheduleEntry {
        ScheduleEntry {
            date: DateTime::parse_from_rfc3339(date).unwrap(),
            sequence_number: seq,
        }
    }

    #[test]
    fn filenames_and_messages_encode_sequence_and_date() {
        let e = entry(7, "2025-03-02T10:00:00-05:00");
        assert_eq!(note_filename(&e), "day-007-2025-03-02.md");
        assert_eq!(commit_message(&e), "Learning Day 7: Git metadata study (2025-03-02)");
        assert_eq!(note_filename(&entry(1234, "2025-03-02T10:00:00Z")), "day-1234-2025-03-02.md");
    }

    #[test]
    fn topics_wrap_every_fifteen_days() {
        assert_eq!(topic_for(1), TOPICS[1]);
        assert_eq!(topic_for(15), TOPICS[0]);
        assert_eq!(topic_for(16), topic_for(1));
    }

    #[test]
    fn note_carries_date_and_offset() {
        let e = entry(3, "2025-01-01T10:00:00+05:30");
        let note = learning_note(&e.date, e.sequence_number);
        assert!(note.starts_with("# Learning Note - Day 3\n**Date**: 2025-01-01\n"));
        assert!(note.contains(&format!("**Topic**: {}", TOPICS[3])));
        assert!(note.contains("- Author Date: 2025-01-01T10:00:00+05:30"));
        assert!(note.contains("- Timezone: +0530"));
    }
}
