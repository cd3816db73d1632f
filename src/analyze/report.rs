use super::{analyze_date_distribution, CommitAnalyzer};
use crate::error::Result;
use crate::model::{AnalysisData, CommitRecord, DateDistribution, SCHEMA_VERSION};
use crate::util::bar;
use crate::vcs::VcsClient;
use chrono::{DateTime, Local, Utc};
use console::style;
use std::path::{Path, PathBuf};

const SAMPLE_COMMITS: usize = 5;
const JSON_COMMITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    NoCommits,
    Written { markdown: PathBuf, json: PathBuf },
}

/// Read `branch`, then write the Markdown report to `output_path` and the raw
/// data next to it with a `.json` extension.
pub fn generate_report<V: VcsClient>(
    analyzer: &CommitAnalyzer<V>,
    branch: &str,
    output_path: &Path,
) -> Result<ReportStatus> {
    let commits = analyzer.get_commit_metadata(branch);
    if commits.is_empty() {
        println!("{}", style("No commits found in study branch").yellow());
        return Ok(ReportStatus::NoCommits);
    }

    let analysis = analyze_date_distribution(&commits);
    let generated_at = Local::now();

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let markdown = render_markdown(analysis.as_ref(), &commits, branch, &generated_at);
    std::fs::write(output_path, markdown)?;
    println!("{} Report generated: {}", style("✓").green(), output_path.display());

    let json_path = output_path.with_extension("json");
    let data = AnalysisData {
        version: SCHEMA_VERSION,
        generated_at: generated_at.with_timezone(&Utc),
        branch: branch.to_string(),
        analysis,
        commits: commits.iter().take(JSON_COMMITS).cloned().collect(),
    };
    std::fs::write(&json_path, serde_json::to_string_pretty(&data)?)?;
    println!("{} JSON data saved: {}", style("✓").green(), json_path.display());

    tracing::info!(commits = commits.len(), report = %output_path.display(), "analysis report written");

    Ok(ReportStatus::Written {
        markdown: output_path.to_path_buf(),
        json: json_path,
    })
}

pub fn render_markdown(
    analysis: Option<&DateDistribution>,
    commits: &[CommitRecord],
    branch: &str,
    generated_at: &DateTime<Local>,
) -> String {
    let mut out = String::new();

    out.push_str("# Git Metadata Study - Analysis Report\n\n");
    out.push_str(&format!("**Generated**: {}\n\n", generated_at.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("**Branch**: `{branch}`\n\n"));

    out.push_str("## Summary Statistics\n\n");
    match analysis {
        Some(a) => {
            out.push_str(&format!("- **Total Commits**: {}\n", a.total_commits));
            out.push_str(&format!(
                "- **Date Range**: {} to {}\n",
                a.earliest_date.to_rfc3339(),
                a.latest_date.to_rfc3339()
            ));
            out.push_str(&format!("- **Span**: {} days\n\n", a.date_range_days));

            out.push_str("## Commit Distribution by Weekday\n\n");
            for (day, count) in a.commits_by_weekday.iter() {
                out.push_str(&format!("- **{day}**: {count:2} {}\n", bar(count)));
            }

            out.push_str("\n## Commit Distribution by Month\n\n");
            for (month, count) in &a.commits_by_month {
                out.push_str(&format!("- **{month}**: {count:2} {}\n", bar(*count)));
            }
        }
        None => {
            out.push_str(&format!("- **Total Commits**: {}\n", commits.len()));
            out.push_str("- No readable author dates\n");
        }
    }

    out.push_str("\n## Sample Commits\n\n");
    for (i, commit) in commits.iter().take(SAMPLE_COMMITS).enumerate() {
        out.push_str(&format!("### Commit {}\n", i + 1));
        out.push_str(&format!("- **Hash**: `{}`\n", commit.short_hash()));
        out.push_str(&format!("- **Author Date**: {}\n", commit.author.date));
        out.push_str(&format!("- **Subject**: {}\n\n", commit.subject));
    }

    out.push_str("## Next Steps\n\n");
    out.push_str(&format!("1. **Push to GitHub**: `git push origin {branch}`\n"));
    out.push_str("2. **View on GitHub**: Check your profile's contribution graph\n");
    out.push_str("3. **Compare**: Note how GitHub visualizes these timestamped commits\n");
    out.push_str("4. **Document**: Record observations in `observations.md`\n\n");

    out.push_str("## Platform Visualization Checklist\n\n");
    out.push_str("- [ ] Contribution graph shows commits on correct dates\n");
    out.push_str("- [ ] Activity feed displays commits chronologically\n");
    out.push_str("- [ ] Commit count matches expected values\n");
    out.push_str("- [ ] Timezone handling is correct\n");
    out.push_str("- [ ] No anomalies or unexpected behavior\n\n");
    out.push_str("---\n");
    out.push_str("*This analysis is part of an educational study of Git metadata and platform visualization.*\n");

    out
}
