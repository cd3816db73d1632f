//! Materializes a commit schedule as real, dated commits on a study branch.

pub mod exec;
pub mod notes;

use crate::confirm::ConfirmationPolicy;
use crate::error::Result;
use crate::model::{DateSpan, ScheduleEntry, StudySummary, SCHEMA_VERSION};
use crate::schedule::{self, Pattern};
use crate::util::{day_key, git_date};
use crate::vcs::VcsClient;
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const DEFAULT_STUDY_DIR: &str = "git-metadata-study";
pub const DEFAULT_BRANCH: &str = "git-metadata-study";
pub const DEFAULT_BASE_BRANCH: &str = "main";

const NOTES_DIR: &str = "learning-notes";
const ANALYSIS_DIR: &str = "analysis";

/// Where study files live inside the repository.
#[derive(Debug, Clone)]
pub struct StudyLayout {
    pub study_dir: PathBuf,
    pub notes_dir: PathBuf,
    pub analysis_dir: PathBuf,
}

impl StudyLayout {
    pub fn new(repo_root: &Path, study_dir: &str) -> Self {
        let study_dir = repo_root.join(study_dir);
        Self {
            notes_dir: study_dir.join(NOTES_DIR),
            analysis_dir: study_dir.join(ANALYSIS_DIR),
            study_dir,
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.analysis_dir.join("study-summary.json")
    }

    pub fn observations_path(&self) -> PathBuf {
        self.analysis_dir.join("observations.md")
    }

    pub fn report_path(&self) -> PathBuf {
        self.analysis_dir.join("analysis-report.md")
    }
}

#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub branch: String,
    pub base_branch: String,
    pub study_dir: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            branch: DEFAULT_BRANCH.to_string(),
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            study_dir: DEFAULT_STUDY_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudyReport {
    pub scheduled: usize,
    pub succeeded: usize,
    /// Sequence numbers whose commit was not created.
    pub failed: Vec<u32>,
    pub date_range: DateSpan,
    pub seed: u64,
    pub elapsed: Duration,
    pub summary_path: PathBuf,
}

#[derive(Debug, Clone)]
pub enum StudyOutcome {
    /// Branch setup failed or was declined; no commits were attempted.
    Aborted,
    Completed(StudyReport),
}

pub struct StudyWorkflow<V: VcsClient> {
    vcs: V,
    repo_root: PathBuf,
    layout: StudyLayout,
    config: StudyConfig,
    confirm: ConfirmationPolicy,
}

impl<V: VcsClient> StudyWorkflow<V> {
    pub fn new(vcs: V, repo_root: &Path, config: StudyConfig, confirm: ConfirmationPolicy) -> Self {
        Self {
            layout: StudyLayout::new(repo_root, &config.study_dir),
            repo_root: repo_root.to_path_buf(),
            vcs,
            config,
            confirm,
        }
    }

    pub fn layout(&self) -> &StudyLayout {
        &self.layout
    }

    pub fn setup_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.layout.notes_dir)?;
        std::fs::create_dir_all(&self.layout.analysis_dir)?;
        println!(
            "{} Created directory structure in {}",
            style("✓").green(),
            self.layout.study_dir.display()
        );
        Ok(())
    }

    /// Create and check out the study branch, replacing an existing one if the
    /// confirmation policy allows it. Returns `false` when the run must stop.
    pub fn create_study_branch(&self) -> bool {
        let branch = self.config.branch.as_str();

        let exists = match self.vcs.branch_exists(branch) {
            Ok(exists) => exists,
            Err(e) => {
                report_failure("Error creating branch", &e);
                return false;
            }
        };

        if exists {
            println!("{} Branch '{}' already exists", style("⚠").yellow(), branch);
            if !self.confirm.confirm("Delete and recreate?") {
                println!("Exiting...");
                return false;
            }
            if let Err(e) = self
                .vcs
                .checkout(&self.config.base_branch)
                .and_then(|_| self.vcs.delete_branch(branch))
            {
                report_failure("Error creating branch", &e);
                return false;
            }
            println!("{} Deleted existing branch '{}'", style("✓").green(), branch);
        }

        match self.vcs.create_branch(branch) {
            Ok(()) => {
                println!("{} Created and checked out branch '{}'", style("✓").green(), branch);
                true
            }
            Err(e) => {
                report_failure("Error creating branch", &e);
                false
            }
        }
    }

    /// Stage `files` and commit them with `date` as author and committer date.
    pub fn create_commit_with_date(
        &self,
        date: &DateTime<FixedOffset>,
        message: &str,
        files: &[PathBuf],
    ) -> bool {
        let date_str = git_date(date);

        let result = files
            .iter()
            .try_for_each(|file| self.vcs.stage(file))
            .and_then(|_| self.vcs.commit(message, &date_str));

        match result {
            Ok(()) => true,
            Err(e) => {
                report_failure("Error creating commit", &e);
                false
            }
        }
    }

    /// Fails before touching the repository if the schedule leaves the supported date range.
    pub fn run_study<Tz: TimeZone>(
        &self,
        start: DateTime<Tz>,
        count: usize,
        pattern: Pattern,
        seed: u64,
    ) -> Result<StudyOutcome> {
        let started = Instant::now();
        let schedule = schedule::generate_seeded(start, count, pattern, seed)?;

        println!("\n{}", style("Setting up directory structure...").bold());
        self.setup_directories()?;

        println!("\n{}", style("Creating study branch...").bold());
        if !self.create_study_branch() {
            tracing::info!(branch = %self.config.branch, "study aborted before any commit");
            return Ok(StudyOutcome::Aborted);
        }

        println!("\n{}", style(format!("Generating commit schedule ({pattern} pattern)...")).bold());
        match (schedule.first(), schedule.last()) {
            (Some(first), Some(last)) => println!(
                "{} Scheduled {} commits from {} to {}",
                style("✓").green(),
                schedule.len(),
                day_key(&first.date),
                day_key(&last.date)
            ),
            _ => println!("{} Nothing scheduled", style("⚠").yellow()),
        }

        println!("\n{}", style("Creating commits with timestamped learning notes...").bold());
        let mut succeeded = 0usize;
        let mut failed = Vec::new();

        let pb = ProgressBar::new(schedule.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for entry in &schedule {
            pb.set_message(day_key(&entry.date));
            if self.commit_entry(entry) {
                succeeded += 1;
                pb.suspend(|| {
                    println!(
                        "  {} Day {:3}: {} - {}",
                        style("✓").green(),
                        entry.sequence_number,
                        day_key(&entry.date),
                        notes::note_filename(entry)
                    )
                });
            } else {
                failed.push(entry.sequence_number);
                pb.suspend(|| {
                    println!("  {} Day {:3}: Failed", style("✗").red(), entry.sequence_number)
                });
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let summary_path = self.create_study_summary(&schedule, pattern, seed, succeeded)?;

        let report = StudyReport {
            scheduled: schedule.len(),
            succeeded,
            failed,
            date_range: DateSpan::of(&schedule),
            seed,
            elapsed: started.elapsed(),
            summary_path,
        };
        tracing::info!(
            scheduled = report.scheduled,
            succeeded = report.succeeded,
            "study finished"
        );
        self.print_next_steps(&report);

        Ok(StudyOutcome::Completed(report))
    }

    fn commit_entry(&self, entry: &ScheduleEntry) -> bool {
        let note = notes::learning_note(&entry.date, entry.sequence_number);
        let note_path = self.layout.notes_dir.join(notes::note_filename(entry));

        // Checking out the base branch may have removed an emptied notes directory.
        let written = std::fs::create_dir_all(&self.layout.notes_dir)
            .and_then(|_| std::fs::write(&note_path, note));
        if let Err(e) = written {
            tracing::warn!(path = %note_path.display(), error = %e, "failed to write learning note");
            println!("{} Error writing {}: {e}", style("✗").red(), note_path.display());
            return false;
        }

        let relative = note_path
            .strip_prefix(&self.repo_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| note_path.clone());

        self.create_commit_with_date(&entry.date, &notes::commit_message(entry), &[relative])
    }

    fn create_study_summary(
        &self,
        schedule: &[ScheduleEntry],
        pattern: Pattern,
        seed: u64,
        succeeded: usize,
    ) -> Result<PathBuf> {
        let summary = StudySummary {
            version: SCHEMA_VERSION,
            study_name: "Git Commit Metadata Learning Exercise".to_string(),
            created_at: Utc::now(),
            repository: self.repo_root.to_string_lossy().to_string(),
            branch: self.config.branch.clone(),
            pattern: pattern.to_string(),
            seed,
            total_commits: schedule.len(),
            successful_commits: succeeded,
            date_range: DateSpan::of(schedule),
            purpose: "Educational study of Git temporal metadata and platform visualization".to_string(),
            disclaimer: "This is a learning exercise, not a representation of actual work".to_string(),
        };

        let summary_path = self.layout.summary_path();
        std::fs::create_dir_all(&self.layout.analysis_dir)?;
        std::fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
        std::fs::write(
            self.layout.observations_path(),
            notes::observations_template(&Local::now()),
        )?;

        Ok(summary_path)
    }

    fn print_next_steps(&self, report: &StudyReport) {
        let branch = &self.config.branch;
        let elapsed = Duration::from_millis(report.elapsed.as_millis() as u64);

        println!(
            "\n{} Study complete: {}/{} commits created in {}",
            style("✓").green().bold(),
            style(report.succeeded).cyan(),
            report.scheduled,
            humantime::format_duration(elapsed)
        );
        println!("\n{}", style("Next steps:").bold());
        println!("  1. Review commits: git log --oneline --graph");
        println!("  2. Push to GitHub: git push origin {branch}");
        println!("  3. Observe activity visualization on GitHub");
        println!("  4. Document findings in analysis/observations.md");
        println!(
            "\n{} git checkout {} && git branch -D {branch}",
            style("To reverse:").dim(),
            self.config.base_branch
        );
    }
}

fn report_failure(what: &str, error: &crate::error::StudyError) {
    tracing::warn!(error = %error, "{what}");
    println!("{} {what}: {error}", style("✗").red());
}
