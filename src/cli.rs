use crate::schedule::Pattern;
use crate::study::{DEFAULT_BASE_BRANCH, DEFAULT_BRANCH, DEFAULT_STUDY_DIR};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local, TimeZone};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitstamp")]
#[command(about = "Create commits with controlled timestamps and analyze how they are distributed")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Study directory inside the repository", default_value = DEFAULT_STUDY_DIR)]
    pub study_dir: String,
}

#[derive(Args, Clone)]
pub struct ScheduleArgs {
    #[arg(long, help = "How many days ago the commit history starts", default_value_t = 60, allow_negative_numbers = true)]
    pub days_ago: i64,

    #[arg(long, help = "Number of commits to create", default_value_t = 30, allow_negative_numbers = true)]
    pub num_commits: i64,

    #[arg(long, value_enum, help = "Commit frequency pattern", default_value_t = Pattern::Daily)]
    pub pattern: Pattern,

    #[arg(long, help = "Seed for the sparse pattern (random if omitted)")]
    pub seed: Option<u64>,
}

impl ScheduleArgs {
    /// Negative counts schedule nothing.
    pub fn count(&self) -> usize {
        usize::try_from(self.num_commits).unwrap_or(0)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn start_date(&self) -> Result<DateTime<Local>> {
        start_date(self.days_ago)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the study branch and one dated commit per scheduled day
    Create {
        #[command(flatten)]
        schedule: ScheduleArgs,

        #[arg(long, help = "Branch name for the study", default_value = DEFAULT_BRANCH)]
        branch: String,

        #[arg(long, help = "Branch to return to before replacing an existing study branch", default_value = DEFAULT_BASE_BRANCH)]
        base_branch: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// Summarize the study branch into a Markdown report and JSON data
    Analyze {
        #[arg(long, help = "Branch to analyze", default_value = DEFAULT_BRANCH)]
        branch: String,

        #[arg(long, help = "Report path (JSON is written next to it)")]
        output: Option<PathBuf>,
    },
    /// Preview a schedule without touching the repository
    Schedule {
        #[command(flatten)]
        schedule: ScheduleArgs,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Create { schedule, branch, base_branch, yes } => {
                crate::study::exec::exec(self.common, schedule, branch, base_branch, yes)
            }
            Commands::Analyze { branch, output } => {
                crate::analyze::exec::exec(self.common, branch, output)
            }
            Commands::Schedule { schedule, json } => crate::preview::exec(schedule, json),
        }
    }
}

/// 10:00 local time, `days_ago` calendar days before today.
pub fn start_date(days_ago: i64) -> Result<DateTime<Local>> {
    let morning = Duration::try_days(days_ago)
        .and_then(|offset| Local::now().date_naive().checked_sub_signed(offset))
        .and_then(|day| day.and_hms_opt(10, 0, 0))
        .with_context(|| format!("Start date {days_ago} days ago is out of range"))?;

    Local
        .from_local_datetime(&morning)
        .earliest()
        .context("Start time does not exist in the local timezone")
}
