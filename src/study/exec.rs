use super::{StudyConfig, StudyOutcome, StudyWorkflow};
use crate::cli::{CommonArgs, ScheduleArgs};
use crate::confirm::ConfirmationPolicy;
use crate::vcs::GitCli;
use anyhow::Context;
use console::style;

pub fn exec(
    common: CommonArgs,
    schedule: ScheduleArgs,
    branch: String,
    base_branch: String,
    yes: bool,
) -> anyhow::Result<()> {
    let git = GitCli::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let start = schedule.start_date()?;
    let seed = schedule.seed();

    println!("{}", style("Git Commit Metadata Study - Configuration").bold());
    println!("{}", "─".repeat(60));
    println!("Repository: {}", git.path().display());
    println!("Branch: {}", style(&branch).cyan());
    println!("Start Date: {}", start.format("%Y-%m-%d"));
    println!("Number of Commits: {}", schedule.count());
    println!("Pattern: {}", schedule.pattern);
    println!("Seed: {seed}");
    println!("{}", "─".repeat(60));

    let confirm = if yes {
        ConfirmationPolicy::AlwaysProceed
    } else {
        ConfirmationPolicy::interactive()
    };

    if !confirm.confirm("This will create a new branch with timestamped commits. Continue?") {
        println!("Cancelled.");
        return Ok(());
    }

    let repo_root = git.path().to_path_buf();
    let config = StudyConfig {
        branch,
        base_branch,
        study_dir: common.study_dir,
    };
    let workflow = StudyWorkflow::new(git, &repo_root, config, confirm);

    match workflow
        .run_study(start, schedule.count(), schedule.pattern, seed)
        .context("Study run failed")?
    {
        StudyOutcome::Completed(report) if !report.failed.is_empty() => {
            println!(
                "{} {} commit(s) failed: days {:?}",
                style("⚠").yellow(),
                report.failed.len(),
                report.failed
            );
        }
        StudyOutcome::Completed(_) => {}
        StudyOutcome::Aborted => println!("{}", style("Study aborted, no commits created").yellow()),
    }

    Ok(())
}
