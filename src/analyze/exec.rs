use super::{generate_report, CommitAnalyzer};
use crate::cli::CommonArgs;
use crate::study::StudyLayout;
use crate::vcs::GitCli;
use anyhow::Context;
use console::style;
use std::path::PathBuf;

pub fn exec(common: CommonArgs, branch: String, output: Option<PathBuf>) -> anyhow::Result<()> {
    let git = GitCli::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let output = output.unwrap_or_else(|| StudyLayout::new(git.path(), &common.study_dir).report_path());

    println!("{}\n", style("Analyzing Git metadata study commits...").bold());
    let analyzer = CommitAnalyzer::new(git);
    generate_report(&analyzer, &branch, &output).context("Failed to write analysis report")?;
    println!("\n{} Analysis complete!", style("✓").green().bold());

    Ok(())
}
