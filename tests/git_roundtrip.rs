use chrono::DateTime;
use gitstamp::analyze::{analyze_date_distribution, parse_git_date, CommitAnalyzer};
use gitstamp::confirm::ConfirmationPolicy;
use gitstamp::schedule::Pattern;
use gitstamp::study::{StudyConfig, StudyOutcome, StudyWorkflow};
use gitstamp::vcs::{GitCli, VcsClient};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn init_git_repo(dir: &Path) {
    for args in [
        vec!["init"],
        vec!["symbolic-ref", "HEAD", "refs/heads/main"],
        vec!["config", "commit.gpgsign", "false"],
        vec!["config", "user.email", "you@example.com"],
        vec!["config", "user.name", "Your Name"],
        vec!["commit", "--allow-empty", "-m", "initial"],
    ] {
        assert!(Command::new("git")
            .args(&args)
            .current_dir(dir)
            .status()
            .unwrap()
            .success());
    }
}

#[test]
fn author_date_reads_back_unchanged() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    let git = GitCli::open(Some(dir.path())).unwrap();
    let root = git.path().to_path_buf();
    let workflow = StudyWorkflow::new(&git, &root, StudyConfig::default(), ConfirmationPolicy::AlwaysAbort);
    assert!(workflow.create_study_branch());

    let dates = [
        "2025-01-01T10:00:00+05:30",
        "2024-07-14T23:59:59-07:00",
        "2025-03-30T02:30:00+00:00",
    ];
    for (i, date) in dates.iter().enumerate() {
        let date = DateTime::parse_from_rfc3339(date).unwrap();
        let file = PathBuf::from(format!("note-{i}.md"));
        std::fs::write(root.join(&file), format!("note {i}\n")).unwrap();
        assert!(workflow.create_commit_with_date(&date, &format!("note {i}"), &[file]));
    }

    let analyzer = CommitAnalyzer::new(&git);
    let records = analyzer.get_commit_metadata("git-metadata-study");
    assert_eq!(records.len(), dates.len() + 1);

    // Newest first, the initial commit last.
    for (record, expected) in records.iter().zip(dates.iter().rev()) {
        let expected = DateTime::parse_from_rfc3339(expected).unwrap();
        let author = parse_git_date(&record.author.date).unwrap();
        let committer = parse_git_date(&record.committer.date).unwrap();
        assert_eq!(author, expected);
        assert_eq!(author.offset(), expected.offset());
        assert_eq!(committer, expected);
        assert_eq!(record.author.name, "Your Name");
        assert_eq!(record.hash.len(), 40);
    }

    let dist = analyze_date_distribution(&records).unwrap();
    assert_eq!(dist.total_commits, 4);
    assert_eq!(dist.commits_by_weekday.total(), 4);
}

#[test]
fn declined_recreation_keeps_existing_branch() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    let git = GitCli::open(Some(dir.path())).unwrap();
    let root = git.path().to_path_buf();
    let config = StudyConfig::default();

    let first = StudyWorkflow::new(&git, &root, config.clone(), ConfirmationPolicy::AlwaysAbort);
    let outcome = first
        .run_study(DateTime::parse_from_rfc3339("2025-01-06T10:00:00+00:00").unwrap(), 3, Pattern::Daily, 0)
        .unwrap();
    assert!(matches!(outcome, StudyOutcome::Completed(ref r) if r.succeeded == 3));

    let second = StudyWorkflow::new(&git, &root, config, ConfirmationPolicy::AlwaysAbort);
    let outcome = second
        .run_study(DateTime::parse_from_rfc3339("2025-02-03T10:00:00+00:00").unwrap(), 5, Pattern::Daily, 0)
        .unwrap();
    assert!(matches!(outcome, StudyOutcome::Aborted));

    assert!(git.branch_exists("git-metadata-study").unwrap());
    let analyzer = CommitAnalyzer::new(&git);
    assert_eq!(analyzer.get_commit_metadata("git-metadata-study").len(), 4);
}
