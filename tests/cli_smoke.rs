use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git").args(args).current_dir(dir).output().unwrap();
    assert!(out.status.success());
    String::from_utf8(out.stdout).unwrap()
}

fn init_git_repo(dir: &Path) {
    // init on main with basic identity
    git(dir, &["init"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "core.safecrlf", "false"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);

    let mut f = File::create(dir.join("README.md")).unwrap();
    f.write_all(b"# study\n").unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "README.md"]);
    git(dir, &["commit", "-m", "initial"]);
}

fn create(dir: &Path, extra: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitstamp").unwrap();
    cmd.current_dir(dir)
        .arg("--repo")
        .arg(dir)
        .arg("create")
        .args(["--yes", "--days-ago", "20"])
        .args(extra);
    cmd
}

#[test]
fn schedule_json_outputs_entries() {
    let mut cmd = Command::cargo_bin("gitstamp").unwrap();
    cmd.args(["schedule", "--json", "--num-commits", "5", "--pattern", "weekdays"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let entries = v["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 5);
    let numbers: Vec<u64> = entries
        .iter()
        .map(|e| e["sequence_number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(v["pattern"], "weekdays");
}

#[test]
fn schedule_seed_makes_sparse_reproducible() {
    let run = || {
        let mut cmd = Command::cargo_bin("gitstamp").unwrap();
        cmd.args(["schedule", "--json", "--pattern", "sparse", "--seed", "11"]);
        let out = cmd.assert().success().get_output().stdout.clone();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        v["entries"].clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn schedule_rejects_unknown_pattern() {
    let mut cmd = Command::cargo_bin("gitstamp").unwrap();
    cmd.args(["schedule", "--pattern", "hourly"]);
    cmd.assert().failure();
}

#[test]
fn schedule_keeps_ten_oclock_across_dst() {
    let mut cmd = Command::cargo_bin("gitstamp").unwrap();
    cmd.env("TZ", "America/New_York").args([
        "schedule", "--json", "--days-ago", "200", "--num-commits", "400", "--pattern", "daily",
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let dates: Vec<&str> = v["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates.len(), 400);
    for date in &dates {
        assert_eq!(&date[10..19], "T10:00:00", "{date}");
    }

    if Path::new("/usr/share/zoneinfo/America/New_York").exists() {
        let offsets: std::collections::BTreeSet<&str> = dates.iter().map(|d| &d[19..]).collect();
        assert_eq!(offsets.len(), 2, "{offsets:?}");
    }
}

#[test]
fn schedule_past_the_last_date_fails_cleanly() {
    let mut cmd = Command::cargo_bin("gitstamp").unwrap();
    cmd.args(["schedule", "--days-ago", "-95000000", "--num-commits", "10000"]);
    let out = cmd.assert().failure().get_output().clone();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Invalid date"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}

#[test]
fn create_commits_on_study_branch() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    create(dir.path(), &["--num-commits", "6", "--pattern", "weekdays"])
        .assert()
        .success();

    let branch = git_stdout(dir.path(), &["rev-parse", "--abbrev-ref", "HEAD"]);
    assert_eq!(branch.trim(), "git-metadata-study");

    let log = git_stdout(dir.path(), &["log", "main..git-metadata-study", "--format=%aI|%cI|%s"]);
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 6);
    for line in lines {
        let parts: Vec<&str> = line.splitn(3, '|').collect();
        assert_eq!(parts[0], parts[1], "author and committer dates differ");
        assert!(parts[0].contains("T10:00:00"), "{}", parts[0]);
        assert!(parts[2].starts_with("Learning Day "));
    }

    let notes = dir.path().join("git-metadata-study").join("learning-notes");
    assert_eq!(fs::read_dir(notes).unwrap().count(), 6);

    let summary: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("git-metadata-study/analysis/study-summary.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(summary["total_commits"], 6);
    assert_eq!(summary["successful_commits"], 6);
}

#[test]
fn create_twice_recreates_the_branch() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    create(dir.path(), &["--num-commits", "3"]).assert().success();
    create(dir.path(), &["--num-commits", "2"]).assert().success();

    let count = git_stdout(dir.path(), &["rev-list", "--count", "main..git-metadata-study"]);
    assert_eq!(count.trim(), "2");
}

#[test]
fn analyze_writes_report_and_json() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());
    create(dir.path(), &["--num-commits", "14", "--pattern", "daily"])
        .assert()
        .success();

    let mut cmd = Command::cargo_bin("gitstamp").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .arg("analyze");
    cmd.assert().success();

    let analysis = dir.path().join("git-metadata-study").join("analysis");
    let report = fs::read_to_string(analysis.join("analysis-report.md")).unwrap();
    // 14 study commits plus the initial commit on main.
    assert!(report.contains("- **Total Commits**: 15"));

    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(analysis.join("analysis-report.json")).unwrap()).unwrap();
    assert_eq!(v["commits"].as_array().unwrap().len(), 10);
    let weekdays = v["analysis"]["commits_by_weekday"].as_object().unwrap();
    assert_eq!(weekdays.len(), 7);
    assert!(weekdays.values().all(|c| c.as_u64().unwrap() >= 2));
}

#[test]
fn analyze_missing_branch_writes_nothing() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    init_git_repo(dir.path());

    let mut cmd = Command::cargo_bin("gitstamp").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo")
        .arg(dir.path())
        .args(["analyze", "--branch", "does-not-exist"]);
    cmd.assert().success();

    assert!(!dir
        .path()
        .join("git-metadata-study/analysis/analysis-report.md")
        .exists());
}
