use crate::error::{Result, StudyError};
use crate::vcs::VcsClient;
use chrono::{DateTime, FixedOffset};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryCommit {
    pub hash: String,
    pub message: String,
    pub author_date: DateTime<FixedOffset>,
    pub committer_date: DateTime<FixedOffset>,
    pub files: Vec<PathBuf>,
}

#[derive(Debug)]
struct State {
    branches: BTreeMap<String, Vec<MemoryCommit>>,
    head: String,
    staged: Vec<PathBuf>,
    next_id: u64,
    failing_messages: Vec<String>,
    fail_branch_creation: bool,
}

/// In-process stand-in for a git repository.
///
/// Starts with a single empty `main` branch checked out. Interior mutability
/// keeps the [`VcsClient`] methods on `&self`, matching the subprocess client.
#[derive(Debug)]
pub struct MemoryVcs {
    name: String,
    email: String,
    state: RefCell<State>,
}

impl Default for MemoryVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryVcs {
    pub fn new() -> Self {
        let mut branches = BTreeMap::new();
        branches.insert("main".to_string(), Vec::new());
        Self {
            name: "Study Author".to_string(),
            email: "study@example.com".to_string(),
            state: RefCell::new(State {
                branches,
                head: "main".to_string(),
                staged: Vec::new(),
                next_id: 1,
                failing_messages: Vec::new(),
                fail_branch_creation: false,
            }),
        }
    }

    pub fn with_identity(mut self, name: &str, email: &str) -> Self {
        self.name = name.to_string();
        self.email = email.to_string();
        self
    }

    /// Make every commit whose message contains `needle` fail.
    pub fn fail_commits_containing(&self, needle: &str) {
        self.state.borrow_mut().failing_messages.push(needle.to_string());
    }

    pub fn fail_branch_creation(&self) {
        self.state.borrow_mut().fail_branch_creation = true;
    }

    /// Create a branch with a single commit dated `date`, without switching to it.
    pub fn seed_branch(&self, branch: &str, message: &str, date: DateTime<FixedOffset>) {
        let mut state = self.state.borrow_mut();
        let hash = next_hash(&mut state);
        state.branches.entry(branch.to_string()).or_default().push(MemoryCommit {
            hash,
            message: message.to_string(),
            author_date: date,
            committer_date: date,
            files: Vec::new(),
        });
    }

    pub fn current_branch(&self) -> String {
        self.state.borrow().head.clone()
    }

    /// Commits on `branch`, oldest first.
    pub fn commits(&self, branch: &str) -> Vec<MemoryCommit> {
        self.state
            .borrow()
            .branches
            .get(branch)
            .cloned()
            .unwrap_or_default()
    }

    fn render(&self, commit: &MemoryCommit, format: &str) -> String {
        let mut out = String::with_capacity(format.len() + 64);
        let mut rest = format;
        while let Some(idx) = rest.find('%') {
            out.push_str(&rest[..idx]);
            rest = &rest[idx..];
            let (value, consumed) = match placeholder(rest) {
                Some(Placeholder::Hash) => (commit.hash.clone(), 2),
                Some(Placeholder::Subject) => (subject(&commit.message).to_string(), 2),
                Some(Placeholder::Name) => (self.name.clone(), 3),
                Some(Placeholder::Email) => (self.email.clone(), 3),
                Some(Placeholder::AuthorIso) => (commit.author_date.to_rfc3339(), 3),
                Some(Placeholder::CommitterIso) => (commit.committer_date.to_rfc3339(), 3),
                Some(Placeholder::AuthorLoose) => (loose_iso(&commit.author_date), 3),
                Some(Placeholder::CommitterLoose) => (loose_iso(&commit.committer_date), 3),
                None => ("%".to_string(), 1),
            };
            out.push_str(&value);
            rest = &rest[consumed..];
        }
        out.push_str(rest);
        out
    }
}

enum Placeholder {
    Hash,
    Subject,
    Name,
    Email,
    AuthorIso,
    CommitterIso,
    AuthorLoose,
    CommitterLoose,
}

fn placeholder(s: &str) -> Option<Placeholder> {
    let p = if s.starts_with("%aI") {
        Placeholder::AuthorIso
    } else if s.starts_with("%cI") {
        Placeholder::CommitterIso
    } else if s.starts_with("%ai") {
        Placeholder::AuthorLoose
    } else if s.starts_with("%ci") {
        Placeholder::CommitterLoose
    } else if s.starts_with("%an") || s.starts_with("%cn") {
        Placeholder::Name
    } else if s.starts_with("%ae") || s.starts_with("%ce") {
        Placeholder::Email
    } else if s.starts_with("%H") {
        Placeholder::Hash
    } else if s.starts_with("%s") {
        Placeholder::Subject
    } else {
        return None;
    };
    Some(p)
}

fn loose_iso(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y-%m-%d %H:%M:%S %z").to_string()
}

fn subject(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}

fn next_hash(state: &mut State) -> String {
    let id = state.next_id;
    state.next_id += 1;
    format!("{id:040x}")
}

fn failure(command: &str, stderr: &str) -> StudyError {
    StudyError::Git {
        command: command.to_string(),
        status: "exit code 1".to_string(),
        stderr: stderr.to_string(),
    }
}

impl VcsClient for MemoryVcs {
    fn branch_exists(&self, branch: &str) -> Result<bool> {
        Ok(self.state.borrow().branches.contains_key(branch))
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if !state.branches.contains_key(branch) {
            return Err(failure(
                &format!("git checkout {branch}"),
                &format!("error: pathspec '{branch}' did not match any file(s) known to git"),
            ));
        }
        state.head = branch.to_string();
        Ok(())
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let command = format!("git checkout -b {branch}");
        if state.fail_branch_creation {
            return Err(failure(&command, "fatal: cannot lock ref"));
        }
        if state.branches.contains_key(branch) {
            return Err(failure(
                &command,
                &format!("fatal: a branch named '{branch}' already exists"),
            ));
        }
        let history = state.branches.get(&state.head).cloned().unwrap_or_default();
        state.branches.insert(branch.to_string(), history);
        state.head = branch.to_string();
        Ok(())
    }

    fn delete_branch(&self, branch: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let command = format!("git branch -D {branch}");
        if state.head == branch {
            return Err(failure(
                &command,
                &format!("error: cannot delete branch '{branch}' used by worktree"),
            ));
        }
        if state.branches.remove(branch).is_none() {
            return Err(failure(&command, &format!("error: branch '{branch}' not found")));
        }
        Ok(())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.state.borrow_mut().staged.push(path.to_path_buf());
        Ok(())
    }

    fn commit(&self, message: &str, date: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let command = format!("git commit -m {message:?}");
        if state.staged.is_empty() {
            return Err(failure(&command, "nothing to commit, working tree clean"));
        }
        if state.failing_messages.iter().any(|n| message.contains(n.as_str())) {
            state.staged.clear();
            return Err(failure(&command, "error: commit hook rejected the commit"));
        }
        let timestamp = DateTime::parse_from_rfc2822(date)
            .map_err(|e| failure(&command, &format!("fatal: invalid date format: {date} ({e})")))?;

        let hash = next_hash(&mut state);
        let files = std::mem::take(&mut state.staged);
        let head = state.head.clone();
        state.branches.entry(head).or_default().push(MemoryCommit {
            hash,
            message: message.to_string(),
            author_date: timestamp,
            committer_date: timestamp,
            files,
        });
        Ok(())
    }

    fn log(&self, branch: &str, format: &str) -> Result<String> {
        let state = self.state.borrow();
        let commits = state.branches.get(branch).ok_or_else(|| {
            failure(
                &format!("git log {branch}"),
                &format!("fatal: ambiguous argument '{branch}': unknown revision"),
            )
        })?;
        let mut out = String::new();
        for commit in commits.iter().rev() {
            out.push_str(&self.render(commit, format));
            out.push('\n');
        }
        Ok(out)
    }
}
