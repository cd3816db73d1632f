//! Access to the version-control tool the study drives.
//!
//! Everything that touches repository state (HEAD, the index, branch refs)
//! goes through [`VcsClient`], so the workflow and the analyzer can run
//! against the real `git` binary or against [`MemoryVcs`].

pub mod git;
pub mod memory;

pub use git::GitCli;
pub use memory::{MemoryCommit, MemoryVcs};

use crate::error::Result;
use std::path::Path;

pub trait VcsClient {
    /// Whether a local branch named `branch` exists.
    fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Switch to an existing branch.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Create `branch` at the current HEAD and switch to it.
    fn create_branch(&self, branch: &str) -> Result<()>;

    /// Force-delete a local branch.
    fn delete_branch(&self, branch: &str) -> Result<()>;

    /// Add a path (relative to the repository root) to the index.
    fn stage(&self, path: &Path) -> Result<()>;

    /// Commit the index with `date` (RFC-2822) as both author and committer date.
    fn commit(&self, message: &str, date: &str) -> Result<()>;

    /// History of `branch`, newest first, one line per commit rendered with `format`.
    fn log(&self, branch: &str, format: &str) -> Result<String>;
}

impl<V: VcsClient + ?Sized> VcsClient for &V {
    fn branch_exists(&self, branch: &str) -> Result<bool> {
        (**self).branch_exists(branch)
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        (**self).checkout(branch)
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        (**self).create_branch(branch)
    }

    fn delete_branch(&self, branch: &str) -> Result<()> {
        (**self).delete_branch(branch)
    }

    fn stage(&self, path: &Path) -> Result<()> {
        (**self).stage(path)
    }

    fn commit(&self, message: &str, date: &str) -> Result<()> {
        (**self).commit(message, date)
    }

    fn log(&self, branch: &str, format: &str) -> Result<String> {
        (**self).log(branch, format)
    }
}
