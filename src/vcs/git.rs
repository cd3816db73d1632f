use crate::error::{Result, StudyError};
use crate::vcs::VcsClient;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub const AUTHOR_DATE_VAR: &str = "GIT_AUTHOR_DATE";
pub const COMMITTER_DATE_VAR: &str = "GIT_COMMITTER_DATE";

/// [`VcsClient`] backed by the `git` executable found on `PATH`.
pub struct GitCli {
    path: PathBuf,
}

impl GitCli {
    /// Use the repository at `path`, or the current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let mut cli = Self { path: repo_path };
        let output = cli.run(["rev-parse", "--show-toplevel"], &[])?;
        let top = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !top.is_empty() {
            tracing::debug!(toplevel = %top, "resolved repository root");
            cli.path = PathBuf::from(top);
        }

        Ok(cli)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn command<I, S>(&self, args: I, envs: &[(&str, &str)]) -> (Command, String)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        let mut command_line = String::from("git");
        for arg in args {
            command_line.push(' ');
            command_line.push_str(&arg.as_ref().to_string_lossy());
            cmd.arg(arg);
        }
        // Set on the child only; our own environment stays untouched between calls.
        for (key, value) in envs {
            cmd.env(key, value);
        }
        cmd.current_dir(&self.path);
        (cmd, command_line)
    }

    /// Run git to completion, turning a non-zero exit into [`StudyError::Git`].
    fn run<I, S>(&self, args: I, envs: &[(&str, &str)]) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let (mut cmd, command_line) = self.command(args, envs);
        tracing::debug!(command = %command_line, "running git");

        let output = cmd.output()?;
        if !output.status.success() {
            return Err(StudyError::git(command_line, output.status, &output.stderr));
        }
        Ok(output)
    }
}

impl VcsClient for GitCli {
    fn branch_exists(&self, branch: &str) -> Result<bool> {
        let refname = format!("refs/heads/{branch}");
        let (mut cmd, command_line) = self.command(["rev-parse", "--verify", "--quiet", refname.as_str()], &[]);
        tracing::debug!(command = %command_line, "running git");
        let output = cmd.output()?;
        Ok(output.status.success())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run(["checkout", branch], &[])?;
        Ok(())
    }

    fn create_branch(&self, branch: &str) -> Result<()> {
        self.run(["checkout", "-b", branch], &[])?;
        Ok(())
    }

    fn delete_branch(&self, branch: &str) -> Result<()> {
        self.run(["branch", "-D", branch], &[])?;
        Ok(())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.run([OsStr::new("add"), OsStr::new("--"), path.as_os_str()], &[])?;
        Ok(())
    }

    fn commit(&self, message: &str, date: &str) -> Result<()> {
        self.run(
            ["commit", "-m", message],
            &[(AUTHOR_DATE_VAR, date), (COMMITTER_DATE_VAR, date)],
        )?;
        Ok(())
    }

    fn log(&self, branch: &str, format: &str) -> Result<String> {
        let format_arg = format!("--format={format}");
        let output = self.run(["log", branch, format_arg.as_str(), "--"], &[])?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
