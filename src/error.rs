use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudyError>;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Git command `{command}` failed ({status}): {stderr}")]
    Git {
        command: String,
        status: String,
        stderr: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Unknown pattern '{0}' (expected daily, weekdays or sparse)")]
    UnknownPattern(String),
}

impl StudyError {
    pub fn git(command: impl Into<String>, status: ExitStatus, stderr: &[u8]) -> Self {
        let status = match status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        StudyError::Git {
            command: command.into(),
            status,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}
