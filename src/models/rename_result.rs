use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedEntry {
    /// 1-based position of the file in the job.
    pub ordinal: usize,
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    PermissionDenied,
    NotFound,
    AlreadyExists,
    IoError,
}

impl From<std::io::ErrorKind> for FailureKind {
    fn from(kind: std::io::ErrorKind) -> Self {
        match kind {
            std::io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            std::io::ErrorKind::NotFound => FailureKind::NotFound,
            std::io::ErrorKind::AlreadyExists => FailureKind::AlreadyExists,
            _ => FailureKind::IoError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub ordinal: usize,
    pub path: PathBuf,
    pub target: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl RenameFailure {
    pub fn from_io(ordinal: usize, path: &Path, target: &Path, error: &std::io::Error) -> Self {
        Self {
            ordinal,
            path: path.to_path_buf(),
            target: target.to_path_buf(),
            kind: error.kind().into(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameSummary {
    pub prefix: String,
    pub total: usize,
    pub renamed: Vec<RenamedEntry>,
    pub failures: Vec<RenameFailure>,
    pub duration: Duration,
    pub timestamp: SystemTime,
    /// False when the run stopped early on the abort policy.
    pub completed: bool,
}

impl RenameSummary {
    pub fn attempted(&self) -> usize {
        self.renamed.len() + self.failures.len()
    }
}
