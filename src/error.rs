use thiserror::Error;

use crate::models::rename_result::{RenameFailure, RenameSummary};

/// Worker-level failure of a rename job.
#[derive(Debug, Error)]
pub enum RenameError {
    /// The job stopped at the first failed file. Files renamed before it stay renamed,
    /// and `summary` records them with `completed: false`.
    #[error("batch aborted at file {}: {}", .failure.ordinal, .failure.message)]
    Aborted {
        failure: RenameFailure,
        summary: Box<RenameSummary>,
    },
}

impl RenameError {
    /// What the job got done before it stopped.
    pub fn summary(&self) -> &RenameSummary {
        match self {
            RenameError::Aborted { summary, .. } => summary,
        }
    }

    pub fn into_summary(self) -> RenameSummary {
        match self {
            RenameError::Aborted { summary, .. } => *summary,
        }
    }
}
