use std::path::PathBuf;

/// One rename run: a snapshot of the files to rename and the prefix to use.
///
/// The snapshot is taken from the presenter's pending list when the run starts
/// and is owned by the worker for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameJob {
    files: Vec<PathBuf>,
    prefix: String,
}

impl RenameJob {
    pub fn new(files: Vec<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            files,
            prefix: prefix.into(),
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
