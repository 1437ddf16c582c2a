use std::collections::VecDeque;
use std::path::PathBuf;

/// Files waiting to be renamed, oldest selection first.
#[derive(Debug, Clone, Default)]
pub struct PendingFileList {
    files: VecDeque<PathBuf>,
}

impl PendingFileList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, paths: I) {
        self.files.extend(paths);
    }

    pub fn pop_front(&mut self) -> Option<PathBuf> {
        self.files.pop_front()
    }

    /// Owned copy handed to the worker; later mutations of the list do not affect it.
    pub fn snapshot(&self) -> Vec<PathBuf> {
        self.files.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
