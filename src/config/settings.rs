use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::filter::FileFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Record the failure, keep going with the next file.
    Skip,
    /// Stop the batch at the first failure.
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Pause after each rename so progress stays visible on small batches.
    pub delay_ms: u64,
    pub error_policy: ErrorPolicy,
    pub start_dir: Option<PathBuf>,
    pub filter: FileFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            error_policy: ErrorPolicy::Skip,
            start_dir: None,
            filter: FileFilter::Png,
        }
    }
}

impl Settings {
    pub fn without_delay(mut self) -> Self {
        self.delay_ms = 0;
        self
    }
}
