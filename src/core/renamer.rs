use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use tokio::task::JoinHandle;

use crate::config::settings::{ErrorPolicy, Settings};
use crate::error::RenameError;
use crate::models::rename_job::RenameJob;
use crate::models::rename_result::{RenameFailure, RenameSummary, RenamedEntry};

use super::events::{Event, EventSender};

pub type RenameHandle = JoinHandle<Result<RenameSummary, RenameError>>;

pub struct Renamer {
    event_tx: EventSender,
    settings: Settings,
}

impl Renamer {
    pub fn new(settings: Settings, event_tx: EventSender) -> Self {
        Self { event_tx, settings }
    }

    /// Rename every file of `job` in order, reporting each step on the event channel.
    ///
    /// Per file: `Progress { completed: n }` followed by `Renamed` (or `RenameFailed`
    /// under [`ErrorPolicy::Skip`]). After the last file: `Progress { completed: 0 }`
    /// and `Finished`. Under [`ErrorPolicy::Abort`] the first failure sends `Aborted`
    /// instead and nothing after it; the returned [`RenameError::Aborted`] carries the
    /// partial summary.
    pub async fn run(&self, job: RenameJob) -> Result<RenameSummary, RenameError> {
        let start = Instant::now();
        let delay = Duration::from_millis(self.settings.delay_ms);
        tracing::info!("Renaming {} file(s) with prefix {:?}", job.len(), job.prefix());

        let mut renamed = Vec::new();
        let mut failures = Vec::new();

        for (index, source) in job.files().iter().enumerate() {
            let ordinal = index + 1;
            let target = target_path(source, job.prefix(), ordinal);

            match rename_file(source, &target).await {
                Ok(()) => {
                    tracing::debug!("{} -> {}", source.display(), target.display());
                    let entry = RenamedEntry {
                        ordinal,
                        from: source.clone(),
                        to: target,
                    };
                    self.send(Event::Progress { completed: ordinal });
                    self.send(Event::Renamed(entry.clone()));
                    renamed.push(entry);
                }
                Err(e) => {
                    let failure = RenameFailure::from_io(ordinal, source, &target, &e);
                    match self.settings.error_policy {
                        ErrorPolicy::Skip => {
                            tracing::warn!("Skipping file {}: {}", ordinal, e);
                            self.send(Event::Progress { completed: ordinal });
                            self.send(Event::RenameFailed(failure.clone()));
                            failures.push(failure);
                        }
                        ErrorPolicy::Abort => {
                            tracing::error!("Aborting batch at file {}: {}", ordinal, e);
                            self.send(Event::Aborted(failure.clone()));
                            failures.push(failure.clone());
                            let summary = summarize(&job, renamed, failures, start, false);
                            return Err(RenameError::Aborted {
                                failure,
                                summary: Box::new(summary),
                            });
                        }
                    }
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        self.send(Event::Progress { completed: 0 });
        self.send(Event::Finished);

        let summary = summarize(&job, renamed, failures, start, true);
        tracing::info!(
            "Renamed {} of {} file(s) in {} ms",
            summary.renamed.len(),
            summary.total,
            summary.duration.as_millis()
        );
        Ok(summary)
    }

    fn send(&self, event: Event) {
        // Receiver gone means nobody is watching; the batch still runs to the end.
        let _ = self.event_tx.send(event);
    }
}

fn summarize(
    job: &RenameJob,
    renamed: Vec<RenamedEntry>,
    failures: Vec<RenameFailure>,
    start: Instant,
    completed: bool,
) -> RenameSummary {
    RenameSummary {
        prefix: job.prefix().to_string(),
        total: job.len(),
        renamed,
        failures,
        duration: start.elapsed(),
        timestamp: SystemTime::now(),
        completed,
    }
}

/// Run `job` on its own task. The caller keeps the handle and awaits it after the
/// terminal event arrives.
pub fn spawn(job: RenameJob, settings: Settings, event_tx: EventSender) -> RenameHandle {
    tokio::spawn(async move { Renamer::new(settings, event_tx).run(job).await })
}

/// New path for the file at `ordinal`: `prefix + ordinal + extension`, in the same directory.
///
/// The extension keeps its original case. Files without one (including dot-files such
/// as `.bashrc`) get none.
pub fn target_path(source: &Path, prefix: &str, ordinal: usize) -> PathBuf {
    let mut name = OsString::from(prefix);
    name.push(ordinal.to_string());
    if let Some(ext) = source.extension().filter(|e| !e.is_empty()) {
        name.push(".");
        name.push(ext);
    }
    match source.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

async fn rename_file(from: &Path, to: &Path) -> std::io::Result<()> {
    tokio::fs::rename(from, to).await
}
