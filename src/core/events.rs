use tokio::sync::mpsc;

use crate::models::rename_result::{RenameFailure, RenamedEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Ordinal of the file just processed. `0` resets the indicator after the last file.
    Progress { completed: usize },

    Renamed(RenamedEntry),
    RenameFailed(RenameFailure),

    // Terminal events: exactly one of these ends every job.
    Finished,
    Aborted(RenameFailure),
}

impl Event {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::Finished | Event::Aborted(_))
    }
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
