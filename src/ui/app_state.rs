use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::core::events::Event;
use crate::core::filter::FileFilter;
use crate::core::picker::Selection;
use crate::error::RenameError;
use crate::models::pending::PendingFileList;
use crate::models::rename_job::RenameJob;
use crate::models::rename_result::{RenameFailure, RenameSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FilesLoaded,
    Renaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Normal,
    EditDirectory,
    EditPrefix,
    Picker,
    Help,
    ErrorList,
}

pub struct PickerState {
    pub dir: PathBuf,
    pub entries: Vec<PathBuf>,
    pub marked: Vec<bool>,
    pub filter: FileFilter,
    pub selected_index: usize,
}

impl PickerState {
    pub fn new(dir: PathBuf, entries: Vec<PathBuf>, filter: FileFilter) -> Self {
        let marked = vec![false; entries.len()];
        Self {
            dir,
            entries,
            marked,
            filter,
            selected_index: 0,
        }
    }

    /// Indices into `entries` that pass the active filter.
    pub fn visible(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, p)| self.filter.matches(p))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let count = self.visible().len();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    pub fn toggle_current(&mut self) {
        if let Some(&idx) = self.visible().get(self.selected_index) {
            self.marked[idx] = !self.marked[idx];
        }
    }

    /// Mark every visible entry, or clear them all if they are already marked.
    pub fn toggle_all(&mut self) {
        let visible = self.visible();
        let all_marked = !visible.is_empty() && visible.iter().all(|&i| self.marked[i]);
        for i in visible {
            self.marked[i] = !all_marked;
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected_index = 0;
    }

    pub fn marked_count(&self) -> usize {
        self.visible().into_iter().filter(|&i| self.marked[i]).count()
    }

    /// Marked entries hidden by the current filter are not part of the selection.
    pub fn selection(&self) -> Selection {
        let paths = self
            .visible()
            .into_iter()
            .filter(|&i| self.marked[i])
            .map(|i| self.entries[i].clone())
            .collect();
        Selection {
            paths,
            filter: self.filter,
        }
    }
}

pub struct AppState {
    pub phase: Phase,
    pub view_mode: ViewMode,
    pub pending: PendingFileList,
    pub done: Vec<PathBuf>,
    pub failures: Vec<RenameFailure>,
    pub total: usize,
    pub completed: usize,
    pub dir_input: String,
    pub prefix_input: String,
    pub filter: FileFilter,
    pub extension_label: String,
    pub picker: Option<PickerState>,
    pub last_summary: Option<RenameSummary>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: Phase::Idle,
            view_mode: ViewMode::Normal,
            pending: PendingFileList::new(),
            done: Vec::new(),
            failures: Vec::new(),
            total: 0,
            completed: 0,
            dir_input: settings
                .start_dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            prefix_input: String::new(),
            filter: settings.filter,
            extension_label: settings.filter.extension_label(),
            picker: None,
            last_summary: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn is_renaming(&self) -> bool {
        self.phase == Phase::Renaming
    }

    pub fn open_picker(&mut self, dir: PathBuf, entries: Vec<PathBuf>) {
        self.picker = Some(PickerState::new(dir, entries, self.filter));
        self.view_mode = ViewMode::Picker;
    }

    pub fn cancel_picker(&mut self) {
        self.picker = None;
        self.view_mode = ViewMode::Normal;
    }

    pub fn confirm_picker(&mut self) {
        if let Some(picker) = self.picker.take() {
            self.filter = picker.filter;
            self.load_selection(picker.selection());
        }
        self.view_mode = ViewMode::Normal;
    }

    /// Queue the picked files. An empty selection changes nothing.
    pub fn load_selection(&mut self, selection: Selection) {
        if selection.is_empty() || self.is_renaming() {
            return;
        }
        self.done.clear();
        self.extension_label = selection.filter.extension_label();
        if let Some(dir) = selection.source_dir() {
            self.dir_input = dir.display().to_string();
        }
        let count = selection.paths.len();
        self.pending.extend(selection.paths);
        self.total = self.pending.len();
        self.phase = Phase::FilesLoaded;
        self.status_message = Some(format!("Loaded {} file(s)", count));
    }

    /// Snapshot the pending list into a job. Refused while a job is running.
    pub fn begin_rename(&mut self) -> Option<RenameJob> {
        if self.is_renaming() {
            return None;
        }
        let job = RenameJob::new(self.pending.snapshot(), self.prefix_input.clone());
        self.total = job.len();
        self.completed = 0;
        self.failures.clear();
        self.phase = Phase::Renaming;
        self.status_message = Some(format!("Renaming {} file(s)...", job.len()));
        Some(job)
    }

    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::Progress { completed } => {
                self.completed = *completed;
            }
            Event::Renamed(entry) => {
                self.pending.pop_front();
                self.done.push(entry.to.clone());
            }
            Event::RenameFailed(failure) => {
                self.pending.pop_front();
                self.failures.push(failure.clone());
            }
            Event::Finished => {
                self.status_message = Some(if self.failures.is_empty() {
                    format!("Renamed {} file(s)", self.done.len())
                } else {
                    format!(
                        "Renamed {} of {} file(s), {} failed (press 'e' to view)",
                        self.done.len(),
                        self.total,
                        self.failures.len()
                    )
                });
                self.finish_run();
            }
            Event::Aborted(failure) => {
                self.failures.push(failure.clone());
                self.status_message = Some(format!(
                    "Aborted at file {}: {}",
                    failure.ordinal, failure.message
                ));
                self.completed = 0;
                self.finish_run();
            }
        }
    }

    fn finish_run(&mut self) {
        self.phase = if self.pending.is_empty() {
            Phase::Idle
        } else {
            Phase::FilesLoaded
        };
    }

    pub fn set_summary(&mut self, summary: RenameSummary) {
        self.last_summary = Some(summary);
    }

    /// Keep the summary of the run that just ended, including an aborted one.
    pub fn record_outcome(&mut self, outcome: Result<RenameSummary, RenameError>) {
        let summary = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!("Rename failed: {}", e);
                e.into_summary()
            }
        };
        self.set_summary(summary);
    }

    /// Share of the current job already processed, 0-100.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }

    /// Starting filter for the next pick. The extension label keeps describing the
    /// files already loaded until a new selection replaces it.
    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.status_message = Some(format!("Picker filter: {}", self.filter));
    }

    pub fn start_edit_directory(&mut self) {
        self.view_mode = ViewMode::EditDirectory;
    }

    pub fn start_edit_prefix(&mut self) {
        self.view_mode = ViewMode::EditPrefix;
    }

    pub fn push_char(&mut self, c: char) {
        match self.view_mode {
            ViewMode::EditDirectory => self.dir_input.push(c),
            ViewMode::EditPrefix => self.prefix_input.push(c),
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.view_mode {
            ViewMode::EditDirectory => {
                self.dir_input.pop();
            }
            ViewMode::EditPrefix => {
                self.prefix_input.pop();
            }
            _ => {}
        }
    }

    pub fn finish_edit(&mut self) {
        self.view_mode = ViewMode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.view_mode = if self.view_mode == ViewMode::Help {
            ViewMode::Normal
        } else {
            ViewMode::Help
        };
    }

    pub fn toggle_error_list(&mut self) {
        self.view_mode = if self.view_mode == ViewMode::ErrorList {
            ViewMode::Normal
        } else {
            ViewMode::ErrorList
        };
    }
}
