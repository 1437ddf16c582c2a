use std::time::Duration;

use crossterm::event::Event;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::config::settings::Settings;
use crate::core::events::{self, EventReceiver, EventSender};
use crate::core::picker;
use crate::core::renamer::{self, RenameHandle};
use crate::ui::app_state::AppState;
use crate::ui::input::{self, InputAction};
use crate::ui::renderer;

pub struct App {
    state: AppState,
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(&settings),
            settings,
        }
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.state.prefix_input = prefix;
        self
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Initialize terminal
        terminal::enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // One channel for the whole session; every job gets a clone of the sender.
        let (event_tx, event_rx) = events::create_event_channel();
        let mut worker: Option<RenameHandle> = None;

        let result = self
            .event_loop(&mut terminal, event_tx, event_rx, &mut worker)
            .await;

        // Restore terminal
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        // Renames cannot be cancelled; let a running batch finish before exiting.
        if let Some(handle) = worker.take() {
            println!("Waiting for the running batch to finish...");
            match handle.await {
                Ok(Ok(summary)) => println!(
                    "Renamed {} of {} file(s)",
                    summary.renamed.len(),
                    summary.total
                ),
                Ok(Err(e)) => tracing::error!("Rename failed: {}", e),
                Err(e) => tracing::error!("Rename task panicked: {}", e),
            }
        }

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
        event_tx: EventSender,
        mut event_rx: EventReceiver,
        worker: &mut Option<RenameHandle>,
    ) -> anyhow::Result<()> {
        // Spawn a dedicated blocking thread for terminal input.
        // This sends crossterm events to the async world via an unbounded channel.
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<Event>();
        let _input_thread = tokio::task::spawn_blocking(move || {
            loop {
                match input::poll_event(Duration::from_millis(50)) {
                    Ok(Some(event)) => {
                        if input_tx.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(_) => break,
                }
            }
        });

        loop {
            terminal.draw(|frame| {
                renderer::render(frame, &self.state);
            })?;

            tokio::select! {
                // Terminal input events
                input_event = input_rx.recv() => {
                    match input_event {
                        Some(Event::Key(key)) => {
                            let action = input::handle_key_event(key, &mut self.state);
                            match action {
                                InputAction::Quit => return Ok(()),
                                InputAction::OpenPicker => self.handle_open_picker(),
                                InputAction::Rename => self.handle_rename(&event_tx, worker),
                                InputAction::Export => self.handle_export(),
                                InputAction::None => {}
                            }
                        }
                        Some(Event::Resize(_, _)) => {
                            // Terminal resized; next loop iteration will re-render
                        }
                        Some(_) => {}
                        None => return Ok(()),
                    }
                }
                // Worker events
                worker_event = event_rx.recv() => {
                    // The loop holds a sender, so the channel never closes here
                    if let Some(event) = worker_event {
                        self.state.apply_event(&event);
                        if event.is_terminal() {
                            self.collect_worker(worker).await;
                        }
                    }
                }
            }

            if self.state.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_open_picker(&mut self) {
        let listing = picker::resolve_start_dir(&self.state.dir_input)
            .and_then(|dir| picker::list_candidates(&dir).map(|entries| (dir, entries)));
        match listing {
            Ok((dir, entries)) => self.state.open_picker(dir, entries),
            Err(e) => {
                let dir = self.state.dir_input.trim();
                tracing::warn!("Cannot list {:?}: {}", dir, e);
                self.state.status_message = Some(format!("Cannot open {:?}: {}", dir, e));
            }
        }
    }

    fn handle_rename(&mut self, event_tx: &EventSender, worker: &mut Option<RenameHandle>) {
        if worker.is_some() {
            return;
        }
        if let Some(job) = self.state.begin_rename() {
            *worker = Some(renamer::spawn(job, self.settings.clone(), event_tx.clone()));
        }
    }

    /// Join the worker after its terminal event and keep the summary for export.
    async fn collect_worker(&mut self, worker: &mut Option<RenameHandle>) {
        let Some(handle) = worker.take() else {
            return;
        };
        match handle.await {
            Ok(outcome) => self.state.record_outcome(outcome),
            Err(e) => tracing::error!("Rename task panicked: {}", e),
        }
    }

    fn handle_export(&mut self) {
        let Some(ref summary) = self.state.last_summary else {
            self.state.status_message = Some("Nothing to export yet".to_string());
            return;
        };
        let path = crate::export::json::default_report_path();
        if let Err(e) = crate::export::json::export_json(summary, &path) {
            tracing::error!("Export failed: {}", e);
            self.state.status_message = Some(format!("Export failed: {}", e));
        } else {
            tracing::info!("Exported to: {}", path.display());
            self.state.status_message = Some(format!("Exported to {}", path.display()));
        }
    }
}
