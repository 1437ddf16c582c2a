use std::path::PathBuf;

use clap::Parser;

use seqrename::config::settings::{ErrorPolicy, Settings};
use seqrename::core::events::{self, Event};
use seqrename::core::filter::FileFilter;
use seqrename::models::rename_job::RenameJob;

#[derive(Parser, Debug)]
#[command(name = "seqrename", version, about = "Rename files as prefix + sequence number")]
struct Cli {
    /// Files to rename right away (non-interactive mode). Without files the TUI starts.
    files: Vec<PathBuf>,

    /// Filename prefix
    #[arg(short = 'p', long, default_value = "")]
    prefix: String,

    /// Initial source directory for the file picker
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Initial file type filter for the file picker
    #[arg(short = 'f', long, value_enum)]
    filter: Option<FileFilter>,

    /// Pause between renames in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Stop at the first failed rename instead of skipping it
    #[arg(long)]
    abort_on_error: bool,

    /// Write the run summary as JSON to this file (non-interactive mode)
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (logs to stderr)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Build settings
    let mut settings = Settings::default();
    if let Some(delay) = cli.delay_ms {
        settings.delay_ms = delay;
    }
    if let Some(filter) = cli.filter {
        settings.filter = filter;
    }
    if cli.abort_on_error {
        settings.error_policy = ErrorPolicy::Abort;
    }
    settings.start_dir = cli.dir;

    // Non-interactive mode: rename the given files and print each step
    if !cli.files.is_empty() {
        // Nothing to watch in a terminal, so no pacing unless asked for
        if cli.delay_ms.is_none() {
            settings.delay_ms = 0;
        }
        let total = cli.files.len();
        let job = RenameJob::new(cli.files, cli.prefix);
        let (event_tx, mut event_rx) = events::create_event_channel();
        let handle = seqrename::core::renamer::spawn(job, settings, event_tx);

        let mut completed = 0;
        while let Some(event) = event_rx.recv().await {
            match event {
                Event::Progress { completed: n } => completed = n,
                Event::Renamed(entry) => println!(
                    "[{:>3}%] {} -> {}",
                    completed * 100 / total,
                    entry.from.display(),
                    entry.to.display()
                ),
                Event::RenameFailed(failure) => println!(
                    "[{:>3}%] {} failed: {}",
                    completed * 100 / total,
                    failure.path.display(),
                    failure.message
                ),
                Event::Aborted(failure) => println!(
                    "Aborted at {}: {}",
                    failure.path.display(),
                    failure.message
                ),
                Event::Finished => println!("Finished"),
            }
        }

        let outcome = handle.await?;
        // An aborted batch still gets its report, then fails the process
        let summary = match &outcome {
            Ok(summary) => summary,
            Err(e) => e.summary(),
        };
        if let Some(ref report_path) = cli.report {
            seqrename::export::json::export_json(summary, report_path)?;
            println!("Report written to: {}", report_path.display());
        }
        outcome?;
        return Ok(());
    }

    // Interactive mode: launch TUI
    let mut app = seqrename::app::App::new(settings).with_prefix(cli.prefix);
    app.run().await
}
