use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use seqrename::config::settings::{ErrorPolicy, Settings};
use seqrename::core::events::{create_event_channel, Event, EventReceiver};
use seqrename::core::filter::FileFilter;
use seqrename::core::picker::{self, Selection};
use seqrename::core::renamer::{self, target_path, Renamer};
use seqrename::error::RenameError;
use seqrename::export::json::export_json;
use seqrename::models::rename_job::RenameJob;
use seqrename::models::rename_result::{FailureKind, RenameSummary, RenamedEntry};
use seqrename::ui::app_state::{AppState, Phase, ViewMode};
use seqrename::ui::input::{handle_key_event, InputAction};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a unique temporary directory for a test.
fn make_test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("seqrename_test_{}", name));
    let _ = std::fs::remove_dir_all(&dir); // clean up from previous runs
    std::fs::create_dir_all(&dir).expect("create test dir");
    dir
}

/// Remove a temporary test directory.
fn cleanup(dir: &PathBuf) {
    let _ = std::fs::remove_dir_all(dir);
}

fn touch(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, name.as_bytes()).expect("write test file");
            path
        })
        .collect()
}

fn test_settings(policy: ErrorPolicy) -> Settings {
    Settings {
        error_policy: policy,
        ..Settings::default()
    }
    .without_delay()
}

/// Everything the worker sent, in order. The sender is gone once `run` returns.
fn drain(rx: &mut EventReceiver) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

async fn run_job(
    files: Vec<PathBuf>,
    prefix: &str,
    policy: ErrorPolicy,
) -> (Result<RenameSummary, RenameError>, Vec<Event>) {
    let (event_tx, mut event_rx) = create_event_channel();
    let renamer = Renamer::new(test_settings(policy), event_tx);
    let result = renamer.run(RenameJob::new(files, prefix)).await;
    drop(renamer);
    (result, drain(&mut event_rx))
}

// ---------------------------------------------------------------------------
// 1. test_rename_two_files – the basic scenario end to end
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_rename_two_files() {
    let dir = make_test_dir("two_files");
    let files = touch(&dir, &["a.png", "b.png"]);

    let (result, events) = run_job(files.clone(), "img_", ErrorPolicy::Skip).await;
    let summary = result.expect("rename should succeed");

    assert_eq!(
        events,
        vec![
            Event::Progress { completed: 1 },
            Event::Renamed(RenamedEntry {
                ordinal: 1,
                from: files[0].clone(),
                to: dir.join("img_1.png"),
            }),
            Event::Progress { completed: 2 },
            Event::Renamed(RenamedEntry {
                ordinal: 2,
                from: files[1].clone(),
                to: dir.join("img_2.png"),
            }),
            Event::Progress { completed: 0 },
            Event::Finished,
        ]
    );

    assert!(!files[0].exists());
    assert!(!files[1].exists());
    // Contents follow the rename
    assert_eq!(std::fs::read(dir.join("img_1.png")).unwrap(), b"a.png");
    assert_eq!(std::fs::read(dir.join("img_2.png")).unwrap(), b"b.png");

    assert_eq!(summary.total, 2);
    assert_eq!(summary.renamed.len(), 2);
    assert!(summary.failures.is_empty());
    assert!(summary.completed);

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 2. test_empty_prefix
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_empty_prefix() {
    let dir = make_test_dir("empty_prefix");
    let files = touch(&dir, &["x.txt"]);

    let (result, _) = run_job(files, "", ErrorPolicy::Skip).await;
    let summary = result.expect("rename should succeed");

    assert_eq!(summary.renamed[0].to, dir.join("1.txt"));
    assert!(dir.join("1.txt").exists());

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 3. test_empty_job – only the reset and finished events
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_empty_job() {
    let (result, events) = run_job(Vec::new(), "img_", ErrorPolicy::Skip).await;
    let summary = result.expect("empty job should succeed");

    assert_eq!(events, vec![Event::Progress { completed: 0 }, Event::Finished]);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.attempted(), 0);
}

// ---------------------------------------------------------------------------
// 4. test_event_counts – N progress + N renamed + reset + finished
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_event_counts() {
    let dir = make_test_dir("event_counts");
    let names: Vec<String> = (0..7).map(|i| format!("file_{}.dat", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let files = touch(&dir, &name_refs);

    let (result, events) = run_job(files, "n", ErrorPolicy::Skip).await;
    result.expect("rename should succeed");

    assert_eq!(events.len(), 7 * 2 + 2);

    let progress: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            Event::Progress { completed } => Some(*completed),
            _ => None,
        })
        .collect();
    assert_eq!(progress, vec![1, 2, 3, 4, 5, 6, 7, 0]);

    // Renamed events arrive in file order
    let ordinals: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            Event::Renamed(entry) => Some(entry.ordinal),
            _ => None,
        })
        .collect();
    assert_eq!(ordinals, (1..=7).collect::<Vec<_>>());

    assert_eq!(events.last(), Some(&Event::Finished));
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 5. test_extension_preserved – case, multi-dot, none, dot-files, trailing dot
// ---------------------------------------------------------------------------

#[test]
fn test_extension_preserved() {
    assert_eq!(
        target_path(Path::new("/photos/Holiday.JPG"), "p", 3),
        PathBuf::from("/photos/p3.JPG")
    );
    assert_eq!(
        target_path(Path::new("/data/archive.tar.gz"), "p", 1),
        PathBuf::from("/data/p1.gz")
    );
    assert_eq!(
        target_path(Path::new("/data/README"), "p", 2),
        PathBuf::from("/data/p2")
    );
    assert_eq!(
        target_path(Path::new("/home/u/.bashrc"), "p", 4),
        PathBuf::from("/home/u/p4")
    );
    // A trailing dot leaves an empty extension, which is dropped
    assert_eq!(
        target_path(Path::new("/data/a."), "p", 1),
        PathBuf::from("/data/p1")
    );
    assert_eq!(
        target_path(Path::new("notes.txt"), "", 10),
        PathBuf::from("10.txt")
    );
}

// ---------------------------------------------------------------------------
// 6. test_rerun_uses_current_filesystem – renaming is not idempotent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_rerun_uses_current_filesystem() {
    let dir = make_test_dir("rerun");
    let files = touch(&dir, &["a.txt", "b.txt"]);

    let (first, _) = run_job(files.clone(), "r", ErrorPolicy::Skip).await;
    assert_eq!(first.unwrap().renamed.len(), 2);

    // Same snapshot again: the originals are gone now
    let (second, events) = run_job(files, "r", ErrorPolicy::Skip).await;
    let second = second.expect("skip policy still finishes");
    assert!(second.renamed.is_empty());
    assert_eq!(second.failures.len(), 2);
    assert!(second.failures.iter().all(|f| f.kind == FailureKind::NotFound));
    assert_eq!(events.last(), Some(&Event::Finished));

    // Renaming the new names again with another prefix works on the current state
    let renamed = vec![dir.join("r1.txt"), dir.join("r2.txt")];
    let (third, _) = run_job(renamed, "s", ErrorPolicy::Skip).await;
    assert_eq!(third.unwrap().renamed.len(), 2);
    assert!(dir.join("s1.txt").exists());
    assert!(dir.join("s2.txt").exists());

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 7. test_skip_policy – a missing file is reported and skipped
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_skip_policy() {
    let dir = make_test_dir("skip_policy");
    let mut files = touch(&dir, &["one.png", "three.png"]);
    files.insert(1, dir.join("missing.png"));

    let (result, events) = run_job(files, "k", ErrorPolicy::Skip).await;
    let summary = result.expect("skip policy finishes");

    assert_eq!(summary.renamed.len(), 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].ordinal, 2);
    assert_eq!(summary.failures[0].kind, FailureKind::NotFound);

    // Ordinals are positional: the skipped file's number is not reused
    assert!(dir.join("k1.png").exists());
    assert!(!dir.join("k2.png").exists());
    assert!(dir.join("k3.png").exists());

    assert!(matches!(events[3], Event::RenameFailed(ref f) if f.ordinal == 2));
    assert_eq!(events[2], Event::Progress { completed: 2 });
    assert_eq!(events.last(), Some(&Event::Finished));

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 8. test_abort_policy – first failure ends the batch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_abort_policy() {
    let dir = make_test_dir("abort_policy");
    let mut files = touch(&dir, &["one.png", "three.png"]);
    files.insert(1, dir.join("missing.png"));

    let (result, events) = run_job(files.clone(), "k", ErrorPolicy::Abort).await;

    let summary = match result {
        Err(RenameError::Aborted { failure, summary }) => {
            assert_eq!(failure.ordinal, 2);
            summary
        }
        other => panic!("expected an aborted batch, got {:?}", other),
    };

    // The partial run is still summarized
    assert!(!summary.completed);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.renamed.len(), 1);
    assert_eq!(summary.renamed[0].to, dir.join("k1.png"));
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].kind, FailureKind::NotFound);

    // The first file stays renamed, the third is untouched
    assert!(dir.join("k1.png").exists());
    assert!(files[2].exists());
    assert!(!dir.join("k3.png").exists());

    assert_eq!(events.len(), 3);
    assert!(matches!(events.last(), Some(Event::Aborted(_))));
    assert!(!events.contains(&Event::Finished));

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 9. test_spawned_worker – runs on its own task, handle joins after Finished
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_spawned_worker() {
    let dir = make_test_dir("spawned_worker");
    let files = touch(&dir, &["a.gif", "b.gif", "c.gif"]);

    let (event_tx, mut event_rx) = create_event_channel();
    let handle = renamer::spawn(
        RenameJob::new(files, "g"),
        test_settings(ErrorPolicy::Skip),
        event_tx,
    );

    let mut received = Vec::new();
    while let Some(event) = event_rx.recv().await {
        let terminal = event.is_terminal();
        received.push(event);
        if terminal {
            break;
        }
    }
    let summary = handle.await.expect("join").expect("rename");

    assert_eq!(received.len(), 3 * 2 + 2);
    assert_eq!(summary.renamed.len(), 3);

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 10. test_file_filter
// ---------------------------------------------------------------------------

#[test]
fn test_file_filter() {
    assert!(FileFilter::Png.matches(Path::new("/a/b.png")));
    assert!(FileFilter::Png.matches(Path::new("/a/B.PNG")));
    assert!(!FileFilter::Png.matches(Path::new("/a/b.jpg")));
    assert!(!FileFilter::Jpg.matches(Path::new("/a/b.jpeg")));
    assert!(!FileFilter::Txt.matches(Path::new("/a/txt")));
    assert!(FileFilter::Any.matches(Path::new("script.py")));
    assert!(!FileFilter::Any.matches(Path::new("movie.mkv")));

    assert_eq!(FileFilter::Png.extension_label(), "*.png");
    assert_eq!(FileFilter::Jpeg.extension_label(), "*.jpeg");

    // Cycling visits every filter and wraps around
    let mut filter = FileFilter::Png;
    for _ in 0..FileFilter::ALL.len() {
        filter = filter.next();
    }
    assert_eq!(filter, FileFilter::Png);
}

// ---------------------------------------------------------------------------
// 11. test_picker_listing – regular files only, sorted by name
// ---------------------------------------------------------------------------

#[test]
fn test_picker_listing() {
    let dir = make_test_dir("picker_listing");
    touch(&dir, &["c.txt", "a.png", "b.png"]);
    std::fs::create_dir_all(dir.join("sub.png")).unwrap();

    let entries = picker::list_candidates(&dir).expect("list dir");
    let names: Vec<String> = entries
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.txt"]);

    assert!(picker::list_candidates(&dir.join("nope")).is_err());

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 12. test_start_dir – directory memory falls back to home, always absolute
// ---------------------------------------------------------------------------

#[test]
fn test_start_dir() {
    let home = std::fs::canonicalize(picker::home_dir()).expect("home dir");
    assert_eq!(picker::resolve_start_dir("").unwrap(), home);
    assert_eq!(picker::resolve_start_dir("   ").unwrap(), home);

    let dir = make_test_dir("start_dir");
    let text = format!("  {}  ", dir.display());
    assert_eq!(
        picker::resolve_start_dir(&text).unwrap(),
        std::fs::canonicalize(&dir).unwrap()
    );
    assert!(picker::resolve_start_dir(&dir.join("nope").display().to_string()).is_err());

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 12b. test_relative_start_dir – a relative directory lists absolute paths
// ---------------------------------------------------------------------------

#[test]
fn test_relative_start_dir() {
    // Integration tests run from the package root, where `tests` exists
    let dir = picker::resolve_start_dir("tests").expect("resolve relative dir");
    assert!(dir.is_absolute());
    assert!(dir.ends_with("tests"));

    let entries = picker::list_candidates(&dir).expect("list dir");
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|p| p.is_absolute()));

    let mut state = AppState::new(&Settings::default());
    state.load_selection(Selection {
        paths: entries,
        filter: FileFilter::Any,
    });
    assert!(PathBuf::from(&state.dir_input).is_absolute());
    assert!(state.pending.iter().all(|p| p.is_absolute()));
}

// ---------------------------------------------------------------------------
// 13. test_presenter_flow – load, rename, apply events, back to idle
// ---------------------------------------------------------------------------

#[test]
fn test_presenter_flow() {
    let mut state = AppState::new(&Settings::default());
    assert_eq!(state.phase, Phase::Idle);

    state.load_selection(Selection {
        paths: vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")],
        filter: FileFilter::Png,
    });
    assert_eq!(state.phase, Phase::FilesLoaded);
    assert_eq!(state.pending.len(), 2);
    assert_eq!(state.dir_input, "/tmp");
    assert_eq!(state.extension_label, "*.png");

    state.prefix_input = "img_".to_string();
    let job = state.begin_rename().expect("job");
    assert_eq!(job.prefix(), "img_");
    assert_eq!(job.files(), &[PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")]);
    assert_eq!(state.phase, Phase::Renaming);

    // Only one job at a time
    assert!(state.begin_rename().is_none());

    // The worker's snapshot is independent of the presenter's queue
    state.apply_event(&Event::Progress { completed: 1 });
    state.apply_event(&Event::Renamed(RenamedEntry {
        ordinal: 1,
        from: PathBuf::from("/tmp/a.png"),
        to: PathBuf::from("/tmp/img_1.png"),
    }));
    assert_eq!(state.pending.len(), 1);
    assert_eq!(job.len(), 2);
    assert_eq!(state.done, vec![PathBuf::from("/tmp/img_1.png")]);
    assert!((state.percentage() - 50.0).abs() < f64::EPSILON);

    state.apply_event(&Event::Progress { completed: 2 });
    state.apply_event(&Event::Renamed(RenamedEntry {
        ordinal: 2,
        from: PathBuf::from("/tmp/b.png"),
        to: PathBuf::from("/tmp/img_2.png"),
    }));
    assert!((state.percentage() - 100.0).abs() < f64::EPSILON);

    state.apply_event(&Event::Progress { completed: 0 });
    assert_eq!(state.percentage(), 0.0);

    state.apply_event(&Event::Finished);
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.pending.is_empty());
    assert_eq!(state.done.len(), 2);
    assert!(state.begin_rename().is_some());
}

// ---------------------------------------------------------------------------
// 14. test_presenter_empty_selection – no-op
// ---------------------------------------------------------------------------

#[test]
fn test_presenter_empty_selection() {
    let mut state = AppState::new(&Settings::default());
    state.dir_input = "/keep".to_string();

    state.load_selection(Selection {
        paths: vec![],
        filter: FileFilter::Gif,
    });

    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.dir_input, "/keep");
    assert_eq!(state.extension_label, "*.png");
    assert!(state.pending.is_empty());
}

// ---------------------------------------------------------------------------
// 15. test_presenter_abort – remaining files stay pending
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_presenter_abort() {
    let dir = make_test_dir("presenter_abort");
    let mut files = touch(&dir, &["one.txt", "three.txt"]);
    files.insert(1, dir.join("missing.txt"));

    let mut state = AppState::new(&Settings::default());
    state.load_selection(Selection {
        paths: files,
        filter: FileFilter::Txt,
    });
    let job = state.begin_rename().expect("job");

    // A summary left over from an earlier run
    let (earlier, _) = run_job(Vec::new(), "OLD", ErrorPolicy::Skip).await;
    state.set_summary(earlier.expect("empty job"));

    let (event_tx, mut event_rx) = create_event_channel();
    let renamer = Renamer::new(test_settings(ErrorPolicy::Abort), event_tx);
    let outcome = renamer.run(job).await;
    assert!(outcome.is_err());
    drop(renamer);

    for event in drain(&mut event_rx) {
        state.apply_event(&event);
    }
    state.record_outcome(outcome);

    // Export now writes the aborted run, not the earlier one
    let summary = state.last_summary.as_ref().expect("summary");
    assert_eq!(summary.prefix, "");
    assert!(!summary.completed);
    assert_eq!(summary.renamed.len(), 1);

    assert_eq!(state.phase, Phase::FilesLoaded);
    assert_eq!(state.done.len(), 1);
    assert_eq!(state.failures.len(), 1);
    // The failed file and everything after it are still queued
    assert_eq!(state.pending.len(), 2);

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 16. test_picker_state – marking and filtering
// ---------------------------------------------------------------------------

#[test]
fn test_picker_state() {
    let mut state = AppState::new(&Settings::default());
    state.open_picker(
        PathBuf::from("/pics"),
        vec![
            PathBuf::from("/pics/a.png"),
            PathBuf::from("/pics/b.jpg"),
            PathBuf::from("/pics/c.png"),
        ],
    );
    assert_eq!(state.view_mode, ViewMode::Picker);

    let picker = state.picker.as_mut().unwrap();
    assert_eq!(picker.visible(), vec![0, 2]);
    picker.toggle_all();
    assert_eq!(picker.marked_count(), 2);
    picker.toggle_all();
    assert_eq!(picker.marked_count(), 0);

    picker.move_down();
    picker.toggle_current();

    state.confirm_picker();
    assert_eq!(state.view_mode, ViewMode::Normal);
    assert!(state.picker.is_none());
    assert_eq!(state.pending.snapshot(), vec![PathBuf::from("/pics/c.png")]);
    assert_eq!(state.dir_input, "/pics");
}

// ---------------------------------------------------------------------------
// 17. test_key_handling – prefix editing and actions
// ---------------------------------------------------------------------------

#[test]
fn test_key_handling() {
    let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
    let mut state = AppState::new(&Settings::default());

    assert_eq!(handle_key_event(key(KeyCode::Char('p')), &mut state), InputAction::None);
    assert_eq!(state.view_mode, ViewMode::EditPrefix);
    for c in "img_x".chars() {
        handle_key_event(key(KeyCode::Char(c)), &mut state);
    }
    handle_key_event(key(KeyCode::Backspace), &mut state);
    handle_key_event(key(KeyCode::Enter), &mut state);
    assert_eq!(state.prefix_input, "img_");
    assert_eq!(state.view_mode, ViewMode::Normal);

    assert_eq!(handle_key_event(key(KeyCode::Char('o')), &mut state), InputAction::OpenPicker);
    assert_eq!(handle_key_event(key(KeyCode::Char('r')), &mut state), InputAction::Rename);

    // Loading and renaming are blocked while a job runs
    state.begin_rename();
    assert_eq!(handle_key_event(key(KeyCode::Char('o')), &mut state), InputAction::None);
    assert_eq!(handle_key_event(key(KeyCode::Char('r')), &mut state), InputAction::None);

    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(handle_key_event(ctrl_c, &mut state), InputAction::Quit);
    assert!(state.should_quit);

    // `f` picks the next starting filter without relabelling the loaded files
    let mut state = AppState::new(&Settings::default());
    state.load_selection(Selection {
        paths: vec![PathBuf::from("/tmp/a.png")],
        filter: FileFilter::Png,
    });
    assert_eq!(handle_key_event(key(KeyCode::Char('f')), &mut state), InputAction::None);
    assert_eq!(state.filter, FileFilter::Jpeg);
    assert_eq!(state.extension_label, "*.png");

    // The picker opens with the new filter; confirming relabels
    state.open_picker(
        PathBuf::from("/pics"),
        vec![PathBuf::from("/pics/a.jpeg"), PathBuf::from("/pics/b.png")],
    );
    state.picker.as_mut().unwrap().toggle_all();
    state.confirm_picker();
    assert_eq!(state.extension_label, "*.jpeg");
    assert_eq!(state.pending.len(), 2);
}

// ---------------------------------------------------------------------------
// 18. test_export_json – report round-trip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_export_json() {
    let dir = make_test_dir("export_json");
    let files = touch(&dir, &["a.txt"]);
    let (result, _) = run_job(files, "e", ErrorPolicy::Skip).await;
    let summary = result.expect("rename");

    let out_path = dir.join("report.json");
    export_json(&summary, &out_path).expect("export should succeed");

    let json_bytes = std::fs::read(&out_path).expect("read exported file");
    let restored: RenameSummary = serde_json::from_slice(&json_bytes).expect("deserialize");

    assert_eq!(restored.prefix, "e");
    assert_eq!(restored.total, 1);
    assert_eq!(restored.renamed, summary.renamed);

    cleanup(&dir);
}

// ---------------------------------------------------------------------------
// 19. test_settings_default
// ---------------------------------------------------------------------------

#[test]
fn test_settings_default() {
    let s = Settings::default();

    assert_eq!(s.delay_ms, 100);
    assert_eq!(s.error_policy, ErrorPolicy::Skip);
    assert!(s.start_dir.is_none());
    assert_eq!(s.filter, FileFilter::Png);
    assert_eq!(s.without_delay().delay_ms, 0);
}
