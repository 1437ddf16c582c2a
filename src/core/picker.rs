use std::path::{Path, PathBuf};

use super::filter::FileFilter;

/// Result of a confirmed pick: the chosen paths and the filter that was active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub paths: Vec<PathBuf>,
    pub filter: FileFilter,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Directory of the first selected file, remembered for the next pick.
    pub fn source_dir(&self) -> Option<PathBuf> {
        self.paths
            .first()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
    }
}

pub fn home_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|ud| ud.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Starting directory for the picker: the remembered directory text, or home when empty.
///
/// The result is canonical, so every listed candidate is an absolute path.
pub fn resolve_start_dir(dir_text: &str) -> std::io::Result<PathBuf> {
    let trimmed = dir_text.trim();
    let dir = if trimmed.is_empty() {
        home_dir()
    } else {
        PathBuf::from(trimmed)
    };
    std::fs::canonicalize(dir)
}

/// Regular files directly inside `dir`, sorted by name. Subdirectories are not entered.
pub fn list_candidates(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // Follow symlinks so a link to a file is offered like the file itself
        match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => files.push(entry.path()),
            Ok(_) => {}
            Err(e) => tracing::debug!("Skipping {}: {}", entry.path().display(), e),
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
