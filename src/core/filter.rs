use std::path::Path;

use serde::{Deserialize, Serialize};

/// File type filters offered by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum FileFilter {
    Png,
    Jpeg,
    Jpg,
    Gif,
    Txt,
    Py,
    /// Any of the recognized types.
    Any,
}

impl FileFilter {
    pub const ALL: [FileFilter; 7] = [
        FileFilter::Png,
        FileFilter::Jpeg,
        FileFilter::Jpg,
        FileFilter::Gif,
        FileFilter::Txt,
        FileFilter::Py,
        FileFilter::Any,
    ];

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileFilter::Png => &["png"],
            FileFilter::Jpeg => &["jpeg"],
            FileFilter::Jpg => &["jpg"],
            FileFilter::Gif => &["gif"],
            FileFilter::Txt => &["txt"],
            FileFilter::Py => &["py"],
            FileFilter::Any => &["png", "jpeg", "jpg", "gif", "txt", "py"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FileFilter::Png => "PNG Files",
            FileFilter::Jpeg => "JPEG Files",
            FileFilter::Jpg => "JPG Files",
            FileFilter::Gif => "GIF Files",
            FileFilter::Txt => "Text Files",
            FileFilter::Py => "Python Files",
            FileFilter::Any => "Supported Files",
        }
    }

    /// Glob-style label shown next to the prefix, e.g. `*.png`.
    pub fn extension_label(self) -> String {
        self.extensions()
            .iter()
            .map(|ext| format!("*.{}", ext))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn matches(self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions()
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for FileFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.extension_label())
    }
}
