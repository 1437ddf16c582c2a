use std::path::{Path, PathBuf};

use crate::models::rename_result::RenameSummary;

pub fn export_json(summary: &RenameSummary, output_path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// Timestamped report name used by the interactive export.
pub fn default_report_path() -> PathBuf {
    PathBuf::from(format!(
        "seqrename_report_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}
