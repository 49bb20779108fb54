// CSV export: a static two-column summary of the current session.
//
// The export names the timestamp and the active tab. It is a fixed
// template, not a dump of the fetched data.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::protocol::AnalysisTab;

/// File name for the export of `tab`. Re-exporting the same tab
/// overwrites the previous file.
pub fn export_file_name(tab: AnalysisTab) -> String {
    format!("tuberank_export_{}.csv", tab.slug())
}

/// Write the two-column summary for `tab` into `dir`, creating the
/// directory if needed. Returns the path of the written file.
pub fn write_summary(dir: &Path, tab: AnalysisTab) -> anyhow::Result<PathBuf> {
    write_summary_at(dir, tab, Utc::now())
}

/// Like `write_summary`, but with an explicit timestamp so tests can pin
/// the file contents.
pub fn write_summary_at(
    dir: &Path,
    tab: AnalysisTab,
    exported_at: DateTime<Utc>,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(export_file_name(tab));

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let stamp = exported_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    writer.write_record(["Metric", "Value"])?;
    writer.write_record(["Export Date", stamp.as_str()])?;
    writer.write_record(["Module", tab.slug()])?;
    writer.flush()?;

    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
