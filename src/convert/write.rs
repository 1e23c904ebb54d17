use anyhow::{bail, Context, Result};
use std::{io::Write, path::Path};
use tempfile::Builder;
use tracing::debug;

use super::types::ScriptureSets;

/// Pretty-print with two-space indentation. Non-ASCII text is kept literal.
pub fn to_json_string(sets: &ScriptureSets) -> Result<String> {
    serde_json::to_string_pretty(sets).context("serializing scripture sets to JSON")
}

/// Write `sets` to `path` as pretty JSON with a trailing newline.
///
/// The document is rendered in full first, written to a uniquely named hidden
/// temp file in the destination directory, then persisted over `path`, so
/// readers never see a half-written file and concurrent writers never share a
/// temp file.
#[tracing::instrument(level = "debug", skip(sets, path), fields(dst = %path.as_ref().display()))]
pub fn write_scripture_sets<P: AsRef<Path>>(sets: &ScriptureSets, path: P) -> Result<()> {
    let path = path.as_ref();
    if path.file_name().is_none() {
        bail!("output path has no file name: {}", path.display());
    }
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // 1) render the whole document up front
    let mut text = to_json_string(sets)?;
    text.push('\n');

    // 2) write a sibling temp file, then rename it over the destination
    let mut tmp = Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(text.as_bytes())
        .with_context(|| format!("writing {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("persisting {}", path.display()))?;

    debug!(bytes = text.len(), "wrote JSON");
    Ok(())
}
