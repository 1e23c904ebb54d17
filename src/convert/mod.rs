// src/convert/mod.rs
pub mod builder;
pub mod record;
pub mod types;
pub mod write;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::info;

pub use builder::{ConversionStats, RowKind, ScriptureSetBuilder};
pub use record::{clean_description, Record};
pub use types::{Category, Entry, ScriptureSets, ENTRIES_KEY};
pub use write::{to_json_string, write_scripture_sets};

/// Parse tab-delimited records from `reader` into a [`ScriptureSets`] tree.
///
/// No header row is expected and rows may carry any number of fields;
/// quoting follows the usual CSV rules.
pub fn read_records<R: Read>(reader: R) -> Result<ScriptureSets> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut builder = ScriptureSetBuilder::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        builder.push(&Record::from_csv(&record));
    }

    Ok(builder.finish())
}

/// Open `csv_path` and build the tree from it.
#[tracing::instrument(level = "info", skip(csv_path), fields(path = %csv_path.as_ref().display()))]
pub fn load_scripture_sets<P: AsRef<Path>>(csv_path: P) -> Result<ScriptureSets> {
    let csv_path = csv_path.as_ref();
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;
    read_records(file).with_context(|| format!("Failed to read {}", csv_path.display()))
}

/// Convert `csv_path` into JSON at `json_path`, returning the tree as well so
/// callers can both persist and inspect the result.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_path: P,
    json_path: Q,
) -> Result<ScriptureSets> {
    let sets = load_scripture_sets(&csv_path)?;
    write_scripture_sets(&sets, &json_path)?;
    info!(
        src = %csv_path.as_ref().display(),
        dst = %json_path.as_ref().display(),
        categories = sets.len(),
        entries = sets.entry_count(),
        "converted"
    );
    Ok(sets)
}
