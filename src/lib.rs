pub mod convert;

pub use convert::{
    clean_description, convert_file, load_scripture_sets, read_records, to_json_string,
    write_scripture_sets, Category, ConversionStats, Entry, Record, RowKind, ScriptureSetBuilder,
    ScriptureSets, ENTRIES_KEY,
};
