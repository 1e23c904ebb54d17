// src/convert/builder.rs

use tracing::{debug, info, warn};

use super::record::{clean_description, Record};
use super::types::{Entry, ScriptureSets, ENTRIES_KEY};

/// How a single row was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Blank,
    Category,
    Subcategory,
    Entry,
    /// Matched no rule (e.g. only column D populated).
    Ignored,
}

/// Counters gathered while building; rows dropped for lack of a category are
/// counted here rather than failing the conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub records: usize,
    pub blank_rows: usize,
    pub categories: usize,
    pub subcategories: usize,
    pub entries: usize,
    pub ignored_rows: usize,
    pub orphan_subcategories: usize,
    pub orphan_entries: usize,
}

/// Single-pass accumulator: the output tree plus the category/subcategory cursor.
#[derive(Debug, Default)]
pub struct ScriptureSetBuilder {
    sets: ScriptureSets,
    current_category: Option<String>,
    current_subcategory: Option<String>,
    stats: ConversionStats,
}

impl ScriptureSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn current_subcategory(&self) -> Option<&str> {
        self.current_subcategory.as_deref()
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    /// The tree as built so far.
    pub fn sets(&self) -> &ScriptureSets {
        &self.sets
    }

    /// Classify `record` and apply it. Only the first matching rule fires:
    /// blank, category (A), subcategory (B without C), entry (C).
    pub fn push(&mut self, record: &Record) -> RowKind {
        self.stats.records += 1;

        if record.is_blank() {
            self.stats.blank_rows += 1;
            return RowKind::Blank;
        }

        let category = record.category.trim();
        let subcategory = record.subcategory.trim();
        let reference = record.reference.trim();

        if !category.is_empty() {
            // B/C/D on a category row are discarded
            if self.sets.get(category).is_none() {
                self.stats.categories += 1;
            }
            self.sets.category_mut(category);
            self.current_category = Some(category.to_string());
            self.current_subcategory = None;
            debug!(category, "category");
            return RowKind::Category;
        }

        if !subcategory.is_empty() && reference.is_empty() {
            self.current_subcategory = Some(subcategory.to_string());
            match self
                .current_category
                .as_deref()
                .and_then(|c| self.sets.get_mut(c))
            {
                Some(cat) => {
                    if !cat.contains_key(subcategory) {
                        cat.insert(subcategory.to_string(), Vec::new());
                        self.stats.subcategories += 1;
                    }
                    debug!(subcategory, "subcategory");
                }
                None => {
                    self.stats.orphan_subcategories += 1;
                    warn!(
                        row = self.stats.records,
                        subcategory, "subcategory before any category; ignored"
                    );
                }
            }
            return RowKind::Subcategory;
        }

        if !reference.is_empty() {
            let entry = Entry {
                reference: reference.to_string(),
                description: clean_description(&record.description),
            };

            let Some(cat) = self
                .current_category
                .as_deref()
                .and_then(|c| self.sets.get_mut(c))
            else {
                self.stats.orphan_entries += 1;
                warn!(
                    row = self.stats.records,
                    reference, "entry before any category; dropped"
                );
                return RowKind::Entry;
            };

            let key = self.current_subcategory.as_deref().unwrap_or(ENTRIES_KEY);
            cat.entry(key.to_string()).or_default().push(entry);
            self.stats.entries += 1;
            return RowKind::Entry;
        }

        self.stats.ignored_rows += 1;
        debug!(row = self.stats.records, "row matched no rule");
        RowKind::Ignored
    }

    /// Consume the builder, returning the finished tree.
    pub fn finish(self) -> ScriptureSets {
        let s = &self.stats;
        info!(
            records = s.records,
            categories = s.categories,
            subcategories = s.subcategories,
            entries = s.entries,
            dropped = s.orphan_entries,
            "built scripture sets"
        );
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(rows: &[(&str, &str, &str, &str)]) -> ScriptureSetBuilder {
        let mut b = ScriptureSetBuilder::new();
        for (a, bb, c, d) in rows {
            b.push(&Record::new(*a, *bb, *c, *d));
        }
        b
    }

    #[test]
    fn worked_example() {
        let sets = build(&[
            ("Faith", "", "", ""),
            ("", "", "John 3:16", "\"For God so loved...\""),
            ("", "Promises", "", ""),
            ("", "", "Rom 8:28", "All things work together"),
        ])
        .finish();

        let expected = serde_json::json!({
            "Faith": {
                "entries": [
                    {"reference": "John 3:16", "description": "For God so loved..."}
                ],
                "Promises": [
                    {"reference": "Rom 8:28", "description": "All things work together"}
                ]
            }
        });
        assert_eq!(serde_json::to_value(&sets).unwrap(), expected);

        let faith = sets.get("Faith").unwrap();
        assert_eq!(
            faith.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["entries", "Promises"]
        );
    }

    #[test]
    fn blank_row_changes_nothing() {
        let mut b = build(&[("Faith", "", "", ""), ("", "Promises", "", "")]);
        let before = b.sets().clone();

        assert_eq!(b.push(&Record::new("  ", "", "\t", " ")), RowKind::Blank);
        assert_eq!(b.sets(), &before);
        assert_eq!(b.current_category(), Some("Faith"));
        assert_eq!(b.current_subcategory(), Some("Promises"));
    }

    #[test]
    fn category_row_resets_subcategory_and_discards_columns() {
        let mut b = build(&[("Faith", "", "", ""), ("", "Promises", "", "")]);

        let kind = b.push(&Record::new("Hope", "Sub", "Ps 42:5", "why so downcast"));
        assert_eq!(kind, RowKind::Category);
        assert_eq!(b.current_category(), Some("Hope"));
        assert_eq!(b.current_subcategory(), None);
        assert!(b.sets().get("Hope").unwrap().is_empty());
        assert_eq!(b.sets().entry_count(), 0);
    }

    #[test]
    fn non_contiguous_category_merges() {
        let sets = build(&[
            ("Faith", "", "", ""),
            ("", "", "Heb 11:1", "assurance"),
            ("Love", "", "", ""),
            ("", "", "1 Cor 13:4", "patient"),
            ("Faith", "", "", ""),
            ("", "Works", "", ""),
            ("", "", "Jas 2:17", "dead"),
        ])
        .finish();

        assert_eq!(sets.category_names().collect::<Vec<_>>(), vec!["Faith", "Love"]);
        let faith = sets.get("Faith").unwrap();
        assert_eq!(faith[ENTRIES_KEY].len(), 1);
        assert_eq!(faith["Works"][0].reference, "Jas 2:17");
    }

    #[test]
    fn subcategory_reused_under_same_category() {
        let sets = build(&[
            ("Faith", "", "", ""),
            ("", "Promises", "", ""),
            ("", "", "Rom 8:28", ""),
            ("", "Commands", "", ""),
            ("", "Promises", "ignored", ""),
            ("", "Promises", "", "D is irrelevant"),
            ("", "", "Phil 4:19", ""),
        ])
        .finish();

        let faith = sets.get("Faith").unwrap();
        assert_eq!(faith.len(), 2);
        let refs: Vec<_> = faith["Promises"].iter().map(|e| e.reference.as_str()).collect();
        assert_eq!(refs, vec!["Rom 8:28", "Phil 4:19"]);
        // B and C both set: an entry row, appended under the active subcategory
        assert_eq!(faith["Commands"][0].reference, "ignored");
    }

    #[test]
    fn entry_before_category_is_dropped() {
        let mut b = ScriptureSetBuilder::new();
        assert_eq!(b.push(&Record::new("", "", "John 1:1", "Word")), RowKind::Entry);
        assert_eq!(b.stats().orphan_entries, 1);
        assert_eq!(b.stats().entries, 0);
        assert!(b.finish().is_empty());
    }

    #[test]
    fn subcategory_before_category_is_absorbed() {
        let mut b = ScriptureSetBuilder::new();
        assert_eq!(
            b.push(&Record::new("", "Promises", "", "")),
            RowKind::Subcategory
        );
        assert_eq!(b.stats().orphan_subcategories, 1);
        assert!(b.sets().is_empty());

        b.push(&Record::new("Faith", "", "", ""));
        b.push(&Record::new("", "", "Heb 11:6", ""));
        let sets = b.finish();
        assert_eq!(
            sets.get("Faith").unwrap().keys().collect::<Vec<_>>(),
            vec![ENTRIES_KEY]
        );
    }

    #[test]
    fn description_only_row_is_ignored() {
        let mut b = build(&[("Faith", "", "", "")]);
        assert_eq!(b.push(&Record::new("", "", "", "stray")), RowKind::Ignored);
        assert_eq!(b.stats().ignored_rows, 1);
        assert!(b.sets().get("Faith").unwrap().is_empty());
    }

    #[test]
    fn fields_are_trimmed() {
        let sets = build(&[
            ("  Faith ", "", "", ""),
            ("", " Promises\t", "", ""),
            ("", "", "  Rom 8:28 ", "   "),
        ])
        .finish();

        let entry = &sets.get("Faith").unwrap()["Promises"][0];
        assert_eq!(entry.reference, "Rom 8:28");
        assert_eq!(entry.description, "");
    }

    #[test]
    fn stats_track_rows() {
        let b = build(&[
            ("", "", "Gen 1:1", ""),
            ("Faith", "", "", ""),
            ("", "", "", ""),
            ("", "Promises", "", ""),
            ("", "", "Rom 8:28", ""),
            ("Faith", "", "", ""),
        ]);
        assert_eq!(
            *b.stats(),
            ConversionStats {
                records: 6,
                blank_rows: 1,
                categories: 1,
                subcategories: 1,
                entries: 1,
                ignored_rows: 0,
                orphan_subcategories: 0,
                orphan_entries: 1,
            }
        );
    }
}
