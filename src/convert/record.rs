use csv::StringRecord;

/// Strip any run of whitespace or `"` characters from both ends.
pub fn clean_description(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '"')
        .to_string()
}

/// One input row, reduced to its four positional columns (A..D).
///
/// Fields are kept raw; classification trims them on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub category: String,
    pub subcategory: String,
    pub reference: String,
    pub description: String,
}

impl Record {
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
        reference: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            reference: reference.into(),
            description: description.into(),
        }
    }

    /// Missing trailing columns become empty strings; extra columns are ignored.
    pub fn from_csv(record: &StringRecord) -> Self {
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        Self {
            category: field(0),
            subcategory: field(1),
            reference: field(2),
            description: field(3),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.category.trim().is_empty()
            && self.subcategory.trim().is_empty()
            && self.reference.trim().is_empty()
            && self.description.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_quotes_and_spaces() {
        assert_eq!(
            clean_description("  \"The Lord is my shepherd\"  "),
            "The Lord is my shepherd"
        );
        assert_eq!(clean_description("\"\"\"nested\"\""), "nested");
        assert_eq!(clean_description("   "), "");
        assert_eq!(clean_description("\" \" \""), "");
    }

    #[test]
    fn clean_keeps_inner_quotes() {
        assert_eq!(
            clean_description("\"He said \"peace\" to them\""),
            "He said \"peace\" to them"
        );
    }

    #[test]
    fn clean_is_idempotent() {
        for raw in ["\" Ps 23 \"", "plain", "  \"\tmixed\n\"", "", "Él es fiel\""] {
            let once = clean_description(raw);
            assert_eq!(clean_description(&once), once);
        }
    }

    #[test]
    fn from_csv_pads_short_rows() {
        let short = StringRecord::from(vec!["Faith"]);
        assert_eq!(Record::from_csv(&short), Record::new("Faith", "", "", ""));

        let long = StringRecord::from(vec!["", "", "John 3:16", "desc", "extra"]);
        assert_eq!(
            Record::from_csv(&long),
            Record::new("", "", "John 3:16", "desc")
        );
    }

    #[test]
    fn whitespace_only_row_is_blank() {
        assert!(Record::new(" ", "\t", "", "  ").is_blank());
        assert!(Record::default().is_blank());
        assert!(!Record::new("", "", "", "only a description").is_blank());
    }
}
