//! Header signatures and header-line location.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use consolidator_model::DetectedHeader;

use crate::error::{IngestError, Result};

use super::record_reader;

/// Leading columns of the default export schema.
pub const DEFAULT_HEADER_SIGNATURE: [&str; 3] = ["ID", "Timestamp", "Transaction Type"];

/// Leading column names that identify the real header line of a file.
///
/// Matching is case-sensitive and compares the first `len()` fields of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSignature {
    columns: Vec<String>,
}

impl HeaderSignature {
    /// Creates a signature. Names are trimmed; at least one must remain and
    /// none may be blank.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = columns
            .into_iter()
            .map(|name| normalize_header(name.as_ref()))
            .collect();
        if columns.is_empty() || columns.iter().any(String::is_empty) {
            return Err(IngestError::EmptySignature);
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns true if `fields` starts with this signature.
    pub fn matches(&self, fields: &[String]) -> bool {
        fields.len() >= self.columns.len()
            && self
                .columns
                .iter()
                .zip(fields)
                .all(|(expected, actual)| expected == actual)
    }
}

impl Default for HeaderSignature {
    fn default() -> Self {
        Self {
            columns: DEFAULT_HEADER_SIGNATURE
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

impl FromStr for HeaderSignature {
    type Err = IngestError;

    /// Parses a comma-separated list such as `ID,Timestamp,Transaction Type`.
    fn from_str(value: &str) -> Result<Self> {
        Self::new(parse_csv_line(value))
    }
}

impl fmt::Display for HeaderSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.columns.join(","))
    }
}

/// Normalizes a header value by trimming whitespace and byte-order marks.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Splits one line into normalized fields.
///
/// Uses the same tokenizer as row parsing. A leading BOM is dropped first so
/// a quoted first field is still recognized. An empty line has no fields.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let line = line.trim_start_matches('\u{feff}');
    let mut reader = record_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(normalize_header).collect(),
        Ok(false) | Err(_) => Vec::new(),
    }
}

/// Makes column names unique and non-empty.
///
/// Blank names become `Unnamed: <index>`; repeated names get `.1`, `.2`, ...
/// suffixes in order of appearance.
pub fn unique_columns(raw: Vec<String>) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut counters: BTreeMap<String, usize> = BTreeMap::new();
    let mut columns = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };
        let mut candidate = base.clone();
        while used.contains(&candidate) {
            let counter = counters.entry(base.clone()).or_insert(0);
            *counter += 1;
            candidate = format!("{base}.{counter}");
        }
        used.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}

/// Finds the first line that starts with `signature`.
///
/// Earlier lines are treated as a metadata block. Returns `None` when no line
/// matches, which includes empty input.
pub fn locate_header<S>(lines: &[S], signature: &HeaderSignature) -> Option<DetectedHeader>
where
    S: AsRef<str>,
{
    lines.iter().enumerate().find_map(|(idx, line)| {
        let fields = parse_csv_line(line.as_ref());
        signature
            .matches(&fields)
            .then(|| DetectedHeader::new(idx, unique_columns(fields)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature() -> HeaderSignature {
        HeaderSignature::default()
    }

    #[test]
    fn test_default_signature() {
        assert_eq!(
            signature().to_string(),
            "ID,Timestamp,Transaction Type"
        );
        assert_eq!(signature().len(), 3);
    }

    #[test]
    fn test_signature_from_str() {
        let parsed: HeaderSignature = " Date , Amount ".parse().unwrap();
        assert_eq!(parsed.columns(), &["Date".to_string(), "Amount".to_string()]);
    }

    #[test]
    fn test_empty_signature_rejected() {
        assert!(matches!(
            HeaderSignature::new(Vec::<String>::new()),
            Err(IngestError::EmptySignature)
        ));
        assert!(matches!(
            "ID,,Amount".parse::<HeaderSignature>(),
            Err(IngestError::EmptySignature)
        ));
    }

    #[test]
    fn test_parse_csv_line_quoted() {
        let result = parse_csv_line("\"hello, world\",b,c");
        assert_eq!(result, vec!["hello, world", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_line_escaped_quotes() {
        let result = parse_csv_line("\"he said \"\"hello\"\"\",b");
        assert_eq!(result, vec!["he said \"hello\"", "b"]);
    }

    #[test]
    fn test_parse_csv_line_matches_row_tokenizer() {
        // Quotes inside a field are literal, as they are for data rows.
        assert_eq!(parse_csv_line("ID,a\"b\"c"), vec!["ID", "a\"b\"c"]);
        assert_eq!(parse_csv_line("\"open,quote"), vec!["open,quote"]);
        assert!(parse_csv_line("").is_empty());
    }

    #[test]
    fn test_parse_csv_line_trimmed() {
        let result = parse_csv_line("  a  ,  b  ");
        assert_eq!(result, vec!["a", "b"]);
    }

    #[test]
    fn test_locate_after_metadata() {
        let lines = [
            "Transactions",
            "User,jane@example.com",
            "",
            "ID,Timestamp,Transaction Type,Asset",
            "1,2021-04-09,Buy,BTC",
        ];
        let header = locate_header(&lines, &signature()).unwrap();
        assert_eq!(header.line_index, 3);
        assert_eq!(
            header.columns,
            vec!["ID", "Timestamp", "Transaction Type", "Asset"]
        );
    }

    #[test]
    fn test_locate_first_match_wins() {
        let lines = [
            "ID,Timestamp,Transaction Type,A",
            "ID,Timestamp,Transaction Type,B",
        ];
        let header = locate_header(&lines, &signature()).unwrap();
        assert_eq!(header.line_index, 0);
        assert_eq!(header.columns[3], "A");
    }

    #[test]
    fn test_locate_is_case_sensitive() {
        let lines = ["id,timestamp,transaction type", "1,2,3"];
        assert!(locate_header(&lines, &signature()).is_none());
    }

    #[test]
    fn test_locate_requires_full_signature() {
        let lines = ["ID,Timestamp", "1,2"];
        assert!(locate_header(&lines, &signature()).is_none());
    }

    #[test]
    fn test_locate_empty_input() {
        let lines: [&str; 0] = [];
        assert!(locate_header(&lines, &signature()).is_none());
    }

    #[test]
    fn test_locate_with_bom_and_quotes() {
        let lines = ["\u{feff}\"ID\",\"Timestamp\",\"Transaction Type\""];
        let header = locate_header(&lines, &signature()).unwrap();
        assert_eq!(header.line_index, 0);
        assert_eq!(header.columns, vec!["ID", "Timestamp", "Transaction Type"]);
    }

    #[test]
    fn test_unique_columns() {
        let raw = ["ID", "Amount", "", "Amount", "Amount.1", "Amount"]
            .iter()
            .map(|name| (*name).to_string())
            .collect();
        assert_eq!(
            unique_columns(raw),
            vec!["ID", "Amount", "Unnamed: 2", "Amount.1", "Amount.1.1", "Amount.2"]
        );
    }
}
