//! Tests for locating the header below metadata blocks.

use consolidator_ingest::{HeaderSignature, RawFile, locate_header, parse_rows};
use proptest::prelude::*;

const HEADER: &str = "ID,Timestamp,Transaction Type,Asset,Quantity";

fn file_with_metadata(metadata_lines: usize) -> String {
    let mut text = String::new();
    for idx in 0..metadata_lines {
        text.push_str(&format!("Metadata line {idx},value {idx}\n"));
    }
    text.push_str(HEADER);
    text.push('\n');
    text.push_str("1,2021-04-09T10:00:00Z,Buy,BTC,0.5\n");
    text.push_str("2,2021-04-10T10:00:00Z,Sell,BTC,0.25\n");
    text
}

#[test]
fn header_index_matches_metadata_length() {
    let signature = HeaderSignature::default();
    for metadata_lines in [0, 1, 10] {
        let raw = RawFile::from_text("export.csv", file_with_metadata(metadata_lines));
        let header = raw.locate_header(&signature).expect("header found");
        assert_eq!(header.line_index, metadata_lines);
        assert_eq!(
            header.columns,
            vec!["ID", "Timestamp", "Transaction Type", "Asset", "Quantity"]
        );

        let read = parse_rows(&raw, header);
        assert_eq!(read.table.row_count(), 2);
        assert!(read.rejected.is_empty());
    }
}

#[test]
fn custom_signature() {
    let signature: HeaderSignature = "Date,Description".parse().expect("signature");
    let lines = [
        "Bank export",
        "Date,Amount",
        "Date,Description,Amount",
        "2021-04-09,Coffee,-3.50",
    ];
    let header = locate_header(&lines, &signature).expect("header found");
    assert_eq!(header.line_index, 2);
}

#[test]
fn metadata_only_file_fails() {
    let raw = RawFile::from_text("meta.csv", "Account,123\nGenerated,2022-03-02\n");
    assert!(raw.locate_header(&HeaderSignature::default()).is_err());
}

proptest! {
    #[test]
    fn header_found_after_any_metadata(
        metadata in prop::collection::vec("[a-z :,]{0,24}", 0..20)
    ) {
        let mut text = metadata.join("\n");
        if !metadata.is_empty() {
            text.push('\n');
        }
        text.push_str(HEADER);
        text.push_str("\n1,2021-04-09,Buy,BTC,1\n");

        let raw = RawFile::from_text("prop.csv", text);
        let header = raw
            .locate_header(&HeaderSignature::default())
            .expect("header found");
        prop_assert_eq!(header.line_index, metadata.len());
        let read = parse_rows(&raw, header);
        prop_assert_eq!(read.table.row_count(), 1);
    }
}
