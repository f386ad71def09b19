//! End-to-end tests for consolidating directories of exports.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use consolidator_core::{
    ConsolidateError, ConsolidateOptions, ConsolidationEvent, FixedDecision, consolidate,
    output_name,
};
use consolidator_ingest::list_csv_files;
use consolidator_model::{Cell, DateRange, MismatchReport, ReconciliationDecision};

const METADATA: &str = "Transactions\nUser,jane@example.com,abc123\n\n";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

fn sample_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(
        dir.path(),
        "a.csv",
        &format!(
            "{METADATA}ID,Timestamp,Transaction Type,Amount\n\
             1,2021-04-09T10:00:00Z,Buy,10\n\
             2,2021-06-01T10:00:00Z,Sell,20\n\
             3,2021-09-15T10:00:00Z,Buy,30\n"
        ),
    );
    write(
        dir.path(),
        "b.csv",
        "ID,Timestamp,Transaction Type,Category\n\
         4,2021-10-01 08:00:00 UTC,Buy,fees\n\
         5,2022-01-20 08:00:00 UTC,Sell\n\
         6,2022-02-11 08:00:00 UTC,Buy,\n\
         7,2022-03-02 08:00:00 UTC,Send,gift\n",
    );
    dir
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn summary_counts_skipped_rows_and_merged_rows() {
    let dir = sample_dir();
    let paths = list_csv_files(dir.path()).unwrap();
    let mut events: Vec<ConsolidationEvent> = Vec::new();

    let run = consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut FixedDecision::union(),
        &mut events,
    )
    .expect("consolidate");

    let summary = &run.summary;
    assert_eq!(summary.files_attempted, 2);
    assert_eq!(summary.files_succeeded(), 2);
    assert_eq!(summary.files_skipped(), 0);
    assert_eq!(summary.rows_skipped(), 1);
    assert_eq!(summary.skipped_rows[0].line, 3);
    assert_eq!(summary.skipped_rows[0].reason, "expected 4 fields, found 3");
    assert_eq!(summary.total_rows, 6);
    assert_eq!(summary.total_columns, 5);
    assert_eq!(summary.decision, Some(ReconciliationDecision::UseUnion));
    assert_eq!(summary.loaded_files[0].header_line, 3);
    assert_eq!(summary.loaded_files[1].header_line, 0);

    assert_eq!(
        run.table.columns(),
        &["ID", "Timestamp", "Transaction Type", "Amount", "Category"]
    );
    assert_eq!(run.table.cell(0, "Category"), Some(&Cell::Absent));
    assert_eq!(run.table.cell(4, "Category"), Some(&Cell::from("")));
    assert_eq!(run.table.cell(4, "Amount"), Some(&Cell::Absent));

    assert!(
        events
            .iter()
            .any(|event| matches!(event, ConsolidationEvent::RowSkipped { line: 3, .. }))
    );
    assert!(matches!(
        events.last(),
        Some(ConsolidationEvent::RunCompleted { .. })
    ));
}

#[test]
fn date_range_names_the_output() {
    let dir = sample_dir();
    let paths = list_csv_files(dir.path()).unwrap();
    let run = consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut FixedDecision::common(),
        &mut Vec::<ConsolidationEvent>::new(),
    )
    .unwrap();

    assert_eq!(
        run.summary.date_range,
        DateRange::known(date(2021, 4, 9), date(2022, 3, 2))
    );
    assert_eq!(
        output_name(&run.summary.date_range, None).unwrap(),
        "consolidated_04-09-2021_thru_03-02-2022.csv"
    );
}

#[test]
fn common_columns_drop_extras() {
    let dir = sample_dir();
    let paths = list_csv_files(dir.path()).unwrap();
    let run = consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut FixedDecision::common(),
        &mut Vec::<ConsolidationEvent>::new(),
    )
    .unwrap();

    assert_eq!(
        run.table.columns(),
        &["ID", "Timestamp", "Transaction Type"]
    );
    assert!(run.table.rows().iter().flatten().all(|cell| !cell.is_absent()));
    assert_eq!(run.summary.total_columns, 3);
}

#[test]
fn union_is_idempotent() {
    let dir = sample_dir();
    let paths = list_csv_files(dir.path()).unwrap();
    let options = ConsolidateOptions::default();

    let run = || {
        consolidate(
            &paths,
            &options,
            &mut FixedDecision::union(),
            &mut Vec::<ConsolidationEvent>::new(),
        )
        .unwrap()
    };
    let first = run();
    let second = run();

    assert_eq!(first.table, second.table);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn policy_receives_per_file_report() {
    let dir = sample_dir();
    let paths = list_csv_files(dir.path()).unwrap();
    let mut seen: Vec<MismatchReport> = Vec::new();
    let mut policy = |report: &MismatchReport| {
        seen.push(report.clone());
        ReconciliationDecision::UseCommon
    };

    consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut policy,
        &mut Vec::<ConsolidationEvent>::new(),
    )
    .unwrap();

    assert_eq!(seen.len(), 1);
    let report = &seen[0];
    assert_eq!(report.files[0].file, "a.csv");
    assert_eq!(report.files[0].extra, vec!["Amount"]);
    assert_eq!(report.files[0].missing, vec!["Category"]);
    assert_eq!(report.files[1].file, "b.csv");
    assert_eq!(report.files[1].extra, vec!["Category"]);
}

#[test]
fn identical_headers_keep_file_order() {
    let dir = TempDir::new().unwrap();
    let header = "ID,Timestamp,Transaction Type,Notes\n";
    write(dir.path(), "1.csv", &format!("{header}1,2021-01-01,Buy,x\n"));
    write(dir.path(), "2.csv", &format!("meta\n{header}2,2021-01-02,Sell,y\n"));
    let paths = list_csv_files(dir.path()).unwrap();
    let mut events: Vec<ConsolidationEvent> = Vec::new();

    let run = consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut |_: &MismatchReport| -> ReconciliationDecision {
            panic!("policy must not be consulted")
        },
        &mut events,
    )
    .unwrap();

    assert_eq!(
        run.table.columns(),
        &["ID", "Timestamp", "Transaction Type", "Notes"]
    );
    assert_eq!(run.summary.decision, None);
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, ConsolidationEvent::HeaderMismatch { .. }))
    );
}

#[test]
fn headerless_files_are_skipped() {
    let dir = sample_dir();
    write(dir.path(), "0_readme.csv", "This folder holds exports\n");
    let paths = list_csv_files(dir.path()).unwrap();
    let mut events: Vec<ConsolidationEvent> = Vec::new();

    let run = consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut FixedDecision::union(),
        &mut events,
    )
    .unwrap();

    assert_eq!(run.summary.files_attempted, 3);
    assert_eq!(run.summary.files_succeeded(), 2);
    assert_eq!(run.summary.files_skipped(), 1);
    assert!(run.summary.skipped_files[0].path.ends_with("0_readme.csv"));
    assert!(matches!(
        &events[0],
        ConsolidationEvent::FileSkipped { path, .. } if path.ends_with("0_readme.csv")
    ));
    assert_eq!(run.summary.total_rows, 6);
}

#[test]
fn no_valid_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.csv", "");
    write(dir.path(), "b.csv", "Account,123\nGenerated,today\n");
    let paths = list_csv_files(dir.path()).unwrap();

    let result = consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut FixedDecision::union(),
        &mut Vec::<ConsolidationEvent>::new(),
    );

    assert!(matches!(
        result,
        Err(ConsolidateError::NoValidInput { attempted: 2 })
    ));
}

#[test]
fn empty_path_list_is_fatal() {
    let paths: Vec<PathBuf> = Vec::new();
    let result = consolidate(
        &paths,
        &ConsolidateOptions::default(),
        &mut FixedDecision::union(),
        &mut Vec::<ConsolidationEvent>::new(),
    );
    assert!(matches!(
        result,
        Err(ConsolidateError::NoValidInput { attempted: 0 })
    ));
}
