//! CSV reading utilities.

mod header;
mod reader;

pub use header::{
    DEFAULT_HEADER_SIGNATURE, HeaderSignature, locate_header, normalize_header, parse_csv_line,
    unique_columns,
};
pub use reader::{RawFile, TableRead, parse_rows, read_table};

/// Record reader shared by header detection and row parsing, so both split
/// fields the same way. Field counts are checked by the caller.
fn record_reader<R: std::io::Read>(input: R) -> ::csv::Reader<R> {
    ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(::csv::Trim::None)
        .from_reader(input)
}
