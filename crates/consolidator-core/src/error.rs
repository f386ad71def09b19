//! Error types for consolidation runs.

use thiserror::Error;

/// Errors that abort a consolidation run.
///
/// Per-file and per-row problems are not errors at this level; they are
/// recorded in the [`Summary`](consolidator_model::Summary) instead.
#[derive(Debug, Error)]
pub enum ConsolidateError {
    /// No input file produced a usable table.
    #[error("no valid input: none of the {attempted} file(s) could be read")]
    NoValidInput { attempted: usize },

    /// An explicit output name was empty or whitespace.
    #[error("output file name must not be empty")]
    EmptyOutputName,
}

/// Result type for consolidation operations.
pub type Result<T> = std::result::Result<T, ConsolidateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConsolidateError::NoValidInput { attempted: 2 };
        assert_eq!(
            err.to_string(),
            "no valid input: none of the 2 file(s) could be read"
        );
    }
}
