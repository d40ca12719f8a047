//! Stop reference data error types.

/// Errors raised while loading the stop reference table.
///
/// All of these are configuration errors: the server refuses to start
/// without a usable stop directory.
#[derive(Debug, thiserror::Error)]
pub enum StopDataError {
    /// Could not read the reference file
    #[error("failed to read stop data: {0}")]
    Io(#[from] std::io::Error),

    /// A row did not have exactly six fields
    #[error("malformed stop row at line {line}: expected 6 fields, found {found}")]
    MalformedRow { line: usize, found: usize },

    /// A latitude/longitude field did not parse as a number
    #[error("invalid coordinate at line {line}: {value:?}")]
    InvalidCoordinate { line: usize, value: String },
}
