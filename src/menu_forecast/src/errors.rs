//! Error types for the forecasting pipeline and query service.

use thiserror::Error;

/// A date-of-sale value that none of the configured formats could parse.
///
/// Raised per row by the cleaner, which recovers by excluding the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed date of sale: {value:?}")]
pub struct MalformedDateError {
    /// The raw field as it appeared in the source.
    pub value: String,
}

/// The unified error type for the `menu_forecast` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller asked for a day outside Monday..Saturday.
    #[error("Invalid day of the week")]
    InvalidDay(String),

    /// An ad-hoc prediction payload did not have the expected shape.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No row survived cleaning, so there is nothing to train on.
    #[error("Cleaned dataset is empty; refusing to train")]
    EmptyDataset,

    /// The regression could not be fitted.
    #[error("Training failed: {0}")]
    Training(String),

    /// The raw record source is missing something the pipeline needs.
    #[error("Source error: {0}")]
    Source(String),

    /// A generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the CSV reader or writer.
    #[error("CSV operation failed: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Whether the error was caused by the caller's request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidDay(_) | Error::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_errors_keep_reader_detail() {
        let mut rdr = csv::ReaderBuilder::new().from_reader("a,b\n1,2,3\n".as_bytes());
        let err: Error = rdr.records().next().unwrap().unwrap_err().into();
        let msg = err.to_string();
        assert!(msg.starts_with("CSV operation failed: "), "{msg}");
        assert!(msg.len() > "CSV operation failed: ".len());
    }

    #[test]
    fn only_request_errors_are_client_errors() {
        assert!(Error::InvalidDay("Funday".into()).is_client_error());
        assert!(Error::InvalidInput("x".into()).is_client_error());
        assert!(!Error::EmptyDataset.is_client_error());
        assert!(!Error::Training("x".into()).is_client_error());
    }
}
