//! Errors
//!
//! Custom error types used throughout the `churnscope` crate.
use thiserror::Error;

/// Errors that can occur while exploring a customer table.
#[derive(Debug, Error)]
pub enum ExploreError {
    /// A required column is absent from the table.
    #[error("Column '{0}' was not found in the customer table.")]
    MissingColumn(String),
    /// First value is the column name, second is the expected kind, third is the kind found.
    #[error("Column '{0}' holds {2} data, expected {1}.")]
    ColumnType(String, &'static str, &'static str),
    /// First value is the column name, second is the table row count, third is the column length.
    #[error("Column '{0}' has {2} rows, but the table has {1}.")]
    ColumnLength(String, usize, usize),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// A hypothesis test that is not computable on the given data.
    #[error("Unable to run {0}: {1}.")]
    DegenerateTest(String, String),
    /// Unable to serialize a report.
    #[error("Unable to serialize report: {0}")]
    Serialization(String),
}
