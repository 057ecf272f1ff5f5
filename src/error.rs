//! Error types for prefix-table construction and matching.

use thiserror::Error;

/// Coarse classification shared by every [`KmpError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
}

/// Precondition violations detected before a scan starts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KmpError {
    #[error("prefix table has {actual} entries but the pattern has {expected} symbols")]
    TableLengthMismatch { expected: usize, actual: usize },

    #[error("prefix table entry {index} is {value}, expected at most {index}")]
    MalformedTable { index: usize, value: usize },

    #[error("the pattern is empty")]
    EmptyPattern,
}

impl KmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KmpError::TableLengthMismatch { .. }
            | KmpError::MalformedTable { .. }
            | KmpError::EmptyPattern => ErrorKind::InvalidInput,
        }
    }
}

pub type Result<T> = std::result::Result<T, KmpError>;
