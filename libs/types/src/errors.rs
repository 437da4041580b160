//! Error types for record validation and test-code table loading
//!
//! The matching engine itself has no error path; everything here is raised
//! before records reach it.

use std::fmt;
use thiserror::Error;

/// Which input list a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Booking,
    Claim,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Booking => write!(f, "booking"),
            RecordKind::Claim => write!(f, "claim"),
        }
    }
}

/// Input records that violate the engine's preconditions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{record}[{index}].{field} must not be empty")]
    EmptyField {
        record: RecordKind,
        index: usize,
        field: &'static str,
    },

    #[error("duplicate {record} id: {id}")]
    DuplicateId { record: RecordKind, id: String },
}

/// Errors building a [`crate::test_codes::TestCodeMap`] from external data
#[derive(Error, Debug)]
pub enum TestCodeError {
    #[error("invalid test code table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("test code table entry {index} has an empty code")]
    EmptyCode { index: usize },

    #[error("test {test} is mapped to both {first} and {second}")]
    ConflictingEntry {
        test: String,
        first: String,
        second: String,
    },
}
