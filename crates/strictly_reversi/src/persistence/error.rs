//! Persistence error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while saving or loading.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PersistenceErrorKind {
    /// Underlying storage failed.
    #[display("I/O failure: {}", _0)]
    Io(String),

    /// The record does not have the expected shape or alphabet.
    #[display("malformed record at line {}: {}", line, reason)]
    Malformed {
        /// 1-based line of the record.
        line: usize,
        /// What was wrong.
        reason: String,
    },
}

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Persistence error: {} at {}:{}", kind, file, line)]
pub struct PersistenceError {
    /// What went wrong.
    pub kind: PersistenceErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PersistenceError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Structural or alphabet failure at a record line.
    #[track_caller]
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::new(PersistenceErrorKind::Malformed {
            line,
            reason: reason.into(),
        })
    }

    /// True for structural failures, false for I/O failures.
    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, PersistenceErrorKind::Malformed { .. })
    }
}

impl From<std::io::Error> for PersistenceError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(PersistenceErrorKind::Io(err.to_string()))
    }
}
