use thiserror::Error;
use tracing::debug;

/// Errors reported when the inputs of a comparison fail validation.
///
/// Every failure is local: the operation returns no result and the caller
/// decides what to do. The messages match the diagnostics printed by the
/// service client, so logs stay comparable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The second map is empty.
    #[error("h2 is empty")]
    EmptyInput,
    /// The second map has keys the first one lacks.
    #[error("h2 is larger: {missing} key(s) absent from h1")]
    KeySetMismatch { missing: usize },
    /// More keys are unique to the first map than the size difference allows.
    #[error("h2 has keys unknown to h1: {unknown} key(s) only in h1, at most {allowed} expected")]
    SizeInconsistency { unknown: usize, allowed: isize },
    /// A label or occurrence failed its type, membership or sign constraint.
    #[error("{0}")]
    InvalidElementType(String),
    /// Paired sequences differ in length.
    #[error("{what} differ in length ({expected} vs {actual})")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Column index outside the width of the first row.
    #[error("column index {index} out of range for width {width}")]
    IndexOutOfRange { index: usize, width: usize },
}

/// The fieldless tag of a [`StatsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    KeySetMismatch,
    SizeInconsistency,
    InvalidElementType,
    LengthMismatch,
    IndexOutOfRange,
}

impl StatsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::EmptyInput => ErrorKind::EmptyInput,
            StatsError::KeySetMismatch { .. } => ErrorKind::KeySetMismatch,
            StatsError::SizeInconsistency { .. } => ErrorKind::SizeInconsistency,
            StatsError::InvalidElementType(_) => ErrorKind::InvalidElementType,
            StatsError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            StatsError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }

    /// Emits a debug event for the failed `operation` and hands the error back.
    pub fn logged(self, operation: &'static str) -> Self {
        debug!(operation, error = %self, "validation failed");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_client_wording() {
        assert_eq!(StatsError::EmptyInput.to_string(), "h2 is empty");
        assert!(StatsError::KeySetMismatch { missing: 1 }
            .to_string()
            .starts_with("h2 is larger"));
        assert!(StatsError::SizeInconsistency { unknown: 2, allowed: 1 }
            .to_string()
            .starts_with("h2 has keys unknown to h1"));
        let err = StatsError::LengthMismatch {
            what: "y and occ",
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "y and occ differ in length (4 vs 3)");
    }

    #[test]
    fn test_kind() {
        assert_eq!(StatsError::EmptyInput.kind(), ErrorKind::EmptyInput);
        assert_eq!(
            StatsError::IndexOutOfRange { index: 2, width: 2 }.kind(),
            ErrorKind::IndexOutOfRange
        );
        assert_eq!(
            StatsError::InvalidElementType("x".into()).logged("test").kind(),
            ErrorKind::InvalidElementType
        );
    }
}
