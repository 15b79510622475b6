//! Error types for the data model.

use thiserror::Error;

/// Result type for data model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur when constructing data model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// An entity id string does not match the required pattern.
    #[error("malformed entity id {id:?}: {reason}")]
    MalformedId {
        /// The offending id string.
        id: String,
        /// Description of the violation.
        reason: String,
    },

    /// A statement group references a subject other than its document.
    #[error("invalid statement group: statement subject {found:?} does not match document id {expected:?}")]
    InvalidStatementGroup {
        /// The document's own entity id.
        expected: String,
        /// The subject found on the statement.
        found: String,
    },
}

impl ModelError {
    /// Creates a malformed id error.
    pub fn malformed_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedId {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid statement group error.
    pub fn invalid_statement_group(
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::InvalidStatementGroup {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ModelError::malformed_id("P34d23", "trailing characters");
        assert!(err.to_string().contains("P34d23"));

        let err = ModelError::invalid_statement_group("Q1", "Q2");
        assert!(err.to_string().contains("Q1"));
        assert!(err.to_string().contains("Q2"));
    }
}
