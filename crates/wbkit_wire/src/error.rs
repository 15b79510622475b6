//! Error types for the wire codec.

use thiserror::Error;
use wbkit_datamodel::ModelError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A type tag on the wire names a variant this codec does not know.
    #[error("unsupported wire type tag: {tag:?}")]
    UnsupportedWireType {
        /// The unknown tag value.
        tag: String,
    },

    /// A string id and a (tag, numeric id) pair disagree.
    #[error("inconsistent entity id: string id {id:?} does not match {expected:?}")]
    InconsistentId {
        /// The string id found on the wire.
        id: String,
        /// The id derived from the tag and numeric id.
        expected: String,
    },

    /// The JSON structure does not match the wire format.
    #[error("invalid wire structure: {message}")]
    InvalidStructure {
        /// Description of the structural error.
        message: String,
    },

    /// A decoded value failed data model validation.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl CodecError {
    /// Creates an unsupported wire type error.
    pub fn unsupported_wire_type(tag: impl Into<String>) -> Self {
        Self::UnsupportedWireType { tag: tag.into() }
    }

    /// Creates an inconsistent id error.
    pub fn inconsistent_id(id: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InconsistentId {
            id: id.into(),
            expected: expected.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}
