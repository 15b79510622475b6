//! Error types for edit dispatch.

use thiserror::Error;
use wbkit_datamodel::ModelError;
use wbkit_wire::CodecError;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur while dispatching an edit.
#[derive(Error, Debug, Clone)]
pub enum EditorError {
    /// The server stayed rate limited through every allowed attempt.
    #[error("rate limit not lifted after {attempts} attempts")]
    RateLimitExceeded {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// The base revision is stale; the caller must re-fetch and retry.
    #[error("edit conflict: {message}")]
    EditConflict {
        /// Server-provided conflict description.
        message: String,
    },

    /// The CSRF token stayed invalid after one refresh.
    #[error("token error: {message}")]
    TokenError {
        /// Description of the token failure.
        message: String,
    },

    /// The server rejected a requested edit tag.
    #[error("tag rejected: {message}")]
    TagRejected {
        /// Server-provided rejection description.
        message: String,
    },

    /// The call reported success but its payload was unusable.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// Description of what was missing or wrong.
        message: String,
    },

    /// Any other server-reported error, passed through unchanged.
    #[error("server error {code}: {message}")]
    Service {
        /// Server error code.
        code: String,
        /// Server error message.
        message: String,
    },

    /// The transport failed before a server response was available.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// A response payload failed to decode.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A decoded value failed data model validation.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl EditorError {
    /// Creates a malformed response error.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a token error.
    pub fn token(message: impl Into<String>) -> Self {
        Self::TokenError {
            message: message.into(),
        }
    }

    /// Creates a server error passthrough.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EditorError::RateLimitExceeded { attempts: 3 };
        assert!(err.to_string().contains('3'));

        let err = EditorError::service("badtoken", "Invalid CSRF token.");
        assert!(err.to_string().contains("badtoken"));
    }
}
