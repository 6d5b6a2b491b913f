use thiserror::Error;

/// Errors produced by the binary file ingestion layer.
#[derive(Error, Debug)]
pub enum IoError {
    /// A constructor argument was malformed (bad path, unreadable file).
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A value-object property failed validation.  Always raised before
    /// any storage call, naming the first offending property.
    #[error("invalid value for '{property}' on {subject}: {actual}")]
    InvalidValue {
        property: &'static str,
        subject: &'static str,
        actual: String,
    },

    /// The storage handler has no object under the given identity.
    #[error("binary file not found: {0}")]
    NotFound(String),

    /// An object is too large to be returned as an in-memory buffer.
    #[error("contents too large: {size} bytes (max {max})")]
    ContentsTooLarge { size: i64, max: u64 },

    /// Opaque storage-layer failure, propagated unmodified.
    #[error("storage handler error: {0}")]
    Handler(String),
}

impl IoError {
    pub(crate) fn invalid_value(
        property: &'static str,
        subject: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        IoError::InvalidValue {
            property,
            subject,
            actual: actual.into(),
        }
    }

    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        IoError::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IoError>;
