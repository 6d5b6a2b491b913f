use thiserror::Error;

/// Errors produced by the section directory layer.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A value-object property failed validation.  Always raised before
    /// any persistence call.
    #[error("invalid value for '{property}' on {subject}: {actual}")]
    InvalidValue {
        property: &'static str,
        subject: &'static str,
        actual: String,
    },

    /// The requested entity does not exist.
    #[error("{kind} not found: {identifier}")]
    NotFound {
        kind: &'static str,
        identifier: String,
    },

    /// A uniqueness constraint was violated on create or update.
    #[error("{property} already exists: {value}")]
    AlreadyExists {
        property: &'static str,
        value: String,
    },

    /// A structural precondition failed, e.g. deleting a section that
    /// still has contents assigned.
    #[error("bad state for {subject}: {reason}")]
    BadState {
        subject: &'static str,
        reason: String,
    },

    /// Opaque persistence-layer failure, propagated unmodified.
    #[error("persistence handler error: {0}")]
    Handler(String),
}

impl RepositoryError {
    pub(crate) fn invalid_value(
        property: &'static str,
        subject: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        RepositoryError::InvalidValue {
            property,
            subject,
            actual: actual.into(),
        }
    }

    pub(crate) fn section_not_found(identifier: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            kind: "section",
            identifier: identifier.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RepositoryError>;
