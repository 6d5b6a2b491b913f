//! Section value objects.

use serde::{Deserialize, Serialize};

/// Numeric identity of a section, assigned by the persistence handler.
pub type SectionId = u64;

/// Numeric identity of a content item assigned to a section.
pub type ContentId = u64;

/// A section as seen by API callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    /// Handler-assigned identity.
    pub id: SectionId,
    /// Unique mnemonic identifier, e.g. `standard`.
    pub identifier: String,
    /// Human-readable name.
    pub name: String,
}

/// Caller-populated input for creating a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCreateStruct {
    /// Human-readable name.
    pub name: String,
    /// Unique mnemonic identifier.
    pub identifier: String,
}

/// Caller-populated input for updating a section.  Unset fields keep
/// their current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionUpdateStruct {
    pub name: Option<String>,
    pub identifier: Option<String>,
}
