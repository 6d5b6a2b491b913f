//! Section persistence SPI.

use crate::error::Result;
use crate::section::{ContentId, SectionId};

/// Persistence-facing record of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    pub id: SectionId,
    pub identifier: String,
    pub name: String,
}

/// Persistence abstraction for sections and their content assignments.
///
/// All operations are synchronous and blocking.  `load` variants report
/// an absent entity as
/// [`RepositoryError::NotFound`](crate::RepositoryError::NotFound).
pub trait SectionHandler: Send + Sync {
    /// Persist a new section and assign its identity.
    fn create(&self, name: &str, identifier: &str) -> Result<SectionRecord>;

    /// Overwrite name and identifier of an existing section.
    fn update(&self, id: SectionId, name: &str, identifier: &str) -> Result<SectionRecord>;

    /// Load the section with the given identity.
    fn load(&self, id: SectionId) -> Result<SectionRecord>;

    /// Load the section with the given mnemonic identifier.
    fn load_by_identifier(&self, identifier: &str) -> Result<SectionRecord>;

    /// Load all sections.
    fn load_all(&self) -> Result<Vec<SectionRecord>>;

    /// Count the contents currently assigned to the section.
    fn assignments_count(&self, id: SectionId) -> Result<u64>;

    /// Assign the content to the section, overriding any current
    /// assignment of that content.
    fn assign(&self, id: SectionId, content_id: ContentId) -> Result<()>;

    /// Remove the section.
    fn delete(&self, id: SectionId) -> Result<()>;
}
