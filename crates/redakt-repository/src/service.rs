//! The section directory service.
//!
//! Straight-line validation and delegation over a [`SectionHandler`],
//! plus the two integrity guards: identifiers are unique across
//! sections, and a section with contents still assigned cannot be
//! deleted.

use tracing::debug;

use crate::error::{RepositoryError, Result};
use crate::handler::{SectionHandler, SectionRecord};
use crate::section::{ContentId, Section, SectionCreateStruct, SectionId, SectionUpdateStruct};

const CREATE_STRUCT: &str = "SectionCreateStruct";
const UPDATE_STRUCT: &str = "SectionUpdateStruct";

/// Synchronous section service over a [`SectionHandler`].
pub struct SectionService<H> {
    handler: H,
}

impl<H: SectionHandler> SectionService<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Access the underlying persistence handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Create a new section.
    ///
    /// Fails with `AlreadyExists` when the identifier is taken.
    pub fn create_section(&self, create_struct: SectionCreateStruct) -> Result<Section> {
        if create_struct.name.is_empty() {
            return Err(RepositoryError::invalid_value("name", CREATE_STRUCT, "<empty>"));
        }
        if create_struct.identifier.is_empty() {
            return Err(RepositoryError::invalid_value(
                "identifier",
                CREATE_STRUCT,
                "<empty>",
            ));
        }

        match self.handler.load_by_identifier(&create_struct.identifier) {
            Ok(_) => {
                return Err(RepositoryError::AlreadyExists {
                    property: "identifier",
                    value: create_struct.identifier,
                })
            }
            Err(RepositoryError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let record = self
            .handler
            .create(&create_struct.name, &create_struct.identifier)?;
        debug!(id = record.id, identifier = %record.identifier, "created section");

        Ok(build_section(record))
    }

    /// Update an existing section.  Unset fields keep current values.
    ///
    /// Fails with `AlreadyExists` when the new identifier belongs to a
    /// different section, and `NotFound` when the section itself is gone.
    pub fn update_section(
        &self,
        section: &Section,
        update_struct: SectionUpdateStruct,
    ) -> Result<Section> {
        if let Some(name) = &update_struct.name {
            if name.is_empty() {
                return Err(RepositoryError::invalid_value("name", UPDATE_STRUCT, "<empty>"));
            }
        }
        if let Some(identifier) = &update_struct.identifier {
            if identifier.is_empty() {
                return Err(RepositoryError::invalid_value(
                    "identifier",
                    UPDATE_STRUCT,
                    "<empty>",
                ));
            }

            match self.handler.load_by_identifier(identifier) {
                // Re-stating the section's own identifier is a no-op,
                // not a collision.
                Ok(existing) if existing.id != section.id => {
                    return Err(RepositoryError::AlreadyExists {
                        property: "identifier",
                        value: identifier.clone(),
                    })
                }
                Ok(_) | Err(RepositoryError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        let current = self.handler.load(section.id)?;
        let name = update_struct.name.unwrap_or(current.name);
        let identifier = update_struct.identifier.unwrap_or(current.identifier);

        let record = self.handler.update(current.id, &name, &identifier)?;
        debug!(id = record.id, identifier = %record.identifier, "updated section");

        Ok(build_section(record))
    }

    /// Load the section with the given identity.
    pub fn load_section(&self, section_id: SectionId) -> Result<Section> {
        self.handler.load(section_id).map(build_section)
    }

    /// Load all sections, ordered by identity.
    pub fn load_sections(&self) -> Result<Vec<Section>> {
        Ok(self
            .handler
            .load_all()?
            .into_iter()
            .map(build_section)
            .collect())
    }

    /// Load the section with the given mnemonic identifier.
    pub fn load_section_by_identifier(&self, identifier: &str) -> Result<Section> {
        if identifier.is_empty() {
            return Err(RepositoryError::invalid_value(
                "identifier",
                "Section",
                "<empty>",
            ));
        }

        self.handler.load_by_identifier(identifier).map(build_section)
    }

    /// Count the contents currently assigned to the section.
    pub fn count_assigned_contents(&self, section: &Section) -> Result<u64> {
        self.handler.assignments_count(section.id)
    }

    /// Assign the content to the section, overriding the content's
    /// current assignment.
    pub fn assign_section(&self, section: &Section, content_id: ContentId) -> Result<()> {
        let loaded = self.load_section(section.id)?;

        self.handler.assign(loaded.id, content_id)?;
        debug!(id = loaded.id, content_id, "assigned content to section");
        Ok(())
    }

    /// Delete the section.
    ///
    /// Fails with `BadState` while contents are still assigned to it.
    pub fn delete_section(&self, section: &Section) -> Result<()> {
        let loaded = self.load_section(section.id)?;

        let assigned = self.handler.assignments_count(loaded.id)?;
        if assigned > 0 {
            return Err(RepositoryError::BadState {
                subject: "section",
                reason: format!("{assigned} contents are still assigned"),
            });
        }

        self.handler.delete(loaded.id)?;
        debug!(id = loaded.id, identifier = %loaded.identifier, "deleted section");
        Ok(())
    }
}

fn build_section(record: SectionRecord) -> Section {
    Section {
        id: record.id,
        identifier: record.identifier,
        name: record.name,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::memory::MemorySectionHandler;

    /// Counts handler calls so tests can prove that validation failures
    /// cause zero persistence side effects.
    #[derive(Default)]
    struct RecordingHandler {
        inner: MemorySectionHandler,
        calls: AtomicUsize,
    }

    impl RecordingHandler {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn tick(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl SectionHandler for RecordingHandler {
        fn create(&self, name: &str, identifier: &str) -> Result<SectionRecord> {
            self.tick();
            self.inner.create(name, identifier)
        }

        fn update(&self, id: SectionId, name: &str, identifier: &str) -> Result<SectionRecord> {
            self.tick();
            self.inner.update(id, name, identifier)
        }

        fn load(&self, id: SectionId) -> Result<SectionRecord> {
            self.tick();
            self.inner.load(id)
        }

        fn load_by_identifier(&self, identifier: &str) -> Result<SectionRecord> {
            self.tick();
            self.inner.load_by_identifier(identifier)
        }

        fn load_all(&self) -> Result<Vec<SectionRecord>> {
            self.tick();
            self.inner.load_all()
        }

        fn assignments_count(&self, id: SectionId) -> Result<u64> {
            self.tick();
            self.inner.assignments_count(id)
        }

        fn assign(&self, id: SectionId, content_id: ContentId) -> Result<()> {
            self.tick();
            self.inner.assign(id, content_id)
        }

        fn delete(&self, id: SectionId) -> Result<()> {
            self.tick();
            self.inner.delete(id)
        }
    }

    fn service() -> SectionService<RecordingHandler> {
        SectionService::new(RecordingHandler::default())
    }

    fn create_struct(name: &str, identifier: &str) -> SectionCreateStruct {
        SectionCreateStruct {
            name: name.to_owned(),
            identifier: identifier.to_owned(),
        }
    }

    #[test]
    fn create_assigns_identity_and_round_trips() {
        let service = service();
        let section = service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();

        assert_eq!(service.load_section(section.id).unwrap(), section);
        assert_eq!(
            service.load_section_by_identifier("standard").unwrap(),
            section
        );
    }

    #[test]
    fn duplicate_identifier_fails_the_second_create() {
        let service = service();
        service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();

        let result = service.create_section(create_struct("Other", "standard"));
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                property: "identifier",
                ..
            })
        ));
    }

    #[test]
    fn create_validates_before_any_handler_call() {
        let service = service();

        assert!(matches!(
            service.create_section(create_struct("", "standard")),
            Err(RepositoryError::InvalidValue { property: "name", .. })
        ));
        assert!(matches!(
            service.create_section(create_struct("Standard", "")),
            Err(RepositoryError::InvalidValue {
                property: "identifier",
                ..
            })
        ));
        assert_eq!(service.handler().call_count(), 0);
    }

    #[test]
    fn update_keeps_unset_fields() {
        let service = service();
        let section = service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();

        let updated = service
            .update_section(
                &section,
                SectionUpdateStruct {
                    name: Some("Renamed".to_owned()),
                    identifier: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.identifier, "standard");
        assert_eq!(updated.id, section.id);
    }

    #[test]
    fn update_rejects_identifier_of_another_section() {
        let service = service();
        let standard = service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();
        service
            .create_section(create_struct("Media", "media"))
            .unwrap();

        let result = service.update_section(
            &standard,
            SectionUpdateStruct {
                name: None,
                identifier: Some("media".to_owned()),
            },
        );
        assert!(matches!(result, Err(RepositoryError::AlreadyExists { .. })));
    }

    #[test]
    fn update_accepts_the_sections_own_identifier() {
        let service = service();
        let section = service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();

        let updated = service
            .update_section(
                &section,
                SectionUpdateStruct {
                    name: Some("Renamed".to_owned()),
                    identifier: Some("standard".to_owned()),
                },
            )
            .unwrap();
        assert_eq!(updated.identifier, "standard");
    }

    #[test]
    fn update_of_missing_section_is_not_found() {
        let service = service();
        let ghost = Section {
            id: 999,
            identifier: "ghost".to_owned(),
            name: "Ghost".to_owned(),
        };

        assert!(matches!(
            service.update_section(&ghost, SectionUpdateStruct::default()),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn load_sections_returns_all_in_id_order() {
        let service = service();
        let first = service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();
        let second = service
            .create_section(create_struct("Media", "media"))
            .unwrap();

        assert_eq!(service.load_sections().unwrap(), vec![first, second]);
    }

    #[test]
    fn delete_with_assigned_contents_is_bad_state() {
        let service = service();
        let section = service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();
        service.assign_section(&section, 42).unwrap();

        assert_eq!(service.count_assigned_contents(&section).unwrap(), 1);
        assert!(matches!(
            service.delete_section(&section),
            Err(RepositoryError::BadState { .. })
        ));
    }

    #[test]
    fn delete_succeeds_after_contents_are_reassigned() {
        let service = service();
        let standard = service
            .create_section(create_struct("Standard", "standard"))
            .unwrap();
        let media = service
            .create_section(create_struct("Media", "media"))
            .unwrap();

        service.assign_section(&standard, 42).unwrap();
        // Assignment overrides: moving the content empties `standard`.
        service.assign_section(&media, 42).unwrap();

        service.delete_section(&standard).unwrap();
        assert!(matches!(
            service.load_section(standard.id),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn assign_to_missing_section_is_not_found() {
        let service = service();
        let ghost = Section {
            id: 999,
            identifier: "ghost".to_owned(),
            name: "Ghost".to_owned(),
        };

        assert!(matches!(
            service.assign_section(&ghost, 1),
            Err(RepositoryError::NotFound { .. })
        ));
    }

    #[test]
    fn load_by_empty_identifier_is_invalid_without_side_effects() {
        let service = service();

        assert!(matches!(
            service.load_section_by_identifier(""),
            Err(RepositoryError::InvalidValue { .. })
        ));
        assert_eq!(service.handler().call_count(), 0);
    }
}
