//! In-memory [`SectionHandler`] backend for tests and embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{RepositoryError, Result};
use crate::handler::{SectionHandler, SectionRecord};
use crate::section::{ContentId, SectionId};

#[derive(Debug, Default)]
struct State {
    next_id: SectionId,
    sections: HashMap<SectionId, SectionRecord>,
    /// content -> section; a content belongs to at most one section.
    assignments: HashMap<ContentId, SectionId>,
}

/// In-memory section handler backed by hash maps.
#[derive(Debug, Default)]
pub struct MemorySectionHandler {
    state: Mutex<State>,
}

impl MemorySectionHandler {
    /// Create a new, empty in-memory handler.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SectionHandler for MemorySectionHandler {
    fn create(&self, name: &str, identifier: &str) -> Result<SectionRecord> {
        let mut state = self.lock();
        state.next_id += 1;
        let record = SectionRecord {
            id: state.next_id,
            identifier: identifier.to_owned(),
            name: name.to_owned(),
        };
        state.sections.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, id: SectionId, name: &str, identifier: &str) -> Result<SectionRecord> {
        let mut state = self.lock();
        let record = state
            .sections
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::section_not_found(id.to_string()))?;
        record.name = name.to_owned();
        record.identifier = identifier.to_owned();
        Ok(record.clone())
    }

    fn load(&self, id: SectionId) -> Result<SectionRecord> {
        self.lock()
            .sections
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::section_not_found(id.to_string()))
    }

    fn load_by_identifier(&self, identifier: &str) -> Result<SectionRecord> {
        self.lock()
            .sections
            .values()
            .find(|record| record.identifier == identifier)
            .cloned()
            .ok_or_else(|| RepositoryError::section_not_found(identifier))
    }

    fn load_all(&self) -> Result<Vec<SectionRecord>> {
        let mut all: Vec<_> = self.lock().sections.values().cloned().collect();
        all.sort_by_key(|record| record.id);
        Ok(all)
    }

    fn assignments_count(&self, id: SectionId) -> Result<u64> {
        let state = self.lock();
        Ok(state
            .assignments
            .values()
            .filter(|section_id| **section_id == id)
            .count() as u64)
    }

    fn assign(&self, id: SectionId, content_id: ContentId) -> Result<()> {
        let mut state = self.lock();
        if !state.sections.contains_key(&id) {
            return Err(RepositoryError::section_not_found(id.to_string()));
        }
        state.assignments.insert(content_id, id);
        Ok(())
    }

    fn delete(&self, id: SectionId) -> Result<()> {
        match self.lock().sections.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::section_not_found(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_assigned_monotonically() {
        let handler = MemorySectionHandler::new();
        let first = handler.create("Standard", "standard").unwrap();
        let second = handler.create("Media", "media").unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn assign_overrides_previous_section() {
        let handler = MemorySectionHandler::new();
        let first = handler.create("Standard", "standard").unwrap();
        let second = handler.create("Media", "media").unwrap();

        handler.assign(first.id, 42).unwrap();
        assert_eq!(handler.assignments_count(first.id).unwrap(), 1);

        handler.assign(second.id, 42).unwrap();
        assert_eq!(handler.assignments_count(first.id).unwrap(), 0);
        assert_eq!(handler.assignments_count(second.id).unwrap(), 1);
    }

    #[test]
    fn load_by_identifier_finds_sections() {
        let handler = MemorySectionHandler::new();
        handler.create("Standard", "standard").unwrap();

        let record = handler.load_by_identifier("standard").unwrap();
        assert_eq!(record.name, "Standard");
        assert!(matches!(
            handler.load_by_identifier("missing"),
            Err(RepositoryError::NotFound { .. })
        ));
    }
}
