//! # redakt-repository
//!
//! Section directory service for the Redakt content repository.
//!
//! Sections are small lookup entities used to categorize content.  The
//! synchronous [`SectionService`] validates inputs, enforces the two
//! integrity invariants (unique identifier, no delete while contents are
//! still assigned), and delegates persistence to a [`SectionHandler`].

pub mod handler;
pub mod memory;
pub mod section;
pub mod service;

mod error;

pub use error::{RepositoryError, Result};
pub use handler::{SectionHandler, SectionRecord};
pub use memory::MemorySectionHandler;
pub use section::{ContentId, Section, SectionCreateStruct, SectionId, SectionUpdateStruct};
pub use service::SectionService;
