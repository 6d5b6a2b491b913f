//! # redakt-io
//!
//! Binary file ingestion for the Redakt content repository.
//!
//! The crate exposes a synchronous [`IoService`] that validates
//! caller-supplied create structs, hands the actual byte shuffling to a
//! [`StorageHandler`] implementation, and maps storage-layer results back
//! into the public [`BinaryFile`] value object.  Durability and identity
//! assignment belong to the handler; this layer owns validation and the
//! translation between the public and storage-facing representations.

pub mod config;
pub mod handler;
pub mod memory;
pub mod service;
pub mod values;

mod error;

pub use config::IoConfig;
pub use error::{IoError, Result};
pub use handler::{StorageCreateStruct, StorageHandler, StorageObject};
pub use memory::MemoryStorageHandler;
pub use service::IoService;
pub use values::{BinaryFile, BinaryFileCreateStruct, BinaryFileId, UploadedFile};
