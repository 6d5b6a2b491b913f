//! Storage handler SPI.
//!
//! The handler owns durability and identity assignment.  The ingestion
//! service talks to it exclusively through [`StorageHandler`], using the
//! storage-facing structs below rather than the public value objects.

use std::fmt;
use std::io::Read;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::values::BinaryFileId;

/// Storage-facing create input.
///
/// Ownership of `input_stream` transfers to the handler with this struct.
/// The handler must read the stream to completion and drop it on every
/// path, success or failure.
pub struct StorageCreateStruct {
    /// Target storage path (the public `uri` of the create struct).
    pub path: String,
    /// Expected byte length.
    pub size: i64,
    /// Mime type of the content.
    pub mime_type: String,
    /// Original file name to retain.
    pub original_file: String,
    /// Open read stream over the bytes to persist.
    pub input_stream: Box<dyn Read + Send>,
}

impl fmt::Debug for StorageCreateStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCreateStruct")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("mime_type", &self.mime_type)
            .field("original_file", &self.original_file)
            .finish()
    }
}

/// Storage-facing record of a persisted object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    /// Handler-assigned opaque identity.
    pub id: BinaryFileId,
    /// Internal storage path.  Not exposed on the public value object.
    pub path: String,
    /// Size in bytes.
    pub size: i64,
    /// Mime type of the content.
    pub mime_type: String,
    /// Public-facing locator.
    pub uri: String,
    /// Retained original file name.
    pub original_file: String,
    /// Last modification time.
    pub mtime: DateTime<Utc>,
    /// Creation time.
    pub ctime: DateTime<Utc>,
}

/// Persistence abstraction for binary objects.
///
/// All operations are synchronous and blocking.  Implementations report
/// an absent identity as [`IoError::NotFound`](crate::IoError::NotFound)
/// and any opaque backend failure as
/// [`IoError::Handler`](crate::IoError::Handler); the service layer
/// propagates the latter unmodified, with no retry.
pub trait StorageHandler: Send + Sync {
    /// Persist the bytes read from the struct's stream and return the
    /// stored object's identity and metadata.
    fn create(&self, create_struct: StorageCreateStruct) -> Result<StorageObject>;

    /// Remove the object with the given identity.
    fn delete(&self, id: &BinaryFileId) -> Result<()>;

    /// Load metadata for the object with the given identity.
    fn load(&self, id: &BinaryFileId) -> Result<StorageObject>;

    /// Open a read stream over the object's content.  The caller owns
    /// the stream and closes it by dropping it.
    fn file_resource(&self, id: &BinaryFileId) -> Result<Box<dyn Read + Send>>;

    /// Return the object's full content as an in-memory buffer.
    fn file_contents(&self, id: &BinaryFileId) -> Result<Vec<u8>>;
}
