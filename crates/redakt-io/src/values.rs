//! Public value objects of the ingestion service.
//!
//! [`BinaryFile`] derives `Serialize` and `Deserialize` so it can be
//! handed directly to API layers; the create struct carries an open byte
//! stream and is therefore transient and non-serializable.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BinaryFileId
// ---------------------------------------------------------------------------

/// Opaque identity of a stored binary file.
///
/// Assigned by the [`StorageHandler`](crate::StorageHandler) at create
/// time.  Deliberately distinct from the internal storage path: callers
/// never learn where the bytes live, only how to name them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BinaryFileId(String);

impl BinaryFileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for BinaryFileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BinaryFileId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for BinaryFileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// BinaryFile
// ---------------------------------------------------------------------------

/// An immutable stored binary file as seen by API callers.
///
/// Produced by `create_binary_file` (new storage-side identity) or
/// `load_binary_file` (rehydrated from an existing identity).  There is
/// no update operation: binary files are create-or-delete only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BinaryFile {
    /// Opaque identity assigned by the storage handler.
    pub id: BinaryFileId,
    /// Size in bytes.
    pub size: i64,
    /// Last modification time, storage-assigned.
    pub mtime: DateTime<Utc>,
    /// Creation time, storage-assigned.
    pub ctime: DateTime<Utc>,
    /// Mime type of the content.
    pub mime_type: String,
    /// Public-facing locator, distinct from the internal storage path.
    pub uri: String,
    /// Original (human-readable) file name.
    pub original_file: String,
}

// ---------------------------------------------------------------------------
// BinaryFileCreateStruct
// ---------------------------------------------------------------------------

/// Caller-populated input describing a new binary file before persistence.
///
/// All fields must be set before `create_binary_file` is called; the
/// service validates them fail-fast, before any I/O happens.  On a
/// successful create the `input_stream` is handed to the storage handler,
/// which reads it to completion and drops it; the caller must not reuse
/// the stream afterwards (the struct is consumed by value, so the borrow
/// checker enforces this).
pub struct BinaryFileCreateStruct {
    /// Mime type of the content, e.g. `image/png`.
    pub mime_type: String,
    /// Source location of the bytes to ingest.  Opaque to the service
    /// beyond being readable; becomes the storage-facing `path`.
    pub uri: String,
    /// Human-readable name retained alongside the content.
    pub original_file_name: String,
    /// Byte length of the content.
    pub size: i64,
    /// Open read stream over the bytes.  `None` fails validation.
    pub input_stream: Option<Box<dyn Read + Send>>,
}

impl fmt::Debug for BinaryFileCreateStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryFileCreateStruct")
            .field("mime_type", &self.mime_type)
            .field("uri", &self.uri)
            .field("original_file_name", &self.original_file_name)
            .field("size", &self.size)
            .field("input_stream", &self.input_stream.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// UploadedFile
// ---------------------------------------------------------------------------

/// Descriptor of a completed upload transfer, built once at the system
/// boundary by the upload layer.
///
/// Constructing this type is the witness that the file came through the
/// upload pipeline; downstream code does not re-check its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Path of the temporary upload buffer on local disk.
    pub tmp_path: PathBuf,
    /// Mime type reported by the transfer.
    pub mime_type: String,
    /// File name as submitted by the uploading client.
    pub original_name: String,
    /// Byte length reported by the transfer.
    pub size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_file_id_serializes_transparently() {
        let id = BinaryFileId::from("images/4cf1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"images/4cf1\"");
    }

    #[test]
    fn binary_file_survives_a_serde_round_trip() {
        let file = BinaryFile {
            id: BinaryFileId::from("4cf1"),
            size: 12,
            mtime: Utc::now(),
            ctime: Utc::now(),
            mime_type: "image/png".to_owned(),
            uri: "/content/4cf1".to_owned(),
            original_file: "photo.png".to_owned(),
        };

        let json = serde_json::to_string(&file).unwrap();
        let back: BinaryFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, file);
    }
}
