//! The binary file ingestion service.
//!
//! Validates and normalizes binary-content metadata, delegates durable
//! storage and retrieval to a [`StorageHandler`], and translates between
//! the public value objects and the storage-facing structs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::IoConfig;
use crate::error::{IoError, Result};
use crate::handler::{StorageCreateStruct, StorageHandler, StorageObject};
use crate::values::{BinaryFile, BinaryFileCreateStruct, BinaryFileId, UploadedFile};

const CREATE_STRUCT: &str = "BinaryFileCreateStruct";
const BINARY_FILE: &str = "BinaryFile";

/// Synchronous ingestion service over a [`StorageHandler`].
///
/// Every operation is a direct, blocking call into the handler.  The
/// service provides no locking, deduplication, idempotency, timeout, or
/// retry policy; concurrent creates against the same target are resolved
/// by the handler.
pub struct IoService<H> {
    handler: H,
    config: IoConfig,
}

impl<H: StorageHandler> IoService<H> {
    pub fn new(handler: H, config: IoConfig) -> Self {
        Self { handler, config }
    }

    /// Access the underlying storage handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Build a create struct from a completed upload transfer.
    ///
    /// Opens one read stream over the upload buffer and does not close
    /// it: ownership moves to the caller, who passes the struct into
    /// [`create_binary_file`](Self::create_binary_file) or drops it.
    pub fn new_create_struct_from_upload(
        &self,
        uploaded_file: &UploadedFile,
    ) -> Result<BinaryFileCreateStruct> {
        if uploaded_file.tmp_path.as_os_str().is_empty() {
            return Err(IoError::invalid_argument(
                "uploaded_file",
                "tmp_path is empty",
            ));
        }

        let metadata = std::fs::metadata(&uploaded_file.tmp_path).map_err(|e| {
            IoError::invalid_argument(
                "uploaded_file",
                format!(
                    "upload buffer is unreadable: {}: {e}",
                    uploaded_file.tmp_path.display()
                ),
            )
        })?;
        if !metadata.is_file() {
            return Err(IoError::invalid_argument(
                "uploaded_file",
                format!(
                    "upload buffer is not a regular file: {}",
                    uploaded_file.tmp_path.display()
                ),
            ));
        }

        let stream = File::open(&uploaded_file.tmp_path).map_err(|e| {
            IoError::invalid_argument("uploaded_file", format!("failed to open read stream: {e}"))
        })?;

        Ok(BinaryFileCreateStruct {
            mime_type: uploaded_file.mime_type.clone(),
            uri: uploaded_file.tmp_path.to_string_lossy().into_owned(),
            original_file_name: uploaded_file.original_name.clone(),
            size: uploaded_file.size,
            input_stream: Some(Box::new(stream)),
        })
    }

    /// Build a create struct from a local file.
    ///
    /// Mime type is sniffed from the path, size comes from filesystem
    /// metadata, and the original name is the path's base name.
    pub fn new_create_struct_from_local_file(
        &self,
        local_file: &Path,
    ) -> Result<BinaryFileCreateStruct> {
        if local_file.as_os_str().is_empty() {
            return Err(IoError::invalid_argument("local_file", "path is empty"));
        }

        let metadata = std::fs::metadata(local_file).map_err(|e| {
            IoError::invalid_argument(
                "local_file",
                format!(
                    "file does not exist or is unreadable: {}: {e}",
                    local_file.display()
                ),
            )
        })?;
        if !metadata.is_file() {
            return Err(IoError::invalid_argument(
                "local_file",
                format!("not a regular file: {}", local_file.display()),
            ));
        }

        let original_file_name = local_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| IoError::invalid_argument("local_file", "path has no file name"))?;

        let stream = File::open(local_file).map_err(|e| {
            IoError::invalid_argument("local_file", format!("failed to open read stream: {e}"))
        })?;

        let mime_type = mime_guess::from_path(local_file)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();

        Ok(BinaryFileCreateStruct {
            mime_type,
            uri: local_file.to_string_lossy().into_owned(),
            original_file_name,
            size: metadata.len() as i64,
            input_stream: Some(Box::new(stream)),
        })
    }

    /// Create a binary file in the repository.
    ///
    /// Validates the struct fail-fast, naming the first offending
    /// property before any storage call, then delegates persistence to
    /// the handler.  Storage failures propagate unmodified, no retry.
    pub fn create_binary_file(&self, create_struct: BinaryFileCreateStruct) -> Result<BinaryFile> {
        if create_struct.mime_type.is_empty() {
            return Err(IoError::invalid_value("mime_type", CREATE_STRUCT, "<empty>"));
        }
        if create_struct.uri.is_empty() {
            return Err(IoError::invalid_value("uri", CREATE_STRUCT, "<empty>"));
        }
        if create_struct.original_file_name.is_empty() {
            return Err(IoError::invalid_value(
                "original_file_name",
                CREATE_STRUCT,
                "<empty>",
            ));
        }
        if create_struct.size < 0 {
            return Err(IoError::invalid_value(
                "size",
                CREATE_STRUCT,
                create_struct.size.to_string(),
            ));
        }
        let input_stream = match create_struct.input_stream {
            Some(stream) => stream,
            None => {
                return Err(IoError::invalid_value(
                    "input_stream",
                    CREATE_STRUCT,
                    "<missing>",
                ))
            }
        };

        // Single ownership transfer: from here on the handler is
        // responsible for reading the stream to completion and closing it.
        let spi_create_struct = StorageCreateStruct {
            path: create_struct.uri,
            size: create_struct.size,
            mime_type: create_struct.mime_type,
            original_file: create_struct.original_file_name,
            input_stream,
        };

        let spi_binary_file = self.handler.create(spi_create_struct)?;
        debug!(
            id = %spi_binary_file.id,
            size = spi_binary_file.size,
            mime_type = %spi_binary_file.mime_type,
            "created binary file"
        );

        Ok(build_binary_file(spi_binary_file))
    }

    /// Delete the binary file with `file.id`.
    ///
    /// A handler `NotFound` propagates as an error here, unlike
    /// [`load_binary_file`](Self::load_binary_file).
    pub fn delete_binary_file(&self, file: &BinaryFile) -> Result<()> {
        if file.id.is_empty() {
            return Err(IoError::invalid_value("id", BINARY_FILE, "<empty>"));
        }

        self.handler.delete(&file.id)?;
        debug!(id = %file.id, "deleted binary file");
        Ok(())
    }

    /// Load the binary file with the given identity.
    ///
    /// Returns `Ok(None)` when the handler reports the identity absent;
    /// errors are reserved for validation and opaque handler failures.
    pub fn load_binary_file(&self, id: &BinaryFileId) -> Result<Option<BinaryFile>> {
        if id.is_empty() {
            return Err(IoError::invalid_value("id", BINARY_FILE, "<empty>"));
        }

        match self.handler.load(id) {
            Ok(spi_binary_file) => Ok(Some(build_binary_file(spi_binary_file))),
            Err(IoError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Open a read stream over the file's content.  The caller owns the
    /// stream and closes it by dropping it.
    pub fn file_input_stream(&self, file: &BinaryFile) -> Result<Box<dyn Read + Send>> {
        if file.id.is_empty() {
            return Err(IoError::invalid_value("id", BINARY_FILE, "<empty>"));
        }

        self.handler.file_resource(&file.id)
    }

    /// Return the file's full content as an in-memory buffer.
    ///
    /// When `max_contents_size` is configured, objects above the bound
    /// fail with `ContentsTooLarge` before any bytes are read.
    pub fn file_contents(&self, file: &BinaryFile) -> Result<Vec<u8>> {
        if file.id.is_empty() {
            return Err(IoError::invalid_value("id", BINARY_FILE, "<empty>"));
        }

        if let Some(max) = self.config.max_contents_size {
            let object = self.handler.load(&file.id)?;
            if object.size > 0 && object.size as u64 > max {
                return Err(IoError::ContentsTooLarge {
                    size: object.size,
                    max,
                });
            }
        }

        self.handler.file_contents(&file.id)
    }
}

/// Map a storage-facing object into the public value representation.
fn build_binary_file(spi_binary_file: StorageObject) -> BinaryFile {
    BinaryFile {
        id: spi_binary_file.id,
        size: spi_binary_file.size,
        mtime: spi_binary_file.mtime,
        ctime: spi_binary_file.ctime,
        mime_type: spi_binary_file.mime_type,
        uri: spi_binary_file.uri,
        original_file: spi_binary_file.original_file,
    }
}
