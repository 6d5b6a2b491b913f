//! In-memory [`StorageHandler`] backend.
//!
//! Holds drained object content in a map guarded by a mutex.  Useful for
//! tests and for embedding the ingestion service without a durable
//! backend.  Identities are freshly assigned uuid-v4 strings, never the
//! storage path.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{IoError, Result};
use crate::handler::{StorageCreateStruct, StorageHandler, StorageObject};
use crate::values::BinaryFileId;

/// A single stored object.
#[derive(Debug, Clone)]
struct Entry {
    data: Vec<u8>,
    path: String,
    mime_type: String,
    uri: String,
    original_file: String,
    mtime: DateTime<Utc>,
    ctime: DateTime<Utc>,
}

impl Entry {
    fn to_object(&self, id: &BinaryFileId) -> StorageObject {
        StorageObject {
            id: id.clone(),
            path: self.path.clone(),
            size: self.data.len() as i64,
            mime_type: self.mime_type.clone(),
            uri: self.uri.clone(),
            original_file: self.original_file.clone(),
            mtime: self.mtime,
            ctime: self.ctime,
        }
    }
}

/// In-memory storage handler backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStorageHandler {
    objects: Mutex<HashMap<BinaryFileId, Entry>>,
}

impl MemoryStorageHandler {
    /// Create a new, empty in-memory handler.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<BinaryFileId, Entry>> {
        // A poisoned mutex means a previous caller panicked mid-insert;
        // the map itself is still structurally sound.
        self.objects.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StorageHandler for MemoryStorageHandler {
    fn create(&self, create_struct: StorageCreateStruct) -> Result<StorageObject> {
        let StorageCreateStruct {
            path,
            size: _,
            mime_type,
            original_file,
            mut input_stream,
        } = create_struct;

        // Drain the stream to completion; dropping it afterwards closes
        // it on success and failure alike.
        let mut data = Vec::new();
        input_stream
            .read_to_end(&mut data)
            .map_err(|e| IoError::Handler(format!("failed to read input stream: {e}")))?;
        drop(input_stream);

        let id = BinaryFileId::new(Uuid::new_v4().to_string());
        let now = Utc::now();
        let entry = Entry {
            data,
            uri: path.clone(),
            path,
            mime_type,
            original_file,
            mtime: now,
            ctime: now,
        };
        let object = entry.to_object(&id);

        self.lock().insert(id, entry);
        Ok(object)
    }

    fn delete(&self, id: &BinaryFileId) -> Result<()> {
        match self.lock().remove(id) {
            Some(_) => Ok(()),
            None => Err(IoError::NotFound(id.to_string())),
        }
    }

    fn load(&self, id: &BinaryFileId) -> Result<StorageObject> {
        self.lock()
            .get(id)
            .map(|entry| entry.to_object(id))
            .ok_or_else(|| IoError::NotFound(id.to_string()))
    }

    fn file_resource(&self, id: &BinaryFileId) -> Result<Box<dyn Read + Send>> {
        let data = self.file_contents(id)?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn file_contents(&self, id: &BinaryFileId) -> Result<Vec<u8>> {
        self.lock()
            .get(id)
            .map(|entry| entry.data.clone())
            .ok_or_else(|| IoError::NotFound(id.to_string()))
    }
}
