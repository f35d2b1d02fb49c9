use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::location::StorageLocation;
use crate::{FilekeepError, FilekeepResult};

use super::traits::{ReadSeek, Storage};

/* 📖 # Why use HashMap for MemoryStorage?

MemoryStorage keeps every stored object in memory behind an Arc<Mutex<_>>:
1. **Speed**: No filesystem I/O, deterministic and fast for unit tests
2. **Isolation**: No side effects on the real filesystem
3. **Control**: Failures can be injected per location and every call is recorded

Clones share the same state, so a test can keep one clone for inspection while the
file manager owns another through a StorageHandle.
*/

/// A storage call recorded by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Exists(StorageLocation),
    Read(StorageLocation),
    Write(StorageLocation),
}

#[derive(Debug, Default)]
struct MemoryState {
    files: HashMap<StorageLocation, Vec<u8>>,
    read_failures: HashMap<StorageLocation, io::ErrorKind>,
    write_failures: HashMap<StorageLocation, io::ErrorKind>,
    commit_failures: HashMap<StorageLocation, io::ErrorKind>,
    calls: Vec<StorageCall>,
}

/// In-memory storage implementation.
///
/// # Examples
///
/// ```
/// use filekeep_base::{MemoryStorage, Storage, StorageLocation};
/// use std::io::Read;
///
/// let storage = MemoryStorage::new();
/// storage.add_file("test.txt", b"content".to_vec());
///
/// let mut content = String::new();
/// storage
///     .read_stream(&StorageLocation::from("test.txt"))
///     .unwrap()
///     .read_to_string(&mut content)
///     .unwrap();
/// assert_eq!(content, "content");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    /// Create a new empty MemoryStorage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `content` at `location`, replacing what was there.
    pub fn add_file(&self, location: impl Into<StorageLocation>, content: Vec<u8>) {
        self.state.lock().files.insert(location.into(), content);
    }

    pub fn remove_file(&self, location: &str) -> Option<Vec<u8>> {
        self.state.lock().files.remove(location)
    }

    /// Bytes currently stored at `location`.
    pub fn file_contents(&self, location: &str) -> Option<Vec<u8>> {
        self.state.lock().files.get(location).cloned()
    }

    /// Content at `location` decoded as UTF-8, lossily.
    pub fn file_to_string(&self, location: &str) -> Option<String> {
        self.file_contents(location)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Make every read of `location` fail with `kind`.
    pub fn fail_reads(&self, location: impl Into<StorageLocation>, kind: io::ErrorKind) {
        self.state.lock().read_failures.insert(location.into(), kind);
    }

    /// Make opening `location` for writing fail with `kind`.
    pub fn fail_writes(&self, location: impl Into<StorageLocation>, kind: io::ErrorKind) {
        self.state.lock().write_failures.insert(location.into(), kind);
    }

    /// Let `location` open for writing but fail with `kind` when the bytes are committed.
    pub fn fail_commits(&self, location: impl Into<StorageLocation>, kind: io::ErrorKind) {
        self.state.lock().commit_failures.insert(location.into(), kind);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<StorageCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

fn injected_error(location: &StorageLocation, kind: io::ErrorKind) -> Box<FilekeepError> {
    Box::new(FilekeepError::file(
        PathBuf::from(location.as_str()),
        io::Error::new(kind, format!("injected failure for {}", location)),
    ))
}

impl Storage for MemoryStorage {
    #[instrument(skip(self), fields(location = %location))]
    fn exists(&self, location: &StorageLocation) -> bool {
        let mut state = self.state.lock();
        state.calls.push(StorageCall::Exists(location.clone()));
        state.files.contains_key(location)
    }

    #[instrument(skip(self), fields(location = %location))]
    fn read_stream(&self, location: &StorageLocation) -> FilekeepResult<Box<dyn ReadSeek>> {
        let mut state = self.state.lock();
        state.calls.push(StorageCall::Read(location.clone()));
        if let Some(kind) = state.read_failures.get(location) {
            debug!(%location, ?kind, "injected read failure");
            return Err(injected_error(location, *kind));
        }
        let content = state
            .files
            .get(location)
            .ok_or_else(|| {
                Box::new(FilekeepError::file(
                    PathBuf::from(location.as_str()),
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("File not found: {}", location),
                    ),
                ))
            })?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    #[instrument(skip(self), fields(location = %location))]
    fn write_stream(&self, location: &StorageLocation) -> FilekeepResult<Box<dyn Write>> {
        let mut state = self.state.lock();
        state.calls.push(StorageCall::Write(location.clone()));
        if let Some(kind) = state.write_failures.get(location) {
            debug!(%location, ?kind, "injected write failure");
            return Err(injected_error(location, *kind));
        }
        Ok(Box::new(MemoryWriter {
            location: location.clone(),
            state: Arc::clone(&self.state),
            buffer: Vec::new(),
        }))
    }
}

/// Write stream that stores its buffer in the shared state on flush and on drop.
struct MemoryWriter {
    location: StorageLocation,
    state: Arc<Mutex<MemoryState>>,
    buffer: Vec<u8>,
}

impl MemoryWriter {
    fn commit(&self) -> io::Result<()> {
        let mut state = self.state.lock();
        if let Some(kind) = state.commit_failures.get(&self.location) {
            return Err(io::Error::new(
                *kind,
                format!("injected commit failure for {}", self.location),
            ));
        }
        state
            .files
            .insert(self.location.clone(), self.buffer.clone());
        Ok(())
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit()
    }
}

impl Drop for MemoryWriter {
    fn drop(&mut self) {
        // Errors cannot leave drop; a failing commit was already reported by flush().
        let _ = self.commit();
    }
}
