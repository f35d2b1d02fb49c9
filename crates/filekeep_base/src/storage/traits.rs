use std::io::{Read, Seek, Write};
use std::sync::Arc;

use crate::FilekeepResult;
use crate::location::StorageLocation;

/// Trait combining Read + Seek for storage read streams.
///
/// Lets backends hand out opaque handles (real files, in-memory buffers, etc.)
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/* 📖 # Why is Storage a trait instead of a struct?

The file manager only ever asks for three things: does a location exist, give me a
stream to read it, give me a stream to write it. Everything else about where the bytes
live belongs to the backend. MemoryStorage answers from a HashMap, FileStorage from the
local filesystem.
*/

/// Storage capability: opens byte streams for named locations.
///
/// Failures are reported as [`crate::ErrorKind::FileError`] carrying the underlying
/// `io::Error`, whose `io::ErrorKind` tells callers whether the location was missing
/// (`NotFound`) or could not be accessed for another reason.
pub trait Storage: std::fmt::Debug + Send + Sync + 'static {
    /// Check whether something is stored at the given location.
    fn exists(&self, location: &StorageLocation) -> bool;

    /// Open a location for reading.
    ///
    /// Fails with an `io::ErrorKind::NotFound` file error if the location does not exist.
    fn read_stream(&self, location: &StorageLocation) -> FilekeepResult<Box<dyn ReadSeek>>;

    /// Open a location for writing, replacing any previous content.
    ///
    /// Written bytes are committed when the stream is flushed or dropped.
    fn write_stream(&self, location: &StorageLocation) -> FilekeepResult<Box<dyn Write>>;
}

/// Handle to a Storage implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Storage>` for cheap cloning.
///
/// # Examples
///
/// ```
/// use filekeep_base::{MemoryStorage, StorageHandle, StorageLocation};
///
/// let storage = StorageHandle::new(MemoryStorage::new());
/// let clone = storage.clone(); // shares the same backend
/// assert!(!clone.exists(&StorageLocation::from("missing.txt")));
/// ```
#[derive(Debug, Clone)]
pub struct StorageHandle(Arc<dyn Storage>);

impl StorageHandle {
    /// Create a new StorageHandle from a Storage implementation.
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self(Arc::new(storage))
    }
}

impl std::ops::Deref for StorageHandle {
    type Target = dyn Storage;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
