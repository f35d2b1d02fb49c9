/* 📖 # Why have filekeep_base as a core library?
filekeep_base provides the error type, logging setup and the storage capability used by the engine.
Keeping them apart from the engine lets storage backends be written without pulling in codecs.
*/

pub mod error;
pub mod location;
pub mod storage;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{ErrorKind, FilekeepError, FilekeepResult, ResultExt};
pub use location::StorageLocation;
pub use storage::{FileStorage, MemoryStorage, ReadSeek, Storage, StorageCall, StorageHandle};
