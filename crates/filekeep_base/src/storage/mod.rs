/* 📖 # What is the storage layer?

The storage layer is the narrow capability the file manager writes through: open a
location for reading, open it for writing, check whether it exists. Code depends on the
Storage trait, never on MemoryStorage or FileStorage directly.
*/

pub mod file;
pub mod memory;
mod traits;

pub use file::FileStorage;
pub use memory::{MemoryStorage, StorageCall};
pub use traits::{ReadSeek, Storage, StorageHandle};
