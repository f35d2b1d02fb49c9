pub mod encoding;
pub mod error;
pub mod manager;
mod manager_tests;
pub mod persist;
pub mod recent;
pub mod sanitize;
pub mod serializer;
pub mod settings;

pub use encoding::TextEncoding;
pub use error::{FileErrorKind, FileOperationError, ManagerError, ManagerResult};
pub use manager::FileManager;
pub use persist::Persistable;
pub use recent::RecencyList;
pub use sanitize::remove_invalid_file_name_characters;
pub use serializer::{JsonSerializer, Serializer, TomlSerializer};
pub use settings::{DEFAULT_RECENT_FILES_LOCATION, FileManagerSettings, load_settings};
