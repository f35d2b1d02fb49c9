use std::error::Error as StdError;
use std::fmt;
use std::io;

use filekeep_base::{FilekeepError, StorageLocation};

/* 📖 # How are file manager failures classified?

Every failure of a save or load ends up in one of three kinds:
- NotFound: the location, or a directory on the way to it, does not exist
- InsufficientPermissions: any other storage failure (access denied, locked, disk full)
- SerializationError: the serializer rejected the bytes or the value

Which kind applies depends on who failed. Storage failures are split by their
io::ErrorKind; anything the serializer reports is a SerializationError even when the
underlying cause was the stream. Argument problems never get here: they are a
ManagerError::InvalidArgument raised before any storage call.
*/

/// Why a file operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileErrorKind {
    /// The file or a directory on its path was not found.
    NotFound,
    /// The storage refused access or failed for another I/O reason.
    InsufficientPermissions,
    /// The object could not be serialized or deserialized.
    SerializationError,
}

impl FileErrorKind {
    /// Classify an error reported by a Storage backend.
    pub fn from_storage_error(error: &FilekeepError) -> Self {
        match error.io_error_kind() {
            Some(io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => FileErrorKind::NotFound,
            _ => FileErrorKind::InsufficientPermissions,
        }
    }
}

/// A classified failure while reading or writing a storage location.
#[derive(Debug)]
pub struct FileOperationError {
    kind: FileErrorKind,
    writing: bool,
    location: StorageLocation,
    cause: Box<FilekeepError>,
}

impl FileOperationError {
    pub fn new(
        kind: FileErrorKind,
        writing: bool,
        location: StorageLocation,
        cause: Box<FilekeepError>,
    ) -> Self {
        Self {
            kind,
            writing,
            location,
            cause,
        }
    }

    /// Wrap a failure reported by Storage, classifying it by its I/O error kind.
    pub fn storage(writing: bool, location: StorageLocation, cause: Box<FilekeepError>) -> Self {
        Self::new(
            FileErrorKind::from_storage_error(&cause),
            writing,
            location,
            cause,
        )
    }

    /// Wrap a failure reported by a serializer.
    pub fn serialization(
        writing: bool,
        location: StorageLocation,
        cause: Box<FilekeepError>,
    ) -> Self {
        Self::new(FileErrorKind::SerializationError, writing, location, cause)
    }

    pub fn kind(&self) -> FileErrorKind {
        self.kind
    }

    /// True if the failing operation was a write.
    pub fn writing(&self) -> bool {
        self.writing
    }

    pub fn location(&self) -> &StorageLocation {
        &self.location
    }

    /// The low-level failure, kept for diagnostics.
    pub fn cause(&self) -> &FilekeepError {
        &self.cause
    }

    fn detail(&self) -> &'static str {
        match (self.kind, self.writing) {
            (FileErrorKind::NotFound, _) => "File or directory not found.",
            (FileErrorKind::InsufficientPermissions, _) => {
                "Insufficient permissions to access the file."
            }
            (FileErrorKind::SerializationError, true) => "Failed to serialize the object.",
            (FileErrorKind::SerializationError, false) => "Failed to deserialize the object.",
        }
    }
}

impl fmt::Display for FileOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.writing { "writing to" } else { "reading" };
        write!(
            f,
            "An error occurred while {} the file '{}': {}",
            action,
            self.location,
            self.detail()
        )
    }
}

impl StdError for FileOperationError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Errors returned by the [`crate::FileManager`].
#[derive(Debug)]
pub enum ManagerError {
    /// A precondition was violated by the caller. No storage call was made.
    InvalidArgument { message: String },
    /// The requested save, load or history operation failed.
    Operation(FileOperationError),
    /// The object was saved or loaded, but recording it in the history failed.
    History(FileOperationError),
}

impl ManagerError {
    /// The classified file error, unless this is an argument error.
    pub fn file_operation(&self) -> Option<&FileOperationError> {
        match self {
            ManagerError::InvalidArgument { .. } => None,
            ManagerError::Operation(error) | ManagerError::History(error) => Some(error),
        }
    }
}

impl From<FileOperationError> for ManagerError {
    fn from(error: FileOperationError) -> Self {
        ManagerError::Operation(error)
    }
}

impl fmt::Display for ManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagerError::InvalidArgument { message } => write!(f, "Invalid argument: {}", message),
            ManagerError::Operation(error) => write!(f, "{}", error),
            ManagerError::History(error) => {
                write!(f, "Updating the recent files history failed: {}", error)
            }
        }
    }
}

impl StdError for ManagerError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ManagerError::InvalidArgument { .. } => None,
            ManagerError::Operation(error) | ManagerError::History(error) => Some(error),
        }
    }
}

/// Result type of [`crate::FileManager`] operations.
pub type ManagerResult<T> = Result<T, ManagerError>;
