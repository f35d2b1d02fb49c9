/* 📖 # What does the FileManager do?

The FileManager is the only place where storage, serializer and recent-files history
meet. Every save or load follows the same steps:

1. open a stream for the location through Storage
2. let the serializer encode or decode through that stream
3. classify any failure (see error.rs) and hand it back to the caller
4. on success, read the history, move the location to its most recent end and write
   the whole history back

Streams are plain owned values, so they are closed on every path out of a function,
including the early returns taken by `?`.

The history file is plain text, one location per line, least recent first.
*/

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use filekeep_base::{FilekeepError, StorageHandle, StorageLocation};

use crate::error::{FileOperationError, ManagerError, ManagerResult};
use crate::persist::Persistable;
use crate::recent::RecencyList;
use crate::serializer::Serializer;
use crate::settings::FileManagerSettings;

#[cfg(windows)]
pub(crate) const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub(crate) const LINE_SEPARATOR: &str = "\n";

/// Saves and loads [`Persistable`] objects and keeps the recent-files history.
///
/// # Examples
///
/// ```
/// use filekeep_base::{MemoryStorage, StorageHandle, StorageLocation};
/// use filekeep_engine::{FileManager, JsonSerializer, Persistable};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Note {
///     text: String,
///     #[serde(skip)]
///     location: Option<StorageLocation>,
/// }
///
/// impl Persistable for Note {
///     fn storage_location(&self) -> Option<&StorageLocation> {
///         self.location.as_ref()
///     }
///
///     fn set_storage_location(&mut self, location: Option<StorageLocation>) {
///         self.location = location;
///     }
/// }
///
/// let manager = FileManager::new(StorageHandle::new(MemoryStorage::new()), JsonSerializer::new());
///
/// let note = Note {
///     text: "hello".to_string(),
///     location: Some(StorageLocation::from("notes/hello.json")),
/// };
/// manager.save(&note).unwrap();
///
/// let loaded: Note = manager.load("notes/hello.json").unwrap();
/// assert_eq!(loaded.text, "hello");
///
/// let recent = manager.get_recent_files().unwrap();
/// assert_eq!(recent.most_recent(), Some("notes/hello.json"));
/// ```
#[derive(Debug)]
pub struct FileManager<S: Serializer> {
    storage: StorageHandle,
    serializer: S,
    settings: FileManagerSettings,
}

impl<S: Serializer> FileManager<S> {
    /// Create a file manager with default settings.
    pub fn new(storage: StorageHandle, serializer: S) -> Self {
        Self::with_settings(storage, serializer, FileManagerSettings::default())
    }

    pub fn with_settings(storage: StorageHandle, serializer: S, settings: FileManagerSettings) -> Self {
        Self {
            storage,
            serializer,
            settings,
        }
    }

    pub fn settings(&self) -> &FileManagerSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: FileManagerSettings) {
        self.settings = settings;
    }

    pub fn set_history_enabled(&mut self, enabled: bool) {
        self.settings.history_enabled = enabled;
    }

    pub fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Save `obj` to its storage location and record it in the history.
    pub fn save<T>(&self, obj: &T) -> ManagerResult<()>
    where
        T: Persistable + Serialize,
    {
        self.save_with_history(obj, true)
    }

    /// Save `obj` to its storage location.
    ///
    /// Fails with [`ManagerError::InvalidArgument`] before touching storage if the object
    /// has no location. When history is enabled and `include_in_history` is set, the
    /// location becomes the most recent history entry. A history failure is returned as
    /// [`ManagerError::History`]; the object itself has been written by then.
    #[instrument(skip(self, obj), fields(location))]
    pub fn save_with_history<T>(&self, obj: &T, include_in_history: bool) -> ManagerResult<()>
    where
        T: Persistable + Serialize,
    {
        let Some(location) = obj.storage_location() else {
            return Err(ManagerError::InvalidArgument {
                message: "the storage location must be set before saving the object".to_string(),
            });
        };
        tracing::Span::current().record("location", tracing::field::display(location));

        self.write_object(location, obj)?;
        info!("object saved");

        if include_in_history {
            self.record_in_history(location)?;
        }
        Ok(())
    }

    /// Load an object from `location` and record it in the history.
    pub fn load<T>(&self, location: impl Into<StorageLocation>) -> ManagerResult<T>
    where
        T: Persistable + DeserializeOwned,
    {
        self.load_with_history(location, true)
    }

    /// Load an object from `location`.
    ///
    /// The returned object's storage location is set to `location`, whatever the payload
    /// contained. History handling is the same as for
    /// [`save_with_history`](FileManager::save_with_history).
    #[instrument(skip(self, location))]
    pub fn load_with_history<T>(
        &self,
        location: impl Into<StorageLocation>,
        include_in_history: bool,
    ) -> ManagerResult<T>
    where
        T: Persistable + DeserializeOwned,
    {
        let location = location.into();
        let mut obj: T = self.read_object(&location)?;
        obj.set_storage_location(Some(location.clone()));
        info!(%location, "object loaded");

        if include_in_history {
            self.record_in_history(&location)?;
        }
        Ok(obj)
    }

    /// Read the recent-files history.
    ///
    /// A history file that does not exist yet reads as an empty list. The list's capacity
    /// comes from [`FileManagerSettings::recent_files_limit`].
    #[instrument(skip(self), fields(location = %self.settings.recent_files_location))]
    pub fn get_recent_files(&self) -> ManagerResult<RecencyList> {
        let location = &self.settings.recent_files_location;
        let max_length = self
            .settings
            .recent_files_limit
            .unwrap_or(RecencyList::UNBOUNDED);

        if !self.storage.exists(location) {
            debug!("no history file yet");
            return Ok(RecencyList::with_max_length(max_length));
        }

        let mut stream = self
            .storage
            .read_stream(location)
            .map_err(|e| FileOperationError::storage(false, location.clone(), e))?;
        let mut bytes = Vec::new();
        stream.read_to_end(&mut bytes).map_err(|e| {
            FileOperationError::storage(
                false,
                location.clone(),
                Box::new(FilekeepError::file(location.as_str(), e)),
            )
        })?;
        drop(stream);

        let text = self
            .settings
            .encoding
            .decode(&bytes)
            .map_err(|e| FileOperationError::serialization(false, location.clone(), e))?;
        let recent = RecencyList::from_keys(
            text.lines().filter(|line| !line.is_empty()),
            max_length,
        );
        debug!(entries = recent.len(), "history read");
        Ok(recent)
    }

    /// Write `recent` as the recent-files history, least recent first.
    ///
    /// Does nothing while history is disabled.
    #[instrument(skip(self, recent), fields(location = %self.settings.recent_files_location, entries = recent.len()))]
    pub fn save_recent_files(&self, recent: &RecencyList) -> ManagerResult<()> {
        if !self.settings.history_enabled {
            debug!("history disabled, not writing");
            return Ok(());
        }
        let location = &self.settings.recent_files_location;

        let mut text = String::new();
        for key in recent {
            text.push_str(key);
            text.push_str(LINE_SEPARATOR);
        }
        let bytes = self.settings.encoding.encode(&text);

        let mut stream = self
            .storage
            .write_stream(location)
            .map_err(|e| FileOperationError::storage(true, location.clone(), e))?;
        stream
            .write_all(&bytes)
            .and_then(|()| stream.flush())
            .map_err(|e| {
                FileOperationError::storage(
                    true,
                    location.clone(),
                    Box::new(FilekeepError::file(location.as_str(), e)),
                )
            })?;
        debug!("history written");
        Ok(())
    }

    #[instrument(skip(self, obj), fields(format = self.serializer.format_name()))]
    fn write_object<T: Serialize>(&self, location: &StorageLocation, obj: &T) -> ManagerResult<()> {
        let mut stream = self
            .storage
            .write_stream(location)
            .map_err(|e| FileOperationError::storage(true, location.clone(), e))?;
        self.serializer
            .serialize(&mut stream, self.settings.encoding, obj)
            .map_err(|e| {
                let e = (*e).context(format!("Encoding {} payload", self.serializer.format_name()));
                FileOperationError::serialization(true, location.clone(), Box::new(e))
            })?;
        stream.flush().map_err(|e| {
            FileOperationError::storage(
                true,
                location.clone(),
                Box::new(FilekeepError::file(location.as_str(), e)),
            )
        })?;
        Ok(())
    }

    #[instrument(skip(self), fields(format = self.serializer.format_name()))]
    fn read_object<T: DeserializeOwned>(&self, location: &StorageLocation) -> ManagerResult<T> {
        let mut stream = self
            .storage
            .read_stream(location)
            .map_err(|e| FileOperationError::storage(false, location.clone(), e))?;
        let obj = self
            .serializer
            .deserialize(&mut stream, self.settings.encoding)
            .map_err(|e| {
                let e = (*e).context(format!("Decoding {} payload", self.serializer.format_name()));
                FileOperationError::serialization(false, location.clone(), Box::new(e))
            })?;
        Ok(obj)
    }

    fn record_in_history(&self, location: &StorageLocation) -> ManagerResult<()> {
        if !self.settings.history_enabled {
            return Ok(());
        }
        let mut recent = self.get_recent_files().map_err(as_history_error)?;
        recent.add(location.as_str());
        self.save_recent_files(&recent).map_err(as_history_error)
    }
}

fn as_history_error(error: ManagerError) -> ManagerError {
    match error {
        ManagerError::Operation(error) => {
            warn!(%error, "failed to update recent files history");
            ManagerError::History(error)
        }
        other => other,
    }
}
