use std::io::Read;

use serde::Deserialize;
use tracing::{debug, instrument};

use filekeep_base::{FilekeepError, FilekeepResult, ResultExt, StorageHandle, StorageLocation};

use crate::encoding::TextEncoding;

/// Location of the recent-files history when nothing else is configured.
pub const DEFAULT_RECENT_FILES_LOCATION: &str = "recent.txt";

/// Configuration for a [`crate::FileManager`].
///
/// `Default` gives a fresh value with history enabled, the history stored at
/// [`DEFAULT_RECENT_FILES_LOCATION`] and UTF-8 text.
///
/// Can be loaded from TOML:
///
/// ```toml
/// history_enabled = true
/// recent_files_location = "settings/recent.txt"
/// encoding = "utf-8"
/// recent_files_limit = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileManagerSettings {
    /// Whether saves and loads are recorded in the recent-files history.
    pub history_enabled: bool,
    /// Where the recent-files history is stored.
    #[serde(deserialize_with = "deserialize_location")]
    pub recent_files_location: StorageLocation,
    /// Encoding handed to the serializer and used for the history file.
    pub encoding: TextEncoding,
    /// Capacity of the history read back by `get_recent_files`; `None` keeps everything.
    pub recent_files_limit: Option<usize>,
}

impl FileManagerSettings {
    /// Default settings with the history file placed inside `directory`.
    pub fn in_directory(directory: impl Into<StorageLocation>) -> Self {
        Self {
            recent_files_location: directory.into().join(DEFAULT_RECENT_FILES_LOCATION),
            ..Self::default()
        }
    }
}

impl Default for FileManagerSettings {
    fn default() -> Self {
        Self {
            history_enabled: true,
            recent_files_location: StorageLocation::from(DEFAULT_RECENT_FILES_LOCATION),
            encoding: TextEncoding::Utf8,
            recent_files_limit: None,
        }
    }
}

fn deserialize_location<'de, D>(deserializer: D) -> Result<StorageLocation, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(StorageLocation::from)
}

/// Load settings from a TOML document stored at `location`.
///
/// Missing keys take their default values.
#[instrument(skip(storage), fields(location = %location))]
pub fn load_settings(
    storage: &StorageHandle,
    location: &StorageLocation,
) -> FilekeepResult<FileManagerSettings> {
    let mut reader = storage
        .read_stream(location)
        .with_context(|| format!("Failed to open settings at {}", location))?;
    let mut contents = String::new();
    reader.read_to_string(&mut contents).map_err(|e| {
        Box::new(FilekeepError::file(location.as_str(), e).context("Failed to read settings"))
    })?;
    let settings: FileManagerSettings = toml::from_str(&contents).map_err(|e| {
        Box::new(
            FilekeepError::serialization("TOML", e)
                .context(format!("Invalid settings in {}", location)),
        )
    })?;
    debug!(?settings, "settings loaded");
    Ok(settings)
}
