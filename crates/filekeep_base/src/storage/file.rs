use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::location::StorageLocation;
use crate::{FilekeepError, FilekeepResult};

use super::traits::{ReadSeek, Storage};

/* 📖 # Why use std::fs instead of async or other crates?

All file manager operations are synchronous and run to completion on the caller's
thread, so blocking std::fs calls are all that is needed here.
*/

/// Storage backed by the local filesystem.
///
/// Relative locations are resolved below a configured base directory, absolute ones are
/// used as given. Opening a location for writing creates any missing parent directories.
#[derive(Debug)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a new FileStorage with the given base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, location: &StorageLocation) -> PathBuf {
        location.resolve_under(&self.base_dir)
    }

    fn create_file(path: &Path) -> io::Result<fs::File> {
        match fs::File::create(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let Some(parent) = path.parent() else {
                    return Err(e);
                };
                debug!(parent = %parent.display(), "creating missing parent directories");
                fs::create_dir_all(parent)?;
                fs::File::create(path)
            }
            other => other,
        }
    }
}

impl Storage for FileStorage {
    #[instrument(skip(self), fields(location = %location))]
    fn exists(&self, location: &StorageLocation) -> bool {
        let resolved = self.resolve(location);
        // Only a missing entry counts as absent. Anything else is left for the read to report.
        let exists = match fs::metadata(&resolved) {
            Ok(metadata) => metadata.is_file(),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                false
            }
            Err(e) => {
                debug!(error = %e, "existence unknown, treating location as present");
                true
            }
        };
        debug!(exists, resolved = %resolved.display(), "checked existence");
        exists
    }

    #[instrument(skip(self), fields(location = %location))]
    fn read_stream(&self, location: &StorageLocation) -> FilekeepResult<Box<dyn ReadSeek>> {
        let resolved = self.resolve(location);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(FilekeepError::file(resolved, e))
        })?;
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(location = %location))]
    fn write_stream(&self, location: &StorageLocation) -> FilekeepResult<Box<dyn Write>> {
        let resolved = self.resolve(location);
        debug!(resolved = %resolved.display(), "creating file");
        let file = Self::create_file(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create file");
            Box::new(FilekeepError::file(resolved, e))
        })?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
