use filekeep_base::StorageLocation;

/// An object the [`crate::FileManager`] can save and load.
///
/// The storage location is where the object was last loaded from or saved to. `None`
/// means the object was never saved; such objects cannot be saved until a location is
/// assigned. The location is not part of the serialized payload, so mark the field
/// `#[serde(skip)]`.
///
/// # Examples
///
/// ```
/// use filekeep_base::StorageLocation;
/// use filekeep_engine::Persistable;
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
/// ```
pub trait Persistable {
    fn storage_location(&self) -> Option<&StorageLocation>;

    fn set_storage_location(&mut self, location: Option<StorageLocation>);
}
