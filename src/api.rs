//! One-call entry points over the JSON backend.

use std::path::Path;

use crate::archive::{Archive, ArchiveOptions, JsonArchive};
use crate::engine::{deserialize_new, serialize};
use crate::error::Result;
use crate::property::{PropertyVisit, Serializable};

/// The main entry point for saving and loading objects as JSON.
///
/// ```rust
/// use fieldwise::{Fieldwise, Serializable};
///
/// #[derive(Debug, Default, PartialEq, Serializable)]
/// struct Point { x: i32, y: i32 }
///
/// let text = Fieldwise::to_string(&Point { x: 3, y: 4 })?;
/// let back: Point = Fieldwise::from_str(&text)?;
/// assert_eq!(back, Point { x: 3, y: 4 });
/// # Ok::<(), fieldwise::FieldwiseError>(())
/// ```
#[derive(Debug)]
pub struct Fieldwise;

impl Fieldwise {
    /// Serializes `object` and writes it to `path` as compact JSON.
    pub fn save<T, P>(path: P, object: &T) -> Result<()>
    where
        T: Serializable,
        T::Properties: PropertyVisit<T, JsonArchive>,
        P: AsRef<Path>,
    {
        Self::save_with(path, object, ArchiveOptions::default())
    }

    /// Like [`save`](Self::save), printing with `options`.
    pub fn save_with<T, P>(path: P, object: &T, options: ArchiveOptions) -> Result<()>
    where
        T: Serializable,
        T::Properties: PropertyVisit<T, JsonArchive>,
        P: AsRef<Path>,
    {
        let mut archive: JsonArchive = serialize(object)?;
        archive.set_options(options);
        archive.save_to_file(path)
    }

    /// Reads the archive at `path` and deserializes a fresh `T` from it.
    pub fn load<T, P>(path: P) -> Result<T>
    where
        T: Serializable,
        T::Properties: PropertyVisit<T, JsonArchive>,
        P: AsRef<Path>,
    {
        let mut archive = JsonArchive::new();
        archive.load_from_file(path)?;
        deserialize_new(&archive)
    }

    /// Serializes `object` to compact JSON text.
    pub fn to_string<T>(object: &T) -> Result<String>
    where
        T: Serializable,
        T::Properties: PropertyVisit<T, JsonArchive>,
    {
        serialize::<JsonArchive, T>(object)?.to_json_string()
    }

    /// Deserializes a fresh `T` from JSON text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str<T>(text: &str) -> Result<T>
    where
        T: Serializable,
        T::Properties: PropertyVisit<T, JsonArchive>,
    {
        deserialize_new(&JsonArchive::from_json_str(text)?)
    }
}
