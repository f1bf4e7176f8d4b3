//! The serialization engine.
//!
//! [`serialize`] and [`deserialize`] walk a composite's property list in declaration
//! order and hand each field to the archive. Composite fields come back into the engine
//! through [`CompositeKind`](crate::CompositeKind)'s strategy with a freshly created
//! nested archive, so every level of nesting owns its own subtree and nothing is shared
//! between levels. On the way back, each top-level entry is copied out of the caller's
//! archive once and everything below it is moved, not copied.

use std::any::type_name;

use tracing::debug;

use crate::archive::Archive;
use crate::error::{FieldwiseError, Result};
use crate::property::{PropertyList, PropertyVisit, Serializable};

/// Serializes `object` into a new archive.
///
/// Either every listed field is stored or an error is returned; no partial archive
/// escapes.
///
/// ```rust
/// use fieldwise::{serialize, JsonArchive, Serializable};
///
/// #[derive(Default, Serializable)]
/// struct Point { x: i32, y: i32 }
///
/// let archive: JsonArchive = serialize(&Point { x: 3, y: 4 })?;
/// assert_eq!(archive.to_json_string()?, r#"{"x":3,"y":4}"#);
/// # Ok::<(), fieldwise::FieldwiseError>(())
/// ```
pub fn serialize<A, T>(object: &T) -> Result<A>
where
    A: Archive,
    T: Serializable,
    T::Properties: PropertyVisit<T, A>,
{
    check_unique::<T>()?;
    debug!(
        type_name = type_name::<T>(),
        fields = <T::Properties as PropertyList<T>>::LEN,
        "serializing"
    );

    let mut archive = A::default();
    T::PROPERTIES.store_all(object, &mut archive)?;
    Ok(archive)
}

/// Overwrites every listed field of `object` with the value stored in `archive`.
///
/// Fields missing from the property list are left alone. On error, the fields that
/// precede the failing one (in declaration order) have already been written.
pub fn deserialize<A, T>(archive: &A, object: &mut T) -> Result<()>
where
    A: Archive,
    T: Serializable,
    T::Properties: PropertyVisit<T, A>,
{
    check_unique::<T>()?;
    debug!(
        type_name = type_name::<T>(),
        fields = <T::Properties as PropertyList<T>>::LEN,
        "deserializing"
    );

    T::PROPERTIES.retrieve_all(archive, object)
}

/// Deserializes into `T::default()` and returns it.
pub fn deserialize_new<A, T>(archive: &A) -> Result<T>
where
    A: Archive,
    T: Serializable,
    T::Properties: PropertyVisit<T, A>,
{
    let mut object = T::default();
    deserialize(archive, &mut object)?;
    Ok(object)
}

/// Deserializes into `T::default()`, consuming `archive` entry by entry.
pub(crate) fn deserialize_owned<A, T>(mut archive: A) -> Result<T>
where
    A: Archive,
    T: Serializable,
    T::Properties: PropertyVisit<T, A>,
{
    check_unique::<T>()?;
    debug!(
        type_name = type_name::<T>(),
        fields = <T::Properties as PropertyList<T>>::LEN,
        "deserializing nested"
    );

    let mut object = T::default();
    T::PROPERTIES.take_all(&mut archive, &mut object)?;
    Ok(object)
}

/// Rejects property lists that name an entry twice, before any field is visited.
///
/// Derived lists were checked when they were compiled and skip the walk.
fn check_unique<T: Serializable>() -> Result<()> {
    if T::NAMES_CHECKED {
        return Ok(());
    }
    match T::PROPERTIES.duplicate_name() {
        Some(name) => Err(FieldwiseError::DuplicateProperty {
            type_name: type_name::<T>(),
            name,
        }),
        None => Ok(()),
    }
}
