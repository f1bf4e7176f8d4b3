//! The archive abstraction the serialization engine programs against.
//!
//! An [`Archive`] is a tree of named entries. A backend only has to provide the
//! structural operations (insert, look up and take out an entry, build and split an
//! item list, file round trip) plus one [`LeafCodec`] per primitive it supports; the typed
//! [`store`](Archive::store) and [`retrieve`](Archive::retrieve) surface is derived
//! from those through the type classifier.
//!
//! [`json::JsonArchive`] is the one backend shipped with the crate.

/// JSON backend over `serde_json::Value`.
pub mod json;

pub use json::{ArchiveOptions, ArchiveOptionsBuilder, JsonArchive};

use std::path::Path;

use crate::classify::Field;
use crate::error::Result;

/// A keyed storage tree plus file round trip.
///
/// One archive holds the serialized form of exactly one value: a composite (its
/// entries mirror the property list), a sequence (an item list) or a leaf.
pub trait Archive: Default + Sized {
    /// Inserts or overwrites the entry at `name`.
    fn insert_entry(&mut self, name: &str, entry: Self) -> Result<()>;

    /// Returns a copy of the entry at `name`.
    ///
    /// Fails with [`MissingKey`](crate::FieldwiseError::MissingKey) when absent.
    fn entry(&self, name: &str) -> Result<Self>;

    /// Removes the entry at `name` and returns it without copying.
    ///
    /// Fails like [`entry`](Self::entry).
    fn take_entry(&mut self, name: &str) -> Result<Self>;

    /// Whether an entry named `name` exists.
    fn contains(&self, name: &str) -> bool;

    /// Builds a sequence archive from element entries, keeping their order.
    fn from_items(items: Vec<Self>) -> Self;

    /// Splits a sequence archive back into its element entries.
    fn into_items(self) -> Result<Vec<Self>>;

    /// Writes the whole archive to `path`, replacing any existing file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Replaces this archive's contents with the archive stored at `path`.
    fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()>;

    /// Stores `value` under `name`, as a leaf or as a nested archive depending on
    /// `T`'s kind.
    ///
    /// Nothing is inserted when `value` cannot be represented.
    fn store<T: Field<Self>>(&mut self, name: &str, value: &T) -> Result<()> {
        let entry = value.to_entry().map_err(|e| e.within(name))?;
        self.insert_entry(name, entry)
    }

    /// Retrieves the value stored under `name`.
    ///
    /// Never falls back to a default: an absent entry is an error. The entry is copied
    /// once; nested levels below it are moved out of that copy.
    fn retrieve<T: Field<Self>>(&self, name: &str) -> Result<T> {
        let entry = self.entry(name)?;
        T::from_entry(entry).map_err(|e| e.within(name))
    }

    /// Like [`retrieve`](Self::retrieve), but moves the entry out of the archive.
    fn take<T: Field<Self>>(&mut self, name: &str) -> Result<T> {
        let entry = self.take_entry(name)?;
        T::from_entry(entry).map_err(|e| e.within(name))
    }
}

/// Backend support for one primitive type.
///
/// A primitive with no codec on a backend cannot be stored there: the missing impl is
/// a compile error at the `store`/`retrieve` call.
pub trait LeafCodec<T>: Sized {
    /// Builds a leaf archive holding `value`.
    ///
    /// Fails with [`Unrepresentable`](crate::FieldwiseError::Unrepresentable) when the
    /// backend has no faithful form for `value`.
    fn from_leaf(value: &T) -> Result<Self>;

    /// Reads the leaf back, failing with
    /// [`TypeMismatch`](crate::FieldwiseError::TypeMismatch) on the wrong shape.
    fn to_leaf(&self) -> Result<T>;
}
