//! JSON archive backend.
//!
//! Entries live in a `serde_json::Value` tree: composites are JSON objects keyed by
//! property name, sequences are JSON arrays and primitives are JSON scalars. Nothing
//! else is written; no envelope, version or type tag.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{Archive, LeafCodec};
use crate::error::{FieldwiseError, Result};

/// Controls how a [`JsonArchive`] prints itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Indent the output across multiple lines. Compact when `false`.
    pub pretty: bool,
}

impl ArchiveOptions {
    /// Starts a builder with default (compact) settings.
    pub fn builder() -> ArchiveOptionsBuilder {
        ArchiveOptionsBuilder::default()
    }
}

/// Builder for [`ArchiveOptions`].
#[derive(Debug, Clone, Default)]
pub struct ArchiveOptionsBuilder {
    options: ArchiveOptions,
}

impl ArchiveOptionsBuilder {
    /// Enables or disables pretty printing.
    #[must_use]
    pub fn pretty(mut self, enable: bool) -> Self {
        self.options.pretty = enable;
        self
    }

    /// Finishes the builder.
    pub fn build(self) -> ArchiveOptions {
        self.options
    }
}

/// An [`Archive`] backed by a JSON value tree.
#[derive(Debug, Clone)]
pub struct JsonArchive {
    storage: Value,
    options: ArchiveOptions,
}

impl Default for JsonArchive {
    fn default() -> Self {
        Self::from_storage(Value::Object(Map::new()))
    }
}

// Options only affect printing; two archives are equal when their trees are.
impl PartialEq for JsonArchive {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl JsonArchive {
    /// An empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty archive that prints with `options`.
    pub fn with_options(options: ArchiveOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Wraps an existing value tree.
    pub fn from_storage(storage: Value) -> Self {
        Self {
            storage,
            options: ArchiveOptions::default(),
        }
    }

    /// The underlying value tree.
    pub fn storage(&self) -> &Value {
        &self.storage
    }

    /// Replaces the underlying value tree.
    pub fn set_storage(&mut self, storage: Value) {
        self.storage = storage;
    }

    /// Consumes the archive, returning its value tree.
    pub fn into_storage(self) -> Value {
        self.storage
    }

    /// The print settings.
    pub fn options(&self) -> ArchiveOptions {
        self.options
    }

    /// Changes the print settings.
    pub fn set_options(&mut self, options: ArchiveOptions) {
        self.options = options;
    }

    /// Prints the archive as JSON text.
    pub fn to_json_string(&self) -> Result<String> {
        let text = if self.options.pretty {
            serde_json::to_string_pretty(&self.storage)?
        } else {
            serde_json::to_string(&self.storage)?
        };
        Ok(text)
    }

    /// Parses JSON text into an archive.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(Self::from_storage(serde_json::from_str(text)?))
    }

    /// Number of top-level entries (object keys or array items; zero for a leaf).
    pub fn len(&self) -> usize {
        match &self.storage {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// Whether [`len`](Self::len) is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Top-level entry names, in the tree's key order.
    pub fn entry_names(&self) -> Vec<&str> {
        self.storage
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl FromStr for JsonArchive {
    type Err = FieldwiseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}

impl Archive for JsonArchive {
    fn insert_entry(&mut self, name: &str, entry: Self) -> Result<()> {
        if self.storage.is_null() {
            self.storage = Value::Object(Map::new());
        }
        match &mut self.storage {
            Value::Object(map) => {
                map.insert(name.to_owned(), entry.storage);
                Ok(())
            }
            other => Err(FieldwiseError::mismatch("object", describe(other))),
        }
    }

    fn entry(&self, name: &str) -> Result<Self> {
        match &self.storage {
            Value::Object(map) => map
                .get(name)
                .cloned()
                .map(Self::from_storage)
                .ok_or_else(|| FieldwiseError::MissingKey {
                    path: name.to_owned(),
                }),
            other => Err(FieldwiseError::mismatch("object", describe(other))),
        }
    }

    fn take_entry(&mut self, name: &str) -> Result<Self> {
        match &mut self.storage {
            Value::Object(map) => map
                .remove(name)
                .map(Self::from_storage)
                .ok_or_else(|| FieldwiseError::MissingKey {
                    path: name.to_owned(),
                }),
            other => Err(FieldwiseError::mismatch("object", describe(other))),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.storage
            .as_object()
            .is_some_and(|map| map.contains_key(name))
    }

    fn from_items(items: Vec<Self>) -> Self {
        Self::from_storage(Value::Array(
            items.into_iter().map(|item| item.storage).collect(),
        ))
    }

    fn into_items(self) -> Result<Vec<Self>> {
        match self.storage {
            Value::Array(items) => Ok(items.into_iter().map(Self::from_storage).collect()),
            other => Err(FieldwiseError::mismatch("array", describe(&other))),
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = if self.options.pretty {
            serde_json::to_vec_pretty(&self.storage)?
        } else {
            serde_json::to_vec(&self.storage)?
        };
        debug!(bytes = bytes.len(), "printed archive");
        fs::write(path, &bytes)?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            pretty = self.options.pretty,
            "saved archive"
        );
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        debug!(bytes = bytes.len(), "read archive file");
        self.storage = serde_json::from_slice(&bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "loaded archive");
        Ok(())
    }
}

/// Short rendering of a value for mismatch messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) if s.chars().count() > 32 => {
            let head: String = s.chars().take(32).collect();
            format!("string \"{head}...\"")
        }
        Value::String(s) => format!("string \"{s}\""),
        Value::Array(items) => format!("array of {} items", items.len()),
        Value::Object(map) => format!("object with {} entries", map.len()),
    }
}

impl LeafCodec<bool> for JsonArchive {
    fn from_leaf(value: &bool) -> Result<Self> {
        Ok(Self::from_storage(Value::Bool(*value)))
    }

    fn to_leaf(&self) -> Result<bool> {
        self.storage
            .as_bool()
            .ok_or_else(|| FieldwiseError::mismatch("bool", describe(&self.storage)))
    }
}

impl LeafCodec<String> for JsonArchive {
    fn from_leaf(value: &String) -> Result<Self> {
        Ok(Self::from_storage(Value::String(value.clone())))
    }

    fn to_leaf(&self) -> Result<String> {
        self.storage
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| FieldwiseError::mismatch("String", describe(&self.storage)))
    }
}

/// Integer codecs. `$read` is the widest `serde_json` accessor for the signedness; the
/// result is range checked into the target type.
macro_rules! impl_integer_codec {
    ($read:ident => $($t:ty),*) => {
        $(
            impl LeafCodec<$t> for JsonArchive {
                fn from_leaf(value: &$t) -> Result<Self> {
                    Ok(Self::from_storage(Value::from(*value)))
                }

                fn to_leaf(&self) -> Result<$t> {
                    self.storage
                        .$read()
                        .and_then(|n| <$t>::try_from(n).ok())
                        .ok_or_else(|| {
                            FieldwiseError::mismatch(stringify!($t), describe(&self.storage))
                        })
                }
            }
        )*
    }
}

impl_integer_codec!(as_i64 => i8, i16, i32, i64, isize);
impl_integer_codec!(as_u64 => u8, u16, u32, u64, usize);

// JSON has no form for NaN or the infinities; they are refused rather than written as
// null.
impl LeafCodec<f64> for JsonArchive {
    fn from_leaf(value: &f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(FieldwiseError::unrepresentable("f64", value.to_string()));
        }
        Ok(Self::from_storage(Value::from(*value)))
    }

    fn to_leaf(&self) -> Result<f64> {
        self.storage
            .as_f64()
            .ok_or_else(|| FieldwiseError::mismatch("f64", describe(&self.storage)))
    }
}

impl LeafCodec<f32> for JsonArchive {
    fn from_leaf(value: &f32) -> Result<Self> {
        if !value.is_finite() {
            return Err(FieldwiseError::unrepresentable("f32", value.to_string()));
        }
        Ok(Self::from_storage(Value::from(f64::from(*value))))
    }

    // Numbers beyond f32's range would round to infinity.
    #[allow(clippy::cast_possible_truncation)]
    fn to_leaf(&self) -> Result<f32> {
        self.storage
            .as_f64()
            .map(|n| n as f32)
            .filter(|n| n.is_finite())
            .ok_or_else(|| FieldwiseError::mismatch("f32", describe(&self.storage)))
    }
}
