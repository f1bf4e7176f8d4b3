//! Centralized error handling for Fieldwise.
//!
//! Every failure in the library is reported through [`FieldwiseError`]; nothing on the
//! serialize or deserialize path panics.
//!
//! ## Error Categories
//!
//! - **I/O Errors** ([`FieldwiseError::Io`]): the archive file could not be read or written.
//! - **Parse Errors** ([`FieldwiseError::Parse`]): the text handed to an archive is not JSON.
//! - **Missing Keys** ([`FieldwiseError::MissingKey`]): a declared property has no entry.
//! - **Type Mismatches** ([`FieldwiseError::TypeMismatch`]): an entry holds the wrong shape.
//! - **Unrepresentable Values** ([`FieldwiseError::Unrepresentable`]): a value the backend
//!   has no faithful form for, such as a non-finite float in JSON.
//! - **Declaration Errors** ([`FieldwiseError::DuplicateProperty`]): a property list names
//!   the same entry twice.
//!
//! Types that are neither primitive nor composite never reach runtime: the trait bounds
//! of [`Archive::store`](crate::Archive::store) reject them at compile time.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use fieldwise::{Fieldwise, FieldwiseError, Serializable};
//!
//! #[derive(Debug, Default, Serializable)]
//! struct Config { retries: u32 }
//!
//! match Fieldwise::from_str::<Config>(r#"{"attempts": 3}"#) {
//!     Err(FieldwiseError::MissingKey { path }) => assert_eq!(path, "retries"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for Fieldwise operations.
pub type Result<T> = std::result::Result<T, FieldwiseError>;

/// The error enum covering every failure Fieldwise can report.
///
/// Paths are dotted field paths relative to the archive the failing call was made on,
/// e.g. `"b.x"` for field `x` of the composite stored under `b`. Sequence elements
/// appear as their index (`"points.2.y"`).
///
/// This type is `Clone`; I/O errors are wrapped in `Arc` for that reason.
#[derive(Debug, Clone)]
pub enum FieldwiseError {
    /// The archive file could not be opened, read or written.
    Io(Arc<io::Error>),

    /// Text could not be parsed as (or printed from) a JSON document.
    Parse(String),

    /// A property was requested that the archive has no entry for.
    MissingKey {
        /// Dotted path of the missing entry.
        path: String,
    },

    /// An entry exists but does not hold the requested shape.
    ///
    /// Integer leaves that are out of range for the requested type land here too.
    TypeMismatch {
        /// Dotted path of the offending entry. Empty for a bare leaf.
        path: String,
        /// The shape the caller asked for (`"i32"`, `"object"`, ...).
        expected: &'static str,
        /// A short rendering of what the archive actually holds.
        found: String,
    },

    /// A value has no faithful form in the backend (e.g. `NaN` or infinity in JSON).
    ///
    /// Raised while storing, so nothing lossy is ever written.
    Unrepresentable {
        /// Dotted path of the offending field. Empty for a bare leaf.
        path: String,
        /// The Rust type of the value.
        type_name: &'static str,
        /// A rendering of the value.
        value: String,
    },

    /// A property list declares the same name twice.
    DuplicateProperty {
        /// The composite type owning the list.
        type_name: &'static str,
        /// The repeated name.
        name: &'static str,
    },
}

impl FieldwiseError {
    /// Builds a [`FieldwiseError::TypeMismatch`] for a bare leaf.
    pub fn mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            path: String::new(),
            expected,
            found: found.into(),
        }
    }

    /// Builds a [`FieldwiseError::Unrepresentable`] for a bare leaf.
    pub fn unrepresentable(type_name: &'static str, value: impl Into<String>) -> Self {
        Self::Unrepresentable {
            path: String::new(),
            type_name,
            value: value.into(),
        }
    }

    /// Prefixes the error's path with `segment`.
    ///
    /// Called on the way out of every nested `store` and `retrieve`, so the path ends up rooted at
    /// the archive the user called into.
    #[must_use]
    pub fn within(self, segment: &str) -> Self {
        match self {
            Self::MissingKey { path } => Self::MissingKey {
                path: join_path(segment, &path),
            },
            Self::TypeMismatch {
                path,
                expected,
                found,
            } => Self::TypeMismatch {
                path: join_path(segment, &path),
                expected,
                found,
            },
            Self::Unrepresentable {
                path,
                type_name,
                value,
            } => Self::Unrepresentable {
                path: join_path(segment, &path),
                type_name,
                value,
            },
            other => other,
        }
    }
}

fn join_path(segment: &str, rest: &str) -> String {
    if rest.is_empty() {
        segment.to_owned()
    } else {
        format!("{segment}.{rest}")
    }
}

impl fmt::Display for FieldwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O Error: {e}"),
            Self::Parse(s) => write!(f, "Parse Error: {s}"),
            Self::MissingKey { path } => write!(f, "Missing Key: no entry for '{path}'"),
            Self::TypeMismatch {
                path,
                expected,
                found,
            } if path.is_empty() => write!(f, "Type Mismatch: expected {expected}, found {found}"),
            Self::TypeMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "Type Mismatch: expected {expected} at '{path}', found {found}"
            ),
            Self::Unrepresentable {
                path,
                type_name,
                value,
            } if path.is_empty() => {
                write!(f, "Unrepresentable Value: {type_name} {value} has no stored form")
            }
            Self::Unrepresentable {
                path,
                type_name,
                value,
            } => write!(
                f,
                "Unrepresentable Value: {type_name} {value} at '{path}' has no stored form"
            ),
            Self::DuplicateProperty { type_name, name } => write!(
                f,
                "Duplicate Property: '{name}' is declared more than once on {type_name}"
            ),
        }
    }
}

impl std::error::Error for FieldwiseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FieldwiseError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for FieldwiseError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Self::Io(Arc::new(err.into()))
        } else {
            Self::Parse(err.to_string())
        }
    }
}
