//! # Fieldwise
//!
//! Declare once which fields of a type are persisted, and let a generic engine walk that
//! declaration into a JSON archive and back. No per-type marshalling code.
//!
//! ## Overview
//!
//! A *composite* type owns a property list: an ordered tuple of [`Property`] descriptors,
//! each binding an entry name to a field reader and writer. Everything else that can be
//! stored is either a *primitive* (integers, floats, `bool`, `String`), written as a leaf
//! by the archive backend, or a *sequence* (`Vec<T>` of storable `T`).
//!
//! ### Key Features
//!
//! *   **Derived Declarations:** `#[derive(Serializable)]` builds the property list from
//!     the struct's fields, in source order.
//! *   **Static Dispatch:** Whether a field is written as a leaf or recursed into is
//!     decided from its type by the [`classify`] module. Unsupported types fail to
//!     compile; they never fail at runtime.
//! *   **Nested Archives:** Each composite field is serialized into its own nested
//!     archive under the field's name, to any depth.
//! *   **Pluggable Backends:** The engine only talks to the [`Archive`] trait;
//!     [`JsonArchive`] is the backend shipped here.
//!
//! ## Architecture
//!
//! ```text
//! serialize(&obj) ──► T::PROPERTIES (in order) ──► archive.store(name, field)
//!                                                     │
//!                            ┌────────────────────────┼────────────────────┐
//!                       PrimitiveKind           CompositeKind         SequenceKind
//!                     LeafCodec::from_leaf   serialize(field) ──►   one entry per item
//!                                            nested archive
//! ```
//!
//! ## Usage Patterns
//!
//! ```rust
//! use fieldwise::{Fieldwise, Serializable};
//!
//! #[derive(Debug, Default, PartialEq, Serializable)]
//! struct Point { x: i32, y: i32 }
//!
//! #[derive(Debug, Default, PartialEq, Serializable)]
//! struct Line { a: Point, b: Point }
//!
//! let line = Line { a: Point { x: 1, y: 2 }, b: Point { x: 3, y: 4 } };
//! let text = Fieldwise::to_string(&line)?;
//! assert_eq!(text, r#"{"a":{"x":1,"y":2},"b":{"x":3,"y":4}}"#);
//!
//! let back: Line = Fieldwise::from_str(&text)?;
//! assert_eq!(back, line);
//! # Ok::<(), fieldwise::FieldwiseError>(())
//! ```
//!
//! ### Safety and Error Handling
//!
//! * **No Panics:** No `unwrap()` or `panic!()` in the library (enforced by clippy lints).
//! * **Comprehensive Errors:** All failures correspond to a [`FieldwiseError`].
//! * **Logging:** Engine and file operations emit `tracing` events; install a
//!   subscriber to see them.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// Lets the derive's `::fieldwise::` paths resolve inside this crate's own tests.
extern crate self as fieldwise;

pub mod api;
pub mod archive;
pub mod classify;
pub mod engine;
pub mod error;
pub mod inspector;
pub mod property;

pub use api::Fieldwise;
pub use archive::{Archive, ArchiveOptions, JsonArchive, LeafCodec};
pub use classify::{Classified, CompositeKind, Field, PrimitiveKind, SequenceKind, Strategy};
pub use engine::{deserialize, deserialize_new, serialize};
pub use error::{FieldwiseError, Result};
pub use inspector::{ArchiveInspector, EntryKind, EntryReport};
pub use property::{Property, PropertyList, PropertyVisit, Serializable};

// Re-export the derive macro so it is accessible as `fieldwise::Serializable`
pub use fieldwise_derive::Serializable;
