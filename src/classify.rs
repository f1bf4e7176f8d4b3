//! Compile-time classification of field types.
//!
//! Every storable type names its [`Classified::Kind`]:
//!
//! * [`PrimitiveKind`]: written as a leaf by the backend's [`LeafCodec`].
//! * [`CompositeKind`]: owns a property list; stored as a nested archive built by the
//!   engine.
//! * [`SequenceKind`]: `Vec<T>`; stored as an ordered list of element entries.
//!
//! The kind is an associated type, so choosing a strategy is a trait resolution, not a
//! runtime branch. A type with no `Classified` impl cannot be stored at all, and a
//! primitive whose backend lacks a [`LeafCodec`] is rejected the same way.

use crate::archive::{Archive, LeafCodec};
use crate::engine;
use crate::error::Result;
use crate::property::{PropertyVisit, Serializable};

/// Assigns a storage kind to a type.
pub trait Classified {
    /// One of [`PrimitiveKind`], [`CompositeKind`] or [`SequenceKind`].
    type Kind;
}

/// Marker for leaf types handled directly by the backend.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveKind;

/// Marker for types that own a property list.
#[derive(Debug, Clone, Copy)]
pub struct CompositeKind;

/// Marker for `Vec<T>`.
#[derive(Debug, Clone, Copy)]
pub struct SequenceKind;

/// How a kind turns a `T` into an archive entry and back.
pub trait Strategy<T, A: Archive> {
    /// Builds the entry that represents `value`.
    fn to_entry(value: &T) -> Result<A>;

    /// Rebuilds a value from its entry, consuming it.
    fn from_entry(entry: A) -> Result<T>;
}

impl<T, A> Strategy<T, A> for PrimitiveKind
where
    A: Archive + LeafCodec<T>,
{
    fn to_entry(value: &T) -> Result<A> {
        A::from_leaf(value)
    }

    fn from_entry(entry: A) -> Result<T> {
        entry.to_leaf()
    }
}

impl<T, A> Strategy<T, A> for CompositeKind
where
    A: Archive,
    T: Serializable,
    T::Properties: PropertyVisit<T, A>,
{
    fn to_entry(value: &T) -> Result<A> {
        engine::serialize(value)
    }

    fn from_entry(entry: A) -> Result<T> {
        engine::deserialize_owned(entry)
    }
}

impl<T, A> Strategy<Vec<T>, A> for SequenceKind
where
    A: Archive,
    T: Field<A>,
{
    fn to_entry(value: &Vec<T>) -> Result<A> {
        let items = value
            .iter()
            .enumerate()
            .map(|(index, item)| {
                <T as Field<A>>::to_entry(item).map_err(|e| e.within(&index.to_string()))
            })
            .collect::<Result<Vec<A>>>()?;
        Ok(A::from_items(items))
    }

    fn from_entry(entry: A) -> Result<Vec<T>> {
        entry
            .into_items()?
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                <T as Field<A>>::from_entry(item).map_err(|e| e.within(&index.to_string()))
            })
            .collect()
    }
}

/// A type that can be stored in archive `A`.
///
/// Blanket-implemented for every classified type whose kind has a [`Strategy`] for `A`;
/// never implement it by hand.
pub trait Field<A: Archive>: Sized {
    /// Builds the entry that represents `self`.
    fn to_entry(&self) -> Result<A>;

    /// Rebuilds a value from its entry, consuming it.
    fn from_entry(entry: A) -> Result<Self>;
}

impl<T, A> Field<A> for T
where
    A: Archive,
    T: Classified,
    T::Kind: Strategy<T, A>,
{
    fn to_entry(&self) -> Result<A> {
        <T::Kind as Strategy<T, A>>::to_entry(self)
    }

    fn from_entry(entry: A) -> Result<Self> {
        <T::Kind as Strategy<T, A>>::from_entry(entry)
    }
}

impl<T: Classified> Classified for Vec<T> {
    type Kind = SequenceKind;
}

macro_rules! impl_primitive_kind {
    ($($t:ty),*) => {
        $(
            impl Classified for $t {
                type Kind = PrimitiveKind;
            }
        )*
    }
}

impl_primitive_kind!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String
);
