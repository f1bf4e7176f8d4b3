//! Property descriptors and the property lists built from them.
//!
//! A [`Property`] names one field of a composite type and knows how to read and write it.
//! A property list is a tuple of descriptors, stored as the type's
//! [`Serializable::PROPERTIES`] constant. Tuples keep every descriptor's field type
//! visible to the compiler, which is what lets the archive pick a storage strategy per
//! field without any runtime type inspection.
//!
//! ```rust
//! use fieldwise::{Classified, CompositeKind, Property, Serializable};
//!
//! #[derive(Default)]
//! struct Point { x: i32, y: i32 }
//!
//! impl Classified for Point {
//!     type Kind = CompositeKind;
//! }
//!
//! impl Serializable for Point {
//!     type Properties = (Property<Self, i32>, Property<Self, i32>);
//!     const PROPERTIES: Self::Properties = (
//!         Property::new("x", |p| &p.x, |p, v| p.x = v),
//!         Property::new("y", |p| &p.y, |p, v| p.y = v),
//!     );
//! }
//! ```

use std::fmt;

use crate::archive::Archive;
use crate::classify::{Classified, Field};
use crate::error::Result;

/// Describes one named field of `C` holding a `T`.
pub struct Property<C, T> {
    name: &'static str,
    get: fn(&C) -> &T,
    set: fn(&mut C, T),
}

impl<C, T> Property<C, T> {
    /// Binds `name` to a field through its reader and writer.
    pub const fn new(name: &'static str, get: fn(&C) -> &T, set: fn(&mut C, T)) -> Self {
        Self { name, get, set }
    }

    /// The entry name this field is stored under.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from `object`.
    pub fn get<'a>(&self, object: &'a C) -> &'a T {
        (self.get)(object)
    }

    /// Overwrites the field on `object`.
    pub fn set(&self, object: &mut C, value: T) {
        (self.set)(object, value);
    }
}

// Manual impls: deriving would demand `C: Clone` and `T: Clone`.
impl<C, T> Clone for Property<C, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, T> Copy for Property<C, T> {}

impl<C, T> fmt::Debug for Property<C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// A composite type: one that owns a property list.
///
/// Usually implemented with `#[derive(Serializable)]`. `Default` supplies the blank
/// instance that nested retrieval deserializes into.
///
/// The derive rejects two fields stored under the same name:
///
/// ```compile_fail
/// use fieldwise::Serializable;
///
/// #[derive(Default, Serializable)]
/// struct Clash {
///     x: i32,
///     #[fieldwise(rename = "x")]
///     other: i32,
/// }
/// ```
///
/// A field whose type has no storage kind makes the composite unserializable:
///
/// ```compile_fail
/// use fieldwise::{Fieldwise, Serializable};
///
/// #[derive(Default)]
/// struct Opaque;
///
/// #[derive(Default, Serializable)]
/// struct Holder { inner: Opaque }
///
/// let _ = Fieldwise::to_string(&Holder::default());
/// ```
pub trait Serializable: Classified + Default + Sized {
    /// The tuple of descriptors, in declaration order.
    type Properties: PropertyList<Self>;

    /// This type's property list.
    const PROPERTIES: Self::Properties;

    /// Whether the list's names were already proven unique when it was compiled.
    ///
    /// The derive sets this, having rejected duplicates itself. Hand-written lists keep
    /// the default and are checked each time the engine visits them.
    const NAMES_CHECKED: bool = false;
}

/// Archive-independent view of a property list.
pub trait PropertyList<C> {
    /// Number of descriptors.
    const LEN: usize;

    /// Entry names in declaration order.
    fn names(&self) -> Vec<&'static str>;

    /// The first name that appears more than once, if any.
    fn duplicate_name(&self) -> Option<&'static str> {
        let names = self.names();
        names
            .iter()
            .enumerate()
            .find(|(i, name)| names[..*i].contains(name))
            .map(|(_, name)| *name)
    }
}

/// Walks a property list against a concrete archive backend.
///
/// Implemented for every tuple of [`Property`] whose field types can all be stored in
/// `A`. When one of them cannot, the composite simply does not implement this trait for
/// `A` and the call to [`serialize`](crate::serialize) fails to compile.
pub trait PropertyVisit<C, A: Archive>: PropertyList<C> {
    /// Stores every listed field of `object` into `archive`, in order.
    fn store_all(&self, object: &C, archive: &mut A) -> Result<()>;

    /// Retrieves every listed field from `archive` into `object`, in order.
    fn retrieve_all(&self, archive: &A, object: &mut C) -> Result<()>;

    /// Like [`retrieve_all`](Self::retrieve_all), but moves each entry out of `archive`.
    fn take_all(&self, archive: &mut A, object: &mut C) -> Result<()>;
}

macro_rules! count {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count!($($tail)*) };
}

/// Implements the property list traits for one tuple arity.
macro_rules! impl_property_tuple {
    ($($t:ident => $idx:tt),+) => {
        impl<C, $($t),+> PropertyList<C> for ($(Property<C, $t>,)+) {
            const LEN: usize = count!($($t)+);

            fn names(&self) -> Vec<&'static str> {
                vec![$(self.$idx.name()),+]
            }
        }

        impl<C, A, $($t),+> PropertyVisit<C, A> for ($(Property<C, $t>,)+)
        where
            A: Archive,
            $($t: Field<A>,)+
        {
            fn store_all(&self, object: &C, archive: &mut A) -> Result<()> {
                $(
                    tracing::trace!(field = self.$idx.name(), "storing property");
                    archive.store(self.$idx.name(), self.$idx.get(object))?;
                )+
                Ok(())
            }

            fn retrieve_all(&self, archive: &A, object: &mut C) -> Result<()> {
                $(
                    tracing::trace!(field = self.$idx.name(), "retrieving property");
                    let value: $t = archive.retrieve(self.$idx.name())?;
                    self.$idx.set(object, value);
                )+
                Ok(())
            }

            fn take_all(&self, archive: &mut A, object: &mut C) -> Result<()> {
                $(
                    tracing::trace!(field = self.$idx.name(), "taking property");
                    let value: $t = archive.take(self.$idx.name())?;
                    self.$idx.set(object, value);
                )+
                Ok(())
            }
        }
    };
}

// A composite with every field skipped still round-trips, as an empty archive.
impl<C> PropertyList<C> for () {
    const LEN: usize = 0;

    fn names(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

impl<C, A: Archive> PropertyVisit<C, A> for () {
    fn store_all(&self, _object: &C, _archive: &mut A) -> Result<()> {
        Ok(())
    }

    fn retrieve_all(&self, _archive: &A, _object: &mut C) -> Result<()> {
        Ok(())
    }

    fn take_all(&self, _archive: &mut A, _object: &mut C) -> Result<()> {
        Ok(())
    }
}

impl_property_tuple!(T0 => 0);
impl_property_tuple!(T0 => 0, T1 => 1);
impl_property_tuple!(T0 => 0, T1 => 1, T2 => 2);
impl_property_tuple!(T0 => 0, T1 => 1, T2 => 2, T3 => 3);
impl_property_tuple!(T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4);
impl_property_tuple!(T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5);
impl_property_tuple!(T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6);
impl_property_tuple!(T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8
);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8,
    T9 => 9
);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8,
    T9 => 9, T10 => 10
);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8,
    T9 => 9, T10 => 10, T11 => 11
);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8,
    T9 => 9, T10 => 10, T11 => 11, T12 => 12
);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8,
    T9 => 9, T10 => 10, T11 => 11, T12 => 12, T13 => 13
);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8,
    T9 => 9, T10 => 10, T11 => 11, T12 => 12, T13 => 13, T14 => 14
);
impl_property_tuple!(
    T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7, T8 => 8,
    T9 => 9, T10 => 10, T11 => 11, T12 => 12, T13 => 13, T14 => 14, T15 => 15
);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Pair {
        left: i32,
        right: String,
    }

    const PAIR: (Property<Pair, i32>, Property<Pair, String>) = (
        Property::new("left", |p| &p.left, |p, v| p.left = v),
        Property::new("right", |p| &p.right, |p, v| p.right = v),
    );

    #[test]
    fn descriptors_read_and_write_their_field() {
        let mut pair = Pair::default();
        PAIR.0.set(&mut pair, 7);
        PAIR.1.set(&mut pair, "seven".to_owned());

        assert_eq!(*PAIR.0.get(&pair), 7);
        assert_eq!(PAIR.1.get(&pair), "seven");
    }

    #[test]
    fn names_follow_declaration_order() {
        assert_eq!(PAIR.names(), vec!["left", "right"]);
        assert_eq!(<(Property<Pair, i32>, Property<Pair, String>) as PropertyList<Pair>>::LEN, 2);
        assert_eq!(PAIR.duplicate_name(), None);
    }

    #[test]
    fn duplicate_names_are_reported() {
        let list = (
            Property::<Pair, i32>::new("same", |p| &p.left, |p, v| p.left = v),
            Property::<Pair, String>::new("other", |p| &p.right, |p, v| p.right = v),
            Property::<Pair, i32>::new("same", |p| &p.left, |p, v| p.left = v),
        );
        assert_eq!(list.duplicate_name(), Some("same"));
    }
}
