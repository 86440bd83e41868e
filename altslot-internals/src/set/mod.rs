//! The compile-time catalogue of alternative types.
//!
//! An alternative set is written as a tuple type: `(u32, String)` is the set
//! whose alternatives are `u32` at index 0 and `String` at index 1. The
//! [`AlternativeSet`] trait is implemented for tuples of arity 1 through 8 by
//! the macro in [`storage`], which also generates the `#[repr(C)]` storage
//! union and the dispatch tables for each arity. Generating all three from
//! one macro invocation is what keeps the tables in sync with the type list.
//!
//! Type-to-index lookup ([`AlternativeSet::index_of`]) is a `TypeId` scan
//! over the set's vtable and resolves to the **first** occurrence when the
//! set contains the same type twice. Index-to-type lookup is type-level: the
//! [`Alt0`]–[`Alt7`] markers select a position through [`SlotIndex`], and a
//! marker without a matching impl (an out-of-range index) fails to compile.

pub(crate) mod indices;
pub(crate) mod storage;

use core::any::TypeId;

pub use indices::{Alt0, Alt1, Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, SlotIndex};
pub use storage::{
    AltStorage1, AltStorage2, AltStorage3, AltStorage4, AltStorage5, AltStorage6, AltStorage7,
    AltStorage8,
};

use crate::slot::{CloneFn, DebugFn, EqFn, SlotVtable};

/// A fixed, ordered list of alternative types, written as a tuple.
///
/// Implementations tie the type list to its overlapping storage union and to
/// the dispatch table used to destroy and relocate values without virtual
/// dispatch. The tables are immutable `'static` data generated once per
/// instantiation and shared by every container of that instantiation; they
/// are safe to read concurrently from any number of threads.
///
/// Duplicate alternatives are permitted: type-based lookup resolves to the
/// first occurrence, while index-based operations address every occurrence
/// unambiguously.
///
/// # Safety
///
/// Implementations must guarantee that `Storage` is a `#[repr(C)]` union
/// with exactly one field per alternative, in declaration order, and that
/// `VTABLE[i]` is the vtable of the `i`-th alternative, with
/// `VTABLE.len() == LEN`. Containers rely on this correspondence to cast
/// storage base pointers to the type recorded by their discriminant.
pub unsafe trait AlternativeSet: 'static + Sized {
    /// The `#[repr(C)]` union providing size-of-largest, align-of-largest
    /// overlapping storage for the set.
    type Storage;

    /// Number of alternatives in the set.
    const LEN: usize;

    /// One vtable per alternative, in declaration order.
    const VTABLE: &'static [&'static SlotVtable];

    /// Whether any alternative has a non-trivial destructor.
    ///
    /// When this is `false`, a container of this set may skip its destroy
    /// step entirely; doing so is observably equivalent to running it.
    const NEEDS_DROP: bool;

    /// Returns the index of the first occurrence of `T` in the set, or
    /// `None` if `T` is not an alternative.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot_internals::AlternativeSet;
    ///
    /// assert_eq!(<(u32, i64) as AlternativeSet>::index_of::<i64>(), Some(1));
    /// assert_eq!(<(u32, i64) as AlternativeSet>::index_of::<f32>(), None);
    /// ```
    #[must_use]
    fn index_of<T: 'static>() -> Option<usize> {
        Self::VTABLE
            .iter()
            .position(|vtable| vtable.type_id() == TypeId::of::<T>())
    }

    /// Returns `true` if `T` is one of the set's alternatives.
    #[must_use]
    fn contains<T: 'static>() -> bool {
        Self::index_of::<T>().is_some()
    }
}

/// An [`AlternativeSet`] whose alternatives are all [`Clone`].
///
/// Provides the placement-clone dispatch table that backs copy construction
/// of a container. Sets with a non-`Clone` alternative simply lack this
/// impl, so attempting to clone such a container is a compile-time error
/// while the container type itself remains fully usable.
///
/// # Safety
///
/// Implementations must guarantee `CLONE_TABLE[i]` clones the `i`-th
/// alternative of `Self`, with `CLONE_TABLE.len() == LEN`.
pub unsafe trait CloneableSet: AlternativeSet {
    /// One placement-clone entry per alternative, in declaration order.
    const CLONE_TABLE: &'static [CloneFn];
}

/// An [`AlternativeSet`] whose alternatives are all [`PartialEq`].
///
/// Provides the equality dispatch table that backs whole-container
/// comparison. Comparing containers of a set with a non-comparable
/// alternative is rejected at compile time through the missing impl.
///
/// # Safety
///
/// Implementations must guarantee `EQ_TABLE[i]` compares the `i`-th
/// alternative of `Self`, with `EQ_TABLE.len() == LEN`.
pub unsafe trait ComparableSet: AlternativeSet {
    /// One equality entry per alternative, in declaration order.
    const EQ_TABLE: &'static [EqFn];
}

/// An [`AlternativeSet`] whose alternatives are all [`Debug`].
///
/// Provides the formatting dispatch table that backs the container's `Debug`
/// implementation.
///
/// # Safety
///
/// Implementations must guarantee `DEBUG_TABLE[i]` formats the `i`-th
/// alternative of `Self`, with `DEBUG_TABLE.len() == LEN`.
///
/// [`Debug`]: core::fmt::Debug
pub unsafe trait DebugSet: AlternativeSet {
    /// One `Debug` formatting entry per alternative, in declaration order.
    const DEBUG_TABLE: &'static [DebugFn];
}

#[cfg(test)]
mod tests {
    use std::string::String;

    use super::*;

    #[test]
    fn test_len_matches_arity() {
        assert_eq!(<(u8,) as AlternativeSet>::LEN, 1);
        assert_eq!(<(u8, u16) as AlternativeSet>::LEN, 2);
        assert_eq!(
            <(u8, u16, u32, u64, i8, i16, i32, i64) as AlternativeSet>::LEN,
            8
        );
    }

    #[test]
    fn test_vtable_order_matches_declaration() {
        use core::any::TypeId;

        type Set = (u32, String, i8);
        let vtable = <Set as AlternativeSet>::VTABLE;
        assert_eq!(vtable.len(), 3);
        assert_eq!(vtable[0].type_id(), TypeId::of::<u32>());
        assert_eq!(vtable[1].type_id(), TypeId::of::<String>());
        assert_eq!(vtable[2].type_id(), TypeId::of::<i8>());
    }

    #[test]
    fn test_index_of_first_occurrence_wins() {
        type Dup = (u32, u32, i8);
        assert_eq!(<Dup as AlternativeSet>::index_of::<u32>(), Some(0));
        assert_eq!(<Dup as AlternativeSet>::index_of::<i8>(), Some(2));
    }

    #[test]
    fn test_contains() {
        type Set = (u32, String);
        assert!(<Set as AlternativeSet>::contains::<u32>());
        assert!(<Set as AlternativeSet>::contains::<String>());
        assert!(!<Set as AlternativeSet>::contains::<f64>());
    }

    #[test]
    fn test_needs_drop() {
        assert!(!<(u32, i64) as AlternativeSet>::NEEDS_DROP);
        assert!(<(u32, String) as AlternativeSet>::NEEDS_DROP);
    }

    #[test]
    fn test_capability_tables_cover_every_alternative() {
        type Set = (u32, String, i8);
        assert_eq!(
            <Set as CloneableSet>::CLONE_TABLE.len(),
            <Set as AlternativeSet>::LEN
        );
        assert_eq!(
            <Set as ComparableSet>::EQ_TABLE.len(),
            <Set as AlternativeSet>::LEN
        );
        assert_eq!(
            <Set as DebugSet>::DEBUG_TABLE.len(),
            <Set as AlternativeSet>::LEN
        );
    }
}
