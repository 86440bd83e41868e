//! Storage unions and the per-arity [`AlternativeSet`] implementations.
//!
//! One macro invocation per arity generates the `#[repr(C)]` storage union,
//! the [`AlternativeSet`] impl with its vtable, the capability-gated tables,
//! and the [`SlotIndex`] impls for that arity. Everything a container needs
//! for a given type list comes from the same entry list, so the pieces
//! cannot drift apart.
//!
//! The unions are never constructed as values. A container wraps them in
//! `MaybeUninit` (see [`RawRegion`](crate::slot::RawRegion)) and only ever
//! touches the memory through base-pointer casts; the fields exist to give
//! the union the size of the largest alternative and the alignment of the
//! most-aligned one, with every field at offset zero.

use core::mem::ManuallyDrop;

use crate::{
    set::{
        AlternativeSet, CloneableSet, ComparableSet, DebugSet,
        indices::{Alt0, Alt1, Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, SlotIndex},
    },
    slot::{CloneFn, DebugFn, EqFn, SlotVtable, clone_slot, debug_slot, eq_slot},
};

/// Emits one [`SlotIndex`] impl per field entry for a fixed tuple arity.
///
/// Recurses over the field list so the full generic list `$T` is only ever
/// used at a single repetition depth (a nested `$(...)` over `$T` inside the
/// per-field repetition is not a legal macro depth).
macro_rules! slot_index_impls {
    ( ($($T:ident),+); ) => {};
    (
        ($($T:ident),+);
        $U:ident => $Idx:ident @ $idx:expr
        $(, $U2:ident => $Idx2:ident @ $idx2:expr)* $(,)?
    ) => {
        // SAFETY: The marker names position `$idx`, whose tuple element
        // type is exactly `Output`.
        unsafe impl<$($T: 'static),+> SlotIndex<($($T,)+)> for $Idx {
            type Output = $U;
            const INDEX: usize = $idx;
        }
        slot_index_impls!( ($($T),+); $($U2 => $Idx2 @ $idx2),* );
    };
}

/// Generates the storage union and every set impl for one tuple arity.
macro_rules! alternative_set {
    (
        $storage:ident, $len:expr, ($($T:ident),+);
        $( $field:ident : $U:ident => $Idx:ident @ $idx:expr ),+ $(,)?
    ) => {
        #[doc = concat!(
            "Overlapping storage for an alternative set of ",
            stringify!($len),
            " types."
        )]
        ///
        /// All fields sit at offset zero (`#[repr(C)]` union), so the base
        /// address of the union is a valid address for any one alternative.
        /// The union never constructs or drops its fields; lifecycle is
        /// driven entirely by the dispatch tables of the owning container.
        #[repr(C)]
        pub union $storage<$($T),+> {
            $(
                #[doc = concat!("Slot overlaying alternative `", stringify!($U), "`.")]
                pub $field: ManuallyDrop<$U>,
            )+
        }

        // SAFETY: `Storage` is a `#[repr(C)]` union with one field per
        // alternative in declaration order, and `VTABLE[i]` is built from
        // the same list position `i`, so slot `i` really is a location of
        // the type its vtable was instantiated with.
        unsafe impl<$($T: 'static),+> AlternativeSet for ($($T,)+) {
            type Storage = $storage<$($T),+>;
            const LEN: usize = $len;
            const VTABLE: &'static [&'static SlotVtable] = &[$(SlotVtable::new::<$T>()),+];
            const NEEDS_DROP: bool = false $(| core::mem::needs_drop::<$T>())+;
        }

        // SAFETY: Entry `i` is `clone_slot` instantiated with the type at
        // position `i` of the tuple, and the list covers every alternative.
        unsafe impl<$($T: Clone + 'static),+> CloneableSet for ($($T,)+) {
            const CLONE_TABLE: &'static [CloneFn] = &[$(clone_slot::<$T>),+];
        }

        // SAFETY: Entry `i` is `eq_slot` instantiated with the type at
        // position `i` of the tuple, and the list covers every alternative.
        unsafe impl<$($T: PartialEq + 'static),+> ComparableSet for ($($T,)+) {
            const EQ_TABLE: &'static [EqFn] = &[$(eq_slot::<$T>),+];
        }

        // SAFETY: Entry `i` is `debug_slot` instantiated with the type at
        // position `i` of the tuple, and the list covers every alternative.
        unsafe impl<$($T: core::fmt::Debug + 'static),+> DebugSet for ($($T,)+) {
            const DEBUG_TABLE: &'static [DebugFn] = &[$(debug_slot::<$T>),+];
        }

        slot_index_impls!( ($($T),+); $($U => $Idx @ $idx),+ );
    };
}

alternative_set!(
    AltStorage1, 1, (T0);
    t0: T0 => Alt0 @ 0,
);

alternative_set!(
    AltStorage2, 2, (T0, T1);
    t0: T0 => Alt0 @ 0,
    t1: T1 => Alt1 @ 1,
);

alternative_set!(
    AltStorage3, 3, (T0, T1, T2);
    t0: T0 => Alt0 @ 0,
    t1: T1 => Alt1 @ 1,
    t2: T2 => Alt2 @ 2,
);

alternative_set!(
    AltStorage4, 4, (T0, T1, T2, T3);
    t0: T0 => Alt0 @ 0,
    t1: T1 => Alt1 @ 1,
    t2: T2 => Alt2 @ 2,
    t3: T3 => Alt3 @ 3,
);

alternative_set!(
    AltStorage5, 5, (T0, T1, T2, T3, T4);
    t0: T0 => Alt0 @ 0,
    t1: T1 => Alt1 @ 1,
    t2: T2 => Alt2 @ 2,
    t3: T3 => Alt3 @ 3,
    t4: T4 => Alt4 @ 4,
);

alternative_set!(
    AltStorage6, 6, (T0, T1, T2, T3, T4, T5);
    t0: T0 => Alt0 @ 0,
    t1: T1 => Alt1 @ 1,
    t2: T2 => Alt2 @ 2,
    t3: T3 => Alt3 @ 3,
    t4: T4 => Alt4 @ 4,
    t5: T5 => Alt5 @ 5,
);

alternative_set!(
    AltStorage7, 7, (T0, T1, T2, T3, T4, T5, T6);
    t0: T0 => Alt0 @ 0,
    t1: T1 => Alt1 @ 1,
    t2: T2 => Alt2 @ 2,
    t3: T3 => Alt3 @ 3,
    t4: T4 => Alt4 @ 4,
    t5: T5 => Alt5 @ 5,
    t6: T6 => Alt6 @ 6,
);

alternative_set!(
    AltStorage8, 8, (T0, T1, T2, T3, T4, T5, T6, T7);
    t0: T0 => Alt0 @ 0,
    t1: T1 => Alt1 @ 1,
    t2: T2 => Alt2 @ 2,
    t3: T3 => Alt3 @ 3,
    t4: T4 => Alt4 @ 4,
    t5: T5 => Alt5 @ 5,
    t6: T6 => Alt6 @ 6,
    t7: T7 => Alt7 @ 7,
);

#[cfg(test)]
mod tests {
    use core::mem::{align_of, size_of};

    use static_assertions::const_assert;

    use super::*;

    const_assert!(size_of::<AltStorage2<u8, u64>>() >= size_of::<u64>());
    const_assert!(align_of::<AltStorage2<u8, u64>>() >= align_of::<u64>());

    #[test]
    fn test_union_sized_for_largest_alternative() {
        assert_eq!(size_of::<AltStorage2<u8, u64>>(), size_of::<u64>());
        assert_eq!(size_of::<AltStorage3<u8, u16, u32>>(), size_of::<u32>());
    }

    #[test]
    fn test_union_aligned_for_most_aligned_alternative() {
        assert_eq!(align_of::<AltStorage2<u8, u64>>(), align_of::<u64>());
        assert_eq!(align_of::<AltStorage3<u8, u16, u32>>(), align_of::<u32>());
    }

    #[test]
    fn test_zero_sized_alternatives_are_allowed() {
        assert_eq!(size_of::<AltStorage1<()>>(), 0);
        assert_eq!(size_of::<AltStorage2<(), u16>>(), size_of::<u16>());
    }
}
