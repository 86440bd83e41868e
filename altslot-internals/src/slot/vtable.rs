//! Vtable for type-erased slot operations.
//!
//! This module contains the [`SlotVtable`], which enables destroying and
//! relocating a slot value when its concrete alternative type `T` has been
//! erased, along with the capability-gated table entries ([`CloneFn`],
//! [`EqFn`], [`DebugFn`]) used by sets whose alternatives all support the
//! corresponding operation.
//!
//! This module encapsulates the fields of [`SlotVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **a vtable's function pointers always belong to the single
//! alternative type the vtable was created for**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`SlotVtable::new`], which pairs the function pointers with
//! a specific type `T` at compile time, and nothing can modify them
//! afterwards.

use core::{any::TypeId, fmt, ptr::NonNull};

use crate::util::Erased;

/// Table entry that placement-clones a slot value into another region.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` points to a live, properly initialized value of the alternative
///    type this entry was instantiated with.
/// 2. `dst` points to storage that is valid for writes of that type and
///    holds no live value.
pub type CloneFn = unsafe fn(src: NonNull<Erased>, dst: NonNull<Erased>);

/// Table entry that compares the slot values of two regions for equality.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. Both pointers point to live, properly initialized values of the
///    alternative type this entry was instantiated with.
pub type EqFn = unsafe fn(lhs: NonNull<Erased>, rhs: NonNull<Erased>) -> bool;

/// Table entry that formats a slot value with its `Debug` implementation.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` points to a live, properly initialized value of the alternative
///    type this entry was instantiated with.
pub type DebugFn = unsafe fn(slot: NonNull<Erased>, f: &mut fmt::Formatter<'_>) -> fmt::Result;

/// Vtable for type-erased slot operations.
///
/// Contains function pointers for performing operations on a slot value
/// without knowing its concrete type at compile time.
///
/// # Safety Invariant
///
/// The fields `destroy` and `relocate` are guaranteed to point to the
/// functions defined below instantiated with the alternative type `T` that
/// was used to create this [`SlotVtable`], and `type_id`/`type_name` report
/// that same `T`.
#[derive(Clone, Copy)]
pub struct SlotVtable {
    /// Gets the [`TypeId`] of the alternative type that was used to create
    /// this [`SlotVtable`].
    type_id: fn() -> TypeId,
    /// Gets the type name of the alternative type that was used to create
    /// this [`SlotVtable`].
    type_name: fn() -> &'static str,
    /// Drops the slot value in place.
    destroy: unsafe fn(NonNull<Erased>),
    /// Moves the slot value into another region, leaving the source memory
    /// logically uninitialized.
    relocate: unsafe fn(NonNull<Erased>, NonNull<Erased>),
}

impl SlotVtable {
    /// Creates a new [`SlotVtable`] for the alternative type `T`.
    #[must_use]
    pub const fn new<T: 'static>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<T>,
                type_name: core::any::type_name::<T>,
                destroy: destroy::<T>,
                relocate: relocate::<T>,
            }
        }
    }

    /// Gets the [`TypeId`] of the alternative type that was used to create
    /// this [`SlotVtable`].
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the alternative type that was
    /// used to create this [`SlotVtable`].
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Drops the slot value in place.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `slot` points to a live, properly initialized value of the
    ///    alternative type this [`SlotVtable`] was created for.
    /// 2. The value is not used again after this call. In particular the
    ///    caller must record, before or immediately after calling, that the
    ///    slot no longer holds a value, so that no second drop can happen.
    #[inline]
    pub unsafe fn destroy(&self, slot: NonNull<Erased>) {
        // SAFETY: We know that `self.destroy` points to the function
        // `destroy::<T>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.destroy)(slot) }
    }

    /// Moves the slot value from `src` into `dst`.
    ///
    /// After this call the value lives in `dst`; the memory behind `src` is
    /// logically uninitialized and must not be dropped or read as the
    /// alternative type again.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `src` points to a live, properly initialized value of the
    ///    alternative type this [`SlotVtable`] was created for, and the
    ///    caller is able to transfer ownership of it.
    /// 2. `dst` points to storage valid for writes of that type which holds
    ///    no live value.
    /// 3. `src` and `dst` do not overlap.
    #[inline]
    pub unsafe fn relocate(&self, src: NonNull<Erased>, dst: NonNull<Erased>) {
        // SAFETY: We know that `self.relocate` points to the function
        // `relocate::<T>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe { (self.relocate)(src, dst) }
    }
}

/// Drops the value of type `T` stored at `slot`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` points to a live, properly initialized `T`.
/// 2. The value is not dropped or otherwise used again after this call.
unsafe fn destroy<T: 'static>(slot: NonNull<Erased>) {
    let slot: NonNull<T> = slot.cast::<T>();
    // SAFETY: The pointer is valid for reads and writes of `T` and the
    // pointee is live, as guaranteed by the caller. The caller takes over
    // the responsibility of never touching the value again.
    unsafe { slot.drop_in_place() }
}

/// Moves the value of type `T` stored at `src` into `dst`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` points to a live, properly initialized `T` whose ownership is
///    transferred by this call.
/// 2. `dst` is valid for writes of `T` and holds no live value.
/// 3. `src` and `dst` do not overlap.
unsafe fn relocate<T: 'static>(src: NonNull<Erased>, dst: NonNull<Erased>) {
    // SAFETY: `src` points to a live `T` as guaranteed by the caller, and
    // ownership moves into `value` here.
    let value: T = unsafe { src.cast::<T>().read() };
    // SAFETY: `dst` is valid for writes of `T` and uninitialized, as
    // guaranteed by the caller.
    unsafe { dst.cast::<T>().write(value) }
}

/// Placement-clones the value of type `T` stored at `src` into `dst`.
///
/// Used as a [`CloneFn`] table entry by sets whose alternatives are all
/// `Clone`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` points to a live, properly initialized `T`.
/// 2. `dst` is valid for writes of `T` and holds no live value.
pub(crate) unsafe fn clone_slot<T: Clone + 'static>(src: NonNull<Erased>, dst: NonNull<Erased>) {
    // SAFETY: `src` points to a live `T` as guaranteed by the caller, and
    // shared access is sufficient for cloning.
    let value: &T = unsafe { src.cast::<T>().as_ref() };
    let cloned = value.clone();
    // SAFETY: `dst` is valid for writes of `T` and uninitialized, as
    // guaranteed by the caller.
    unsafe { dst.cast::<T>().write(cloned) }
}

/// Compares the values of type `T` stored at `lhs` and `rhs` for equality.
///
/// Used as an [`EqFn`] table entry by sets whose alternatives are all
/// `PartialEq`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. Both pointers point to live, properly initialized values of type `T`.
pub(crate) unsafe fn eq_slot<T: PartialEq + 'static>(
    lhs: NonNull<Erased>,
    rhs: NonNull<Erased>,
) -> bool {
    // SAFETY: `lhs` points to a live `T` as guaranteed by the caller.
    let lhs: &T = unsafe { lhs.cast::<T>().as_ref() };
    // SAFETY: `rhs` points to a live `T` as guaranteed by the caller.
    let rhs: &T = unsafe { rhs.cast::<T>().as_ref() };
    lhs == rhs
}

/// Formats the value of type `T` stored at `slot` with its `Debug`
/// implementation.
///
/// Used as a [`DebugFn`] table entry by sets whose alternatives are all
/// `Debug`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `slot` points to a live, properly initialized `T`.
pub(crate) unsafe fn debug_slot<T: fmt::Debug + 'static>(
    slot: NonNull<Erased>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    // SAFETY: `slot` points to a live `T` as guaranteed by the caller.
    let value: &T = unsafe { slot.cast::<T>().as_ref() };
    fmt::Debug::fmt(value, f)
}

#[cfg(test)]
mod tests {
    use core::mem::MaybeUninit;

    use super::*;

    #[test]
    fn test_vtable_type_id() {
        let vtable = SlotVtable::new::<i32>();
        assert_eq!(vtable.type_id(), TypeId::of::<i32>());
        assert_ne!(vtable.type_id(), TypeId::of::<u32>());
    }

    #[test]
    fn test_vtable_type_name() {
        let vtable = SlotVtable::new::<i32>();
        assert_eq!(vtable.type_name(), "i32");
    }

    #[test]
    fn test_vtables_of_distinct_types_differ() {
        let a = SlotVtable::new::<i32>();
        let b = SlotVtable::new::<u32>();
        assert_ne!(a.type_id(), b.type_id());
    }

    #[test]
    fn test_relocate_moves_value() {
        let vtable = SlotVtable::new::<u64>();
        let mut src = MaybeUninit::new(0xdead_beef_u64);
        let mut dst = MaybeUninit::<u64>::uninit();

        let src_ptr = NonNull::from(&mut src).cast::<Erased>();
        let dst_ptr = NonNull::from(&mut dst).cast::<Erased>();
        // SAFETY: `src` holds a live u64 owned by this frame, `dst` is
        // uninitialized storage for a u64, and the two do not overlap.
        unsafe { vtable.relocate(src_ptr, dst_ptr) };

        // SAFETY: `relocate` initialized `dst`.
        let moved = unsafe { dst.assume_init() };
        assert_eq!(moved, 0xdead_beef_u64);
    }

    #[test]
    fn test_eq_slot_compares_values() {
        let mut a = MaybeUninit::new(7_i32);
        let mut b = MaybeUninit::new(7_i32);
        let mut c = MaybeUninit::new(8_i32);

        let a_ptr = NonNull::from(&mut a).cast::<Erased>();
        let b_ptr = NonNull::from(&mut b).cast::<Erased>();
        let c_ptr = NonNull::from(&mut c).cast::<Erased>();

        // SAFETY: All three pointers address live i32 values.
        unsafe {
            assert!(eq_slot::<i32>(a_ptr, b_ptr));
        }
        // SAFETY: As above.
        unsafe {
            assert!(!eq_slot::<i32>(a_ptr, c_ptr));
        }
    }
}
