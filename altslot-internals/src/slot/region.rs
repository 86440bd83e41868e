//! Raw, uninitialized storage for one alternative value.
//!
//! This module encapsulates the `slots` field of [`RawRegion`], ensuring it
//! is only visible within this module. This visibility restriction guarantees
//! the safety invariant: **the region's memory is only ever interpreted
//! through the base pointers handed out below**, never through the union
//! fields directly.
//!
//! # Lifecycle
//!
//! A [`RawRegion`] has trivial construction and trivial destruction. It never
//! initializes its memory and never drops anything: constructing a value into
//! the region and destroying it again is entirely the responsibility of the
//! enclosing container, which tracks which slot (if any) is live via its
//! discriminant and dispatches through the matching
//! [`SlotVtable`](crate::slot::SlotVtable).

use core::{mem::MaybeUninit, ptr::NonNull};

use crate::util::Erased;

/// Raw memory able to hold any one alternative of a set.
///
/// `S` is the `#[repr(C)]` storage union of an
/// [`AlternativeSet`](crate::set::AlternativeSet), so the region is sized for
/// the largest alternative and aligned for the most-aligned one, and every
/// alternative's slot begins at the region's base address.
///
/// The region hands out erased base pointers only. Callers must only
/// reinterpret the base pointer as alternative `i` while the enclosing
/// container's discriminant equals `i` and a value has actually been written
/// there; this layer performs no checking at all.
pub struct RawRegion<S> {
    /// The overlapping slots, permanently maybe-uninitialized.
    ///
    /// # Safety
    ///
    /// The following invariants are upheld as long as this struct exists:
    ///
    /// 1. At most one alternative value is live in this memory at any time.
    /// 2. Which value (if any) is live is tracked entirely by the enclosing
    ///    container; the region itself never reads, writes, or drops the
    ///    memory.
    slots: MaybeUninit<S>,
}

impl<S> RawRegion<S> {
    /// Creates a new region with no live value.
    ///
    /// No memory is initialized by this call.
    #[inline]
    #[must_use]
    pub const fn uninit() -> Self {
        Self {
            slots: MaybeUninit::uninit(),
        }
    }

    /// Returns the erased base address of the region for reading.
    ///
    /// The pointer is valid for reads of the currently live alternative (if
    /// any) for as long as the borrow of `self` lasts. It must not be written
    /// through; use [`RawRegion::base_mut`] for that.
    #[inline]
    #[must_use]
    pub fn base(&self) -> NonNull<Erased> {
        NonNull::from(&self.slots).cast::<Erased>()
    }

    /// Returns the erased base address of the region for reading and
    /// writing.
    ///
    /// The pointer is valid for reads and writes for as long as the borrow
    /// of `self` lasts.
    #[inline]
    #[must_use]
    pub fn base_mut(&mut self) -> NonNull<Erased> {
        NonNull::from(&mut self.slots).cast::<Erased>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_pointers_agree() {
        let mut region: RawRegion<u64> = RawRegion::uninit();
        assert_eq!(region.base().as_ptr(), region.base_mut().as_ptr());
    }

    #[test]
    fn test_region_layout_matches_storage() {
        use core::mem::{align_of, size_of};

        assert_eq!(size_of::<RawRegion<u64>>(), size_of::<u64>());
        assert_eq!(align_of::<RawRegion<u64>>(), align_of::<u64>());
    }

    #[test]
    fn test_write_and_read_back() {
        let mut region: RawRegion<u32> = RawRegion::uninit();
        // SAFETY: The base pointer is valid for writes of u32 and the region
        // holds no live value yet.
        unsafe { region.base_mut().cast::<u32>().write(42) };
        // SAFETY: The write above initialized the slot.
        let value = unsafe { region.base().cast::<u32>().as_ref() };
        assert_eq!(*value, 42);
    }
}
