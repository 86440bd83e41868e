//! The tagged-union container.
//!
//! This module encapsulates the fields of [`Variant`] so they cannot be
//! accessed directly from the rest of the crate. This visibility restriction
//! guarantees the safety invariant: **the discriminant and the storage region
//! always agree** (see the field documentation on [`Variant`]). Every unsafe
//! cast below is justified against that invariant.

use core::{
    any::{self, TypeId},
    fmt,
};

use altslot_internals::{
    AlternativeSet, CloneableSet, ComparableSet, DebugSet, RawRegion, SlotIndex, SlotVtable,
};

use crate::error::{AccessError, NotAnAlternative};

/// A container holding at most one live value out of a fixed set of
/// alternative types.
///
/// `L` is the alternative set, written as a tuple of 1 to 8 types. The value
/// is stored inline, in memory sized and aligned for the whole set, and all
/// lifecycle operations dispatch through the set's compile-time function
/// tables.
///
/// # Examples
///
/// ```
/// use altslot::Variant;
///
/// let mut v: Variant<(u32, String)> = Variant::new(10u32);
/// assert_eq!(v.get::<u32>(), Ok(&10));
///
/// v.set(String::from("ten"));
/// assert_eq!(v.get::<String>().map(String::as_str), Ok("ten"));
/// ```
///
/// # State machine
///
/// A container is either *empty* ([`index`](Variant::index) returns `None`)
/// or *holding* alternative `i`. It starts empty, becomes holding through
/// construction or assignment, and becomes empty again only when its value
/// is moved out ([`take`](Variant::take), [`take_value`](Variant::take_value))
/// or, in the degenerate case, when a destructor panics during assignment.
pub struct Variant<L: AlternativeSet> {
    /// Which alternative is currently live, if any.
    ///
    /// # Safety
    ///
    /// The following invariants are upheld as long as this struct exists:
    ///
    /// 1. If `tag` is `Some(i)`, then `i < L::LEN` and the region holds a
    ///    live, properly initialized value of the `i`-th alternative at its
    ///    base address.
    /// 2. If `tag` is `None`, the region holds no live value and its memory
    ///    is never read.
    tag: Option<usize>,
    /// Raw storage for the live value. See the invariants on `tag`.
    region: RawRegion<L::Storage>,
}

impl<L: AlternativeSet> Variant<L> {
    /// Number of alternatives in the set.
    pub const LEN: usize = L::LEN;

    /// Creates an empty container.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let v = Variant::<(u32, String)>::empty();
    /// assert_eq!(v.index(), None);
    /// assert!(v.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tag: None,
            region: RawRegion::uninit(),
        }
    }

    /// Creates a container holding `value`.
    ///
    /// With duplicate alternatives in the set, the first occurrence of `T`
    /// is the one constructed.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not a member of the alternative set. Use
    /// [`Variant::try_new`] to handle that case without panicking.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let v: Variant<(u32, String)> = Variant::new(10u32);
    /// assert_eq!(v.index(), Some(0));
    /// ```
    #[track_caller]
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        match Self::try_new(value) {
            Ok(variant) => variant,
            Err(err) => panic!("Variant::<{}>::new: {err}", any::type_name::<L>()),
        }
    }

    /// Creates a container holding `value`, or returns the value back if `T`
    /// is not a member of the alternative set.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// assert!(Variant::<(u32, String)>::try_new(10u32).is_ok());
    ///
    /// let err = Variant::<(u32, String)>::try_new(1.5f64).unwrap_err();
    /// assert_eq!(err.value, 1.5);
    /// ```
    pub fn try_new<T: 'static>(value: T) -> Result<Self, NotAnAlternative<T>> {
        let mut variant = Self::empty();
        variant.try_set(value)?;
        Ok(variant)
    }

    /// Replaces the current value (if any) with `value`.
    ///
    /// The old value is destroyed first, then the new one is written; see
    /// [`Variant::try_set`] for the exact ordering guarantees.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not a member of the alternative set. The current
    /// value is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let mut v: Variant<(u32, String)> = Variant::new(100u32);
    /// v.set(String::from("hello"));
    /// assert_eq!(v.index(), Some(1));
    /// ```
    #[track_caller]
    pub fn set<T: 'static>(&mut self, value: T) {
        if let Err(err) = self.try_set(value) {
            panic!("Variant::<{}>::set: {err}", any::type_name::<L>());
        }
    }

    /// Replaces the current value (if any) with `value`, or returns the
    /// value back if `T` is not a member of the alternative set.
    ///
    /// On the error path the current value is left untouched. On the success
    /// path the old value is destroyed exactly once before the new one is
    /// written; the discriminant is cleared in between, so if the old
    /// value's destructor panics the container is left empty rather than
    /// holding a destroyed value.
    pub fn try_set<T: 'static>(&mut self, value: T) -> Result<(), NotAnAlternative<T>> {
        let Some(index) = L::index_of::<T>() else {
            return Err(NotAnAlternative::new(value));
        };
        self.destroy_in_place();
        // SAFETY: `destroy_in_place` left the region without a live value,
        // and slot `index` is the first occurrence of `T`, so the region is
        // valid for a write of `T` at its base.
        unsafe { self.region.base_mut().cast::<T>().write(value) };
        self.tag = Some(index);
        Ok(())
    }

    /// Returns the index of the live alternative, or `None` if the container
    /// is empty.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.tag
    }

    /// Returns `true` if the container holds no value.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tag.is_none()
    }

    /// Returns the [`TypeId`] of the live value, or `None` if the container
    /// is empty.
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        self.live_vtable().map(SlotVtable::type_id)
    }

    /// Returns the type name of the live value, or `None` if the container
    /// is empty.
    ///
    /// Intended for diagnostics; the exact string is not stable.
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.live_vtable().map(SlotVtable::type_name)
    }

    /// Returns `true` if the live value is of type `T`.
    ///
    /// Returns `false` for an empty container, and also when `T` is not a
    /// member of the set at all; asking about a foreign type is not an
    /// error.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let v: Variant<(u32, String)> = Variant::new(10u32);
    /// assert!(v.holds::<u32>());
    /// assert!(!v.holds::<String>());
    /// assert!(!v.holds::<f64>());
    /// ```
    #[must_use]
    pub fn holds<T: 'static>(&self) -> bool {
        self.type_id() == Some(TypeId::of::<T>())
    }

    /// Returns `true` if the live alternative is the one at position `I`.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::{Alt0, Alt1, Variant};
    ///
    /// let v: Variant<(u32, String)> = Variant::new(10u32);
    /// assert!(v.holds_at::<Alt0>());
    /// assert!(!v.holds_at::<Alt1>());
    /// ```
    #[must_use]
    pub fn holds_at<I: SlotIndex<L>>(&self) -> bool {
        self.tag == Some(I::INDEX)
    }

    /// Returns a reference to the live value as type `T`.
    ///
    /// Fails with an [`AccessError`] if the container is empty or holds a
    /// different alternative.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let v: Variant<(u32, String)> = Variant::new(10u32);
    /// assert_eq!(v.get::<u32>(), Ok(&10));
    /// assert!(v.get::<String>().is_err());
    /// ```
    pub fn get<T: 'static>(&self) -> Result<&T, AccessError> {
        match self.live_vtable() {
            Some(vtable) if vtable.type_id() == TypeId::of::<T>() => {
                // SAFETY: The live slot holds a value whose type id matches
                // `T`, as checked above.
                Ok(unsafe { self.slot_ref::<T>() })
            }
            Some(vtable) => Err(AccessError::wrong_for::<T>(vtable.type_name())),
            None => Err(AccessError::empty_for::<T>()),
        }
    }

    /// Returns a mutable reference to the live value as type `T`.
    ///
    /// Fails with an [`AccessError`] if the container is empty or holds a
    /// different alternative.
    pub fn get_mut<T: 'static>(&mut self) -> Result<&mut T, AccessError> {
        match self.live_vtable() {
            Some(vtable) if vtable.type_id() == TypeId::of::<T>() => {
                // SAFETY: The live slot holds a value whose type id matches
                // `T`, as checked above.
                Ok(unsafe { self.slot_mut::<T>() })
            }
            Some(vtable) => Err(AccessError::wrong_for::<T>(vtable.type_name())),
            None => Err(AccessError::empty_for::<T>()),
        }
    }

    /// Returns a reference to the value of the alternative at position `I`.
    ///
    /// Fails with an [`AccessError`] if the container is empty or holds a
    /// different alternative. Requesting a position the set does not have is
    /// a compile-time error (there is no [`SlotIndex`] impl for it).
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::{Alt1, Variant};
    ///
    /// let v: Variant<(u32, String)> = Variant::new(String::from("hi"));
    /// assert_eq!(v.at::<Alt1>().map(String::as_str), Ok("hi"));
    /// ```
    pub fn at<I: SlotIndex<L>>(&self) -> Result<&I::Output, AccessError> {
        match self.tag {
            Some(index) if index == I::INDEX => {
                // SAFETY: The discriminant equals `I::INDEX`, and `SlotIndex`
                // guarantees the alternative at that position is `I::Output`.
                Ok(unsafe { self.slot_ref::<I::Output>() })
            }
            Some(index) => Err(AccessError::wrong_for::<I::Output>(
                L::VTABLE[index].type_name(),
            )),
            None => Err(AccessError::empty_for::<I::Output>()),
        }
    }

    /// Returns a mutable reference to the value of the alternative at
    /// position `I`.
    ///
    /// Fails with an [`AccessError`] if the container is empty or holds a
    /// different alternative.
    pub fn at_mut<I: SlotIndex<L>>(&mut self) -> Result<&mut I::Output, AccessError> {
        match self.tag {
            Some(index) if index == I::INDEX => {
                // SAFETY: The discriminant equals `I::INDEX`, and `SlotIndex`
                // guarantees the alternative at that position is `I::Output`.
                Ok(unsafe { self.slot_mut::<I::Output>() })
            }
            Some(index) => Err(AccessError::wrong_for::<I::Output>(
                L::VTABLE[index].type_name(),
            )),
            None => Err(AccessError::empty_for::<I::Output>()),
        }
    }

    /// Returns a reference to the live value as type `T` without checking
    /// the discriminant.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The container currently holds a value of type `T`, for example by
    ///    having checked [`Variant::holds`].
    #[must_use]
    pub unsafe fn get_unchecked<T: 'static>(&self) -> &T {
        debug_assert_eq!(self.type_id(), Some(TypeId::of::<T>()));
        // SAFETY: The live slot holds a `T`, as guaranteed by the caller.
        unsafe { self.slot_ref::<T>() }
    }

    /// Returns a mutable reference to the live value as type `T` without
    /// checking the discriminant.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The container currently holds a value of type `T`, for example by
    ///    having checked [`Variant::holds`].
    #[must_use]
    pub unsafe fn get_unchecked_mut<T: 'static>(&mut self) -> &mut T {
        debug_assert_eq!(self.type_id(), Some(TypeId::of::<T>()));
        // SAFETY: The live slot holds a `T`, as guaranteed by the caller.
        unsafe { self.slot_mut::<T>() }
    }

    /// Moves the whole content out, leaving this container empty.
    ///
    /// An already-empty container yields an empty result and stays as it is.
    /// The moved value is relocated, not cloned, and the vacated slot is not
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let mut a: Variant<(u32, String)> = Variant::new(3u32);
    /// let b = a.take();
    /// assert_eq!(a.index(), None);
    /// assert_eq!(b.get::<u32>(), Ok(&3));
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        let mut taken = Self::empty();
        if let Some(index) = self.tag.take() {
            // SAFETY: Slot `index` of `self` was live; `taken`'s region holds
            // no value; the regions are distinct objects. `self.tag` is
            // already `None`, so the vacated slot can never be dropped here.
            unsafe {
                L::VTABLE[index].relocate(self.region.base_mut(), taken.region.base_mut());
            }
            taken.tag = Some(index);
        }
        taken
    }

    /// Moves the live value out as type `T`, leaving this container empty.
    ///
    /// Fails with an [`AccessError`] (and leaves the container untouched) if
    /// the container is empty or holds a different alternative.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let mut v: Variant<(u32, String)> = Variant::new(String::from("gone"));
    /// let s: String = v.take_value().unwrap();
    /// assert_eq!(s, "gone");
    /// assert!(v.is_empty());
    /// ```
    pub fn take_value<T: 'static>(&mut self) -> Result<T, AccessError> {
        match self.live_vtable() {
            Some(vtable) if vtable.type_id() == TypeId::of::<T>() => {
                self.tag = None;
                // SAFETY: The slot held a live `T`; the tag was cleared
                // first, so ownership transfers to the read below and the
                // slot can never be dropped by this container afterwards.
                Ok(unsafe { self.region.base_mut().cast::<T>().read() })
            }
            Some(vtable) => Err(AccessError::wrong_for::<T>(vtable.type_name())),
            None => Err(AccessError::empty_for::<T>()),
        }
    }

    /// Returns `true` if the container currently holds a `T` equal to
    /// `value`.
    ///
    /// Unlike whole-container comparison, this only requires `T` itself to
    /// be comparable, not every alternative of the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use altslot::Variant;
    ///
    /// let v: Variant<(u32, String)> = Variant::new(5u32);
    /// assert!(v.contains_value(&5u32));
    /// assert!(!v.contains_value(&6u32));
    /// assert!(!v.contains_value(&String::from("5")));
    /// ```
    #[must_use]
    pub fn contains_value<T: PartialEq + 'static>(&self, value: &T) -> bool {
        self.get::<T>().is_ok_and(|held| held == value)
    }

    /// Returns the vtable of the live alternative, if any.
    fn live_vtable(&self) -> Option<&'static SlotVtable> {
        self.tag.map(|index| L::VTABLE[index])
    }

    /// Casts the region base to a shared reference to `T`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The region currently holds a live value of type `T` at its base.
    unsafe fn slot_ref<T: 'static>(&self) -> &T {
        // SAFETY: The base pointer is valid for reads for the duration of
        // the borrow, and it addresses a live `T` as guaranteed by the
        // caller.
        unsafe { self.region.base().cast::<T>().as_ref() }
    }

    /// Casts the region base to a mutable reference to `T`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The region currently holds a live value of type `T` at its base.
    unsafe fn slot_mut<T: 'static>(&mut self) -> &mut T {
        // SAFETY: The base pointer is valid for reads and writes for the
        // duration of the borrow, and it addresses a live `T` as guaranteed
        // by the caller.
        unsafe { self.region.base_mut().cast::<T>().as_mut() }
    }

    /// Destroys the live value, if any, leaving the container empty.
    ///
    /// The discriminant is cleared before the destructor runs, so a
    /// panicking destructor cannot lead to a second drop.
    fn destroy_in_place(&mut self) {
        if let Some(index) = self.tag.take() {
            // SAFETY: Slot `index` was live, and the cleared tag records that
            // it no longer is.
            unsafe { L::VTABLE[index].destroy(self.region.base_mut()) };
        }
    }
}

impl<L: AlternativeSet> Drop for Variant<L> {
    fn drop(&mut self) {
        // Skipping the dispatch when no alternative has a destructor is
        // observably equivalent to always running it.
        if L::NEEDS_DROP {
            self.destroy_in_place();
        }
    }
}

impl<L: AlternativeSet> Default for Variant<L> {
    /// Creates an empty container, equivalent to [`Variant::empty`].
    fn default() -> Self {
        Self::empty()
    }
}

impl<L: CloneableSet> Clone for Variant<L> {
    /// Copy-constructs a container holding a clone of the source's value.
    ///
    /// An empty source clones to an empty container. The source is
    /// unchanged either way.
    fn clone(&self) -> Self {
        let mut cloned = Self::empty();
        if let Some(index) = self.tag {
            // SAFETY: Slot `index` of `self` is live, `CLONE_TABLE[index]`
            // is the clone entry for exactly that alternative, and
            // `cloned`'s region holds no value.
            unsafe { L::CLONE_TABLE[index](self.region.base(), cloned.region.base_mut()) };
            cloned.tag = Some(index);
        }
        cloned
    }
}

impl<L: ComparableSet> PartialEq for Variant<L> {
    /// Compares two containers.
    ///
    /// `false` whenever the discriminants differ, `true` for two empty
    /// containers, per-alternative value equality otherwise.
    fn eq(&self, other: &Self) -> bool {
        match (self.tag, other.tag) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) if lhs == rhs => {
                // SAFETY: Both containers hold a live value of the same
                // alternative `lhs`, and `EQ_TABLE[lhs]` is the equality
                // entry for exactly that alternative.
                unsafe { L::EQ_TABLE[lhs](self.region.base(), other.region.base()) }
            }
            _ => false,
        }
    }
}

impl<L: DebugSet> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_tuple("Variant");
        if let Some(index) = self.tag {
            builder.field(&SlotDebug {
                variant: self,
                index,
            });
        }
        builder.finish()
    }
}

/// Adapter that formats the live slot of a container through its set's
/// `Debug` dispatch table.
struct SlotDebug<'a, L: DebugSet> {
    /// The container whose live slot is formatted.
    variant: &'a Variant<L>,
    /// Index of the live slot.
    index: usize,
}

impl<L: DebugSet> fmt::Debug for SlotDebug<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: `SlotDebug` is only constructed above with the index of
        // the live slot, and `DEBUG_TABLE[index]` is the formatting entry
        // for exactly that alternative.
        unsafe { L::DEBUG_TABLE[self.index](self.variant.region.base(), f) }
    }
}
