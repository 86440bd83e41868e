//! Raw slot storage and type-erased per-alternative dispatch.
//!
//! This module provides the two halves of the storage story:
//!
//! - [`RawRegion`]: a raw, uninitialized memory region sized and aligned for
//!   the largest alternative of a set, with no lifecycle of its own.
//! - [`SlotVtable`] (plus the [`CloneFn`], [`EqFn`] and [`DebugFn`] table
//!   entries): function pointers that perform typed operations on a slot
//!   after its concrete type has been erased to [`Erased`].
//!
//! Neither half checks a discriminant. The container owning a region is the
//! single place that pairs "which slot is live" with "which dispatch entry to
//! call", and every unsafe contract in this module is phrased in terms of
//! that pairing.
//!
//! [`Erased`]: crate::util::Erased

mod region;
mod vtable;

pub use region::RawRegion;
pub use vtable::{CloneFn, DebugFn, EqFn, SlotVtable};
pub(crate) use vtable::{clone_slot, debug_slot, eq_slot};
