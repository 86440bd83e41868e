#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`altslot`].
//!
//! # Overview
//!
//! This crate contains the low-level building blocks that power the
//! [`altslot`] tagged-union container: overlapping raw storage for a fixed
//! list of alternative types, and per-alternative dispatch tables of function
//! pointers that stand in for virtual dispatch.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`altslot`] crate, not
//! this one.
//!
//! # Architecture
//!
//! The crate is organized around three pieces, leaf-first:
//!
//! - **[`set`]**: The compile-time catalogue of alternatives
//!   - [`AlternativeSet`]: Implemented for tuples of arity 1 through 8; ties
//!     a type list to its storage union and its dispatch table
//!   - [`SlotIndex`] with the [`Alt0`]–[`Alt7`] markers: type-level
//!     index-to-type lookup
//!   - [`CloneableSet`], [`ComparableSet`], [`DebugSet`]: capability-gated
//!     dispatch tables for sets whose alternatives all support the
//!     corresponding operation
//!
//! - **[`slot`]**: Raw storage and dispatch
//!   - [`RawRegion`]: Uninitialized, correctly sized and aligned memory with
//!     no lifecycle of its own
//!   - [`SlotVtable`]: Function pointers for destroying and relocating a slot
//!     value whose concrete type has been erased
//!
//! # Safety Strategy
//!
//! A container built on this crate stores one live value in memory shared by
//! all alternatives, and must call dispatch entries that match the type
//! actually stored there. The crate maintains safety through:
//!
//! - **Module-based encapsulation**: Safety-critical fields are
//!   module-private, making invariants locally verifiable within a single
//!   file
//! - **`#[repr(C)]` unions**: Every alternative's slot sits at offset zero of
//!   the storage, so a base pointer can be cast to any single alternative
//!   without layout assumptions
//! - **Documented dispatch contracts**: Each vtable entry and table specifies
//!   exactly when it can be safely called
//! - **One source of truth**: Storage unions, vtables, and index markers for
//!   a given arity are generated by a single macro invocation, so the tables
//!   cannot drift out of sync with the type list
//!
//! [`altslot`]: https://docs.rs/altslot/latest/altslot/
//! [`AlternativeSet`]: set::AlternativeSet
//! [`SlotIndex`]: set::SlotIndex
//! [`Alt0`]: set::Alt0
//! [`Alt7`]: set::Alt7
//! [`CloneableSet`]: set::CloneableSet
//! [`ComparableSet`]: set::ComparableSet
//! [`DebugSet`]: set::DebugSet
//! [`RawRegion`]: slot::RawRegion
//! [`SlotVtable`]: slot::SlotVtable

#[cfg(test)]
extern crate std;

mod set;
mod slot;
mod util;

pub use set::{
    Alt0, Alt1, Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, AltStorage1, AltStorage2, AltStorage3,
    AltStorage4, AltStorage5, AltStorage6, AltStorage7, AltStorage8, AlternativeSet, CloneableSet,
    ComparableSet, DebugSet, SlotIndex,
};
pub use slot::{CloneFn, DebugFn, EqFn, RawRegion, SlotVtable};
pub use util::Erased;
