#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Extra checks on nightly
#![cfg_attr(nightly_extra_checks, feature(rustdoc_missing_doc_code_examples))]
#![cfg_attr(nightly_extra_checks, forbid(rustdoc::missing_doc_code_examples))]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! An inline tagged-union container over a fixed set of alternative types.
//!
//! ## Overview
//!
//! A [`Variant`] stores at most one live value of exactly one type out of a
//! fixed, compile-time list of alternatives. The value lives inline, in
//! memory sized for the largest alternative and aligned for the most-aligned
//! one: no heap allocation, no boxing, no trait objects. Which alternative is
//! live is tracked by a discriminant, and every lifecycle operation (destroy,
//! clone, relocate, compare, format) dispatches through immutable per-set
//! function-pointer tables built at compile time.
//!
//! The alternative set is written as a tuple type:
//!
//! ```
//! use altslot::Variant;
//!
//! let mut v: Variant<(u32, String)> = Variant::new(10u32);
//! assert_eq!(v.index(), Some(0));
//! assert_eq!(v.get::<u32>(), Ok(&10));
//!
//! v.set(String::from("hello"));
//! assert_eq!(v.index(), Some(1));
//! assert!(v.holds::<String>());
//! ```
//!
//! ## Core Concepts
//!
//! - **Alternative set**: an ordered list of up to 8 types, written as a
//!   tuple. The set fixes the storage layout and the dispatch tables for
//!   every container of that instantiation. See
//!   [`AlternativeSet`].
//! - **Discriminant**: [`Variant::index`] reports which alternative is live,
//!   or `None` for the empty state. A container is empty when default
//!   constructed and after its value has been moved out with
//!   [`Variant::take`] or [`Variant::take_value`]; assignment never leaves it
//!   empty (except when a destructor panics mid-assignment).
//! - **Type-based access**: [`Variant::get`], [`Variant::get_mut`] and
//!   [`Variant::holds`] address an alternative by its type. With duplicate
//!   alternatives in the set, these match the live slot's actual type;
//!   construction targets the first occurrence.
//! - **Index-based access**: [`Variant::at`] and [`Variant::at_mut`] address
//!   an alternative by position through the [`Alt0`]–[`Alt7`] markers. An
//!   out-of-range marker has no [`SlotIndex`] impl and fails to compile.
//!
//! ## Checked and unchecked access
//!
//! Accessors return [`AccessError`] when the requested alternative is not
//! the live one, so a mismatched access is an ordinary recoverable error:
//!
//! ```
//! use altslot::{AccessError, Variant};
//!
//! let v: Variant<(u32, i64)> = Variant::new(10u32);
//! assert!(matches!(
//!     v.get::<i64>(),
//!     Err(AccessError::WrongAlternative { .. })
//! ));
//! ```
//!
//! For callers that have already verified the discriminant,
//! [`Variant::get_unchecked`] and [`Variant::get_unchecked_mut`] skip the
//! check behind an `unsafe fn` with a documented contract.
//!
//! ## Capability-gated impls
//!
//! A `Variant` can always be constructed, queried, assigned, moved out of,
//! and dropped. The comparison, clone, and formatting surfaces exist exactly
//! when every alternative supports them, through additional impls on the
//! tuple:
//!
//! - `Clone` requires every alternative to be `Clone`
//!   ([`CloneableSet`]).
//! - `PartialEq` requires every alternative to be `PartialEq`
//!   ([`ComparableSet`]). Equality is `false` whenever the discriminants
//!   differ, `true` for two empty containers, and per-alternative equality
//!   otherwise.
//! - `Debug` requires every alternative to be `Debug` ([`DebugSet`]).
//!
//! A set with, say, a non-comparable alternative still instantiates fine;
//! only the comparison operator itself is rejected, at compile time.
//!
//! ## Concurrency
//!
//! The dispatch tables are immutable `'static` data, safe to read from any
//! number of threads. `Variant<L>` is `Send`/`Sync` exactly when all of its
//! alternatives are; a single container requires external synchronization
//! for concurrent mutation, like any other Rust value.
//!
//! For implementation details, see the [`altslot-internals`] crate.
//!
//! [`altslot-internals`]: altslot_internals

#[cfg(test)]
extern crate std;

mod error;
mod variant;

pub use altslot_internals::{
    Alt0, Alt1, Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, AlternativeSet, CloneableSet, ComparableSet,
    DebugSet, SlotIndex,
};
pub use error::{AccessError, NotAnAlternative};
pub use variant::Variant;

/// Convenience re-export of the items needed by most users.
///
/// ```
/// use altslot::prelude::*;
///
/// let v: Variant<(u32, String)> = Variant::new(7u32);
/// assert!(v.holds_at::<Alt0>());
/// ```
pub mod prelude {
    pub use crate::{
        Alt0, Alt1, Alt2, Alt3, Alt4, Alt5, Alt6, Alt7, AlternativeSet, SlotIndex, Variant,
    };
}
