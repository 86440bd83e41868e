//! Internal utility types.

/// Marker type for pointers into slot storage whose pointee type has been
/// erased.
///
/// A `NonNull<Erased>` produced by [`RawRegion`] points at the base of the
/// storage region. The actual type of the value stored there (if any) is
/// known only to the container that owns the region, which recovers it
/// through its discriminant and the per-alternative dispatch tables.
///
/// Using a distinct marker type (rather than `()` or `u8`) makes the intent
/// clearer in signatures and keeps accidental dereferences impossible outside
/// the dispatch functions that cast it back.
///
/// [`RawRegion`]: crate::slot::RawRegion
#[derive(Clone, Copy)]
pub struct Erased;
