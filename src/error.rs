//! Error types for the checked container operations.

use core::{any, fmt};

use thiserror::Error;

/// Error returned by the checked accessors when the requested alternative is
/// not the live one.
///
/// Both variants carry [`core::any::type_name`] strings so the failure reads
/// well in logs and panic messages.
///
/// # Examples
///
/// ```
/// use altslot::{AccessError, Variant};
///
/// let v: Variant<(u32, i64)> = Variant::new(10u32);
/// let err = v.get::<i64>().unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "accessed alternative `i64`, but the container holds `u32`"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The container holds no value at all.
    #[error("accessed alternative `{requested}`, but the container is empty")]
    Empty {
        /// Type name of the requested alternative.
        requested: &'static str,
    },
    /// The container holds a different alternative than the requested one.
    #[error("accessed alternative `{requested}`, but the container holds `{held}`")]
    WrongAlternative {
        /// Type name of the requested alternative.
        requested: &'static str,
        /// Type name of the alternative actually held.
        held: &'static str,
    },
}

impl AccessError {
    /// Builds the empty-container error for a request of type `T`.
    pub(crate) fn empty_for<T>() -> Self {
        AccessError::Empty {
            requested: any::type_name::<T>(),
        }
    }

    /// Builds the wrong-alternative error for a request of type `T` against
    /// a container holding `held`.
    pub(crate) fn wrong_for<T>(held: &'static str) -> Self {
        AccessError::WrongAlternative {
            requested: any::type_name::<T>(),
            held,
        }
    }
}

/// Error returned by [`Variant::try_new`] and [`Variant::try_set`] when the
/// supplied type is not a member of the alternative set.
///
/// The rejected value is handed back unchanged in the `value` field, so a
/// fallible caller loses nothing.
///
/// [`Variant::try_new`]: crate::Variant::try_new
/// [`Variant::try_set`]: crate::Variant::try_set
///
/// # Examples
///
/// ```
/// use altslot::Variant;
///
/// let err = Variant::<(u32,)>::try_new("nope").unwrap_err();
/// assert_eq!(err.value, "nope");
/// ```
#[derive(Error)]
#[error("a value of type `{}` cannot be stored in this alternative set", any::type_name::<T>())]
pub struct NotAnAlternative<T> {
    /// The rejected value, returned to the caller unchanged.
    pub value: T,
}

impl<T> NotAnAlternative<T> {
    /// Wraps a rejected value.
    pub(crate) fn new(value: T) -> Self {
        Self { value }
    }
}

// Manual impl so `T` does not have to be `Debug` for the error to be one.
impl<T> fmt::Debug for NotAnAlternative<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotAnAlternative")
            .field("type", &any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
