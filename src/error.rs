//! Error types for the species catalog.
//!
//! Every failure the catalog can report is a variant of [`CatalogError`].
//! Errors are returned to the immediate caller and never recovered
//! internally; callers that want skip-and-continue behavior (such as the
//! ingestion driver) decide that for themselves.

use thiserror::Error;

/// Errors raised by [`Species`](crate::species::Species) and
/// [`SpeciesList`](crate::species_list::SpeciesList) operations.
///
/// # Examples
///
/// ```
/// use species_atlas::error::CatalogError;
///
/// let error = CatalogError::invalid_argument("county", "must not be empty");
/// assert_eq!(error.to_string(), "invalid argument `county`: must not be empty");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A mandatory argument was empty or otherwise unusable.
    #[error("invalid argument `{parameter}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// An index was outside `[0, len)` (or `[0, len]` for cursor positions).
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the list at the time of the request.
        len: usize,
    },

    /// A cursor was moved past either end of the list.
    #[error("no {direction} element")]
    NoSuchElement {
        /// `"next"` or `"previous"`.
        direction: &'static str,
    },

    /// An operation was called when the cursor had no element to act on.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The operation is not offered by this cursor.
    #[error("the {operation} operation is not supported by this cursor")]
    UnsupportedOperation {
        /// Name of the refused operation.
        operation: &'static str,
    },
}

impl CatalogError {
    /// Creates an [`CatalogError::InvalidArgument`].
    #[must_use]
    pub const fn invalid_argument(parameter: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { parameter, reason }
    }

    /// Returns `true` for [`CatalogError::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns `true` for the out-of-range family
    /// ([`CatalogError::IndexOutOfRange`] and [`CatalogError::NoSuchElement`]).
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::NoSuchElement { .. }
        )
    }

    /// Returns `true` for [`CatalogError::UnsupportedOperation`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

/// Result alias used throughout the catalog.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Rejects empty strings for a mandatory parameter.
pub(crate) fn require_non_empty<'a>(
    parameter: &'static str,
    value: &'a str,
) -> CatalogResult<&'a str> {
    if value.is_empty() {
        Err(CatalogError::invalid_argument(parameter, "must not be empty"))
    } else {
        Ok(value)
    }
}
