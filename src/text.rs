//! Case-insensitive text comparison.
//!
//! Names in the catalog are compared after Unicode lower-case folding,
//! character by character, so comparisons never allocate.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[inline]
fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Compares two strings ignoring case.
///
/// # Examples
///
/// ```
/// use species_atlas::text::cmp_ignore_case;
/// use std::cmp::Ordering;
///
/// assert_eq!(cmp_ignore_case("bobcat", "BOBCAT"), Ordering::Equal);
/// assert_eq!(cmp_ignore_case("Aardvark", "bobcat"), Ordering::Less);
/// ```
#[must_use]
pub fn cmp_ignore_case(left: &str, right: &str) -> Ordering {
    folded(left).cmp(folded(right))
}

/// Returns `true` if both strings are equal ignoring case.
#[must_use]
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    folded(left).eq(folded(right))
}

/// Lower-cases `text` once so it can be reused as a search needle.
#[must_use]
pub fn fold_case(text: &str) -> String {
    folded(text).collect()
}

/// Returns `true` if `haystack` contains `folded_needle` ignoring case.
///
/// `folded_needle` must already be folded with [`fold_case`].
#[must_use]
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    fold_case(haystack).contains(folded_needle)
}

/// Feeds the case-folded characters of `text` into `state`, followed by a
/// terminator so adjacent fields cannot run together.
pub(crate) fn hash_ignore_case<H: Hasher>(text: &str, state: &mut H) {
    for character in folded(text) {
        character.hash(state);
    }
    0xFF_u8.hash(state);
}
