//! Sorted, duplicate-merging species collection.
//!
//! [`SpeciesList`] keeps its entries sorted by the species sort key (common
//! name, then scientific name, ignoring case) and never stores two entries
//! that are equal by the species equality key. Inserting a duplicate folds
//! its counties into the stored entry instead of adding a new one; the
//! stored entry's descriptive fields are never overwritten.
//!
//! # Ownership
//!
//! The list stores [`SpeciesHandle`]s. [`SpeciesList::search_by_keyword`]
//! returns a new list holding clones of the matching handles, so a search
//! hit and the source entry are the same entity.
//!
//! # Time Complexity
//!
//! | Operation            | Complexity |
//! |----------------------|------------|
//! | `insert`             | O(n)       |
//! | `insert_with_county` | O(n)       |
//! | `remove`             | O(n)       |
//! | `contains`           | O(n)       |
//! | `index_of`           | O(n)       |
//! | `get`                | O(1)       |
//! | `search_by_keyword`  | O(n)       |
//! | `len`                | O(1)       |
//!
//! Insertion finds its position by binary search but shifts later entries.
//!
//! # Examples
//!
//! ```rust
//! use species_atlas::species::Species;
//! use species_atlas::species_list::SpeciesList;
//!
//! let mut list = SpeciesList::new();
//! let bobcat = Species::new("Animal", "Mammals", "Cats", "Lynx rufus", "Bobcat", "Not Listed")?;
//! let again = Species::new("Animal", "Mammals", "Cats", "Lynx Rufus", "BOBCAT", "Special Concern")?;
//!
//! assert!(list.insert_with_county(bobcat, "Erie")?);
//! assert!(!list.insert_with_county(again, "Suffolk")?);
//!
//! assert_eq!(list.len(), 1);
//! let stored = list.get(0)?.borrow();
//! assert_eq!(stored.listing_status(), "Not Listed");
//! assert_eq!(stored.counties(), ["Erie", "Suffolk"]);
//! # Ok::<(), species_atlas::error::CatalogError>(())
//! ```

mod cursor;
mod handle;

pub use cursor::SpeciesCursor;
pub use handle::SpeciesHandle;

use static_assertions::assert_not_impl_any;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::{CatalogError, CatalogResult, require_non_empty};
use crate::species::Species;
use crate::text::{contains_folded, fold_case};

assert_not_impl_any!(SpeciesList: Send, Sync);
assert_not_impl_any!(SpeciesHandle: Send, Sync);

/// Where a species belongs in the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    /// An equal entry is stored at this index.
    Occupied(usize),
    /// No equal entry; inserting here keeps the list sorted.
    Vacant(usize),
}

/// A sorted collection of species with no two entries equal by the
/// species equality key.
///
/// The list is single-threaded; wrap it in your own lock if it must be
/// reached from more than one thread of control.
#[derive(Default)]
pub struct SpeciesList {
    entries: Vec<SpeciesHandle>,
}

impl SpeciesList {
    /// Creates an empty list.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `species`, keeping the list sorted.
    ///
    /// If an equal entry is already stored, the counties of `species` are
    /// merged into that entry and no new entry is created. Returns `true`
    /// if a new entry was created and `false` if the species was merged.
    ///
    /// Accepts a [`Species`] or an existing [`SpeciesHandle`]; inserting a
    /// handle that is already stored leaves the list unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IllegalState`] if a merge is needed while the
    /// stored entry is borrowed through another handle; the list is left
    /// untouched in that case.
    pub fn insert(&mut self, species: impl Into<SpeciesHandle>) -> CatalogResult<bool> {
        let handle = species.into();
        let slot = self.locate(&*handle.try_borrow()?);
        self.store(handle, slot).map(|(_, added)| added)
    }

    /// Inserts `species` and records `county` on whichever entry ends up
    /// holding it (the new entry, or the stored entry it was merged into).
    ///
    /// Returns `true` if a new entry was created.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArgument`] if `county` is empty and
    /// [`CatalogError::IllegalState`] if the entry that would receive the
    /// county is borrowed through another handle. The list is left
    /// untouched in both cases.
    pub fn insert_with_county(
        &mut self,
        species: impl Into<SpeciesHandle>,
        county: &str,
    ) -> CatalogResult<bool> {
        require_non_empty("county", county)?;
        let handle = species.into();
        let slot = self.locate(&*handle.try_borrow()?);
        match slot {
            Slot::Occupied(index) => self.entries[index].ensure_writable()?,
            Slot::Vacant(_) => handle.ensure_writable()?,
        }

        let (index, added) = self.store(handle, slot)?;
        self.entries[index].add_county(county)?;
        Ok(added)
    }

    /// Removes the entry equal to `species`, returning it.
    ///
    /// Returns `None` if no such entry is stored.
    pub fn remove(&mut self, species: &Species) -> Option<SpeciesHandle> {
        self.index_of(species)
            .map(|index| self.entries.remove(index))
    }

    /// Removes every entry.
    ///
    /// Handles held elsewhere (for example in search results) stay valid.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` if an entry equal to `species` is stored.
    pub fn contains(&self, species: &Species) -> bool {
        self.index_of(species).is_some()
    }

    /// Returns the position of the entry equal to `species`.
    pub fn index_of(&self, species: &Species) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| *entry.borrow() == *species)
    }

    /// Returns the entry at `index` in sort order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IndexOutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> CatalogResult<&SpeciesHandle> {
        self.entries
            .get(index)
            .ok_or(CatalogError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Returns the first entry in sort order.
    #[inline]
    pub fn first(&self) -> Option<&SpeciesHandle> {
        self.entries.first()
    }

    /// Returns the last entry in sort order.
    #[inline]
    pub fn last(&self) -> Option<&SpeciesHandle> {
        self.entries.last()
    }

    /// Collects every entry whose common name or scientific name contains
    /// `keyword`, ignoring case.
    ///
    /// Returns `Ok(None)` when nothing matches. The returned list shares its
    /// entries with `self` (see [`SpeciesHandle`]).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArgument`] if `keyword` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use species_atlas::species::Species;
    /// use species_atlas::species_list::SpeciesList;
    ///
    /// let mut list = SpeciesList::new();
    /// list.insert_with_county(
    ///     Species::new("Animal", "Mammals", "Cats", "Lynx rufus", "Bobcat", "Not Listed")?,
    ///     "Erie",
    /// )?;
    ///
    /// let hits = list.search_by_keyword("RUF")?.expect("bobcat matches");
    /// assert_eq!(hits.len(), 1);
    /// assert!(list.search_by_keyword("heron")?.is_none());
    /// # Ok::<(), species_atlas::error::CatalogError>(())
    /// ```
    pub fn search_by_keyword(&self, keyword: &str) -> CatalogResult<Option<Self>> {
        require_non_empty("keyword", keyword)?;
        let needle = fold_case(keyword);

        let mut matches = Self::new();
        for entry in &self.entries {
            let is_match = {
                let species = entry.borrow();
                contains_folded(species.common_name(), &needle)
                    || contains_folded(species.scientific_name(), &needle)
            };
            if is_match {
                matches.insert(entry.clone())?;
            }
        }

        tracing::trace!(keyword, matches = matches.len(), "keyword search");
        Ok((!matches.is_empty()).then_some(matches))
    }

    /// Returns `true` if both lists hold pairwise-equal entries in the same
    /// order.
    ///
    /// Every position is compared, the last one included.
    pub fn structural_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(left, right)| *left.borrow() == *right.borrow())
    }

    /// Returns a forward iterator over the entries in sort order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns a bidirectional cursor positioned before the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IndexOutOfRange`] if `index > len()`.
    pub fn list_cursor(&mut self, index: usize) -> CatalogResult<SpeciesCursor<'_>> {
        SpeciesCursor::new(self, index)
    }

    /// Returns a bidirectional cursor positioned before the first entry.
    pub fn cursor(&mut self) -> SpeciesCursor<'_> {
        SpeciesCursor::at_start(self)
    }

    /// Stores `handle` at `slot`, merging into the equal entry if there is
    /// one.
    ///
    /// Returns the index of the entry now holding the species and whether
    /// a new entry was created.
    fn store(&mut self, handle: SpeciesHandle, slot: Slot) -> CatalogResult<(usize, bool)> {
        match slot {
            Slot::Occupied(index) => {
                let merged = self.entries[index].merge_from(&handle)?;
                tracing::debug!(
                    common_name = %self.entries[index].borrow().common_name(),
                    merged_counties = merged,
                    "merged duplicate species"
                );
                Ok((index, false))
            }
            Slot::Vacant(index) => {
                self.entries.insert(index, handle);
                Ok((index, true))
            }
        }
    }

    /// Finds the equal entry for `species`, or the first position whose
    /// entry sorts at or after it.
    ///
    /// Equal species always share a sort key, so only the run of entries
    /// with the same sort key needs checking.
    fn locate(&self, species: &Species) -> Slot {
        let start = self
            .entries
            .partition_point(|entry| entry.borrow().compare_order(species) == Ordering::Less);

        self.entries[start..]
            .iter()
            .take_while(|entry| entry.borrow().compare_order(species) == Ordering::Equal)
            .position(|entry| *entry.borrow() == *species)
            .map_or(Slot::Vacant(start), |offset| Slot::Occupied(start + offset))
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// Forward iterator over the entries of a [`SpeciesList`] in sort order.
///
/// Created by [`SpeciesList::iter`]. Iterators are not restartable; ask the
/// list for a new one to traverse again.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, SpeciesHandle>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a SpeciesHandle;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl FusedIterator for Iter<'_> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<'a> IntoIterator for &'a SpeciesList {
    type Item = &'a SpeciesHandle;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Species> for SpeciesList {
    fn from_iter<I: IntoIterator<Item = Species>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl Extend<Species> for SpeciesList {
    fn extend<I: IntoIterator<Item = Species>>(&mut self, iter: I) {
        for species in iter {
            if let Err(error) = self.insert(species) {
                tracing::warn!(%error, "species not merged");
            }
        }
    }
}

impl PartialEq for SpeciesList {
    fn eq(&self, other: &Self) -> bool {
        self.structural_eq(other)
    }
}

impl Eq for SpeciesList {}

impl fmt::Debug for SpeciesList {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for SpeciesList {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        for (position, entry) in self.iter().enumerate() {
            if position > 0 {
                write!(formatter, ", ")?;
            }
            let species = entry.borrow();
            write!(
                formatter,
                "{} ({})",
                species.common_name(),
                species.scientific_name()
            )?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Tests
// =============================================================================
