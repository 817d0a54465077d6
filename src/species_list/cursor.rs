//! Bidirectional cursor over a [`SpeciesList`].

use std::cmp::Ordering;

use super::{SpeciesHandle, SpeciesList};
use crate::error::{CatalogError, CatalogResult};

/// A bidirectional cursor over a [`SpeciesList`].
///
/// The cursor sits between entries: at position `i` the next entry is the
/// one at index `i` and the previous entry the one at index `i - 1`. It can
/// replace the entry it last returned, but it never adds or removes
/// entries; [`insert`](Self::insert) and [`remove`](Self::remove) always
/// fail with [`CatalogError::UnsupportedOperation`].
///
/// The cursor borrows the list mutably, so the list cannot change under it.
///
/// # Examples
///
/// ```rust
/// use species_atlas::species::Species;
/// use species_atlas::species_list::SpeciesList;
///
/// let mut list: SpeciesList = [
///     Species::new("Animal", "Mammals", "Cats", "Lynx rufus", "Bobcat", "Not Listed")?,
///     Species::new("Animal", "Mammals", "Rodents", "Castor canadensis", "Beaver", "Not Listed")?,
/// ]
/// .into_iter()
/// .collect();
///
/// let mut cursor = list.list_cursor(2)?;
/// assert!(!cursor.has_next());
/// assert_eq!(cursor.previous_species()?.borrow().common_name(), "Bobcat");
/// assert_eq!(cursor.previous_species()?.borrow().common_name(), "Beaver");
/// assert!(cursor.previous_species().unwrap_err().is_out_of_range());
/// # Ok::<(), species_atlas::error::CatalogError>(())
/// ```
pub struct SpeciesCursor<'a> {
    list: &'a mut SpeciesList,
    index: usize,
    last_returned: Option<usize>,
}

impl<'a> SpeciesCursor<'a> {
    pub(super) fn new(list: &'a mut SpeciesList, index: usize) -> CatalogResult<Self> {
        if index > list.len() {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: list.len(),
            });
        }
        Ok(Self {
            list,
            index,
            last_returned: None,
        })
    }

    pub(super) const fn at_start(list: &'a mut SpeciesList) -> Self {
        Self {
            list,
            index: 0,
            last_returned: None,
        }
    }

    /// Returns `true` if there is an entry after the cursor.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.index < self.list.len()
    }

    /// Returns `true` if there is an entry before the cursor.
    #[inline]
    pub const fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Index of the entry [`next_species`](Self::next_species) would return.
    #[inline]
    pub const fn next_index(&self) -> usize {
        self.index
    }

    /// Index of the entry [`previous_species`](Self::previous_species) would
    /// return, or `None` at the start of the list.
    #[inline]
    pub const fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Returns the entry after the cursor and moves past it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoSuchElement`] at the end of the list.
    pub fn next_species(&mut self) -> CatalogResult<SpeciesHandle> {
        let entry = self
            .list
            .entries
            .get(self.index)
            .cloned()
            .ok_or(CatalogError::NoSuchElement { direction: "next" })?;
        self.last_returned = Some(self.index);
        self.index += 1;
        Ok(entry)
    }

    /// Returns the entry before the cursor and moves back over it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoSuchElement`] at the start of the list.
    pub fn previous_species(&mut self) -> CatalogResult<SpeciesHandle> {
        let index = self
            .previous_index()
            .ok_or(CatalogError::NoSuchElement {
                direction: "previous",
            })?;
        self.index = index;
        self.last_returned = Some(index);
        Ok(self.list.entries[index].clone())
    }

    /// Replaces the entry last returned by
    /// [`next_species`](Self::next_species) or
    /// [`previous_species`](Self::previous_species), returning the old one.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::IllegalState`] if nothing has been returned yet.
    /// - [`CatalogError::InvalidArgument`] if the replacement would sort
    ///   before its predecessor or after its successor, or equals another
    ///   stored entry.
    pub fn set(&mut self, species: impl Into<SpeciesHandle>) -> CatalogResult<SpeciesHandle> {
        let position = self
            .last_returned
            .ok_or(CatalogError::IllegalState(
                "set called before next_species or previous_species",
            ))?;
        let replacement = species.into();
        self.check_replacement(position, &replacement)?;
        Ok(std::mem::replace(
            &mut self.list.entries[position],
            replacement,
        ))
    }

    /// Always fails: this cursor cannot add entries.
    ///
    /// # Errors
    ///
    /// Always returns [`CatalogError::UnsupportedOperation`].
    pub fn insert(&mut self, _species: impl Into<SpeciesHandle>) -> CatalogResult<()> {
        Err(CatalogError::UnsupportedOperation { operation: "insert" })
    }

    /// Always fails: this cursor cannot remove entries.
    ///
    /// # Errors
    ///
    /// Always returns [`CatalogError::UnsupportedOperation`].
    pub fn remove(&mut self) -> CatalogResult<()> {
        Err(CatalogError::UnsupportedOperation { operation: "remove" })
    }

    fn check_replacement(&self, position: usize, replacement: &SpeciesHandle) -> CatalogResult<()> {
        let entries = &self.list.entries;
        let candidate = replacement.borrow();

        let after_predecessor = position == 0
            || entries[position - 1].borrow().compare_order(&candidate) != Ordering::Greater;
        let before_successor = entries
            .get(position + 1)
            .is_none_or(|next| candidate.compare_order(&next.borrow()) != Ordering::Greater);
        if !(after_predecessor && before_successor) {
            return Err(CatalogError::invalid_argument(
                "species",
                "replacement would break the sort order",
            ));
        }

        let duplicates_other = entries
            .iter()
            .enumerate()
            .any(|(index, entry)| index != position && *entry.borrow() == *candidate);
        if duplicates_other {
            return Err(CatalogError::invalid_argument(
                "species",
                "replacement equals another stored species",
            ));
        }

        Ok(())
    }
}
