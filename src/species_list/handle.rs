//! Shared handles to stored species.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::error::{CatalogError, CatalogResult};
use crate::species::Species;

/// A shared, mutable reference to a [`Species`] held by a
/// [`SpeciesList`](super::SpeciesList).
///
/// Cloning a handle does not copy the species: every clone refers to the
/// same entity. Keyword search results are built from clones of the
/// source list's handles, so recording a county through a search hit is
/// visible through the source list too.
///
/// Handles are single-threaded (`!Send`, `!Sync`).
///
/// # Examples
///
/// ```rust
/// use species_atlas::species::Species;
/// use species_atlas::species_list::SpeciesHandle;
///
/// let handle = SpeciesHandle::new(Species::new(
///     "Animal", "Mammals", "Cats", "Lynx rufus", "Bobcat", "Not Listed",
/// )?);
/// let alias = handle.clone();
/// alias.add_county("Erie")?;
///
/// assert!(handle.same_entity(&alias));
/// assert_eq!(handle.borrow().county_count(), 1);
/// # Ok::<(), species_atlas::error::CatalogError>(())
/// ```
#[derive(Clone)]
pub struct SpeciesHandle(Rc<RefCell<Species>>);

impl SpeciesHandle {
    /// Wraps `species` in a new handle.
    #[must_use]
    pub fn new(species: Species) -> Self {
        Self(Rc::new(RefCell::new(species)))
    }

    /// Borrows the species.
    ///
    /// # Panics
    ///
    /// Panics if the species is mutably borrowed. Mutable borrows last only
    /// for the duration of [`add_county`](Self::add_county) or a merging
    /// insert, so this happens only when called re-entrantly from inside
    /// one of those. [`try_borrow`](Self::try_borrow) never panics.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, Species> {
        self.0.borrow()
    }

    /// Borrows the species, failing instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IllegalState`] if the species is mutably
    /// borrowed.
    pub fn try_borrow(&self) -> CatalogResult<Ref<'_, Species>> {
        self.0
            .try_borrow()
            .map_err(|_| CatalogError::IllegalState("species is being modified"))
    }

    /// Records an observation in `county` on the shared species.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArgument`] if `county` is empty and
    /// [`CatalogError::IllegalState`] if the species is currently borrowed.
    pub fn add_county(&self, county: &str) -> CatalogResult<bool> {
        self.try_borrow_mut()?.add_county(county)
    }

    /// Returns `true` if the shared species has been observed in `county`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArgument`] if `county` is empty.
    pub fn is_present_in(&self, county: &str) -> CatalogResult<bool> {
        self.0.borrow().is_present_in(county)
    }

    /// Returns `true` if both handles refer to the same entity.
    #[inline]
    pub fn same_entity(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns an independent copy of the species as it is now.
    #[must_use]
    pub fn snapshot(&self) -> Species {
        self.0.borrow().clone()
    }

    /// Folds the counties of `other` into this species, returning how many
    /// were new.
    ///
    /// Fails with [`CatalogError::IllegalState`] if either side is borrowed
    /// in a conflicting way; nothing is merged in that case.
    pub(crate) fn merge_from(&self, other: &Self) -> CatalogResult<usize> {
        if self.same_entity(other) {
            return Ok(0);
        }
        let incoming = other.try_borrow()?;
        Ok(self.try_borrow_mut()?.merge_counties_from(&incoming))
    }

    /// Fails with [`CatalogError::IllegalState`] unless the species could be
    /// mutated right now.
    pub(crate) fn ensure_writable(&self) -> CatalogResult<()> {
        self.try_borrow_mut().map(drop)
    }

    fn try_borrow_mut(&self) -> CatalogResult<RefMut<'_, Species>> {
        self.0
            .try_borrow_mut()
            .map_err(|_| CatalogError::IllegalState("species is borrowed elsewhere"))
    }
}

impl From<Species> for SpeciesHandle {
    fn from(species: Species) -> Self {
        Self::new(species)
    }
}

impl fmt::Debug for SpeciesHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0.borrow(), formatter)
    }
}

impl fmt::Display for SpeciesHandle {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0.borrow(), formatter)
    }
}
