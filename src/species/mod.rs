//! Species records.
//!
//! A [`Species`] describes one taxonomic unit from the NY "Biodiversity by
//! County" dataset: five identifying fields, its NY listing status, and
//! the counties it has been observed in.
//!
//! # Equality and Ordering
//!
//! Two distinct notions are used:
//!
//! - **Equality key** (`==`): common name, scientific name, taxonomic group,
//!   taxonomic sub-group and category, all compared case-insensitively.
//!   Listing status and counties are ignored.
//! - **Sort key** ([`Species::compare_order`]): common name, then scientific
//!   name, case-insensitively.
//!
//! The sort key is coarser than the equality key, so `Species` does not
//! implement `Ord`.
//!
//! # Examples
//!
//! ```rust
//! use species_atlas::species::Species;
//!
//! let mut bobcat = Species::new(
//!     "Animal", "Mammals", "Cats", "Lynx rufus", "Bobcat", "Game with open season",
//! )?;
//! assert!(bobcat.add_county("Erie")?);
//! assert!(!bobcat.add_county("Erie")?);
//! assert!(bobcat.is_present_in("Erie")?);
//! assert_eq!(bobcat.county_count(), 1);
//! # Ok::<(), species_atlas::error::CatalogError>(())
//! ```

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{CatalogResult, require_non_empty};
use crate::text::{cmp_ignore_case, eq_ignore_case, hash_ignore_case};

/// Number of counties in New York State, used as the denominator when
/// rendering county coverage.
pub const NEW_YORK_COUNTY_COUNT: usize = 62;

/// Counties kept inline before spilling to the heap.
const INLINE_COUNTIES: usize = 8;

/// One species with its taxonomy, listing status and observed counties.
///
/// All six descriptive fields are non-empty for the lifetime of the value.
/// Counties are unique (exact, case-sensitive match) and kept in insertion
/// order.
#[derive(Clone, Debug)]
pub struct Species {
    category: String,
    taxonomic_group: String,
    taxonomic_sub_group: String,
    scientific_name: String,
    common_name: String,
    listing_status: String,
    counties: SmallVec<[String; INLINE_COUNTIES]>,
}

impl Species {
    /// Creates a species with no counties.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArgument`](crate::error::CatalogError::InvalidArgument)
    /// if any field is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use species_atlas::species::Species;
    ///
    /// let result = Species::new("Animal", "Mammals", "Cats", "", "Bobcat", "Not Listed");
    /// assert!(result.unwrap_err().is_invalid_argument());
    /// ```
    pub fn new(
        category: impl Into<String>,
        taxonomic_group: impl Into<String>,
        taxonomic_sub_group: impl Into<String>,
        scientific_name: impl Into<String>,
        common_name: impl Into<String>,
        listing_status: impl Into<String>,
    ) -> CatalogResult<Self> {
        let species = Self {
            category: category.into(),
            taxonomic_group: taxonomic_group.into(),
            taxonomic_sub_group: taxonomic_sub_group.into(),
            scientific_name: scientific_name.into(),
            common_name: common_name.into(),
            listing_status: listing_status.into(),
            counties: SmallVec::new(),
        };

        require_non_empty("category", &species.category)?;
        require_non_empty("taxonomic_group", &species.taxonomic_group)?;
        require_non_empty("taxonomic_sub_group", &species.taxonomic_sub_group)?;
        require_non_empty("scientific_name", &species.scientific_name)?;
        require_non_empty("common_name", &species.common_name)?;
        require_non_empty("listing_status", &species.listing_status)?;

        Ok(species)
    }

    /// Returns the category (e.g. `"Animal"`).
    #[inline]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the taxonomic group.
    #[inline]
    pub fn taxonomic_group(&self) -> &str {
        &self.taxonomic_group
    }

    /// Returns the taxonomic sub-group.
    #[inline]
    pub fn taxonomic_sub_group(&self) -> &str {
        &self.taxonomic_sub_group
    }

    /// Returns the scientific name.
    #[inline]
    pub fn scientific_name(&self) -> &str {
        &self.scientific_name
    }

    /// Returns the common name.
    #[inline]
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    /// Returns the NY listing status.
    #[inline]
    pub fn listing_status(&self) -> &str {
        &self.listing_status
    }

    /// Returns the observed counties in insertion order.
    #[inline]
    pub fn counties(&self) -> &[String] {
        &self.counties
    }

    /// Returns the number of observed counties.
    #[inline]
    pub fn county_count(&self) -> usize {
        self.counties.len()
    }

    /// Records an observation in `county`.
    ///
    /// Returns `true` if the county was newly added and `false` if it was
    /// already present, in which case nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArgument`](crate::error::CatalogError::InvalidArgument)
    /// if `county` is empty.
    pub fn add_county(&mut self, county: &str) -> CatalogResult<bool> {
        require_non_empty("county", county)?;
        Ok(self.push_county(county))
    }

    /// Returns `true` if the species has been observed in `county`.
    ///
    /// The match is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidArgument`](crate::error::CatalogError::InvalidArgument)
    /// if `county` is empty.
    pub fn is_present_in(&self, county: &str) -> CatalogResult<bool> {
        require_non_empty("county", county)?;
        Ok(self.has_county(county))
    }

    /// Compares by common name, then scientific name, ignoring case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use species_atlas::species::Species;
    /// use std::cmp::Ordering;
    ///
    /// let bobcat = Species::new("Animal", "Mammals", "Cats", "Lynx rufus", "Bobcat", "Not Listed")?;
    /// let beaver = Species::new("Animal", "Mammals", "Rodents", "Castor canadensis", "Beaver", "Not Listed")?;
    /// assert_eq!(beaver.compare_order(&bobcat), Ordering::Less);
    /// # Ok::<(), species_atlas::error::CatalogError>(())
    /// ```
    pub fn compare_order(&self, other: &Self) -> Ordering {
        cmp_ignore_case(&self.common_name, &other.common_name)
            .then_with(|| cmp_ignore_case(&self.scientific_name, &other.scientific_name))
    }

    /// Returns `true` if both values denote the same species.
    ///
    /// Same as `==`; spelled out for call sites that want to stress that
    /// listing status and counties are not compared.
    #[inline]
    pub fn equals_key(&self, other: &Self) -> bool {
        self == other
    }

    /// Folds the counties of `other` into `self`, returning how many were new.
    ///
    /// Descriptive fields of `self` are never overwritten.
    pub(crate) fn merge_counties_from(&mut self, other: &Self) -> usize {
        other
            .counties
            .iter()
            .filter(|county| self.push_county(county))
            .count()
    }

    fn has_county(&self, county: &str) -> bool {
        self.counties.iter().any(|present| present == county)
    }

    fn push_county(&mut self, county: &str) -> bool {
        if self.has_county(county) {
            return false;
        }
        self.counties.push(county.to_owned());
        true
    }
}

impl PartialEq for Species {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case(&self.common_name, &other.common_name)
            && eq_ignore_case(&self.taxonomic_group, &other.taxonomic_group)
            && eq_ignore_case(&self.scientific_name, &other.scientific_name)
            && eq_ignore_case(&self.taxonomic_sub_group, &other.taxonomic_sub_group)
            && eq_ignore_case(&self.category, &other.category)
    }
}

impl Eq for Species {}

impl Hash for Species {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_case(&self.common_name, state);
        hash_ignore_case(&self.taxonomic_group, state);
        hash_ignore_case(&self.scientific_name, state);
        hash_ignore_case(&self.taxonomic_sub_group, state);
        hash_ignore_case(&self.category, state);
    }
}

impl fmt::Display for Species {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} ({})\n{}, {}\n{}\nPresent in {} / {NEW_YORK_COUNTY_COUNT} counties",
            self.common_name,
            self.scientific_name,
            self.taxonomic_group,
            self.taxonomic_sub_group,
            self.listing_status,
            self.counties.len(),
        )
    }
}
