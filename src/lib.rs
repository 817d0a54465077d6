//! # species-atlas
//!
//! A sorted, duplicate-merging catalog of species observations with
//! case-insensitive keyword search, built for the NY "Biodiversity by
//! County" dataset.
//!
//! ## Overview
//!
//! - **Species**: one taxonomic unit with its NY listing status and the
//!   counties it has been observed in ([`species::Species`]).
//! - **Species list**: a collection kept sorted by common name and
//!   scientific name that merges duplicate species instead of storing them
//!   twice ([`species_list::SpeciesList`]).
//! - **Ingestion**: parsing delimited rows and loading them into a list,
//!   skipping rows that cannot be used (feature `ingest`).
//! - **Search session**: an interactive keyword search loop over any reader
//!   and writer (feature `ingest`).
//!
//! ## Feature Flags
//!
//! - `ingest`: record parsing, catalog loading and the search session
//! - `cli`: command line configuration and the `species-atlas` binary
//!
//! ## Example
//!
//! ```rust
//! use species_atlas::prelude::*;
//!
//! let mut catalog = SpeciesList::new();
//! catalog.insert_with_county(
//!     Species::new("Animal", "Mammals", "Cats", "Lynx rufus", "Bobcat", "Not Listed")?,
//!     "Erie",
//! )?;
//!
//! let hits = catalog.search_by_keyword("bob")?.expect("bobcat matches");
//! assert_eq!(hits.to_string(), "[Bobcat (Lynx rufus)]");
//! # Ok::<(), CatalogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use species_atlas::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CatalogError, CatalogResult};
    pub use crate::species::{NEW_YORK_COUNTY_COUNT, Species};
    pub use crate::species_list::{SpeciesCursor, SpeciesHandle, SpeciesList};

    #[cfg(feature = "ingest")]
    pub use crate::ingest::{IngestOptions, IngestReport, load_catalog};
    #[cfg(feature = "ingest")]
    pub use crate::record::{SpeciesRecord, parse_line};
    #[cfg(feature = "ingest")]
    pub use crate::session::{SearchOutcome, SearchSession};
}

pub mod error;
pub mod species;
pub mod species_list;
pub mod text;

#[cfg(feature = "ingest")]
pub mod ingest;

#[cfg(feature = "ingest")]
pub mod record;

#[cfg(feature = "ingest")]
pub mod session;

#[cfg(feature = "cli")]
pub mod config;
