//! Parsing of delimited dataset rows.
//!
//! Rows follow the column order of the NY "Biodiversity by County" export:
//!
//! ```text
//! County,Category,Taxonomic Group,Taxonomic Sub-Group,Scientific Name,Common Name,Year Last Documented,NY Listing Status,...
//! ```
//!
//! Fields are separated by commas. A field wrapped in double quotes may
//! contain commas, and `""` inside such a field stands for one `"`.
//! Columns after the listing status are ignored.

use thiserror::Error;

use crate::error::CatalogError;
use crate::species::Species;

/// Number of leading columns a row must provide.
pub const FIELD_COUNT: usize = 8;

/// Errors raised while parsing a row.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The row has fewer columns than required.
    #[error("expected at least {expected} fields, found {found}")]
    MissingFields {
        /// Required number of columns.
        expected: usize,
        /// Columns actually present.
        found: usize,
    },

    /// The county column is blank.
    #[error("county field is blank")]
    BlankCounty,

    /// A quoted field is never closed.
    #[error("unterminated quoted field")]
    UnterminatedQuote,
}

/// One parsed row of the dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeciesRecord {
    /// County of the observation.
    pub county: String,
    /// Category (e.g. `"Animal"`).
    pub category: String,
    /// Taxonomic group.
    pub taxonomic_group: String,
    /// Taxonomic sub-group.
    pub taxonomic_sub_group: String,
    /// Scientific name.
    pub scientific_name: String,
    /// Common name.
    pub common_name: String,
    /// Year the species was last documented in the county, if given.
    pub year_last_documented: Option<String>,
    /// NY listing status.
    pub listing_status: String,
}

/// Splits `line` on commas that are not inside double quotes.
///
/// Quotes delimiting a field are removed and every field is trimmed.
///
/// # Errors
///
/// Returns [`RecordError::UnterminatedQuote`] if a quote is left open.
///
/// # Examples
///
/// ```rust
/// use species_atlas::record::split_fields;
///
/// let fields = split_fields(r#"Albany,"Sedges, Rushes",""Big"" Bluestem""#)?;
/// assert_eq!(fields, ["Albany", "Sedges, Rushes", r#""Big" Bluestem"#]);
/// # Ok::<(), species_atlas::record::RecordError>(())
/// ```
pub fn split_fields(line: &str) -> Result<Vec<String>, RecordError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut characters = line.chars().peekable();

    while let Some(character) = characters.next() {
        match character {
            '"' if in_quotes && characters.peek() == Some(&'"') => {
                characters.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_owned());
                field.clear();
            }
            _ => field.push(character),
        }
    }

    if in_quotes {
        return Err(RecordError::UnterminatedQuote);
    }
    fields.push(field.trim().to_owned());
    Ok(fields)
}

/// Parses one data row.
///
/// # Errors
///
/// - [`RecordError::UnterminatedQuote`] for an unbalanced quote.
/// - [`RecordError::MissingFields`] if fewer than [`FIELD_COUNT`] columns are present.
/// - [`RecordError::BlankCounty`] if the county column is blank.
pub fn parse_line(line: &str) -> Result<SpeciesRecord, RecordError> {
    let fields = split_fields(line.trim_end_matches(['\r', '\n']))?;
    if fields.len() < FIELD_COUNT {
        return Err(RecordError::MissingFields {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let mut fields = fields.into_iter();
    let mut next_field = || fields.next().unwrap_or_default();

    let county = next_field();
    if county.is_empty() {
        return Err(RecordError::BlankCounty);
    }

    Ok(SpeciesRecord {
        county,
        category: next_field(),
        taxonomic_group: next_field(),
        taxonomic_sub_group: next_field(),
        scientific_name: next_field(),
        common_name: next_field(),
        year_last_documented: Some(next_field()).filter(|year| !year.is_empty()),
        listing_status: next_field(),
    })
}

impl TryFrom<&SpeciesRecord> for Species {
    type Error = CatalogError;

    fn try_from(record: &SpeciesRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.category.as_str(),
            record.taxonomic_group.as_str(),
            record.taxonomic_sub_group.as_str(),
            record.scientific_name.as_str(),
            record.common_name.as_str(),
            record.listing_status.as_str(),
        )
    }
}
