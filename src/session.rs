//! Interactive keyword search over a loaded catalog.
//!
//! A session repeatedly prompts for a keyword, searches the catalog and
//! prints every matching species, until the quit word is entered or the
//! input ends. It works over any [`BufRead`] and [`Write`], so the binary
//! drives it with stdin/stdout and tests drive it with byte buffers.

use std::io::{self, BufRead, Write};

use crate::species_list::SpeciesList;
use crate::text::eq_ignore_case;

/// Default word that ends a session.
pub const DEFAULT_QUIT_WORD: &str = "quit";

/// Result of one line of session input.
#[derive(Debug)]
pub enum SearchOutcome {
    /// The quit word was entered.
    Quit,
    /// The keyword was empty.
    EmptyKeyword,
    /// Nothing matched the keyword.
    NoMatches,
    /// Matching species, sharing entries with the catalog.
    Matches(SpeciesList),
}

/// A keyword search session over a catalog.
#[derive(Debug)]
pub struct SearchSession<'a> {
    catalog: &'a SpeciesList,
    quit_word: String,
}

impl<'a> SearchSession<'a> {
    /// Creates a session over `catalog` that ends on `quit_word`
    /// (compared ignoring case).
    pub fn new(catalog: &'a SpeciesList, quit_word: impl Into<String>) -> Self {
        Self {
            catalog,
            quit_word: quit_word.into(),
        }
    }

    /// Returns the word that ends the session.
    pub fn quit_word(&self) -> &str {
        &self.quit_word
    }

    /// Returns the prompt shown before each query.
    pub fn prompt(&self) -> String {
        format!(
            "Search for a species. Type \"{}\" to stop.",
            self.quit_word
        )
    }

    /// Interprets one line of input.
    ///
    /// The line terminator is removed; other whitespace is part of the
    /// keyword.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use species_atlas::session::{SearchOutcome, SearchSession};
    /// use species_atlas::species_list::SpeciesList;
    ///
    /// let catalog = SpeciesList::new();
    /// let session = SearchSession::new(&catalog, "quit");
    ///
    /// assert!(matches!(session.query("QUIT\n"), SearchOutcome::Quit));
    /// assert!(matches!(session.query("\n"), SearchOutcome::EmptyKeyword));
    /// assert!(matches!(session.query("heron"), SearchOutcome::NoMatches));
    /// ```
    pub fn query(&self, line: &str) -> SearchOutcome {
        let keyword = line.trim_end_matches(['\r', '\n']);
        if eq_ignore_case(keyword, &self.quit_word) {
            return SearchOutcome::Quit;
        }

        match self.catalog.search_by_keyword(keyword) {
            Ok(Some(matches)) => SearchOutcome::Matches(matches),
            Ok(None) => SearchOutcome::NoMatches,
            Err(error) => {
                tracing::debug!(%error, "rejected keyword");
                SearchOutcome::EmptyKeyword
            }
        }
    }

    /// Runs the session until the quit word or end of input.
    ///
    /// Prompts, results and the no-match message go to `output`; the
    /// empty-keyword message goes to `errors`. Returns the number of
    /// searches performed.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from reading `input` or writing the outputs.
    pub fn run<R, W, E>(&self, mut input: R, output: &mut W, errors: &mut E) -> io::Result<usize>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let prompt = self.prompt();
        let mut line = String::new();
        let mut searches = 0;

        loop {
            writeln!(output, "{prompt}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            match self.query(&line) {
                SearchOutcome::Quit => break,
                SearchOutcome::EmptyKeyword => writeln!(errors, "Error: empty input")?,
                SearchOutcome::NoMatches => {
                    searches += 1;
                    writeln!(output, "No matching species found.")?;
                }
                SearchOutcome::Matches(matches) => {
                    searches += 1;
                    for species in &matches {
                        writeln!(output, "{species}\n")?;
                    }
                }
            }
        }

        tracing::debug!(searches, "search session ended");
        Ok(searches)
    }
}
