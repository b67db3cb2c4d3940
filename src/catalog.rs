//! In-memory release catalog with status and language filters.
//!
//! The catalog owns the full release list (write-once per load) and the two
//! filter selections. The filtered view is recomputed from scratch whenever a
//! selection changes and fully replaces the previous one.
//!
//! Filter semantics:
//!
//! - **status**: case-insensitive substring of the *raw* status text. This is
//!   not the classified [`StatusCategory`](crate::status::StatusCategory):
//!   "Beta (working prototype)" passes a `working` filter.
//! - **language**: exact, case-sensitive equality. `Rust` does not match
//!   `rust-embedded`.
//!
//! An empty selection on either axis means "no filter".

use crate::release::{RawRelease, Release};
use std::collections::BTreeSet;

/// Current filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub status: String,
    pub language: String,
}

impl FilterSelection {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.language.is_empty()
    }

    pub fn matches(&self, release: &Release) -> bool {
        let status_match = self.status.is_empty()
            || release
                .normalized_status()
                .contains(&self.status.to_lowercase());
        let language_match =
            self.language.is_empty() || release.language_text() == self.language;
        status_match && language_match
    }
}

/// Release counts reported after a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub with_firmware: usize,
    pub with_documentation: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ReleaseCatalog {
    releases: Vec<Release>,
    filters: FilterSelection,
    /// Indices into `releases`, in source order.
    filtered: Vec<usize>,
}

impl ReleaseCatalog {
    pub fn new(data: Vec<RawRelease>) -> Self {
        let mut catalog = Self::default();
        catalog.load(data);
        catalog
    }

    /// Replace the full release set. The filtered view resets to the
    /// unfiltered set; filter selections are cleared.
    pub fn load(&mut self, data: Vec<RawRelease>) {
        self.releases = data.into_iter().map(Release::from).collect();
        self.filters = FilterSelection::default();
        self.filtered = (0..self.releases.len()).collect();
    }

    pub fn set_status_filter(&mut self, text: &str) {
        self.filters.status = text.to_string();
        self.refilter();
    }

    pub fn set_language_filter(&mut self, value: &str) {
        self.filters.language = value.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = self
            .releases
            .iter()
            .enumerate()
            .filter(|(_, r)| self.filters.matches(r))
            .map(|(i, _)| i)
            .collect();
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Releases passing the current filters, in source order.
    pub fn filtered_view(&self) -> Vec<&Release> {
        self.filtered.iter().map(|&i| &self.releases[i]).collect()
    }

    /// The full release set, ignoring filters.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// Look up a release in the full set. Filters never hide a release from
    /// direct lookup.
    pub fn find(&self, id: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.id == id)
    }

    /// Distinct non-empty languages across the full set, sorted.
    pub fn available_languages(&self) -> Vec<&str> {
        self.releases
            .iter()
            .filter_map(|r| r.language.as_deref())
            .filter(|l| !l.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            total: self.releases.len(),
            with_firmware: self.releases.iter().filter(|r| r.has_firmware).count(),
            with_documentation: self
                .releases
                .iter()
                .filter(|r| r.has_documentation)
                .count(),
        }
    }
}
