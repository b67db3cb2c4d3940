//! Page controllers.
//!
//! A controller is built once per page view with its data source injected.
//! It loads the release list exactly once, then reacts to events one at a
//! time. Failures never escape a controller: a failed load, a missing id or
//! an unknown id each turn into a fixed placeholder in the rendered output,
//! and the controller stays usable.
//!
//! ```text
//! CatalogPage::open(source) ─► loaded ─┬─ handle(StatusChanged) ─► grid markup
//!                                       └─ handle(LanguageChanged) ─► grid markup
//!                          └─► load failed ─► error grid, events ignored
//!
//! DetailPage::open(source, id) ─► Found | NoId | NotFound | LoadFailed
//! ```

use crate::catalog::ReleaseCatalog;
use crate::config::SiteConfig;
use crate::release::RawRelease;
use crate::render::{DetailLookup, PageRenderer};
use maud::Markup;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where a page gets its release list from.
pub trait ReleaseSource {
    fn fetch(&self) -> Result<Vec<RawRelease>, SourceError>;
}

/// `releases.json` on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReleaseSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<RawRelease>, SourceError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// An already-parsed release list.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource(pub Vec<RawRelease>);

impl ReleaseSource for InMemorySource {
    fn fetch(&self) -> Result<Vec<RawRelease>, SourceError> {
        Ok(self.0.clone())
    }
}

/// A change on one of the two filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    StatusChanged(String),
    LanguageChanged(String),
}

/// The catalog (index) page.
#[derive(Debug)]
pub struct CatalogPage {
    catalog: ReleaseCatalog,
    renderer: PageRenderer,
    load_error: Option<SourceError>,
}

impl CatalogPage {
    /// Load the release list once and set up the page.
    pub fn open(source: &dyn ReleaseSource, config: &SiteConfig) -> Self {
        let renderer = PageRenderer::new(config);
        match source.fetch() {
            Ok(data) => Self {
                catalog: ReleaseCatalog::new(data),
                renderer,
                load_error: None,
            },
            Err(err) => Self {
                catalog: ReleaseCatalog::default(),
                renderer,
                load_error: Some(err),
            },
        }
    }

    pub fn catalog(&self) -> &ReleaseCatalog {
        &self.catalog
    }

    /// Why the initial load failed, if it did.
    pub fn load_error(&self) -> Option<&SourceError> {
        self.load_error.as_ref()
    }

    /// Apply a filter change and return the re-rendered grid.
    ///
    /// After a failed load the error grid is returned unchanged.
    pub fn handle(&mut self, event: FilterEvent) -> Markup {
        if self.load_error.is_none() {
            match &event {
                FilterEvent::StatusChanged(text) => self.catalog.set_status_filter(text),
                FilterEvent::LanguageChanged(value) => self.catalog.set_language_filter(value),
            }
        }
        self.grid()
    }

    /// The grid container for the current state.
    pub fn grid(&self) -> Markup {
        if self.load_error.is_some() {
            self.renderer.load_error_grid()
        } else {
            self.renderer.catalog_grid(&self.catalog.filtered_view())
        }
    }

    /// The whole index document for the current state.
    pub fn document(&self) -> Markup {
        if self.load_error.is_some() {
            self.renderer.index_error_page()
        } else {
            self.renderer.index_page(&self.catalog)
        }
    }
}

/// A release detail page, selected by id.
#[derive(Debug)]
pub struct DetailPage {
    catalog: ReleaseCatalog,
    renderer: PageRenderer,
    requested: Option<String>,
    load_error: Option<SourceError>,
}

impl DetailPage {
    /// Open the detail page for `id`. Without an id the source is not read.
    pub fn open(source: &dyn ReleaseSource, id: Option<&str>, config: &SiteConfig) -> Self {
        let requested = id.filter(|id| !id.is_empty()).map(str::to_string);
        let (catalog, load_error) = match requested {
            None => (ReleaseCatalog::default(), None),
            Some(_) => match source.fetch() {
                Ok(data) => (ReleaseCatalog::new(data), None),
                Err(err) => (ReleaseCatalog::default(), Some(err)),
            },
        };
        Self {
            catalog,
            renderer: PageRenderer::new(config),
            requested,
            load_error,
        }
    }

    pub fn lookup(&self) -> DetailLookup<'_> {
        if self.load_error.is_some() {
            return DetailLookup::LoadFailed;
        }
        DetailLookup::resolve(&self.catalog, self.requested.as_deref())
    }

    pub fn load_error(&self) -> Option<&SourceError> {
        self.load_error.as_ref()
    }

    /// Contents of the page's main container.
    pub fn content(&self) -> Markup {
        self.renderer.detail_content(&self.lookup())
    }

    pub fn document(&self) -> Markup {
        self.renderer.detail_page(&self.lookup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// Counts fetches so tests can check the source is read once.
    struct CountingSource {
        inner: InMemorySource,
        fetches: Cell<usize>,
    }

    impl ReleaseSource for CountingSource {
        fn fetch(&self) -> Result<Vec<RawRelease>, SourceError> {
            self.fetches.set(self.fetches.get() + 1);
            self.inner.fetch()
        }
    }

    fn counting(data: Vec<RawRelease>) -> CountingSource {
        CountingSource {
            inner: InMemorySource(data),
            fetches: Cell::new(0),
        }
    }

    fn source() -> InMemorySource {
        InMemorySource(sample_raw_releases())
    }

    #[test]
    fn catalog_page_loads_once() {
        let src = counting(sample_raw_releases());
        let mut page = CatalogPage::open(&src, &SiteConfig::default());
        page.handle(FilterEvent::StatusChanged("released".into()));
        page.handle(FilterEvent::LanguageChanged("C".into()));
        assert_eq!(src.fetches.get(), 1);
    }

    #[test]
    fn filter_events_rerender_grid() {
        let mut page = CatalogPage::open(&source(), &SiteConfig::default());
        let all = page.grid().into_string();
        assert_eq!(all.matches("release-card").count(), 4);

        let rust_only = page
            .handle(FilterEvent::LanguageChanged("Rust".into()))
            .into_string();
        assert_eq!(rust_only.matches("release-card").count(), 1);
    }

    #[test]
    fn filter_with_no_matches_renders_placeholder() {
        let mut page = CatalogPage::open(&source(), &SiteConfig::default());
        let html = page
            .handle(FilterEvent::StatusChanged("discontinued".into()))
            .into_string();
        assert!(html.contains("No releases match the current filters."));
    }

    #[test]
    fn missing_file_renders_load_error() {
        let tmp = TempDir::new().unwrap();
        let src = JsonFileSource::new(tmp.path().join("releases.json"));
        let mut page = CatalogPage::open(&src, &SiteConfig::default());
        assert!(matches!(page.load_error(), Some(SourceError::Io { .. })));
        let html = page
            .handle(FilterEvent::StatusChanged("beta".into()))
            .into_string();
        assert!(html.contains("Failed to load release data. Please try again later."));
        assert!(page.document().into_string().contains(r#"class="error""#));
    }

    #[test]
    fn malformed_json_renders_load_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("releases.json");
        fs::write(&path, "{ not json").unwrap();
        let page = CatalogPage::open(&JsonFileSource::new(&path), &SiteConfig::default());
        assert!(matches!(page.load_error(), Some(SourceError::Json(_))));
        assert!(page.grid().into_string().contains("Failed to load release data"));
    }

    #[test]
    fn json_file_source_reads_array() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("releases.json");
        fs::write(&path, serde_json::to_string(&sample_raw_releases()).unwrap()).unwrap();
        let data = JsonFileSource::new(&path).fetch().unwrap();
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn detail_page_found() {
        let page = DetailPage::open(&source(), Some("13_noisebox"), &SiteConfig::default());
        assert!(matches!(page.lookup(), DetailLookup::Found(r) if r.id == "13_noisebox"));
        assert!(page.document().into_string().contains("<title>Noisebox - Workshop Computer</title>"));
    }

    #[test]
    fn detail_page_unknown_id() {
        let page = DetailPage::open(&source(), Some("99_missing"), &SiteConfig::default());
        assert_eq!(page.lookup(), DetailLookup::NotFound);
        assert!(page.content().into_string().contains("Release not found."));
    }

    #[test]
    fn detail_page_without_id_skips_fetch() {
        let src = counting(sample_raw_releases());
        let page = DetailPage::open(&src, None, &SiteConfig::default());
        assert_eq!(src.fetches.get(), 0);
        assert!(page.content().into_string().contains("No release ID specified."));
    }

    #[test]
    fn detail_page_load_failure() {
        let tmp = TempDir::new().unwrap();
        let src = JsonFileSource::new(tmp.path().join("absent.json"));
        let page = DetailPage::open(&src, Some("13_noisebox"), &SiteConfig::default());
        assert_eq!(page.lookup(), DetailLookup::LoadFailed);
        assert!(page.content().into_string().contains("Failed to load release details."));
    }
}
