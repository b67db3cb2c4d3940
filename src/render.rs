//! HTML rendering for the catalog and detail views.
//!
//! Everything here is a pure function from catalog state to [`Markup`].
//! Interpolated text goes through maud's auto-escaping; the only raw HTML
//! inserted is a release's pre-rendered README and the embedded static
//! assets.
//!
//! ## Catalog view
//!
//! One card per release in the filtered view: seven-segment number, title,
//! description, metadata list with a status badge, a detail link, and a
//! download control when the release has firmware. An empty view renders a
//! single "no results" placeholder instead of an empty grid.
//!
//! ## Detail view
//!
//! A release looked up by id in the *full* set (see [`DetailLookup`]): its
//! metadata, one download link per firmware file, the README, and one
//! embedded viewer per PDF.

use crate::catalog::ReleaseCatalog;
use crate::config::{self, SiteConfig};
use crate::download::{DownloadSelection, FileLink};
use crate::glyph::GlyphRenderer;
use crate::release::{Release, file_name};
use crate::status::StatusCategory;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const FILTER_JS: &str = include_str!("../static/filter.js");

/// Labels substituted for absent release fields.
pub mod fallback {
    pub const DESCRIPTION: &str = "No description available.";
    pub const CREATOR: &str = "Unknown";
    pub const LANGUAGE: &str = "Not specified";
    pub const VERSION: &str = "N/A";
    pub const STATUS: &str = "Unknown";
}

/// Fixed user-facing messages for placeholder states.
pub mod message {
    pub const NO_RESULTS: &str = "No releases match the current filters.";
    pub const LOAD_FAILED: &str = "Failed to load release data. Please try again later.";
    pub const DETAIL_LOAD_FAILED: &str = "Failed to load release details.";
    pub const NOT_FOUND: &str = "Release not found.";
    pub const NO_ID: &str = "No release ID specified.";
    pub const NO_DOCUMENTATION: &str = "No documentation available for this release.";
}

/// File name of a release's detail page, relative to the site root.
pub fn detail_file_name(id: &str) -> String {
    format!("release-{id}.html")
}

/// A release field, or its fallback label when absent.
fn shown<'a>(value: &'a Option<String>, missing: &'a str) -> &'a str {
    value.as_deref().unwrap_or(missing)
}

/// Outcome of looking up the release a detail page should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailLookup<'a> {
    Found(&'a Release),
    NoId,
    NotFound,
    LoadFailed,
}

impl<'a> DetailLookup<'a> {
    /// Look `id` up in the catalog's full set, independent of filters.
    pub fn resolve(catalog: &'a ReleaseCatalog, id: Option<&str>) -> Self {
        match id.filter(|id| !id.is_empty()) {
            None => DetailLookup::NoId,
            Some(id) => catalog
                .find(id)
                .map(DetailLookup::Found)
                .unwrap_or(DetailLookup::NotFound),
        }
    }

    /// Placeholder text for every outcome but `Found`.
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            DetailLookup::Found(_) => None,
            DetailLookup::NoId => Some(message::NO_ID),
            DetailLookup::NotFound => Some(message::NOT_FOUND),
            DetailLookup::LoadFailed => Some(message::DETAIL_LOAD_FAILED),
        }
    }
}

/// Renders pages and fragments with one site configuration.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    glyphs: GlyphRenderer,
    site_title: String,
    files_prefix: String,
    css: String,
}

impl PageRenderer {
    pub fn new(config: &SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            glyphs: GlyphRenderer::new(&config.glyph.on_color, &config.glyph.off_color),
            site_title: config.site.title.clone(),
            files_prefix: config.site.files_prefix.clone(),
            css: format!("{color_css}\n\n{CSS_STATIC}"),
        }
    }

    // ========================================================================
    // Shared components
    // ========================================================================

    /// Renders the base HTML document structure
    fn base_document(&self, title: &str, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                    style { (PreEscaped(&self.css)) }
                }
                body {
                    header.site-header {
                        div.container {
                            a.site-title href="index.html" { (self.site_title) }
                        }
                    }
                    (content)
                }
            }
        }
    }

    /// Zero-padded release number as seven-segment glyphs.
    pub fn release_number(&self, release: &Release) -> Markup {
        self.glyphs.render_number(&release.number.padded())
    }

    fn status_badge(&self, release: &Release) -> Markup {
        let category = release.category();
        html! {
            span class={ "status " (category.css_class()) } {
                (release.status.as_deref().unwrap_or(fallback::STATUS))
            }
        }
    }

    fn file_link(&self, path: &str) -> FileLink {
        FileLink::new(&self.files_prefix, path)
    }

    /// Card download control. Multi-file releases list every file inside a
    /// disclosure instead of downloading immediately.
    fn download_control(&self, release: &Release) -> Markup {
        match DownloadSelection::begin(release, &self.files_prefix) {
            Ok(DownloadSelection::Direct(link)) => html! {
                a.btn.btn-secondary href=(link.href) download=(link.file_name) {
                    "💾 Download"
                }
            },
            Ok(DownloadSelection::Choose(choice)) => html! {
                details.download-choice {
                    summary.btn.btn-secondary { "💾 Download" }
                    ol.download-options {
                        @for link in choice.options() {
                            li {
                                a href=(link.href) download=(link.file_name) { (link.file_name) }
                            }
                        }
                    }
                }
            },
            Err(err) => html! {
                span.btn.btn-secondary.disabled title=(err.to_string()) { "💾 Download" }
            },
        }
    }

    // ========================================================================
    // Catalog view
    // ========================================================================

    pub fn release_card(&self, release: &Release) -> Markup {
        html! {
            div.release-card data-status=(release.normalized_status()) data-language=(release.language_text()) {
                div.release-header {
                    div.release-title { (release.title.as_deref().unwrap_or_default()) }
                    div.release-number { (self.release_number(release)) }
                }
                div.release-content {
                    div.release-description {
                        (shown(&release.description, fallback::DESCRIPTION))
                    }
                    div.release-meta {
                        ul.meta-list {
                            li { span.meta-key { "Creator" } span.meta-value { (shown(&release.creator, fallback::CREATOR)) } }
                            li { span.meta-key { "Language" } span.meta-value { (shown(&release.language, fallback::LANGUAGE)) } }
                            li { span.meta-key { "Version" } span.meta-value { (shown(&release.version, fallback::VERSION)) } }
                            li { span.meta-key { "Status" } span.meta-value { (self.status_badge(release)) } }
                        }
                    }
                    div.release-actions {
                        a.btn.btn-primary href=(detail_file_name(&release.id)) { "📄 View Details" }
                        @if release.has_firmware {
                            (self.download_control(release))
                        }
                    }
                }
            }
        }
    }

    /// The card grid container holding `releases`, or the no-results
    /// placeholder when there are none.
    pub fn catalog_grid(&self, releases: &[&Release]) -> Markup {
        html! {
            div.releases-grid id="releases-grid" {
                @if releases.is_empty() {
                    div.no-results { (message::NO_RESULTS) }
                } @else {
                    @for release in releases {
                        (self.release_card(release))
                    }
                }
            }
        }
    }

    /// The grid container replaced by a load-failure message.
    pub fn load_error_grid(&self) -> Markup {
        html! {
            div.releases-grid id="releases-grid" {
                div.error { (message::LOAD_FAILED) }
            }
        }
    }

    /// Status and language `<select>` controls with the current selection
    /// marked.
    pub fn filter_controls(&self, catalog: &ReleaseCatalog) -> Markup {
        let current = catalog.filters();
        html! {
            section.filters {
                label for="status-filter" { "Status" }
                select id="status-filter" {
                    option value="" selected[current.status.is_empty()] { "All statuses" }
                    @for category in StatusCategory::ALL {
                        option value=(category.filter_term())
                            selected[current.status == category.filter_term()] {
                            (category.label())
                        }
                    }
                }
                label for="language-filter" { "Language" }
                select id="language-filter" {
                    option value="" selected[current.language.is_empty()] { "All languages" }
                    @for language in catalog.available_languages() {
                        option value=(language) selected[current.language == language] {
                            (language)
                        }
                    }
                }
            }
        }
    }

    /// Full index page: filter controls plus the current filtered view.
    pub fn index_page(&self, catalog: &ReleaseCatalog) -> Markup {
        let content = html! {
            main.container {
                (self.filter_controls(catalog))
                (self.catalog_grid(&catalog.filtered_view()))
            }
            script { (PreEscaped(FILTER_JS)) }
        };
        self.base_document(&self.site_title, content)
    }

    /// Index page whose grid shows the load-failure message.
    pub fn index_error_page(&self) -> Markup {
        let content = html! {
            main.container {
                (self.load_error_grid())
            }
        };
        self.base_document(&self.site_title, content)
    }

    // ========================================================================
    // Detail view
    // ========================================================================

    fn back_button(bottom: bool) -> Markup {
        html! {
            div.back-button.back-bottom[bottom] {
                a.btn.btn-secondary href="index.html" { "← Back to Releases" }
            }
        }
    }

    /// Contents of the detail page's main container.
    pub fn detail_content(&self, lookup: &DetailLookup<'_>) -> Markup {
        let DetailLookup::Found(release) = *lookup else {
            return self.detail_error(lookup.failure_message().unwrap_or_default());
        };

        html! {
            (Self::back_button(false))
            div.release-detail {
                div.release-detail-header {
                    h1 {
                        (self.release_number(release))
                        " "
                        span.detail-title { (release.title.as_deref().unwrap_or_default()) }
                    }
                    p.subtitle { (shown(&release.description, fallback::DESCRIPTION)) }
                    div.release-meta {
                        p { strong { "Creator:" } " " (shown(&release.creator, fallback::CREATOR)) }
                        p { strong { "Language:" } " " (shown(&release.language, fallback::LANGUAGE)) }
                        p { strong { "Version:" } " " (shown(&release.version, fallback::VERSION)) }
                        p { strong { "Status:" } " " (self.status_badge(release)) }
                    }
                }
                div.release-detail-content {
                    @if release.has_firmware {
                        div.download-section {
                            h3 { "Downloads" }
                            @for file in &release.uf2_files {
                                @let link = self.file_link(file);
                                a.btn.btn-primary href=(link.href) download=(link.file_name) {
                                    "💾 Download " (link.file_name)
                                }
                                " "
                            }
                        }
                    }
                    @if let Some(readme) = &release.readme_html {
                        div.readme-section {
                            h3 { "README" }
                            div.readme-html { (PreEscaped(readme)) }
                        }
                    }
                    @if release.has_documentation {
                        div.documentation-section {
                            h3 { "Documentation" }
                            @for file in &release.pdf_files {
                                @let link = self.file_link(file);
                                div.pdf-container {
                                    h4 { (file_name(file)) }
                                    iframe.pdf-viewer src=(link.href) type="application/pdf" {
                                        p {
                                            "Your browser doesn't support PDF viewing. "
                                            a href=(link.href) target="_blank" { "Click here to download the PDF" }
                                        }
                                    }
                                }
                            }
                        }
                    } @else {
                        p { (message::NO_DOCUMENTATION) }
                    }
                }
            }
            (Self::back_button(true))
        }
    }

    fn detail_error(&self, text: &str) -> Markup {
        html! {
            (Self::back_button(false))
            div.error { (text) }
        }
    }

    /// Full detail page document.
    pub fn detail_page(&self, lookup: &DetailLookup<'_>) -> Markup {
        let title = match lookup {
            DetailLookup::Found(release) => format!(
                "{} - {}",
                release.title.as_deref().unwrap_or_default(),
                self.site_title
            ),
            _ => self.site_title.clone(),
        };
        let content = html! {
            main.container {
                (self.detail_content(lookup))
            }
        };
        self.base_document(&title, content)
    }
}

// ============================================================================
// Tests
// ============================================================================
