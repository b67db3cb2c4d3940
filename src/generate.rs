//! Static site generation.
//!
//! Reads `releases.json` and writes a browsable site: the catalog index, one
//! detail page per release, and a copy of the data file for the page script.
//! Pages are rendered through the same controllers a live view would use, so
//! the generated HTML is exactly what [`CatalogPage`] and [`DetailPage`]
//! produce.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                       # Catalog: filters + card grid
//! ├── releases.json                    # Copied verbatim
//! ├── release-03_Turing_Machine.html   # One detail page per release
//! ├── release-05_chord_blimey.html
//! └── ...
//! ```
//!
//! Firmware and documentation links point outside the output directory,
//! through the configured `files_prefix` (default `../`). The site is
//! expected to be served from a directory next to `releases/`.

use crate::catalog::CatalogSummary;
use crate::config::SiteConfig;
use crate::controller::{
    CatalogPage, DetailPage, InMemorySource, JsonFileSource, ReleaseSource, SourceError,
};
use crate::render::detail_file_name;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not load release data: {0}")]
    Source(#[from] SourceError),
    #[error("Release id {0:?} cannot be used as a file name")]
    InvalidId(String),
}

pub const DATA_FILE: &str = "releases.json";
pub const INDEX_FILE: &str = "index.html";

/// One written detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub id: String,
    pub title: String,
    pub file: String,
}

/// What [`generate`] wrote.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub pages: Vec<GeneratedPage>,
    pub summary: CatalogSummary,
}

pub fn generate(
    data_path: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<GenerateReport, GenerateError> {
    // Unreadable data fails the build.
    let source = InMemorySource(JsonFileSource::new(data_path).fetch()?);
    let index = CatalogPage::open(&source, config);

    for release in index.catalog().releases() {
        check_id(&release.id)?;
    }

    fs::create_dir_all(output_dir)?;
    fs::write(output_dir.join(INDEX_FILE), index.document().into_string())?;
    let data_copy = output_dir.join(DATA_FILE);
    if !same_file(data_path, &data_copy)? {
        fs::copy(data_path, &data_copy)?;
    }

    let mut pages = Vec::new();
    for release in index.catalog().releases() {
        let page = DetailPage::open(&source, Some(release.id.as_str()), config);
        let file = detail_file_name(&release.id);
        fs::write(output_dir.join(&file), page.document().into_string())?;
        pages.push(GeneratedPage {
            id: release.id.clone(),
            title: release.title.clone().unwrap_or_default(),
            file,
        });
    }

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        pages,
        summary: index.catalog().summary(),
    })
}

/// `fs::copy` onto itself truncates the file.
fn same_file(a: &Path, b: &Path) -> std::io::Result<bool> {
    if !b.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}

/// Ids become file names and link targets; reject anything that would
/// escape the output directory or break the `href`.
fn check_id(id: &str) -> Result<(), GenerateError> {
    let unsafe_id = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '#', '?', '%'])
        || id.chars().any(char::is_whitespace);
    if unsafe_id {
        return Err(GenerateError::InvalidId(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::RawRelease;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn write_data(dir: &Path, releases: &[RawRelease]) -> PathBuf {
        let path = dir.join("website").join(DATA_FILE);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_string_pretty(releases).unwrap()).unwrap();
        path
    }

    fn generate_sample() -> (TempDir, GenerateReport) {
        let tmp = TempDir::new().unwrap();
        let data = write_data(tmp.path(), &sample_raw_releases());
        let report = generate(&data, &tmp.path().join("dist"), &SiteConfig::default()).unwrap();
        (tmp, report)
    }

    #[test]
    fn writes_index_data_and_detail_pages() {
        let (tmp, report) = generate_sample();
        let dist = tmp.path().join("dist");
        assert!(dist.join("index.html").exists());
        assert!(dist.join("releases.json").exists());
        for id in ["03_turing_machine", "05_chord_blimey", "10_twists", "13_noisebox"] {
            assert!(dist.join(format!("release-{id}.html")).exists(), "{id}");
        }
        assert_eq!(report.pages.len(), 4);
    }

    #[test]
    fn data_file_is_copied_verbatim() {
        let (tmp, _) = generate_sample();
        let original = fs::read(tmp.path().join("website/releases.json")).unwrap();
        let copied = fs::read(tmp.path().join("dist/releases.json")).unwrap();
        assert_eq!(original, copied);
    }

    #[test]
    fn index_lists_every_release() {
        let (tmp, _) = generate_sample();
        let html = fs::read_to_string(tmp.path().join("dist/index.html")).unwrap();
        assert_eq!(html.matches(r#"class="release-card""#).count(), 4);
        assert!(html.contains(r#"href="release-13_noisebox.html""#));
    }

    #[test]
    fn detail_page_shows_its_release() {
        let (tmp, _) = generate_sample();
        let html =
            fs::read_to_string(tmp.path().join("dist/release-03_turing_machine.html")).unwrap();
        assert!(html.contains("<title>Turing Machine - Workshop Computer</title>"));
        assert!(html.contains(r#"href="../releases/03_turing_machine/Turing.uf2""#));
    }

    #[test]
    fn report_carries_summary_and_titles() {
        let (_tmp, report) = generate_sample();
        assert_eq!(
            report.summary,
            CatalogSummary {
                total: 4,
                with_firmware: 1,
                with_documentation: 1,
            }
        );
        assert_eq!(report.pages[0].title, "Turing Machine");
        assert_eq!(report.pages[0].file, "release-03_turing_machine.html");
    }

    #[test]
    fn missing_data_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = generate(
            &tmp.path().join("absent.json"),
            &tmp.path().join("dist"),
            &SiteConfig::default(),
        );
        assert!(matches!(result, Err(GenerateError::Source(SourceError::Io { .. }))));
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn generating_into_the_data_directory_keeps_the_data() {
        let tmp = TempDir::new().unwrap();
        let data = write_data(tmp.path(), &sample_raw_releases());
        let before = fs::read(&data).unwrap();

        let site = tmp.path().join("website");
        let report = generate(&data, &site, &SiteConfig::default()).unwrap();

        assert_eq!(fs::read(&data).unwrap(), before);
        assert_eq!(report.pages.len(), 4);
        assert!(site.join("index.html").exists());
    }

    #[test]
    fn path_like_ids_are_rejected() {
        for id in ["../escape", "a\\b", "", ".."] {
            let tmp = TempDir::new().unwrap();
            let data = write_data(tmp.path(), &[raw(id, 1, "WIP", "C")]);
            let result = generate(&data, &tmp.path().join("dist"), &SiteConfig::default());
            assert!(matches!(result, Err(GenerateError::InvalidId(_))), "{id:?}");
        }
    }

    #[test]
    fn ids_that_break_links_are_rejected() {
        for id in ["01 two words", "a#b", "what?", "100%", "tab\tid"] {
            let tmp = TempDir::new().unwrap();
            let data = write_data(tmp.path(), &[raw(id, 1, "WIP", "C")]);
            let result = generate(&data, &tmp.path().join("dist"), &SiteConfig::default());
            assert!(matches!(result, Err(GenerateError::InvalidId(_))), "{id:?}");
        }
    }
}
