//! Shared test utilities for the workshop-catalog test suite.
//!
//! Provides record builders, a small sample catalog, and a fixture tree of
//! release directories for scanner tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let catalog = sample_catalog();
//! let tmp = setup_fixtures();
//! let result = scan(&tmp.path().join("releases")).unwrap();
//! let release = find_release(&result.releases, "13_noisebox");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::ReleaseCatalog;
use crate::release::{RawRelease, Release, ReleaseNumber};

// =========================================================================
// Record builders
// =========================================================================

/// A minimal raw record with the fields filtering cares about.
pub fn raw(id: &str, number: u64, status: &str, language: &str) -> RawRelease {
    RawRelease {
        id: id.to_string(),
        number: Some(ReleaseNumber::Numeric(number)),
        status: Some(status.to_string()),
        language: Some(language.to_string()),
        ..Default::default()
    }
}

/// A loaded release whose only interesting part is its firmware list.
pub fn release_with_firmware(id: &str, files: &[&str]) -> Release {
    Release::from(RawRelease {
        id: id.to_string(),
        number: Some(ReleaseNumber::Numeric(1)),
        uf2_files: files.iter().map(|f| f.to_string()).collect(),
        has_firmware: Some(true),
        ..Default::default()
    })
}

/// Four releases covering every filter case used in tests.
pub fn sample_raw_releases() -> Vec<RawRelease> {
    let mut turing = raw("03_turing_machine", 3, "Released", "C");
    turing.title = Some("Turing Machine".to_string());
    turing.uf2_files = vec!["releases/03_turing_machine/Turing.uf2".to_string()];

    let mut chord = raw("05_chord_blimey", 5, "Beta (working prototype)", "C++");
    chord.title = Some("Chord Blimey".to_string());

    let mut noisebox = raw("13_noisebox", 13, "WIP", "Rust");
    noisebox.title = Some("Noisebox".to_string());
    noisebox.pdf_files = vec!["releases/13_noisebox/manual.pdf".to_string()];

    let mut twists = raw("10_twists", 10, "Proof of concept", "C");
    twists.title = Some("Twists".to_string());

    vec![turing, chord, twists, noisebox]
}

pub fn sample_catalog() -> ReleaseCatalog {
    ReleaseCatalog::new(sample_raw_releases())
}

/// Find a raw record by id. Panics if not found.
pub fn find_release<'a>(releases: &'a [RawRelease], id: &str) -> &'a RawRelease {
    releases.iter().find(|r| r.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = releases.iter().map(|r| r.id.as_str()).collect();
        panic!("release '{id}' not found. Available: {ids:?}")
    })
}

/// All ids in order.
pub fn release_ids(releases: &[RawRelease]) -> Vec<&str> {
    releases.iter().map(|r| r.id.as_str()).collect()
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/repo/` to a temp directory and return it.
///
/// The copy contains a `releases/` directory laid out like the real
/// repository, so scanned paths come out relative to the temp root.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/repo");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}
