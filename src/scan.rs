//! Release directory scanning.
//!
//! Walks a repository's `releases/` directory and produces the release list
//! written to `releases.json`.
//!
//! ## Directory Structure
//!
//! ```text
//! repo/
//! └── releases/
//!     ├── 03_Turing_Machine/           # Release (id = directory name)
//!     │   ├── info.yaml                # Metadata (optional)
//!     │   ├── README.md                # Long description (optional)
//!     │   ├── Rev_1_5_Code/build/
//!     │   │   └── Turing.uf2           # Firmware, found at any depth
//!     │   └── docs/
//!     │       └── Turing_Manual.pdf    # Documentation, found at any depth
//!     ├── 05_chord_blimey/
//!     │   └── ...
//!     └── .archive/                    # Hidden = skipped
//! ```
//!
//! ## Derived Fields
//!
//! - **id**: the directory name, verbatim
//! - **number / title**: parsed from the name (see [`crate::naming`])
//! - **description, language, creator, version, status**: `info.yaml` keys
//!   `Description`, `Language`, `Creator`, `Version`, `Status`
//! - **uf2_files / pdf_files**: every `.uf2` / `.pdf` below the release
//!   (hidden directories skipped), as `/`-separated paths relative to the
//!   repository root
//! - **readme**: raw `README.md` content
//!
//! ## Metadata Format
//!
//! `info.yaml` is a YAML mapping. Scalar values are kept as text: numbers
//! and booleans in their YAML spelling (`Version: 1.5` → `"1.5"`), null as
//! the empty string. Lists and nested mappings are ignored. An empty file
//! means no metadata. A file that is not valid YAML, or whose top level is
//! not a mapping, leaves the release listed with empty metadata and a scan
//! warning.
//!
//! ## Ordering
//!
//! Releases are sorted by numeric prefix; releases without one sort as 999,
//! ties keep directory-name order.

use crate::naming::parse_release_dir_name;
use crate::release::{RawRelease, ReleaseNumber};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Releases directory not found: {0}")]
    NotFound(PathBuf),
}

/// A recoverable problem with one release.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanWarning {
    pub release_id: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ScanResult {
    pub releases: Vec<RawRelease>,
    pub warnings: Vec<ScanWarning>,
}

/// Sort key for releases without a numeric prefix.
const UNNUMBERED_SORT_KEY: u64 = 999;

const INFO_FILE: &str = "info.yaml";
const README_FILE: &str = "README.md";

pub fn scan(releases_dir: &Path) -> Result<ScanResult, ScanError> {
    if !releases_dir.is_dir() {
        return Err(ScanError::NotFound(releases_dir.to_path_buf()));
    }
    let repo_root = releases_dir.parent().unwrap_or(Path::new(""));

    let mut releases = Vec::new();
    let mut warnings = Vec::new();

    for dir in collect_release_dirs(releases_dir)? {
        let id = dir_name(&dir);
        match scan_release(&dir, repo_root, &mut warnings) {
            Ok(release) => releases.push(release),
            Err(err) => warnings.push(ScanWarning {
                release_id: id,
                message: format!("skipped: {err}"),
            }),
        }
    }

    releases.sort_by_key(sort_key);

    Ok(ScanResult { releases, warnings })
}

/// Write the release list as pretty-printed JSON.
pub fn write_releases_json(path: &Path, releases: &[RawRelease]) -> Result<(), ScanError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(releases)?;
    fs::write(path, json)?;
    Ok(())
}

fn sort_key(release: &RawRelease) -> u64 {
    release
        .number
        .as_ref()
        .and_then(ReleaseNumber::value)
        .unwrap_or(UNNUMBERED_SORT_KEY)
}

/// Visible subdirectories of the releases directory, sorted by name.
fn collect_release_dirs(releases_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(releases_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !dir_name(p).starts_with('.'))
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn scan_release(
    path: &Path,
    repo_root: &Path,
    warnings: &mut Vec<ScanWarning>,
) -> Result<RawRelease, ScanError> {
    let id = dir_name(path);
    let parsed = parse_release_dir_name(&id);

    let mut warn = |message: String| {
        warnings.push(ScanWarning {
            release_id: id.clone(),
            message,
        })
    };

    let info_path = path.join(INFO_FILE);
    let mut info = InfoFields::new();
    if info_path.is_file() {
        match fs::read_to_string(&info_path) {
            Ok(content) => match parse_info(&content) {
                Ok(fields) => info = fields,
                Err(err) => warn(format!("could not parse {INFO_FILE}: {err}")),
            },
            Err(err) => warn(format!("could not read {INFO_FILE}: {err}")),
        }
    }

    let readme_path = path.join(README_FILE);
    let readme = if readme_path.is_file() {
        match fs::read_to_string(&readme_path) {
            Ok(content) => Some(content),
            Err(err) => {
                warn(format!("could not read {README_FILE}: {err}"));
                None
            }
        }
    } else {
        None
    };

    let pdf_files = find_files(path, "pdf", repo_root)?;
    let uf2_files = find_files(path, "uf2", repo_root)?;
    let field = |key: &str| info.get(key).cloned().unwrap_or_default();

    Ok(RawRelease {
        id: id.clone(),
        number: Some(match parsed.numeric() {
            Some(n) => ReleaseNumber::Numeric(n),
            None => ReleaseNumber::Text(parsed.number),
        }),
        title: Some(parsed.title),
        description: Some(field("Description")),
        language: Some(field("Language")),
        creator: Some(field("Creator")),
        version: Some(field("Version")),
        status: Some(field("Status")),
        has_documentation: Some(!pdf_files.is_empty()),
        has_firmware: Some(!uf2_files.is_empty()),
        pdf_files,
        uf2_files,
        readme: Some(readme.unwrap_or_default()),
        readme_html: None,
    })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Files below `dir` with the given extension (case-insensitive), as
/// `/`-separated paths relative to `root`, in walk order.
fn find_files(dir: &Path, extension: &str, root: &Path) -> Result<Vec<String>, ScanError> {
    let mut found = Vec::new();
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        let matches = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches {
            found.push(web_path(entry.path(), root));
        }
    }
    Ok(found)
}

fn web_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `info.yaml` scalar fields by key.
pub type InfoFields = BTreeMap<String, String>;

/// Parse `info.yaml` content. See the module docs for how values are kept.
pub fn parse_info(content: &str) -> Result<InfoFields, String> {
    let no_document = content
        .lines()
        .all(|line| matches!(line.trim_start().chars().next(), None | Some('#')));
    if no_document {
        return Ok(InfoFields::new());
    }
    let document: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let mapping = match document {
        Value::Null => return Ok(InfoFields::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err("top level is not a mapping".to_string()),
    };

    let mut fields = InfoFields::new();
    for (key, value) in &mapping {
        if let (Some(key), Some(value)) = (scalar_text(key), scalar_text(value)) {
            fields.insert(key, value);
        }
    }
    Ok(fields)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
