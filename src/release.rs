//! Release records.
//!
//! Two shapes exist. [`RawRelease`] is the wire format of `releases.json`:
//! every field optional, exactly what the scanner writes and what a
//! hand-edited file may contain. [`Release`] is the typed record the rest of
//! the crate works with. The conversion happens once, at load time, and
//! applies all defaulting rules:
//!
//! - empty strings become `None`
//! - a numeric-string `number` becomes [`ReleaseNumber::Numeric`]
//! - missing `has_firmware` / `has_documentation` flags are derived from the
//!   file lists
//! - a legacy markdown `readme` is rendered to HTML when no `readme_html`
//!   is present

use crate::status::{StatusCategory, normalize_status};
use pulldown_cmark::{Parser, html as md_html};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A release's sequence number as it appears in `releases.json`.
///
/// The scanner writes the directory prefix (`"05"`), older files carry plain
/// integers, and a hand-written entry may hold anything. Non-numeric text is
/// kept verbatim and still rendered character by character. Any other JSON
/// value (a float, an integer too wide for `u64`, an object) lands in
/// `Other` so one odd record cannot fail the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReleaseNumber {
    Numeric(u64),
    Text(String),
    Other(serde_json::Value),
}

impl ReleaseNumber {
    /// Parse a prefix, preferring the numeric form.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<u64>() {
            Ok(n) => ReleaseNumber::Numeric(n),
            Err(_) => ReleaseNumber::Text(text.to_string()),
        }
    }

    /// Numeric value, if any.
    pub fn value(&self) -> Option<u64> {
        match self {
            ReleaseNumber::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    /// Display string for glyph rendering, left-padded with zeros to at
    /// least two characters.
    pub fn padded(&self) -> String {
        format!("{:0>2}", self.to_string())
    }

    fn normalize(self) -> Self {
        match self {
            ReleaseNumber::Text(text) => ReleaseNumber::parse(&text),
            ReleaseNumber::Other(value) => ReleaseNumber::Text(value.to_string()),
            numeric => numeric,
        }
    }
}

impl Default for ReleaseNumber {
    fn default() -> Self {
        ReleaseNumber::Text(String::new())
    }
}

impl fmt::Display for ReleaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseNumber::Numeric(n) => write!(f, "{n}"),
            ReleaseNumber::Text(t) => f.write_str(t),
            ReleaseNumber::Other(value) => write!(f, "{value}"),
        }
    }
}

/// One entry of `releases.json`, exactly as serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRelease {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<ReleaseNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub pdf_files: Vec<String>,
    pub uf2_files: Vec<String>,
    /// Raw README markdown (older data files).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
    /// Pre-rendered README HTML. Inserted into the detail page unescaped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_documentation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_firmware: Option<bool>,
}

/// A release with defaulting applied. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub id: String,
    pub number: ReleaseNumber,
    pub title: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub language: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    pub has_firmware: bool,
    pub uf2_files: Vec<String>,
    pub has_documentation: bool,
    pub pdf_files: Vec<String>,
    pub readme_html: Option<String>,
}

impl Release {
    /// Raw status text, empty when absent.
    pub fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or_default()
    }

    /// Lowercased raw status, the form status filtering matches against.
    pub fn normalized_status(&self) -> String {
        normalize_status(self.status_text())
    }

    pub fn category(&self) -> StatusCategory {
        StatusCategory::classify(self.status_text())
    }

    /// Language, empty when absent.
    pub fn language_text(&self) -> &str {
        self.language.as_deref().unwrap_or_default()
    }
}

impl From<RawRelease> for Release {
    fn from(raw: RawRelease) -> Self {
        let has_firmware = raw.has_firmware.unwrap_or(!raw.uf2_files.is_empty());
        let has_documentation = raw
            .has_documentation
            .unwrap_or(!raw.pdf_files.is_empty());
        let readme_html = non_empty(raw.readme_html)
            .or_else(|| non_empty(raw.readme).map(|md| markdown_to_html(&md)));

        Release {
            id: raw.id,
            number: raw.number.map(ReleaseNumber::normalize).unwrap_or_default(),
            title: non_empty(raw.title),
            description: non_empty(raw.description),
            creator: non_empty(raw.creator),
            language: non_empty(raw.language),
            version: non_empty(raw.version),
            status: non_empty(raw.status),
            has_firmware,
            uf2_files: raw.uf2_files,
            has_documentation,
            pdf_files: raw.pdf_files,
            readme_html,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

/// Last component of a `/`-separated file path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
