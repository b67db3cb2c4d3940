//! Firmware download selection.
//!
//! A release with one firmware file downloads it directly. A release with
//! several asks the user to pick one by its 1-based position first. Rather
//! than blocking on a prompt, the choice is an explicit state:
//!
//! ```text
//! begin(release) ──► Direct(link)
//!                └─► Choose(choice) ──resolve(input)──► Some(link)
//!                                                  ├──► None        (cancelled)
//!                                                  └──► Err(Invalid)
//! ```
//!
//! A release without firmware files never reaches either state;
//! [`DownloadSelection::begin`] reports [`SelectionError::NoFiles`].

use crate::release::{Release, file_name};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No firmware files available for this release.")]
    NoFiles,
    #[error("Invalid selection.")]
    Invalid(String),
}

/// A resolved download target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLink {
    /// Link target: the configured prefix joined with the file path.
    pub href: String,
    /// Suggested save-as name, the last path component.
    pub file_name: String,
}

impl FileLink {
    pub fn new(prefix: &str, path: &str) -> Self {
        Self {
            href: format!("{prefix}{path}"),
            file_name: file_name(path).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadSelection {
    /// Exactly one file: download it.
    Direct(FileLink),
    /// Several files: waiting for the user's pick.
    Choose(FileChoice),
}

impl DownloadSelection {
    pub fn begin(release: &Release, files_prefix: &str) -> Result<Self, SelectionError> {
        match release.uf2_files.as_slice() {
            [] => Err(SelectionError::NoFiles),
            [only] => Ok(DownloadSelection::Direct(FileLink::new(files_prefix, only))),
            files => Ok(DownloadSelection::Choose(FileChoice {
                options: files
                    .iter()
                    .map(|path| FileLink::new(files_prefix, path))
                    .collect(),
            })),
        }
    }
}

/// Pending multi-file choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChoice {
    options: Vec<FileLink>,
}

impl FileChoice {
    pub fn options(&self) -> &[FileLink] {
        &self.options
    }

    /// Prompt text listing every option with its 1-based number.
    pub fn prompt(&self) -> String {
        let listing = self
            .options
            .iter()
            .enumerate()
            .map(|(i, link)| format!("{}. {}", i + 1, link.file_name))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Multiple firmware files available:\n{listing}\n\nEnter the number of the file you want to download (1-{}):",
            self.options.len()
        )
    }

    /// Resolve the user's answer.
    ///
    /// `None` or empty input is a cancel and yields `Ok(None)`. Otherwise,
    /// after leading whitespace and an optional `+`, the leading digits are
    /// read as a 1-based index (`"2"`, `" 2 "`, `"+2"` and `"2nd"` all pick
    /// the second file). Whitespace-only input, a negative number, anything
    /// out of range or without leading digits is [`SelectionError::Invalid`].
    pub fn resolve(&self, input: Option<&str>) -> Result<Option<FileLink>, SelectionError> {
        let Some(raw) = input.filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let unsigned = raw.trim_start();
        let unsigned = unsigned.strip_prefix('+').unwrap_or(unsigned);
        let digits: String = unsigned
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let picked = digits
            .parse::<usize>()
            .ok()
            .filter(|&n| n >= 1)
            .and_then(|n| self.options.get(n - 1))
            .ok_or_else(|| SelectionError::Invalid(raw.to_string()))?;
        Ok(Some(picked.clone()))
    }
}
