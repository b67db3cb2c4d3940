//! CLI output formatting for every command.
//!
//! # Entity Display Contract
//!
//! A release is always introduced by its zero-padded number and title, with
//! details on indented context lines below it:
//!
//! ```text
//! 03 Turing Machine
//!     Status: Released
//!     Language: C++
//! ```
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Summary:
//!   03: Turing Machine                 DOCS UF2  - Released
//!   05: Chord Blimey                   ---- UF2  - Beta (working prototype)
//!
//! Warnings
//!     10_twists: could not parse info.yaml: did not find expected ',' or ']'
//!
//! Generated data for 2 releases
//! Output written to: website/releases.json
//! ```
//!
//! ## Generate
//!
//! ```text
//! Catalog → index.html
//! Turing Machine → release-03_Turing_Machine.html
//! Chord Blimey → release-05_chord_blimey.html
//!
//! Generated 2 detail pages in dist
//! ```
//!
//! ## Build summary
//!
//! ```text
//! Release Summary
//!     Releases with documentation: 1
//!     Releases with firmware: 2
//!     Total releases: 2
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::{CatalogSummary, ReleaseCatalog};
use crate::download::{FileChoice, FileLink};
use crate::generate::{GenerateReport, INDEX_FILE};
use crate::release::{RawRelease, Release, file_name};
use crate::render::message;
use crate::scan::ScanResult;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Number + title header line for a release.
fn release_header(release: &Release) -> String {
    let title = release.title.as_deref().unwrap_or_default();
    if title.is_empty() {
        format!("{} ({})", release.number.padded(), release.id)
    } else {
        format!("{} {}", release.number.padded(), title)
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Scan
// ============================================================================

/// One summary row: number, padded title, docs/firmware markers, status.
fn scan_row(release: &RawRelease) -> String {
    let number = release
        .number
        .as_ref()
        .map(|n| n.padded())
        .unwrap_or_default();
    let docs = if release.has_documentation == Some(true) {
        "DOCS"
    } else {
        "----"
    };
    let firmware = if release.has_firmware == Some(true) {
        "UF2 "
    } else {
        "----"
    };
    format!(
        "  {:>2}: {:<30} {} {} - {}",
        number,
        release.title.as_deref().unwrap_or_default(),
        docs,
        firmware,
        release.status.as_deref().unwrap_or_default()
    )
}

pub fn format_scan_output(result: &ScanResult, data_path: &Path) -> Vec<String> {
    let mut lines = vec!["Summary:".to_string()];
    lines.extend(result.releases.iter().map(scan_row));

    if !result.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &result.warnings {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                warning.release_id,
                warning.message
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated data for {} releases",
        result.releases.len()
    ));
    lines.push(format!("Output written to: {}", data_path.display()));
    lines
}

pub fn print_scan_output(result: &ScanResult, data_path: &Path) {
    print_lines(&format_scan_output(result, data_path));
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec![format!("Catalog → {}", INDEX_FILE)];
    for page in &report.pages {
        let label = if page.title.is_empty() {
            page.id.as_str()
        } else {
            page.title.as_str()
        };
        lines.push(format!("{} → {}", label, page.file));
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {} detail pages in {}",
        report.pages.len(),
        report.output_dir.display()
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    print_lines(&format_generate_output(report));
}

pub fn format_build_summary(summary: &CatalogSummary) -> Vec<String> {
    vec![
        "Release Summary".to_string(),
        format!(
            "{}Releases with documentation: {}",
            indent(1),
            summary.with_documentation
        ),
        format!("{}Releases with firmware: {}", indent(1), summary.with_firmware),
        format!("{}Total releases: {}", indent(1), summary.total),
    ]
}

pub fn print_build_summary(summary: &CatalogSummary) {
    print_lines(&format_build_summary(summary));
}

// ============================================================================
// List
// ============================================================================

/// The catalog's filtered view, one entity block per release.
pub fn format_release_list(catalog: &ReleaseCatalog) -> Vec<String> {
    let view = catalog.filtered_view();
    let mut lines = Vec::new();

    if view.is_empty() {
        lines.push(message::NO_RESULTS.to_string());
    }
    for release in &view {
        lines.push(release_header(release));
        if let Some(status) = &release.status {
            lines.push(format!("{}Status: {}", indent(1), status));
        }
        if let Some(language) = &release.language {
            lines.push(format!("{}Language: {}", indent(1), language));
        }
        for file in &release.uf2_files {
            lines.push(format!("{}Firmware: {}", indent(1), file_name(file)));
        }
        for file in &release.pdf_files {
            lines.push(format!("{}Documentation: {}", indent(1), file_name(file)));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Showing {} of {} releases",
        view.len(),
        catalog.releases().len()
    ));
    lines
}

pub fn print_release_list(catalog: &ReleaseCatalog) {
    print_lines(&format_release_list(catalog));
}

// ============================================================================
// Download
// ============================================================================

pub fn format_download_link(link: &FileLink) -> Vec<String> {
    vec![
        format!("Download: {}", link.file_name),
        format!("{}Link: {}", indent(1), link.href),
    ]
}

pub fn print_download_link(link: &FileLink) {
    print_lines(&format_download_link(link));
}

/// The numbered option list, with a hint on how to pick.
pub fn format_download_choice(choice: &FileChoice) -> Vec<String> {
    let mut lines: Vec<String> = choice.prompt().lines().map(str::to_string).collect();
    lines.push(format!(
        "{}Re-run with --pick N to choose a file.",
        indent(1)
    ));
    lines
}

pub fn print_download_choice(choice: &FileChoice) {
    print_lines(&format_download_choice(choice));
}

// ============================================================================
// Tests
// ============================================================================
