//! # Workshop Catalog
//!
//! Builds a browsable catalog of Workshop Computer program-card releases.
//! The repository is the data source: every directory under `releases/` is a
//! release, its name carries the number and title, and its files are the
//! firmware and documentation offered for download.
//!
//! # Architecture: Scan, Then Render
//!
//! ```text
//! 1. Scan      releases/       →  releases.json   (filesystem → release list)
//! 2. Generate  releases.json   →  dist/           (catalog + detail pages)
//! ```
//!
//! The JSON file is the contract between the two stages. It can be inspected,
//! edited by hand, or produced elsewhere; rendering only ever reads it.
//!
//! Rendering is split into a pure state layer and pure views:
//!
//! ```text
//! ReleaseSource ─fetch─► ReleaseCatalog ─filtered view─► PageRenderer ─► Markup
//!                        (full set + filters)            (cards, detail, glyphs)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks `releases/`, reads `info.yaml`/`README.md`, finds `.uf2`/`.pdf` files |
//! | [`naming`] | `NN_Some_Title` directory name parser |
//! | [`release`] | Wire record (`RawRelease`) and normalized `Release` |
//! | [`status`] | Free-text status → display category |
//! | [`catalog`] | Full release set, filter selections and the filtered view |
//! | [`glyph`] | Seven-segment SVG digits for release numbers |
//! | [`download`] | Single/multi-file firmware download selection |
//! | [`render`] | Catalog and detail markup with maud |
//! | [`controller`] | Page controllers over an injected `ReleaseSource` |
//! | [`generate`] | Writes the static site |
//! | [`config`] | `config.toml` loading, validation, merging and CSS generation |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Filtering Is Not Classification
//!
//! The status filter is a case-insensitive substring match on the raw status
//! text, while the badge colour comes from the first category whose keyword
//! appears in it. `"Released (WIP)"` is badged *released* but also passes
//! the `wip` filter. See [`status`].
//!
//! ## Failures Render, They Don't Escape
//!
//! A page whose data cannot be loaded, or whose id is missing or unknown,
//! still renders: the content area holds a fixed message. Only the CLI's
//! `generate` treats unreadable data as fatal.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod download;
pub mod generate;
pub mod glyph;
pub mod naming;
pub mod output;
pub mod release;
pub mod render;
pub mod scan;
pub mod status;

#[cfg(test)]
pub(crate) mod test_helpers;
