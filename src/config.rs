//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the site directory next to `releases.json`; when it is absent the stock
//! defaults are used unchanged.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Workshop Computer"   # Page titles and header
//! files_prefix = "../"          # Prepended to firmware/document paths
//!
//! [glyph]
//! on_color = "#a18922ff"        # Lit segments
//! off_color = "#a18a2234"       # Dimmed segments
//!
//! [colors.light]
//! background = "#f7f4ec"
//! text = "#1d1b16"
//! text_muted = "#6b665a"
//! border = "#ddd6c4"
//! link = "#7a6512"
//! link_hover = "#4e400a"
//!
//! [colors.dark]
//! background = "#14130f"
//! text = "#ece7da"
//! text_muted = "#9d978a"
//! border = "#38352c"
//! link = "#d2b548"
//! link_hover = "#f0d76a"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want:
//!
//! ```toml
//! [site]
//! title = "My Card Collection"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::glyph::{DEFAULT_OFF_COLOR, DEFAULT_ON_COLOR};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and file linking.
    pub site: SiteSection,
    /// Seven-segment glyph colours.
    pub glyph: GlyphConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.site.files_prefix.contains('\\') {
            return Err(ConfigError::Validation(
                "site.files_prefix must use '/' separators".into(),
            ));
        }
        for (key, value) in [
            ("glyph.on_color", &self.glyph.on_color),
            ("glyph.off_color", &self.glyph.off_color),
        ] {
            if !is_hex_color(value) {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a hex color (#rgb, #rrggbb or #rrggbbaa), got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Shown in the page header and appended to detail page titles.
    pub title: String,
    /// Prefix joined to every firmware/document path. Release files live
    /// one directory above the site root by default.
    pub files_prefix: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Workshop Computer".to_string(),
            files_prefix: "../".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlyphConfig {
    pub on_color: String,
    pub off_color: String,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            on_color: DEFAULT_ON_COLOR.to_string(),
            off_color: DEFAULT_OFF_COLOR.to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Metadata keys, secondary labels.
    pub text_muted: String,
    /// Card outlines.
    pub border: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f7f4ec".to_string(),
            text: "#1d1b16".to_string(),
            text_muted: "#6b665a".to_string(),
            border: "#ddd6c4".to_string(),
            link: "#7a6512".to_string(),
            link_hover: "#4e400a".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#14130f".to_string(),
            text: "#ece7da".to_string(),
            text_muted: "#9d978a".to_string(),
            border: "#38352c".to_string(),
            link: "#d2b548".to_string(),
            link_hover: "#f0d76a".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from `config.toml` in the given directory, merged over the
/// stock defaults and validated.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(dir)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// A fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Workshop Catalog Configuration
# ==============================
# Place this file next to releases.json. All settings are optional;
# values shown are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Shown in the page header and appended to detail page titles.
title = "Workshop Computer"

# Prefix for firmware (.uf2) and document (.pdf) links. Release files sit
# one directory above the generated site by default.
files_prefix = "../"

# ---------------------------------------------------------------------------
# Seven-segment release numbers
# ---------------------------------------------------------------------------
[glyph]
on_color = "#a18922ff"    # Lit segments
off_color = "#a18a2234"   # Dimmed segments

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f7f4ec"
text = "#1d1b16"
text_muted = "#6b665a"    # Metadata keys, secondary labels
border = "#ddd6c4"
link = "#7a6512"
link_hover = "#4e400a"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#14130f"
text = "#ece7da"
text_muted = "#9d978a"
border = "#38352c"
link = "#d2b548"
link_hover = "#f0d76a"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| {
        [
            ("--color-bg", &scheme.background),
            ("--color-text", &scheme.text),
            ("--color-text-muted", &scheme.text_muted),
            ("--color-border", &scheme.border),
            ("--color-link", &scheme.link),
            ("--color-link-hover", &scheme.link_hover),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    };
    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}
