//! Build configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! describe the standard project layout, so a project that follows it needs
//! no config file at all.
//!
//! ## Project Layout
//!
//! ```text
//! project/
//! ├── config.toml               # Optional overrides
//! ├── version.json              # { "version": "1.4.0" }
//! ├── partials/
//! │   ├── header.html
//! │   └── footer.html
//! ├── internal/i18n/modules/    # Translation modules (*.json)
//! └── site/                     # Source tree
//!     ├── index.html
//!     ├── docs/quickstart.md
//!     └── fr/...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [paths]
//! source = "site"
//! dist = "dist"
//! partials = "partials"
//! locales = "internal/i18n/modules"
//! version_file = "version.json"
//!
//! [site]
//! name = "AKIOS"                 # Brand shown in article titles
//! base_url = "https://akios.ai/" # Canonical URL of the default locale
//!
//! [fan_out]
//! "index.html" = ["index.html", "fr/index.html"]
//! ```
//!
//! Config files are sparse: override just the values you want. The
//! `[fan_out]` table is the exception; when present it replaces the stock
//! table as a whole so entries can be removed.
//!
//! Unknown keys are rejected to catch typos early.

use crate::fanout::FanOutTable;
use crate::locale::Locale;
use crate::paths::{HTML_EXT, SourceKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the optional project config.
pub const CONFIG_FILENAME: &str = "config.toml";

const FAN_OUT_KEY: &str = "fan_out";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Input and output locations, relative to the project root.
    pub paths: PathsConfig,
    /// Site identity used in rendered pages.
    pub site: SiteInfo,
    /// Canonical page → ordered variant paths rendered from it.
    pub fan_out: BTreeMap<String, Vec<String>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            site: SiteInfo::default(),
            fan_out: FanOutTable::site_default()
                .entries()
                .map(|(canonical, variants)| (canonical.to_string(), variants.to_vec()))
                .collect(),
        }
    }
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Source tree walked by the build.
    pub source: PathBuf,
    /// Destination root. Cleared at the start of every build.
    pub dist: PathBuf,
    /// Directory holding `header.html` and `footer.html`.
    pub partials: PathBuf,
    /// Directory of translation modules.
    pub locales: PathBuf,
    /// JSON file carrying the build version.
    pub version_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("site"),
            dist: PathBuf::from("dist"),
            partials: PathBuf::from("partials"),
            locales: PathBuf::from("internal/i18n/modules"),
            version_file: PathBuf::from("version.json"),
        }
    }
}

impl PathsConfig {
    /// Resolve every relative path against the project root.
    pub fn resolved(&self, root: &Path) -> PathsConfig {
        PathsConfig {
            source: root.join(&self.source),
            dist: root.join(&self.dist),
            partials: root.join(&self.partials),
            locales: root.join(&self.locales),
            version_file: root.join(&self.version_file),
        }
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Brand name used in article page titles.
    pub name: String,
    /// Absolute URL of the default-locale home page, with trailing slash.
    pub base_url: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "AKIOS".to_string(),
            base_url: "https://akios.ai/".to_string(),
        }
    }
}

impl SiteInfo {
    /// Canonical URL for a locale: the base URL, under the locale directory
    /// for secondary locales.
    pub fn canonical_url(&self, locale: Locale) -> String {
        match locale.dir() {
            Some(dir) => format!("{}{dir}/", self.base_url),
            None => self.base_url.clone(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.site.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site.base_url must be an absolute http(s) URL, got {url:?}"
            )));
        }
        if !url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_url must end with '/', got {url:?}"
            )));
        }
        self.validate_fan_out()
    }

    /// Every fan-out entry lists its canonical first, only names HTML
    /// documents, and no variant is claimed twice.
    fn validate_fan_out(&self) -> Result<(), ConfigError> {
        let mut claimed = BTreeSet::new();
        for (canonical, variants) in &self.fan_out {
            if variants.first() != Some(canonical) {
                return Err(ConfigError::Validation(format!(
                    "fan_out.{canonical:?} must list the canonical path first"
                )));
            }
            for variant in variants {
                if SourceKind::of_path(variant) != SourceKind::Html {
                    return Err(ConfigError::Validation(format!(
                        "fan_out.{canonical:?}: variant {variant:?} is not a .{HTML_EXT} document"
                    )));
                }
                if !claimed.insert(variant.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "fan_out: output {variant:?} is declared more than once"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The fan-out table declared by this config.
    pub fn fan_out_table(&self) -> FanOutTable {
        FanOutTable::new(self.fan_out.clone())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => {
            let mut base = base;
            if let (toml::Value::Table(base_table), Some(_)) = (&mut base, ov.get(FAN_OUT_KEY)) {
                base_table.remove(FAN_OUT_KEY);
            }
            merge_toml(base, ov)
        }
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, merged on top of stock defaults.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Build Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Paths (relative to the project root)
# ---------------------------------------------------------------------------
[paths]
# Source tree. Files under fr/ are French; everything else is English.
source = "site"

# Destination root. Removed and recreated on every build.
dist = "dist"

# Must contain header.html and footer.html.
partials = "partials"

# Translation modules (*.json), merged in file-name order.
locales = "internal/i18n/modules"

# JSON file with a required "version" field, substituted for {{version}}.
version_file = "version.json"

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Brand name used in blog and case-study page titles.
name = "AKIOS"

# Canonical URL of the English home page. French pages use <base_url>fr/.
base_url = "https://akios.ai/"

# ---------------------------------------------------------------------------
# Multi-locale pages
# ---------------------------------------------------------------------------
# Pages rendered in both locales from one English source. The first entry
# must be the canonical path itself. Source files at the other paths are
# ignored. When present, this table replaces the defaults entirely.
[fan_out]
"index.html" = ["index.html", "fr/index.html"]
"community.html" = ["community.html", "fr/community.html"]
"legal.html" = ["legal.html", "fr/legal.html"]
"terms.html" = ["terms.html", "fr/terms.html"]
"privacy.html" = ["privacy.html", "fr/privacy.html"]
"cookies.html" = ["cookies.html", "fr/cookies.html"]
"disclosure.html" = ["disclosure.html", "fr/disclosure.html"]
"blog/index.html" = ["blog/index.html", "fr/blog/index.html"]
"##
}
