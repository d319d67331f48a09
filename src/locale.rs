//! The two site locales and path-based locale detection.
//!
//! The site is authored in English. French pages live under a top-level
//! `fr/` directory that mirrors the English tree:
//!
//! ```text
//! site/
//! ├── index.html          # en
//! ├── docs/quickstart.md  # en
//! └── fr/
//!     └── docs/quickstart.md  # fr
//! ```
//!
//! A page's locale is decided purely by its first path segment. Nothing in
//! the page content is consulted.

use serde::Serialize;
use std::fmt;

/// A site locale. `En` is the default; `Fr` is the secondary locale whose
/// pages live under the `fr/` directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
}

impl Locale {
    /// Every locale, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    /// The default locale: pages outside any locale directory.
    pub const DEFAULT: Locale = Locale::En;

    /// Language code, used for `<html lang>` and as the translation-module key.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Directory that roots this locale's pages, or `None` for the default.
    pub fn dir(self) -> Option<&'static str> {
        match self {
            Locale::En => None,
            Locale::Fr => Some("fr"),
        }
    }

    /// The other locale of the pair.
    pub fn other(self) -> Locale {
        match self {
            Locale::En => Locale::Fr,
            Locale::Fr => Locale::En,
        }
    }

    /// Locale of a source-relative (or output-relative) path.
    ///
    /// A path is French iff its first `/`-separated segment is exactly `fr`.
    /// `blog/fr-report.html` and `frx/a.html` stay English.
    pub fn of_path(rel_path: &str) -> Locale {
        let first = rel_path.split('/').next().unwrap_or_default();
        if Some(first) == Locale::Fr.dir() {
            Locale::Fr
        } else {
            Locale::En
        }
    }

    /// Strip this path's locale directory, yielding the locale-neutral path.
    ///
    /// `fr/docs/a.md` → `docs/a.md`; `docs/a.md` → `docs/a.md`.
    pub fn strip_dir(rel_path: &str) -> &str {
        match Locale::of_path(rel_path).dir() {
            Some(dir) => rel_path
                .strip_prefix(dir)
                .map(|rest| rest.trim_start_matches('/'))
                .unwrap_or(rel_path),
            None => rel_path,
        }
    }

    /// Re-root a locale-neutral path under this locale's directory.
    pub fn localize_path(self, neutral: &str) -> String {
        match self.dir() {
            Some(dir) => format!("{dir}/{neutral}"),
            None => neutral.to_string(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
