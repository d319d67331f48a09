//! Pages rendered in every locale from one canonical source.
//!
//! Some pages (home, legal, blog index) have no separate French source: the
//! English file is rendered a second time with the French strings applied.
//! The table maps each canonical path to the ordered list of paths it is
//! rendered to:
//!
//! ```text
//! index.html       → index.html, fr/index.html
//! blog/index.html  → blog/index.html, fr/blog/index.html
//! ```
//!
//! Any on-disk file at a non-canonical variant path (`fr/index.html`) is
//! skipped by the build, otherwise two sources would write the same output.
//! The skip set is derived from this table, never declared separately.

use crate::locale::Locale;
use std::collections::{BTreeMap, BTreeSet};

/// Canonical pages rendered in both locales by default.
pub const DEFAULT_MULTI_LOCALE_PAGES: &[&str] = &[
    "index.html",
    "community.html",
    "legal.html",
    "terms.html",
    "privacy.html",
    "cookies.html",
    "disclosure.html",
    "blog/index.html",
];

/// Canonical path → variant paths, with the derived skip set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutTable {
    variants: BTreeMap<String, Vec<String>>,
    skipped: BTreeSet<String>,
}

impl FanOutTable {
    /// Build from an explicit declaration.
    ///
    /// The skip set is every declared variant other than its own canonical.
    pub fn new(variants: BTreeMap<String, Vec<String>>) -> Self {
        let skipped = variants
            .iter()
            .flat_map(|(canonical, list)| list.iter().filter(move |v| *v != canonical))
            .cloned()
            .collect();
        Self { variants, skipped }
    }

    /// Build a table where each canonical page is rendered at its own path
    /// and mirrored under every other locale's directory.
    pub fn mirrored<I, S>(canonicals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = canonicals
            .into_iter()
            .map(|c| {
                let canonical: String = c.into();
                let list: Vec<String> = Locale::ALL
                    .iter()
                    .map(|locale| locale.localize_path(&canonical))
                    .collect();
                (canonical, list)
            })
            .collect();
        Self::new(variants)
    }

    /// Variant paths to render from `rel_path`, if it is a canonical page.
    pub fn variants_of(&self, rel_path: &str) -> Option<&[String]> {
        self.variants.get(rel_path).map(Vec::as_slice)
    }

    /// Whether an on-disk source is a fan-out target and must not be built
    /// on its own.
    pub fn is_skipped(&self, rel_path: &str) -> bool {
        self.skipped.contains(rel_path)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.skipped.iter().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.variants
            .iter()
            .map(|(canonical, list)| (canonical.as_str(), list.as_slice()))
    }

    /// The site's stock table.
    pub fn site_default() -> Self {
        Self::mirrored(DEFAULT_MULTI_LOCALE_PAGES.iter().copied())
    }
}
