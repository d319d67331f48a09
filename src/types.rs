//! Shared types describing what a build produced.
//!
//! The pipeline fills a [`BuildReport`]; the [`output`](crate::output) module
//! formats it, and `--json` prints it as a JSON document. Both the `build` and `check` commands produce the same report,
//! so a dry run shows exactly what a real build would write.

use crate::locale::Locale;
use serde::Serialize;

/// How a page was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// Authored HTML rendered for its own locale.
    Html,
    /// Authored HTML rendered once per declared locale variant.
    FanOut,
    /// Markdown wrapped in the named shell.
    Markdown { shell: &'static str },
}

/// One output file written for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetEntry {
    pub path: String,
    pub locale: Locale,
}

/// A source document and every target rendered from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub source: String,
    pub kind: PageKind,
    pub targets: Vec<TargetEntry>,
}

/// Everything a build produced, in source walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub pages: Vec<PageEntry>,
    /// Source-relative paths of files copied verbatim.
    pub assets: Vec<String>,
    /// Source-relative paths skipped because a fan-out entry renders them.
    pub skipped: Vec<String>,
}

impl BuildReport {
    /// Total number of rendered documents.
    pub fn target_count(&self) -> usize {
        self.pages.iter().map(|p| p.targets.len()).sum()
    }

    /// Every rendered target path, in write order.
    pub fn target_paths(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.targets.iter().map(|t| t.path.as_str()))
    }
}
