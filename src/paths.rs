//! Output-path expansion and root-prefix computation.
//!
//! Every HTML page is written twice: at its exact path and at a "pretty"
//! path so it is reachable without the `.html` suffix:
//!
//! ```text
//! docs/installation.html  →  docs/installation.html
//!                            docs/installation/index.html
//! docs/index.html         →  docs/index.html          (already pretty)
//! ```
//!
//! Pages reference assets through a `{{root}}` token. Because the two
//! variants sit at different depths, the replacement is computed per output
//! target from its depth alone:
//!
//! ```text
//! index.html                    →  .
//! docs/installation.html        →  ..
//! docs/installation/index.html  →  ../..
//! ```
//!
//! All paths here are `/`-separated strings relative to the source or
//! destination root, regardless of host separator.

use std::path::Path;

/// Base name of directory index documents.
pub const INDEX_STEM: &str = "index";

/// Extension of rendered documents.
pub const HTML_EXT: &str = "html";

/// Source extensions handled as markdown.
pub const MARKDOWN_EXTS: &[&str] = &["md", "mdx"];

/// How a source file is treated by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Authored HTML: tokens and partial markers are substituted in place.
    Html,
    /// Markdown or MDX: converted to HTML and wrapped in a page shell.
    Markdown,
    /// Anything else: copied verbatim.
    Asset,
}

impl SourceKind {
    /// Classify a relative path by its extension.
    pub fn of_path(rel_path: &str) -> SourceKind {
        match extension(rel_path) {
            Some(HTML_EXT) => SourceKind::Html,
            Some(ext) if MARKDOWN_EXTS.contains(&ext) => SourceKind::Markdown,
            _ => SourceKind::Asset,
        }
    }

    /// Whether this kind produces rendered documents.
    pub fn is_document(self) -> bool {
        !matches!(self, SourceKind::Asset)
    }
}

/// Convert a filesystem-relative path to a `/`-separated string.
pub fn to_rel_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a relative path into `(directory, file name)`. The directory is
/// empty for root-level files.
fn split_dir(rel_path: &str) -> (&str, &str) {
    match rel_path.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", rel_path),
    }
}

/// File extension of the final path segment, without the dot.
fn extension(rel_path: &str) -> Option<&str> {
    let (_, file) = split_dir(rel_path);
    file.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// File name of the final path segment with its extension removed.
fn stem(rel_path: &str) -> &str {
    let (_, file) = split_dir(rel_path);
    file.rsplit_once('.').map_or(file, |(stem, _)| stem)
}

/// Output path of a source document: markdown sources become `.html`.
///
/// `docs/quickstart.mdx` → `docs/quickstart.html`; HTML and asset paths are
/// returned unchanged.
pub fn output_rel_path(source_rel: &str) -> String {
    match SourceKind::of_path(source_rel) {
        SourceKind::Markdown => {
            let (dir, _) = split_dir(source_rel);
            join(dir, &format!("{}.{HTML_EXT}", stem(source_rel)))
        }
        SourceKind::Html | SourceKind::Asset => source_rel.to_string(),
    }
}

/// The pretty sibling of an HTML output path, if it has one.
///
/// Returns `None` for non-HTML paths, for documents already named
/// `index.html`, and for a bare `.html` with no stem.
pub fn pretty_path(rel_path: &str) -> Option<String> {
    if extension(rel_path) != Some(HTML_EXT) {
        return None;
    }
    let base = stem(rel_path);
    if base == INDEX_STEM || base.is_empty() {
        return None;
    }
    let (dir, _) = split_dir(rel_path);
    Some(join(&join(dir, base), &format!("{INDEX_STEM}.{HTML_EXT}")))
}

/// All concrete output paths for an output-relative path: the path itself,
/// followed by its pretty sibling when one exists.
pub fn expand(rel_path: &str) -> Vec<String> {
    let mut targets = vec![rel_path.to_string()];
    targets.extend(pretty_path(rel_path));
    targets
}

/// Relative prefix that climbs from `target`'s directory back to the
/// destination root: `.` at depth zero, otherwise `..` per level.
pub fn root_prefix(target: &str) -> String {
    let depth = target.matches('/').count();
    if depth == 0 {
        ".".to_string()
    } else {
        vec![".."; depth].join("/")
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
