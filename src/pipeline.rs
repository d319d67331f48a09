//! The build driver.
//!
//! Walks the source tree and turns every file into its outputs:
//!
//! ```text
//! site/                              dist/
//! ├── index.html          ──fan-out→ index.html, fr/index.html
//! ├── fr/index.html       ──skipped  (rendered from index.html)
//! ├── docs/
//! │   ├── index.html      ──render─→ docs/index.html
//! │   └── quickstart.md   ──render─→ docs/quickstart.html
//! │                                  docs/quickstart/index.html
//! └── assets/css/styles.css ──copy─→ assets/css/styles.css
//! ```
//!
//! ## Stages
//!
//! 1. **Load inputs** ([`BuildInputs::load`]): version, string table and
//!    partials. Any failure aborts before the destination is touched.
//! 2. **Plan** ([`plan`]): files are visited in sorted order, classified by
//!    [`classify_source`] and mapped to their output paths. Two sources
//!    claiming one output path abort the build.
//! 3. **Clean**: the destination root is removed and recreated, so nothing
//!    from a previous build survives.
//! 4. **Render**: each document is rendered once per output target with a
//!    fresh [`RenderContext`].
//!
//! The walk is sequential. Renders share only read-only inputs; per-target
//! values travel in the context, so any single render can be reproduced in
//! isolation.

use crate::compose::{Compositor, PartialError, Partials, RenderContext};
use crate::config::{ConfigError, PathsConfig, SiteConfig, SiteInfo};
use crate::fanout::FanOutTable;
use crate::locale::Locale;
use crate::paths::{self, SourceKind};
use crate::shell::PageShell;
use crate::strings::{StringTable, StringsError};
use crate::types::{BuildReport, PageEntry, PageKind, TargetEntry};
use crate::version::{self, VersionError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Translation key carrying the path of the current page in the other locale.
pub const LANG_SWITCH_HREF_KEY: &str = "page.lang_switch_href";
/// Translation key carrying the language code of the other locale.
pub const ALTERNATE_LANG_KEY: &str = "page.alternate_lang";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read source {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Source directory not found: {0}")]
    SourceMissing(PathBuf),
    #[error("Destination {dist} overlaps source {source_dir}")]
    OverlappingDist { dist: PathBuf, source_dir: PathBuf },
    #[error("Output {target} is produced by both {first} and {second}")]
    DuplicateTarget {
        target: String,
        first: String,
        second: String,
    },
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Version error: {0}")]
    Version(#[from] VersionError),
    #[error("Translation error: {0}")]
    Strings(#[from] StringsError),
    #[error("Partial error: {0}")]
    Partial(#[from] PartialError),
}

/// Whether a run writes to the destination or only reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Write,
    DryRun,
}

/// Everything a build reads before touching the destination.
#[derive(Debug, Clone)]
pub struct BuildInputs {
    /// Paths resolved against the project root.
    pub paths: PathsConfig,
    pub site: SiteInfo,
    pub version: String,
    pub strings: StringTable,
    pub partials: Partials,
    pub fan_out: FanOutTable,
}

impl BuildInputs {
    /// Load every required input for a project rooted at `root`.
    pub fn load(config: &SiteConfig, root: &Path) -> Result<Self, BuildError> {
        let paths = config.paths.resolved(root);
        if !paths.source.is_dir() {
            return Err(BuildError::SourceMissing(paths.source));
        }
        if paths.dist.starts_with(&paths.source) || paths.source.starts_with(&paths.dist) {
            return Err(BuildError::OverlappingDist {
                dist: paths.dist,
                source_dir: paths.source,
            });
        }

        let version = version::load_version(&paths.version_file)?;
        let strings = StringTable::load(&paths.locales)?;
        let partials = Partials::load(&paths.partials)?;
        tracing::debug!(%version, source = %paths.source.display(), "Loaded build inputs");

        Ok(Self {
            site: config.site.clone(),
            fan_out: config.fan_out_table(),
            paths,
            version,
            strings,
            partials,
        })
    }

    fn compositor(&self) -> Compositor<'_> {
        Compositor::new(&self.strings, &self.partials, &self.site.name)
    }
}

/// What the driver does with one discovered source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAction<'a> {
    /// A fan-out variant; rendered from its canonical source instead.
    Skip,
    /// A canonical page rendered to each listed variant path.
    FanOut(&'a [String]),
    /// A document rendered for its own locale.
    Render,
    /// Copied byte-for-byte.
    Copy,
}

/// Decide how a source-relative path is processed.
///
/// Skip-set membership is checked first, then fan-out, then the extension.
pub fn classify_source<'a>(rel_path: &str, fan_out: &'a FanOutTable) -> SourceAction<'a> {
    let kind = SourceKind::of_path(rel_path);
    if kind == SourceKind::Html {
        if fan_out.is_skipped(rel_path) {
            return SourceAction::Skip;
        }
        if let Some(variants) = fan_out.variants_of(rel_path) {
            return SourceAction::FanOut(variants);
        }
    }
    if kind.is_document() {
        SourceAction::Render
    } else {
        SourceAction::Copy
    }
}

/// One rendered output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTarget {
    pub path: String,
    pub locale: Locale,
    pub contents: String,
}

/// Build the per-target render context.
///
/// Besides depth-derived root prefix and locale canonical URL, the context
/// carries the language-switch overlay: `alternate_target`, the same page's
/// output path in the other locale, made relative to this target.
pub fn render_context(
    target: &str,
    alternate_target: &str,
    locale: Locale,
    inputs: &BuildInputs,
) -> RenderContext {
    let root_prefix = paths::root_prefix(target);

    let mut extras = BTreeMap::new();
    extras.insert(
        LANG_SWITCH_HREF_KEY.to_string(),
        format!("{root_prefix}/{alternate_target}"),
    );
    extras.insert(
        ALTERNATE_LANG_KEY.to_string(),
        locale.other().code().to_string(),
    );

    RenderContext {
        locale,
        root_prefix,
        version: inputs.version.clone(),
        canonical_url: inputs.site.canonical_url(locale),
        extras,
    }
}

/// The output path of `variant` in the other locale.
///
/// A declared variant in that locale wins (`pricing.html` ↔
/// `fr/tarifs.html`); otherwise the path is mirrored into the other locale's
/// directory.
fn alternate_variant(variant: &str, locale: Locale, variants: &[String]) -> String {
    let other = locale.other();
    variants
        .iter()
        .find(|v| Locale::of_path(v) == other)
        .cloned()
        .unwrap_or_else(|| other.localize_path(Locale::strip_dir(variant)))
}

/// Render one document source to every target of every variant.
///
/// `variants` are output-relative paths; each variant's locale comes from
/// its own path and each is expanded to its exact and pretty targets. The
/// language-switch link of a pretty target points at the alternate's pretty
/// target when it has one.
pub fn render_variants(
    source_rel: &str,
    body: &str,
    variants: &[String],
    inputs: &BuildInputs,
) -> Vec<RenderedTarget> {
    let compositor = inputs.compositor();
    let mut rendered = Vec::new();
    for variant in variants {
        let locale = Locale::of_path(variant);
        let alternates = paths::expand(&alternate_variant(variant, locale, variants));
        for (i, target) in paths::expand(variant).into_iter().enumerate() {
            let alternate = alternates.get(i).unwrap_or(&alternates[0]);
            let ctx = render_context(&target, alternate, locale, inputs);
            let contents = compositor.render(source_rel, body, &ctx);
            rendered.push(RenderedTarget {
                path: target,
                locale,
                contents,
            });
        }
    }
    rendered
}

/// One discovered source file and the output paths it will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSource<'a> {
    pub rel: String,
    pub action: SourceAction<'a>,
    /// Output-relative document paths before pretty expansion. For assets,
    /// the copied path.
    pub variants: Vec<String>,
}

impl PlannedSource<'_> {
    /// Every concrete output path this source writes.
    pub fn targets(&self) -> Vec<String> {
        match self.action {
            SourceAction::Skip => Vec::new(),
            SourceAction::Copy => self.variants.clone(),
            SourceAction::FanOut(_) | SourceAction::Render => {
                self.variants.iter().flat_map(|v| paths::expand(v)).collect()
            }
        }
    }
}

/// Walk the source tree and classify every file, without rendering.
///
/// Fails if two sources would write the same output path, so a build never
/// overwrites one page with another.
pub fn plan(inputs: &BuildInputs) -> Result<Vec<PlannedSource<'_>>, BuildError> {
    let mut planned = Vec::new();
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();
    for rel in discover(&inputs.paths.source)? {
        let action = classify_source(&rel, &inputs.fan_out);
        let variants = match action {
            SourceAction::Skip => Vec::new(),
            SourceAction::FanOut(variants) => variants.to_vec(),
            SourceAction::Render => vec![paths::output_rel_path(&rel)],
            SourceAction::Copy => vec![rel.clone()],
        };
        let source = PlannedSource {
            rel,
            action,
            variants,
        };
        for target in source.targets() {
            if let Some(first) = claimed.get(&target) {
                return Err(BuildError::DuplicateTarget {
                    target,
                    first: first.clone(),
                    second: source.rel,
                });
            }
            claimed.insert(target, source.rel.clone());
        }
        planned.push(source);
    }
    Ok(planned)
}

/// Run a full build: clean the destination, then process every source file.
pub fn build(inputs: &BuildInputs) -> Result<BuildReport, BuildError> {
    run(inputs, Emit::Write)
}

/// Process every source file without touching the destination.
pub fn check(inputs: &BuildInputs) -> Result<BuildReport, BuildError> {
    run(inputs, Emit::DryRun)
}

fn run(inputs: &BuildInputs, emit: Emit) -> Result<BuildReport, BuildError> {
    let planned = plan(inputs)?;
    if emit == Emit::Write {
        clean_dist(&inputs.paths.dist)?;
    }

    let mut report = BuildReport::default();
    for PlannedSource {
        rel,
        action,
        variants,
    } in planned
    {
        let source_path = inputs.paths.source.join(&rel);
        match action {
            SourceAction::Skip => {
                tracing::debug!(source = %rel, "Skipping fan-out variant");
                report.skipped.push(rel);
            }
            SourceAction::Copy => {
                if emit == Emit::Write {
                    copy_asset(&source_path, &inputs.paths.dist.join(&rel))?;
                }
                report.assets.push(rel);
            }
            SourceAction::FanOut(_) | SourceAction::Render => {
                let body = read_source(&source_path)?;
                let rendered = render_variants(&rel, &body, &variants, inputs);
                let kind = match (action, SourceKind::of_path(&rel)) {
                    (SourceAction::FanOut(_), _) => PageKind::FanOut,
                    (_, SourceKind::Markdown) => PageKind::Markdown {
                        shell: PageShell::classify(&rel).name(),
                    },
                    _ => PageKind::Html,
                };
                report
                    .pages
                    .push(emit_page(inputs, emit, &rel, kind, rendered)?);
            }
        }
    }
    Ok(report)
}

fn emit_page(
    inputs: &BuildInputs,
    emit: Emit,
    source: &str,
    kind: PageKind,
    rendered: Vec<RenderedTarget>,
) -> Result<PageEntry, BuildError> {
    let mut targets = Vec::with_capacity(rendered.len());
    for target in rendered {
        if emit == Emit::Write {
            write_output(&inputs.paths.dist.join(&target.path), &target.contents)?;
            tracing::debug!(locale = %target.locale, target = %target.path, "Wrote page");
        }
        targets.push(TargetEntry {
            path: target.path,
            locale: target.locale,
        });
    }
    Ok(PageEntry {
        source: source.to_string(),
        kind,
        targets,
    })
}

/// All files under `root` as sorted, `/`-separated relative paths.
///
/// Symlinks are followed; a link to a file is reported at the link's path.
pub fn discover(root: &Path) -> Result<Vec<String>, BuildError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .map(paths::to_rel_string)
            .unwrap_or_default();
        if !rel.is_empty() {
            files.push(rel);
        }
    }
    Ok(files)
}

/// Remove the destination root and recreate it empty.
pub fn clean_dist(dist: &Path) -> Result<(), BuildError> {
    if dist.exists() {
        tracing::debug!(dist = %dist.display(), "Removing previous build output");
        fs::remove_dir_all(dist)?;
    }
    fs::create_dir_all(dist)?;
    Ok(())
}

fn read_source(path: &Path) -> Result<String, BuildError> {
    fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a file, creating any missing parent directories.
pub fn write_output(path: &Path, contents: &str) -> Result<(), BuildError> {
    let write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

fn copy_asset(src: &Path, dst: &Path) -> Result<(), BuildError> {
    let write_err = |source| BuildError::Write {
        path: dst.to_path_buf(),
        source,
    };
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::copy(src, dst).map_err(write_err)?;
    Ok(())
}
