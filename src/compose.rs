//! Template composition: turns one source body into one output document.
//!
//! ## Tokens
//!
//! | Token | Replacement |
//! |-------|-------------|
//! | `<html lang="…">` | target locale (authored HTML only) |
//! | `<!-- {{header}} -->` | localized header partial (authored HTML only) |
//! | `<!-- {{footer}} -->` | localized footer partial (authored HTML only) |
//! | `{{root}}` | relative path back to the destination root |
//! | `{{version}}` | build version |
//! | `{{canonical}}` | absolute canonical URL of the locale |
//! | `{{i18n.dotted.key}}` | localized string |
//!
//! Substitution runs in that order and each step runs once over the whole
//! document, partials included. The `{{i18n.*}}` pass runs last and does not
//! rescan its own output, so a translated value is inserted verbatim even
//! when it contains token syntax.
//!
//! Markdown sources are first wrapped in a [`PageShell`]; the shell carries
//! the same tokens, so both kinds finish through one shared pass.

use crate::locale::Locale;
use crate::markdown::{self, FrontMatter};
use crate::paths::SourceKind;
use crate::shell::{PageShell, ShellParts};
use crate::strings::StringTable;
use regex::{Captures, NoExpand, Regex};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

pub const HEADER_MARKER: &str = "<!-- {{header}} -->";
pub const FOOTER_MARKER: &str = "<!-- {{footer}} -->";
pub const ROOT_TOKEN: &str = "{{root}}";
pub const VERSION_TOKEN: &str = "{{version}}";
pub const CANONICAL_TOKEN: &str = "{{canonical}}";

static I18N_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{i18n\.([A-Za-z0-9_.]+)\}\}").expect("i18n token pattern must compile")
});

static HTML_LANG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<html lang="[^"]+">"#).expect("html lang pattern must compile")
});

#[derive(Error, Debug)]
pub enum PartialError {
    #[error("Required partial not found: {0}")]
    Missing(PathBuf),
    #[error("IO error reading partial {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Header and footer templates shared by every page.
///
/// Loaded once per build and never modified; their tokens are resolved
/// together with the page's.
#[derive(Debug, Clone)]
pub struct Partials {
    pub header: String,
    pub footer: String,
}

impl Partials {
    /// Load `header.html` and `footer.html` from `dir`. Both are required.
    pub fn load(dir: &Path) -> Result<Self, PartialError> {
        Ok(Self {
            header: read_partial(&dir.join("header.html"))?,
            footer: read_partial(&dir.join("footer.html"))?,
        })
    }
}

fn read_partial(path: &Path) -> Result<String, PartialError> {
    if !path.is_file() {
        return Err(PartialError::Missing(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| PartialError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Values that vary per output target, computed immediately before a render.
///
/// `extras` overlays the string table for this render only: a key present
/// here wins over the shared table. The driver uses it for page-specific
/// strings such as the language-switch link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub locale: Locale,
    pub root_prefix: String,
    pub version: String,
    pub canonical_url: String,
    pub extras: BTreeMap<String, String>,
}

/// Renders source bodies against the shared, read-only build inputs.
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'a> {
    strings: &'a StringTable,
    partials: &'a Partials,
    site_name: &'a str,
}

impl<'a> Compositor<'a> {
    pub fn new(strings: &'a StringTable, partials: &'a Partials, site_name: &'a str) -> Self {
        Self {
            strings,
            partials,
            site_name,
        }
    }

    /// Render a document source for one output target.
    ///
    /// `source_rel` is the source-relative path; it selects the shell for
    /// markdown. Assets are not documents and come back unchanged.
    pub fn render(&self, source_rel: &str, body: &str, ctx: &RenderContext) -> String {
        match SourceKind::of_path(source_rel) {
            SourceKind::Html => self.render_html(body, ctx),
            SourceKind::Markdown => self.render_markdown(source_rel, body, ctx),
            SourceKind::Asset => body.to_string(),
        }
    }

    /// Render authored HTML: fix the language attribute, insert the
    /// partials at their markers, then resolve tokens.
    pub fn render_html(&self, body: &str, ctx: &RenderContext) -> String {
        let lang_tag = format!(r#"<html lang="{}">"#, ctx.locale.code());
        let doc = HTML_LANG.replace(body, NoExpand(&lang_tag));
        let doc = doc
            .replacen(HEADER_MARKER, &self.partials.header, 1)
            .replacen(FOOTER_MARKER, &self.partials.footer, 1);
        self.finish(&doc, ctx)
    }

    /// Render a markdown source: drop its front matter, convert it, wrap it
    /// in the shell chosen by `source_rel`, then resolve tokens.
    pub fn render_markdown(&self, source_rel: &str, body: &str, ctx: &RenderContext) -> String {
        let front_matter = markdown::strip_front_matter(body);
        if let FrontMatter::Unterminated(_) = front_matter {
            tracing::warn!(
                source = source_rel,
                "Front matter has no closing delimiter; rendering whole file as body"
            );
        }
        let body_html = markdown::markdown_to_html(front_matter.body());
        let parts = ShellParts {
            locale: ctx.locale,
            header: &self.partials.header,
            footer: &self.partials.footer,
            body: &body_html,
            site_name: self.site_name,
        };
        let doc = PageShell::classify(source_rel).render(&parts).into_string();
        self.finish(&doc, ctx)
    }

    fn finish(&self, doc: &str, ctx: &RenderContext) -> String {
        let doc = doc
            .replace(ROOT_TOKEN, &ctx.root_prefix)
            .replace(VERSION_TOKEN, &ctx.version)
            .replace(CANONICAL_TOKEN, &ctx.canonical_url);
        self.inject_i18n(&doc, ctx)
    }

    /// Replace every `{{i18n.key}}` token in a single pass.
    ///
    /// Lookups consult the render's extras first, then the string table. An
    /// unknown key is replaced by the key itself.
    pub fn inject_i18n(&self, content: &str, ctx: &RenderContext) -> String {
        I18N_TOKEN
            .replace_all(content, |caps: &Captures<'_>| {
                let key = &caps[1];
                if let Some(value) = ctx.extras.get(key) {
                    return value.clone();
                }
                self.strings.lookup(ctx.locale, key).unwrap_or_else(|| {
                    tracing::warn!(locale = %ctx.locale, key, "Unresolved translation key");
                    key.to_string()
                })
            })
            .into_owned()
    }
}
