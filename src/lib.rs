//! # Sitepress
//!
//! A build pipeline for a bilingual (English / French) static marketing and
//! documentation site. Authored HTML pages and markdown documents become
//! fully rendered pages: shared partials are inserted, translation tokens are
//! resolved, relative links are rewritten for the page's depth, and every
//! document is emitted at both its exact path and a "pretty" directory path.
//!
//! # Architecture: Load, Then Walk
//!
//! ```text
//! 1. Load   version.json, i18n modules, partials  →  BuildInputs
//! 2. Clean  dist/ removed and recreated
//! 3. Walk   site/  →  dist/   (one render per output target)
//! ```
//!
//! Everything a render needs is loaded before the destination is touched, so
//! a missing partial or malformed translation module aborts the build with
//! the previous output still intact.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Build driver: loads inputs, walks the source tree, writes targets |
//! | [`compose`] | Template compositor: partials, root prefix, version, i18n tokens |
//! | [`shell`] | Maud page shells wrapping converted markdown (docs, product, article) |
//! | [`markdown`] | Front-matter stripping and markdown → HTML |
//! | [`paths`] | Exact/pretty target expansion and depth-derived root prefix |
//! | [`fanout`] | Canonical pages rendered once per locale variant |
//! | [`strings`] | Merged per-locale translation table |
//! | [`locale`] | The two site locales and their path conventions |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`version`] | Build version read from `version.json` |
//! | [`types`] | Build report shared by the driver and CLI output |
//! | [`output`] | CLI output formatting of build reports |
//!
//! # Design Decisions
//!
//! ## Per-Render Context
//!
//! Values that differ per output file (root prefix, locale, canonical URL,
//! the language-switch link) travel in a [`compose::RenderContext`] built
//! fresh for each target. The translation table itself is never mutated
//! during a build, so any single render can be reproduced in isolation.
//!
//! ## Maud For Shells
//!
//! Markdown shells are built with [Maud](https://maud.lambda.xyz/), the same
//! way the rest of the HTML this binary generates is built. Translation
//! tokens are emitted as literal `{{i18n.key}}` text and resolved by the
//! same pass that handles authored HTML.
//!
//! ## Two Targets Per Document
//!
//! `docs/installation.html` is also written to `docs/installation/index.html`
//! so the site serves `/docs/installation/` without server rewrites. The root
//! prefix is computed from each target's own depth, so relative links resolve
//! from both locations.

pub mod compose;
pub mod config;
pub mod fanout;
pub mod locale;
pub mod markdown;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod shell;
pub mod strings;
pub mod types;
pub mod version;

#[cfg(test)]
pub(crate) mod test_helpers;
