//! CLI output formatting for build and check runs.
//!
//! # Page-First Display
//!
//! Each source document is listed once, by its positional index and source
//! path, with the way it was rendered in parentheses. Its output targets
//! follow as indented `locale → path` lines, so the report reads as an
//! inventory of pages while still showing every file that was written.
//!
//! ```text
//! 001 docs/quickstart.md (markdown, docs shell)
//!     en → docs/quickstart.html
//!     en → docs/quickstart/index.html
//! 002 index.html (fan-out)
//!     en → index.html
//!     fr → fr/index.html
//!
//! Assets
//!     assets/css/styles.css
//!
//! Skipped
//!     fr/index.html
//!
//! Rendered 2 pages to 4 targets, copied 1 asset, skipped 1 source
//! ```
//!
//! # Architecture
//!
//! [`format_build_output`] is pure and returns lines for testability;
//! [`print_build_output`] writes them to stdout.

use crate::types::{BuildReport, PageKind};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn kind_label(kind: &PageKind) -> String {
    match kind {
        PageKind::Html => "html".to_string(),
        PageKind::FanOut => "fan-out".to_string(),
        PageKind::Markdown { shell } => format!("markdown, {shell} shell"),
    }
}

/// `1 asset`, `2 assets`.
fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Format a build report as display lines.
pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            page.source,
            kind_label(&page.kind)
        ));
        for target in &page.targets {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                target.locale,
                target.path
            ));
        }
    }

    if !report.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &report.assets {
            lines.push(format!("{}{}", indent(1), asset));
        }
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for skipped in &report.skipped {
            lines.push(format!("{}{}", indent(1), skipped));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Rendered {} to {}, copied {}, skipped {}",
        plural(report.pages.len(), "page"),
        plural(report.target_count(), "target"),
        plural(report.assets.len(), "asset"),
        plural(report.skipped.len(), "source"),
    ));

    lines
}

/// Print a build report to stdout.
pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}
