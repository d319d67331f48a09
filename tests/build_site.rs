//! End-to-end build of a small bilingual project through the public API.
//!
//! Run with: cargo test --test build_site

use sitepress::config::{self, CONFIG_FILENAME};
use sitepress::pipeline::{self, BuildInputs};
use sitepress::types::PageKind;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
[site]
base_url = "https://example.org/"

[fan_out]
"index.html" = ["index.html", "fr/index.html"]
"pricing.html" = ["pricing.html", "fr/pricing.html"]
"#;

const STRINGS: &str = r#"{
  "en": {
    "nav": { "home": "Home", "docs": "Docs", "blog": "Blog", "switch_language": "Français" },
    "hero": { "title": "Secure runtime" },
    "sidebar": { "overview": "Overview", "quickstart": "Quickstart" }
  },
  "fr": {
    "nav": { "home": "Accueil", "docs": "Documentation", "blog": "Blog", "switch_language": "English" },
    "hero": { "title": "Runtime sécurisé" },
    "sidebar": { "overview": "Vue d'ensemble", "quickstart": "Démarrage rapide" }
  }
}"#;

const HEADER: &str = r#"<header><a href="{{root}}/index.html">{{i18n.nav.home}}</a> <a href="{{i18n.page.lang_switch_href}}">{{i18n.nav.switch_language}}</a></header>"#;

const FOOTER: &str = "<footer>v{{version}}</footer>";

const HOME: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><link rel="canonical" href="{{canonical}}"><link rel="stylesheet" href="{{root}}/assets/css/styles.css?v={{version}}"></head>
<body>
<!-- {{header}} -->
<h1>{{i18n.hero.title}}</h1>
<!-- {{footer}} -->
</body>
</html>
"#;

const QUICKSTART: &str = "---\ntitle: Quickstart\n---\n\n# Quickstart\n\nSee the [overview](../docs/index.html).\n";

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, CONFIG_FILENAME, CONFIG);
    write(root, "version.json", r#"{ "version": "3.0.1" }"#);
    write(root, "partials/header.html", HEADER);
    write(root, "partials/footer.html", FOOTER);
    write(root, "internal/i18n/modules/site.json", STRINGS);
    write(root, "site/index.html", HOME);
    write(root, "site/pricing.html", HOME);
    write(root, "site/fr/pricing.html", "outdated");
    write(root, "site/docs/quickstart.md", QUICKSTART);
    write(root, "site/fr/docs/quickstart.md", "# Démarrage rapide\n");
    write(root, "site/assets/css/styles.css", "body{}");
    tmp
}

fn load(root: &Path) -> BuildInputs {
    let site_config = config::load_config(&root.join(CONFIG_FILENAME)).unwrap();
    BuildInputs::load(&site_config, root).unwrap()
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join("dist").join(rel)).unwrap()
}

#[test]
fn markdown_document_gets_exact_and_pretty_targets() {
    let tmp = project();
    pipeline::build(&load(tmp.path())).unwrap();

    let exact = read(tmp.path(), "docs/quickstart.html");
    let pretty = read(tmp.path(), "docs/quickstart/index.html");
    for page in [&exact, &pretty] {
        assert!(page.contains("docs-sidebar"));
        assert!(page.contains("<h1>Quickstart</h1>"));
        assert!(!page.contains("title: Quickstart"));
        assert!(!page.contains("{{"));
    }
    assert!(exact.contains(r#"href="../assets/css/styles.css?v=3.0.1""#));
    assert!(pretty.contains(r#"href="../../assets/css/styles.css?v=3.0.1""#));
}

#[test]
fn french_mirror_renders_in_french() {
    let tmp = project();
    pipeline::build(&load(tmp.path())).unwrap();

    let fr = read(tmp.path(), "fr/docs/quickstart.html");
    assert!(fr.contains(r#"<html lang="fr">"#));
    assert!(fr.contains("Accueil"));
    assert!(fr.contains("Démarrage rapide"));
    assert!(fr.contains(r#"href="../../docs/quickstart.html""#));
}

#[test]
fn configured_fan_out_replaces_stock_table() {
    let tmp = project();
    let report = pipeline::build(&load(tmp.path())).unwrap();

    assert_eq!(report.skipped, vec!["fr/pricing.html".to_string()]);
    let fr_pricing = read(tmp.path(), "fr/pricing.html");
    assert!(!fr_pricing.contains("outdated"));
    assert!(fr_pricing.contains("Runtime sécurisé"));
    assert!(fr_pricing.contains(r#"href="https://example.org/fr/""#));

    let home = report
        .pages
        .iter()
        .find(|p| p.source == "index.html")
        .unwrap();
    assert_eq!(home.kind, PageKind::FanOut);
    // Stock entries such as community.html are gone with the override.
    assert!(!tmp.path().join("dist/community.html").exists());
}

#[test]
fn home_page_links_resolve_from_root() {
    let tmp = project();
    pipeline::build(&load(tmp.path())).unwrap();

    let home = read(tmp.path(), "index.html");
    assert!(home.contains(r#"<a href="./index.html">Home</a>"#));
    assert!(home.contains(r#"href="./fr/index.html""#));
    assert!(home.contains("<footer>v3.0.1</footer>"));
    assert!(home.contains(r#"href="https://example.org/""#));
}

#[test]
fn check_matches_build_without_writing() {
    let tmp = project();
    let inputs = load(tmp.path());

    let planned = pipeline::check(&inputs).unwrap();
    assert!(!tmp.path().join("dist").exists());

    let built = pipeline::build(&inputs).unwrap();
    assert_eq!(planned, built);
    for target in built.target_paths() {
        assert!(tmp.path().join("dist").join(target).is_file(), "{target}");
    }
}
