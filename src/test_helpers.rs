//! Shared test utilities: a small bilingual project written to a temp dir.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let (tmp, inputs) = load_fixture_inputs();
//! let report = build(&inputs).unwrap();
//! assert_eq!(read_output(&inputs, "docs/index.html").contains("Overview"), true);
//! ```
//!
//! Layout written by [`write_fixture_site`]:
//!
//! ```text
//! version.json                   2.1.0
//! partials/{header,footer}.html
//! internal/i18n/modules/{common,docs}.json
//! site/
//! ├── index.html                 fan-out canonical
//! ├── fr/index.html              stale, must be skipped
//! ├── docs/index.html
//! ├── docs/quickstart.md
//! ├── fr/docs/quickstart.md
//! ├── blog/launch.md
//! └── assets/{css/styles.css, img/arch.svg}
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::pipeline::BuildInputs;

pub const HEADER: &str = r#"<header class="site-header">
    <a href="{{root}}/index.html">{{i18n.nav.home}}</a>
    <a href="{{root}}/docs/index.html">{{i18n.nav.docs}}</a>
    <a href="{{i18n.page.lang_switch_href}}" hreflang="{{i18n.page.alternate_lang}}">{{i18n.nav.switch_language}}</a>
</header>"#;

pub const FOOTER: &str = r#"<footer><p>{{i18n.footer.copyright}}</p><p>v{{version}}</p></footer>"#;

pub const COMMON_MODULE: &str = r#"{
  "en": {
    "nav": { "home": "Home", "docs": "Docs", "blog": "Blog", "switch_language": "Français" },
    "footer": { "copyright": "© AKIOS" },
    "hero": { "title": "Secure runtime for AI agents" }
  },
  "fr": {
    "nav": { "home": "Accueil", "docs": "Documentation", "blog": "Blog", "switch_language": "English" },
    "footer": { "copyright": "© AKIOS" },
    "hero": { "title": "Runtime sécurisé pour agents IA" }
  }
}"#;

pub const DOCS_MODULE: &str = r#"{
  "en": {
    "sidebar": {
      "start_here": "Start here", "overview": "Overview", "installation": "Installation",
      "quickstart": "Quickstart", "core": "Core", "concepts": "Concepts",
      "security_model": "Security model", "use_cases": "Use cases", "reference": "Reference",
      "config_reference": "Config reference", "policy_schema": "Policy schema",
      "debugging": "Debugging"
    }
  },
  "fr": {
    "sidebar": {
      "start_here": "Commencer", "overview": "Vue d'ensemble", "installation": "Installation",
      "quickstart": "Démarrage rapide", "core": "Essentiel", "concepts": "Concepts",
      "security_model": "Modèle de sécurité", "use_cases": "Cas d'usage", "reference": "Référence",
      "config_reference": "Configuration", "policy_schema": "Schéma de politique",
      "debugging": "Débogage"
    }
  }
}"#;

pub const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <link rel="canonical" href="{{canonical}}">
    <link rel="stylesheet" href="{{root}}/assets/css/styles.css?v={{version}}">
</head>
<body>
<!-- {{header}} -->
<h1>{{i18n.hero.title}}</h1>
<img src="{{root}}/assets/img/arch.svg" alt="">
<!-- {{footer}} -->
</body>
</html>
"#;

pub const DOCS_INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
<!-- {{header}} -->
<main><h1>{{i18n.sidebar.overview}}</h1></main>
<!-- {{footer}} -->
</body>
</html>
"#;

pub const QUICKSTART_MD: &str = "---\ntitle: Quickstart\norder: 3\n---\n\n# Quickstart\n\nInstall the CLI and run your first agent.\n";

pub const QUICKSTART_FR_MD: &str = "---\ntitle: Démarrage rapide\n---\n\n# Démarrage rapide\n";

pub const LAUNCH_MD: &str = "---\ntitle: Launch\n---\n# We launched\n\nRead the [docs](https://akios.ai/docs/).\n";

/// Write the fixture project into a fresh temp dir.
pub fn write_fixture_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let files: &[(&str, &str)] = &[
        ("version.json", r#"{ "version": "2.1.0" }"#),
        ("partials/header.html", HEADER),
        ("partials/footer.html", FOOTER),
        ("internal/i18n/modules/common.json", COMMON_MODULE),
        ("internal/i18n/modules/docs.json", DOCS_MODULE),
        ("site/index.html", HOME_PAGE),
        ("site/fr/index.html", "<html lang=\"fr\">STALE</html>"),
        ("site/docs/index.html", DOCS_INDEX),
        ("site/docs/quickstart.md", QUICKSTART_MD),
        ("site/fr/docs/quickstart.md", QUICKSTART_FR_MD),
        ("site/blog/launch.md", LAUNCH_MD),
        ("site/assets/css/styles.css", "body { margin: 0; }\n"),
        ("site/assets/img/arch.svg", "<svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
    ];
    for (rel, contents) in files {
        write_file(root, rel, contents);
    }
    tmp
}

/// Write the fixture project and load its build inputs with stock config.
pub fn load_fixture_inputs() -> (TempDir, BuildInputs) {
    let tmp = write_fixture_site();
    let inputs = BuildInputs::load(&SiteConfig::default(), tmp.path()).unwrap();
    (tmp, inputs)
}

/// Read a built output file. Panics with the path if it is missing.
pub fn read_output(inputs: &BuildInputs, rel: &str) -> String {
    let path = inputs.paths.dist.join(rel);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("output '{}' not readable: {e}", path.display()))
}

fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
