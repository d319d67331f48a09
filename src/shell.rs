//! Page shells wrapped around converted markdown.
//!
//! The shell is picked from the source path alone, after the locale
//! directory is stripped:
//!
//! | Path prefix | Shell |
//! |-------------|-------|
//! | `docs/` | [`PageShell::Docs`]: documentation sidebar |
//! | `enforcecore/` | [`PageShell::EnforceCore`]: product sidebar |
//! | `blog/`, `case-studies/` | [`PageShell::Article`]: no sidebar |
//! | anything else | [`PageShell::Plain`] |
//!
//! Shells are rendered with maud. Labels are emitted as `{{i18n.*}}` tokens
//! and the stylesheet link as `{{root}}`/`{{version}}` tokens; the compositor
//! resolves all of them in its final pass, together with any tokens the
//! partials or the markdown body carry.

use crate::locale::Locale;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// The closed set of page layouts for markdown content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShell {
    Docs,
    EnforceCore,
    Article,
    Plain,
}

/// Pre-rendered pieces a shell is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct ShellParts<'a> {
    pub locale: Locale,
    /// Header partial (raw HTML).
    pub header: &'a str,
    /// Footer partial (raw HTML).
    pub footer: &'a str,
    /// Converted markdown body (raw HTML).
    pub body: &'a str,
    /// Brand name shown in article titles.
    pub site_name: &'a str,
}

/// A sidebar label: either a translation key or fixed text.
#[derive(Debug, Clone, Copy)]
enum Label {
    Key(&'static str),
    Text(&'static str),
}

impl Label {
    fn token(self) -> String {
        match self {
            Label::Key(key) => format!("{{{{i18n.{key}}}}}"),
            Label::Text(text) => text.to_string(),
        }
    }
}

struct NavSection {
    title: Label,
    /// `(path under the site root, label)`
    links: &'static [(&'static str, Label)],
}

const DOCS_NAV: &[NavSection] = &[
    NavSection {
        title: Label::Key("sidebar.start_here"),
        links: &[
            ("docs/index.html", Label::Key("sidebar.overview")),
            ("docs/installation.html", Label::Key("sidebar.installation")),
            ("docs/quickstart.html", Label::Key("sidebar.quickstart")),
        ],
    },
    NavSection {
        title: Label::Key("sidebar.core"),
        links: &[
            ("docs/concepts.html", Label::Key("sidebar.concepts")),
            ("docs/security.html", Label::Key("sidebar.security_model")),
            ("docs/use-cases.html", Label::Key("sidebar.use_cases")),
        ],
    },
    NavSection {
        title: Label::Key("sidebar.reference"),
        links: &[
            ("docs/config-reference.html", Label::Key("sidebar.config_reference")),
            ("docs/policy-schema.html", Label::Key("sidebar.policy_schema")),
            ("docs/cli-reference.html", Label::Text("CLI Reference")),
            ("docs/debugging.html", Label::Key("sidebar.debugging")),
            ("docs/api-reference.html", Label::Text("API Reference")),
            ("docs/faq-glossary.html", Label::Text("FAQ & Glossary")),
        ],
    },
    NavSection {
        title: Label::Text("Integration"),
        links: &[
            ("docs/integration-api.html", Label::Text("API Integration")),
            (
                "docs/integration-document-processing.html",
                Label::Text("Document Processing"),
            ),
        ],
    },
    NavSection {
        title: Label::Text("Advanced"),
        links: &[
            ("docs/best-practices.html", Label::Text("Best Practices")),
            ("docs/deployment.html", Label::Text("Deployment")),
            ("docs/migration-guide.html", Label::Text("Migration Guide")),
        ],
    },
];

const ENFORCECORE_NAV: &[NavSection] = &[
    NavSection {
        title: Label::Key("enforcecore.sidebar.product"),
        links: &[
            ("enforcecore/index.html", Label::Key("enforcecore.sidebar.overview")),
            (
                "enforcecore/getting-started.html",
                Label::Key("enforcecore.sidebar.getting_started"),
            ),
            ("enforcecore/architecture.html", Label::Key("enforcecore.sidebar.architecture")),
        ],
    },
    NavSection {
        title: Label::Key("enforcecore.sidebar.guides"),
        links: &[
            ("enforcecore/policies.html", Label::Key("enforcecore.sidebar.policies")),
            (
                "enforcecore/integrations.html",
                Label::Key("enforcecore.sidebar.integrations"),
            ),
            ("enforcecore/api.html", Label::Text("API Reference")),
        ],
    },
];

/// Marks the sidebar link matching the current location as active.
const ACTIVE_LINK_JS: &str = r#"(function() {
    const path = window.location.pathname;
    document.querySelectorAll('.docs-nav a').forEach(link => {
        const href = link.getAttribute('href').replace(/^(\.\.?\/)+/, '/');
        if (path.endsWith(href) || path.endsWith(href.replace(/\.html$/, '/'))) {
            link.classList.add('active');
        }
    });
})();"#;

impl PageShell {
    /// Pick the shell for a source-relative markdown path.
    pub fn classify(source_rel: &str) -> PageShell {
        let neutral = Locale::strip_dir(source_rel);
        let section = neutral.split_once('/').map(|(first, _)| first);
        match section {
            Some("docs") => PageShell::Docs,
            Some("enforcecore") => PageShell::EnforceCore,
            Some("blog" | "case-studies") => PageShell::Article,
            _ => PageShell::Plain,
        }
    }

    /// Short name used in build output.
    pub fn name(self) -> &'static str {
        match self {
            PageShell::Docs => "docs",
            PageShell::EnforceCore => "enforcecore",
            PageShell::Article => "article",
            PageShell::Plain => "page",
        }
    }

    /// Assemble the full HTML document for this shell.
    pub fn render(self, parts: &ShellParts<'_>) -> Markup {
        match self {
            PageShell::Docs => sidebar_page(parts, DOCS_NAV, "docs-wrapper"),
            PageShell::EnforceCore => sidebar_page(parts, ENFORCECORE_NAV, "docs-wrapper enforcecore"),
            PageShell::Article => article_page(parts),
            PageShell::Plain => plain_page(parts),
        }
    }
}

// ============================================================================
// Shell components
// ============================================================================

fn base_document(parts: &ShellParts<'_>, title: Markup, extra_head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(parts.locale.code()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="{{root}}/assets/css/styles.css?v={{version}}";
                link rel="canonical" href="{{canonical}}";
                (extra_head)
            }
            body {
                (PreEscaped(parts.header))
                (content)
                (PreEscaped(parts.footer))
            }
        }
    }
}

fn sidebar(sections: &[NavSection]) -> Markup {
    html! {
        aside.docs-sidebar {
            nav.docs-nav {
                @for section in sections {
                    div.section-title { (PreEscaped(section.title.token())) }
                    ul {
                        @for (path, label) in section.links {
                            li {
                                a href={ "{{root}}/" (path) } { (label_markup(*label)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Translation tokens pass through unescaped; fixed text is escaped.
fn label_markup(label: Label) -> Markup {
    match label {
        Label::Key(_) => PreEscaped(label.token()),
        Label::Text(text) => html! { (text) },
    }
}

fn sidebar_page(parts: &ShellParts<'_>, nav: &[NavSection], wrapper_class: &str) -> Markup {
    let content = html! {
        div.page {
            div class=(wrapper_class) {
                (sidebar(nav))
                main.docs-content {
                    (PreEscaped(parts.body))
                }
            }
        }
        script { (PreEscaped(ACTIVE_LINK_JS)) }
    };
    base_document(parts, PreEscaped("{{i18n.nav.docs}}".to_string()), html! {}, content)
}

fn article_page(parts: &ShellParts<'_>) -> Markup {
    let title = html! { (parts.site_name) " — " (PreEscaped("{{i18n.nav.blog}}")) };
    let favicon = html! {
        link rel="icon" href="{{root}}/assets/img/favicon.svg" type="image/svg+xml";
    };
    let content = html! {
        article.section {
            div.page {
                div.blog-post-wrapper {
                    div.blog-post-main {
                        (PreEscaped(parts.body))
                    }
                }
            }
        }
    };
    base_document(parts, title, favicon, content)
}

fn plain_page(parts: &ShellParts<'_>) -> Markup {
    let content = html! {
        div.page {
            (PreEscaped(parts.body))
        }
    };
    base_document(parts, PreEscaped("{{i18n.nav.docs}}".to_string()), html! {}, content)
}
