//! Markdown body preparation: front matter stripping and HTML conversion.

use pulldown_cmark::{Options, Parser, html as md_html};

const FRONT_MATTER_DELIMITER: &str = "---";

/// Result of splitting front matter off a markdown source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatter<'a> {
    /// No leading delimiter line; the whole source is body.
    Absent(&'a str),
    /// A delimited block was found and discarded; holds the trimmed body.
    Stripped(&'a str),
    /// An opening delimiter without a closing one. The whole source is body.
    Unterminated(&'a str),
}

impl<'a> FrontMatter<'a> {
    /// The markdown body left after stripping.
    pub fn body(self) -> &'a str {
        match self {
            FrontMatter::Absent(body)
            | FrontMatter::Stripped(body)
            | FrontMatter::Unterminated(body) => body,
        }
    }
}

/// Split a leading front matter block off `source`.
///
/// The block must open with a line that is exactly `---` at the very start of
/// the file and close with the next line that is exactly `---`. Its fields are
/// not parsed. Without a closing line the source is returned whole.
pub fn strip_front_matter(source: &str) -> FrontMatter<'_> {
    let mut lines = source.split_inclusive('\n');
    let opens = lines
        .next()
        .is_some_and(|first| trim_eol(first) == FRONT_MATTER_DELIMITER);
    if !opens {
        return FrontMatter::Absent(source);
    }

    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        offset += line.len();
        if offset > line.len() && trim_eol(line) == FRONT_MATTER_DELIMITER {
            return FrontMatter::Stripped(source[offset..].trim());
        }
    }
    FrontMatter::Unterminated(source)
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Convert a markdown body to an HTML fragment.
///
/// GitHub-flavored extensions (tables, strikethrough, task lists, footnotes)
/// are enabled since documentation pages rely on them.
pub fn markdown_to_html(body: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(body, options);
    let mut html = String::with_capacity(body.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_delimited_block() {
        let src = "---\ntitle: Quickstart\norder: 2\n---\n\n# Quickstart\n";
        let fm = strip_front_matter(src);
        assert!(matches!(fm, FrontMatter::Stripped(_)));
        assert_eq!(fm.body(), "# Quickstart");
    }

    #[test]
    fn handles_crlf_delimiters() {
        let src = "---\r\ntitle: x\r\n---\r\nBody\r\n";
        assert_eq!(strip_front_matter(src).body(), "Body");
    }

    #[test]
    fn no_front_matter_keeps_source() {
        let src = "# Title\n\n---\n\nAfter a rule";
        assert_eq!(strip_front_matter(src), FrontMatter::Absent(src));
    }

    #[test]
    fn unterminated_block_keeps_whole_source() {
        let src = "---\ntitle: oops\n# Heading\n";
        assert_eq!(strip_front_matter(src), FrontMatter::Unterminated(src));
    }

    #[test]
    fn delimiter_must_be_exact_line() {
        let src = "----\ntitle: x\n---\nBody";
        assert_eq!(strip_front_matter(src), FrontMatter::Absent(src));

        // A dashes-prefixed line does not close the block
        let src = "---\ntitle: x\n--- not a close\nBody";
        assert_eq!(strip_front_matter(src), FrontMatter::Unterminated(src));
    }

    #[test]
    fn empty_front_matter() {
        assert_eq!(strip_front_matter("---\n---\nHello").body(), "Hello");
    }

    #[test]
    fn converts_heading_and_emphasis() {
        let html = markdown_to_html("# Quickstart\n\nThis is **bold**.");
        assert!(html.contains("<h1>Quickstart</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn converts_tables() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }
}
