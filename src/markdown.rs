//! Restricted Markdown-to-HTML conversion for the info document
//!
//! A single pass over the source text applies a fixed, ordered rule set:
//! headers (levels 1-3), bold spans, fenced code blocks (body escaped),
//! inline code spans, list items (then contiguous runs wrapped once in a
//! `<ul>`), and finally paragraph wrapping of any remaining blank-line
//! delimited block that does not already start with a markup tag.
//!
//! The order is load-bearing: each rule must not re-match output produced by
//! an earlier one. This is not a general Markdown parser; nested lists,
//! links, images and tables are out of scope.

use std::sync::OnceLock;

use regex::Regex;

fn re_h1() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^# (.+)$").unwrap())
}

fn re_h2() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^## (.+)$").unwrap())
}

fn re_h3() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^### (.+)$").unwrap())
}

fn re_bold() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").unwrap())
}

fn re_fenced_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Optional language tag on the opening fence is discarded
    RE.get_or_init(|| Regex::new(r"```(?:[A-Za-z0-9_+-]*\n)?((?:.|\n)*?)```").unwrap())
}

fn re_inline_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`([^`]+)`").unwrap())
}

fn re_list_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[*-] (.+)$").unwrap())
}

fn re_list_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<li>[^\n]*</li>(?:\n<li>[^\n]*</li>)*").unwrap())
}

/// A source line under the shared rule set. The on-screen preview resolves
/// structure through this classification so the rules live in one place.
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Fence,
    Header { level: u8, text: &'a str },
    ListItem(&'a str),
    Blank,
    Text(&'a str),
}

/// Classify one line against the same patterns the HTML conversion applies
pub fn classify_line(line: &str) -> Line<'_> {
    if line.trim_start().starts_with("```") {
        return Line::Fence;
    }
    for (level, re) in [(1u8, re_h1()), (2, re_h2()), (3, re_h3())] {
        if let Some(text) = re.captures(line).and_then(|caps| caps.get(1)) {
            return Line::Header {
                level,
                text: text.as_str(),
            };
        }
    }
    if let Some(text) = re_list_item().captures(line).and_then(|caps| caps.get(1)) {
        return Line::ListItem(text.as_str());
    }
    if line.trim().is_empty() {
        return Line::Blank;
    }
    Line::Text(line)
}

/// Drop bold and inline-code markers, keeping their content. Used where the
/// output medium styles text directly instead of through tags.
pub fn strip_spans(line: &str) -> String {
    let stripped = re_bold().replace_all(line, "$1");
    re_inline_code().replace_all(&stripped, "$1").into_owned()
}

/// Escape the five HTML-reserved characters. Total over all input; idempotent
/// only for inputs containing none of them.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Convert the supported Markdown subset to HTML
pub fn to_html(source: &str) -> String {
    // Header levels do not shadow each other: "^# " cannot match a line
    // starting with "##"
    let html = re_h1().replace_all(source, "<h1>$1</h1>");
    let html = re_h2().replace_all(&html, "<h2>$1</h2>");
    let html = re_h3().replace_all(&html, "<h3>$1</h3>");

    let html = re_bold().replace_all(&html, "<strong>$1</strong>");

    let html = re_fenced_code().replace_all(&html, |caps: &regex::Captures| {
        let body = caps[1].strip_suffix('\n').unwrap_or(&caps[1]);
        format!("<pre><code>{}</code></pre>", escape_html(body))
    });

    let html = re_inline_code().replace_all(&html, "<code>$1</code>");

    let html = re_list_item().replace_all(&html, "<li>$1</li>");
    let html = re_list_run().replace_all(&html, |caps: &regex::Captures| {
        format!("<ul>\n{}\n</ul>", &caps[0])
    });

    // Remaining blank-line delimited blocks become paragraphs unless they
    // already start with a tag produced above
    html.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if block.starts_with('<') {
                block.to_string()
            } else {
                format!("<p>{block}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_paragraph() {
        assert_eq!(
            to_html("# Title\n\nBody text"),
            "<h1>Title</h1>\n<p>Body text</p>"
        );
    }

    #[test]
    fn test_header_levels() {
        assert_eq!(to_html("## Section"), "<h2>Section</h2>");
        assert_eq!(to_html("### Sub"), "<h3>Sub</h3>");
    }

    #[test]
    fn test_bold_inside_paragraph() {
        assert_eq!(
            to_html("texto **importante** normal"),
            "<p>texto <strong>importante</strong> normal</p>"
        );
        // A block that begins with converted markup already starts with a
        // tag, so the paragraph rule leaves it alone
        assert_eq!(
            to_html("**importante** y normal"),
            "<strong>importante</strong> y normal"
        );
    }

    #[test]
    fn test_fenced_code_is_escaped() {
        assert_eq!(
            to_html("```\n<b> & 'x'\n```"),
            "<pre><code>&lt;b&gt; &amp; &#039;x&#039;</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_language_tag_discarded() {
        assert_eq!(to_html("```bash\nls -la\n```"), "<pre><code>ls -la</code></pre>");
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            to_html("usa `cargo run` ahora"),
            "<p>usa <code>cargo run</code> ahora</p>"
        );
    }

    #[test]
    fn test_list_run_wrapped_once() {
        assert_eq!(
            to_html("* uno\n* dos\n\ntexto"),
            "<ul>\n<li>uno</li>\n<li>dos</li>\n</ul>\n<p>texto</p>"
        );
    }

    #[test]
    fn test_dash_list_marker() {
        assert_eq!(to_html("- solo"), "<ul>\n<li>solo</li>\n</ul>");
    }

    #[test]
    fn test_separate_runs_get_separate_lists() {
        let html = to_html("* a\n\n* b");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn test_no_double_wrapping_of_converted_output() {
        let once = to_html("# Title\n\nBody text");
        assert_eq!(to_html(&once), once);
    }

    #[test]
    fn test_classify_line_follows_conversion_rules() {
        assert_eq!(
            classify_line("# Título"),
            Line::Header { level: 1, text: "Título" }
        );
        assert_eq!(
            classify_line("## Sección"),
            Line::Header { level: 2, text: "Sección" }
        );
        assert_eq!(classify_line("### Sub"), Line::Header { level: 3, text: "Sub" });
        assert_eq!(classify_line("* uno"), Line::ListItem("uno"));
        assert_eq!(classify_line("- dos"), Line::ListItem("dos"));
        assert_eq!(classify_line("```bash"), Line::Fence);
        assert_eq!(classify_line(""), Line::Blank);
        assert_eq!(classify_line("texto llano"), Line::Text("texto llano"));
        // No space after the marker: plain text, same as the converter
        assert_eq!(classify_line("#titular"), Line::Text("#titular"));
        assert_eq!(classify_line("*cursiva*"), Line::Text("*cursiva*"));
    }

    #[test]
    fn test_strip_spans_removes_markers() {
        assert_eq!(strip_spans("con **negrita** y `código`"), "con negrita y código");
        assert_eq!(strip_spans("sin marcas"), "sin marcas");
    }

    #[test]
    fn test_escape_html_reserved_characters() {
        assert_eq!(escape_html("<"), "&lt;");
        assert_eq!(escape_html(">"), "&gt;");
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html("\""), "&quot;");
        assert_eq!(escape_html("'"), "&#039;");
        assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
    }

    #[test]
    fn test_escape_html_idempotent_only_on_clean_input() {
        let clean = "texto normal 123";
        assert_eq!(escape_html(clean), clean);
        assert_eq!(escape_html(&escape_html(clean)), clean);

        let reserved = "a < b";
        assert_ne!(escape_html(&escape_html(reserved)), escape_html(reserved));
    }
}
