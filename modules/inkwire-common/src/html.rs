//! HTML fragment to plain text, for comment bodies.

use regex::Regex;
use std::sync::LazyLock;

static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Strip all tags from an HTML fragment, converting `<br>` and `</p>`
/// boundaries to line breaks first. Carriage returns and doubled
/// newlines are collapsed, the result trimmed.
pub fn html_to_text(html: &str) -> String {
    let text = BREAK_RE.replace_all(html, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let mut text = decode_entities(&text).replace('\r', "");
    while text.contains("\n\n") {
        text = text.replace("\n\n", "\n");
    }
    text.trim().to_string()
}

/// The handful of entities WordPress actually emits in comment bodies.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&#8217;", "\u{2019}")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let html = "<p>First line</p><p>Second line</p>";
        assert_eq!(html_to_text(html), "First line\nSecond line");
    }

    #[test]
    fn br_variants_become_lines() {
        assert_eq!(html_to_text("a<br>b<br/>c<BR />d"), "a\nb\nc\nd");
    }

    #[test]
    fn tags_stripped_entities_decoded() {
        let html = "<p>Tom &amp; Jerry say &quot;hi&quot;<strong>!</strong></p>";
        assert_eq!(html_to_text(html), "Tom & Jerry say \"hi\"!");
    }

    #[test]
    fn doubled_newlines_collapsed() {
        let html = "<p>a</p>\r\n\r\n<p>b</p>";
        assert_eq!(html_to_text(html), "a\nb");
    }

    #[test]
    fn plain_text_untouched() {
        assert_eq!(html_to_text("just words"), "just words");
    }

    #[test]
    fn empty_input() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<p></p>"), "");
    }
}
