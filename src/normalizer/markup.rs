use html_escape::decode_html_entities;

/// Tags whose boundaries separate words in rendered text.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Reduce an HTML fragment to plain text.
///
/// Tags, attributes and comments are dropped, entities decoded and whitespace
/// collapsed to single spaces. Block-level tags act as word separators.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!`; anything else
/// (`3 < 5`) is kept as text, as is a tag that never closes.
pub fn strip_markup(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find('<') {
        text.push_str(&rest[..pos]);
        let markup = &rest[pos..];

        if let Some(comment) = markup.strip_prefix("<!--") {
            match comment.find("-->") {
                Some(end) => rest = &comment[end + 3..],
                None => {
                    text.push_str(markup);
                    rest = "";
                }
            }
            continue;
        }

        if !opens_tag(&markup[1..]) {
            text.push('<');
            rest = &markup[1..];
            continue;
        }

        match markup.find('>') {
            Some(end) => {
                if is_block_tag(&markup[1..end]) {
                    text.push(' ');
                }
                rest = &markup[end + 1..];
            }
            None => {
                text.push_str(markup);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    decode_html_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn opens_tag(after_lt: &str) -> bool {
    after_lt
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
}

fn is_block_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        assert_eq!(strip_markup("<p>World</p>"), "World");
        assert_eq!(
            strip_markup(r#"<a href="https://example.com" class="x">link</a> text"#),
            "link text"
        );
    }

    #[test]
    fn test_inline_tags_do_not_split_words() {
        assert_eq!(strip_markup("<b>Hel</b>lo"), "Hello");
    }

    #[test]
    fn test_block_tags_separate_words() {
        assert_eq!(strip_markup("<p>one</p><p>two</p>"), "one two");
        assert_eq!(strip_markup("line<br/>break"), "line break");
        assert_eq!(strip_markup("<ul><li>a</li><li>b</li></ul>"), "a b");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(strip_markup("Fish &amp; Chips"), "Fish & Chips");
        assert_eq!(strip_markup("&lt;tag&gt; &#169; &#x41;"), "<tag> © A");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(strip_markup("  a \n\n b\t c  "), "a b c");
        assert_eq!(strip_markup("a&nbsp;&nbsp;b"), "a b");
    }

    #[test]
    fn test_bare_less_than_is_text() {
        assert_eq!(
            strip_markup("<p>Battery 3 < 5 volts, replace soon. More details inside.</p>"),
            "Battery 3 < 5 volts, replace soon. More details inside."
        );
        assert_eq!(strip_markup("Price < 10 dollars today"), "Price < 10 dollars today");
        assert_eq!(strip_markup("a <= b and c<3"), "a <= b and c<3");
    }

    #[test]
    fn test_unclosed_tag_is_kept_as_text() {
        assert_eq!(strip_markup("x<y and more words"), "x<y and more words");
        assert_eq!(strip_markup("<p>fine</p> then <b broken"), "fine then <b broken");
    }

    #[test]
    fn test_comments_are_dropped() {
        assert_eq!(strip_markup("<!-- a > b --><p>Hi</p>"), "Hi");
        assert_eq!(strip_markup("before<!-- hidden -->after"), "beforeafter");
    }

    #[test]
    fn test_unclosed_comment_is_kept_as_text() {
        assert_eq!(strip_markup("text <!-- oops"), "text <!-- oops");
    }

    #[test]
    fn test_doctype_is_dropped() {
        assert_eq!(strip_markup("<!DOCTYPE html><p>body</p>"), "body");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_markup("just text"), "just text");
        assert_eq!(strip_markup(""), "");
        assert_eq!(strip_markup("  spaced\tout \n text "), "spaced out text");
    }

    #[test]
    fn test_malformed_markup() {
        assert_eq!(strip_markup("a > b"), "a > b");
        assert_eq!(strip_markup("<<p>x</p>"), "< x");
        assert_eq!(strip_markup("<"), "<");
        assert_eq!(strip_markup("tail <"), "tail <");
        assert_eq!(strip_markup("&lt;b&gt;bold&lt;/b&gt;"), "<b>bold</b>");
    }
}
