//! Linear-scan HTML tokenizer with a constrained, practical tag-name character set.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`. Attribute names
//! run until whitespace, `/`, `>` or `=`.
//!
//! Text and attribute values are returned exactly as written. Character references
//! are left for the consumer: the minifier decodes and re-encodes them in one place,
//! so decoding here would decode twice (`&amp;lt;` would turn into `<`).
//!
//! Known limitations (intentional):
//! - Not a full HTML5 tokenizer/state machine (no parse-error recovery).
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>` (see
//!   `find_rawtext_close_tag`).
use crate::types::{Token, TokenStream};
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";
const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

/// Elements whose body is scanned verbatim up to the matching end tag.
const RAWTEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Markup {
    Comment,
    Cdata,
    Doctype,
    BogusComment,
    EndTag,
    StartTag,
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_tag_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn is_attr_name_char(c: u8) -> bool {
    !c.is_ascii_whitespace() && !matches!(c, b'/' | b'>' | b'=' | b'"' | b'\'' | b'<')
}

pub(crate) fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

// `<` never appears inside a UTF-8 continuation byte, so every position we
// classify here is a char boundary.
fn classify_markup(bytes: &[u8], i: usize) -> Option<Markup> {
    debug_assert_eq!(bytes[i], b'<');
    let next = *bytes.get(i + 1)?;
    match next {
        b'!' => {
            if starts_with_ignore_ascii_case_at(bytes, i, HTML_COMMENT_START.as_bytes()) {
                Some(Markup::Comment)
            } else if starts_with_ignore_ascii_case_at(bytes, i, CDATA_START.as_bytes()) {
                Some(Markup::Cdata)
            } else if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
                Some(Markup::Doctype)
            } else {
                Some(Markup::BogusComment)
            }
        }
        b'?' => Some(Markup::BogusComment),
        b'/' => bytes
            .get(i + 2)
            .is_some_and(|b| b.is_ascii_alphabetic())
            .then_some(Markup::EndTag),
        b if b.is_ascii_alphabetic() => Some(Markup::StartTag),
        _ => None,
    }
}

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay_bytes = haystack.as_bytes();
    let len = hay_bytes.len();
    let n = close_tag.len();
    debug_assert!(n >= 2);
    debug_assert!(close_tag[0] == b'<' && close_tag[1] == b'/');
    debug_assert!(close_tag.is_ascii());
    if len < n {
        return None;
    }
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay_bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if hay_bytes[i + 1] == b'/' && starts_with_ignore_ascii_case_at(hay_bytes, i, close_tag) {
            let mut k = i + n;
            // `</script foo>` is also a close tag per the HTML grammar; we only
            // accept ASCII whitespace before `>` to keep the scan alloc-free.
            while k < len && hay_bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay_bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

fn flush_text(out: &mut Vec<Token>, input: &str, start: usize, end: usize) {
    if start < end {
        debug_assert!(input.is_char_boundary(start));
        debug_assert!(input.is_char_boundary(end));
        out.push(Token::Text(input[start..end].to_string()));
    }
}

/// Scan the body of a delimited construct (`<!--…-->`, `<![CDATA[…]]>`).
///
/// Returns the body and the index just past the terminator; an unterminated
/// construct runs to the end of input.
fn delimited<'a>(input: &'a str, body_start: usize, terminator: &str) -> (&'a str, usize) {
    match input[body_start..].find(terminator) {
        Some(rel) => (
            &input[body_start..body_start + rel],
            body_start + rel + terminator.len(),
        ),
        None => (&input[body_start..], input.len()),
    }
}

/// Tokenizes `input` into raw tokens.
pub fn tokenize(input: &str) -> TokenStream {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    let mut text_start = 0;
    // Invariant: slice endpoints are only taken at ASCII structural bytes or after
    // ASCII-only scans, so every endpoint is a UTF-8 char boundary.
    while i < len {
        let Some(rel) = memchr(b'<', &bytes[i..]) else {
            break;
        };
        i += rel;
        let Some(markup) = classify_markup(bytes, i) else {
            // Lone `<` (e.g. `a < b`) stays part of the text run.
            i += 1;
            continue;
        };
        flush_text(&mut out, input, text_start, i);

        match markup {
            Markup::Comment => {
                let (body, next) = delimited(input, i + HTML_COMMENT_START.len(), HTML_COMMENT_END);
                out.push(Token::Comment(body.to_string()));
                i = next;
            }
            Markup::Cdata => {
                let (body, next) = delimited(input, i + CDATA_START.len(), CDATA_END);
                out.push(Token::Cdata(body.to_string()));
                i = next;
            }
            Markup::Doctype => {
                let (body, next) = delimited(input, i + 2, ">");
                out.push(Token::Doctype(body.trim().to_string()));
                i = next;
            }
            Markup::BogusComment => {
                // `<?xml …?>` and `<!foo>` are parsed as comments by HTML.
                let (body, next) = delimited(input, i + 2, ">");
                out.push(Token::Comment(body.to_string()));
                i = next;
            }
            Markup::EndTag => {
                let start = i + 2;
                let mut j = start;
                while j < len && is_tag_name_char(bytes[j]) {
                    j += 1;
                }
                let name = input[start..j].to_ascii_lowercase();
                // skip to '>'
                match memchr(b'>', &bytes[j..]) {
                    Some(rel) => j += rel + 1,
                    None => j = len,
                }
                out.push(Token::EndTag(name));
                i = j;
            }
            Markup::StartTag => {
                i = start_tag(input, i, &mut out);
            }
        }
        text_start = i;
    }
    flush_text(&mut out, input, text_start, len);
    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", len, out.len());
    TokenStream::new(out)
}

/// Tokenizes the start tag at `i` (and, for rawtext elements, its body and end
/// tag). Returns the index just past what was consumed.
fn start_tag(input: &str, i: usize, out: &mut Vec<Token>) -> usize {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let start = i + 1;
    let mut k = start;
    while k < len && is_tag_name_char(bytes[k]) {
        k += 1;
    }
    debug_assert!(input.is_char_boundary(start));
    debug_assert!(input.is_char_boundary(k));
    let name = input[start..k].to_ascii_lowercase();
    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let name_start = k;
        while k < len && is_attr_name_char(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            k += 1;
            continue;
        }
        let attribute_name = input[name_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                match memchr(quote, &bytes[k..]) {
                    Some(rel) => k += rel,
                    None => k = len,
                }
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(raw.to_string())
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(input[vstart..k].to_string())
            }
        } else {
            None
        };
        attributes.push((attribute_name, value));
    }

    let rawtext = RAWTEXT_ELEMENTS.contains(&name.as_str()) && !self_closing;
    if is_void_element(&name) {
        self_closing = true;
    }
    out.push(Token::StartTag {
        name: name.clone(),
        attributes,
        self_closing,
    });

    if !rawtext {
        return k;
    }

    let close_tag = format!("</{name}");
    match find_rawtext_close_tag(&input[k..], close_tag.as_bytes()) {
        Some((rel_start, rel_end)) => {
            let raw = &input[k..k + rel_start];
            if !raw.is_empty() {
                out.push(Token::Text(raw.to_string()));
            }
            out.push(Token::EndTag(name));
            k + rel_end
        }
        None => {
            // Missing close tag: the remainder is rawtext and the element ends
            // with the input.
            let raw = &input[k..];
            if !raw.is_empty() {
                out.push(Token::Text(raw.to_string()));
            }
            out.push(Token::EndTag(name));
            len
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::token_snapshot;

    #[test]
    fn tokenize_preserves_utf8_text_nodes() {
        let stream = tokenize("<p>120×32</p>");
        assert!(
            stream
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "120×32")),
            "expected UTF-8 text token, got: {stream:?}"
        );
    }

    #[test]
    fn tokenize_handles_uppercase_doctype() {
        let stream = tokenize("<!DOCTYPE html>");
        assert_eq!(stream.tokens(), &[Token::Doctype("DOCTYPE html".to_string())]);
    }

    #[test]
    fn tokenize_keeps_entities_raw() {
        let stream = tokenize("<p title=\"a &amp; b\">&lt;script&gt; &eacute;</p>");
        assert_eq!(
            token_snapshot(&stream),
            vec![
                "StartTag(p title=\"a &amp; b\")",
                "Text(&lt;script&gt; &eacute;)",
                "EndTag(p)",
            ]
        );
    }

    #[test]
    fn tokenize_lowercases_tag_and_attribute_names() {
        let stream = tokenize("<DiV ID=one Class='x'></DIV>");
        assert_eq!(
            token_snapshot(&stream),
            vec!["StartTag(div id=\"one\" class=\"x\")", "EndTag(div)"]
        );
    }

    #[test]
    fn tokenize_distinguishes_missing_and_empty_attribute_values() {
        let stream = tokenize("<input disabled value=\"\" name=>");
        assert_eq!(
            stream.tokens(),
            &[Token::StartTag {
                name: "input".to_string(),
                attributes: vec![
                    ("disabled".to_string(), None),
                    ("value".to_string(), Some(String::new())),
                    ("name".to_string(), Some(String::new())),
                ],
                self_closing: true,
            }]
        );
    }

    #[test]
    fn tokenize_accepts_framework_attribute_names() {
        let stream = tokenize("<button @click=go v-on:focus=x data-id=1>");
        assert_eq!(
            token_snapshot(&stream),
            vec!["StartTag(button @click=\"go\" v-on:focus=\"x\" data-id=\"1\")"]
        );
    }

    #[test]
    fn tokenize_finds_script_end_tag_case_insensitive() {
        let stream = tokenize("<script>let x = a < b;</ScRiPt>");
        assert_eq!(
            token_snapshot(&stream),
            vec!["StartTag(script)", "Text(let x = a < b;)", "EndTag(script)"]
        );
    }

    #[test]
    fn tokenize_treats_textarea_and_title_as_rawtext() {
        let stream = tokenize("<title>a <b> c</title><textarea>\n <i>x</i></textarea>");
        assert_eq!(
            token_snapshot(&stream),
            vec![
                "StartTag(title)",
                "Text(a <b> c)",
                "EndTag(title)",
                "StartTag(textarea)",
                "Text(\\n <i>x</i>)",
                "EndTag(textarea)",
            ]
        );
    }

    #[test]
    fn rawtext_close_tag_does_not_accept_near_matches() {
        let stream = tokenize("<script>ok</scriptx >no</script >");
        assert_eq!(
            token_snapshot(&stream),
            vec!["StartTag(script)", "Text(ok</scriptx >no)", "EndTag(script)"]
        );
    }

    #[test]
    fn tokenize_handles_rawtext_without_close_tag() {
        let mut body = String::new();
        for _ in 0..10_000 {
            body.push_str("x<y>\n");
        }
        let input = format!("<style>{body}");
        let stream = tokenize(&input);
        assert!(
            matches!(
                stream.tokens(),
                [Token::StartTag { name, .. }, Token::Text(text), Token::EndTag(end)]
                    if name == "style" && *text == body && end == "style"
            ),
            "expected rawtext body without close tag, got {} tokens",
            stream.len()
        );
    }

    #[test]
    fn tokenize_keeps_lone_angle_brackets_in_text() {
        let stream = tokenize("<p>1 < 2 <= 3 </ 4</p>");
        assert_eq!(
            token_snapshot(&stream),
            vec!["StartTag(p)", "Text(1 < 2 <= 3 </ 4)", "EndTag(p)"]
        );
    }

    #[test]
    fn tokenize_recognizes_comments_cdata_and_processing_instructions() {
        let stream = tokenize("<?xml version=\"1.0\"?><!--[if lt IE 9]>x<![endif]--><![CDATA[a<b]]>");
        assert_eq!(
            token_snapshot(&stream),
            vec![
                "Comment(xml version=\"1.0\"?)",
                "Comment([if lt IE 9]>x<![endif])",
                "Cdata(a<b)",
            ]
        );
    }

    #[test]
    fn tokenize_marks_void_and_self_closing_tags() {
        let stream = tokenize("<br><img src=a.png/><circle r=1 />");
        assert_eq!(
            token_snapshot(&stream),
            vec![
                "StartTag(br /)",
                "StartTag(img src=\"a.png\" /)",
                "StartTag(circle r=\"1\" /)",
            ]
        );
    }

    #[test]
    fn tokenize_allows_custom_element_and_namespaced_tags() {
        let stream = tokenize("<my-component></my-component><svg:rect></svg:rect>");
        assert_eq!(
            token_snapshot(&stream),
            vec![
                "StartTag(my-component)",
                "EndTag(my-component)",
                "StartTag(svg:rect)",
                "EndTag(svg:rect)",
            ]
        );
    }

    #[test]
    fn tokenize_handles_unterminated_comment() {
        let stream = tokenize("<p>a</p><!-- trailing");
        assert_eq!(
            token_snapshot(&stream),
            vec!["StartTag(p)", "Text(a)", "EndTag(p)", "Comment( trailing)"]
        );
    }

    #[test]
    fn tokenize_handles_many_simple_tags_linearly() {
        let input = "<a></a>".repeat(20_000);
        let stream = tokenize(&input);
        assert_eq!(stream.len(), 40_000);
    }

    #[test]
    fn tokenize_handles_tons_of_angle_brackets() {
        let input = "<".repeat(200_000);
        let stream = tokenize(&input);
        assert_eq!(stream.tokens(), &[Token::Text(input.clone())]);
    }
}
