//! Text and attribute-value normalization.
//!
//! Entities are decoded to characters and re-encoded with the smallest safe set of
//! references. Whitespace in ordinary text collapses to single spaces; whether a
//! leading space survives depends on what the output buffer currently ends with.

use crate::classify;

/// Space, tab, line feed, carriage return and form feed. U+00A0 is content.
pub fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// What the serializer's output buffer ends with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tail {
    Doctype,
    StartTag(String),
    /// Also recorded for void elements, whose end tag is never written.
    EndTag(String),
    Text { ends_with_space: bool },
    Comment,
}

/// Where a text run sits in the document.
#[derive(Clone, Copy, Debug)]
pub struct TextContext<'a> {
    /// Open element names, outermost first.
    pub ancestors: &'a [String],
    pub tail: &'a Tail,
}

impl<'a> TextContext<'a> {
    pub fn new(ancestors: &'a [String], tail: &'a Tail) -> Self {
        Self { ancestors, tail }
    }

    pub fn current(&self) -> Option<&'a str> {
        self.ancestors.last().map(String::as_str)
    }

    pub fn in_raw_text(&self) -> bool {
        self.current().is_some_and(classify::is_raw_text)
    }

    pub fn in_preformatted(&self) -> bool {
        self.ancestors
            .iter()
            .any(|name| classify::is_preformatted(name))
    }

    pub fn in_head(&self) -> bool {
        self.ancestors.iter().any(|name| name == "head")
    }

    /// Text outside `head` is body content whether or not a `body` element is open.
    pub fn in_flow_content(&self) -> bool {
        !self.in_head()
    }

    /// Directly inside `html` or `head`.
    pub fn in_document_skeleton(&self) -> bool {
        self.current().is_some_and(classify::is_document_skeleton)
    }

    fn keeps_leading_space(&self) -> bool {
        match self.tail {
            Tail::StartTag(name) => {
                classify::is_flow(name) && !classify::is_block(name) && self.in_flow_content()
            }
            Tail::EndTag(name) => classify::is_flow(name) && self.in_flow_content(),
            Tail::Text { ends_with_space } => !ends_with_space,
            Tail::Doctype | Tail::Comment => false,
        }
    }
}

/// Normalize one complete text run for emission in `cx`.
pub fn normalize(text: &str, cx: &TextContext<'_>) -> String {
    if cx.in_raw_text() {
        return text.to_string();
    }
    let text = normalize_entities(text);
    if cx.in_preformatted() {
        return text;
    }
    let collapsed = collapse_whitespace(&text, cx.keeps_leading_space());
    if cx.in_document_skeleton() && collapsed.chars().all(is_html_whitespace) {
        return String::new();
    }
    collapsed
}

/// Decode every character reference, then escape only `&`, `<` and `>`.
///
/// `&quot;` and `&apos;` come back as literal quotes; they only matter in attributes.
pub fn normalize_entities(text: &str) -> String {
    let decoded = html_escape::decode_html_entities(text);
    html_escape::encode_text(&decoded).into_owned()
}

/// Decode, then escape `&`, `<`, `>`, `"` and `'` so the value is safe in any quoting.
pub fn normalize_attribute_value(value: &str) -> String {
    let decoded = html_escape::decode_html_entities(value);
    html_escape::encode_quoted_attribute(&decoded).into_owned()
}

/// Whether an (already normalized) attribute value has to be written in quotes.
pub fn value_needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .bytes()
            .any(|b| b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b'<' | b'>' | b'=' | b'`'))
}

/// Squeeze each whitespace run to one space, dropping a leading space unless kept.
fn collapse_whitespace(text: &str, keep_leading: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_html_whitespace(c) {
            in_space = true;
            continue;
        }
        if in_space && (keep_leading || !out.is_empty()) {
            out.push(' ');
        }
        in_space = false;
        out.push(c);
    }
    if in_space && (keep_leading || !out.is_empty()) {
        out.push(' ');
    }
    out
}
