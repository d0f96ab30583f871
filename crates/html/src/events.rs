//! Balanced parse-event stream built from raw tokens.
//!
//! The builder keeps a stack of open element names and guarantees the event
//! contract documented on [`Event`]: every open is closed, closes are properly
//! nested, and the stream starts with `DocumentStart`.
//!
//! Implied end tags cover the elements whose end tags the minifier may omit, so
//! minified output parses back into the same events it was produced from.

use crate::tokenizer::{is_void_element, tokenize};
use crate::types::{Event, Token, TokenStream};

const FOREIGN_ROOTS: &[&str] = &["math", "svg"];

/// Start tags that close an open `p` (sorted for binary search).
pub const PARAGRAPH_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "details", "dialog", "dir", "div", "dl",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hgroup", "hr", "main", "menu", "nav", "ol", "p", "pre", "search", "section",
    "table", "ul",
];

/// Elements that opening `name` implicitly closes when they are the current element.
fn implied_end_tags(name: &str) -> &'static [&'static str] {
    match name {
        "li" => &["li"],
        "dt" | "dd" => &["dd", "dt"],
        "rt" | "rp" => &["rp", "rt"],
        "option" => &["option"],
        "optgroup" => &["optgroup", "option"],
        "tr" => &["colgroup", "td", "th", "tr"],
        "td" | "th" => &["td", "th"],
        "thead" | "tbody" | "tfoot" => &["colgroup", "tbody", "td", "tfoot", "th", "thead", "tr"],
        _ if PARAGRAPH_CLOSERS.binary_search(&name).is_ok() => &["p"],
        _ => &[],
    }
}

/// Tokenize `input` and build its balanced event stream.
pub fn parse_events(input: &str) -> Vec<Event> {
    build_events(&tokenize(input))
}

pub fn build_events(stream: &TokenStream) -> Vec<Event> {
    let mut builder = EventBuilder::new();
    for token in stream.iter() {
        builder.push_token(token);
    }
    builder.finish()
}

#[derive(Debug)]
pub struct EventBuilder {
    events: Vec<Event>,
    open_elements: Vec<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            events: vec![Event::DocumentStart],
            open_elements: Vec::new(),
        }
    }

    pub fn push_token(&mut self, token: &Token) {
        match token {
            // The minifier writes its own doctype.
            Token::Doctype(_) => {}
            Token::Comment(text) => self.events.push(Event::Comment(text.clone())),
            Token::Cdata(text) => self.events.push(Event::Cdata(text.clone())),
            Token::Text(text) => {
                if !text.is_empty() {
                    self.events.push(Event::Characters(text.clone()));
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.open(name, attributes, *self_closing),
            Token::EndTag(name) => self.close(name),
        }
    }

    fn open(&mut self, name: &str, attributes: &[(String, Option<String>)], self_closing: bool) {
        let implied = implied_end_tags(name);
        while let Some(current) = self.open_elements.last() {
            if !implied.contains(&current.as_str()) {
                break;
            }
            log::trace!(target: "html.events", "<{name}> implies </{current}>");
            self.close_current();
        }

        let in_foreign = FOREIGN_ROOTS.contains(&name)
            || self
                .open_elements
                .iter()
                .any(|open| FOREIGN_ROOTS.contains(&open.as_str()));

        self.events.push(Event::ElementOpen {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().unwrap_or_default()))
                .collect(),
        });
        self.open_elements.push(name.to_string());

        if is_void_element(name) || (self_closing && in_foreign) {
            self.close_current();
        }
    }

    fn close(&mut self, name: &str) {
        let Some(pos) = self.open_elements.iter().rposition(|open| open == name) else {
            log::trace!(target: "html.events", "ignoring stray end tag </{name}>");
            return;
        };
        while self.open_elements.len() > pos {
            self.close_current();
        }
    }

    fn close_current(&mut self) {
        if let Some(name) = self.open_elements.pop() {
            self.events.push(Event::ElementClose { name });
        }
    }

    /// Close everything still open and return the finished stream.
    pub fn finish(mut self) -> Vec<Event> {
        if !self.open_elements.is_empty() {
            log::trace!(
                target: "html.events",
                "closing {} element(s) left open at end of input",
                self.open_elements.len()
            );
        }
        while !self.open_elements.is_empty() {
            self.close_current();
        }
        self.events
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
