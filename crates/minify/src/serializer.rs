//! Event-driven canonical serializer.
//!
//! Consumes a balanced event stream and writes the canonical form: lower-case
//! names, sorted attributes with minimal quoting, collapsed whitespace and only
//! conditional comments. Text is buffered until the next structural event so each
//! run is normalized once, with its full context known.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use html::Event;
use regex::Regex;

use crate::classify;
use crate::css::CssCompressor;
use crate::error::MinifyError;
use crate::text::{self, Tail, TextContext, is_html_whitespace};

pub const DOCTYPE: &str = "<!doctype html>";

static CONDITIONAL_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[if\s[^\]]*\bie\b[^\]]*\]|^\s*<!\[endif\]\s*$")
        .expect("conditional comment pattern is valid")
});

/// Whether a comment body is an Internet Explorer conditional comment.
pub fn is_conditional_comment(text: &str) -> bool {
    CONDITIONAL_COMMENT.is_match(text)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerializerOptions {
    pub collapse_empty_attributes: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            collapse_empty_attributes: true,
        }
    }
}

pub struct Serializer<'a> {
    out: String,
    pending: String,
    stack: Vec<String>,
    tail: Tail,
    started: bool,
    options: SerializerOptions,
    css: Option<&'a dyn CssCompressor>,
}

impl<'a> Serializer<'a> {
    pub fn new() -> Self {
        Self::with_options(SerializerOptions::default())
    }

    pub fn with_options(options: SerializerOptions) -> Self {
        Self {
            out: String::new(),
            pending: String::new(),
            stack: Vec::new(),
            tail: Tail::Doctype,
            started: false,
            options,
            css: None,
        }
    }

    pub fn with_css_compressor(mut self, css: &'a dyn CssCompressor) -> Self {
        self.css = Some(css);
        self
    }

    pub fn push_event(&mut self, event: &Event) -> Result<(), MinifyError> {
        match event {
            Event::DocumentStart => self.start_document(),
            Event::ElementOpen { name, attributes } => self.open_element(name, attributes),
            Event::ElementClose { name } => self.close_element(name),
            Event::Characters(text) => self.characters(text),
            Event::Cdata(text) => self.cdata(text),
            Event::Comment(text) => self.comment(text),
        }
    }

    pub fn start_document(&mut self) -> Result<(), MinifyError> {
        if self.started {
            return Err(MinifyError::DuplicateDocumentStart);
        }
        self.started = true;
        self.out.push_str(DOCTYPE);
        self.tail = Tail::Doctype;
        Ok(())
    }

    pub fn open_element(
        &mut self,
        name: &str,
        attributes: &[(String, String)],
    ) -> Result<(), MinifyError> {
        self.ensure_started()?;
        if name.is_empty() {
            return Err(MinifyError::EmptyElementName);
        }
        self.flush_text();
        let name = name.to_ascii_lowercase();
        if classify::is_block(&name) && !self.in_preformatted() {
            self.trim_trailing_whitespace();
        }
        self.out.push('<');
        self.out.push_str(&name);
        self.write_attributes(&name, attributes);
        self.out.push('>');
        log::trace!(target: "minify.serializer", "open <{name}> depth={}", self.stack.len());
        self.stack.push(name.clone());
        self.tail = Tail::StartTag(name);
        Ok(())
    }

    pub fn close_element(&mut self, name: &str) -> Result<(), MinifyError> {
        self.ensure_started()?;
        let name = name.to_ascii_lowercase();
        match self.stack.last() {
            None => return Err(MinifyError::CloseWithoutOpen { name }),
            Some(current) if *current != name => {
                return Err(MinifyError::MismatchedClose {
                    expected: current.clone(),
                    found: name,
                });
            }
            Some(_) => {}
        }
        if name == "style" {
            self.compress_pending_css();
        }
        self.flush_text();
        if classify::is_block(&name) && !self.in_preformatted() {
            self.trim_trailing_whitespace();
        }
        self.stack.pop();
        if !classify::is_void(&name) {
            self.out.push_str("</");
            self.out.push_str(&name);
            self.out.push('>');
        }
        log::trace!(target: "minify.serializer", "close </{name}> depth={}", self.stack.len());
        self.tail = Tail::EndTag(name);
        Ok(())
    }

    pub fn characters(&mut self, text: &str) -> Result<(), MinifyError> {
        self.ensure_started()?;
        self.pending.push_str(text);
        Ok(())
    }

    pub fn cdata(&mut self, text: &str) -> Result<(), MinifyError> {
        self.characters(text)
    }

    pub fn comment(&mut self, text: &str) -> Result<(), MinifyError> {
        self.ensure_started()?;
        self.flush_text();
        if is_conditional_comment(text) {
            self.out.push_str("<!--");
            self.out.push_str(text);
            self.out.push_str("-->");
            self.tail = Tail::Comment;
        } else {
            log::trace!(target: "minify.serializer", "dropping comment ({} bytes)", text.len());
        }
        Ok(())
    }

    /// Flush remaining text and return the trimmed document.
    pub fn finish(mut self) -> Result<String, MinifyError> {
        self.ensure_started()?;
        self.flush_text();
        if let Some(innermost) = self.stack.last() {
            return Err(MinifyError::UnclosedElements {
                count: self.stack.len(),
                innermost: innermost.clone(),
            });
        }
        Ok(self.out.trim_matches(is_html_whitespace).to_string())
    }

    fn ensure_started(&self) -> Result<(), MinifyError> {
        if self.started {
            Ok(())
        } else {
            Err(MinifyError::NotStarted)
        }
    }

    fn in_preformatted(&self) -> bool {
        self.stack.iter().any(|name| classify::is_preformatted(name))
    }

    fn flush_text(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let raw = std::mem::take(&mut self.pending);
        let normalized = text::normalize(&raw, &TextContext::new(&self.stack, &self.tail));
        if normalized.is_empty() {
            return;
        }
        self.out.push_str(&normalized);
        self.tail = Tail::Text {
            ends_with_space: normalized.ends_with(is_html_whitespace),
        };
    }

    fn trim_trailing_whitespace(&mut self) {
        let len = self.out.trim_end_matches(is_html_whitespace).len();
        if len == self.out.len() {
            return;
        }
        self.out.truncate(len);
        if let Tail::Text { ends_with_space } = &mut self.tail {
            *ends_with_space = false;
        }
    }

    /// Sorted by name; a repeated name keeps its last value.
    fn write_attributes(&mut self, element: &str, attributes: &[(String, String)]) {
        let attributes: BTreeMap<String, &str> = attributes
            .iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.to_ascii_lowercase(), value.as_str()))
            .collect();
        for (name, value) in &attributes {
            self.out.push(' ');
            self.out.push_str(name);
            if classify::is_boolean_attribute(element, name) {
                continue;
            }
            let value = text::normalize_attribute_value(value);
            if value.is_empty() && self.options.collapse_empty_attributes {
                continue;
            }
            self.out.push('=');
            if text::value_needs_quoting(&value) {
                self.out.push('"');
                self.out.push_str(&value);
                self.out.push('"');
            } else {
                self.out.push_str(&value);
            }
        }
    }

    fn compress_pending_css(&mut self) {
        let Some(css) = self.css else {
            return;
        };
        if self.pending.trim_matches(is_html_whitespace).is_empty() {
            return;
        }
        match css.compress(&self.pending) {
            Ok(compressed) => {
                log::trace!(
                    target: "minify.css",
                    "style compressed {} -> {} bytes",
                    self.pending.len(),
                    compressed.len()
                );
                self.pending = compressed.trim_matches(is_html_whitespace).to_string();
            }
            Err(err) => {
                log::warn!(target: "minify.css", "keeping original <style> text: {err}");
            }
        }
    }
}

impl Default for Serializer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
