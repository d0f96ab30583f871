/// Raw token produced by the tokenizer.
///
/// Text and attribute values are kept exactly as written in the source; entity
/// references are not decoded here. Names are ASCII-lowercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Cdata(String),
    Text(String),
}

#[derive(Debug, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Parse event consumed by the minifier.
///
/// Contract for a stream of events:
/// - `DocumentStart` occurs exactly once, first.
/// - Every `ElementOpen` is matched by a later `ElementClose` of the same name and
///   nesting is well formed.
/// - Consecutive `Characters`/`Cdata` events are one logical text run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    DocumentStart,
    ElementOpen {
        name: String,
        attributes: Vec<(String, String)>,
    },
    ElementClose {
        name: String,
    },
    Characters(String),
    Cdata(String),
    Comment(String),
}

impl Event {
    pub fn open(name: &str, attributes: &[(&str, &str)]) -> Self {
        Event::ElementOpen {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn close(name: &str) -> Self {
        Event::ElementClose {
            name: name.to_string(),
        }
    }

    pub fn text(text: &str) -> Self {
        Event::Characters(text.to_string())
    }
}
