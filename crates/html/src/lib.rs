//! Parser collaborator for the html5small minifier.
//!
//! `tokenize` splits a document into raw tokens; `parse_events` turns those into
//! the balanced event stream the minifier consumes.

mod events;
mod tokenizer;
mod types;

#[cfg(test)]
mod test_utils;

pub use crate::events::{EventBuilder, PARAGRAPH_CLOSERS, build_events, parse_events};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Event, Token, TokenStream};
