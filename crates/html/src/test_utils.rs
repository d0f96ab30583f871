use crate::{Event, Token, TokenStream};
use html_test_support::escape_text;
use std::fmt::Write;

pub(crate) fn token_snapshot(stream: &TokenStream) -> Vec<String> {
    stream
        .tokens()
        .iter()
        .map(|token| match token {
            Token::Doctype(value) => format!("Doctype({value})"),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let mut line = String::new();
                let _ = write!(&mut line, "StartTag({name}");
                for (attr, value) in attributes {
                    line.push(' ');
                    line.push_str(attr);
                    if let Some(value) = value {
                        let _ = write!(&mut line, "=\"{value}\"");
                    }
                }
                if *self_closing {
                    line.push_str(" /");
                }
                line.push(')');
                line
            }
            Token::EndTag(name) => format!("EndTag({name})"),
            Token::Comment(text) => format!("Comment({text})"),
            Token::Cdata(text) => format!("Cdata({})", escape_text(text)),
            Token::Text(text) => format!("Text({})", escape_text(text)),
        })
        .collect()
}

pub(crate) fn event_snapshot(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| match event {
            Event::DocumentStart => "DocumentStart".to_string(),
            Event::ElementOpen { name, attributes } => {
                let mut line = format!("+{name}");
                for (attr, value) in attributes {
                    let _ = write!(&mut line, " {attr}=\"{value}\"");
                }
                line
            }
            Event::ElementClose { name } => format!("-{name}"),
            Event::Characters(text) => format!("\"{}\"", escape_text(text)),
            Event::Cdata(text) => format!("cdata \"{}\"", escape_text(text)),
            Event::Comment(text) => format!("comment {text}"),
        })
        .collect()
}
