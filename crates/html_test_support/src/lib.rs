//! Shared helpers for html5small tests: golden fixtures and readable diffs.

use std::fmt::Write;

pub mod fixtures;

pub use fixtures::{Fixture, FixtureFilter, load_fixtures};

/// Escape control characters and quotes so a string fits on one snapshot line.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Split serialized markup into one line per tag or text run.
///
/// Minified documents are a single line; diffing them per tag points at the
/// first divergent tag instead of a byte offset.
pub fn markup_lines(markup: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for ch in markup.chars() {
        if ch == '<' && !current.is_empty() {
            lines.push(escape_text(&current));
            current.clear();
        }
        current.push(ch);
        if ch == '>' {
            lines.push(escape_text(&current));
            current.clear();
        }
    }
    if !current.is_empty() {
        lines.push(escape_text(&current));
    }
    lines
}

/// Describe the first mismatch between two line sequences with a little context.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    fn line(lines: &[String], i: usize) -> &str {
        lines.get(i).map(String::as_str).unwrap_or("<missing>")
    }
    let max = expected.len().max(actual.len());
    let mismatch = (0..max).find(|&i| line(expected, i) != line(actual, i));

    let mut out = String::new();
    if let Some(i) = mismatch {
        let start = i.saturating_sub(2);
        let end = (i + 3).min(max);
        let _ = writeln!(
            &mut out,
            "first mismatch at line {} (showing {}..={}):",
            i + 1,
            start + 1,
            end
        );
        for line_idx in start..end {
            let marker = if line_idx == i { ">" } else { " " };
            let _ = writeln!(
                &mut out,
                "{marker} {:>4}  expected: {}",
                line_idx + 1,
                line(expected, line_idx)
            );
            let _ = writeln!(
                &mut out,
                "{marker} {:>4}    actual: {}",
                line_idx + 1,
                line(actual, line_idx)
            );
        }
    }
    let _ = writeln!(
        &mut out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}
