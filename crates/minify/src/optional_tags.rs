//! Optional start/end tag removal over serialized markup.
//!
//! Each rule names one tag (optionally followed by one whitespace character) and the
//! context that makes dropping it legal. Rules run in table order, one full pass
//! each; later rules see the output of earlier ones. The engine works on flat text
//! and can misfire on `pre`/`script` content that spells a tag.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::classify;

/// Optional single whitespace character after a removed tag.
const TRAILING_SPACE: &str = r"[\t\n\x0C\r ]?";

/// Text that may immediately follow a removable tag.
#[derive(Clone, Copy, Debug)]
enum Follow {
    /// Starts with any of these literals.
    Prefix(&'static [&'static str]),
    /// A start tag for any of these element names.
    StartTag(&'static [&'static str]),
    /// An end tag for any element not listed.
    EndTagExcept(&'static [&'static str]),
    EndOfInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BodyPolicy {
    Any,
    Lenient,
    Strict,
}

#[derive(Clone, Copy, Debug)]
enum Target {
    Tag(&'static str),
    VoidEndTags,
}

#[derive(Clone, Copy, Debug)]
struct RuleSpec {
    name: &'static str,
    target: Target,
    trailing_space: bool,
    preceded_by: &'static [&'static str],
    not_preceded_by: &'static [&'static str],
    followed_by: &'static [Follow],
    not_followed_by: &'static [&'static str],
    policy: BodyPolicy,
}

impl RuleSpec {
    const fn new(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            target: Target::Tag(tag),
            trailing_space: true,
            preceded_by: &[],
            not_preceded_by: &[],
            followed_by: &[],
            not_followed_by: &[],
            policy: BodyPolicy::Any,
        }
    }

    const fn exact(mut self) -> Self {
        self.trailing_space = false;
        self
    }

    const fn followed_by(mut self, follow: &'static [Follow]) -> Self {
        self.followed_by = follow;
        self
    }

    const fn preceded_by(mut self, prefixes: &'static [&'static str]) -> Self {
        self.preceded_by = prefixes;
        self
    }

    const fn not_preceded_by(mut self, prefixes: &'static [&'static str]) -> Self {
        self.not_preceded_by = prefixes;
        self
    }

    const fn not_followed_by(mut self, prefixes: &'static [&'static str]) -> Self {
        self.not_followed_by = prefixes;
        self
    }

    const fn policy(mut self, policy: BodyPolicy) -> Self {
        self.policy = policy;
        self
    }
}

const ANY_END_TAG: Follow = Follow::Prefix(&["</"]);

const RULES: &[RuleSpec] = &[
    // Document skeleton.
    RuleSpec::new("html-start", "<html>").exact(),
    RuleSpec::new("html-end", "</html>").exact(),
    RuleSpec::new("head-start", "<head>").exact(),
    RuleSpec::new("head-end", "</head>").exact(),
    RuleSpec::new("body-start", "<body>")
        .exact()
        .policy(BodyPolicy::Lenient),
    RuleSpec::new("body-start-strict", "<body>")
        .exact()
        .not_followed_by(&[" ", "\t", "\n", "\r", "\x0C", "<script", "<style"])
        .policy(BodyPolicy::Strict),
    RuleSpec::new("body-end", "</body>").exact(),
    // Lists.
    RuleSpec::new("li-end", "</li>").followed_by(&[Follow::Prefix(&[
        "<li", "</ul", "</ol", "</menu",
    ])]),
    RuleSpec::new("dt-end", "</dt>").followed_by(&[Follow::Prefix(&["<dt", "<dd"])]),
    RuleSpec::new("dd-end", "</dd>").followed_by(&[Follow::Prefix(&["<dd", "<dt", "</dl"])]),
    // Paragraphs.
    RuleSpec::new("p-end-before-block", "</p>")
        .followed_by(&[Follow::StartTag(classify::PARAGRAPH_CLOSERS)]),
    RuleSpec::new("p-end-at-end", "</p>").followed_by(&[Follow::EndOfInput]),
    RuleSpec::new("p-end-before-parent-end", "</p>")
        .followed_by(&[Follow::EndTagExcept(classify::PARAGRAPH_END_BLOCKERS)]),
    // Ruby annotations.
    RuleSpec::new("rt-end", "</rt>").followed_by(&[Follow::Prefix(&["<rt", "<rp", "</"])]),
    RuleSpec::new("rp-end", "</rp>").followed_by(&[Follow::Prefix(&["<rt", "<rp", "</"])]),
    // Select options.
    RuleSpec::new("optgroup-end", "</optgroup>")
        .followed_by(&[Follow::Prefix(&["<optgroup", "</"])]),
    RuleSpec::new("option-end", "</option>")
        .followed_by(&[Follow::Prefix(&["<option", "<optgroup", "</"])]),
    // Tables.
    RuleSpec::new("colgroup-start", "<colgroup>")
        .not_preceded_by(&["</colgroup>"])
        .followed_by(&[Follow::StartTag(&["col"])]),
    RuleSpec::new("colgroup-end", "</colgroup>"),
    RuleSpec::new("thead-end", "</thead>").followed_by(&[Follow::Prefix(&["<tbody", "<tfoot"])]),
    RuleSpec::new("tbody-start", "<tbody>")
        .preceded_by(&["</thead>", "</tbody>", "</tfoot>"])
        .followed_by(&[Follow::Prefix(&["<tr"])]),
    RuleSpec::new("tbody-end", "</tbody>")
        .followed_by(&[Follow::Prefix(&["<tbody", "<tfoot"]), ANY_END_TAG]),
    RuleSpec::new("tfoot-end", "</tfoot>")
        .followed_by(&[Follow::Prefix(&["<tbody"]), ANY_END_TAG]),
    RuleSpec::new("tr-end", "</tr>").followed_by(&[Follow::Prefix(&["<tr"]), ANY_END_TAG]),
    RuleSpec::new("tr-end-before-section", "</tr>")
        .followed_by(&[Follow::Prefix(&["<tbody", "<tfoot", "<thead"])]),
    RuleSpec::new("td-end", "</td>")
        .followed_by(&[Follow::Prefix(&["<td", "<th", "<tr"]), ANY_END_TAG]),
    RuleSpec::new("th-end", "</th>")
        .followed_by(&[Follow::Prefix(&["<td", "<th", "<tr"]), ANY_END_TAG]),
    RuleSpec::new("td-end-before-section", "</td>")
        .followed_by(&[Follow::Prefix(&["<tbody", "<tfoot"])]),
    RuleSpec::new("th-end-before-section", "</th>")
        .followed_by(&[Follow::Prefix(&["<tbody", "<tfoot"])]),
    // Void elements never have end tags.
    RuleSpec {
        target: Target::VoidEndTags,
        ..RuleSpec::new("void-end", "")
    },
];

struct Rule {
    spec: RuleSpec,
    regex: Regex,
}

impl Rule {
    fn compile(spec: RuleSpec) -> Result<Self, regex::Error> {
        let tag = match spec.target {
            Target::Tag(tag) => regex::escape(tag),
            Target::VoidEndTags => format!("</(?:{})>", classify::VOID.join("|")),
        };
        let pattern = if spec.trailing_space {
            format!("{tag}{TRAILING_SPACE}")
        } else {
            tag
        };
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self { spec, regex })
    }

    fn context_allows(&self, before: &str, after: &str) -> bool {
        let spec = &self.spec;
        (spec.preceded_by.is_empty() || spec.preceded_by.iter().any(|p| ends_with_ci(before, p)))
            && !spec.not_preceded_by.iter().any(|p| ends_with_ci(before, p))
            && !spec.not_followed_by.iter().any(|p| starts_with_ci(after, p))
            && (spec.followed_by.is_empty() || spec.followed_by.iter().any(|f| f.matches(after)))
    }

    fn apply<'t>(&self, html: &'t str) -> Cow<'t, str> {
        let mut out = String::new();
        let mut last = 0;
        let mut removed = 0usize;
        for m in self.regex.find_iter(html) {
            if !self.context_allows(&html[..m.start()], &html[m.end()..]) {
                continue;
            }
            out.push_str(&html[last..m.start()]);
            last = m.end();
            removed += 1;
        }
        if removed == 0 {
            return Cow::Borrowed(html);
        }
        out.push_str(&html[last..]);
        log::trace!(target: "minify.elide", "{}: removed {removed}", self.spec.name);
        Cow::Owned(out)
    }
}

impl Follow {
    fn matches(self, after: &str) -> bool {
        match self {
            Follow::Prefix(prefixes) => prefixes.iter().any(|p| starts_with_ci(after, p)),
            Follow::StartTag(names) => {
                let Some(rest) = after.strip_prefix('<') else {
                    return false;
                };
                let name = tag_name(rest);
                name.len() < rest.len()
                    && !name.is_empty()
                    && names.iter().any(|n| n.eq_ignore_ascii_case(name))
            }
            Follow::EndTagExcept(names) => {
                let Some(rest) = after.strip_prefix("</") else {
                    return false;
                };
                let name = tag_name(rest);
                !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(name))
            }
            Follow::EndOfInput => after.is_empty(),
        }
    }
}

fn tag_name(s: &str) -> &str {
    let end = s
        .bytes()
        .position(|b| !(b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')))
        .unwrap_or(s.len());
    &s[..end]
}

fn starts_with_ci(haystack: &str, prefix: &str) -> bool {
    haystack
        .as_bytes()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
}

fn ends_with_ci(haystack: &str, suffix: &str) -> bool {
    haystack
        .len()
        .checked_sub(suffix.len())
        .and_then(|start| haystack.as_bytes().get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix.as_bytes()))
}

static COMPILED: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|spec| Rule::compile(*spec).expect("optional tag patterns are built from literals"))
        .collect()
});

/// How the elision pass treats document-level tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ElisionOptions {
    /// Keep `<body>` when the body starts with whitespace, `script` or `style`.
    pub strict_body_omission: bool,
}

/// Remove optional tags with the default options.
pub fn elide(serialized: &str) -> String {
    elide_with(serialized, ElisionOptions::default())
}

pub fn elide_with(serialized: &str, options: ElisionOptions) -> String {
    let mut html = serialized.to_string();
    for rule in COMPILED.iter() {
        let applies = match rule.spec.policy {
            BodyPolicy::Any => true,
            BodyPolicy::Lenient => !options.strict_body_omission,
            BodyPolicy::Strict => options.strict_body_omission,
        };
        if !applies {
            continue;
        }
        if let Cow::Owned(next) = rule.apply(&html) {
            html = next;
        }
    }
    html
}
