//! Static element classification tables.
//!
//! Every table is a sorted slice of canonical (lower-case) names so lookups are a
//! binary search and the data is plain shared constants.

/// Elements that never have content or an end tag.
pub const VOID: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose descendant text keeps its whitespace.
pub const PREFORMATTED: &[&str] = &["pre", "script", "style", "textarea"];

/// Elements whose content is not markup: no entity handling at all.
pub const RAW_TEXT: &[&str] = &["script", "style"];

/// Flow content: whitespace next to these elements can render.
pub const FLOW: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "bdo", "blockquote", "br",
    "button", "canvas", "cite", "code", "command", "datalist", "del", "details", "dfn", "div",
    "dl", "em", "embed", "fieldset", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "i", "iframe", "img", "input", "ins", "kbd", "keygen",
    "label", "link", "map", "mark", "math", "menu", "meta", "meter", "nav", "noscript", "object",
    "ol", "output", "p", "pre", "progress", "q", "ruby", "samp", "script", "section", "select",
    "small", "span", "strong", "style", "sub", "sup", "svg", "table", "textarea", "time", "ul",
    "var", "video", "wbr",
];

/// Block-level elements: whitespace around them is never significant.
pub const BLOCK: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "canvas", "dd", "div", "dl",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hgroup", "hr", "li", "noscript", "ol", "output", "p", "pre", "section", "table",
    "tfoot", "thead", "tr", "ul", "video",
];

/// Elements whose direct whitespace-only text never renders.
pub const DOCUMENT_SKELETON: &[&str] = &["head", "html"];

/// Start tags that end an open paragraph, so a preceding `</p>` is implied.
pub use html::PARAGRAPH_CLOSERS;

/// Parents whose end tag does not imply the end of a child paragraph.
pub const PARAGRAPH_END_BLOCKERS: &[&str] =
    &["a", "audio", "del", "ins", "map", "noscript", "video"];

/// Key of the bucket that applies to every element.
pub const ANY_ELEMENT: &str = "*";

/// Attributes rendered as a bare name, keyed by element (sorted by key).
pub const BOOLEAN_ATTRIBUTES: &[(&str, &[&str])] = &[
    (ANY_ELEMENT, &["autofocus", "hidden", "inert", "itemscope"]),
    ("audio", &["autoplay", "controls", "loop", "muted"]),
    ("button", &["disabled", "formnovalidate"]),
    ("details", &["open"]),
    ("dialog", &["open"]),
    ("fieldset", &["disabled"]),
    ("form", &["novalidate"]),
    ("iframe", &["allowfullscreen"]),
    ("img", &["ismap"]),
    (
        "input",
        &["checked", "disabled", "formnovalidate", "multiple", "readonly", "required"],
    ),
    ("ol", &["reversed"]),
    ("optgroup", &["disabled"]),
    ("option", &["disabled", "selected"]),
    ("script", &["async", "defer", "nomodule"]),
    ("select", &["disabled", "multiple", "required"]),
    ("textarea", &["disabled", "readonly", "required"]),
    ("track", &["default"]),
    ("video", &["autoplay", "controls", "loop", "muted", "playsinline"]),
];

fn contains(table: &[&str], name: &str) -> bool {
    table.binary_search(&name).is_ok()
}

pub fn is_void(name: &str) -> bool {
    contains(VOID, name)
}

pub fn is_preformatted(name: &str) -> bool {
    contains(PREFORMATTED, name)
}

pub fn is_raw_text(name: &str) -> bool {
    contains(RAW_TEXT, name)
}

pub fn is_flow(name: &str) -> bool {
    contains(FLOW, name)
}

pub fn is_block(name: &str) -> bool {
    contains(BLOCK, name)
}

pub fn is_document_skeleton(name: &str) -> bool {
    contains(DOCUMENT_SKELETON, name)
}

/// Whether `attribute` on `element` is written as a bare name.
pub fn is_boolean_attribute(element: &str, attribute: &str) -> bool {
    let in_bucket = |key: &str| {
        BOOLEAN_ATTRIBUTES
            .binary_search_by(|(k, _)| (*k).cmp(key))
            .is_ok_and(|idx| contains(BOOLEAN_ATTRIBUTES[idx].1, attribute))
    };
    in_bucket(ANY_ELEMENT) || in_bucket(element)
}
