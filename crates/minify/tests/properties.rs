use minify::classify::{ANY_ELEMENT, BOOLEAN_ATTRIBUTES, PARAGRAPH_CLOSERS, VOID};
use minify::{Minifier, MinifyConfig, minify};

const CORPUS: &[&str] = &[
    "<html><head></head><body><p>Hello   \n\tworld</p></body></html>",
    "<ul><li>One</li><li>Two</li></ul>",
    "<ul><li>a <b>b</b> <i>c</i></li>\n<li>d</li></ul>",
    "<div>\n  <p>para one\n  <p>para two\n  <pre>  keep\n   this </pre>\n</div>",
    "<table><caption>c</caption><colgroup><col><col span=2></colgroup>\
     <thead><tr><th>h</th></tr></thead><tbody><tr><td>1</td></tr></tbody>\
     <tfoot><tr><td>f</td></tr></tfoot></table>",
    "<select><optgroup label=a><option value=1>one</option><option selected>two</option></optgroup></select>",
    "<ruby>漢<rp>(</rp><rt>kan</rt><rp>)</rp></ruby>",
    "<dl><dt>a</dt><dd>b</dd></dl><p>x</p><hr><p>y</p>",
    "<p>a<!-- c --> b <!--[if IE 8]>ie<![endif]--> c</p>",
    "<textarea>  raw &amp; text\n</textarea><script>if (a<b) {}</script><style>a>b{}</style>",
    "<svg viewBox='0 0 1 1'><circle r=1/></svg><math><mi>x</mi></math>",
    "<p>&lt;b&gt; &amp;amp; &nbsp; &eacute;</p>",
    "<a href='x?a=1&amp;b=2' title=\"it's\">link</a> tail",
    "<body>\n<script>x()</script>\n<p>after</p>\n</body>",
    "<html><body><span>a</span> <span>b</span></body></html>",
    "<span>a</span> <span>b</span>",
    "Hello <em>there</em> world\n<a href=/x>more</a>",
    "<head><title>t</title>\n<meta charset=utf-8>\n</head>\n<body><b>x</b> <i>y</i></body>",
    "<p>a<b> bold</b></p>",
    "<li><a>\n  link </a>\n<li><button> ok </button>",
];

fn assert_idempotent(input: &str) {
    let once = minify(input).unwrap();
    let twice = minify(&once).unwrap();
    assert_eq!(twice, once, "not idempotent for input {input:?}");
}

#[test]
fn minified_output_is_a_fixed_point() {
    for input in CORPUS {
        assert_idempotent(input);
    }
}

#[test]
fn omitted_body_keeps_inline_spacing() {
    let with_body = minify("<html><body><span>a</span> <span>b</span></body></html>").unwrap();
    let without_body = minify("<span>a</span> <span>b</span>").unwrap();
    assert_eq!(with_body, "<!doctype html><span>a</span> <span>b</span>");
    assert_eq!(without_body, with_body);
}

#[test]
fn inline_start_tag_keeps_leading_space() {
    assert_eq!(
        minify("<p>a<b> bold</b></p>").unwrap(),
        "<!doctype html><p>a<b> bold</b>"
    );
}

#[test]
fn output_starts_with_doctype_and_is_trimmed() {
    for input in CORPUS {
        let out = minify(input).unwrap();
        assert!(out.starts_with("<!doctype html>"), "{out:?}");
        assert_eq!(out.trim(), out);
    }
}

#[test]
fn void_elements_never_get_end_tags() {
    for name in VOID {
        let input = format!("<div>a<{name}></{name}>b<{name}/>c</div>");
        let out = minify(&input).unwrap();
        assert!(!out.contains(&format!("</{name}>")), "{name}: {out:?}");
        assert!(out.contains(&format!("<{name}>")), "{name}: {out:?}");
    }
}

#[test]
fn every_paragraph_closer_implies_the_paragraph_end() {
    for name in PARAGRAPH_CLOSERS {
        let input = format!("<p>a</p><{name}>b</{name}>");
        let out = minify(&input).unwrap();
        assert!(!out.contains("</p>"), "{name}: {out:?}");
        assert_idempotent(&input);
    }
}

#[test]
fn preformatted_whitespace_is_preserved() {
    let body = "  two spaces\n\ttab\n\n  ";
    for tag in ["pre", "textarea"] {
        let out = minify(&format!("<div><{tag}>{body}</{tag}></div>")).unwrap();
        assert!(out.contains(&format!("<{tag}>{body}</{tag}>")), "{tag}: {out:?}");
    }
}

#[test]
fn attributes_are_emitted_in_name_order() {
    let out = minify(r#"<p b="2" a="1" c="3">x</p>"#).unwrap();
    assert_eq!(out, "<!doctype html><p a=1 b=2 c=3>x");
}

#[test]
fn boolean_attributes_are_bare_names() {
    for (element, attributes) in BOOLEAN_ATTRIBUTES {
        let element = if *element == ANY_ELEMENT { "div" } else { *element };
        for attribute in *attributes {
            let out = minify(&format!("<{element} {attribute}=\"{attribute}\"></{element}>")).unwrap();
            assert!(
                out.contains(&format!("<{element} {attribute}>")),
                "{element} {attribute}: {out:?}"
            );
        }
    }
}

#[test]
fn escaped_markup_stays_escaped() {
    let out = minify("<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>").unwrap();
    assert!(!out.contains("<script>"), "{out:?}");
    assert!(out.contains("&lt;script&gt;"), "{out:?}");

    let out = minify("<p title='&lt;b&gt;'>x</p>").unwrap();
    assert!(out.contains("title=&lt;b&gt;>"), "{out:?}");
}

#[test]
fn conditional_comments_survive_and_others_do_not() {
    let out = minify("<p>a<!--[if lt IE 9]>old<![endif]--><!-- plain note -->b</p>").unwrap();
    assert!(out.contains("<!--[if lt IE 9]>old<![endif]-->"), "{out:?}");
    assert!(!out.contains("plain note"), "{out:?}");
}

#[test]
fn strict_body_keeps_body_before_leading_script() {
    let strict = Minifier::new(MinifyConfig {
        strict_body_omission: true,
        ..MinifyConfig::default()
    });
    let out = strict.minify("<html><body><script>x()</script></body></html>").unwrap();
    assert_eq!(out, "<!doctype html><body><script>x()</script>");
}
