use html::{Event, parse_events};

const INPUTS: &[&str] = &[
    "",
    "plain text",
    "<!DOCTYPE html><html><head><title>t</title></head><body><p>x</body></html>",
    "<p>one<p>two<div>three</p></div>",
    "<ul><li>a<li>b<ol><li>c</ul>",
    "<table><tr><td>1<td>2<tr><td>3</table>",
    "<select><optgroup><option>a<option>b<optgroup><option>c</select>",
    "<dl><dt>a<dd>b<dt>c</dl>",
    "</stray><br></br><div><span></div></span>",
    "<svg><g><path d=M0/></g></svg><math><mi/></math>",
    "<script>if (a </ b) {}</script><style>p{}</style><textarea><b></textarea>",
    "<!-- c --><![CDATA[x]]><?pi?><!bogus>",
    "<a href=x <b>weird</b>",
    "<div><div><div>unclosed",
    "a < b > c <1> </ >",
];

/// Check the contract every consumer relies on: one leading document start,
/// balanced and properly nested open/close pairs, nothing left open.
fn assert_balanced(input: &str, events: &[Event]) {
    assert_eq!(events.first(), Some(&Event::DocumentStart), "{input:?}");
    let mut stack: Vec<&str> = Vec::new();
    for event in &events[1..] {
        match event {
            Event::DocumentStart => panic!("second DocumentStart for {input:?}"),
            Event::ElementOpen { name, .. } => {
                assert!(!name.is_empty(), "empty element name for {input:?}");
                assert_eq!(name.to_ascii_lowercase(), *name, "{input:?}");
                stack.push(name);
            }
            Event::ElementClose { name } => {
                assert_eq!(stack.pop(), Some(name.as_str()), "unbalanced close in {input:?}");
            }
            Event::Characters(text) => assert!(!text.is_empty(), "{input:?}"),
            Event::Cdata(_) | Event::Comment(_) => {}
        }
    }
    assert!(stack.is_empty(), "{input:?} left {stack:?} open");
}

#[test]
fn event_streams_are_balanced() {
    for input in INPUTS {
        assert_balanced(input, &parse_events(input));
    }
}

#[test]
fn event_streams_are_balanced_for_every_prefix() {
    let doc = INPUTS.concat();
    for end in (0..=doc.len()).filter(|&i| doc.is_char_boundary(i)) {
        let prefix = &doc[..end];
        assert_balanced(prefix, &parse_events(prefix));
    }
}

#[test]
fn attribute_values_are_delivered_raw() {
    let events = parse_events("<a title='&amp;lt;' href=\"?a=1&amp;b=2\">x</a>");
    assert_eq!(
        events[1],
        Event::open("a", &[("title", "&amp;lt;"), ("href", "?a=1&amp;b=2")])
    );
}
