use std::path::PathBuf;

use html_test_support::{FixtureFilter, diff_lines, load_fixtures, markup_lines};
use minify::minify;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

#[test]
fn golden_fixtures_minify_to_expected_output() {
    let filter = FixtureFilter::from_env();
    let mut failures = Vec::new();
    let mut ran = 0usize;

    for fixture in load_fixtures(&fixture_dir()) {
        if !filter.matches(&fixture.name) {
            continue;
        }
        ran += 1;
        let actual = match minify(&fixture.input) {
            Ok(actual) => actual,
            Err(err) => {
                failures.push(format!("{} ({}): error: {err}", fixture.name, fixture.description));
                continue;
            }
        };
        if actual != fixture.expected {
            let diff = diff_lines(&markup_lines(&fixture.expected), &markup_lines(&actual));
            failures.push(format!(
                "{} ({}):\nexpected: {:?}\nactual:   {:?}\n{diff}",
                fixture.name, fixture.description, fixture.expected, actual
            ));
        }
    }

    assert!(ran > 0, "fixture filter matched nothing");
    assert!(
        failures.is_empty(),
        "{} fixture(s) failed:\n\n{}",
        failures.len(),
        failures.join("\n\n")
    );
}

#[test]
fn golden_outputs_are_already_minimal() {
    for fixture in load_fixtures(&fixture_dir()) {
        let again = minify(&fixture.expected).unwrap();
        assert_eq!(
            again, fixture.expected,
            "re-minifying {} changed its output",
            fixture.name
        );
    }
}
