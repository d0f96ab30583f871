//! Golden fixture loading.
//!
//! A fixture directory holds a `manifest.toml` plus, for every listed fixture
//! `name`, an input file `name.html` and its expected output `name.html.min`.
//! A single trailing newline in the expected file is ignored.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.toml";

/// Restricts a run to fixtures whose name contains the filter string.
pub const FIXTURE_FILTER_ENV: &str = "HTML5SMALL_FIXTURE";

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "fixture", default)]
    fixtures: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    name: String,
    description: String,
}

#[derive(Clone, Debug)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub input: String,
    pub expected: String,
}

#[derive(Clone, Debug, Default)]
pub struct FixtureFilter(Option<String>);

impl FixtureFilter {
    pub fn from_env() -> Self {
        Self(env::var(FIXTURE_FILTER_ENV).ok().filter(|v| !v.is_empty()))
    }

    pub fn matches(&self, name: &str) -> bool {
        self.0.as_deref().is_none_or(|filter| name.contains(filter))
    }
}

/// Load every fixture listed in `dir/manifest.toml`, in manifest order.
///
/// Panics with the offending path on any I/O or manifest error; this is test
/// support code and a broken fixture tree should fail loudly.
pub fn load_fixtures(dir: &Path) -> Vec<Fixture> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let manifest = fs::read_to_string(&manifest_path)
        .unwrap_or_else(|err| panic!("failed to read fixture manifest {manifest_path:?}: {err}"));
    let manifest: Manifest = toml::from_str(&manifest)
        .unwrap_or_else(|err| panic!("invalid fixture manifest {manifest_path:?}: {err}"));
    assert!(
        !manifest.fixtures.is_empty(),
        "fixture manifest {manifest_path:?} lists no fixtures"
    );

    manifest
        .fixtures
        .into_iter()
        .map(|entry| {
            let input_path = dir.join(format!("{}.html", entry.name));
            let expected_path = dir.join(format!("{}.html.min", entry.name));
            let input = fs::read_to_string(&input_path)
                .unwrap_or_else(|err| panic!("failed to read fixture input {input_path:?}: {err}"));
            let expected = fs::read_to_string(&expected_path).unwrap_or_else(|err| {
                panic!("failed to read fixture expectation {expected_path:?}: {err}")
            });
            let expected = expected
                .strip_suffix('\n')
                .map(|s| s.strip_suffix('\r').unwrap_or(s))
                .unwrap_or(&expected)
                .to_string();
            Fixture {
                name: entry.name,
                description: entry.description,
                input,
                expected,
            }
        })
        .collect()
}
