use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Minifier knobs. Every field has a default, so a TOML file may set any subset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MinifyConfig {
    /// Run the optional-tag elision pass.
    pub elide_optional_tags: bool,
    /// Write `name` instead of `name=""` for empty attribute values.
    pub collapse_empty_attributes: bool,
    /// Keep `<body>` when its first child is whitespace, `script` or `style`.
    pub strict_body_omission: bool,
    /// External command used to compress `<style>` contents.
    pub css: Option<CssCommandConfig>,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            elide_optional_tags: true,
            collapse_empty_attributes: true,
            strict_body_omission: false,
            css: None,
        }
    }
}

impl MinifyConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

pub const DEFAULT_CSS_TIMEOUT_MS: u64 = 2_000;

fn default_css_timeout_ms() -> u64 {
    DEFAULT_CSS_TIMEOUT_MS
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CssCommandConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_css_timeout_ms")]
    pub timeout_ms: u64,
}

impl CssCommandConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
