//! HTML5 minifier: canonical serialization followed by optional-tag elision.

pub mod classify;
pub mod config;
pub mod css;
pub mod error;
pub mod optional_tags;
pub mod serializer;
pub mod text;

use std::fmt;

use html::Event;

pub use config::{CssCommandConfig, MinifyConfig};
pub use css::{CssCompressor, ExternalCompressor};
pub use error::{ConfigError, CssError, MinifyError};
pub use optional_tags::{ElisionOptions, elide, elide_with};
pub use serializer::{Serializer, SerializerOptions};

/// Reusable minifier. Holds configuration only; every call starts from fresh state.
pub struct Minifier {
    config: MinifyConfig,
    css: Option<Box<dyn CssCompressor>>,
}

impl Minifier {
    /// Build a minifier; a `[css]` section in `config` installs an [`ExternalCompressor`].
    pub fn new(config: MinifyConfig) -> Self {
        let css = config
            .css
            .as_ref()
            .map(|css| Box::new(ExternalCompressor::from_config(css)) as Box<dyn CssCompressor>);
        Self { config, css }
    }

    pub fn with_css_compressor(mut self, css: Box<dyn CssCompressor>) -> Self {
        self.css = Some(css);
        self
    }

    pub fn config(&self) -> &MinifyConfig {
        &self.config
    }

    pub fn minify(&self, html: &str) -> Result<String, MinifyError> {
        let events = html::parse_events(html);
        let out = self.minify_events(&events)?;
        log::debug!(
            target: "minify",
            "minified {} bytes to {} bytes ({} events)",
            html.len(),
            out.len(),
            events.len()
        );
        Ok(out)
    }

    /// Minify an event stream from another producer. It must honor the [`Event`] contract.
    pub fn minify_events(&self, events: &[Event]) -> Result<String, MinifyError> {
        let mut serializer = Serializer::with_options(SerializerOptions {
            collapse_empty_attributes: self.config.collapse_empty_attributes,
        });
        if let Some(css) = self.css.as_deref() {
            serializer = serializer.with_css_compressor(css);
        }
        for event in events {
            serializer.push_event(event)?;
        }
        let serialized = serializer.finish()?;
        if !self.config.elide_optional_tags {
            return Ok(serialized);
        }
        let elided = optional_tags::elide_with(
            &serialized,
            ElisionOptions {
                strict_body_omission: self.config.strict_body_omission,
            },
        );
        Ok(elided.trim_matches(text::is_html_whitespace).to_string())
    }
}

impl Default for Minifier {
    fn default() -> Self {
        Self::new(MinifyConfig::default())
    }
}

impl fmt::Debug for Minifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minifier")
            .field("config", &self.config)
            .field("css", &self.css.is_some())
            .finish()
    }
}

/// Minify `html` with the default configuration.
pub fn minify(html: &str) -> Result<String, MinifyError> {
    Minifier::default().minify(html)
}
