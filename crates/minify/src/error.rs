use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

/// The event stream broke its contract. Fatal for the document being minified.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MinifyError {
    #[error("event received before document start")]
    NotStarted,
    #[error("document start received twice")]
    DuplicateDocumentStart,
    #[error("element open with an empty name")]
    EmptyElementName,
    #[error("close of </{name}> with no element open")]
    CloseWithoutOpen { name: String },
    #[error("close of </{found}> while <{expected}> is the innermost open element")]
    MismatchedClose { expected: String, found: String },
    #[error("document ended with {count} open element(s), innermost <{innermost}>")]
    UnclosedElements { count: usize, innermost: String },
}

/// The external CSS compressor could not produce output. Always recoverable.
#[derive(Debug, thiserror::Error)]
pub enum CssError {
    #[error("CSS compressor `{program}` not found")]
    NotFound { program: String },
    #[error("failed to start CSS compressor `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while talking to CSS compressor `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("CSS compressor `{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("CSS compressor `{program}` failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("CSS compressor `{program}` produced output that is not UTF-8")]
    InvalidUtf8 { program: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
