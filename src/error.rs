use std::io;

/// Errors surfaced by the buffer engine.
///
/// Out-of-range coordinates are not errors; those return `None`/`false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line diff produced an unusable script: {0}")]
    DiffCorrupted(String),
}

impl Error {
    pub(crate) fn pattern(pattern: &str, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
