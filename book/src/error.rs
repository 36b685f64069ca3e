use std::io;
use std::path::PathBuf;

use docblock::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("unknown output format: {0}")]
    UnknownFormat(String),

    #[error("invalid book configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}
