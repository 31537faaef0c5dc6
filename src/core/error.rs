use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or running a card scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("malformed reference stencil: {0}")]
    Stencil(String),

    #[error("invalid card format: {0}")]
    InvalidFormat(String),

    #[error("failed to decode image {}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid card format record {}", path.display())]
    FormatRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid deck record")]
    Record(#[from] serde_json::Error),

    #[error("unknown format preset '{0}'")]
    UnknownPreset(String),

    #[error("card index {index} out of range (deck has {len} cards)")]
    CardIndex { index: usize, len: usize },
}
