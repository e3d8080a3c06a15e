//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for soundsite operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when fetching one of the site's data files fails.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Data file does not exist under the source directory.
    #[error("{name} not found at {}", path.display())]
    NotFound { name: String, path: PathBuf },
    /// Reading the local file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The file name could not be joined onto the base URL.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The request could not be completed.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The payload was not the expected JSON shape.
    #[error("failed to parse {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
