use thiserror::Error;

/// Failures retrieving the upstream fraud feed.
///
/// Row-level problems are not errors: malformed or short rows degrade to
/// empty field values during parsing, so a refresh either fails wholesale
/// (here) or succeeds with every parseable row.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed host returned status {status}")]
    Status { status: u16 },
}
