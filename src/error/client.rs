use thiserror::Error as ThisError;

/// Failures talking to the hosted backend. Propagated to the calling UI
/// layer untouched; no retries happen at this level.
#[derive(Debug, ThisError)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status and (possibly) its
    /// structured error body.
    #[error("backend rejected the request ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}
