use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, WpError>;

#[derive(Debug, Error)]
pub enum WpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}: {snippet}")]
    Http {
        status: u16,
        url: String,
        snippet: String,
    },

    #[error("Unexpected response shape from {url}: {detail}")]
    Shape { url: String, detail: String },

    #[error(transparent)]
    Parse(#[from] inkwire_common::ParseError),
}

impl From<reqwest::Error> for WpError {
    fn from(err: reqwest::Error) -> Self {
        WpError::Network(err.to_string())
    }
}

/// Truncate a response body for error diagnostics.
pub(crate) fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}
