use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum AvError {
    /// Invalid construction arguments (empty API key, malformed ticker,
    /// reversed date range). Surfaced before any network activity.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A transport-level failure (DNS, timeout, connection refused).
    /// Not retried by this crate; retry policy belongs to the caller.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned a non-success HTTP status code.
    #[error("unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the API key redacted.
        url: String,
    },

    /// The provider reported an error inside a successful HTTP response
    /// (rate limit note, invalid symbol). The provider's message is
    /// preserved verbatim.
    #[error("provider error: {message}")]
    Api {
        /// The provider's own error or note text.
        message: String,
    },

    /// The response does not match the expected schema: missing key or
    /// field, unparseable number or date. The message names the offending
    /// field and row.
    #[error("data format unexpected or missing field: {0}")]
    Data(String),

    /// A data-dependent view was requested before `fetch()` populated the
    /// table.
    #[error("no data fetched for '{ticker}': call fetch() first")]
    Unfetched {
        /// The ticker the client was constructed for.
        ticker: String,
    },
}
