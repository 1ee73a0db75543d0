use thiserror::Error;

/// Failure classes at the backend boundary.
///
/// None of these are fatal to a view: they all surface as an inline notice
/// and the next user-triggered fetch is the retry. There is no automatic
/// retry or backoff.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The fetch itself failed: refused connection, DNS, timeout.
    #[error("could not reach the server: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `body` carries the
    /// server's plain-text explanation verbatim (empty if unreadable) so
    /// views can show it to the user.
    #[error("server rejected the request ({status}): {body}")]
    Server {
        status: reqwest::StatusCode,
        body: String,
    },

    /// A 2xx payload that does not fit the data model, for instance a
    /// group record with no status field.
    #[error("could not decode server response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// True for transport-level failures, as opposed to an answer the
    /// server deliberately sent.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// The server's plain-text rejection body, when there is one.
    pub fn server_body(&self) -> Option<&str> {
        match self {
            ApiError::Server { body, .. } => Some(body),
            _ => None,
        }
    }
}
