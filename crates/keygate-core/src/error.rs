//! Error types for the authorizer.

/// Authorizer errors.
///
/// A missing credential or an unknown token is never an error: both are
/// ordinary [`Decision::Unauthorized`](crate::Decision::Unauthorized) outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizerError {
    /// The backing store could not be reached or rejected the lookup.
    #[error("store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The gateway event could not be parsed, or lacks the resource the
    /// configured response format needs.
    #[error("invalid event: {message}")]
    InvalidEvent { message: String },
}

impl From<serde_json::Error> for AuthorizerError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidEvent {
            message: err.to_string(),
        }
    }
}

/// Result type for authorizer operations.
pub type AuthorizerResult<T> = Result<T, AuthorizerError>;
