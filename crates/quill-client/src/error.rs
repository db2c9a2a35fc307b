use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered 401: the session is gone or was never valid.
    #[error("unauthorized")]
    Unauthorized,

    #[error("request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("not signed in")]
    MissingSession,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[cfg(feature = "remote")]
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Whether the caller should drop its session and send the user to login.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::MissingSession)
    }
}
