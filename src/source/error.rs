use thiserror::Error;

/// Why a page could not be fetched.
///
/// These never escape the controller as `Err`; they are parked on the cursor
/// that issued the request and reported through
/// [`SessionEvent::FetchFailed`](crate::session::SessionEvent::FetchFailed).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (unreachable host, timeout,
    /// interrupted body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned status {status}: {message}")]
    Server { status: u16, message: String },

    /// The payload did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Short name of the error kind, used in logs and output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Server { .. } => "server",
            FetchError::MalformedResponse(_) => "malformed-response",
        }
    }
}
