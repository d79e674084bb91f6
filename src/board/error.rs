use std::fmt;

/// Failures the board surfaces to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// A form failed the client-side checks; nothing was sent.
    Form(String),
    /// The server answered with an error status and message.
    Api { status: u16, message: String },
    /// The request never produced a response.
    Transport(String),
    /// The response could not be decoded.
    Decode(String),
}

impl ClientError {
    /// Text suitable for an inline error or alert.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Form(msg)
            | ClientError::Api { message: msg, .. }
            | ClientError::Transport(msg)
            | ClientError::Decode(msg) => msg,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Form(msg) => write!(f, "{}", msg),
            ClientError::Api { status, message } => write!(f, "{} (HTTP {})", message, status),
            ClientError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ClientError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(error.to_string())
        } else {
            ClientError::Transport(error.to_string())
        }
    }
}
