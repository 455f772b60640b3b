//! Failure taxonomy for panel saves and tracked actions.

/// Coarse class of an [`ActionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Rejected locally before any request was sent
    LocalPrecondition,
    /// Request did not complete or returned a non-success status
    Transport,
    /// Request completed but the body reported `success: false`
    Application,
    /// Body was not the expected JSON shape
    Malformed,
}

/// Error type for every user-triggered round trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("No input ID found")]
    MissingEntityId,

    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    /// Non-success status whose body still carried an `error` string.
    #[error("{message}")]
    ServerRejected { status: u16, message: String },

    #[error("{0}")]
    Application(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Response is missing `{0}`")]
    MissingField(&'static str),
}

/// Fallback reason when the backend reports failure without explaining it.
pub const UNKNOWN_FAILURE: &str = "Unknown error occurred";

impl ActionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingEntityId => ErrorClass::LocalPrecondition,
            Self::Network(_) | Self::HttpStatus { .. } | Self::ServerRejected { .. } => {
                ErrorClass::Transport
            }
            Self::Application(_) => ErrorClass::Application,
            Self::MalformedResponse(_) | Self::MissingField(_) => ErrorClass::Malformed,
        }
    }

    pub fn application(reason: Option<String>) -> Self {
        match reason {
            Some(reason) if !reason.trim().is_empty() => Self::Application(reason),
            _ => Self::Application(UNKNOWN_FAILURE.to_string()),
        }
    }

    /// Text for the blocking notification, e.g. `Error saving changes: ...`.
    pub fn notification(&self, context: &str) -> String {
        format!("{context}: {self}")
    }
}
