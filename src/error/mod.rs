//! Error types for the voice room kit.

pub mod code;

pub use code::{ErrorCategory, ErrorCode};

use thiserror::Error;

use crate::service::ServiceError;

/// Primary error type for all kit operations.
#[derive(Error, Debug)]
pub enum VoiceRoomError {
    #[error("{0}")]
    NotInitialized(String),

    #[error("{0}")]
    NoRoomContext(String),

    #[error("{0}")]
    MissingLiveRecord(String),

    /// The toolkit reported success but handed back nothing usable.
    #[error("{0}")]
    EmptyResponse(String),

    #[error("Remote error (code {code}): {message}")]
    Remote { code: i32, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoiceRoomError {
    /// Create a remote error carrying the toolkit's code and message.
    pub fn remote(code: i32, message: impl Into<String>) -> Self {
        Self::Remote {
            code,
            message: message.into(),
        }
    }

    /// Classify this error by origin.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotInitialized(_)
            | Self::NoRoomContext(_)
            | Self::MissingLiveRecord(_)
            | Self::EmptyResponse(_) => ErrorCategory::Precondition,
            Self::Remote { .. } => ErrorCategory::Remote,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Integer code handed to callbacks.
    ///
    /// Remote errors keep the external code; everything raised locally maps
    /// to [`ErrorCode::FAILED`].
    pub fn code(&self) -> i32 {
        match self {
            Self::Remote { code, .. } => *code,
            _ => ErrorCode::FAILED,
        }
    }

    /// Human-readable message handed to callbacks.
    pub fn message(&self) -> String {
        match self {
            Self::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ServiceError> for VoiceRoomError {
    fn from(err: ServiceError) -> Self {
        Self::Remote {
            code: err.code,
            message: err.message,
        }
    }
}

#[cfg(feature = "config-file")]
impl From<toml::de::Error> for VoiceRoomError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VoiceRoomError>;
