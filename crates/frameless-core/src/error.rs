//! Error types for window chrome operations.

use std::fmt::Display;

/// Result type alias for chrome operations.
pub type ChromeResult<T> = Result<T, ChromeError>;

/// Errors that can occur while managing window chrome.
///
/// Looking up a window that is not managed is never an error: interceptors
/// treat it as "pass the event through".
#[derive(Debug, thiserror::Error)]
pub enum ChromeError {
    /// A native windowing call failed.
    #[error("{call} failed: {message}")]
    SystemCall {
        /// Name of the native call.
        call: &'static str,
        /// Platform error text.
        message: String,
    },

    /// The raw window handle belongs to an unsupported windowing system.
    #[error("unsupported window handle: {0}")]
    UnsupportedHandle(String),

    /// An embedder-supplied enum ordinal is out of range.
    #[error("invalid {kind} ordinal: {value}")]
    InvalidOrdinal {
        /// Name of the enum being decoded.
        kind: &'static str,
        /// The rejected ordinal.
        value: i32,
    },

    /// The running window manager does not implement a required protocol.
    #[error("window manager does not support {0}")]
    Unsupported(&'static str),
}

impl ChromeError {
    /// Create a native call failure.
    pub fn system_call(call: &'static str, message: impl Display) -> Self {
        Self::SystemCall {
            call,
            message: message.to_string(),
        }
    }

    /// Name of the failing native call, if this is a native call failure.
    pub fn call(&self) -> Option<&'static str> {
        match self {
            Self::SystemCall { call, .. } => Some(call),
            _ => None,
        }
    }
}
