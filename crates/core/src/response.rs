//! Response returned to the host for one invocation.
//!
//! Every call produces exactly one response: a success payload (possibly
//! empty) or a failure message. There is no partial success.

use serde::{Deserialize, Serialize};

use crate::error::InvocationError;

/// Outcome of one invocation as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// The call succeeded
    Success {
        /// Converted return value, empty if none was declared
        payload: String,
    },
    /// The call failed
    Failure {
        /// Error message, verbatim from the failing component
        message: String,
    },
}

impl Response {
    /// Status code reported for a successful call
    pub const OK: u16 = 200;

    /// Status code reported for a failed call
    pub const ERROR: u16 = 500;

    /// Create a success response
    pub fn success(payload: impl Into<String>) -> Self {
        Response::Success {
            payload: payload.into(),
        }
    }

    /// Create a failure response
    pub fn failure(message: impl Into<String>) -> Self {
        Response::Failure {
            message: message.into(),
        }
    }

    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    /// Host status code: 200 for success, 500 for failure
    pub fn status(&self) -> u16 {
        match self {
            Response::Success { .. } => Self::OK,
            Response::Failure { .. } => Self::ERROR,
        }
    }

    /// Success payload, if this is a success
    pub fn payload(&self) -> Option<&str> {
        match self {
            Response::Success { payload } => Some(payload),
            Response::Failure { .. } => None,
        }
    }

    /// Failure message, if this is a failure
    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success { .. } => None,
            Response::Failure { message } => Some(message),
        }
    }
}

impl From<Result<String, InvocationError>> for Response {
    fn from(result: Result<String, InvocationError>) -> Self {
        match result {
            Ok(payload) => Response::Success { payload },
            Err(e) => Response::Failure {
                message: e.to_string(),
            },
        }
    }
}
