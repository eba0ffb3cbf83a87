//! Management-station error type

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the management station.
///
/// The station encodes every failure as a numeric code plus a message. The
/// message may be empty; for a handful of well-known codes the console
/// substitutes its own text when rendering an alert.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("management station error {code}: {message}")]
pub struct ManagementError {
    /// Station error code
    pub code: i32,
    /// Station-provided message, possibly empty
    pub message: String,
}

/// Broad classification of a station failure, derived from its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The management call timed out (code 30806)
    Timeout,
    /// The network path to the station is down (code 30807)
    NetworkDown,
    /// The station itself is down or unreachable (code -2800)
    ServerDown,
    /// The caller lacks the required administrative role (code -2803)
    AccessDenied,
    /// Any other station failure
    Other,
}

impl ManagementError {
    /// Request timed out on the station side
    pub const TIMEOUT: i32 = 30806;
    /// Network path to the station is down
    pub const NETWORK_DOWN: i32 = 30807;
    /// Management station down or unreachable
    pub const SERVER_DOWN: i32 = -2800;
    /// Caller lacks the required administrative role
    pub const ACCESS_DENIED: i32 = -2803;

    /// Create an error from a raw station code and message
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The station did not answer in time
    #[must_use]
    pub fn timeout() -> Self {
        Self::new(Self::TIMEOUT, "")
    }

    /// The network path to the station is down
    #[must_use]
    pub fn network_down() -> Self {
        Self::new(Self::NETWORK_DOWN, "")
    }

    /// The station is down or was never registered
    #[must_use]
    pub fn server_down() -> Self {
        Self::new(Self::SERVER_DOWN, "")
    }

    /// The caller is not authorized for this operation
    #[must_use]
    pub fn access_denied() -> Self {
        Self::new(Self::ACCESS_DENIED, "")
    }

    /// Classify the failure by its code
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.code {
            Self::TIMEOUT => ErrorKind::Timeout,
            Self::NETWORK_DOWN => ErrorKind::NetworkDown,
            Self::SERVER_DOWN => ErrorKind::ServerDown,
            Self::ACCESS_DENIED => ErrorKind::AccessDenied,
            _ => ErrorKind::Other,
        }
    }

    /// Whether the failure is an expected environmental condition, used for
    /// log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error`
    /// when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        self.kind() != ErrorKind::Other
    }
}

/// Result type alias for fallible station calls
pub type Result<T> = std::result::Result<T, ManagementError>;
