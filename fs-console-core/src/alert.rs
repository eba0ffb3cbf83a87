//! Pending-failure state and alert rendering.
//!
//! Failures raised while a step processes input are not shown immediately.
//! They are recorded on the session as an [`ErrorState`] and consumed by
//! the next render cycle, which turns them into an [`Alert`]. A failure
//! whose detail key carries the inline marker renders as a non-blocking
//! warning over the step's normal content; anything else blocks the step
//! and switches rendering to its error pagelet.

use serde::{Deserialize, Serialize};

use crate::catalog::MessageCatalog;
use crate::constants::INLINE_ALERT;
use crate::error::ManagementError;

/// Summary key used when a failure carries no step-specific summary.
pub const CARRYOVER_SUMMARY: &str = "FSWizard.error.carryover";

/// Detail key for the management-station-down message.
pub const SERVER_DOWN_DETAIL_KEY: &str = "ErrorHandle.alertElementFailedDetail2";

/// Detail key for the access-denied message.
pub const ACCESS_DENIED_DETAIL_KEY: &str = "ErrorHandle.accessDeniedDetail";

/// Detail key substituted when a call timed out.
pub const TIMEOUT_DETAIL_KEY: &str = "-2801";

/// Detail key substituted when the network to the station is down.
pub const NETWORK_DOWN_DETAIL_KEY: &str = "-2802";

/// Transient failure record carried by the session between render cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorState {
    /// Whether an undelivered failure is pending.
    pub present: bool,
    /// Catalog key of the alert summary line.
    pub summary_key: String,
    /// Failure code, when one accompanied the failure.
    pub code: Option<i32>,
    /// Detail-key marker; [`INLINE_ALERT`] demotes the alert to a warning.
    pub detail_key: Option<String>,
    /// Raw failure message. Empty when only a code is known.
    pub message: String,
    /// Server the failure belongs to.
    pub server_name: String,
}

impl ErrorState {
    /// A failure that blocks the step it renders on.
    #[must_use]
    pub fn blocking(
        summary_key: impl Into<String>,
        code: Option<i32>,
        message: impl Into<String>,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            present: true,
            summary_key: summary_key.into(),
            code,
            detail_key: None,
            message: message.into(),
            server_name: server_name.into(),
        }
    }

    /// A failure rendered as a warning over the step's normal content.
    #[must_use]
    pub fn inline(
        summary_key: impl Into<String>,
        code: Option<i32>,
        message: impl Into<String>,
        server_name: impl Into<String>,
    ) -> Self {
        Self {
            detail_key: Some(INLINE_ALERT.to_string()),
            ..Self::blocking(summary_key, code, message, server_name)
        }
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.detail_key.as_deref() == Some(INLINE_ALERT)
    }
}

/// How prominently an alert renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Error,
}

/// Resolved alert text, ready for the hosting layer to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub severity: AlertSeverity,
    pub summary: String,
    pub detail: String,
    pub code: Option<i32>,
}

/// Turn a pending failure into display text.
///
/// Detail selection mirrors the console's long-standing conventions:
/// timeout and network-down codes always replace the detail with their
/// canned messages; otherwise a non-empty station message wins; otherwise
/// well-known codes get the server-down or access-denied message with the
/// server name substituted, and remaining catalog-range codes are looked
/// up by their decimal string.
#[must_use]
pub fn render_alert(catalog: &dyn MessageCatalog, state: &ErrorState) -> Option<Alert> {
    if !state.present {
        return None;
    }

    let detail = if state.code == Some(ManagementError::TIMEOUT) {
        catalog.resolve(TIMEOUT_DETAIL_KEY, &[])
    } else if state.code == Some(ManagementError::NETWORK_DOWN) {
        catalog.resolve(NETWORK_DOWN_DETAIL_KEY, &[])
    } else if !state.message.is_empty() {
        state.message.clone()
    } else {
        match state.code {
            Some(ManagementError::SERVER_DOWN) => {
                catalog.resolve(SERVER_DOWN_DETAIL_KEY, &[&state.server_name])
            }
            Some(ManagementError::ACCESS_DENIED) => {
                catalog.resolve(ACCESS_DENIED_DETAIL_KEY, &[&state.server_name])
            }
            Some(code) if (-3000..=-1000).contains(&code) => {
                catalog.resolve(&code.to_string(), &[])
            }
            _ => String::new(),
        }
    };

    let severity = if state.is_inline() {
        AlertSeverity::Warning
    } else {
        AlertSeverity::Error
    };

    Some(Alert {
        severity,
        summary: catalog.resolve(&state.summary_key, &[]),
        detail,
        code: state.code,
    })
}
