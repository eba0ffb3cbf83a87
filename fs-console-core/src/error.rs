use serde::Serialize;
use thiserror::Error;

use crate::steps::StepId;

pub use fs_console_model::{ManagementError, Result as ManagementResult};

/// Wizard layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum WizardError {
    /// Submitted input failed a validation rule
    #[error("validation failed ({summary_key}): {detail}")]
    Validation {
        /// Catalog key of the alert summary line
        summary_key: &'static str,
        /// Detail text, already resolved where the rule substitutes values
        detail: String,
    },

    /// A console-internal fault, reported under the internal fault code
    #[error("internal fault: {0}")]
    Internal(String),

    /// The management station rejected or failed a call
    #[error(transparent)]
    Backend(#[from] ManagementError),

    /// Input submitted for a step other than the active one
    #[error("input does not belong to step {0}")]
    InputMismatch(StepId),

    /// No forward target exists for the step in the active flow
    #[error("step {0} has no forward target")]
    NoNextStep(StepId),

    /// The wizard already reached its terminal step
    #[error("wizard is finished")]
    Finished,
}

impl WizardError {
    /// Whether this error is an expected outcome (user input, station
    /// conditions) rather than a fault in the console itself.
    ///
    /// Level `warn` should be used when returning `true`, `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Backend(e) => e.is_expected(),
            Self::Internal(_) | Self::InputMismatch(_) | Self::NoNextStep(_) | Self::Finished => {
                false
            }
        }
    }
}

pub type WizardResult<T> = Result<T, WizardError>;
