//! Step sequencing for the two wizards.
//!
//! A flow is a pure function of the session: given what the user has
//! answered so far, it names the first step and the forward target of
//! every step. Steps themselves never sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::WizardSession;
use crate::steps::StepId;

pub mod create;
pub mod grow;

pub use grow::grow_available;

/// Which wizard a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlowVariant {
    Create,
    Grow,
}

impl FlowVariant {
    #[must_use]
    pub fn first_step(self, session: &WizardSession) -> StepId {
        match self {
            Self::Create => create::first_step(),
            Self::Grow => grow::first_step(session),
        }
    }

    /// Forward target after `current`, `None` past the terminal step.
    #[must_use]
    pub fn next_step(self, session: &WizardSession, current: StepId) -> Option<StepId> {
        match self {
            Self::Create => create::next_step(session, current),
            Self::Grow => grow::next_step(session, current),
        }
    }

    /// The full forward path the session's answers currently select.
    #[must_use]
    pub fn step_sequence(self, session: &WizardSession) -> Vec<StepId> {
        let mut sequence = vec![self.first_step(session)];
        while let Some(next) = self.next_step(session, *sequence.last().unwrap_or(&StepId::Result))
        {
            sequence.push(next);
        }
        sequence
    }
}

impl fmt::Display for FlowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Grow => write!(f, "grow"),
        }
    }
}
