//! File System Console Wizard Core
//!
//! Provides the wizard machinery of the SAM-QFS web console, including:
//! - Wizard session state and the pending-error protocol
//! - Step views with entry preparation and input validation
//! - Flow sequencing for the create and grow wizards
//! - Alert rendering against a message catalog
//!
//! The hosting layer supplies a [`fs_console_model::SystemModel`] for the
//! management station and a [`MessageCatalog`] for localized text; the
//! engine drives everything in between.

pub mod alert;
pub mod catalog;
pub mod constants;
pub mod engine;
pub mod error;
pub mod flows;
pub mod session;
pub mod steps;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use alert::{render_alert, Alert, AlertSeverity, ErrorState};
pub use catalog::{InMemoryMessageCatalog, MessageCatalog};
pub use engine::{StepRender, WizardContext, WizardEngine};
pub use error::{WizardError, WizardResult};
pub use flows::{grow_available, FlowVariant};
pub use session::{FinishOutcome, FinishResult, WizardSession};
pub use steps::{
    FieldKind, FieldSpec, RenderTarget, StepDescriptor, StepId, StepInput, SubmitOutcome,
    WizardStep,
};
