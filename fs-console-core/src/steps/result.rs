//! Terminal result step. The engine consumes any pending failure when
//! this step is entered; the page itself only shows the recorded
//! outcome, and acknowledging it closes the wizard.

use async_trait::async_trait;

use crate::engine::WizardContext;
use crate::error::WizardResult;
use crate::session::WizardSession;
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] =
    &[FieldSpec { id: "operationResult", kind: FieldKind::StaticText, required: false }];

pub struct ResultStep;

#[async_trait]
impl WizardStep for ResultStep {
    fn id(&self) -> StepId {
        StepId::Result
    }

    fn schema(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    async fn on_enter(
        &self,
        _ctx: &WizardContext,
        _session: &mut WizardSession,
    ) -> WizardResult<RenderTarget> {
        Ok(RenderTarget::Pagelet)
    }

    /// Any submit on the result page closes the wizard.
    async fn on_submit(
        &self,
        _ctx: &WizardContext,
        _session: &mut WizardSession,
        _input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        Ok(SubmitOutcome::Finished)
    }
}
