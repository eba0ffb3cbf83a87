//! Metadata placement and allocation-method step, shown when the user
//! chose to change the derived defaults.

use async_trait::async_trait;

use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::session::{AllocationMethod, WizardSession};
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "metadataPlacement", kind: FieldKind::Radio, required: true },
    FieldSpec { id: "allocationMethod", kind: FieldKind::Menu, required: true },
];

pub struct MetadataOptionsStep;

#[async_trait]
impl WizardStep for MetadataOptionsStep {
    fn id(&self) -> StepId {
        StepId::MetadataOptions
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

    async fn on_submit(
        &self,
        _ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        let &StepInput::MetadataOptions { placement, method } = input else {
            return Err(WizardError::InputMismatch(StepId::MetadataOptions));
        };

        session.metadata_placement = Some(placement);
        session.allocation_method = Some(method);
        if method != AllocationMethod::Striped {
            session.striped_group_count = None;
        }

        Ok(SubmitOutcome::Advance)
    }
}
