//! Striped-group count step of the grow flow: how many new groups to
//! add on top of the existing ones.

use async_trait::async_trait;

use crate::constants::MAX_STRIPED_GROUPS;
use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::session::WizardSession;
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] =
    &[FieldSpec { id: "stripedGroupCount", kind: FieldKind::IntRange(0, 128), required: true }];

pub struct StripedGroupCountStep;

#[async_trait]
impl WizardStep for StripedGroupCountStep {
    fn id(&self) -> StepId {
        StepId::StripedGroupCount
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
        let StepInput::StripedGroupCount { count } = input else {
            return Err(WizardError::InputMismatch(StepId::StripedGroupCount));
        };

        let available = session.available_striped_groups.unwrap_or(MAX_STRIPED_GROUPS);
        let invalid = || WizardError::Validation {
            summary_key: "FSWizard.grow.error.numStripedGroup",
            detail: available.to_string(),
        };

        let count: u32 = count.trim().parse().map_err(|_| invalid())?;
        if count > available {
            return Err(invalid());
        }

        // Lowering the count discards the group pages it cut off.
        session.striped_group_devices.truncate(count as usize);
        session.striped_group_count = Some(count);

        Ok(SubmitOutcome::Advance)
    }
}
