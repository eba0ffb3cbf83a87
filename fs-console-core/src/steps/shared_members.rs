//! Shared-membership step: the primary metadata server and the client
//! hosts of a shared file system.

use async_trait::async_trait;

use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::session::WizardSession;
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "metadataServer", kind: FieldKind::Text, required: true },
    FieldSpec { id: "clients", kind: FieldKind::MultiSelect, required: false },
];

pub struct SharedMembersStep;

#[async_trait]
impl WizardStep for SharedMembersStep {
    fn id(&self) -> StepId {
        StepId::SharedMembers
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
        let StepInput::SharedMembers { metadata_server, clients } = input else {
            return Err(WizardError::InputMismatch(StepId::SharedMembers));
        };

        let metadata_server = metadata_server.trim();
        if metadata_server.is_empty() {
            return Err(WizardError::Validation {
                summary_key: "FSWizard.new.error.sharedMember",
                detail: String::new(),
            });
        }

        session.shared_metadata_server = Some(metadata_server.to_string());
        session.shared_clients =
            clients.iter().filter(|c| c.as_str() != metadata_server).cloned().collect();

        Ok(SubmitOutcome::Advance)
    }
}
