//! Archive-configuration step: attach an existing archive policy to the
//! new file system or name a new one.

use async_trait::async_trait;
use fs_console_model::ArchivePolicy;

use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::session::{PolicyType, WizardSession};
use crate::steps::{
    is_valid_component_name, FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome,
    WizardStep,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "policyType", kind: FieldKind::Radio, required: true },
    FieldSpec { id: "existingPolicy", kind: FieldKind::Menu, required: false },
    FieldSpec { id: "newPolicyName", kind: FieldKind::Text, required: false },
];

pub struct ArchiveConfigStep;

#[async_trait]
impl WizardStep for ArchiveConfigStep {
    fn id(&self) -> StepId {
        StepId::ArchiveConfig
    }

    fn schema(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    async fn on_enter(
        &self,
        ctx: &WizardContext,
        session: &mut WizardSession,
    ) -> WizardResult<RenderTarget> {
        let policies = ctx.system_model.archive_policy_names(&session.server_name).await?;
        session.default_policy_type = Some(if policies.is_empty() {
            PolicyType::New
        } else {
            PolicyType::Existing
        });
        session.available_policies = policies;
        Ok(RenderTarget::Pagelet)
    }

    async fn on_submit(
        &self,
        _ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        let StepInput::ArchiveConfig { policy_type, existing_name, new_name } = input else {
            return Err(WizardError::InputMismatch(StepId::ArchiveConfig));
        };

        let validation =
            |summary_key| WizardError::Validation { summary_key, detail: String::new() };

        let Some(policy_type) = policy_type else {
            return Err(validation("FSWizard.new.error.policytype"));
        };

        session.archive_policy = Some(match policy_type {
            PolicyType::Existing => {
                let name = existing_name.as_deref().unwrap_or("").trim();
                if name.is_empty() || !session.available_policies.iter().any(|p| p == name) {
                    return Err(validation("FSWizard.new.error.noexistingpolicy"));
                }
                ArchivePolicy::Existing { name: name.to_string() }
            }
            PolicyType::New => {
                let name = new_name.as_deref().unwrap_or("").trim();
                if !is_valid_component_name(name) {
                    return Err(validation("FSWizard.new.error.policyname"));
                }
                if session.available_policies.iter().any(|p| p == name) {
                    return Err(validation("FSWizard.new.error.policynameExists"));
                }
                ArchivePolicy::New { name: name.to_string() }
            }
        });

        Ok(SubmitOutcome::Advance)
    }
}
