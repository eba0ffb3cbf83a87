//! Summary step: shows everything the wizard collected and, on submit,
//! executes the backend call.
//!
//! Execution failures never strand the user here. The outcome lands in
//! [`WizardSession::finish`], the failure text travels through the
//! pending-error protocol, and the wizard advances to the result step
//! either way.

use async_trait::async_trait;
use fs_console_model::{ErrorKind, GrowFileSystemSpec, ManagementError, NewFileSystemSpec};

use crate::alert::ErrorState;
use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::flows::FlowVariant;
use crate::session::{FinishOutcome, FinishResult, FsKind, WizardSession};
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "fsName", kind: FieldKind::StaticText, required: false },
    FieldSpec { id: "mountPoint", kind: FieldKind::StaticText, required: false },
    FieldSpec { id: "deviceSummary", kind: FieldKind::StaticText, required: false },
    FieldSpec { id: "optionSummary", kind: FieldKind::StaticText, required: false },
];

pub struct SummaryStep {
    variant: FlowVariant,
}

impl SummaryStep {
    #[must_use]
    pub fn new(variant: FlowVariant) -> Self {
        Self { variant }
    }
}

#[async_trait]
impl WizardStep for SummaryStep {
    fn id(&self) -> StepId {
        StepId::Summary
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
        ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        let StepInput::Summary = input else {
            return Err(WizardError::InputMismatch(StepId::Summary));
        };

        match self.variant {
            FlowVariant::Create => {
                let spec = build_create_spec(session);
                let result =
                    ctx.system_model.create_file_system(&session.server_name, &spec).await;
                store_outcome(
                    ctx,
                    session,
                    result,
                    &spec.name,
                    "FSSummary.createfs",
                    "FSWizard.new.error.summary",
                    "FSWizard.new.warning.summary",
                );
            }
            FlowVariant::Grow => {
                let spec = build_grow_spec(session);
                let result = ctx.system_model.grow_file_system(&session.server_name, &spec).await;
                store_outcome(
                    ctx,
                    session,
                    result,
                    &spec.name,
                    "FSSummary.growfs",
                    "FSWizard.grow.error.summary",
                    "FSWizard.grow.warning.summary",
                );
            }
        }

        Ok(SubmitOutcome::Advance)
    }
}

fn build_create_spec(session: &WizardSession) -> NewFileSystemSpec {
    let qfs = session.fs_kind == FsKind::Qfs;
    NewFileSystemSpec {
        name: session.fs_name.clone().unwrap_or_default(),
        qfs,
        shared: session.shared,
        hpc: session.hpc,
        ha: session.hafs,
        archiving: session.archiving,
        matfs: session.matfs,
        mount_point: session.mount_point.clone().unwrap_or_default(),
        mount_at_boot: session.mount_at_boot,
        mount_after_create: session.mount_after_create,
        block_size_kb: if qfs { session.block_size_kb } else { None },
        blocks_per_device: if qfs { session.blocks_per_device } else { None },
        high_watermark: session.high_watermark,
        low_watermark: session.low_watermark,
        metadata_devices: if session.separate_metadata() {
            session.metadata_devices.clone()
        } else {
            Vec::new()
        },
        data_devices: session.data_devices.clone(),
        striped_groups: session.striped_group_devices.clone(),
        cluster_nodes: session.cluster_nodes.clone(),
        shared_metadata_server: session.shared_metadata_server.clone(),
        shared_clients: session.shared_clients.clone(),
        archive_policy: session.archive_policy.clone(),
    }
}

fn build_grow_spec(session: &WizardSession) -> GrowFileSystemSpec {
    GrowFileSystemSpec {
        name: session.fs_name.clone().unwrap_or_default(),
        metadata_devices: session.metadata_devices.clone(),
        data_devices: session.data_devices.clone(),
        striped_groups: session.striped_group_devices.clone(),
    }
}

/// A timeout leaves the operation in flight, so it is reported as a
/// warning rather than a failure. Everything else fails the run.
fn store_outcome(
    ctx: &WizardContext,
    session: &mut WizardSession,
    result: Result<(), ManagementError>,
    fs_name: &str,
    success_detail_key: &str,
    error_summary: &str,
    warning_summary: &str,
) {
    match result {
        Ok(()) => {
            session.finish = Some(FinishResult {
                outcome: FinishOutcome::Success,
                detail: ctx.catalog.resolve(success_detail_key, &[fs_name]),
                code: None,
            });
        }
        Err(e) if e.kind() == ErrorKind::Timeout => {
            session.finish = Some(FinishResult {
                outcome: FinishOutcome::Warning,
                detail: String::new(),
                code: Some(e.code),
            });
            session.record_error(ErrorState::inline(
                warning_summary,
                Some(e.code),
                e.message,
                session.server_name.clone(),
            ));
        }
        Err(e) => {
            session.finish = Some(FinishResult {
                outcome: FinishOutcome::Failed,
                detail: String::new(),
                code: Some(e.code),
            });
            session.record_error(ErrorState::blocking(
                error_summary,
                Some(e.code),
                e.message,
                session.server_name.clone(),
            ));
        }
    }
}
