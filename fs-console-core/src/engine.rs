//! Wizard engine: owns the session, walks the flow, and applies the
//! error protocol the same way for every step.
//!
//! Step failures never escape to the caller. Validation and station
//! failures become pending [`ErrorState`]s and the wizard stays put;
//! the next render consumes them into a visible alert. Only engine
//! misuse (input for the wrong step, submitting a finished wizard) is
//! returned as an error.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use fs_console_model::SystemModel;

use crate::alert::{render_alert, Alert, AlertSeverity, ErrorState, CARRYOVER_SUMMARY};
use crate::catalog::MessageCatalog;
use crate::constants::INTERNAL_FAULT_CODE;
use crate::error::{WizardError, WizardResult};
use crate::flows::{grow, FlowVariant};
use crate::session::WizardSession;
use crate::steps::{
    ArchiveConfigStep, BlockAllocationStep, ClusterNodesStep, DefaultsStep, DeviceSelectStep,
    FieldSpec, FsTypeStep, MetadataOptionsStep, MountStep, RenderTarget, ResultStep,
    SharedMembersStep, StepDescriptor, StepId, StepInput, StripedGroupCountStep, SubmitOutcome,
    SummaryStep, WizardStep,
};

/// Shared dependencies handed to every step.
pub struct WizardContext {
    pub system_model: Arc<dyn SystemModel>,
    pub catalog: Arc<dyn MessageCatalog>,
}

impl WizardContext {
    #[must_use]
    pub fn new(system_model: Arc<dyn SystemModel>, catalog: Arc<dyn MessageCatalog>) -> Self {
        Self { system_model, catalog }
    }
}

/// What the hosting layer renders after entering a step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRender {
    pub step: StepId,
    pub descriptor: StepDescriptor,
    pub target: RenderTarget,
    /// Consumed failure from the previous cycle, if one was pending.
    pub alert: Option<Alert>,
    pub fields: &'static [FieldSpec],
}

/// Drives one wizard run from its first step to the result page.
pub struct WizardEngine {
    ctx: Arc<WizardContext>,
    flow: FlowVariant,
    session: WizardSession,
    current: StepId,
    finished: bool,
}

impl WizardEngine {
    /// Start a create wizard against `server_name`.
    #[must_use]
    pub fn start_create(ctx: Arc<WizardContext>, server_name: impl Into<String>) -> Self {
        let session = WizardSession::new(server_name);
        log::info!(
            "wizard {}: create flow started on {}",
            session.instance_id,
            session.server_name
        );
        let current = FlowVariant::Create.first_step(&session);
        Self { ctx, flow: FlowVariant::Create, session, current, finished: false }
    }

    /// Start a grow wizard for `fs_name`, seeding the session from the
    /// station. A seeding failure is recorded as a pending alert and the
    /// first step renders it.
    pub async fn start_grow(
        ctx: Arc<WizardContext>,
        server_name: impl Into<String>,
        fs_name: &str,
    ) -> Self {
        let mut session = WizardSession::new(server_name);
        let server = session.server_name.clone();

        match ctx.system_model.get_file_system(&server, fs_name).await {
            Ok(info) => grow::seed_session(&mut session, &info),
            Err(e) => {
                log::warn!("wizard {}: seeding grow of {} on {} failed: {}",
                    session.instance_id, fs_name, server, e);
                session.fs_name = Some(fs_name.to_string());
                session.record_error(ErrorState::blocking(
                    CARRYOVER_SUMMARY,
                    Some(e.code),
                    e.message,
                    server,
                ));
            }
        }

        log::info!(
            "wizard {}: grow flow started for {} on {}",
            session.instance_id,
            fs_name,
            session.server_name
        );
        let current = FlowVariant::Grow.first_step(&session);
        Self { ctx, flow: FlowVariant::Grow, session, current, finished: false }
    }

    #[must_use]
    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    #[must_use]
    pub fn current_step(&self) -> StepId {
        self.current
    }

    #[must_use]
    pub fn flow(&self) -> FlowVariant {
        self.flow
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The forward path the session's answers currently select, for
    /// breadcrumb rendering.
    #[must_use]
    pub fn step_sequence(&self) -> Vec<StepId> {
        self.flow.step_sequence(&self.session)
    }

    /// Enter the current step: consume any pending failure into an
    /// alert, run the step's display preparation, and say what to render.
    pub async fn enter(&mut self) -> WizardResult<StepRender> {
        let step = build_step(self.flow, self.current);
        log::info!("wizard {}: entering {}", self.session.instance_id, self.current);

        let mut alert = self
            .session
            .take_error()
            .and_then(|state| render_alert(self.ctx.catalog.as_ref(), &state));

        let mut target = match step.on_enter(&self.ctx, &mut self.session).await {
            Ok(target) => target,
            Err(e) => {
                self.log_failure("entering", &e);
                let state = self.convert(e)?;
                alert = render_alert(self.ctx.catalog.as_ref(), &state);
                RenderTarget::ErrorPagelet
            }
        };

        if matches!(&alert, Some(a) if a.severity == AlertSeverity::Error) {
            target = RenderTarget::ErrorPagelet;
        }

        Ok(StepRender {
            step: self.current,
            descriptor: StepDescriptor::of(self.current),
            target,
            alert,
            fields: step.schema(),
        })
    }

    /// Feed input to the current step. Failures are recorded for the
    /// next render and reported as [`SubmitOutcome::Stay`].
    pub async fn submit(&mut self, input: &StepInput) -> WizardResult<SubmitOutcome> {
        if self.finished {
            return Err(WizardError::Finished);
        }

        let step = build_step(self.flow, self.current);
        match step.on_submit(&self.ctx, &mut self.session, input).await {
            Ok(SubmitOutcome::Advance) => {
                let next = self
                    .flow
                    .next_step(&self.session, self.current)
                    .ok_or(WizardError::NoNextStep(self.current))?;
                log::info!(
                    "wizard {}: {} -> {}",
                    self.session.instance_id,
                    self.current,
                    next
                );
                self.current = next;
                Ok(SubmitOutcome::Advance)
            }
            Ok(SubmitOutcome::Stay) => {
                log::info!("wizard {}: staying on {}", self.session.instance_id, self.current);
                Ok(SubmitOutcome::Stay)
            }
            Ok(SubmitOutcome::Finished) => {
                self.finished = true;
                let elapsed = Utc::now().signed_duration_since(self.session.started_at);
                log::info!(
                    "wizard {}: {} flow finished after {}s",
                    self.session.instance_id,
                    self.flow,
                    elapsed.num_seconds()
                );
                Ok(SubmitOutcome::Finished)
            }
            Err(e) => {
                self.log_failure("submitting", &e);
                let state = self.convert(e)?;
                self.session.record_error(state);
                Ok(SubmitOutcome::Stay)
            }
        }
    }

    fn log_failure(&self, phase: &str, error: &WizardError) {
        if error.is_expected() {
            log::warn!(
                "wizard {}: {} {} failed: {}",
                self.session.instance_id,
                phase,
                self.current,
                error
            );
        } else {
            log::error!(
                "wizard {}: {} {} failed: {}",
                self.session.instance_id,
                phase,
                self.current,
                error
            );
        }
    }

    /// Map a step failure onto the pending-error protocol. Engine misuse
    /// is not convertible and bubbles up instead.
    fn convert(&self, error: WizardError) -> WizardResult<ErrorState> {
        let server = self.session.server_name.clone();
        match error {
            WizardError::Validation { summary_key, detail } => {
                Ok(ErrorState::blocking(summary_key, None, detail, server))
            }
            WizardError::Internal(detail) => Ok(ErrorState::blocking(
                CARRYOVER_SUMMARY,
                Some(INTERNAL_FAULT_CODE),
                detail,
                server,
            )),
            WizardError::Backend(e) => {
                Ok(ErrorState::blocking(CARRYOVER_SUMMARY, Some(e.code), e.message, server))
            }
            other => Err(other),
        }
    }
}

fn build_step(flow: FlowVariant, id: StepId) -> Box<dyn WizardStep> {
    match id {
        StepId::FsType => Box::new(FsTypeStep),
        StepId::Defaults => Box::new(DefaultsStep),
        StepId::MetadataOptions => Box::new(MetadataOptionsStep),
        StepId::BlockAllocation => Box::new(BlockAllocationStep),
        StepId::Mount => Box::new(MountStep),
        StepId::ClusterNodes => Box::new(ClusterNodesStep),
        StepId::SharedMembers => Box::new(SharedMembersStep),
        StepId::MetadataDevices => Box::new(DeviceSelectStep::metadata(flow)),
        StepId::DataDevices => Box::new(DeviceSelectStep::data(flow)),
        StepId::StripedGroup(index) => Box::new(DeviceSelectStep::striped_group(flow, index)),
        StepId::StripedGroupCount => Box::new(StripedGroupCountStep),
        StepId::ArchiveConfig => Box::new(ArchiveConfigStep),
        StepId::Summary => Box::new(SummaryStep::new(flow)),
        StepId::Result => Box::new(ResultStep),
    }
}
