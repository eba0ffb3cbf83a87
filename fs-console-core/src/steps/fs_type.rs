//! File-system type step, the first page of the create flow.
//!
//! Entry probes the server for the capabilities that gate what the page
//! offers. Every probe is recoverable: a failed query hides or degrades
//! its feature instead of blocking the wizard.

use async_trait::async_trait;

use crate::constants::FEATURE_VERSION_MIN;
use crate::engine::WizardContext;
use crate::error::WizardResult;
use crate::session::{FsKind, WizardSession};
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};
use fs_console_model::version_at_least;

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "fsType", kind: FieldKind::Radio, required: true },
    FieldSpec { id: "hpc", kind: FieldKind::Checkbox, required: false },
    FieldSpec { id: "hafs", kind: FieldKind::Checkbox, required: false },
    FieldSpec { id: "shared", kind: FieldKind::Checkbox, required: false },
    FieldSpec { id: "archiving", kind: FieldKind::Checkbox, required: false },
    FieldSpec { id: "matfs", kind: FieldKind::Checkbox, required: false },
];

pub struct FsTypeStep;

#[async_trait]
impl WizardStep for FsTypeStep {
    fn id(&self) -> StepId {
        StepId::FsType
    }

    fn schema(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    async fn on_enter(
        &self,
        ctx: &WizardContext,
        session: &mut WizardSession,
    ) -> WizardResult<RenderTarget> {
        let server = session.server_name.clone();
        let (cluster, version, media) = futures::join!(
            ctx.system_model.is_cluster_node(&server),
            ctx.system_model.server_api_version(&server),
            ctx.system_model.has_archiving_media(&server),
        );

        session.hafs_available = match cluster {
            Ok(member) => member,
            Err(e) => {
                log::warn!("cluster membership query failed on {}: {}", server, e);
                false
            }
        };

        session.api_version = match version {
            Ok(reported) => reported,
            Err(e) => {
                log::warn!("API version query failed on {}: {}", server, e);
                None
            }
        };
        session.hpc_matfs_available =
            version_at_least(session.api_version.as_deref(), FEATURE_VERSION_MIN);

        session.archiving_media_missing = match media {
            Ok(found) => !found,
            Err(e) => {
                log::warn!("archiving media query failed on {}: {}", server, e);
                true
            }
        };

        Ok(RenderTarget::Pagelet)
    }

    async fn on_submit(
        &self,
        _ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        let &StepInput::FsType { qfs, hpc, hafs, shared, archiving, matfs } = input else {
            return Err(crate::error::WizardError::InputMismatch(StepId::FsType));
        };

        session.fs_kind = if qfs { FsKind::Qfs } else { FsKind::Ufs };

        // A ufs file system takes none of the QFS variants; options whose
        // gate was closed at display time cannot be chosen either.
        session.hpc = qfs && hpc && session.hpc_matfs_available;
        session.matfs = qfs && matfs && session.hpc_matfs_available;
        session.hafs = qfs && hafs && session.hafs_available;
        session.shared = qfs && shared;
        session.archiving = qfs && archiving;

        Ok(SubmitOutcome::Advance)
    }
}
