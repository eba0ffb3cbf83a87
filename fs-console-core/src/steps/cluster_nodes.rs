//! Cluster-node selection step for HA file systems.

use async_trait::async_trait;

use crate::engine::WizardContext;
use crate::error::WizardResult;
use crate::session::WizardSession;
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] =
    &[FieldSpec { id: "clusterNodes", kind: FieldKind::MultiSelect, required: false }];

pub struct ClusterNodesStep;

#[async_trait]
impl WizardStep for ClusterNodesStep {
    fn id(&self) -> StepId {
        StepId::ClusterNodes
    }

    fn schema(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    /// The node list is fetched on every entry so the page always shows
    /// the cluster as it currently stands. A failed listing degrades to
    /// an empty page rather than blocking the wizard.
    async fn on_enter(
        &self,
        ctx: &WizardContext,
        session: &mut WizardSession,
    ) -> WizardResult<RenderTarget> {
        session.available_cluster_nodes =
            match ctx.system_model.get_cluster_nodes(&session.server_name).await {
                Ok(nodes) => nodes.into_iter().map(|node| node.name).collect(),
                Err(e) => {
                    log::warn!("cluster node listing failed on {}: {}", session.server_name, e);
                    Vec::new()
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
        let StepInput::ClusterNodes { selected } = input else {
            return Err(crate::error::WizardError::InputMismatch(StepId::ClusterNodes));
        };

        session.cluster_nodes = selected.clone();
        Ok(SubmitOutcome::Advance)
    }
}
