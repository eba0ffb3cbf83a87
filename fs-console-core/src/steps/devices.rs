//! Device selection, shared by the metadata, data and striped-group
//! pages of both wizards.
//!
//! Overlap findings from the station do not block the page: they are
//! recorded as an inline warning and the user decides whether to go on
//! with a different selection.

use async_trait::async_trait;

use crate::alert::ErrorState;
use crate::constants::{MAX_DEVICES, OVERLAP_WARNING_CODE};
use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::flows::FlowVariant;
use crate::session::{DeviceSlot, WizardSession};
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] =
    &[FieldSpec { id: "devices", kind: FieldKind::MultiSelect, required: true }];

pub struct DeviceSelectStep {
    slot: DeviceSlot,
    variant: FlowVariant,
}

impl DeviceSelectStep {
    #[must_use]
    pub fn metadata(variant: FlowVariant) -> Self {
        Self { slot: DeviceSlot::Metadata, variant }
    }

    #[must_use]
    pub fn data(variant: FlowVariant) -> Self {
        Self { slot: DeviceSlot::Data, variant }
    }

    #[must_use]
    pub fn striped_group(variant: FlowVariant, index: usize) -> Self {
        Self { slot: DeviceSlot::StripedGroup(index), variant }
    }

    fn required_key(&self) -> &'static str {
        match (self.variant, self.slot) {
            (FlowVariant::Create, DeviceSlot::Metadata) => "FSWizard.new.error.metadata",
            (FlowVariant::Create, _) => "FSWizard.new.error.data",
            (FlowVariant::Grow, DeviceSlot::Metadata) => "FSWizard.grow.error.metadata",
            (FlowVariant::Grow, _) => "FSWizard.grow.error.data",
        }
    }

    fn device_limit(&self, session: &WizardSession) -> usize {
        match self.variant {
            FlowVariant::Create => MAX_DEVICES,
            FlowVariant::Grow => session.available_devices.unwrap_or(MAX_DEVICES),
        }
    }
}

#[async_trait]
impl WizardStep for DeviceSelectStep {
    fn id(&self) -> StepId {
        match self.slot {
            DeviceSlot::Metadata => StepId::MetadataDevices,
            DeviceSlot::Data => StepId::DataDevices,
            DeviceSlot::StripedGroup(index) => StepId::StripedGroup(index),
        }
    }

    fn schema(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    /// List the allocatable units on every entry, minus anything another
    /// page of this wizard already claimed.
    async fn on_enter(
        &self,
        ctx: &WizardContext,
        session: &mut WizardSession,
    ) -> WizardResult<RenderTarget> {
        let units = ctx.system_model.get_allocatable_units(&session.server_name).await?;
        let claimed: Vec<&str> = claimed_paths(session, self.slot);
        session.available_units =
            units.into_iter().filter(|u| !claimed.contains(&u.path.as_str())).collect();
        Ok(RenderTarget::Pagelet)
    }

    async fn on_submit(
        &self,
        ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        let StepInput::Devices { selected } = input else {
            return Err(WizardError::InputMismatch(self.id()));
        };

        if selected.is_empty() {
            return Err(WizardError::Validation {
                summary_key: self.required_key(),
                detail: String::new(),
            });
        }

        let already = session.devices_selected_except(self.slot);
        if already + selected.len() > self.device_limit(session) {
            return Err(WizardError::Validation {
                summary_key: "FSWizard.maxlun",
                detail: String::new(),
            });
        }

        let mut chosen = selected.clone();
        chosen.sort();

        if let DeviceSlot::StripedGroup(_) = self.slot {
            check_equal_capacity(session, &chosen)?;
        }

        let overlaps = ctx
            .system_model
            .check_slices_for_overlaps(&session.server_name, &chosen)
            .await?;
        if !overlaps.is_empty() {
            let mut message = ctx.catalog.resolve("FSWizard.error.overlapDataLUNs", &[]);
            for path in &overlaps {
                message.push('\n');
                message.push_str(path);
            }
            session.record_error(ErrorState::inline(
                "FSWizard.error.deviceError",
                Some(OVERLAP_WARNING_CODE),
                message,
                session.server_name.clone(),
            ));
            return Ok(SubmitOutcome::Stay);
        }

        match self.slot {
            DeviceSlot::Metadata => session.metadata_devices = chosen,
            DeviceSlot::Data => session.data_devices = chosen,
            DeviceSlot::StripedGroup(index) => {
                if session.striped_group_devices.len() <= index {
                    session.striped_group_devices.resize_with(index + 1, Vec::new);
                }
                session.striped_group_devices[index] = chosen;
            }
        }

        Ok(SubmitOutcome::Advance)
    }
}

fn claimed_paths(session: &WizardSession, own: DeviceSlot) -> Vec<&str> {
    let mut claimed = Vec::new();
    if own != DeviceSlot::Metadata {
        claimed.extend(session.metadata_devices.iter().map(String::as_str));
    }
    if own != DeviceSlot::Data {
        claimed.extend(session.data_devices.iter().map(String::as_str));
    }
    for (index, group) in session.striped_group_devices.iter().enumerate() {
        if own != DeviceSlot::StripedGroup(index) {
            claimed.extend(group.iter().map(String::as_str));
        }
    }
    claimed
}

/// Devices in one striped group must all be the same size.
fn check_equal_capacity(session: &WizardSession, chosen: &[String]) -> WizardResult<()> {
    let mut sizes = chosen.iter().filter_map(|path| {
        session.available_units.iter().find(|u| &u.path == path).map(|u| u.capacity)
    });
    if let Some(first) = sizes.next() {
        if sizes.any(|size| size != first) {
            return Err(WizardError::Validation {
                summary_key: "FSWizard.error.stripedGroup.deviceSizeError",
                detail: String::new(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_context, test_session, unit};

    fn devices(paths: &[&str]) -> StepInput {
        StepInput::Devices { selected: paths.iter().map(ToString::to_string).collect() }
    }

    fn summary_key(err: WizardError) -> &'static str {
        match err {
            WizardError::Validation { summary_key, .. } => summary_key,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn entry_hides_units_claimed_by_other_pages() {
        let (ctx, model) = test_context();
        model
            .set_units(vec![unit("/dev/dsk/c0t0d0s0", 100), unit("/dev/dsk/c0t1d0s0", 100)])
            .await;
        let mut session = test_session();
        session.metadata_devices = vec!["/dev/dsk/c0t0d0s0".into()];

        let step = DeviceSelectStep::data(FlowVariant::Create);
        step.on_enter(&ctx, &mut session).await.unwrap();

        assert_eq!(session.available_units.len(), 1);
        assert_eq!(session.available_units[0].path, "/dev/dsk/c0t1d0s0");
    }

    #[tokio::test]
    async fn at_least_one_device_is_required() {
        let (ctx, _model) = test_context();
        let mut session = test_session();

        let create = DeviceSelectStep::data(FlowVariant::Create);
        let err = create.on_submit(&ctx, &mut session, &devices(&[])).await.unwrap_err();
        assert_eq!(summary_key(err), "FSWizard.new.error.data");

        let grow = DeviceSelectStep::metadata(FlowVariant::Grow);
        let err = grow.on_submit(&ctx, &mut session, &devices(&[])).await.unwrap_err();
        assert_eq!(summary_key(err), "FSWizard.grow.error.metadata");
    }

    #[tokio::test]
    async fn selections_are_stored_sorted() {
        let (ctx, _model) = test_context();
        let mut session = test_session();

        let step = DeviceSelectStep::data(FlowVariant::Create);
        step.on_submit(&ctx, &mut session, &devices(&["/dev/b", "/dev/a"])).await.unwrap();

        assert_eq!(session.data_devices, vec!["/dev/a", "/dev/b"]);
    }

    #[tokio::test]
    async fn the_device_ceiling_counts_every_page() {
        let (ctx, _model) = test_context();
        let mut session = test_session();
        session.metadata_devices = (0..250).map(|i| format!("/dev/m{i}")).collect();

        let step = DeviceSelectStep::data(FlowVariant::Create);
        let err = step
            .on_submit(&ctx, &mut session, &devices(&["/dev/a", "/dev/b", "/dev/c"]))
            .await
            .unwrap_err();
        assert_eq!(summary_key(err), "FSWizard.maxlun");
    }

    #[tokio::test]
    async fn resubmitting_a_page_does_not_count_its_old_selection() {
        let (ctx, _model) = test_context();
        let mut session = test_session();
        session.data_devices = (0..252).map(|i| format!("/dev/d{i}")).collect();

        let step = DeviceSelectStep::data(FlowVariant::Create);
        step.on_submit(&ctx, &mut session, &devices(&["/dev/x"])).await.unwrap();
        assert_eq!(session.data_devices, vec!["/dev/x"]);
    }

    #[tokio::test]
    async fn grow_uses_the_remaining_device_budget() {
        let (ctx, _model) = test_context();
        let mut session = test_session();
        session.available_devices = Some(2);

        let step = DeviceSelectStep::data(FlowVariant::Grow);
        let err = step
            .on_submit(&ctx, &mut session, &devices(&["/dev/a", "/dev/b", "/dev/c"]))
            .await
            .unwrap_err();
        assert_eq!(summary_key(err), "FSWizard.maxlun");

        step.on_submit(&ctx, &mut session, &devices(&["/dev/a", "/dev/b"])).await.unwrap();
        assert_eq!(session.data_devices.len(), 2);
    }

    #[tokio::test]
    async fn overlaps_warn_inline_and_keep_the_page() {
        let (ctx, model) = test_context();
        model.set_overlaps(vec!["/dev/dsk/c0t0d0s1".into()]).await;
        let mut session = test_session();

        let step = DeviceSelectStep::data(FlowVariant::Create);
        let outcome =
            step.on_submit(&ctx, &mut session, &devices(&["/dev/dsk/c0t0d0s1"])).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Stay);
        assert!(session.data_devices.is_empty());

        let pending = session.pending_error().unwrap();
        assert!(pending.is_inline());
        assert_eq!(pending.code, Some(1007));
        assert_eq!(pending.summary_key, "FSWizard.error.deviceError");
        assert!(pending.message.contains("/dev/dsk/c0t0d0s1"));
    }

    #[tokio::test]
    async fn striped_groups_demand_equal_device_sizes() {
        let (ctx, model) = test_context();
        model.set_units(vec![unit("/dev/a", 100), unit("/dev/b", 200)]).await;
        let mut session = test_session();

        let step = DeviceSelectStep::striped_group(FlowVariant::Create, 0);
        step.on_enter(&ctx, &mut session).await.unwrap();

        let err =
            step.on_submit(&ctx, &mut session, &devices(&["/dev/a", "/dev/b"])).await.unwrap_err();
        assert_eq!(summary_key(err), "FSWizard.error.stripedGroup.deviceSizeError");
    }

    #[tokio::test]
    async fn group_selections_land_at_their_index() {
        let (ctx, model) = test_context();
        model.set_units(vec![unit("/dev/a", 100), unit("/dev/b", 100)]).await;
        let mut session = test_session();

        let step = DeviceSelectStep::striped_group(FlowVariant::Create, 1);
        step.on_enter(&ctx, &mut session).await.unwrap();
        step.on_submit(&ctx, &mut session, &devices(&["/dev/b", "/dev/a"])).await.unwrap();

        assert_eq!(session.striped_group_devices.len(), 2);
        assert!(session.striped_group_devices[0].is_empty());
        assert_eq!(session.striped_group_devices[1], vec!["/dev/a", "/dev/b"]);
    }
}
