//! Mount step: file-system name, mount point, mount options and, for
//! archiving file systems, the high and low watermarks.

use async_trait::async_trait;

use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::session::{FsKind, WizardSession};
use crate::steps::{
    is_valid_component_name, is_well_formed_path, FieldKind, FieldSpec, RenderTarget, StepId,
    StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "fsName", kind: FieldKind::Text, required: true },
    FieldSpec { id: "mountPoint", kind: FieldKind::Text, required: true },
    FieldSpec { id: "mountAtBoot", kind: FieldKind::Checkbox, required: false },
    FieldSpec { id: "mountAfterCreate", kind: FieldKind::Checkbox, required: false },
    FieldSpec { id: "highWatermark", kind: FieldKind::IntRange(0, 100), required: false },
    FieldSpec { id: "lowWatermark", kind: FieldKind::IntRange(0, 100), required: false },
];

pub struct MountStep;

#[async_trait]
impl WizardStep for MountStep {
    fn id(&self) -> StepId {
        StepId::Mount
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
        let StepInput::Mount {
            fs_name,
            mount_point,
            mount_at_boot,
            mount_after_create,
            high_watermark,
            low_watermark,
        } = input
        else {
            return Err(WizardError::InputMismatch(StepId::Mount));
        };

        let fs_name = fs_name.trim();
        let mount_point = mount_point.trim();

        if session.fs_kind == FsKind::Qfs {
            validate_fs_name(fs_name)?;
            if ctx.system_model.file_system_exists(&session.server_name, fs_name).await? {
                return Err(validation("FSWizard.new.error.fsnameExists"));
            }
        }
        validate_mount_point(mount_point)?;

        if session.archiving {
            let (high, low) =
                resolve_watermarks(ctx, session, high_watermark, low_watermark).await?;
            session.high_watermark = Some(high);
            session.low_watermark = Some(low);
        }

        session.fs_name =
            if fs_name.is_empty() { None } else { Some(fs_name.to_string()) };
        session.mount_point = Some(mount_point.to_string());
        session.mount_at_boot = *mount_at_boot;
        session.mount_after_create = *mount_after_create;

        Ok(SubmitOutcome::Advance)
    }
}

fn validation(summary_key: &'static str) -> WizardError {
    WizardError::Validation { summary_key, detail: String::new() }
}

fn validate_fs_name(name: &str) -> WizardResult<()> {
    if name.is_empty() {
        return Err(validation("FSWizard.new.error.fsname"));
    }
    if !is_valid_component_name(name) {
        return Err(validation("FSWizard.new.error.invalidfsname"));
    }
    Ok(())
}

fn validate_mount_point(path: &str) -> WizardResult<()> {
    if path.is_empty() {
        return Err(validation("FSWizard.new.error.mountpoint"));
    }
    if !is_well_formed_path(path) {
        return Err(validation("FSWizard.new.error.invalidmountpoint"));
    }
    if !path.starts_with('/') {
        return Err(validation("FSWizard.new.error.mountpoint.absolutePath"));
    }
    Ok(())
}

/// Fill blank watermark fields from the server defaults, then check the
/// pair. The low watermark must sit strictly below the high one.
async fn resolve_watermarks(
    ctx: &WizardContext,
    session: &WizardSession,
    high_raw: &str,
    low_raw: &str,
) -> WizardResult<(u8, u8)> {
    let high_raw = high_raw.trim();
    let low_raw = low_raw.trim();

    let defaults = if high_raw.is_empty() || low_raw.is_empty() {
        Some(
            ctx.system_model
                .default_watermarks(
                    &session.server_name,
                    session.separate_metadata(),
                    session.archiving,
                )
                .await
                .map_err(|e| WizardError::Internal(e.message))?,
        )
    } else {
        None
    };

    let high = match (high_raw.is_empty(), defaults) {
        (true, Some((high, _))) => high,
        _ => parse_watermark(high_raw, "FSWizard.new.error.hwmrange")?,
    };
    let low = match (low_raw.is_empty(), defaults) {
        (true, Some((_, low))) => low,
        _ => parse_watermark(low_raw, "FSWizard.new.error.lwmrange")?,
    };

    if low >= high {
        // Blame the field the user actually typed into.
        let summary_key = if high_raw.is_empty() {
            "FSWizard.new.error.lwmbhwm"
        } else {
            "FSWizard.new.error.hwmblwm"
        };
        return Err(validation(summary_key));
    }
    Ok((high, low))
}

fn parse_watermark(raw: &str, summary_key: &'static str) -> WizardResult<u8> {
    match raw.parse::<u8>() {
        Ok(value) if value <= 100 => Ok(value),
        _ => Err(validation(summary_key)),
    }
}
