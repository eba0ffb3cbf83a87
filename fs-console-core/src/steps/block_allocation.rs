//! Block-allocation step: blocks per device, allocation unit size, and
//! the group count for striped and HPC file systems.

use async_trait::async_trait;

use crate::constants::{
    BLOCK_SIZE_STEP_KB, DEFAULT_BLOCK_SIZE_KB, MAX_BLOCK_SIZE_KB, MAX_STRIPED_GROUPS,
    MIN_BLOCK_SIZE_KB,
};
use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::session::WizardSession;
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, SizeUnit, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "blocksPerDevice", kind: FieldKind::IntRange(0, 255), required: true },
    FieldSpec { id: "blockSize", kind: FieldKind::Text, required: true },
    FieldSpec { id: "blockSizeUnit", kind: FieldKind::Menu, required: true },
    FieldSpec { id: "stripedGroupCount", kind: FieldKind::IntRange(1, 128), required: false },
];

pub struct BlockAllocationStep;

#[async_trait]
impl WizardStep for BlockAllocationStep {
    fn id(&self) -> StepId {
        StepId::BlockAllocation
    }

    fn schema(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    async fn on_enter(
        &self,
        _ctx: &WizardContext,
        session: &mut WizardSession,
    ) -> WizardResult<RenderTarget> {
        if session.block_size_kb.is_none() {
            session.block_size_kb = Some(DEFAULT_BLOCK_SIZE_KB);
        }
        Ok(RenderTarget::Pagelet)
    }

    async fn on_submit(
        &self,
        _ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        let StepInput::BlockAllocation {
            blocks_per_device,
            block_size,
            block_size_unit,
            striped_group_count,
        } = input
        else {
            return Err(WizardError::InputMismatch(StepId::BlockAllocation));
        };

        let blocks = parse_blocks_per_device(blocks_per_device)?;
        let block_size_kb = parse_block_size(block_size, *block_size_unit)?;

        let wants_groups = session.striped() || session.hpc;
        let groups = if wants_groups {
            Some(parse_group_count(
                striped_group_count.as_deref().unwrap_or(""),
                session.hpc,
            )?)
        } else {
            None
        };

        session.blocks_per_device = Some(blocks);
        session.block_size_kb = Some(block_size_kb);
        session.striped_group_count = groups;

        Ok(SubmitOutcome::Advance)
    }
}

fn parse_blocks_per_device(raw: &str) -> WizardResult<u8> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WizardError::Validation {
            summary_key: "FSWizard.new.error.stripeValue",
            detail: String::new(),
        });
    }
    raw.parse::<u8>().map_err(|_| WizardError::Validation {
        summary_key: "FSWizard.new.error.stripeValueRange",
        detail: String::new(),
    })
}

fn parse_block_size(raw: &str, unit: SizeUnit) -> WizardResult<u32> {
    let invalid = || WizardError::Validation {
        summary_key: "FSWizard.new.error.dauSize",
        detail: String::new(),
    };

    let value: u32 = raw.trim().parse().map_err(|_| invalid())?;
    let kilobytes = match unit {
        SizeUnit::Kb => value,
        SizeUnit::Mb => value.checked_mul(1024).ok_or_else(invalid)?,
    };

    if !(MIN_BLOCK_SIZE_KB..=MAX_BLOCK_SIZE_KB).contains(&kilobytes)
        || kilobytes % BLOCK_SIZE_STEP_KB != 0
    {
        return Err(invalid());
    }
    Ok(kilobytes)
}

fn parse_group_count(raw: &str, hpc: bool) -> WizardResult<u32> {
    let summary_key = if hpc {
        "FSWizard.new.error.numObjectGroup"
    } else {
        "FSWizard.new.error.numStripedGroup"
    };
    let invalid = || WizardError::Validation { summary_key, detail: String::new() };

    let count: u32 = raw.trim().parse().map_err(|_| invalid())?;
    if !(1..=MAX_STRIPED_GROUPS).contains(&count) {
        return Err(invalid());
    }
    Ok(count)
}
