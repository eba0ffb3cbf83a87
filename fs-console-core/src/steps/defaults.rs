//! QFS defaults step: accept the derived allocation settings or branch
//! into the pages that change them.

use async_trait::async_trait;

use crate::constants::DEFAULT_BLOCK_SIZE_KB;
use crate::engine::WizardContext;
use crate::error::{WizardError, WizardResult};
use crate::session::{AllocationMethod, MetadataPlacement, WizardSession};
use crate::steps::{
    FieldKind, FieldSpec, RenderTarget, StepId, StepInput, SubmitOutcome, WizardStep,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec { id: "acceptChange", kind: FieldKind::Radio, required: true },
    FieldSpec { id: "metadataPlacement", kind: FieldKind::StaticText, required: false },
    FieldSpec { id: "allocationMethod", kind: FieldKind::StaticText, required: false },
    FieldSpec { id: "blocksPerDevice", kind: FieldKind::StaticText, required: false },
    FieldSpec { id: "blockSize", kind: FieldKind::StaticText, required: false },
];

/// Allocation settings the defaults page displays for a flag combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedDefaults {
    pub placement: MetadataPlacement,
    pub method: AllocationMethod,
    pub blocks_per_device: u8,
    pub block_size_kb: u32,
}

/// Pure derivation of the allocation defaults from the type-step flags.
#[must_use]
pub fn derived_defaults(hpc: bool, hafs: bool, matfs: bool) -> DerivedDefaults {
    if hpc || hafs || matfs {
        DerivedDefaults {
            placement: MetadataPlacement::Separate,
            method: AllocationMethod::Dual,
            blocks_per_device: if hafs { 2 } else { 0 },
            block_size_kb: DEFAULT_BLOCK_SIZE_KB,
        }
    } else {
        DerivedDefaults {
            placement: MetadataPlacement::Same,
            method: AllocationMethod::Single,
            blocks_per_device: 0,
            block_size_kb: DEFAULT_BLOCK_SIZE_KB,
        }
    }
}

pub struct DefaultsStep;

#[async_trait]
impl WizardStep for DefaultsStep {
    fn id(&self) -> StepId {
        StepId::Defaults
    }

    fn schema(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    async fn on_enter(
        &self,
        _ctx: &WizardContext,
        session: &mut WizardSession,
    ) -> WizardResult<RenderTarget> {
        let derived = derived_defaults(session.hpc, session.hafs, session.matfs);
        session.metadata_placement = Some(derived.placement);
        session.allocation_method = Some(derived.method);
        session.blocks_per_device = Some(derived.blocks_per_device);
        session.block_size_kb = Some(derived.block_size_kb);
        Ok(RenderTarget::Pagelet)
    }

    async fn on_submit(
        &self,
        _ctx: &WizardContext,
        session: &mut WizardSession,
        input: &StepInput,
    ) -> WizardResult<SubmitOutcome> {
        let &StepInput::Defaults { accept } = input else {
            return Err(WizardError::InputMismatch(StepId::Defaults));
        };

        session.accept_defaults = Some(accept);

        // Changing the defaults for the HA, HPC and MAT variants still
        // pins metadata to separate devices; only the allocation pages
        // are offered.
        if !accept && (session.hafs || session.hpc || session.matfs) {
            session.metadata_placement = Some(MetadataPlacement::Separate);
        }

        Ok(SubmitOutcome::Advance)
    }
}
