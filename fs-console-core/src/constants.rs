//! Wizard-wide limits and protocol markers.

/// Most striped groups a single file system can carry.
pub const MAX_STRIPED_GROUPS: u32 = 128;

/// Most devices a single file system can consume across all device classes.
pub const MAX_DEVICES: usize = 252;

/// Smallest device allocation unit, in kilobytes.
pub const MIN_BLOCK_SIZE_KB: u32 = 16;

/// Largest device allocation unit, in kilobytes (64 MB).
pub const MAX_BLOCK_SIZE_KB: u32 = 65_536;

/// The device allocation unit must be a multiple of this, in kilobytes.
pub const BLOCK_SIZE_STEP_KB: u32 = 8;

/// Allocation unit offered when the user has not entered one.
pub const DEFAULT_BLOCK_SIZE_KB: u32 = 64;

/// Watermark percentages run from 0 to this bound, inclusive.
pub const MAX_WATERMARK: u8 = 100;

/// Lowest management API version that supports the HPC and MAT-FS
/// variants and online grow.
pub const FEATURE_VERSION_MIN: &str = "1.6";

/// Detail-key marker that demotes a pending failure to a non-blocking
/// warning on the next render.
pub const INLINE_ALERT: &str = "inlineAlert";

/// Code attached to device-overlap warnings.
pub const OVERLAP_WARNING_CODE: i32 = 1007;

/// Code attached to faults raised by the console itself rather than the
/// management station.
pub const INTERNAL_FAULT_CODE: i32 = 8_001_234;
