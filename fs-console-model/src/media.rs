//! Device and media type codes with their display-label helpers

/// Numeric device and media type codes used by the management station.
///
/// The set is closed; the station never reports codes outside it.
pub mod device_type {
    /// Disk cache holding data and metadata
    pub const MD: i32 = 101;
    /// Disk cache holding data only
    pub const MR: i32 = 102;
    /// Disk cache holding metadata only
    pub const METADATA: i32 = 103;

    /// Sony AIT tape
    pub const SONY_AIT: i32 = 201;
    /// Ampex DST310 tape
    pub const AMPEX_DST310: i32 = 202;
    /// StorageTek SD-3 tape
    pub const STK_SD3: i32 = 203;
    /// 4mm DAT tape
    pub const DAT: i32 = 204;
    /// Fujitsu M8100 tape
    pub const FUJITSU_M8100: i32 = 205;
    /// IBM 3570 tape
    pub const IBM_3570: i32 = 206;
    /// IBM 3580 LTO tape
    pub const IBM_3580_LTO: i32 = 207;
    /// DLT tape
    pub const DLT: i32 = 208;
    /// StorageTek 9490 tape
    pub const STK_9490: i32 = 209;
    /// StorageTek 9840 tape
    pub const STK_9840: i32 = 210;
    /// Sony DTF tape
    pub const SONY_DTF: i32 = 211;
    /// Metrum VHS tape
    pub const METRUM_VHS: i32 = 212;
    /// Exabyte Mammoth-2 tape
    pub const EXABYTE_MAMMOTH2: i32 = 213;
    /// Erasable optical disk
    pub const EOD: i32 = 214;
    /// Write-once optical disk
    pub const WOD: i32 = 215;
    /// IBM 3590 tape
    pub const IBM_3590: i32 = 216;
    /// StorageTek T9940 tape
    pub const STK_T9940: i32 = 217;
    /// StorageTek 3480 tape
    pub const STK_3480: i32 = 218;
    /// Exabyte 8mm tape
    pub const EXABYTE_8MM: i32 = 219;
    /// 12-inch write-once optical disk
    pub const WOD_12INCH: i32 = 220;
    /// Generic optical device
    pub const OPTICAL: i32 = 221;
    /// Generic tape device
    pub const TAPE: i32 = 222;
    /// Media changer robot
    pub const ROBOT: i32 = 223;
    /// Historian pseudo-library
    pub const HISTORIAN: i32 = 224;
    /// IBM 3494 library
    pub const IBM_3494: i32 = 225;
    /// Fujitsu LMF library
    pub const FUJ_LMF: i32 = 226;
    /// Sony PetaSite library
    pub const SONY_PETASITE: i32 = 227;
    /// ADIC DAS library
    pub const ADIC_DAS: i32 = 228;
    /// StorageTek ACSLS library
    pub const STK_ACSLS: i32 = 229;
    /// StorageTek 97xx library
    pub const STK_97XX: i32 = 230;
    /// HP L-series library
    pub const HP_L_SERIES: i32 = 231;
    /// Disk archive volume
    pub const DISK: i32 = 232;
    /// Quantum C4 library
    pub const QUANTUM_C4: i32 = 233;
    /// Titanium tape
    pub const TITAN: i32 = 234;
    /// StorageTek 5800 library
    pub const STK_5800: i32 = 235;
    /// HP SL48 library
    pub const HP_SL48: i32 = 236;
}

/// Two-letter equipment code for a device or media type code.
///
/// The equipment code doubles as the display-label key in the console
/// catalogs. Returns `""` for unrecognized codes, never fails.
#[must_use]
pub fn device_type_label(code: i32) -> &'static str {
    match code {
        device_type::MD => "md",
        device_type::MR => "mr",
        device_type::METADATA => "mm",
        device_type::SONY_AIT => "at",
        device_type::AMPEX_DST310 => "d2",
        device_type::STK_SD3 => "d3",
        device_type::DAT => "dt",
        device_type::FUJITSU_M8100 => "fd",
        device_type::IBM_3570 => "i7",
        device_type::IBM_3580_LTO => "li",
        device_type::DLT => "lt",
        device_type::STK_9490 => "se",
        device_type::STK_9840 => "sg",
        device_type::SONY_DTF => "so",
        device_type::METRUM_VHS => "vt",
        device_type::EXABYTE_MAMMOTH2 => "xm",
        device_type::EOD => "mo",
        device_type::WOD => "wo",
        device_type::IBM_3590 => "ib",
        device_type::STK_T9940 => "sf",
        device_type::STK_3480 => "st",
        device_type::EXABYTE_8MM => "xt",
        device_type::WOD_12INCH => "o2",
        device_type::OPTICAL => "od",
        device_type::TAPE => "tp",
        device_type::ROBOT => "rb",
        device_type::HISTORIAN => "hy",
        device_type::IBM_3494 => "im",
        device_type::FUJ_LMF => "fj",
        device_type::SONY_PETASITE => "pe",
        device_type::ADIC_DAS => "gr",
        device_type::STK_ACSLS => "sk",
        device_type::STK_97XX => "s9",
        device_type::HP_L_SERIES => "hc",
        device_type::DISK => "dk",
        device_type::QUANTUM_C4 => "c4",
        device_type::TITAN => "ti",
        device_type::STK_5800 => "cb",
        device_type::HP_SL48 => "h4",
        _ => "",
    }
}

/// Catalog key for a disk-cache type code.
///
/// Covers the disk-cache subset only. Returns `""` for unrecognized codes,
/// never fails.
#[must_use]
pub fn disk_cache_type_label(code: i32) -> &'static str {
    match code {
        device_type::MD => "devicetype.md",
        device_type::MR => "devicetype.mr",
        device_type::METADATA => "devicetype.mm",
        _ => "",
    }
}
