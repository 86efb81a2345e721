//! # Register Maps
//!
//! Generation-agnostic description of where the fault registers live
//! and what their bits mean. Handlers walk [`UnitLayout`] rule tables
//! instead of hard-coding bit positions, so supporting a new switch
//! generation means writing a new map, not new handlers.

use core::fmt;

use nvswitch_core::taxonomy::{table_mask, BitRule};
use nvswitch_core::{Block, RegisterAddr, Severity};

// =============================================================================
// ERROR UNITS
// =============================================================================

/// One error register bank walked by the generic handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorUnit {
    /// NPORT routing
    Route,
    /// NPORT ingress
    Ingress,
    /// NPORT egress
    Egress,
    /// NPORT tag state
    Tstate,
    /// NPORT source tracking
    Sourcetrack,
    /// Crossbar tile (per link)
    Tile,
    /// Crossbar tile-out (per crossbar, sub-indexed by tile-out)
    Tileout,
    /// Data link layer
    Nvldl,
    /// Transaction layer, transmit system side
    NvltlcTxSys,
    /// Transaction layer, receive system side
    NvltlcRxSys,
    /// Transaction layer, transmit link side, bank 0
    NvltlcTxLnk0,
    /// Transaction layer, transmit link side, bank 1
    NvltlcTxLnk1,
    /// Transaction layer, receive link side, bank 0
    NvltlcRxLnk0,
    /// Transaction layer, receive link side, bank 1
    NvltlcRxLnk1,
    /// NVLink IP common (per NVLIPT instance)
    NvliptCommon,
    /// NVLink IP per-link
    NvliptLnk,
}

impl ErrorUnit {
    /// Number of units
    pub const COUNT: usize = 16;

    /// Every unit, in index order
    pub const ALL: [ErrorUnit; Self::COUNT] = [
        ErrorUnit::Route,
        ErrorUnit::Ingress,
        ErrorUnit::Egress,
        ErrorUnit::Tstate,
        ErrorUnit::Sourcetrack,
        ErrorUnit::Tile,
        ErrorUnit::Tileout,
        ErrorUnit::Nvldl,
        ErrorUnit::NvltlcTxSys,
        ErrorUnit::NvltlcRxSys,
        ErrorUnit::NvltlcTxLnk0,
        ErrorUnit::NvltlcTxLnk1,
        ErrorUnit::NvltlcRxLnk0,
        ErrorUnit::NvltlcRxLnk1,
        ErrorUnit::NvliptCommon,
        ErrorUnit::NvliptLnk,
    ];

    /// NPORT sub-blocks in service order
    pub const NPORT: [ErrorUnit; 5] = [
        ErrorUnit::Route,
        ErrorUnit::Ingress,
        ErrorUnit::Egress,
        ErrorUnit::Tstate,
        ErrorUnit::Sourcetrack,
    ];

    /// Units behind an NVLIPT instance
    pub const NVLINK: [ErrorUnit; 9] = [
        ErrorUnit::Nvldl,
        ErrorUnit::NvltlcTxSys,
        ErrorUnit::NvltlcRxSys,
        ErrorUnit::NvltlcTxLnk0,
        ErrorUnit::NvltlcTxLnk1,
        ErrorUnit::NvltlcRxLnk0,
        ErrorUnit::NvltlcRxLnk1,
        ErrorUnit::NvliptCommon,
        ErrorUnit::NvliptLnk,
    ];

    /// Every transaction layer bank
    pub const NVLTLC: [ErrorUnit; 6] = [
        ErrorUnit::NvltlcTxSys,
        ErrorUnit::NvltlcRxSys,
        ErrorUnit::NvltlcTxLnk0,
        ErrorUnit::NvltlcTxLnk1,
        ErrorUnit::NvltlcRxLnk0,
        ErrorUnit::NvltlcRxLnk1,
    ];

    /// Transaction layer fatal banks in service order
    pub const NVLTLC_FATAL: [ErrorUnit; 5] = [
        ErrorUnit::NvltlcTxSys,
        ErrorUnit::NvltlcRxSys,
        ErrorUnit::NvltlcTxLnk0,
        ErrorUnit::NvltlcRxLnk0,
        ErrorUnit::NvltlcRxLnk1,
    ];

    /// Transaction layer non-fatal banks in service order
    pub const NVLTLC_NONFATAL: [ErrorUnit; 4] = [
        ErrorUnit::NvltlcRxLnk0,
        ErrorUnit::NvltlcTxLnk0,
        ErrorUnit::NvltlcRxLnk1,
        ErrorUnit::NvltlcTxLnk1,
    ];

    /// Dense index for per-unit tables
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Whether the unit is instanced per link
    pub const fn is_per_link(&self) -> bool {
        !matches!(self, ErrorUnit::Tileout | ErrorUnit::NvliptCommon)
    }
}

impl fmt::Display for ErrorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// =============================================================================
// UNIT LAYOUT
// =============================================================================

/// Raw diagnostic capture registers of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureLayout {
    /// Error timestamp
    pub timestamp: u32,
    /// Header-log valid register
    pub header_valid: u32,
    /// Valid flag within `header_valid`
    pub header_valid_mask: u32,
    /// Miscellaneous log, read only when the header log is valid
    pub misc: u32,
    /// Header words, read only when the header log is valid
    pub header: &'static [u32],
}

/// Error registers and rule tables of one [`ErrorUnit`].
///
/// Register offsets are relative to the unit's instance in `block`.
/// Units with sub-instances inside one block (tile-outs) add
/// `sub * instance_stride` to every offset.
#[derive(Debug, Clone, Copy)]
pub struct UnitLayout {
    /// Unit described
    pub unit: ErrorUnit,
    /// Address space
    pub block: Block,
    /// Log tag
    pub name: &'static str,
    /// Pending status, write-one-to-clear
    pub status: u32,
    /// First-error latch, write-one-to-clear
    pub first: Option<u32>,
    /// Contain enable
    pub contain: Option<u32>,
    /// Log enable
    pub log_enable: Option<u32>,
    /// Fatal report enable (stall enable on the data link layer)
    pub fatal_enable: u32,
    /// Non-fatal report enable
    pub nonfatal_enable: Option<u32>,
    /// Correctable report enable
    pub correctable_enable: Option<u32>,
    /// Error injection register
    pub inject: Option<u32>,
    /// Offset between sub-instances
    pub instance_stride: u32,
    /// Raw diagnostic capture
    pub capture: Option<CaptureLayout>,
    /// Fatal tree rules, in walk order
    pub fatal: &'static [BitRule],
    /// Non-fatal tree rules, in walk order
    pub nonfatal: &'static [BitRule],
    /// Correctable tree rules, in walk order
    pub correctable: &'static [BitRule],
    /// Fatal report enable programmed at init
    pub default_fatal: u32,
    /// Non-fatal report enable programmed at init
    pub default_nonfatal: u32,
    /// Correctable report enable programmed at init
    pub default_correctable: u32,
    /// Contain enable programmed at init
    pub default_contain: u32,
    /// Mask pending bits out of the report enable on every pass
    pub suppress_always: bool,
}

impl UnitLayout {
    /// Rule table for a tree
    pub const fn rules(&self, severity: Severity) -> &'static [BitRule] {
        match severity {
            Severity::Fatal => self.fatal,
            Severity::NonFatal => self.nonfatal,
            Severity::Correctable => self.correctable,
        }
    }

    /// Report enable register for a tree
    pub const fn enable(&self, severity: Severity) -> Option<u32> {
        match severity {
            Severity::Fatal => Some(self.fatal_enable),
            Severity::NonFatal => self.nonfatal_enable,
            Severity::Correctable => self.correctable_enable,
        }
    }

    /// Report enable programmed at init for a tree
    pub const fn default_enable(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Fatal => self.default_fatal,
            Severity::NonFatal => self.default_nonfatal,
            Severity::Correctable => self.default_correctable,
        }
    }

    /// Every bit a tree's rules classify
    pub const fn classified(&self, severity: Severity) -> u32 {
        table_mask(self.rules(severity))
    }

    /// Offset of `reg` for sub-instance `sub`
    pub const fn at(&self, reg: u32, sub: u32) -> u32 {
        reg + sub * self.instance_stride
    }
}

// =============================================================================
// FIXED-FUNCTION LAYOUTS
// =============================================================================

/// Top of the interrupt tree: legacy summary, switch-wide summaries, scratch
#[derive(Debug, Clone, Copy)]
pub struct TopLayout {
    /// Legacy pending (PSMC)
    pub legacy_pending: u32,
    /// Legacy enable set
    pub legacy_enable_set: u32,
    /// Legacy enable clear
    pub legacy_enable_clear: u32,
    /// Legacy bit: switch-wide summary
    pub legacy_saw: u32,
    /// Legacy bit: privileged ring
    pub legacy_priv_ring: u32,
    /// Legacy bit: host bus
    pub legacy_pbus: u32,
    /// MSI rearm register (XVE)
    pub msi_rearm: u32,
    /// Value that rearms MSI delivery
    pub msi_rearm_value: u32,
    /// Switch-wide fatal summary (SAW)
    pub saw_fatal: u32,
    /// Switch-wide non-fatal summary
    pub saw_nonfatal: u32,
    /// Switch-wide correctable summary
    pub saw_correctable: u32,
    /// Switch-wide legacy summary
    pub saw_legacy: u32,
    /// Enable-set registers, fatal/non-fatal/correctable/legacy
    pub saw_enable_set: [u32; 4],
    /// First NPG bit in the summaries
    pub saw_npg_shift: u32,
    /// First NXBAR bit in the fatal summary
    pub saw_nxbar_shift: u32,
    /// First NVLIPT bit in the summaries
    pub saw_nvlipt_shift: u32,
    /// Management controller bit in the fatal summary
    pub saw_soe: u32,
    /// Device scratch register carrying the reset-required flag (SAW)
    pub device_scratch: u32,
    /// Device reset required flag
    pub device_reset_required: u32,
}

/// Host bus and privileged ring error registers
#[derive(Debug, Clone, Copy)]
pub struct HostLayout {
    /// PBUS pending
    pub pbus_intr: u32,
    /// PBUS enable
    pub pbus_intr_en: u32,
    /// Saved timed-out access: address, write and timeout flags
    pub pbus_save_0: u32,
    /// Saved timed-out access: data
    pub pbus_save_1: u32,
    /// Saved timed-out access: sub-id
    pub pbus_save_3: u32,
    /// FECS error code of the timed-out access
    pub pbus_fecs_errcode: u32,
    /// PRI squash bit
    pub pbus_squash: u32,
    /// FECS error bit
    pub pbus_fecserr: u32,
    /// PRI timeout bit
    pub pbus_timeout: u32,
    /// Software-generated bit
    pub pbus_sw: u32,
    /// Timeout flag in save 0
    pub save0_to: u32,
    /// Write flag in save 0
    pub save0_write: u32,
    /// Address field shift in save 0 (word address)
    pub save0_addr_shift: u32,
    /// Address field mask after shifting
    pub save0_addr_mask: u32,
    /// Sub-id field in save 3
    pub save3_subid_mask: u32,
    /// Ring interrupt status (PRIV_MASTER)
    pub ring_status0: u32,
    /// Ring command (PRIV_MASTER)
    pub ring_command: u32,
    /// Command field in `ring_command`
    pub ring_cmd_mask: u32,
    /// Idle command value
    pub ring_cmd_no_cmd: u32,
    /// Acknowledge-interrupt command value
    pub ring_cmd_ack: u32,
    /// System station global write error
    pub ring_sys_write_error: u32,
    /// First FBP station global write error bit
    pub ring_fbp_shift: u32,
    /// FBP stations reported in `ring_status0`
    pub ring_fbp_count: u32,
    /// Station error address (PRIV_SYS / PRIV_PRT)
    pub priv_error_adr: u32,
    /// Station error write data
    pub priv_error_wrdat: u32,
    /// Station error info
    pub priv_error_info: u32,
    /// Station error code
    pub priv_error_code: u32,
}

/// Port group summary and reset registers
#[derive(Debug, Clone, Copy)]
pub struct NpgLayout {
    /// Per-NPORT interrupt status
    pub status: u32,
    /// Bits between consecutive NPORT fields
    pub dev_stride: u32,
    /// Fatal flag within a field
    pub dev_fatal: u32,
    /// Non-fatal flag within a field
    pub dev_nonfatal: u32,
    /// Correctable flag within a field
    pub dev_correctable: u32,
    /// Per-NPORT warm reset, active low
    pub warm_reset: u32,
    /// Valid bits of `warm_reset`
    pub warm_reset_mask: u32,
    /// Per-NPORT debug clear
    pub debug_clear: u32,
    /// Valid bits of `debug_clear`
    pub debug_clear_mask: u32,
}

impl NpgLayout {
    /// Bit of NPORT `nport` in `status` for a tree
    pub const fn tree_bit(&self, nport: u32, severity: Severity) -> u32 {
        let flag = match severity {
            Severity::Fatal => self.dev_fatal,
            Severity::NonFatal => self.dev_nonfatal,
            Severity::Correctable => self.dev_correctable,
        };
        flag << (nport * self.dev_stride)
    }
}

/// Crossbar summary
#[derive(Debug, Clone, Copy)]
pub struct NxbarLayout {
    /// Tile and tile-out error summary
    pub tc_error_status: u32,
    /// First tile bit
    pub tile_shift: u32,
    /// First tile-out bit
    pub tileout_shift: u32,
}

/// NVLink wrapper and NVLIPT interrupt routing
#[derive(Debug, Clone, Copy)]
pub struct NvlinkLayout {
    /// Per-link interrupt masks 0/1/2 (NVLW), local link 0
    pub link_intr_mask: [u32; 3],
    /// Offset between local links
    pub link_intr_stride: u32,
    /// Common interrupt masks 0/1/2 (NVLW)
    pub common_intr_mask: [u32; 3],
    /// Per-link mask bits while running
    pub link_mask_bits: u32,
    /// Common mask bits while running
    pub common_mask_bits: u32,
    /// NVLIPT common interrupt control
    pub common_intr_control: u32,
    /// NVLIPT common interrupt control value
    pub common_intr_control_value: u32,
    /// NVLIPT per-link interrupt control (NVLIPT_LNK)
    pub link_intr_control: u32,
    /// NVLIPT per-link interrupt control value
    pub link_intr_control_value: u32,
    /// Data link layer non-fatal enable bits left off at init
    pub nvldl_nonfatal_init_off: u32,
}

impl NvlinkLayout {
    /// Mask register `which` of local link `local`
    pub const fn link_mask(&self, which: usize, local: u32) -> u32 {
        self.link_intr_mask[which] + local * self.link_intr_stride
    }
}

/// Classification of a link-management interrupt code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinionLinkClass {
    /// Link must be reset
    Fatal,
    /// Reported, link stays up
    NonFatal,
    /// Notification only
    Info,
}

/// Link-management interrupt code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinionLinkCode {
    /// Hardware code
    pub code: u32,
    /// Log name
    pub name: &'static str,
    /// Handling
    pub class: MinionLinkClass,
}

/// Link-management microcontroller registers
#[derive(Debug, Clone, Copy)]
pub struct MinionLayout {
    /// Interrupt status
    pub intr: u32,
    /// Stall (fatal tree) enable
    pub stall_en: u32,
    /// Non-stall enable
    pub nonstall_en: u32,
    /// Fatal bit
    pub fatal: u32,
    /// Non-fatal bit
    pub nonfatal: u32,
    /// Falcon stall bit
    pub falcon_stall: u32,
    /// Falcon non-stall bit
    pub falcon_nostall: u32,
    /// First per-link bit
    pub link_shift: u32,
    /// Per-link field mask after shifting
    pub link_field: u32,
    /// Per-link interrupt register, local link 0
    pub link_intr: u32,
    /// Offset between local links
    pub link_intr_stride: u32,
    /// Code field
    pub link_code_mask: u32,
    /// Sub-code field shift
    pub link_subcode_shift: u32,
    /// Sub-code field mask after shifting
    pub link_subcode_mask: u32,
    /// Pending / acknowledge bit in the per-link register
    pub link_state: u32,
    /// Known codes
    pub link_codes: &'static [MinionLinkCode],
    /// Falcon interrupt status
    pub falcon_irqstat: u32,
    /// Falcon interrupt mask
    pub falcon_irqmask: u32,
    /// Falcon interrupt clear, write-one-to-clear into `falcon_irqstat`
    pub falcon_irqsclr: u32,
    /// Watchdog expired
    pub irq_wdtmr: u32,
    /// Microcontroller halted
    pub irq_halt: u32,
    /// External error
    pub irq_exterr: u32,
    /// Software interrupt 0
    pub irq_swgen0: u32,
    /// Software interrupt 1
    pub irq_swgen1: u32,
}

impl MinionLayout {
    /// Per-link register of local link `local`
    pub const fn link_intr_at(&self, local: u32) -> u32 {
        self.link_intr + local * self.link_intr_stride
    }

    /// Bit of local link `local` in `intr` / `stall_en`
    pub const fn link_bit(&self, local: u32) -> u32 {
        1 << (self.link_shift + local)
    }

    /// Every per-link bit
    pub const fn link_bits(&self) -> u32 {
        self.link_field << self.link_shift
    }

    /// Decode a per-link code; unknown codes are fatal
    pub fn decode(&self, code: u32) -> MinionLinkCode {
        self.link_codes
            .iter()
            .copied()
            .find(|c| c.code == code)
            .unwrap_or(MinionLinkCode {
                code,
                name: "UNKNOWN",
                class: MinionLinkClass::Fatal,
            })
    }
}

/// NPORT control registers used by fault state and recovery
#[derive(Debug, Clone, Copy)]
pub struct NportLayout {
    /// Traffic stop control
    pub ctrl_stop: u32,
    /// Ingress and egress stop bits
    pub stop_bits: u32,
    /// Contain-and-drain latch
    pub contain_and_drain: u32,
    /// Latch clear bit
    pub contain_clear: u32,
    /// RAM initialization control
    pub initialization: u32,
    /// Tag pool hardware-init bit
    pub tagpool_init: u32,
    /// Warm scratch register (survives port reset)
    pub scratch_warm: u32,
    /// Port reset required flag
    pub port_reset_required: u32,
    /// Pattern hardware leaves in `scratch_warm` after cold boot
    pub scratch_init_pattern: u32,
    /// NPORT common interrupt control
    pub err_control_common: u32,
    /// Correctable, fatal and non-fatal enable bits
    pub common_enable_bits: u32,
    /// Tag state RAM address (TSTATE block)
    pub ram_address: u32,
    /// Tag state RAM data 0/1/2
    pub ram_data: [u32; 3],
    /// Address select for the crumb store RAM
    pub ram_select_crumbstore: u32,
    /// Address select for the request CAM
    pub ram_select_cam: u32,
    /// Auto-increment flag in `ram_address`
    pub ram_auto_incr: u32,
    /// Data 0 value that zeroes a crumb store entry with valid ECC
    pub crumbstore_zero_data0: u32,
    /// Last crumb store index
    pub crumbstore_depth: u32,
    /// Last request CAM index
    pub cam_depth: u32,
    /// Ganged link table address (ROUTE block)
    pub ganged_table_address: u32,
    /// Ganged link table data (ROUTE block)
    pub ganged_table_data: u32,
    /// Auto-increment flag in `ganged_table_address`
    pub ganged_table_auto_incr: u32,
}

// =============================================================================
// REGISTER MAP TRAIT
// =============================================================================

/// Register map of one switch generation
pub trait RegisterMap: Sync {
    /// Generation name
    fn generation(&self) -> &'static str;

    /// Error unit layout
    fn unit(&self, unit: ErrorUnit) -> &'static UnitLayout;

    /// Top-level summaries
    fn top(&self) -> &'static TopLayout;

    /// Host bus and privileged ring
    fn host(&self) -> &'static HostLayout;

    /// Port groups
    fn npg(&self) -> &'static NpgLayout;

    /// Crossbar summary
    fn nxbar(&self) -> &'static NxbarLayout;

    /// NVLink wrapper routing
    fn nvlink(&self) -> &'static NvlinkLayout;

    /// Link-management microcontroller
    fn minion(&self) -> &'static MinionLayout;

    /// NPORT control
    fn nport(&self) -> &'static NportLayout;

    /// Per-port registers preserved across a port reset, in restore order
    fn snapshot_registers(&self) -> &'static [RegisterAddr];
}
