//! LR10 register offsets and bit assignments.
//!
//! Offsets are relative to the instance base of the owning block; see
//! [`super::WINDOWS`] for BAR0 placement.

#![allow(missing_docs)]

use bitflags::bitflags;

/// Bit helper
pub const fn bit(n: u32) -> u32 {
    1 << n
}

// =============================================================================
// TOP LEVEL
// =============================================================================

pub mod psmc {
    pub const INTR_LEGACY: u32 = 0x100;
    pub const INTR_EN_SET_LEGACY: u32 = 0x160;
    pub const INTR_EN_CLR_LEGACY: u32 = 0x180;
}

bitflags! {
    /// PSMC legacy interrupt sources
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LegacyIntr: u32 {
        const SAW       = 1 << 12;
        const PTIMER    = 1 << 20;
        const PMGR      = 1 << 24;
        const PBUS      = 1 << 28;
        const PRIV_RING = 1 << 30;
    }
}

pub mod xve {
    pub const CYA_2: u32 = 0x704;
    pub const MSI_REARM: u32 = 0xff;
}

pub mod saw {
    pub const INTR_FATAL: u32 = 0x100;
    pub const INTR_NONFATAL: u32 = 0x104;
    pub const INTR_CORRECTABLE: u32 = 0x108;
    pub const INTR_LEGACY: u32 = 0x10c;
    pub const INTR_EN_SET_FATAL: u32 = 0x110;
    pub const INTR_EN_SET_NONFATAL: u32 = 0x114;
    pub const INTR_EN_SET_CORRECTABLE: u32 = 0x118;
    pub const INTR_EN_SET_LEGACY: u32 = 0x11c;
    pub const SW_SCRATCH_12: u32 = 0x230;

    pub const NPG_SHIFT: u32 = 0;
    pub const NXBAR_SHIFT: u32 = 12;
    pub const NVLIPT_SHIFT: u32 = 16;
    pub const SOE: u32 = 1 << 28;

    pub const DEVICE_RESET_REQUIRED: u32 = 1 << 24;
}

// =============================================================================
// HOST
// =============================================================================

pub mod pbus {
    pub const INTR_0: u32 = 0x1100;
    pub const INTR_EN_0: u32 = 0x1140;
    pub const PRI_TIMEOUT_SAVE_0: u32 = 0x1200;
    pub const PRI_TIMEOUT_SAVE_1: u32 = 0x1204;
    pub const PRI_TIMEOUT_SAVE_3: u32 = 0x120c;
    pub const PRI_TIMEOUT_FECS_ERRCODE: u32 = 0x1210;

    pub const SAVE_0_TO: u32 = 1 << 0;
    pub const SAVE_0_WRITE: u32 = 1 << 1;
    pub const SAVE_0_ADDR_SHIFT: u32 = 2;
    pub const SAVE_0_ADDR_MASK: u32 = 0x00ff_ffff;
    pub const SAVE_3_SUBID_MASK: u32 = 0xff;
}

bitflags! {
    /// PBUS interrupt sources
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PbusIntr: u32 {
        const PRI_SQUASH  = 1 << 1;
        const PRI_FECSERR = 1 << 2;
        const PRI_TIMEOUT = 1 << 3;
        const SW          = 1 << 26;
    }
}

pub mod priv_master {
    pub const RING_INTERRUPT_STATUS0: u32 = 0x100;
    pub const RING_COMMAND: u32 = 0x04c;

    pub const CMD_MASK: u32 = 0x3f;
    pub const CMD_NO_CMD: u32 = 0x0;
    pub const CMD_ACK_INTERRUPT: u32 = 0x2;

    pub const GBL_WRITE_ERROR_SYS: u32 = 1 << 8;
    pub const GBL_WRITE_ERROR_FBP_SHIFT: u32 = 16;
    pub const GBL_WRITE_ERROR_FBP_COUNT: u32 = 16;
}

pub mod priv_station {
    pub const PRIV_ERROR_ADR: u32 = 0x128;
    pub const PRIV_ERROR_WRDAT: u32 = 0x12c;
    pub const PRIV_ERROR_INFO: u32 = 0x130;
    pub const PRIV_ERROR_CODE: u32 = 0x134;
}

// =============================================================================
// NPG / NPORT
// =============================================================================

pub mod npg {
    pub const NPG_INTERRUPT_STATUS: u32 = 0x000;
    pub const WARMRESET: u32 = 0x010;
    pub const DEBUG_CLEAR: u32 = 0x014;

    pub const DEV_STRIDE: u32 = 4;
    pub const DEV_FATAL: u32 = 1 << 0;
    pub const DEV_NONFATAL: u32 = 1 << 1;
    pub const DEV_CORRECTABLE: u32 = 1 << 2;
    pub const NPORT_MASK: u32 = 0xf;
}

pub mod nport {
    pub const CTRL: u32 = 0x040;
    pub const CTRL_SLCG: u32 = 0x044;
    pub const REQLINKID: u32 = 0x048;
    pub const CTRL_STOP: u32 = 0x04c;
    pub const CONTAIN_AND_DRAIN: u32 = 0x050;
    pub const INITIALIZATION: u32 = 0x054;
    pub const SCRATCH_WARM: u32 = 0x058;
    pub const ERR_CONTROL_COMMON_NPORT: u32 = 0x05c;
    pub const PORTSTAT_CONTROL: u32 = 0x100;
    pub const PORTSTAT_SNAP_CONTROL: u32 = 0x104;
    pub const PORTSTAT_WINDOW_LIMIT: u32 = 0x108;
    pub const SOURCE_FILTER_0: u32 = 0x170;
    pub const SOURCE_FILTER_1: u32 = 0x174;

    pub const fn portstat_limit_low(n: u32) -> u32 {
        0x110 + n * 0xc
    }

    pub const fn portstat_limit_medium(n: u32) -> u32 {
        0x114 + n * 0xc
    }

    pub const fn portstat_limit_high(n: u32) -> u32 {
        0x118 + n * 0xc
    }

    pub const CONTAIN_AND_DRAIN_CLEAR: u32 = 1 << 0;
    pub const TAGPOOLINIT_0_HWINIT: u32 = 1 << 0;
    pub const SCRATCH_WARM_PORT_RESET_REQUIRED: u32 = 1 << 0;
    pub const SCRATCH_WARM_DATA_INIT: u32 = 0xdead_baad;
}

bitflags! {
    /// NPORT traffic stop controls
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NportStop: u32 {
        const INGRESS_STOP = 1 << 0;
        const EGRESS_STOP  = 1 << 1;
    }
}

bitflags! {
    /// NPORT common interrupt enables
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NportCommonIntr: u32 {
        const CORRECTABLE = 1 << 0;
        const FATAL       = 1 << 1;
        const NONFATAL    = 1 << 2;
    }
}

/// Error register bank shared by NPORT sub-blocks and NVLIPT
pub mod err {
    pub const STATUS_0: u32 = 0x400;
    pub const LOG_EN_0: u32 = 0x404;
    pub const CONTAIN_EN_0: u32 = 0x408;
    pub const FATAL_REPORT_EN_0: u32 = 0x40c;
    pub const NON_FATAL_REPORT_EN_0: u32 = 0x410;
    pub const CORRECTABLE_REPORT_EN_0: u32 = 0x414;
    pub const FIRST_0: u32 = 0x41c;
    pub const REPORT_INJECT_0: u32 = 0x42c;
    pub const TIMESTAMP_LOG: u32 = 0x450;
    pub const HEADER_LOG_VALID: u32 = 0x454;
    pub const MISC_LOG_0: u32 = 0x458;
    pub const HEADER_LOG_0: u32 = 0x460;
    pub const HEADER_LOG_1: u32 = 0x464;
    pub const HEADER_LOG_2: u32 = 0x468;
    pub const HEADER_LOG_3: u32 = 0x46c;
    pub const ECC_CTRL: u32 = 0x470;

    pub const HEADER_LOG_VALID_BIT: u32 = 1 << 0;
    pub const ECC_ADDRESS_VALID: u32 = 1 << 0;

    pub const HEADER_LOG: [u32; 4] = [HEADER_LOG_0, HEADER_LOG_1, HEADER_LOG_2, HEADER_LOG_3];
}

pub mod route {
    use super::bit;

    pub const ROUTE_CONTROL: u32 = 0x480;
    pub const CMD_ROUTE_TABLE0: u32 = 0x484;
    pub const CMD_ROUTE_TABLE1: u32 = 0x488;
    pub const CMD_ROUTE_TABLE2: u32 = 0x48c;
    pub const CMD_ROUTE_TABLE3: u32 = 0x490;
    pub const REG_TABLE_ADDRESS: u32 = 0x4a0;
    pub const REG_TABLE_DATA0: u32 = 0x4a4;
    pub const GLT_ECC_ERROR_ADDRESS: u32 = 0x4b0;
    pub const GLT_ECC_ERROR_ADDRESS_VALID: u32 = 0x4b4;
    pub const GLT_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4b8;
    pub const NVS_ECC_ERROR_COUNTER: u32 = 0x4c0;
    pub const NVS_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4c4;

    pub const REG_TABLE_AUTO_INCR: u32 = 1 << 31;

    pub const ROUTEBUFERR: u32 = bit(0);
    pub const NOPORTDEFINEDERR: u32 = bit(1);
    pub const INVALIDROUTEPOLICYERR: u32 = bit(2);
    pub const GLT_ECC_LIMIT_ERR: u32 = bit(3);
    pub const GLT_ECC_DBE_ERR: u32 = bit(4);
    pub const TRANSDONERESVERR: u32 = bit(5);
    pub const PDCTRLPARERR: u32 = bit(6);
    pub const NVS_ECC_LIMIT_ERR: u32 = bit(7);
    pub const NVS_ECC_DBE_ERR: u32 = bit(8);
    pub const CDTPARERR: u32 = bit(9);
}

pub mod ingress {
    use super::bit;

    pub const REMAPTAB_ECC_ERROR_ADDRESS: u32 = 0x480;
    pub const REMAPTAB_ECC_ERROR_ADDRESS_VALID: u32 = 0x484;
    pub const REMAPTAB_ECC_ERROR_COUNTER: u32 = 0x488;
    pub const REMAPTAB_ECC_ERROR_COUNTER_LIMIT: u32 = 0x48c;
    pub const RIDTAB_ECC_ERROR_ADDRESS: u32 = 0x490;
    pub const RIDTAB_ECC_ERROR_ADDRESS_VALID: u32 = 0x494;
    pub const RIDTAB_ECC_ERROR_COUNTER: u32 = 0x498;
    pub const RIDTAB_ECC_ERROR_COUNTER_LIMIT: u32 = 0x49c;
    pub const RLANTAB_ECC_ERROR_ADDRESS: u32 = 0x4a0;
    pub const RLANTAB_ECC_ERROR_ADDRESS_VALID: u32 = 0x4a4;
    pub const RLANTAB_ECC_ERROR_COUNTER: u32 = 0x4a8;
    pub const RLANTAB_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4ac;
    pub const NCISOC_HDR_ECC_ERROR_COUNTER: u32 = 0x4b0;
    pub const NCISOC_HDR_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4b4;

    pub const CMDDECODEERR: u32 = bit(0);
    pub const INVALIDVCSET: u32 = bit(1);
    pub const REQCONTEXTMISMATCHERR: u32 = bit(2);
    pub const ACLFAIL: u32 = bit(3);
    pub const NCISOC_HDR_ECC_LIMIT_ERR: u32 = bit(4);
    pub const NCISOC_HDR_ECC_DBE_ERR: u32 = bit(5);
    pub const ADDRBOUNDSERR: u32 = bit(6);
    pub const RIDTABCFGERR: u32 = bit(7);
    pub const RLANTABCFGERR: u32 = bit(8);
    pub const REMAPTAB_ECC_DBE_ERR: u32 = bit(9);
    pub const RIDTAB_ECC_DBE_ERR: u32 = bit(10);
    pub const RLANTAB_ECC_DBE_ERR: u32 = bit(11);
    pub const NCISOC_PARITY_ERR: u32 = bit(12);
    pub const REMAPTAB_ECC_LIMIT_ERR: u32 = bit(13);
    pub const RIDTAB_ECC_LIMIT_ERR: u32 = bit(14);
    pub const RLANTAB_ECC_LIMIT_ERR: u32 = bit(15);
    pub const ADDRTYPEERR: u32 = bit(16);
}

pub mod egress {
    use super::bit;

    pub const CTRL: u32 = 0x480;
    pub const CTO_TIMER_LIMIT: u32 = 0x484;
    pub const NXBAR_ECC_ERROR_COUNTER: u32 = 0x490;
    pub const NXBAR_ECC_ERROR_COUNTER_LIMIT: u32 = 0x494;
    pub const RAM_OUT_ECC_ERROR_COUNTER: u32 = 0x4a0;
    pub const RAM_OUT_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4a4;
    pub const RAM_OUT_ECC_ERROR_ADDRESS: u32 = 0x4a8;
    pub const RAM_OUT_ECC_ERROR_ADDRESS_VALID: u32 = 0x4ac;

    pub const EGRESSBUFERR: u32 = bit(0);
    pub const PKTROUTEERR: u32 = bit(1);
    pub const SEQIDERR: u32 = bit(2);
    pub const NXBAR_HDR_ECC_LIMIT_ERR: u32 = bit(3);
    pub const NXBAR_HDR_ECC_DBE_ERR: u32 = bit(4);
    pub const RAM_OUT_HDR_ECC_LIMIT_ERR: u32 = bit(5);
    pub const RAM_OUT_HDR_ECC_DBE_ERR: u32 = bit(6);
    pub const NCISOCCREDITOVFL: u32 = bit(7);
    pub const REQTGTIDMISMATCHERR: u32 = bit(8);
    pub const RSPREQIDMISMATCHERR: u32 = bit(9);
    pub const URRSPERR: u32 = bit(10);
    pub const PRIVRSPERR: u32 = bit(11);
    pub const HWRSPERR: u32 = bit(12);
    pub const NXBAR_HDR_PARITY_ERR: u32 = bit(13);
    pub const NCISOC_CREDIT_PARITY_ERR: u32 = bit(14);
    pub const NXBAR_FLITTYPE_MISMATCH_ERR: u32 = bit(15);
    pub const CREDIT_TIME_OUT_ERR: u32 = bit(16);
}

pub mod tstate {
    use super::bit;

    pub const TAGSTATECONTROL: u32 = 0x480;
    pub const ATO_TIMER_LIMIT: u32 = 0x484;
    pub const CREQ_CAM_LOCK: u32 = 0x488;
    pub const TAGPOOL_ECC_ERROR_COUNTER: u32 = 0x490;
    pub const TAGPOOL_ECC_ERROR_COUNTER_LIMIT: u32 = 0x494;
    pub const TAGPOOL_ECC_ERROR_ADDRESS: u32 = 0x498;
    pub const TAGPOOL_ECC_ERROR_ADDRESS_VALID: u32 = 0x49c;
    pub const CRUMBSTORE_ECC_ERROR_COUNTER: u32 = 0x4a0;
    pub const CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4a4;
    pub const CRUMBSTORE_ECC_ERROR_ADDRESS: u32 = 0x4a8;
    pub const CRUMBSTORE_ECC_ERROR_ADDRESS_VALID: u32 = 0x4ac;
    pub const TD_TID_RAM_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4b4;

    pub const RAM_ADDRESS: u32 = 0x500;
    pub const RAM_DATA0: u32 = 0x504;
    pub const RAM_DATA1: u32 = 0x508;
    pub const RAM_DATA2: u32 = 0x50c;

    pub const RAM_SELECT_CREQ_CAM: u32 = 0x1 << 16;
    pub const RAM_SELECT_CRUMBSTORE: u32 = 0x2 << 16;
    pub const RAM_AUTO_INCR: u32 = 1 << 31;
    pub const RAM_DATA0_ECC_INIT: u32 = 0x7f << 25;
    pub const CRUMBSTORE_DEPTH: u32 = 0x3ff;
    pub const CREQ_CAM_DEPTH: u32 = 0x1f;

    pub const TAGPOOLBUFERR: u32 = bit(0);
    pub const TAGPOOL_ECC_LIMIT_ERR: u32 = bit(1);
    pub const TAGPOOL_ECC_DBE_ERR: u32 = bit(2);
    pub const CRUMBSTOREBUFERR: u32 = bit(3);
    pub const CRUMBSTORE_ECC_LIMIT_ERR: u32 = bit(4);
    pub const CRUMBSTORE_ECC_DBE_ERR: u32 = bit(5);
    pub const TD_TID_RAMBUFERR: u32 = bit(6);
    pub const TD_TID_RAM_ECC_LIMIT_ERR: u32 = bit(7);
    pub const TD_TID_RAM_ECC_DBE_ERR: u32 = bit(8);
    pub const ATO_ERR: u32 = bit(9);
    pub const CAMRSP_ERR: u32 = bit(10);
}

pub mod sourcetrack {
    use super::bit;

    pub const CTRL: u32 = 0x480;
    pub const MULTISEC_TIMER0: u32 = 0x484;
    pub const TCEN0_CRUMBSTORE_ECC_ERROR_COUNTER: u32 = 0x490;
    pub const TCEN0_CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT: u32 = 0x494;
    pub const TCEN0_CRUMBSTORE_ECC_ERROR_ADDRESS: u32 = 0x498;
    pub const TCEN0_CRUMBSTORE_ECC_ERROR_ADDRESS_VALID: u32 = 0x49c;
    pub const TCEN0_TD_CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4a4;
    pub const TCEN1_CRUMBSTORE_ECC_ERROR_COUNTER: u32 = 0x4b0;
    pub const TCEN1_CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT: u32 = 0x4b4;
    pub const TCEN1_CRUMBSTORE_ECC_ERROR_ADDRESS: u32 = 0x4b8;
    pub const TCEN1_CRUMBSTORE_ECC_ERROR_ADDRESS_VALID: u32 = 0x4bc;

    pub const CREQ_TCEN0_CRUMBSTORE_ECC_LIMIT_ERR: u32 = bit(0);
    pub const CREQ_TCEN0_TD_CRUMBSTORE_ECC_LIMIT_ERR: u32 = bit(1);
    pub const CREQ_TCEN1_CRUMBSTORE_ECC_LIMIT_ERR: u32 = bit(2);
    pub const CREQ_TCEN0_CRUMBSTORE_ECC_DBE_ERR: u32 = bit(3);
    pub const CREQ_TCEN0_TD_CRUMBSTORE_ECC_DBE_ERR: u32 = bit(4);
    pub const CREQ_TCEN1_CRUMBSTORE_ECC_DBE_ERR: u32 = bit(5);
    pub const SOURCETRACK_TIME_OUT_ERR: u32 = bit(6);
}

// =============================================================================
// NXBAR
// =============================================================================

pub mod nxbar {
    use super::bit;

    pub const TC_ERROR_STATUS: u32 = 0x500;
    pub const TILE_SHIFT: u32 = 0;
    pub const TILEOUT_SHIFT: u32 = 16;

    /// Tile error bank (TILE block, per link)
    pub const TILE_ERR_STATUS: u32 = 0x080;
    pub const TILE_ERR_FATAL_INTR_EN: u32 = 0x088;
    pub const TILE_ERR_FIRST: u32 = 0x08c;

    /// Tile-out error bank (NXBAR block, sub-indexed)
    pub const TILEOUT_ERR_STATUS: u32 = 0x1000;
    pub const TILEOUT_ERR_FATAL_INTR_EN: u32 = 0x1008;
    pub const TILEOUT_ERR_FIRST: u32 = 0x100c;
    pub const TILEOUT_STRIDE: u32 = 0x40;

    pub const INGRESS_BUFFER_OVERFLOW: u32 = bit(0);
    pub const INGRESS_BUFFER_UNDERFLOW: u32 = bit(1);
    pub const EGRESS_CREDIT_OVERFLOW: u32 = bit(2);
    pub const EGRESS_CREDIT_UNDERFLOW: u32 = bit(3);
    pub const INGRESS_NON_BURSTY_PKT: u32 = bit(4);
    pub const INGRESS_NON_STICKY_PKT: u32 = bit(5);
    pub const INGRESS_BURST_GT_9_DATA_VC: u32 = bit(6);
    pub const INGRESS_PKT_INVALID_DST: u32 = bit(7);
    pub const INGRESS_PKT_PARITY_ERROR: u32 = bit(8);
    pub const EGRESS_CDT_PARITY_ERROR: u32 = bit(7);
}

// =============================================================================
// NVLINK
// =============================================================================

pub mod nvlw {
    pub const COMMON_INTR_0_MASK: u32 = 0x180;
    pub const COMMON_INTR_1_MASK: u32 = 0x184;
    pub const COMMON_INTR_2_MASK: u32 = 0x188;
    pub const LINK_INTR_0_MASK: u32 = 0x240;
    pub const LINK_INTR_1_MASK: u32 = 0x244;
    pub const LINK_INTR_2_MASK: u32 = 0x248;
    pub const LINK_INTR_STRIDE: u32 = 0x20;
}

bitflags! {
    /// NVLW interrupt mask bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NvlwIntr: u32 {
        const FATAL       = 1 << 0;
        const NONFATAL    = 1 << 1;
        const CORRECTABLE = 1 << 2;
        const INTR0       = 1 << 3;
        const INTR1       = 1 << 4;
    }
}

pub mod nvlipt {
    use super::bit;

    pub const INTR_CONTROL_COMMON: u32 = 0x040;
    pub const INTR_CONTROL_LINK: u32 = 0x040;
    pub const INTR_CONTROL_INT0_EN: u32 = 1 << 0;
    pub const INTR_CONTROL_INT1_EN: u32 = 1 << 1;

    pub const CLKCTL_ILLEGAL_REQUEST: u32 = bit(0);
    pub const RSTSEQ_PLL_TIMEOUT: u32 = bit(1);
    pub const RSTSEQ_PHYARB_TIMEOUT: u32 = bit(2);

    pub const ILLEGALLINKSTATEREQUEST: u32 = bit(0);
    pub const FAILEDMINIONREQUEST: u32 = bit(1);
    pub const RESERVEDREQUESTVALUE: u32 = bit(2);
    pub const LINKSTATEWRITEWHILEBUSY: u32 = bit(3);
    pub const LINK_STATE_REQUEST_TIMEOUT: u32 = bit(4);
    pub const WRITE_TO_LOCKED_SYSTEM_REG_ERR: u32 = bit(5);
    pub const SLEEPWHILEACTIVELINK: u32 = bit(6);
    pub const RSTSEQ_PHYCTL_TIMEOUT: u32 = bit(7);
    pub const RSTSEQ_CLKCTL_TIMEOUT: u32 = bit(8);
}

pub mod nvldl {
    use super::bit;

    pub const INTR: u32 = 0x050;
    pub const INTR_SW2: u32 = 0x054;
    pub const INTR_STALL_EN: u32 = 0x058;
    pub const INTR_NONSTALL_EN: u32 = 0x05c;

    pub const TX_REPLAY: u32 = bit(0);
    pub const TX_RECOVERY_SHORT: u32 = bit(1);
    pub const TX_RECOVERY_LONG: u32 = bit(2);
    pub const TX_FAULT_RAM: u32 = bit(3);
    pub const TX_FAULT_INTERFACE: u32 = bit(4);
    pub const TX_FAULT_SUBLINK_CHANGE: u32 = bit(5);
    pub const RX_FAULT_SUBLINK_CHANGE: u32 = bit(16);
    pub const RX_FAULT_DL_PROTOCOL: u32 = bit(17);
    pub const RX_SHORT_ERROR_RATE: u32 = bit(18);
    pub const RX_LONG_ERROR_RATE: u32 = bit(19);
    pub const RX_ILA_TRIGGER: u32 = bit(20);
    pub const RX_CRC_COUNTER: u32 = bit(21);
    pub const LTSSM_FAULT_DOWN: u32 = bit(28);
    pub const LTSSM_FAULT_UP: u32 = bit(29);
    pub const LTSSM_PROTOCOL: u32 = bit(30);
    pub const MINION_REQUEST: u32 = bit(31);
}

/// NVLTLC error banks: each bank has the layout below at its base
pub mod nvltlc {
    use super::bit;

    pub const TX_SYS: u32 = 0x1380;
    pub const RX_SYS: u32 = 0x2380;
    pub const TX_LNK_0: u32 = 0x0a00;
    pub const TX_LNK_1: u32 = 0x0a40;
    pub const RX_LNK_0: u32 = 0x1a00;
    pub const RX_LNK_1: u32 = 0x1a40;

    pub const STATUS: u32 = 0x00;
    pub const LOG_EN: u32 = 0x04;
    pub const FATAL_REPORT_EN: u32 = 0x08;
    pub const NON_FATAL_REPORT_EN: u32 = 0x0c;
    pub const CORRECTABLE_REPORT_EN: u32 = 0x10;
    pub const FIRST: u32 = 0x14;
    pub const REPORT_INJECT: u32 = 0x18;

    // TX_SYS
    pub const TX_SYS_NCISOC_PARITY_ERR: u32 = bit(0);
    pub const TX_SYS_NCISOC_HDR_ECC_DBE_ERR: u32 = bit(1);
    pub const TX_SYS_NCISOC_DAT_ECC_DBE_ERR: u32 = bit(2);
    pub const TX_SYS_NCISOC_ECC_LIMIT_ERR: u32 = bit(3);
    pub const TXPOISONDET: u32 = bit(4);
    pub const TX_SYS_TXRSPSTATUS_HW_ERR: u32 = bit(5);
    pub const TX_SYS_TXRSPSTATUS_UR_ERR: u32 = bit(6);
    pub const TX_SYS_TXRSPSTATUS_PRIV_ERR: u32 = bit(7);

    // RX_SYS
    pub const RX_SYS_NCISOC_PARITY_ERR: u32 = bit(0);
    pub const RX_SYS_HDR_RAM_ECC_DBE_ERR: u32 = bit(1);
    pub const RX_SYS_HDR_RAM_ECC_LIMIT_ERR: u32 = bit(2);
    pub const RX_SYS_DAT0_RAM_ECC_DBE_ERR: u32 = bit(3);
    pub const RX_SYS_DAT0_RAM_ECC_LIMIT_ERR: u32 = bit(4);
    pub const RX_SYS_DAT1_RAM_ECC_DBE_ERR: u32 = bit(5);
    pub const RX_SYS_DAT1_RAM_ECC_LIMIT_ERR: u32 = bit(6);

    // TX_LNK bank 0
    pub const TXDLCREDITPARITYERR: u32 = bit(0);
    pub const CREQ_RAM_HDR_ECC_DBE_ERR: u32 = bit(1);
    pub const CREQ_RAM_DAT_ECC_DBE_ERR: u32 = bit(2);
    pub const CREQ_RAM_ECC_LIMIT_ERR: u32 = bit(3);
    pub const RSP_RAM_HDR_ECC_DBE_ERR: u32 = bit(4);
    pub const RSP_RAM_DAT_ECC_DBE_ERR: u32 = bit(5);
    pub const RSP_RAM_ECC_LIMIT_ERR: u32 = bit(6);
    pub const COM_RAM_HDR_ECC_DBE_ERR: u32 = bit(7);
    pub const COM_RAM_DAT_ECC_DBE_ERR: u32 = bit(8);
    pub const COM_RAM_ECC_LIMIT_ERR: u32 = bit(9);
    pub const RSP1_RAM_HDR_ECC_DBE_ERR: u32 = bit(10);
    pub const RSP1_RAM_DAT_ECC_DBE_ERR: u32 = bit(11);
    pub const RSP1_RAM_ECC_LIMIT_ERR: u32 = bit(12);

    // TX_LNK bank 1: AN1 timeout per VC
    pub const fn an1_timeout_vc(vc: u32) -> u32 {
        bit(vc)
    }

    // RX_LNK bank 0
    pub const RXDLHDRPARITYERR: u32 = bit(0);
    pub const RXDLDATAPARITYERR: u32 = bit(1);
    pub const RXDLCTRLPARITYERR: u32 = bit(2);
    pub const RXINVALIDAEERR: u32 = bit(3);
    pub const RXINVALIDBEERR: u32 = bit(4);
    pub const RXINVALIDADDRALIGNERR: u32 = bit(5);
    pub const RXPKTLENERR: u32 = bit(6);
    pub const RSVCMDENCERR: u32 = bit(7);
    pub const RSVDATLENENCERR: u32 = bit(8);
    pub const RSVPKTSTATUSERR: u32 = bit(9);
    pub const RSVCACHEATTRPROBEREQERR: u32 = bit(10);
    pub const RSVCACHEATTRPROBERSPERR: u32 = bit(11);
    pub const DATLENGTRMWREQMAXERR: u32 = bit(12);
    pub const DATLENLTATRRSPMINERR: u32 = bit(13);
    pub const INVALIDCACHEATTRPOERR: u32 = bit(14);
    pub const INVALIDCRERR: u32 = bit(15);
    pub const RXRSPSTATUS_HW_ERR: u32 = bit(16);
    pub const RXRSPSTATUS_UR_ERR: u32 = bit(17);
    pub const RXRSPSTATUS_PRIV_ERR: u32 = bit(18);
    pub const INVALID_COLLAPSED_RESPONSE_ERR: u32 = bit(19);

    // RX_LNK bank 1
    pub const RXHDROVFERR: u32 = bit(0);
    pub const RXDATAOVFERR: u32 = bit(1);
    pub const STOMPDETERR: u32 = bit(2);
    pub const RXPOISONERR: u32 = bit(3);
    pub const AN1_HEARTBEAT_TIMEOUT_ERR: u32 = bit(4);
}

// =============================================================================
// MINION
// =============================================================================

pub mod minion {
    pub const FALCON_IRQSCLR: u32 = 0x004;
    pub const FALCON_IRQSTAT: u32 = 0x008;
    pub const FALCON_IRQMASK: u32 = 0x018;

    pub const MINION_INTR: u32 = 0x810;
    pub const MINION_INTR_STALL_EN: u32 = 0x818;
    pub const MINION_INTR_NONSTALL_EN: u32 = 0x81c;
    pub const NVLINK_LINK_INTR: u32 = 0xa00;
    pub const NVLINK_LINK_INTR_STRIDE: u32 = 0x4;

    pub const INTR_LINK_SHIFT: u32 = 16;
    pub const INTR_LINK_FIELD: u32 = 0xffff;

    pub const LINK_INTR_CODE_MASK: u32 = 0xff;
    pub const LINK_INTR_SUBCODE_SHIFT: u32 = 8;
    pub const LINK_INTR_SUBCODE_MASK: u32 = 0xff;
    pub const LINK_INTR_STATE: u32 = 1 << 31;

    pub const CODE_NA: u32 = 0x00;
    pub const CODE_SWREQ: u32 = 0x01;
    pub const CODE_DLREQ: u32 = 0x02;
    pub const CODE_PMDISABLED: u32 = 0x03;
    pub const CODE_DLCMDFAULT: u32 = 0x04;
    pub const CODE_TLREQ: u32 = 0x05;
    pub const CODE_NOINIT: u32 = 0x10;
    pub const CODE_NOTIFY: u32 = 0x11;
    pub const CODE_LOCAL_CONFIG_ERR: u32 = 0x12;
    pub const CODE_NEGOTIATION_CONFIG_ERR: u32 = 0x13;
    pub const CODE_BADINIT: u32 = 0x14;
    pub const CODE_PMFAIL: u32 = 0x15;
}

bitflags! {
    /// MINION top-level interrupt sources, excluding per-link bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MinionIntr: u32 {
        const FATAL          = 1 << 0;
        const NONFATAL       = 1 << 1;
        const FALCON_STALL   = 1 << 2;
        const FALCON_NOSTALL = 1 << 3;
    }
}

bitflags! {
    /// Falcon interrupt sources
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FalconIrq: u32 {
        const GPTMR  = 1 << 0;
        const WDTMR  = 1 << 1;
        const MTHD   = 1 << 2;
        const CTXSW  = 1 << 3;
        const HALT   = 1 << 4;
        const EXTERR = 1 << 5;
        const SWGEN0 = 1 << 6;
        const SWGEN1 = 1 << 7;
    }
}
