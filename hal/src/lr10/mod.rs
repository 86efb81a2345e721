//! # LR10 Register Map
//!
//! First-generation NVSwitch: 36 links in 9 NPGs of 4 NPORTs, 9 NVLIPT
//! instances of 4 links each and 4 crossbars.

pub mod regs;
mod tables;

use nvswitch_core::{Block, RegisterAddr};
use static_assertions::const_assert;

use crate::io::BlockWindow;
use crate::regmap::{
    ErrorUnit, HostLayout, MinionLayout, MinionLinkClass, MinionLinkCode, NpgLayout, NportLayout,
    NvlinkLayout, NxbarLayout, RegisterMap, TopLayout, UnitLayout,
};
use regs::{
    egress, err, ingress, minion, npg, nport, nvlipt, nvlw, nxbar, pbus, priv_master, priv_station,
    psmc, route, saw, sourcetrack, tstate, xve, FalconIrq, LegacyIntr, MinionIntr, NportCommonIntr, NportStop, NvlwIntr, PbusIntr,
};

/// Links per device
pub const NUM_LINKS: u32 = 36;
/// NPORTs per NPG
pub const LINKS_PER_NPG: u32 = 4;
/// Links per NVLIPT instance
pub const LINKS_PER_NVLIPT: u32 = 4;
/// NPG instances
pub const NUM_NPG: u32 = NUM_LINKS / LINKS_PER_NPG;
/// NVLIPT instances
pub const NUM_NVLIPT: u32 = NUM_LINKS / LINKS_PER_NVLIPT;
/// Crossbar instances
pub const NUM_NXBAR: u32 = 4;
/// Tiles per crossbar
pub const TILES_PER_NXBAR: u32 = 9;
/// Tile-outs per crossbar
pub const TILEOUTS_PER_NXBAR: u32 = 9;

const_assert!(NUM_NXBAR * TILES_PER_NXBAR == NUM_LINKS);
const_assert!(NUM_LINKS as usize <= nvswitch_core::MAX_LINKS);

// =============================================================================
// BAR0 PLACEMENT
// =============================================================================

const fn window(block: Block, base: u32, stride: u32, count: u32, size: u32) -> BlockWindow {
    BlockWindow {
        block,
        base,
        stride,
        count,
        size,
    }
}

/// Block placement in BAR0
pub static WINDOWS: [BlockWindow; 22] = [
    window(Block::Psmc, 0x00_0000, 0, 1, 0x1000),
    window(Block::Pbus, 0x00_1000, 0, 1, 0x2000),
    window(Block::Saw, 0x02_8000, 0, 1, 0x1000),
    window(Block::Xve, 0x08_8000, 0, 1, 0x1000),
    window(Block::PrivMaster, 0x12_0000, 0, 1, 0x1000),
    window(Block::PrivSys, 0x12_2000, 0, 1, 0x1000),
    window(Block::PrivPrt, 0x12_4000, 0x1000, priv_master::GBL_WRITE_ERROR_FBP_COUNT, 0x1000),
    window(Block::Npg, 0x40_0000, 0x1000, NUM_NPG, 0x1000),
    window(Block::Nport, 0x41_0000, 0x4000, NUM_LINKS, 0x1000),
    window(Block::Route, 0x41_1000, 0x4000, NUM_LINKS, 0x800),
    window(Block::Ingress, 0x41_1800, 0x4000, NUM_LINKS, 0x800),
    window(Block::Egress, 0x41_2000, 0x4000, NUM_LINKS, 0x800),
    window(Block::Tstate, 0x41_2800, 0x4000, NUM_LINKS, 0x800),
    window(Block::Sourcetrack, 0x41_3000, 0x4000, NUM_LINKS, 0x800),
    window(Block::Nxbar, 0x50_0000, 0x8000, NUM_NXBAR, 0x2000),
    window(Block::Tile, 0x54_0000, 0x100, NUM_LINKS, 0x100),
    window(Block::Nvlw, 0x60_0000, 0x1_0000, NUM_NVLIPT, 0x1000),
    window(Block::Nvlipt, 0x60_1000, 0x1_0000, NUM_NVLIPT, 0x1000),
    window(Block::Minion, 0x60_2000, 0x1_0000, NUM_NVLIPT, 0x1000),
    window(Block::NvliptLnk, 0x70_0000, 0x8000, NUM_LINKS, 0x1000),
    window(Block::Nvldl, 0x70_1000, 0x8000, NUM_LINKS, 0x1000),
    window(Block::Nvltlc, 0x70_2000, 0x8000, NUM_LINKS, 0x4000),
];

/// Bytes of BAR0 the windows decode
pub const BAR0_SIZE: usize = 0x82_0000;

// =============================================================================
// FIXED-FUNCTION LAYOUTS
// =============================================================================

static TOP: TopLayout = TopLayout {
    legacy_pending: psmc::INTR_LEGACY,
    legacy_enable_set: psmc::INTR_EN_SET_LEGACY,
    legacy_enable_clear: psmc::INTR_EN_CLR_LEGACY,
    legacy_saw: LegacyIntr::SAW.bits(),
    legacy_priv_ring: LegacyIntr::PRIV_RING.bits(),
    legacy_pbus: LegacyIntr::PBUS.bits(),
    msi_rearm: xve::CYA_2,
    msi_rearm_value: xve::MSI_REARM,
    saw_fatal: saw::INTR_FATAL,
    saw_nonfatal: saw::INTR_NONFATAL,
    saw_correctable: saw::INTR_CORRECTABLE,
    saw_legacy: saw::INTR_LEGACY,
    saw_enable_set: [
        saw::INTR_EN_SET_FATAL,
        saw::INTR_EN_SET_NONFATAL,
        saw::INTR_EN_SET_CORRECTABLE,
        saw::INTR_EN_SET_LEGACY,
    ],
    saw_npg_shift: saw::NPG_SHIFT,
    saw_nxbar_shift: saw::NXBAR_SHIFT,
    saw_nvlipt_shift: saw::NVLIPT_SHIFT,
    saw_soe: saw::SOE,
    device_scratch: saw::SW_SCRATCH_12,
    device_reset_required: saw::DEVICE_RESET_REQUIRED,
};

static HOST: HostLayout = HostLayout {
    pbus_intr: pbus::INTR_0,
    pbus_intr_en: pbus::INTR_EN_0,
    pbus_save_0: pbus::PRI_TIMEOUT_SAVE_0,
    pbus_save_1: pbus::PRI_TIMEOUT_SAVE_1,
    pbus_save_3: pbus::PRI_TIMEOUT_SAVE_3,
    pbus_fecs_errcode: pbus::PRI_TIMEOUT_FECS_ERRCODE,
    pbus_squash: PbusIntr::PRI_SQUASH.bits(),
    pbus_fecserr: PbusIntr::PRI_FECSERR.bits(),
    pbus_timeout: PbusIntr::PRI_TIMEOUT.bits(),
    pbus_sw: PbusIntr::SW.bits(),
    save0_to: pbus::SAVE_0_TO,
    save0_write: pbus::SAVE_0_WRITE,
    save0_addr_shift: pbus::SAVE_0_ADDR_SHIFT,
    save0_addr_mask: pbus::SAVE_0_ADDR_MASK,
    save3_subid_mask: pbus::SAVE_3_SUBID_MASK,
    ring_status0: priv_master::RING_INTERRUPT_STATUS0,
    ring_command: priv_master::RING_COMMAND,
    ring_cmd_mask: priv_master::CMD_MASK,
    ring_cmd_no_cmd: priv_master::CMD_NO_CMD,
    ring_cmd_ack: priv_master::CMD_ACK_INTERRUPT,
    ring_sys_write_error: priv_master::GBL_WRITE_ERROR_SYS,
    ring_fbp_shift: priv_master::GBL_WRITE_ERROR_FBP_SHIFT,
    ring_fbp_count: priv_master::GBL_WRITE_ERROR_FBP_COUNT,
    priv_error_adr: priv_station::PRIV_ERROR_ADR,
    priv_error_wrdat: priv_station::PRIV_ERROR_WRDAT,
    priv_error_info: priv_station::PRIV_ERROR_INFO,
    priv_error_code: priv_station::PRIV_ERROR_CODE,
};

static NPG: NpgLayout = NpgLayout {
    status: npg::NPG_INTERRUPT_STATUS,
    dev_stride: npg::DEV_STRIDE,
    dev_fatal: npg::DEV_FATAL,
    dev_nonfatal: npg::DEV_NONFATAL,
    dev_correctable: npg::DEV_CORRECTABLE,
    warm_reset: npg::WARMRESET,
    warm_reset_mask: npg::NPORT_MASK,
    debug_clear: npg::DEBUG_CLEAR,
    debug_clear_mask: npg::NPORT_MASK,
};

static NXBAR: NxbarLayout = NxbarLayout {
    tc_error_status: nxbar::TC_ERROR_STATUS,
    tile_shift: nxbar::TILE_SHIFT,
    tileout_shift: nxbar::TILEOUT_SHIFT,
};

static NVLINK: NvlinkLayout = NvlinkLayout {
    link_intr_mask: [
        nvlw::LINK_INTR_0_MASK,
        nvlw::LINK_INTR_1_MASK,
        nvlw::LINK_INTR_2_MASK,
    ],
    link_intr_stride: nvlw::LINK_INTR_STRIDE,
    common_intr_mask: [
        nvlw::COMMON_INTR_0_MASK,
        nvlw::COMMON_INTR_1_MASK,
        nvlw::COMMON_INTR_2_MASK,
    ],
    link_mask_bits: NvlwIntr::FATAL
        .union(NvlwIntr::NONFATAL)
        .union(NvlwIntr::CORRECTABLE)
        .bits(),
    common_mask_bits: NvlwIntr::FATAL
        .union(NvlwIntr::NONFATAL)
        .union(NvlwIntr::CORRECTABLE)
        .bits(),
    common_intr_control: nvlipt::INTR_CONTROL_COMMON,
    common_intr_control_value: nvlipt::INTR_CONTROL_INT0_EN | nvlipt::INTR_CONTROL_INT1_EN,
    link_intr_control: nvlipt::INTR_CONTROL_LINK,
    link_intr_control_value: nvlipt::INTR_CONTROL_INT0_EN | nvlipt::INTR_CONTROL_INT1_EN,
    nvldl_nonfatal_init_off: tables::NVLDL_NONFATAL_INIT_OFF,
};

const fn code(code: u32, name: &'static str, class: MinionLinkClass) -> MinionLinkCode {
    MinionLinkCode { code, name, class }
}

static MINION_LINK_CODES: [MinionLinkCode; 12] = [
    code(minion::CODE_NA, "NA", MinionLinkClass::Fatal),
    code(minion::CODE_SWREQ, "SWREQ", MinionLinkClass::Info),
    code(minion::CODE_DLREQ, "DLREQ", MinionLinkClass::NonFatal),
    code(minion::CODE_PMDISABLED, "PMDISABLED", MinionLinkClass::NonFatal),
    code(minion::CODE_DLCMDFAULT, "DLCMDFAULT", MinionLinkClass::Fatal),
    code(minion::CODE_TLREQ, "TLREQ", MinionLinkClass::NonFatal),
    code(minion::CODE_NOINIT, "NOINIT", MinionLinkClass::Fatal),
    code(minion::CODE_NOTIFY, "NOTIFY", MinionLinkClass::Info),
    code(minion::CODE_LOCAL_CONFIG_ERR, "LOCAL_CONFIG_ERR", MinionLinkClass::Fatal),
    code(
        minion::CODE_NEGOTIATION_CONFIG_ERR,
        "NEGOTIATION_CONFIG_ERR",
        MinionLinkClass::Fatal,
    ),
    code(minion::CODE_BADINIT, "BADINIT", MinionLinkClass::Fatal),
    code(minion::CODE_PMFAIL, "PMFAIL", MinionLinkClass::Fatal),
];

static MINION: MinionLayout = MinionLayout {
    intr: minion::MINION_INTR,
    stall_en: minion::MINION_INTR_STALL_EN,
    nonstall_en: minion::MINION_INTR_NONSTALL_EN,
    fatal: MinionIntr::FATAL.bits(),
    nonfatal: MinionIntr::NONFATAL.bits(),
    falcon_stall: MinionIntr::FALCON_STALL.bits(),
    falcon_nostall: MinionIntr::FALCON_NOSTALL.bits(),
    link_shift: minion::INTR_LINK_SHIFT,
    link_field: (1 << LINKS_PER_NVLIPT) - 1,
    link_intr: minion::NVLINK_LINK_INTR,
    link_intr_stride: minion::NVLINK_LINK_INTR_STRIDE,
    link_code_mask: minion::LINK_INTR_CODE_MASK,
    link_subcode_shift: minion::LINK_INTR_SUBCODE_SHIFT,
    link_subcode_mask: minion::LINK_INTR_SUBCODE_MASK,
    link_state: minion::LINK_INTR_STATE,
    link_codes: &MINION_LINK_CODES,
    falcon_irqstat: minion::FALCON_IRQSTAT,
    falcon_irqmask: minion::FALCON_IRQMASK,
    falcon_irqsclr: minion::FALCON_IRQSCLR,
    irq_wdtmr: FalconIrq::WDTMR.bits(),
    irq_halt: FalconIrq::HALT.bits(),
    irq_exterr: FalconIrq::EXTERR.bits(),
    irq_swgen0: FalconIrq::SWGEN0.bits(),
    irq_swgen1: FalconIrq::SWGEN1.bits(),
};

static NPORT: NportLayout = NportLayout {
    ctrl_stop: nport::CTRL_STOP,
    stop_bits: NportStop::INGRESS_STOP.union(NportStop::EGRESS_STOP).bits(),
    contain_and_drain: nport::CONTAIN_AND_DRAIN,
    contain_clear: nport::CONTAIN_AND_DRAIN_CLEAR,
    initialization: nport::INITIALIZATION,
    tagpool_init: nport::TAGPOOLINIT_0_HWINIT,
    scratch_warm: nport::SCRATCH_WARM,
    port_reset_required: nport::SCRATCH_WARM_PORT_RESET_REQUIRED,
    scratch_init_pattern: nport::SCRATCH_WARM_DATA_INIT,
    err_control_common: nport::ERR_CONTROL_COMMON_NPORT,
    common_enable_bits: NportCommonIntr::all().bits(),
    ram_address: tstate::RAM_ADDRESS,
    ram_data: [tstate::RAM_DATA0, tstate::RAM_DATA1, tstate::RAM_DATA2],
    ram_select_crumbstore: tstate::RAM_SELECT_CRUMBSTORE,
    ram_select_cam: tstate::RAM_SELECT_CREQ_CAM,
    ram_auto_incr: tstate::RAM_AUTO_INCR,
    crumbstore_zero_data0: tstate::RAM_DATA0_ECC_INIT,
    crumbstore_depth: tstate::CRUMBSTORE_DEPTH,
    cam_depth: tstate::CREQ_CAM_DEPTH,
    ganged_table_address: route::REG_TABLE_ADDRESS,
    ganged_table_data: route::REG_TABLE_DATA0,
    ganged_table_auto_incr: route::REG_TABLE_AUTO_INCR,
};

// =============================================================================
// RECOVERY SNAPSHOT
// =============================================================================

const fn at(block: Block, offset: u32) -> RegisterAddr {
    RegisterAddr::new(block, offset)
}

/// Registers preserved across a port reset
pub const SNAPSHOT_REGISTERS: usize = 73;

/// Per-port configuration preserved across a port reset, in restore order
static SNAPSHOT: [RegisterAddr; SNAPSHOT_REGISTERS] = [
    at(Block::Nport, nport::CTRL),
    at(Block::Nport, nport::CTRL_SLCG),
    at(Block::Nport, nport::REQLINKID),
    at(Block::Nport, nport::PORTSTAT_CONTROL),
    at(Block::Nport, nport::PORTSTAT_SNAP_CONTROL),
    at(Block::Nport, nport::PORTSTAT_WINDOW_LIMIT),
    at(Block::Nport, nport::portstat_limit_low(0)),
    at(Block::Nport, nport::portstat_limit_medium(0)),
    at(Block::Nport, nport::portstat_limit_high(0)),
    at(Block::Nport, nport::portstat_limit_low(1)),
    at(Block::Nport, nport::portstat_limit_medium(1)),
    at(Block::Nport, nport::portstat_limit_high(1)),
    at(Block::Nport, nport::portstat_limit_low(2)),
    at(Block::Nport, nport::portstat_limit_medium(2)),
    at(Block::Nport, nport::portstat_limit_high(2)),
    at(Block::Nport, nport::portstat_limit_low(3)),
    at(Block::Nport, nport::portstat_limit_medium(3)),
    at(Block::Nport, nport::portstat_limit_high(3)),
    at(Block::Nport, nport::portstat_limit_low(4)),
    at(Block::Nport, nport::portstat_limit_medium(4)),
    at(Block::Nport, nport::portstat_limit_high(4)),
    at(Block::Nport, nport::portstat_limit_low(5)),
    at(Block::Nport, nport::portstat_limit_medium(5)),
    at(Block::Nport, nport::portstat_limit_high(5)),
    at(Block::Nport, nport::portstat_limit_low(6)),
    at(Block::Nport, nport::portstat_limit_medium(6)),
    at(Block::Nport, nport::portstat_limit_high(6)),
    at(Block::Nport, nport::portstat_limit_low(7)),
    at(Block::Nport, nport::portstat_limit_medium(7)),
    at(Block::Nport, nport::portstat_limit_high(7)),
    at(Block::Nport, nport::SOURCE_FILTER_0),
    at(Block::Nport, nport::SOURCE_FILTER_1),
    // route
    at(Block::Route, route::ROUTE_CONTROL),
    at(Block::Route, route::CMD_ROUTE_TABLE0),
    at(Block::Route, route::CMD_ROUTE_TABLE1),
    at(Block::Route, route::CMD_ROUTE_TABLE2),
    at(Block::Route, route::CMD_ROUTE_TABLE3),
    at(Block::Route, err::LOG_EN_0),
    at(Block::Route, err::CONTAIN_EN_0),
    at(Block::Route, err::ECC_CTRL),
    at(Block::Route, route::GLT_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Route, route::NVS_ECC_ERROR_COUNTER_LIMIT),
    // ingress
    at(Block::Ingress, err::LOG_EN_0),
    at(Block::Ingress, err::CONTAIN_EN_0),
    at(Block::Ingress, err::ECC_CTRL),
    at(Block::Ingress, ingress::REMAPTAB_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Ingress, ingress::RIDTAB_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Ingress, ingress::RLANTAB_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Ingress, ingress::NCISOC_HDR_ECC_ERROR_COUNTER_LIMIT),
    // egress
    at(Block::Egress, egress::CTRL),
    at(Block::Egress, egress::CTO_TIMER_LIMIT),
    at(Block::Egress, err::LOG_EN_0),
    at(Block::Egress, err::CONTAIN_EN_0),
    at(Block::Egress, err::ECC_CTRL),
    at(Block::Egress, egress::NXBAR_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Egress, egress::RAM_OUT_ECC_ERROR_COUNTER_LIMIT),
    // tstate
    at(Block::Tstate, tstate::TAGSTATECONTROL),
    at(Block::Tstate, tstate::ATO_TIMER_LIMIT),
    at(Block::Tstate, tstate::CREQ_CAM_LOCK),
    at(Block::Tstate, err::LOG_EN_0),
    at(Block::Tstate, err::CONTAIN_EN_0),
    at(Block::Tstate, err::ECC_CTRL),
    at(Block::Tstate, tstate::CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Tstate, tstate::TAGPOOL_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Tstate, tstate::TD_TID_RAM_ECC_ERROR_COUNTER_LIMIT),
    // sourcetrack
    at(Block::Sourcetrack, sourcetrack::CTRL),
    at(Block::Sourcetrack, sourcetrack::MULTISEC_TIMER0),
    at(Block::Sourcetrack, err::LOG_EN_0),
    at(Block::Sourcetrack, err::CONTAIN_EN_0),
    at(Block::Sourcetrack, err::ECC_CTRL),
    at(Block::Sourcetrack, sourcetrack::TCEN0_CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Sourcetrack, sourcetrack::TCEN0_TD_CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT),
    at(Block::Sourcetrack, sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT),
];

// =============================================================================
// REGISTER MAP
// =============================================================================

/// LR10 register map
#[derive(Debug, Clone, Copy, Default)]
pub struct Lr10;

impl RegisterMap for Lr10 {
    fn generation(&self) -> &'static str {
        "lr10"
    }

    fn unit(&self, unit: ErrorUnit) -> &'static UnitLayout {
        match unit {
            ErrorUnit::Route => &tables::ROUTE,
            ErrorUnit::Ingress => &tables::INGRESS,
            ErrorUnit::Egress => &tables::EGRESS,
            ErrorUnit::Tstate => &tables::TSTATE,
            ErrorUnit::Sourcetrack => &tables::SOURCETRACK,
            ErrorUnit::Tile => &tables::TILE,
            ErrorUnit::Tileout => &tables::TILEOUT,
            ErrorUnit::Nvldl => &tables::NVLDL,
            ErrorUnit::NvltlcTxSys => &tables::NVLTLC_TX_SYS,
            ErrorUnit::NvltlcRxSys => &tables::NVLTLC_RX_SYS,
            ErrorUnit::NvltlcTxLnk0 => &tables::NVLTLC_TX_LNK0,
            ErrorUnit::NvltlcTxLnk1 => &tables::NVLTLC_TX_LNK1,
            ErrorUnit::NvltlcRxLnk0 => &tables::NVLTLC_RX_LNK0,
            ErrorUnit::NvltlcRxLnk1 => &tables::NVLTLC_RX_LNK1,
            ErrorUnit::NvliptCommon => &tables::NVLIPT_COMMON,
            ErrorUnit::NvliptLnk => &tables::NVLIPT_LNK,
        }
    }

    fn top(&self) -> &'static TopLayout {
        &TOP
    }

    fn host(&self) -> &'static HostLayout {
        &HOST
    }

    fn npg(&self) -> &'static NpgLayout {
        &NPG
    }

    fn nxbar(&self) -> &'static NxbarLayout {
        &NXBAR
    }

    fn nvlink(&self) -> &'static NvlinkLayout {
        &NVLINK
    }

    fn minion(&self) -> &'static MinionLayout {
        &MINION
    }

    fn nport(&self) -> &'static NportLayout {
        &NPORT
    }

    fn snapshot_registers(&self) -> &'static [RegisterAddr] {
        &SNAPSHOT
    }
}
