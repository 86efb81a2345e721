//! LR10 classification tables.
//!
//! One rule table per interrupt tree of each error unit, in walk order.
//! Bits without a rule are left pending and reported as unhandled.

use nvswitch_core::taxonomy::{sxid, table_mask, BitRule, EccRule};
use nvswitch_core::{Block, NvlinkErrorKind};

use super::regs::{egress, err, ingress, nvldl, nvlipt, nvltlc, nxbar, route, sourcetrack, tstate};
use crate::regmap::{CaptureLayout, ErrorUnit, UnitLayout};

/// Union of the containable bits in a table
const fn contain_mask(rules: &[BitRule]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < rules.len() {
        if rules[i].containable {
            mask |= rules[i].bit;
        }
        i += 1;
    }
    mask
}

const NPORT_CAPTURE: CaptureLayout = CaptureLayout {
    timestamp: err::TIMESTAMP_LOG,
    header_valid: err::HEADER_LOG_VALID,
    header_valid_mask: err::HEADER_LOG_VALID_BIT,
    misc: err::MISC_LOG_0,
    header: &err::HEADER_LOG,
};

/// Layout of an NPORT sub-block sharing the common error bank
const fn nport_unit(
    unit: ErrorUnit,
    block: Block,
    name: &'static str,
    fatal: &'static [BitRule],
    nonfatal: &'static [BitRule],
) -> UnitLayout {
    UnitLayout {
        unit,
        block,
        name,
        status: err::STATUS_0,
        first: Some(err::FIRST_0),
        contain: Some(err::CONTAIN_EN_0),
        log_enable: Some(err::LOG_EN_0),
        fatal_enable: err::FATAL_REPORT_EN_0,
        nonfatal_enable: Some(err::NON_FATAL_REPORT_EN_0),
        correctable_enable: Some(err::CORRECTABLE_REPORT_EN_0),
        inject: Some(err::REPORT_INJECT_0),
        instance_stride: 0,
        capture: Some(NPORT_CAPTURE),
        fatal,
        nonfatal,
        correctable: &[],
        default_fatal: table_mask(fatal),
        default_nonfatal: table_mask(nonfatal),
        default_correctable: 0,
        default_contain: contain_mask(fatal),
        suppress_always: false,
    }
}

/// Layout of one NVLTLC error bank
const fn nvltlc_unit(
    unit: ErrorUnit,
    name: &'static str,
    bank: u32,
    fatal: &'static [BitRule],
    nonfatal: &'static [BitRule],
) -> UnitLayout {
    UnitLayout {
        unit,
        block: Block::Nvltlc,
        name,
        status: bank + nvltlc::STATUS,
        first: Some(bank + nvltlc::FIRST),
        contain: None,
        log_enable: Some(bank + nvltlc::LOG_EN),
        fatal_enable: bank + nvltlc::FATAL_REPORT_EN,
        nonfatal_enable: Some(bank + nvltlc::NON_FATAL_REPORT_EN),
        correctable_enable: Some(bank + nvltlc::CORRECTABLE_REPORT_EN),
        inject: Some(bank + nvltlc::REPORT_INJECT),
        instance_stride: 0,
        capture: None,
        fatal,
        nonfatal,
        correctable: &[],
        default_fatal: table_mask(fatal),
        default_nonfatal: table_mask(nonfatal),
        default_correctable: 0,
        default_contain: 0,
        suppress_always: false,
    }
}

// =============================================================================
// ROUTE
// =============================================================================

const ROUTE_FATAL: [BitRule; 6] = [
    BitRule::fatal(route::ROUTEBUFERR, "ROUTEBUFERR", sxid::ROUTE_ROUTEBUFERR)
        .contained()
        .raw(),
    BitRule::fatal(route::GLT_ECC_DBE_ERR, "GLT_ECC_DBE_ERR", sxid::ROUTE_GLT_ECC_DBE_ERR)
        .contained()
        .ecc(EccRule::dbe().with_address(
            route::GLT_ECC_ERROR_ADDRESS,
            route::GLT_ECC_ERROR_ADDRESS_VALID,
            err::ECC_ADDRESS_VALID,
        ))
        .clears(route::GLT_ECC_LIMIT_ERR),
    BitRule::fatal(route::TRANSDONERESVERR, "TRANSDONERESVERR", sxid::ROUTE_TRANSDONERESVERR)
        .contained()
        .raw(),
    BitRule::fatal(route::PDCTRLPARERR, "PDCTRLPARERR", sxid::ROUTE_PDCTRLPARERR)
        .contained()
        .raw(),
    BitRule::fatal(route::NVS_ECC_DBE_ERR, "NVS_ECC_DBE_ERR", sxid::ROUTE_NVS_ECC_DBE_ERR)
        .contained()
        .ecc(EccRule::dbe().with_counter(route::NVS_ECC_ERROR_COUNTER))
        .clears(route::NVS_ECC_LIMIT_ERR),
    BitRule::fatal(route::CDTPARERR, "CDTPARERR", sxid::ROUTE_CDTPARERR)
        .contained()
        .raw(),
];

const ROUTE_NONFATAL: [BitRule; 3] = [
    BitRule::nonfatal(route::NOPORTDEFINEDERR, "NOPORTDEFINEDERR", sxid::ROUTE_NOPORTDEFINEDERR)
        .raw(),
    BitRule::nonfatal(
        route::INVALIDROUTEPOLICYERR,
        "INVALIDROUTEPOLICYERR",
        sxid::ROUTE_INVALIDROUTEPOLICYERR,
    )
    .raw(),
    BitRule::nonfatal(route::NVS_ECC_LIMIT_ERR, "NVS_ECC_LIMIT_ERR", sxid::ROUTE_NVS_ECC_LIMIT_ERR)
        .ecc(EccRule::limit(route::NVS_ECC_ERROR_COUNTER))
        .suppressed_by(route::NVS_ECC_DBE_ERR),
];

pub(super) static ROUTE: UnitLayout = nport_unit(
    ErrorUnit::Route,
    Block::Route,
    "route",
    &ROUTE_FATAL,
    &ROUTE_NONFATAL,
);

// =============================================================================
// INGRESS
// =============================================================================

const INGRESS_FATAL: [BitRule; 7] = [
    BitRule::fatal(ingress::CMDDECODEERR, "CMDDECODEERR", sxid::INGRESS_CMDDECODEERR)
        .contained()
        .raw(),
    BitRule::fatal(
        ingress::NCISOC_HDR_ECC_DBE_ERR,
        "NCISOC_HDR_ECC_DBE_ERR",
        sxid::INGRESS_NCISOC_HDR_ECC_DBE_ERR,
    )
    .contained()
    .ecc(EccRule::dbe().with_counter(ingress::NCISOC_HDR_ECC_ERROR_COUNTER))
    .clears(ingress::NCISOC_HDR_ECC_LIMIT_ERR),
    BitRule::fatal(ingress::INVALIDVCSET, "INVALIDVCSET", sxid::INGRESS_INVALIDVCSET)
        .contained()
        .raw(),
    BitRule::fatal(
        ingress::REMAPTAB_ECC_DBE_ERR,
        "REMAPTAB_ECC_DBE_ERR",
        sxid::INGRESS_REMAPTAB_ECC_DBE_ERR,
    )
    .contained()
    .ecc(EccRule::dbe().with_address(
        ingress::REMAPTAB_ECC_ERROR_ADDRESS,
        ingress::REMAPTAB_ECC_ERROR_ADDRESS_VALID,
        err::ECC_ADDRESS_VALID,
    ))
    .clears(ingress::REMAPTAB_ECC_LIMIT_ERR),
    BitRule::fatal(
        ingress::RIDTAB_ECC_DBE_ERR,
        "RIDTAB_ECC_DBE_ERR",
        sxid::INGRESS_RIDTAB_ECC_DBE_ERR,
    )
    .contained()
    .ecc(EccRule::dbe().with_address(
        ingress::RIDTAB_ECC_ERROR_ADDRESS,
        ingress::RIDTAB_ECC_ERROR_ADDRESS_VALID,
        err::ECC_ADDRESS_VALID,
    ))
    .clears(ingress::RIDTAB_ECC_LIMIT_ERR),
    BitRule::fatal(
        ingress::RLANTAB_ECC_DBE_ERR,
        "RLANTAB_ECC_DBE_ERR",
        sxid::INGRESS_RLANTAB_ECC_DBE_ERR,
    )
    .contained()
    .ecc(EccRule::dbe().with_address(
        ingress::RLANTAB_ECC_ERROR_ADDRESS,
        ingress::RLANTAB_ECC_ERROR_ADDRESS_VALID,
        err::ECC_ADDRESS_VALID,
    ))
    .clears(ingress::RLANTAB_ECC_LIMIT_ERR),
    BitRule::fatal(ingress::NCISOC_PARITY_ERR, "NCISOC_PARITY_ERR", sxid::INGRESS_NCISOC_PARITY_ERR)
        .contained()
        .raw(),
];

const INGRESS_NONFATAL: [BitRule; 7] = [
    BitRule::nonfatal(
        ingress::REQCONTEXTMISMATCHERR,
        "REQCONTEXTMISMATCHERR",
        sxid::INGRESS_REQCONTEXTMISMATCHERR,
    )
    .raw(),
    BitRule::nonfatal(ingress::ACLFAIL, "ACLFAIL", sxid::INGRESS_ACLFAIL).raw(),
    BitRule::nonfatal(
        ingress::NCISOC_HDR_ECC_LIMIT_ERR,
        "NCISOC_HDR_ECC_LIMIT_ERR",
        sxid::INGRESS_NCISOC_HDR_ECC_LIMIT_ERR,
    )
    .ecc(EccRule::limit(ingress::NCISOC_HDR_ECC_ERROR_COUNTER))
    .suppressed_by(ingress::NCISOC_HDR_ECC_DBE_ERR),
    BitRule::nonfatal(ingress::ADDRBOUNDSERR, "ADDRBOUNDSERR", sxid::INGRESS_ADDRBOUNDSERR).raw(),
    BitRule::nonfatal(ingress::RIDTABCFGERR, "RIDTABCFGERR", sxid::INGRESS_RIDTABCFGERR).raw(),
    BitRule::nonfatal(ingress::RLANTABCFGERR, "RLANTABCFGERR", sxid::INGRESS_RLANTABCFGERR).raw(),
    BitRule::nonfatal(ingress::ADDRTYPEERR, "ADDRTYPEERR", sxid::INGRESS_ADDRTYPEERR).raw(),
];

pub(super) static INGRESS: UnitLayout = nport_unit(
    ErrorUnit::Ingress,
    Block::Ingress,
    "ingress",
    &INGRESS_FATAL,
    &INGRESS_NONFATAL,
);

// =============================================================================
// EGRESS
// =============================================================================

const EGRESS_FATAL: [BitRule; 12] = [
    BitRule::fatal(egress::EGRESSBUFERR, "EGRESSBUFERR", sxid::EGRESS_EGRESSBUFERR)
        .contained()
        .device_wide()
        .raw(),
    BitRule::fatal(egress::PKTROUTEERR, "PKTROUTEERR", sxid::EGRESS_PKTROUTEERR)
        .contained()
        .device_wide()
        .raw(),
    BitRule::fatal(egress::SEQIDERR, "SEQIDERR", sxid::EGRESS_SEQIDERR)
        .contained()
        .device_wide()
        .raw(),
    BitRule::fatal(
        egress::NXBAR_HDR_ECC_DBE_ERR,
        "NXBAR_HDR_ECC_DBE_ERR",
        sxid::EGRESS_NXBAR_HDR_ECC_DBE_ERR,
    )
    .contained()
    .ecc(EccRule::dbe().with_counter(egress::NXBAR_ECC_ERROR_COUNTER))
    .clears(egress::NXBAR_HDR_ECC_LIMIT_ERR),
    BitRule::fatal(
        egress::RAM_OUT_HDR_ECC_DBE_ERR,
        "RAM_OUT_HDR_ECC_DBE_ERR",
        sxid::EGRESS_RAM_OUT_HDR_ECC_DBE_ERR,
    )
    .contained()
    .ecc(
        EccRule::dbe()
            .with_address(
                egress::RAM_OUT_ECC_ERROR_ADDRESS,
                egress::RAM_OUT_ECC_ERROR_ADDRESS_VALID,
                err::ECC_ADDRESS_VALID,
            )
            .with_counter(egress::RAM_OUT_ECC_ERROR_COUNTER),
    )
    .clears(egress::RAM_OUT_HDR_ECC_LIMIT_ERR),
    BitRule::fatal(egress::NCISOCCREDITOVFL, "NCISOCCREDITOVFL", sxid::EGRESS_NCISOCCREDITOVFL)
        .contained()
        .raw(),
    BitRule::fatal(
        egress::REQTGTIDMISMATCHERR,
        "REQTGTIDMISMATCHERR",
        sxid::EGRESS_REQTGTIDMISMATCHERR,
    )
    .contained()
    .raw(),
    BitRule::fatal(
        egress::RSPREQIDMISMATCHERR,
        "RSPREQIDMISMATCHERR",
        sxid::EGRESS_RSPREQIDMISMATCHERR,
    )
    .contained()
    .raw(),
    BitRule::fatal(
        egress::NXBAR_HDR_PARITY_ERR,
        "NXBAR_HDR_PARITY_ERR",
        sxid::EGRESS_NXBAR_HDR_PARITY_ERR,
    )
    .contained()
    .raw(),
    BitRule::fatal(
        egress::NCISOC_CREDIT_PARITY_ERR,
        "NCISOC_CREDIT_PARITY_ERR",
        sxid::EGRESS_NCISOC_CREDIT_PARITY_ERR,
    )
    .contained()
    .raw(),
    BitRule::fatal(
        egress::NXBAR_FLITTYPE_MISMATCH_ERR,
        "NXBAR_FLITTYPE_MISMATCH_ERR",
        sxid::EGRESS_NXBAR_FLITTYPE_MISMATCH_ERR,
    )
    .contained()
    .raw(),
    BitRule::fatal(egress::CREDIT_TIME_OUT_ERR, "CREDIT_TIME_OUT_ERR", sxid::EGRESS_CREDIT_TIME_OUT_ERR)
        .contained()
        .raw(),
];

const EGRESS_NONFATAL: [BitRule; 5] = [
    BitRule::nonfatal(
        egress::NXBAR_HDR_ECC_LIMIT_ERR,
        "NXBAR_HDR_ECC_LIMIT_ERR",
        sxid::EGRESS_NXBAR_HDR_ECC_LIMIT_ERR,
    )
    .ecc(EccRule::limit(egress::NXBAR_ECC_ERROR_COUNTER))
    .suppressed_by(egress::NXBAR_HDR_ECC_DBE_ERR),
    BitRule::nonfatal(
        egress::RAM_OUT_HDR_ECC_LIMIT_ERR,
        "RAM_OUT_HDR_ECC_LIMIT_ERR",
        sxid::EGRESS_RAM_OUT_HDR_ECC_LIMIT_ERR,
    )
    .ecc(EccRule::limit(egress::RAM_OUT_ECC_ERROR_COUNTER).with_address(
        egress::RAM_OUT_ECC_ERROR_ADDRESS,
        egress::RAM_OUT_ECC_ERROR_ADDRESS_VALID,
        err::ECC_ADDRESS_VALID,
    ))
    .suppressed_by(egress::RAM_OUT_HDR_ECC_DBE_ERR),
    BitRule::nonfatal(egress::URRSPERR, "URRSPERR", sxid::EGRESS_DROPNPURRSPERR).raw(),
    BitRule::nonfatal(egress::PRIVRSPERR, "PRIVRSPERR", sxid::EGRESS_PRIVRSPERR).raw(),
    BitRule::nonfatal(egress::HWRSPERR, "HWRSPERR", sxid::EGRESS_HWRSPERR).raw(),
];

pub(super) static EGRESS: UnitLayout = nport_unit(
    ErrorUnit::Egress,
    Block::Egress,
    "egress",
    &EGRESS_FATAL,
    &EGRESS_NONFATAL,
);

// =============================================================================
// TSTATE
// =============================================================================

const TSTATE_FATAL: [BitRule; 6] = [
    BitRule::fatal(tstate::TAGPOOLBUFERR, "TAGPOOLBUFERR", sxid::TSTATE_TAGPOOLBUFERR)
        .contained()
        .raw(),
    BitRule::fatal(
        tstate::TAGPOOL_ECC_DBE_ERR,
        "TAGPOOL_ECC_DBE_ERR",
        sxid::TSTATE_TAGPOOL_ECC_DBE_ERR,
    )
    .contained()
    .ecc(
        EccRule::dbe()
            .with_address(
                tstate::TAGPOOL_ECC_ERROR_ADDRESS,
                tstate::TAGPOOL_ECC_ERROR_ADDRESS_VALID,
                err::ECC_ADDRESS_VALID,
            )
            .with_counter(tstate::TAGPOOL_ECC_ERROR_COUNTER),
    )
    .clears(tstate::TAGPOOL_ECC_LIMIT_ERR),
    BitRule::fatal(tstate::CRUMBSTOREBUFERR, "CRUMBSTOREBUFERR", sxid::TSTATE_CRUMBSTOREBUFERR)
        .contained()
        .raw(),
    BitRule::fatal(
        tstate::CRUMBSTORE_ECC_DBE_ERR,
        "CRUMBSTORE_ECC_DBE_ERR",
        sxid::TSTATE_CRUMBSTORE_ECC_DBE_ERR,
    )
    .contained()
    .ecc(
        EccRule::dbe()
            .with_address(
                tstate::CRUMBSTORE_ECC_ERROR_ADDRESS,
                tstate::CRUMBSTORE_ECC_ERROR_ADDRESS_VALID,
                err::ECC_ADDRESS_VALID,
            )
            .with_counter(tstate::CRUMBSTORE_ECC_ERROR_COUNTER),
    )
    .clears(tstate::CRUMBSTORE_ECC_LIMIT_ERR),
    BitRule::fatal(tstate::ATO_ERR, "ATO_ERR", sxid::TSTATE_ATO_ERR).contained(),
    BitRule::fatal(tstate::CAMRSP_ERR, "CAMRSP_ERR", sxid::TSTATE_CAMRSP_ERR)
        .contained()
        .raw(),
];

const TSTATE_NONFATAL: [BitRule; 2] = [
    BitRule::nonfatal(
        tstate::TAGPOOL_ECC_LIMIT_ERR,
        "TAGPOOL_ECC_LIMIT_ERR",
        sxid::TSTATE_TAGPOOL_ECC_LIMIT_ERR,
    )
    .ecc(EccRule::limit(tstate::TAGPOOL_ECC_ERROR_COUNTER).with_address(
        tstate::TAGPOOL_ECC_ERROR_ADDRESS,
        tstate::TAGPOOL_ECC_ERROR_ADDRESS_VALID,
        err::ECC_ADDRESS_VALID,
    ))
    .suppressed_by(tstate::TAGPOOL_ECC_DBE_ERR),
    BitRule::nonfatal(
        tstate::CRUMBSTORE_ECC_LIMIT_ERR,
        "CRUMBSTORE_ECC_LIMIT_ERR",
        sxid::TSTATE_CRUMBSTORE_ECC_LIMIT_ERR,
    )
    .ecc(EccRule::limit(tstate::CRUMBSTORE_ECC_ERROR_COUNTER).with_address(
        tstate::CRUMBSTORE_ECC_ERROR_ADDRESS,
        tstate::CRUMBSTORE_ECC_ERROR_ADDRESS_VALID,
        err::ECC_ADDRESS_VALID,
    ))
    .suppressed_by(tstate::CRUMBSTORE_ECC_DBE_ERR),
];

pub(super) static TSTATE: UnitLayout = nport_unit(
    ErrorUnit::Tstate,
    Block::Tstate,
    "tstate",
    &TSTATE_FATAL,
    &TSTATE_NONFATAL,
);

// =============================================================================
// SOURCETRACK
// =============================================================================

const SOURCETRACK_FATAL: [BitRule; 3] = [
    BitRule::fatal(
        sourcetrack::CREQ_TCEN0_CRUMBSTORE_ECC_DBE_ERR,
        "CREQ_TCEN0_CRUMBSTORE_ECC_DBE_ERR",
        sxid::SOURCETRACK_CREQ_TCEN0_CRUMBSTORE_ECC_DBE_ERR,
    )
    .contained()
    .ecc(
        EccRule::dbe()
            .with_address(
                sourcetrack::TCEN0_CRUMBSTORE_ECC_ERROR_ADDRESS,
                sourcetrack::TCEN0_CRUMBSTORE_ECC_ERROR_ADDRESS_VALID,
                err::ECC_ADDRESS_VALID,
            )
            .with_counter(sourcetrack::TCEN0_CRUMBSTORE_ECC_ERROR_COUNTER),
    )
    .clears(sourcetrack::CREQ_TCEN0_CRUMBSTORE_ECC_LIMIT_ERR),
    BitRule::fatal(
        sourcetrack::CREQ_TCEN1_CRUMBSTORE_ECC_DBE_ERR,
        "CREQ_TCEN1_CRUMBSTORE_ECC_DBE_ERR",
        sxid::SOURCETRACK_CREQ_TCEN1_CRUMBSTORE_ECC_DBE_ERR,
    )
    .contained()
    .ecc(
        EccRule::dbe()
            .with_address(
                sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_ADDRESS,
                sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_ADDRESS_VALID,
                err::ECC_ADDRESS_VALID,
            )
            .with_counter(sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_COUNTER),
    )
    .clears(sourcetrack::CREQ_TCEN1_CRUMBSTORE_ECC_LIMIT_ERR),
    BitRule::fatal(
        sourcetrack::SOURCETRACK_TIME_OUT_ERR,
        "SOURCETRACK_TIME_OUT_ERR",
        sxid::SOURCETRACK_SOURCETRACK_TIME_OUT_ERR,
    )
    .contained(),
];

const SOURCETRACK_NONFATAL: [BitRule; 2] = [
    BitRule::nonfatal(
        sourcetrack::CREQ_TCEN0_CRUMBSTORE_ECC_LIMIT_ERR,
        "CREQ_TCEN0_CRUMBSTORE_ECC_LIMIT_ERR",
        sxid::SOURCETRACK_CREQ_TCEN0_CRUMBSTORE_ECC_LIMIT_ERR,
    )
    .ecc(
        EccRule::limit(sourcetrack::TCEN0_CRUMBSTORE_ECC_ERROR_COUNTER).with_address(
            sourcetrack::TCEN0_CRUMBSTORE_ECC_ERROR_ADDRESS,
            sourcetrack::TCEN0_CRUMBSTORE_ECC_ERROR_ADDRESS_VALID,
            err::ECC_ADDRESS_VALID,
        ),
    )
    .suppressed_by(sourcetrack::CREQ_TCEN0_CRUMBSTORE_ECC_DBE_ERR),
    BitRule::nonfatal(
        sourcetrack::CREQ_TCEN1_CRUMBSTORE_ECC_LIMIT_ERR,
        "CREQ_TCEN1_CRUMBSTORE_ECC_LIMIT_ERR",
        sxid::SOURCETRACK_CREQ_TCEN1_CRUMBSTORE_ECC_LIMIT_ERR,
    )
    .ecc(
        EccRule::limit(sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_COUNTER).with_address(
            sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_ADDRESS,
            sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_ADDRESS_VALID,
            err::ECC_ADDRESS_VALID,
        ),
    )
    .suppressed_by(sourcetrack::CREQ_TCEN1_CRUMBSTORE_ECC_DBE_ERR),
];

pub(super) static SOURCETRACK: UnitLayout = nport_unit(
    ErrorUnit::Sourcetrack,
    Block::Sourcetrack,
    "sourcetrack",
    &SOURCETRACK_FATAL,
    &SOURCETRACK_NONFATAL,
);

// =============================================================================
// NXBAR
// =============================================================================

const TILE_FATAL: [BitRule; 9] = [
    BitRule::fatal(
        nxbar::INGRESS_BUFFER_OVERFLOW,
        "INGRESS_BUFFER_OVERFLOW",
        sxid::NXBAR_TILE_INGRESS_BUFFER_OVERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_BUFFER_UNDERFLOW,
        "INGRESS_BUFFER_UNDERFLOW",
        sxid::NXBAR_TILE_INGRESS_BUFFER_UNDERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::EGRESS_CREDIT_OVERFLOW,
        "EGRESS_CREDIT_OVERFLOW",
        sxid::NXBAR_TILE_EGRESS_CREDIT_OVERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::EGRESS_CREDIT_UNDERFLOW,
        "EGRESS_CREDIT_UNDERFLOW",
        sxid::NXBAR_TILE_EGRESS_CREDIT_UNDERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_NON_BURSTY_PKT,
        "INGRESS_NON_BURSTY_PKT",
        sxid::NXBAR_TILE_INGRESS_NON_BURSTY_PKT,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_NON_STICKY_PKT,
        "INGRESS_NON_STICKY_PKT",
        sxid::NXBAR_TILE_INGRESS_NON_STICKY_PKT,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_BURST_GT_9_DATA_VC,
        "INGRESS_BURST_GT_9_DATA_VC",
        sxid::NXBAR_TILE_INGRESS_BURST_GT_9_DATA_VC,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_PKT_INVALID_DST,
        "INGRESS_PKT_INVALID_DST",
        sxid::NXBAR_TILE_INGRESS_PKT_INVALID_DST,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_PKT_PARITY_ERROR,
        "INGRESS_PKT_PARITY_ERROR",
        sxid::NXBAR_TILE_INGRESS_PKT_PARITY_ERROR,
    )
    .device_wide(),
];

const TILEOUT_FATAL: [BitRule; 8] = [
    BitRule::fatal(
        nxbar::INGRESS_BUFFER_OVERFLOW,
        "INGRESS_BUFFER_OVERFLOW",
        sxid::NXBAR_TILEOUT_INGRESS_BUFFER_OVERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_BUFFER_UNDERFLOW,
        "INGRESS_BUFFER_UNDERFLOW",
        sxid::NXBAR_TILEOUT_INGRESS_BUFFER_UNDERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::EGRESS_CREDIT_OVERFLOW,
        "EGRESS_CREDIT_OVERFLOW",
        sxid::NXBAR_TILEOUT_EGRESS_CREDIT_OVERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::EGRESS_CREDIT_UNDERFLOW,
        "EGRESS_CREDIT_UNDERFLOW",
        sxid::NXBAR_TILEOUT_EGRESS_CREDIT_UNDERFLOW,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_NON_BURSTY_PKT,
        "INGRESS_NON_BURSTY_PKT",
        sxid::NXBAR_TILEOUT_INGRESS_NON_BURSTY_PKT,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_NON_STICKY_PKT,
        "INGRESS_NON_STICKY_PKT",
        sxid::NXBAR_TILEOUT_INGRESS_NON_STICKY_PKT,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::INGRESS_BURST_GT_9_DATA_VC,
        "INGRESS_BURST_GT_9_DATA_VC",
        sxid::NXBAR_TILEOUT_INGRESS_BURST_GT_9_DATA_VC,
    )
    .device_wide(),
    BitRule::fatal(
        nxbar::EGRESS_CDT_PARITY_ERROR,
        "EGRESS_CDT_PARITY_ERROR",
        sxid::NXBAR_TILEOUT_EGRESS_CDT_PARITY_ERROR,
    )
    .device_wide(),
];

pub(super) static TILE: UnitLayout = UnitLayout {
    unit: ErrorUnit::Tile,
    block: Block::Tile,
    name: "tile",
    status: nxbar::TILE_ERR_STATUS,
    first: Some(nxbar::TILE_ERR_FIRST),
    contain: None,
    log_enable: None,
    fatal_enable: nxbar::TILE_ERR_FATAL_INTR_EN,
    nonfatal_enable: None,
    correctable_enable: None,
    inject: None,
    instance_stride: 0,
    capture: None,
    fatal: &TILE_FATAL,
    nonfatal: &[],
    correctable: &[],
    default_fatal: table_mask(&TILE_FATAL),
    default_nonfatal: 0,
    default_correctable: 0,
    default_contain: 0,
    suppress_always: true,
};

pub(super) static TILEOUT: UnitLayout = UnitLayout {
    unit: ErrorUnit::Tileout,
    block: Block::Nxbar,
    name: "tileout",
    status: nxbar::TILEOUT_ERR_STATUS,
    first: Some(nxbar::TILEOUT_ERR_FIRST),
    contain: None,
    log_enable: None,
    fatal_enable: nxbar::TILEOUT_ERR_FATAL_INTR_EN,
    nonfatal_enable: None,
    correctable_enable: None,
    inject: None,
    instance_stride: nxbar::TILEOUT_STRIDE,
    capture: None,
    fatal: &TILEOUT_FATAL,
    nonfatal: &[],
    correctable: &[],
    default_fatal: table_mask(&TILEOUT_FATAL),
    default_nonfatal: 0,
    default_correctable: 0,
    default_contain: 0,
    suppress_always: true,
};

// =============================================================================
// NVLDL
// =============================================================================

const NVLDL_FATAL: [BitRule; 8] = [
    BitRule::fatal(nvldl::TX_FAULT_RAM, "TX_FAULT_RAM", sxid::DLPL_TX_FAULT_RAM)
        .nvlink(NvlinkErrorKind::DlTxFaultRam),
    BitRule::fatal(nvldl::TX_FAULT_INTERFACE, "TX_FAULT_INTERFACE", sxid::DLPL_TX_FAULT_INTERFACE)
        .nvlink(NvlinkErrorKind::DlTxFaultInterface),
    BitRule::fatal(
        nvldl::TX_FAULT_SUBLINK_CHANGE,
        "TX_FAULT_SUBLINK_CHANGE",
        sxid::DLPL_TX_FAULT_SUBLINK_CHANGE,
    )
    .nvlink(NvlinkErrorKind::DlTxFaultSublinkChange),
    BitRule::fatal(
        nvldl::RX_FAULT_SUBLINK_CHANGE,
        "RX_FAULT_SUBLINK_CHANGE",
        sxid::DLPL_RX_FAULT_SUBLINK_CHANGE,
    )
    .nvlink(NvlinkErrorKind::DlRxFaultSublinkChange),
    BitRule::fatal(
        nvldl::RX_FAULT_DL_PROTOCOL,
        "RX_FAULT_DL_PROTOCOL",
        sxid::DLPL_RX_FAULT_DL_PROTOCOL,
    )
    .nvlink(NvlinkErrorKind::DlRxFaultDlProtocol),
    BitRule::fatal(nvldl::LTSSM_FAULT_DOWN, "LTSSM_FAULT_DOWN", sxid::DLPL_LTSSM_FAULT_DOWN)
        .nvlink(NvlinkErrorKind::DlLtssmFaultDown),
    BitRule::fatal(nvldl::LTSSM_FAULT_UP, "LTSSM_FAULT_UP", sxid::DLPL_LTSSM_FAULT_UP)
        .nvlink(NvlinkErrorKind::DlLtssmFaultUp),
    BitRule::fatal(nvldl::LTSSM_PROTOCOL, "LTSSM_PROTOCOL", sxid::DLPL_LTSSM_PROTOCOL),
];

const NVLDL_NONFATAL: [BitRule; 6] = [
    BitRule::nonfatal(nvldl::TX_REPLAY, "TX_REPLAY", sxid::DLPL_TX_REPLAY),
    BitRule::nonfatal(nvldl::TX_RECOVERY_SHORT, "TX_RECOVERY_SHORT", sxid::DLPL_TX_RECOVERY_SHORT),
    BitRule::nonfatal(
        nvldl::RX_SHORT_ERROR_RATE,
        "RX_SHORT_ERROR_RATE",
        sxid::DLPL_RX_SHORT_ERROR_RATE,
    ),
    BitRule::nonfatal(nvldl::RX_LONG_ERROR_RATE, "RX_LONG_ERROR_RATE", sxid::DLPL_RX_LONG_ERROR_RATE),
    BitRule::nonfatal(nvldl::RX_ILA_TRIGGER, "RX_ILA_TRIGGER", sxid::DLPL_RX_ILA_TRIGGER),
    BitRule::nonfatal(nvldl::RX_CRC_COUNTER, "RX_CRC_COUNTER", sxid::DLPL_RX_CRC_COUNTER)
        .mask_after_report(),
];

/// Data link non-fatal sources left off at init; the error-rate monitors
/// and the ILA trigger are armed on demand
pub(super) const NVLDL_NONFATAL_INIT_OFF: u32 =
    nvldl::RX_SHORT_ERROR_RATE | nvldl::RX_LONG_ERROR_RATE | nvldl::RX_ILA_TRIGGER;

pub(super) static NVLDL: UnitLayout = UnitLayout {
    unit: ErrorUnit::Nvldl,
    block: Block::Nvldl,
    name: "nvldl",
    status: nvldl::INTR,
    first: None,
    contain: None,
    log_enable: None,
    fatal_enable: nvldl::INTR_STALL_EN,
    nonfatal_enable: Some(nvldl::INTR_NONSTALL_EN),
    correctable_enable: None,
    inject: None,
    instance_stride: 0,
    capture: None,
    fatal: &NVLDL_FATAL,
    nonfatal: &NVLDL_NONFATAL,
    correctable: &[],
    default_fatal: table_mask(&NVLDL_FATAL),
    default_nonfatal: table_mask(&NVLDL_NONFATAL) & !NVLDL_NONFATAL_INIT_OFF,
    default_correctable: 0,
    default_contain: 0,
    suppress_always: false,
};

// =============================================================================
// NVLTLC
// =============================================================================

const NVLTLC_TX_SYS_FATAL: [BitRule; 8] = [
    BitRule::fatal(
        nvltlc::TX_SYS_NCISOC_PARITY_ERR,
        "NCISOC_PARITY_ERR",
        sxid::NVLTLC_TX_SYS_NCISOC_PARITY_ERR,
    ),
    BitRule::fatal(
        nvltlc::TX_SYS_NCISOC_HDR_ECC_DBE_ERR,
        "NCISOC_HDR_ECC_DBE_ERR",
        sxid::NVLTLC_TX_SYS_NCISOC_HDR_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::TX_SYS_NCISOC_DAT_ECC_DBE_ERR,
        "NCISOC_DAT_ECC_DBE_ERR",
        sxid::NVLTLC_TX_SYS_NCISOC_DAT_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::TX_SYS_NCISOC_ECC_LIMIT_ERR,
        "NCISOC_ECC_LIMIT_ERR",
        sxid::NVLTLC_TX_SYS_NCISOC_ECC_LIMIT_ERR,
    ),
    BitRule::fatal(nvltlc::TXPOISONDET, "TXPOISONDET", sxid::NVLTLC_TXPOISONDET),
    BitRule::fatal(
        nvltlc::TX_SYS_TXRSPSTATUS_HW_ERR,
        "TXRSPSTATUS_HW_ERR",
        sxid::NVLTLC_TX_SYS_TXRSPSTATUS_HW_ERR,
    ),
    BitRule::fatal(
        nvltlc::TX_SYS_TXRSPSTATUS_UR_ERR,
        "TXRSPSTATUS_UR_ERR",
        sxid::NVLTLC_TX_SYS_TXRSPSTATUS_UR_ERR,
    ),
    BitRule::fatal(
        nvltlc::TX_SYS_TXRSPSTATUS_PRIV_ERR,
        "TXRSPSTATUS_PRIV_ERR",
        sxid::NVLTLC_TX_SYS_TXRSPSTATUS_PRIV_ERR,
    ),
];

const NVLTLC_RX_SYS_FATAL: [BitRule; 7] = [
    BitRule::fatal(
        nvltlc::RX_SYS_NCISOC_PARITY_ERR,
        "NCISOC_PARITY_ERR",
        sxid::NVLTLC_RX_SYS_NCISOC_PARITY_ERR,
    ),
    BitRule::fatal(
        nvltlc::RX_SYS_HDR_RAM_ECC_DBE_ERR,
        "HDR_RAM_ECC_DBE_ERR",
        sxid::NVLTLC_RX_SYS_HDR_RAM_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::RX_SYS_HDR_RAM_ECC_LIMIT_ERR,
        "HDR_RAM_ECC_LIMIT_ERR",
        sxid::NVLTLC_RX_SYS_HDR_RAM_ECC_LIMIT_ERR,
    ),
    BitRule::fatal(
        nvltlc::RX_SYS_DAT0_RAM_ECC_DBE_ERR,
        "DAT0_RAM_ECC_DBE_ERR",
        sxid::NVLTLC_RX_SYS_DAT0_RAM_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::RX_SYS_DAT0_RAM_ECC_LIMIT_ERR,
        "DAT0_RAM_ECC_LIMIT_ERR",
        sxid::NVLTLC_RX_SYS_DAT0_RAM_ECC_LIMIT_ERR,
    ),
    BitRule::fatal(
        nvltlc::RX_SYS_DAT1_RAM_ECC_DBE_ERR,
        "DAT1_RAM_ECC_DBE_ERR",
        sxid::NVLTLC_RX_SYS_DAT1_RAM_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::RX_SYS_DAT1_RAM_ECC_LIMIT_ERR,
        "DAT1_RAM_ECC_LIMIT_ERR",
        sxid::NVLTLC_RX_SYS_DAT1_RAM_ECC_LIMIT_ERR,
    ),
];

const NVLTLC_TX_LNK0_FATAL: [BitRule; 6] = [
    BitRule::fatal(
        nvltlc::TXDLCREDITPARITYERR,
        "TXDLCREDITPARITYERR",
        sxid::NVLTLC_TXDLCREDITPARITYERR,
    ),
    BitRule::fatal(
        nvltlc::CREQ_RAM_HDR_ECC_DBE_ERR,
        "CREQ_RAM_HDR_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_CREQ_RAM_HDR_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::RSP_RAM_HDR_ECC_DBE_ERR,
        "RSP_RAM_HDR_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_RSP_RAM_HDR_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::COM_RAM_HDR_ECC_DBE_ERR,
        "COM_RAM_HDR_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_COM_RAM_HDR_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::RSP1_RAM_HDR_ECC_DBE_ERR,
        "RSP1_RAM_HDR_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_RSP1_RAM_HDR_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::fatal(
        nvltlc::RSP1_RAM_DAT_ECC_DBE_ERR,
        "RSP1_RAM_DAT_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_RSP1_RAM_DAT_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
];

const NVLTLC_TX_LNK0_NONFATAL: [BitRule; 7] = [
    BitRule::nonfatal(
        nvltlc::CREQ_RAM_DAT_ECC_DBE_ERR,
        "CREQ_RAM_DAT_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_CREQ_RAM_DAT_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::nonfatal(
        nvltlc::CREQ_RAM_ECC_LIMIT_ERR,
        "CREQ_RAM_ECC_LIMIT_ERR",
        sxid::NVLTLC_TX_LNK_CREQ_RAM_ECC_LIMIT_ERR,
    ),
    BitRule::nonfatal(
        nvltlc::RSP_RAM_DAT_ECC_DBE_ERR,
        "RSP_RAM_DAT_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_RSP_RAM_DAT_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::nonfatal(
        nvltlc::RSP_RAM_ECC_LIMIT_ERR,
        "RSP_RAM_ECC_LIMIT_ERR",
        sxid::NVLTLC_TX_LNK_RSP_RAM_ECC_LIMIT_ERR,
    ),
    BitRule::nonfatal(
        nvltlc::COM_RAM_DAT_ECC_DBE_ERR,
        "COM_RAM_DAT_ECC_DBE_ERR",
        sxid::NVLTLC_TX_LNK_COM_RAM_DAT_ECC_DBE_ERR,
    )
    .ecc(EccRule::dbe()),
    BitRule::nonfatal(
        nvltlc::COM_RAM_ECC_LIMIT_ERR,
        "COM_RAM_ECC_LIMIT_ERR",
        sxid::NVLTLC_TX_LNK_COM_RAM_ECC_LIMIT_ERR,
    ),
    BitRule::nonfatal(
        nvltlc::RSP1_RAM_ECC_LIMIT_ERR,
        "RSP1_RAM_ECC_LIMIT_ERR",
        sxid::NVLTLC_TX_LNK_RSP1_RAM_ECC_LIMIT_ERR,
    ),
];

const NVLTLC_TX_LNK1_NONFATAL: [BitRule; 8] = [
    BitRule::nonfatal(nvltlc::an1_timeout_vc(0), "AN1_TIMEOUT_VC0", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC0),
    BitRule::nonfatal(nvltlc::an1_timeout_vc(1), "AN1_TIMEOUT_VC1", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC1),
    BitRule::nonfatal(nvltlc::an1_timeout_vc(2), "AN1_TIMEOUT_VC2", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC2),
    BitRule::nonfatal(nvltlc::an1_timeout_vc(3), "AN1_TIMEOUT_VC3", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC3),
    BitRule::nonfatal(nvltlc::an1_timeout_vc(4), "AN1_TIMEOUT_VC4", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC4),
    BitRule::nonfatal(nvltlc::an1_timeout_vc(5), "AN1_TIMEOUT_VC5", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC5),
    BitRule::nonfatal(nvltlc::an1_timeout_vc(6), "AN1_TIMEOUT_VC6", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC6),
    BitRule::nonfatal(nvltlc::an1_timeout_vc(7), "AN1_TIMEOUT_VC7", sxid::NVLTLC_TX_LNK_AN1_TIMEOUT_VC7),
];

const NVLTLC_RX_LNK0_FATAL: [BitRule; 19] = [
    BitRule::fatal(nvltlc::RXDLHDRPARITYERR, "RXDLHDRPARITYERR", sxid::NVLTLC_RXDLHDRPARITYERR),
    BitRule::fatal(nvltlc::RXDLDATAPARITYERR, "RXDLDATAPARITYERR", sxid::NVLTLC_RXDLDATAPARITYERR),
    BitRule::fatal(nvltlc::RXDLCTRLPARITYERR, "RXDLCTRLPARITYERR", sxid::NVLTLC_RXDLCTRLPARITYERR),
    BitRule::fatal(nvltlc::RXINVALIDAEERR, "RXINVALIDAEERR", sxid::NVLTLC_RXINVALIDAEERR),
    BitRule::fatal(nvltlc::RXINVALIDBEERR, "RXINVALIDBEERR", sxid::NVLTLC_RXINVALIDBEERR),
    BitRule::fatal(
        nvltlc::RXINVALIDADDRALIGNERR,
        "RXINVALIDADDRALIGNERR",
        sxid::NVLTLC_RXINVALIDADDRALIGNERR,
    ),
    BitRule::fatal(nvltlc::RXPKTLENERR, "RXPKTLENERR", sxid::NVLTLC_RXPKTLENERR),
    BitRule::fatal(nvltlc::RSVCMDENCERR, "RSVCMDENCERR", sxid::NVLTLC_RSVCMDENCERR),
    BitRule::fatal(nvltlc::RSVDATLENENCERR, "RSVDATLENENCERR", sxid::NVLTLC_RSVDATLENENCERR),
    BitRule::fatal(nvltlc::RSVPKTSTATUSERR, "RSVPKTSTATUSERR", sxid::NVLTLC_RSVPKTSTATUSERR),
    BitRule::fatal(
        nvltlc::RSVCACHEATTRPROBEREQERR,
        "RSVCACHEATTRPROBEREQERR",
        sxid::NVLTLC_RSVCACHEATTRPROBEREQERR,
    ),
    BitRule::fatal(
        nvltlc::RSVCACHEATTRPROBERSPERR,
        "RSVCACHEATTRPROBERSPERR",
        sxid::NVLTLC_RSVCACHEATTRPROBERSPERR,
    ),
    BitRule::fatal(
        nvltlc::DATLENGTRMWREQMAXERR,
        "DATLENGTRMWREQMAXERR",
        sxid::NVLTLC_DATLENGTRMWREQMAXERR,
    ),
    BitRule::fatal(
        nvltlc::DATLENLTATRRSPMINERR,
        "DATLENLTATRRSPMINERR",
        sxid::NVLTLC_DATLENLTATRRSPMINERR,
    ),
    BitRule::fatal(
        nvltlc::INVALIDCACHEATTRPOERR,
        "INVALIDCACHEATTRPOERR",
        sxid::NVLTLC_INVALIDCACHEATTRPOERR,
    ),
    BitRule::fatal(nvltlc::INVALIDCRERR, "INVALIDCRERR", sxid::NVLTLC_INVALIDCRERR),
    BitRule::fatal(
        nvltlc::RXRSPSTATUS_HW_ERR,
        "RXRSPSTATUS_HW_ERR",
        sxid::NVLTLC_RX_LNK_RXRSPSTATUS_HW_ERR,
    ),
    BitRule::fatal(
        nvltlc::RXRSPSTATUS_UR_ERR,
        "RXRSPSTATUS_UR_ERR",
        sxid::NVLTLC_RX_LNK_RXRSPSTATUS_UR_ERR,
    ),
    BitRule::fatal(
        nvltlc::INVALID_COLLAPSED_RESPONSE_ERR,
        "INVALID_COLLAPSED_RESPONSE_ERR",
        sxid::NVLTLC_RX_LNK_INVALID_COLLAPSED_RESPONSE_ERR,
    ),
];

const NVLTLC_RX_LNK0_NONFATAL: [BitRule; 1] = [BitRule::nonfatal(
    nvltlc::RXRSPSTATUS_PRIV_ERR,
    "RXRSPSTATUS_PRIV_ERR",
    sxid::NVLTLC_RX_LNK_RXRSPSTATUS_PRIV_ERR,
)];

const NVLTLC_RX_LNK1_FATAL: [BitRule; 4] = [
    BitRule::fatal(nvltlc::RXHDROVFERR, "RXHDROVFERR", sxid::NVLTLC_RXHDROVFERR),
    BitRule::fatal(nvltlc::RXDATAOVFERR, "RXDATAOVFERR", sxid::NVLTLC_RXDATAOVFERR),
    BitRule::fatal(nvltlc::STOMPDETERR, "STOMPDETERR", sxid::NVLTLC_STOMPDETERR),
    BitRule::fatal(nvltlc::RXPOISONERR, "RXPOISONERR", sxid::NVLTLC_RXPOISONERR),
];

const NVLTLC_RX_LNK1_NONFATAL: [BitRule; 1] = [BitRule::nonfatal(
    nvltlc::AN1_HEARTBEAT_TIMEOUT_ERR,
    "AN1_HEARTBEAT_TIMEOUT_ERR",
    sxid::NVLTLC_RX_LNK_AN1_HEARTBEAT_TIMEOUT_ERR,
)];

pub(super) static NVLTLC_TX_SYS: UnitLayout = nvltlc_unit(
    ErrorUnit::NvltlcTxSys,
    "nvltlc tx_sys",
    nvltlc::TX_SYS,
    &NVLTLC_TX_SYS_FATAL,
    &[],
);

pub(super) static NVLTLC_RX_SYS: UnitLayout = nvltlc_unit(
    ErrorUnit::NvltlcRxSys,
    "nvltlc rx_sys",
    nvltlc::RX_SYS,
    &NVLTLC_RX_SYS_FATAL,
    &[],
);

pub(super) static NVLTLC_TX_LNK0: UnitLayout = nvltlc_unit(
    ErrorUnit::NvltlcTxLnk0,
    "nvltlc tx_lnk 0",
    nvltlc::TX_LNK_0,
    &NVLTLC_TX_LNK0_FATAL,
    &NVLTLC_TX_LNK0_NONFATAL,
);

pub(super) static NVLTLC_TX_LNK1: UnitLayout = nvltlc_unit(
    ErrorUnit::NvltlcTxLnk1,
    "nvltlc tx_lnk 1",
    nvltlc::TX_LNK_1,
    &[],
    &NVLTLC_TX_LNK1_NONFATAL,
);

pub(super) static NVLTLC_RX_LNK0: UnitLayout = nvltlc_unit(
    ErrorUnit::NvltlcRxLnk0,
    "nvltlc rx_lnk 0",
    nvltlc::RX_LNK_0,
    &NVLTLC_RX_LNK0_FATAL,
    &NVLTLC_RX_LNK0_NONFATAL,
);

pub(super) static NVLTLC_RX_LNK1: UnitLayout = nvltlc_unit(
    ErrorUnit::NvltlcRxLnk1,
    "nvltlc rx_lnk 1",
    nvltlc::RX_LNK_1,
    &NVLTLC_RX_LNK1_FATAL,
    &NVLTLC_RX_LNK1_NONFATAL,
);

// =============================================================================
// NVLIPT
// =============================================================================

const NVLIPT_COMMON_FATAL: [BitRule; 3] = [
    BitRule::fatal(
        nvlipt::CLKCTL_ILLEGAL_REQUEST,
        "CLKCTL_ILLEGAL_REQUEST",
        sxid::NVLIPT_CLKCTL_ILLEGAL_REQUEST,
    )
    .contained()
    .nvlink(NvlinkErrorKind::NvliptClkctlIllegalRequest),
    BitRule::fatal(
        nvlipt::RSTSEQ_PLL_TIMEOUT,
        "RSTSEQ_PLL_TIMEOUT",
        sxid::NVLIPT_RSTSEQ_PLL_TIMEOUT,
    )
    .contained()
    .nvlink(NvlinkErrorKind::NvliptRstseqPllTimeout),
    BitRule::fatal(
        nvlipt::RSTSEQ_PHYARB_TIMEOUT,
        "RSTSEQ_PHYARB_TIMEOUT",
        sxid::NVLIPT_RSTSEQ_PHYARB_TIMEOUT,
    )
    .contained()
    .nvlink(NvlinkErrorKind::NvliptRstseqPhyarbTimeout),
];

const NVLIPT_LNK_FATAL: [BitRule; 3] = [
    BitRule::fatal(
        nvlipt::SLEEPWHILEACTIVELINK,
        "SLEEPWHILEACTIVELINK",
        sxid::NVLIPT_LNK_SLEEPWHILEACTIVELINK,
    )
    .nvlink(NvlinkErrorKind::NvliptSleepWhileActiveLink),
    BitRule::fatal(
        nvlipt::RSTSEQ_PHYCTL_TIMEOUT,
        "RSTSEQ_PHYCTL_TIMEOUT",
        sxid::NVLIPT_LNK_RSTSEQ_PHYCTL_TIMEOUT,
    )
    .nvlink(NvlinkErrorKind::NvliptRstseqPhyctlTimeout),
    BitRule::fatal(
        nvlipt::RSTSEQ_CLKCTL_TIMEOUT,
        "RSTSEQ_CLKCTL_TIMEOUT",
        sxid::NVLIPT_LNK_RSTSEQ_CLKCTL_TIMEOUT,
    )
    .nvlink(NvlinkErrorKind::NvliptRstseqClkctlTimeout),
];

const NVLIPT_LNK_NONFATAL: [BitRule; 6] = [
    BitRule::nonfatal(
        nvlipt::ILLEGALLINKSTATEREQUEST,
        "ILLEGALLINKSTATEREQUEST",
        sxid::NVLIPT_LNK_ILLEGALLINKSTATEREQUEST,
    ),
    BitRule::nonfatal(
        nvlipt::FAILEDMINIONREQUEST,
        "FAILEDMINIONREQUEST",
        sxid::NVLIPT_LNK_FAILEDMINIONREQUEST,
    ),
    BitRule::nonfatal(
        nvlipt::RESERVEDREQUESTVALUE,
        "RESERVEDREQUESTVALUE",
        sxid::NVLIPT_LNK_RESERVEDREQUESTVALUE,
    ),
    BitRule::nonfatal(
        nvlipt::LINKSTATEWRITEWHILEBUSY,
        "LINKSTATEWRITEWHILEBUSY",
        sxid::NVLIPT_LNK_LINKSTATEWRITEWHILEBUSY,
    ),
    BitRule::nonfatal(
        nvlipt::LINK_STATE_REQUEST_TIMEOUT,
        "LINK_STATE_REQUEST_TIMEOUT",
        sxid::NVLIPT_LNK_LINK_STATE_REQUEST_TIMEOUT,
    ),
    BitRule::nonfatal(
        nvlipt::WRITE_TO_LOCKED_SYSTEM_REG_ERR,
        "WRITE_TO_LOCKED_SYSTEM_REG_ERR",
        sxid::NVLIPT_LNK_WRITE_TO_LOCKED_SYSTEM_REG_ERR,
    ),
];

/// NVLIPT error bank, same offsets as the NPORT bank but without capture
const fn nvlipt_unit(
    unit: ErrorUnit,
    block: Block,
    name: &'static str,
    fatal: &'static [BitRule],
    nonfatal: &'static [BitRule],
) -> UnitLayout {
    UnitLayout {
        capture: None,
        ..nport_unit(unit, block, name, fatal, nonfatal)
    }
}

pub(super) static NVLIPT_COMMON: UnitLayout = nvlipt_unit(
    ErrorUnit::NvliptCommon,
    Block::Nvlipt,
    "nvlipt common",
    &NVLIPT_COMMON_FATAL,
    &[],
);

pub(super) static NVLIPT_LNK: UnitLayout = nvlipt_unit(
    ErrorUnit::NvliptLnk,
    Block::NvliptLnk,
    "nvlipt link",
    &NVLIPT_LNK_FATAL,
    &NVLIPT_LNK_NONFATAL,
);

#[cfg(test)]
mod tests {
    use super::*;
    use nvswitch_core::Severity;

    static ALL: [&UnitLayout; 16] = [
        &ROUTE,
        &INGRESS,
        &EGRESS,
        &TSTATE,
        &SOURCETRACK,
        &TILE,
        &TILEOUT,
        &NVLDL,
        &NVLTLC_TX_SYS,
        &NVLTLC_RX_SYS,
        &NVLTLC_TX_LNK0,
        &NVLTLC_TX_LNK1,
        &NVLTLC_RX_LNK0,
        &NVLTLC_RX_LNK1,
        &NVLIPT_COMMON,
        &NVLIPT_LNK,
    ];

    #[test]
    fn test_rule_bits_unique_per_tree() {
        for layout in ALL {
            for severity in [Severity::Fatal, Severity::NonFatal, Severity::Correctable] {
                let mut seen = 0u32;
                for rule in layout.rules(severity) {
                    assert_eq!(rule.bit.count_ones(), 1, "{} {}", layout.name, rule.name);
                    assert_eq!(seen & rule.bit, 0, "{} {}", layout.name, rule.name);
                    assert_eq!(rule.severity, severity);
                    seen |= rule.bit;
                }
            }
        }
    }

    #[test]
    fn test_trees_disjoint() {
        for layout in ALL {
            let fatal = layout.classified(Severity::Fatal);
            let nonfatal = layout.classified(Severity::NonFatal);
            let correctable = layout.classified(Severity::Correctable);
            assert_eq!(fatal & nonfatal, 0, "{}", layout.name);
            assert_eq!((fatal | nonfatal) & correctable, 0, "{}", layout.name);
        }
    }

    #[test]
    fn test_nonfatal_rules_never_contained() {
        for layout in ALL {
            assert!(layout.nonfatal.iter().all(|r| !r.containable), "{}", layout.name);
        }
    }

    #[test]
    fn test_limit_and_dbe_paired() {
        for layout in ALL {
            for rule in layout.nonfatal.iter().filter(|r| r.suppressed_by != 0) {
                let dbe = layout
                    .fatal
                    .iter()
                    .find(|f| f.bit == rule.suppressed_by)
                    .expect("suppressing rule present");
                assert_eq!(dbe.clears, rule.bit, "{}", rule.name);
            }
        }
    }

    #[test]
    fn test_device_wide_rules() {
        let egress: alloc::vec::Vec<&str> = EGRESS
            .fatal
            .iter()
            .filter(|r| r.scope == nvswitch_core::FaultScope::Device)
            .map(|r| r.name)
            .collect();
        assert_eq!(egress, ["EGRESSBUFERR", "PKTROUTEERR", "SEQIDERR"]);
        assert!(TILE.fatal.iter().all(|r| r.scope == nvswitch_core::FaultScope::Device));
        assert!(TILEOUT.suppress_always);
    }

    #[test]
    fn test_nvldl_defaults() {
        assert_eq!(NVLDL.default_nonfatal & NVLDL_NONFATAL_INIT_OFF, 0);
        assert_ne!(NVLDL.default_nonfatal & nvldl::RX_CRC_COUNTER, 0);
        let crc = NVLDL.nonfatal.iter().find(|r| r.name == "RX_CRC_COUNTER");
        assert!(crc.is_some_and(|r| r.mask_after_report));
        let protocol = NVLDL.fatal.iter().find(|r| r.name == "LTSSM_PROTOCOL");
        assert!(protocol.is_some_and(|r| r.nvlink.is_none()));
    }
}
