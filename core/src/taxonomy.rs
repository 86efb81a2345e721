//! # Error Taxonomy
//!
//! Every reportable hardware error is described by a [`BitRule`]: which
//! status bit it lives on, the stable error code it reports under, its
//! severity, whether it is contained, how far the fault reaches and what
//! diagnostics to capture. Register maps publish one rule table per
//! interrupt tree of each unit, in the order bits must be walked.

use core::fmt;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Stable numeric error code (SXid) reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    /// Raw numeric value
    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Code family base (e.g. 11000 for ingress)
    pub const fn family(&self) -> u32 {
        self.0 / 1000 * 1000
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SXid {}", self.0)
    }
}

/// SXid assignments, grouped by reporting unit
#[allow(missing_docs)]
pub mod sxid {
    use super::ErrorCode;

    // Host
    pub const HOST_PRIV_ERROR: ErrorCode = ErrorCode(10001);
    pub const HOST_PRIV_TIMEOUT: ErrorCode = ErrorCode(10002);
    pub const HOST_UNHANDLED_INTERRUPT: ErrorCode = ErrorCode(10003);

    // Ingress
    pub const INGRESS_CMDDECODEERR: ErrorCode = ErrorCode(11001);
    pub const INGRESS_ACLFAIL: ErrorCode = ErrorCode(11004);
    pub const INGRESS_INVALIDVCSET: ErrorCode = ErrorCode(11009);
    pub const INGRESS_REQCONTEXTMISMATCHERR: ErrorCode = ErrorCode(11011);
    pub const INGRESS_NCISOC_HDR_ECC_LIMIT_ERR: ErrorCode = ErrorCode(11012);
    pub const INGRESS_NCISOC_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(11013);
    pub const INGRESS_ADDRBOUNDSERR: ErrorCode = ErrorCode(11014);
    pub const INGRESS_RIDTABCFGERR: ErrorCode = ErrorCode(11015);
    pub const INGRESS_RLANTABCFGERR: ErrorCode = ErrorCode(11016);
    pub const INGRESS_REMAPTAB_ECC_DBE_ERR: ErrorCode = ErrorCode(11017);
    pub const INGRESS_RIDTAB_ECC_DBE_ERR: ErrorCode = ErrorCode(11018);
    pub const INGRESS_RLANTAB_ECC_DBE_ERR: ErrorCode = ErrorCode(11019);
    pub const INGRESS_NCISOC_PARITY_ERR: ErrorCode = ErrorCode(11020);
    pub const INGRESS_REMAPTAB_ECC_LIMIT_ERR: ErrorCode = ErrorCode(11021);
    pub const INGRESS_RIDTAB_ECC_LIMIT_ERR: ErrorCode = ErrorCode(11022);
    pub const INGRESS_RLANTAB_ECC_LIMIT_ERR: ErrorCode = ErrorCode(11023);
    pub const INGRESS_ADDRTYPEERR: ErrorCode = ErrorCode(11024);

    // Egress
    pub const EGRESS_EGRESSBUFERR: ErrorCode = ErrorCode(12001);
    pub const EGRESS_PKTROUTEERR: ErrorCode = ErrorCode(12002);
    pub const EGRESS_DROPNPURRSPERR: ErrorCode = ErrorCode(12014);
    pub const EGRESS_SEQIDERR: ErrorCode = ErrorCode(12020);
    pub const EGRESS_NXBAR_HDR_ECC_LIMIT_ERR: ErrorCode = ErrorCode(12021);
    pub const EGRESS_NXBAR_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(12022);
    pub const EGRESS_RAM_OUT_HDR_ECC_LIMIT_ERR: ErrorCode = ErrorCode(12023);
    pub const EGRESS_RAM_OUT_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(12024);
    pub const EGRESS_NCISOCCREDITOVFL: ErrorCode = ErrorCode(12025);
    pub const EGRESS_REQTGTIDMISMATCHERR: ErrorCode = ErrorCode(12026);
    pub const EGRESS_RSPREQIDMISMATCHERR: ErrorCode = ErrorCode(12027);
    pub const EGRESS_PRIVRSPERR: ErrorCode = ErrorCode(12028);
    pub const EGRESS_HWRSPERR: ErrorCode = ErrorCode(12029);
    pub const EGRESS_NXBAR_HDR_PARITY_ERR: ErrorCode = ErrorCode(12030);
    pub const EGRESS_NCISOC_CREDIT_PARITY_ERR: ErrorCode = ErrorCode(12031);
    pub const EGRESS_NXBAR_FLITTYPE_MISMATCH_ERR: ErrorCode = ErrorCode(12032);
    pub const EGRESS_CREDIT_TIME_OUT_ERR: ErrorCode = ErrorCode(12033);

    // Tag state
    pub const TSTATE_TAGPOOLBUFERR: ErrorCode = ErrorCode(14001);
    pub const TSTATE_CRUMBSTOREBUFERR: ErrorCode = ErrorCode(14002);
    pub const TSTATE_TAGPOOL_ECC_LIMIT_ERR: ErrorCode = ErrorCode(14007);
    pub const TSTATE_TAGPOOL_ECC_DBE_ERR: ErrorCode = ErrorCode(14008);
    pub const TSTATE_CRUMBSTORE_ECC_LIMIT_ERR: ErrorCode = ErrorCode(14009);
    pub const TSTATE_CRUMBSTORE_ECC_DBE_ERR: ErrorCode = ErrorCode(14010);
    pub const TSTATE_ATO_ERR: ErrorCode = ErrorCode(14017);
    pub const TSTATE_CAMRSP_ERR: ErrorCode = ErrorCode(14018);

    // Route
    pub const ROUTE_ROUTEBUFERR: ErrorCode = ErrorCode(15001);
    pub const ROUTE_NOPORTDEFINEDERR: ErrorCode = ErrorCode(15002);
    pub const ROUTE_INVALIDROUTEPOLICYERR: ErrorCode = ErrorCode(15003);
    pub const ROUTE_TRANSDONERESVERR: ErrorCode = ErrorCode(15006);
    pub const ROUTE_GLT_ECC_LIMIT_ERR: ErrorCode = ErrorCode(15008);
    pub const ROUTE_GLT_ECC_DBE_ERR: ErrorCode = ErrorCode(15009);
    pub const ROUTE_PDCTRLPARERR: ErrorCode = ErrorCode(15010);
    pub const ROUTE_NVS_ECC_LIMIT_ERR: ErrorCode = ErrorCode(15011);
    pub const ROUTE_NVS_ECC_DBE_ERR: ErrorCode = ErrorCode(15012);
    pub const ROUTE_CDTPARERR: ErrorCode = ErrorCode(15013);

    // NVLink IP common
    pub const NVLIPT_RSTSEQ_PHYARB_TIMEOUT: ErrorCode = ErrorCode(18018);
    pub const NVLIPT_RSTSEQ_PLL_TIMEOUT: ErrorCode = ErrorCode(18019);
    pub const NVLIPT_CLKCTL_ILLEGAL_REQUEST: ErrorCode = ErrorCode(18020);

    // NVLink transaction layer
    pub const NVLTLC_TXDLCREDITPARITYERR: ErrorCode = ErrorCode(19004);
    pub const NVLTLC_TXPOISONDET: ErrorCode = ErrorCode(19009);
    pub const NVLTLC_RXDLHDRPARITYERR: ErrorCode = ErrorCode(19013);
    pub const NVLTLC_RXDLDATAPARITYERR: ErrorCode = ErrorCode(19014);
    pub const NVLTLC_RXDLCTRLPARITYERR: ErrorCode = ErrorCode(19015);
    pub const NVLTLC_RXINVALIDAEERR: ErrorCode = ErrorCode(19018);
    pub const NVLTLC_RXINVALIDBEERR: ErrorCode = ErrorCode(19019);
    pub const NVLTLC_RXINVALIDADDRALIGNERR: ErrorCode = ErrorCode(19020);
    pub const NVLTLC_RXPKTLENERR: ErrorCode = ErrorCode(19021);
    pub const NVLTLC_RSVCMDENCERR: ErrorCode = ErrorCode(19022);
    pub const NVLTLC_RSVDATLENENCERR: ErrorCode = ErrorCode(19023);
    pub const NVLTLC_RSVPKTSTATUSERR: ErrorCode = ErrorCode(19026);
    pub const NVLTLC_RSVCACHEATTRPROBEREQERR: ErrorCode = ErrorCode(19027);
    pub const NVLTLC_RSVCACHEATTRPROBERSPERR: ErrorCode = ErrorCode(19028);
    pub const NVLTLC_DATLENGTRMWREQMAXERR: ErrorCode = ErrorCode(19030);
    pub const NVLTLC_DATLENLTATRRSPMINERR: ErrorCode = ErrorCode(19031);
    pub const NVLTLC_INVALIDCACHEATTRPOERR: ErrorCode = ErrorCode(19032);
    pub const NVLTLC_INVALIDCRERR: ErrorCode = ErrorCode(19033);
    pub const NVLTLC_RXHDROVFERR: ErrorCode = ErrorCode(19036);
    pub const NVLTLC_RXDATAOVFERR: ErrorCode = ErrorCode(19037);
    pub const NVLTLC_STOMPDETERR: ErrorCode = ErrorCode(19038);
    pub const NVLTLC_RXPOISONERR: ErrorCode = ErrorCode(19039);
    pub const NVLTLC_TX_SYS_NCISOC_PARITY_ERR: ErrorCode = ErrorCode(19046);
    pub const NVLTLC_TX_SYS_NCISOC_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(19047);
    pub const NVLTLC_TX_SYS_NCISOC_DAT_ECC_DBE_ERR: ErrorCode = ErrorCode(19048);
    pub const NVLTLC_TX_SYS_NCISOC_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19049);
    pub const NVLTLC_TX_SYS_TXRSPSTATUS_HW_ERR: ErrorCode = ErrorCode(19050);
    pub const NVLTLC_TX_SYS_TXRSPSTATUS_UR_ERR: ErrorCode = ErrorCode(19051);
    pub const NVLTLC_TX_SYS_TXRSPSTATUS_PRIV_ERR: ErrorCode = ErrorCode(19052);
    pub const NVLTLC_RX_SYS_NCISOC_PARITY_ERR: ErrorCode = ErrorCode(19053);
    pub const NVLTLC_RX_SYS_HDR_RAM_ECC_DBE_ERR: ErrorCode = ErrorCode(19054);
    pub const NVLTLC_RX_SYS_HDR_RAM_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19055);
    pub const NVLTLC_RX_SYS_DAT0_RAM_ECC_DBE_ERR: ErrorCode = ErrorCode(19056);
    pub const NVLTLC_RX_SYS_DAT0_RAM_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19057);
    pub const NVLTLC_RX_SYS_DAT1_RAM_ECC_DBE_ERR: ErrorCode = ErrorCode(19058);
    pub const NVLTLC_RX_SYS_DAT1_RAM_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19059);
    pub const NVLTLC_TX_LNK_CREQ_RAM_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(19060);
    pub const NVLTLC_TX_LNK_CREQ_RAM_DAT_ECC_DBE_ERR: ErrorCode = ErrorCode(19061);
    pub const NVLTLC_TX_LNK_CREQ_RAM_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19062);
    pub const NVLTLC_TX_LNK_RSP_RAM_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(19063);
    pub const NVLTLC_TX_LNK_RSP_RAM_DAT_ECC_DBE_ERR: ErrorCode = ErrorCode(19064);
    pub const NVLTLC_TX_LNK_RSP_RAM_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19065);
    pub const NVLTLC_TX_LNK_COM_RAM_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(19066);
    pub const NVLTLC_TX_LNK_COM_RAM_DAT_ECC_DBE_ERR: ErrorCode = ErrorCode(19067);
    pub const NVLTLC_TX_LNK_COM_RAM_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19068);
    pub const NVLTLC_TX_LNK_RSP1_RAM_HDR_ECC_DBE_ERR: ErrorCode = ErrorCode(19069);
    pub const NVLTLC_TX_LNK_RSP1_RAM_DAT_ECC_DBE_ERR: ErrorCode = ErrorCode(19070);
    pub const NVLTLC_TX_LNK_RSP1_RAM_ECC_LIMIT_ERR: ErrorCode = ErrorCode(19071);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC0: ErrorCode = ErrorCode(19072);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC1: ErrorCode = ErrorCode(19073);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC2: ErrorCode = ErrorCode(19074);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC3: ErrorCode = ErrorCode(19075);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC4: ErrorCode = ErrorCode(19076);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC5: ErrorCode = ErrorCode(19077);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC6: ErrorCode = ErrorCode(19078);
    pub const NVLTLC_TX_LNK_AN1_TIMEOUT_VC7: ErrorCode = ErrorCode(19079);
    pub const NVLTLC_RX_LNK_RXRSPSTATUS_HW_ERR: ErrorCode = ErrorCode(19080);
    pub const NVLTLC_RX_LNK_RXRSPSTATUS_UR_ERR: ErrorCode = ErrorCode(19081);
    pub const NVLTLC_RX_LNK_RXRSPSTATUS_PRIV_ERR: ErrorCode = ErrorCode(19082);
    pub const NVLTLC_RX_LNK_INVALID_COLLAPSED_RESPONSE_ERR: ErrorCode = ErrorCode(19083);
    pub const NVLTLC_RX_LNK_AN1_HEARTBEAT_TIMEOUT_ERR: ErrorCode = ErrorCode(19084);

    // NVLink data link layer
    pub const DLPL_TX_REPLAY: ErrorCode = ErrorCode(20001);
    pub const DLPL_TX_RECOVERY_SHORT: ErrorCode = ErrorCode(20002);
    pub const DLPL_TX_FAULT_RAM: ErrorCode = ErrorCode(20004);
    pub const DLPL_TX_FAULT_INTERFACE: ErrorCode = ErrorCode(20005);
    pub const DLPL_TX_FAULT_SUBLINK_CHANGE: ErrorCode = ErrorCode(20006);
    pub const DLPL_RX_FAULT_SUBLINK_CHANGE: ErrorCode = ErrorCode(20007);
    pub const DLPL_RX_FAULT_DL_PROTOCOL: ErrorCode = ErrorCode(20008);
    pub const DLPL_RX_SHORT_ERROR_RATE: ErrorCode = ErrorCode(20009);
    pub const DLPL_RX_LONG_ERROR_RATE: ErrorCode = ErrorCode(20010);
    pub const DLPL_RX_ILA_TRIGGER: ErrorCode = ErrorCode(20011);
    pub const DLPL_RX_CRC_COUNTER: ErrorCode = ErrorCode(20012);
    pub const DLPL_LTSSM_PROTOCOL: ErrorCode = ErrorCode(20014);
    pub const DLPL_LTSSM_FAULT_UP: ErrorCode = ErrorCode(20034);
    pub const DLPL_LTSSM_FAULT_DOWN: ErrorCode = ErrorCode(20035);

    // Link management microcontroller
    pub const MINION_HALT: ErrorCode = ErrorCode(22003);
    pub const MINION_FATAL_INTR: ErrorCode = ErrorCode(22009);
    pub const MINION_WATCHDOG: ErrorCode = ErrorCode(22010);
    pub const MINION_EXTERR: ErrorCode = ErrorCode(22011);
    pub const MINION_FATAL_LINK_INTR: ErrorCode = ErrorCode(22012);
    pub const MINION_NONFATAL: ErrorCode = ErrorCode(22013);

    // Crossbar
    pub const NXBAR_TILE_INGRESS_BUFFER_OVERFLOW: ErrorCode = ErrorCode(23001);
    pub const NXBAR_TILE_INGRESS_BUFFER_UNDERFLOW: ErrorCode = ErrorCode(23002);
    pub const NXBAR_TILE_EGRESS_CREDIT_OVERFLOW: ErrorCode = ErrorCode(23003);
    pub const NXBAR_TILE_EGRESS_CREDIT_UNDERFLOW: ErrorCode = ErrorCode(23004);
    pub const NXBAR_TILE_INGRESS_NON_BURSTY_PKT: ErrorCode = ErrorCode(23005);
    pub const NXBAR_TILE_INGRESS_NON_STICKY_PKT: ErrorCode = ErrorCode(23006);
    pub const NXBAR_TILE_INGRESS_BURST_GT_9_DATA_VC: ErrorCode = ErrorCode(23007);
    pub const NXBAR_TILE_INGRESS_PKT_INVALID_DST: ErrorCode = ErrorCode(23008);
    pub const NXBAR_TILE_INGRESS_PKT_PARITY_ERROR: ErrorCode = ErrorCode(23009);
    pub const NXBAR_TILEOUT_INGRESS_BUFFER_OVERFLOW: ErrorCode = ErrorCode(23010);
    pub const NXBAR_TILEOUT_INGRESS_BUFFER_UNDERFLOW: ErrorCode = ErrorCode(23011);
    pub const NXBAR_TILEOUT_EGRESS_CREDIT_OVERFLOW: ErrorCode = ErrorCode(23012);
    pub const NXBAR_TILEOUT_EGRESS_CREDIT_UNDERFLOW: ErrorCode = ErrorCode(23013);
    pub const NXBAR_TILEOUT_INGRESS_NON_BURSTY_PKT: ErrorCode = ErrorCode(23014);
    pub const NXBAR_TILEOUT_INGRESS_NON_STICKY_PKT: ErrorCode = ErrorCode(23015);
    pub const NXBAR_TILEOUT_INGRESS_BURST_GT_9_DATA_VC: ErrorCode = ErrorCode(23016);
    pub const NXBAR_TILEOUT_EGRESS_CDT_PARITY_ERROR: ErrorCode = ErrorCode(23017);

    // Source tracking
    pub const SOURCETRACK_CREQ_TCEN0_CRUMBSTORE_ECC_LIMIT_ERR: ErrorCode = ErrorCode(24001);
    pub const SOURCETRACK_CREQ_TCEN1_CRUMBSTORE_ECC_LIMIT_ERR: ErrorCode = ErrorCode(24003);
    pub const SOURCETRACK_CREQ_TCEN0_CRUMBSTORE_ECC_DBE_ERR: ErrorCode = ErrorCode(24004);
    pub const SOURCETRACK_CREQ_TCEN1_CRUMBSTORE_ECC_DBE_ERR: ErrorCode = ErrorCode(24006);
    pub const SOURCETRACK_SOURCETRACK_TIME_OUT_ERR: ErrorCode = ErrorCode(24007);

    // NVLink IP per-link
    pub const NVLIPT_LNK_ILLEGALLINKSTATEREQUEST: ErrorCode = ErrorCode(25001);
    pub const NVLIPT_LNK_FAILEDMINIONREQUEST: ErrorCode = ErrorCode(25002);
    pub const NVLIPT_LNK_RESERVEDREQUESTVALUE: ErrorCode = ErrorCode(25003);
    pub const NVLIPT_LNK_LINKSTATEWRITEWHILEBUSY: ErrorCode = ErrorCode(25004);
    pub const NVLIPT_LNK_LINK_STATE_REQUEST_TIMEOUT: ErrorCode = ErrorCode(25005);
    pub const NVLIPT_LNK_WRITE_TO_LOCKED_SYSTEM_REG_ERR: ErrorCode = ErrorCode(25006);
    pub const NVLIPT_LNK_SLEEPWHILEACTIVELINK: ErrorCode = ErrorCode(25007);
    pub const NVLIPT_LNK_RSTSEQ_PHYCTL_TIMEOUT: ErrorCode = ErrorCode(25008);
    pub const NVLIPT_LNK_RSTSEQ_CLKCTL_TIMEOUT: ErrorCode = ErrorCode(25009);
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Which interrupt tree reports the error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Correctable tree; hardware already fixed it up
    Correctable,
    /// Non-fatal tree; traffic continues
    NonFatal,
    /// Fatal tree; the affected port or device needs a reset
    Fatal,
}

impl Severity {
    /// Log label
    pub const fn name(&self) -> &'static str {
        match self {
            Severity::Correctable => "correctable",
            Severity::NonFatal => "non-fatal",
            Severity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reach of a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultScope {
    /// Only the reporting link needs recovery
    Link,
    /// The whole device needs a reset
    Device,
}

/// Diagnostic payload a rule captures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Nothing beyond the code
    None,
    /// The unit's raw capture block (timestamp, misc, header words)
    RawBlock,
    /// Faulting RAM address and its valid flag
    AddressFault,
    /// ECC counter value
    EccCounter,
}

/// Location of a faulting ECC address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EccAddress {
    /// Register holding the faulting address
    pub address: u32,
    /// Register holding the valid flag
    pub valid: u32,
    /// Valid flag within `valid`
    pub valid_mask: u32,
}

/// ECC bookkeeping attached to a rule; offsets are in the unit's block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EccRule {
    /// Error counter register, read into the event count
    pub counter: Option<u32>,
    /// Faulting address registers
    pub address: Option<EccAddress>,
    /// Double-bit (uncorrectable) error
    pub uncorrectable: bool,
    /// Zero the counter once the status bit has been cleared
    pub reset_counter: bool,
}

impl EccRule {
    /// Uncorrectable error without counter
    pub const fn dbe() -> Self {
        Self {
            counter: None,
            address: None,
            uncorrectable: true,
            reset_counter: false,
        }
    }

    /// Correctable threshold error counted by `counter`
    pub const fn limit(counter: u32) -> Self {
        Self {
            counter: Some(counter),
            address: None,
            uncorrectable: false,
            reset_counter: true,
        }
    }

    /// Attach faulting address registers
    pub const fn with_address(self, address: u32, valid: u32, valid_mask: u32) -> Self {
        Self {
            address: Some(EccAddress {
                address,
                valid,
                valid_mask,
            }),
            ..self
        }
    }

    /// Attach a counter that is zeroed after servicing
    pub const fn with_counter(self, counter: u32) -> Self {
        Self {
            counter: Some(counter),
            reset_counter: true,
            ..self
        }
    }
}

// =============================================================================
// BIT RULES
// =============================================================================

/// Classification of one status bit on one interrupt tree.
///
/// Rules are built with `const` constructors so register maps can keep
/// them in static tables:
///
/// ```
/// use nvswitch_core::taxonomy::{sxid, BitRule, EccRule};
///
/// const NVS_DBE: BitRule = BitRule::fatal(1 << 8, "NVS_ECC_DBE_ERR", sxid::ROUTE_NVS_ECC_DBE_ERR)
///     .contained()
///     .ecc(EccRule::dbe())
///     .clears(1 << 7);
/// assert!(NVS_DBE.containable);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRule {
    /// Status bit mask (one bit)
    pub bit: u32,
    /// Hardware field name
    pub name: &'static str,
    /// Reported code
    pub code: ErrorCode,
    /// Tree the rule belongs to
    pub severity: Severity,
    /// Hardware contains traffic when this error fires
    pub containable: bool,
    /// Reach of the fault when fatal
    pub scope: FaultScope,
    /// Payload captured with the event
    pub diagnostic: DiagnosticKind,
    /// ECC bookkeeping, if an ECC error
    pub ecc: Option<EccRule>,
    /// Raw-pending bits that make this report redundant (DBE over LIMIT)
    pub suppressed_by: u32,
    /// Raw-pending bits cleared along with this one (LIMIT under DBE)
    pub clears: u32,
    /// Mask the bit in the report enable after reporting
    pub mask_after_report: bool,
    /// Persistent NVLink event to record, if any
    pub nvlink: Option<crate::diagnostic::NvlinkErrorKind>,
}

impl BitRule {
    const fn new(bit: u32, name: &'static str, code: ErrorCode, severity: Severity) -> Self {
        Self {
            bit,
            name,
            code,
            severity,
            containable: false,
            scope: FaultScope::Link,
            diagnostic: DiagnosticKind::None,
            ecc: None,
            suppressed_by: 0,
            clears: 0,
            mask_after_report: false,
            nvlink: None,
        }
    }

    /// Fatal-tree rule
    pub const fn fatal(bit: u32, name: &'static str, code: ErrorCode) -> Self {
        Self::new(bit, name, code, Severity::Fatal)
    }

    /// Non-fatal-tree rule
    pub const fn nonfatal(bit: u32, name: &'static str, code: ErrorCode) -> Self {
        Self::new(bit, name, code, Severity::NonFatal)
    }

    /// Correctable-tree rule
    pub const fn correctable(bit: u32, name: &'static str, code: ErrorCode) -> Self {
        Self::new(bit, name, code, Severity::Correctable)
    }

    /// Hardware contains traffic on this error
    pub const fn contained(self) -> Self {
        Self {
            containable: true,
            ..self
        }
    }

    /// Fault reaches the whole device
    pub const fn device_wide(self) -> Self {
        Self {
            scope: FaultScope::Device,
            ..self
        }
    }

    /// Capture the unit's raw diagnostic block
    pub const fn raw(self) -> Self {
        Self {
            diagnostic: DiagnosticKind::RawBlock,
            ..self
        }
    }

    /// ECC error; the diagnostic follows what the rule can read
    pub const fn ecc(self, ecc: EccRule) -> Self {
        let diagnostic = if ecc.address.is_some() {
            DiagnosticKind::AddressFault
        } else {
            DiagnosticKind::EccCounter
        };
        Self {
            ecc: Some(ecc),
            diagnostic,
            ..self
        }
    }

    /// Skip the report while any of `mask` is raw-pending
    pub const fn suppressed_by(self, mask: u32) -> Self {
        Self {
            suppressed_by: mask,
            ..self
        }
    }

    /// Clear `mask` too when this rule is handled
    pub const fn clears(self, mask: u32) -> Self {
        Self { clears: mask, ..self }
    }

    /// Mask this bit once reported (self-throttling counters)
    pub const fn mask_after_report(self) -> Self {
        Self {
            mask_after_report: true,
            ..self
        }
    }

    /// Record a persistent NVLink event
    pub const fn nvlink(self, kind: crate::diagnostic::NvlinkErrorKind) -> Self {
        Self {
            nvlink: Some(kind),
            ..self
        }
    }

    /// Whether reaching this rule marks a link fatal
    pub const fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Fatal)
    }
}

/// Union of all rule bits in a table
pub const fn table_mask(rules: &[BitRule]) -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < rules.len() {
        mask |= rules[i].bit;
        i += 1;
    }
    mask
}
