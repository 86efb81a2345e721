//! # Error Events
//!
//! What a handler emits for every reported error, plus the records that
//! go to the persistent error log.

use arrayvec::ArrayVec;
use bitflags::bitflags;
use core::fmt;

use crate::taxonomy::{ErrorCode, Severity};
use crate::types::{Block, LinkId};

/// Words of raw diagnostic data a unit can capture
pub const RAW_CAPTURE_WORDS: usize = 16;

bitflags! {
    /// Which parts of a raw capture are populated
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CaptureFlags: u32 {
        /// Error timestamp log
        const TIME   = 1 << 0;
        /// Miscellaneous log, present only when the header log is valid
        const MISC   = 1 << 1;
        /// Packet header log
        const HEADER = 1 << 2;
    }
}

/// Raw register snapshot taken from a unit's capture registers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawCapture {
    /// Populated sections
    pub flags: CaptureFlags,
    /// Captured words in capture order
    pub words: ArrayVec<u32, RAW_CAPTURE_WORDS>,
}

impl RawCapture {
    /// Append a word; extra words beyond capacity are dropped
    pub fn push(&mut self, word: u32) {
        let _ = self.words.try_push(word);
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Captured privileged-access fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriAccess {
    /// Faulting register address
    pub addr: u32,
    /// Data written, when the access was a write
    pub data: u32,
    /// Source or info word
    pub info: u32,
    /// Hardware error code
    pub code: u32,
    /// Access was a write
    pub write: bool,
}

/// Payload attached to an [`ErrorEvent`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Diagnostic {
    /// Code only
    #[default]
    None,
    /// Raw register snapshot
    RawBlock(RawCapture),
    /// Faulting RAM address
    AddressFault {
        /// Hardware latched a valid address
        valid: bool,
        /// Address, meaningful only when `valid`
        address: u32,
    },
    /// ECC counter state
    EccCounter {
        /// Errors counted
        count: u32,
        /// Double-bit error
        uncorrectable: bool,
    },
    /// Privileged access fault
    PriAccess(PriAccess),
}

/// One reported hardware error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    /// Stable error code
    pub code: ErrorCode,
    /// Hardware field name of the status bit
    pub name: &'static str,
    /// Reporting block
    pub block: Block,
    /// Block instance
    pub instance: u32,
    /// Affected link, when the error is link-scoped
    pub link: Option<LinkId>,
    /// Tree the error arrived on
    pub severity: Severity,
    /// Hardware contained traffic
    pub contained: bool,
    /// Status bit
    pub bit: u32,
    /// Report time from the platform clock
    pub timestamp_ns: u64,
    /// Captured payload
    pub diagnostic: Diagnostic,
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}[{}] {}",
            self.code, self.severity, self.block, self.instance, self.name
        )?;
        if let Some(link) = self.link {
            write!(f, " link {}", link)?;
        }
        if self.contained {
            write!(f, " (contained)")?;
        }
        Ok(())
    }
}

// =============================================================================
// PERSISTENT RECORDS
// =============================================================================

/// ECC record for the persistent error log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EccEvent {
    /// Reported code
    pub code: ErrorCode,
    /// Affected link
    pub link: LinkId,
    /// Address registers held a valid address
    pub address_valid: bool,
    /// Faulting address
    pub address: u32,
    /// Double-bit error
    pub uncorrectable: bool,
    /// Error count
    pub count: u32,
}

/// NVLink fault classes kept in the persistent log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NvlinkErrorKind {
    /// DL transmit RAM fault
    DlTxFaultRam,
    /// DL transmit interface fault
    DlTxFaultInterface,
    /// DL transmit sublink change
    DlTxFaultSublinkChange,
    /// DL receive sublink change
    DlRxFaultSublinkChange,
    /// DL receive protocol fault
    DlRxFaultDlProtocol,
    /// LTSSM fault while going down
    DlLtssmFaultDown,
    /// LTSSM fault while coming up
    DlLtssmFaultUp,
    /// Illegal clock control request
    NvliptClkctlIllegalRequest,
    /// Reset sequencer PLL timeout
    NvliptRstseqPllTimeout,
    /// Reset sequencer PHY arbiter timeout
    NvliptRstseqPhyarbTimeout,
    /// Sleep requested on an active link
    NvliptSleepWhileActiveLink,
    /// Reset sequencer PHY control timeout
    NvliptRstseqPhyctlTimeout,
    /// Reset sequencer clock control timeout
    NvliptRstseqClkctlTimeout,
}

/// NVLink record for the persistent error log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NvlinkEvent {
    /// Fault class
    pub kind: NvlinkErrorKind,
    /// NVLIPT instance the link belongs to
    pub nvlipt_instance: u32,
    /// Link index within the instance
    pub local_link: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::sxid;
    use alloc::string::ToString;

    #[test]
    fn test_raw_capture_bounded() {
        let mut raw = RawCapture::default();
        for i in 0..(RAW_CAPTURE_WORDS as u32 + 4) {
            raw.push(i);
        }
        assert_eq!(raw.words.len(), RAW_CAPTURE_WORDS);
        assert_eq!(raw.words[0], 0);
    }

    #[test]
    fn test_event_display() {
        let event = ErrorEvent {
            code: sxid::ROUTE_ROUTEBUFERR,
            name: "ROUTEBUFERR",
            block: Block::Route,
            instance: 3,
            link: Some(3),
            severity: Severity::Fatal,
            contained: true,
            bit: 1,
            timestamp_ns: 0,
            diagnostic: Diagnostic::None,
        };
        assert_eq!(
            event.to_string(),
            "SXid 15001 fatal ROUTE[3] ROUTEBUFERR link 3 (contained)"
        );
    }
}
