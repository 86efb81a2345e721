//! # Report Sink
//!
//! Where classified errors go: the log, the in-memory journal, the
//! persistent error log and the host event channel. None of these can
//! fail the caller; forwarding errors are logged and dropped.

use log::{debug, error, info, warn};

use nvswitch_core::diagnostic::RawCapture;
use nvswitch_core::taxonomy::sxid;
use nvswitch_core::{
    Block, DeviceEvent, Diagnostic, EccEvent, ErrorCode, ErrorEvent, LinkId, NvlinkEvent, Severity,
};

use crate::device::Device;
use crate::state::DeviceState;

/// Fields of an event that the sink fills in itself
#[derive(Debug, Clone)]
pub(crate) struct EventSource {
    pub code: ErrorCode,
    pub name: &'static str,
    pub block: Block,
    pub instance: u32,
    pub link: Option<LinkId>,
    pub severity: Severity,
    pub contained: bool,
    pub bit: u32,
}

impl Device<'_> {
    /// Log and journal one classified error
    pub(crate) fn report(&self, state: &mut DeviceState, source: EventSource, diagnostic: Diagnostic) {
        let event = ErrorEvent {
            code: source.code,
            name: source.name,
            block: source.block,
            instance: source.instance,
            link: source.link,
            severity: source.severity,
            contained: source.contained,
            bit: source.bit,
            timestamp_ns: self.clock().now_ns(),
            diagnostic,
        };

        match event.severity {
            Severity::Fatal => error!("nvswitch: {}", event),
            Severity::NonFatal => warn!("nvswitch: {}", event),
            Severity::Correctable => info!("nvswitch: {}", event),
        }
        match &event.diagnostic {
            Diagnostic::None => {}
            Diagnostic::RawBlock(raw) => debug!(
                "nvswitch: {} raw {:?} {:#x?}",
                event.name,
                raw.flags,
                raw.words.as_slice()
            ),
            Diagnostic::AddressFault { valid, address } => debug!(
                "nvswitch: {} address {:#x} valid {}",
                event.name, address, valid
            ),
            Diagnostic::EccCounter {
                count,
                uncorrectable,
            } => debug!(
                "nvswitch: {} ecc count {} uncorrectable {}",
                event.name, count, uncorrectable
            ),
            Diagnostic::PriAccess(access) => debug!(
                "nvswitch: {} addr {:#x} data {:#x} info {:#x} code {:#x} write {}",
                event.name, access.addr, access.data, access.info, access.code, access.write
            ),
        }

        state.journal.write(event);
    }

    /// Forward an ECC error to the persistent log
    pub(crate) fn log_ecc(&self, event: EccEvent) {
        if let Err(err) = self.platform.error_log.log_ecc(&event) {
            warn!(
                "nvswitch: failed to persist {} on link {}: {}",
                event.code, event.link, err
            );
        }
    }

    /// Forward an NVLink error to the persistent log
    pub(crate) fn log_nvlink(&self, event: NvlinkEvent) {
        if let Err(err) = self.platform.error_log.log_nvlink(&event) {
            warn!(
                "nvswitch: failed to persist {:?} on nvlipt {} link {}: {}",
                event.kind, event.nvlipt_instance, event.local_link, err
            );
        }
    }

    /// Raise a host event
    pub(crate) fn notify(&self, event: DeviceEvent) {
        if let Err(err) = self.platform.notifier.notify(event) {
            error!("nvswitch: failed to notify {}: {}", event, err);
        }
    }

    /// Dump bits a node saw pending but could not classify.
    ///
    /// `regs` are the raw registers the node read, recorded verbatim in
    /// the event so the bits stay visible after the pass.
    pub(crate) fn report_unhandled(
        &self,
        state: &mut DeviceState,
        block: Block,
        instance: u32,
        link: Option<LinkId>,
        unhandled: u32,
        regs: &[u32],
    ) {
        error!(
            "nvswitch: unhandled interrupt {}[{}] bits {:#010x} regs {:#x?}",
            block, instance, unhandled, regs
        );

        let mut raw = RawCapture::default();
        for &word in regs {
            raw.push(word);
        }
        self.report(
            state,
            EventSource {
                code: sxid::HOST_UNHANDLED_INTERRUPT,
                name: "UNHANDLED_INTERRUPT",
                block,
                instance,
                link,
                severity: Severity::NonFatal,
                contained: false,
                bit: unhandled,
            },
            Diagnostic::RawBlock(raw),
        );
    }
}
