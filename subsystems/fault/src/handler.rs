//! # Generic Error Unit Handler
//!
//! One walker services every table-driven error unit. It reads the
//! unit's pending bits for one tree, walks the rule table in order,
//! reports and clears what it recognizes and leaves everything else
//! latched for the unhandled dump.
//!
//! Write ordering at the end of a pass:
//!
//! ```text
//! report enable (storm suppression)
//!   → first-error latch
//!     → status (write-one-to-clear)
//!       → ECC counters
//! ```

use arrayvec::ArrayVec;
use log::debug;

use nvswitch_core::diagnostic::{CaptureFlags, RawCapture};
use nvswitch_core::{
    BitRule, Block, Diagnostic, DiagnosticKind, EccEvent, FaultScope, LinkId, LinkMask, NvlinkEvent,
    ServiceStatus, Severity,
};
use nvswitch_hal::{ErrorUnit, UnitLayout};

use crate::device::Device;
use crate::report::EventSource;
use crate::state::DeviceState;

// =============================================================================
// TARGETS
// =============================================================================

/// Links an error unit instance speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Subject {
    /// A per-link unit
    Link(LinkId),
    /// A unit shared by several links; events fan out to each
    Links(LinkMask),
    /// A device-level unit with no owning link
    Device,
}

impl Subject {
    pub fn links(&self) -> LinkMask {
        match *self {
            Subject::Link(link) => LinkMask::single(link),
            Subject::Links(mask) => mask,
            Subject::Device => LinkMask::EMPTY,
        }
    }

    fn first_link(&self) -> Option<LinkId> {
        self.links().iter().next()
    }
}

/// One instance of an error unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnitInstance {
    pub unit: ErrorUnit,
    pub instance: u32,
    pub sub: u32,
    pub subject: Subject,
}

impl UnitInstance {
    /// Per-link unit addressed by its link
    pub const fn link(unit: ErrorUnit, link: LinkId) -> Self {
        Self {
            unit,
            instance: link,
            sub: 0,
            subject: Subject::Link(link),
        }
    }
}

/// Summary register whose bits each front one child node.
///
/// A bit is retired only when its child reports `Success`; whatever is
/// left when the node finishes gets dumped as unhandled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Summary {
    pending: u32,
    unhandled: u32,
}

impl Summary {
    pub fn new(pending: u32) -> Self {
        Self {
            pending,
            unhandled: pending,
        }
    }

    /// Whether `bit` is pending
    pub fn has(&self, bit: u32) -> bool {
        self.pending & bit != 0
    }

    /// Record the outcome of the child behind `bit`
    pub fn child(&mut self, bit: u32, status: ServiceStatus) {
        if status.is_success() {
            self.unhandled &= !bit;
        }
    }

    /// Retire `bit` without a child
    pub fn handled(&mut self, bit: u32) {
        self.unhandled &= !bit;
    }

    /// Dump leftovers and turn the summary into a node status
    pub fn finish(
        self,
        device: &Device<'_>,
        state: &mut DeviceState,
        block: Block,
        instance: u32,
        regs: &[u32],
    ) -> ServiceStatus {
        if self.pending == 0 {
            return ServiceStatus::NotFound;
        }
        if self.unhandled != 0 {
            device.report_unhandled(state, block, instance, None, self.unhandled, regs);
        }
        ServiceStatus::from_unhandled(self.unhandled)
    }
}

/// Counters to zero once the status write has landed
type CounterResets = ArrayVec<u32, 32>;

// =============================================================================
// WALKER
// =============================================================================

impl Device<'_> {
    /// Service one error unit instance on one tree
    pub(crate) fn service_unit(
        &self,
        state: &mut DeviceState,
        target: UnitInstance,
        severity: Severity,
    ) -> ServiceStatus {
        let layout = self.map.unit(target.unit);
        let Some(enable_reg) = layout.enable(severity) else {
            return ServiceStatus::NotFound;
        };
        let block = layout.block;
        let instance = target.instance;
        let reg = |offset: u32| layout.at(offset, target.sub);

        let raw = self.io.read32(block, instance, reg(layout.status));
        let enabled = self.io.read32(block, instance, reg(enable_reg));
        let pending = raw & enabled;
        if pending == 0 {
            return ServiceStatus::NotFound;
        }

        let first = layout
            .first
            .map_or(0, |first| self.io.read32(block, instance, reg(first)));
        let contain = layout
            .contain
            .map_or(0, |contain| self.io.read32(block, instance, reg(contain)));
        let inject = layout
            .inject
            .map_or(0, |inject| self.io.read32(block, instance, reg(inject)));

        #[cfg(feature = "debug")]
        log::trace!(
            "nvswitch: {} {} [{}.{}] raw {:#010x} enable {:#010x} first {:#010x} contain {:#010x}",
            layout.name,
            severity,
            instance,
            target.sub,
            raw,
            enabled,
            first,
            contain
        );

        let rules = layout.rules(severity);
        let needs_capture = rules
            .iter()
            .any(|r| pending & r.bit != 0 && r.diagnostic == DiagnosticKind::RawBlock);
        let capture = if needs_capture {
            self.capture(layout, instance, target.sub)
        } else {
            RawCapture::default()
        };

        let mut unhandled = pending;
        let mut clear = 0;
        let mut counters = CounterResets::new();

        for rule in rules.iter().filter(|r| pending & r.bit != 0) {
            unhandled &= !rule.bit;
            clear |= rule.bit | (rule.clears & raw);

            if rule.suppressed_by & raw != 0 {
                debug!(
                    "nvswitch: {} [{}] {} suppressed by pending {:#x}",
                    layout.name,
                    instance,
                    rule.name,
                    rule.suppressed_by & raw
                );
                continue;
            }

            if let Some(counter) = rule.ecc.filter(|e| e.reset_counter).and_then(|e| e.counter) {
                if !counters.contains(&counter) {
                    let _ = counters.try_push(counter);
                }
            }

            let contained = rule.containable && contain & rule.bit != 0;
            let diagnostic = self.diagnostic(layout, rule, instance, target.sub, &capture);
            self.report_rule(state, layout, target, rule, contained, inject, diagnostic);

            if rule.mask_after_report {
                self.io.modify32(block, instance, reg(enable_reg), rule.bit, 0);
            }
        }

        // Stop a latched condition from re-firing until recovery re-arms
        if layout.suppress_always || state.any_fatal(target.subject.links()) {
            self.io
                .write32(block, instance, reg(enable_reg), enabled & !pending);
        }

        if let Some(first_reg) = layout.first {
            let latched = first & pending;
            if latched != 0 {
                self.io.write32(block, instance, reg(first_reg), latched);
            }
        }
        if clear != 0 {
            self.io.write32(block, instance, reg(layout.status), clear);
        }
        for counter in counters {
            self.io.write32(block, instance, reg(counter), 0);
        }

        if unhandled != 0 {
            self.report_unhandled(
                state,
                block,
                instance,
                target.subject.first_link(),
                unhandled,
                &[raw, enabled, first],
            );
        }
        ServiceStatus::from_unhandled(unhandled)
    }

    /// Aggregate several unit instances on one tree
    pub(crate) fn service_units<I>(
        &self,
        state: &mut DeviceState,
        targets: I,
        severity: Severity,
    ) -> ServiceStatus
    where
        I: IntoIterator<Item = UnitInstance>,
    {
        targets
            .into_iter()
            .fold(ServiceStatus::NotFound, |status, target| {
                status.combine(self.service_unit(state, target, severity))
            })
    }

    fn capture(&self, layout: &UnitLayout, instance: u32, sub: u32) -> RawCapture {
        let mut raw = RawCapture::default();
        let Some(capture) = layout.capture else {
            return raw;
        };
        let read = |offset: u32| self.io.read32(layout.block, instance, layout.at(offset, sub));

        raw.push(read(capture.timestamp));
        raw.flags |= CaptureFlags::TIME;

        if read(capture.header_valid) & capture.header_valid_mask != 0 {
            raw.push(read(capture.misc));
            raw.flags |= CaptureFlags::MISC;
            for &header in capture.header {
                raw.push(read(header));
            }
            raw.flags |= CaptureFlags::HEADER;
        }
        raw
    }

    fn diagnostic(
        &self,
        layout: &UnitLayout,
        rule: &BitRule,
        instance: u32,
        sub: u32,
        capture: &RawCapture,
    ) -> Diagnostic {
        let read = |offset: u32| self.io.read32(layout.block, instance, layout.at(offset, sub));

        match (rule.diagnostic, rule.ecc) {
            (DiagnosticKind::RawBlock, _) => Diagnostic::RawBlock(capture.clone()),
            (DiagnosticKind::AddressFault, Some(ecc)) => match ecc.address {
                Some(addr) => Diagnostic::AddressFault {
                    valid: read(addr.valid) & addr.valid_mask != 0,
                    address: read(addr.address),
                },
                None => Diagnostic::None,
            },
            (DiagnosticKind::EccCounter, Some(ecc)) => Diagnostic::EccCounter {
                count: ecc.counter.map_or(1, read),
                uncorrectable: ecc.uncorrectable,
            },
            _ => Diagnostic::None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn report_rule(
        &self,
        state: &mut DeviceState,
        layout: &UnitLayout,
        target: UnitInstance,
        rule: &BitRule,
        contained: bool,
        inject: u32,
        diagnostic: Diagnostic,
    ) {
        if let (Subject::Link(link), Some(ecc)) = (target.subject, rule.ecc) {
            let (address_valid, address, count) = match diagnostic {
                Diagnostic::AddressFault { valid, address } => (valid, address, 1),
                Diagnostic::EccCounter { count, .. } => (false, 0, count),
                _ => (false, 0, 1),
            };
            self.log_ecc(EccEvent {
                code: rule.code,
                link,
                address_valid,
                address,
                uncorrectable: ecc.uncorrectable,
                count,
            });
        }

        if let Some(kind) = rule.nvlink {
            let injected = inject & rule.bit != 0;
            if !injected || self.config.persist_injected {
                if let Some(link) = target.subject.first_link() {
                    self.log_nvlink(NvlinkEvent {
                        kind,
                        nvlipt_instance: self.topology.nvlipt_of(link),
                        local_link: self.topology.local_link(link),
                    });
                }
            } else {
                debug!(
                    "nvswitch: {} [{}] {} injected, not persisted",
                    layout.name, target.instance, rule.name
                );
            }
        }

        let source = |link: Option<LinkId>| EventSource {
            code: rule.code,
            name: rule.name,
            block: layout.block,
            instance: target.instance,
            link,
            severity: rule.severity,
            contained,
            bit: rule.bit,
        };
        let fatal = rule.is_fatal() || contained;
        let device_wide = rule.scope == FaultScope::Device;

        match target.subject {
            Subject::Device => {
                self.report(state, source(None), diagnostic);
                if fatal {
                    self.mark_fatal(state, true, None);
                }
            }
            subject => {
                for link in subject.links() {
                    self.report(state, source(Some(link)), diagnostic.clone());
                    if fatal {
                        self.mark_fatal(state, device_wide, Some(link));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use nvswitch_core::taxonomy::sxid;
    use nvswitch_core::{Block, DeviceEvent, NvlinkErrorKind};
    use nvswitch_hal::lr10::regs::{err, nvldl, nvlipt, route};
    use nvswitch_hal::lr10::Lr10;
    use nvswitch_hal::RegisterMap;

    fn layout(unit: ErrorUnit) -> &'static UnitLayout {
        Lr10.unit(unit)
    }

    fn route_fatal(fx: &Fixture, link: LinkId, bits: u32) {
        fx.regs.set(Block::Route, link, err::STATUS_0, bits);
        fx.regs
            .set(Block::Route, link, err::FATAL_REPORT_EN_0, layout(ErrorUnit::Route).default_fatal);
    }

    fn service(fx: &Fixture, target: UnitInstance, severity: Severity) -> ServiceStatus {
        let dev = fx.device();
        let mut state = dev.lock();
        dev.service_unit(&mut state, target, severity)
    }

    #[test]
    fn test_nothing_pending_reads_only() {
        let fx = Fixture::new();
        let status = service(&fx, UnitInstance::link(ErrorUnit::Route, 3), Severity::Fatal);
        assert_eq!(status, ServiceStatus::NotFound);
        assert!(fx.regs.writes().is_empty());
    }

    #[test]
    fn test_route_buffer_error_marks_link() {
        let fx = Fixture::new();
        route_fatal(&fx, 3, route::ROUTEBUFERR);
        let dev = fx.device();
        let status = {
            let mut state = dev.lock();
            dev.service_unit(&mut state, UnitInstance::link(ErrorUnit::Route, 3), Severity::Fatal)
        };

        assert_eq!(status, ServiceStatus::Success);
        let events = dev.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, sxid::ROUTE_ROUTEBUFERR);
        assert_eq!(events[0].severity, Severity::Fatal);
        assert_eq!(events[0].link, Some(3));
        assert!(!events[0].contained);

        assert!(dev.link_fault_state(3).map(|s| s.fatal_occurred).unwrap_or(false));
        assert!(!dev.device_fault_state().reset_required);
        assert_eq!(fx.notifier.events(), [DeviceEvent::PortDown(3)]);
        assert_eq!(fx.regs.get(Block::Route, 3, err::STATUS_0), 0);
        assert_eq!(fx.regs.get(Block::Route, 3, err::FATAL_REPORT_EN_0) & route::ROUTEBUFERR, 0);
    }

    #[test]
    fn test_second_pass_not_found() {
        let fx = Fixture::new();
        route_fatal(&fx, 5, route::ROUTEBUFERR | route::CDTPARERR);
        let target = UnitInstance::link(ErrorUnit::Route, 5);
        assert_eq!(service(&fx, target, Severity::Fatal), ServiceStatus::Success);
        assert_eq!(service(&fx, target, Severity::Fatal), ServiceStatus::NotFound);
    }

    #[test]
    fn test_contained_bit_flagged() {
        let fx = Fixture::new();
        route_fatal(&fx, 1, route::PDCTRLPARERR);
        fx.regs.set(Block::Route, 1, err::CONTAIN_EN_0, route::PDCTRLPARERR);
        let dev = fx.device();
        {
            let mut state = dev.lock();
            dev.service_unit(&mut state, UnitInstance::link(ErrorUnit::Route, 1), Severity::Fatal);
        }
        assert!(dev.recent_events()[0].contained);
    }

    #[test]
    fn test_unclassified_bit_stays_latched() {
        let fx = Fixture::new();
        // bit 20 has no rule on either tree
        fx.regs.set(Block::Route, 2, err::STATUS_0, 1 << 20);
        fx.regs.set(Block::Route, 2, err::FATAL_REPORT_EN_0, 1 << 20);
        let dev = fx.device();
        let status = {
            let mut state = dev.lock();
            dev.service_unit(&mut state, UnitInstance::link(ErrorUnit::Route, 2), Severity::Fatal)
        };

        assert_eq!(status, ServiceStatus::MoreProcessingRequired);
        assert_eq!(fx.regs.get(Block::Route, 2, err::STATUS_0), 1 << 20);
        let events = dev.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, sxid::HOST_UNHANDLED_INTERRUPT);
        assert_eq!(events[0].bit, 1 << 20);
        assert_eq!(events[0].link, Some(2));
    }

    #[test]
    fn test_first_cleared_before_status() {
        let fx = Fixture::new();
        route_fatal(&fx, 4, route::ROUTEBUFERR | route::TRANSDONERESVERR);
        fx.regs.set(Block::Route, 4, err::FIRST_0, route::TRANSDONERESVERR);
        service(&fx, UnitInstance::link(ErrorUnit::Route, 4), Severity::Fatal);

        let first = fx.regs.position(Block::Route, 4, err::FIRST_0).expect("first written");
        let status = fx.regs.position(Block::Route, 4, err::STATUS_0).expect("status written");
        assert!(first < status);
        assert_eq!(
            fx.regs.writes_to(Block::Route, 4, err::FIRST_0),
            [route::TRANSDONERESVERR]
        );
    }

    #[test]
    fn test_limit_suppressed_while_dbe_pending() {
        let fx = Fixture::new();
        let bits = route::NVS_ECC_DBE_ERR | route::NVS_ECC_LIMIT_ERR;
        fx.regs.set(Block::Route, 6, err::STATUS_0, bits);
        fx.regs.set(Block::Route, 6, err::FATAL_REPORT_EN_0, route::NVS_ECC_DBE_ERR);
        fx.regs.set(Block::Route, 6, err::NON_FATAL_REPORT_EN_0, route::NVS_ECC_LIMIT_ERR);
        fx.regs.set(Block::Route, 6, route::NVS_ECC_ERROR_COUNTER, 9);
        let dev = fx.device();
        let target = UnitInstance::link(ErrorUnit::Route, 6);
        {
            let mut state = dev.lock();
            dev.service_unit(&mut state, target, Severity::NonFatal);
            dev.service_unit(&mut state, target, Severity::Fatal);
        }

        let events = dev.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, sxid::ROUTE_NVS_ECC_DBE_ERR);
        assert_eq!(
            events[0].diagnostic,
            Diagnostic::EccCounter {
                count: 9,
                uncorrectable: true
            }
        );
        assert_eq!(fx.regs.get(Block::Route, 6, err::STATUS_0), 0);

        let ecc = fx.log.ecc_events();
        assert_eq!(ecc.len(), 1);
        assert_eq!(ecc[0].link, 6);
        assert_eq!(ecc[0].count, 9);
        assert!(ecc[0].uncorrectable);
    }

    #[test]
    fn test_ecc_counter_zeroed_after_status() {
        let fx = Fixture::new();
        fx.regs.set(Block::Route, 0, err::STATUS_0, route::NVS_ECC_LIMIT_ERR);
        fx.regs.set(Block::Route, 0, err::NON_FATAL_REPORT_EN_0, route::NVS_ECC_LIMIT_ERR);
        fx.regs.set(Block::Route, 0, route::NVS_ECC_ERROR_COUNTER, 3);
        service(&fx, UnitInstance::link(ErrorUnit::Route, 0), Severity::NonFatal);

        let status = fx.regs.position(Block::Route, 0, err::STATUS_0).expect("status written");
        let counter = fx
            .regs
            .position(Block::Route, 0, route::NVS_ECC_ERROR_COUNTER)
            .expect("counter written");
        assert!(status < counter);
        assert_eq!(fx.regs.get(Block::Route, 0, route::NVS_ECC_ERROR_COUNTER), 0);
    }

    #[test]
    fn test_raw_capture_reads_header_when_valid() {
        let fx = Fixture::new();
        route_fatal(&fx, 7, route::ROUTEBUFERR);
        fx.regs.set(Block::Route, 7, err::TIMESTAMP_LOG, 0x1234);
        fx.regs.set(Block::Route, 7, err::HEADER_LOG_VALID, err::HEADER_LOG_VALID_BIT);
        fx.regs.set(Block::Route, 7, err::MISC_LOG_0, 0x55);
        fx.regs.set(Block::Route, 7, err::HEADER_LOG_2, 0xaa);
        let dev = fx.device();
        {
            let mut state = dev.lock();
            dev.service_unit(&mut state, UnitInstance::link(ErrorUnit::Route, 7), Severity::Fatal);
        }

        match &dev.recent_events()[0].diagnostic {
            Diagnostic::RawBlock(raw) => {
                assert!(raw.flags.contains(CaptureFlags::TIME | CaptureFlags::MISC | CaptureFlags::HEADER));
                assert_eq!(raw.words.as_slice(), [0x1234, 0x55, 0, 0, 0xaa, 0]);
            }
            other => panic!("unexpected diagnostic {:?}", other),
        }
    }

    #[test]
    fn test_raw_capture_time_only() {
        let fx = Fixture::new();
        route_fatal(&fx, 7, route::ROUTEBUFERR);
        fx.regs.set(Block::Route, 7, err::TIMESTAMP_LOG, 0x99);
        let dev = fx.device();
        {
            let mut state = dev.lock();
            dev.service_unit(&mut state, UnitInstance::link(ErrorUnit::Route, 7), Severity::Fatal);
        }
        match &dev.recent_events()[0].diagnostic {
            Diagnostic::RawBlock(raw) => {
                assert_eq!(raw.flags, CaptureFlags::TIME);
                assert_eq!(raw.words.as_slice(), [0x99]);
            }
            other => panic!("unexpected diagnostic {:?}", other),
        }
    }

    #[test]
    fn test_storm_suppression_only_removes_bits() {
        let fx = Fixture::new();
        let route_layout = layout(ErrorUnit::Route);
        route_fatal(&fx, 3, route::ROUTEBUFERR);
        fx.regs
            .set(Block::Route, 3, err::NON_FATAL_REPORT_EN_0, route_layout.default_nonfatal);
        let dev = fx.device();
        let target = UnitInstance::link(ErrorUnit::Route, 3);
        let enables = || {
            fx.regs.get(Block::Route, 3, err::FATAL_REPORT_EN_0)
                | fx.regs.get(Block::Route, 3, err::NON_FATAL_REPORT_EN_0)
        };

        let mut before = enables();
        for bits in [route::CDTPARERR, route::NOPORTDEFINEDERR, route::ROUTEBUFERR] {
            fx.regs.set(Block::Route, 3, err::STATUS_0, bits);
            {
                let mut state = dev.lock();
                dev.service_unit(&mut state, target, Severity::Fatal);
                dev.service_unit(&mut state, target, Severity::NonFatal);
            }
            let after = enables();
            assert_eq!(after & !before, 0);
            before = after;
        }
        assert_eq!(before & route::NOPORTDEFINEDERR, 0);
    }

    #[test]
    fn test_nonfatal_bits_left_enabled_on_healthy_link() {
        let fx = Fixture::new();
        let route_layout = layout(ErrorUnit::Route);
        fx.regs.set(Block::Route, 3, err::STATUS_0, route::NOPORTDEFINEDERR);
        fx.regs
            .set(Block::Route, 3, err::NON_FATAL_REPORT_EN_0, route_layout.default_nonfatal);
        service(&fx, UnitInstance::link(ErrorUnit::Route, 3), Severity::NonFatal);
        assert!(fx.regs.writes_to(Block::Route, 3, err::NON_FATAL_REPORT_EN_0).is_empty());
    }

    #[test]
    fn test_crc_counter_masks_itself() {
        let fx = Fixture::new();
        let nvldl_layout = layout(ErrorUnit::Nvldl);
        fx.regs.set(Block::Nvldl, 9, nvldl::INTR, nvldl::RX_CRC_COUNTER);
        fx.regs.set(Block::Nvldl, 9, nvldl::INTR_NONSTALL_EN, nvldl_layout.default_nonfatal);
        let status = service(&fx, UnitInstance::link(ErrorUnit::Nvldl, 9), Severity::NonFatal);

        assert_eq!(status, ServiceStatus::Success);
        let enable = fx.regs.get(Block::Nvldl, 9, nvldl::INTR_NONSTALL_EN);
        assert_eq!(enable & nvldl::RX_CRC_COUNTER, 0);
        assert_eq!(enable, nvldl_layout.default_nonfatal & !nvldl::RX_CRC_COUNTER);
    }

    #[test]
    fn test_nvlink_event_skipped_when_injected() {
        let fx = Fixture::new();
        let nvldl_layout = layout(ErrorUnit::Nvldl);
        fx.regs.set(Block::Nvldl, 6, nvldl::INTR, nvldl::TX_FAULT_RAM);
        fx.regs.set(Block::Nvldl, 6, nvldl::INTR_STALL_EN, nvldl_layout.default_fatal);
        service(&fx, UnitInstance::link(ErrorUnit::Nvldl, 6), Severity::Fatal);
        assert_eq!(
            fx.log.nvlink_events()[0],
            NvlinkEvent {
                kind: NvlinkErrorKind::DlTxFaultRam,
                nvlipt_instance: 1,
                local_link: 2,
            }
        );

        let fx = Fixture::new();
        fx.regs.set(Block::NvliptLnk, 6, err::STATUS_0, nvlipt::SLEEPWHILEACTIVELINK);
        fx.regs.set(Block::NvliptLnk, 6, err::FATAL_REPORT_EN_0, nvlipt::SLEEPWHILEACTIVELINK);
        fx.regs.set(Block::NvliptLnk, 6, err::REPORT_INJECT_0, nvlipt::SLEEPWHILEACTIVELINK);
        service(&fx, UnitInstance::link(ErrorUnit::NvliptLnk, 6), Severity::Fatal);
        assert!(fx.log.nvlink_events().is_empty());
    }

    #[test]
    fn test_injected_persisted_when_configured() {
        let mut fx = Fixture::new();
        fx.config.persist_injected = true;
        fx.regs.set(Block::NvliptLnk, 6, err::STATUS_0, nvlipt::SLEEPWHILEACTIVELINK);
        fx.regs.set(Block::NvliptLnk, 6, err::FATAL_REPORT_EN_0, nvlipt::SLEEPWHILEACTIVELINK);
        fx.regs.set(Block::NvliptLnk, 6, err::REPORT_INJECT_0, nvlipt::SLEEPWHILEACTIVELINK);
        service(&fx, UnitInstance::link(ErrorUnit::NvliptLnk, 6), Severity::Fatal);
        assert_eq!(fx.log.nvlink_events().len(), 1);
    }

    #[test]
    fn test_shared_unit_fans_out_per_link() {
        let fx = Fixture::new();
        fx.regs.set(Block::Nvlipt, 2, err::STATUS_0, nvlipt::RSTSEQ_PLL_TIMEOUT);
        fx.regs.set(Block::Nvlipt, 2, err::FATAL_REPORT_EN_0, nvlipt::RSTSEQ_PLL_TIMEOUT);
        let links = LinkMask::from_bits(0b1011 << 8);
        let dev = fx.device();
        let status = {
            let mut state = dev.lock();
            dev.service_unit(
                &mut state,
                UnitInstance {
                    unit: ErrorUnit::NvliptCommon,
                    instance: 2,
                    sub: 0,
                    subject: Subject::Links(links),
                },
                Severity::Fatal,
            )
        };

        assert_eq!(status, ServiceStatus::Success);
        let reported: LinkMask = dev.recent_events().iter().filter_map(|e| e.link).collect();
        assert_eq!(reported, links);
        assert_eq!(dev.device_fault_state().faulted_links, links);
        assert_eq!(fx.log.nvlink_events().len(), 1);
        assert_eq!(fx.log.nvlink_events()[0].nvlipt_instance, 2);
        assert_eq!(fx.log.nvlink_events()[0].local_link, 0);
    }
}
