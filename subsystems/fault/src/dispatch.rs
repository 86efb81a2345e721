//! # Interrupt Tree Dispatcher
//!
//! Entry point of interrupt servicing. One call walks the tree from the
//! legacy pending register down to the leaves, aggregates the children's
//! outcomes and always re-arms MSI delivery on the way out, whatever the
//! result.

use log::{debug, warn};

use nvswitch_core::{Block, ServiceStatus, Severity};

use crate::device::Device;
use crate::handler::Summary;
use crate::state::DeviceState;

impl Device<'_> {
    /// Service every pending interrupt of the device.
    ///
    /// Returns `NotFound` when nothing enabled was pending and
    /// `MoreProcessingRequired` when a pending bit could not be
    /// classified or a bounded wait timed out.
    pub fn service_interrupts(&self) -> ServiceStatus {
        let status = {
            let mut state = self.lock();
            self.service_legacy(&mut state)
        };

        let top = self.map.top();
        self.io
            .write32(Block::Xve, 0, top.msi_rearm, top.msi_rearm_value);

        match status {
            ServiceStatus::MoreProcessingRequired => {
                warn!("nvswitch: interrupt pass left unhandled sources")
            }
            status => debug!("nvswitch: interrupt pass {:?}", status),
        }
        status
    }

    fn service_legacy(&self, state: &mut DeviceState) -> ServiceStatus {
        let top = self.map.top();
        let pending = self.io.read32(Block::Psmc, 0, top.legacy_pending);
        let mut summary = Summary::new(pending & state.enables.legacy);

        if summary.has(top.legacy_saw) {
            let result = self.service_saw(state);
            summary.child(top.legacy_saw, result);
        }
        if summary.has(top.legacy_priv_ring) {
            let result = self.service_priv_ring(state);
            summary.child(top.legacy_priv_ring, result);
        }
        if summary.has(top.legacy_pbus) {
            let result = self.service_pbus(state);
            summary.child(top.legacy_pbus, result);
        }

        summary.finish(self, state, Block::Psmc, 0, &[pending])
    }

    fn service_saw(&self, state: &mut DeviceState) -> ServiceStatus {
        let top = self.map.top();
        let enables = state.enables;

        let status = [
            (Severity::Fatal, enables.saw_fatal),
            (Severity::NonFatal, enables.saw_nonfatal),
            (Severity::Correctable, enables.saw_correctable),
        ]
        .into_iter()
        .fold(ServiceStatus::NotFound, |status, (severity, enabled)| {
            status.combine(self.service_saw_tree(state, severity, enabled))
        });

        // Nothing is routed to the legacy SAW tree; any enabled bit there
        // is a leftover from another agent
        let raw = self.io.read32(Block::Saw, 0, top.saw_legacy);
        let summary = Summary::new(raw & enables.saw_legacy);
        status.combine(summary.finish(self, state, Block::Saw, 0, &[raw, enables.saw_legacy]))
    }

    fn service_saw_tree(&self, state: &mut DeviceState, severity: Severity, enabled: u32) -> ServiceStatus {
        let top = self.map.top();
        let reg = match severity {
            Severity::Fatal => top.saw_fatal,
            Severity::NonFatal => top.saw_nonfatal,
            Severity::Correctable => top.saw_correctable,
        };
        let raw = self.io.read32(Block::Saw, 0, reg);
        let mut summary = Summary::new(raw & enabled);

        for npg in 0..self.topology.num_npg {
            let bit = 1 << (top.saw_npg_shift + npg);
            if summary.has(bit) {
                let result = self.service_npg(state, npg, severity);
                summary.child(bit, result);
            }
        }

        if severity == Severity::Fatal {
            for nxbar in 0..self.topology.num_nxbar {
                let bit = 1 << (top.saw_nxbar_shift + nxbar);
                if summary.has(bit) {
                    let result = self.service_nxbar(state, nxbar);
                    summary.child(bit, result);
                }
            }
        }

        for nvlipt in 0..self.topology.num_nvlipt {
            let bit = 1 << (top.saw_nvlipt_shift + nvlipt);
            if summary.has(bit) {
                let result = self.service_nvlipt(state, nvlipt, severity);
                summary.child(bit, result);
            }
        }

        summary.finish(self, state, Block::Saw, 0, &[raw, enabled])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use alloc::boxed::Box;
    use nvswitch_core::taxonomy::sxid;
    use nvswitch_core::{BitRule, DeviceEvent, ErrorCode, LinkMask, RegisterAddr};
    use nvswitch_hal::lr10::regs::{
        egress, err, npg, pbus, psmc, route, saw, xve, LegacyIntr, PbusIntr,
    };
    use nvswitch_hal::lr10::Lr10;
    use nvswitch_hal::{
        ErrorUnit, HostLayout, MinionLayout, NpgLayout, NportLayout, NvlinkLayout, NxbarLayout,
        RegisterMap, TopLayout, UnitLayout,
    };

    const ROUTE_CORRECTED: u32 = 1 << 12;

    static ROUTE_CORRECTABLE: [BitRule; 1] =
        [BitRule::correctable(ROUTE_CORRECTED, "CORRECTED", ErrorCode(15100))];

    /// LR10 with a correctable rule on the route unit
    struct CorrectableRoute {
        route: &'static UnitLayout,
    }

    impl CorrectableRoute {
        fn new() -> Self {
            let route = UnitLayout {
                correctable: &ROUTE_CORRECTABLE,
                default_correctable: ROUTE_CORRECTED,
                ..*Lr10.unit(ErrorUnit::Route)
            };
            Self {
                route: Box::leak(Box::new(route)),
            }
        }
    }

    impl RegisterMap for CorrectableRoute {
        fn generation(&self) -> &'static str {
            "lr10"
        }

        fn unit(&self, unit: ErrorUnit) -> &'static UnitLayout {
            match unit {
                ErrorUnit::Route => self.route,
                unit => Lr10.unit(unit),
            }
        }

        fn top(&self) -> &'static TopLayout {
            Lr10.top()
        }

        fn host(&self) -> &'static HostLayout {
            Lr10.host()
        }

        fn npg(&self) -> &'static NpgLayout {
            Lr10.npg()
        }

        fn nxbar(&self) -> &'static NxbarLayout {
            Lr10.nxbar()
        }

        fn nvlink(&self) -> &'static NvlinkLayout {
            Lr10.nvlink()
        }

        fn minion(&self) -> &'static MinionLayout {
            Lr10.minion()
        }

        fn nport(&self) -> &'static NportLayout {
            Lr10.nport()
        }

        fn snapshot_registers(&self) -> &'static [RegisterAddr] {
            Lr10.snapshot_registers()
        }
    }

    /// Raise the summary path from the legacy register down to NPG `group`
    fn raise_npg(fx: &Fixture, group: u32, nport: u32, severity: Severity) {
        let (saw_reg, flag) = match severity {
            Severity::Fatal => (saw::INTR_FATAL, npg::DEV_FATAL),
            Severity::NonFatal => (saw::INTR_NONFATAL, npg::DEV_NONFATAL),
            Severity::Correctable => (saw::INTR_CORRECTABLE, npg::DEV_CORRECTABLE),
        };
        fx.regs
            .set(Block::Psmc, 0, psmc::INTR_LEGACY, LegacyIntr::SAW.bits());
        fx.regs
            .set(Block::Saw, 0, saw_reg, 1 << (saw::NPG_SHIFT + group));
        fx.regs.set(
            Block::Npg,
            group,
            npg::NPG_INTERRUPT_STATUS,
            flag << (nport * npg::DEV_STRIDE),
        );
    }

    fn drop_summaries(fx: &Fixture) {
        fx.regs.set(Block::Psmc, 0, psmc::INTR_LEGACY, 0);
        fx.regs.set(Block::Saw, 0, saw::INTR_FATAL, 0);
        fx.regs.set(Block::Saw, 0, saw::INTR_NONFATAL, 0);
        fx.regs.set(Block::Saw, 0, saw::INTR_CORRECTABLE, 0);
        for group in 0..9 {
            fx.regs.set(Block::Npg, group, npg::NPG_INTERRUPT_STATUS, 0);
        }
    }

    #[test]
    fn test_nothing_pending_still_rearms() {
        let fx = Fixture::new();
        let dev = fx.device();

        assert_eq!(dev.service_interrupts(), ServiceStatus::NotFound);
        assert!(!fx.regs.was_read(Block::Saw));
        assert_eq!(
            fx.regs.writes_to(Block::Xve, 0, xve::CYA_2),
            [xve::MSI_REARM]
        );
        assert_eq!(fx.regs.writes().len(), 1);
    }

    #[test]
    fn test_disabled_legacy_source_ignored() {
        let fx = Fixture::new();
        fx.regs
            .set(Block::Psmc, 0, psmc::INTR_LEGACY, LegacyIntr::SAW.bits() << 8);
        let dev = fx.device();
        assert_eq!(dev.service_interrupts(), ServiceStatus::NotFound);
    }

    #[test]
    fn test_route_fatal_on_link_3() {
        let fx = Fixture::new();
        raise_npg(&fx, 0, 3, Severity::Fatal);
        fx.regs.set(Block::Route, 3, err::STATUS_0, route::ROUTEBUFERR);
        fx.regs
            .set(Block::Route, 3, err::FATAL_REPORT_EN_0, route::ROUTEBUFERR | route::CDTPARERR);
        let dev = fx.device();

        assert_eq!(dev.service_interrupts(), ServiceStatus::Success);
        let events = dev.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, sxid::ROUTE_ROUTEBUFERR);
        assert_eq!(events[0].severity, Severity::Fatal);
        assert_eq!(events[0].link, Some(3));
        assert!(!events[0].contained);

        let fault = dev.device_fault_state();
        assert_eq!(fault.faulted_links, LinkMask::single(3));
        assert!(!fault.reset_required);
        assert_eq!(fx.notifier.events(), [DeviceEvent::PortDown(3)]);
        assert_eq!(
            fx.regs.get(Block::Route, 3, err::FATAL_REPORT_EN_0),
            route::CDTPARERR
        );

        // hardware drops the summaries once the leaf is clear
        drop_summaries(&fx);
        assert_eq!(dev.service_interrupts(), ServiceStatus::NotFound);
        assert_eq!(dev.recent_events().len(), 1);
    }

    #[test]
    fn test_dbe_retires_pending_limit() {
        let fx = Fixture::new();
        // link 5 is NPORT 1 of NPG 1
        raise_npg(&fx, 1, 1, Severity::Fatal);
        let both = egress::RAM_OUT_HDR_ECC_DBE_ERR | egress::RAM_OUT_HDR_ECC_LIMIT_ERR;
        fx.regs.set(Block::Egress, 5, err::STATUS_0, both);
        fx.regs
            .set(Block::Egress, 5, err::FATAL_REPORT_EN_0, egress::RAM_OUT_HDR_ECC_DBE_ERR);
        let dev = fx.device();

        assert_eq!(dev.service_interrupts(), ServiceStatus::Success);
        let events = dev.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, sxid::EGRESS_RAM_OUT_HDR_ECC_DBE_ERR);
        assert_eq!(fx.regs.get(Block::Egress, 5, err::STATUS_0), 0);
        assert_eq!(fx.log.ecc_events().len(), 1);
    }

    #[test]
    fn test_unclassified_leaf_bit_escalates() {
        let fx = Fixture::new();
        raise_npg(&fx, 2, 0, Severity::NonFatal);
        // bit 31 has no rule in the route tables
        fx.regs.set(Block::Route, 8, err::STATUS_0, 1 << 31);
        fx.regs
            .set(Block::Route, 8, err::NON_FATAL_REPORT_EN_0, 1 << 31);
        let dev = fx.device();

        assert_eq!(dev.service_interrupts(), ServiceStatus::MoreProcessingRequired);
        assert_eq!(fx.regs.get(Block::Route, 8, err::STATUS_0), 1 << 31);
        let unhandled = dev
            .recent_events()
            .iter()
            .filter(|e| e.code == sxid::HOST_UNHANDLED_INTERRUPT)
            .count();
        assert!(unhandled >= 1);
        assert_eq!(
            fx.regs.writes_to(Block::Xve, 0, xve::CYA_2),
            [xve::MSI_REARM]
        );
    }

    #[test]
    fn test_pbus_and_saw_in_one_pass() {
        let fx = Fixture::new();
        raise_npg(&fx, 0, 0, Severity::NonFatal);
        fx.regs.set(
            Block::Psmc,
            0,
            psmc::INTR_LEGACY,
            (LegacyIntr::SAW | LegacyIntr::PBUS).bits(),
        );
        fx.regs.set(Block::Route, 0, err::STATUS_0, route::NOPORTDEFINEDERR);
        fx.regs
            .set(Block::Route, 0, err::NON_FATAL_REPORT_EN_0, route::NOPORTDEFINEDERR);
        fx.regs
            .set(Block::Pbus, 0, pbus::INTR_0, PbusIntr::PRI_SQUASH.bits());
        fx.regs.set(Block::Pbus, 0, pbus::INTR_EN_0, u32::MAX);
        let dev = fx.device();

        assert_eq!(dev.service_interrupts(), ServiceStatus::Success);
        let codes: alloc::vec::Vec<_> = dev.recent_events().iter().map(|e| e.code).collect();
        assert_eq!(codes, [sxid::ROUTE_NOPORTDEFINEDERR, sxid::HOST_PRIV_TIMEOUT]);
        assert!(dev.device_fault_state().faulted_links.is_empty());
    }

    #[test]
    fn test_saw_without_routed_source_dumped() {
        let fx = Fixture::new();
        fx.regs
            .set(Block::Psmc, 0, psmc::INTR_LEGACY, LegacyIntr::SAW.bits());
        // SOE is never routed here
        fx.regs.set(Block::Saw, 0, saw::INTR_FATAL, saw::SOE);
        let dev = fx.device();
        assert_eq!(dev.service_interrupts(), ServiceStatus::MoreProcessingRequired);
        let events = dev.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].block, Block::Psmc);
    }

    #[test]
    fn test_correctable_tree_reaches_route() {
        let fx = Fixture::new();
        let map = CorrectableRoute::new();
        let dev = Device::new(&fx.regs, &map, fx.platform(), fx.config, fx.topology)
            .expect("valid topology");
        dev.init_interrupts();

        let top = Lr10.top();
        assert_eq!(
            fx.regs.get(Block::Saw, 0, saw::INTR_EN_SET_CORRECTABLE),
            0x1ff << top.saw_npg_shift
        );
        assert_eq!(
            fx.regs.get(Block::Route, 3, err::CORRECTABLE_REPORT_EN_0),
            ROUTE_CORRECTED
        );

        raise_npg(&fx, 0, 3, Severity::Correctable);
        fx.regs.set(Block::Route, 3, err::STATUS_0, ROUTE_CORRECTED);

        assert_eq!(dev.service_interrupts(), ServiceStatus::Success);
        let events = dev.recent_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, ErrorCode(15100));
        assert_eq!(events[0].severity, Severity::Correctable);
        assert_eq!(events[0].link, Some(3));
        assert_eq!(fx.regs.get(Block::Route, 3, err::STATUS_0), 0);

        let fault = dev.device_fault_state();
        assert!(fault.faulted_links.is_empty());
        assert!(!fault.reset_required);
        assert_eq!(
            fx.regs.get(Block::Route, 3, err::CORRECTABLE_REPORT_EN_0),
            ROUTE_CORRECTED
        );
    }

    #[test]
    fn test_correctable_tree_idle_on_lr10() {
        let fx = Fixture::new();
        let dev = fx.device();
        dev.init_interrupts();
        assert_eq!(fx.regs.get(Block::Saw, 0, saw::INTR_EN_SET_CORRECTABLE), 0);

        // an NPG bit on the correctable tree is not enabled, so nothing is walked
        raise_npg(&fx, 0, 3, Severity::Correctable);
        assert_eq!(dev.service_interrupts(), ServiceStatus::MoreProcessingRequired);
        assert!(!fx.regs.was_read(Block::Npg));
    }
}
