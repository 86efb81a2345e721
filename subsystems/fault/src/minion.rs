//! # Link Management Controller Handlers
//!
//! Each NVLIPT instance has one link-management microcontroller. It
//! raises two kinds of interrupts:
//!
//! - **Per-link** codes, latched in one register per local link and
//!   acknowledged by writing the state bit back. Link interrupts show up
//!   on both trees, so both trees service them.
//! - **Falcon** interrupts of the controller itself (watchdog, halt,
//!   external error). All of these are fatal to the links it drives.

use log::{debug, info};

use nvswitch_core::taxonomy::sxid;
use nvswitch_core::{Block, Diagnostic, ErrorCode, LinkId, RawCapture, ServiceStatus, Severity};
use nvswitch_hal::MinionLinkClass;

use crate::device::Device;
use crate::handler::Summary;
use crate::report::EventSource;
use crate::state::DeviceState;

impl Device<'_> {
    /// Service the per-link interrupts of controller `instance`
    pub(crate) fn service_minion_link(&self, state: &mut DeviceState, instance: u32) -> ServiceStatus {
        let minion = self.map.minion();
        let intr = self.io.read32(Block::Minion, instance, minion.intr);
        let mut stall_en = self.io.read32(Block::Minion, instance, minion.stall_en);

        let links = |value: u32| (value >> minion.link_shift) & minion.link_field;
        let pending = links(intr) & links(stall_en);
        if pending == 0 {
            return ServiceStatus::NotFound;
        }

        let mut summary = Summary::new(pending);
        for local in 0..self.topology.links_per_nvlipt {
            if !summary.has(1 << local) {
                continue;
            }
            let link = instance * self.topology.links_per_nvlipt + local;
            if !self.topology.is_valid(link) {
                continue;
            }

            let value = self.io.read32(Block::Minion, instance, minion.link_intr_at(local));
            summary.handled(1 << local);
            if value & minion.link_state == 0 {
                // already acknowledged by an earlier pass
                continue;
            }

            let code = minion.decode(value & minion.link_code_mask);
            let subcode = (value >> minion.link_subcode_shift) & minion.link_subcode_mask;
            debug!(
                "nvswitch: minion {} link {} code {} ({:#x}) subcode {:#x}",
                instance, link, code.name, code.code, subcode
            );

            match code.class {
                MinionLinkClass::Fatal => {
                    let source = self.minion_source(instance, link, code.name, Severity::Fatal);
                    self.report(state, source, link_capture(value));
                    self.mark_fatal(state, false, Some(link));
                }
                MinionLinkClass::NonFatal => {
                    let source = self.minion_source(instance, link, code.name, Severity::NonFatal);
                    self.report(state, source, link_capture(value));
                }
                MinionLinkClass::Info => {
                    info!("nvswitch: minion {} link {} {} notification", instance, link, code.name);
                }
            }

            if state.is_link_fatal(link) && stall_en & minion.link_bit(local) != 0 {
                stall_en &= !minion.link_bit(local);
                self.io.write32(Block::Minion, instance, minion.stall_en, stall_en);
            }

            self.io
                .write32(Block::Minion, instance, minion.link_intr_at(local), minion.link_state);
        }

        summary.finish(self, state, Block::Minion, instance, &[intr, stall_en])
    }

    /// Service the controller-level fatal interrupts of `instance`
    pub(crate) fn service_minion_fatal(&self, state: &mut DeviceState, instance: u32) -> ServiceStatus {
        let minion = self.map.minion();
        let intr = self.io.read32(Block::Minion, instance, minion.intr);
        let stall_en = self.io.read32(Block::Minion, instance, minion.stall_en);

        let mut summary = Summary::new(intr & stall_en & !minion.link_bits());
        if summary.has(minion.falcon_stall) {
            let result = self.service_minion_falcon(state, instance);
            summary.child(minion.falcon_stall, result);
        }
        summary.finish(self, state, Block::Minion, instance, &[intr, stall_en])
    }

    /// Service the microcontroller's own interrupts
    pub(crate) fn service_minion_falcon(&self, state: &mut DeviceState, instance: u32) -> ServiceStatus {
        let minion = self.map.minion();
        let irqstat = self.io.read32(Block::Minion, instance, minion.falcon_irqstat);
        let irqmask = self.io.read32(Block::Minion, instance, minion.falcon_irqmask);
        let pending = irqstat & irqmask;
        if pending == 0 {
            return ServiceStatus::NotFound;
        }

        let first_link = instance * self.topology.links_per_nvlipt;
        let link = self.topology.is_valid(first_link).then_some(first_link);
        let mut unhandled = pending;
        let mut fatal = false;

        let faults: [(u32, ErrorCode, &'static str); 3] = [
            (minion.irq_wdtmr, sxid::MINION_WATCHDOG, "WATCHDOG"),
            (minion.irq_halt, sxid::MINION_HALT, "HALT"),
            (minion.irq_exterr, sxid::MINION_EXTERR, "EXTERR"),
        ];
        for (bit, code, name) in faults {
            if pending & bit == 0 {
                continue;
            }
            self.report(
                state,
                EventSource {
                    code,
                    name,
                    block: Block::Minion,
                    instance,
                    link,
                    severity: Severity::Fatal,
                    contained: false,
                    bit,
                },
                Diagnostic::None,
            );
            unhandled &= !bit;
            fatal = true;
        }

        for bit in [minion.irq_swgen0, minion.irq_swgen1] {
            if pending & bit != 0 {
                info!("nvswitch: minion {} software interrupt {:#x}", instance, bit);
                unhandled &= !bit;
            }
        }

        if fatal {
            self.mark_fatal(state, false, link);
            self.io.modify32(
                Block::Minion,
                instance,
                minion.stall_en,
                minion.fatal | minion.falcon_stall,
                0,
            );
        }

        let handled = pending & !unhandled;
        if handled != 0 {
            self.io
                .write32(Block::Minion, instance, minion.falcon_irqsclr, handled);
        }
        if unhandled != 0 {
            self.report_unhandled(state, Block::Minion, instance, link, unhandled, &[irqstat, irqmask]);
        }
        ServiceStatus::from_unhandled(unhandled)
    }

    fn minion_source(
        &self,
        instance: u32,
        link: LinkId,
        name: &'static str,
        severity: Severity,
    ) -> EventSource {
        let code = match severity {
            Severity::Fatal => sxid::MINION_FATAL_LINK_INTR,
            Severity::NonFatal | Severity::Correctable => sxid::MINION_NONFATAL,
        };
        EventSource {
            code,
            name,
            block: Block::Minion,
            instance,
            link: Some(link),
            severity,
            contained: false,
            bit: self.map.minion().link_bit(self.topology.local_link(link)),
        }
    }
}

/// The per-link register as latched when serviced
fn link_capture(value: u32) -> Diagnostic {
    let mut raw = RawCapture::default();
    raw.push(value);
    Diagnostic::RawBlock(raw)
}
