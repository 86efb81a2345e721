//! # Host Interface Handlers
//!
//! Children of the legacy tree that are not part of the switch fabric:
//! the PCI bus unit (PBUS), which traps failed register accesses, and
//! the privileged register ring, whose stations latch write errors.

use log::{error, info};

use nvswitch_core::diagnostic::PriAccess;
use nvswitch_core::taxonomy::sxid;
use nvswitch_core::{with_timeout, Block, Diagnostic, ErrorCode, ServiceStatus, Severity};

use crate::device::Device;
use crate::report::EventSource;
use crate::state::DeviceState;

impl Device<'_> {
    /// Service the PCI bus unit
    pub(crate) fn service_pbus(&self, state: &mut DeviceState) -> ServiceStatus {
        let host = self.map.host();
        let intr = self.io.read32(Block::Pbus, 0, host.pbus_intr);
        let enable = self.io.read32(Block::Pbus, 0, host.pbus_intr_en);
        let pending = intr & enable;
        if pending == 0 {
            return ServiceStatus::NotFound;
        }

        let mut unhandled = pending;
        let access_faults = host.pbus_squash | host.pbus_fecserr | host.pbus_timeout;

        if pending & access_faults != 0 {
            // Clear the timeout source first so a new fault re-latches the save registers
            if pending & host.pbus_timeout != 0 {
                self.io.write32(Block::Pbus, 0, host.pbus_intr, host.pbus_timeout);
            }

            let save0 = self.io.read32(Block::Pbus, 0, host.pbus_save_0);
            let access = PriAccess {
                addr: ((save0 >> host.save0_addr_shift) & host.save0_addr_mask) * 4,
                data: self.io.read32(Block::Pbus, 0, host.pbus_save_1),
                info: self.io.read32(Block::Pbus, 0, host.pbus_save_3) & host.save3_subid_mask,
                code: self.io.read32(Block::Pbus, 0, host.pbus_fecs_errcode),
                write: save0 & host.save0_write != 0,
            };

            let sources = [
                (host.pbus_squash, "PRI_SQUASH"),
                (host.pbus_fecserr, "PRI_FECSERR"),
                (host.pbus_timeout, "PRI_TIMEOUT"),
            ];
            for (bit, name) in sources {
                if pending & bit == 0 {
                    continue;
                }
                self.report(
                    state,
                    host_source(sxid::HOST_PRIV_TIMEOUT, name, Block::Pbus, 0, bit),
                    Diagnostic::PriAccess(access),
                );
                unhandled &= !bit;
            }

            if save0 & host.save0_to != 0 {
                self.io
                    .write32(Block::Pbus, 0, host.pbus_save_0, save0 & !host.save0_to);
            }
        }

        if pending & host.pbus_sw != 0 {
            info!("nvswitch: pbus software interrupt");
            unhandled &= !host.pbus_sw;
        }

        let handled = pending & !unhandled;
        if handled != 0 {
            self.io.write32(Block::Pbus, 0, host.pbus_intr, handled);
        }
        if unhandled != 0 {
            self.report_unhandled(state, Block::Pbus, 0, None, unhandled, &[intr, enable]);
        }
        ServiceStatus::from_unhandled(unhandled)
    }

    /// Service the privileged register ring
    pub(crate) fn service_priv_ring(&self, state: &mut DeviceState) -> ServiceStatus {
        let host = self.map.host();
        let status = self.io.read32(Block::PrivMaster, 0, host.ring_status0);
        if status == 0 {
            return ServiceStatus::NotFound;
        }

        let mut unhandled = status;
        if status & host.ring_sys_write_error != 0 {
            self.report_station_error(state, Block::PrivSys, 0, host.ring_sys_write_error);
            unhandled &= !host.ring_sys_write_error;
        }
        for fbp in 0..host.ring_fbp_count {
            let bit = 1 << (host.ring_fbp_shift + fbp);
            if status & bit != 0 {
                self.report_station_error(state, Block::PrivPrt, fbp, bit);
                unhandled &= !bit;
            }
        }
        if unhandled != 0 {
            self.report_unhandled(state, Block::PrivMaster, 0, None, unhandled, &[status]);
        }

        // Acknowledge the ring; the command field returns to idle when done
        self.io
            .write32(Block::PrivMaster, 0, host.ring_command, host.ring_cmd_ack);
        let acked = with_timeout(
            self.clock(),
            self.config.ring_command_timeout,
            self.config.poll_interval_ms,
            || {
                self.io.read32(Block::PrivMaster, 0, host.ring_command) & host.ring_cmd_mask
                    == host.ring_cmd_no_cmd
            },
        );
        if let Err(err) = acked {
            error!("nvswitch: priv ring command acknowledge: {}", err);
            return ServiceStatus::MoreProcessingRequired;
        }

        ServiceStatus::from_unhandled(unhandled)
    }

    fn report_station_error(&self, state: &mut DeviceState, block: Block, instance: u32, bit: u32) {
        let host = self.map.host();
        let access = PriAccess {
            addr: self.io.read32(block, instance, host.priv_error_adr),
            data: self.io.read32(block, instance, host.priv_error_wrdat),
            info: self.io.read32(block, instance, host.priv_error_info),
            code: self.io.read32(block, instance, host.priv_error_code),
            write: true,
        };
        self.report(
            state,
            host_source(sxid::HOST_PRIV_ERROR, "PRIV_WRITE_ERROR", block, instance, bit),
            Diagnostic::PriAccess(access),
        );
    }
}

fn host_source(code: ErrorCode, name: &'static str, block: Block, instance: u32, bit: u32) -> EventSource {
    EventSource {
        code,
        name,
        block,
        instance,
        link: None,
        severity: Severity::NonFatal,
        contained: false,
        bit,
    }
}
