//! # Fatal Fault Bookkeeping
//!
//! Marks links and the device as needing a reset, both in memory and in
//! hardware scratch registers that survive a driver reload.

use log::{error, info};

use nvswitch_core::{Block, DeviceEvent, Error, LinkId, LinkMask, Result};

use crate::device::Device;
use crate::state::{DeviceState, FatalErrorScope};

impl Device<'_> {
    /// Record a fatal error.
    ///
    /// Idempotent: the scratch write and the host event happen only on
    /// the first transition of the device or of a link.
    pub(crate) fn mark_fatal(&self, state: &mut DeviceState, device_wide: bool, link: Option<LinkId>) {
        if device_wide && !state.device_reset_required {
            state.device_reset_required = true;
            let top = self.map.top();
            self.io
                .modify32(Block::Saw, 0, top.device_scratch, 0, top.device_reset_required);
            error!("nvswitch: device reset required");
            self.notify(DeviceEvent::DeviceDown);
        }

        let Some(link) = link.filter(|&l| self.topology.is_valid(l)) else {
            return;
        };
        if state.is_link_fatal(link) {
            return;
        }
        state.fatal_links.insert(link);
        let nport = self.map.nport();
        self.io
            .modify32(Block::Nport, link, nport.scratch_warm, 0, nport.port_reset_required);
        error!("nvswitch: link {} port reset required", link);
        self.notify(DeviceEvent::PortDown(link));
    }

    /// Mark the device, and optionally one link, as needing a reset
    pub fn set_fatal_error(&self, device_wide: bool, link: Option<LinkId>) -> Result<()> {
        if let Some(link) = link {
            if link >= self.topology.num_links {
                return Err(Error::BadArgs);
            }
        }
        let mut state = self.lock();
        self.mark_fatal(&mut state, device_wide, link);
        Ok(())
    }

    /// Reset scope as recorded in hardware scratch
    pub fn fatal_error_scope(&self) -> FatalErrorScope {
        let top = self.map.top();
        let nport = self.map.nport();

        let device = self.io.read32(Block::Saw, 0, top.device_scratch) & top.device_reset_required != 0;
        let port: LinkMask = self
            .topology
            .valid_links
            .iter()
            .filter(|&link| {
                let scratch = self.io.read32(Block::Nport, link, nport.scratch_warm);
                scratch != nport.scratch_init_pattern && scratch & nport.port_reset_required != 0
            })
            .collect();

        FatalErrorScope { device, port }
    }

    /// Replace the cold-boot pattern in every valid port's warm scratch
    pub fn init_scratch(&self) {
        let nport = self.map.nport();
        for link in self.topology.valid_links {
            if self.io.read32(Block::Nport, link, nport.scratch_warm) == nport.scratch_init_pattern {
                self.io.write32(Block::Nport, link, nport.scratch_warm, 0);
                info!("nvswitch: link {} warm scratch initialized", link);
            }
        }
    }

    /// Clear the port reset flag once a link is back in service
    pub(crate) fn clear_port_reset_required(&self, link: LinkId) {
        let nport = self.map.nport();
        self.io
            .modify32(Block::Nport, link, nport.scratch_warm, nport.port_reset_required, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;
    use nvswitch_hal::lr10::regs::{nport, saw};

    #[test]
    fn test_mark_link_fatal_once() {
        let fx = Fixture::new();
        let dev = fx.device();
        dev.set_fatal_error(false, Some(4)).expect("valid link");
        dev.set_fatal_error(false, Some(4)).expect("valid link");

        assert_eq!(fx.notifier.events(), [DeviceEvent::PortDown(4)]);
        assert_eq!(fx.regs.writes_to(Block::Nport, 4, nport::SCRATCH_WARM).len(), 1);
        assert_eq!(
            dev.device_fault_state().faulted_links,
            LinkMask::single(4)
        );
        assert!(!dev.device_fault_state().reset_required);
    }

    #[test]
    fn test_device_wide_sets_both_flags() {
        let fx = Fixture::new();
        let dev = fx.device();
        dev.set_fatal_error(true, Some(7)).expect("valid link");

        assert_eq!(
            fx.notifier.events(),
            [DeviceEvent::DeviceDown, DeviceEvent::PortDown(7)]
        );
        let scope = dev.fatal_error_scope();
        assert!(scope.device);
        assert_eq!(scope.port, LinkMask::single(7));
        assert_ne!(fx.regs.get(Block::Saw, 0, saw::SW_SCRATCH_12) & saw::DEVICE_RESET_REQUIRED, 0);
    }

    #[test]
    fn test_set_fatal_error_rejects_out_of_range() {
        let fx = Fixture::new();
        let dev = fx.device();
        assert_eq!(dev.set_fatal_error(false, Some(36)), Err(Error::BadArgs));
        assert!(fx.regs.writes().is_empty());
        assert!(fx.notifier.events().is_empty());
    }

    #[test]
    fn test_invalid_link_not_marked() {
        let fx = Fixture::with_links(LinkMask::from_bits(0b11));
        let dev = fx.device();
        dev.set_fatal_error(false, Some(5)).expect("in range");
        assert!(dev.device_fault_state().faulted_links.is_empty());
        assert!(fx.notifier.events().is_empty());
    }

    #[test]
    fn test_scope_ignores_cold_boot_pattern() {
        let fx = Fixture::new();
        fx.regs
            .set(Block::Nport, 2, nport::SCRATCH_WARM, nport::SCRATCH_WARM_DATA_INIT);
        fx.regs.set(
            Block::Nport,
            3,
            nport::SCRATCH_WARM,
            nport::SCRATCH_WARM_PORT_RESET_REQUIRED,
        );
        let dev = fx.device();
        let scope = dev.fatal_error_scope();
        assert!(!scope.device);
        assert_eq!(scope.port, LinkMask::single(3));
    }

    #[test]
    fn test_scope_survives_reload() {
        let fx = Fixture::new();
        {
            let dev = fx.device();
            dev.set_fatal_error(false, Some(12)).expect("valid link");
        }
        let dev = fx.device();
        assert!(dev.device_fault_state().faulted_links.is_empty());
        assert_eq!(dev.fatal_error_scope().port, LinkMask::single(12));
    }

    #[test]
    fn test_init_scratch_only_touches_pattern() {
        let fx = Fixture::new();
        fx.regs
            .set(Block::Nport, 0, nport::SCRATCH_WARM, nport::SCRATCH_WARM_DATA_INIT);
        fx.regs.set(
            Block::Nport,
            1,
            nport::SCRATCH_WARM,
            nport::SCRATCH_WARM_PORT_RESET_REQUIRED,
        );
        let dev = fx.device();
        dev.init_scratch();

        assert_eq!(fx.regs.get(Block::Nport, 0, nport::SCRATCH_WARM), 0);
        assert_eq!(
            fx.regs.get(Block::Nport, 1, nport::SCRATCH_WARM),
            nport::SCRATCH_WARM_PORT_RESET_REQUIRED
        );
        assert_eq!(fx.regs.writes().len(), 1);
    }
}
