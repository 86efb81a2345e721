//! # Port Group Handlers
//!
//! One NPG fronts four NPORTs. Its status register carries a fatal and a
//! non-fatal flag per NPORT; each flag leads to the five NPORT error
//! units of that port.

use nvswitch_core::{Block, ServiceStatus, Severity};
use nvswitch_hal::ErrorUnit;

use crate::device::Device;
use crate::handler::{Summary, UnitInstance};
use crate::state::DeviceState;

impl Device<'_> {
    /// Service port group `npg` on one tree
    pub(crate) fn service_npg(
        &self,
        state: &mut DeviceState,
        npg: u32,
        severity: Severity,
    ) -> ServiceStatus {
        let layout = self.map.npg();
        let status = self.io.read32(Block::Npg, npg, layout.status);

        let nport_bit = |nport: u32| layout.tree_bit(nport, severity);
        let tree_bits = (0..self.topology.links_per_npg).fold(0, |bits, nport| bits | nport_bit(nport));

        let mut summary = Summary::new(status & tree_bits);
        for link in self.topology.npg_links(npg) {
            let bit = nport_bit(self.topology.nport_in_npg(link));
            if !summary.has(bit) {
                continue;
            }
            let result = self.service_units(
                state,
                ErrorUnit::NPORT
                    .iter()
                    .map(|&unit| UnitInstance::link(unit, link)),
                severity,
            );
            summary.child(bit, result);
        }
        summary.finish(self, state, Block::Npg, npg, &[status])
    }
}
