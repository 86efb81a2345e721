//! # Crossbar Handlers
//!
//! The crossbar only reports on the fatal tree. Its summary has one bit
//! per tile (one tile per link) and one bit per tile-out; tile-outs are
//! sub-instances of the crossbar block and belong to no link.

use nvswitch_core::{Block, ServiceStatus, Severity};
use nvswitch_hal::ErrorUnit;

use crate::device::Device;
use crate::handler::{Subject, Summary, UnitInstance};
use crate::state::DeviceState;

impl Device<'_> {
    /// Service crossbar `nxbar`
    pub(crate) fn service_nxbar(&self, state: &mut DeviceState, nxbar: u32) -> ServiceStatus {
        let layout = self.map.nxbar();
        let status = self.io.read32(Block::Nxbar, nxbar, layout.tc_error_status);

        let tiles = self.topology.tiles_per_nxbar;
        let tileouts = self.topology.tileouts_per_nxbar;
        let field = |count: u32| if count >= 32 { u32::MAX } else { (1u32 << count) - 1 };
        let tree_bits = (field(tiles) << layout.tile_shift) | (field(tileouts) << layout.tileout_shift);

        let mut summary = Summary::new(status & tree_bits);

        for tile in 0..tiles {
            let bit = 1 << (layout.tile_shift + tile);
            let link = self.topology.tile_link(nxbar, tile);
            if !summary.has(bit) || !self.topology.is_valid(link) {
                continue;
            }
            let result =
                self.service_unit(state, UnitInstance::link(ErrorUnit::Tile, link), Severity::Fatal);
            summary.child(bit, result);
        }

        for tileout in 0..tileouts {
            let bit = 1 << (layout.tileout_shift + tileout);
            if !summary.has(bit) {
                continue;
            }
            let target = UnitInstance {
                unit: ErrorUnit::Tileout,
                instance: nxbar,
                sub: tileout,
                subject: Subject::Device,
            };
            let result = self.service_unit(state, target, Severity::Fatal);
            summary.child(bit, result);
        }

        summary.finish(self, state, Block::Nxbar, nxbar, &[status])
    }
}
