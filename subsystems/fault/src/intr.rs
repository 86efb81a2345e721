//! # Interrupt Programming
//!
//! Arms every error unit with the report, contain and log enables held in
//! [`InterruptMasks`], then opens the summary levels above them. Recovery
//! re-arms a reset port with the report enables only; its contain and log
//! enables come back from the port snapshot.

use log::info;

use nvswitch_core::{Block, Error, LinkId, Result, Severity};
use nvswitch_hal::ErrorUnit;

use crate::device::Device;
use crate::state::{DeviceState, InterruptMasks};

impl Device<'_> {
    /// Program every interrupt enable below the legacy level.
    ///
    /// Host delivery stays off until [`Device::enable_interrupts`].
    pub fn init_interrupts(&self) {
        let mut state = self.lock();

        for link in self.topology.valid_links {
            self.arm_link(&state, link);
        }

        for nxbar in 0..self.topology.num_nxbar {
            for tileout in 0..self.topology.tileouts_per_nxbar {
                self.arm_unit(&state.masks, ErrorUnit::Tileout, nxbar, tileout);
            }
        }

        let nvlink = self.map.nvlink();
        let minion = self.map.minion();
        for instance in 0..self.topology.num_nvlipt {
            let links = self.topology.nvlipt_links(instance);
            if links.is_empty() {
                continue;
            }
            self.arm_unit(&state.masks, ErrorUnit::NvliptCommon, instance, 0);
            self.io.write32(
                Block::Nvlipt,
                instance,
                nvlink.common_intr_control,
                nvlink.common_intr_control_value,
            );
            for mask in nvlink.common_intr_mask {
                self.io
                    .write32(Block::Nvlw, instance, mask, nvlink.common_mask_bits);
            }

            let link_bits = links.iter().fold(0, |bits, link| {
                bits | minion.link_bit(self.topology.local_link(link))
            });
            self.io.write32(
                Block::Minion,
                instance,
                minion.stall_en,
                minion.fatal | minion.nonfatal | minion.falcon_stall | link_bits,
            );
            self.io.write32(Block::Minion, instance, minion.nonstall_en, 0);
        }

        let host = self.map.host();
        self.io.write32(
            Block::Pbus,
            0,
            host.pbus_intr_en,
            host.pbus_squash | host.pbus_fecserr | host.pbus_timeout,
        );

        let top = self.map.top();
        let saw = [
            state.enables.saw_fatal,
            state.enables.saw_nonfatal,
            state.enables.saw_correctable,
            state.enables.saw_legacy,
        ];
        for (reg, value) in top.saw_enable_set.into_iter().zip(saw) {
            self.io.write32(Block::Saw, 0, reg, value);
        }

        self.init_scratch();
        state.interrupts_initialized = true;
        info!(
            "nvswitch: interrupts initialized for {} links",
            self.topology.valid_links.count()
        );
    }

    /// Open host interrupt delivery
    pub fn enable_interrupts(&self) -> Result<()> {
        let state = self.lock();
        if !state.interrupts_initialized {
            return Err(Error::InvalidState);
        }
        let top = self.map.top();
        self.io
            .write32(Block::Psmc, 0, top.legacy_enable_set, state.enables.legacy);
        Ok(())
    }

    /// Close host interrupt delivery
    pub fn disable_interrupts(&self) {
        let _state = self.lock();
        let top = self.map.top();
        self.io
            .write32(Block::Psmc, 0, top.legacy_enable_clear, u32::MAX);
    }

    /// Program every enable of every unit on `link`
    fn arm_link(&self, state: &DeviceState, link: LinkId) {
        for unit in ErrorUnit::ALL.into_iter().filter(ErrorUnit::is_per_link) {
            self.arm_unit(&state.masks, unit, link, 0);
        }
        self.open_link(link);
    }

    /// Bring a reset port back to its operating report enables.
    ///
    /// Storm suppression may have cleared report enable bits; they are
    /// rewritten from the cached masks. Contain and log enables are left
    /// as restored.
    pub(crate) fn rearm_link(&self, state: &DeviceState, link: LinkId) {
        for unit in ErrorUnit::ALL.into_iter().filter(ErrorUnit::is_per_link) {
            self.arm_reports(&state.masks, unit, link, 0);
        }
        self.open_link(link);
    }

    /// Open the port and link level gates of `link`
    fn open_link(&self, link: LinkId) {
        let nport = self.map.nport();
        let nvlink = self.map.nvlink();
        let nvlipt = self.topology.nvlipt_of(link);
        let local = self.topology.local_link(link);

        self.io.write32(
            Block::Nport,
            link,
            nport.err_control_common,
            nport.common_enable_bits,
        );
        self.io.write32(
            Block::NvliptLnk,
            link,
            nvlink.link_intr_control,
            nvlink.link_intr_control_value,
        );
        for which in 0..nvlink.link_intr_mask.len() {
            self.io.write32(
                Block::Nvlw,
                nvlipt,
                nvlink.link_mask(which, local),
                nvlink.link_mask_bits,
            );
        }
        let minion = self.map.minion();
        self.io
            .modify32(Block::Minion, nvlipt, minion.stall_en, 0, minion.link_bit(local));
    }

    /// Gate every interrupt source of `link` at the port and link level
    pub(crate) fn disarm_link(&self, link: LinkId) {
        let nport = self.map.nport();
        let nvlink = self.map.nvlink();
        let nvlipt = self.topology.nvlipt_of(link);
        let local = self.topology.local_link(link);

        self.io.write32(Block::Nport, link, nport.err_control_common, 0);
        for which in 0..nvlink.link_intr_mask.len() {
            self.io
                .write32(Block::Nvlw, nvlipt, nvlink.link_mask(which, local), 0);
        }
        let minion = self.map.minion();
        self.io
            .modify32(Block::Minion, nvlipt, minion.stall_en, minion.link_bit(local), 0);
    }

    fn arm_unit(&self, masks: &InterruptMasks, unit: ErrorUnit, instance: u32, sub: u32) {
        let layout = self.map.unit(unit);
        let reports = self.arm_reports(masks, unit, instance, sub);

        if let Some(reg) = layout.contain {
            self.io
                .write32(layout.block, instance, layout.at(reg, sub), masks.contain(unit));
        }
        if let Some(reg) = layout.log_enable {
            self.io
                .write32(layout.block, instance, layout.at(reg, sub), reports);
        }
    }

    /// Write the report enable of every tree the unit has; returns their union
    fn arm_reports(&self, masks: &InterruptMasks, unit: ErrorUnit, instance: u32, sub: u32) -> u32 {
        let layout = self.map.unit(unit);
        let mut reports = 0;
        for severity in [Severity::Fatal, Severity::NonFatal, Severity::Correctable] {
            if let Some(reg) = layout.enable(severity) {
                let enable = masks.enable(unit, severity);
                self.io
                    .write32(layout.block, instance, layout.at(reg, sub), enable);
                reports |= enable;
            }
        }
        reports
    }
}
