//! # Fault Configuration
//!
//! Timing constants for the bounded waits of servicing and recovery,
//! and the shape of the device the fault core manages.

use core::time::Duration;

use nvswitch_core::{Error, LinkId, LinkMask, Result, MAX_LINKS};

// =============================================================================
// TIMING
// =============================================================================

/// Timing and policy knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultConfig {
    /// Tag pool RAM hardware-init completion
    pub tagpool_init_timeout: Duration,
    /// Ring master command acknowledge
    pub ring_command_timeout: Duration,
    /// Sleep between polls of a bounded wait
    pub poll_interval_ms: u32,
    /// Wait after asserting ingress/egress stop
    pub drain_delay_ms: u32,
    /// Wait for a link to drop on its own before a non-forced reset
    pub link_down_timeout: Duration,
    /// Attempts at the link reset handshake
    pub minion_reset_retries: u32,
    /// Forward injected NVLink errors to the persistent log
    pub persist_injected: bool,
}

impl FaultConfig {
    /// Production defaults
    pub const fn new() -> Self {
        Self {
            tagpool_init_timeout: Duration::from_millis(25),
            ring_command_timeout: Duration::from_millis(5),
            poll_interval_ms: 1,
            drain_delay_ms: 1,
            link_down_timeout: Duration::from_millis(10),
            minion_reset_retries: 3,
            persist_injected: false,
        }
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TOPOLOGY
// =============================================================================

/// Engine counts and link grouping of one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceTopology {
    /// Links on the device
    pub num_links: u32,
    /// NPORTs per port group
    pub links_per_npg: u32,
    /// Links per NVLIPT instance
    pub links_per_nvlipt: u32,
    /// Port groups
    pub num_npg: u32,
    /// NVLIPT instances
    pub num_nvlipt: u32,
    /// Crossbars
    pub num_nxbar: u32,
    /// Tiles per crossbar, one per link
    pub tiles_per_nxbar: u32,
    /// Tile-outs per crossbar
    pub tileouts_per_nxbar: u32,
    /// Links present and enabled
    pub valid_links: LinkMask,
}

impl DeviceTopology {
    /// LR10 shape with the given links enabled
    #[cfg(feature = "lr10")]
    pub const fn lr10(valid_links: LinkMask) -> Self {
        use nvswitch_hal::lr10;

        Self {
            num_links: lr10::NUM_LINKS,
            links_per_npg: lr10::LINKS_PER_NPG,
            links_per_nvlipt: lr10::LINKS_PER_NVLIPT,
            num_npg: lr10::NUM_NPG,
            num_nvlipt: lr10::NUM_NVLIPT,
            num_nxbar: lr10::NUM_NXBAR,
            tiles_per_nxbar: lr10::TILES_PER_NXBAR,
            tileouts_per_nxbar: lr10::TILEOUTS_PER_NXBAR,
            valid_links: valid_links.and(LinkMask::first_n(lr10::NUM_LINKS)),
        }
    }

    /// Check that the counts are consistent
    pub fn validate(&self) -> Result<()> {
        if self.num_links == 0 || self.num_links as usize > MAX_LINKS {
            return Err(Error::BadArgs);
        }
        if self.links_per_npg == 0 || self.links_per_nvlipt == 0 {
            return Err(Error::BadArgs);
        }
        if self.num_npg * self.links_per_npg < self.num_links
            || self.num_nvlipt * self.links_per_nvlipt < self.num_links
        {
            return Err(Error::BadArgs);
        }
        if !self.valid_links.without(LinkMask::first_n(self.num_links)).is_empty() {
            return Err(Error::BadArgs);
        }
        Ok(())
    }

    /// Whether `link` exists and is enabled
    pub const fn is_valid(&self, link: LinkId) -> bool {
        link < self.num_links && self.valid_links.contains(link)
    }

    /// Port group owning `link`
    pub const fn npg_of(&self, link: LinkId) -> u32 {
        link / self.links_per_npg
    }

    /// NPORT index of `link` within its port group
    pub const fn nport_in_npg(&self, link: LinkId) -> u32 {
        link % self.links_per_npg
    }

    /// NVLIPT instance owning `link`
    pub const fn nvlipt_of(&self, link: LinkId) -> u32 {
        link / self.links_per_nvlipt
    }

    /// Index of `link` within its NVLIPT instance
    pub const fn local_link(&self, link: LinkId) -> u32 {
        link % self.links_per_nvlipt
    }

    /// Valid links of NVLIPT `instance`
    pub fn nvlipt_links(&self, instance: u32) -> LinkMask {
        let first = instance * self.links_per_nvlipt;
        (first..first + self.links_per_nvlipt)
            .filter(|&link| self.is_valid(link))
            .collect()
    }

    /// Valid links of port group `npg`
    pub fn npg_links(&self, npg: u32) -> LinkMask {
        let first = npg * self.links_per_npg;
        (first..first + self.links_per_npg)
            .filter(|&link| self.is_valid(link))
            .collect()
    }

    /// Link served by tile `tile` of crossbar `nxbar`
    pub const fn tile_link(&self, nxbar: u32, tile: u32) -> LinkId {
        nxbar * self.tiles_per_nxbar + tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let config = FaultConfig::default();
        assert_eq!(config.tagpool_init_timeout, Duration::from_millis(25));
        assert_eq!(config.ring_command_timeout, Duration::from_millis(5));
        assert_eq!(config.minion_reset_retries, 3);
        assert!(!config.persist_injected);
    }

    #[test]
    fn test_lr10_grouping() {
        let topo = DeviceTopology::lr10(LinkMask::first_n(36));
        assert_eq!(topo.validate(), Ok(()));
        assert_eq!(topo.npg_of(13), 3);
        assert_eq!(topo.nport_in_npg(13), 1);
        assert_eq!(topo.nvlipt_of(13), 3);
        assert_eq!(topo.local_link(13), 1);
        assert_eq!(topo.tile_link(2, 4), 22);
        assert_eq!(topo.nvlipt_links(1).bits(), 0xf0);
    }

    #[test]
    fn test_lr10_clamps_valid_links() {
        let topo = DeviceTopology::lr10(LinkMask::from_bits(u64::MAX));
        assert_eq!(topo.valid_links.count(), 36);
        assert!(!topo.is_valid(36));
    }

    #[test]
    fn test_partial_groups() {
        let topo = DeviceTopology::lr10(LinkMask::from_bits(0b1010));
        assert_eq!(topo.npg_links(0).bits(), 0b1010);
        assert!(topo.npg_links(1).is_empty());
        assert!(!topo.is_valid(0));
        assert!(topo.is_valid(3));
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        let mut topo = DeviceTopology::lr10(LinkMask::first_n(36));
        topo.links_per_npg = 0;
        assert_eq!(topo.validate(), Err(Error::BadArgs));

        let mut topo = DeviceTopology::lr10(LinkMask::first_n(36));
        topo.num_npg = 2;
        assert_eq!(topo.validate(), Err(Error::BadArgs));

        let mut topo = DeviceTopology::lr10(LinkMask::first_n(36));
        topo.num_links = 8;
        assert_eq!(topo.validate(), Err(Error::BadArgs));
    }
}
