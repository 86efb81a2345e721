//! # Fault State
//!
//! Everything the fault core remembers between interrupts. A single
//! [`DeviceState`] lives behind the device mutex; handlers borrow it
//! mutably for the length of one dispatch pass or one link recovery.

use core::fmt;

use heapless::HistoryBuffer;

use nvswitch_core::{ErrorEvent, LinkId, LinkMask, Severity};
use nvswitch_hal::{ErrorUnit, RegisterMap};

use crate::config::DeviceTopology;

/// Recent error events kept for inspection
pub const JOURNAL_DEPTH: usize = 32;

/// Ganged link table entries cached for re-seeding after a port reset
pub const GANGED_LINK_TABLE_ENTRIES: usize = 256;

// =============================================================================
// INTERRUPT MASKS
// =============================================================================

/// Report and contain enables each error unit runs with.
///
/// Computed once from the register map defaults. Init programs them,
/// recovery re-arms a link with them after storm suppression stripped
/// bits out of the hardware enables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterruptMasks {
    fatal: [u32; ErrorUnit::COUNT],
    nonfatal: [u32; ErrorUnit::COUNT],
    correctable: [u32; ErrorUnit::COUNT],
    contain: [u32; ErrorUnit::COUNT],
}

impl InterruptMasks {
    /// Masks from the register map defaults
    pub fn from_map(map: &dyn RegisterMap) -> Self {
        let mut masks = Self {
            fatal: [0; ErrorUnit::COUNT],
            nonfatal: [0; ErrorUnit::COUNT],
            correctable: [0; ErrorUnit::COUNT],
            contain: [0; ErrorUnit::COUNT],
        };
        for unit in ErrorUnit::ALL {
            let layout = map.unit(unit);
            masks.fatal[unit.index()] = layout.default_fatal;
            masks.nonfatal[unit.index()] = layout.default_nonfatal;
            masks.correctable[unit.index()] = layout.default_correctable;
            masks.contain[unit.index()] = layout.default_contain;
        }
        masks
    }

    /// Report enable of `unit` for a tree
    pub fn enable(&self, unit: ErrorUnit, severity: Severity) -> u32 {
        match severity {
            Severity::Fatal => self.fatal[unit.index()],
            Severity::NonFatal => self.nonfatal[unit.index()],
            Severity::Correctable => self.correctable[unit.index()],
        }
    }

    /// Contain enable of `unit`
    pub fn contain(&self, unit: ErrorUnit) -> u32 {
        self.contain[unit.index()]
    }
}

// =============================================================================
// TREE ENABLES
// =============================================================================

/// Summary bits the dispatcher acts on, derived from which engines exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TreeEnables {
    pub legacy: u32,
    pub saw_fatal: u32,
    pub saw_nonfatal: u32,
    pub saw_correctable: u32,
    pub saw_legacy: u32,
}

impl TreeEnables {
    pub fn compute(map: &dyn RegisterMap, topology: &DeviceTopology) -> Self {
        let top = map.top();

        let mut npg = 0;
        for i in 0..topology.num_npg {
            if !topology.npg_links(i).is_empty() {
                npg |= 1 << (top.saw_npg_shift + i);
            }
        }
        let mut nvlipt = 0;
        for i in 0..topology.num_nvlipt {
            if !topology.nvlipt_links(i).is_empty() {
                nvlipt |= 1 << (top.saw_nvlipt_shift + i);
            }
        }
        let nxbar = ((1u32 << topology.num_nxbar) - 1) << top.saw_nxbar_shift;

        // Only engines whose units classify correctable bits join that tree
        let has_correctable = |units: &[ErrorUnit]| {
            units
                .iter()
                .any(|&unit| !map.unit(unit).correctable.is_empty())
        };
        let mut correctable = 0;
        if has_correctable(&ErrorUnit::NPORT[..]) {
            correctable |= npg;
        }
        if has_correctable(&ErrorUnit::NVLINK[..]) {
            correctable |= nvlipt;
        }

        Self {
            legacy: top.legacy_saw | top.legacy_pbus | top.legacy_priv_ring,
            saw_fatal: npg | nxbar | nvlipt,
            saw_nonfatal: npg | nvlipt,
            saw_correctable: correctable,
            saw_legacy: 0,
        }
    }
}

// =============================================================================
// DEVICE STATE
// =============================================================================

/// Mutable fault bookkeeping of one device
pub(crate) struct DeviceState {
    pub masks: InterruptMasks,
    pub enables: TreeEnables,
    pub fatal_links: LinkMask,
    pub device_reset_required: bool,
    pub journal: HistoryBuffer<ErrorEvent, JOURNAL_DEPTH>,
    pub ganged_link_table: heapless::Vec<u64, GANGED_LINK_TABLE_ENTRIES>,
    pub interrupts_initialized: bool,
}

impl DeviceState {
    pub fn new(map: &dyn RegisterMap, topology: &DeviceTopology) -> Self {
        Self {
            masks: InterruptMasks::from_map(map),
            enables: TreeEnables::compute(map, topology),
            fatal_links: LinkMask::EMPTY,
            device_reset_required: false,
            journal: HistoryBuffer::new(),
            ganged_link_table: heapless::Vec::new(),
            interrupts_initialized: false,
        }
    }

    pub fn is_link_fatal(&self, link: LinkId) -> bool {
        self.fatal_links.contains(link)
    }

    /// Whether any link in `links` is faulted
    pub fn any_fatal(&self, links: LinkMask) -> bool {
        !links.and(self.fatal_links).is_empty()
    }
}

impl fmt::Debug for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceState")
            .field("fatal_links", &self.fatal_links)
            .field("device_reset_required", &self.device_reset_required)
            .field("journal_len", &self.journal.len())
            .field("ganged_link_table_len", &self.ganged_link_table.len())
            .field("interrupts_initialized", &self.interrupts_initialized)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// QUERY TYPES
// =============================================================================

/// Fault state of one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkFaultState {
    /// A fatal error was reported and no recovery has completed since
    pub fatal_occurred: bool,
}

/// Fault state of the whole device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceFaultState {
    /// A device-wide fatal error requires an external reset
    pub reset_required: bool,
    /// Links currently faulted
    pub faulted_links: LinkMask,
}

/// Reset scope persisted in hardware scratch registers.
///
/// Read back from hardware rather than from memory so it survives a
/// driver reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FatalErrorScope {
    /// The device needs a reset
    pub device: bool,
    /// Ports that need a reset
    pub port: LinkMask,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nvswitch_hal::lr10::Lr10;

    #[test]
    fn test_masks_follow_map_defaults() {
        let masks = InterruptMasks::from_map(&Lr10);
        let route = Lr10.unit(ErrorUnit::Route);
        assert_eq!(masks.enable(ErrorUnit::Route, Severity::Fatal), route.default_fatal);
        assert_eq!(masks.enable(ErrorUnit::Route, Severity::NonFatal), route.default_nonfatal);
        assert_eq!(masks.contain(ErrorUnit::Route), route.default_contain);
        assert_eq!(masks.enable(ErrorUnit::Tileout, Severity::NonFatal), 0);
    }

    #[test]
    fn test_tree_enables_skip_empty_groups() {
        // links 0..8: NPG 0-1, NVLIPT 0-1
        let topo = DeviceTopology::lr10(LinkMask::first_n(8));
        let enables = TreeEnables::compute(&Lr10, &topo);
        let top = Lr10.top();
        assert_eq!(
            enables.saw_nonfatal,
            (0b11 << top.saw_npg_shift) | (0b11 << top.saw_nvlipt_shift)
        );
        assert_eq!(enables.saw_fatal & (0xf << top.saw_nxbar_shift), 0xf << top.saw_nxbar_shift);
        assert_eq!(enables.saw_correctable, 0);
        assert_eq!(enables.legacy, top.legacy_saw | top.legacy_pbus | top.legacy_priv_ring);
    }

    #[test]
    fn test_any_fatal() {
        let topo = DeviceTopology::lr10(LinkMask::first_n(36));
        let mut state = DeviceState::new(&Lr10, &topo);
        assert!(!state.any_fatal(LinkMask::first_n(4)));
        state.fatal_links.insert(2);
        assert!(state.is_link_fatal(2));
        assert!(state.any_fatal(LinkMask::first_n(4)));
        assert!(!state.any_fatal(LinkMask::single(5)));
    }
}
