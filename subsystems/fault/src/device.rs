//! # Device
//!
//! The device object owns the fault state and borrows everything else:
//! register access, the generation's register map and the platform
//! collaborators. Interrupt servicing and recovery both go through the
//! single state mutex.

use alloc::vec::Vec;
use core::fmt;

use spin::{Mutex, MutexGuard};

use nvswitch_core::{
    Clock, Error, ErrorEvent, EventNotifier, LinkId, LinkManager, PersistentLog, Result,
};
use nvswitch_hal::{RegisterIo, RegisterMap};

use crate::config::{DeviceTopology, FaultConfig};
use crate::state::{DeviceFaultState, DeviceState, LinkFaultState, GANGED_LINK_TABLE_ENTRIES};

// =============================================================================
// PLATFORM
// =============================================================================

/// Collaborators supplied by the surrounding driver
#[derive(Clone, Copy)]
pub struct Platform<'a> {
    /// Link registry and state control
    pub links: &'a dyn LinkManager,
    /// Persistent error log
    pub error_log: &'a dyn PersistentLog,
    /// Host event channel
    pub notifier: &'a dyn EventNotifier,
    /// Time source
    pub clock: &'a dyn Clock,
}

impl fmt::Debug for Platform<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}

// =============================================================================
// DEVICE
// =============================================================================

/// One switch under fault management
pub struct Device<'a> {
    pub(crate) io: &'a dyn RegisterIo,
    pub(crate) map: &'a dyn RegisterMap,
    pub(crate) platform: Platform<'a>,
    pub(crate) config: FaultConfig,
    pub(crate) topology: DeviceTopology,
    state: Mutex<DeviceState>,
}

impl<'a> Device<'a> {
    /// Create a device; nothing is written to hardware
    pub fn new(
        io: &'a dyn RegisterIo,
        map: &'a dyn RegisterMap,
        platform: Platform<'a>,
        config: FaultConfig,
        topology: DeviceTopology,
    ) -> Result<Self> {
        topology.validate()?;
        if config.poll_interval_ms == 0 || config.minion_reset_retries == 0 {
            return Err(Error::BadArgs);
        }

        log::debug!(
            "nvswitch: {} device, {} of {} links valid",
            map.generation(),
            topology.valid_links.count(),
            topology.num_links
        );

        Ok(Self {
            io,
            map,
            platform,
            config,
            topology,
            state: Mutex::new(DeviceState::new(map, &topology)),
        })
    }

    /// Timing configuration
    pub fn config(&self) -> &FaultConfig {
        &self.config
    }

    /// Device shape
    pub fn topology(&self) -> &DeviceTopology {
        &self.topology
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock()
    }

    pub(crate) fn clock(&self) -> &dyn Clock {
        self.platform.clock
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// In-memory fault state of `link`
    pub fn link_fault_state(&self, link: LinkId) -> Result<LinkFaultState> {
        if link >= self.topology.num_links {
            return Err(Error::BadArgs);
        }
        Ok(LinkFaultState {
            fatal_occurred: self.lock().is_link_fatal(link),
        })
    }

    /// In-memory fault state of the device
    pub fn device_fault_state(&self) -> DeviceFaultState {
        let state = self.lock();
        DeviceFaultState {
            reset_required: state.device_reset_required,
            faulted_links: state.fatal_links,
        }
    }

    /// Most recent error events, oldest first
    pub fn recent_events(&self) -> Vec<ErrorEvent> {
        self.lock().journal.oldest_ordered().cloned().collect()
    }

    // =========================================================================
    // Ganged link table
    // =========================================================================

    /// Cache the ganged link table and program it into every valid port.
    ///
    /// The cached copy re-seeds a port after reset-and-drain.
    pub fn set_ganged_link_table(&self, table: &[u64]) -> Result<()> {
        if table.len() > GANGED_LINK_TABLE_ENTRIES {
            return Err(Error::BadArgs);
        }
        let mut state = self.lock();
        state.ganged_link_table.clear();
        state
            .ganged_link_table
            .extend_from_slice(table)
            .map_err(|_| Error::NoMemory)?;

        for link in self.topology.valid_links {
            self.write_ganged_link_table(link, table);
        }
        Ok(())
    }

    pub(crate) fn write_ganged_link_table(&self, link: LinkId, table: &[u64]) {
        let nport = self.map.nport();
        let route = nvswitch_core::Block::Route;

        self.io
            .write32(route, link, nport.ganged_table_address, nport.ganged_table_auto_incr);
        for &entry in table {
            self.io.write32(route, link, nport.ganged_table_data, entry as u32);
            self.io
                .write32(route, link, nport.ganged_table_data, (entry >> 32) as u32);
        }
    }
}

impl fmt::Debug for Device<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("generation", &self.map.generation())
            .field("config", &self.config)
            .field("topology", &self.topology)
            .finish_non_exhaustive()
    }
}
