//! Test doubles: a sparse register file and in-memory collaborators.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use spin::Mutex;

use nvswitch_core::{
    Block, Clock, DeviceEvent, EccEvent, Error, EventNotifier, LinkHandle, LinkId, LinkManager,
    LinkMask, LinkMode, LinkStateRequest, NvlinkEvent, PersistentLog, RequestMode, Result,
    SublinkMode,
};
use nvswitch_hal::lr10::{self, Lr10};
use nvswitch_hal::{ErrorUnit, RegisterIo, RegisterMap};

use crate::config::{DeviceTopology, FaultConfig};
use crate::device::{Device, Platform};

// =============================================================================
// REGISTER FILE
// =============================================================================

/// How a register reacts to writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Behavior {
    /// Stores the written value
    Plain,
    /// Written ones clear stored bits
    W1c,
    /// Hardware completes the command; reads back zero
    SelfClear,
    /// Writes are ignored
    Sticky,
    /// Written ones clear bits of another register in the same instance
    ClearsOther(u32),
}

/// One logged register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Write {
    pub block: Block,
    pub instance: u32,
    pub offset: u32,
    pub value: u32,
}

type Key = (Block, u32, u32);

#[derive(Default)]
struct RegFile {
    values: BTreeMap<Key, u32>,
    behaviors: BTreeMap<(Block, u32), Behavior>,
    overrides: BTreeMap<Key, Behavior>,
    writes: Vec<Write>,
    reads: Vec<Key>,
}

impl RegFile {
    fn behavior(&self, key: Key) -> Behavior {
        self.overrides
            .get(&key)
            .or_else(|| self.behaviors.get(&(key.0, key.2)))
            .copied()
            .unwrap_or(Behavior::Plain)
    }
}

/// Sparse register file; unset registers read zero
pub(crate) struct MockRegisters {
    file: Mutex<RegFile>,
}

impl MockRegisters {
    /// Register file with the LR10 write behaviors
    pub fn lr10() -> Self {
        let regs = Self {
            file: Mutex::new(RegFile::default()),
        };
        let map = Lr10;

        for unit in ErrorUnit::ALL {
            let layout = map.unit(unit);
            let subs = if unit == ErrorUnit::Tileout {
                lr10::TILEOUTS_PER_NXBAR
            } else {
                1
            };
            for sub in 0..subs {
                regs.set_behavior(layout.block, layout.at(layout.status, sub), Behavior::W1c);
                if let Some(first) = layout.first {
                    regs.set_behavior(layout.block, layout.at(first, sub), Behavior::W1c);
                }
            }
        }

        let host = map.host();
        regs.set_behavior(Block::Pbus, host.pbus_intr, Behavior::W1c);
        regs.set_behavior(Block::PrivMaster, host.ring_command, Behavior::SelfClear);

        let minion = map.minion();
        for local in 0..lr10::LINKS_PER_NVLIPT {
            regs.set_behavior(Block::Minion, minion.link_intr_at(local), Behavior::W1c);
        }
        regs.set_behavior(
            Block::Minion,
            minion.falcon_irqsclr,
            Behavior::ClearsOther(minion.falcon_irqstat),
        );

        regs.set_behavior(Block::Nport, map.nport().contain_and_drain, Behavior::SelfClear);
        regs
    }

    pub fn set(&self, block: Block, instance: u32, offset: u32, value: u32) {
        self.file.lock().values.insert((block, instance, offset), value);
    }

    pub fn get(&self, block: Block, instance: u32, offset: u32) -> u32 {
        self.file
            .lock()
            .values
            .get(&(block, instance, offset))
            .copied()
            .unwrap_or(0)
    }

    pub fn set_behavior(&self, block: Block, offset: u32, behavior: Behavior) {
        self.file.lock().behaviors.insert((block, offset), behavior);
    }

    /// Behavior of one instance only
    pub fn override_behavior(&self, block: Block, instance: u32, offset: u32, behavior: Behavior) {
        self.file
            .lock()
            .overrides
            .insert((block, instance, offset), behavior);
    }

    pub fn writes(&self) -> Vec<Write> {
        self.file.lock().writes.clone()
    }

    /// Values written to one register, in order
    pub fn writes_to(&self, block: Block, instance: u32, offset: u32) -> Vec<u32> {
        self.file
            .lock()
            .writes
            .iter()
            .filter(|w| w.block == block && w.instance == instance && w.offset == offset)
            .map(|w| w.value)
            .collect()
    }

    /// Index in the write log of the first write to a register
    pub fn position(&self, block: Block, instance: u32, offset: u32) -> Option<usize> {
        self.file
            .lock()
            .writes
            .iter()
            .position(|w| w.block == block && w.instance == instance && w.offset == offset)
    }

    /// Whether any register of `block` was read
    pub fn was_read(&self, block: Block) -> bool {
        self.file.lock().reads.iter().any(|r| r.0 == block)
    }

    pub fn clear_log(&self) {
        let mut file = self.file.lock();
        file.writes.clear();
        file.reads.clear();
    }
}

impl RegisterIo for MockRegisters {
    fn read32(&self, block: Block, instance: u32, offset: u32) -> u32 {
        let mut file = self.file.lock();
        file.reads.push((block, instance, offset));
        file.values
            .get(&(block, instance, offset))
            .copied()
            .unwrap_or(0)
    }

    fn write32(&self, block: Block, instance: u32, offset: u32, value: u32) {
        let mut file = self.file.lock();
        file.writes.push(Write {
            block,
            instance,
            offset,
            value,
        });

        let key = (block, instance, offset);
        match file.behavior(key) {
            Behavior::Plain => {
                file.values.insert(key, value);
            }
            Behavior::W1c => {
                let entry = file.values.entry(key).or_insert(0);
                *entry &= !value;
            }
            Behavior::SelfClear => {
                file.values.insert(key, 0);
            }
            Behavior::Sticky => {}
            Behavior::ClearsOther(target) => {
                let entry = file.values.entry((block, instance, target)).or_insert(0);
                *entry &= !value;
            }
        }
    }
}

// =============================================================================
// CLOCK
// =============================================================================

/// Virtual clock; sleeping advances time
#[derive(Default)]
pub(crate) struct MockClock {
    now: AtomicU64,
}

impl MockClock {
    pub fn advance_ms(&self, ms: u64) {
        self.now.fetch_add(ms * 1_000_000, Ordering::Relaxed);
    }
}

impl Clock for MockClock {
    fn now_ns(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }

    fn sleep_ms(&self, ms: u32) {
        self.advance_ms(u64::from(ms));
    }
}

// =============================================================================
// LINK MANAGER
// =============================================================================

#[derive(Default)]
struct LinkState {
    registered: LinkMask,
    missing: LinkMask,
    in_reset: LinkMask,
    modes: BTreeMap<LinkId, LinkMode>,
    sublinks: BTreeMap<LinkId, (SublinkMode, SublinkMode)>,
    reset_failures: BTreeMap<LinkId, u32>,
    fail_register: LinkMask,
    fail_mode: LinkMask,
    fail_training: bool,
    unregistered: Vec<LinkId>,
    shutdowns: Vec<LinkId>,
    cleared: Vec<LinkId>,
    destroyed: Vec<LinkId>,
    reset_requests: Vec<LinkId>,
    training_calls: u32,
}

/// Link registry that records every call
pub(crate) struct MockLinkManager {
    state: Mutex<LinkState>,
}

impl MockLinkManager {
    pub fn new(registered: LinkMask) -> Self {
        Self {
            state: Mutex::new(LinkState {
                registered,
                ..LinkState::default()
            }),
        }
    }

    /// `get_link` returns nothing for `link`
    pub fn remove(&self, link: LinkId) {
        self.state.lock().missing.insert(link);
    }

    pub fn set_in_reset(&self, link: LinkId) {
        self.state.lock().in_reset.insert(link);
    }

    pub fn set_mode(&self, link: LinkId, mode: LinkMode) {
        self.state.lock().modes.insert(link, mode);
    }

    pub fn set_sublinks(&self, link: LinkId, tx: SublinkMode, rx: SublinkMode) {
        self.state.lock().sublinks.insert(link, (tx, rx));
    }

    /// Fail the next `times` reset requests on `link`
    pub fn fail_reset(&self, link: LinkId, times: u32) {
        self.state.lock().reset_failures.insert(link, times);
    }

    pub fn fail_register(&self, link: LinkId) {
        self.state.lock().fail_register.insert(link);
    }

    pub fn fail_mode(&self, link: LinkId) {
        self.state.lock().fail_mode.insert(link);
    }

    pub fn fail_training(&self) {
        self.state.lock().fail_training = true;
    }

    pub fn registered(&self) -> LinkMask {
        self.state.lock().registered
    }

    pub fn unregistered(&self) -> Vec<LinkId> {
        self.state.lock().unregistered.clone()
    }

    pub fn shutdowns(&self) -> Vec<LinkId> {
        self.state.lock().shutdowns.clone()
    }

    pub fn cleared(&self) -> Vec<LinkId> {
        self.state.lock().cleared.clone()
    }

    pub fn destroyed(&self) -> Vec<LinkId> {
        self.state.lock().destroyed.clone()
    }

    pub fn reset_requests(&self) -> Vec<LinkId> {
        self.state.lock().reset_requests.clone()
    }

    pub fn training_calls(&self) -> u32 {
        self.state.lock().training_calls
    }
}

impl LinkManager for MockLinkManager {
    fn get_link(&self, link: LinkId) -> Option<LinkHandle> {
        if self.state.lock().missing.contains(link) {
            None
        } else {
            Some(LinkHandle { link })
        }
    }

    fn is_link_in_reset(&self, handle: LinkHandle) -> bool {
        self.state.lock().in_reset.contains(handle.link)
    }

    fn unregister_link(&self, handle: LinkHandle) {
        let mut state = self.state.lock();
        state.registered.remove(handle.link);
        state.unregistered.push(handle.link);
    }

    fn register_link(&self, handle: LinkHandle) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_register.contains(handle.link) {
            return Err(Error::LinkManager);
        }
        state.registered.insert(handle.link);
        Ok(())
    }

    fn destroy_link(&self, handle: LinkHandle) {
        self.state.lock().destroyed.push(handle.link);
    }

    fn request_link_state(
        &self,
        handle: LinkHandle,
        state: LinkStateRequest,
        _mode: RequestMode,
    ) -> Result<()> {
        let mut links = self.state.lock();
        links.reset_requests.push(handle.link);
        if let Some(remaining) = links.reset_failures.get_mut(&handle.link) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(Error::LinkManager);
            }
        }
        match state {
            LinkStateRequest::Reset => {
                links.modes.insert(handle.link, LinkMode::Reset);
            }
        }
        Ok(())
    }

    fn link_mode(&self, handle: LinkHandle) -> Result<LinkMode> {
        let state = self.state.lock();
        if state.fail_mode.contains(handle.link) {
            return Err(Error::LinkManager);
        }
        Ok(state
            .modes
            .get(&handle.link)
            .copied()
            .unwrap_or(LinkMode::Active))
    }

    fn sublink_modes(&self, handle: LinkHandle) -> Result<(SublinkMode, SublinkMode)> {
        Ok(self
            .state
            .lock()
            .sublinks
            .get(&handle.link)
            .copied()
            .unwrap_or((SublinkMode::HighSpeed, SublinkMode::HighSpeed)))
    }

    fn shutdown_unilateral(&self, handle: LinkHandle) {
        let mut state = self.state.lock();
        state.shutdowns.push(handle.link);
        state.modes.insert(handle.link, LinkMode::Off);
    }

    fn clear_link_state(&self, handle: LinkHandle) {
        self.state.lock().cleared.push(handle.link);
    }

    fn launch_training(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.training_calls += 1;
        if state.fail_training {
            Err(Error::LinkManager)
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// PERSISTENT LOG / NOTIFIER
// =============================================================================

#[derive(Default)]
struct LogState {
    ecc: Vec<EccEvent>,
    nvlink: Vec<NvlinkEvent>,
    fail: bool,
}

#[derive(Default)]
pub(crate) struct MockPersistentLog {
    state: Mutex<LogState>,
}

impl MockPersistentLog {
    pub fn fail(&self, fail: bool) {
        self.state.lock().fail = fail;
    }

    pub fn ecc_events(&self) -> Vec<EccEvent> {
        self.state.lock().ecc.clone()
    }

    pub fn nvlink_events(&self) -> Vec<NvlinkEvent> {
        self.state.lock().nvlink.clone()
    }
}

impl PersistentLog for MockPersistentLog {
    fn log_ecc(&self, event: &EccEvent) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail {
            return Err(Error::PersistentLog);
        }
        state.ecc.push(*event);
        Ok(())
    }

    fn log_nvlink(&self, event: &NvlinkEvent) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail {
            return Err(Error::PersistentLog);
        }
        state.nvlink.push(*event);
        Ok(())
    }
}

#[derive(Default)]
struct NotifierState {
    events: Vec<DeviceEvent>,
    fail: bool,
}

#[derive(Default)]
pub(crate) struct MockNotifier {
    state: Mutex<NotifierState>,
}

impl MockNotifier {
    pub fn fail(&self, fail: bool) {
        self.state.lock().fail = fail;
    }

    pub fn events(&self) -> Vec<DeviceEvent> {
        self.state.lock().events.clone()
    }
}

impl EventNotifier for MockNotifier {
    fn notify(&self, event: DeviceEvent) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail {
            return Err(Error::Notification);
        }
        state.events.push(event);
        Ok(())
    }
}

// =============================================================================
// FIXTURE
// =============================================================================

/// An LR10 device with mock collaborators
pub(crate) struct Fixture {
    pub regs: MockRegisters,
    pub clock: MockClock,
    pub links: MockLinkManager,
    pub log: MockPersistentLog,
    pub notifier: MockNotifier,
    pub map: Lr10,
    pub config: FaultConfig,
    pub topology: DeviceTopology,
}

impl Fixture {
    /// Every link valid and registered
    pub fn new() -> Self {
        Self::with_links(LinkMask::first_n(lr10::NUM_LINKS))
    }

    pub fn with_links(valid: LinkMask) -> Self {
        Self {
            regs: MockRegisters::lr10(),
            clock: MockClock::default(),
            links: MockLinkManager::new(valid),
            log: MockPersistentLog::default(),
            notifier: MockNotifier::default(),
            map: Lr10,
            config: FaultConfig::default(),
            topology: DeviceTopology::lr10(valid),
        }
    }

    pub fn platform(&self) -> Platform<'_> {
        Platform {
            links: &self.links,
            error_log: &self.log,
            notifier: &self.notifier,
            clock: &self.clock,
        }
    }

    pub fn device(&self) -> Device<'_> {
        Device::new(&self.regs, &self.map, self.platform(), self.config, self.topology)
            .expect("fixture topology is valid")
    }
}
