//! # Link Reset-and-Drain Recovery
//!
//! Surgically resets the port and link hardware behind one or more links
//! while keeping the port's configuration. Each link runs the whole
//! sequence under the device mutex; the mutex is released between links
//! so interrupts for the rest of the device are still serviced.
//!
//! ```text
//! unregister ─► quiesce ─► snapshot ─► stop ─► disarm ─► warm reset ─►
//! link reset ─► release ─► contain clear ─► RAM init ─► restore ─►
//! re-arm ─► register
//! ```
//!
//! A failed link does not stop the batch. Training is launched once the
//! batch is done.

use core::fmt;

use arrayvec::ArrayVec;
use log::{error, info, warn};
use static_assertions::const_assert;

use nvswitch_core::{
    with_timeout, Block, Error, LinkHandle, LinkId, LinkMask, LinkMode, LinkStateRequest,
    RegisterAddr, RequestMode, Result, SublinkMode, MAX_LINKS,
};

use crate::device::Device;

/// Registers one snapshot can hold
const SNAPSHOT_CAPACITY: usize = 80;

#[cfg(feature = "lr10")]
const_assert!(nvswitch_hal::lr10::SNAPSHOT_REGISTERS <= SNAPSHOT_CAPACITY);

/// Port configuration captured before the reset, in restore order
type Snapshot = heapless::Vec<(RegisterAddr, u32), SNAPSHOT_CAPACITY>;

// =============================================================================
// REPORT
// =============================================================================

/// Step of the per-link sequence that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    /// Link disabled or unknown to the link manager
    Validate,
    /// Link state could not be read
    Quiesce,
    /// Snapshot did not fit
    Snapshot,
    /// Link controller refused the reset request
    LinkReset,
    /// Contain-and-drain latch did not clear
    ContainClear,
    /// Tag pool RAM init did not complete
    RamInit,
    /// Link manager refused the link back
    Register,
}

impl RecoveryStep {
    /// Short name used in log lines
    pub const fn name(&self) -> &'static str {
        match self {
            RecoveryStep::Validate => "validate",
            RecoveryStep::Quiesce => "quiesce",
            RecoveryStep::Snapshot => "snapshot",
            RecoveryStep::LinkReset => "link reset",
            RecoveryStep::ContainClear => "contain clear",
            RecoveryStep::RamInit => "RAM init",
            RecoveryStep::Register => "register",
        }
    }
}

impl fmt::Display for RecoveryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one link's recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRecoveryOutcome {
    /// Link
    pub link: LinkId,
    /// Failing step and its error
    pub result: core::result::Result<(), (RecoveryStep, Error)>,
}

impl LinkRecoveryOutcome {
    /// Whether the link is back in service
    pub const fn is_recovered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-link results of a reset-and-drain call, in link order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    /// One entry per requested link
    pub outcomes: ArrayVec<LinkRecoveryOutcome, MAX_LINKS>,
    /// Training launch failure; the reset itself stands
    pub training: Option<Error>,
}

impl RecoveryReport {
    /// Links back in service
    pub fn recovered(&self) -> LinkMask {
        self.outcomes
            .iter()
            .filter(|o| o.is_recovered())
            .map(|o| o.link)
            .collect()
    }

    /// First link failure, if any
    pub fn first_failure(&self) -> Option<(LinkId, RecoveryStep, Error)> {
        self.outcomes.iter().find_map(|o| match o.result {
            Ok(()) => None,
            Err((step, error)) => Some((o.link, step, error)),
        })
    }
}

/// Reset-and-drain failed for at least one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryError {
    /// Argument error, or the first link failure
    pub error: Error,
    /// What happened to every link
    pub report: RecoveryReport,
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.report.first_failure() {
            Some((link, step, error)) => {
                write!(f, "link {} recovery failed at {}: {}", link, step, error)
            }
            None => write!(f, "recovery rejected: {}", self.error),
        }
    }
}

impl From<RecoveryError> for Error {
    fn from(err: RecoveryError) -> Self {
        err.error
    }
}

type StepResult<T> = core::result::Result<T, (RecoveryStep, Error)>;

trait AtStep<T> {
    fn at(self, step: RecoveryStep) -> StepResult<T>;
}

impl<T> AtStep<T> for Result<T> {
    fn at(self, step: RecoveryStep) -> StepResult<T> {
        self.map_err(|err| (step, err))
    }
}

// =============================================================================
// RESET AND DRAIN
// =============================================================================

impl Device<'_> {
    /// Reset every link in `links` and bring it back into service.
    ///
    /// Without `forced`, a link still up gets a bounded chance to go down
    /// on its own before it is shut down unilaterally. Links are handled
    /// one at a time; a failure is recorded and the next link proceeds.
    pub fn reset_and_drain(
        &self,
        links: LinkMask,
        forced: bool,
    ) -> core::result::Result<RecoveryReport, RecoveryError> {
        if links.is_empty() || !links.without(LinkMask::first_n(self.topology.num_links)).is_empty() {
            error!("nvswitch: reset-and-drain rejects link mask {:#x}", links.bits());
            return Err(RecoveryError {
                error: Error::BadArgs,
                report: RecoveryReport::default(),
            });
        }

        let mut report = RecoveryReport::default();
        for link in links {
            let result = self.recover_link(link, forced);
            match result {
                Ok(()) => info!("nvswitch: link {} reset and drained", link),
                Err((step, err)) => {
                    error!("nvswitch: link {} recovery failed at {}: {}", link, step, err)
                }
            }
            report.outcomes.push(LinkRecoveryOutcome { link, result });
        }

        if !report.recovered().is_empty() {
            if let Err(err) = self.platform.links.launch_training() {
                warn!("nvswitch: link training after recovery failed: {}", err);
                report.training = Some(err);
            }
        }

        match report.first_failure() {
            None => Ok(report),
            Some((_, _, error)) => Err(RecoveryError { error, report }),
        }
    }

    fn recover_link(&self, link: LinkId, forced: bool) -> StepResult<()> {
        if !self.topology.is_valid(link) {
            return Err((RecoveryStep::Validate, Error::BadArgs));
        }
        let links = self.platform.links;
        let handle = links.get_link(link).ok_or(Error::NotFound).at(RecoveryStep::Validate)?;

        let mut state = self.lock();
        links.unregister_link(handle);
        self.quiesce(handle, forced).at(RecoveryStep::Quiesce)?;
        let snapshot = self.snapshot(link).at(RecoveryStep::Snapshot)?;

        let nport = self.map.nport();
        self.io
            .modify32(Block::Nport, link, nport.ctrl_stop, 0, nport.stop_bits);
        self.clock().sleep_ms(self.config.drain_delay_ms);

        self.disarm_link(link);

        let npg = self.map.npg();
        let group = self.topology.npg_of(link);
        let port_bit = 1 << self.topology.nport_in_npg(link);
        let warm_reset = self.io.read32(Block::Npg, group, npg.warm_reset);
        self.io.write32(
            Block::Npg,
            group,
            npg.warm_reset,
            npg.warm_reset_mask & !port_bit,
        );
        self.reset_link(handle).at(RecoveryStep::LinkReset)?;
        self.io.write32(Block::Npg, group, npg.warm_reset, warm_reset);
        self.io
            .write32(Block::Npg, group, npg.debug_clear, port_bit & npg.debug_clear_mask);
        self.io.write32(Block::Npg, group, npg.debug_clear, 0);

        self.clear_contain(link).at(RecoveryStep::ContainClear)?;
        self.init_rams(link).at(RecoveryStep::RamInit)?;

        for &(addr, value) in &snapshot {
            self.io.write_reg(addr, link, value);
        }
        if !state.ganged_link_table.is_empty() {
            self.write_ganged_link_table(link, &state.ganged_link_table);
        }
        self.rearm_link(&state, link);

        if let Err(err) = links.register_link(handle) {
            links.destroy_link(handle);
            return Err((RecoveryStep::Register, err));
        }
        state.fatal_links.remove(link);
        self.clear_port_reset_required(link);
        Ok(())
    }

    /// Take the link down unless it already is
    fn quiesce(&self, handle: LinkHandle, forced: bool) -> Result<()> {
        let links = self.platform.links;
        if !forced {
            let timeout = self.config.link_down_timeout;
            let waited = with_timeout(self.clock(), timeout, self.config.poll_interval_ms, || {
                matches!(self.is_link_down(handle), Ok(true))
            });
            if waited.is_err() {
                warn!(
                    "nvswitch: link {} still up after {:?}, shutting down",
                    handle.link, timeout
                );
            }
        }

        if !self.is_link_down(handle)? {
            links.shutdown_unilateral(handle);
            links.clear_link_state(handle);
        }
        Ok(())
    }

    fn is_link_down(&self, handle: LinkHandle) -> Result<bool> {
        let links = self.platform.links;
        Ok(match links.link_mode(handle)? {
            LinkMode::Off | LinkMode::Reset => true,
            LinkMode::Safe => links.sublink_modes(handle)? == (SublinkMode::Off, SublinkMode::Off),
            LinkMode::Active | LinkMode::Unknown => false,
        })
    }

    fn snapshot(&self, link: LinkId) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();
        for &addr in self.map.snapshot_registers() {
            let value = self.io.read_reg(addr, link);
            snapshot.push((addr, value)).map_err(|_| Error::NoMemory)?;
        }
        Ok(snapshot)
    }

    /// Drive the link controller's reset handshake, retrying refusals
    fn reset_link(&self, handle: LinkHandle) -> Result<()> {
        let attempts = self.config.minion_reset_retries;
        let mut last = Error::LinkManager;
        for attempt in 1..=attempts {
            match self
                .platform
                .links
                .request_link_state(handle, LinkStateRequest::Reset, RequestMode::Sync)
            {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(
                        "nvswitch: link {} reset attempt {}/{} failed: {}",
                        handle.link, attempt, attempts, err
                    );
                    last = err;
                }
            }
        }
        Err(last)
    }

    fn clear_contain(&self, link: LinkId) -> Result<()> {
        let nport = self.map.nport();
        self.io
            .write32(Block::Nport, link, nport.contain_and_drain, nport.contain_clear);
        if self.io.read32(Block::Nport, link, nport.contain_and_drain) & nport.contain_clear != 0 {
            return Err(Error::InvalidState);
        }
        Ok(())
    }

    /// Hardware-init the tag pool, then zero the crumbstore and CAM
    fn init_rams(&self, link: LinkId) -> Result<()> {
        let nport = self.map.nport();
        self.io
            .write32(Block::Nport, link, nport.initialization, nport.tagpool_init);
        with_timeout(
            self.clock(),
            self.config.tagpool_init_timeout,
            self.config.poll_interval_ms,
            || self.io.read32(Block::Nport, link, nport.initialization) & nport.tagpool_init != 0,
        )
        .map_err(|_| Error::InitializationFailure)?;

        let [data0, data1, data2] = nport.ram_data;

        self.io.write32(
            Block::Tstate,
            link,
            nport.ram_address,
            nport.ram_select_crumbstore | nport.ram_auto_incr,
        );
        self.io.write32(Block::Tstate, link, data1, 0);
        for _ in 0..=nport.crumbstore_depth {
            self.io
                .write32(Block::Tstate, link, data0, nport.crumbstore_zero_data0);
        }

        self.io.write32(
            Block::Tstate,
            link,
            nport.ram_address,
            nport.ram_select_cam | nport.ram_auto_incr,
        );
        self.io.write32(Block::Tstate, link, data1, 0);
        self.io.write32(Block::Tstate, link, data2, 0);
        for _ in 0..=nport.cam_depth {
            self.io.write32(Block::Tstate, link, data0, 0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Behavior, Fixture};
    use nvswitch_core::Clock;
    use nvswitch_hal::lr10::regs::{
        egress, err, ingress, minion, npg, nport, route, sourcetrack, tstate,
    };
    use nvswitch_hal::lr10::Lr10;
    use nvswitch_hal::{ErrorUnit, RegisterMap};

    fn data0_writes(fx: &Fixture, link: LinkId) -> usize {
        fx.regs.writes_to(Block::Tstate, link, tstate::RAM_DATA0).len()
    }

    #[test]
    fn test_round_trip_restores_configuration() {
        let fx = Fixture::new();
        fx.regs.set(Block::Route, 3, route::ROUTE_CONTROL, 0xabc);
        fx.regs.set(Block::Egress, 3, egress::CTO_TIMER_LIMIT, 0x1234);
        let dev = fx.device();
        dev.set_fatal_error(false, Some(3)).expect("valid link");

        let report = dev.reset_and_drain(LinkMask::single(3), true).expect("recovers");
        assert_eq!(report.recovered(), LinkMask::single(3));
        assert_eq!(report.training, None);

        assert_eq!(fx.regs.writes_to(Block::Route, 3, route::ROUTE_CONTROL), [0xabc]);
        assert_eq!(fx.regs.get(Block::Egress, 3, egress::CTO_TIMER_LIMIT), 0x1234);
        assert!(!dev.link_fault_state(3).expect("in range").fatal_occurred);
        assert!(dev.fatal_error_scope().port.is_empty());
        assert!(fx.links.registered().contains(3));
        assert_eq!(fx.links.unregistered(), [3]);
        assert_eq!(fx.links.training_calls(), 1);

        let layout = Lr10.nport();
        assert_eq!(
            data0_writes(&fx, 3),
            (layout.crumbstore_depth + 1 + layout.cam_depth + 1) as usize
        );
        assert_eq!(
            fx.regs.get(Block::Nport, 3, nport::ERR_CONTROL_COMMON_NPORT),
            layout.common_enable_bits
        );
        let stall_en = fx.regs.get(Block::Minion, 0, minion::MINION_INTR_STALL_EN);
        assert_ne!(stall_en & (1 << (minion::INTR_LINK_SHIFT + 3)), 0);
    }

    #[test]
    fn test_error_controls_survive_reset() {
        let fx = Fixture::new();
        let dev = fx.device();
        dev.init_interrupts();
        fx.regs.clear_log();

        // non-default settings made after init, plus a suppressed report enable
        let kept = [
            (Block::Route, err::CONTAIN_EN_0, 0x1),
            (Block::Route, err::LOG_EN_0, 0x5),
            (Block::Route, route::NVS_ECC_ERROR_COUNTER_LIMIT, 0x77),
            (Block::Ingress, ingress::RIDTAB_ECC_ERROR_COUNTER_LIMIT, 0x21),
            (Block::Egress, err::ECC_CTRL, 0x3),
            (Block::Tstate, tstate::TAGPOOL_ECC_ERROR_COUNTER_LIMIT, 0x12),
            (Block::Sourcetrack, err::CONTAIN_EN_0, 0x0),
            (Block::Sourcetrack, sourcetrack::TCEN1_CRUMBSTORE_ECC_ERROR_COUNTER_LIMIT, 0x9),
            (Block::Nport, nport::portstat_limit_high(7), 0x42),
        ];
        for (block, offset, value) in kept {
            fx.regs.set(block, 3, offset, value);
        }
        fx.regs.set(Block::Route, 3, err::FATAL_REPORT_EN_0, 0);

        dev.reset_and_drain(LinkMask::single(3), true).expect("recovers");

        for (block, offset, value) in kept {
            assert_eq!(fx.regs.writes_to(block, 3, offset), [value], "{} {:#x}", block, offset);
            assert_eq!(fx.regs.get(block, 3, offset), value, "{} {:#x}", block, offset);
        }
        assert_eq!(
            fx.regs.get(Block::Route, 3, err::FATAL_REPORT_EN_0),
            Lr10.unit(ErrorUnit::Route).default_fatal
        );
    }

    #[test]
    fn test_port_sequence_order() {
        let fx = Fixture::new();
        // link 6 is NPORT 2 of NPG 1
        fx.regs.set(Block::Npg, 1, npg::WARMRESET, npg::NPORT_MASK);
        let dev = fx.device();
        dev.reset_and_drain(LinkMask::single(6), true).expect("recovers");

        assert_eq!(
            fx.regs.writes_to(Block::Npg, 1, npg::WARMRESET),
            [npg::NPORT_MASK & !0b100, npg::NPORT_MASK]
        );
        assert_eq!(fx.regs.writes_to(Block::Npg, 1, npg::DEBUG_CLEAR), [0b100, 0]);

        let common = fx.regs.writes_to(Block::Nport, 6, nport::ERR_CONTROL_COMMON_NPORT);
        assert_eq!(common.first(), Some(&0));
        assert_ne!(common.last(), Some(&0));

        let stop = fx.regs.position(Block::Nport, 6, nport::CTRL_STOP);
        let disarm = fx.regs.position(Block::Nport, 6, nport::ERR_CONTROL_COMMON_NPORT);
        let reset = fx.regs.position(Block::Npg, 1, npg::WARMRESET);
        let contain = fx.regs.position(Block::Nport, 6, nport::CONTAIN_AND_DRAIN);
        let ram = fx.regs.position(Block::Tstate, 6, tstate::RAM_ADDRESS);
        let restore = fx.regs.position(Block::Nport, 6, nport::CTRL);
        assert!(stop < disarm && disarm < reset && reset < contain);
        assert!(contain < ram && ram < restore);
    }

    #[test]
    fn test_failed_link_does_not_stop_batch() {
        let fx = Fixture::new();
        fx.regs.set(
            Block::Nport,
            2,
            nport::CONTAIN_AND_DRAIN,
            nport::CONTAIN_AND_DRAIN_CLEAR,
        );
        fx.regs
            .override_behavior(Block::Nport, 2, nport::CONTAIN_AND_DRAIN, Behavior::Sticky);
        let dev = fx.device();

        let err = dev
            .reset_and_drain(LinkMask::from_bits(0b1100), true)
            .expect_err("link 2 fails");
        assert_eq!(err.error, Error::InvalidState);
        assert_eq!(
            err.report.outcomes[0].result,
            Err((RecoveryStep::ContainClear, Error::InvalidState))
        );
        assert!(err.report.outcomes[1].is_recovered());
        assert_eq!(err.report.recovered(), LinkMask::single(3));
        assert!(!fx.links.registered().contains(2));
        assert!(fx.links.registered().contains(3));
        assert_eq!(fx.links.training_calls(), 1);
        assert_eq!(Error::from(err), Error::InvalidState);
    }

    #[test]
    fn test_tagpool_init_timeout() {
        let fx = Fixture::new();
        fx.regs
            .override_behavior(Block::Nport, 0, nport::INITIALIZATION, Behavior::Sticky);
        let dev = fx.device();

        let err = dev
            .reset_and_drain(LinkMask::single(0), true)
            .expect_err("init never completes");
        assert_eq!(
            err.report.outcomes[0].result,
            Err((RecoveryStep::RamInit, Error::InitializationFailure))
        );
        assert!(fx.clock.now_ns() >= 25_000_000);
        assert_eq!(data0_writes(&fx, 0), 0);
        assert_eq!(fx.links.training_calls(), 0);
    }

    #[test]
    fn test_register_failure_destroys_link() {
        let fx = Fixture::new();
        fx.links.fail_register(4);
        let dev = fx.device();
        dev.set_fatal_error(false, Some(4)).expect("valid link");

        let err = dev
            .reset_and_drain(LinkMask::single(4), true)
            .expect_err("registration refused");
        assert_eq!(
            err.report.outcomes[0].result,
            Err((RecoveryStep::Register, Error::LinkManager))
        );
        assert_eq!(fx.links.destroyed(), [4]);
        assert!(dev.link_fault_state(4).expect("in range").fatal_occurred);
        assert_eq!(dev.fatal_error_scope().port, LinkMask::single(4));
    }

    #[test]
    fn test_link_reset_retried() {
        let fx = Fixture::new();
        fx.links.fail_reset(5, 2);
        let dev = fx.device();
        assert!(dev.reset_and_drain(LinkMask::single(5), true).is_ok());
        assert_eq!(fx.links.reset_requests(), [5, 5, 5]);
    }

    #[test]
    fn test_link_reset_retries_exhausted() {
        let fx = Fixture::new();
        fx.links.fail_reset(5, 3);
        let dev = fx.device();
        let err = dev
            .reset_and_drain(LinkMask::single(5), true)
            .expect_err("reset refused");
        assert_eq!(
            err.report.outcomes[0].result,
            Err((RecoveryStep::LinkReset, Error::LinkManager))
        );
        assert_eq!(fx.links.reset_requests().len(), 3);
        assert!(fx.regs.writes_to(Block::Npg, 1, npg::DEBUG_CLEAR).is_empty());
    }

    #[test]
    fn test_training_failure_keeps_reset() {
        let fx = Fixture::new();
        fx.links.fail_training();
        let dev = fx.device();
        let report = dev
            .reset_and_drain(LinkMask::single(1), true)
            .expect("reset stands");
        assert_eq!(report.training, Some(Error::LinkManager));
        assert!(fx.links.registered().contains(1));
    }

    #[test]
    fn test_invalid_link_skipped() {
        let fx = Fixture::with_links(LinkMask::from_bits(0b0011));
        let dev = fx.device();
        let err = dev
            .reset_and_drain(LinkMask::from_bits(0b0110), true)
            .expect_err("link 2 disabled");
        assert_eq!(
            err.report.outcomes[1].result,
            Err((RecoveryStep::Validate, Error::BadArgs))
        );
        assert_eq!(err.report.recovered(), LinkMask::single(1));
        assert!(fx.regs.writes_to(Block::Nport, 2, nport::CTRL_STOP).is_empty());
    }

    #[test]
    fn test_bad_mask_rejected() {
        let fx = Fixture::new();
        let dev = fx.device();
        let err = dev.reset_and_drain(LinkMask::EMPTY, true).expect_err("empty");
        assert_eq!(err.error, Error::BadArgs);
        let err = dev
            .reset_and_drain(LinkMask::single(40), true)
            .expect_err("out of range");
        assert_eq!(err.error, Error::BadArgs);
        assert!(err.report.outcomes.is_empty());
        assert!(fx.regs.writes().is_empty());
        assert!(fx.links.unregistered().is_empty());
    }

    #[test]
    fn test_unforced_waits_then_shuts_down() {
        let fx = Fixture::new();
        let dev = fx.device();
        dev.reset_and_drain(LinkMask::single(7), false).expect("recovers");
        assert_eq!(fx.links.shutdowns(), [7]);
        assert_eq!(fx.links.cleared(), [7]);
        assert!(fx.clock.now_ns() >= 10_000_000);
    }

    #[test]
    fn test_forced_shuts_down_immediately() {
        let fx = Fixture::new();
        let dev = fx.device();
        dev.reset_and_drain(LinkMask::single(7), true).expect("recovers");
        assert_eq!(fx.links.shutdowns(), [7]);
        // only the drain delay
        assert_eq!(fx.clock.now_ns(), 1_000_000);
    }

    #[test]
    fn test_link_already_down_left_alone() {
        let fx = Fixture::new();
        fx.links.set_mode(8, LinkMode::Safe);
        fx.links.set_sublinks(8, SublinkMode::Off, SublinkMode::Off);
        let dev = fx.device();
        dev.reset_and_drain(LinkMask::single(8), false).expect("recovers");
        assert!(fx.links.shutdowns().is_empty());
        assert_eq!(fx.clock.now_ns(), 1_000_000);
    }

    #[test]
    fn test_unreadable_link_mode_fails_quiesce() {
        let fx = Fixture::new();
        fx.links.fail_mode(9);
        let dev = fx.device();
        let err = dev
            .reset_and_drain(LinkMask::single(9), true)
            .expect_err("mode unreadable");
        assert_eq!(
            err.report.outcomes[0].result,
            Err((RecoveryStep::Quiesce, Error::LinkManager))
        );
        assert_eq!(fx.links.unregistered(), [9]);
    }

    #[test]
    fn test_ganged_table_reseeded() {
        let fx = Fixture::new();
        let dev = fx.device();
        dev.set_ganged_link_table(&[0x5]).expect("table fits");
        fx.regs.clear_log();

        dev.reset_and_drain(LinkMask::single(1), true).expect("recovers");
        assert_eq!(fx.regs.writes_to(Block::Route, 1, route::REG_TABLE_DATA0), [0x5, 0x0]);
        assert!(fx.regs.writes_to(Block::Route, 0, route::REG_TABLE_DATA0).is_empty());
    }
}
