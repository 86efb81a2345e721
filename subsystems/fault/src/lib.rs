//! # NVSwitch Fault Subsystem
//!
//! Interrupt servicing, fault bookkeeping and per-link recovery for an
//! NVSwitch device.
//!
//! ## Interrupt Tree
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  PSMC legacy pending                                                 │
//! │   ├── SAW ──┬── fatal ─────┬── NPG[i] ── NPORT route/ingress/...     │
//! │   │         │              ├── NXBAR[i] ── tile / tile-out           │
//! │   │         │              └── NVLIPT[i] ── minion, DL, TLC, IPT     │
//! │   │         ├── non-fatal ─┬── NPG[i]                                │
//! │   │         │              └── NVLIPT[i]                             │
//! │   │         ├── correctable                                          │
//! │   │         └── legacy                                               │
//! │   ├── PRIV ring ── SYS / FBP stations, ring acknowledge              │
//! │   └── PBUS ── PRI squash / FECS error / timeout                      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Leaves are error units walked by one generic handler over the rule
//! tables of the device's [`RegisterMap`](nvswitch_hal::RegisterMap).
//! Every node reports a [`ServiceStatus`](nvswitch_core::ServiceStatus);
//! bits nobody classified are dumped and surface as
//! `MoreProcessingRequired`.
//!
//! ## Fault State
//!
//! The first fatal error on a link marks it faulted, persists the
//! port-reset flag in hardware scratch and raises a port-down event.
//! While faulted, every pass removes the observed bits from the report
//! enables. Only [`Device::reset_and_drain`] brings the link back.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod config;
pub mod device;
pub mod recovery;
pub mod state;

mod dispatch;
mod fault;
mod handler;
mod host;
mod intr;
mod minion;
mod npg;
mod nvlink;
mod nxbar;
mod report;

#[cfg(test)]
mod testing;

pub use config::{DeviceTopology, FaultConfig};
pub use device::{Device, Platform};
pub use recovery::{LinkRecoveryOutcome, RecoveryError, RecoveryReport, RecoveryStep};
pub use state::{DeviceFaultState, FatalErrorScope, InterruptMasks, LinkFaultState};
