//! # NVSwitch Hardware Abstraction Layer
//!
//! Register access and the per-generation register maps that keep bit
//! layouts out of the fault-handling logic.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    nvswitch-fault (logic)                   │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │      RegisterMap (layout)    │     RegisterIo (access)      │
//! ├──────────────────────────────┼──────────────────────────────┤
//! │  lr10: offsets, bits, rules  │  MmioDevice: volatile BAR0   │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! A generation supplies one [`RegisterMap`]; the fault subsystem only
//! ever asks the map where things are and what each bit means.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod io;
pub mod regmap;

#[cfg(feature = "lr10")]
pub mod lr10;

pub use io::{BlockWindow, MmioDevice, RegisterIo};
pub use regmap::{
    CaptureLayout, ErrorUnit, HostLayout, MinionLayout, MinionLinkClass, MinionLinkCode,
    NpgLayout, NportLayout, NvlinkLayout, NxbarLayout, RegisterMap, TopLayout, UnitLayout,
};
