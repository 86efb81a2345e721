//! # NVSwitch Core
//!
//! Shared vocabulary for the NVSwitch fault-management stack. Nothing in
//! this crate touches hardware; it defines the types every other crate
//! speaks in.
//!
//! ## Components
//!
//! - **Error**: the crate-wide error enum and `Result` alias
//! - **ServiceStatus**: the three-valued outcome of servicing an interrupt
//! - **Types**: link identifiers, link masks and register block identifiers
//! - **Taxonomy**: error codes, severities and per-bit classification rules
//! - **Diagnostic**: error events and their captured payloads
//! - **Traits**: the collaborators the fault core calls out to
//! - **Timeout**: deadline tracking and bounded polling

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

extern crate alloc;

pub mod diagnostic;
pub mod error;
pub mod status;
pub mod taxonomy;
pub mod timeout;
pub mod traits;
pub mod types;

pub use diagnostic::{Diagnostic, EccEvent, ErrorEvent, NvlinkErrorKind, NvlinkEvent, RawCapture};
pub use error::{Error, Result};
pub use status::ServiceStatus;
pub use taxonomy::{BitRule, DiagnosticKind, EccAddress, EccRule, ErrorCode, FaultScope, Severity};
pub use timeout::{with_timeout, Timeout};
pub use traits::{
    Clock, DeviceEvent, EventNotifier, LinkHandle, LinkManager, LinkMode, LinkStateRequest,
    PersistentLog, RequestMode, SublinkMode,
};
pub use types::{Block, LinkId, LinkMask, RegisterAddr, MAX_LINKS};
