//! # Collaborator Traits
//!
//! The fault core never owns links, logs or time. It calls out through
//! these traits; implementations use interior mutability since the core
//! only holds shared references.

use core::fmt;

use crate::diagnostic::{EccEvent, NvlinkEvent};
use crate::error::Result;
use crate::types::LinkId;

// =============================================================================
// LINK MANAGER
// =============================================================================

/// Registration handle for one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkHandle {
    /// Link the handle refers to
    pub link: LinkId,
}

/// Link state as seen by the link manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Powered off
    Off,
    /// Held in reset
    Reset,
    /// Trained to safe mode
    Safe,
    /// High-speed traffic
    Active,
    /// Transitioning or unreadable
    Unknown,
}

/// Sublink state as seen by the link manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SublinkMode {
    /// Sublink off
    Off,
    /// Safe mode
    Safe,
    /// High-speed mode
    HighSpeed,
    /// Unreadable
    Unknown,
}

/// Link state the core can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStateRequest {
    /// Put the link into reset through the link controller
    Reset,
}

/// How a link state request completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Return once the request completed
    Sync,
    /// Return once the request was issued
    Async,
}

/// Link registration and state control
pub trait LinkManager: Sync {
    /// Look up the registration of `link`
    fn get_link(&self, link: LinkId) -> Option<LinkHandle>;
    /// Whether the link is currently held in reset; its registers must
    /// not be touched
    fn is_link_in_reset(&self, handle: LinkHandle) -> bool;
    /// Remove a link from the registry
    fn unregister_link(&self, handle: LinkHandle);
    /// Add a link back to the registry
    fn register_link(&self, handle: LinkHandle) -> Result<()>;
    /// Release a link that could not be re-registered
    fn destroy_link(&self, handle: LinkHandle);
    /// Drive a link state change through the link controller
    fn request_link_state(
        &self,
        handle: LinkHandle,
        state: LinkStateRequest,
        mode: RequestMode,
    ) -> Result<()>;
    /// Current link mode
    fn link_mode(&self, handle: LinkHandle) -> Result<LinkMode>;
    /// Current transmit and receive sublink modes
    fn sublink_modes(&self, handle: LinkHandle) -> Result<(SublinkMode, SublinkMode)>;
    /// Take the link down without peer handshake
    fn shutdown_unilateral(&self, handle: LinkHandle);
    /// Forget cached link state after a shutdown
    fn clear_link_state(&self, handle: LinkHandle);
    /// Start training every registered link
    fn launch_training(&self) -> Result<()>;
}

// =============================================================================
// PERSISTENT LOG
// =============================================================================

/// Append-only error log that survives driver reload
pub trait PersistentLog: Sync {
    /// Record an ECC error
    fn log_ecc(&self, event: &EccEvent) -> Result<()>;
    /// Record an NVLink fault
    fn log_nvlink(&self, event: &NvlinkEvent) -> Result<()>;
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Asynchronous notification raised toward the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    /// A link went down on a fatal error
    PortDown(LinkId),
    /// The device needs a reset
    DeviceDown,
}

impl fmt::Display for DeviceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceEvent::PortDown(link) => write!(f, "port-down link {}", link),
            DeviceEvent::DeviceDown => write!(f, "device-down"),
        }
    }
}

/// Host event channel
pub trait EventNotifier: Sync {
    /// Deliver `event`
    fn notify(&self, event: DeviceEvent) -> Result<()>;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Platform time source
pub trait Clock: Sync {
    /// Monotonic time in nanoseconds
    fn now_ns(&self) -> u64;
    /// Block for `ms` milliseconds
    fn sleep_ms(&self, ms: u32);
}
