//! # Error Handling
//!
//! Error type shared by every NVSwitch crate.
//!
//! Interrupt servicing does not use this type for its outcome: a handler
//! that found nothing is not an error, see [`crate::ServiceStatus`].
//! `Error` covers configuration, collaborator and recovery failures.

use core::fmt;

// =============================================================================
// RESULT TYPE
// =============================================================================

/// NVSwitch Result type alias
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// NVSwitch unified error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Generic Errors
    // =========================================================================
    /// Invalid argument (empty link mask, link out of range)
    BadArgs,
    /// Requested object does not exist
    NotFound,
    /// Work remains that the caller must retry
    MoreProcessingRequired,
    /// A bounded wait expired
    Timeout,
    /// Bounded storage exhausted
    NoMemory,

    // =========================================================================
    // Hardware Errors
    // =========================================================================
    /// Hardware did not reach the expected state
    InvalidState,
    /// Hardware RAM initialization did not complete
    InitializationFailure,
    /// Register access failed
    Io,

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    /// The link manager refused a request
    LinkManager,
    /// The persistent error log rejected an entry
    PersistentLog,
    /// The event notifier could not deliver a notification
    Notification,
}

impl Error {
    /// Whether retrying the same operation can succeed
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::MoreProcessingRequired | Error::Timeout | Error::LinkManager
        )
    }

    /// Short, stable name used in log lines
    pub const fn name(&self) -> &'static str {
        match self {
            Error::BadArgs => "BAD_ARGS",
            Error::NotFound => "NOT_FOUND",
            Error::MoreProcessingRequired => "MORE_PROCESSING_REQUIRED",
            Error::Timeout => "TIMEOUT",
            Error::NoMemory => "NO_MEMORY",
            Error::InvalidState => "INVALID_STATE",
            Error::InitializationFailure => "INITIALIZATION_FAILURE",
            Error::Io => "IO",
            Error::LinkManager => "LINK_MANAGER",
            Error::PersistentLog => "PERSISTENT_LOG",
            Error::Notification => "NOTIFICATION",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadArgs => write!(f, "invalid argument"),
            Error::NotFound => write!(f, "not found"),
            Error::MoreProcessingRequired => write!(f, "more processing required"),
            Error::Timeout => write!(f, "operation timed out"),
            Error::NoMemory => write!(f, "bounded storage exhausted"),
            Error::InvalidState => write!(f, "hardware in unexpected state"),
            Error::InitializationFailure => write!(f, "hardware initialization failed"),
            Error::Io => write!(f, "register access failed"),
            Error::LinkManager => write!(f, "link manager request failed"),
            Error::PersistentLog => write!(f, "persistent log write failed"),
            Error::Notification => write!(f, "event notification failed"),
        }
    }
}
