//! Outcome of servicing one node of the interrupt tree.

use core::fmt;

/// Result of a handler invocation.
///
/// Parents aggregate the statuses of their children: any
/// `MoreProcessingRequired` wins, then any `Success`, and only a
/// node whose every child found nothing reports `NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceStatus {
    /// Nothing pending at this node
    #[default]
    NotFound,
    /// Every pending bit was classified and cleared
    Success,
    /// Pending bits remain latched
    MoreProcessingRequired,
}

impl ServiceStatus {
    /// Combine two sibling outcomes
    #[must_use]
    pub const fn combine(self, other: ServiceStatus) -> ServiceStatus {
        match (self, other) {
            (ServiceStatus::MoreProcessingRequired, _) | (_, ServiceStatus::MoreProcessingRequired) => {
                ServiceStatus::MoreProcessingRequired
            }
            (ServiceStatus::Success, _) | (_, ServiceStatus::Success) => ServiceStatus::Success,
            _ => ServiceStatus::NotFound,
        }
    }

    /// Aggregate any number of child outcomes
    pub fn aggregate<I: IntoIterator<Item = ServiceStatus>>(children: I) -> ServiceStatus {
        children
            .into_iter()
            .fold(ServiceStatus::NotFound, ServiceStatus::combine)
    }

    /// Status for a node that walked its pending bits, given what is left
    pub const fn from_unhandled(unhandled: u32) -> ServiceStatus {
        if unhandled == 0 {
            ServiceStatus::Success
        } else {
            ServiceStatus::MoreProcessingRequired
        }
    }

    /// Whether the node fully serviced what it found
    pub const fn is_success(&self) -> bool {
        matches!(self, ServiceStatus::Success)
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::NotFound => write!(f, "not-found"),
            ServiceStatus::Success => write!(f, "success"),
            ServiceStatus::MoreProcessingRequired => write!(f, "more-processing-required"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_empty_is_not_found() {
        assert_eq!(ServiceStatus::aggregate([]), ServiceStatus::NotFound);
    }

    #[test]
    fn test_aggregate_precedence() {
        use ServiceStatus::*;
        assert_eq!(ServiceStatus::aggregate([NotFound, NotFound]), NotFound);
        assert_eq!(ServiceStatus::aggregate([NotFound, Success]), Success);
        assert_eq!(
            ServiceStatus::aggregate([Success, MoreProcessingRequired, NotFound]),
            MoreProcessingRequired
        );
    }

    #[test]
    fn test_from_unhandled() {
        assert_eq!(ServiceStatus::from_unhandled(0), ServiceStatus::Success);
        assert_eq!(
            ServiceStatus::from_unhandled(0x10),
            ServiceStatus::MoreProcessingRequired
        );
    }
}
