//! Clock port.
//!
//! Every "now" and therefore every "today" goes through this port, so
//! day-boundary behavior can be tested without wall-clock time.

use crate::domain::foundation::Timestamp;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
