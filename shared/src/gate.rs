//! Location permission gate.
//!
//! The shell asks the OS and reports a single boolean; the gate turns it into
//! the outcome the state machine acts on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionOutcome {
    ProceedToFetch,
    Denied,
}

impl PermissionOutcome {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::ProceedToFetch)
    }
}

#[must_use]
pub const fn evaluate_permission(granted: bool) -> PermissionOutcome {
    if granted {
        PermissionOutcome::ProceedToFetch
    } else {
        PermissionOutcome::Denied
    }
}
