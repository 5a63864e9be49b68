//! Lifecycle state reported by a supervisor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalised service status.
///
/// `Unknown` means the supervisor answered but not in a recognisable way; it
/// is never substituted for an error reaching the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Running,
    Stopped,
    Unknown,
}

impl Status {
    /// Whether the supervisor has committed to a state.
    pub fn is_settled(self) -> bool {
        !matches!(self, Status::Unknown)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Running => "running",
            Status::Stopped => "stopped",
            Status::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Status::Running.to_string(), "running");
        assert_eq!(Status::Stopped.to_string(), "stopped");
        assert_eq!(Status::Unknown.to_string(), "unknown");
    }

    #[test]
    fn only_unknown_is_unsettled() {
        assert!(Status::Running.is_settled());
        assert!(Status::Stopped.is_settled());
        assert!(!Status::Unknown.is_settled());
    }
}
