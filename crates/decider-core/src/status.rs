#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of activating or updating a task.
///
/// `None` is an internal "not resolved yet" marker. Composites may observe it from a child but
/// must resolve it before returning to their own caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExecutionStatus {
    #[default]
    None,
    Running,
    Success,
    Failed,
}

impl ExecutionStatus {
    /// `true` for `Success` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, ExecutionStatus::Success | ExecutionStatus::Failed)
    }

    pub fn is_running(self) -> bool {
        self == ExecutionStatus::Running
    }

    /// Swap `Success` and `Failed`, leaving the other variants untouched.
    pub fn inverted(self) -> Self {
        match self {
            ExecutionStatus::Success => ExecutionStatus::Failed,
            ExecutionStatus::Failed => ExecutionStatus::Success,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(ExecutionStatus::Success.is_terminal());
        assert!(ExecutionStatus::Failed.is_terminal());
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(!ExecutionStatus::None.is_terminal());
    }

    #[test]
    fn inverted_keeps_non_terminal() {
        assert_eq!(ExecutionStatus::Success.inverted(), ExecutionStatus::Failed);
        assert_eq!(ExecutionStatus::Failed.inverted(), ExecutionStatus::Success);
        assert_eq!(ExecutionStatus::Running.inverted(), ExecutionStatus::Running);
        assert_eq!(ExecutionStatus::None.inverted(), ExecutionStatus::None);
    }
}
