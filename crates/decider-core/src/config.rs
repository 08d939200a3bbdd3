#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default depth capacity of an agent's task-data stack.
pub const DEFAULT_MAX_TASK_LEVELS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Number of task-data slots per agent, i.e. the deepest tree the engine can run.
    pub max_task_levels: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_task_levels: DEFAULT_MAX_TASK_LEVELS,
        }
    }
}
