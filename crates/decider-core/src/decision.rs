use std::any::Any;
use std::fmt;

/// Arbitration payload handed from a task's `decide` to its matching `activate`.
///
/// Each task type picks its own concrete shape; composites nest their children's payloads.
pub type DecisionData = Box<dyn Any>;

/// Priority reported by a task that does not want to run.
pub const IMPOSSIBLE: f32 = 0.0;

/// Priority reported by leaves that are always willing to run.
pub const WILLING: f32 = 1.0;

/// Whether a priority value means "willing to run". NaN is never possible.
pub fn is_possible(priority: f32) -> bool {
    priority > IMPOSSIBLE
}

/// Result of a task's arbitration pass.
pub struct Decision {
    pub priority: f32,
    pub data: Option<DecisionData>,
}

impl Decision {
    pub fn impossible() -> Self {
        Self {
            priority: IMPOSSIBLE,
            data: None,
        }
    }

    pub fn possible(priority: f32) -> Self {
        Self {
            priority,
            data: None,
        }
    }

    pub fn with_data<D: Any>(mut self, data: D) -> Self {
        self.data = Some(Box::new(data));
        self
    }

    pub fn is_possible(&self) -> bool {
        is_possible(self.priority)
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("priority", &self.priority)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}
