use thiserror::Error;

/// Configuration errors raised by the engine.
///
/// These indicate a broken tree or broken wiring, never an ordinary arbitration outcome. A node
/// that finds nothing to run reports `Failed` or an impossible decision instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("tree nesting exceeds capacity: level {level} >= max_task_levels {max}")]
    DepthExceeded { level: usize, max: usize },

    #[error("no task data at level {level} (task not active)")]
    MissingTaskData { level: usize },

    #[error("task data at level {level} is not a `{expected}`")]
    TaskDataTypeMismatch { level: usize, expected: &'static str },

    #[error("task `{task}` expected decision data of type `{expected}`")]
    InvalidDecisionData { task: String, expected: &'static str },

    #[error("task `{task}` has no active child")]
    NotActive { task: String },

    #[error("in task `{task}`: {source}")]
    InTask {
        task: String,
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Attach the name of the task the error surfaced in.
    ///
    /// Only the innermost task is recorded; errors that already carry a task name pass through.
    pub fn in_task(self, task: &str) -> Self {
        match self {
            EngineError::InTask { .. }
            | EngineError::InvalidDecisionData { .. }
            | EngineError::NotActive { .. } => self,
            other => EngineError::InTask {
                task: task.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Name of the task the error is attributed to, if any.
    pub fn task(&self) -> Option<&str> {
        match self {
            EngineError::InTask { task, .. }
            | EngineError::InvalidDecisionData { task, .. }
            | EngineError::NotActive { task } => Some(task),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_task_wraps_once() {
        let err = EngineError::DepthExceeded { level: 10, max: 10 }
            .in_task("leaf")
            .in_task("root");
        assert_eq!(err.task(), Some("leaf"));
        assert!(err.to_string().contains("level 10"));
    }
}
