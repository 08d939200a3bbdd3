use crate::{BbKey, Blackboard};

/// A task input that is either fixed at tree-build time or looked up on the blackboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskParameter<T: 'static> {
    Value(T),
    /// Read `key`, falling back to `default` when the blackboard has no entry.
    Blackboard { key: BbKey<T>, default: T },
}

impl<T: Clone + 'static> TaskParameter<T> {
    pub fn value(value: T) -> Self {
        TaskParameter::Value(value)
    }

    pub fn blackboard(key: BbKey<T>, default: T) -> Self {
        TaskParameter::Blackboard { key, default }
    }

    pub fn resolve(&self, blackboard: &Blackboard) -> T {
        match self {
            TaskParameter::Value(v) => v.clone(),
            TaskParameter::Blackboard { key, default } => blackboard
                .try_get(*key)
                .cloned()
                .unwrap_or_else(|| default.clone()),
        }
    }
}

impl<T: 'static> From<T> for TaskParameter<T> {
    fn from(value: T) -> Self {
        TaskParameter::Value(value)
    }
}
