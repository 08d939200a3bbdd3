use std::any::{type_name, Any};
use std::fmt;

use crate::{
    Blackboard, EngineConfig, EngineError, ExecutionStatus, Result, TickContext,
};

/// Type-erased per-node working state stored in one stack slot.
pub type TaskData = Box<dyn Any>;

type ActiveTasksObserver = Box<dyn FnMut(&AgentData)>;

/// Everything a single agent mutates while running a tree.
///
/// The task-data stack has one slot per tree depth ("decider level"). Composites move the cursor
/// down before calling into a child and back up afterwards, so each task sees its own slot as
/// the current one.
pub struct AgentData {
    pub blackboard: Blackboard,
    task_data: Vec<Option<TaskData>>,
    current_level: usize,
    execution_status: ExecutionStatus,
    active_tasks_changed: bool,
    observers: Vec<ActiveTasksObserver>,
    tick: TickContext,
}

impl AgentData {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            blackboard: Blackboard::new(),
            task_data: (0..config.max_task_levels).map(|_| None).collect(),
            current_level: 0,
            execution_status: ExecutionStatus::None,
            active_tasks_changed: false,
            observers: Vec::new(),
            tick: TickContext::default(),
        }
    }

    pub fn max_task_levels(&self) -> usize {
        self.task_data.len()
    }

    pub fn current_decider_level(&self) -> usize {
        self.current_level
    }

    /// Move the cursor to the child level.
    pub fn descend(&mut self) {
        self.current_level += 1;
    }

    /// Move the cursor back to the parent level.
    pub fn ascend(&mut self) {
        debug_assert!(self.current_level > 0, "ascend above the root level");
        self.current_level = self.current_level.saturating_sub(1);
    }

    pub fn execution_status(&self) -> ExecutionStatus {
        self.execution_status
    }

    pub fn set_execution_status(&mut self, status: ExecutionStatus) {
        self.execution_status = status;
    }

    pub fn tick(&self) -> TickContext {
        self.tick
    }

    pub fn active_tasks_changed(&self) -> bool {
        self.active_tasks_changed
    }

    /// Register an observer that runs from `post_update` when the active task set changed.
    pub fn on_active_tasks_changed(&mut self, observer: impl FnMut(&AgentData) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Slot at the cursor, or `None` when empty or out of range.
    pub fn current_task_data(&self) -> Option<&dyn Any> {
        self.task_data
            .get(self.current_level)
            .and_then(|slot| slot.as_deref())
    }

    /// Overwrite the slot at the cursor.
    ///
    /// Any write that leaves the slot different from before raises the dirty flag. A freshly
    /// boxed value always counts as different from what it replaces.
    pub fn set_current_task_data(&mut self, data: Option<TaskData>) -> Result<()> {
        let level = self.current_level;
        let max = self.task_data.len();
        let slot = self
            .task_data
            .get_mut(level)
            .ok_or(EngineError::DepthExceeded { level, max })?;

        if slot.is_some() || data.is_some() {
            self.active_tasks_changed = true;
        }
        *slot = data;
        Ok(())
    }

    /// Store `value` as the current task's fresh working data.
    pub fn init_task_data<T: Any>(&mut self, value: T) -> Result<()> {
        self.set_current_task_data(Some(Box::new(value)))
    }

    pub fn clear_current_task_data(&mut self) -> Result<()> {
        self.set_current_task_data(None)
    }

    pub fn task_data<T: Any>(&self) -> Result<&T> {
        let level = self.current_level;
        let slot = self.slot(level)?;
        let data = slot.ok_or(EngineError::MissingTaskData { level })?;
        data.downcast_ref::<T>()
            .ok_or(EngineError::TaskDataTypeMismatch {
                level,
                expected: type_name::<T>(),
            })
    }

    pub fn task_data_mut<T: Any>(&mut self) -> Result<&mut T> {
        let level = self.current_level;
        let max = self.task_data.len();
        let slot = self
            .task_data
            .get_mut(level)
            .ok_or(EngineError::DepthExceeded { level, max })?;
        let data = slot
            .as_deref_mut()
            .ok_or(EngineError::MissingTaskData { level })?;
        data.downcast_mut::<T>()
            .ok_or(EngineError::TaskDataTypeMismatch {
                level,
                expected: type_name::<T>(),
            })
    }

    /// Whether a task at `level` currently holds data, i.e. is active.
    pub fn has_task_data_at(&self, level: usize) -> bool {
        matches!(self.task_data.get(level), Some(Some(_)))
    }

    /// Read-only access to any level, for introspection.
    pub fn task_data_at<T: Any>(&self, level: usize) -> Option<&T> {
        self.task_data
            .get(level)
            .and_then(|slot| slot.as_deref())
            .and_then(|data| data.downcast_ref::<T>())
    }

    /// Start a tick: record its context and clear the dirty flag.
    pub fn pre_update(&mut self, ctx: TickContext) {
        self.tick = ctx;
        self.active_tasks_changed = false;
    }

    /// Finish a tick: notify observers once if the active task set changed.
    pub fn post_update(&mut self) {
        if !self.active_tasks_changed {
            return;
        }

        tracing::trace!(
            tick = self.tick.tick,
            observers = self.observers.len(),
            "active tasks changed"
        );

        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer(&*self);
        }
        // Observers registered from inside a callback land after the existing ones.
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    fn slot(&self, level: usize) -> Result<Option<&dyn Any>> {
        self.task_data
            .get(level)
            .map(|slot| slot.as_deref())
            .ok_or(EngineError::DepthExceeded {
                level,
                max: self.task_data.len(),
            })
    }
}

impl Default for AgentData {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AgentData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied: Vec<usize> = (0..self.task_data.len())
            .filter(|&level| self.has_task_data_at(level))
            .collect();
        f.debug_struct("AgentData")
            .field("current_level", &self.current_level)
            .field("max_task_levels", &self.task_data.len())
            .field("occupied_levels", &occupied)
            .field("execution_status", &self.execution_status)
            .field("active_tasks_changed", &self.active_tasks_changed)
            .field("blackboard", &self.blackboard)
            .finish()
    }
}
