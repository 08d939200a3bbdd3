use decider_core::{AgentData, Decision, DecisionData, ExecutionStatus, Result};

/// The unit of behavior: leaves, composites and decorators all speak this protocol.
///
/// A task holds no per-agent state. Whatever it needs to remember between ticks goes into the
/// agent's task-data slot for the task's depth, created in `activate` and cleared in
/// `deactivate`, so one tree can drive any number of agents.
///
/// Call order for a single activation period:
/// `decide` (any number of times) -> `activate` -> `update`* -> `deactivate`.
/// A task whose `activate`/`update` returned `Success` or `Failed` stays active until its parent
/// calls `deactivate`.
pub trait Task: 'static {
    fn name(&self) -> &str;

    /// Arbitration. Must not touch the task-data stack.
    fn decide(&self, agent: &AgentData) -> Decision;

    /// Inactive -> active. `decision` is the payload produced by the matching `decide`.
    ///
    /// Never returns `ExecutionStatus::None`.
    fn activate(
        &self,
        agent: &mut AgentData,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus>;

    /// One tick while active. Never returns `ExecutionStatus::None`.
    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus>;

    /// Active -> inactive. Clears this task's slot, and any active descendants first.
    fn deactivate(&self, agent: &mut AgentData) -> Result<()>;

    fn children(&self) -> &[Box<dyn Task>] {
        &[]
    }

    /// Children currently active below this task, given that it is active at `level`.
    fn active_children(&self, _agent: &AgentData, _level: usize) -> Vec<&dyn Task> {
        Vec::new()
    }
}
