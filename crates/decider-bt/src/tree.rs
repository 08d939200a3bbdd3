use decider_core::{AgentData, ExecutionStatus, Result, TickContext};

use crate::introspect::{active_tasks, find_tasks, ActiveTask};
use crate::task::Task;

/// Drives a root task for one agent per tick.
///
/// The tree itself is immutable; pass a different `AgentData` to run it for another agent.
pub struct BehaviorTree {
    root: Box<dyn Task>,
}

impl BehaviorTree {
    pub fn new(root: Box<dyn Task>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &dyn Task {
        self.root.as_ref()
    }

    /// Run one tick.
    ///
    /// An inactive root is asked to decide and, when willing, activated; a running root is
    /// updated. A root that finishes is deactivated in the same tick, so the next tick starts a
    /// fresh decision. Observers registered on the agent fire at most once, after the tick.
    pub fn tick(&self, agent: &mut AgentData, ctx: TickContext) -> Result<ExecutionStatus> {
        agent.pre_update(ctx);
        let result = self.step(agent);
        if let Err(err) = &result {
            tracing::error!(tick = ctx.tick, error = %err, "behavior tree tick aborted");
        }
        agent.post_update();
        result
    }

    fn step(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        let root = self.root.as_ref();
        let status = if agent.execution_status().is_running() {
            root.update(agent)
        } else {
            let decision = root.decide(agent);
            if !decision.is_possible() {
                tracing::trace!(root = root.name(), "root unwilling");
                agent.set_execution_status(ExecutionStatus::Failed);
                return Ok(ExecutionStatus::Failed);
            }
            root.activate(agent, decision.data)
        }
        .map_err(|e| e.in_task(root.name()))?;

        let status = match status {
            ExecutionStatus::None => ExecutionStatus::Failed,
            other => other,
        };
        if status.is_terminal() {
            root.deactivate(agent).map_err(|e| e.in_task(root.name()))?;
        }

        tracing::trace!(root = root.name(), ?status, "tick complete");
        agent.set_execution_status(status);
        Ok(status)
    }

    /// Deactivate a running root and forget the last status.
    pub fn reset(&self, agent: &mut AgentData) -> Result<()> {
        if agent.execution_status().is_running() {
            self.root
                .deactivate(agent)
                .map_err(|e| e.in_task(self.root.name()))?;
        }
        agent.set_execution_status(ExecutionStatus::None);
        Ok(())
    }

    pub fn active_tasks<'a>(&'a self, agent: &AgentData) -> Option<ActiveTask<'a>> {
        active_tasks(self.root.as_ref(), agent)
    }

    pub fn find_tasks(&self, predicate: impl Fn(&dyn Task) -> bool) -> Vec<&dyn Task> {
        find_tasks(self.root.as_ref(), predicate)
    }
}
