use std::any::type_name;

use decider_core::{
    AgentData, Decision, DecisionData, EngineError, ExecutionStatus, Result,
};

use crate::composite::Composite;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceData {
    pub active_child_idx: usize,
}

#[derive(Debug)]
pub struct SequenceDecision {
    pub child_decision: Option<DecisionData>,
}

/// Runs children in order; fails as soon as one fails, succeeds when the last one succeeds.
///
/// A sequence is willing exactly when its first child is. Later children are asked to decide
/// when their turn comes, and an unwilling child fails the sequence.
pub struct Sequence {
    composite: Composite,
}

impl Sequence {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Task>>) -> Self {
        Self {
            composite: Composite::new(name, children),
        }
    }

    pub fn on_success(mut self, listener: impl Fn(&AgentData) + 'static) -> Self {
        self.composite.add_success_listener(listener);
        self
    }

    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    fn settle(
        &self,
        agent: &mut AgentData,
        mut active: usize,
        mut status: ExecutionStatus,
    ) -> Result<ExecutionStatus> {
        loop {
            match status {
                ExecutionStatus::Running => return Ok(ExecutionStatus::Running),
                ExecutionStatus::Failed | ExecutionStatus::None => {
                    return Ok(ExecutionStatus::Failed)
                }
                ExecutionStatus::Success => {
                    let next = active + 1;
                    if next >= self.composite.len() {
                        self.composite.notify_success(agent);
                        return Ok(ExecutionStatus::Success);
                    }

                    let decision = self.composite.decide_child(agent, next);
                    if !decision.is_possible() {
                        tracing::debug!(
                            sequence = self.composite.name(),
                            child = next,
                            "sequence child unwilling"
                        );
                        return Ok(ExecutionStatus::Failed);
                    }

                    self.composite.deactivate_child(agent, active)?;
                    agent.task_data_mut::<SequenceData>()?.active_child_idx = next;
                    status = self.composite.activate_child(agent, next, decision.data)?;
                    active = next;
                }
            }
        }
    }
}

impl Task for Sequence {
    fn name(&self) -> &str {
        self.composite.name()
    }

    fn decide(&self, agent: &AgentData) -> Decision {
        if self.composite.is_empty() {
            return Decision::impossible();
        }
        let first = self.composite.decide_child(agent, 0);
        if !first.is_possible() {
            return Decision::impossible();
        }
        Decision::possible(first.priority).with_data(SequenceDecision {
            child_decision: first.data,
        })
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        let decision = decision
            .and_then(|d| d.downcast::<SequenceDecision>().ok())
            .filter(|_| !self.composite.is_empty())
            .ok_or_else(|| EngineError::InvalidDecisionData {
                task: self.name().to_string(),
                expected: type_name::<SequenceDecision>(),
            })?;

        agent.init_task_data(SequenceData::default())?;
        let status = self
            .composite
            .activate_child(agent, 0, decision.child_decision)?;
        self.settle(agent, 0, status)
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        let active = agent.task_data::<SequenceData>()?.active_child_idx;
        let status = self.composite.update_child(agent, active)?;
        self.settle(agent, active, status)
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        let active = agent.task_data::<SequenceData>()?.active_child_idx;
        self.composite.deactivate_child(agent, active)?;
        agent.clear_current_task_data()
    }

    fn children(&self) -> &[Box<dyn Task>] {
        self.composite.children()
    }

    fn active_children(&self, agent: &AgentData, level: usize) -> Vec<&dyn Task> {
        agent
            .task_data_at::<SequenceData>(level)
            .map(|data| data.active_child_idx)
            .filter(|&idx| idx < self.composite.len())
            .map(|idx| vec![self.composite.child(idx)])
            .unwrap_or_default()
    }
}
