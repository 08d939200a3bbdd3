use std::any::type_name;

use decider_core::{
    AgentData, Decision, DecisionData, EngineError, ExecutionStatus, Result,
};
use decider_tools::{emit as trace_emit, TraceEvent};

use crate::composite::Composite;
use crate::task::Task;

/// Working state a selector keeps across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorData {
    /// `None` until a child has been activated.
    pub active_child_idx: Option<usize>,
}

/// Arbitration result a selector hands from `decide` to `activate`.
#[derive(Debug)]
pub struct SelectorDecision {
    pub selected_child_idx: usize,
    pub child_decision: Option<DecisionData>,
}

/// Priority selector: children are ordered by priority, index 0 first.
///
/// - `decide` picks the first child willing to run.
/// - While a child runs, any higher-priority child that becomes willing interrupts it.
/// - When the running child fails, the next willing lower-priority child takes over.
///   Lower-priority children never interrupt a running one.
pub struct SelectorDecider {
    composite: Composite,
}

impl SelectorDecider {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Task>>) -> Self {
        Self {
            composite: Composite::new(name, children),
        }
    }

    /// Register a callback fired each time this selector resolves to `Success`.
    pub fn on_success(mut self, listener: impl Fn(&AgentData) + 'static) -> Self {
        self.composite.add_success_listener(listener);
        self
    }

    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    fn set_active_child(agent: &mut AgentData, idx: usize) -> Result<()> {
        agent.task_data_mut::<SelectorData>()?.active_child_idx = Some(idx);
        Ok(())
    }

    fn trace(&self, agent: &mut AgentData, tag: &'static str, from: usize, to: usize) {
        let tick = agent.tick().tick;
        trace_emit(
            &mut agent.blackboard,
            TraceEvent::new(tick, tag).with_a(from as u64).with_b(to as u64),
        );
    }

    /// Drive the active child's status to something this selector can report.
    ///
    /// `Failed` and `None` hand control to the next willing child after `active`; the loop ends
    /// on `Running`, `Success`, or when no child is left to take over.
    fn settle(
        &self,
        agent: &mut AgentData,
        mut active: usize,
        mut status: ExecutionStatus,
    ) -> Result<ExecutionStatus> {
        loop {
            match status {
                ExecutionStatus::Running => return Ok(ExecutionStatus::Running),
                ExecutionStatus::Success => {
                    self.trace(agent, "selector.success", active, active);
                    self.composite.notify_success(agent);
                    return Ok(ExecutionStatus::Success);
                }
                ExecutionStatus::Failed | ExecutionStatus::None => {
                    let takeover = self
                        .composite
                        .first_possible(agent, active + 1..self.composite.len());
                    let Some((next, decision)) = takeover else {
                        self.trace(agent, "selector.exhausted", active, active);
                        return Ok(ExecutionStatus::Failed);
                    };

                    tracing::debug!(
                        selector = self.composite.name(),
                        from = active,
                        to = next,
                        ?status,
                        "selector takeover"
                    );
                    self.composite.deactivate_child(agent, active)?;
                    Self::set_active_child(agent, next)?;
                    self.trace(agent, "selector.takeover", active, next);

                    status = self.composite.activate_child(agent, next, decision.data)?;
                    active = next;
                }
            }
        }
    }
}

impl Task for SelectorDecider {
    fn name(&self) -> &str {
        self.composite.name()
    }

    fn decide(&self, agent: &AgentData) -> Decision {
        match self.composite.first_possible(agent, 0..self.composite.len()) {
            Some((idx, child)) => Decision::possible(child.priority).with_data(SelectorDecision {
                selected_child_idx: idx,
                child_decision: child.data,
            }),
            None => Decision::impossible(),
        }
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        let invalid = || EngineError::InvalidDecisionData {
            task: self.name().to_string(),
            expected: type_name::<SelectorDecision>(),
        };
        let decision = decision
            .and_then(|d| d.downcast::<SelectorDecision>().ok())
            .ok_or_else(invalid)?;
        let SelectorDecision {
            selected_child_idx: idx,
            child_decision,
        } = *decision;
        if idx >= self.composite.len() {
            return Err(invalid());
        }

        agent.init_task_data(SelectorData {
            active_child_idx: Some(idx),
        })?;
        self.trace(agent, "selector.activate", idx, idx);

        let status = self.composite.activate_child(agent, idx, child_decision)?;
        self.settle(agent, idx, status)
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        let active = agent
            .task_data::<SelectorData>()?
            .active_child_idx
            .ok_or_else(|| EngineError::NotActive {
                task: self.name().to_string(),
            })?;

        if let Some((idx, decision)) = self.composite.first_possible(agent, 0..active) {
            tracing::debug!(
                selector = self.composite.name(),
                from = active,
                to = idx,
                "selector interrupt"
            );
            self.composite.deactivate_child(agent, active)?;
            Self::set_active_child(agent, idx)?;
            self.trace(agent, "selector.interrupt", active, idx);

            let status = self.composite.activate_child(agent, idx, decision.data)?;
            return self.settle(agent, idx, status);
        }

        let status = self.composite.update_child(agent, active)?;
        self.settle(agent, active, status)
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        let active = agent.task_data::<SelectorData>()?.active_child_idx;
        if let Some(idx) = active {
            self.composite.deactivate_child(agent, idx)?;
        }
        agent.clear_current_task_data()
    }

    fn children(&self) -> &[Box<dyn Task>] {
        self.composite.children()
    }

    fn active_children(&self, agent: &AgentData, level: usize) -> Vec<&dyn Task> {
        agent
            .task_data_at::<SelectorData>(level)
            .and_then(|data| data.active_child_idx)
            .filter(|&idx| idx < self.composite.len())
            .map(|idx| vec![self.composite.child(idx)])
            .unwrap_or_default()
    }
}
