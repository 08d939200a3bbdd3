use std::ops::Range;

use decider_core::{AgentData, Decision, DecisionData, ExecutionStatus, Result};

use crate::task::Task;

type SuccessListener = Box<dyn Fn(&AgentData)>;

/// Run `f` one level below the current cursor, restoring the cursor on every path.
pub fn at_child_level<R>(
    agent: &mut AgentData,
    f: impl FnOnce(&mut AgentData) -> Result<R>,
) -> Result<R> {
    agent.descend();
    let result = f(agent);
    agent.ascend();
    result
}

pub fn activate_child(
    agent: &mut AgentData,
    child: &dyn Task,
    decision: Option<DecisionData>,
) -> Result<ExecutionStatus> {
    at_child_level(agent, |agent| child.activate(agent, decision))
        .map_err(|e| e.in_task(child.name()))
}

pub fn update_child(agent: &mut AgentData, child: &dyn Task) -> Result<ExecutionStatus> {
    at_child_level(agent, |agent| child.update(agent)).map_err(|e| e.in_task(child.name()))
}

pub fn deactivate_child(agent: &mut AgentData, child: &dyn Task) -> Result<()> {
    at_child_level(agent, |agent| child.deactivate(agent)).map_err(|e| e.in_task(child.name()))
}

/// Ordered children plus the plumbing shared by every multi-child task.
pub struct Composite {
    name: String,
    children: Vec<Box<dyn Task>>,
    success_listeners: Vec<SuccessListener>,
}

impl Composite {
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Task>>) -> Self {
        Self {
            name: name.into(),
            children,
            success_listeners: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Box<dyn Task>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, idx: usize) -> &dyn Task {
        self.children[idx].as_ref()
    }

    pub fn add_success_listener(&mut self, listener: impl Fn(&AgentData) + 'static) {
        self.success_listeners.push(Box::new(listener));
    }

    pub fn notify_success(&self, agent: &AgentData) {
        for listener in &self.success_listeners {
            listener(agent);
        }
    }

    pub fn decide_child(&self, agent: &AgentData, idx: usize) -> Decision {
        self.children[idx].decide(agent)
    }

    /// First child in `range` whose decision is possible. Order is priority; magnitudes are not
    /// compared.
    pub fn first_possible(
        &self,
        agent: &AgentData,
        range: Range<usize>,
    ) -> Option<(usize, Decision)> {
        let end = range.end.min(self.children.len());
        (range.start..end)
            .map(|idx| (idx, self.decide_child(agent, idx)))
            .find(|(_, decision)| decision.is_possible())
    }

    pub fn activate_child(
        &self,
        agent: &mut AgentData,
        idx: usize,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        activate_child(agent, self.child(idx), decision)
    }

    pub fn update_child(&self, agent: &mut AgentData, idx: usize) -> Result<ExecutionStatus> {
        update_child(agent, self.child(idx))
    }

    pub fn deactivate_child(&self, agent: &mut AgentData, idx: usize) -> Result<()> {
        deactivate_child(agent, self.child(idx))
    }
}

impl std::fmt::Debug for Composite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composite")
            .field("name", &self.name)
            .field(
                "children",
                &self.children.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("success_listeners", &self.success_listeners.len())
            .finish()
    }
}
