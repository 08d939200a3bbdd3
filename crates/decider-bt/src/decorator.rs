use decider_core::{AgentData, Decision, DecisionData, ExecutionStatus, Result};

use crate::composite::{activate_child, deactivate_child, update_child};
use crate::task::Task;

/// Marker stored by decorators that keep no state of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoratorData;

/// Reports `Failed` where its child succeeds and `Success` where it fails.
pub struct Inverter {
    name: String,
    child: Box<dyn Task>,
}

impl Inverter {
    pub fn new(name: impl Into<String>, child: Box<dyn Task>) -> Self {
        Self {
            name: name.into(),
            child,
        }
    }
}

impl Task for Inverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, agent: &AgentData) -> Decision {
        self.child.decide(agent)
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        agent.init_task_data(DecoratorData)?;
        let status = activate_child(agent, self.child.as_ref(), decision)?;
        Ok(status.inverted())
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        agent.task_data::<DecoratorData>()?;
        let status = update_child(agent, self.child.as_ref())?;
        Ok(status.inverted())
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        agent.task_data::<DecoratorData>()?;
        deactivate_child(agent, self.child.as_ref())?;
        agent.clear_current_task_data()
    }

    fn children(&self) -> &[Box<dyn Task>] {
        std::slice::from_ref(&self.child)
    }

    fn active_children(&self, agent: &AgentData, level: usize) -> Vec<&dyn Task> {
        if agent.has_task_data_at(level + 1) {
            vec![self.child.as_ref()]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepeaterData {
    pub completed: u32,
    pub child_active: bool,
}

/// Restarts its child after every success.
///
/// The restart happens on the following tick, so a child that succeeds instantly still yields
/// once per run. With a count, the repeater succeeds after that many child successes; without
/// one it runs until the child fails.
pub struct Repeater {
    name: String,
    child: Box<dyn Task>,
    count: Option<u32>,
}

impl Repeater {
    pub fn new(name: impl Into<String>, child: Box<dyn Task>) -> Self {
        Self {
            name: name.into(),
            child,
            count: None,
        }
    }

    pub fn times(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    fn done(&self, completed: u32) -> bool {
        self.count.is_some_and(|count| completed >= count)
    }

    fn after_child(&self, agent: &mut AgentData, status: ExecutionStatus) -> Result<ExecutionStatus> {
        match status {
            ExecutionStatus::Running => Ok(ExecutionStatus::Running),
            ExecutionStatus::Failed | ExecutionStatus::None => Ok(ExecutionStatus::Failed),
            ExecutionStatus::Success => {
                let data = agent.task_data_mut::<RepeaterData>()?;
                data.completed += 1;
                let completed = data.completed;
                if self.done(completed) {
                    return Ok(ExecutionStatus::Success);
                }

                deactivate_child(agent, self.child.as_ref())?;
                agent.task_data_mut::<RepeaterData>()?.child_active = false;
                Ok(ExecutionStatus::Running)
            }
        }
    }

    fn start_child(
        &self,
        agent: &mut AgentData,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        agent.task_data_mut::<RepeaterData>()?.child_active = true;
        let status = activate_child(agent, self.child.as_ref(), decision)?;
        self.after_child(agent, status)
    }
}

impl Task for Repeater {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, agent: &AgentData) -> Decision {
        if self.count == Some(0) {
            return Decision::possible(decider_core::WILLING);
        }
        self.child.decide(agent)
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        agent.init_task_data(RepeaterData::default())?;
        if self.done(0) {
            return Ok(ExecutionStatus::Success);
        }
        self.start_child(agent, decision)
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        if agent.task_data::<RepeaterData>()?.child_active {
            let status = update_child(agent, self.child.as_ref())?;
            return self.after_child(agent, status);
        }

        let decision = self.child.decide(agent);
        if !decision.is_possible() {
            return Ok(ExecutionStatus::Failed);
        }
        self.start_child(agent, decision.data)
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        if agent.task_data::<RepeaterData>()?.child_active {
            deactivate_child(agent, self.child.as_ref())?;
        }
        agent.clear_current_task_data()
    }

    fn children(&self) -> &[Box<dyn Task>] {
        std::slice::from_ref(&self.child)
    }

    fn active_children(&self, agent: &AgentData, level: usize) -> Vec<&dyn Task> {
        match agent.task_data_at::<RepeaterData>(level) {
            Some(data) if data.child_active => vec![self.child.as_ref()],
            _ => Vec::new(),
        }
    }
}
