use decider_core::{
    AgentData, Blackboard, Decision, DecisionData, ExecutionStatus, Result, TaskParameter,
    WILLING,
};

/// Per-activation state shared by the closure-driven leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeafData {
    pub updates: u32,
}

/// Leaf that runs a closure on activation and on every update.
///
/// The closure sees the whole agent, but should only touch the blackboard and its own
/// `LeafData`. Returning `ExecutionStatus::None` is treated as `Failed`.
pub struct Action<F> {
    name: String,
    priority: TaskParameter<f32>,
    run: F,
}

impl<F> Action<F>
where
    F: Fn(&mut AgentData) -> ExecutionStatus + 'static,
{
    pub fn new(name: impl Into<String>, run: F) -> Self {
        Self {
            name: name.into(),
            priority: TaskParameter::Value(WILLING),
            run,
        }
    }

    /// Arbitration priority; `0.0` (or a blackboard value of `0.0`) makes the action unwilling.
    pub fn with_priority(mut self, priority: impl Into<TaskParameter<f32>>) -> Self {
        self.priority = priority.into();
        self
    }

    fn step(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        agent.task_data_mut::<LeafData>()?.updates += 1;
        match (self.run)(agent) {
            ExecutionStatus::None => {
                tracing::warn!(task = %self.name, "action returned None, treating as Failed");
                Ok(ExecutionStatus::Failed)
            }
            status => Ok(status),
        }
    }
}

impl<F> crate::Task for Action<F>
where
    F: Fn(&mut AgentData) -> ExecutionStatus + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, agent: &AgentData) -> Decision {
        Decision::possible(self.priority.resolve(&agent.blackboard))
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        _decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        agent.init_task_data(LeafData::default())?;
        self.step(agent)
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        self.step(agent)
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        agent.task_data::<LeafData>()?;
        agent.clear_current_task_data()
    }
}

/// Leaf that is willing only while its predicate holds, and succeeds immediately when run.
pub struct Condition<F> {
    name: String,
    cond: F,
}

impl<F> Condition<F>
where
    F: Fn(&Blackboard) -> bool + 'static,
{
    pub fn new(name: impl Into<String>, cond: F) -> Self {
        Self {
            name: name.into(),
            cond,
        }
    }

    fn check(&self, agent: &AgentData) -> ExecutionStatus {
        if (self.cond)(&agent.blackboard) {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Failed
        }
    }
}

impl<F> crate::Task for Condition<F>
where
    F: Fn(&Blackboard) -> bool + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, agent: &AgentData) -> Decision {
        if (self.cond)(&agent.blackboard) {
            Decision::possible(WILLING)
        } else {
            Decision::impossible()
        }
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        _decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        agent.init_task_data(LeafData::default())?;
        Ok(self.check(agent))
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        agent.task_data_mut::<LeafData>()?.updates += 1;
        Ok(self.check(agent))
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        agent.task_data::<LeafData>()?;
        agent.clear_current_task_data()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaitData {
    pub duration: f32,
    pub elapsed: f32,
}

/// Leaf that stays `Running` until the given number of seconds has passed.
///
/// The duration is resolved once per activation; elapsed time accumulates from each tick's
/// `dt_seconds`, starting with the tick after activation.
pub struct Wait {
    name: String,
    seconds: TaskParameter<f32>,
}

impl Wait {
    pub fn new(name: impl Into<String>, seconds: impl Into<TaskParameter<f32>>) -> Self {
        Self {
            name: name.into(),
            seconds: seconds.into(),
        }
    }

    fn status(data: &WaitData) -> ExecutionStatus {
        if data.elapsed >= data.duration {
            ExecutionStatus::Success
        } else {
            ExecutionStatus::Running
        }
    }
}

impl crate::Task for Wait {
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&self, _agent: &AgentData) -> Decision {
        Decision::possible(WILLING)
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        _decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        let data = WaitData {
            duration: self.seconds.resolve(&agent.blackboard),
            elapsed: 0.0,
        };
        agent.init_task_data(data)?;
        Ok(Self::status(&data))
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        let dt = agent.tick().dt_seconds;
        let data = agent.task_data_mut::<WaitData>()?;
        data.elapsed += dt;
        Ok(Self::status(data))
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        agent.task_data::<WaitData>()?;
        agent.clear_current_task_data()
    }
}
