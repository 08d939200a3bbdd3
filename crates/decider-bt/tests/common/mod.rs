#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use decider_bt::Task;
use decider_core::{AgentData, Decision, DecisionData, ExecutionStatus, Result, WILLING};

/// Shared control panel for probe leaves: tests flip willingness and statuses between ticks and
/// read back the lifecycle calls the probes recorded.
#[derive(Debug, Default)]
pub struct Script {
    unwilling: BTreeMap<&'static str, bool>,
    status: BTreeMap<&'static str, ExecutionStatus>,
    pub log: Vec<String>,
}

pub type Shared = Rc<RefCell<Script>>;

pub fn script() -> Shared {
    Rc::new(RefCell::new(Script::default()))
}

impl Script {
    pub fn set_willing(&mut self, name: &'static str, willing: bool) {
        self.unwilling.insert(name, !willing);
    }

    pub fn set_status(&mut self, name: &'static str, status: ExecutionStatus) {
        self.status.insert(name, status);
    }

    fn willing(&self, name: &str) -> bool {
        !self.unwilling.get(name).copied().unwrap_or(false)
    }

    fn status(&self, name: &str) -> ExecutionStatus {
        self.status
            .get(name)
            .copied()
            .unwrap_or(ExecutionStatus::Running)
    }

    pub fn take_log(&mut self) -> Vec<String> {
        std::mem::take(&mut self.log)
    }

    pub fn count(&self, entry: &str) -> usize {
        self.log.iter().filter(|e| e.as_str() == entry).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeData {
    pub updates: u32,
}

/// Payload a probe hands from decide to activate, checked on activation.
#[derive(Debug)]
pub struct ProbeDecision(pub &'static str);

pub struct Probe {
    name: &'static str,
    script: Shared,
}

impl Probe {
    pub fn boxed(name: &'static str, script: &Shared) -> Box<dyn Task> {
        Box::new(Self {
            name,
            script: script.clone(),
        })
    }
}

impl Task for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn decide(&self, _agent: &AgentData) -> Decision {
        if self.script.borrow().willing(self.name) {
            Decision::possible(WILLING).with_data(ProbeDecision(self.name))
        } else {
            Decision::impossible()
        }
    }

    fn activate(
        &self,
        agent: &mut AgentData,
        decision: Option<DecisionData>,
    ) -> Result<ExecutionStatus> {
        let decision = decision.and_then(|d| d.downcast::<ProbeDecision>().ok());
        assert_eq!(decision.map(|d| d.0), Some(self.name), "decision routed to wrong task");

        // Fresh data must start from an empty slot.
        assert!(agent.current_task_data().is_none(), "{} slot not cleared", self.name);
        agent.init_task_data(ProbeData { updates: 0 })?;

        let mut script = self.script.borrow_mut();
        script.log.push(format!("activate:{}", self.name));
        Ok(script.status(self.name))
    }

    fn update(&self, agent: &mut AgentData) -> Result<ExecutionStatus> {
        agent.task_data_mut::<ProbeData>()?.updates += 1;
        let mut script = self.script.borrow_mut();
        script.log.push(format!("update:{}", self.name));
        Ok(script.status(self.name))
    }

    fn deactivate(&self, agent: &mut AgentData) -> Result<()> {
        agent.task_data::<ProbeData>()?;
        self.script
            .borrow_mut()
            .log
            .push(format!("deactivate:{}", self.name));
        agent.clear_current_task_data()
    }
}

pub fn tick(n: u64) -> decider_core::TickContext {
    decider_core::TickContext::new(n, 0.1)
}
