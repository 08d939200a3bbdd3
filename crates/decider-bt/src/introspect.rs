use decider_core::AgentData;

use crate::task::Task;

/// Snapshot of one active node and its active descendants.
pub struct ActiveTask<'a> {
    pub task: &'a dyn Task,
    pub level: usize,
    pub children: Vec<ActiveTask<'a>>,
}

impl<'a> ActiveTask<'a> {
    pub fn name(&self) -> &'a str {
        self.task.name()
    }

    /// Names of all nodes in the snapshot, depth-first pre-order.
    pub fn names(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        self.collect_names(&mut out);
        out
    }

    /// Name of the deepest active node along the first branch.
    pub fn leaf_name(&self) -> &'a str {
        match self.children.first() {
            Some(child) => child.leaf_name(),
            None => self.name(),
        }
    }

    fn collect_names(&self, out: &mut Vec<&'a str>) {
        out.push(self.name());
        for child in &self.children {
            child.collect_names(out);
        }
    }
}

impl std::fmt::Debug for ActiveTask<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveTask")
            .field("name", &self.name())
            .field("level", &self.level)
            .field("children", &self.children)
            .finish()
    }
}

/// Tree of nodes currently active for `agent`, rooted at level 0.
///
/// Returns `None` when the root is not active.
pub fn active_tasks<'a>(root: &'a dyn Task, agent: &AgentData) -> Option<ActiveTask<'a>> {
    agent.has_task_data_at(0).then(|| snapshot(root, agent, 0))
}

fn snapshot<'a>(task: &'a dyn Task, agent: &AgentData, level: usize) -> ActiveTask<'a> {
    let child_level = level + 1;
    let children = if agent.has_task_data_at(child_level) {
        task.active_children(agent, level)
            .into_iter()
            .map(|child| snapshot(child, agent, child_level))
            .collect()
    } else {
        Vec::new()
    };

    ActiveTask {
        task,
        level,
        children,
    }
}

/// Every task under `root` (inclusive) matching `predicate`, depth-first pre-order.
pub fn find_tasks<'a>(
    root: &'a dyn Task,
    predicate: impl Fn(&dyn Task) -> bool,
) -> Vec<&'a dyn Task> {
    let mut out = Vec::new();
    visit(root, &predicate, &mut out);
    out
}

fn visit<'a>(
    task: &'a dyn Task,
    predicate: &dyn Fn(&dyn Task) -> bool,
    out: &mut Vec<&'a dyn Task>,
) {
    if predicate(task) {
        out.push(task);
    }
    for child in task.children() {
        visit(child.as_ref(), predicate, out);
    }
}
