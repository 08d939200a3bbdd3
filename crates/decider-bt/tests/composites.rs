mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{script, tick, Probe};
use decider_bt::{
    BehaviorTree, Inverter, Repeater, RepeaterData, SelectorDecider, Sequence, SequenceData, Task,
};
use decider_core::{AgentData, ExecutionStatus};

fn log(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|e| e.to_string()).collect()
}

#[test]
fn sequence_runs_children_in_order_within_a_tick() {
    let s = script();
    let successes = Rc::new(Cell::new(0));
    let counter = successes.clone();
    let sequence = Sequence::new(
        "seq",
        vec![Probe::boxed("a", &s), Probe::boxed("b", &s), Probe::boxed("c", &s)],
    )
    .on_success(move |_| counter.set(counter.get() + 1));
    let tree = BehaviorTree::new(Box::new(sequence));
    let mut agent = AgentData::new();

    s.borrow_mut().set_status("a", ExecutionStatus::Success);
    assert_eq!(tree.tick(&mut agent, tick(0)).unwrap(), ExecutionStatus::Running);
    assert_eq!(
        s.borrow_mut().take_log(),
        log(&["activate:a", "deactivate:a", "activate:b"])
    );
    assert_eq!(agent.task_data_at::<SequenceData>(0).map(|d| d.active_child_idx), Some(1));

    s.borrow_mut().set_status("b", ExecutionStatus::Success);
    s.borrow_mut().set_status("c", ExecutionStatus::Success);
    assert_eq!(tree.tick(&mut agent, tick(1)).unwrap(), ExecutionStatus::Success);
    assert_eq!(
        s.borrow_mut().take_log(),
        log(&["update:b", "deactivate:b", "activate:c", "deactivate:c"])
    );
    assert_eq!(successes.get(), 1);
}

#[test]
fn sequence_fails_on_first_failure_or_unwilling_child() {
    let s = script();
    let tree = BehaviorTree::new(Box::new(Sequence::new(
        "seq",
        vec![Probe::boxed("a", &s), Probe::boxed("b", &s)],
    )));
    let mut agent = AgentData::new();

    s.borrow_mut().set_status("a", ExecutionStatus::Failed);
    assert_eq!(tree.tick(&mut agent, tick(0)).unwrap(), ExecutionStatus::Failed);
    assert_eq!(s.borrow_mut().take_log(), log(&["activate:a", "deactivate:a"]));

    s.borrow_mut().set_status("a", ExecutionStatus::Success);
    s.borrow_mut().set_willing("b", false);
    assert_eq!(tree.tick(&mut agent, tick(1)).unwrap(), ExecutionStatus::Failed);
    assert_eq!(s.borrow_mut().take_log(), log(&["activate:a", "deactivate:a"]));
}

#[test]
fn sequence_is_unwilling_when_first_child_is() {
    let s = script();
    let sequence = Sequence::new("seq", vec![Probe::boxed("a", &s), Probe::boxed("b", &s)]);
    s.borrow_mut().set_willing("a", false);
    assert!(!sequence.decide(&AgentData::new()).is_possible());
    assert!(!Sequence::new("empty", Vec::new())
        .decide(&AgentData::new())
        .is_possible());
}

#[test]
fn selector_interrupts_inside_nested_sequence() {
    let s = script();
    let patrol = Sequence::new(
        "patrol",
        vec![Probe::boxed("walk", &s), Probe::boxed("look", &s)],
    );
    let root = SelectorDecider::new(
        "root",
        vec![Probe::boxed("flee", &s), Box::new(patrol) as Box<dyn Task>],
    );
    let tree = BehaviorTree::new(Box::new(root));
    let mut agent = AgentData::new();

    s.borrow_mut().set_willing("flee", false);
    s.borrow_mut().set_status("walk", ExecutionStatus::Success);
    tree.tick(&mut agent, tick(0)).unwrap();
    assert_eq!(
        s.borrow_mut().take_log(),
        log(&["activate:walk", "deactivate:walk", "activate:look"])
    );

    s.borrow_mut().set_willing("flee", true);
    assert_eq!(tree.tick(&mut agent, tick(1)).unwrap(), ExecutionStatus::Running);
    assert_eq!(
        s.borrow_mut().take_log(),
        log(&["deactivate:look", "activate:flee"])
    );
    assert!(!agent.has_task_data_at(2));
}

#[test]
fn inverter_swaps_terminal_statuses() {
    let s = script();
    let tree = BehaviorTree::new(Box::new(Inverter::new("not", Probe::boxed("a", &s))));
    let mut agent = AgentData::new();

    assert_eq!(tree.tick(&mut agent, tick(0)).unwrap(), ExecutionStatus::Running);
    s.borrow_mut().set_status("a", ExecutionStatus::Success);
    assert_eq!(tree.tick(&mut agent, tick(1)).unwrap(), ExecutionStatus::Failed);

    s.borrow_mut().set_status("a", ExecutionStatus::Failed);
    assert_eq!(tree.tick(&mut agent, tick(2)).unwrap(), ExecutionStatus::Success);
    assert_eq!(
        s.borrow().log,
        log(&[
            "activate:a",
            "update:a",
            "deactivate:a",
            "activate:a",
            "deactivate:a"
        ])
    );
}

#[test]
fn repeater_restarts_child_on_following_tick() {
    let s = script();
    let tree = BehaviorTree::new(Box::new(
        Repeater::new("thrice", Probe::boxed("a", &s)).times(3),
    ));
    let mut agent = AgentData::new();
    s.borrow_mut().set_status("a", ExecutionStatus::Success);

    assert_eq!(tree.tick(&mut agent, tick(0)).unwrap(), ExecutionStatus::Running);
    assert_eq!(
        agent.task_data_at::<RepeaterData>(0),
        Some(&RepeaterData {
            completed: 1,
            child_active: false
        })
    );
    assert_eq!(tree.tick(&mut agent, tick(1)).unwrap(), ExecutionStatus::Running);
    assert_eq!(tree.tick(&mut agent, tick(2)).unwrap(), ExecutionStatus::Success);

    let recorded = s.borrow();
    assert_eq!(recorded.count("activate:a"), 3);
    assert_eq!(recorded.count("deactivate:a"), 3);
}

#[test]
fn repeater_fails_with_child_and_zero_count_succeeds_immediately() {
    let s = script();
    let forever = BehaviorTree::new(Box::new(Repeater::new("forever", Probe::boxed("a", &s))));
    let mut agent = AgentData::new();

    s.borrow_mut().set_status("a", ExecutionStatus::Success);
    for n in 0..5 {
        assert_eq!(forever.tick(&mut agent, tick(n)).unwrap(), ExecutionStatus::Running);
    }
    s.borrow_mut().set_status("a", ExecutionStatus::Failed);
    assert_eq!(forever.tick(&mut agent, tick(5)).unwrap(), ExecutionStatus::Failed);

    let never = Repeater::new("never", Probe::boxed("b", &s)).times(0);
    let never = BehaviorTree::new(Box::new(never));
    let mut agent = AgentData::new();
    assert_eq!(never.tick(&mut agent, tick(0)).unwrap(), ExecutionStatus::Success);
    assert_eq!(s.borrow().count("activate:b"), 0);
}
