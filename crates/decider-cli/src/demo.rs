//! Built-in guard scenario used by `decider run`.
//!
//! The guard patrols until an enemy shows up, trades blows with it, and falls back to recover
//! once its health drops too low. Retreat outranks engaging, which outranks patrolling.

use decider_bt::{Action, Condition, LeafData, Repeater, SelectorDecider, Sequence, Task, Wait};
use decider_core::{AgentData, BbKey, Blackboard, ExecutionStatus, TaskParameter};

use crate::config::DemoConfig;

pub const HEALTH: BbKey<f32> = BbKey::new("guard.health");
pub const ENEMY_VISIBLE: BbKey<bool> = BbKey::new("guard.enemy_visible");
pub const FLEE_BELOW: BbKey<f32> = BbKey::new("guard.flee_below");
pub const LOOK_SECONDS: BbKey<f32> = BbKey::new("guard.look_seconds");

const MAX_HEALTH: f32 = 100.0;
const RECOVERED_HEALTH: f32 = 80.0;
const HEAL_PER_TICK: f32 = 8.0;
const DAMAGE_PER_SWING: f32 = 9.0;
const SWINGS_PER_ENGAGEMENT: u32 = 3;
const WALK_TICKS: u32 = 2;

fn health(bb: &Blackboard) -> f32 {
    bb.try_get(HEALTH).copied().unwrap_or(MAX_HEALTH)
}

fn updates(agent: &AgentData) -> u32 {
    agent.task_data::<LeafData>().map(|d| d.updates).unwrap_or(0)
}

pub fn guard_tree() -> Box<dyn Task> {
    let retreat = Sequence::new(
        "retreat",
        vec![
            Box::new(Condition::new("hurt", |bb| {
                health(bb) < bb.try_get(FLEE_BELOW).copied().unwrap_or(0.0)
            })) as Box<dyn Task>,
            Box::new(Action::new("fall back", |agent| {
                let healed = (health(&agent.blackboard) + HEAL_PER_TICK).min(MAX_HEALTH);
                agent.blackboard.set(HEALTH, healed);
                if healed >= RECOVERED_HEALTH {
                    ExecutionStatus::Success
                } else {
                    ExecutionStatus::Running
                }
            })),
        ],
    );

    let engage = Sequence::new(
        "engage",
        vec![
            Box::new(Condition::new("enemy in sight", |bb| {
                bb.try_get(ENEMY_VISIBLE).copied().unwrap_or(false)
            })) as Box<dyn Task>,
            Box::new(
                Repeater::new(
                    "flurry",
                    Box::new(Action::new("swing", |agent| {
                        let hurt = (health(&agent.blackboard) - DAMAGE_PER_SWING).max(0.0);
                        agent.blackboard.set(HEALTH, hurt);
                        ExecutionStatus::Success
                    })),
                )
                .times(SWINGS_PER_ENGAGEMENT),
            ),
        ],
    );

    let patrol = Sequence::new(
        "patrol",
        vec![
            Box::new(Action::new("walk", |agent| {
                if updates(agent) >= WALK_TICKS {
                    ExecutionStatus::Success
                } else {
                    ExecutionStatus::Running
                }
            })) as Box<dyn Task>,
            Box::new(Wait::new(
                "look around",
                TaskParameter::blackboard(LOOK_SECONDS, 0.3),
            )),
        ],
    )
    .on_success(|agent| {
        tracing::debug!(tick = agent.tick().tick, "patrol lap complete");
    });

    Box::new(
        SelectorDecider::new(
            "guard",
            vec![Box::new(retreat), Box::new(engage), Box::new(patrol)],
        )
        .on_success(|agent| {
            tracing::debug!(
                tick = agent.tick().tick,
                health = health(&agent.blackboard),
                "guard behavior finished"
            );
        }),
    )
}

/// Seed the blackboard with the scenario's tunables.
pub fn prepare(agent: &mut AgentData, config: &DemoConfig) {
    agent.blackboard.set(HEALTH, MAX_HEALTH);
    agent.blackboard.set(ENEMY_VISIBLE, false);
    agent.blackboard.set(FLEE_BELOW, config.flee_below);
    agent.blackboard.set(LOOK_SECONDS, config.look_seconds);
}

/// Update the world before `tick`: the enemy shows up for the tail of every period.
pub fn advance_world(agent: &mut AgentData, config: &DemoConfig, tick: u64) {
    let hidden_ticks = config.enemy_period.saturating_sub(config.enemy_visible_ticks);
    let visible = tick % config.enemy_period >= hidden_ticks;
    agent.blackboard.set(ENEMY_VISIBLE, visible);
}

#[cfg(test)]
mod tests {
    use decider_bt::BehaviorTree;
    use decider_core::TickContext;

    use super::*;

    fn run(config: &DemoConfig) -> (BehaviorTree, AgentData, Vec<Vec<String>>) {
        let tree = BehaviorTree::new(guard_tree());
        let mut agent = AgentData::new();
        prepare(&mut agent, config);

        let mut paths = Vec::new();
        for tick in 0..config.ticks {
            advance_world(&mut agent, config, tick);
            tree.tick(&mut agent, TickContext::new(tick, config.dt_seconds))
                .unwrap();
            paths.push(
                tree.active_tasks(&agent)
                    .map(|path| path.names().into_iter().map(str::to_string).collect())
                    .unwrap_or_default(),
            );
        }
        (tree, agent, paths)
    }

    #[test]
    fn guard_patrols_while_alone() {
        let config = DemoConfig {
            ticks: 3,
            ..DemoConfig::default()
        };
        let (_, _, paths) = run(&config);
        assert_eq!(paths[0], ["guard", "patrol", "walk"]);
        assert_eq!(paths[1], ["guard", "patrol", "look around"]);
    }

    #[test]
    fn guard_retreats_when_hurt_and_recovers() {
        let config = DemoConfig::default();
        let (_, agent, paths) = run(&config);

        assert!(paths.iter().any(|p| p.first().map(String::as_str) == Some("guard")
            && p.get(1).map(String::as_str) == Some("engage")));
        assert!(paths
            .iter()
            .any(|p| p.get(1).map(String::as_str) == Some("retreat")));
        assert!(health(&agent.blackboard) > 0.0);
    }
}
