//! Umbrella crate that re-exports the `decider-*` building blocks.
//!
//! ```
//! use decider::bt::{Action, BehaviorTree, Condition, SelectorDecider, Task};
//! use decider::core::{AgentData, BbKey, Blackboard, ExecutionStatus, TickContext};
//!
//! const THREAT: BbKey<bool> = BbKey::new("threat");
//!
//! let flee = Condition::new("threat?", |bb: &Blackboard| {
//!     bb.try_get(THREAT).copied().unwrap_or(false)
//! });
//! let idle = Action::new("idle", |_: &mut AgentData| ExecutionStatus::Running);
//! let children = vec![Box::new(flee) as Box<dyn Task>, Box::new(idle) as Box<dyn Task>];
//! let tree = BehaviorTree::new(Box::new(SelectorDecider::new("root", children)));
//!
//! let mut agent = AgentData::new();
//! let status = tree.tick(&mut agent, TickContext::new(0, 0.1)).unwrap();
//! assert_eq!(status, ExecutionStatus::Running);
//!
//! agent.blackboard.set(THREAT, true);
//! let status = tree.tick(&mut agent, TickContext::new(1, 0.1)).unwrap();
//! assert_eq!(status, ExecutionStatus::Success);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use decider_core as core;

#[cfg(feature = "bt")]
#[cfg_attr(docsrs, doc(cfg(feature = "bt")))]
pub use decider_bt as bt;

#[cfg(feature = "tools")]
#[cfg_attr(docsrs, doc(cfg(feature = "tools")))]
pub use decider_tools as tools;
