//! Priority-arbitrated behavior tree runtime built on `decider-core`.
//!
//! Every node speaks the two-phase [`Task`] protocol: `decide` ranks candidates without side
//! effects, then `activate` / `update` / `deactivate` move the winner through its lifecycle.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod composite;
pub mod decorator;
pub mod introspect;
pub mod leaf;
pub mod selector;
pub mod sequence;
pub mod task;
pub mod tree;

pub use composite::Composite;
pub use decorator::{DecoratorData, Inverter, Repeater, RepeaterData};
pub use introspect::{active_tasks, find_tasks, ActiveTask};
pub use leaf::{Action, Condition, LeafData, Wait, WaitData};
pub use selector::{SelectorData, SelectorDecider, SelectorDecision};
pub use sequence::{Sequence, SequenceData, SequenceDecision};
pub use task::Task;
pub use tree::BehaviorTree;
