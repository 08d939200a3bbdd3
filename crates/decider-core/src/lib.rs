//! Per-agent execution context and value types for the `decider` behavior-tree engine.
//!
//! Trees are immutable and shared; everything that changes while an agent runs lives in its
//! [`AgentData`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod blackboard;
pub mod config;
pub mod decision;
pub mod error;
pub mod parameter;
pub mod status;
pub mod tick;

pub use agent::{AgentData, TaskData};
pub use blackboard::{BbKey, Blackboard};
pub use config::{EngineConfig, DEFAULT_MAX_TASK_LEVELS};
pub use decision::{is_possible, Decision, DecisionData, IMPOSSIBLE, WILLING};
pub use error::{EngineError, Result};
pub use parameter::TaskParameter;
pub use status::ExecutionStatus;
pub use tick::TickContext;
