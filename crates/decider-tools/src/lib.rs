//! Tooling primitives for the `decider` engine.
//!
//! Tasks record arbitration events through the agent's blackboard; tooling drains them after the
//! tick. Nothing here is needed to run a tree.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{
    emit, NullTraceSink, TraceEvent, TraceLog, TraceSink, VecTraceSink, TRACE_LOG, TRACE_SINK,
};
