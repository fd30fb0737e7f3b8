//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits for easy access.
//!
//! # Usage
//!
//! ```rust,ignore
//! use relay::prelude::*;
//! ```

pub use crate::engine::{
    DEFAULT_RECURSION_LIMIT, EventStream, GraphConfig, TokenChunk, TokenStream, Workflow,
    WorkflowEngine, WorkflowInput,
};
pub use crate::error::{EngineError, Error, InterpretError, Result};
pub use crate::event::{OneOrMany, Report, RoutingDecision, StageState, WorkflowEvent};
pub use crate::interpreter::{
    NO_REPORT, NOT_REACHED, Outcome, ROUTING_STAGE, TERMINAL_STAGE, interpret,
};
pub use crate::message::{Message, MessageRole};
pub use crate::mock::{MockEngine, MockWorkflow};
pub use crate::session::{NOT_BUILT, WorkflowSession};
pub use crate::transcript::Transcript;
