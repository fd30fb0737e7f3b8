//! Relay - a chat front-end for multi-agent workflow engines
//!
//! This crate wires user input into an externally constructed multi-agent
//! workflow graph and interprets the resulting step-event stream: it keeps
//! the chat transcript, invokes the compiled workflow, and decides when the
//! workflow has produced its final report.
//!
//! Graph construction, compilation, and model invocation are the engine's
//! responsibility — relay only holds the handle and consumes the stream.

pub mod engine;
pub mod error;
pub mod event;
pub mod interpreter;
pub mod message;
pub mod mock;
pub mod prelude;
pub mod session;
pub mod transcript;

pub use error::{EngineError, Error, InterpretError, Result};
pub use interpreter::{NO_REPORT, NOT_REACHED, Outcome, interpret};
pub use session::{NOT_BUILT, WorkflowSession};
