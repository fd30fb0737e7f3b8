//! The external workflow-engine boundary.
//!
//! Graph construction, compilation, model calls, and step budgeting all live
//! inside the engine. This module only defines the seam: the configuration
//! handed through opaquely at build time, the input mapping for one run, and
//! the traits a concrete engine implements to hand back a compiled workflow
//! that can be streamed.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::event::WorkflowEvent;

/// Default step-count ceiling enforced by the engine.
pub const DEFAULT_RECURSION_LIMIT: usize = 40;

fn default_recursion_limit() -> usize {
    DEFAULT_RECURSION_LIMIT
}

/// Opaque parameters passed through to the engine when building a graph.
///
/// Relay does not interpret these; they mirror what the engine's graph
/// constructor expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Model-serving backend identifier (e.g. "openai", "ollama").
    pub server: String,
    /// Model name.
    pub model: String,
    /// Endpoint override for self-hosted backends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_endpoint: Option<String>,
    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f64,
    /// Stop sequences, if the backend wants them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Step-count ceiling for one run, enforced by the engine.
    #[serde(default = "default_recursion_limit")]
    pub recursion_limit: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            model: String::new(),
            model_endpoint: None,
            temperature: 0.0,
            stop: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

/// The input mapping handed to the engine for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInput {
    /// The user's question, under the key the graph expects.
    pub research_question: String,
}

impl WorkflowInput {
    /// Create a run input from the user's question.
    #[must_use]
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            research_question: question.into(),
        }
    }
}

/// A lazily-produced, finite sequence of step-events.
pub type EventStream = Pin<Box<dyn Stream<Item = WorkflowEvent> + Send>>;

/// An incremental piece of a streamed assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenChunk {
    /// Incremental assistant text.
    Assistant(String),
    /// A completed tool invocation's output.
    Tool(String),
}

/// A lazily-produced sequence of token chunks for one turn.
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<TokenChunk, EngineError>> + Send>>;

/// A compiled workflow graph, ready to execute runs.
pub trait Workflow: Send + Sync {
    /// Execute one run, producing step-events lazily.
    ///
    /// The engine enforces `recursion_limit` as the bound on how many steps
    /// the stream may yield before ending.
    fn stream(&self, input: WorkflowInput, recursion_limit: usize) -> EventStream;

    /// Execute one run at token granularity, if the engine supports it.
    ///
    /// Engines without token streaming return `None`; callers fall back to
    /// event-level interpretation.
    fn stream_tokens(&self, input: WorkflowInput) -> Option<TokenStream> {
        let _ = input;
        None
    }

    /// A Mermaid rendering of the compiled graph, if the engine exposes one.
    fn diagram(&self) -> Option<String> {
        None
    }
}

/// Constructs and compiles workflow graphs.
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    /// Build and compile a graph from opaque configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compile`] when the graph cannot be built.
    async fn compile(&self, config: &GraphConfig) -> Result<Box<dyn Workflow>, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_config_defaults() {
        let config: GraphConfig = serde_json::from_str(r#"{"server":"ollama","model":"m"}"#)
            .unwrap();
        assert_eq!(config.recursion_limit, DEFAULT_RECURSION_LIMIT);
        assert!(config.stop.is_none());
    }

    #[test]
    fn workflow_input_wire_key() {
        let input = WorkflowInput::new("why is the sky blue?");
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"research_question":"why is the sky blue?"}"#);
    }
}
