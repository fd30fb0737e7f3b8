//! Mock workflow engine for testing.
//!
//! Provides a scripted engine that replays predefined events, useful for
//! exercising the front-end without a real graph or model calls.

use async_trait::async_trait;
use futures::stream;

use crate::engine::{
    EventStream, GraphConfig, TokenChunk, TokenStream, Workflow, WorkflowEngine, WorkflowInput,
};
use crate::error::EngineError;
use crate::event::WorkflowEvent;

/// A compiled workflow that replays scripted events.
///
/// Each call to [`Workflow::stream`] yields the scripted events in order.
/// The recursion limit is honored by truncation, mimicking the engine-side
/// step budget.
#[derive(Debug, Clone, Default)]
pub struct MockWorkflow {
    events: Vec<WorkflowEvent>,
    tokens: Option<Vec<TokenChunk>>,
    diagram: Option<String>,
}

impl MockWorkflow {
    /// Create a mock workflow that will replay the given events.
    #[must_use]
    pub fn new(events: Vec<WorkflowEvent>) -> Self {
        Self {
            events,
            tokens: None,
            diagram: None,
        }
    }

    /// Script a token stream for [`Workflow::stream_tokens`].
    #[must_use]
    pub fn with_tokens(mut self, tokens: Vec<TokenChunk>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Attach a Mermaid diagram.
    #[must_use]
    pub fn with_diagram(mut self, diagram: impl Into<String>) -> Self {
        self.diagram = Some(diagram.into());
        self
    }
}

impl Workflow for MockWorkflow {
    fn stream(&self, _input: WorkflowInput, recursion_limit: usize) -> EventStream {
        let events: Vec<WorkflowEvent> =
            self.events.iter().take(recursion_limit).cloned().collect();
        Box::pin(stream::iter(events))
    }

    fn stream_tokens(&self, _input: WorkflowInput) -> Option<TokenStream> {
        let tokens = self.tokens.clone()?;
        Some(Box::pin(stream::iter(tokens.into_iter().map(Ok))))
    }

    fn diagram(&self) -> Option<String> {
        self.diagram.clone()
    }
}

/// An engine whose compilation step hands back a preconfigured workflow.
#[derive(Debug, Clone, Default)]
pub struct MockEngine {
    workflow: MockWorkflow,
    fail_compile: Option<String>,
}

impl MockEngine {
    /// Create an engine that compiles into the given workflow.
    #[must_use]
    pub fn new(workflow: MockWorkflow) -> Self {
        Self {
            workflow,
            fail_compile: None,
        }
    }

    /// Make compilation fail with the given message.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            workflow: MockWorkflow::default(),
            fail_compile: Some(message.into()),
        }
    }
}

#[async_trait]
impl WorkflowEngine for MockEngine {
    async fn compile(&self, _config: &GraphConfig) -> Result<Box<dyn Workflow>, EngineError> {
        if let Some(message) = &self.fail_compile {
            return Err(EngineError::compile(message));
        }
        Ok(Box::new(self.workflow.clone()))
    }
}
