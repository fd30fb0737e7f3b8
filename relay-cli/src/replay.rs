//! Replay engine: feeds recorded workflow events through the front-end.
//!
//! Each line of the events file is one JSON-encoded [`WorkflowEvent`], in
//! the order the original run emitted them. This is the concrete engine the
//! binary ships with; real graph engines plug in through the same
//! [`WorkflowEngine`] trait.

use std::path::{Path, PathBuf};

use futures::stream;
use relay::engine::{EventStream, GraphConfig, Workflow, WorkflowEngine, WorkflowInput};
use relay::error::EngineError;
use relay::event::WorkflowEvent;
use tracing::info;

/// A workflow that replays a pre-recorded event sequence.
#[derive(Debug, Clone)]
pub struct ReplayWorkflow {
    events: Vec<WorkflowEvent>,
}

impl ReplayWorkflow {
    /// Parse a JSON-Lines events file into a replayable workflow.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Compile`] when the file cannot be read or a
    /// line fails to decode.
    pub async fn from_file(path: &Path) -> Result<Self, EngineError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| EngineError::compile(format!("{}: {e}", path.display())))?;

        let mut events = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event: WorkflowEvent = serde_json::from_str(line).map_err(|e| {
                EngineError::compile(format!("{}:{}: {e}", path.display(), lineno + 1))
            })?;
            events.push(event);
        }

        info!(path = %path.display(), events = events.len(), "loaded replay events");
        Ok(Self { events })
    }
}

impl Workflow for ReplayWorkflow {
    fn stream(&self, _input: WorkflowInput, recursion_limit: usize) -> EventStream {
        let events: Vec<WorkflowEvent> =
            self.events.iter().take(recursion_limit).cloned().collect();
        Box::pin(stream::iter(events))
    }

    fn diagram(&self) -> Option<String> {
        // A replayed run has no live graph to draw.
        None
    }
}

/// Engine that compiles into a [`ReplayWorkflow`] from a recorded file.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    events_file: PathBuf,
}

impl ReplayEngine {
    /// Create a replay engine over the given events file.
    #[must_use]
    pub fn new(events_file: impl Into<PathBuf>) -> Self {
        Self {
            events_file: events_file.into(),
        }
    }
}

#[async_trait::async_trait]
impl WorkflowEngine for ReplayEngine {
    async fn compile(&self, _config: &GraphConfig) -> Result<Box<dyn Workflow>, EngineError> {
        let workflow = ReplayWorkflow::from_file(&self.events_file).await?;
        Ok(Box::new(workflow))
    }
}
