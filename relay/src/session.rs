//! The workflow session: build once, invoke per turn.
//!
//! A [`WorkflowSession`] holds the handle to an externally compiled workflow
//! and the recursion limit to run it with. The conversation transcript is
//! caller-owned and passed explicitly into each turn-processing call, so the
//! turn logic carries no ambient state and is independently testable.

use std::fmt::Write as _;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::engine::{GraphConfig, TokenChunk, Workflow, WorkflowEngine, WorkflowInput};
use crate::error::Result;
use crate::interpreter::interpret;
use crate::message::Message;
use crate::transcript::Transcript;

/// Returned when a turn is invoked before the workflow has been built.
///
/// Invoking before setup is an expected caller mistake, so it is reported as
/// a user-facing value rather than an error.
pub const NOT_BUILT: &str = "Workflow has not been built yet. Please update settings first.";

/// A chat session over one compiled workflow.
pub struct WorkflowSession {
    workflow: Option<Box<dyn Workflow>>,
    recursion_limit: usize,
}

impl std::fmt::Debug for WorkflowSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowSession")
            .field("built", &self.workflow.is_some())
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowSession {
    /// Create a session with no workflow built yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workflow: None,
            recursion_limit: crate::engine::DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Whether a workflow has been built for this session.
    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.workflow.is_some()
    }

    /// Build (or rebuild) the workflow through the external engine.
    ///
    /// The configuration is passed through opaquely; only the recursion
    /// limit is retained on this side of the boundary.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::EngineError`] when graph compilation fails.
    pub async fn build(
        &mut self,
        engine: &dyn WorkflowEngine,
        config: &GraphConfig,
    ) -> Result<()> {
        info!(
            server = %config.server,
            model = %config.model,
            recursion_limit = config.recursion_limit,
            "building workflow",
        );
        self.workflow = Some(engine.compile(config).await?);
        self.recursion_limit = config.recursion_limit;
        Ok(())
    }

    /// The compiled graph's Mermaid diagram, if the engine exposes one.
    #[must_use]
    pub fn diagram(&self) -> Option<String> {
        self.workflow.as_deref().and_then(Workflow::diagram)
    }

    /// Run the workflow on one question and interpret its event stream.
    ///
    /// Returns the final report content, or one of the fixed sentinel
    /// strings when the workflow is unbuilt, reached the terminal stage
    /// without content, or ended without reaching it at all.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::InterpretError`] when the engine emits a
    /// malformed routing payload.
    pub async fn invoke(&self, question: &str) -> Result<String> {
        let Some(workflow) = self.workflow.as_deref() else {
            warn!("invoked before workflow was built");
            return Ok(NOT_BUILT.to_string());
        };

        let events = workflow.stream(WorkflowInput::new(question), self.recursion_limit);
        let outcome = interpret(events).await?;
        Ok(outcome.into_text())
    }

    /// Process one conversational turn against a caller-owned transcript.
    ///
    /// Appends the user message, invokes the workflow, and appends the
    /// assistant reply. On error the user message stays in the transcript
    /// and no assistant message is appended; the caller decides how to
    /// surface the failure.
    ///
    /// # Errors
    ///
    /// Same as [`WorkflowSession::invoke`].
    pub async fn run_turn(
        &self,
        transcript: &mut Transcript,
        input: impl Into<String>,
    ) -> Result<String> {
        let input = input.into();
        transcript.push(Message::user(input.clone()));

        let reply = self.invoke(&input).await?;
        transcript.push(Message::assistant(reply.clone()));
        debug!(turns = transcript.len(), "turn completed");
        Ok(reply)
    }

    /// Process one turn at token granularity, rendering incrementally.
    ///
    /// When the engine supports token streaming, assistant deltas are folded
    /// into the growing response and `on_render` is invoked with the text so
    /// far after each chunk; tool outputs are folded in with a marker line.
    /// Engines without token streaming fall back to [`run_turn`].
    ///
    /// [`run_turn`]: WorkflowSession::run_turn
    ///
    /// # Errors
    ///
    /// Propagates [`crate::EngineError`] from the token stream, or the
    /// fallback path's errors.
    pub async fn run_turn_streamed<F>(
        &self,
        transcript: &mut Transcript,
        input: impl Into<String>,
        mut on_render: F,
    ) -> Result<String>
    where
        F: FnMut(&str),
    {
        let input = input.into();

        let Some(mut tokens) = self
            .workflow
            .as_deref()
            .and_then(|w| w.stream_tokens(WorkflowInput::new(&input)))
        else {
            debug!("engine does not stream tokens, falling back to event interpretation");
            return self.run_turn(transcript, input).await;
        };

        transcript.push(Message::user(input));

        let mut full_response = String::new();
        while let Some(chunk) = tokens.next().await {
            match chunk? {
                TokenChunk::Assistant(delta) => full_response.push_str(&delta),
                TokenChunk::Tool(output) => {
                    let _ = write!(full_response, "🛠️ Used tool to get: {output}\n\n");
                }
            }
            on_render(&full_response);
        }

        transcript.push(Message::assistant(full_response.clone()));
        debug!(turns = transcript.len(), "streamed turn completed");
        Ok(full_response)
    }
}
