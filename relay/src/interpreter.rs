//! The stream interpreter.
//!
//! Consumes the lazily-produced sequence of [`WorkflowEvent`]s from an
//! external workflow execution and decides when the workflow has logically
//! finished, without understanding the internals of the agent graph. The
//! interpreter has two logical states — awaiting the terminal stage, and
//! done — and performs no concurrent work of its own: it pulls one event at
//! a time, and each pull may suspend while the engine computes the next step.

use futures::{Stream, StreamExt, pin_mut};
use tracing::{debug, info};

use crate::error::InterpretError;
use crate::event::WorkflowEvent;

/// Name of the stage that decides what runs next.
pub const ROUTING_STAGE: &str = "router";

/// Routing value that signals workflow completion.
pub const TERMINAL_STAGE: &str = "final_report";

/// Returned when the terminal stage was reached without report content.
pub const NO_REPORT: &str = "No report available";

/// Returned when the stream ended without reaching the terminal stage.
pub const NOT_REACHED: &str = "Workflow did not reach final report";

/// How a workflow run concluded.
///
/// A run that ends without a final report is a valid (if unhelpful) outcome,
/// so all three cases are values rather than errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The terminal stage was reached and carried report content.
    Report(String),
    /// The terminal stage was reached but the report was absent or empty.
    NoReport,
    /// The stream was exhausted before any terminal routing decision.
    NotReached,
}

impl Outcome {
    /// Whether the run produced actual report content.
    #[must_use]
    pub const fn is_report(&self) -> bool {
        matches!(self, Self::Report(_))
    }

    /// The user-facing text for this outcome.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Report(content) => content,
            Self::NoReport => NO_REPORT.to_string(),
            Self::NotReached => NOT_REACHED.to_string(),
        }
    }
}

/// Consume a workflow event stream until the terminal stage is observed.
///
/// Events are inspected in arrival order. Events without a [`ROUTING_STAGE`]
/// entry are intermediate steps and are skipped. A routing event's payload
/// is decoded once at this boundary; its `next_agent` resolves last-wins.
/// When it names [`TERMINAL_STAGE`], the report is taken from the same stage
/// state (last-wins again) and the remainder of the stream is abandoned —
/// an intentional early exit, not a failure.
///
/// The step-count ceiling is the engine's responsibility; a stream that ends
/// early for any reason yields [`Outcome::NotReached`].
///
/// # Errors
///
/// Propagates [`InterpretError`] when the routing payload is missing or
/// fails to decode — an upstream contract violation the caller cannot fix.
pub async fn interpret<S>(events: S) -> Result<Outcome, InterpretError>
where
    S: Stream<Item = WorkflowEvent>,
{
    pin_mut!(events);

    let mut step = 0_usize;
    while let Some(event) = events.next().await {
        step += 1;

        let Some(state) = event.get(ROUTING_STAGE) else {
            debug!(
                step,
                stages = ?event.stage_names().collect::<Vec<_>>(),
                "intermediate step",
            );
            continue;
        };

        let decision = state.decode_routing()?;
        let next_stage = decision.next_stage().unwrap_or_default();
        debug!(step, next_stage, "routing decision");

        if next_stage == TERMINAL_STAGE {
            let outcome = state.final_report().map_or(Outcome::NoReport, |report| {
                Outcome::Report(report.content.clone())
            });
            info!(step, has_report = outcome.is_report(), "workflow reached final report");
            return Ok(outcome);
        }
    }

    info!(steps = step, "workflow ended without final report");
    Ok(Outcome::NotReached)
}

#[cfg(test)]
mod tests {
    use futures::stream;

    use super::*;
    use crate::event::{Report, StageState};

    fn routing_event(payload: &str) -> WorkflowEvent {
        WorkflowEvent::stage(
            ROUTING_STAGE,
            StageState {
                routing: Some(payload.to_string()),
                ..StageState::default()
            },
        )
    }

    fn terminal_event(reports: Option<Vec<Report>>) -> WorkflowEvent {
        WorkflowEvent::stage(
            ROUTING_STAGE,
            StageState {
                routing: Some(r#"{"next_agent":"final_report"}"#.to_string()),
                report: reports.map(Into::into),
                ..StageState::default()
            },
        )
    }

    #[tokio::test]
    async fn no_routing_events_yields_not_reached() {
        let events = vec![
            WorkflowEvent::stage("planner", StageState::default()),
            WorkflowEvent::stage("writer", StageState::default()),
        ];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        assert_eq!(outcome, Outcome::NotReached);
        assert_eq!(outcome.into_text(), NOT_REACHED);
    }

    #[tokio::test]
    async fn terminal_short_circuits_remaining_events() {
        // A poisoned event after the terminal one must never be decoded.
        let events = vec![
            terminal_event(Some(vec![Report::new("Done.")])),
            routing_event("this would fail to decode"),
        ];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        assert_eq!(outcome, Outcome::Report("Done.".to_string()));
    }

    #[tokio::test]
    async fn sequence_routing_resolves_last_wins() {
        let events = vec![routing_event(
            r#"{"next_agent":["a","b","final_report"]}"#,
        )];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        // Resolved to the terminal stage, but no report attached.
        assert_eq!(outcome, Outcome::NoReport);
    }

    #[tokio::test]
    async fn sequence_report_resolves_last_wins() {
        let events = vec![terminal_event(Some(vec![
            Report::new("R1"),
            Report::new("R2"),
        ]))];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        assert_eq!(outcome, Outcome::Report("R2".to_string()));
    }

    #[tokio::test]
    async fn absent_report_yields_no_report_sentinel() {
        let outcome = interpret(stream::iter(vec![terminal_event(None)]))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::NoReport);
        assert_eq!(outcome.into_text(), NO_REPORT);
    }

    #[tokio::test]
    async fn empty_content_report_is_returned_as_is() {
        // Only an absent field or an empty sequence degrades to the
        // sentinel; a present report with empty content passes through.
        let events = vec![terminal_event(Some(vec![Report::new("")]))];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        assert_eq!(outcome, Outcome::Report(String::new()));
        assert_ne!(outcome, Outcome::NoReport);
    }

    #[tokio::test]
    async fn empty_report_sequence_yields_no_report_sentinel() {
        let outcome = interpret(stream::iter(vec![terminal_event(Some(Vec::new()))]))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::NoReport);
    }

    #[tokio::test]
    async fn malformed_routing_propagates_error() {
        let events = vec![routing_event("{ not valid json")];
        let result = interpret(stream::iter(events)).await;
        assert!(matches!(result, Err(InterpretError::MalformedRouting(_))));
    }

    #[tokio::test]
    async fn routing_stage_without_payload_is_error() {
        let events = vec![WorkflowEvent::stage(ROUTING_STAGE, StageState::default())];
        let result = interpret(stream::iter(events)).await;
        assert!(matches!(result, Err(InterpretError::MissingRouting)));
    }

    #[tokio::test]
    async fn non_terminal_then_terminal_scenario() {
        let events = vec![
            routing_event(r#"{"next_agent":"writer"}"#),
            terminal_event(Some(vec![Report::new("Done.")])),
        ];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        assert_eq!(outcome.into_text(), "Done.");
    }

    #[tokio::test]
    async fn stream_ends_before_terminal_stage() {
        let events = vec![routing_event(r#"{"next_agent":"writer"}"#)];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        assert_eq!(outcome.into_text(), NOT_REACHED);
    }

    #[tokio::test]
    async fn empty_routing_sequence_is_non_terminal() {
        let events = vec![routing_event(r#"{"next_agent":[]}"#)];
        let outcome = interpret(stream::iter(events)).await.unwrap();
        assert_eq!(outcome, Outcome::NotReached);
    }
}
