//! Wire model for workflow step-events.
//!
//! One [`WorkflowEvent`] is emitted per executed step of the external graph,
//! tagged by the stage that produced it. The routing stage's payload arrives
//! as a serialized JSON object ([`RoutingDecision`]); the report travels as
//! a separate field on the same stage state.
//!
//! Fields that may be either a scalar or an ordered sequence are decoded
//! into [`OneOrMany`] at the boundary, where the last-wins reduction lives:
//! upstream agents append successive values, and only the most recent one is
//! authoritative.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::InterpretError;

/// A value that may arrive as a single item or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A single value.
    One(T),
    /// An ordered sequence of values; the last element is authoritative.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// The authoritative value under the last-wins policy.
    ///
    /// Returns `None` for an empty sequence.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.last(),
        }
    }

    /// Consume self, returning the authoritative value.
    #[must_use]
    pub fn into_last(self) -> Option<T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(mut values) => values.pop(),
        }
    }

    /// Number of carried values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(values) => values.len(),
        }
    }

    /// Whether no value is carried (empty sequence).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        Self::One(value)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values)
    }
}

/// The terminal report payload: an object exposing its text content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The report text.
    pub content: String,
}

impl Report {
    /// Create a report from its text content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// The routing stage's decision about which stage runs next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Name of the next stage to invoke; may be a scalar or a sequence of
    /// successive routing intents.
    pub next_agent: OneOrMany<String>,
}

impl RoutingDecision {
    /// The resolved next stage under the last-wins policy.
    #[must_use]
    pub fn next_stage(&self) -> Option<&str> {
        self.next_agent.last().map(String::as_str)
    }
}

/// The output of one stage inside a step-event.
///
/// Wire field names follow the upstream engine: `router_response` carries
/// the serialized [`RoutingDecision`], `reporter_response` the report(s).
/// Any other stage-specific fields are retained opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageState {
    /// Serialized routing decision, present on routing-stage events.
    #[serde(
        default,
        rename = "router_response",
        skip_serializing_if = "Option::is_none"
    )]
    pub routing: Option<String>,

    /// Report payload, present once the workflow has produced one.
    #[serde(
        default,
        rename = "reporter_response",
        skip_serializing_if = "Option::is_none"
    )]
    pub report: Option<OneOrMany<Report>>,

    /// Stage-specific fields this front-end does not inspect.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StageState {
    /// Decode the routing payload into a [`RoutingDecision`].
    ///
    /// # Errors
    ///
    /// [`InterpretError::MissingRouting`] when no payload is present, and
    /// [`InterpretError::MalformedRouting`] when it fails to decode — both
    /// signal a contract violation by the upstream engine.
    pub fn decode_routing(&self) -> Result<RoutingDecision, InterpretError> {
        let raw = self.routing.as_deref().ok_or(InterpretError::MissingRouting)?;
        Ok(serde_json::from_str(raw)?)
    }

    /// The authoritative report under the last-wins policy, if any.
    #[must_use]
    pub fn final_report(&self) -> Option<&Report> {
        self.report.as_ref().and_then(OneOrMany::last)
    }
}

/// One step-event emitted by the workflow engine: a mapping from the name of
/// the stage that ran to its output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    /// Stage outputs keyed by stage name.
    #[serde(flatten)]
    stages: BTreeMap<String, StageState>,
}

impl WorkflowEvent {
    /// Create an empty event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an event carrying a single stage's output.
    #[must_use]
    pub fn stage(name: impl Into<String>, state: StageState) -> Self {
        let mut stages = BTreeMap::new();
        stages.insert(name.into(), state);
        Self { stages }
    }

    /// Look up a stage's output by name.
    #[must_use]
    pub fn get(&self, stage: &str) -> Option<&StageState> {
        self.stages.get(stage)
    }

    /// Names of the stages that produced output in this event.
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }
}
