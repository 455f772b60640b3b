//! Shared types between the annotator backend and UI
//!
//! These types describe the JSON bodies exchanged with the backend's
//! `/input/{id}/*`, `/add_input*` and `/analyze_conflicts` endpoints.
//!
//! Serializable with serde for JSON over HTTP

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used when stored content arrives as several segments.
pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// Separator used when a generated summary arrives as a list of lines.
pub const SUMMARY_LINE_SEPARATOR: &str = "\n";

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque identifier of a server-side input document.
///
/// The backend emits integer ids, older page templates emit strings; both
/// deserialize to the same value and always format as their string form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "RawEntityId", into = "String")]
pub struct EntityId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntityId {
    Int(i64),
    Text(String),
}

impl From<RawEntityId> for EntityId {
    fn from(raw: RawEntityId) -> Self {
        match raw {
            RawEntityId::Int(value) => Self(value.to_string()),
            RawEntityId::Text(value) => Self(value),
        }
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Content
// ============================================================================

/// Text content that may arrive either as one string or as ordered segments.
///
/// Normalize once with [`SummaryPayload::join`] at the boundary; everything
/// past that point only deals with a single `String`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SummaryPayload {
    Text(String),
    Segments(Vec<String>),
}

impl SummaryPayload {
    pub fn join(self, separator: &str) -> String {
        match self {
            Self::Text(text) => text,
            Self::Segments(segments) => segments.join(separator),
        }
    }
}

impl From<String> for SummaryPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for SummaryPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<String>> for SummaryPayload {
    fn from(segments: Vec<String>) -> Self {
        Self::Segments(segments)
    }
}

// ============================================================================
// Claim edits
// ============================================================================

/// A validation rule extracted from an input document by Generate Edits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimEdit {
    pub id: EntityId,
    pub input_id: EntityId,
    /// Name of the owning input, present on cross-input listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_name: Option<String>,
    #[serde(default)]
    pub edit_description: Option<String>,
    #[serde(default)]
    pub edit_message: Option<String>,
    #[serde(default)]
    pub edit_conditions: Option<String>,
    #[serde(default)]
    pub edit_non_conditions: Option<String>,
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /input/{id}/update`.
///
/// Serializes as a single-key object, e.g. `{"document_summary": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputUpdate {
    DocumentSummary(String),
    DocumentName(String),
}

// ============================================================================
// Responses
// ============================================================================

/// Envelope returned by every backend action endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionResponse {
    pub success: bool,
    /// Human-readable result shown to the user on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Generated or analysed markup (summarize, add item, analyze conflicts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryPayload>,
    /// Name proposed by the summarizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_name: Option<String>,
    /// Set when an item was added but its summarization failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summarize_error: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<SummaryPayload>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}
