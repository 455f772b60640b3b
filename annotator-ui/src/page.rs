//! Server-rendered page bootstrap.
//!
//! The backend embeds the initial content as JSON in
//! `<script id="page-data" type="application/json">`; the tag on `page`
//! selects which view the controller mounts.

use serde::Deserialize;
use shared_types::{ClaimEdit, EntityId, SummaryPayload};

use crate::config::read_inline_json;

pub const PAGE_DATA_ELEMENT_ID: &str = "page-data";

/// One input document as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputRecord {
    pub id: EntityId,
    #[serde(default)]
    pub document_name: String,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_summary: Option<SummaryPayload>,
}

impl InputRecord {
    /// Stored summary, treating blank content as absent.
    pub fn summary(&self) -> Option<SummaryPayload> {
        match &self.document_summary {
            Some(SummaryPayload::Text(text)) if text.trim().is_empty() => None,
            Some(SummaryPayload::Segments(segments)) if segments.is_empty() => None,
            other => other.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageData {
    /// All inputs with the add forms
    Inputs {
        #[serde(default)]
        inputs: Vec<InputRecord>,
    },
    /// A single input with the claim edits generated from it
    Input {
        input: InputRecord,
        #[serde(default)]
        claim_edits: Vec<ClaimEdit>,
    },
    /// Every claim edit across all inputs
    ClaimEdits {
        #[serde(default)]
        claim_edits: Vec<ClaimEdit>,
    },
    /// Cross-input conflict analysis
    Conflicts,
}

impl PageData {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Inputs { .. } => "inputs",
            Self::Input { .. } => "input",
            Self::ClaimEdits { .. } => "claim_edits",
            Self::Conflicts => "conflicts",
        }
    }

    /// Read the bootstrap element. A page without one is the inputs list.
    pub fn load() -> Result<Self, String> {
        match read_inline_json(PAGE_DATA_ELEMENT_ID) {
            Some(raw) => Self::from_json(&raw).map_err(|e| format!("invalid page data: {e}")),
            None => Ok(Self::Inputs { inputs: Vec::new() }),
        }
    }
}
