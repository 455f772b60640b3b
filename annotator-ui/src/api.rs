use async_trait::async_trait;
use gloo_net::http::Request;
use shared_types::{ActionResponse, EntityId, InputUpdate};

use crate::config::UiConfig;
use crate::error::ActionError;

pub const ADD_LEGACY_ITEM_PATH: &str = "/add_input_legacy";
pub const ANALYZE_CONFLICTS_PATH: &str = "/analyze_conflicts";

/// Ordered form fields, sent as multipart form data.
pub type FormFields = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Form(FormFields),
}

/// One backend round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Update {
        entity_id: EntityId,
        update: InputUpdate,
    },
    Summarize {
        entity_id: EntityId,
    },
    GenerateEdits {
        entity_id: EntityId,
    },
    Delete {
        entity_id: EntityId,
    },
    AddItem {
        action: String,
        fields: FormFields,
    },
    AddLegacyItem {
        fields: FormFields,
    },
    AnalyzeConflicts,
}

impl ApiCall {
    pub fn method(&self) -> Method {
        match self {
            Self::AnalyzeConflicts => Method::Get,
            _ => Method::Post,
        }
    }

    /// Path relative to the API base, with `resource` naming the item collection.
    pub fn path(&self, resource: &str) -> String {
        match self {
            Self::Update { entity_id, .. } => format!("/{resource}/{entity_id}/update"),
            Self::Summarize { entity_id } => format!("/{resource}/{entity_id}/summarize"),
            Self::GenerateEdits { entity_id } => format!("/{resource}/{entity_id}/generate_edits"),
            Self::Delete { entity_id } => format!("/{resource}/{entity_id}/delete"),
            Self::AddItem { action, .. } => action.clone(),
            Self::AddLegacyItem { .. } => ADD_LEGACY_ITEM_PATH.to_string(),
            Self::AnalyzeConflicts => ANALYZE_CONFLICTS_PATH.to_string(),
        }
    }

    pub fn body(&self) -> RequestBody {
        match self {
            Self::Update { update, .. } => RequestBody::Json(serde_json::json!(update)),
            Self::AddItem { fields, .. } | Self::AddLegacyItem { fields } => {
                RequestBody::Form(fields.clone())
            }
            _ => RequestBody::Empty,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Update { .. } => "update",
            Self::Summarize { .. } => "summarize",
            Self::GenerateEdits { .. } => "generate_edits",
            Self::Delete { .. } => "delete",
            Self::AddItem { .. } => "add_input",
            Self::AddLegacyItem { .. } => "add_input_legacy",
            Self::AnalyzeConflicts => "analyze_conflicts",
        }
    }
}

/// Classify a completed HTTP exchange.
///
/// Only a 2xx status with a JSON body whose `success` is true yields `Ok`.
/// For non-2xx statuses the body is still consulted for an `error` string.
pub fn interpret_response(status: u16, body: &str) -> Result<ActionResponse, ActionError> {
    let parsed = serde_json::from_str::<ActionResponse>(body);

    if !(200..300).contains(&status) {
        let server_error = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("error")?.as_str().map(str::to_string))
            .filter(|message| !message.trim().is_empty());
        return Err(match server_error {
            Some(message) => ActionError::ServerRejected { status, message },
            None => ActionError::HttpStatus { status },
        });
    }

    let response = parsed.map_err(|e| ActionError::MalformedResponse(e.to_string()))?;
    if !response.success {
        return Err(ActionError::application(response.error));
    }
    Ok(response)
}

/// Transport seam between the state machines and the network.
#[async_trait(?Send)]
pub trait Backend {
    async fn send(&self, call: ApiCall) -> Result<ActionResponse, ActionError>;
}

/// [`Backend`] over the browser's fetch API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBackend {
    api_base: String,
    resource: String,
}

impl HttpBackend {
    pub fn new(config: &UiConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            resource: config.resource.clone(),
        }
    }

    pub fn url_for(&self, call: &ApiCall) -> String {
        format!("{}{}", self.api_base, call.path(&self.resource))
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn send(&self, call: ApiCall) -> Result<ActionResponse, ActionError> {
        let url = self.url_for(&call);
        dioxus_logger::tracing::debug!("{} -> {}", call.name(), url);

        let builder = match call.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };

        let request = match call.body() {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.body(build_form_data(&fields)?),
        }
        .map_err(|e| ActionError::Network(format!("Failed to build request: {e}")))?;

        let response = request
            .send()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ActionError::Network(format!("Failed to read body: {e}")))?;

        interpret_response(status, &body)
    }
}

fn build_form_data(fields: &[(String, String)]) -> Result<web_sys::FormData, ActionError> {
    let form = web_sys::FormData::new()
        .map_err(|e| ActionError::Network(format!("FormData unavailable: {e:?}")))?;
    for (name, value) in fields {
        form.append_with_str(name, value)
            .map_err(|e| ActionError::Network(format!("Failed to append {name}: {e:?}")))?;
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(value: &str) -> EntityId {
        EntityId::new(value)
    }

    #[test]
    fn routes_match_backend() {
        let update = ApiCall::Update {
            entity_id: id("42"),
            update: InputUpdate::DocumentSummary("x".into()),
        };
        assert_eq!(update.path("input"), "/input/42/update");
        assert_eq!(update.method(), Method::Post);

        assert_eq!(
            ApiCall::Summarize { entity_id: id("3") }.path("input"),
            "/input/3/summarize"
        );
        assert_eq!(
            ApiCall::GenerateEdits { entity_id: id("3") }.path("input"),
            "/input/3/generate_edits"
        );
        assert_eq!(
            ApiCall::Delete { entity_id: id("3") }.path("input"),
            "/input/3/delete"
        );
        assert_eq!(
            ApiCall::AddLegacyItem { fields: vec![] }.path("input"),
            "/add_input_legacy"
        );
        assert_eq!(ApiCall::AnalyzeConflicts.method(), Method::Get);
        assert_eq!(ApiCall::AnalyzeConflicts.path("input"), "/analyze_conflicts");
    }

    #[test]
    fn add_item_posts_to_form_action() {
        let call = ApiCall::AddItem {
            action: "/add_input".into(),
            fields: vec![("document_url".into(), "https://example.com/a.pdf".into())],
        };
        assert_eq!(call.path("input"), "/add_input");
        assert_eq!(
            call.body(),
            RequestBody::Form(vec![(
                "document_url".into(),
                "https://example.com/a.pdf".into()
            )])
        );
    }

    #[test]
    fn update_body_is_single_field_json() {
        let call = ApiCall::Update {
            entity_id: id("1"),
            update: InputUpdate::DocumentName("Renamed".into()),
        };
        assert_eq!(
            call.body(),
            RequestBody::Json(json!({ "document_name": "Renamed" }))
        );
        let call = ApiCall::Update {
            entity_id: id("1"),
            update: InputUpdate::DocumentSummary("- item\n\nmore".into()),
        };
        assert_eq!(
            call.body(),
            RequestBody::Json(json!({ "document_summary": "- item\n\nmore" }))
        );
        assert_eq!(ApiCall::Delete { entity_id: id("1") }.body(), RequestBody::Empty);
    }

    #[test]
    fn url_uses_configured_base() {
        let backend = HttpBackend::new(&UiConfig {
            api_base: "http://localhost:81".into(),
            ..UiConfig::default()
        });
        assert_eq!(
            backend.url_for(&ApiCall::Delete { entity_id: id("9") }),
            "http://localhost:81/input/9/delete"
        );
    }

    #[test]
    fn success_response_passes() {
        let response =
            interpret_response(200, r#"{"success": true, "message": "saved"}"#).unwrap();
        assert_eq!(response.message.as_deref(), Some("saved"));
    }

    #[test]
    fn application_failure_carries_reason() {
        let err = interpret_response(200, r#"{"success": false, "error": "locked"}"#).unwrap_err();
        assert_eq!(err, ActionError::Application("locked".into()));

        let err = interpret_response(200, r#"{"success": false}"#).unwrap_err();
        assert_eq!(err.to_string(), "Unknown error occurred");
    }

    #[test]
    fn error_status_wins_over_body() {
        let err = interpret_response(500, "").unwrap_err();
        assert_eq!(err, ActionError::HttpStatus { status: 500 });

        // success flag in the body does not rescue an error status
        let err = interpret_response(500, r#"{"success": true}"#).unwrap_err();
        assert_eq!(err, ActionError::HttpStatus { status: 500 });
    }

    #[test]
    fn error_status_surfaces_server_reason() {
        let err =
            interpret_response(400, r#"{"success": false, "error": "No URL provided"}"#)
                .unwrap_err();
        assert_eq!(err.to_string(), "No URL provided");
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = interpret_response(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ActionError::MalformedResponse(_)));
    }
}
