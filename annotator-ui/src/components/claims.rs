use dioxus::prelude::*;
use shared_types::ClaimEdit;

use crate::services::AppServices;

const EMPTY_FIELD: &str = "Not specified";

/// Labelled columns of one claim edit, blank columns filled in.
fn claim_edit_fields(edit: &ClaimEdit) -> [(&'static str, String); 4] {
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(EMPTY_FIELD)
            .to_string()
    };
    [
        ("Description", text(&edit.edit_description)),
        ("Message", text(&edit.edit_message)),
        ("Conditions", text(&edit.edit_conditions)),
        ("Non-conditions", text(&edit.edit_non_conditions)),
    ]
}

/// Claim edits as cards. `show_input` adds a link to each owning input.
#[component]
pub fn ClaimEditList(claim_edits: Vec<ClaimEdit>, show_input: bool) -> Element {
    let services = use_context::<AppServices>();

    if claim_edits.is_empty() {
        return rsx! {
            p { class: "empty", "No claim edits yet." }
        };
    }

    let cards = claim_edits.iter().map(|edit| {
        let href = format!("/{}/{}", services.config.resource, edit.input_id);
        let input_name = edit
            .input_name
            .clone()
            .unwrap_or_else(|| format!("Input {}", edit.input_id));
        let fields = claim_edit_fields(edit);
        rsx! {
            article {
                key: "{edit.id}",
                class: "claim-edit",
                if show_input {
                    a { class: "claim-edit-input", href: "{href}", "{input_name}" }
                }
                dl {
                    for (label, value) in fields {
                        dt { "{label}" }
                        dd { "{value}" }
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "claim-edit-list", {cards} }
    }
}
