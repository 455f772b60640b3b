//! Page controller
//!
//! Reads the bootstrap data once and mounts the matching view. Every view
//! shares one [`AppServices`] provided as context.

use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info};
use shared_types::{ClaimEdit, EntityId};

use crate::components::actions::{AddInputForm, AddLegacyForm, ConflictAnalysis, TrackedButton};
use crate::components::claims::ClaimEditList;
use crate::components::name::DocumentName;
use crate::components::styles::APP_STYLES;
use crate::components::summary::SummarySlot;
use crate::config::ui_config;
use crate::name_editor::NameEditor;
use crate::page::{InputRecord, PageData};
use crate::services::AppServices;
use crate::state::StateCell;
use crate::tracker::Job;

#[component]
pub fn AnnotatorApp() -> Element {
    use_context_provider(|| AppServices::new(ui_config().clone()));
    let page = use_hook(|| {
        let page = PageData::load();
        match &page {
            Ok(data) => info!("Mounting {} page", data.kind()),
            Err(e) => error!("Failed to read page data: {}", e),
        }
        page
    });

    let body = match page {
        Ok(PageData::Inputs { inputs }) => rsx! { InputsPage { inputs } },
        Ok(PageData::Input { input, claim_edits }) => rsx! { InputPage { input, claim_edits } },
        Ok(PageData::ClaimEdits { claim_edits }) => rsx! { ClaimEditsPage { claim_edits } },
        Ok(PageData::Conflicts) => rsx! { ConflictsPage {} },
        Err(message) => rsx! {
            div { class: "error-banner", "{message}" }
        },
    };

    rsx! {
        style { {APP_STYLES} }
        main { class: "annotator", {body} }
    }
}

#[component]
fn InputsPage(inputs: Vec<InputRecord>) -> Element {
    rsx! {
        section {
            class: "add-inputs",
            h2 { "Add Input" }
            AddInputForm {}
            AddLegacyForm {}
        }
        section {
            class: "input-list",
            h2 { "Inputs" }
            if inputs.is_empty() {
                p { class: "empty", "No inputs yet." }
            }
            for input in inputs {
                InputCard { key: "{input.id}", input }
            }
        }
    }
}

#[component]
fn InputCard(input: InputRecord) -> Element {
    let services = use_context::<AppServices>();
    let href = format!("/{}/{}", services.config.resource, input.id);
    let mut title = use_signal(|| {
        if input.document_name.trim().is_empty() {
            format!("Input {}", input.id)
        } else {
            input.document_name.clone()
        }
    });

    rsx! {
        article {
            class: "input-card",
            header {
                a { href: "{href}", "{title}" }
                if let Some(kind) = input.document_type.as_ref() {
                    span { class: "document-type", "{kind}" }
                }
            }
            SummarySlot {
                input_id: input.id.clone(),
                summary: input.summary(),
                on_renamed: move |name: String| title.set(name),
            }
        }
    }
}

#[component]
fn InputPage(input: InputRecord, claim_edits: Vec<ClaimEdit>) -> Element {
    let services = use_context::<AppServices>();
    let input_id: EntityId = input.id.clone();
    let editor = use_signal(|| NameEditor::new(Some(input.id.clone()), input.document_name.clone()));

    rsx! {
        article {
            class: "input-detail",
            header {
                DocumentName { editor }
                if let Some(url) = input.document_url.as_ref() {
                    a { class: "document-url", href: "{url}", target: "_blank", "{url}" }
                }
            }
            SummarySlot {
                input_id: input_id.clone(),
                summary: input.summary(),
                on_renamed: move |name: String| editor.with_state(|e| e.adopt(name)),
            }
            div {
                class: "input-actions",
                TrackedButton {
                    idle_label: "Generate Edits",
                    job_label: "Generating edits...",
                    job: Job::generate_edits(input_id.clone()),
                }
                TrackedButton {
                    class: "danger",
                    idle_label: "Delete",
                    job_label: "Deleting...",
                    job: Job::delete(input_id.clone(), services.config.landing_location.clone()),
                }
            }
            section {
                class: "claim-edits",
                h2 { "Claim Edits" }
                ClaimEditList { claim_edits, show_input: false }
            }
        }
    }
}

#[component]
fn ClaimEditsPage(claim_edits: Vec<ClaimEdit>) -> Element {
    rsx! {
        section {
            class: "claim-edits",
            h2 { "Claim Edits" }
            ClaimEditList { claim_edits, show_input: true }
        }
    }
}

#[component]
fn ConflictsPage() -> Element {
    rsx! {
        section {
            class: "conflicts",
            h2 { "Conflict Analysis" }
            ConflictAnalysis {}
        }
    }
}
