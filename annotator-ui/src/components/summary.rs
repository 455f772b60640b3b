//! Summary panels
//!
//! `EditableSummary` owns one [`EditablePanel`]; `SummarySlot` decides whether
//! an item shows its panel or a Generate Summary trigger, and remounts the
//! panel when a new summary arrives.

use dioxus::prelude::*;
use dioxus_logger::tracing::debug;
use shared_types::{EntityId, SummaryPayload};

use crate::components::actions::TrackedButton;
use crate::panel::{save_panel, EditablePanel, PanelState};
use crate::services::AppServices;
use crate::state::StateCell;
use crate::tracker::{Completion, Job};

#[component]
pub fn EditableSummary(input_id: Option<EntityId>, content: SummaryPayload) -> Element {
    let services = use_context::<AppServices>();
    let panel = use_signal(|| EditablePanel::mount(input_id.clone(), content.clone(), &services.renderer));
    let generation = panel.read().generation();

    // A successful save bumps the generation, which swaps in a fresh view
    // with its own handlers.
    rsx! {
        div {
            class: "editable-summary",
            "data-input-id": input_id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            for mount in std::iter::once(generation) {
                PanelView { key: "{mount}", panel }
            }
        }
    }
}

#[component]
fn PanelView(panel: Signal<EditablePanel>) -> Element {
    let services = use_context::<AppServices>();
    let state = panel.read().state().clone();

    match state {
        PanelState::Viewing { html, .. } => rsx! {
            div {
                class: "markdown-content",
                title: "Double-click to edit",
                ondoubleclick: move |_| {
                    panel.with_state(EditablePanel::activate);
                },
                dangerous_inner_html: "{html}"
            }
        },
        PanelState::Editing {
            draft, in_flight, ..
        } => {
            let saving = in_flight.is_some();
            rsx! {
                textarea {
                    class: "summary-editor",
                    value: "{draft}",
                    readonly: saving,
                    oninput: move |evt| panel.with_state(|p| p.edit(evt.value())),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Escape {
                            panel.with_state(EditablePanel::cancel);
                        }
                    },
                    onmounted: move |evt| async move {
                        if let Err(e) = evt.data().set_focus(true).await {
                            debug!("Could not focus summary editor: {:?}", e);
                        }
                    },
                }
                button {
                    class: "save-button",
                    disabled: saving,
                    onclick: move |_| {
                        let services = services.clone();
                        spawn(async move {
                            save_panel(panel, &services.backend, &services.host, &services.renderer)
                                .await;
                        });
                    },
                    if saving { "Saving..." } else { "💾 Save" }
                }
            }
        }
    }
}

/// `on_renamed` receives the name the summarizer proposed, if any.
#[component]
pub fn SummarySlot(
    input_id: EntityId,
    summary: Option<SummaryPayload>,
    on_renamed: Option<EventHandler<String>>,
) -> Element {
    let mut current = use_signal(|| summary.clone());
    let mut mounts = use_signal(|| 0u64);

    let on_summary = move |completion: Completion| {
        if let Completion::Summary {
            markup,
            generated_name,
        } = completion
        {
            current.set(Some(SummaryPayload::Text(markup)));
            mounts += 1;
            if let (Some(name), Some(handler)) = (generated_name, on_renamed) {
                handler.call(name);
            }
        }
    };

    match current() {
        Some(content) => rsx! {
            div {
                id: "summary-{input_id}",
                class: "summary-slot",
                for mount in std::iter::once(mounts()) {
                    EditableSummary {
                        key: "{mount}",
                        input_id: Some(input_id.clone()),
                        content: content.clone(),
                    }
                }
                TrackedButton {
                    class: "secondary",
                    idle_label: "Regenerate Summary",
                    job_label: "Generating summary...",
                    job: Job::summarize(input_id.clone()),
                    on_success: on_summary,
                }
            }
        },
        None => rsx! {
            div {
                id: "summary-{input_id}",
                class: "summary-slot",
                TrackedButton {
                    idle_label: "Generate Summary",
                    job_label: "Generating summary...",
                    job: Job::summarize(input_id.clone()),
                    on_success: on_summary,
                }
            }
        },
    }
}
