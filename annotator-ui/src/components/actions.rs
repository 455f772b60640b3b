use dioxus::prelude::*;

use crate::markup::MarkupRenderer;
use crate::services::AppServices;
use crate::tracker::{run_tracked, Completion, Job, JobOutcome, TriggerState};

/// A trigger control's state plus what it needs to launch jobs.
#[derive(Clone, PartialEq)]
pub struct TrackedAction {
    trigger: Signal<TriggerState>,
    services: AppServices,
}

pub fn use_tracked_action(idle_label: &str, job_label: &str) -> TrackedAction {
    let services = use_context::<AppServices>();
    let idle_label = idle_label.to_string();
    let job_label = job_label.to_string();
    let trigger = use_signal(move || TriggerState::new(idle_label, job_label));
    TrackedAction { trigger, services }
}

impl TrackedAction {
    pub fn label(&self) -> String {
        self.trigger.read().label().to_string()
    }

    pub fn disabled(&self) -> bool {
        self.trigger.read().is_disabled()
    }

    /// Start `job` unless one is already running on this trigger.
    pub fn launch(&self, job: Job, on_success: Option<EventHandler<Completion>>) {
        let trigger = self.trigger;
        let services = self.services.clone();
        spawn(async move {
            let outcome = run_tracked(
                trigger,
                &services.backend,
                &services.host,
                job,
                services.config.tick_period_ms,
            )
            .await;
            if let (JobOutcome::Succeeded(completion), Some(handler)) = (outcome, on_success) {
                handler.call(completion);
            }
        });
    }
}

#[component]
pub fn TrackedButton(
    idle_label: String,
    job_label: String,
    job: Job,
    #[props(default)] class: String,
    on_success: Option<EventHandler<Completion>>,
) -> Element {
    let action = use_tracked_action(&idle_label, &job_label);
    let label = action.label();
    let disabled = action.disabled();

    rsx! {
        button {
            class: "tracked-button {class}",
            disabled,
            onclick: move |_| action.launch(job.clone(), on_success),
            "{label}"
        }
    }
}

fn form_fields(fields: &[(&str, String)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.trim().to_string()))
        .collect()
}

#[component]
pub fn AddInputForm() -> Element {
    let services = use_context::<AppServices>();
    let action = use_tracked_action("Add Input", "Adding...");
    let mut document_url = use_signal(String::new);
    let form_action = services.config.add_item_action.clone();
    let label = action.label();
    let disabled = action.disabled();

    rsx! {
        form {
            id: "addInputForm",
            class: "add-input-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                let fields = form_fields(&[("document_url", document_url())]);
                action.launch(Job::add_item(form_action.clone(), fields), None);
            },
            input {
                r#type: "url",
                name: "document_url",
                placeholder: "Document URL",
                value: "{document_url}",
                oninput: move |evt| document_url.set(evt.value()),
            }
            button { id: "addInputButton", r#type: "submit", disabled, "{label}" }
        }
    }
}

#[component]
pub fn AddLegacyForm() -> Element {
    let action = use_tracked_action("Add Legacy Code", "Adding legacy code...");
    let mut legacy_code = use_signal(String::new);
    let label = action.label();
    let disabled = action.disabled();

    rsx! {
        form {
            id: "addLegacyForm",
            class: "add-input-form",
            onsubmit: move |evt| {
                evt.prevent_default();
                let fields = form_fields(&[("legacy_code", legacy_code())]);
                action.launch(Job::add_legacy_item(fields), None);
            },
            textarea {
                name: "legacy_code",
                placeholder: "Paste legacy code",
                rows: "6",
                value: "{legacy_code}",
                oninput: move |evt| legacy_code.set(evt.value()),
            }
            button { r#type: "submit", disabled, "{label}" }
        }
    }
}

#[component]
pub fn ConflictAnalysis() -> Element {
    let services = use_context::<AppServices>();
    let mut results = use_signal(|| None::<String>);

    let on_results = move |completion: Completion| {
        if let Completion::Results(markup) = completion {
            results.set(Some(services.renderer.render(&markup)));
        }
    };

    rsx! {
        div {
            class: "conflict-analysis",
            TrackedButton {
                idle_label: "Analyze Conflicts",
                job_label: "Analyzing conflicts...",
                job: Job::analyze_conflicts(),
                on_success: on_results,
            }
            if let Some(html) = results() {
                div {
                    id: "conflictResults",
                    class: "conflict-results markdown-content",
                    dangerous_inner_html: "{html}"
                }
            }
        }
    }
}
