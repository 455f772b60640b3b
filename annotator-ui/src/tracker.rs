//! Tracked asynchronous actions
//!
//! A trigger control runs at most one backend job at a time. While the job is
//! in flight the control is disabled and its label counts elapsed seconds;
//! afterwards it is re-enabled on every path.

use dioxus_logger::tracing::{error, info, warn};
use shared_types::{ActionResponse, EntityId, SUMMARY_LINE_SEPARATOR};

use crate::api::{ApiCall, Backend, FormFields};
use crate::error::{ActionError, ErrorClass};
use crate::host::PageHost;
use crate::state::StateCell;

pub const DEFAULT_TICK_PERIOD_MS: u32 = 1000;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this input?";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionState {
    Idle,
    Pending { started_at_ms: f64 },
    Completed,
}

/// State of one trigger control.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerState {
    idle_label: String,
    job_label: String,
    label: String,
    state: ActionState,
}

impl TriggerState {
    pub fn new(idle_label: impl Into<String>, job_label: impl Into<String>) -> Self {
        let idle_label = idle_label.into();
        Self {
            label: idle_label.clone(),
            idle_label,
            job_label: job_label.into(),
            state: ActionState::Idle,
        }
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.state, ActionState::Pending { .. })
    }

    /// Enter `Pending`. Returns false if a job is already in flight.
    pub fn activate(&mut self, now_ms: f64) -> bool {
        if self.is_disabled() {
            return false;
        }
        self.state = ActionState::Pending {
            started_at_ms: now_ms,
        };
        self.label = progress_label(&self.job_label, 0);
        true
    }

    pub fn tick(&mut self, now_ms: f64) {
        if let ActionState::Pending { started_at_ms } = self.state {
            self.label = progress_label(&self.job_label, elapsed_secs(started_at_ms, now_ms));
        }
    }

    /// Leave `Pending`, re-enable and restore the idle label.
    pub fn settle(&mut self) {
        self.state = ActionState::Completed;
        self.label = self.idle_label.clone();
    }
}

fn elapsed_secs(started_at_ms: f64, now_ms: f64) -> u64 {
    ((now_ms - started_at_ms).max(0.0) / 1000.0).floor() as u64
}

pub fn progress_label(job_label: &str, secs: u64) -> String {
    format!("{job_label} ({secs}s)")
}

/// What a successful job does to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnSuccess {
    Reload,
    Navigate(String),
    /// Hand the returned markup to the caller for the results region
    RenderResults,
    /// Hand the returned markup to the caller to mount as a summary panel
    MountSummary,
}

/// A backend job bound to a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    call: ApiCall,
    on_success: OnSuccess,
    confirmation: Option<String>,
    failure_context: &'static str,
}

impl Job {
    pub fn add_item(action: impl Into<String>, fields: FormFields) -> Self {
        Self {
            call: ApiCall::AddItem {
                action: action.into(),
                fields,
            },
            on_success: OnSuccess::Reload,
            confirmation: None,
            failure_context: "Error adding input",
        }
    }

    pub fn add_legacy_item(fields: FormFields) -> Self {
        Self {
            call: ApiCall::AddLegacyItem { fields },
            on_success: OnSuccess::Reload,
            confirmation: None,
            failure_context: "Error adding legacy code",
        }
    }

    pub fn generate_edits(entity_id: EntityId) -> Self {
        Self {
            call: ApiCall::GenerateEdits { entity_id },
            on_success: OnSuccess::Reload,
            confirmation: None,
            failure_context: "Error generating edits",
        }
    }

    pub fn summarize(entity_id: EntityId) -> Self {
        Self {
            call: ApiCall::Summarize { entity_id },
            on_success: OnSuccess::MountSummary,
            confirmation: None,
            failure_context: "Error generating summary",
        }
    }

    pub fn analyze_conflicts() -> Self {
        Self {
            call: ApiCall::AnalyzeConflicts,
            on_success: OnSuccess::RenderResults,
            confirmation: None,
            failure_context: "Error analyzing conflicts",
        }
    }

    pub fn delete(entity_id: EntityId, landing_location: impl Into<String>) -> Self {
        Self {
            call: ApiCall::Delete { entity_id },
            on_success: OnSuccess::Navigate(landing_location.into()),
            confirmation: Some(DELETE_CONFIRMATION.to_string()),
            failure_context: "Error deleting input",
        }
    }

    pub fn call(&self) -> &ApiCall {
        &self.call
    }

    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    fn complete(&self, response: ActionResponse) -> Result<Completion, ActionError> {
        match &self.on_success {
            OnSuccess::Reload => Ok(Completion::Reloaded),
            OnSuccess::Navigate(location) => Ok(Completion::Navigated(location.clone())),
            OnSuccess::RenderResults => Ok(Completion::Results(summary_text(response)?)),
            OnSuccess::MountSummary => {
                let generated_name = response
                    .generated_name
                    .clone()
                    .filter(|name| !name.trim().is_empty());
                Ok(Completion::Summary {
                    markup: summary_text(response)?,
                    generated_name,
                })
            }
        }
    }
}

fn summary_text(response: ActionResponse) -> Result<String, ActionError> {
    response
        .summary
        .map(|summary| summary.join(SUMMARY_LINE_SEPARATOR))
        .ok_or(ActionError::MissingField("summary"))
}

/// Effect applied after a successful job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Reloaded,
    Navigated(String),
    /// Markup for the results region
    Results(String),
    /// A freshly generated summary and the name proposed alongside it
    Summary {
        markup: String,
        generated_name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Trigger was already busy
    Ignored,
    /// User declined the confirmation
    Declined,
    Succeeded(Completion),
    Failed(ActionError),
}

/// Run `job` guarded by `trigger`.
///
/// The trigger is disabled before the request is sent and re-enabled only
/// after the outcome has been fully handled.
pub async fn run_tracked<C, B, H>(
    trigger: C,
    backend: &B,
    host: &H,
    job: Job,
    tick_period_ms: u32,
) -> JobOutcome
where
    C: StateCell<TriggerState>,
    B: Backend + ?Sized,
    H: PageHost + ?Sized,
{
    if trigger.peek_state(TriggerState::is_disabled) {
        return JobOutcome::Ignored;
    }
    if let Some(prompt) = job.confirmation() {
        if !host.confirm(prompt) {
            return JobOutcome::Declined;
        }
    }
    if !trigger.with_state(|t| t.activate(host.now_ms())) {
        return JobOutcome::Ignored;
    }

    let ticker = {
        let trigger = trigger.clone();
        host.start_ticker(
            tick_period_ms,
            Box::new(move |now_ms: f64| trigger.with_state(|t| t.tick(now_ms))),
        )
    };

    let result = backend.send(job.call.clone()).await;
    drop(ticker);

    let outcome = match result.and_then(|response| {
        if let Some(reason) = &response.summarize_error {
            warn!("{} succeeded but summarization failed: {}", job.call.name(), reason);
        }
        let message = response.message.clone();
        job.complete(response).map(|completion| (message, completion))
    }) {
        Ok((message, completion)) => {
            info!("{} completed", job.call.name());
            if let Some(message) = message {
                host.alert(&message);
            }
            match &completion {
                Completion::Reloaded => host.reload(),
                Completion::Navigated(location) => host.navigate(location),
                Completion::Results(_) | Completion::Summary { .. } => {}
            }
            JobOutcome::Succeeded(completion)
        }
        Err(e) => {
            match e.class() {
                ErrorClass::Application => warn!("{} rejected by server: {}", job.call.name(), e),
                class => error!(?class, "{} failed: {}", job.call.name(), e),
            }
            host.alert(&e.notification(job.failure_context));
            JobOutcome::Failed(e)
        }
    };

    trigger.with_state(TriggerState::settle);
    outcome
}
