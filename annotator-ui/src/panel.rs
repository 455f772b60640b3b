//! Inline editable summary panel
//!
//! Shows rendered markup by default. The activation gesture swaps in a plain
//! text editor seeded with the trimmed source; saving persists the draft and
//! returns to the rendered view. A failed save keeps the editor and its draft.

use dioxus_logger::tracing::{info, warn};
use shared_types::{ActionResponse, EntityId, InputUpdate, SummaryPayload, SEGMENT_SEPARATOR};

use crate::api::{ApiCall, Backend};
use crate::error::ActionError;
use crate::host::PageHost;
use crate::markup::MarkupRenderer;
use crate::state::StateCell;

pub const SAVE_FAILURE_CONTEXT: &str = "Error saving changes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    Viewing {
        /// Last-known-good markup source
        source: String,
        html: String,
    },
    Editing {
        /// Source at activation time, restored on cancel
        original: String,
        original_html: String,
        draft: String,
        /// Content of the save currently awaiting the backend
        in_flight: Option<String>,
    },
}

/// Everything a save needs to leave the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub entity_id: EntityId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditablePanel {
    entity_id: Option<EntityId>,
    state: PanelState,
    /// Bumped on every successful save; views key their subtree on it
    generation: u64,
}

impl EditablePanel {
    pub fn mount(
        entity_id: Option<EntityId>,
        content: impl Into<SummaryPayload>,
        renderer: &impl MarkupRenderer,
    ) -> Self {
        let source = content.into().join(SEGMENT_SEPARATOR);
        let html = renderer.render(&source);
        Self {
            entity_id,
            state: PanelState::Viewing { source, html },
            generation: 0,
        }
    }

    pub fn entity_id(&self) -> Option<&EntityId> {
        self.entity_id.as_ref()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, PanelState::Editing { .. })
    }

    pub fn is_saving(&self) -> bool {
        matches!(
            self.state,
            PanelState::Editing {
                in_flight: Some(_),
                ..
            }
        )
    }

    /// Retained source: the saved text, or the pre-edit text while editing.
    pub fn source(&self) -> &str {
        match &self.state {
            PanelState::Viewing { source, .. } => source,
            PanelState::Editing { original, .. } => original,
        }
    }

    pub fn html(&self) -> &str {
        match &self.state {
            PanelState::Viewing { html, .. } => html,
            PanelState::Editing { original_html, .. } => original_html,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            PanelState::Editing { draft, .. } => Some(draft),
            PanelState::Viewing { .. } => None,
        }
    }

    /// Viewing -> Editing. Returns false when already editing.
    pub fn activate(&mut self) -> bool {
        let PanelState::Viewing { source, html } = &self.state else {
            return false;
        };
        self.state = PanelState::Editing {
            draft: source.trim().to_string(),
            original: source.clone(),
            original_html: html.clone(),
            in_flight: None,
        };
        true
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        if let PanelState::Editing { draft, .. } = &mut self.state {
            *draft = text.into();
        }
    }

    /// Drop the draft and return to the retained source.
    pub fn cancel(&mut self) -> bool {
        let PanelState::Editing {
            original,
            original_html,
            in_flight: None,
            ..
        } = &self.state
        else {
            return false;
        };
        self.state = PanelState::Viewing {
            source: original.clone(),
            html: original_html.clone(),
        };
        true
    }

    /// Start a save of the current draft.
    ///
    /// `Ok(None)` means there is nothing to send: not editing, or a save is
    /// already pending. A missing entity id is rejected without touching state.
    pub fn begin_save(&mut self) -> Result<Option<SaveRequest>, ActionError> {
        let PanelState::Editing {
            draft, in_flight, ..
        } = &mut self.state
        else {
            return Ok(None);
        };
        if in_flight.is_some() {
            return Ok(None);
        }
        let entity_id = self.entity_id.clone().ok_or(ActionError::MissingEntityId)?;

        *in_flight = Some(draft.clone());
        Ok(Some(SaveRequest {
            entity_id,
            content: draft.clone(),
        }))
    }

    /// Apply the backend's verdict on the pending save.
    ///
    /// Returns the server message on success.
    pub fn finish_save(
        &mut self,
        result: Result<ActionResponse, ActionError>,
        renderer: &impl MarkupRenderer,
    ) -> Result<Option<String>, ActionError> {
        let PanelState::Editing { in_flight, .. } = &mut self.state else {
            return Ok(None);
        };
        let saved = in_flight.take();

        let response = result?;
        let source = saved.unwrap_or_default();
        let html = renderer.render(&source);
        self.state = PanelState::Viewing { source, html };
        self.generation += 1;
        Ok(response.message)
    }
}

/// Outcome of [`save_panel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing to save
    Ignored,
    Saved,
    Failed(ActionError),
}

/// Persist the panel's draft and settle its state.
pub async fn save_panel<C, B, H, R>(panel: C, backend: &B, host: &H, renderer: &R) -> SaveOutcome
where
    C: StateCell<EditablePanel>,
    B: Backend + ?Sized,
    H: PageHost + ?Sized,
    R: MarkupRenderer,
{
    let request = match panel.with_state(|p| p.begin_save()) {
        Ok(Some(request)) => request,
        Ok(None) => return SaveOutcome::Ignored,
        Err(e) => {
            warn!(class = ?e.class(), "Summary save rejected locally: {}", e);
            host.alert(&e.notification(SAVE_FAILURE_CONTEXT));
            return SaveOutcome::Failed(e);
        }
    };

    let entity_id = request.entity_id.clone();
    let result = backend
        .send(ApiCall::Update {
            entity_id: request.entity_id,
            update: InputUpdate::DocumentSummary(request.content),
        })
        .await;

    match panel.with_state(|p| p.finish_save(result, renderer)) {
        Ok(message) => {
            info!("Saved summary for input {}", entity_id);
            if let Some(message) = message {
                host.alert(&message);
            }
            SaveOutcome::Saved
        }
        Err(e) => {
            warn!(class = ?e.class(), "Failed to save summary for input {}: {}", entity_id, e);
            host.alert(&e.notification(SAVE_FAILURE_CONTEXT));
            SaveOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkdownRenderer;
    use crate::test_support::{MockBackend, MockHost};
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn panel(id: Option<&str>, source: &str) -> Rc<RefCell<EditablePanel>> {
        Rc::new(RefCell::new(EditablePanel::mount(
            id.map(EntityId::new),
            source,
            &MarkdownRenderer::default(),
        )))
    }

    #[test]
    fn mount_renders_and_joins_segments() {
        let renderer = MarkdownRenderer::default();
        let panel = EditablePanel::mount(
            Some(EntityId::new("1")),
            vec!["first".to_string(), "second".to_string()],
            &renderer,
        );
        assert_eq!(panel.source(), "first\n\nsecond");
        assert_eq!(panel.html(), renderer.render("first\n\nsecond"));
        assert!(!panel.is_editing());
    }

    #[test]
    fn activation_is_idempotent_and_trims() {
        let mut panel = EditablePanel::mount(None, "  text \n", &MarkdownRenderer::default());
        assert!(panel.activate());
        panel.edit("changed");
        assert!(!panel.activate());
        assert_eq!(panel.draft(), Some("changed"));
        assert_eq!(panel.source(), "  text \n");

        let mut fresh = EditablePanel::mount(None, "  text \n", &MarkdownRenderer::default());
        fresh.activate();
        assert_eq!(fresh.draft(), Some("text"));
    }

    #[test]
    fn edit_outside_editing_is_ignored() {
        let mut panel = EditablePanel::mount(None, "text", &MarkdownRenderer::default());
        panel.edit("nope");
        assert_eq!(panel.source(), "text");
        assert_eq!(panel.draft(), None);
    }

    #[test]
    fn cancel_restores_original() {
        let mut panel = EditablePanel::mount(None, "keep", &MarkdownRenderer::default());
        panel.activate();
        panel.edit("discard me");
        assert!(panel.cancel());
        assert_eq!(panel.source(), "keep");
        assert!(!panel.is_editing());
    }

    #[test]
    fn successful_save_rerenders_saved_text() {
        let renderer = MarkdownRenderer::default();
        let panel = panel(Some("42"), "old");
        panel.borrow_mut().activate();
        panel.borrow_mut().edit("**bold**");

        let backend = MockBackend::replying(Ok(ActionResponse::ok().with_message("saved")));
        let host = MockHost::default();
        let outcome = block_on(save_panel(panel.clone(), &backend, &host, &renderer));

        assert_eq!(outcome, SaveOutcome::Saved);
        let panel = panel.borrow();
        assert!(!panel.is_editing());
        assert_eq!(panel.source(), "**bold**");
        assert_eq!(panel.html(), renderer.render("**bold**"));
        assert_eq!(panel.generation(), 1);
        assert_eq!(host.alerts(), vec!["saved".to_string()]);
        assert_eq!(
            backend.calls.borrow()[0],
            ApiCall::Update {
                entity_id: EntityId::new("42"),
                update: InputUpdate::DocumentSummary("**bold**".into()),
            }
        );
    }

    #[test]
    fn saved_text_is_kept_verbatim() {
        let renderer = MarkdownRenderer::default();
        let panel = panel(Some("1"), "old");
        panel.borrow_mut().activate();
        panel.borrow_mut().edit("  padded\n");

        let backend = MockBackend::replying(Ok(ActionResponse::ok()));
        let host = MockHost::default();
        block_on(save_panel(panel.clone(), &backend, &host, &renderer));

        assert_eq!(panel.borrow().source(), "  padded\n");
        assert!(host.alerts().is_empty());
    }

    #[test]
    fn http_failure_keeps_editor_and_draft() {
        let renderer = MarkdownRenderer::default();
        let panel = panel(Some("42"), "previous");
        panel.borrow_mut().activate();
        panel.borrow_mut().edit("**bold**");

        let backend = MockBackend::replying(Err(ActionError::HttpStatus { status: 500 }));
        let host = MockHost::default();
        let outcome = block_on(save_panel(panel.clone(), &backend, &host, &renderer));

        assert_eq!(
            outcome,
            SaveOutcome::Failed(ActionError::HttpStatus { status: 500 })
        );
        let panel = panel.borrow();
        assert!(panel.is_editing());
        assert!(!panel.is_saving());
        assert_eq!(panel.draft(), Some("**bold**"));
        assert_eq!(panel.source(), "previous");
        assert_eq!(panel.generation(), 0);
        assert_eq!(
            host.alerts(),
            vec!["Error saving changes: HTTP error! status: 500".to_string()]
        );
    }

    #[test]
    fn application_failure_keeps_editor() {
        let renderer = MarkdownRenderer::default();
        let panel = panel(Some("5"), "previous");
        panel.borrow_mut().activate();

        let backend = MockBackend::replying(Err(ActionError::application(Some(
            "database is locked".into(),
        ))));
        let host = MockHost::default();
        block_on(save_panel(panel.clone(), &backend, &host, &renderer));

        assert!(panel.borrow().is_editing());
        assert_eq!(
            host.alerts(),
            vec!["Error saving changes: database is locked".to_string()]
        );
    }

    #[test]
    fn missing_id_never_reaches_network() {
        let renderer = MarkdownRenderer::default();
        let panel = panel(None, "text");
        panel.borrow_mut().activate();
        panel.borrow_mut().edit("new");
        let before = panel.borrow().clone();

        let backend = MockBackend::default();
        let host = MockHost::default();
        let outcome = block_on(save_panel(panel.clone(), &backend, &host, &renderer));

        assert_eq!(outcome, SaveOutcome::Failed(ActionError::MissingEntityId));
        assert_eq!(backend.call_count(), 0);
        assert_eq!(*panel.borrow(), before);
        assert_eq!(host.alerts().len(), 1);
    }

    #[test]
    fn second_save_while_pending_is_ignored() {
        let renderer = MarkdownRenderer::default();
        let panel = panel(Some("8"), "text");
        panel.borrow_mut().activate();

        let backend = MockBackend::replying(Ok(ActionResponse::ok()));
        let release = backend.hold_next();
        let host = MockHost::default();

        let (first, second, _) = block_on(async {
            futures::join!(
                save_panel(panel.clone(), &backend, &host, &renderer),
                save_panel(panel.clone(), &backend, &host, &renderer),
                async {
                    let _ = release.send(());
                }
            )
        });

        assert_eq!(first, SaveOutcome::Saved);
        assert_eq!(second, SaveOutcome::Ignored);
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn save_while_viewing_does_nothing() {
        let renderer = MarkdownRenderer::default();
        let panel = panel(Some("8"), "text");
        let backend = MockBackend::default();
        let host = MockHost::default();

        let outcome = block_on(save_panel(panel.clone(), &backend, &host, &renderer));
        assert_eq!(outcome, SaveOutcome::Ignored);
        assert_eq!(backend.call_count(), 0);
    }
}
