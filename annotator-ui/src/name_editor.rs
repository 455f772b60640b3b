//! Single-line document name editor.
//!
//! Locked by default. Unlocking captures a rollback value which is restored
//! when focus leaves for anything other than the save control, or when the
//! save fails.

use dioxus_logger::tracing::{info, warn};
use shared_types::{EntityId, InputUpdate};

use crate::api::{ApiCall, Backend};
use crate::error::ActionError;
use crate::host::PageHost;
use crate::panel::{SaveRequest, SAVE_FAILURE_CONTEXT};
use crate::state::StateCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEditor {
    entity_id: Option<EntityId>,
    text: String,
    editing: bool,
    /// Pre-edit text, present only while unlocked
    rollback: Option<String>,
    saving: bool,
}

impl NameEditor {
    pub fn new(entity_id: Option<EntityId>, text: impl Into<String>) -> Self {
        Self {
            entity_id,
            text: text.into(),
            editing: false,
            rollback: None,
            saving: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn rollback(&self) -> Option<&str> {
        self.rollback.as_deref()
    }

    /// Unlock for editing. Returns false when already unlocked.
    pub fn activate(&mut self) -> bool {
        if self.editing {
            return false;
        }
        self.editing = true;
        self.rollback = Some(self.text.clone());
        true
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        if self.editing && !self.saving {
            self.text = text.into();
        }
    }

    /// Focus left the field. Discards the edit unless focus moved to the
    /// save control or a save is already under way.
    pub fn blur(&mut self, to_save_control: bool) -> bool {
        if !self.editing || to_save_control || self.saving {
            return false;
        }
        self.discard();
        true
    }

    /// Take a name chosen by the server. An edit in progress keeps its text
    /// but now reverts to the new name.
    pub fn adopt(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.editing {
            self.rollback = Some(name);
        } else {
            self.text = name;
        }
    }

    /// Revert to the rollback value and lock.
    pub fn discard(&mut self) {
        if let Some(previous) = self.rollback.take() {
            self.text = previous;
        }
        self.editing = false;
        self.saving = false;
    }

    /// Start saving the trimmed text.
    ///
    /// A missing entity id counts as a failed save: the field reverts and locks.
    pub fn begin_save(&mut self) -> Result<Option<SaveRequest>, ActionError> {
        if !self.editing || self.saving {
            return Ok(None);
        }
        let Some(entity_id) = self.entity_id.clone() else {
            self.discard();
            return Err(ActionError::MissingEntityId);
        };

        self.saving = true;
        Ok(Some(SaveRequest {
            entity_id,
            content: self.text.trim().to_string(),
        }))
    }

    pub fn finish_save(&mut self, result: Result<String, ActionError>) -> Result<(), ActionError> {
        if !self.saving {
            return Ok(());
        }
        match result {
            Ok(saved) => {
                self.text = saved;
                self.rollback = None;
                self.editing = false;
                self.saving = false;
                Ok(())
            }
            Err(e) => {
                self.discard();
                Err(e)
            }
        }
    }
}

/// Persist the edited name. Returns whether it was committed.
pub async fn save_name<C, B, H>(editor: C, backend: &B, host: &H) -> Result<bool, ActionError>
where
    C: StateCell<NameEditor>,
    B: Backend + ?Sized,
    H: PageHost + ?Sized,
{
    let request = match editor.with_state(|e| e.begin_save()) {
        Ok(Some(request)) => request,
        Ok(None) => return Ok(false),
        Err(e) => {
            warn!(class = ?e.class(), "Document name save rejected locally: {}", e);
            host.alert(&e.notification(SAVE_FAILURE_CONTEXT));
            return Err(e);
        }
    };

    let entity_id = request.entity_id.clone();
    let content = request.content.clone();
    let result = backend
        .send(ApiCall::Update {
            entity_id: request.entity_id,
            update: InputUpdate::DocumentName(request.content),
        })
        .await
        .map(|_| content);

    match editor.with_state(|e| e.finish_save(result)) {
        Ok(()) => {
            info!("Renamed input {}", entity_id);
            Ok(true)
        }
        Err(e) => {
            warn!(class = ?e.class(), "Failed to rename input {}: {}", entity_id, e);
            host.alert(&e.notification(SAVE_FAILURE_CONTEXT));
            Err(e)
        }
    }
}
