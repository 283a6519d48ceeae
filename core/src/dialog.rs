//! Add/edit dialog for one record.
//!
//! # Design
//! The dialog is an explicit state machine: `Closed`, `Creating`, or
//! `Editing { id }`. The draft is a full copy of the record, so fields the
//! form does not expose survive a save unchanged, and the id of an edited
//! record cannot be altered through `set_field`.
//!
//! A failed save leaves the dialog open with the draft intact, so the user
//! can retry without retyping.

use tracing::{info, warn};

use crate::entity::Entity;
use crate::error::DialogError;
use crate::notification::{Notification, Outcome};
use crate::store::EntityStore;
use crate::transport::{ClinicApi, Transport};
use crate::types::{Polyclinic, RecordId, NEW_RECORD_ID};

/// In-progress values of an open dialog plus its dropdown options.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft<E> {
    record: E,
    centers: Vec<Polyclinic>,
}

impl<E: Entity> Draft<E> {
    pub fn record(&self) -> &E {
        &self.record
    }

    /// Parent center options fetched when the dialog opened. Empty when the
    /// fetch failed or the kind has no parent.
    pub fn centers(&self) -> &[Polyclinic] {
        &self.centers
    }

    /// Display name of the selected parent center, resolved through the
    /// fetched options and falling back to the record's cached name.
    pub fn center_name(&self) -> Option<&str> {
        let id = self.record.parent_center()?;
        self.centers
            .iter()
            .find(|c| c.id_center == id)
            .map(|c| c.center_name.as_str())
            .or_else(|| self.record.parent_center_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogState<E> {
    Closed,
    Creating(Draft<E>),
    Editing { id: RecordId, draft: Draft<E> },
}

#[derive(Debug, Clone)]
pub struct CrudDialog<E> {
    state: DialogState<E>,
}

impl<E: Entity> Default for CrudDialog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> CrudDialog<E> {
    pub fn new() -> Self {
        Self {
            state: DialogState::Closed,
        }
    }

    pub fn state(&self) -> &DialogState<E> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, DialogState::Closed)
    }

    pub fn draft(&self) -> Option<&Draft<E>> {
        match &self.state {
            DialogState::Closed => None,
            DialogState::Creating(draft) | DialogState::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Result<&mut Draft<E>, DialogError> {
        match &mut self.state {
            DialogState::Closed => Err(DialogError::NotOpen),
            DialogState::Creating(draft) | DialogState::Editing { draft, .. } => Ok(draft),
        }
    }

    pub fn open_create<T: Transport>(&mut self, api: &ClinicApi<T>) {
        let centers = fetch_centers::<E, T>(api);
        self.state = DialogState::Creating(Draft {
            record: E::blank(),
            centers,
        });
    }

    /// Opens a creation dialog already bound to `center`.
    pub fn open_create_in<T: Transport>(&mut self, api: &ClinicApi<T>, center: &Polyclinic) {
        let mut record = E::blank();
        record.assign_parent_center(center);
        let centers = fetch_centers::<E, T>(api);
        self.state = DialogState::Creating(Draft { record, centers });
    }

    /// Opens an edit dialog prefilled from `record`. The parent center's
    /// cached name is replaced by the current one from the fetched options.
    pub fn open_edit<T: Transport>(&mut self, api: &ClinicApi<T>, record: &E) {
        let centers = fetch_centers::<E, T>(api);
        let mut record = record.clone();
        let current = record
            .parent_center()
            .and_then(|id| centers.iter().find(|c| c.id_center == id));
        if let Some(center) = current {
            record.assign_parent_center(center);
        }
        self.state = DialogState::Editing {
            id: record.id(),
            draft: Draft { record, centers },
        };
    }

    /// Updates the draft only. Any string is accepted.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), DialogError> {
        self.draft_mut()?.record.set_field(name, value.into())
    }

    /// Selects a parent center from the fetched dropdown options.
    pub fn select_center(&mut self, id_center: RecordId) -> Result<(), DialogError> {
        let draft = self.draft_mut()?;
        let center = draft
            .centers
            .iter()
            .find(|c| c.id_center == id_center)
            .cloned()
            .ok_or(DialogError::UnknownCenter(id_center))?;
        draft.record.assign_parent_center(&center);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.state = DialogState::Closed;
    }

    /// Saves the draft: create when the dialog was opened for a new record,
    /// update scoped to the original id otherwise. On success the dialog
    /// closes and the store is reloaded from the server; a failed reload is
    /// reported alongside the save notice.
    pub fn confirm<T: Transport>(
        &mut self,
        api: &ClinicApi<T>,
        store: &mut EntityStore<E>,
    ) -> Result<Outcome, DialogError> {
        let record = match &self.state {
            DialogState::Closed => return Err(DialogError::NotOpen),
            DialogState::Creating(draft) => {
                let mut record = draft.record.clone();
                record.set_id(NEW_RECORD_ID);
                record
            }
            DialogState::Editing { id, draft } => {
                let mut record = draft.record.clone();
                record.set_id(*id);
                record
            }
        };
        let created = record.is_new();
        let noun = E::ENDPOINTS.noun;

        if let Err(e) = api.save(&record) {
            warn!(kind = noun, id = record.id(), error = %e, "save failed");
            return Ok(Outcome::new(Notification::from_error(
                &format!("Failed to save {}", noun.to_lowercase()),
                &e,
            )));
        }

        info!(kind = noun, id = record.id(), created, "record saved");
        self.state = DialogState::Closed;
        let reload_failure = store.refresh(api);

        let verb = if created { "added" } else { "updated" };
        let notice = Notification::success(format!("{noun} {} {verb}", record.display_name()));
        Ok(Outcome::new(notice).with_reload_failure(reload_failure))
    }
}

fn fetch_centers<E: Entity, T: Transport>(api: &ClinicApi<T>) -> Vec<Polyclinic> {
    if !E::HAS_PARENT_CENTER {
        return Vec::new();
    }
    api.polyclinics().unwrap_or_else(|e| {
        warn!(error = %e, "could not load medical center options");
        Vec::new()
    })
}
