//! Two-step delete guard.
//!
//! `request_delete` only shows the prompt; nothing reaches the server until
//! `confirm`. After a successful delete the record is dropped from the
//! store's snapshot and the store is re-fetched from the server.

use tracing::{info, warn};

use crate::entity::Entity;
use crate::notification::{Notification, Outcome};
use crate::store::EntityStore;
use crate::transport::{ClinicApi, Transport};

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteState<E> {
    Hidden,
    Shown(E),
}

#[derive(Debug, Clone)]
pub struct DeleteConfirmation<E> {
    state: DeleteState<E>,
}

impl<E: Entity> Default for DeleteConfirmation<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> DeleteConfirmation<E> {
    pub fn new() -> Self {
        Self {
            state: DeleteState::Hidden,
        }
    }

    pub fn state(&self) -> &DeleteState<E> {
        &self.state
    }

    pub fn target(&self) -> Option<&E> {
        match &self.state {
            DeleteState::Hidden => None,
            DeleteState::Shown(record) => Some(record),
        }
    }

    pub fn request_delete(&mut self, record: &E) {
        self.state = DeleteState::Shown(record.clone());
    }

    pub fn cancel(&mut self) {
        self.state = DeleteState::Hidden;
    }

    /// Deletes the target. The prompt is hidden whatever the outcome.
    /// Returns `None` when no deletion was pending. A failed refetch after a
    /// successful delete is reported alongside the delete notice.
    pub fn confirm<T: Transport>(
        &mut self,
        api: &ClinicApi<T>,
        store: &mut EntityStore<E>,
    ) -> Option<Outcome> {
        let record = match std::mem::replace(&mut self.state, DeleteState::Hidden) {
            DeleteState::Hidden => return None,
            DeleteState::Shown(record) => record,
        };
        let noun = E::ENDPOINTS.noun;
        let id = record.id();

        if let Err(e) = api.delete::<E>(id) {
            warn!(kind = noun, id, error = %e, "delete failed");
            return Some(Outcome::new(Notification::from_error(
                &format!("Failed to delete {} {}", noun.to_lowercase(), record.display_name()),
                &e,
            )));
        }

        info!(kind = noun, id, "record deleted");
        store.remove(id);
        let reload_failure = store.refresh(api);
        let notice = Notification::success(format!("{noun} {} deleted", record.display_name()));
        Some(Outcome::new(notice).with_reload_failure(reload_failure))
    }
}
