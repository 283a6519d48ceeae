//! One CRUD-list screen: store, search query, add/edit dialog and delete
//! prompt for a single entity kind.
//!
//! The super-admin's medical center, administrator and main doctor screens
//! and the admin's doctor screen are all `CrudScreen<E>` for some `E`.

use crate::delete::DeleteConfirmation;
use crate::dialog::CrudDialog;
use crate::entity::Entity;
use crate::error::DialogError;
use crate::notification::{Notification, Outcome};
use crate::search::ListView;
use crate::session::Session;
use crate::store::EntityStore;
use crate::transport::{ClinicApi, Transport};
use crate::types::RecordId;

#[derive(Debug, Clone)]
pub struct CrudScreen<E> {
    store: EntityStore<E>,
    query: String,
    dialog: CrudDialog<E>,
    deletion: DeleteConfirmation<E>,
}

impl<E: Entity> Default for CrudScreen<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> CrudScreen<E> {
    pub fn new() -> Self {
        Self {
            store: EntityStore::new(),
            query: String::new(),
            dialog: CrudDialog::new(),
            deletion: DeleteConfirmation::new(),
        }
    }

    /// Screen entry: creates the screen and performs the initial load.
    pub fn enter<T: Transport>(api: &ClinicApi<T>) -> (Self, Option<Notification>) {
        let mut screen = Self::new();
        let notice = screen.refresh(api);
        (screen, notice)
    }

    /// Reloads the store. Only a failure produces a notification.
    pub fn refresh<T: Transport>(&mut self, api: &ClinicApi<T>) -> Option<Notification> {
        self.store.refresh(api)
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn visible(&self) -> ListView<'_, E> {
        ListView::build(self.store.current(), &self.query)
    }

    pub fn dialog(&self) -> &CrudDialog<E> {
        &self.dialog
    }

    pub fn deletion(&self) -> &DeleteConfirmation<E> {
        &self.deletion
    }

    pub fn open_create<T: Transport>(&mut self, api: &ClinicApi<T>) {
        self.dialog.open_create(api);
    }

    /// Opens a creation dialog bound to the signed-in user's own center.
    /// The center id is looked up by name through `session`; if that fails
    /// the dialog opens unbound.
    pub fn open_create_for<T: Transport>(&mut self, api: &ClinicApi<T>, session: &Session) -> Option<Notification> {
        match session.resolve_center(api) {
            Ok(center) => {
                self.dialog.open_create_in(api, &center);
                None
            }
            Err(e) => {
                self.dialog.open_create(api);
                Some(Notification::failure(e.failure(), e.to_string()))
            }
        }
    }

    pub fn open_edit<T: Transport>(&mut self, api: &ClinicApi<T>, record: &E) {
        self.dialog.open_edit(api, record);
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), DialogError> {
        self.dialog.set_field(name, value)
    }

    pub fn select_center(&mut self, id_center: RecordId) -> Result<(), DialogError> {
        self.dialog.select_center(id_center)
    }

    pub fn confirm_dialog<T: Transport>(&mut self, api: &ClinicApi<T>) -> Result<Outcome, DialogError> {
        self.dialog.confirm(api, &mut self.store)
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog.cancel();
    }

    pub fn request_delete(&mut self, record: &E) {
        self.deletion.request_delete(record);
    }

    pub fn confirm_delete<T: Transport>(&mut self, api: &ClinicApi<T>) -> Option<Outcome> {
        self.deletion.confirm(api, &mut self.store)
    }

    pub fn cancel_delete(&mut self) {
        self.deletion.cancel();
    }
}
