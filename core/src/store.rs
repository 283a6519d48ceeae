//! Per-screen snapshot of one record collection.
//!
//! # Design
//! The store is replaced wholesale by every successful load; there is no
//! partial update path except `remove`, which the delete flow uses before
//! reconciling with a full reload. A failed load leaves the previous
//! snapshot in place.

use tracing::{debug, warn};

use crate::entity::Entity;
use crate::error::ApiError;
use crate::notification::Notification;
use crate::transport::{ClinicApi, Transport};
use crate::types::RecordId;

#[derive(Debug, Clone)]
pub struct EntityStore<E> {
    records: Vec<E>,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityStore<E> {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    /// Replaces the contents with the server's full collection. On error the
    /// current contents are kept.
    pub fn load<T: Transport>(&mut self, api: &ClinicApi<T>) -> Result<usize, ApiError> {
        match api.list::<E>() {
            Ok(records) => {
                debug!(kind = E::ENDPOINTS.plural, count = records.len(), "store reloaded");
                self.records = records;
                Ok(self.records.len())
            }
            Err(e) => {
                warn!(
                    kind = E::ENDPOINTS.plural,
                    kept = self.records.len(),
                    error = %e,
                    "store reload failed"
                );
                Err(e)
            }
        }
    }

    /// `load`, reporting a failure as the list-level notice.
    pub fn refresh<T: Transport>(&mut self, api: &ClinicApi<T>) -> Option<Notification> {
        self.load(api).err().map(|e| {
            Notification::from_error(&format!("Failed to load {}", E::ENDPOINTS.plural), &e)
        })
    }

    /// Latest successfully loaded records, in fetch order.
    pub fn current(&self) -> &[E] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub(crate) fn remove(&mut self, id: RecordId) {
        self.records.retain(|r| r.id() != id);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{api, ScriptedTransport};
    use crate::types::MedicalCenter;

    const TWO_CENTERS: &str = r#"[
        {"id_center":1,"center_name":"LODE","center_description":"","center_address":"","center_number":""},
        {"id_center":3,"center_name":"Nordin","center_description":"","center_address":"","center_number":""}
    ]"#;

    #[test]
    fn starts_empty() {
        let store = EntityStore::<MedicalCenter>::new();
        assert!(store.is_empty());
    }

    #[test]
    fn load_replaces_contents_in_fetch_order() {
        let transport = ScriptedTransport::new();
        transport.push_ok(TWO_CENTERS);
        transport.push_ok(r#"[{"id_center":3,"center_name":"Nordin","center_description":"","center_address":"","center_number":""}]"#);

        let mut store = EntityStore::<MedicalCenter>::new();
        assert_eq!(store.load(&api(&transport)).unwrap(), 2);
        let ids: Vec<_> = store.current().iter().map(|c| c.id_center).collect();
        assert_eq!(ids, vec![1, 3]);

        store.load(&api(&transport)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(1).is_none());
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let transport = ScriptedTransport::new();
        transport.push_ok(TWO_CENTERS);
        transport.push(500, "database down");

        let mut store = EntityStore::<MedicalCenter>::new();
        store.load(&api(&transport)).unwrap();
        let err = store.load(&api(&transport)).unwrap_err();

        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn failed_refresh_is_reported_as_load_failure() {
        let transport = ScriptedTransport::new();
        transport.push_ok(TWO_CENTERS);
        transport.push_network_error("timeout");

        let mut store = EntityStore::<MedicalCenter>::new();
        assert!(store.refresh(&api(&transport)).is_none());
        let notice = store.refresh(&api(&transport)).unwrap();
        assert!(!notice.is_success());
        assert!(notice.message.starts_with("Failed to load medical centers"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_drops_only_matching_id() {
        let transport = ScriptedTransport::new();
        transport.push_ok(TWO_CENTERS);
        let mut store = EntityStore::<MedicalCenter>::new();
        store.load(&api(&transport)).unwrap();

        store.remove(3);
        assert_eq!(store.len(), 1);
        assert_eq!(store.current()[0].center_name, "LODE");
    }
}
