use async_trait::async_trait;
use autotrack_api::{ApiError, ApiResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::engine::state::{EntityState, PendingChange};
use crate::models::audit::AuditModel;
use crate::models::contact::ContactModel;
use crate::models::customer::CustomerModel;
use crate::models::customer_contact::CustomerContactModel;
use crate::models::entity::{EntityKind, EntityModel};
use crate::models::relation::RelationTarget;

use super::ChangeStore;

#[derive(Debug, Default, Clone)]
struct MemoryInner {
    customers: HashMap<Uuid, CustomerModel>,
    contacts: HashMap<Uuid, ContactModel>,
    customer_contacts: HashMap<Uuid, CustomerContactModel>,
    audits: Vec<AuditModel>,
}

/// Reference `ChangeStore` over process memory.
///
/// Mirrors the relational backend's semantics: guarded updates on the
/// last-modified timestamp, cascade deletion of link rows when a parent
/// Customer or Contact is deleted, and an all-or-nothing commit (the change
/// set is applied to a copy and swapped in only when every mutation
/// succeeds). Doubles as the test harness for the interceptor.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    audit_append_fails: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next audit append fail, to exercise the non-fatal
    /// audit-write path
    pub fn fail_next_audit_append(&self) {
        self.audit_append_fails.store(true, Ordering::SeqCst);
    }

    pub async fn customers(&self) -> Vec<CustomerModel> {
        self.inner.lock().await.customers.values().cloned().collect()
    }

    pub async fn find_customer(&self, id: Uuid) -> Option<CustomerModel> {
        self.inner.lock().await.customers.get(&id).cloned()
    }

    pub async fn contacts(&self) -> Vec<ContactModel> {
        self.inner.lock().await.contacts.values().cloned().collect()
    }

    pub async fn find_contact(&self, id: Uuid) -> Option<ContactModel> {
        self.inner.lock().await.contacts.get(&id).cloned()
    }

    pub async fn customer_contacts(&self) -> Vec<CustomerContactModel> {
        self.inner
            .lock()
            .await
            .customer_contacts
            .values()
            .cloned()
            .collect()
    }

    pub async fn find_customer_contact(&self, id: Uuid) -> Option<CustomerContactModel> {
        self.inner.lock().await.customer_contacts.get(&id).cloned()
    }

    /// All audit rows for one entity, in insertion order; empty when none
    pub async fn audits_for_entity(&self, entity_id: Uuid) -> Vec<AuditModel> {
        self.inner
            .lock()
            .await
            .audits
            .iter()
            .filter(|a| a.entity_id == Some(entity_id))
            .cloned()
            .collect()
    }

    pub async fn all_audits(&self) -> Vec<AuditModel> {
        self.inner.lock().await.audits.clone()
    }

    fn apply(inner: &mut MemoryInner, change: &PendingChange) -> ApiResult<()> {
        let id = change.entity.id();
        let type_name = change.entity.type_name();
        match change.state {
            EntityState::Added => match &change.entity {
                EntityModel::Customer(m) => {
                    Self::insert(&mut inner.customers, id, m.clone(), type_name)
                }
                EntityModel::Contact(m) => {
                    Self::insert(&mut inner.contacts, id, m.clone(), type_name)
                }
                EntityModel::CustomerContact(m) => {
                    Self::insert(&mut inner.customer_contacts, id, m.clone(), type_name)
                }
            },
            EntityState::Modified => match &change.entity {
                EntityModel::Customer(m) => Self::update(
                    &mut inner.customers,
                    id,
                    m.clone(),
                    change,
                    |row| row.modified_date,
                    |row, kept| row.created_date = kept,
                    |row| row.created_date,
                ),
                EntityModel::Contact(m) => Self::update(
                    &mut inner.contacts,
                    id,
                    m.clone(),
                    change,
                    |row| row.modified_date,
                    |row, kept| row.created_date = kept,
                    |row| row.created_date,
                ),
                EntityModel::CustomerContact(m) => Self::update(
                    &mut inner.customer_contacts,
                    id,
                    m.clone(),
                    change,
                    |row| row.modified_date,
                    |row, kept| row.created_date = kept,
                    |row| row.created_date,
                ),
            },
            EntityState::Deleted => {
                let removed = match &change.entity {
                    EntityModel::Customer(_) => inner.customers.remove(&id).is_some(),
                    EntityModel::Contact(_) => inner.contacts.remove(&id).is_some(),
                    EntityModel::CustomerContact(_) => {
                        inner.customer_contacts.remove(&id).is_some()
                    }
                };
                if !removed {
                    return Err(ApiError::not_found(type_name, id));
                }
                // Cascade: parent deletion removes link rows, as the schema
                // FKs do
                match &change.entity {
                    EntityModel::Customer(_) => inner
                        .customer_contacts
                        .retain(|_, link| link.customer_id != id),
                    EntityModel::Contact(_) => inner
                        .customer_contacts
                        .retain(|_, link| link.contact_id != id),
                    EntityModel::CustomerContact(_) => {}
                }
                Ok(())
            }
            EntityState::Unchanged => Ok(()),
        }
    }

    fn insert<T>(map: &mut HashMap<Uuid, T>, id: Uuid, row: T, type_name: &str) -> ApiResult<()> {
        if map.contains_key(&id) {
            return Err(ApiError::Database(format!(
                "duplicate key: {type_name} {id}"
            )));
        }
        map.insert(id, row);
        Ok(())
    }

    fn update<T>(
        map: &mut HashMap<Uuid, T>,
        id: Uuid,
        mut row: T,
        change: &PendingChange,
        stored_modified: fn(&T) -> Option<chrono::DateTime<chrono::Utc>>,
        keep_created: fn(&mut T, Option<chrono::DateTime<chrono::Utc>>),
        stored_created: fn(&T) -> Option<chrono::DateTime<chrono::Utc>>,
    ) -> ApiResult<()> {
        let type_name = change.entity.type_name();
        let existing = map
            .get(&id)
            .ok_or_else(|| ApiError::not_found(type_name, id))?;
        if stored_modified(existing) != change.expected_modified {
            return Err(ApiError::conflict(type_name, id));
        }
        // The outgoing update never touches the creation timestamp
        keep_created(&mut row, stored_created(existing));
        map.insert(id, row);
        Ok(())
    }
}

#[async_trait]
impl ChangeStore for MemoryStore {
    async fn load_snapshot(&self, kind: EntityKind, id: Uuid) -> ApiResult<Option<EntityModel>> {
        let inner = self.inner.lock().await;
        Ok(match kind {
            EntityKind::Customer => inner.customers.get(&id).cloned().map(EntityModel::from),
            EntityKind::Contact => inner.contacts.get(&id).cloned().map(EntityModel::from),
            EntityKind::CustomerContact => inner
                .customer_contacts
                .get(&id)
                .cloned()
                .map(EntityModel::from),
        })
    }

    async fn commit_changes(&self, changes: &[PendingChange]) -> ApiResult<()> {
        let mut inner = self.inner.lock().await;
        // Apply against a copy so a failed mutation leaves nothing behind
        let mut staged = inner.clone();
        for change in changes {
            Self::apply(&mut staged, change)?;
        }
        *inner = staged;
        Ok(())
    }

    async fn append_audits(&self, audits: &[AuditModel]) -> ApiResult<()> {
        if self.audit_append_fails.swap(false, Ordering::SeqCst) {
            return Err(ApiError::AuditWrite(
                "audit store rejected the batch".to_owned(),
            ));
        }
        self.inner.lock().await.audits.extend_from_slice(audits);
        Ok(())
    }

    async fn resolve_display_name(
        &self,
        target: RelationTarget,
        id: Uuid,
    ) -> ApiResult<Option<String>> {
        let inner = self.inner.lock().await;
        Ok(match target {
            RelationTarget::Customer => inner
                .customers
                .get(&id)
                .map(|c| c.name.as_str().to_owned()),
            RelationTarget::Contact => inner.contacts.get(&id).map(|c| c.name.as_str().to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String as HeaplessString;

    fn customer(name: &str) -> CustomerModel {
        CustomerModel {
            id: Uuid::new_v4(),
            account_number: None,
            name: HeaplessString::try_from(name).unwrap(),
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        }
    }

    fn link(customer_id: Uuid, contact_id: Uuid) -> CustomerContactModel {
        CustomerContactModel {
            id: Uuid::new_v4(),
            customer_id,
            contact_id,
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        }
    }

    #[tokio::test]
    async fn test_commit_is_all_or_nothing() {
        let store = MemoryStore::new();
        let good = customer("Acme");
        let missing = customer("Ghost");

        let changes = vec![
            PendingChange::added(good.clone().into()),
            // Updating a row that was never inserted fails the whole batch
            PendingChange::modified(missing.into()),
        ];
        let result = store.commit_changes(&changes).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert!(store.find_customer(good.id).await.is_none());
    }

    #[tokio::test]
    async fn test_guarded_update_detects_conflicts() {
        let store = MemoryStore::new();
        let mut row = customer("Acme");
        row.modified_date = Some(chrono::Utc::now());
        store
            .commit_changes(&[PendingChange::added(row.clone().into())])
            .await
            .unwrap();

        // Stale token: the caller read a different modified_date
        let mut stale = row.clone();
        stale.modified_date = Some(chrono::Utc::now() + chrono::Duration::seconds(5));
        let result = store
            .commit_changes(&[PendingChange::modified(stale.into())])
            .await;
        assert!(matches!(result, Err(ApiError::ConcurrencyConflict(_))));

        // Matching token succeeds
        let fresh = row.clone();
        store
            .commit_changes(&[PendingChange::modified(fresh.into())])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_cascades_to_links() {
        let store = MemoryStore::new();
        let parent = customer("Acme");
        let other = customer("Globex");
        let keep = link(other.id, Uuid::new_v4());
        let gone = link(parent.id, Uuid::new_v4());
        store
            .commit_changes(&[
                PendingChange::added(parent.clone().into()),
                PendingChange::added(other.clone().into()),
                PendingChange::added(keep.clone().into()),
                PendingChange::added(gone.clone().into()),
            ])
            .await
            .unwrap();

        store
            .commit_changes(&[PendingChange::deleted(parent.clone().into())])
            .await
            .unwrap();

        assert!(store.find_customer_contact(gone.id).await.is_none());
        assert!(store.find_customer_contact(keep.id).await.is_some());
    }

    #[tokio::test]
    async fn test_resolve_display_name() {
        let store = MemoryStore::new();
        let row = customer("Acme");
        store
            .commit_changes(&[PendingChange::added(row.clone().into())])
            .await
            .unwrap();

        let name = store
            .resolve_display_name(RelationTarget::Customer, row.id)
            .await
            .unwrap();
        assert_eq!(name.as_deref(), Some("Acme"));

        let absent = store
            .resolve_display_name(RelationTarget::Contact, row.id)
            .await
            .unwrap();
        assert!(absent.is_none());
    }
}
