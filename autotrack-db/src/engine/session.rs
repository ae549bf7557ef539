use autotrack_api::{ApiError, ApiResult};
use chrono::Utc;
use uuid::Uuid;

use crate::models::audit::AuditModel;
use crate::models::auditable::Auditable;
use crate::models::entity::EntityModel;
use crate::models::relation::{parse_relation_id, resolved_value};
use crate::store::ChangeStore;

use super::diff::{field_changes, FieldChange};
use super::state::{EntityState, PendingChange};

/// Actor attributed to audit rows when the caller never set one
pub const DEFAULT_CONTEXT_USER: &str = "Default";

/// Outcome of a save. `audit_error` is the out-of-band report for a failed
/// audit commit: the primary commit has already succeeded at that point, so
/// the failure is logged and carried here instead of failing the operation.
#[derive(Debug, Clone)]
pub struct SaveSummary {
    pub entities_saved: usize,
    pub audits_written: usize,
    pub audit_error: Option<String>,
}

/// The change interceptor: a unit of work whose save is semantically the
/// backing store's commit, augmented with timestamp stamping and field-level
/// audit records.
///
/// One session per logical request. The actor context lives on the session,
/// never in process globals, so concurrent units of work cannot attribute
/// each other's changes.
///
/// Save order is fixed: validate, stamp timestamps, diff against database
/// snapshots, resolve relationship display names, commit the primary change
/// set atomically, then append the audit batch in a follow-up commit. A
/// failed save leaves the pending set registered; dropping the future before
/// the primary commit completes means no audit rows are ever written.
pub struct AuditSession<S: ChangeStore> {
    store: S,
    context_user: String,
    pending: Vec<PendingChange>,
}

impl<S: ChangeStore> AuditSession<S> {
    pub fn new(store: S) -> Self {
        Self::with_user(store, DEFAULT_CONTEXT_USER)
    }

    pub fn with_user(store: S, user: impl Into<String>) -> Self {
        Self {
            store,
            context_user: user.into(),
            pending: Vec::new(),
        }
    }

    /// Replace the actor attributed to subsequent saves
    pub fn set_context_user(&mut self, user: impl Into<String>) {
        self.context_user = user.into();
    }

    pub fn context_user(&self) -> &str {
        &self.context_user
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Queue a brand-new entity. CreatedDate and ModifiedDate are stamped at
    /// save time.
    pub fn add(&mut self, entity: impl Into<EntityModel>) {
        self.pending.push(PendingChange::added(entity.into()));
    }

    /// Queue an edited entity. Its current ModifiedDate is kept as the
    /// optimistic-concurrency token before stamping overwrites it.
    pub fn update(&mut self, entity: impl Into<EntityModel>) {
        self.pending.push(PendingChange::modified(entity.into()));
    }

    /// Queue an entity for deletion
    pub fn remove(&mut self, entity: impl Into<EntityModel>) {
        self.pending.push(PendingChange::deleted(entity.into()));
    }

    /// Commit all pending changes, with audit side effects.
    ///
    /// # Returns
    /// * `Ok(SaveSummary)` - The primary commit succeeded; `audit_error`
    ///   reports a failed audit commit without failing the save
    /// * `Err(ApiError::Validation)` - A pending entity failed shape checks;
    ///   nothing was committed
    /// * `Err(ApiError::NotFound)` - A modified entity no longer exists
    /// * `Err(ApiError::ConcurrencyConflict)` - A modified entity still
    ///   exists but was changed by another writer
    pub async fn save(&mut self) -> ApiResult<SaveSummary> {
        for change in &self.pending {
            if change.state != EntityState::Deleted {
                change.entity.validate()?;
            }
        }

        let now = Utc::now();
        for change in &mut self.pending {
            let auditable = change.entity.as_auditable_mut();
            match change.state {
                EntityState::Added => {
                    auditable.set_created_date(now);
                    auditable.set_modified_date(now);
                }
                EntityState::Modified => auditable.set_modified_date(now),
                EntityState::Deleted | EntityState::Unchanged => {}
            }
        }

        let mut audits = Vec::new();
        for change in &self.pending {
            let Some(change_type) = change.state.change_type() else {
                continue;
            };
            let id = change.entity.id();
            let snapshot = if change.state == EntityState::Modified {
                let snapshot = self.store.load_snapshot(change.entity.kind(), id).await?;
                if snapshot.is_none() {
                    return Err(ApiError::not_found(change.entity.type_name(), id));
                }
                snapshot
            } else {
                None
            };

            let entity_id = (!id.is_nil()).then_some(id);
            for field in field_changes(change, snapshot.as_ref()) {
                let new_value = self.resolve_new_value(&field).await?;
                audits.push(AuditModel {
                    id: Uuid::new_v4(),
                    entity_id,
                    changed_by: self.context_user.clone(),
                    entity: change.entity.type_name().to_owned(),
                    changed_at: now,
                    column_name: field.name.to_owned(),
                    old_value: field.old,
                    new_value,
                    change_type,
                });
            }
        }

        self.store.commit_changes(&self.pending).await?;
        let entities_saved = self.pending.len();
        self.pending.clear();

        let mut audit_error = None;
        if !audits.is_empty() {
            if let Err(err) = self.store.append_audits(&audits).await {
                tracing::error!(
                    error = %err,
                    rows = audits.len(),
                    "audit batch write failed after primary commit"
                );
                audit_error = Some(err.to_string());
            }
        }

        Ok(SaveSummary {
            entities_saved,
            audits_written: if audit_error.is_none() { audits.len() } else { 0 },
            audit_error,
        })
    }

    /// Rewrite a relationship field's new value to `"<Name> (<id>)"` when
    /// the referenced entity resolves; fall back to the raw id otherwise.
    async fn resolve_new_value(&self, field: &FieldChange) -> ApiResult<String> {
        let Some(target) = field.relation else {
            return Ok(field.new.clone());
        };
        if field.new.is_empty() {
            return Ok(field.new.clone());
        }
        let Some(id) = parse_relation_id(&field.new) else {
            return Ok(field.new.clone());
        };
        match self.store.resolve_display_name(target, id).await? {
            Some(name) => Ok(resolved_value(&name, &field.new)),
            None => Ok(field.new.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::audit::EntityChangeType;
    use crate::models::contact::{ContactModel, ContactType};
    use crate::models::customer::CustomerModel;
    use crate::models::customer_contact::CustomerContactModel;
    use crate::store::MemoryStore;
    use heapless::String as HeaplessString;
    use std::sync::Arc;

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

    fn contact(name: &str) -> ContactModel {
        ContactModel {
            id: Uuid::new_v4(),
            name: HeaplessString::try_from(name).unwrap(),
            title: None,
            phone: None,
            email: None,
            contact_type: ContactType::Primary,
            note: None,
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

    fn session(store: &Arc<MemoryStore>) -> AuditSession<Arc<MemoryStore>> {
        AuditSession::new(store.clone())
    }

    #[tokio::test]
    async fn test_create_stamps_timestamps_and_audits_added() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let row = customer("Acme");

        session.add(row.clone());
        let summary = session.save().await.unwrap();
        assert_eq!(summary.entities_saved, 1);
        assert_eq!(summary.audits_written, 1);
        assert!(summary.audit_error.is_none());

        let stored = store.find_customer(row.id).await.unwrap();
        assert!(stored.created_date.is_some());
        assert_eq!(stored.created_date, stored.modified_date);

        let audits = store.audits_for_entity(row.id).await;
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].change_type, EntityChangeType::Added);
        assert_eq!(audits[0].entity, "Customer");
        assert_eq!(audits[0].column_name, "Name");
        assert_eq!(audits[0].old_value, "");
        assert_eq!(audits[0].new_value, "Acme");
        assert_eq!(audits[0].changed_by, DEFAULT_CONTEXT_USER);
        assert_eq!(audits[0].changed_at, stored.created_date.unwrap());
    }

    #[tokio::test]
    async fn test_update_audits_changed_field_only() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let row = customer("Acme");
        session.add(row.clone());
        session.save().await.unwrap();

        let created = store.find_customer(row.id).await.unwrap();
        let mut edited = created.clone();
        edited.name = HeaplessString::try_from("Acme Corp").unwrap();
        session.update(edited);
        session.save().await.unwrap();

        let updated = store.find_customer(row.id).await.unwrap();
        assert_eq!(updated.created_date, created.created_date);
        assert!(updated.modified_date.unwrap() > created.modified_date.unwrap());

        let audits = store.audits_for_entity(row.id).await;
        assert_eq!(audits.len(), 2);
        let modified = &audits[1];
        assert_eq!(modified.change_type, EntityChangeType::Modified);
        assert_eq!(modified.column_name, "Name");
        assert_eq!(modified.old_value, "Acme");
        assert_eq!(modified.new_value, "Acme Corp");
    }

    #[tokio::test]
    async fn test_identical_resave_produces_no_audit_rows() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let row = customer("Acme");
        session.add(row.clone());
        session.save().await.unwrap();

        let created = store.find_customer(row.id).await.unwrap();
        session.update(created.clone());
        let summary = session.save().await.unwrap();
        assert_eq!(summary.audits_written, 0);

        // ModifiedDate still advances on every save
        let resaved = store.find_customer(row.id).await.unwrap();
        assert!(resaved.modified_date.unwrap() > created.modified_date.unwrap());
        assert_eq!(store.audits_for_entity(row.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_relationship_fields_resolve_display_names() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let acme = customer("Acme");
        let jane = contact("Jane");
        session.add(acme.clone());
        session.add(jane.clone());
        session.save().await.unwrap();

        let row = link(acme.id, jane.id);
        session.add(row.clone());
        session.save().await.unwrap();

        let audits = store.audits_for_entity(row.id).await;
        let customer_id = audits.iter().find(|a| a.column_name == "CustomerId").unwrap();
        assert_eq!(customer_id.new_value, format!("Acme ({})", acme.id));
        let contact_id = audits.iter().find(|a| a.column_name == "ContactId").unwrap();
        assert_eq!(contact_id.new_value, format!("Jane ({})", jane.id));
    }

    #[tokio::test]
    async fn test_unresolvable_relationship_falls_back_to_raw_id() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let row = link(Uuid::new_v4(), Uuid::new_v4());
        session.add(row.clone());
        session.save().await.unwrap();

        let audits = store.audits_for_entity(row.id).await;
        let customer_id = audits.iter().find(|a| a.column_name == "CustomerId").unwrap();
        assert_eq!(customer_id.new_value, row.customer_id.to_string());
    }

    #[tokio::test]
    async fn test_same_save_link_resolution_falls_back() {
        // Parents added in the same save are not yet visible to the
        // resolver, so the link's audit values keep the raw ids
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let acme = customer("Acme");
        let jane = contact("Jane");
        let row = link(acme.id, jane.id);
        session.add(acme.clone());
        session.add(jane);
        session.add(row.clone());
        session.save().await.unwrap();

        let audits = store.audits_for_entity(row.id).await;
        let customer_id = audits.iter().find(|a| a.column_name == "CustomerId").unwrap();
        assert_eq!(customer_id.new_value, acme.id.to_string());
    }

    #[tokio::test]
    async fn test_rows_of_one_save_share_stamp() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let mut row = contact("Jane");
        row.title = Some(HeaplessString::try_from("CTO").unwrap());
        row.phone = Some(HeaplessString::try_from("555-0100").unwrap());
        row.email = Some(HeaplessString::try_from("jane@example.com").unwrap());
        session.add(row.clone());
        session.save().await.unwrap();

        let audits = store.audits_for_entity(row.id).await;
        assert_eq!(audits.len(), 5); // Name, Title, Phone, Email, ContactType
        let first = &audits[0];
        for audit in &audits {
            assert_eq!(audit.entity_id, Some(row.id));
            assert_eq!(audit.entity, "Contact");
            assert_eq!(audit.changed_at, first.changed_at);
            assert_eq!(audit.change_type, EntityChangeType::Added);
        }
        let mut columns: Vec<&str> = audits.iter().map(|a| a.column_name.as_str()).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), audits.len());
    }

    #[tokio::test]
    async fn test_stale_update_is_a_concurrency_conflict() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let row = customer("Acme");
        session.add(row.clone());
        session.save().await.unwrap();

        let mut stale = store.find_customer(row.id).await.unwrap();
        stale.modified_date = Some(Utc::now() + chrono::Duration::seconds(30));
        session.update(stale);
        let result = session.save().await;
        assert!(matches!(result, Err(ApiError::ConcurrencyConflict(_))));
    }

    #[tokio::test]
    async fn test_updating_missing_entity_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        session.update(customer("Ghost"));
        let result = session.save().await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_audit_write_failure_is_non_fatal() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let row = customer("Acme");
        store.fail_next_audit_append();
        session.add(row.clone());

        let summary = session.save().await.unwrap();
        assert!(summary.audit_error.is_some());
        assert_eq!(summary.audits_written, 0);

        // Primary commit stands; the audit trail has a gap
        assert!(store.find_customer(row.id).await.is_some());
        assert!(store.audits_for_entity(row.id).await.is_empty());
    }

    #[tokio::test]
    async fn test_validation_runs_before_any_commit() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let good = customer("Acme");
        let mut bad = customer("x");
        bad.name = HeaplessString::new();
        session.add(good);
        session.add(bad);

        let result = session.save().await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(store.customers().await.is_empty());
        assert!(store.all_audits().await.is_empty());
        // The pending set is kept so the caller can fix and retry
        assert_eq!(session.pending_count(), 2);
    }

    #[tokio::test]
    async fn test_context_user_attribution() {
        let store = Arc::new(MemoryStore::new());
        let mut session = AuditSession::with_user(store.clone(), "alice");
        let row = customer("Acme");
        session.add(row.clone());
        session.save().await.unwrap();

        let audits = store.audits_for_entity(row.id).await;
        assert_eq!(audits[0].changed_by, "alice");
    }

    #[tokio::test]
    async fn test_delete_produces_deleted_rows() {
        let store = Arc::new(MemoryStore::new());
        let mut session = session(&store);
        let row = customer("Acme");
        session.add(row.clone());
        session.save().await.unwrap();

        let stored = store.find_customer(row.id).await.unwrap();
        session.remove(stored);
        session.save().await.unwrap();

        assert!(store.find_customer(row.id).await.is_none());
        let audits = store.audits_for_entity(row.id).await;
        let deleted: Vec<_> = audits
            .iter()
            .filter(|a| a.change_type == EntityChangeType::Deleted)
            .collect();
        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].column_name, "Name");
        assert_eq!(deleted[0].old_value, "");
        assert_eq!(deleted[0].new_value, "Acme");
    }

    #[tokio::test]
    async fn test_audit_lookup_is_empty_for_unknown_entity() {
        let store = Arc::new(MemoryStore::new());
        assert!(store.audits_for_entity(Uuid::new_v4()).await.is_empty());
    }
}
