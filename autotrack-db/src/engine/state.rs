use chrono::{DateTime, Utc};

use crate::models::audit::EntityChangeType;
use crate::models::auditable::Auditable;
use crate::models::entity::EntityModel;

/// Pending mutation kind detected for an entity prior to commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Added,
    Modified,
    Deleted,
    Unchanged,
}

impl EntityState {
    /// The change type recorded on audit rows for this state; Unchanged
    /// entities produce no rows
    pub fn change_type(&self) -> Option<EntityChangeType> {
        match self {
            EntityState::Added => Some(EntityChangeType::Added),
            EntityState::Modified => Some(EntityChangeType::Modified),
            EntityState::Deleted => Some(EntityChangeType::Deleted),
            EntityState::Unchanged => None,
        }
    }
}

/// One entity queued on a session, with its lifecycle state and the
/// optimistic-concurrency token captured when it was registered.
#[derive(Debug, Clone)]
pub struct PendingChange {
    pub state: EntityState,
    pub entity: EntityModel,
    /// The last-modified timestamp the caller read before editing. Captured
    /// at registration, before stamping overwrites it; the guarded UPDATE
    /// compares against this value.
    pub expected_modified: Option<DateTime<Utc>>,
}

impl PendingChange {
    pub fn added(entity: EntityModel) -> Self {
        Self {
            state: EntityState::Added,
            entity,
            expected_modified: None,
        }
    }

    pub fn modified(entity: EntityModel) -> Self {
        let expected_modified = entity.as_auditable().modified_date();
        Self {
            state: EntityState::Modified,
            entity,
            expected_modified,
        }
    }

    pub fn deleted(entity: EntityModel) -> Self {
        Self {
            state: EntityState::Deleted,
            entity,
            expected_modified: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::CustomerModel;
    use heapless::String as HeaplessString;
    use uuid::Uuid;

    #[test]
    fn test_modified_captures_concurrency_token() {
        let read_at = Utc::now();
        let customer = CustomerModel {
            id: Uuid::new_v4(),
            account_number: None,
            name: HeaplessString::try_from("Acme").unwrap(),
            created_date: Some(read_at),
            modified_date: Some(read_at),
            last_modified_by: None,
            is_inactive: false,
        };
        let change = PendingChange::modified(customer.into());
        assert_eq!(change.expected_modified, Some(read_at));
        assert_eq!(change.state, EntityState::Modified);
    }

    #[test]
    fn test_change_type_mapping() {
        assert_eq!(
            EntityState::Added.change_type(),
            Some(EntityChangeType::Added)
        );
        assert_eq!(EntityState::Unchanged.change_type(), None);
    }
}
