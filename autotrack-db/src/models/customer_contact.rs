use autotrack_api::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auditable::Auditable;
use super::fields::{collect_values, render_bool, render_opt, AuditFields, FieldDescriptor, FieldValue};
use super::identifiable::Identifiable;

/// Database model for the Customer/Contact many-to-many link.
///
/// Deleting the parent Customer or Contact cascades deletion of this row at
/// the schema level; cascaded rows never pass through the change tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerContactModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub contact_id: Uuid,
    pub created_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub last_modified_by: Option<HeaplessString<50>>,
    pub is_inactive: bool,
}

/// Tracked fields of a link row. CustomerId and ContactId are relationship
/// fields: their audit values are rewritten to `"<Name> (<id>)"` when the
/// referenced entity resolves.
pub const CUSTOMER_CONTACT_FIELDS: &[FieldDescriptor<CustomerContactModel>] = &[
    FieldDescriptor {
        name: "CustomerId",
        get: |cc| cc.customer_id.to_string(),
    },
    FieldDescriptor {
        name: "ContactId",
        get: |cc| cc.contact_id.to_string(),
    },
    FieldDescriptor {
        name: "LastModifiedBy",
        get: |cc| render_opt(cc.last_modified_by.as_deref()),
    },
    FieldDescriptor {
        name: "IsInactive",
        get: |cc| render_bool(cc.is_inactive),
    },
];

impl CustomerContactModel {
    /// Basic shape checks, run before any commit is attempted
    pub fn validate(&self) -> ApiResult<()> {
        if self.customer_id.is_nil() || self.contact_id.is_nil() {
            return Err(ApiError::Validation(
                "CustomerContact requires both foreign keys".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Identifiable for CustomerContactModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Auditable for CustomerContactModel {
    fn created_date(&self) -> Option<DateTime<Utc>> {
        self.created_date
    }

    fn set_created_date(&mut self, at: DateTime<Utc>) {
        self.created_date = Some(at);
    }

    fn modified_date(&self) -> Option<DateTime<Utc>> {
        self.modified_date
    }

    fn set_modified_date(&mut self, at: DateTime<Utc>) {
        self.modified_date = Some(at);
    }

    fn last_modified_by(&self) -> Option<&str> {
        self.last_modified_by.as_deref()
    }

    fn is_inactive(&self) -> bool {
        self.is_inactive
    }
}

impl AuditFields for CustomerContactModel {
    fn entity_name(&self) -> &'static str {
        "CustomerContact"
    }

    fn field_values(&self) -> Vec<FieldValue> {
        collect_values(self, CUSTOMER_CONTACT_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::relation::RelationTarget;

    #[test]
    fn test_foreign_key_fields_carry_relation_targets() {
        let link = CustomerContactModel {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            contact_id: Uuid::new_v4(),
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        };
        let values = link.field_values();
        assert_eq!(values[0].name, "CustomerId");
        assert_eq!(values[0].relation, Some(RelationTarget::Customer));
        assert_eq!(values[0].value, link.customer_id.to_string());
        assert_eq!(values[1].name, "ContactId");
        assert_eq!(values[1].relation, Some(RelationTarget::Contact));
    }

    #[test]
    fn test_validate_rejects_nil_foreign_keys() {
        let link = CustomerContactModel {
            id: Uuid::new_v4(),
            customer_id: Uuid::nil(),
            contact_id: Uuid::new_v4(),
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        };
        assert!(link.validate().is_err());
    }
}
