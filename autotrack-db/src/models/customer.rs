use autotrack_api::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auditable::Auditable;
use super::fields::{collect_values, render_bool, render_opt, AuditFields, FieldDescriptor, FieldValue};
use super::identifiable::Identifiable;

/// Database model for Customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerModel {
    pub id: Uuid,
    pub account_number: Option<HeaplessString<50>>,
    pub name: HeaplessString<100>,
    pub created_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub last_modified_by: Option<HeaplessString<50>>,
    pub is_inactive: bool,
}

/// Tracked fields of a Customer; timestamps are stamped, never diffed
pub const CUSTOMER_FIELDS: &[FieldDescriptor<CustomerModel>] = &[
    FieldDescriptor {
        name: "AccountNumber",
        get: |c| render_opt(c.account_number.as_deref()),
    },
    FieldDescriptor {
        name: "Name",
        get: |c| c.name.as_str().to_owned(),
    },
    FieldDescriptor {
        name: "LastModifiedBy",
        get: |c| render_opt(c.last_modified_by.as_deref()),
    },
    FieldDescriptor {
        name: "IsInactive",
        get: |c| render_bool(c.is_inactive),
    },
];

impl CustomerModel {
    /// Basic shape checks, run before any commit is attempted
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.is_empty() {
            return Err(ApiError::Validation(
                "Customer name must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Identifiable for CustomerModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Auditable for CustomerModel {
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

impl AuditFields for CustomerModel {
    fn entity_name(&self) -> &'static str {
        "Customer"
    }

    fn field_values(&self) -> Vec<FieldValue> {
        collect_values(self, CUSTOMER_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str) -> CustomerModel {
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

    #[test]
    fn test_field_values_render_absent_as_empty() {
        let customer = new_customer("Acme");
        let values = customer.field_values();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0].name, "AccountNumber");
        assert_eq!(values[0].value, "");
        assert_eq!(values[1].name, "Name");
        assert_eq!(values[1].value, "Acme");
        assert_eq!(values[3].name, "IsInactive");
        assert_eq!(values[3].value, "");
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let customer = new_customer("Acme");
        assert!(customer.validate().is_ok());

        let mut nameless = customer;
        nameless.name = HeaplessString::new();
        assert!(matches!(
            nameless.validate(),
            Err(autotrack_api::ApiError::Validation(_))
        ));
    }
}
