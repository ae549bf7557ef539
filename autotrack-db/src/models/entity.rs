use autotrack_api::ApiResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auditable::Auditable;
use super::contact::ContactModel;
use super::customer::CustomerModel;
use super::customer_contact::CustomerContactModel;
use super::fields::{AuditFields, FieldValue};
use super::identifiable::Identifiable;

/// The closed set of entity types that participate in change tracking.
///
/// The Audit record is deliberately not a member: audit rows are written only
/// by the interceptor and can never be tracked, diffed or audited themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Customer,
    Contact,
    CustomerContact,
}

impl EntityKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityKind::Customer => "Customer",
            EntityKind::Contact => "Contact",
            EntityKind::CustomerContact => "CustomerContact",
        }
    }
}

/// Union over the tracked entity models.
///
/// The diff engine works through `as_auditable`/`field_values` so it never
/// touches concrete types; backends match on the variant to dispatch typed
/// persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityModel {
    Customer(CustomerModel),
    Contact(ContactModel),
    CustomerContact(CustomerContactModel),
}

impl EntityModel {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityModel::Customer(_) => EntityKind::Customer,
            EntityModel::Contact(_) => EntityKind::Contact,
            EntityModel::CustomerContact(_) => EntityKind::CustomerContact,
        }
    }

    pub fn id(&self) -> Uuid {
        self.as_auditable().get_id()
    }

    /// Runtime type name recorded on audit rows
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn as_auditable(&self) -> &dyn Auditable {
        match self {
            EntityModel::Customer(m) => m,
            EntityModel::Contact(m) => m,
            EntityModel::CustomerContact(m) => m,
        }
    }

    pub fn as_auditable_mut(&mut self) -> &mut dyn Auditable {
        match self {
            EntityModel::Customer(m) => m,
            EntityModel::Contact(m) => m,
            EntityModel::CustomerContact(m) => m,
        }
    }

    /// Current values of every tracked field, in descriptor-table order
    pub fn field_values(&self) -> Vec<FieldValue> {
        match self {
            EntityModel::Customer(m) => m.field_values(),
            EntityModel::Contact(m) => m.field_values(),
            EntityModel::CustomerContact(m) => m.field_values(),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        match self {
            EntityModel::Customer(m) => m.validate(),
            EntityModel::Contact(m) => m.validate(),
            EntityModel::CustomerContact(m) => m.validate(),
        }
    }
}

impl From<CustomerModel> for EntityModel {
    fn from(model: CustomerModel) -> Self {
        EntityModel::Customer(model)
    }
}

impl From<ContactModel> for EntityModel {
    fn from(model: ContactModel) -> Self {
        EntityModel::Contact(model)
    }
}

impl From<CustomerContactModel> for EntityModel {
    fn from(model: CustomerContactModel) -> Self {
        EntityModel::CustomerContact(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use heapless::String as HeaplessString;

    #[test]
    fn test_kind_and_type_name() {
        let customer = CustomerModel {
            id: Uuid::new_v4(),
            account_number: None,
            name: HeaplessString::try_from("Acme").unwrap(),
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        };
        let entity = EntityModel::from(customer.clone());
        assert_eq!(entity.kind(), EntityKind::Customer);
        assert_eq!(entity.type_name(), "Customer");
        assert_eq!(entity.id(), customer.id);
    }

    #[test]
    fn test_auditable_dispatch_stamps_through_union() {
        let customer = CustomerModel {
            id: Uuid::new_v4(),
            account_number: None,
            name: HeaplessString::try_from("Acme").unwrap(),
            created_date: None,
            modified_date: None,
            last_modified_by: None,
            is_inactive: false,
        };
        let mut entity = EntityModel::from(customer);
        let now = Utc::now();
        entity.as_auditable_mut().set_created_date(now);
        entity.as_auditable_mut().set_modified_date(now);
        assert_eq!(entity.as_auditable().created_date(), Some(now));
        assert_eq!(entity.as_auditable().modified_date(), Some(now));
    }
}
