use autotrack_api::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use uuid::Uuid;

use super::auditable::Auditable;
use super::fields::{collect_values, render_bool, render_opt, AuditFields, FieldDescriptor, FieldValue};
use super::identifiable::Identifiable;

/// Database model for contact type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contact_type", rename_all = "PascalCase")]
pub enum ContactType {
    Primary,
    Secondary,
    Emergency,
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactType::Primary => write!(f, "Primary"),
            ContactType::Secondary => write!(f, "Secondary"),
            ContactType::Emergency => write!(f, "Emergency"),
        }
    }
}

impl FromStr for ContactType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Primary" => Ok(ContactType::Primary),
            "Secondary" => Ok(ContactType::Secondary),
            "Emergency" => Ok(ContactType::Emergency),
            _ => Err(()),
        }
    }
}

pub fn serialize_contact_type<S>(value: &ContactType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(match value {
        ContactType::Primary => "Primary",
        ContactType::Secondary => "Secondary",
        ContactType::Emergency => "Emergency",
    })
}

pub fn deserialize_contact_type<'de, D>(deserializer: D) -> Result<ContactType, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    ContactType::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid ContactType: {value_str}")))
}

/// Database model for Contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactModel {
    pub id: Uuid,
    pub name: HeaplessString<100>,
    pub title: Option<HeaplessString<50>>,
    pub phone: Option<HeaplessString<30>>,
    pub email: Option<HeaplessString<100>>,
    #[serde(
        serialize_with = "serialize_contact_type",
        deserialize_with = "deserialize_contact_type"
    )]
    pub contact_type: ContactType,
    /// Free text, unbounded
    pub note: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub modified_date: Option<DateTime<Utc>>,
    pub last_modified_by: Option<HeaplessString<50>>,
    pub is_inactive: bool,
}

/// Tracked fields of a Contact; timestamps are stamped, never diffed
pub const CONTACT_FIELDS: &[FieldDescriptor<ContactModel>] = &[
    FieldDescriptor {
        name: "Name",
        get: |c| c.name.as_str().to_owned(),
    },
    FieldDescriptor {
        name: "Title",
        get: |c| render_opt(c.title.as_deref()),
    },
    FieldDescriptor {
        name: "Phone",
        get: |c| render_opt(c.phone.as_deref()),
    },
    FieldDescriptor {
        name: "Email",
        get: |c| render_opt(c.email.as_deref()),
    },
    FieldDescriptor {
        name: "ContactType",
        get: |c| c.contact_type.to_string(),
    },
    FieldDescriptor {
        name: "Note",
        get: |c| render_opt(c.note.as_deref()),
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

impl ContactModel {
    /// Basic shape checks, run before any commit is attempted
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.is_empty() {
            return Err(ApiError::Validation(
                "Contact name must not be empty".to_owned(),
            ));
        }
        if let Some(email) = self.email.as_deref() {
            if !email.contains('@') {
                return Err(ApiError::Validation(format!(
                    "Contact email is not an address: {email}"
                )));
            }
        }
        Ok(())
    }
}

impl Identifiable for ContactModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl Auditable for ContactModel {
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

impl AuditFields for ContactModel {
    fn entity_name(&self) -> &'static str {
        "Contact"
    }

    fn field_values(&self) -> Vec<FieldValue> {
        collect_values(self, CONTACT_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_contact(name: &str) -> ContactModel {
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

    #[test]
    fn test_contact_type_round_trip() {
        for value in [ContactType::Primary, ContactType::Secondary, ContactType::Emergency] {
            assert_eq!(ContactType::from_str(&value.to_string()), Ok(value));
        }
        assert!(ContactType::from_str("Tertiary").is_err());
    }

    #[test]
    fn test_field_values_include_contact_type() {
        let contact = new_contact("Jane");
        let values = contact.field_values();
        let contact_type = values.iter().find(|v| v.name == "ContactType").unwrap();
        assert_eq!(contact_type.value, "Primary");
        assert!(contact_type.relation.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut contact = new_contact("Jane");
        contact.email = Some(HeaplessString::try_from("jane.example.com").unwrap());
        assert!(contact.validate().is_err());

        contact.email = Some(HeaplessString::try_from("jane@example.com").unwrap());
        assert!(contact.validate().is_ok());
    }
}
