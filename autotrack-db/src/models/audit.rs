use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use super::identifiable::Identifiable;

/// Database model for the pending-mutation kind recorded on an audit row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "entity_change_type", rename_all = "PascalCase")]
pub enum EntityChangeType {
    Added,
    Deleted,
    Modified,
}

impl std::fmt::Display for EntityChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityChangeType::Added => write!(f, "Added"),
            EntityChangeType::Deleted => write!(f, "Deleted"),
            EntityChangeType::Modified => write!(f, "Modified"),
        }
    }
}

impl FromStr for EntityChangeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Added" => Ok(EntityChangeType::Added),
            "Deleted" => Ok(EntityChangeType::Deleted),
            "Modified" => Ok(EntityChangeType::Modified),
            _ => Err(()),
        }
    }
}

pub fn serialize_change_type<S>(value: &EntityChangeType, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(match value {
        EntityChangeType::Added => "Added",
        EntityChangeType::Deleted => "Deleted",
        EntityChangeType::Modified => "Modified",
    })
}

pub fn deserialize_change_type<'de, D>(deserializer: D) -> Result<EntityChangeType, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    EntityChangeType::from_str(&value_str)
        .map_err(|_| serde::de::Error::custom(format!("Invalid EntityChangeType: {value_str}")))
}

/// One field-level change record. An entity with three changed fields in one
/// save produces three rows sharing entity id, type name, timestamp and
/// change type, differing only in column name and old/new values.
///
/// Rows are append-only: created exclusively by the change interceptor and
/// never updated or deleted afterwards. The audit table itself never enters
/// the change tracker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditModel {
    pub id: Uuid,
    /// Id of the entity that changed; None only if the entity had no
    /// resolvable id at diff time
    pub entity_id: Option<Uuid>,
    /// Actor attributed to the change, from the session context
    pub changed_by: String,
    /// Runtime type name of the changed entity, e.g. `"Customer"`
    pub entity: String,
    pub changed_at: DateTime<Utc>,
    /// Logical field name, e.g. `"Name"` or `"CustomerId"`
    pub column_name: String,
    pub old_value: String,
    pub new_value: String,
    #[serde(
        serialize_with = "serialize_change_type",
        deserialize_with = "deserialize_change_type"
    )]
    pub change_type: EntityChangeType,
}

impl Identifiable for AuditModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
