use async_trait::async_trait;
use autotrack_api::ApiResult;
use sqlx::Database;
use uuid::Uuid;

use crate::models::audit::AuditModel;

/// Repository trait for the single audit read of the query surface: every
/// audit row whose entity id matches the given id.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait FindAuditsByEntityId<DB: Database>: Send + Sync {
    /// Load the field-level change history of one entity
    ///
    /// # Arguments
    /// * `entity_id` - The UUID of the entity whose audit rows to load
    ///
    /// # Returns
    /// * `Ok(Vec<AuditModel>)` - Matching rows in insertion order; empty
    ///   (never an error) when the entity has no history
    /// * `Err` - An error if the query could not be executed
    async fn find_audits_by_entity_id(&self, entity_id: Uuid) -> ApiResult<Vec<AuditModel>>;
}
