use async_trait::async_trait;
use autotrack_api::ApiResult;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for checking existence of an entity by its ID
///
/// Used to disambiguate a failed guarded update: an absent row means
/// NotFound, a present row means another writer won the race.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait ExistsById<DB: Database>: Send + Sync {
    /// Check whether an entity with the given id exists
    ///
    /// # Arguments
    /// * `id` - The UUID to check
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether a row with this id exists
    /// * `Err` - An error if the query could not be executed
    async fn exists_by_id(&self, id: Uuid) -> ApiResult<bool>;
}
