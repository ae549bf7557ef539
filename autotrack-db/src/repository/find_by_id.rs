use async_trait::async_trait;
use autotrack_api::ApiResult;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for finding a single entity by its ID
///
/// Returns an Option so callers decide how to surface an absent row; the
/// HTTP layer maps `None` to NotFound.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl FindById<Postgres, CustomerModel> for CustomerRepositoryImpl {
///     async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<CustomerModel>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait FindById<DB: Database, T: Identifiable>: Send + Sync {
    /// Find an entity by its unique identifier
    ///
    /// # Arguments
    /// * `id` - The UUID of the entity to find
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The found entity
    /// * `Ok(None)` - If the entity does not exist
    /// * `Err` - An error if the query could not be executed
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<T>>;
}
