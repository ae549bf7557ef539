use async_trait::async_trait;
use autotrack_api::ApiResult;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading every entity of a type
///
/// Backs the get-all read of the query surface. Row order follows insertion
/// order; no further ordering is guaranteed.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait LoadAll<DB: Database, T: Identifiable>: Send + Sync {
    /// Load all entities of this type
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - All rows, empty when the table is empty
    /// * `Err` - An error if the query could not be executed
    async fn load_all(&self) -> ApiResult<Vec<T>>;
}
