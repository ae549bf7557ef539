use async_trait::async_trait;
use autotrack_api::{ApiError, ApiResult};
use autotrack_db::engine::state::{EntityState, PendingChange};
use autotrack_db::models::audit::AuditModel;
use autotrack_db::models::entity::{EntityKind, EntityModel};
use autotrack_db::models::relation::RelationTarget;
use autotrack_db::store::ChangeStore;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::executor::Executor;
use crate::repository::{audit_repository, contact_repository, customer_contact_repository, customer_repository};
use crate::utils::db_err;

/// PostgreSQL `ChangeStore`.
///
/// The primary change set commits on one transaction; the audit batch
/// commits on a second, dependent transaction afterwards, so a failed audit
/// write can never roll back the primary mutation. Cascade deletion of link
/// rows is the schema's job (FK `ON DELETE CASCADE`).
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    async fn begin(&self) -> ApiResult<Executor> {
        let tx = self.pool.begin().await.map_err(db_err)?;
        Ok(Executor::new(tx))
    }
}

#[async_trait]
impl ChangeStore for PgStore {
    async fn load_snapshot(&self, kind: EntityKind, id: Uuid) -> ApiResult<Option<EntityModel>> {
        let executor = self.begin().await?;
        let snapshot = match kind {
            EntityKind::Customer => customer_repository::find_by_id::find_by_id_impl(&executor, id)
                .await?
                .map(EntityModel::from),
            EntityKind::Contact => contact_repository::find_by_id::find_by_id_impl(&executor, id)
                .await?
                .map(EntityModel::from),
            EntityKind::CustomerContact => {
                customer_contact_repository::find_by_id::find_by_id_impl(&executor, id)
                    .await?
                    .map(EntityModel::from)
            }
        };
        executor.commit().await?;
        Ok(snapshot)
    }

    async fn commit_changes(&self, changes: &[PendingChange]) -> ApiResult<()> {
        let executor = self.begin().await?;
        tracing::debug!(pending = changes.len(), "committing change set");

        for change in changes {
            match (change.state, &change.entity) {
                (EntityState::Unchanged, _) => {}

                (EntityState::Added, EntityModel::Customer(m)) => {
                    customer_repository::create::create_impl(&executor, m).await?
                }
                (EntityState::Added, EntityModel::Contact(m)) => {
                    contact_repository::create::create_impl(&executor, m).await?
                }
                (EntityState::Added, EntityModel::CustomerContact(m)) => {
                    customer_contact_repository::create::create_impl(&executor, m).await?
                }

                (EntityState::Modified, EntityModel::Customer(m)) => {
                    customer_repository::update::update_impl(&executor, m, change.expected_modified)
                        .await?
                }
                (EntityState::Modified, EntityModel::Contact(m)) => {
                    contact_repository::update::update_impl(&executor, m, change.expected_modified)
                        .await?
                }
                (EntityState::Modified, EntityModel::CustomerContact(m)) => {
                    customer_contact_repository::update::update_impl(
                        &executor,
                        m,
                        change.expected_modified,
                    )
                    .await?
                }

                (EntityState::Deleted, EntityModel::Customer(m)) => {
                    customer_repository::delete::delete_impl(&executor, m.id).await?
                }
                (EntityState::Deleted, EntityModel::Contact(m)) => {
                    contact_repository::delete::delete_impl(&executor, m.id).await?
                }
                (EntityState::Deleted, EntityModel::CustomerContact(m)) => {
                    customer_contact_repository::delete::delete_impl(&executor, m.id).await?
                }
            }
        }

        // An error above drops the executor and with it the transaction, so
        // nothing of the change set survives
        executor.commit().await
    }

    async fn append_audits(&self, audits: &[AuditModel]) -> ApiResult<()> {
        let executor = self
            .begin()
            .await
            .map_err(|err| ApiError::AuditWrite(err.to_string()))?;
        audit_repository::create_batch::create_batch_impl(&executor, audits)
            .await
            .map_err(|err| ApiError::AuditWrite(err.to_string()))?;
        executor
            .commit()
            .await
            .map_err(|err| ApiError::AuditWrite(err.to_string()))
    }

    async fn resolve_display_name(
        &self,
        target: RelationTarget,
        id: Uuid,
    ) -> ApiResult<Option<String>> {
        let sql = match target {
            RelationTarget::Customer => "SELECT name FROM customers WHERE id = $1",
            RelationTarget::Contact => "SELECT name FROM contacts WHERE id = $1",
        };
        let row: Option<(String,)> = sqlx::query_as(sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(|(name,)| name))
    }
}
