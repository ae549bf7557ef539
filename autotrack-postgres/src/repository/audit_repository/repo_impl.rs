use async_trait::async_trait;
use autotrack_api::ApiResult;
use autotrack_db::models::audit::AuditModel;
use autotrack_db::repository::FindAuditsByEntityId;
use sqlx::Postgres;
use uuid::Uuid;

use crate::executor::Executor;

pub struct AuditRepositoryImpl {
    pub(crate) executor: Executor,
}

impl AuditRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl FindAuditsByEntityId<Postgres> for AuditRepositoryImpl {
    async fn find_audits_by_entity_id(&self, entity_id: Uuid) -> ApiResult<Vec<AuditModel>> {
        super::find_by_entity_id::find_by_entity_id_impl(&self.executor, entity_id).await
    }
}
