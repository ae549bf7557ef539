use autotrack_api::ApiResult;
use autotrack_db::engine::session::AuditSession;
use sqlx::PgPool;
use std::sync::Arc;

use crate::executor::Executor;
use crate::repository::audit_repository::AuditRepositoryImpl;
use crate::repository::contact_repository::ContactRepositoryImpl;
use crate::repository::customer_contact_repository::CustomerContactRepositoryImpl;
use crate::repository::customer_repository::CustomerRepositoryImpl;
use crate::store::PgStore;
use crate::utils::db_err;

/// Entry point of the postgres backend: hands out read repositories scoped
/// to one transaction, and audit sessions for the write path.
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// The write-path store backing audit sessions
    pub fn store(&self) -> PgStore {
        PgStore::new(self.pool.clone())
    }

    /// A fresh unit of work with audit side effects
    pub fn session(&self) -> AuditSession<PgStore> {
        AuditSession::new(self.store())
    }

    /// Create all repositories sharing a single transaction.
    ///
    /// Dropping the returned value without committing rolls the transaction
    /// back.
    pub async fn create_repositories(&self) -> ApiResult<Repositories> {
        let tx = self.pool.begin().await.map_err(db_err)?;
        let executor = Executor::new(tx);

        Ok(Repositories {
            customer_repository: Arc::new(CustomerRepositoryImpl::new(executor.clone())),
            contact_repository: Arc::new(ContactRepositoryImpl::new(executor.clone())),
            customer_contact_repository: Arc::new(CustomerContactRepositoryImpl::new(
                executor.clone(),
            )),
            audit_repository: Arc::new(AuditRepositoryImpl::new(executor.clone())),
            executor,
        })
    }
}

/// Container for all repositories of one unit of work
pub struct Repositories {
    pub executor: Executor,
    pub customer_repository: Arc<CustomerRepositoryImpl>,
    pub contact_repository: Arc<ContactRepositoryImpl>,
    pub customer_contact_repository: Arc<CustomerContactRepositoryImpl>,
    pub audit_repository: Arc<AuditRepositoryImpl>,
}

impl Repositories {
    /// Commit the shared transaction
    pub async fn commit(&self) -> ApiResult<()> {
        self.executor.commit().await
    }

    /// Roll back the shared transaction
    pub async fn rollback(&self) -> ApiResult<()> {
        self.executor.rollback().await
    }
}
