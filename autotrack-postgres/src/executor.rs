use autotrack_api::{ApiError, ApiResult};
use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::utils::db_err;

/// Shared handle to one database transaction.
///
/// Every repository built for a unit of work clones the same executor, so
/// all their statements run on one transaction and commit or roll back
/// together. The slot is emptied by commit/rollback; statements issued after
/// that report the transaction as consumed.
#[derive(Clone)]
pub struct Executor {
    pub tx: Arc<Mutex<Option<Transaction<'static, Postgres>>>>,
}

impl Executor {
    pub fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Commit the transaction, consuming the slot
    pub async fn commit(&self) -> ApiResult<()> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(|| ApiError::Internal("Transaction has been consumed".to_owned()))?;
        tx.commit().await.map_err(db_err)
    }

    /// Roll back the transaction, consuming the slot
    pub async fn rollback(&self) -> ApiResult<()> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(|| ApiError::Internal("Transaction has been consumed".to_owned()))?;
        tx.rollback().await.map_err(db_err)
    }
}
