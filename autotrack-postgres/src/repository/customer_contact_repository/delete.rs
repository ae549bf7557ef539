use autotrack_api::{ApiError, ApiResult};
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::db_err;

pub(crate) async fn delete_impl(executor: &Executor, id: Uuid) -> ApiResult<()> {
    let query = sqlx::query("DELETE FROM customer_contacts WHERE id = $1").bind(id);

    let mut tx = executor.tx.lock().await;
    let transaction = tx.as_mut().ok_or_else(|| {
        ApiError::Internal("Transaction has been consumed".to_owned())
    })?;
    let result = query.execute(&mut **transaction).await.map_err(db_err)?;

    if result.rows_affected() == 0 {
        return Err(ApiError::not_found("CustomerContact", id));
    }

    Ok(())
}
