use autotrack_api::{ApiError, ApiResult};
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::db_err;

pub(crate) async fn exists_by_id_impl(executor: &Executor, id: Uuid) -> ApiResult<bool> {
    let query = sqlx::query_as::<_, (bool,)>(
        "SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)",
    )
    .bind(id);

    let mut tx = executor.tx.lock().await;
    let exists = if let Some(transaction) = tx.as_mut() {
        query.fetch_one(&mut **transaction).await.map_err(db_err)?
    } else {
        return Err(ApiError::Internal(
            "Transaction has been consumed".to_owned(),
        ));
    };

    Ok(exists.0)
}
