use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::customer::CustomerModel;
use chrono::{DateTime, Utc};

use crate::executor::Executor;
use crate::utils::db_err;

/// Guarded update: matches only when the stored modified_date still equals
/// the token the caller read. created_date is deliberately absent from the
/// SET list.
pub(crate) async fn update_impl(
    executor: &Executor,
    item: &CustomerModel,
    expected_modified: Option<DateTime<Utc>>,
) -> ApiResult<()> {
    let query = sqlx::query(
        r#"
        UPDATE customers
        SET account_number = $2, name = $3, modified_date = $4, last_modified_by = $5, is_inactive = $6
        WHERE id = $1 AND modified_date IS NOT DISTINCT FROM $7
        "#,
    )
    .bind(item.id)
    .bind(item.account_number.as_deref())
    .bind(item.name.as_str())
    .bind(item.modified_date)
    .bind(item.last_modified_by.as_deref())
    .bind(item.is_inactive)
    .bind(expected_modified);

    let mut tx = executor.tx.lock().await;
    let transaction = tx.as_mut().ok_or_else(|| {
        ApiError::Internal("Transaction has been consumed".to_owned())
    })?;
    let result = query.execute(&mut **transaction).await.map_err(db_err)?;

    if result.rows_affected() == 0 {
        // A surviving row means another writer won the race
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)")
                .bind(item.id)
                .fetch_one(&mut **transaction)
                .await
                .map_err(db_err)?;
        return Err(if exists.0 {
            ApiError::conflict("Customer", item.id)
        } else {
            ApiError::not_found("Customer", item.id)
        });
    }

    Ok(())
}
