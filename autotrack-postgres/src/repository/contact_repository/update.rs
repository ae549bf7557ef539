use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::contact::ContactModel;
use chrono::{DateTime, Utc};

use crate::executor::Executor;
use crate::utils::db_err;

/// Guarded update; created_date is deliberately absent from the SET list.
pub(crate) async fn update_impl(
    executor: &Executor,
    item: &ContactModel,
    expected_modified: Option<DateTime<Utc>>,
) -> ApiResult<()> {
    let query = sqlx::query(
        r#"
        UPDATE contacts
        SET name = $2, title = $3, phone = $4, email = $5, contact_type = $6, note = $7,
            modified_date = $8, last_modified_by = $9, is_inactive = $10
        WHERE id = $1 AND modified_date IS NOT DISTINCT FROM $11
        "#,
    )
    .bind(item.id)
    .bind(item.name.as_str())
    .bind(item.title.as_deref())
    .bind(item.phone.as_deref())
    .bind(item.email.as_deref())
    .bind(item.contact_type)
    .bind(item.note.as_deref())
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
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM contacts WHERE id = $1)")
                .bind(item.id)
                .fetch_one(&mut **transaction)
                .await
                .map_err(db_err)?;
        return Err(if exists.0 {
            ApiError::conflict("Contact", item.id)
        } else {
            ApiError::not_found("Contact", item.id)
        });
    }

    Ok(())
}
