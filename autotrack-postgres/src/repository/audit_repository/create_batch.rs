use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::audit::AuditModel;

use crate::executor::Executor;
use crate::utils::db_err;

/// Append-only insert of one save's audit rows. Rows are never updated or
/// deleted once written.
pub(crate) async fn create_batch_impl(
    executor: &Executor,
    items: &[AuditModel],
) -> ApiResult<()> {
    if items.is_empty() {
        return Ok(());
    }

    let mut tx = executor.tx.lock().await;
    let transaction = tx.as_mut().ok_or_else(|| {
        ApiError::Internal("Transaction has been consumed".to_owned())
    })?;

    for item in items {
        sqlx::query(
            r#"
            INSERT INTO audits (id, entity_id, changed_by, entity, changed_at, column_name, old_value, new_value, change_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(item.id)
        .bind(item.entity_id)
        .bind(item.changed_by.as_str())
        .bind(item.entity.as_str())
        .bind(item.changed_at)
        .bind(item.column_name.as_str())
        .bind(item.old_value.as_str())
        .bind(item.new_value.as_str())
        .bind(item.change_type)
        .execute(&mut **transaction)
        .await
        .map_err(db_err)?;
    }

    Ok(())
}
