use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::audit::AuditModel;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::db_err;

pub(crate) async fn find_by_entity_id_impl(
    executor: &Executor,
    entity_id: Uuid,
) -> ApiResult<Vec<AuditModel>> {
    let query = sqlx::query_as::<_, AuditModel>(
        r#"
        SELECT id, entity_id, changed_by, entity, changed_at, column_name, old_value, new_value, change_type
        FROM audits
        WHERE entity_id = $1
        ORDER BY changed_at, column_name
        "#,
    )
    .bind(entity_id);

    let mut tx = executor.tx.lock().await;
    let rows = if let Some(transaction) = tx.as_mut() {
        query.fetch_all(&mut **transaction).await.map_err(db_err)?
    } else {
        return Err(ApiError::Internal(
            "Transaction has been consumed".to_owned(),
        ));
    };

    Ok(rows)
}
