use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::customer_contact::CustomerContactModel;

use crate::executor::Executor;
use crate::utils::db_err;

pub(crate) async fn create_impl(
    executor: &Executor,
    item: &CustomerContactModel,
) -> ApiResult<()> {
    let query = sqlx::query(
        r#"
        INSERT INTO customer_contacts (id, customer_id, contact_id, created_date, modified_date, last_modified_by, is_inactive)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(item.id)
    .bind(item.customer_id)
    .bind(item.contact_id)
    .bind(item.created_date)
    .bind(item.modified_date)
    .bind(item.last_modified_by.as_deref())
    .bind(item.is_inactive);

    let mut tx = executor.tx.lock().await;
    if let Some(transaction) = tx.as_mut() {
        query.execute(&mut **transaction).await.map_err(db_err)?;
    } else {
        return Err(ApiError::Internal(
            "Transaction has been consumed".to_owned(),
        ));
    }

    Ok(())
}
