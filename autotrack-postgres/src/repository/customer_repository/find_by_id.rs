use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::customer::CustomerModel;
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{db_err, TryFromRow};

pub(crate) async fn find_by_id_impl(
    executor: &Executor,
    id: Uuid,
) -> ApiResult<Option<CustomerModel>> {
    let query = sqlx::query(
        r#"
        SELECT id, account_number, name, created_date, modified_date, last_modified_by, is_inactive
        FROM customers
        WHERE id = $1
        "#,
    )
    .bind(id);

    let mut tx = executor.tx.lock().await;
    let row = if let Some(transaction) = tx.as_mut() {
        query
            .fetch_optional(&mut **transaction)
            .await
            .map_err(db_err)?
    } else {
        return Err(ApiError::Internal(
            "Transaction has been consumed".to_owned(),
        ));
    };

    row.map(|row| CustomerModel::try_from_row(&row)).transpose()
}
