use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::contact::ContactModel;

use crate::executor::Executor;
use crate::utils::db_err;

pub(crate) async fn create_impl(executor: &Executor, item: &ContactModel) -> ApiResult<()> {
    let query = sqlx::query(
        r#"
        INSERT INTO contacts (id, name, title, phone, email, contact_type, note, created_date, modified_date, last_modified_by, is_inactive)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(item.id)
    .bind(item.name.as_str())
    .bind(item.title.as_deref())
    .bind(item.phone.as_deref())
    .bind(item.email.as_deref())
    .bind(item.contact_type)
    .bind(item.note.as_deref())
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
