use autotrack_api::{ApiError, ApiResult};
use autotrack_db::models::contact::ContactModel;

use crate::executor::Executor;
use crate::utils::{db_err, TryFromRow};

pub(crate) async fn load_all_impl(executor: &Executor) -> ApiResult<Vec<ContactModel>> {
    let query = sqlx::query(
        r#"
        SELECT id, name, title, phone, email, contact_type, note, created_date, modified_date, last_modified_by, is_inactive
        FROM contacts
        "#,
    );

    let mut tx = executor.tx.lock().await;
    let rows = if let Some(transaction) = tx.as_mut() {
        query.fetch_all(&mut **transaction).await.map_err(db_err)?
    } else {
        return Err(ApiError::Internal(
            "Transaction has been consumed".to_owned(),
        ));
    };

    rows.iter().map(ContactModel::try_from_row).collect()
}
