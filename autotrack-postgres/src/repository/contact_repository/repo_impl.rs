use async_trait::async_trait;
use autotrack_api::ApiResult;
use autotrack_db::models::contact::ContactModel;
use autotrack_db::repository::{ExistsById, FindById, LoadAll};
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{db_err, get_heapless_string, get_optional_heapless_string, TryFromRow};

pub struct ContactRepositoryImpl {
    pub(crate) executor: Executor,
}

impl ContactRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

impl TryFromRow<PgRow> for ContactModel {
    fn try_from_row(row: &PgRow) -> ApiResult<Self> {
        Ok(ContactModel {
            id: row.try_get("id").map_err(db_err)?,
            name: get_heapless_string(row, "name")?,
            title: get_optional_heapless_string(row, "title")?,
            phone: get_optional_heapless_string(row, "phone")?,
            email: get_optional_heapless_string(row, "email")?,
            contact_type: row.try_get("contact_type").map_err(db_err)?,
            note: row.try_get("note").map_err(db_err)?,
            created_date: row.try_get("created_date").map_err(db_err)?,
            modified_date: row.try_get("modified_date").map_err(db_err)?,
            last_modified_by: get_optional_heapless_string(row, "last_modified_by")?,
            is_inactive: row.try_get("is_inactive").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl FindById<Postgres, ContactModel> for ContactRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<ContactModel>> {
        super::find_by_id::find_by_id_impl(&self.executor, id).await
    }
}

#[async_trait]
impl LoadAll<Postgres, ContactModel> for ContactRepositoryImpl {
    async fn load_all(&self) -> ApiResult<Vec<ContactModel>> {
        super::load_all::load_all_impl(&self.executor).await
    }
}

#[async_trait]
impl ExistsById<Postgres> for ContactRepositoryImpl {
    async fn exists_by_id(&self, id: Uuid) -> ApiResult<bool> {
        super::exists_by_id::exists_by_id_impl(&self.executor, id).await
    }
}
