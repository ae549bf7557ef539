use async_trait::async_trait;
use autotrack_api::ApiResult;
use autotrack_db::models::customer_contact::CustomerContactModel;
use autotrack_db::repository::{FindById, LoadAll};
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row};
use uuid::Uuid;

use crate::executor::Executor;
use crate::utils::{db_err, get_optional_heapless_string, TryFromRow};

pub struct CustomerContactRepositoryImpl {
    pub(crate) executor: Executor,
}

impl CustomerContactRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Link rows attached to one customer
    pub async fn find_by_customer_id(
        &self,
        customer_id: Uuid,
    ) -> ApiResult<Vec<CustomerContactModel>> {
        super::find_by_customer_id::find_by_customer_id_impl(&self.executor, customer_id).await
    }

    /// Link rows attached to one contact
    pub async fn find_by_contact_id(
        &self,
        contact_id: Uuid,
    ) -> ApiResult<Vec<CustomerContactModel>> {
        super::find_by_contact_id::find_by_contact_id_impl(&self.executor, contact_id).await
    }
}

impl TryFromRow<PgRow> for CustomerContactModel {
    fn try_from_row(row: &PgRow) -> ApiResult<Self> {
        Ok(CustomerContactModel {
            id: row.try_get("id").map_err(db_err)?,
            customer_id: row.try_get("customer_id").map_err(db_err)?,
            contact_id: row.try_get("contact_id").map_err(db_err)?,
            created_date: row.try_get("created_date").map_err(db_err)?,
            modified_date: row.try_get("modified_date").map_err(db_err)?,
            last_modified_by: get_optional_heapless_string(row, "last_modified_by")?,
            is_inactive: row.try_get("is_inactive").map_err(db_err)?,
        })
    }
}

#[async_trait]
impl FindById<Postgres, CustomerContactModel> for CustomerContactRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<CustomerContactModel>> {
        super::find_by_id::find_by_id_impl(&self.executor, id).await
    }
}

#[async_trait]
impl LoadAll<Postgres, CustomerContactModel> for CustomerContactRepositoryImpl {
    async fn load_all(&self) -> ApiResult<Vec<CustomerContactModel>> {
        super::load_all::load_all_impl(&self.executor).await
    }
}
