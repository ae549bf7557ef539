pub mod create;
pub mod delete;
pub mod find_by_contact_id;
pub mod find_by_customer_id;
pub mod find_by_id;
pub mod load_all;
pub mod repo_impl;
pub mod update;

pub use repo_impl::CustomerContactRepositoryImpl;
