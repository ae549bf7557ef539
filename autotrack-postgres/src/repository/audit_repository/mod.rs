pub mod create_batch;
pub mod find_by_entity_id;
pub mod repo_impl;

pub use repo_impl::AuditRepositoryImpl;
