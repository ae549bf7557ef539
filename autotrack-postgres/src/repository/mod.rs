pub mod audit_repository;
pub mod contact_repository;
pub mod customer_contact_repository;
pub mod customer_repository;
pub mod db_init;

// Re-exports
pub use audit_repository::AuditRepositoryImpl;
pub use contact_repository::ContactRepositoryImpl;
pub use customer_contact_repository::CustomerContactRepositoryImpl;
pub use customer_repository::CustomerRepositoryImpl;
