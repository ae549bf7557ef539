pub mod audit;
pub mod auditable;
pub mod contact;
pub mod customer;
pub mod customer_contact;
pub mod entity;
pub mod fields;
pub mod identifiable;
pub mod relation;

// Re-exports
pub use audit::*;
pub use auditable::*;
pub use contact::*;
pub use customer::*;
pub use customer_contact::*;
pub use entity::*;
pub use fields::*;
pub use identifiable::*;
pub use relation::*;
