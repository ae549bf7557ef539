pub mod exists_by_id;
pub mod find_audits;
pub mod find_by_id;
pub mod load_all;

// Re-exports
pub use exists_by_id::*;
pub use find_audits::*;
pub use find_by_id::*;
pub use load_all::*;
