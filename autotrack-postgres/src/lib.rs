pub mod executor;
pub mod postgres_repositories;
pub mod repository;
pub mod store;
pub mod utils;

pub use executor::Executor;
pub use postgres_repositories::{PostgresRepositories, Repositories};
pub use store::PgStore;

#[cfg(test)]
pub mod test_helper;
