//! Database module (PostgreSQL and in-process adapters)

pub mod connection;
pub mod memory;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use memory::MemoryFarmerRepository;
pub use postgres::PgFarmerRepository;
