//! # Farm Infrastructure
//! 
//! Storage implementations (adapters) of the farmer repository port.

pub mod database;

pub use database::{create_pool, run_migrations, MemoryFarmerRepository, PgFarmerRepository};
