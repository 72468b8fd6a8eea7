//! PostgreSQL repository implementations

pub mod farmer_repo_impl;

pub use farmer_repo_impl::PgFarmerRepository;
