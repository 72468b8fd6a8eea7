//! Repository traits (ports)

pub mod farmer_repository;

pub use farmer_repository::FarmerRepository;
#[cfg(test)]
pub use farmer_repository::MockFarmerRepository;
