//! Domain services (business logic)

pub mod farmer_service;

pub use farmer_service::FarmerService;
