//! # Farm Core - Domain Module
//! 
//! Domain entities for the farmer registry.

pub mod cpf;
pub mod farmer;
pub mod filter;

pub use cpf::Cpf;
pub use farmer::{CreateFarmer, Farmer, FarmerPatch, FarmerStatus, FarmerUpdate, NewFarmer};
pub use filter::{FarmerFilter, SearchTerm, StatusFilter};
