//! # Farm Shared
//! 
//! Configuration, telemetry, and small utilities shared by the farmer registry crates.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
