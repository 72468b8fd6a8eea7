//! # Farm API
//! 
//! HTTP handlers, request DTOs, response envelopes, and routing.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
