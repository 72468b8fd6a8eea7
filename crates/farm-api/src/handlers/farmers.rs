// ============================================================================
// Farm API - Farmer Handlers
// File: crates/farm-api/src/handlers/farmers.rs
// ============================================================================
//! Farmer registry HTTP handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, info};
use uuid::Uuid;

use farm_core::domain::{CreateFarmer, Farmer, FarmerFilter};
use farm_shared::parse_id;

use crate::dto::{ListQuery, SearchQuery, UpdateFarmerRequest};
use crate::error::{ApiError, FARMER_NOT_FOUND};
use crate::response::MessageResponse;
use crate::state::AppState;

pub const DELETED_MESSAGE: &str = "Farmer deleted successfully";
pub const DEACTIVATED_MESSAGE: &str = "Farmer deactivated successfully";

/// A path segment that is not a UUID cannot name a farmer.
fn farmer_id(raw: &str) -> Result<Uuid, ApiError> {
    parse_id(raw).ok_or_else(|| ApiError::NotFound(FARMER_NOT_FOUND.to_string()))
}

/// Create handler - POST /farmers
pub async fn create_farmer(
    State(state): State<AppState>,
    payload: Result<Json<CreateFarmer>, JsonRejection>,
) -> Result<(StatusCode, Json<Farmer>), ApiError> {
    let Json(request) = payload?;
    let farmer = state.farmer_service.create(request).await?;
    Ok((StatusCode::CREATED, Json(farmer)))
}

/// List handler - GET /farmers?includeInactive=true
pub async fn list_farmers(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Farmer>>, ApiError> {
    let Query(query) = query?;
    let farmers = state.farmer_service.list(query.include_inactive()).await?;
    debug!("Listed {} farmers", farmers.len());
    Ok(Json(farmers))
}

/// Search handler - GET /farmers/search?q=...&status=active|inactive
pub async fn search_farmers(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Farmer>>, ApiError> {
    let Query(query) = query?;
    let filter = FarmerFilter::from(&query);
    let farmers = state.farmer_service.search(&filter).await?;
    debug!("Search matched {} farmers", farmers.len());
    Ok(Json(farmers))
}

/// Get handler - GET /farmers/{id}
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Farmer>, ApiError> {
    let id = farmer_id(&id)?;
    Ok(Json(state.farmer_service.get(&id).await?))
}

/// Update handler - PUT /farmers/{id}
pub async fn update_farmer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateFarmerRequest>, JsonRejection>,
) -> Result<Json<Farmer>, ApiError> {
    let id = farmer_id(&id)?;
    let Json(request) = payload?;
    let farmer = state.farmer_service.update(&id, request.into()).await?;
    Ok(Json(farmer))
}

/// Delete handler - DELETE /farmers/{id}
pub async fn delete_farmer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse<()>>, ApiError> {
    let id = farmer_id(&id)?;
    state.farmer_service.delete(&id).await?;
    info!("Delete request completed for {}", id);
    Ok(Json(MessageResponse::message(DELETED_MESSAGE)))
}

/// Deactivate handler - POST /farmers/{id}/deactivate
pub async fn deactivate_farmer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse<Farmer>>, ApiError> {
    let id = farmer_id(&id)?;
    let farmer = state.farmer_service.deactivate(&id).await?;
    Ok(Json(MessageResponse::with_data(DEACTIVATED_MESSAGE, farmer)))
}
