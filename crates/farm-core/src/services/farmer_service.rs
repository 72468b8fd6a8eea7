// ============================================================================
// Farm Core - Farmer Service
// File: crates/farm-core/src/services/farmer_service.rs
// ============================================================================
//! Farmer lifecycle: create, update, deactivate, delete, list and search.
//!
//! A record starts active (unless created inactive), may be deactivated any
//! number of times, is never reactivated, and may only be deleted once
//! inactive.

use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use farm_shared::utils::mask_cpf;

use crate::domain::{CreateFarmer, Farmer, FarmerFilter, FarmerPatch, FarmerUpdate, NewFarmer};
use crate::error::DomainError;
use crate::repositories::FarmerRepository;

pub const ACTIVE_DELETE_MESSAGE: &str = "Cannot delete an active farmer. Please deactivate first.";

/// Record-management rules layered over a [`FarmerRepository`]
pub struct FarmerService<R: FarmerRepository + ?Sized> {
    farmer_repo: Arc<R>,
}

impl<R: FarmerRepository + ?Sized> FarmerService<R> {
    pub fn new(farmer_repo: Arc<R>) -> Self {
        Self { farmer_repo }
    }

    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Register a new farmer
    pub async fn create(&self, request: CreateFarmer) -> Result<Farmer, DomainError> {
        let new_farmer = NewFarmer::from_request(request, self.today()).map_err(|e| {
            warn!("Create refused: {}", e);
            e
        })?;
        let masked = mask_cpf(new_farmer.cpf.as_str());

        // Fast path; the store's unique constraint is authoritative
        if self.farmer_repo.find_by_cpf(new_farmer.cpf.as_str()).await?.is_some() {
            warn!("Create refused: CPF already registered: {}", masked);
            return Err(DomainError::CpfAlreadyExists(new_farmer.cpf.formatted()));
        }

        match self.farmer_repo.insert(&new_farmer).await {
            Ok(farmer) => {
                info!("Farmer created: {} (cpf {})", farmer.id, masked);
                Ok(farmer)
            }
            Err(DomainError::ConstraintViolation(detail)) => {
                warn!("Create lost uniqueness race for CPF {}: {}", masked, detail);
                Err(DomainError::CpfAlreadyExists(new_farmer.cpf.formatted()))
            }
            Err(e) => Err(e),
        }
    }

    /// Active farmers, or all of them when `include_inactive` is set
    pub async fn list(&self, include_inactive: bool) -> Result<Vec<Farmer>, DomainError> {
        self.farmer_repo
            .find_many(&FarmerFilter::listing(include_inactive))
            .await
    }

    pub async fn search(&self, filter: &FarmerFilter) -> Result<Vec<Farmer>, DomainError> {
        self.farmer_repo.find_many(filter).await
    }

    pub async fn get(&self, id: &Uuid) -> Result<Farmer, DomainError> {
        self.farmer_repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::FarmerNotFound(*id))
    }

    /// Apply the supplied fields. With nothing to change, returns the stored record untouched.
    pub async fn update(&self, id: &Uuid, update: FarmerUpdate) -> Result<Farmer, DomainError> {
        if update.is_empty() {
            return self.get(id).await;
        }

        let patch = update.into_patch(self.today())?;
        let farmer = self
            .farmer_repo
            .update_by_id(id, &patch)
            .await?
            .ok_or_else(|| {
                warn!("Update refused: farmer not found: {}", id);
                DomainError::FarmerNotFound(*id)
            })?;

        info!("Farmer updated: {}", id);
        Ok(farmer)
    }

    /// Idempotent: an inactive farmer is returned as stored, without a write.
    pub async fn deactivate(&self, id: &Uuid) -> Result<Farmer, DomainError> {
        let farmer = self.get(id).await.map_err(|e| {
            warn!("Deactivate refused: {}", e);
            e
        })?;
        if !farmer.active {
            return Ok(farmer);
        }

        let farmer = self
            .farmer_repo
            .update_by_id(id, &FarmerPatch::deactivate())
            .await?
            .ok_or(DomainError::FarmerNotFound(*id))?;

        info!("Farmer deactivated: {}", id);
        Ok(farmer)
    }

    /// Permanently remove an inactive farmer
    pub async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let farmer = self.get(id).await.map_err(|e| {
            warn!("Delete refused: {}", e);
            e
        })?;

        if !farmer.can_be_deleted() {
            warn!("Delete refused: farmer {} is still active", id);
            return Err(DomainError::InvalidState(ACTIVE_DELETE_MESSAGE.to_string()));
        }

        // Zero rows means a concurrent delete won
        if self.farmer_repo.delete_by_id(id).await? == 0 {
            warn!("Delete removed nothing for farmer {}", id);
            return Err(DomainError::DeleteFailed(*id));
        }

        info!("Farmer deleted: {}", id);
        Ok(())
    }

    /// Storage round-trip for readiness probes
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.farmer_repo.ping().await
    }
}
