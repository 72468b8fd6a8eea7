//! Farmer repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::{Farmer, FarmerFilter, FarmerPatch, NewFarmer};
use crate::error::DomainError;

/// Persistence for farmer records.
///
/// Implementations assign `id`, `created_at` and `updated_at`, and must
/// enforce CPF uniqueness themselves: `insert` reports a clash as
/// [`DomainError::ConstraintViolation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FarmerRepository: Send + Sync {
    async fn insert(&self, farmer: &NewFarmer) -> Result<Farmer, DomainError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Farmer>, DomainError>;
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Farmer>, DomainError>;
    /// Matching records ordered by full name, ascending.
    async fn find_many(&self, filter: &FarmerFilter) -> Result<Vec<Farmer>, DomainError>;
    /// Returns `None` when no record has `id`.
    async fn update_by_id(&self, id: &Uuid, patch: &FarmerPatch) -> Result<Option<Farmer>, DomainError>;
    /// Number of records removed, 0 or 1.
    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
