//! In-process farmer store.
//!
//! Holds every record behind one lock so the CPF uniqueness check and the
//! insert happen atomically, like the unique index in PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use farm_core::domain::{Farmer, FarmerFilter, FarmerPatch, NewFarmer};
use farm_core::error::DomainError;
use farm_core::repositories::FarmerRepository;

const CPF_CONSTRAINT: &str = "farmers_cpf_key";

#[derive(Default)]
pub struct MemoryFarmerRepository {
    farmers: RwLock<HashMap<Uuid, Farmer>>,
}

impl MemoryFarmerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.farmers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.farmers.read().is_empty()
    }
}

#[async_trait]
impl FarmerRepository for MemoryFarmerRepository {
    async fn insert(&self, farmer: &NewFarmer) -> Result<Farmer, DomainError> {
        let mut farmers = self.farmers.write();
        if farmers.values().any(|f| f.cpf == farmer.cpf.as_str()) {
            return Err(DomainError::ConstraintViolation(CPF_CONSTRAINT.to_string()));
        }

        let now = Utc::now();
        let stored = Farmer {
            id: Uuid::new_v4(),
            full_name: farmer.full_name.clone(),
            cpf: farmer.cpf.as_str().to_string(),
            birth_date: farmer.birth_date,
            phone: farmer.phone.clone(),
            active: farmer.active,
            created_at: now,
            updated_at: now,
        };
        farmers.insert(stored.id, stored.clone());
        debug!("Memory store holds {} farmers", farmers.len());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Farmer>, DomainError> {
        Ok(self.farmers.read().get(id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Farmer>, DomainError> {
        Ok(self.farmers.read().values().find(|f| f.cpf == cpf).cloned())
    }

    async fn find_many(&self, filter: &FarmerFilter) -> Result<Vec<Farmer>, DomainError> {
        let mut matched: Vec<Farmer> = self
            .farmers
            .read()
            .values()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        // Case-folded; accented letters still sort after ASCII, unlike a locale collation
        matched.sort_by_cached_key(|f| (f.full_name.to_lowercase(), f.id));
        Ok(matched)
    }

    async fn update_by_id(&self, id: &Uuid, patch: &FarmerPatch) -> Result<Option<Farmer>, DomainError> {
        let mut farmers = self.farmers.write();
        Ok(farmers.get_mut(id).map(|farmer| {
            patch.apply_to(farmer);
            farmer.updated_at = Utc::now();
            farmer.clone()
        }))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, DomainError> {
        Ok(u64::from(self.farmers.write().remove(id).is_some()))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_core::domain::{Cpf, StatusFilter};

    fn new_farmer(name: &str, cpf: &str) -> NewFarmer {
        NewFarmer {
            full_name: name.to_string(),
            cpf: Cpf::parse(cpf).unwrap(),
            birth_date: None,
            phone: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_enforces_unique_cpf() {
        let repo = MemoryFarmerRepository::new();
        repo.insert(&new_farmer("Ana", "11144477735")).await.unwrap();
        let result = repo.insert(&new_farmer("Bia", "111.444.777-35")).await;
        assert!(matches!(result, Err(DomainError::ConstraintViolation(_))));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_many_orders_by_name() {
        let repo = MemoryFarmerRepository::new();
        repo.insert(&new_farmer("Carlos", "52998224725")).await.unwrap();
        repo.insert(&new_farmer("Ana", "11144477735")).await.unwrap();
        repo.insert(&new_farmer("Bruno", "93541134780")).await.unwrap();

        let names: Vec<String> = repo
            .find_many(&FarmerFilter::new(None, StatusFilter::Any))
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.full_name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carlos"]);
    }

    #[tokio::test]
    async fn test_find_many_ignores_case_when_ordering() {
        let repo = MemoryFarmerRepository::new();
        repo.insert(&new_farmer("bruno", "52998224725")).await.unwrap();
        repo.insert(&new_farmer("Carla", "11144477735")).await.unwrap();
        repo.insert(&new_farmer("ana", "93541134780")).await.unwrap();

        let names: Vec<String> = repo
            .find_many(&FarmerFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.full_name)
            .collect();
        assert_eq!(names, vec!["ana", "bruno", "Carla"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = MemoryFarmerRepository::new();
        let id = Uuid::new_v4();
        assert!(repo.update_by_id(&id, &FarmerPatch::deactivate()).await.unwrap().is_none());
        assert_eq!(repo.delete_by_id(&id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_bumps_updated_at_only() {
        let repo = MemoryFarmerRepository::new();
        let created = repo.insert(&new_farmer("Ana", "11144477735")).await.unwrap();
        let updated = repo
            .update_by_id(&created.id, &FarmerPatch::deactivate())
            .await
            .unwrap()
            .unwrap();
        assert!(!updated.active);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.cpf, created.cpf);
    }
}
