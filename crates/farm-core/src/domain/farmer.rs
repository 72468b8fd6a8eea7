// ============================================================================
// Farm Core - Farmer Entity
// File: crates/farm-core/src/domain/farmer.rs
// Description: Farmer record and the payloads that create or change it
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::cpf::Cpf;
use crate::error::DomainError;

/// Farmer record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    pub id: Uuid,
    pub full_name: String,
    /// Eleven bare digits, unique and immutable.
    pub cpf: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Farmer {
    /// Only deactivated farmers may be removed.
    pub fn can_be_deleted(&self) -> bool {
        !self.active
    }

    pub fn status(&self) -> FarmerStatus {
        if self.active {
            FarmerStatus::Active
        } else {
            FarmerStatus::Inactive
        }
    }
}

/// Lifecycle state of a farmer record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FarmerStatus {
    Active,
    Inactive,
}

impl FarmerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FarmerStatus::Active => "active",
            FarmerStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(FarmerStatus::Active),
            "inactive" => Some(FarmerStatus::Inactive),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, FarmerStatus::Active)
    }
}

/// Create payload, before validation
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFarmer {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,

    pub cpf: String,

    pub birth_date: Option<NaiveDate>,

    pub phone: Option<String>,

    pub active: Option<bool>,
}

/// Validated record ready to insert. Id and timestamps come from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFarmer {
    pub full_name: String,
    pub cpf: Cpf,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub active: bool,
}

impl NewFarmer {
    /// Trims, validates, and defaults `active` to `true`.
    pub fn from_request(request: CreateFarmer, today: NaiveDate) -> Result<Self, DomainError> {
        let request = CreateFarmer {
            full_name: request.full_name.trim().to_string(),
            phone: normalize_phone(request.phone),
            ..request
        };
        request.validate()?;

        let cpf = Cpf::parse(&request.cpf)?;
        check_birth_date(request.birth_date, today)?;

        Ok(Self {
            full_name: request.full_name,
            cpf,
            birth_date: request.birth_date,
            phone: request.phone,
            active: request.active.unwrap_or(true),
        })
    }
}

/// Update payload. `cpf` and `active` are accepted on the wire and dropped.
///
/// `birth_date` and `phone` distinguish "absent" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FarmerUpdate {
    pub full_name: Option<String>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub phone: Option<Option<String>>,
}

impl FarmerUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.birth_date.is_none() && self.phone.is_none()
    }

    /// Trims and validates the supplied fields into a store patch.
    pub fn into_patch(self, today: NaiveDate) -> Result<FarmerPatch, DomainError> {
        let full_name = match self.full_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(DomainError::ValidationError(
                        "full_name: Full name is required".to_string(),
                    ));
                }
                Some(name)
            }
            None => None,
        };

        if let Some(birth_date) = self.birth_date {
            check_birth_date(birth_date, today)?;
        }

        Ok(FarmerPatch {
            full_name,
            birth_date: self.birth_date,
            phone: self.phone.map(normalize_phone),
            active: None,
        })
    }
}

/// Field-level changes handed to the store. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FarmerPatch {
    pub full_name: Option<String>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub phone: Option<Option<String>>,
    pub active: Option<bool>,
}

impl FarmerPatch {
    pub fn deactivate() -> Self {
        Self {
            active: Some(false),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.birth_date.is_none()
            && self.phone.is_none()
            && self.active.is_none()
    }

    /// Applies the patch in place. Used by stores that hold records in memory.
    pub fn apply_to(&self, farmer: &mut Farmer) {
        if let Some(name) = &self.full_name {
            farmer.full_name = name.clone();
        }
        if let Some(birth_date) = self.birth_date {
            farmer.birth_date = birth_date;
        }
        if let Some(phone) = &self.phone {
            farmer.phone = phone.clone();
        }
        if let Some(active) = self.active {
            farmer.active = active;
        }
    }
}

fn normalize_phone(phone: Option<String>) -> Option<String> {
    phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

fn check_birth_date(birth_date: Option<NaiveDate>, today: NaiveDate) -> Result<(), DomainError> {
    match birth_date {
        Some(date) if date > today => Err(DomainError::ValidationError(format!(
            "birth_date: {} is in the future",
            date
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn request(cpf: &str) -> CreateFarmer {
        CreateFarmer {
            full_name: "  Maria da Silva ".to_string(),
            cpf: cpf.to_string(),
            ..CreateFarmer::default()
        }
    }

    #[test]
    fn test_create_defaults_active_and_cleans() {
        let farmer = NewFarmer::from_request(request("111.444.777-35"), today()).unwrap();
        assert_eq!(farmer.full_name, "Maria da Silva");
        assert_eq!(farmer.cpf.as_str(), "11144477735");
        assert!(farmer.active);
        assert!(farmer.phone.is_none());
    }

    #[test]
    fn test_create_respects_explicit_inactive() {
        let mut req = request("11144477735");
        req.active = Some(false);
        let farmer = NewFarmer::from_request(req, today()).unwrap();
        assert!(!farmer.active);
    }

    #[test]
    fn test_create_rejects_blacklisted_cpf() {
        let result = NewFarmer::from_request(request("00000000000"), today());
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut req = request("11144477735");
        req.full_name = "   ".to_string();
        let result = NewFarmer::from_request(req, today());
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_create_rejects_future_birth_date() {
        let mut req = request("11144477735");
        req.birth_date = NaiveDate::from_ymd_opt(2024, 6, 2);
        assert!(NewFarmer::from_request(req.clone(), today()).is_err());

        req.birth_date = Some(today());
        assert!(NewFarmer::from_request(req, today()).is_ok());
    }

    #[test]
    fn test_blank_phone_becomes_absent() {
        let mut req = request("11144477735");
        req.phone = Some("  ".to_string());
        let farmer = NewFarmer::from_request(req, today()).unwrap();
        assert!(farmer.phone.is_none());
    }

    #[test]
    fn test_create_accepts_long_name_and_phone() {
        let mut req = request("11144477735");
        req.full_name = "Maria ".repeat(60);
        req.phone = Some("9".repeat(80));
        let farmer = NewFarmer::from_request(req, today()).unwrap();
        assert_eq!(farmer.full_name.len(), 359);
        assert_eq!(farmer.phone.as_deref().map(str::len), Some(80));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(FarmerStatus::parse("active"), Some(FarmerStatus::Active));
        assert_eq!(FarmerStatus::parse("inactive"), Some(FarmerStatus::Inactive));
        assert_eq!(FarmerStatus::parse("Active"), None);
        assert_eq!(FarmerStatus::parse(FarmerStatus::Inactive.as_str()), Some(FarmerStatus::Inactive));
    }

    #[test]
    fn test_update_into_patch() {
        let update = FarmerUpdate {
            full_name: Some(" João ".to_string()),
            phone: Some(None),
            ..FarmerUpdate::default()
        };
        let patch = update.into_patch(today()).unwrap();
        assert_eq!(patch.full_name.as_deref(), Some("João"));
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.birth_date, None);
        assert_eq!(patch.active, None);
    }

    #[test]
    fn test_update_rejects_blank_name_and_future_date() {
        let blank = FarmerUpdate {
            full_name: Some(" ".to_string()),
            ..FarmerUpdate::default()
        };
        assert!(blank.into_patch(today()).is_err());

        let future = FarmerUpdate {
            birth_date: Some(NaiveDate::from_ymd_opt(2030, 1, 1)),
            ..FarmerUpdate::default()
        };
        assert!(future.into_patch(today()).is_err());
    }

    #[test]
    fn test_patch_apply_and_status() {
        let now = Utc::now();
        let mut farmer = Farmer {
            id: Uuid::new_v4(),
            full_name: "Ana".to_string(),
            cpf: "11144477735".to_string(),
            birth_date: None,
            phone: Some("5511999999999".to_string()),
            active: true,
            created_at: now,
            updated_at: now,
        };
        assert!(!farmer.can_be_deleted());
        assert_eq!(farmer.status(), FarmerStatus::Active);

        FarmerPatch::deactivate().apply_to(&mut farmer);
        assert!(farmer.can_be_deleted());
        assert_eq!(farmer.status().as_str(), "inactive");
        assert_eq!(farmer.phone.as_deref(), Some("5511999999999"));
    }
}
