//! Request DTOs

use chrono::NaiveDate;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use farm_core::domain::{FarmerFilter, FarmerUpdate};

/// `PUT /farmers/{id}` payload
///
/// `cpf` and `active` are read and thrown away: CPF never changes and the
/// active flag only moves through deactivation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFarmerRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
    #[serde(default)]
    pub cpf: Option<IgnoredAny>,
    #[serde(default)]
    pub active: Option<IgnoredAny>,
}

/// Marks a key as present even when its value is `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateFarmerRequest> for FarmerUpdate {
    fn from(req: UpdateFarmerRequest) -> Self {
        FarmerUpdate {
            full_name: req.full_name,
            birth_date: req.birth_date,
            phone: req.phone,
        }
    }
}

/// `GET /farmers` query
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub include_inactive: Option<String>,
}

impl ListQuery {
    pub fn include_inactive(&self) -> bool {
        self.include_inactive.as_deref() == Some("true")
    }
}

/// `GET /farmers/search` query
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

impl From<&SearchQuery> for FarmerFilter {
    fn from(query: &SearchQuery) -> Self {
        FarmerFilter::search(query.q.as_deref(), query.status.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_drops_cpf_and_active() {
        let req: UpdateFarmerRequest =
            serde_json::from_str(r#"{"cpf": "52998224725", "active": true}"#).unwrap();
        assert!(FarmerUpdate::from(req).is_empty());
    }

    #[test]
    fn test_update_null_clears_and_absent_skips() {
        let req: UpdateFarmerRequest =
            serde_json::from_str(r#"{"phone": null, "fullName": "Ana"}"#).unwrap();
        let update = FarmerUpdate::from(req);
        assert_eq!(update.phone, Some(None));
        assert_eq!(update.birth_date, None);
        assert_eq!(update.full_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_update_parses_birth_date() {
        let req: UpdateFarmerRequest =
            serde_json::from_str(r#"{"birthDate": "1980-02-29"}"#).unwrap();
        assert_eq!(req.birth_date, Some(NaiveDate::from_ymd_opt(1980, 2, 29)));
    }

    #[test]
    fn test_include_inactive_flag() {
        let on = ListQuery { include_inactive: Some("true".to_string()) };
        let off = ListQuery { include_inactive: Some("yes".to_string()) };
        assert!(on.include_inactive());
        assert!(!off.include_inactive());
        assert!(!ListQuery::default().include_inactive());
    }
}
