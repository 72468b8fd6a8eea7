//! Search and list predicates.
//!
//! A filter is a value that can be evaluated against a record in memory
//! ([`FarmerFilter::matches`]) or translated by a store into its own query
//! language. Text and status predicates are independent and joined by AND.

use once_cell::sync::Lazy;
use regex::Regex;

use super::cpf;
use super::farmer::{Farmer, FarmerStatus};

static BARE_CPF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{11}$").expect("valid regex"));
static FORMATTED_CPF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}$").expect("valid regex"));

/// Free-text search term, classified by shape alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Exact match on the eleven cleaned digits. Check digits are not verified.
    Cpf(String),
    /// Case-insensitive substring of the full name.
    Name(String),
}

impl SearchTerm {
    /// Returns `None` for an absent or blank term.
    pub fn parse(raw: &str) -> Option<Self> {
        let term = raw.trim();
        if term.is_empty() {
            return None;
        }
        if BARE_CPF.is_match(term) || FORMATTED_CPF.is_match(term) {
            Some(SearchTerm::Cpf(cpf::clean(term)))
        } else {
            Some(SearchTerm::Name(term.to_string()))
        }
    }

    pub fn matches(&self, farmer: &Farmer) -> bool {
        match self {
            SearchTerm::Cpf(digits) => farmer.cpf == *digits,
            SearchTerm::Name(name) => farmer
                .full_name
                .to_lowercase()
                .contains(&name.to_lowercase()),
        }
    }
}

/// Status predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Only(FarmerStatus),
}

impl StatusFilter {
    /// `active` and `inactive` filter; anything else is unfiltered.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| FarmerStatus::parse(s.trim()))
            .map(StatusFilter::Only)
            .unwrap_or(StatusFilter::Any)
    }

    /// The `active` column value to require, if any.
    pub fn required_active(&self) -> Option<bool> {
        match self {
            StatusFilter::Any => None,
            StatusFilter::Only(status) => Some(status.is_active()),
        }
    }

    pub fn matches(&self, farmer: &Farmer) -> bool {
        match self.required_active() {
            Some(active) => farmer.active == active,
            None => true,
        }
    }
}

/// Conjunction of an optional text term and a status predicate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FarmerFilter {
    pub term: Option<SearchTerm>,
    pub status: StatusFilter,
}

impl FarmerFilter {
    pub fn new(term: Option<SearchTerm>, status: StatusFilter) -> Self {
        Self { term, status }
    }

    /// Listing filter: active records only unless inactive ones are requested.
    pub fn listing(include_inactive: bool) -> Self {
        let status = if include_inactive {
            StatusFilter::Any
        } else {
            StatusFilter::Only(FarmerStatus::Active)
        };
        Self { term: None, status }
    }

    /// Search filter from raw query parameters.
    pub fn search(q: Option<&str>, status: Option<&str>) -> Self {
        Self {
            term: q.and_then(SearchTerm::parse),
            status: StatusFilter::parse(status),
        }
    }

    pub fn matches(&self, farmer: &Farmer) -> bool {
        self.status.matches(farmer)
            && self.term.as_ref().map_or(true, |term| term.matches(farmer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn farmer(name: &str, cpf: &str, active: bool) -> Farmer {
        let now = Utc::now();
        Farmer {
            id: Uuid::new_v4(),
            full_name: name.to_string(),
            cpf: cpf.to_string(),
            birth_date: None,
            phone: None,
            active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_term_classification() {
        assert_eq!(
            SearchTerm::parse("111.444.777-35"),
            Some(SearchTerm::Cpf("11144477735".to_string()))
        );
        assert_eq!(
            SearchTerm::parse(" 11144477735 "),
            Some(SearchTerm::Cpf("11144477735".to_string()))
        );
        assert_eq!(
            SearchTerm::parse("111444777-35"),
            Some(SearchTerm::Cpf("11144477735".to_string()))
        );
        assert_eq!(
            SearchTerm::parse("Maria"),
            Some(SearchTerm::Name("Maria".to_string()))
        );
        assert_eq!(SearchTerm::parse("   "), None);
    }

    #[test]
    fn test_invalid_cpf_shape_still_routes_to_cpf() {
        // Wrong check digits, right shape.
        assert_eq!(
            SearchTerm::parse("11144477736"),
            Some(SearchTerm::Cpf("11144477736".to_string()))
        );
        // Ten digits is a name search.
        assert_eq!(
            SearchTerm::parse("1114447773"),
            Some(SearchTerm::Name("1114447773".to_string()))
        );
        // Unsupported separators are a name search.
        assert!(matches!(
            SearchTerm::parse("111 444 777 35"),
            Some(SearchTerm::Name(_))
        ));
        // Only ASCII digits make a CPF shape.
        assert_eq!(
            SearchTerm::parse("١١١٤٤٤٧٧٧٣٥"),
            Some(SearchTerm::Name("١١١٤٤٤٧٧٧٣٥".to_string()))
        );
        assert_eq!(
            SearchTerm::parse("١١١.٤٤٤.٧٧٧-٣٥"),
            Some(SearchTerm::Name("١١١.٤٤٤.٧٧٧-٣٥".to_string()))
        );
    }

    #[test]
    fn test_name_match_is_case_insensitive_substring() {
        let f = farmer("Maria da Silva", "11144477735", true);
        assert!(SearchTerm::Name("SILVA".to_string()).matches(&f));
        assert!(SearchTerm::Name("a da s".to_string()).matches(&f));
        assert!(!SearchTerm::Name("Souza".to_string()).matches(&f));
    }

    #[test]
    fn test_cpf_match_is_exact() {
        let f = farmer("Maria", "11144477735", true);
        assert!(SearchTerm::Cpf("11144477735".to_string()).matches(&f));
        assert!(!SearchTerm::Cpf("11144477736".to_string()).matches(&f));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(StatusFilter::parse(Some("active")), StatusFilter::Only(FarmerStatus::Active));
        assert_eq!(StatusFilter::parse(Some("inactive")), StatusFilter::Only(FarmerStatus::Inactive));
        assert_eq!(StatusFilter::parse(Some("all")), StatusFilter::Any);
        assert_eq!(StatusFilter::parse(None), StatusFilter::Any);
    }

    #[test]
    fn test_filter_is_conjunction() {
        let active = farmer("Maria", "11144477735", true);
        let inactive = farmer("Maria Clara", "52998224725", false);

        let filter = FarmerFilter::search(Some("maria"), Some("inactive"));
        assert!(!filter.matches(&active));
        assert!(filter.matches(&inactive));

        let filter = FarmerFilter::search(None, None);
        assert!(filter.matches(&active) && filter.matches(&inactive));
    }

    #[test]
    fn test_listing_filter() {
        let inactive = farmer("José", "52998224725", false);
        assert!(!FarmerFilter::listing(false).matches(&inactive));
        assert!(FarmerFilter::listing(true).matches(&inactive));
    }
}
