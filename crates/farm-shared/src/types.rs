//! Common types

use uuid::Uuid;

pub type EntityId = Uuid;

/// Parses a path segment into an id. Anything that is not a UUID cannot name a record.
pub fn parse_id(s: &str) -> Option<EntityId> {
    Uuid::parse_str(s.trim()).ok()
}
