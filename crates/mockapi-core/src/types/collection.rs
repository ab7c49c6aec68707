//! Collection names and entity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a persisted collection.
///
/// Doubles as the key the collection is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionName {
    Users,
    Groups,
    Relations,
}

impl CollectionName {
    pub const ALL: [CollectionName; 3] = [
        CollectionName::Users,
        CollectionName::Groups,
        CollectionName::Relations,
    ];

    /// Storage key for this collection
    pub fn key(self) -> &'static str {
        match self {
            CollectionName::Users => "users",
            CollectionName::Groups => "groups",
            CollectionName::Relations => "relations",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Kind of a top-level entity. Users and groups share the same record shape
/// but live in separate collections with separate id namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Group,
}

impl EntityKind {
    /// Prefix for generated ids (`user1`, `group1`, ...)
    pub fn id_prefix(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Group => "group",
        }
    }

    pub fn collection(self) -> CollectionName {
        match self {
            EntityKind::User => CollectionName::Users,
            EntityKind::Group => CollectionName::Groups,
        }
    }

    /// Message used when a record of this kind is missing
    pub fn missing_message(self) -> &'static str {
        match self {
            EntityKind::User => "no such user",
            EntityKind::Group => "no such group",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CollectionName::Users, "users")]
    #[case(CollectionName::Groups, "groups")]
    #[case(CollectionName::Relations, "relations")]
    fn test_collection_key_matches_serde_name(#[case] name: CollectionName, #[case] key: &str) {
        assert_eq!(name.key(), key);
        assert_eq!(name.to_string(), key);
        let json = serde_json::to_string(&name).expect("Should serialize");
        assert_eq!(json, format!("\"{}\"", key));
    }

    #[rstest]
    #[case(EntityKind::User, "user", CollectionName::Users)]
    #[case(EntityKind::Group, "group", CollectionName::Groups)]
    fn test_entity_kind_mapping(
        #[case] kind: EntityKind,
        #[case] prefix: &str,
        #[case] collection: CollectionName,
    ) {
        assert_eq!(kind.id_prefix(), prefix);
        assert_eq!(kind.collection(), collection);
        assert!(kind.missing_message().ends_with(prefix));
    }
}
