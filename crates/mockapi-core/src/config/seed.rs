//! Initial collections the store starts from.

use crate::config::error::ConfigError;
use crate::config::parser::{expand_pattern, read_config};
use crate::types::record::Record;
use crate::types::relation::Relation;
use serde::{Deserialize, Serialize};

/// Static users, groups and relations loaded at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub users: Vec<Record>,
    pub groups: Vec<Record>,
    pub relations: Vec<Relation>,
}

impl Seed {
    /// Load and concatenate every seed file matching `pattern`, in path order.
    pub fn load(pattern: &str) -> Result<Self, ConfigError> {
        let mut seed = Seed::default();
        for path in expand_pattern(pattern)? {
            let part: Seed = read_config(&path)?;
            tracing::debug!(
                path = %path.display(),
                users = part.users.len(),
                groups = part.groups.len(),
                relations = part.relations.len(),
                "Loaded seed file"
            );
            seed.extend(part);
        }
        Ok(seed)
    }

    pub fn extend(&mut self, other: Seed) {
        self.users.extend(other.users);
        self.groups.extend(other.groups);
        self.relations.extend(other.relations);
    }
}
