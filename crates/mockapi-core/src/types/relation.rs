//! User/group relation records.

use serde::{Deserialize, Serialize};

/// Join record linking one user to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: String,
    pub user_id: String,
    pub group_id: String,
}

impl Relation {
    pub fn links(&self, user_id: &str, group_id: &str) -> bool {
        self.user_id == user_id && self.group_id == group_id
    }
}
