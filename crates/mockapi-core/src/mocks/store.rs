//! Store owning the users, groups and relations collections.
//!
//! Every mutating operation writes the affected collections back to the
//! configured [`Storage`] before returning.

use crate::config::seed::Seed;
use crate::error::ApiError;
use crate::storage::{Storage, StorageError};
use crate::types::collection::{CollectionName, EntityKind};
use crate::types::record::Record;
use crate::types::relation::Relation;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

const RELATION_ID_PREFIX: &str = "relation";

/// Generates `<prefix><n>` ids with one counter per prefix.
#[derive(Debug, Default)]
struct IdGenerator {
    counters: HashMap<&'static str, u64>,
}

impl IdGenerator {
    /// Next id for `prefix` that `taken` reports as free.
    fn next(&mut self, prefix: &'static str, taken: impl Fn(&str) -> bool) -> String {
        let counter = self.counters.entry(prefix).or_insert(0);
        loop {
            *counter += 1;
            let id = format!("{prefix}{counter}");
            if !taken(&id) {
                return id;
            }
        }
    }
}

/// In-memory collections plus the storage that mirrors them.
#[derive(Debug)]
pub struct Store {
    users: Vec<Record>,
    groups: Vec<Record>,
    relations: Vec<Relation>,
    ids: IdGenerator,
    storage: Box<dyn Storage>,
}

impl Store {
    /// Create a store holding the seed collections.
    ///
    /// Nothing is written to storage until the first mutation.
    pub fn new(seed: Seed, storage: Box<dyn Storage>) -> Self {
        Self {
            users: seed.users,
            groups: seed.groups,
            relations: seed.relations,
            ids: IdGenerator::default(),
            storage,
        }
    }

    /// Create a store from previously persisted collections.
    ///
    /// Collections missing from storage fall back to the seed.
    pub fn restore(seed: Seed, storage: Box<dyn Storage>) -> Result<Self, StorageError> {
        let users = load_entry(storage.as_ref(), CollectionName::Users)?.unwrap_or(seed.users);
        let groups = load_entry(storage.as_ref(), CollectionName::Groups)?.unwrap_or(seed.groups);
        let relations =
            load_entry(storage.as_ref(), CollectionName::Relations)?.unwrap_or(seed.relations);

        tracing::info!(
            users = users.len(),
            groups = groups.len(),
            relations = relations.len(),
            "Restored collections from storage"
        );

        Ok(Self {
            users,
            groups,
            relations,
            ids: IdGenerator::default(),
            storage,
        })
    }

    /// Replace all collections with the seed and persist them.
    pub fn reset(&mut self, seed: Seed) -> Result<(), StorageError> {
        self.users = seed.users;
        self.groups = seed.groups;
        self.relations = seed.relations;
        self.ids = IdGenerator::default();
        for name in CollectionName::ALL {
            self.persist(name)?;
        }
        Ok(())
    }

    pub fn records(&self, kind: EntityKind) -> &[Record] {
        match kind {
            EntityKind::User => &self.users,
            EntityKind::Group => &self.groups,
        }
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Append a new record built from `payload` under a fresh id.
    pub fn create(&mut self, kind: EntityKind, payload: &Value) -> Result<Record, ApiError> {
        let records = match kind {
            EntityKind::User => &mut self.users,
            EntityKind::Group => &mut self.groups,
        };
        let id = self
            .ids
            .next(kind.id_prefix(), |id| records.iter().any(|r| r.id == id));
        let record = Record::from_payload(id, payload);
        records.push(record.clone());

        self.persist(kind.collection())?;
        Ok(record)
    }

    pub fn find(&self, kind: EntityKind, id: &str) -> Result<&Record, ApiError> {
        self.records(kind)
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::bad_request(kind.missing_message()))
    }

    /// Merge `payload` into an existing record. The id never changes.
    pub fn update(
        &mut self,
        kind: EntityKind,
        id: &str,
        payload: &Value,
    ) -> Result<Record, ApiError> {
        let index = self.position(kind, id)?;
        let record = &mut self.records_mut(kind)[index];
        record.merge(payload);
        let updated = record.clone();

        self.persist(kind.collection())?;
        Ok(updated)
    }

    /// Remove a record.
    ///
    /// Deleting a user also drops every relation referencing it. A group can
    /// only be deleted once no relation references it.
    pub fn delete(&mut self, kind: EntityKind, id: &str) -> Result<Record, ApiError> {
        let index = self.position(kind, id)?;

        if kind == EntityKind::Group && self.relations.iter().any(|r| r.group_id == id) {
            return Err(ApiError::bad_request(
                "Group could be deleted only when there is no user inside it",
            ));
        }

        // Both collections change in memory before anything is written
        let cascade = kind == EntityKind::User;
        if cascade {
            let before = self.relations.len();
            self.relations.retain(|r| r.user_id != id);
            tracing::debug!(
                user_id = %id,
                removed = before - self.relations.len(),
                "Cascaded relation removal"
            );
        }
        let removed = self.records_mut(kind).remove(index);

        if cascade {
            self.persist(CollectionName::Relations)?;
        }
        self.persist(kind.collection())?;
        Ok(removed)
    }

    /// Link a user to a group.
    pub fn add_relation(&mut self, user_id: &str, group_id: &str) -> Result<Relation, ApiError> {
        if self.relations.iter().any(|r| r.links(user_id, group_id)) {
            return Err(ApiError::bad_request("User already exists in this group"));
        }

        let relations = &self.relations;
        let id = self.ids.next(RELATION_ID_PREFIX, |id| {
            relations.iter().any(|r| r.id == id)
        });
        let relation = Relation {
            id,
            user_id: user_id.to_owned(),
            group_id: group_id.to_owned(),
        };
        self.relations.push(relation.clone());

        self.persist(CollectionName::Relations)?;
        Ok(relation)
    }

    /// Unlink a user from a group.
    pub fn remove_relation(
        &mut self,
        user_id: &str,
        group_id: &str,
    ) -> Result<Relation, ApiError> {
        let index = self
            .relations
            .iter()
            .position(|r| r.links(user_id, group_id))
            .ok_or_else(|| ApiError::bad_request("User doesn't exist in this group"))?;
        let removed = self.relations.remove(index);

        self.persist(CollectionName::Relations)?;
        Ok(removed)
    }

    /// Records on the other side of the relation: the groups of a user, or the
    /// users of a group, in collection order.
    pub fn related(&self, kind: EntityKind, id: &str) -> Result<Vec<&Record>, ApiError> {
        self.find(kind, id)?;

        let related: Vec<&Record> = match kind {
            EntityKind::User => self
                .groups
                .iter()
                .filter(|group| self.relations.iter().any(|r| r.links(id, &group.id)))
                .collect(),
            EntityKind::Group => self
                .users
                .iter()
                .filter(|user| self.relations.iter().any(|r| r.links(&user.id, id)))
                .collect(),
        };
        Ok(related)
    }

    fn records_mut(&mut self, kind: EntityKind) -> &mut Vec<Record> {
        match kind {
            EntityKind::User => &mut self.users,
            EntityKind::Group => &mut self.groups,
        }
    }

    fn position(&self, kind: EntityKind, id: &str) -> Result<usize, ApiError> {
        self.records(kind)
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ApiError::bad_request(kind.missing_message()))
    }

    fn persist(&mut self, name: CollectionName) -> Result<(), StorageError> {
        let serialized = match name {
            CollectionName::Users => serde_json::to_string(&self.users),
            CollectionName::Groups => serde_json::to_string(&self.groups),
            CollectionName::Relations => serde_json::to_string(&self.relations),
        }
        .map_err(|source| StorageError::Json {
            key: name.key().to_owned(),
            source,
        })?;

        if let Err(e) = self.storage.set_item(name.key(), &serialized) {
            tracing::error!(collection = %name, error = %e, "Failed to persist collection");
            return Err(e);
        }
        tracing::debug!(collection = %name, bytes = serialized.len(), "Persisted collection");
        Ok(())
    }
}

fn load_entry<T: DeserializeOwned>(
    storage: &dyn Storage,
    name: CollectionName,
) -> Result<Option<Vec<T>>, StorageError> {
    let Some(content) = storage.get_item(name.key())? else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StorageError::Json {
            key: name.key().to_owned(),
            source,
        })
}
