//! Route table for the users and groups endpoints.

use crate::mocks::router::Router;
use crate::types::collection::EntityKind;
use crate::types::record::Record;
use serde_json::{json, Value};

pub const USERS_URL: &str = "/api/users";
pub const GROUPS_URL: &str = "/api/groups";

/// Router with every users/groups route registered.
pub fn api_router() -> Router {
    let mut router = Router::new();
    register_entity_routes(&mut router, EntityKind::User);
    register_entity_routes(&mut router, EntityKind::Group);
    router
}

/// Register the CRUD, listing and relation routes for one entity kind.
///
/// Wildcards also match `/`, so generic routes go in first and the more
/// specific ones after them.
pub fn register_entity_routes(router: &mut Router, kind: EntityKind) {
    let (base, related, relation) = match kind {
        EntityKind::User => (USERS_URL, "groups", "{user_id}/group/{group_id}"),
        EntityKind::Group => (GROUPS_URL, "users", "{group_id}/user/{user_id}"),
    };

    router
        .define(base, move |store, _, _| Ok(records_to_value(store.records(kind))))
        .define(&format!("{base}/{{id}}"), move |store, params, _| {
            Ok(store.find(kind, params.param("id"))?.to_value())
        })
        .define(&format!("{base}/{{id}}/update"), move |store, params, data| {
            Ok(store.update(kind, params.param("id"), data)?.to_value())
        })
        .define(&format!("{base}/{{id}}/delete"), move |store, params, _| {
            Ok(store.delete(kind, params.param("id"))?.to_value())
        })
        .define(&format!("{base}/{{id}}/{related}"), move |store, params, _| {
            let records = store.related(kind, params.param("id"))?;
            Ok(Value::Array(records.into_iter().map(Record::to_value).collect()))
        })
        .define(&format!("{base}/{relation}/delete"), |store, params, _| {
            store.remove_relation(params.param("user_id"), params.param("group_id"))?;
            Ok(json!({}))
        })
        .define(&format!("{base}/{relation}/add"), |store, params, _| {
            store.add_relation(params.param("user_id"), params.param("group_id"))?;
            Ok(json!({}))
        })
        .define(&format!("{base}/create"), move |store, _, data| {
            Ok(store.create(kind, data)?.to_value())
        });
}

fn records_to_value(records: &[Record]) -> Value {
    Value::Array(records.iter().map(Record::to_value).collect())
}
