//! User and group records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user or group: an id plus arbitrary JSON fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a request payload.
    ///
    /// Only object payloads contribute fields; an `id` in the payload is dropped.
    pub fn from_payload(id: String, payload: &Value) -> Self {
        let mut record = Self {
            id,
            fields: Map::new(),
        };
        record.merge(payload);
        record
    }

    /// Shallow-merge payload fields into the record, payload wins.
    /// The id is never overwritten.
    pub fn merge(&mut self, payload: &Value) {
        let Some(object) = payload.as_object() else {
            return;
        };
        for (key, value) in object {
            if key != "id" {
                self.fields.insert(key.clone(), value.clone());
            }
        }
    }

    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(self.fields.len() + 1);
        object.insert("id".to_owned(), Value::String(self.id.clone()));
        object.extend(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_record_flattens_fields() {
        let record: Record =
            serde_json::from_value(json!({"id": "user1", "name": "A", "age": 3})).unwrap();
        assert_eq!(record.id, "user1");
        assert_eq!(record.fields.get("name"), Some(&json!("A")));
        assert_eq!(record.fields.get("age"), Some(&json!(3)));
        assert!(!record.fields.contains_key("id"));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"id": "user1", "name": "A", "age": 3}));
        assert_eq!(record.to_value(), value);
    }

    #[rstest]
    fn test_record_from_payload_ignores_id() {
        let record = Record::from_payload("user7".into(), &json!({"id": "hijack", "name": "A"}));
        assert_eq!(record.to_value(), json!({"id": "user7", "name": "A"}));
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!("text"))]
    #[case(json!([1, 2]))]
    #[case(json!(42))]
    fn test_record_from_non_object_payload(#[case] payload: Value) {
        let record = Record::from_payload("group1".into(), &payload);
        assert!(record.fields.is_empty());
    }

    #[rstest]
    fn test_record_merge_overrides_and_keeps() {
        let mut record = Record::from_payload("user1".into(), &json!({"name": "A", "role": "x"}));
        record.merge(&json!({"name": "B", "id": "other", "extra": true}));
        assert_eq!(
            record.to_value(),
            json!({"id": "user1", "name": "B", "role": "x", "extra": true})
        );
    }
}
