//! # Domain Entities
//!
//! Entity records, identifiers and the keyed tables the entity store is
//! built from.
//!
//! ## Clusters
//!
//! - **Records**: `Record`, `EntityId`, `EntityKind`
//! - **Tables**: `EntityTable` (`by_id` + ordered `response_ids`)
//! - **Normalized payloads**: `NormalizedData`, `NormalizedResult`

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Server-assigned entity identifier, always held in string form.
pub type EntityId = String;

/// An entity record. Fields are opaque to the store.
pub type Record = Map<String, Value>;

/// Flat per-type entity maps produced by normalization.
pub type EntityMap = BTreeMap<EntityId, Record>;

/// Field holding an entity's identifier.
pub const ID_FIELD: &str = "id";

/// Entity types that get their own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// A case record (top-level document).
    Case,
    /// An asset referenced by a case's `asset` field.
    Asset,
    /// A service provider referenced by a case's `serviceProvider` field.
    ServiceProvider,
}

impl EntityKind {
    /// The key used for this kind in normalized payloads and in case records.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::Asset => "asset",
            Self::ServiceProvider => "serviceProvider",
        }
    }

    /// Resolve a normalized-payload key back to a kind.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "case" => Some(Self::Case),
            "asset" => Some(Self::Asset),
            "serviceProvider" => Some(Self::ServiceProvider),
            _ => None,
        }
    }
}

/// Extract an entity id from a JSON value.
///
/// Strings are taken as-is and integers use their decimal form. Empty
/// strings, `null` and every other JSON type yield `None`.
#[must_use]
pub fn id_from_value(value: &Value) -> Option<EntityId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Shallow field-level merge: every field of `incoming` overwrites `target`.
pub fn merge_record(target: &mut Record, incoming: &Record) {
    for (field, value) in incoming {
        target.insert(field.clone(), value.clone());
    }
}

/// One keyed table per entity type.
///
/// `response_ids` holds the most recent list-fetch result in server order
/// and never contains duplicates or empty ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTable {
    /// Ordered, duplicate-free ids in server response order.
    pub response_ids: Vec<EntityId>,
    /// Records keyed by id.
    pub by_id: BTreeMap<EntityId, Record>,
}

impl EntityTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.by_id.get(id)
    }

    /// Number of records held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the table holds no records and no response ids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.response_ids.is_empty()
    }

    /// Merge one record into `by_id`. Empty ids are ignored.
    pub fn merge(&mut self, id: &str, record: &Record) {
        if id.is_empty() {
            return;
        }
        let entry = self.by_id.entry(id.to_string()).or_default();
        merge_record(entry, record);
    }

    /// Merge every record of a normalized entity map.
    pub fn merge_all(&mut self, records: &EntityMap) {
        for (id, record) in records {
            self.merge(id, record);
        }
    }

    /// Append ids to `response_ids`, skipping empty ids and ids already
    /// present. Relative order of new ids is preserved.
    pub fn append_response_ids<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a EntityId>,
    {
        let mut seen: HashSet<EntityId> = self.response_ids.iter().cloned().collect();
        for id in ids {
            if !id.is_empty() && seen.insert(id.clone()) {
                self.response_ids.push(id.clone());
            }
        }
    }

    /// Records in `response_ids` order. Ids without a record are skipped.
    #[must_use]
    pub fn records_in_response_order(&self) -> Vec<&Record> {
        self.response_ids
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    /// Drop every record and response id.
    pub fn clear(&mut self) {
        self.response_ids.clear();
        self.by_id.clear();
    }
}

/// Shape of the top-level normalized input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    /// No document was normalized.
    #[default]
    Empty,
    /// A single top-level entity.
    Single(EntityId),
    /// A sequence of top-level entities, in input order.
    Many(Vec<EntityId>),
}

impl NormalizedResult {
    /// The result ids as a flat list.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(id) => vec![id.clone()],
            Self::Many(ids) => ids.clone(),
        }
    }
}

/// Output of normalization: flat per-type tables plus the result shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedData {
    /// Entity type key → id → flat record.
    pub entities: BTreeMap<String, EntityMap>,
    /// Top-level ids, mirroring the input shape.
    pub result: NormalizedResult,
}

impl NormalizedData {
    /// Entities of one kind, if any were extracted.
    #[must_use]
    pub fn entities_of(&self, kind: EntityKind) -> Option<&EntityMap> {
        self.entities.get(kind.key())
    }

    /// Whether no entity of any kind was extracted.
    #[must_use]
    pub fn has_no_entities(&self) -> bool {
        self.entities.values().all(BTreeMap::is_empty)
    }

    /// Whether both entities and result are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.has_no_entities() && self.result.ids().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_id_from_value() {
        assert_eq!(id_from_value(&json!("abc")), Some("abc".to_string()));
        assert_eq!(id_from_value(&json!(123)), Some("123".to_string()));
        assert_eq!(id_from_value(&json!("")), None);
        assert_eq!(id_from_value(&json!(null)), None);
        assert_eq!(id_from_value(&json!(1.5)), None);
        assert_eq!(id_from_value(&json!({"id": "x"})), None);
    }

    #[test]
    fn test_entity_kind_keys_round_trip() {
        for kind in [EntityKind::Case, EntityKind::Asset, EntityKind::ServiceProvider] {
            assert_eq!(EntityKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(EntityKind::from_key("note"), None);
    }

    #[test]
    fn test_merge_new_fields_win() {
        let mut table = EntityTable::new();
        table.merge("1", &record(json!({"id": "1", "status": "open", "po": "7"})));
        table.merge("1", &record(json!({"status": "closed"})));

        let merged = table.get("1").unwrap();
        assert_eq!(merged["status"], json!("closed"));
        assert_eq!(merged["po"], json!("7"));
    }

    #[test]
    fn test_merge_ignores_empty_id() {
        let mut table = EntityTable::new();
        table.merge("", &record(json!({"id": ""})));
        assert!(table.is_empty());
    }

    #[test]
    fn test_append_response_ids_set_semantics() {
        let mut table = EntityTable::new();
        let first = vec!["b".to_string(), "a".to_string()];
        let second = vec!["a".to_string(), String::new(), "c".to_string(), "c".to_string()];
        table.append_response_ids(&first);
        table.append_response_ids(&second);
        assert_eq!(table.response_ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_records_in_response_order_skips_missing() {
        let mut table = EntityTable::new();
        table.merge("2", &record(json!({"id": "2"})));
        table.merge("1", &record(json!({"id": "1"})));
        let ids = vec!["1".to_string(), "missing".to_string(), "2".to_string()];
        table.append_response_ids(&ids);

        let ordered: Vec<_> = table
            .records_in_response_order()
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ordered, vec![json!("1"), json!("2")]);
    }

    #[test]
    fn test_normalized_result_ids() {
        assert!(NormalizedResult::Empty.ids().is_empty());
        assert_eq!(NormalizedResult::Single("x".into()).ids(), vec!["x"]);
        assert_eq!(
            NormalizedResult::Many(vec!["a".into(), "b".into()]).ids(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_default_normalized_data_is_empty() {
        let data = NormalizedData::default();
        assert!(data.is_empty());
        assert!(data.entities_of(EntityKind::Case).is_none());
    }

    proptest::proptest! {
        #[test]
        fn prop_response_ids_stay_unique(ids in proptest::collection::vec("[a-d]{0,1}", 0..20)) {
            let mut table = EntityTable::new();
            table.append_response_ids(&ids);
            let unique: HashSet<_> = table.response_ids.iter().collect();
            proptest::prop_assert_eq!(unique.len(), table.response_ids.len());
            proptest::prop_assert!(table.response_ids.iter().all(|id| !id.is_empty()));
        }
    }
}
