//! Named label→value lookup tables referenced by parameter definitions.
//!
//! The store is display/validation metadata for callers; the registry
//! never consults it for control flow. It is fully replaced whenever a
//! loaded document carries an `"enum_tables"` field.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value as Json;
use tracing::debug;

use crate::types::value::Value;


#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumTableStore {
    tables: HashMap<String, BTreeMap<String, Value>>,
}

impl EnumTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the store from a document's `enum_tables` object. Entries
    /// that are not objects of scalars are skipped.
    pub fn replace_from(&mut self, tables: &Json) {
        self.tables.clear();
        let Some(obj) = tables.as_object() else {
            return;
        };
        for (name, table) in obj {
            let mut map = BTreeMap::new();
            if let Some(entries) = table.as_object() {
                for (label, json) in entries {
                    if let Some(value) = Value::from_json(json) {
                        map.insert(label.clone(), value);
                    }
                }
            }
            self.tables.insert(name.clone(), map);
        }
        debug!(tables = self.tables.len(), "enum table store replaced");
    }

    /// Resolve a referenced table into a snapshot for an entry.
    /// An unknown name resolves to an empty table, silently and non-fatally.
    pub fn resolve(&self, name: &str) -> BTreeMap<String, Value> {
        match self.tables.get(name) {
            Some(table) => table.clone(),
            None => {
                debug!(table = name, "enum table not found, using empty table");
                BTreeMap::new()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_from_document_field() {
        let mut store = EnumTableStore::new();
        store.replace_from(&serde_json::json!({
            "gear": {"low": 1, "high": 2},
            "mode": {"auto": "a", "manual": "m"}
        }));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("gear").unwrap().get("low"), Some(&Value::Int(1)));
        assert_eq!(
            store.get("mode").unwrap().get("auto"),
            Some(&Value::Str("a".into()))
        );
    }

    #[test]
    fn replace_is_destructive() {
        let mut store = EnumTableStore::new();
        store.replace_from(&serde_json::json!({"gear": {"low": 1}}));
        store.replace_from(&serde_json::json!({"mode": {"auto": 0}}));
        assert!(store.get("gear").is_none());
        assert!(store.get("mode").is_some());
    }

    #[test]
    fn unknown_name_resolves_empty() {
        let store = EnumTableStore::new();
        assert!(store.resolve("missing").is_empty());
    }

    #[test]
    fn non_scalar_labels_skipped() {
        let mut store = EnumTableStore::new();
        store.replace_from(&serde_json::json!({"gear": {"low": 1, "bad": [1, 2]}}));
        let table = store.get("gear").unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.contains_key("low"));
    }
}
