use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::binding::Binding;
use crate::types::access::Limit;
use crate::types::value::Value;


/// One parameter's full record.
///
/// The id is assigned by the document, never generated. `path` is the
/// slash-joined ancestor chain down to and including `name`, recomputed on
/// every load. `enum_table` is the snapshot resolved from the enum table
/// store at load time (empty when the reference was absent or unknown).
#[derive(Debug)]
pub struct ParamEntry {
    pub id: u32,
    pub name: String,
    pub path: String,
    pub limit: Limit,
    pub value: Value,
    pub enum_table_name: Option<String>,
    pub enum_table: BTreeMap<String, Value>,
    pub(crate) binding: Binding,
}

impl ParamEntry {
    /// Clonable projection without the binding, for enumeration and UIs.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            id: self.id,
            name: self.name.clone(),
            path: self.path.clone(),
            limit: self.limit,
            value: self.value.clone(),
            enum_table_name: self.enum_table_name.clone(),
            enum_table: self.enum_table.clone(),
        }
    }

    /// Whether a live source of any kind is currently bound.
    pub fn is_bound(&self) -> bool {
        self.binding.is_bound()
    }
}


/// A point-in-time copy of an entry's data fields.
///
/// The registry owns the entries; callers only ever hold snapshots, so no
/// independent copy of registry state can diverge unnoticed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySnapshot {
    pub id: u32,
    pub name: String,
    pub path: String,
    pub limit: Limit,
    pub value: Value,
    pub enum_table_name: Option<String>,
    pub enum_table: BTreeMap<String, Value>,
}
