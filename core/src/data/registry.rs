//! The parameter registry — authoritative, id-indexed storage with a
//! permission gate in front of every externally-facing read and write.
//!
//! Storage is a flat vector kept sorted by id; the document tree is only a
//! serialization detail, retained so save can walk the original structure
//! and write current values back into matching leaves. Loads are staged:
//! the whole walk completes into a scratch list before anything is
//! committed, so a failed load leaves the prior contents intact.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value as Json;
use tracing::{debug, warn};

use crate::data::binding::{Binding, GetAccessor, SetAccessor};
use crate::data::document::{self, Document, TABLES_FIELD, VALUE_FIELD};
use crate::data::enum_tables::EnumTableStore;
use crate::error::{AccessError, DocError};
use crate::types::access::{Limit, Permission, Role};
use crate::types::entry::{EntrySnapshot, ParamEntry};
use crate::types::value::Value;


/// Fields collected for one leaf during a load walk.
struct StagedEntry {
    id: u32,
    name: String,
    path: String,
    limit: Option<Limit>,
    value: Option<Value>,
    enum_table_name: Option<String>,
}


/// The registry. Construct one explicitly and pass it where needed; there
/// is no global instance.
#[derive(Debug, Default)]
pub struct ParamRegistry {
    /// All entries, sorted by ascending id. Ids are pairwise distinct.
    entries: Vec<ParamEntry>,
    tables: EnumTableStore,
    /// The last successfully loaded document, used as the save template.
    doc: Option<Document>,
}

impl ParamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------
    // Load / save
    // -------------------------------------------------------------------

    /// Read, parse, and merge a document file into the registry.
    ///
    /// Both document flavors go through here: limits documents refresh
    /// name/path/limit/enum-table, values documents refresh values, and
    /// either kind inserts entries for ids not seen before. Nothing is
    /// committed if reading or parsing fails.
    pub fn load(&mut self, path: &Path) -> Result<(), DocError> {
        let doc = Document::read(path)?;
        self.load_doc(doc);
        Ok(())
    }

    /// Merge an already-parsed document. The update is in-place per id:
    /// loading a document that redefines an existing id never duplicates
    /// the entry.
    pub fn load_doc(&mut self, doc: Document) {
        // Replace the enum table store first so staged references resolve
        // against the new set.
        if let Some(tables) = doc.root.get(TABLES_FIELD) {
            self.tables.replace_from(tables);
        }

        let mut staged = Vec::new();
        if let Some(root) = doc.root.as_object() {
            for (name, node) in root {
                if name == TABLES_FIELD {
                    continue;
                }
                walk(name, "", node, &mut staged);
            }
        }
        debug!(leaves = staged.len(), "document walk complete");

        for entry in staged {
            self.commit(entry);
        }
        self.doc = Some(doc);
    }

    /// Write current cached values back into the retained document tree
    /// and save it to `path`. Structure, names, limits, and enum-table
    /// references are preserved verbatim; only leaf `value` fields change.
    pub fn save(&self, path: &Path) -> Result<(), DocError> {
        self.save_doc()?.write(path)
    }

    /// The retained document with every resolvable leaf's value refreshed.
    pub fn save_doc(&self) -> Result<Document, DocError> {
        let Some(doc) = self.doc.as_ref() else {
            return Err(DocError::NoDocument);
        };
        let mut root = doc.root.clone();
        if let Some(obj) = root.as_object_mut() {
            for (name, node) in obj.iter_mut() {
                if name == TABLES_FIELD {
                    continue;
                }
                self.fill_values(node);
            }
        }
        Ok(Document { root })
    }

    fn fill_values(&self, node: &mut Json) {
        let Some(obj) = node.as_object_mut() else {
            return;
        };
        if document::is_leaf(obj) {
            if let Some(id) = document::leaf_id(obj) {
                // Privileged by construction: the save path reads values
                // without going through the gate.
                if let Some(entry) = self.lookup(id) {
                    obj.insert(VALUE_FIELD.to_string(), entry.value.to_json());
                }
            }
            return;
        }
        for (_, child) in obj.iter_mut() {
            self.fill_values(child);
        }
    }

    /// Drop all entries, enum tables, and the retained document.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.tables.clear();
        self.doc = None;
    }

    fn commit(&mut self, staged: StagedEntry) {
        match self.entries.binary_search_by_key(&staged.id, |e| e.id) {
            Ok(i) => {
                let entry = &mut self.entries[i];
                entry.name = staged.name;
                entry.path = staged.path;
                if let Some(limit) = staged.limit {
                    entry.limit = limit;
                }
                if let Some(value) = staged.value {
                    entry.value = value;
                }
                if let Some(name) = staged.enum_table_name {
                    entry.enum_table = self.tables.resolve(&name);
                    entry.enum_table_name = Some(name);
                }
            }
            Err(i) => {
                let (enum_table_name, enum_table) = match staged.enum_table_name {
                    Some(name) => {
                        let table = self.tables.resolve(&name);
                        (Some(name), table)
                    }
                    None => (None, BTreeMap::new()),
                };
                self.entries.insert(
                    i,
                    ParamEntry {
                        id: staged.id,
                        name: staged.name,
                        path: staged.path,
                        limit: staged.limit.unwrap_or_default(),
                        value: staged.value.unwrap_or_default(),
                        enum_table_name,
                        enum_table,
                        binding: Binding::default(),
                    },
                );
            }
        }
    }

    // -------------------------------------------------------------------
    // Lookup / enumeration
    // -------------------------------------------------------------------

    /// Binary search by id. Safe on an empty registry.
    pub fn lookup(&self, id: u32) -> Option<&ParamEntry> {
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.entries[i])
    }

    fn lookup_mut(&mut self, id: u32) -> Option<&mut ParamEntry> {
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(move |i| &mut self.entries[i])
    }

    /// All entries, by ascending id.
    pub fn entries(&self) -> &[ParamEntry] {
        &self.entries
    }

    /// Clonable copies of all entries, by ascending id.
    pub fn snapshots(&self) -> Vec<EntrySnapshot> {
        self.entries.iter().map(ParamEntry::snapshot).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn enum_tables(&self) -> &EnumTableStore {
        &self.tables
    }

    // -------------------------------------------------------------------
    // Access gate
    // -------------------------------------------------------------------

    /// The access-control gate: whether `role` may perform `permission` on
    /// the entry. Unknown ids are denied for every role, SuperRoot
    /// included.
    pub fn check(&self, id: u32, permission: Permission, role: Role) -> bool {
        self.lookup(id)
            .map(|entry| entry.limit.allows(role, permission))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------
    // Cached value access
    // -------------------------------------------------------------------

    pub fn get_cached(&self, id: u32, role: Role) -> Result<Value, AccessError> {
        let entry = self.lookup(id).ok_or(AccessError::NotFound(id))?;
        if !entry.limit.allows(role, Permission::Read) {
            return Err(AccessError::Denied(id));
        }
        Ok(entry.value.clone())
    }

    /// Gated write to the cached value. The value's kind is not validated.
    pub fn set_cached(&mut self, id: u32, value: Value, role: Role) -> Result<(), AccessError> {
        let entry = self.lookup_mut(id).ok_or(AccessError::NotFound(id))?;
        if !entry.limit.allows(role, Permission::Write) {
            return Err(AccessError::Denied(id));
        }
        entry.value = value;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Live value access
    // -------------------------------------------------------------------

    /// Gated read through the live binding. Fails `Unbound` when neither a
    /// get accessor nor a value cell is bound — it never falls back to the
    /// cached value.
    pub fn get_live(&mut self, id: u32, role: Role) -> Result<Value, AccessError> {
        let entry = self.lookup_mut(id).ok_or(AccessError::NotFound(id))?;
        if !entry.limit.allows(role, Permission::Read) {
            return Err(AccessError::Denied(id));
        }
        entry.binding.live_get(id)
    }

    /// Gated write through the live binding, symmetric with [`Self::get_live`].
    pub fn set_live(&mut self, id: u32, value: Value, role: Role) -> Result<(), AccessError> {
        let entry = self.lookup_mut(id).ok_or(AccessError::NotFound(id))?;
        if !entry.limit.allows(role, Permission::Write) {
            return Err(AccessError::Denied(id));
        }
        entry.binding.live_set(id, value)
    }

    // -------------------------------------------------------------------
    // Binding management
    // -------------------------------------------------------------------

    /// Bind a shared value cell. The registry keeps a weak reference; the
    /// caller's `Arc` owns the cell.
    pub fn bind_value_cell(
        &mut self,
        id: u32,
        cell: &Arc<Mutex<Value>>,
    ) -> Result<(), AccessError> {
        let entry = self.lookup_mut(id).ok_or(AccessError::NotFound(id))?;
        entry.binding.bind_cell(cell);
        debug!(id, "value cell bound");
        Ok(())
    }

    pub fn bind_get_accessor(&mut self, id: u32, accessor: GetAccessor) -> Result<(), AccessError> {
        let entry = self.lookup_mut(id).ok_or(AccessError::NotFound(id))?;
        entry.binding.bind_get(accessor);
        debug!(id, "get accessor bound");
        Ok(())
    }

    pub fn bind_set_accessor(&mut self, id: u32, accessor: SetAccessor) -> Result<(), AccessError> {
        let entry = self.lookup_mut(id).ok_or(AccessError::NotFound(id))?;
        entry.binding.bind_set(accessor);
        debug!(id, "set accessor bound");
        Ok(())
    }

    /// Remove the cell and both accessors for an entry.
    pub fn clear_binding(&mut self, id: u32) -> Result<(), AccessError> {
        let entry = self.lookup_mut(id).ok_or(AccessError::NotFound(id))?;
        entry.binding.clear();
        Ok(())
    }
}


/// Recursive document walk. `parent` is the slash-joined ancestor chain
/// ("" at the root); leaves are staged, branches recursed into.
fn walk(name: &str, parent: &str, node: &Json, staged: &mut Vec<StagedEntry>) {
    let Some(obj) = node.as_object() else {
        return;
    };
    let path = if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    };

    if document::is_leaf(obj) {
        let Some(id) = document::leaf_id(obj) else {
            warn!(path = %path, "leaf with unusable id field skipped");
            return;
        };
        staged.push(StagedEntry {
            id,
            name: name.to_string(),
            path,
            limit: document::leaf_limit(obj),
            value: obj.get(VALUE_FIELD).and_then(Value::from_json),
            enum_table_name: obj
                .get(document::ENUM_FIELD)
                .and_then(Json::as_str)
                .map(str::to_string),
        });
        return;
    }

    for (child_name, child) in obj {
        walk(child_name, &path, child, staged);
    }
}
