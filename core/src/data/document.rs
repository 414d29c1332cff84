//! Hierarchical document adapter.
//!
//! Limits and values documents share one shape: a nested JSON object tree
//! where a node carrying the identity marker field `"id"` is a leaf and
//! every other object is a branch of named children. The marker decides
//! leaf-or-branch on its own — a leaf stays a leaf even if it also
//! contains nested objects.
//!
//! Leaf fields: `"id"` (integer, required), `"limit"` (octal string or
//! literal integer), `"value"` (scalar), `"enum_table"` (table name).
//! The top-level sibling field `"enum_tables"` holds the named label→value
//! tables and is skipped by tree walks.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as Json};

use crate::error::DocError;
use crate::types::access::Limit;

pub const ID_FIELD: &str = "id";
pub const LIMIT_FIELD: &str = "limit";
pub const VALUE_FIELD: &str = "value";
pub const ENUM_FIELD: &str = "enum_table";
pub const TABLES_FIELD: &str = "enum_tables";


/// A parsed parameter document (limits or values flavor).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Json,
}

impl Document {
    /// Parse a document from raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Document, serde_json::Error> {
        serde_json::from_slice(bytes).map(|root| Document { root })
    }

    /// Read and parse a document file.
    pub fn read(path: &Path) -> Result<Document, DocError> {
        let bytes = fs::read(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Document::parse(&bytes).map_err(|source| DocError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize (pretty) and write the document.
    pub fn write(&self, path: &Path) -> Result<(), DocError> {
        let text =
            serde_json::to_string_pretty(&self.root).map_err(|source| DocError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, text).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}


/// A node carrying the identity marker is a leaf, regardless of its shape.
pub fn is_leaf(node: &Map<String, Json>) -> bool {
    node.contains_key(ID_FIELD)
}

/// The leaf's identity, if the marker field is a usable integer.
/// Out-of-range ids are rejected like non-integer ids.
pub fn leaf_id(node: &Map<String, Json>) -> Option<u32> {
    node.get(ID_FIELD)
        .and_then(Json::as_u64)
        .and_then(|id| u32::try_from(id).ok())
}

/// Parse a leaf's limit field: octal string, or integer taken as literal bits.
pub fn leaf_limit(node: &Map<String, Json>) -> Option<Limit> {
    match node.get(LIMIT_FIELD)? {
        Json::String(s) => Limit::from_octal(s),
        Json::Number(n) => n
            .as_u64()
            .and_then(|bits| u32::try_from(bits).ok())
            .map(Limit),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn obj(json: Json) -> Map<String, Json> {
        json.as_object().unwrap().clone()
    }

    #[test]
    fn marker_decides_leaf() {
        assert!(is_leaf(&obj(serde_json::json!({"id": 1, "limit": "644"}))));
        assert!(!is_leaf(&obj(serde_json::json!({"speed": {"id": 1}}))));
        // Marker wins even with nested objects present.
        assert!(is_leaf(&obj(
            serde_json::json!({"id": 1, "nested": {"x": 1}})
        )));
    }

    #[test]
    fn leaf_id_requires_integer() {
        assert_eq!(leaf_id(&obj(serde_json::json!({"id": 7}))), Some(7));
        assert_eq!(leaf_id(&obj(serde_json::json!({"id": "7"}))), None);
    }

    #[test]
    fn leaf_id_rejects_out_of_range() {
        assert_eq!(
            leaf_id(&obj(serde_json::json!({"id": u32::MAX}))),
            Some(u32::MAX)
        );
        // u32::MAX + 2 must not wrap onto id 1.
        assert_eq!(leaf_id(&obj(serde_json::json!({"id": 4294967297u64}))), None);
        assert_eq!(leaf_id(&obj(serde_json::json!({"id": -1}))), None);
    }

    #[test]
    fn leaf_limit_octal_and_literal() {
        assert_eq!(
            leaf_limit(&obj(serde_json::json!({"limit": "644"}))),
            Some(Limit(0o644))
        );
        assert_eq!(
            leaf_limit(&obj(serde_json::json!({"limit": 4}))),
            Some(Limit(4))
        );
        assert_eq!(leaf_limit(&obj(serde_json::json!({"limit": "8"}))), None);
        assert_eq!(leaf_limit(&obj(serde_json::json!({"id": 1}))), None);
        // Oversized literal yields None, never truncated bits.
        assert_eq!(
            leaf_limit(&obj(serde_json::json!({"limit": 4294967297u64}))),
            None
        );
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Document::parse(b"{not json").is_err());
        assert!(Document::parse(b"{\"a\": 1}").is_ok());
    }

    #[test]
    fn serialize_error_is_not_labelled_parse() {
        let source = serde_json::from_slice::<Json>(b"{bad").unwrap_err();
        let err = DocError::Serialize {
            path: Path::new("out.json").to_path_buf(),
            source,
        };
        assert!(err.to_string().starts_with("cannot serialize document"));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = Document::read(Path::new("/nonexistent/prm_doc.json")).unwrap_err();
        assert!(matches!(err, DocError::Io { .. }));
    }
}
