//! Error taxonomies for document I/O and gated parameter access.
//!
//! Everything here is reported to the immediate caller; nothing is
//! escalated to a panic. A failed load never leaves the registry in a
//! partially-updated state.

use std::path::PathBuf;

use thiserror::Error;


/// Failures while reading, parsing, or writing parameter documents.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize document {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Save was requested before any document had been loaded, so there
    /// is no tree to write values back into.
    #[error("no document loaded to save from")]
    NoDocument,
}


/// Failures on the gated get/set surface.
///
/// The variants are pairwise distinct so callers can message the user
/// correctly: an unknown id is not a denial, and a missing live source is
/// neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("parameter {0} not found")]
    NotFound(u32),

    #[error("permission denied for parameter {0}")]
    Denied(u32),

    /// Live get/set was attempted but no accessor or value cell of the
    /// needed kind is bound (or the bound cell has been dropped).
    #[error("parameter {0} has no live source bound")]
    Unbound(u32),

    /// A bound accessor or cell exists but reported failure.
    #[error("live accessor for parameter {0} failed")]
    Accessor(u32),
}
