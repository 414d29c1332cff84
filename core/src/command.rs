//! Command — the typed surface for all `prm` CLI operations.
//!
//! Every operation the binary can perform is a variant here; `cli::parse_args`
//! produces them from raw arguments, and the binary dispatches on them.
//! There is no wire protocol — the registry is local and passive, so each
//! command is a one-shot load/operate/(save) pass over document files.

use crate::types::access::{Permission, Role};


/// A typed command for the `prm` binary.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// List all entries by ascending id.
    List {
        limits: String,
        values: Option<String>,
    },

    /// Render the parameter hierarchy as an indented tree.
    Tree {
        limits: String,
        values: Option<String>,
    },

    /// Gated read of one entry's cached value.
    Get {
        limits: String,
        values: Option<String>,
        id: u32,
        role: Role,
    },

    /// Gated write of one entry's cached value, saved back to the values
    /// document.
    Set {
        limits: String,
        values: String,
        id: u32,
        value: String,
        role: Role,
    },

    /// Query the access gate for one entry.
    Check {
        limits: String,
        id: u32,
        permission: Permission,
        role: Role,
    },

    /// Launch the interactive tree browser.
    Tui {
        limits: String,
        values: Option<String>,
    },

    /// Print usage.
    Help,
}
