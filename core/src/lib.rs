//! Parameter registry core — typed, access-controlled parameter storage.
//!
//! The registry is a flat, id-indexed collection of [`ParamEntry`] records
//! loaded from hierarchical JSON documents. Every externally-facing read and
//! write passes through a role/permission gate; entries may additionally be
//! bound to a live external value source (a shared cell or caller-supplied
//! accessors) instead of the cached value.
//!
//! # Modules
//!
//! - [`types`] — scalar values, roles/permissions/limits, parameter entries
//! - [`data`] — document adapter, enum table store, bindings, the registry
//! - [`command`] — typed CLI command enum
//! - [`cli`] — CLI argument parsing
//! - [`error`] — document and access error taxonomies

pub mod cli;
pub mod command;
pub mod data;
pub mod error;
pub mod types;

pub use data::registry::ParamRegistry;
pub use error::{AccessError, DocError};
pub use types::access::{Limit, Permission, Role};
pub use types::entry::{EntrySnapshot, ParamEntry};
pub use types::value::Value;
