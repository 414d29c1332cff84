//! prm-tui — interactive tree browser over the parameter registry.
//!
//! Renders the registry's entries as an expandable hierarchy rebuilt from
//! their paths, with a detail pane for the selected parameter (id, value,
//! octal limit plus per-role permission matrix, enum table). Read-only:
//! the browser works from a snapshot and performs no registry writes.
//!
//! # Modules
//!
//! - [`app`] — tree state machine (rows, expand/collapse, selection)
//! - [`render`] — frame layout and widgets
//! - [`tui`] — terminal setup, event loop, teardown

pub mod app;
pub mod render;
pub mod tui;
