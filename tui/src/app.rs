//! Tree browser state machine.
//!
//! The `App` owns the entry snapshots and tracks what the user is looking
//! at; it performs no I/O and draws nothing. Visible rows are rebuilt from
//! entry paths whenever a branch is toggled.

use std::collections::BTreeSet;

use param_registry_core::EntrySnapshot;


/// A key press, already mapped from the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Toggle,
    Quit,
    Other,
}


/// One visible row of the tree view.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub depth: usize,
    pub label: String,
    pub path: String,
    /// Index into the entry list for leaf rows.
    pub entry_index: Option<usize>,
    pub is_branch: bool,
    pub expanded: bool,
}


pub struct App {
    entries: Vec<EntrySnapshot>,
    collapsed: BTreeSet<String>,
    rows: Vec<Row>,
    pub selected: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(entries: Vec<EntrySnapshot>) -> Self {
        let mut app = App {
            entries,
            collapsed: BTreeSet::new(),
            rows: Vec::new(),
            selected: 0,
            should_quit: false,
        };
        app.rebuild();
        app
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The entry behind the selected row, if it is a leaf.
    pub fn selected_entry(&self) -> Option<&EntrySnapshot> {
        self.rows
            .get(self.selected)
            .and_then(|row| row.entry_index)
            .map(|i| &self.entries[i])
    }

    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Toggle => self.toggle(),
            Key::Quit => self.should_quit = true,
            Key::Other => {}
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    /// Collapse or expand the selected branch. Leaves are unaffected.
    pub fn toggle(&mut self) {
        let Some(row) = self.rows.get(self.selected) else {
            return;
        };
        if !row.is_branch {
            return;
        }
        let path = row.path.clone();
        if !self.collapsed.remove(&path) {
            self.collapsed.insert(path);
        }
        self.rebuild();
    }

    /// Rebuild the visible rows from entry paths, in path order, skipping
    /// everything beneath a collapsed branch.
    fn rebuild(&mut self) {
        self.rows.clear();

        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[a].path.cmp(&self.entries[b].path));

        let mut seen = BTreeSet::new();
        for idx in order {
            let parts: Vec<String> = self.entries[idx]
                .path
                .split('/')
                .map(str::to_string)
                .collect();
            for depth in 0..parts.len() {
                let node_path = parts[..=depth].join("/");
                let is_leaf = depth == parts.len() - 1;
                if !is_leaf && !seen.insert(node_path.clone()) {
                    continue;
                }
                if self.hidden(&node_path) {
                    continue;
                }
                self.rows.push(Row {
                    depth,
                    label: parts[depth].clone(),
                    path: node_path.clone(),
                    entry_index: is_leaf.then_some(idx),
                    is_branch: !is_leaf,
                    expanded: !self.collapsed.contains(&node_path),
                });
            }
        }

        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    /// A node is hidden if any proper ancestor is collapsed.
    fn hidden(&self, path: &str) -> bool {
        let mut ancestor = String::new();
        for part in path.split('/') {
            if !ancestor.is_empty() && self.collapsed.contains(&ancestor) {
                return true;
            }
            if ancestor.is_empty() {
                ancestor = part.to_string();
            } else {
                ancestor = format!("{}/{}", ancestor, part);
            }
        }
        false
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use param_registry_core::{Limit, Value};
    use std::collections::BTreeMap;

    fn snap(id: u32, path: &str) -> EntrySnapshot {
        EntrySnapshot {
            id,
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            limit: Limit(0o644),
            value: Value::Int(id as i64),
            enum_table_name: None,
            enum_table: BTreeMap::new(),
        }
    }

    fn motor_app() -> App {
        App::new(vec![
            snap(1, "motor/speed"),
            snap(2, "motor/torque"),
            snap(3, "version"),
        ])
    }

    #[test]
    fn rows_cover_branches_and_leaves() {
        let app = motor_app();
        let labels: Vec<&str> = app.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["motor", "speed", "torque", "version"]);
        assert!(app.rows()[0].is_branch);
        assert_eq!(app.rows()[1].depth, 1);
        assert_eq!(app.rows()[1].entry_index, Some(0));
    }

    #[test]
    fn collapse_hides_subtree() {
        let mut app = motor_app();
        app.selected = 0; // "motor"
        app.toggle();
        let labels: Vec<&str> = app.rows().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["motor", "version"]);
        assert!(!app.rows()[0].expanded);

        app.toggle();
        assert_eq!(app.rows().len(), 4);
    }

    #[test]
    fn toggle_on_leaf_is_noop() {
        let mut app = motor_app();
        app.selected = 1; // "speed"
        app.toggle();
        assert_eq!(app.rows().len(), 4);
    }

    #[test]
    fn navigation_clamps_at_edges() {
        let mut app = motor_app();
        app.move_up();
        assert_eq!(app.selected, 0);
        for _ in 0..10 {
            app.move_down();
        }
        assert_eq!(app.selected, 3);
    }

    #[test]
    fn selected_entry_only_for_leaves() {
        let mut app = motor_app();
        app.selected = 0;
        assert!(app.selected_entry().is_none());
        app.selected = 2;
        assert_eq!(app.selected_entry().unwrap().id, 2);
    }

    #[test]
    fn quit_key_sets_flag() {
        let mut app = motor_app();
        app.handle_key(Key::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn empty_registry_has_no_rows() {
        let app = App::new(Vec::new());
        assert!(app.rows().is_empty());
        assert!(app.selected_entry().is_none());
    }
}
