//! Indented tree rendering of the registry contents for `prm tree`.
//!
//! Rebuilds the hierarchy from entry paths (the registry itself is flat)
//! and renders it with box-drawing connectors.

use std::collections::BTreeMap;

use param_registry_core::EntrySnapshot;


#[derive(Default)]
struct Node<'a> {
    children: BTreeMap<&'a str, Node<'a>>,
    entry: Option<&'a EntrySnapshot>,
}

/// Render the entries as a tree rooted at their common document root.
pub fn render_tree(entries: &[EntrySnapshot]) -> String {
    let mut root = Node::default();
    for entry in entries {
        let mut node = &mut root;
        for part in entry.path.split('/') {
            node = node.children.entry(part).or_default();
        }
        node.entry = Some(entry);
    }

    let mut out = String::new();
    render_children(&root, "", &mut out);
    out
}

fn render_children(node: &Node, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (i, (name, child)) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(name);
        if let Some(entry) = child.entry {
            out.push_str(&format!(
                "  (id {}) = {}  [limit {}]",
                entry.id, entry.value, entry.limit
            ));
        }
        out.push('\n');
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(child, &child_prefix, out);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use param_registry_core::{Limit, Value};
    use std::collections::BTreeMap;

    fn snap(id: u32, path: &str, value: Value) -> EntrySnapshot {
        EntrySnapshot {
            id,
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            limit: Limit(0o644),
            value,
            enum_table_name: None,
            enum_table: BTreeMap::new(),
        }
    }

    #[test]
    fn renders_nested_paths() {
        let entries = vec![
            snap(1, "motor/speed", Value::Int(100)),
            snap(2, "motor/torque", Value::Float(5.5)),
            snap(3, "version", Value::Str("1.0".into())),
        ];
        let out = render_tree(&entries);
        assert!(out.contains("motor"));
        assert!(out.contains("├── speed  (id 1) = 100  [limit 644]"));
        assert!(out.contains("└── torque  (id 2) = 5.5  [limit 644]"));
        assert!(out.contains("version  (id 3) = 1.0"));
    }

    #[test]
    fn empty_registry_renders_empty() {
        assert_eq!(render_tree(&[]), "");
    }

    #[test]
    fn branches_sorted_by_name() {
        let entries = vec![
            snap(1, "b/x", Value::Int(1)),
            snap(2, "a/y", Value::Int(2)),
        ];
        let out = render_tree(&entries);
        let a = out.find("a\n").or_else(|| out.find("── a")).unwrap();
        let b = out.find("── b").unwrap();
        assert!(a < b);
    }
}
