//! Frame rendering for the parameter tree browser.

use param_registry_core::{Permission, Role};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::app::App;


/// Render one frame: the tree on the left, entry detail on the right.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(frame.area());

    render_tree(frame, chunks[0], app);
    render_detail(frame, chunks[1], app);
}


fn render_tree(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .rows()
        .iter()
        .map(|row| {
            let marker = if row.is_branch {
                if row.expanded {
                    "▾ "
                } else {
                    "▸ "
                }
            } else {
                "  "
            };
            let line = format!("{}{}{}", "  ".repeat(row.depth), marker, row.label);
            let style = if row.is_branch {
                Style::default().bold()
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Parameters  (↑/↓ move, space toggle, q quit)"),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}


fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    match app.selected_entry() {
        Some(entry) => {
            lines.push(Line::from(vec![
                Span::styled("Path   ", Style::default().bold()),
                Span::raw(entry.path.clone()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Id     ", Style::default().bold()),
                Span::raw(entry.id.to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Value  ", Style::default().bold()),
                Span::raw(format!("{} ({})", entry.value, entry.value.kind())),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Limit  ", Style::default().bold()),
                Span::raw(entry.limit.to_string()),
            ]));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Permissions",
                Style::default().bold(),
            )));
            for role in Role::MASKED {
                lines.push(Line::from(format!(
                    "  {:<10} {}{}",
                    role.label(),
                    if entry.limit.allows(role, Permission::Read) { "r" } else { "-" },
                    if entry.limit.allows(role, Permission::Write) { "w" } else { "-" },
                )));
            }
            lines.push(Line::from("  superroot  rw"));

            if let Some(name) = &entry.enum_table_name {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("Enum table '{}'", name),
                    Style::default().bold(),
                )));
                if entry.enum_table.is_empty() {
                    lines.push(Line::from("  (empty)"));
                }
                for (label, value) in &entry.enum_table {
                    lines.push(Line::from(format!("  {} = {}", label, value)));
                }
            }
        }
        None => {
            lines.push(Line::from("Select a parameter to see its details."));
        }
    }

    let detail = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Detail"));
    frame.render_widget(detail, area);
}
