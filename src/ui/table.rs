//! All-problems view: a flat, filterable, sortable table.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::theme::{
    BG_SECONDARY, BORDER_SUBTLE, GREEN_SUCCESS, ROUNDED_BORDERS, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::ui::helpers::{badge, difficulty_badge, scroll_offset, truncate};

pub fn render_table(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" All Problems ({}) ", app.table_rows.len()))
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filter/sort summary
            Constraint::Min(1),    // Rows
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(filter_summary(app)).style(Style::default().fg(TEXT_MUTED)),
        layout[0],
    );

    let rows_area = layout[1];
    let mut lines: Vec<Line> = Vec::with_capacity(app.table_rows.len());
    for (i, index) in app.table_rows.iter().enumerate() {
        let problem = &app.problems[*index];
        let done = app.store.is_done(&problem.id);
        let marker = if done { "[x]" } else { "[ ]" };
        let title_style = if done {
            Style::default().fg(TEXT_MUTED)
        } else {
            Style::default().fg(TEXT_PRIMARY)
        };
        let line = Line::from(vec![
            Span::styled(
                format!("{marker} "),
                Style::default().fg(if done { GREEN_SUCCESS } else { TEXT_MUTED }),
            ),
            Span::styled(
                format!(
                    "{:<40}",
                    truncate(&problem.title, rows_area.width.saturating_sub(35) as usize)
                ),
                title_style,
            ),
            difficulty_badge(&problem.difficulty),
            badge(&problem.topic),
        ]);
        if i == app.table_selected {
            lines.push(line.style(Style::default().bg(BG_SECONDARY)));
        } else {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No problems match the active filters (x clears them).",
            Style::default().fg(TEXT_MUTED),
        )));
    }

    let offset = scroll_offset(app.table_selected, rows_area.height as usize);
    frame.render_widget(Paragraph::new(lines).scroll((offset as u16, 0)), rows_area);
}

/// One-line description of active filters and the sort order
fn filter_summary(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();
    let search = app.filters.search.trim();
    if !search.is_empty() {
        parts.push(format!("search:\"{search}\""));
    }
    if let Some(topic) = &app.filters.topic {
        parts.push(format!("topic:{topic}"));
    }
    if let Some(difficulty) = &app.filters.difficulty {
        parts.push(format!("difficulty:{difficulty}"));
    }
    if let Some(status) = app.filters.status {
        parts.push(format!("status:{}", status.label()));
    }
    let filters = if parts.is_empty() {
        "no filters".to_string()
    } else {
        parts.join("  ")
    };
    format!(
        " {filters}  |  sort: {} {}",
        app.sort_key.label(),
        app.sort_dir.label()
    )
}
