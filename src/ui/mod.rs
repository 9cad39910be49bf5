//! UI module for grind-tui
//!
//! This module contains the ratatui rendering adapters for the three views,
//! the tab bar, the notice banner, and the modal overlays. All of them read
//! the view models cached on `App`; none of them mutate state.

mod helpers;
mod overlay;
mod stats;
mod table;
mod topics;

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Tabs},
};

use crate::app::App;
use crate::models::View;
use crate::theme::{AMBER_WARNING, BG_SECONDARY, CYAN_PRIMARY, TEXT_MUTED, TEXT_SECONDARY};

const KEY_HINTS: &str =
    " q quit | Tab view | j/k move | Space toggle | Enter fold | / search | t/d/f filter | s/o sort | e export | i import | r reset ";

/// Draw one full frame: tab bar, optional notice, active view, the selected
/// problem's link, hint bar, then any modal overlay and celebration
/// particles on top.
pub fn render(app: &App, frame: &mut Frame) {
    let has_notice = app.notice.is_some();
    let link = app.selected_link();

    let mut constraints = vec![Constraint::Length(1)];
    if has_notice {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(3));
    if link.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(1));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_top_bar(app, frame, layout[0]);

    let mut next = 1;
    if has_notice {
        render_notice(app, frame, layout[next]);
        next += 1;
    }

    let content = layout[next];
    match app.view {
        View::Topics => topics::render_topics(app, frame, content),
        View::Table => table::render_table(app, frame, content),
        View::Stats => stats::render_stats(app, frame, content),
    }
    next += 1;

    if let Some(link) = link {
        let line = Paragraph::new(format!(" ↗ {link}")).style(Style::default().fg(TEXT_MUTED));
        frame.render_widget(line, layout[next]);
        next += 1;
    }

    let hints = Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::Black).bg(CYAN_PRIMARY));
    frame.render_widget(hints, layout[next]);

    overlay::render_overlay(app, frame);
    app.celebration.render(frame);
}

fn render_top_bar(app: &App, frame: &mut Frame, area: Rect) {
    let bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(area);

    let titles: Vec<Line> = [View::Topics, View::Table, View::Stats]
        .iter()
        .map(|v| Line::from(v.label()))
        .collect();
    let selected = match app.view {
        View::Topics => 0,
        View::Table => 1,
        View::Stats => 2,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(TEXT_SECONDARY))
        .highlight_style(
            Style::default()
                .fg(CYAN_PRIMARY)
                .bg(BG_SECONDARY)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, bar[0]);

    let points = Paragraph::new(format!("{:.0} pts ", app.store.points()))
        .style(Style::default().fg(CYAN_PRIMARY))
        .alignment(Alignment::Right);
    frame.render_widget(points, bar[1]);
}

fn render_notice(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(notice) = &app.notice {
        let banner = Paragraph::new(format!(" {notice} (n dismisses)"))
            .style(Style::default().fg(AMBER_WARNING).bg(BG_SECONDARY));
        frame.render_widget(banner, area);
    } else {
        frame.render_widget(
            Paragraph::new("").style(Style::default().fg(TEXT_MUTED)),
            area,
        );
    }
}
