//! Stats view: overall progress plus difficulty and topic breakdowns.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::App;
use crate::query::Breakdown;
use crate::theme::{
    BG_SECONDARY, BORDER_SUBTLE, CYAN_PRIMARY, GREEN_SUCCESS, ROUNDED_BORDERS, TEXT_MUTED,
    TEXT_PRIMARY,
};
use crate::ui::helpers::{progress_bar, truncate};

pub fn render_stats(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Stats ")
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Stat cards
            Constraint::Length(1), // Overall gauge
            Constraint::Min(1),    // Breakdowns
        ])
        .split(inner);

    render_stat_cards(app, frame, layout[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(CYAN_PRIMARY).bg(BG_SECONDARY))
        .percent(app.stats.percent as u16)
        .label(format!(
            "{}/{} ({}%)",
            app.stats.done, app.stats.total, app.stats.percent
        ));
    frame.render_widget(gauge, layout[1]);

    let breakdowns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[2]);

    render_breakdown(
        "By Difficulty",
        &app.stats.by_difficulty,
        frame,
        breakdowns[0],
    );
    render_breakdown("By Topic", &app.stats.by_topic, frame, breakdowns[1]);
}

/// Completed and points cards side by side
fn render_stat_cards(app: &App, frame: &mut Frame, area: Rect) {
    let card_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let completed_color = if app.stats.percent == 100 {
        GREEN_SUCCESS
    } else {
        CYAN_PRIMARY
    };
    render_card(
        format!("{}/{}", app.stats.done, app.stats.total),
        "COMPLETED",
        completed_color,
        frame,
        card_layout[0],
    );
    render_card(
        format!("{:.0}", app.store.points()),
        "POINTS",
        CYAN_PRIMARY,
        frame,
        card_layout[1],
    );
}

fn render_card(value: String, label: &'static str, color: Color, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_SECONDARY));

    let content = vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label, Style::default().fg(TEXT_MUTED))),
    ];

    let paragraph = Paragraph::new(content)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_breakdown(title: &'static str, rows: &[Breakdown], frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        title,
        Style::default()
            .fg(CYAN_PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))];
    for row in rows {
        let percent = crate::query::percent_of(row.done, row.total);
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<24}", truncate(&row.label, 22)),
                Style::default().fg(TEXT_PRIMARY),
            ),
            Span::styled(
                format!("{}/{} ", row.done, row.total),
                Style::default().fg(TEXT_MUTED),
            ),
            Span::styled(progress_bar(percent, 8), Style::default().fg(CYAN_PRIMARY)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
