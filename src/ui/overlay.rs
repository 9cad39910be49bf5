//! Modal overlays: notices, confirmations, and text prompts.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Overlay, PromptKind};
use crate::theme::{
    AMBER_WARNING, BG_PRIMARY, CYAN_PRIMARY, RED_ERROR, ROUNDED_BORDERS, TEXT_PRIMARY,
    TEXT_SECONDARY,
};

pub fn render_overlay(app: &App, frame: &mut Frame) {
    match &app.overlay {
        Overlay::None => {}
        Overlay::ConfirmReset => modal(
            frame,
            " Reset Progress ",
            "Reset your progress and points?\n\ny: yes    any other key: cancel",
            AMBER_WARNING,
        ),
        Overlay::Error(message) => modal(
            frame,
            " Error ",
            &format!("{message}\n\npress any key"),
            RED_ERROR,
        ),
        Overlay::Info(message) => modal(
            frame,
            " Notice ",
            &format!("{message}\n\npress any key"),
            CYAN_PRIMARY,
        ),
        Overlay::Prompt { kind, input } => {
            let title = match kind {
                PromptKind::Search => " Search titles ",
                PromptKind::ImportPath => " Import file path ",
            };
            prompt(frame, title, input);
        }
    }
}

fn modal(frame: &mut Frame, title: &str, body: &str, accent: Color) {
    let area = centered_rect(frame.area(), 50, 20);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(BG_PRIMARY));
    let paragraph = Paragraph::new(body.to_string())
        .block(block)
        .style(Style::default().fg(TEXT_PRIMARY))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn prompt(frame: &mut Frame, title: &str, input: &str) {
    let area = centered_rect(frame.area(), 60, 12);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(CYAN_PRIMARY))
        .style(Style::default().bg(BG_PRIMARY));
    let content = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(CYAN_PRIMARY)),
            Span::styled(input.to_string(), Style::default().fg(TEXT_PRIMARY)),
            Span::styled("█", Style::default().fg(CYAN_PRIMARY)),
        ]),
        Line::from(Span::styled(
            "Enter: confirm    Esc: cancel",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];
    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Centered rectangle taking the given percentages of the frame
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
