//! Topics view: collapsible topic groups with per-topic progress.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, TopicEntry};
use crate::theme::{
    BG_SECONDARY, BORDER_SUBTLE, CYAN_PRIMARY, GREEN_SUCCESS, ROUNDED_BORDERS, TEXT_MUTED,
    TEXT_PRIMARY,
};
use crate::ui::helpers::{badge, difficulty_badge, progress_bar, scroll_offset, truncate};

pub fn render_topics(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Topics ")
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(app.topics_entries.len());
    for (i, entry) in app.topics_entries.iter().enumerate() {
        let selected = i == app.topics_selected;
        let line = match entry {
            TopicEntry::Header {
                topic,
                done,
                total,
                percent,
                collapsed,
            } => header_line(topic, *done, *total, *percent, *collapsed, inner.width),
            TopicEntry::Row(index) => {
                let problem = &app.problems[*index];
                let done = app.store.is_done(&problem.id);
                let marker = if done { "[x]" } else { "[ ]" };
                let title_style = if done {
                    Style::default().fg(TEXT_MUTED).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(TEXT_PRIMARY)
                };
                Line::from(vec![
                    Span::styled(
                        format!("  {marker} "),
                        Style::default().fg(if done { GREEN_SUCCESS } else { TEXT_MUTED }),
                    ),
                    Span::styled(
                        truncate(&problem.title, inner.width.saturating_sub(30) as usize),
                        title_style,
                    ),
                    Span::raw(" "),
                    difficulty_badge(&problem.difficulty),
                    badge(&problem.topic),
                ])
            }
        };
        if selected {
            lines.push(line.style(Style::default().bg(BG_SECONDARY)));
        } else {
            lines.push(line);
        }
    }

    let offset = scroll_offset(app.topics_selected, inner.height as usize);
    let paragraph = Paragraph::new(lines).scroll((offset as u16, 0));
    frame.render_widget(paragraph, inner);
}

fn header_line(
    topic: &str,
    done: usize,
    total: usize,
    percent: u8,
    collapsed: bool,
    width: u16,
) -> Line<'static> {
    let arrow = if collapsed { "▸" } else { "▾" };
    let bar_width = if width > 60 { 12 } else { 6 };
    Line::from(vec![
        Span::styled(
            format!("{arrow} {} ", truncate(topic, 28)),
            Style::default()
                .fg(CYAN_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{done}/{total} "), Style::default().fg(TEXT_MUTED)),
        Span::styled(
            progress_bar(percent, bar_width),
            Style::default().fg(CYAN_PRIMARY),
        ),
    ])
}
