//! Keyboard handling: key events to controller actions.
//!
//! Overlays capture input while visible: prompts edit their buffer, the
//! reset confirmation waits for y/n, and blocking notices dismiss on any
//! key. Only when no overlay is up do the normal-mode bindings apply.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Overlay, PromptKind};
use crate::models::View;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.overlay.clone() {
        Overlay::Prompt { kind, input } => handle_prompt_key(app, kind, input, key),
        Overlay::ConfirmReset => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
            _ => app.overlay = Overlay::None,
        },
        Overlay::Error(_) | Overlay::Info(_) => app.overlay = Overlay::None,
        Overlay::None => handle_normal_key(app, key),
    }
}

fn handle_prompt_key(app: &mut App, kind: PromptKind, mut input: String, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.overlay = Overlay::None,
        KeyCode::Enter => {
            app.overlay = Overlay::None;
            match kind {
                PromptKind::Search => app.set_search(input),
                PromptKind::ImportPath => app.import_from_path(&input),
            }
        }
        KeyCode::Backspace => {
            input.pop();
            app.overlay = Overlay::Prompt { kind, input };
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.push(c);
            app.overlay = Overlay::Prompt { kind, input };
        }
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Char('q') => app.should_quit = true,

        // View selection: exactly one view visible at a time
        KeyCode::Char('1') => app.select_view(View::Topics),
        KeyCode::Char('2') => app.select_view(View::Table),
        KeyCode::Char('3') => app.select_view(View::Stats),
        KeyCode::Tab => app.select_view(app.view.next()),
        KeyCode::BackTab => app.select_view(app.view.prev()),

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Enter => app.toggle_collapse(),

        // Progress
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('r') => app.request_reset(),
        KeyCode::Char('e') => app.export_progress(),
        KeyCode::Char('i') => {
            app.overlay = Overlay::Prompt {
                kind: PromptKind::ImportPath,
                input: String::new(),
            }
        }

        // Filters and sorting (table view)
        KeyCode::Char('/') => {
            app.overlay = Overlay::Prompt {
                kind: PromptKind::Search,
                input: app.filters.search.clone(),
            }
        }
        KeyCode::Char('t') => app.cycle_topic_filter(),
        KeyCode::Char('d') => app.cycle_difficulty_filter(),
        KeyCode::Char('f') => app.cycle_status_filter(),
        KeyCode::Char('s') => app.cycle_sort_key(),
        KeyCode::Char('o') => app.flip_sort_dir(),
        KeyCode::Char('x') => app.clear_filters(),

        // Misc
        KeyCode::Char('c') => app.test_celebration(),
        KeyCode::Char('n') => app.dismiss_notice(),
        _ => {}
    }
}
