use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, FilterField, Mode};
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Internal two-key prefix state used for `dd` handling.
    pub pending_dd: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_pending(&mut self) {
        self.pending_gg = false;
        self.pending_dd = false;
    }
}

/// Main terminal event loop: draws the UI and handles input. Returns `Ok(())`
/// when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press to `app`. Returns `true` when the user asked to quit.
pub fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    match app.mode {
        Mode::Filter(_) => {
            state.clear_pending();
            handle_filter_key(key, app);
            false
        }
        Mode::AddTrack => {
            state.clear_pending();
            handle_add_form_key(key, app);
            false
        }
        Mode::ConfirmReset => {
            state.clear_pending();
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                app.confirm_reset();
            } else {
                app.cancel_reset();
            }
            false
        }
        Mode::Browse => handle_browse_key(key, app, state),
    }
}

fn handle_filter_key(key: KeyEvent, app: &mut App) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.clear_filter_field(),
        KeyCode::Enter => app.exit_filter_mode(),
        KeyCode::Tab => app.cycle_filter_field(),
        KeyCode::Backspace => app.pop_filter_char(),
        KeyCode::Char('j') | KeyCode::Char('n') if ctrl => app.next(),
        KeyCode::Char('k') | KeyCode::Char('p') if ctrl => app.prev(),
        KeyCode::Char(c) if !c.is_control() => app.push_filter_char(c),
        _ => {}
    }
}

fn handle_add_form_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.cancel_add_form(),
        KeyCode::Enter => {
            app.submit_draft();
        }
        KeyCode::Tab | KeyCode::Down => app.draft.focus = app.draft.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.draft.focus = app.draft.focus.prev(),
        KeyCode::Backspace => app.draft.pop_char(),
        KeyCode::Char(c) if !c.is_control() => app.draft.push_char(c),
        _ => {}
    }
}

fn handle_browse_key(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    app.clear_notice();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            state.pending_dd = false;
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
            return false;
        }
        KeyCode::Char('d') if app.can_mutate() => {
            state.pending_gg = false;
            if state.pending_dd {
                state.pending_dd = false;
                app.delete_selected();
            } else {
                state.pending_dd = true;
            }
            return false;
        }
        _ => {}
    }

    // Any other key cancels a pending `gg` / `dd`.
    state.clear_pending();

    match key.code {
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('/') => app.enter_filter_mode(FilterField::Search),
        KeyCode::Char('a') => app.enter_filter_mode(FilterField::Artist),
        KeyCode::Char('b') => app.enter_filter_mode(FilterField::Album),
        KeyCode::Char('c') | KeyCode::Esc => app.clear_filters(),
        KeyCode::Char('s') => app.cycle_sort_key(),
        KeyCode::Char('S') => app.toggle_sort_direction(),
        KeyCode::Char('v') => app.cycle_group_by(),
        KeyCode::Char('K') => app.toggle_metadata_window(),
        KeyCode::Char('o') => app.open_add_form(),
        KeyCode::Char('R') => app.request_reset(),
        _ => {}
    }

    false
}
