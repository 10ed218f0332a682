//! Keyboard input dispatch — global keys → overlays → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Overview; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Price; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Quakes; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Combined; return; }
        KeyCode::Char('5') => { app.active_panel = Panel::Table; return; }
        KeyCode::Char('6') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('r') => {
            app.request_refresh();
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Overview => handle_overview_key(app, key),
        Panel::Table => handle_table_key(app, key),
        // Display-only panels.
        Panel::Price | Panel::Quakes | Panel::Combined | Panel::Help => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

/// Overview: j/k select a control, h/l adjust it. Any adjustment triggers
/// a full re-fetch-and-recompute cycle.
fn handle_overview_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.control_cursor = (app.control_cursor + 1) % 2;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.control_cursor = (app.control_cursor + 1) % 2;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            adjust_control(app, -1.0);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            adjust_control(app, 1.0);
        }
        _ => {}
    }
}

fn adjust_control(app: &mut AppState, direction: f64) {
    let before = (app.controls.days, app.controls.min_magnitude);
    if app.control_cursor == 0 {
        app.controls.adjust_days(direction as i64);
    } else {
        app.controls.adjust_magnitude(direction);
    }
    if before != (app.controls.days, app.controls.min_magnitude) {
        app.request_refresh();
    }
}

fn handle_table_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app
        .snapshot
        .as_ref()
        .map(|s| s.aligned.len())
        .unwrap_or(0);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.table_scroll + 1 < row_count {
                app.table_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.table_scroll = app.table_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.table_scroll = 0;
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.table_scroll = row_count.saturating_sub(1);
        }
        _ => {}
    }
}
