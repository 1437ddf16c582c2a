use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::ui::app_state::{AppState, ViewMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    OpenPicker,
    Rename,
    Export,
}

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> InputAction {
    // Handle Ctrl+C globally
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return InputAction::Quit;
    }

    match state.view_mode {
        ViewMode::Normal => handle_normal_mode(key, state),
        ViewMode::EditDirectory | ViewMode::EditPrefix => handle_edit_mode(key, state),
        ViewMode::Picker => handle_picker_mode(key, state),
        ViewMode::Help => handle_help_mode(key, state),
        ViewMode::ErrorList => handle_error_list_mode(key, state),
    }
}

fn handle_normal_mode(key: KeyEvent, state: &mut AppState) -> InputAction {
    match key.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            InputAction::Quit
        }
        // The pending list belongs to the worker's run until it finishes
        KeyCode::Char('o') if !state.is_renaming() => InputAction::OpenPicker,
        KeyCode::Char('r') | KeyCode::Enter if !state.is_renaming() => InputAction::Rename,
        KeyCode::Char('d') => {
            state.start_edit_directory();
            InputAction::None
        }
        KeyCode::Char('p') => {
            state.start_edit_prefix();
            InputAction::None
        }
        KeyCode::Char('f') => {
            state.cycle_filter();
            InputAction::None
        }
        KeyCode::Char('e') => {
            state.toggle_error_list();
            InputAction::None
        }
        KeyCode::Char('?') => {
            state.toggle_help();
            InputAction::None
        }
        KeyCode::Char('x') => InputAction::Export,
        _ => InputAction::None,
    }
}

fn handle_edit_mode(key: KeyEvent, state: &mut AppState) -> InputAction {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => state.finish_edit(),
        KeyCode::Backspace => state.pop_char(),
        KeyCode::Char(c) => state.push_char(c),
        _ => {}
    }
    InputAction::None
}

fn handle_picker_mode(key: KeyEvent, state: &mut AppState) -> InputAction {
    match key.code {
        KeyCode::Enter => {
            state.confirm_picker();
            return InputAction::None;
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            state.cancel_picker();
            return InputAction::None;
        }
        _ => {}
    }

    let Some(picker) = state.picker.as_mut() else {
        return InputAction::None;
    };
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => picker.move_down(),
        KeyCode::Char('k') | KeyCode::Up => picker.move_up(),
        KeyCode::Char(' ') => {
            picker.toggle_current();
            picker.move_down();
        }
        KeyCode::Char('a') => picker.toggle_all(),
        KeyCode::Char('f') | KeyCode::Tab => picker.cycle_filter(),
        _ => {}
    }
    InputAction::None
}

fn handle_help_mode(key: KeyEvent, state: &mut AppState) -> InputAction {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.toggle_help();
            InputAction::None
        }
        _ => InputAction::None,
    }
}

fn handle_error_list_mode(key: KeyEvent, state: &mut AppState) -> InputAction {
    match key.code {
        KeyCode::Char('e') | KeyCode::Esc | KeyCode::Char('q') => {
            state.toggle_error_list();
            InputAction::None
        }
        _ => InputAction::None,
    }
}

pub fn poll_event(timeout: Duration) -> anyhow::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}
