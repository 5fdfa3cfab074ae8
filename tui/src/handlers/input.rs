use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use crate::state::{AppState, FOCUS_RESULTS, FOCUS_SEARCH};

/// Handles input events for the application
pub struct InputHandler;

impl InputHandler {
    /// Handle input events (keyboard and mouse)
    pub fn handle_event(state: &mut AppState, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::handle_key_event(state, key.code, key.modifiers);
            }
            Event::Mouse(mouse_event) => {
                Self::handle_mouse_event(state, mouse_event);
            }
            _ => {}
        }
    }

    fn handle_key_event(state: &mut AppState, key_code: KeyCode, modifiers: KeyModifiers) {
        if let KeyCode::Char('c') = key_code {
            if modifiers.contains(KeyModifiers::CONTROL) {
                state.should_quit = true;
                return;
            }
        }

        if state.chat_open {
            Self::handle_chat_key(state, key_code);
        } else {
            Self::handle_main_key(state, key_code);
        }
    }

    /// Keys on the main screen (search bar + results list)
    fn handle_main_key(state: &mut AppState, key_code: KeyCode) {
        match key_code {
            KeyCode::Tab => {
                state.focused_panel = if state.focused_panel == FOCUS_SEARCH {
                    FOCUS_RESULTS
                } else {
                    FOCUS_SEARCH
                };
            }
            KeyCode::Enter if state.focused_panel == FOCUS_SEARCH => {
                Self::submit_search(state);
            }
            // Open the chat about the current results
            KeyCode::Enter | KeyCode::Char('c') if state.focused_panel == FOCUS_RESULTS => {
                state.open_chat();
            }
            KeyCode::Char('q') if state.focused_panel == FOCUS_RESULTS => {
                state.should_quit = true;
            }
            KeyCode::Char(c) if state.focused_panel == FOCUS_SEARCH => {
                Self::insert_char(&mut state.search_input, &mut state.search_cursor, c);
            }
            KeyCode::Backspace if state.focused_panel == FOCUS_SEARCH => {
                Self::delete_char(&mut state.search_input, &mut state.search_cursor);
            }
            KeyCode::Left if state.focused_panel == FOCUS_SEARCH => {
                Self::move_cursor_left(&state.search_input, &mut state.search_cursor);
            }
            KeyCode::Right if state.focused_panel == FOCUS_SEARCH => {
                Self::move_cursor_right(&state.search_input, &mut state.search_cursor);
            }
            KeyCode::Home if state.focused_panel == FOCUS_SEARCH => {
                state.search_cursor = 0;
            }
            KeyCode::End if state.focused_panel == FOCUS_SEARCH => {
                state.search_cursor = state.search_input.len();
            }
            KeyCode::Up if state.focused_panel == FOCUS_RESULTS => {
                state.results_scroll = state.results_scroll.saturating_sub(1);
            }
            KeyCode::Down if state.focused_panel == FOCUS_RESULTS => {
                state.results_scroll = state.results_scroll.saturating_add(1);
            }
            KeyCode::Esc => {
                state.search_input.clear();
                state.search_cursor = 0;
                state.focused_panel = FOCUS_SEARCH;
            }
            _ => {}
        }
    }

    /// Keys while the chat overlay is open
    fn handle_chat_key(state: &mut AppState, key_code: KeyCode) {
        match key_code {
            KeyCode::Esc => {
                state.close_chat();
            }
            KeyCode::Enter => {
                Self::submit_chat(state);
            }
            KeyCode::Char(c) => {
                Self::insert_char(&mut state.chat_input, &mut state.chat_cursor, c);
            }
            KeyCode::Backspace => {
                Self::delete_char(&mut state.chat_input, &mut state.chat_cursor);
            }
            KeyCode::Left => {
                Self::move_cursor_left(&state.chat_input, &mut state.chat_cursor);
            }
            KeyCode::Right => {
                Self::move_cursor_right(&state.chat_input, &mut state.chat_cursor);
            }
            KeyCode::Home => {
                state.chat_cursor = 0;
            }
            KeyCode::End => {
                state.chat_cursor = state.chat_input.len();
            }
            KeyCode::Up => {
                state.auto_scroll_chat = false;
                state.chat_scroll = state.chat_scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                state.chat_scroll = state.chat_scroll.saturating_add(1);
            }
            KeyCode::PageDown => {
                state.auto_scroll_chat = true;
            }
            _ => {}
        }
    }

    fn handle_mouse_event(state: &mut AppState, mouse_event: MouseEvent) {
        match mouse_event.kind {
            MouseEventKind::ScrollUp => {
                if state.chat_open {
                    state.auto_scroll_chat = false;
                    state.chat_scroll = state.chat_scroll.saturating_sub(3);
                } else {
                    state.results_scroll = state.results_scroll.saturating_sub(3);
                }
            }
            MouseEventKind::ScrollDown => {
                if state.chat_open {
                    state.chat_scroll = state.chat_scroll.saturating_add(3);
                } else {
                    state.results_scroll = state.results_scroll.saturating_add(3);
                }
            }
            _ => {}
        }
    }

    /// Start a search for the current input.
    ///
    /// The search control is disabled while a search is in flight; together
    /// with the session's generation check this prevents a slower earlier
    /// response from overwriting a newer result set. An accepted search
    /// closes the chat overlay and invalidates any in-flight chat reply.
    pub fn submit_search(state: &mut AppState) {
        if state.searching {
            return;
        }
        if !state.session.begin_search(&state.search_input) {
            return;
        }
        state.searching = true;
        state.last_error = None;
        state.close_chat();
        state.chat_sending = false;
        state.chat_input.clear();
        state.chat_cursor = 0;
        state.chat_scroll = 0;
        state.auto_scroll_chat = true;
    }

    /// Send the chat input as a message about the current results
    pub fn submit_chat(state: &mut AppState) {
        if state.chat_sending {
            return;
        }
        if !state.session.send_chat(&state.chat_input) {
            return;
        }
        state.chat_sending = true;
        state.chat_input.clear();
        state.chat_cursor = 0;
        state.auto_scroll_chat = true;
    }

    fn insert_char(input: &mut String, cursor: &mut usize, c: char) {
        input.insert(*cursor, c);
        *cursor += c.len_utf8();
    }

    fn delete_char(input: &mut String, cursor: &mut usize) {
        if *cursor == 0 {
            return;
        }
        let prev = input[..*cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev);
        *cursor = prev;
    }

    fn move_cursor_left(input: &str, cursor: &mut usize) {
        if *cursor == 0 {
            return;
        }
        *cursor = input[..*cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
    }

    fn move_cursor_right(input: &str, cursor: &mut usize) {
        if *cursor >= input.len() {
            return;
        }
        let step = input[*cursor..]
            .chars()
            .next()
            .map(|c| c.len_utf8())
            .unwrap_or(0);
        *cursor += step;
    }
}
