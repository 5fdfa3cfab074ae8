/// Utility functions for the TUI application

/// Terminal management utilities
pub mod terminal {
    use anyhow::Result;
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use std::io;

    /// Setup terminal for TUI mode
    pub fn setup() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore terminal to normal mode
    pub fn restore<B: ratatui::backend::Backend + std::io::Write>(
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

/// Layout calculation utilities
pub mod layout {
    use ratatui::layout::{Constraint, Direction, Layout, Rect};

    /// Create the main application layout
    pub fn create_main_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3), // Search bar
                    Constraint::Min(1),    // Results list
                    Constraint::Length(1), // Status line
                ]
                .as_ref(),
            )
            .split(area)
            .to_vec()
    }

    /// Centered overlay area for the chat panel
    pub fn centered_overlay(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
        let width = area.width * percent_x / 100;
        let height = area.height * percent_y / 100;
        Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    /// Split the chat overlay into transcript, input, and hint rows
    pub fn create_chat_layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Min(1),    // Transcript
                    Constraint::Length(3), // Chat input
                ]
                .as_ref(),
            )
            .split(area)
            .to_vec()
    }
}

/// Text helpers shared by components
pub mod text {
    /// Greedy word-wrap to `width` columns. Falls back to one line per
    /// input when the panel is too narrow to wrap sensibly.
    pub fn wrap_words(content: &str, width: usize) -> Vec<String> {
        if width < 10 || content.len() <= width {
            return vec![content.to_string()];
        }

        let mut lines = Vec::new();
        let mut current = String::new();
        for word in content.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + word.len() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}
