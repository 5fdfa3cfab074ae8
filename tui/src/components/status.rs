use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

/// Component for rendering the status line
pub struct StatusComponent;

impl StatusComponent {
    /// Render the status line
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        let backend = state.session.api_info().name;

        let (status_text, style) = if let Some(ref error) = state.last_error {
            (
                format!("✗ Search failed: {} | {}", error, backend),
                Style::default().fg(Color::Red),
            )
        } else if state.searching {
            (
                format!("● Searching... | {}", backend),
                Style::default().fg(Color::Yellow),
            )
        } else if state.chat_sending {
            (
                format!("● Waiting for assistant... | {}", backend),
                Style::default().fg(Color::Yellow),
            )
        } else if state.chat_open {
            (
                format!("Chat open | Esc to close | {}", backend),
                Style::default().fg(Color::Green),
            )
        } else {
            let hint = if state.session.tickets().is_empty() {
                "Type a query and press Enter"
            } else {
                "'c' on results to chat, Tab to switch, 'q' to quit"
            };
            (
                format!("Ready | {} | {}", hint, backend),
                Style::default().fg(Color::Green),
            )
        };

        let status = Paragraph::new(status_text).style(style);
        f.render_widget(status, area);
    }
}
