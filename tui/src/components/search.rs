use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::state::{AppState, FOCUS_SEARCH};

/// Component for rendering the search bar
pub struct SearchComponent;

impl SearchComponent {
    /// Render the search input
    pub fn render(state: &AppState, f: &mut Frame, area: Rect) {
        let border_style = if state.focused_panel == FOCUS_SEARCH && !state.chat_open {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let title = if state.searching {
            " Search (searching...) "
        } else if state.focused_panel == FOCUS_SEARCH && !state.chat_open {
            " Search (Enter to search, Tab to switch focus) "
        } else {
            " Search "
        };

        // Keep the cursor in view when the query outgrows the box
        let text_width = area.width.saturating_sub(2) as usize;
        let cursor_col = state.search_input[..state.search_cursor].chars().count();
        let skip = cursor_col.saturating_sub(text_width.saturating_sub(1));
        let visible: String = state
            .search_input
            .chars()
            .skip(skip)
            .take(text_width)
            .collect();

        let display = if state.search_input.is_empty() && !state.searching {
            Paragraph::new("Describe your issue (e.g., 'VPN keeps disconnecting')...")
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(visible)
        };

        let input_widget = display.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
        f.render_widget(input_widget, area);

        // Render cursor if focused and visible
        if state.focused_panel == FOCUS_SEARCH
            && !state.chat_open
            && state.cursor_visible
            && !state.searching
        {
            let cursor_x = area.x + 1 + (cursor_col - skip) as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}
