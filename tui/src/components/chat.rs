use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use ticketsearch_core::MessageRole;

use crate::state::AppState;
use crate::utils::{layout, text::wrap_words};

/// Component for rendering the chat overlay
pub struct ChatComponent;

impl ChatComponent {
    /// Render the chat overlay on top of the main screen
    pub fn render(state: &mut AppState, f: &mut Frame) {
        let popup_area = layout::centered_overlay(f.size(), 70, 70);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .title(format!(
                " Assistant ({} tickets in context) ",
                state.session.tickets().len()
            ));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let chunks = layout::create_chat_layout(inner);
        Self::render_transcript(state, f, chunks[0]);
        Self::render_input(state, f, chunks[1]);
    }

    fn render_transcript(state: &mut AppState, f: &mut Frame, area: ratatui::layout::Rect) {
        let available_width = area.width.saturating_sub(2) as usize;
        let mut lines = Vec::new();

        if state.session.messages().is_empty() {
            lines.push(Line::from(Span::styled(
                "Ask the assistant about the tickets above.",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for msg in state.session.messages() {
            let (prefix, style) = match msg.role {
                MessageRole::User => ("You: ", Style::default().fg(Color::Cyan)),
                MessageRole::Assistant => ("Assistant: ", Style::default().fg(Color::Green)),
                MessageRole::System => ("System: ", Style::default().fg(Color::Yellow)),
                MessageRole::Error => ("Error: ", Style::default().fg(Color::Red)),
            };
            lines.push(Line::from(Span::styled(
                prefix,
                style.add_modifier(Modifier::BOLD),
            )));
            for wrapped in wrap_words(&msg.content, available_width) {
                lines.push(Line::from(Span::styled(wrapped, style)));
            }
            lines.push(Line::from(""));
        }

        if state.chat_sending {
            lines.push(Line::from(Span::styled(
                "Assistant is typing...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        // Scroll bookkeeping, pinned to the bottom while auto-scroll is on
        let content_height = lines.len();
        let visible_height = area.height as usize;
        let max_scroll = content_height.saturating_sub(visible_height);
        let scroll_pos = if state.auto_scroll_chat {
            max_scroll
        } else {
            state.chat_scroll.min(max_scroll)
        };
        state.chat_scroll = scroll_pos;

        let visible_lines: Vec<Line> = if content_height > visible_height {
            lines.into_iter().skip(scroll_pos).take(visible_height).collect()
        } else {
            lines
        };

        let transcript = Paragraph::new(Text::from(visible_lines))
            .wrap(ratatui::widgets::Wrap { trim: false });
        f.render_widget(transcript, area);

        if content_height > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(max_scroll.max(1)).position(scroll_pos);
            f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn render_input(state: &AppState, f: &mut Frame, area: ratatui::layout::Rect) {
        let title = if state.chat_sending {
            " Message (waiting for reply...) "
        } else {
            " Message (Enter to send, Esc to close) "
        };

        let text_width = area.width.saturating_sub(2) as usize;
        let cursor_col = state.chat_input[..state.chat_cursor].chars().count();
        let skip = cursor_col.saturating_sub(text_width.saturating_sub(1));
        let visible: String = state
            .chat_input
            .chars()
            .skip(skip)
            .take(text_width)
            .collect();

        let style = if state.chat_sending {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        let input_widget = Paragraph::new(visible).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title),
        );
        f.render_widget(input_widget, area);

        if state.cursor_visible && !state.chat_sending {
            let cursor_x = area.x + 1 + (cursor_col - skip) as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}
