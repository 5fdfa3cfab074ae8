use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use ticketsearch_core::Ticket;

use crate::state::{AppState, FOCUS_RESULTS};
use crate::utils::text::wrap_words;

/// Component for rendering the ticket result list
pub struct ResultsComponent;

impl ResultsComponent {
    /// Render the results panel
    pub fn render(state: &mut AppState, f: &mut Frame, area: Rect) {
        let focused = state.focused_panel == FOCUS_RESULTS && !state.chat_open;
        let border_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let heading = if state.searched && !state.session.tickets().is_empty() {
            " Found Solutions "
        } else {
            " Recent Solutions "
        };
        let title = if focused {
            format!("{}[FOCUSED] ", heading)
        } else {
            heading.to_string()
        };

        if state.session.tickets().is_empty() {
            let placeholder = Paragraph::new(
                "No tickets yet.\n\nSearch across resolved tickets, runbooks, and internal docs.\nType a query above and press Enter.",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(title),
            );
            f.render_widget(placeholder, area);
            return;
        }

        let mut lines = Vec::new();
        let available_width = area.width.saturating_sub(4) as usize;
        for ticket in state.session.tickets() {
            Self::render_ticket(&mut lines, ticket, available_width);
            lines.push(Line::from(""));
        }

        // Scroll bookkeeping
        let content_height = lines.len();
        let visible_height = area.height.saturating_sub(2) as usize;
        let max_scroll = content_height.saturating_sub(visible_height);
        let scroll_pos = state.results_scroll.min(max_scroll);
        state.results_scroll = scroll_pos;

        let visible_lines: Vec<Line> = if content_height > visible_height {
            lines.into_iter().skip(scroll_pos).take(visible_height).collect()
        } else {
            lines
        };

        let results = Paragraph::new(Text::from(visible_lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        );
        f.render_widget(results, area);

        if content_height > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(max_scroll.max(1)).position(scroll_pos);
            f.render_stateful_widget(
                scrollbar,
                area.inner(&ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    /// One ticket card: priority + title + status + match line, a content
    /// snippet, and the tag row.
    fn render_ticket(lines: &mut Vec<Line>, ticket: &Ticket, width: usize) {
        let mut header = vec![
            Span::styled(
                format!("[{}]", ticket.priority),
                Style::default().fg(Self::priority_color(&ticket.priority)),
            ),
            Span::raw(" "),
            Span::styled(
                ticket.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                ticket.status.clone(),
                Style::default().fg(Self::status_color(ticket)),
            ),
        ];
        if let Some(percent) = ticket.match_percent() {
            header.push(Span::raw("  "));
            header.push(Span::styled(
                format!("{}% match", percent),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::from(header));

        // Content snippet, clamped to two lines like the original cards
        let style = Style::default().fg(Color::Gray);
        for snippet in wrap_words(&ticket.content, width).into_iter().take(2) {
            lines.push(Line::from(Span::styled(format!("  {}", snippet), style)));
        }

        if !ticket.tags.is_empty() {
            let tag_row = ticket
                .tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(Span::styled(
                format!("  {} · {}", ticket.id, tag_row),
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("  {}", ticket.id),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    fn priority_color(priority: &str) -> Color {
        match priority {
            "Critical" => Color::Red,
            "High" => Color::Yellow,
            _ => Color::Blue,
        }
    }

    fn status_color(ticket: &Ticket) -> Color {
        if ticket.is_solved() {
            Color::Green
        } else {
            Color::Yellow
        }
    }
}
