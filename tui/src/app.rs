use anyhow::Result;
use crossterm::event;
use ratatui::{backend::Backend, Frame, Terminal};
use std::time::Duration;
use ticketsearch_core::{AppEvent, Session};
use tokio::sync::mpsc;
use tracing::info;

use crate::{
    components::{ChatComponent, ResultsComponent, SearchComponent, StatusComponent},
    handlers::{EventHandler, InputHandler},
    state::AppState,
    utils::{layout, terminal},
};

/// Main application
pub struct App {
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(session: Session, event_receiver: mpsc::UnboundedReceiver<AppEvent>) -> Self {
        Self {
            state: AppState::new(session, event_receiver),
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        let mut terminal = terminal::setup()?;

        info!("TUI initialized, starting main loop");

        // Main application loop
        let result = self.run_app(&mut terminal).await;

        // Restore terminal
        terminal::restore(&mut terminal)?;

        result
    }

    /// Main application loop
    async fn run_app<B: Backend + std::io::Write>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            // Update cursor blinking
            self.state.update_cursor_blink();

            // Draw UI
            terminal.draw(|f| self.ui(f))?;

            // Handle events with timeout to ensure UI responsiveness
            tokio::select! {
                // Handle terminal events (keyboard and mouse input)
                terminal_event = async {
                    if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        event::read().ok()
                    } else {
                        None
                    }
                } => {
                    if let Some(event) = terminal_event {
                        InputHandler::handle_event(&mut self.state, event);
                    }
                },

                // Handle application events (search results, chat replies)
                app_event = self.state.event_receiver.recv() => {
                    if let Some(event) = app_event {
                        EventHandler::handle_event(&mut self.state, event);
                    }
                },

                // Timeout to ensure regular UI updates
                _ = tokio::time::sleep(Duration::from_millis(50)) => {},
            }

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the user interface
    fn ui(&mut self, f: &mut Frame) {
        let chunks = layout::create_main_layout(f.size());

        SearchComponent::render(&self.state, f, chunks[0]);
        ResultsComponent::render(&mut self.state, f, chunks[1]);
        StatusComponent::render(&self.state, f, chunks[2]);

        // Chat overlay (render on top)
        if self.state.chat_open {
            ChatComponent::render(&mut self.state, f);
        }
    }
}
