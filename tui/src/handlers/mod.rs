// Input and application event handlers

pub mod events;
pub mod input;

pub use events::EventHandler;
pub use input::InputHandler;
