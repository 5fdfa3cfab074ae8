// UI components for the TUI

pub mod chat;
pub mod results;
pub mod search;
pub mod status;

pub use chat::ChatComponent;
pub use results::ResultsComponent;
pub use search::SearchComponent;
pub use status::StatusComponent;
