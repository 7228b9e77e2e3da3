//! Terminal UI: search bar, paginated card grid, status bar.

pub mod app;
pub mod colors;
pub mod search;
pub mod ui;

pub use app::App;
