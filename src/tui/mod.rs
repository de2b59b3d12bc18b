pub mod app;
pub mod handlers;
pub mod navigation;
pub mod search;
pub mod state;
pub mod ui;
