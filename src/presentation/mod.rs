// Presentation layer - Command line and report preview server
pub mod app_state;
pub mod cli;
pub mod handlers;
