//! Terminal front end: event loop, effect execution and rendering.
mod app;
mod effects;
pub mod logging;
mod script;
mod timers;
mod ui;

pub use app::run_app;
