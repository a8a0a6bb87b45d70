//! Interactive terminal UI.

pub mod app;
pub mod controller;
pub mod view;

pub use app::run;
pub use controller::{KeyOutcome, UiController};
