//! Application state and controller

mod controller;
mod state;

pub use controller::{now_millis, App};
pub use state::{AppState, Theme};
