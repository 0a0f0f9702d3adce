//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler that feeds winit events to the window shell

pub mod app;

pub use app::App;
