//! Clockface - an analog desktop clock
//!
//! The window shell routes platform messages to typed window objects, and
//! the render resource manager owns the device-dependent drawing resources
//! of the clock window: created lazily, resized in place, recreated after
//! device loss and released on destroy.

pub mod clock;
pub mod clock_window;
pub mod config;
pub mod config_paths;
pub mod geometry;
pub mod perf;
pub mod render;
pub mod shell;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use clock::{ClockTime, HandAngles};
pub use clock_window::ClockWindow;
pub use config::ClockConfig;
pub use geometry::{Layout, Size};
pub use shell::{WindowHandle, WindowShell};
pub use theme::Theme;
