use std::process::ExitCode;

use anyhow::{Context, Result};
use winit::event_loop::EventLoop;

use clockface::config::ClockConfig;
use clockface::render::resources::FaceStyle;
use clockface::theme::{self, Theme};

mod runtime;

use runtime::App;

fn load_style(config: &ClockConfig) -> FaceStyle {
    let theme = theme::load_theme(&config.theme).unwrap_or_else(|e| {
        tracing::warn!("Failed to load theme '{}': {}, using default", config.theme, e);
        Theme::default()
    });
    FaceStyle {
        theme,
        hands: config.hands,
    }
}

fn main() -> Result<ExitCode> {
    let _log_guard = clockface::tracing::init();

    let config = ClockConfig::load();
    let style = load_style(&config);

    let event_loop = EventLoop::new().context("creating event loop")?;
    let mut app = App::new(config, style);

    event_loop
        .run_app(&mut app)
        .context("running event loop")?;

    if let Some(e) = app.startup_error() {
        eprintln!("clockface: {}", e);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
