//! Headless clock snapshots
//!
//! Renders one frame of the clock face through the offscreen backend and
//! writes it as a PNG.
//!
//! Usage:
//!   cargo run --bin snapshot -- --time 10:08:42 --output clock.png
//!   cargo run --bin snapshot -- --theme midnight --width 800 --height 480

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use clockface::clock::{ClockTime, SystemClock, TimeSource};
use clockface::config::ClockConfig;
use clockface::geometry::Size;
use clockface::render::offscreen::OffscreenGraphics;
use clockface::render::resources::{FaceStyle, FrameOutcome, RenderResources};
use clockface::theme::{self, Theme};

#[derive(Parser, Debug)]
#[command(name = "snapshot", about = "Render the clock face to a PNG")]
struct Args {
    /// Time to show as HH:MM[:SS[.mmm]] (defaults to now)
    #[arg(long, value_parser = ClockTime::parse)]
    time: Option<ClockTime>,
    /// Width in pixels (defaults to the configured window width)
    #[arg(long)]
    width: Option<u32>,
    /// Height in pixels (defaults to the configured window height)
    #[arg(long)]
    height: Option<u32>,
    /// Theme id or path to a theme YAML file
    #[arg(long)]
    theme: Option<String>,
    /// Output PNG path
    #[arg(long, short, default_value = "clock.png")]
    output: PathBuf,
}

fn resolve_theme(theme_ref: &str) -> Result<Theme> {
    let path = Path::new(theme_ref);
    if path.exists() {
        return theme::from_file(path).map_err(|e| anyhow!(e));
    }
    theme::load_theme(theme_ref).map_err(|e| anyhow!(e))
}

fn save_png(buffer: &[u32], size: Size, path: &Path) -> Result<()> {
    // ARGB (0xAARRGGBB) to RGBA bytes
    let mut rgba = Vec::with_capacity(size.area() * 4);
    for &pixel in buffer {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    let img =
        image::ImageBuffer::<image::Rgba<u8>, Vec<u8>>::from_raw(size.width, size.height, rgba)
            .context("failed to create image buffer")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    img.save(path)
        .with_context(|| format!("saving PNG to {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = ClockConfig::load();

    let theme = resolve_theme(args.theme.as_deref().unwrap_or(&config.theme))?;
    let style = FaceStyle {
        theme,
        hands: config.hands,
    };
    let size = Size::new(
        args.width.unwrap_or(config.window.width),
        args.height.unwrap_or(config.window.height),
    );
    let time = args.time.unwrap_or_else(|| SystemClock.now());

    let mut resources = RenderResources::new(OffscreenGraphics, style);
    resources.create_factory(&())?;
    match resources.render_frame(&(), size, &time) {
        FrameOutcome::Presented => {}
        FrameOutcome::Skipped(e) => return Err(e).context("rendering snapshot"),
        FrameOutcome::DeviceLost => return Err(anyhow!("offscreen target lost its frame")),
    }

    let target = resources
        .target()
        .context("render target missing after a presented frame")?;
    save_png(target.frame(), size, &args.output)?;

    eprintln!(
        "saved {} ({}x{}, {:02}:{:02}:{:02}.{:03})",
        args.output.display(),
        size.width,
        size.height,
        time.hour,
        time.minute,
        time.second,
        time.millisecond
    );
    Ok(())
}
