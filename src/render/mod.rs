//! Rendering: graphics backends and device-dependent resource management
//!
//! - `canvas` - CPU rasterization into an ARGB pixel buffer
//! - `resources` - lifecycle of the factory, render target and brushes
//! - `offscreen` - backend that keeps frames in memory
//! - `surface` - softbuffer backend that presents into a winit window

pub mod canvas;
pub mod offscreen;
pub mod resources;
pub mod surface;

use thiserror::Error;

use crate::geometry::{Ellipse, Point, Size};
use crate::theme::Color;

pub use resources::{FrameOutcome, RenderResources, ResourceState};

/// Failures reported by a graphics backend
#[derive(Debug, Error)]
pub enum GraphicsError {
    #[error("failed to create drawing factory: {0}")]
    Factory(String),
    #[error("failed to create render target: {0}")]
    Target(String),
    #[error("failed to create brush: {0}")]
    Brush(String),
    #[error("failed to resize render target to {width}x{height}: {reason}")]
    Resize {
        width: u32,
        height: u32,
        reason: String,
    },
    #[error("failed to present frame: {0}")]
    Present(String),
    #[error("surface has no drawable area")]
    EmptySurface,
    #[error("render resources used after release")]
    Released,
}

/// Result of submitting a frame
#[derive(Debug)]
pub enum PresentStatus {
    Presented,
    /// The device was lost; the target must be recreated before drawing again
    RecreateTarget,
    Failed(GraphicsError),
}

/// Creates device-independent and window-bound resources
pub trait Graphics {
    /// Native window the render target binds to
    type Window;
    /// Process-wide drawing factory
    type Factory;
    type Target: RenderTarget;

    fn create_factory(&mut self, window: &Self::Window) -> Result<Self::Factory, GraphicsError>;

    fn create_target(
        &mut self,
        factory: &mut Self::Factory,
        window: &Self::Window,
        size: Size,
    ) -> Result<Self::Target, GraphicsError>;
}

/// A drawable surface bound to a window and sized to its client area.
///
/// Drawing calls are only valid between `begin_draw` and `end_draw`.
pub trait RenderTarget {
    type Brush;

    fn size(&self) -> Size;

    /// Resize in place, keeping brushes valid
    fn resize(&mut self, size: Size) -> Result<(), GraphicsError>;

    fn create_solid_brush(&mut self, color: Color) -> Result<Self::Brush, GraphicsError>;

    fn begin_draw(&mut self);

    fn clear(&mut self, color: Color);

    fn fill_ellipse(&mut self, ellipse: Ellipse, brush: &Self::Brush);

    fn draw_line(&mut self, from: Point, to: Point, brush: &Self::Brush, stroke_width: f32);

    fn end_draw(&mut self) -> PresentStatus;
}

/// Solid color brush for the CPU backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidBrush {
    pub color: Color,
}
