//! In-memory backend
//!
//! Renders into a pixel buffer that never leaves the process. Used by the
//! snapshot tool and anywhere a frame is needed without a window.

use crate::geometry::{Ellipse, Point, Size};
use crate::theme::Color;

use super::canvas::Canvas;
use super::{Graphics, GraphicsError, PresentStatus, RenderTarget, SolidBrush};

/// Graphics backend with no native window
#[derive(Debug, Default)]
pub struct OffscreenGraphics;

/// Factory for offscreen targets
#[derive(Debug, Default)]
pub struct OffscreenFactory;

impl Graphics for OffscreenGraphics {
    type Window = ();
    type Factory = OffscreenFactory;
    type Target = OffscreenTarget;

    fn create_factory(&mut self, _window: &()) -> Result<OffscreenFactory, GraphicsError> {
        Ok(OffscreenFactory)
    }

    fn create_target(
        &mut self,
        _factory: &mut OffscreenFactory,
        _window: &(),
        size: Size,
    ) -> Result<OffscreenTarget, GraphicsError> {
        OffscreenTarget::new(size)
    }
}

/// Back buffer plus the last presented frame
#[derive(Debug, Clone)]
pub struct OffscreenTarget {
    size: Size,
    back: Vec<u32>,
    front: Vec<u32>,
    drawing: bool,
    frames_presented: u64,
}

impl OffscreenTarget {
    pub fn new(size: Size) -> Result<Self, GraphicsError> {
        if size.is_empty() {
            return Err(GraphicsError::EmptySurface);
        }
        Ok(Self {
            size,
            back: vec![0; size.area()],
            front: vec![0; size.area()],
            drawing: false,
            frames_presented: 0,
        })
    }

    /// Pixels of the last presented frame (ARGB, row-major)
    pub fn frame(&self) -> &[u32] {
        &self.front
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Pixel of the last presented frame
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.size.width && y < self.size.height {
            Some(self.front[(y * self.size.width + x) as usize])
        } else {
            None
        }
    }

    fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(
            &mut self.back,
            self.size.width as usize,
            self.size.height as usize,
        )
    }
}

impl RenderTarget for OffscreenTarget {
    type Brush = SolidBrush;

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> Result<(), GraphicsError> {
        if size.is_empty() {
            return Err(GraphicsError::Resize {
                width: size.width,
                height: size.height,
                reason: "zero-sized target".to_string(),
            });
        }
        self.size = size;
        self.back.resize(size.area(), 0);
        self.front.resize(size.area(), 0);
        Ok(())
    }

    fn create_solid_brush(&mut self, color: Color) -> Result<SolidBrush, GraphicsError> {
        Ok(SolidBrush { color })
    }

    fn begin_draw(&mut self) {
        self.drawing = true;
    }

    fn clear(&mut self, color: Color) {
        self.canvas().clear(color.to_argb_u32());
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, brush: &SolidBrush) {
        self.canvas().fill_ellipse(ellipse, brush.color.to_argb_u32());
    }

    fn draw_line(&mut self, from: Point, to: Point, brush: &SolidBrush, stroke_width: f32) {
        self.canvas()
            .draw_line(from, to, brush.color.to_argb_u32(), stroke_width);
    }

    fn end_draw(&mut self) -> PresentStatus {
        if !std::mem::take(&mut self.drawing) {
            return PresentStatus::Failed(GraphicsError::Present(
                "end_draw without begin_draw".to_string(),
            ));
        }
        self.front.copy_from_slice(&self.back);
        self.frames_presented += 1;
        PresentStatus::Presented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockTime;
    use crate::render::resources::{FaceStyle, RenderResources};
    use crate::theme::Theme;

    #[test]
    fn test_renders_classic_face() {
        let mut resources = RenderResources::new(OffscreenGraphics, FaceStyle::default());
        resources.create_factory(&()).unwrap();
        let outcome = resources.render_frame(&(), Size::new(200, 100), &ClockTime::new(3, 0, 0, 0));
        assert!(outcome.is_presented());

        let theme = Theme::default();
        let target = resources.target().unwrap();
        assert_eq!(target.frames_presented(), 1);
        // Corner is background, a point inside the face but off every hand is face color
        assert_eq!(target.pixel(0, 0), Some(theme.background.to_argb_u32()));
        assert_eq!(target.pixel(100, 80), Some(theme.face.to_argb_u32()));
        // The hour hand points at 3 o'clock
        assert_eq!(target.pixel(120, 50), Some(theme.hands.to_argb_u32()));
    }

    #[test]
    fn test_end_draw_without_begin_fails() {
        let mut target = OffscreenTarget::new(Size::new(4, 4)).unwrap();
        assert!(matches!(target.end_draw(), PresentStatus::Failed(_)));
    }

    #[test]
    fn test_zero_sized_target_rejected() {
        assert!(matches!(
            OffscreenTarget::new(Size::new(0, 10)),
            Err(GraphicsError::EmptySurface)
        ));
    }
}
