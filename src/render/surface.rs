//! Window-bound backend presenting through softbuffer

use std::num::NonZeroU32;
use std::rc::Rc;

use softbuffer::{Context, Surface};
use winit::window::Window;

use crate::geometry::{Ellipse, Point, Size};
use crate::theme::Color;

use super::canvas::Canvas;
use super::{Graphics, GraphicsError, PresentStatus, RenderTarget, SolidBrush};

/// CPU rasterization presented into a winit window
#[derive(Debug, Default)]
pub struct SoftbufferGraphics;

impl Graphics for SoftbufferGraphics {
    type Window = Rc<Window>;
    type Factory = Context<Rc<Window>>;
    type Target = SoftbufferTarget;

    fn create_factory(&mut self, window: &Rc<Window>) -> Result<Self::Factory, GraphicsError> {
        Context::new(Rc::clone(window)).map_err(|e| GraphicsError::Factory(e.to_string()))
    }

    fn create_target(
        &mut self,
        factory: &mut Self::Factory,
        window: &Rc<Window>,
        size: Size,
    ) -> Result<SoftbufferTarget, GraphicsError> {
        let surface = Surface::new(factory, Rc::clone(window))
            .map_err(|e| GraphicsError::Target(e.to_string()))?;

        let mut target = SoftbufferTarget {
            surface,
            back_buffer: Vec::new(),
            size: Size::default(),
            drawing: false,
        };
        // The surface has no size until told otherwise
        target
            .resize(size)
            .map_err(|e| GraphicsError::Target(e.to_string()))?;
        Ok(target)
    }
}

/// softbuffer surface plus a back buffer the canvas draws into
pub struct SoftbufferTarget {
    surface: Surface<Rc<Window>, Rc<Window>>,
    back_buffer: Vec<u32>,
    size: Size,
    drawing: bool,
}

impl SoftbufferTarget {
    fn canvas(&mut self) -> Canvas<'_> {
        Canvas::new(
            &mut self.back_buffer,
            self.size.width as usize,
            self.size.height as usize,
        )
    }
}

impl RenderTarget for SoftbufferTarget {
    type Brush = SolidBrush;

    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) -> Result<(), GraphicsError> {
        let resize_error = |reason: String| GraphicsError::Resize {
            width: size.width,
            height: size.height,
            reason,
        };
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Err(resize_error("zero-sized surface".to_string()));
        };

        self.surface
            .resize(width, height)
            .map_err(|e| resize_error(e.to_string()))?;
        self.back_buffer.resize(size.area(), 0);
        self.size = size;
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

        let mut buffer = match self.surface.buffer_mut() {
            Ok(buffer) => buffer,
            Err(e) => return PresentStatus::Failed(GraphicsError::Present(e.to_string())),
        };
        // The surface no longer matches what we drew
        if buffer.len() != self.back_buffer.len() {
            return PresentStatus::RecreateTarget;
        }

        // softbuffer wants 0RGB
        for (dst, src) in buffer.iter_mut().zip(&self.back_buffer) {
            *dst = src & 0x00FF_FFFF;
        }

        match buffer.present() {
            Ok(()) => PresentStatus::Presented,
            Err(e) => PresentStatus::Failed(GraphicsError::Present(e.to_string())),
        }
    }
}
