//! The analog clock window
//!
//! Acquires the drawing factory on create, paints the face on every paint
//! message, follows resizes and releases everything on destroy.

use std::any::Any;

use crate::clock::{SystemClock, TimeSource};
use crate::geometry::Size;
use crate::render::resources::FaceStyle;
use crate::render::{FrameOutcome, Graphics, GraphicsError, RenderResources};
use crate::shell::{Message, MessageContext, MessageResult, WindowHandle, WindowProc};

pub const CLASS_NAME: &str = "Clockface Window Class";

pub struct ClockWindow<G: Graphics, C: TimeSource = SystemClock> {
    handle: Option<WindowHandle>,
    resources: RenderResources<G>,
    clock: C,
    frames_presented: u64,
}

impl<G: Graphics> ClockWindow<G, SystemClock> {
    pub fn new(graphics: G, style: FaceStyle) -> Self {
        Self::with_clock(graphics, style, SystemClock)
    }
}

impl<G: Graphics, C: TimeSource> ClockWindow<G, C> {
    pub fn with_clock(graphics: G, style: FaceStyle, clock: C) -> Self {
        Self {
            handle: None,
            resources: RenderResources::new(graphics, style),
            clock,
            frames_presented: 0,
        }
    }

    /// Platform handle, `None` until the window has been created
    pub fn handle(&self) -> Option<WindowHandle> {
        self.handle
    }

    pub fn resources(&self) -> &RenderResources<G> {
        &self.resources
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn on_create(&mut self, ctx: &MessageContext<'_, G::Window>) -> MessageResult {
        let Some(native) = ctx.native() else {
            tracing::error!("Native window missing during create");
            return MessageResult::Abort;
        };
        match self.resources.create_factory(native) {
            Ok(()) => MessageResult::Handled,
            Err(e) => {
                tracing::error!("Could not create drawing factory: {}", e);
                MessageResult::Abort
            }
        }
    }

    fn on_paint(&mut self, ctx: &MessageContext<'_, G::Window>) {
        let Some(native) = ctx.native() else {
            return;
        };
        let time = self.clock.now();
        match self.resources.render_frame(native, ctx.client_size(), &time) {
            FrameOutcome::Presented => self.frames_presented += 1,
            FrameOutcome::Skipped(GraphicsError::EmptySurface) => {
                tracing::trace!("Client area is empty, nothing to paint");
            }
            FrameOutcome::Skipped(_) | FrameOutcome::DeviceLost => {}
        }
    }

    fn on_resize(&mut self, ctx: &mut MessageContext<'_, G::Window>, size: Size) {
        if let Err(e) = self.resources.resize(size) {
            tracing::debug!("Resize left resources invalid: {}", e);
        }
        if !size.is_empty() {
            ctx.request_redraw();
        }
    }
}

impl<G, C> WindowProc<G::Window> for ClockWindow<G, C>
where
    G: Graphics + 'static,
    C: TimeSource + 'static,
{
    fn class_name(&self) -> &str {
        CLASS_NAME
    }

    fn attach(&mut self, handle: WindowHandle) {
        self.handle = Some(handle);
    }

    fn handle_message(
        &mut self,
        ctx: &mut MessageContext<'_, G::Window>,
        msg: Message,
    ) -> MessageResult {
        match msg {
            Message::Create => self.on_create(ctx),
            Message::Paint => {
                self.on_paint(ctx);
                MessageResult::Handled
            }
            Message::Resize(size) => {
                self.on_resize(ctx, size);
                MessageResult::Handled
            }
            Message::Close => MessageResult::Default,
            Message::Destroy => {
                self.resources.destroy();
                ctx.post_quit();
                MessageResult::Handled
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
