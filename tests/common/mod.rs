//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use clockface::geometry::{Ellipse, Point, Size};
use clockface::render::offscreen::OffscreenTarget;
use clockface::render::{Graphics, GraphicsError, PresentStatus, RenderTarget, SolidBrush};
use clockface::shell::{
    CreateParams, Message, MessageContext, MessageResult, Platform, ShellError, WindowHandle,
    WindowProc,
};
use clockface::theme::Color;

/// Size a window gets when creation leaves it to the platform
pub const DEFAULT_CLIENT_SIZE: Size = Size::new(800, 600);

// ============================================================================
// Mock platform
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockWindow {
    pub class_name: String,
    pub title: Option<String>,
    pub position: (i32, i32),
    pub client: Size,
    native: (),
}

/// In-memory windowing system recording what the shell asks of it
pub struct MockPlatform {
    pub screen: Size,
    pub refuse_creation: bool,
    pub windows: HashMap<WindowHandle, MockWindow>,
    pub classes: HashSet<String>,
    pub register_calls: usize,
    pub redraw_requests: Vec<WindowHandle>,
    pub destroyed: Vec<WindowHandle>,
    next_id: u64,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            screen: Size::new(1920, 1080),
            refuse_creation: false,
            windows: HashMap::new(),
            classes: HashSet::new(),
            register_calls: 0,
            redraw_requests: Vec::new(),
            destroyed: Vec::new(),
            next_id: 1,
        }
    }
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user dragging the window border
    pub fn set_client_size(&mut self, handle: WindowHandle, size: Size) {
        if let Some(window) = self.windows.get_mut(&handle) {
            window.client = size;
        }
    }

    pub fn position(&self, handle: WindowHandle) -> Option<(i32, i32)> {
        self.windows.get(&handle).map(|w| w.position)
    }
}

impl Platform for MockPlatform {
    type Native = ();

    fn register_class(&mut self, class_name: &str) -> Result<(), ShellError> {
        self.register_calls += 1;
        self.classes.insert(class_name.to_string());
        Ok(())
    }

    fn create_native(
        &mut self,
        class_name: &str,
        params: &CreateParams,
    ) -> Result<WindowHandle, ShellError> {
        if self.refuse_creation {
            return Err(ShellError::Platform("out of window handles".to_string()));
        }
        assert!(self.classes.contains(class_name), "class must be registered first");

        let handle = WindowHandle(self.next_id);
        self.next_id += 1;

        let client = match (params.width, params.height) {
            (Some(w), Some(h)) => Size::new(w, h),
            _ => DEFAULT_CLIENT_SIZE,
        };
        self.windows.insert(
            handle,
            MockWindow {
                class_name: class_name.to_string(),
                title: params.title.clone(),
                position: (params.x.unwrap_or(0), params.y.unwrap_or(0)),
                client,
                native: (),
            },
        );
        Ok(handle)
    }

    fn destroy_native(&mut self, handle: WindowHandle) {
        if self.windows.remove(&handle).is_some() {
            self.destroyed.push(handle);
        }
    }

    fn native(&self, handle: WindowHandle) -> Option<&()> {
        self.windows.get(&handle).map(|w| &w.native)
    }

    fn set_position(&mut self, handle: WindowHandle, x: i32, y: i32) {
        if let Some(window) = self.windows.get_mut(&handle) {
            window.position = (x, y);
        }
    }

    fn screen_size(&self, _handle: WindowHandle) -> Option<Size> {
        Some(self.screen)
    }

    fn client_size(&self, handle: WindowHandle) -> Option<Size> {
        self.windows.get(&handle).map(|w| w.client)
    }

    fn request_redraw(&mut self, handle: WindowHandle) {
        self.redraw_requests.push(handle);
    }
}

// ============================================================================
// Probe window
// ============================================================================

/// Window that records every message it receives
pub struct ProbeWindow {
    pub class_name: String,
    pub handle: Option<WindowHandle>,
    pub log: Rc<RefCell<Vec<(WindowHandle, Message)>>>,
    pub abort_create: bool,
    pub quit_on_destroy: bool,
}

impl ProbeWindow {
    pub fn new(class_name: &str, log: &Rc<RefCell<Vec<(WindowHandle, Message)>>>) -> Self {
        Self {
            class_name: class_name.to_string(),
            handle: None,
            log: Rc::clone(log),
            abort_create: false,
            quit_on_destroy: false,
        }
    }
}

impl WindowProc<()> for ProbeWindow {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn attach(&mut self, handle: WindowHandle) {
        assert!(self.handle.is_none(), "attach must happen once");
        self.handle = Some(handle);
    }

    fn handle_message(&mut self, ctx: &mut MessageContext<'_, ()>, msg: Message) -> MessageResult {
        assert_eq!(Some(ctx.handle()), self.handle, "handle attached before messages");
        self.log.borrow_mut().push((ctx.handle(), msg));
        match msg {
            Message::Create if self.abort_create => MessageResult::Abort,
            Message::Close => MessageResult::Default,
            Message::Destroy => {
                if self.quit_on_destroy {
                    ctx.post_quit();
                }
                MessageResult::Handled
            }
            _ => MessageResult::Handled,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

// ============================================================================
// Scripted graphics backend
// ============================================================================

/// Failure injection shared between a test and its graphics backend
#[derive(Debug, Default)]
pub struct Script {
    pub fail_factory: Cell<bool>,
    /// Number of upcoming target creations that fail
    pub fail_targets: Cell<usize>,
    /// Next present reports device loss
    pub lose_device: Cell<bool>,
    /// Next present fails outright
    pub fail_present: Cell<bool>,
    pub fail_resize: Cell<bool>,
    pub factories_created: Cell<usize>,
    pub targets_created: Cell<usize>,
}

/// Offscreen rendering with scripted failures
#[derive(Debug, Clone, Default)]
pub struct ScriptedGraphics {
    pub script: Rc<Script>,
}

impl ScriptedGraphics {
    pub fn new() -> (Self, Rc<Script>) {
        let script = Rc::new(Script::default());
        (
            Self {
                script: Rc::clone(&script),
            },
            script,
        )
    }
}

impl Graphics for ScriptedGraphics {
    type Window = ();
    type Factory = ();
    type Target = ScriptedTarget;

    fn create_factory(&mut self, _window: &()) -> Result<(), GraphicsError> {
        if self.script.fail_factory.get() {
            return Err(GraphicsError::Factory("no graphics adapter".to_string()));
        }
        self.script
            .factories_created
            .set(self.script.factories_created.get() + 1);
        Ok(())
    }

    fn create_target(
        &mut self,
        _factory: &mut (),
        _window: &(),
        size: Size,
    ) -> Result<ScriptedTarget, GraphicsError> {
        let pending = self.script.fail_targets.get();
        if pending > 0 {
            self.script.fail_targets.set(pending - 1);
            return Err(GraphicsError::Target("out of video memory".to_string()));
        }
        let inner = OffscreenTarget::new(size)?;
        self.script
            .targets_created
            .set(self.script.targets_created.get() + 1);
        Ok(ScriptedTarget {
            inner,
            script: Rc::clone(&self.script),
        })
    }
}

pub struct ScriptedTarget {
    pub inner: OffscreenTarget,
    script: Rc<Script>,
}

impl RenderTarget for ScriptedTarget {
    type Brush = SolidBrush;

    fn size(&self) -> Size {
        self.inner.size()
    }

    fn resize(&mut self, size: Size) -> Result<(), GraphicsError> {
        if self.script.fail_resize.replace(false) {
            return Err(GraphicsError::Resize {
                width: size.width,
                height: size.height,
                reason: "device removed".to_string(),
            });
        }
        self.inner.resize(size)
    }

    fn create_solid_brush(&mut self, color: Color) -> Result<SolidBrush, GraphicsError> {
        self.inner.create_solid_brush(color)
    }

    fn begin_draw(&mut self) {
        self.inner.begin_draw();
    }

    fn clear(&mut self, color: Color) {
        self.inner.clear(color);
    }

    fn fill_ellipse(&mut self, ellipse: Ellipse, brush: &SolidBrush) {
        self.inner.fill_ellipse(ellipse, brush);
    }

    fn draw_line(&mut self, from: Point, to: Point, brush: &SolidBrush, stroke_width: f32) {
        self.inner.draw_line(from, to, brush, stroke_width);
    }

    fn end_draw(&mut self) -> PresentStatus {
        let status = self.inner.end_draw();
        if self.script.lose_device.replace(false) {
            return PresentStatus::RecreateTarget;
        }
        if self.script.fail_present.replace(false) {
            return PresentStatus::Failed(GraphicsError::Present("swap chain gone".to_string()));
        }
        status
    }
}
