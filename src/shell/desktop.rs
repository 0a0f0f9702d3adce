//! winit-backed platform

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use raw_window_handle::HasWindowHandle;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId, WindowLevel};

use crate::geometry::Size;

use super::{CreateParams, Platform, ShellError, WindowHandle};

impl From<WindowId> for WindowHandle {
    fn from(id: WindowId) -> Self {
        WindowHandle(u64::from(id))
    }
}

/// Native windows and registered classes that outlive a single callback
#[derive(Default)]
pub struct DesktopWindows {
    windows: HashMap<WindowHandle, Rc<Window>>,
    classes: HashSet<String>,
}

impl DesktopWindows {
    pub fn new() -> Self {
        Self::default()
    }
}

/// [`Platform`] over a winit event loop, valid for one callback
pub struct DesktopPlatform<'a> {
    event_loop: &'a ActiveEventLoop,
    state: &'a mut DesktopWindows,
}

impl<'a> DesktopPlatform<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, state: &'a mut DesktopWindows) -> Self {
        Self { event_loop, state }
    }
}

impl Platform for DesktopPlatform<'_> {
    type Native = Rc<Window>;

    fn register_class(&mut self, class_name: &str) -> Result<(), ShellError> {
        if self.state.classes.insert(class_name.to_string()) {
            tracing::debug!(class = class_name, "Registered window class");
        }
        Ok(())
    }

    fn create_native(
        &mut self,
        class_name: &str,
        params: &CreateParams,
    ) -> Result<WindowHandle, ShellError> {
        if !self.state.classes.contains(class_name) {
            return Err(ShellError::ClassRegistration {
                class: class_name.to_string(),
                reason: "class was never registered".to_string(),
            });
        }
        if params.menu.is_some() {
            return Err(ShellError::Unsupported("native menus"));
        }

        let mut attributes = Window::default_attributes()
            .with_title(params.title.clone().unwrap_or_default())
            .with_decorations(params.style.decorations)
            .with_resizable(params.style.resizable)
            .with_visible(params.style.visible)
            .with_maximized(params.style.maximized)
            .with_transparent(params.extended_style.transparent);

        if params.extended_style.topmost {
            attributes = attributes.with_window_level(WindowLevel::AlwaysOnTop);
        }
        if let (Some(x), Some(y)) = (params.x, params.y) {
            attributes = attributes.with_position(PhysicalPosition::new(x, y));
        }
        if let (Some(width), Some(height)) = (params.width, params.height) {
            attributes = attributes.with_inner_size(PhysicalSize::new(width, height));
        }
        if let Some(parent) = params.parent {
            let parent_window = self
                .state
                .windows
                .get(&parent)
                .ok_or(ShellError::InvalidParent(parent))?;
            let raw = parent_window
                .window_handle()
                .map_err(|e| ShellError::Platform(e.to_string()))?
                .as_raw();
            // SAFETY: the parent stays in `windows` until the shell destroys
            // it, and the shell destroys children first.
            attributes = unsafe { attributes.with_parent_window(Some(raw)) };
        }

        let window = self
            .event_loop
            .create_window(attributes)
            .map_err(|e| ShellError::Platform(e.to_string()))?;
        let handle = WindowHandle::from(window.id());
        self.state.windows.insert(handle, Rc::new(window));
        Ok(handle)
    }

    fn destroy_native(&mut self, handle: WindowHandle) {
        // The window closes once the last Rc (surface, context) is gone
        self.state.windows.remove(&handle);
    }

    fn native(&self, handle: WindowHandle) -> Option<&Rc<Window>> {
        self.state.windows.get(&handle)
    }

    fn set_position(&mut self, handle: WindowHandle, x: i32, y: i32) {
        if let Some(window) = self.state.windows.get(&handle) {
            window.set_outer_position(PhysicalPosition::new(x, y));
        }
    }

    fn screen_size(&self, handle: WindowHandle) -> Option<Size> {
        let monitor = self.event_loop.primary_monitor().or_else(|| {
            self.state
                .windows
                .get(&handle)
                .and_then(|window| window.current_monitor())
        })?;
        let size = monitor.size();
        Some(Size::new(size.width, size.height))
    }

    fn client_size(&self, handle: WindowHandle) -> Option<Size> {
        let size = self.state.windows.get(&handle)?.inner_size();
        Some(Size::new(size.width, size.height))
    }

    fn request_redraw(&mut self, handle: WindowHandle) {
        if let Some(window) = self.state.windows.get(&handle) {
            window.request_redraw();
        }
    }
}
