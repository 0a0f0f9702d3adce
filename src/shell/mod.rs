//! Window shell
//!
//! Routes platform messages to typed window objects. Every window created
//! through [`WindowShell::create_window`] is stored in a registry keyed by
//! its platform handle; messages are looked up there and forwarded to the
//! owning [`WindowProc`]. Handles with no registered owner get default
//! handling.
//!
//! - `platform` - the services the shell needs from a windowing system
//! - `desktop` - winit implementation of those services

pub mod desktop;
pub mod platform;

use std::any::Any;
use std::collections::HashMap;

use thiserror::Error;

use crate::geometry::Size;

pub use platform::Platform;

/// Longest class name a platform is required to accept
pub const MAX_CLASS_NAME_LEN: usize = 256;

/// Opaque identifier of a platform window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u64);

/// Opaque identifier of a native menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuHandle(pub u64);

/// Frame and behavior of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStyle {
    pub decorations: bool,
    pub resizable: bool,
    pub visible: bool,
    pub maximized: bool,
}

impl WindowStyle {
    /// Title bar, border, resizable, shown immediately
    pub const OVERLAPPED: Self = Self {
        decorations: true,
        resizable: true,
        visible: true,
        maximized: false,
    };
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::OVERLAPPED
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtendedStyle {
    /// Keep above other windows
    pub topmost: bool,
    pub transparent: bool,
}

/// Everything needed to create a window. `None` means platform default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateParams {
    pub title: Option<String>,
    pub style: WindowStyle,
    pub extended_style: ExtendedStyle,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub parent: Option<WindowHandle>,
    pub menu: Option<MenuHandle>,
}

impl CreateParams {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: WindowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_extended_style(mut self, extended_style: ExtendedStyle) -> Self {
        self.extended_style = extended_style;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_parent(mut self, parent: WindowHandle) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_menu(mut self, menu: MenuHandle) -> Self {
        self.menu = Some(menu);
        self
    }
}

/// Events delivered to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// First message, sent once the handle is attached
    Create,
    Paint,
    /// New client-area size in physical pixels
    Resize(Size),
    /// The user asked to close the window
    Close,
    /// Last message before the native window goes away
    Destroy,
}

/// How a window answered a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageResult {
    Handled,
    /// Let the shell apply its default behavior
    Default,
    /// Abort window creation (only meaningful for `Message::Create`)
    Abort,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("cannot register window class {class:?}: {reason}")]
    ClassRegistration { class: String, reason: String },
    #[error("parent window {0:?} does not exist")]
    InvalidParent(WindowHandle),
    #[error("{0} are not supported on this platform")]
    Unsupported(&'static str),
    #[error("platform refused to create the window: {0}")]
    Platform(String),
    #[error("window of class {class:?} aborted its own creation")]
    CreationAborted { class: String },
}

/// A window type that receives messages from the shell
pub trait WindowProc<N>: Any {
    /// Name of the window class this type registers
    fn class_name(&self) -> &str;

    /// Called once with the handle of the freshly created native window,
    /// before `Message::Create`
    fn attach(&mut self, handle: WindowHandle);

    fn handle_message(&mut self, ctx: &mut MessageContext<'_, N>, msg: Message) -> MessageResult;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Platform services available while handling one message
pub struct MessageContext<'a, N> {
    handle: WindowHandle,
    platform: &'a mut dyn Platform<Native = N>,
    quit_requested: &'a mut bool,
}

impl<'a, N> MessageContext<'a, N> {
    pub fn handle(&self) -> WindowHandle {
        self.handle
    }

    /// The native window, if the platform still has it
    pub fn native(&self) -> Option<&N> {
        self.platform.native(self.handle)
    }

    /// Current client-area size (zero when unknown)
    pub fn client_size(&self) -> Size {
        self.platform.client_size(self.handle).unwrap_or_default()
    }

    pub fn request_redraw(&mut self) {
        self.platform.request_redraw(self.handle);
    }

    /// Ask the event loop to terminate
    pub fn post_quit(&mut self) {
        *self.quit_requested = true;
    }
}

struct ShellEntry<N> {
    class_name: String,
    parent: Option<WindowHandle>,
    size: Size,
    window: Box<dyn WindowProc<N>>,
}

/// Registry of live windows for one platform
pub struct WindowShell<N> {
    windows: HashMap<WindowHandle, ShellEntry<N>>,
    quit_requested: bool,
}

impl<N: 'static> Default for WindowShell<N> {
    fn default() -> Self {
        Self {
            windows: HashMap::new(),
            quit_requested: false,
        }
    }
}

fn validate_class_name(class_name: &str) -> Result<(), ShellError> {
    let reason = if class_name.is_empty() {
        "name is empty"
    } else if class_name.chars().count() > MAX_CLASS_NAME_LEN {
        "name is longer than 256 characters"
    } else if class_name.contains('\0') {
        "name contains a NUL character"
    } else {
        return Ok(());
    };
    Err(ShellError::ClassRegistration {
        class: class_name.to_string(),
        reason: reason.to_string(),
    })
}

impl<N: 'static> WindowShell<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the window's class, create the native window, attach the
    /// handle and deliver `Message::Create`.
    ///
    /// On any failure nothing stays registered.
    pub fn create_window(
        &mut self,
        platform: &mut dyn Platform<Native = N>,
        mut window: Box<dyn WindowProc<N>>,
        params: CreateParams,
    ) -> Result<WindowHandle, ShellError> {
        let class_name = window.class_name().to_string();
        validate_class_name(&class_name)?;
        platform.register_class(&class_name)?;

        if let Some(parent) = params.parent {
            if !self.windows.contains_key(&parent) {
                return Err(ShellError::InvalidParent(parent));
            }
        }

        let handle = platform.create_native(&class_name, &params)?;
        window.attach(handle);

        let size = match (params.width, params.height) {
            (Some(width), Some(height)) => Size::new(width, height),
            _ => platform.client_size(handle).unwrap_or_default(),
        };
        self.windows.insert(
            handle,
            ShellEntry {
                class_name: class_name.clone(),
                parent: params.parent,
                size,
                window,
            },
        );

        if self.dispatch(platform, handle, Message::Create) == MessageResult::Abort {
            self.windows.remove(&handle);
            platform.destroy_native(handle);
            tracing::warn!(class = %class_name, "Window aborted creation");
            return Err(ShellError::CreationAborted { class: class_name });
        }

        tracing::debug!(class = %class_name, ?handle, "Window created");
        Ok(handle)
    }

    /// Deliver a message to the window registered for `handle`
    pub fn dispatch(
        &mut self,
        platform: &mut dyn Platform<Native = N>,
        handle: WindowHandle,
        msg: Message,
    ) -> MessageResult {
        let Some(entry) = self.windows.get_mut(&handle) else {
            tracing::trace!(?handle, ?msg, "No window registered, default handling");
            return MessageResult::Default;
        };

        if let Message::Resize(size) = msg {
            entry.size = size;
        }

        let mut ctx = MessageContext {
            handle,
            platform: &mut *platform,
            quit_requested: &mut self.quit_requested,
        };
        let result = entry.window.handle_message(&mut ctx, msg);

        if result == MessageResult::Default && msg == Message::Close {
            self.destroy_window(platform, handle);
        }
        result
    }

    /// Destroy a window and its children. The window sees `Message::Destroy`
    /// before its native window is released.
    pub fn destroy_window(
        &mut self,
        platform: &mut dyn Platform<Native = N>,
        handle: WindowHandle,
    ) -> bool {
        if !self.windows.contains_key(&handle) {
            return false;
        }

        let children: Vec<WindowHandle> = self
            .windows
            .iter()
            .filter(|(_, entry)| entry.parent == Some(handle))
            .map(|(child, _)| *child)
            .collect();
        for child in children {
            self.destroy_window(platform, child);
        }

        self.dispatch(platform, handle, Message::Destroy);
        if let Some(entry) = self.windows.remove(&handle) {
            tracing::debug!(class = %entry.class_name, ?handle, "Window destroyed");
        }
        platform.destroy_native(handle);
        true
    }

    /// Move a window without changing its size or z-order
    pub fn set_position(
        &self,
        platform: &mut dyn Platform<Native = N>,
        handle: WindowHandle,
        x: i32,
        y: i32,
    ) {
        if self.windows.contains_key(&handle) {
            platform.set_position(handle, x, y);
        }
    }

    /// Center a window on the primary display using its stored size.
    /// Returns the new origin.
    pub fn center_window(
        &self,
        platform: &mut dyn Platform<Native = N>,
        handle: WindowHandle,
    ) -> Option<(i32, i32)> {
        let size = self.windows.get(&handle)?.size;
        let screen = platform.screen_size(handle)?;

        let x = (i64::from(screen.width) - i64::from(size.width)) / 2;
        let y = (i64::from(screen.height) - i64::from(size.height)) / 2;
        let (x, y) = (x as i32, y as i32);

        self.set_position(platform, handle, x, y);
        Some((x, y))
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    pub fn handles(&self) -> Vec<WindowHandle> {
        let mut handles: Vec<_> = self.windows.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Size recorded at creation, updated on every resize
    pub fn stored_size(&self, handle: WindowHandle) -> Option<Size> {
        self.windows.get(&handle).map(|entry| entry.size)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Set once any window posts a quit request
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Typed access to a registered window
    pub fn get<T: 'static>(&self, handle: WindowHandle) -> Option<&T> {
        self.windows
            .get(&handle)
            .and_then(|entry| entry.window.as_any().downcast_ref())
    }

    pub fn get_mut<T: 'static>(&mut self, handle: WindowHandle) -> Option<&mut T> {
        self.windows
            .get_mut(&handle)
            .and_then(|entry| entry.window.as_any_mut().downcast_mut())
    }
}
