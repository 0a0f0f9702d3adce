use crate::geometry::Size;

use super::{CreateParams, ShellError, WindowHandle};

/// Windowing services the shell relies on.
///
/// Implemented over winit for the desktop and by test doubles.
pub trait Platform {
    /// The platform's own window object
    type Native;

    /// Register a window class. Registering the same name twice succeeds.
    fn register_class(&mut self, class_name: &str) -> Result<(), ShellError>;

    fn create_native(
        &mut self,
        class_name: &str,
        params: &CreateParams,
    ) -> Result<WindowHandle, ShellError>;

    /// Release the native window. Unknown handles are ignored.
    fn destroy_native(&mut self, handle: WindowHandle);

    fn native(&self, handle: WindowHandle) -> Option<&Self::Native>;

    /// Move the outer window to `(x, y)` in screen pixels
    fn set_position(&mut self, handle: WindowHandle, x: i32, y: i32);

    /// Size of the primary display
    fn screen_size(&self, handle: WindowHandle) -> Option<Size>;

    fn client_size(&self, handle: WindowHandle) -> Option<Size>;

    fn request_redraw(&mut self, handle: WindowHandle);
}
