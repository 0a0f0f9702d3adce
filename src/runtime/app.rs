use std::rc::Rc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use clockface::clock_window::ClockWindow;
use clockface::config::ClockConfig;
use clockface::geometry::Size;
use clockface::perf::FrameStats;
use clockface::render::resources::FaceStyle;
use clockface::render::surface::SoftbufferGraphics;
use clockface::shell::desktop::{DesktopPlatform, DesktopWindows};
use clockface::shell::{
    CreateParams, ExtendedStyle, Message, ShellError, WindowHandle, WindowShell, WindowStyle,
};

pub struct App {
    config: ClockConfig,
    style: FaceStyle,
    shell: WindowShell<Rc<Window>>,
    windows: DesktopWindows,
    main_window: Option<WindowHandle>,
    startup_error: Option<ShellError>,
    perf: FrameStats,
}

impl App {
    pub fn new(config: ClockConfig, style: FaceStyle) -> Self {
        Self {
            config,
            style,
            shell: WindowShell::new(),
            windows: DesktopWindows::new(),
            main_window: None,
            startup_error: None,
            perf: FrameStats::default(),
        }
    }

    /// Why the main window could not be created, if it could not
    pub fn startup_error(&self) -> Option<&ShellError> {
        self.startup_error.as_ref()
    }

    fn create_main_window(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowHandle, ShellError> {
        let window = ClockWindow::new(SoftbufferGraphics, self.style.clone());
        let params = CreateParams::new(self.config.window.title.clone())
            .with_style(WindowStyle::OVERLAPPED)
            .with_extended_style(ExtendedStyle::default())
            .with_size(self.config.window.width, self.config.window.height);

        let mut platform = DesktopPlatform::new(event_loop, &mut self.windows);
        let handle = self
            .shell
            .create_window(&mut platform, Box::new(window), params)?;

        if self.config.window.center {
            if let Some((x, y)) = self.shell.center_window(&mut platform, handle) {
                tracing::debug!(x, y, "Centered main window");
            }
        }
        Ok(handle)
    }

    /// Deliver one message and stop the loop if a window asked to quit
    fn dispatch(&mut self, event_loop: &ActiveEventLoop, handle: WindowHandle, msg: Message) {
        let mut platform = DesktopPlatform::new(event_loop, &mut self.windows);

        if msg == Message::Paint {
            self.perf.start_frame();
            self.shell.dispatch(&mut platform, handle, msg);
            self.perf.record_frame_time();
        } else {
            self.shell.dispatch(&mut platform, handle, msg);
        }

        if self.shell.quit_requested() {
            tracing::info!("Quit requested, leaving event loop");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.main_window.is_some() || self.startup_error.is_some() {
            return;
        }

        match self.create_main_window(event_loop) {
            Ok(handle) => {
                tracing::info!(?handle, "Clock window created");
                self.main_window = Some(handle);
            }
            Err(e) => {
                tracing::error!("Failed to create clock window: {}", e);
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let msg = match event {
            WindowEvent::RedrawRequested => Message::Paint,
            WindowEvent::Resized(size) => Message::Resize(Size::new(size.width, size.height)),
            WindowEvent::CloseRequested => Message::Close,
            WindowEvent::Destroyed => Message::Destroy,
            _ => return,
        };
        self.dispatch(event_loop, WindowHandle::from(window_id), msg);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);

        // No events pending: paint every window right away
        for handle in self.shell.handles() {
            if event_loop.exiting() {
                break;
            }
            self.dispatch(event_loop, handle, Message::Paint);
        }

        self.perf.maybe_report(Instant::now());
    }
}
