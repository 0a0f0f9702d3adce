//! Device-dependent resource management
//!
//! Owns the drawing factory, the render target and the two brushes of a
//! window. The target and brushes are created lazily on the first paint,
//! resized in place on window resize, thrown away when the device is lost
//! and recreated on the next paint. Everything is released on destroy.
//!
//! ```text
//!   Uninitialized ──paint──▶ Ready ◀──paint── Invalid
//!                              │                 ▲
//!                              └── device lost ──┘
//!   (any) ──destroy──▶ Destroyed
//! ```

use crate::clock::{ClockTime, HandAngles};
use crate::config::{HandConfig, HandsConfig};
use crate::geometry::{Layout, Size};
use crate::theme::Theme;

use super::{Graphics, GraphicsError, PresentStatus, RenderTarget};

/// Where the resource manager is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// No render target yet
    Uninitialized,
    /// Render target and brushes are valid
    Ready,
    /// Device lost or a resize failed; recreated on next paint
    Invalid,
    /// Terminal; nothing may be used
    Destroyed,
}

/// What happened to a paint request
#[derive(Debug)]
pub enum FrameOutcome {
    Presented,
    /// Nothing was drawn; resources are retried on the next paint
    Skipped(GraphicsError),
    /// Submission failed; resources were discarded
    DeviceLost,
}

impl FrameOutcome {
    pub fn is_presented(&self) -> bool {
        matches!(self, FrameOutcome::Presented)
    }
}

/// Colors and hand proportions used to paint the face
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceStyle {
    pub theme: Theme,
    pub hands: HandsConfig,
}

struct DeviceResources<T: RenderTarget> {
    target: T,
    fill: T::Brush,
    stroke: T::Brush,
}

pub struct RenderResources<G: Graphics> {
    graphics: G,
    style: FaceStyle,
    factory: Option<G::Factory>,
    device: Option<DeviceResources<G::Target>>,
    layout: Layout,
    state: ResourceState,
    /// Paints in a row that failed to create the target
    creation_failures: u32,
}

impl<G: Graphics> RenderResources<G> {
    pub fn new(graphics: G, style: FaceStyle) -> Self {
        Self {
            graphics,
            style,
            factory: None,
            device: None,
            layout: Layout::default(),
            state: ResourceState::Uninitialized,
            creation_failures: 0,
        }
    }

    pub fn state(&self) -> ResourceState {
        self.state
    }

    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Consecutive paints skipped because the target could not be created
    pub fn creation_failures(&self) -> u32 {
        self.creation_failures
    }

    pub fn has_target(&self) -> bool {
        self.device.is_some()
    }

    /// Face layout of the current render target
    pub fn layout(&self) -> Option<Layout> {
        self.device.as_ref().map(|_| self.layout)
    }

    pub fn target(&self) -> Option<&G::Target> {
        self.device.as_ref().map(|d| &d.target)
    }

    /// Acquire the drawing factory. Called once when the window is created.
    pub fn create_factory(&mut self, window: &G::Window) -> Result<(), GraphicsError> {
        if self.state == ResourceState::Destroyed {
            return Err(GraphicsError::Released);
        }
        if self.factory.is_none() {
            self.factory = Some(self.graphics.create_factory(window)?);
            tracing::debug!("Drawing factory created");
        }
        Ok(())
    }

    fn create_device(&mut self, window: &G::Window, size: Size) -> Result<(), GraphicsError> {
        let factory = self
            .factory
            .as_mut()
            .ok_or_else(|| GraphicsError::Factory("factory was never created".to_string()))?;

        let mut target = self.graphics.create_target(factory, window, size)?;
        let fill = target.create_solid_brush(self.style.theme.face)?;
        let stroke = target.create_solid_brush(self.style.theme.hands)?;

        self.layout = Layout::from_size(target.size());
        self.device = Some(DeviceResources {
            target,
            fill,
            stroke,
        });
        self.state = ResourceState::Ready;
        tracing::debug!(
            width = size.width,
            height = size.height,
            "Render target created"
        );
        Ok(())
    }

    /// Paint one frame of the clock at `time`.
    ///
    /// Creates the target and brushes first if they are missing. A creation
    /// failure skips the frame and is retried on the next call.
    pub fn render_frame(
        &mut self,
        window: &G::Window,
        client: Size,
        time: &ClockTime,
    ) -> FrameOutcome {
        if self.state == ResourceState::Destroyed {
            return FrameOutcome::Skipped(GraphicsError::Released);
        }
        if client.is_empty() {
            return FrameOutcome::Skipped(GraphicsError::EmptySurface);
        }

        if self.device.is_none() {
            if let Err(e) = self.create_device(window, client) {
                // Paints arrive every frame; only the first failure in a row warns
                if self.creation_failures == 0 {
                    tracing::warn!("Could not create render resources, skipping frame: {}", e);
                } else {
                    tracing::debug!(
                        attempts = self.creation_failures + 1,
                        "Render resource creation still failing: {}",
                        e
                    );
                }
                self.creation_failures = self.creation_failures.saturating_add(1);
                return FrameOutcome::Skipped(e);
            }
            if self.creation_failures > 0 {
                tracing::info!(
                    attempts = self.creation_failures,
                    "Render resources recovered"
                );
                self.creation_failures = 0;
            }
        } else if self.target().is_some_and(|t| t.size() != client) {
            if let Err(e) = self.resize(client) {
                return FrameOutcome::Skipped(e);
            }
        }

        let Some(device) = self.device.as_mut() else {
            return FrameOutcome::Skipped(GraphicsError::Released);
        };

        let angles = HandAngles::from_time(time);
        draw_face(device, &self.layout, &self.style, &angles);

        match device.target.end_draw() {
            PresentStatus::Presented => FrameOutcome::Presented,
            PresentStatus::RecreateTarget => {
                tracing::info!("Render target lost, recreating on next paint");
                self.discard();
                FrameOutcome::DeviceLost
            }
            PresentStatus::Failed(e) => {
                tracing::warn!("Frame submission failed, discarding render target: {}", e);
                self.discard();
                FrameOutcome::DeviceLost
            }
        }
    }

    /// Follow a client-area resize. Only acts when the target exists.
    pub fn resize(&mut self, size: Size) -> Result<(), GraphicsError> {
        if self.state != ResourceState::Ready || size.is_empty() {
            return Ok(());
        }
        let Some(device) = self.device.as_mut() else {
            return Ok(());
        };

        if let Err(e) = device.target.resize(size) {
            tracing::warn!("Render target resize failed, discarding: {}", e);
            self.discard();
            return Err(e);
        }
        self.layout = Layout::from_size(device.target.size());
        Ok(())
    }

    /// Release the render target and brushes
    pub fn discard(&mut self) {
        self.device = None;
        if self.state == ResourceState::Ready {
            self.state = ResourceState::Invalid;
        }
    }

    /// Release everything, including the factory
    pub fn destroy(&mut self) {
        self.device = None;
        self.factory = None;
        self.state = ResourceState::Destroyed;
        tracing::debug!("Render resources released");
    }
}

fn draw_face<T: RenderTarget>(
    device: &mut DeviceResources<T>,
    layout: &Layout,
    style: &FaceStyle,
    angles: &HandAngles,
) {
    let DeviceResources {
        target,
        fill,
        stroke,
    } = device;

    target.begin_draw();
    target.clear(style.theme.background);
    target.fill_ellipse(layout.face(), fill);

    let hands: [(HandConfig, f32); 3] = [
        (style.hands.hour, angles.hour),
        (style.hands.minute, angles.minute),
        (style.hands.second, angles.second),
    ];
    for (hand, angle) in hands {
        let tip = layout.hand_tip(hand.length, angle);
        target.draw_line(layout.center, tip, stroke, hand.width);
    }
}
