use std::sync::Arc;

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;

#[derive(Clone, Debug)]
/// Represents a window.
pub struct Window {
    /// Inner `winit` window.
    window: Arc<winit::window::Window>,
    /// Title given by the descriptor, status texts are appended to it.
    title: String,
}

impl Window {
    /// Creates a new window.
    ///
    /// ## Errors
    ///
    /// Returns the platform error if the window cannot be created.
    pub fn new(
        event_loop: &ActiveEventLoop,
        window_descriptor: &WindowDescriptor,
    ) -> Result<Self, winit::error::OsError> {
        let WindowDescriptor {
            width,
            height,
            position,
            title,
            resizable,
            size_limits,
        } = window_descriptor;

        let limits = size_limits.sanitized();
        let (width, height) = limits.fit(*width, *height);
        let mut attributes = winit::window::Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_min_inner_size(LogicalSize::new(limits.min.0, limits.min.1))
            .with_resizable(*resizable);

        if let Some(position) = position {
            attributes = attributes.with_position(LogicalPosition::new(
                f64::from(position[0]),
                f64::from(position[1]),
            ));
        }

        if let Some((max_width, max_height)) = limits.max {
            attributes = attributes.with_max_inner_size(LogicalSize::new(max_width, max_height));
        }

        let winit_window = event_loop.create_window(attributes)?;

        if let Some(monitor) = winit_window.current_monitor() {
            if let Some(name) = monitor.name() {
                tracing::info!("Window created on monitor {}", name);
            }
        }

        Ok(Self {
            window: Arc::new(winit_window),
            title: title.clone(),
        })
    }

    #[must_use]
    pub fn id(&self) -> winit::window::WindowId {
        self.window.id()
    }
}

impl super::RenderSurface for Window {
    #[inline]
    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    #[inline]
    fn request_render(&mut self) {
        self.window.request_redraw();
    }

    fn set_status(&mut self, status: &str) {
        self.window.set_title(&format!("{} - {status}", self.title));
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
/// Represents a window descriptor.
pub struct WindowDescriptor {
    pub width: u32,
    pub height: u32,
    pub position: Option<[f32; 2]>,
    pub size_limits: SizeLimits,
    pub title: String,
    pub resizable: bool,
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: "Virtual Endoscope".to_string(),
            width: 1280,
            height: 720,
            position: None,
            size_limits: SizeLimits::default(),
            resizable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inner size limits of the viewer window, in logical pixels.
pub struct SizeLimits {
    pub min: (u32, u32),
    /// `None` lets the window grow freely.
    pub max: Option<(u32, u32)>,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min: (320, 240),
            max: None,
        }
    }
}

impl SizeLimits {
    #[must_use]
    /// Raises a zero minimum to one pixel and a maximum below the minimum up to it.
    pub fn sanitized(self) -> Self {
        let min = (self.min.0.max(1), self.min.1.max(1));
        let max = self.max.map(|(width, height)| {
            if width < min.0 || height < min.1 {
                tracing::debug!(
                    "Maximum window size {width}x{height} is below the minimum {}x{}",
                    min.0,
                    min.1
                );
            }
            (width.max(min.0), height.max(min.1))
        });
        Self { min, max }
    }

    /// Brings a requested size within the limits. The minimum wins over a
    /// smaller maximum.
    #[must_use]
    pub fn fit(&self, width: u32, height: u32) -> (u32, u32) {
        let (mut width, mut height) = (width, height);
        if let Some((max_width, max_height)) = self.max {
            width = width.min(max_width);
            height = height.min(max_height);
        }
        (width.max(self.min.0), height.max(self.min.1))
    }
}
