#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::time::{Duration, Instant};

use control::camera::endoscope::{Endoscope, EndoscopeDescriptor};
use navigation::{NavigationConfig, NavigationCoordinator, NavigationEvent};
use render::overlay::{MarkerDescriptor, PositionMarker};
use render::window::{Window, WindowDescriptor};
use render::RenderSurface;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

pub mod control;
pub mod navigation;
pub mod render;

mod math;

pub use math::Vec3;

pub struct EndoscopeApp {
    config: EndoscopeAppConfig,
    window: Option<Window>,
    coordinator: Option<NavigationCoordinator>,
}

impl EndoscopeApp {
    #[must_use]
    pub const fn new(config: EndoscopeAppConfig) -> Self {
        Self {
            config,
            window: None,
            coordinator: None,
        }
    }

    /// The coordinator, once the window exists.
    #[must_use]
    pub const fn coordinator(&self) -> Option<&NavigationCoordinator> {
        self.coordinator.as_ref()
    }

    /// Opens the window and runs until it is closed.
    pub fn run(mut self) -> Result<(), winit::error::EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);
        event_loop.run_app(&mut self)
    }

    fn create_coordinator(&self, window: &Window) -> NavigationCoordinator {
        let mut coordinator = NavigationCoordinator::new(
            self.config.navigation,
            Box::new(Endoscope::new(self.config.endoscope)),
            Box::new(PositionMarker::new(self.config.marker)),
            Box::new(window.clone()),
        );

        coordinator.subscribe(|event| {
            if matches!(event, NavigationEvent::PlaybackEnded) {
                tracing::info!("Reached the end of the path");
            }
        });

        if self.config.path.is_empty() {
            tracing::warn!("No camera path given");
        } else if let Err(err) = coordinator.load_path(&self.config.path) {
            tracing::error!("Failed to load the camera path: {err}");
        } else {
            tracing::info!(
                "Camera path loaded ({} waypoints, {:.1} units)",
                coordinator.total_nodes(),
                coordinator.state().path().total_length()
            );
        }

        coordinator
    }
}

impl ApplicationHandler for EndoscopeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match Window::new(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(err) => {
                tracing::error!("Failed to create the window: {err}");
                event_loop.exit();
                return;
            }
        };

        let (width, height) = window.size();
        tracing::debug!("Window opened at {width}x{height}");

        self.coordinator = Some(self.create_coordinator(&window));
        self.window = Some(window);

        tracing::debug!("Successfully initialized");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window.as_ref().map(Window::id) != Some(window_id) {
            return;
        }

        for controller in &mut self.config.controllers {
            controller.handle_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                if let Some(coordinator) = &self.coordinator {
                    let camera = coordinator.camera();
                    tracing::trace!(
                        "Frame at {:?} looking towards {:?}",
                        camera.position(),
                        camera.direction()
                    );
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Self {
            config, coordinator, ..
        } = self;
        let Some(coordinator) = coordinator else {
            return;
        };

        let now = Instant::now();
        for command in config
            .controllers
            .iter_mut()
            .flat_map(|controller| controller.fetch_input())
        {
            if !coordinator.execute(command, now) {
                tracing::trace!("{command:?} had no effect");
            }
        }

        let animating = coordinator.tick(now);

        // Frames are paced by the frame interval while gliding, otherwise the
        // loop sleeps until the next autoplay advance or the next input.
        let control_flow = if animating {
            now.checked_add(config.frame_interval)
                .map_or(ControlFlow::Poll, ControlFlow::WaitUntil)
        } else if let Some(deadline) = coordinator.next_autoplay_deadline() {
            ControlFlow::WaitUntil(deadline)
        } else {
            ControlFlow::Wait
        };
        event_loop.set_control_flow(control_flow);
    }
}

pub struct EndoscopeAppConfig {
    pub window: WindowDescriptor,
    pub navigation: NavigationConfig,
    pub endoscope: EndoscopeDescriptor,
    pub marker: MarkerDescriptor,
    /// Flat `x, y, z` triples loaded on startup.
    pub path: Vec<f32>,
    /// Pause between two animation frames.
    pub frame_interval: Duration,
    pub controllers: Vec<Box<dyn control::controller::Controller>>,
}

impl Default for EndoscopeAppConfig {
    fn default() -> Self {
        Self {
            window: WindowDescriptor::default(),
            navigation: NavigationConfig::default(),
            endoscope: EndoscopeDescriptor::default(),
            marker: MarkerDescriptor::default(),
            path: Vec::new(),
            frame_interval: Duration::from_millis(16),
            controllers: vec![
                Box::new(control::controller::keyboard::Keyboard::default())
                    as Box<dyn control::controller::Controller>,
            ],
        }
    }
}
