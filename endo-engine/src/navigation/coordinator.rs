use std::time::{Duration, Instant};

use super::{
    NavigationEvent, NavigationState, PathError, PathSequence, PlaybackConfig, PlaybackError,
    PlaybackState,
    TransitionAnimator, TransitionConfig, Waypoint,
};
use crate::control::camera::Camera;
use crate::control::Command;
use crate::render::overlay::{Marker, PathOverlay, PathOverlayDescriptor};
use crate::render::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// What a step command does while the camera is still gliding.
pub enum BusyPolicy {
    /// Glide from the current in-between pose towards the newest target.
    #[default]
    Coalesce,
    /// Ignore the command until the glide is over.
    Reject,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationConfig {
    pub transition: TransitionConfig,
    pub playback: PlaybackConfig,
    pub busy_policy: BusyPolicy,
    pub path_overlay: PathOverlayDescriptor,
}

pub type Observer = Box<dyn FnMut(&NavigationEvent)>;

/// Drives the camera along a path.
///
/// Every successful move starts a transition from the pose the camera
/// currently shows; [`Self::tick`] then runs the autoplay timer and pushes
/// the interpolated pose to the camera and the marker until the transition
/// is over.
pub struct NavigationCoordinator {
    state: NavigationState,
    animator: TransitionAnimator,
    camera: Box<dyn Camera>,
    marker: Box<dyn Marker>,
    surface: Box<dyn RenderSurface>,
    overlay: PathOverlay,
    busy_policy: BusyPolicy,
    observers: Vec<Observer>,
    last_advance: Option<Instant>,
}

impl NavigationCoordinator {
    #[must_use]
    pub fn new(
        config: NavigationConfig,
        camera: Box<dyn Camera>,
        marker: Box<dyn Marker>,
        surface: Box<dyn RenderSurface>,
    ) -> Self {
        Self {
            state: NavigationState::new(config.playback),
            animator: TransitionAnimator::new(config.transition),
            camera,
            marker,
            surface,
            overlay: PathOverlay::new(config.path_overlay),
            busy_policy: config.busy_policy,
            observers: Vec::new(),
            last_advance: None,
        }
    }

    /// Registers a callback receiving every navigation event.
    ///
    /// Callbacks run after the move that caused the event is complete.
    pub fn subscribe(&mut self, observer: impl FnMut(&NavigationEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the path with one built from flat `x, y, z` triples.
    ///
    /// ## Errors
    ///
    /// Fails on malformed or too short data, in which case the current path
    /// is kept untouched.
    pub fn load_path(&mut self, positions: &[f32]) -> Result<(), PathError> {
        let path = PathSequence::from_positions(positions).map_err(|err| {
            tracing::warn!("Invalid path data: {err}");
            err
        })?;
        self.set_path(path);
        Ok(())
    }

    /// Replaces the path and places the camera on its first waypoint at once.
    pub fn set_path(&mut self, path: PathSequence) {
        // Nothing may keep interpolating against the old waypoints.
        self.state.stop_autoplay();
        self.animator.cancel();

        self.state.set_path(path);
        self.overlay.rebuild(self.state.path());

        if let Some(waypoint) = self.state.current_waypoint().copied() {
            self.show_pose(&waypoint);
        }
        tracing::debug!("Path loaded with {} waypoints", self.state.total_nodes());

        let events = self.state.drain_events();
        self.notify(&events);
    }

    /// Stops everything and drops the path.
    pub fn clear_path(&mut self) {
        self.state.stop_autoplay();
        self.animator.cancel();
        self.state.clear_path();
        self.overlay.clear();
        self.surface.request_render();
    }

    pub fn request_next(&mut self, now: Instant) -> bool {
        if !self.accepts_step() {
            return false;
        }
        let moved = self.state.move_to_next();
        self.dispatch(now);
        moved
    }

    pub fn request_previous(&mut self, now: Instant) -> bool {
        if !self.accepts_step() {
            return false;
        }
        let moved = self.state.move_to_previous();
        self.dispatch(now);
        moved
    }

    pub fn request_first(&mut self, now: Instant) -> bool {
        let moved = self.state.move_to_first();
        self.dispatch(now);
        moved
    }

    pub fn request_last(&mut self, now: Instant) -> bool {
        let moved = self.state.move_to_last();
        self.dispatch(now);
        moved
    }

    pub fn request_jump(&mut self, index: usize, now: Instant) -> bool {
        let moved = self.state.move_to_position(index);
        self.dispatch(now);
        moved
    }

    /// Starts autoplay with the configured interval. The first advance
    /// happens one interval after `now`.
    pub fn start_autoplay(&mut self, now: Instant) -> bool {
        let started = self.state.start_autoplay(self.state.play_interval());
        if started {
            self.last_advance = Some(now);
        }
        started
    }

    /// Stops future advances. A glide in progress still finishes.
    pub fn stop_autoplay(&mut self) {
        self.state.stop_autoplay();
    }

    pub fn pause_autoplay(&mut self) -> bool {
        self.state.pause_autoplay()
    }

    pub fn resume_autoplay(&mut self, now: Instant) -> bool {
        let resumed = self.state.resume_autoplay();
        if resumed {
            self.last_advance = Some(now);
        }
        resumed
    }

    pub fn toggle_autoplay(&mut self, now: Instant) {
        self.state.toggle_autoplay();
        if self.state.is_playing() {
            self.last_advance = Some(now);
        }
    }

    pub fn set_loop_mode(&mut self, loop_mode: bool) {
        self.state.set_loop_mode(loop_mode);
    }

    /// ## Errors
    ///
    /// Rejects speeds that are not positive and finite.
    pub fn set_play_speed(&mut self, speed: f32) -> Result<(), PlaybackError> {
        self.state.set_play_speed(speed).map_err(|err| {
            tracing::warn!("{err}");
            err
        })
    }

    pub fn speed_up(&mut self) -> Duration {
        let interval = self.state.speed_up();
        tracing::debug!("Autoplay interval: {interval:?}");
        interval
    }

    pub fn slow_down(&mut self) -> Duration {
        let interval = self.state.slow_down();
        tracing::debug!("Autoplay interval: {interval:?}");
        interval
    }

    /// Runs a controller command. Returns `false` if it had no effect.
    pub fn execute(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Next => self.request_next(now),
            Command::Previous => self.request_previous(now),
            Command::First => self.request_first(now),
            Command::Last => self.request_last(now),
            Command::JumpTo(index) => self.request_jump(index, now),
            Command::ToggleAutoPlay => {
                let before = self.state.playback_state();
                self.toggle_autoplay(now);
                before != self.state.playback_state()
            }
            Command::StopAutoPlay => {
                let was_running = self.state.playback_state() != PlaybackState::Idle;
                self.stop_autoplay();
                was_running
            }
            Command::SpeedUp => {
                let before = self.state.play_interval();
                before != self.speed_up()
            }
            Command::SlowDown => {
                let before = self.state.play_interval();
                before != self.slow_down()
            }
            Command::ToggleLoop => {
                self.set_loop_mode(!self.state.loop_mode());
                true
            }
        }
    }

    /// One pass of the event loop.
    ///
    /// Fires the autoplay advance if its interval elapsed, then moves the
    /// glide forward. Returns whether the glide needs more frames.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.autoplay_due(now) {
            self.last_advance = Some(now);
            self.state.autoplay_tick();
            self.dispatch(now);
        }
        self.update_animation(now)
    }

    /// Pushes the pose of the active glide at `now` to the camera and the
    /// marker. Returns `false` once the glide is over.
    pub fn update_animation(&mut self, now: Instant) -> bool {
        let Some(frame) = self.animator.update(now) else {
            return false;
        };
        self.show_pose(&frame.pose);
        frame.active
    }

    #[must_use]
    /// When the next autoplay advance is due.
    ///
    /// `None` while not playing, or when the interval reaches past any
    /// representable instant (the advance never comes).
    pub fn next_autoplay_deadline(&self) -> Option<Instant> {
        if !self.state.is_playing() {
            return None;
        }
        self.last_advance
            .and_then(|last| last.checked_add(self.state.tick_interval()))
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.animator.is_active()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    #[must_use]
    pub const fn playback_state(&self) -> PlaybackState {
        self.state.playback_state()
    }

    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.state.total_nodes()
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.state.is_at_start()
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.state.is_at_end()
    }

    #[must_use]
    pub fn progress_percentage(&self) -> f32 {
        self.state.progress_percentage()
    }

    #[must_use]
    /// Progress label, `"Path: 3/42"`.
    pub fn status_line(&self) -> String {
        match self.state.current_index() {
            Some(index) => format!("Path: {}/{}", index + 1, self.state.total_nodes()),
            None => "Path: -".to_string(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub const fn animator(&self) -> &TransitionAnimator {
        &self.animator
    }

    #[must_use]
    pub fn camera(&self) -> &dyn Camera {
        self.camera.as_ref()
    }

    #[must_use]
    pub fn marker(&self) -> &dyn Marker {
        self.marker.as_ref()
    }

    #[must_use]
    pub const fn path_overlay(&self) -> &PathOverlay {
        &self.overlay
    }

    pub fn path_overlay_mut(&mut self) -> &mut PathOverlay {
        &mut self.overlay
    }

    #[must_use]
    /// The pose the camera currently shows.
    pub fn camera_pose(&self) -> Waypoint {
        Waypoint {
            position: self.camera.position(),
            direction: self.camera.direction(),
        }
    }

    fn accepts_step(&self) -> bool {
        if self.busy_policy == BusyPolicy::Reject && self.animator.is_active() {
            tracing::trace!("Step ignored, transition in progress");
            return false;
        }
        true
    }

    fn autoplay_due(&self, now: Instant) -> bool {
        self.next_autoplay_deadline()
            .is_some_and(|deadline| now >= deadline)
    }

    /// Starts transitions for queued moves, then hands the events to observers.
    fn dispatch(&mut self, now: Instant) {
        let events = self.state.drain_events();
        if events.is_empty() {
            return;
        }

        for event in &events {
            if let NavigationEvent::Navigated { waypoint, .. } = event {
                // Resample an interrupted glide so the camera never snaps back.
                let from = self
                    .animator
                    .sample(now)
                    .unwrap_or_else(|| self.camera_pose());
                self.animator.start(from, *waypoint, now);
            }
        }

        self.notify(&events);
    }

    fn notify(&mut self, events: &[NavigationEvent]) {
        if events.is_empty() {
            return;
        }
        let status = self.status_line();
        self.surface.set_status(&status);
        for event in events {
            for observer in &mut self.observers {
                observer(event);
            }
        }
    }

    fn show_pose(&mut self, pose: &Waypoint) {
        self.camera.set_pose(pose.position, pose.direction);
        self.marker.set_position(pose.position);
        self.surface.request_render();
    }
}
