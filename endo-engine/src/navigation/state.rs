use std::collections::VecDeque;
use std::time::Duration;

use super::{PathSequence, PlaybackError, Waypoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Autoplay state.
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Notifications queued by [`NavigationState`] and drained by its owner.
pub enum NavigationEvent {
    /// The cursor moved onto `waypoint` at `index`.
    Navigated { index: usize, waypoint: Waypoint },
    /// Autoplay ran past the last waypoint with loop mode disabled.
    PlaybackEnded,
}

#[derive(Debug, Clone, Copy)]
/// Autoplay settings.
pub struct PlaybackConfig {
    /// Time between two autoplay advances at speed 1.0.
    pub interval: Duration,
    /// Speed multiplier applied to `interval`. Must be positive.
    pub play_speed: f32,
    /// Whether autoplay wraps around to the first waypoint.
    pub loop_mode: bool,
    /// Lower bound reachable through [`NavigationState::speed_up`].
    pub min_interval: Duration,
    /// Upper bound reachable through [`NavigationState::slow_down`].
    pub max_interval: Duration,
    /// Interval change applied by a single speed up or slow down.
    pub interval_step: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            play_speed: 1.0,
            loop_mode: false,
            min_interval: Duration::from_millis(20),
            max_interval: Duration::from_millis(1000),
            interval_step: Duration::from_millis(20),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// A path with a cursor, autoplay and loop semantics.
///
/// Successful moves do not call back into user code: they queue a
/// [`NavigationEvent`] which the owner collects with [`Self::drain_events`].
pub struct NavigationState {
    path: PathSequence,
    playback: PlaybackState,
    config: PlaybackConfig,
    events: VecDeque<NavigationEvent>,
}

impl NavigationState {
    #[must_use]
    pub fn new(config: PlaybackConfig) -> Self {
        let mut state = Self::default();
        if let Err(err) = state.set_play_speed(config.play_speed) {
            tracing::warn!("{err}, using {}x", state.config.play_speed);
        }
        if let Err(err) = state.set_play_interval(config.interval) {
            tracing::warn!("{err}, using {:?}", state.config.interval);
        }
        state.config = PlaybackConfig {
            interval: state.config.interval,
            play_speed: state.config.play_speed,
            ..config
        };
        state
    }

    /// Replaces the path, stopping autoplay and moving to its first waypoint.
    pub fn set_path(&mut self, path: PathSequence) {
        self.stop_autoplay();
        self.path = path;
        self.path.reset();
        tracing::debug!("Camera path set with {} waypoints", self.path.len());
        self.notify_current();
    }

    /// Stops autoplay and drops every waypoint.
    pub fn clear_path(&mut self) {
        self.stop_autoplay();
        self.path.clear();
        tracing::debug!("Camera path cleared");
    }

    #[must_use]
    pub const fn path(&self) -> &PathSequence {
        &self.path
    }

    pub fn move_to_next(&mut self) -> bool {
        let moved = self.path.move_next();
        if moved {
            self.notify_current();
        }
        moved
    }

    pub fn move_to_previous(&mut self) -> bool {
        let moved = self.path.move_previous();
        if moved {
            self.notify_current();
        }
        moved
    }

    /// Returns `false` when there is no waypoint to move to.
    pub fn move_to_first(&mut self) -> bool {
        if self.path.is_empty() {
            return false;
        }
        self.path.reset();
        self.notify_current();
        true
    }

    /// Returns `false` when there is no waypoint to move to.
    pub fn move_to_last(&mut self) -> bool {
        if self.path.is_empty() {
            return false;
        }
        while !self.path.is_at_end() && self.path.move_next() {}
        self.notify_current();
        true
    }

    pub fn move_to_position(&mut self, index: usize) -> bool {
        match self.path.try_jump_to(index) {
            Ok(()) => {
                self.notify_current();
                true
            }
            Err(err) => {
                tracing::debug!("Ignoring jump: {err}");
                false
            }
        }
    }

    /// Stops autoplay and moves to the first waypoint.
    pub fn reset(&mut self) {
        self.stop_autoplay();
        self.move_to_first();
    }

    /// Starts autoplay with the given advance interval.
    ///
    /// Returns `false` if autoplay was already running or there is no path.
    pub fn start_autoplay(&mut self, interval: Duration) -> bool {
        if self.path.is_empty() || self.playback == PlaybackState::Playing {
            return false;
        }
        if let Err(err) = self.set_play_interval(interval) {
            tracing::warn!("{err}, keeping {:?}", self.config.interval);
        }
        self.playback = PlaybackState::Playing;
        tracing::debug!("Autoplay started (interval: {:?})", self.config.interval);
        true
    }

    pub fn stop_autoplay(&mut self) {
        if self.playback != PlaybackState::Idle {
            self.playback = PlaybackState::Idle;
            tracing::debug!("Autoplay stopped");
        }
    }

    /// Only pauses a running autoplay.
    pub fn pause_autoplay(&mut self) -> bool {
        if self.playback != PlaybackState::Playing {
            return false;
        }
        self.playback = PlaybackState::Paused;
        tracing::debug!("Autoplay paused");
        true
    }

    /// Only resumes a paused autoplay.
    pub fn resume_autoplay(&mut self) -> bool {
        if self.playback != PlaybackState::Paused {
            return false;
        }
        self.playback = PlaybackState::Playing;
        tracing::debug!("Autoplay resumed");
        true
    }

    /// Idle starts, playing pauses, paused resumes.
    pub fn toggle_autoplay(&mut self) {
        match self.playback {
            PlaybackState::Idle => {
                self.start_autoplay(self.config.interval);
            }
            PlaybackState::Playing => {
                self.pause_autoplay();
            }
            PlaybackState::Paused => {
                self.resume_autoplay();
            }
        }
    }

    /// One firing of the autoplay timer.
    ///
    /// Advances the cursor; past the last waypoint it either wraps to the
    /// first one (loop mode) or stops autoplay and queues
    /// [`NavigationEvent::PlaybackEnded`]. Returns whether the cursor moved.
    pub fn autoplay_tick(&mut self) -> bool {
        if self.playback != PlaybackState::Playing {
            return false;
        }
        if self.move_to_next() {
            return true;
        }

        if self.config.loop_mode {
            tracing::trace!("Autoplay wrapped to the first waypoint");
            self.move_to_first()
        } else {
            self.stop_autoplay();
            self.events.push_back(NavigationEvent::PlaybackEnded);
            tracing::debug!("Autoplay reached the end of the path");
            false
        }
    }

    #[must_use]
    pub const fn playback_state(&self) -> PlaybackState {
        self.playback
    }

    #[must_use]
    /// `true` while autoplay is running and not paused.
    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.playback == PlaybackState::Paused
    }

    #[must_use]
    /// Effective time between two autoplay advances.
    ///
    /// Saturates at [`Duration::MAX`] when a tiny speed stretches the
    /// interval past what a `Duration` can hold.
    pub fn tick_interval(&self) -> Duration {
        let seconds = self.config.interval.as_secs_f64() / f64::from(self.config.play_speed);
        Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
    }

    #[must_use]
    pub const fn play_interval(&self) -> Duration {
        self.config.interval
    }

    pub fn set_play_interval(&mut self, interval: Duration) -> Result<(), PlaybackError> {
        if interval.is_zero() {
            return Err(PlaybackError::InvalidInterval(interval));
        }
        self.config.interval = interval;
        Ok(())
    }

    #[must_use]
    pub const fn play_speed(&self) -> f32 {
        self.config.play_speed
    }

    pub fn set_play_speed(&mut self, speed: f32) -> Result<(), PlaybackError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(PlaybackError::InvalidPlaySpeed(speed));
        }
        self.config.play_speed = speed;
        tracing::debug!("Play speed set to {speed}x");
        Ok(())
    }

    /// Shortens the autoplay interval by one step, down to the configured minimum.
    pub fn speed_up(&mut self) -> Duration {
        let PlaybackConfig {
            interval,
            min_interval,
            interval_step,
            ..
        } = self.config;
        if interval > min_interval {
            self.config.interval = interval.saturating_sub(interval_step).max(min_interval);
        }
        self.config.interval
    }

    /// Lengthens the autoplay interval by one step, up to the configured maximum.
    pub fn slow_down(&mut self) -> Duration {
        let PlaybackConfig {
            interval,
            max_interval,
            interval_step,
            ..
        } = self.config;
        if interval < max_interval {
            self.config.interval = (interval + interval_step).min(max_interval);
        }
        self.config.interval
    }

    #[must_use]
    pub const fn loop_mode(&self) -> bool {
        self.config.loop_mode
    }

    pub fn set_loop_mode(&mut self, loop_mode: bool) {
        self.config.loop_mode = loop_mode;
        tracing::debug!(
            "Loop mode {}",
            if loop_mode { "enabled" } else { "disabled" }
        );
    }

    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.path.current_index()
    }

    #[must_use]
    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        self.path.current()
    }

    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    /// Also `true` when no path is loaded.
    pub fn is_at_start(&self) -> bool {
        self.path.is_empty() || self.path.is_at_start()
    }

    #[must_use]
    /// Also `true` when no path is loaded.
    pub fn is_at_end(&self) -> bool {
        self.path.is_empty() || self.path.is_at_end()
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    /// `(current index + 1) / total * 100`, or 0 for an empty path.
    pub fn progress_percentage(&self) -> f32 {
        match self.path.current_index() {
            Some(index) if !self.path.is_empty() => {
                (index + 1) as f32 / self.path.len() as f32 * 100.0
            }
            _ => 0.0,
        }
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<NavigationEvent> {
        self.events.drain(..).collect()
    }

    fn notify_current(&mut self) {
        if let (Some(index), Some(waypoint)) = (self.path.current_index(), self.path.current()) {
            tracing::trace!("Moved to waypoint {} / {}", index + 1, self.path.len());
            self.events.push_back(NavigationEvent::Navigated {
                index,
                waypoint: *waypoint,
            });
        }
    }
}
