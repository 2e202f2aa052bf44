use std::f32::consts::PI;
use std::time::{Duration, Instant};

use super::Waypoint;
use crate::math::{self, Vec3};

/// Above this cosine two directions are treated as parallel,
/// below its opposite as anti-parallel.
const PARALLEL_THRESHOLD: f32 = 0.9995;

#[derive(Debug, Clone, Copy, PartialEq)]
/// How long a transition takes, depending on the distance it covers.
///
/// `duration = clamp(base_duration + distance * duration_per_unit, min_duration, max_duration)`
pub struct TransitionConfig {
    pub base_duration: Duration,
    /// Extra time per world unit of distance.
    pub duration_per_unit: Duration,
    pub min_duration: Duration,
    pub max_duration: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            base_duration: Duration::from_millis(300),
            duration_per_unit: Duration::from_millis(10),
            min_duration: Duration::from_millis(200),
            max_duration: Duration::from_millis(1500),
        }
    }
}

impl TransitionConfig {
    #[must_use]
    /// Duration of a transition covering `distance` world units.
    pub fn duration_for(&self, distance: f32) -> Duration {
        let seconds = self
            .duration_per_unit
            .as_secs_f64()
            .mul_add(f64::from(distance), self.base_duration.as_secs_f64());
        // `max` then `min` so that a NaN distance lands on the minimum.
        let seconds = seconds
            .max(self.min_duration.as_secs_f64())
            .min(self.max_duration.as_secs_f64());
        Duration::from_secs_f64(seconds.max(0.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// The transition currently known to a [`TransitionAnimator`].
pub struct TransitionState {
    pub start: Waypoint,
    pub target: Waypoint,
    pub started_at: Instant,
    /// Time spent so far, never above `duration`.
    pub elapsed: Duration,
    /// Fixed when the transition starts.
    pub duration: Duration,
    pub active: bool,
}

impl TransitionState {
    #[must_use]
    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        #[allow(clippy::cast_possible_truncation)]
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32;
        progress.clamp(0.0, 1.0)
    }

    #[must_use]
    /// Interpolated pose at the linear progress `progress`.
    ///
    /// Position is lerped, direction slerped, both along the eased curve.
    /// A finished transition yields exactly the target pose.
    pub fn pose_at_progress(&self, progress: f32) -> Waypoint {
        if progress >= 1.0 {
            return self.target;
        }
        let eased = ease_in_out_cubic(progress);
        Waypoint {
            position: math::lerp(&self.start.position, &self.target.position, eased),
            direction: slerp(self.start.direction, self.target.direction, eased),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Output of one [`TransitionAnimator::update`] call.
pub struct TransitionFrame {
    pub pose: Waypoint,
    /// Eased progress in `[0, 1]`.
    pub progress: f32,
    /// `false` once the target pose has been reached.
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
/// Glides a camera pose towards a target waypoint, one render tick at a time.
///
/// At most one transition exists at a time. Starting a new one replaces the
/// current one, so callers should start from the pose the camera actually
/// shows (see [`Self::sample`]) to avoid jumps.
pub struct TransitionAnimator {
    config: TransitionConfig,
    transition: Option<TransitionState>,
}

impl TransitionAnimator {
    #[must_use]
    pub const fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            transition: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Starts a transition from `from` to `to` at `now` and returns its duration.
    pub fn start(&mut self, from: Waypoint, to: Waypoint, now: Instant) -> Duration {
        let distance = math::distance(&from.position, &to.position);
        let duration = self.config.duration_for(distance);

        tracing::trace!("Transition over {distance:.3} units will take {duration:?}");

        self.transition = Some(TransitionState {
            start: from,
            target: to,
            started_at: now,
            elapsed: Duration::ZERO,
            duration,
            active: true,
        });

        duration
    }

    /// Advances the active transition to `now`.
    ///
    /// Returns `None` if no transition is active. The frame returned for the
    /// final tick carries the exact target pose and `active == false`.
    pub fn update(&mut self, now: Instant) -> Option<TransitionFrame> {
        let transition = self.transition.as_mut().filter(|t| t.active)?;

        let progress = transition.progress_at(now);
        transition.elapsed = now
            .saturating_duration_since(transition.started_at)
            .min(transition.duration);
        let pose = transition.pose_at_progress(progress);

        if progress >= 1.0 {
            transition.active = false;
            tracing::trace!("Transition finished");
        }

        Some(TransitionFrame {
            pose,
            progress: ease_in_out_cubic(progress),
            active: transition.active,
        })
    }

    #[must_use]
    /// The pose the active transition shows at `now`, without advancing it.
    pub fn sample(&self, now: Instant) -> Option<Waypoint> {
        self.transition
            .as_ref()
            .filter(|t| t.active)
            .map(|t| t.pose_at_progress(t.progress_at(now)))
    }

    /// Deactivates the current transition, leaving the camera where it is.
    pub fn cancel(&mut self) {
        if let Some(transition) = self.transition.as_mut() {
            transition.active = false;
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.transition.as_ref().is_some_and(|t| t.active)
    }

    #[must_use]
    pub const fn state(&self) -> Option<&TransitionState> {
        self.transition.as_ref()
    }
}

#[must_use]
/// Cubic ease-in-out: zero velocity at both ends, `t` is clamped to `[0, 1]`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f32).mul_add(t, 2.0).powi(3) / 2.0
    }
}

#[must_use]
/// Spherical linear interpolation between two unit vectors.
///
/// Nearly parallel inputs are lerped and renormalized. Nearly opposite
/// inputs are rotated around `from x to` by their exact angle. Exactly
/// opposite inputs have no rotation plane, so `from` turns by `PI * t`
/// around an arbitrary axis orthogonal to it.
pub fn slerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let dot = math::dot(&from, &to).clamp(-1.0, 1.0);

    if dot > PARALLEL_THRESHOLD {
        return math::normalize_or(&math::lerp(&from, &to, t), from);
    }

    if dot < -PARALLEL_THRESHOLD {
        let normal = math::cross(&from, &to);
        let sin_theta = math::length(&normal);
        let (axis, theta) = if sin_theta > math::EPSILON {
            (math::scale(&normal, sin_theta.recip()), sin_theta.atan2(dot))
        } else {
            let arbitrary = math::cross(&from, &math::non_collinear_axis(&from));
            (math::normalize_or(&arbitrary, [0.0, 1.0, 0.0]), PI)
        };
        return math::normalize_or(&math::rotate_around(&from, &axis, theta * t), from);
    }

    let theta = dot.acos();
    let sin_theta = theta.sin();
    let w1 = ((1.0 - t) * theta).sin() / sin_theta;
    let w2 = (t * theta).sin() / sin_theta;

    math::normalize_or(
        &math::add(&math::scale(&from, w1), &math::scale(&to, w2)),
        from,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_abs_diff_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_abs_diff_eq!(ease_in_out_cubic(0.5), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_abs_diff_eq!(ease_in_out_cubic(0.25), 0.0625, epsilon = 1e-6);
        assert_abs_diff_eq!(ease_in_out_cubic(0.75), 0.9375, epsilon = 1e-6);
    }

    #[test]
    fn easing_clamps_out_of_range_input() {
        assert_abs_diff_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_abs_diff_eq!(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn easing_is_monotonic() {
        let mut previous = 0.0;
        for i in 0..=100 {
            #[allow(clippy::cast_precision_loss)]
            let value = ease_in_out_cubic(i as f32 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn slerp_quarter_turn_midpoint() {
        let r = slerp([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.5);
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(r[0], half, epsilon = 1e-6);
        assert_abs_diff_eq!(r[1], half, epsilon = 1e-6);
        assert_abs_diff_eq!(r[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn slerp_of_opposite_vectors_stays_unit_and_orthogonal() {
        let from = [0.0, 0.0, 1.0];
        let to = [0.0, 0.0, -1.0];
        let r = slerp(from, to, 0.5);
        assert_abs_diff_eq!(math::length(&r), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(math::dot(&r, &from), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(math::dot(&r, &to), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn slerp_of_opposite_x_aligned_vectors() {
        let r = slerp([1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], 0.5);
        assert_abs_diff_eq!(math::length(&r), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(r[0], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn slerp_of_nearly_parallel_vectors_is_unit() {
        let from = [1.0, 0.0, 0.0];
        let to = math::normalize_or(&[1.0, 0.01, 0.0], from);
        let r = slerp(from, to, 0.3);
        assert_abs_diff_eq!(math::length(&r), 1.0, epsilon = 1e-6);
        assert!(r[1] > 0.0 && r[1] < to[1]);
    }

    #[test]
    fn slerp_of_nearly_opposite_vectors_ends_on_target() {
        let from = [1.0, 0.0, 0.0];
        let to = math::normalize_or(&[-1.0, 0.02, 0.0], from);

        let end = slerp(from, to, 1.0);
        for axis in 0..3 {
            assert_abs_diff_eq!(end[axis], to[axis], epsilon = 1e-5);
        }

        // The turn stays in the plane of both directions.
        let halfway = slerp(from, to, 0.5);
        assert_abs_diff_eq!(math::length(&halfway), 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(halfway[2], 0.0, epsilon = 1e-6);
        assert!(halfway[1] > 0.99);
    }

    #[test]
    fn duration_is_clamped() {
        let config = TransitionConfig::default();
        assert_abs_diff_eq!(config.duration_for(0.0).as_secs_f64(), 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(config.duration_for(100.0).as_secs_f64(), 1.3, epsilon = 1e-6);
        assert_abs_diff_eq!(config.duration_for(10_000.0).as_secs_f64(), 1.5, epsilon = 1e-6);
        assert_abs_diff_eq!(config.duration_for(f32::NAN).as_secs_f64(), 0.2, epsilon = 1e-6);
    }
}
