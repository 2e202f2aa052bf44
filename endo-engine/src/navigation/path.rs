use std::f32::consts::TAU;

use super::PathError;
use crate::math::{self, Vec3};

/// Direction used when a waypoint's direction cannot be derived.
pub const DEFAULT_DIRECTION: Vec3 = [0.0, 0.0, 1.0];

#[derive(Copy, Clone, Debug, PartialEq)]
/// A recorded point along the camera path.
///
/// `direction` is always of unit length.
pub struct Waypoint {
    pub position: Vec3,
    pub direction: Vec3,
}

impl Waypoint {
    #[must_use]
    /// Creates a waypoint, normalizing `direction`.
    ///
    /// A zero-length direction is replaced by [`DEFAULT_DIRECTION`].
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction: math::normalize_or(&direction, DEFAULT_DIRECTION),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// An ordered sequence of waypoints with a cursor on the current one.
///
/// The cursor is `None` exactly when the sequence is empty.
pub struct PathSequence {
    waypoints: Vec<Waypoint>,
    cursor: Option<usize>,
}

impl PathSequence {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            waypoints: Vec::new(),
            cursor: None,
        }
    }

    /// Builds a path from flat `x, y, z` triples.
    ///
    /// ## Errors
    ///
    /// Fails if the value count is not a multiple of 3 or if fewer than
    /// 2 points are given.
    pub fn from_positions(positions: &[f32]) -> Result<Self, PathError> {
        if positions.len() % 3 != 0 {
            return Err(PathError::MalformedTriples {
                len: positions.len(),
            });
        }

        let points = positions
            .chunks_exact(3)
            .map(|chunk| [chunk[0], chunk[1], chunk[2]])
            .collect::<Vec<_>>();

        Self::from_points(&points)
    }

    /// Builds a path from a list of points, deriving each waypoint's
    /// direction from the segment towards the next point. The last point
    /// reuses the direction of the segment leading to it.
    ///
    /// ## Errors
    ///
    /// Fails if fewer than 2 points are given.
    pub fn from_points(points: &[Vec3]) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewPoints {
                count: points.len(),
            });
        }

        let segments = points
            .windows(2)
            .map(|pair| {
                let segment = math::sub(&pair[1], &pair[0]);
                (math::length(&segment) > math::EPSILON)
                    .then(|| math::normalize_or(&segment, DEFAULT_DIRECTION))
            })
            .collect::<Vec<_>>();

        let mut path = Self::new();
        let mut previous_direction = None;
        for (i, position) in points.iter().enumerate() {
            let own_segment = segments[i.min(segments.len() - 1)];
            // Coincident points have no segment of their own.
            let direction = own_segment
                .or(previous_direction)
                .or_else(|| segments[i.min(segments.len() - 1)..].iter().find_map(|s| *s))
                .unwrap_or(DEFAULT_DIRECTION);

            previous_direction = Some(direction);
            path.add_waypoint(*position, direction);
        }

        tracing::trace!(
            "Path built with {} waypoints, {:.3} units long",
            path.len(),
            path.total_length()
        );

        Ok(path)
    }

    /// Appends a waypoint. `direction` gets normalized.
    pub fn add_waypoint(&mut self, position: Vec3, direction: Vec3) {
        self.waypoints.push(Waypoint::new(position, direction));
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
    }

    /// Removes every waypoint.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.cursor = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    /// Returns the waypoint under the cursor, `None` if the path is empty.
    pub fn current(&self) -> Option<&Waypoint> {
        self.cursor.and_then(|index| self.waypoints.get(index))
    }

    /// Advances the cursor. Returns `false` at the last waypoint.
    pub fn move_next(&mut self) -> bool {
        match self.cursor {
            Some(index) if index + 1 < self.waypoints.len() => {
                self.cursor = Some(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Moves the cursor back. Returns `false` at the first waypoint.
    pub fn move_previous(&mut self) -> bool {
        match self.cursor {
            Some(index) if index > 0 => {
                self.cursor = Some(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Sets the cursor to `index`.
    ///
    /// ## Errors
    ///
    /// Fails without touching the cursor if `index` is out of range.
    pub fn try_jump_to(&mut self, index: usize) -> Result<(), PathError> {
        if index >= self.waypoints.len() {
            return Err(PathError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            });
        }
        self.cursor = Some(index);
        Ok(())
    }

    /// Sets the cursor to `index`, returns `false` if it is out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.try_jump_to(index).is_ok()
    }

    /// Puts the cursor back on the first waypoint.
    pub fn reset(&mut self) {
        if !self.waypoints.is_empty() {
            self.cursor = Some(0);
        }
    }

    #[must_use]
    pub const fn is_at_start(&self) -> bool {
        matches!(self.cursor, Some(0))
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.cursor
            .is_some_and(|index| index + 1 == self.waypoints.len())
    }

    #[must_use]
    /// Sum of the distances between consecutive waypoints.
    pub fn total_length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|pair| math::distance(&pair[0].position, &pair[1].position))
            .sum()
    }

    #[must_use]
    /// Samples the path at the fraction `t` of its arc length.
    ///
    /// The position is interpolated linearly inside the matching segment,
    /// and so is the direction (renormalized). `t` is clamped to `[0, 1]`.
    pub fn interpolate_at(&self, t: f32) -> Option<Waypoint> {
        let first = *self.waypoints.first()?;
        if self.waypoints.len() == 1 {
            return Some(first);
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let target_length = t * self.total_length();
        let mut walked = 0.0;

        for pair in self.waypoints.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            let segment_length = math::distance(&from.position, &to.position);

            if walked + segment_length >= target_length {
                let local_t = if segment_length > math::EPSILON {
                    ((target_length - walked) / segment_length).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let direction = math::lerp(&from.direction, &to.direction, local_t);
                return Some(Waypoint {
                    position: math::lerp(&from.position, &to.position, local_t),
                    direction: math::normalize_or(&direction, from.direction),
                });
            }

            walked += segment_length;
        }

        self.waypoints.last().copied()
    }

    #[must_use]
    /// Waypoint positions as a polyline, `None` for paths with fewer than 2 waypoints.
    pub fn polyline(&self) -> Option<Vec<Vec3>> {
        (self.waypoints.len() >= 2).then(|| self.waypoints.iter().map(|w| w.position).collect())
    }

    #[must_use]
    /// Builds a capped tube of the given radius around the polyline.
    ///
    /// Returns `None` for paths with fewer than 2 waypoints.
    pub fn tube(&self, radius: f32, sides: usize) -> Option<TubeMesh> {
        let polyline = self.polyline()?;
        let sides = sides.max(3);
        let ring_count = polyline.len();

        let vertex_count = ring_count * sides + 2;
        // Every index below is smaller than vertex_count.
        u32::try_from(vertex_count).ok()?;
        #[allow(clippy::cast_possible_truncation)]
        let index = |i: usize| i as u32;

        let tangents = (0..ring_count)
            .map(|i| {
                let before = math::sub(&polyline[i], &polyline[i.saturating_sub(1)]);
                let after = math::sub(&polyline[(i + 1).min(ring_count - 1)], &polyline[i]);
                let before = math::normalize_or(&before, [0.0; 3]);
                let after = math::normalize_or(&after, [0.0; 3]);
                math::normalize_or(&math::add(&before, &after), self.waypoints[i].direction)
            })
            .collect::<Vec<_>>();

        let mut vertices = Vec::with_capacity(vertex_count);
        let mut normal = math::normalize_or(
            &math::cross(&tangents[0], &math::non_collinear_axis(&tangents[0])),
            [1.0, 0.0, 0.0],
        );
        for (center, tangent) in polyline.iter().zip(&tangents) {
            // Transport the previous normal onto the plane orthogonal to the tangent.
            let projected = math::sub(&normal, &math::scale(tangent, math::dot(&normal, tangent)));
            normal = math::normalize_or(
                &projected,
                math::normalize_or(
                    &math::cross(tangent, &math::non_collinear_axis(tangent)),
                    [1.0, 0.0, 0.0],
                ),
            );
            let binormal = math::cross(tangent, &normal);

            for k in 0..sides {
                #[allow(clippy::cast_precision_loss)]
                let angle = TAU * k as f32 / sides as f32;
                let (sin, cos) = angle.sin_cos();
                let offset = math::add(
                    &math::scale(&normal, cos * radius),
                    &math::scale(&binormal, sin * radius),
                );
                vertices.push(math::add(center, &offset));
            }
        }

        let start_center = ring_count * sides;
        let end_center = start_center + 1;
        vertices.push(polyline[0]);
        vertices.push(polyline[ring_count - 1]);

        let mut triangles = Vec::with_capacity((ring_count - 1) * sides * 2 + sides * 2);
        for ring in 0..ring_count - 1 {
            let base = ring * sides;
            let next = base + sides;
            for k in 0..sides {
                let k1 = (k + 1) % sides;
                triangles.push([index(base + k), index(base + k1), index(next + k)]);
                triangles.push([index(next + k), index(base + k1), index(next + k1)]);
            }
        }

        let last_ring = (ring_count - 1) * sides;
        for k in 0..sides {
            let k1 = (k + 1) % sides;
            triangles.push([index(start_center), index(k1), index(k)]);
            triangles.push([index(end_center), index(last_ring + k), index(last_ring + k1)]);
        }

        Some(TubeMesh {
            vertices,
            triangles,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Triangle mesh of a tube swept along a path.
pub struct TubeMesh {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
}
