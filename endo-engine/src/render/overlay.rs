//! Overview visuals: the marker showing where the endoscope is, and the
//! tube drawn along the loaded path.

use crate::math::Vec3;
use crate::navigation::{PathSequence, TubeMesh};

/// Something that shows the endoscope position in the overview.
pub trait Marker {
    fn set_position(&mut self, position: Vec3);
    /// `None` until a position has been set.
    fn position(&self) -> Option<Vec3>;
}

#[derive(Debug, Clone, Copy)]
pub struct MarkerDescriptor {
    pub radius: f32,
    pub color: [f32; 3],
    pub visible: bool,
}

impl Default for MarkerDescriptor {
    fn default() -> Self {
        Self {
            radius: 2.0,
            color: [1.0, 0.0, 0.0],
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// A sphere following the endoscope.
pub struct PositionMarker {
    descriptor: MarkerDescriptor,
    position: Option<Vec3>,
}

impl PositionMarker {
    #[must_use]
    pub const fn new(descriptor: MarkerDescriptor) -> Self {
        Self {
            descriptor,
            position: None,
        }
    }

    #[must_use]
    pub const fn descriptor(&self) -> &MarkerDescriptor {
        &self.descriptor
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.descriptor.radius = radius.max(0.0);
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.descriptor.color = color.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn show(&mut self, visible: bool) {
        self.descriptor.visible = visible;
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.descriptor.visible
    }
}

impl Marker for PositionMarker {
    fn set_position(&mut self, position: Vec3) {
        self.position = Some(position);
    }

    fn position(&self) -> Option<Vec3> {
        self.position
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PathOverlayDescriptor {
    pub tube_radius: f32,
    pub tube_sides: usize,
    pub color: [f32; 3],
    pub opacity: f32,
    pub visible: bool,
}

impl Default for PathOverlayDescriptor {
    fn default() -> Self {
        Self {
            tube_radius: 1.0,
            tube_sides: 12,
            color: [0.0, 1.0, 0.0],
            opacity: 0.5,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// The translucent tube drawn along the path in the overview.
pub struct PathOverlay {
    descriptor: PathOverlayDescriptor,
    mesh: Option<TubeMesh>,
}

impl PathOverlay {
    #[must_use]
    pub const fn new(descriptor: PathOverlayDescriptor) -> Self {
        Self {
            descriptor,
            mesh: None,
        }
    }

    /// Rebuilds the tube for `path`. Paths too short for a tube clear it.
    pub fn rebuild(&mut self, path: &PathSequence) {
        self.mesh = path.tube(self.descriptor.tube_radius, self.descriptor.tube_sides);
        if let Some(mesh) = &self.mesh {
            tracing::trace!(
                "Path tube rebuilt with {} vertices and {} triangles",
                mesh.vertices.len(),
                mesh.triangles.len()
            );
        }
    }

    pub fn clear(&mut self) {
        self.mesh = None;
    }

    #[must_use]
    pub const fn mesh(&self) -> Option<&TubeMesh> {
        self.mesh.as_ref()
    }

    #[must_use]
    pub const fn descriptor(&self) -> &PathOverlayDescriptor {
        &self.descriptor
    }

    pub fn set_color(&mut self, color: [f32; 3]) {
        self.descriptor.color = color.map(|c| c.clamp(0.0, 1.0));
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.descriptor.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn show(&mut self, visible: bool) {
        self.descriptor.visible = visible;
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.descriptor.visible
    }
}
