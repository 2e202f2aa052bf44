use crate::math::{self, Vec3};

#[derive(Copy, Clone, Debug)]
/// Optical settings of an [`Endoscope`].
pub struct EndoscopeDescriptor {
    /// Vertical field of view, in degrees.
    pub field_of_view: f32,
    /// Preferred up direction of the view.
    pub view_up: Vec3,
    /// Distance between the camera and its focal point.
    pub focal_distance: f32,
}

impl Default for EndoscopeDescriptor {
    fn default() -> Self {
        Self {
            field_of_view: 60.0,
            view_up: [0.0, 1.0, 0.0],
            focal_distance: 10.0,
        }
    }
}

#[derive(Copy, Clone, Debug)]
/// Represents the virtual endoscope: a camera that looks along the path.
pub struct Endoscope {
    position: Vec3,
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    view_up: Vec3,
    field_of_view: f32,
    focal_distance: f32,
}

impl Default for Endoscope {
    fn default() -> Self {
        Self::new(EndoscopeDescriptor::default())
    }
}

impl Endoscope {
    #[must_use]
    pub fn new(descriptor: EndoscopeDescriptor) -> Self {
        let mut endoscope = Self {
            position: [0.0, 0.0, 0.0],
            direction: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            right: [1.0, 0.0, 0.0],
            view_up: math::normalize_or(&descriptor.view_up, [0.0, 1.0, 0.0]),
            field_of_view: descriptor.field_of_view,
            focal_distance: descriptor.focal_distance,
        };
        endoscope.update_basis();
        endoscope
    }

    #[must_use]
    /// The point the endoscope looks at.
    pub fn focal_point(&self) -> Vec3 {
        math::add(
            &self.position,
            &math::scale(&self.direction, self.focal_distance),
        )
    }

    #[must_use]
    pub const fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view = degrees.clamp(1.0, 179.0);
    }

    #[must_use]
    pub const fn view_up(&self) -> Vec3 {
        self.view_up
    }

    pub fn set_view_up(&mut self, view_up: Vec3) {
        self.view_up = math::normalize_or(&view_up, self.view_up);
        self.update_basis();
    }

    fn update_basis(&mut self) {
        // Looking straight along view-up leaves the right vector undefined.
        let right = math::cross(&self.direction, &self.view_up);
        let right = if math::length(&right) > math::EPSILON {
            right
        } else {
            math::cross(&self.direction, &math::non_collinear_axis(&self.direction))
        };
        self.right = math::normalize_or(&right, [1.0, 0.0, 0.0]);
        self.up = math::cross(&self.right, &self.direction);
    }
}

impl super::Camera for Endoscope {
    fn direction(&self) -> Vec3 {
        self.direction
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn up(&self) -> Vec3 {
        self.up
    }

    fn right(&self) -> Vec3 {
        self.right
    }

    fn set_pose(&mut self, position: Vec3, direction: Vec3) {
        self.position = position;
        self.direction = math::normalize_or(&direction, self.direction);
        self.update_basis();

        tracing::trace!(
            "Endoscope at ({:.3}, {:.3}, {:.3}) looking along ({:.3}, {:.3}, {:.3})",
            position[0],
            position[1],
            position[2],
            self.direction[0],
            self.direction[1],
            self.direction[2]
        );
    }
}
