pub mod endoscope;

use crate::math::Vec3;

/// Represents a camera.
///
/// It is expected that all vectors (except for `position`) are normalized.
pub trait Camera {
    /// Returns the direction the camera is facing.
    fn direction(&self) -> Vec3;
    /// Returns the position of the camera.
    fn position(&self) -> Vec3;
    /// Returns the up vector of the camera.
    fn up(&self) -> Vec3;
    /// Returns the right vector of the camera.
    fn right(&self) -> Vec3;

    /// Places the camera at `position` looking along `direction`.
    ///
    /// The camera derives the rest of its view (up, right, field of view)
    /// on its own.
    fn set_pose(&mut self, position: Vec3, direction: Vec3);
}
