pub mod overlay;
pub mod window;

#[allow(clippy::module_name_repetitions)]
/// Something that draws the scene on request.
///
/// The surface owns the draw call and its timing; the navigation code only
/// asks for a new frame after it moved the camera or the marker.
pub trait RenderSurface {
    fn size(&self) -> (u32, u32);
    /// Asks for the scene to be drawn again.
    fn request_render(&mut self);
    /// Shows a short status text (window title, status bar, ...).
    fn set_status(&mut self, _status: &str) {}
}
