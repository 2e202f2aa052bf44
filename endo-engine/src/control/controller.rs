//! This module contains the necessary trait used to handle different kind
//! of controllers, i.e. input sources.
//!
//! To implement a controller, simply create a struct with internal states and
//! implement the `Controller` trait for it.
//! Add it to the list of controllers in the app config and the event loop
//! will forward window events to it and drain its commands once per frame.

pub mod keyboard;

/// Represents a controller.
///
/// A controller turns window events into navigation commands.
pub trait Controller {
    /// Handle an event, usually by filtering by event type and
    /// updating the controller's state accordingly.
    fn handle_event(&mut self, event: &winit::event::WindowEvent);

    /// Fetch the commands gathered since the last call.
    fn fetch_input(&mut self) -> super::Commands;
}
