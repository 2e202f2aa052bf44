//! Camera path navigation.
//!
//! A [`PathSequence`] holds the recorded waypoints, a [`NavigationState`]
//! moves a cursor along them (manually or on an autoplay timer), a
//! [`TransitionAnimator`] glides the camera between two poses, and the
//! [`NavigationCoordinator`] ties the three to the camera, the position
//! marker and the render surface.

use std::time::Duration;

pub mod coordinator;
pub mod path;
pub mod state;
pub mod transition;

pub use coordinator::{BusyPolicy, NavigationConfig, NavigationCoordinator, Observer};
pub use path::{PathSequence, TubeMesh, Waypoint};
pub use state::{NavigationEvent, NavigationState, PlaybackConfig, PlaybackState};
pub use transition::{
    ease_in_out_cubic, slerp, TransitionAnimator, TransitionConfig, TransitionFrame,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("a path needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("position data must hold whole (x, y, z) triples, got {len} values")]
    MalformedTriples { len: usize },

    #[error("waypoint index {index} is out of range for a path of {len} waypoints")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("play speed must be positive and finite, got {0}")]
    InvalidPlaySpeed(f32),

    #[error("autoplay interval must be non-zero, got {0:?}")]
    InvalidInterval(Duration),
}
