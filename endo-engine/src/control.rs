pub mod camera;
pub mod controller;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A discrete navigation command issued by a controller.
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    JumpTo(usize),
    ToggleAutoPlay,
    StopAutoPlay,
    SpeedUp,
    SlowDown,
    ToggleLoop,
}

pub type Commands = Vec<Command>;
