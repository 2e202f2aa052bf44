use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use super::super::{Command, Commands};

#[derive(Clone, Debug, Default)]
/// Represents the state of a keyboard: the commands typed since the last fetch.
pub struct Keyboard(Commands);

impl Keyboard {
    #[must_use]
    /// Maps a logical key to its navigation command.
    ///
    /// Arrows right/up and left/down step along the path, Home and End jump
    /// to its ends, Space toggles autoplay, `+`/`-` change the autoplay
    /// interval and `L` toggles loop mode.
    pub fn command_for_key(key: &Key) -> Option<Command> {
        match key {
            Key::Named(NamedKey::ArrowRight | NamedKey::ArrowUp) => Some(Command::Next),
            Key::Named(NamedKey::ArrowLeft | NamedKey::ArrowDown) => Some(Command::Previous),
            Key::Named(NamedKey::Home) => Some(Command::First),
            Key::Named(NamedKey::End) => Some(Command::Last),
            Key::Named(NamedKey::Space) => Some(Command::ToggleAutoPlay),
            Key::Named(NamedKey::Escape) => Some(Command::StopAutoPlay),
            Key::Character(text) => match text.as_str() {
                "+" | "=" => Some(Command::SpeedUp),
                "-" => Some(Command::SlowDown),
                "l" | "L" => Some(Command::ToggleLoop),
                _ => None,
            },
            _ => None,
        }
    }

    /// Queues the command bound to `key`, if any.
    pub fn press(&mut self, key: &Key) {
        if let Some(command) = Self::command_for_key(key) {
            self.0.push(command);
        }
    }
}

impl super::Controller for Keyboard {
    fn handle_event(&mut self, event: &WindowEvent) {
        // Key repeats are kept: holding an arrow keeps stepping.
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    logical_key,
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } = event
        {
            self.press(logical_key);
        }
    }

    #[inline]
    fn fetch_input(&mut self) -> Commands {
        core::mem::take(&mut self.0)
    }
}
