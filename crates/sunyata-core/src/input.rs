//! Key bindings shared by the web and native shells.
//!
//! Keys are named the way `KeyboardEvent.key` names them; the native
//! shell translates winit keys into the same strings.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    NextVerse,
    PrevVerse,
    TogglePause,
    Reset,
    TogglePanel,
    ToggleSound,
    Faster,
    Slower,
}

#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowRight" | "PageDown" => Some(Command::NextVerse),
        "ArrowLeft" | "PageUp" => Some(Command::PrevVerse),
        " " | "Spacebar" => Some(Command::TogglePause),
        "r" | "R" => Some(Command::Reset),
        "h" | "H" => Some(Command::TogglePanel),
        "m" | "M" => Some(Command::ToggleSound),
        "+" | "=" => Some(Command::Faster),
        "-" | "_" => Some(Command::Slower),
        _ => None,
    }
}

/// Multiplicative step for `Faster`/`Slower`.
pub const SPEED_STEP: f32 = 1.25;

impl crate::App {
    /// Applies the commands the core understands. Returns `Ok(false)` for
    /// shell-only commands (panel, sound) so the caller can handle them.
    pub fn run_command(&mut self, cmd: Command) -> Result<bool, crate::SunyataError> {
        match cmd {
            Command::NextVerse => {
                self.next()?;
            }
            Command::PrevVerse => {
                self.prev()?;
            }
            Command::TogglePause => {
                let paused = self.toggle_pause();
                log::info!("[keys] paused={}", paused);
            }
            Command::Reset => self.reset(),
            Command::Faster => self.set_speed(self.speed() * SPEED_STEP),
            Command::Slower => self.set_speed(self.speed() / SPEED_STEP),
            Command::TogglePanel | Command::ToggleSound => return Ok(false),
        }
        Ok(true)
    }
}
