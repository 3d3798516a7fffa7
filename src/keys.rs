use opencv::highgui;

use crate::error::Result;

const ESC: i32 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    ToggleLed,
    ResetBackground,
    ToggleDetection,
}

impl KeyCommand {
    /// Maps a raw `waitKey` code; only the low byte is significant.
    pub fn from_code(code: i32) -> Option<KeyCommand> {
        if code < 0 {
            return None;
        }
        match code & 0xFF {
            c if c == ESC => Some(KeyCommand::Quit),
            c => match c as u8 {
                b'q' | b'Q' => Some(KeyCommand::Quit),
                b'l' | b'L' => Some(KeyCommand::ToggleLed),
                b'r' | b'R' => Some(KeyCommand::ResetBackground),
                b'd' | b'D' => Some(KeyCommand::ToggleDetection),
                _ => None,
            },
        }
    }
}

/// Polls the highgui window for one millisecond.
pub fn poll() -> Result<Option<KeyCommand>> {
    let code = highgui::wait_key(1)?;
    Ok(KeyCommand::from_code(code))
}
