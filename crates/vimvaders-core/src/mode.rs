//! Editing modes of the overlay.
//!
//! The interpreter is always in exactly one [`Mode`]. Mode-specific data
//! lives inside the variant, so a command buffer cannot exist outside
//! command-line mode and an anchor cannot outlive visual mode.

use serde::{Deserialize, Serialize};
use vimvaders_buffer::Position;

/// The current mode with its data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Single-key commands: motions, `v`, `:`.
    #[default]
    Normal,
    /// Typing an ex command after `:`.
    CommandLine { buffer: String },
    /// Building a selection from `anchor` to the cursor.
    Visual { anchor: Position },
}

impl Mode {
    /// Returns the payload-free tag of this mode.
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Normal => ModeKind::Normal,
            Mode::CommandLine { .. } => ModeKind::CommandLine,
            Mode::Visual { .. } => ModeKind::Visual,
        }
    }

    /// Text for the command line at the bottom of the overlay.
    pub fn command_display(&self) -> String {
        match self {
            Mode::CommandLine { buffer } => format!(":{buffer}"),
            _ => String::new(),
        }
    }

    /// Visual anchor, if selecting.
    pub fn anchor(&self) -> Option<Position> {
        match self {
            Mode::Visual { anchor } => Some(*anchor),
            _ => None,
        }
    }
}

/// Mode tag without data, for notifications and key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeKind {
    #[default]
    Normal,
    CommandLine,
    Visual,
}

impl ModeKind {
    /// Human-readable name for the status line.
    pub const fn display_name(self) -> &'static str {
        match self {
            ModeKind::Normal => "NORMAL",
            ModeKind::CommandLine => "COMMAND",
            ModeKind::Visual => "VISUAL",
        }
    }
}

impl std::fmt::Display for ModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let mode = Mode::CommandLine {
            buffer: "q!".to_string(),
        };
        assert_eq!(mode.command_display(), ":q!");
        assert_eq!(Mode::Normal.command_display(), "");
    }

    #[test]
    fn test_kind_and_anchor() {
        let mode = Mode::Visual {
            anchor: Position::new(0, 4),
        };
        assert_eq!(mode.kind(), ModeKind::Visual);
        assert_eq!(mode.anchor(), Some(Position::new(0, 4)));
        assert_eq!(Mode::Normal.anchor(), None);
        assert_eq!(ModeKind::CommandLine.to_string(), "COMMAND");
    }
}
