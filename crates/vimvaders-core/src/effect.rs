//! Effects produced by a single keystroke.
//!
//! The interpreter never calls the host directly. It returns a list of
//! [`Effect`]s in the order they should be applied, and the
//! [`Session`](crate::Session) forwards each one to the game or to the
//! overlay. One key may produce both kinds: `w` moves the text cursor and
//! the player ship in the same transition.

use serde::{Deserialize, Serialize};
use vimvaders_buffer::Position;

use crate::mode::ModeKind;

/// Floating label after `w`.
pub const LABEL_WORD_FORWARD: &str = "word-forward";
/// Floating label after `b`.
pub const LABEL_WORD_BACK: &str = "word-back";
/// Mode label on entering visual mode.
pub const LABEL_VISUAL_MODE: &str = "visual-mode";
/// Mode label on leaving visual mode with `v`.
pub const LABEL_NORMAL_MODE: &str = "normal-mode";
/// Label for the first `:q` of a game.
pub const LABEL_GAME_START: &str = "game-start";
/// Label for `:q` between waves.
pub const LABEL_ROUND_START: &str = "round-start";
/// Label for `:q` during a wave.
pub const LABEL_SHOOT: &str = "shoot";

/// One thing that happens because of a keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Effect {
    // Game actions
    /// Nudge the player ship left
    MovePlayerLeft,
    /// Nudge the player ship right
    MovePlayerRight,
    /// Spawn a projectile at the player
    FireShot,
    /// Eliminate up to `count` enemies
    AreaAttack { count: u32 },
    /// Begin or unpause the current wave
    StartRound,
    /// Reset the whole game
    RestartGame,

    // Overlay notifications
    /// Mode changed; `label` is shown as a floating cue when present
    ModeChanged {
        mode: ModeKind,
        label: Option<String>,
    },
    /// Command line text changed
    CommandBufferChanged { text: String },
    /// Cursor moved
    CursorMoved { position: Position },
    /// A selection was deleted
    WordDeleted { text: String },
    /// A line's text changed in place
    LineChanged { line: usize, text: String },
    /// The whole document was swapped
    DocumentReplaced { lines: Vec<String> },
    /// Transient cue such as `shoot` or `delete: foo`
    Label { label: String },
    /// Flash the overlay window
    Flash,
}

impl Effect {
    /// Shorthand for a floating label.
    pub fn label(label: impl Into<String>) -> Self {
        Effect::Label {
            label: label.into(),
        }
    }

    /// Returns true for effects that act on the game rather than the overlay.
    pub fn is_game_action(&self) -> bool {
        matches!(
            self,
            Effect::MovePlayerLeft
                | Effect::MovePlayerRight
                | Effect::FireShot
                | Effect::AreaAttack { .. }
                | Effect::StartRound
                | Effect::RestartGame
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_action_split() {
        assert!(Effect::FireShot.is_game_action());
        assert!(Effect::AreaAttack { count: 2 }.is_game_action());
        assert!(!Effect::Flash.is_game_action());
        assert!(!Effect::label(LABEL_SHOOT).is_game_action());
    }
}
