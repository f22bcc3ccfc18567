//! Ex commands typed after `:`.
//!
//! ## Learning: The Command Pattern
//!
//! Parsing and executing are separate steps. [`ExCommand::parse`] turns
//! the command line into a value; [`ExCommand::execute`] turns that value
//! plus the current game flags into effects. Neither touches the host.

use crate::effect::{Effect, LABEL_GAME_START, LABEL_ROUND_START, LABEL_SHOOT};
use crate::host::GameplayGate;

/// A submitted command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExCommand {
    /// `:q` starts the game, starts the next round, or shoots
    Quit,
    /// `:q!` restarts after game over
    ForceQuit,
    /// Anything else, kept for logging
    Unknown(String),
}

impl ExCommand {
    /// Parses a command buffer (without the leading `:`).
    pub fn parse(buffer: &str) -> Self {
        match buffer.trim() {
            "q" => ExCommand::Quit,
            "q!" => ExCommand::ForceQuit,
            other => ExCommand::Unknown(other.to_string()),
        }
    }

    /// Returns the command's display name.
    pub fn display_name(&self) -> &str {
        match self {
            ExCommand::Quit => "q",
            ExCommand::ForceQuit => "q!",
            ExCommand::Unknown(text) => text,
        }
    }

    /// Effects of running the command against the current flags.
    ///
    /// Commands that do not apply right now produce nothing.
    pub fn execute(&self, gate: &GameplayGate) -> Vec<Effect> {
        match self {
            ExCommand::Quit if !gate.game_started => vec![
                Effect::StartRound,
                Effect::FireShot,
                Effect::Flash,
                Effect::label(LABEL_GAME_START),
            ],
            ExCommand::Quit if gate.round_paused => vec![
                Effect::StartRound,
                Effect::Flash,
                Effect::label(LABEL_ROUND_START),
            ],
            ExCommand::Quit => vec![
                Effect::FireShot,
                Effect::Flash,
                Effect::label(LABEL_SHOOT),
            ],
            ExCommand::ForceQuit if gate.game_over => vec![Effect::RestartGame],
            ExCommand::ForceQuit => {
                tracing::debug!("Ignoring :q! while the game is running");
                Vec::new()
            }
            ExCommand::Unknown(text) => {
                tracing::debug!("Ignoring unknown command :{}", text);
                Vec::new()
            }
        }
    }
}
