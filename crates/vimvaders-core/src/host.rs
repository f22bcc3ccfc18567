//! Seams between the interpreter and the game around it.
//!
//! ## Learning: Traits as Ports
//!
//! The core never knows how the ship moves or how text is drawn. The
//! host implements [`GameHost`] for gameplay and [`OverlaySink`] for the
//! editor window; tests implement them with plain recorders.

use vimvaders_buffer::Position;

use crate::mode::ModeKind;
use crate::tutorial::TutorialStage;

/// Game actions and read-only flags supplied by the host.
///
/// Calls are synchronous and must not block.
pub trait GameHost {
    /// Shifts the player left, clamped to the arena.
    fn move_player_left(&mut self);

    /// Shifts the player right, clamped to the arena.
    fn move_player_right(&mut self);

    /// Spawns a projectile at the player.
    fn fire_shot(&mut self);

    /// Eliminates up to `count` remaining enemies.
    fn area_attack(&mut self, count: u32);

    /// Begins or unpauses the current wave.
    fn start_round(&mut self);

    /// Resets the whole game.
    fn restart_game(&mut self);

    fn is_game_started(&self) -> bool;

    fn is_round_paused(&self) -> bool;

    fn is_game_over(&self) -> bool;

    fn tutorial_stage(&self) -> TutorialStage;
}

/// Notifications for the overlay window.
///
/// Every method defaults to a no-op so a host only implements what it
/// draws.
pub trait OverlaySink {
    fn on_mode_change(&mut self, _mode: ModeKind, _label: Option<&str>) {}

    fn on_command_buffer_change(&mut self, _text: &str) {}

    fn on_cursor_move(&mut self, _position: Position) {}

    fn on_word_deleted(&mut self, _text: &str) {}

    fn on_line_changed(&mut self, _line: usize, _text: &str) {}

    fn on_document_replaced(&mut self, _lines: &[String]) {}

    fn on_effect(&mut self, _label: &str) {}

    fn on_flash(&mut self) {}
}

/// A sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OverlaySink for NullSink {}

/// Snapshot of the host flags that gate commands.
///
/// Taken once per keystroke; the interpreter never writes it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameplayGate {
    pub stage: TutorialStage,
    pub game_started: bool,
    pub round_paused: bool,
    pub game_over: bool,
}

impl GameplayGate {
    /// Reads the current flags from a host.
    pub fn snapshot(host: &impl GameHost) -> Self {
        Self {
            stage: host.tutorial_stage(),
            game_started: host.is_game_started(),
            round_paused: host.is_round_paused(),
            game_over: host.is_game_over(),
        }
    }

    /// A gate for a game in progress at the given stage.
    pub fn playing(stage: TutorialStage) -> Self {
        Self {
            stage,
            game_started: true,
            round_paused: false,
            game_over: false,
        }
    }
}
