//! Wires the interpreter to a live game.
//!
//! ## Learning: The Facade Pattern
//!
//! `Session` is the only type a host needs. It owns the interpreter, the
//! game and the overlay sink, reads the gameplay gate before each key,
//! and applies the interpreter's effects in order.

use vimvaders_buffer::Position;

use crate::config::Config;
use crate::document::Document;
use crate::effect::Effect;
use crate::host::{GameHost, GameplayGate, OverlaySink};
use crate::interpreter::Interpreter;
use crate::mode::Mode;
use crate::tutorial::TutorialStage;

/// Command line text shown after the player dies.
pub const GAME_OVER_PROMPT: &str = "Want to play again? quit without saving \":q!\"";

/// The interpreter bound to a game host and an overlay.
pub struct Session<H: GameHost, S: OverlaySink> {
    interpreter: Interpreter,
    host: H,
    sink: S,
    config: Config,
    /// Stage whose page is currently loaded
    page_stage: TutorialStage,
}

impl<H: GameHost, S: OverlaySink> Session<H, S> {
    /// Creates a session with default configuration.
    pub fn new(host: H, sink: S) -> Self {
        Self::with_config(host, sink, Config::default())
    }

    /// Creates a session, loading the page for the host's current stage.
    pub fn with_config(host: H, sink: S, config: Config) -> Self {
        let stage = host.tutorial_stage();
        let document = Document::from_lines(config.page(stage));
        let interpreter = Interpreter::with_config(document, &config);

        Self {
            interpreter,
            host,
            sink,
            config,
            page_stage: stage,
        }
    }

    /// Handles one key identifier. Returns true if the key was consumed.
    ///
    /// When this returns false the host should apply its own handling.
    pub fn handle_key(&mut self, key: &str) -> bool {
        self.sync_tutorial_stage();

        let gate = GameplayGate::snapshot(&self.host);
        let transition = self.interpreter.handle_key(key, &gate);
        tracing::trace!(
            key,
            consumed = transition.consumed,
            effects = transition.effects.len(),
            "Handled key"
        );

        self.apply_all(transition.effects);
        transition.consumed
    }

    /// Loads the page for the host's stage if it changed.
    ///
    /// Returns true when a new page was loaded.
    pub fn sync_tutorial_stage(&mut self) -> bool {
        let stage = self.host.tutorial_stage();
        if stage == self.page_stage {
            return false;
        }

        tracing::info!("Loading tutorial page for {}", stage);
        self.page_stage = stage;
        let page = self.config.page(stage);
        let effects = self.interpreter.replace_document(&page);
        self.apply_all(effects);
        true
    }

    /// Replaces the document with arbitrary lines.
    pub fn replace_document(&mut self, lines: &[String]) {
        let effects = self.interpreter.replace_document(lines);
        self.apply_all(effects);
    }

    /// Shows the restart hint on the command line.
    pub fn show_game_over_prompt(&mut self) {
        self.sink.on_command_buffer_change(GAME_OVER_PROMPT);
    }

    fn apply_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        if effect.is_game_action() {
            tracing::info!(?effect, "Game action");
        } else {
            tracing::debug!(?effect, "Overlay effect");
        }

        match effect {
            Effect::MovePlayerLeft => self.host.move_player_left(),
            Effect::MovePlayerRight => self.host.move_player_right(),
            Effect::FireShot => self.host.fire_shot(),
            Effect::AreaAttack { count } => self.host.area_attack(count),
            Effect::StartRound => self.host.start_round(),
            Effect::RestartGame => self.host.restart_game(),
            Effect::ModeChanged { mode, label } => {
                self.sink.on_mode_change(mode, label.as_deref())
            }
            Effect::CommandBufferChanged { text } => self.sink.on_command_buffer_change(&text),
            Effect::CursorMoved { position } => self.sink.on_cursor_move(position),
            Effect::WordDeleted { text } => self.sink.on_word_deleted(&text),
            Effect::LineChanged { line, text } => self.sink.on_line_changed(line, &text),
            Effect::DocumentReplaced { lines } => self.sink.on_document_replaced(&lines),
            Effect::Label { label } => self.sink.on_effect(&label),
            Effect::Flash => self.sink.on_flash(),
        }
    }

    // ==================== Accessors ====================

    /// Returns the current mode.
    pub fn mode(&self) -> &Mode {
        self.interpreter.mode()
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> Position {
        self.interpreter.cursor()
    }

    /// Returns the document, for drawing.
    pub fn document(&self) -> &Document {
        self.interpreter.document()
    }

    /// Returns the game host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the game host mutably, for the game loop.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Returns the overlay sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NullSink;

    #[derive(Default)]
    struct Flags {
        stage: u8,
        shots: u32,
        lefts: u32,
        rights: u32,
    }

    impl GameHost for Flags {
        fn move_player_left(&mut self) {
            self.lefts += 1;
        }
        fn move_player_right(&mut self) {
            self.rights += 1;
        }
        fn fire_shot(&mut self) {
            self.shots += 1;
        }
        fn area_attack(&mut self, _count: u32) {}
        fn start_round(&mut self) {}
        fn restart_game(&mut self) {}
        fn is_game_started(&self) -> bool {
            true
        }
        fn is_round_paused(&self) -> bool {
            false
        }
        fn is_game_over(&self) -> bool {
            false
        }
        fn tutorial_stage(&self) -> TutorialStage {
            TutorialStage::new(self.stage)
        }
    }

    #[test]
    fn test_stage_change_loads_new_page() {
        let mut session = Session::new(Flags::default(), NullSink);
        assert_eq!(session.document().lines()[0], "Dear Vim Warrior,");

        session.host_mut().stage = 2;
        assert!(!session.handle_key("x"));
        assert_eq!(
            session.document().lines()[0],
            "Excellent shooting, warrior!"
        );
        assert!(!session.sync_tutorial_stage());
    }

    #[test]
    fn test_motion_drives_ship() {
        let mut session = Session::new(
            Flags {
                stage: 2,
                ..Flags::default()
            },
            NullSink,
        );

        assert!(session.handle_key("w"));
        assert!(session.handle_key("w"));
        assert!(session.handle_key("b"));
        assert_eq!(session.host().rights, 2);
        assert_eq!(session.host().lefts, 1);
    }

    #[test]
    fn test_shoot_during_round() {
        let mut session = Session::new(Flags::default(), NullSink);
        for key in [":", "q", "Enter"] {
            assert!(session.handle_key(key));
        }
        assert_eq!(session.host().shots, 1);
    }
}
