//! The modal command interpreter.
//!
//! One call to [`Interpreter::handle_key`] is one transition: it reads the
//! current mode, the key and the gameplay gate, updates the mode and the
//! document, and returns what should happen next as a [`Transition`].
//! Nothing here calls the host, so every rule can be tested on its own.
//!
//! ```text
//!            ':'                        Enter
//!   Normal ───────▶ CommandLine ───────────────▶ Normal
//!     │  ▲
//!  'v'│  │'v' / 'd'
//!     ▼  │
//!    Visual ──':'──▶ CommandLine
//! ```

use vimvaders_buffer::Position;

use crate::command::ExCommand;
use crate::config::Config;
use crate::document::Document;
use crate::effect::{
    Effect, LABEL_NORMAL_MODE, LABEL_VISUAL_MODE, LABEL_WORD_BACK, LABEL_WORD_FORWARD,
};
use crate::host::GameplayGate;
use crate::keymap::{Action, Key, Keymap, KeymapResult};
use crate::mode::{Mode, ModeKind};

/// Enemies removed by a successful visual delete, unless configured.
pub const DEFAULT_AREA_ATTACK: u32 = 2;

/// Outcome of one keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transition {
    /// Whether the interpreter used the key. When false the host applies
    /// its own fallback handling.
    pub consumed: bool,
    /// Effects to apply, in order.
    pub effects: Vec<Effect>,
}

impl Transition {
    /// The key was not for us.
    pub fn unhandled() -> Self {
        Self::default()
    }

    /// The key was used.
    pub fn consumed(effects: Vec<Effect>) -> Self {
        Self {
            consumed: true,
            effects,
        }
    }
}

/// Mode state, document and bindings.
pub struct Interpreter {
    document: Document,
    mode: Mode,
    keymap: Keymap,
    area_attack_count: u32,
}

impl Interpreter {
    /// Creates an interpreter over a document with default bindings.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            mode: Mode::Normal,
            keymap: Keymap::new(),
            area_attack_count: DEFAULT_AREA_ATTACK,
        }
    }

    /// Creates an interpreter with bindings and attack size from config.
    pub fn with_config(document: Document, config: &Config) -> Self {
        Self {
            document,
            mode: Mode::Normal,
            keymap: Keymap::from_config(config),
            area_attack_count: config.gameplay.area_attack_count,
        }
    }

    /// Returns the current mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> Position {
        self.document.cursor()
    }

    /// Handles one key identifier.
    pub fn handle_key(&mut self, key: &str, gate: &GameplayGate) -> Transition {
        let parsed = Key::parse(key);

        if let Mode::CommandLine { buffer } = &mut self.mode {
            let effects = match parsed {
                Some(Key::Enter) => {
                    let command = ExCommand::parse(buffer);
                    tracing::debug!("Executing :{}", command.display_name());
                    self.mode = Mode::Normal;

                    let mut effects = command.execute(gate);
                    effects.push(Effect::ModeChanged {
                        mode: ModeKind::Normal,
                        label: None,
                    });
                    effects.push(Effect::CommandBufferChanged {
                        text: String::new(),
                    });
                    effects
                }
                Some(Key::Backspace) => {
                    buffer.pop();
                    vec![Effect::CommandBufferChanged {
                        text: format!(":{buffer}"),
                    }]
                }
                Some(key) => match key.printable() {
                    Some(c) => {
                        buffer.push(c);
                        vec![Effect::CommandBufferChanged {
                            text: format!(":{buffer}"),
                        }]
                    }
                    None => {
                        tracing::trace!("Ignoring {} on the command line", key);
                        Vec::new()
                    }
                },
                None => Vec::new(),
            };
            return Transition::consumed(effects);
        }

        let Some(key) = parsed else {
            return Transition::unhandled();
        };

        match self.keymap.lookup(&key, self.mode.kind(), gate.stage) {
            KeymapResult::Match(action) => {
                tracing::debug!(?action, mode = %self.mode.kind(), "Key {} matched", key);
                Transition::consumed(self.apply(action))
            }
            KeymapResult::Locked { action, required } => {
                tracing::trace!(?action, "Key {} locked until {}", key, required);
                Transition::unhandled()
            }
            KeymapResult::NoMatch => Transition::unhandled(),
        }
    }

    fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::WordForward => {
                let target = self.document.buffer().next_word_boundary(self.cursor());
                self.motion(target, LABEL_WORD_FORWARD, Effect::MovePlayerRight)
            }
            Action::WordBackward => {
                let target = self.document.buffer().previous_word_boundary(self.cursor());
                self.motion(target, LABEL_WORD_BACK, Effect::MovePlayerLeft)
            }
            Action::ToggleVisual => match self.mode {
                Mode::Visual { .. } => {
                    self.mode = Mode::Normal;
                    vec![Effect::ModeChanged {
                        mode: ModeKind::Normal,
                        label: Some(LABEL_NORMAL_MODE.to_string()),
                    }]
                }
                _ => {
                    self.mode = Mode::Visual {
                        anchor: self.cursor(),
                    };
                    vec![Effect::ModeChanged {
                        mode: ModeKind::Visual,
                        label: Some(LABEL_VISUAL_MODE.to_string()),
                    }]
                }
            },
            Action::DeleteSelection => self.delete_selection(),
            Action::EnterCommandLine => {
                self.mode = Mode::CommandLine {
                    buffer: String::new(),
                };
                vec![
                    Effect::ModeChanged {
                        mode: ModeKind::CommandLine,
                        label: None,
                    },
                    Effect::CommandBufferChanged {
                        text: ":".to_string(),
                    },
                ]
            }
        }
    }

    /// Cursor motion paired with the ship movement it drives.
    fn motion(&mut self, target: Position, label: &str, ship: Effect) -> Vec<Effect> {
        if let Err(err) = self.document.move_cursor(target) {
            tracing::warn!("Motion produced an invalid cursor: {}", err);
            return vec![ship];
        }
        vec![
            Effect::CursorMoved { position: target },
            Effect::label(label),
            ship,
        ]
    }

    fn delete_selection(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();

        let deleted = self
            .mode
            .anchor()
            .and_then(|anchor| self.document.delete_selection(anchor));

        match deleted {
            Some(range) if !range.is_empty() => {
                let line = self.document.buffer().line(range.line).unwrap_or_default();
                effects.push(Effect::LineChanged {
                    line: range.line,
                    text: line,
                });
                effects.push(Effect::WordDeleted {
                    text: range.text.clone(),
                });
                effects.push(Effect::label(format!("delete: {}", range.text)));
                effects.push(Effect::AreaAttack {
                    count: self.area_attack_count,
                });
                effects.push(Effect::Flash);
            }
            _ => tracing::debug!("Visual delete had nothing to remove"),
        }

        self.mode = Mode::Normal;
        effects.push(Effect::ModeChanged {
            mode: ModeKind::Normal,
            label: None,
        });
        effects
    }

    /// Swaps in a new document, resets the cursor and leaves visual mode.
    pub fn replace_document(&mut self, lines: &[String]) -> Vec<Effect> {
        self.document.replace(lines);

        let mut effects = vec![
            Effect::DocumentReplaced {
                lines: self.document.lines(),
            },
            Effect::CursorMoved {
                position: Position::ZERO,
            },
        ];
        if matches!(self.mode, Mode::Visual { .. }) {
            self.mode = Mode::Normal;
            effects.push(Effect::ModeChanged {
                mode: ModeKind::Normal,
                label: None,
            });
        }
        effects
    }
}
