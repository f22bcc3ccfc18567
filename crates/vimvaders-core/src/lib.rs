//! # Vimvaders Core
//!
//! The modal command interpreter that turns editor keystrokes into game
//! actions.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Session                          │
//! │  ┌──────────────────────────────┐  ┌──────────────────┐  │
//! │  │         Interpreter          │  │     GameHost     │  │
//! │  │  ┌──────┐ ┌──────┐ ┌──────┐  │  └──────────────────┘  │
//! │  │  │ Mode │ │Keymap│ │ Doc  │  │  ┌──────────────────┐  │
//! │  │  └──────┘ └──────┘ └──────┘  │  │   OverlaySink    │  │
//! │  └──────────────────────────────┘  └──────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A key goes into [`Session::handle_key`], the [`Interpreter`] returns a
//! [`Transition`] with a list of [`Effect`]s, and the session hands each
//! effect to the game or to the overlay.

pub mod command;
pub mod config;
pub mod document;
pub mod effect;
pub mod event;
pub mod host;
pub mod interpreter;
pub mod keymap;
pub mod mode;
pub mod session;
pub mod tutorial;

pub use command::ExCommand;
pub use config::{Config, ConfigError};
pub use document::Document;
pub use effect::Effect;
pub use event::{EventBus, EventHandler, OverlayEvent};
pub use host::{GameHost, GameplayGate, NullSink, OverlaySink};
pub use interpreter::{Interpreter, Transition};
pub use keymap::{Action, Key, KeyBinding, Keymap, parse_key_script};
pub use mode::{Mode, ModeKind};
pub use session::Session;
pub use tutorial::{TutorialProgress, TutorialStage};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] vimvaders_buffer::BufferError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unterminated key name starting at offset {offset}")]
    InvalidKeyScript { offset: usize },
}
