//! Key names and single-key bindings.
//!
//! ## Learning: State Machines
//!
//! Bindings are keyed on the current mode as well as the key: `d` means
//! "delete selection" in visual mode and nothing at all in normal mode.
//! Each binding also carries the tutorial stage that unlocks it; a locked
//! binding behaves exactly like an unbound key.

use std::collections::HashMap;

use crate::config::Config;
use crate::mode::ModeKind;
use crate::tutorial::TutorialStage;
use crate::{CoreError, CoreResult};

/// A key identifier as sent by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
    Tab,
    Up,
    Down,
    Left,
    Right,
    /// Any other named key (`Shift`, `F5`, ...)
    Named(String),
}

impl Key {
    /// Parses a semantic key name.
    ///
    /// A single character is always `Char`, so `"q"` and `"Q"` stay
    /// distinct. Unknown names become `Named` rather than failing; only
    /// the empty string has no key.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return None,
            (Some(c), None) => return Some(Key::Char(c)),
            _ => {}
        }

        let key = match s.to_lowercase().as_str() {
            "enter" | "return" | "cr" => Key::Enter,
            "backspace" | "bs" => Key::Backspace,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "space" => Key::Char(' '),
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            _ => Key::Named(s.to_string()),
        };
        Some(key)
    }

    /// Returns the character if this key types one.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(' ') => write!(f, "Space"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Enter => write!(f, "Enter"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Escape => write!(f, "Escape"),
            Key::Tab => write!(f, "Tab"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
            Key::Named(name) => write!(f, "{}", name),
        }
    }
}

/// What a bound key does in normal or visual mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `w`
    WordForward,
    /// `b`
    WordBackward,
    /// `v`
    ToggleVisual,
    /// `d` in visual mode
    DeleteSelection,
    /// `:`
    EnterCommandLine,
}

impl Action {
    /// Parses an action name from the config file.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "word-forward" => Some(Action::WordForward),
            "word-backward" => Some(Action::WordBackward),
            "toggle-visual" => Some(Action::ToggleVisual),
            "delete-selection" => Some(Action::DeleteSelection),
            "command-line" => Some(Action::EnterCommandLine),
            _ => None,
        }
    }

    /// Stage that unlocks this action.
    pub fn required_stage(self) -> TutorialStage {
        match self {
            Action::EnterCommandLine => TutorialStage::SHOOTING,
            Action::WordForward | Action::WordBackward => TutorialStage::MOVEMENT,
            Action::ToggleVisual | Action::DeleteSelection => TutorialStage::VISUAL,
        }
    }

    /// Modes in which the action can fire.
    pub fn modes(self) -> &'static [ModeKind] {
        match self {
            Action::DeleteSelection => &[ModeKind::Visual],
            _ => &[ModeKind::Normal, ModeKind::Visual],
        }
    }
}

/// A key bound to an action.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: Key,
    pub action: Action,
}

impl KeyBinding {
    pub fn new(key: Key, action: Action) -> Self {
        Self { key, action }
    }
}

/// Single-key bindings for normal and visual mode.
pub struct Keymap {
    /// All key bindings, defaults first.
    bindings: Vec<KeyBinding>,
    /// Index by key for fast lookup; later bindings shadow earlier ones.
    by_key: HashMap<Key, Vec<usize>>,
}

impl Keymap {
    /// Creates a keymap with the default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: Vec::new(),
            by_key: HashMap::new(),
        };
        keymap.add_default_bindings();
        keymap.rebuild_index();
        keymap
    }

    /// Creates a keymap from configuration.
    ///
    /// Extra bindings are added on top of the defaults; unknown keys or
    /// actions are skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, action_str) in &config.keyboard.bindings {
            match (Key::parse(key_str), Action::parse(action_str)) {
                (Some(key), Some(action)) => keymap.bindings.push(KeyBinding::new(key, action)),
                _ => tracing::warn!("Ignoring key binding {} = {}", key_str, action_str),
            }
        }

        keymap.rebuild_index();
        keymap
    }

    fn add_default_bindings(&mut self) {
        let defaults = [
            ('w', Action::WordForward),
            ('b', Action::WordBackward),
            ('v', Action::ToggleVisual),
            ('d', Action::DeleteSelection),
            (':', Action::EnterCommandLine),
        ];
        for (c, action) in defaults {
            self.bindings.push(KeyBinding::new(Key::Char(c), action));
        }
    }

    fn rebuild_index(&mut self) {
        self.by_key.clear();
        for (i, binding) in self.bindings.iter().enumerate() {
            self.by_key.entry(binding.key.clone()).or_default().push(i);
        }
    }

    /// Looks up a key in the given mode at the given stage.
    pub fn lookup(&self, key: &Key, mode: ModeKind, stage: TutorialStage) -> KeymapResult {
        let Some(indices) = self.by_key.get(key) else {
            return KeymapResult::NoMatch;
        };

        let Some(action) = indices
            .iter()
            .rev()
            .map(|&i| self.bindings[i].action)
            .find(|action| action.modes().contains(&mode))
        else {
            return KeymapResult::NoMatch;
        };

        let required = action.required_stage();
        if stage.allows(required) {
            KeymapResult::Match(action)
        } else {
            KeymapResult::Locked { action, required }
        }
    }

    /// Returns all bindings.
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Adds a binding.
    pub fn add_binding(&mut self, binding: KeyBinding) {
        self.bindings.push(binding);
        self.rebuild_index();
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of looking up a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapResult {
    /// The key fires an action.
    Match(Action),
    /// Bound, but the tutorial has not unlocked it yet.
    Locked {
        action: Action,
        required: TutorialStage,
    },
    /// No binding in this mode.
    NoMatch,
}

/// Splits a key script like `:q<Enter>w` into key names.
///
/// Plain characters are keys; `<Name>` is a named key and `<<>` is a
/// literal `<`.
pub fn parse_key_script(script: &str) -> CoreResult<Vec<String>> {
    let mut keys = Vec::new();
    let mut chars = script.char_indices();

    while let Some((start, c)) = chars.next() {
        if c != '<' {
            keys.push(c.to_string());
            continue;
        }

        let mut name = String::new();
        let mut closed = false;
        for (_, c) in chars.by_ref() {
            if c == '>' && !name.is_empty() {
                closed = true;
                break;
            }
            name.push(c);
        }
        if !closed {
            return Err(CoreError::InvalidKeyScript { offset: start });
        }
        keys.push(name);
    }

    Ok(keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parse() {
        assert_eq!(Key::parse("q"), Some(Key::Char('q')));
        assert_eq!(Key::parse("Q"), Some(Key::Char('Q')));
        assert_eq!(Key::parse("Enter"), Some(Key::Enter));
        assert_eq!(Key::parse("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::parse("Shift"), Some(Key::Named("Shift".to_string())));
        assert_eq!(Key::parse(""), None);
    }

    #[test]
    fn test_printable() {
        assert_eq!(Key::Char('x').printable(), Some('x'));
        assert_eq!(Key::Char('\u{7}').printable(), None);
        assert_eq!(Key::Enter.printable(), None);
    }

    #[test]
    fn test_stage_gating() {
        let keymap = Keymap::new();
        let w = Key::Char('w');

        assert_eq!(
            keymap.lookup(&w, ModeKind::Normal, TutorialStage::SHOOTING),
            KeymapResult::Locked {
                action: Action::WordForward,
                required: TutorialStage::MOVEMENT
            }
        );
        assert_eq!(
            keymap.lookup(&w, ModeKind::Normal, TutorialStage::MOVEMENT),
            KeymapResult::Match(Action::WordForward)
        );
    }

    #[test]
    fn test_delete_only_in_visual() {
        let keymap = Keymap::new();
        let d = Key::Char('d');
        assert_eq!(
            keymap.lookup(&d, ModeKind::Normal, TutorialStage::VISUAL),
            KeymapResult::NoMatch
        );
        assert_eq!(
            keymap.lookup(&d, ModeKind::Visual, TutorialStage::VISUAL),
            KeymapResult::Match(Action::DeleteSelection)
        );
    }

    #[test]
    fn test_config_bindings_extend_defaults() {
        let mut config = Config::default();
        config
            .keyboard
            .bindings
            .insert("l".to_string(), "word-forward".to_string());
        config
            .keyboard
            .bindings
            .insert("x".to_string(), "explode".to_string());

        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.lookup(&Key::Char('l'), ModeKind::Normal, TutorialStage::VISUAL),
            KeymapResult::Match(Action::WordForward)
        );
        assert_eq!(
            keymap.lookup(&Key::Char('w'), ModeKind::Normal, TutorialStage::VISUAL),
            KeymapResult::Match(Action::WordForward)
        );
        assert_eq!(
            keymap.lookup(&Key::Char('x'), ModeKind::Normal, TutorialStage::VISUAL),
            KeymapResult::NoMatch
        );
    }

    #[test]
    fn test_key_script() {
        let keys = parse_key_script(":q<Enter>w<<>").unwrap();
        assert_eq!(keys, vec![":", "q", "Enter", "w", "<"]);

        assert!(matches!(
            parse_key_script("ab<Enter"),
            Err(CoreError::InvalidKeyScript { offset: 2 })
        ));
    }
}
