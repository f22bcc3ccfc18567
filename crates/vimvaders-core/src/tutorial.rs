//! Tutorial stages and the pages shown for each.
//!
//! The stage gates which commands the interpreter accepts. It only ever
//! moves forward, driven by the host's kill count.

use serde::{Deserialize, Serialize};

/// Current tutorial stage, always in `1..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct TutorialStage(u8);

impl TutorialStage {
    /// `:q` only.
    pub const SHOOTING: TutorialStage = TutorialStage(1);
    /// Adds `w` and `b`.
    pub const MOVEMENT: TutorialStage = TutorialStage(2);
    /// Adds `v` and `d`.
    pub const VISUAL: TutorialStage = TutorialStage(3);

    /// Creates a stage, clamping into `1..=3`.
    pub fn new(stage: u8) -> Self {
        Self(stage.clamp(1, 3))
    }

    /// Returns the stage number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns true once `required` has been reached.
    pub fn allows(self, required: TutorialStage) -> bool {
        self >= required
    }

    /// The stage after this one, if any.
    pub fn next(self) -> Option<TutorialStage> {
        (self.0 < 3).then(|| TutorialStage(self.0 + 1))
    }
}

impl Default for TutorialStage {
    fn default() -> Self {
        Self::SHOOTING
    }
}

impl From<u8> for TutorialStage {
    fn from(stage: u8) -> Self {
        Self::new(stage)
    }
}

impl From<TutorialStage> for u8 {
    fn from(stage: TutorialStage) -> Self {
        stage.0
    }
}

impl std::fmt::Display for TutorialStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stage {}", self.0)
    }
}

/// Built-in page for a stage.
pub fn default_page(stage: TutorialStage) -> Vec<String> {
    let lines: &[&str] = match stage.get() {
        1 => &[
            "Dear Vim Warrior,",
            "",
            "Your first mission:",
            "Master the art of shooting!",
            "",
            "Command to learn:",
            ":q - To shoot your laser:",
            "1. Press Shift + ; for :",
            "2. Then press q",
            "3. Submit with Enter",
            "",
            "Good luck, commander!",
            "~",
            "~",
        ],
        2 => &[
            "Excellent shooting, warrior!",
            "",
            "New movement techniques unlocked:",
            "",
            "w - Move forward by word",
            "b - Move backward by word",
            "",
            "Use these to dodge enemy fire!",
            "~",
            "~",
        ],
        _ => &[
            "You're becoming a Vim master!",
            "",
            "Advanced technique unlocked:",
            "",
            "v - Enter visual mode",
            "d - Delete selection",
            "",
            "Combine these for special attacks!",
            "~",
            "~",
        ],
    };
    lines.iter().map(|line| line.to_string()).collect()
}

/// Tracks kills and advances the stage at fixed thresholds.
#[derive(Debug, Clone)]
pub struct TutorialProgress {
    /// Stage a new game begins at
    start: TutorialStage,
    stage: TutorialStage,
    kills: u32,
    /// Total kills that unlock stage 2
    movement_at: u32,
    /// Total kills that unlock stage 3
    visual_at: u32,
}

impl TutorialProgress {
    /// Creates a tracker with explicit thresholds.
    pub fn new(stage: TutorialStage, movement_at: u32, visual_at: u32) -> Self {
        Self {
            start: stage,
            stage,
            kills: 0,
            movement_at,
            visual_at,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> TutorialStage {
        self.stage
    }

    /// Total kills recorded so far.
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Back to the starting stage with no kills, keeping the thresholds.
    pub fn reset(&mut self) {
        self.stage = self.start;
        self.kills = 0;
    }

    /// Kill-count callback. Returns the new stage when it changes.
    ///
    /// A single call can jump more than one stage if the kills cover both
    /// thresholds.
    pub fn record_kills(&mut self, count: u32) -> Option<TutorialStage> {
        if count == 0 {
            return None;
        }
        self.kills = self.kills.saturating_add(count);

        let before = self.stage;
        if self.stage == TutorialStage::SHOOTING && self.kills >= self.movement_at {
            self.stage = TutorialStage::MOVEMENT;
        }
        if self.stage == TutorialStage::MOVEMENT && self.kills >= self.visual_at {
            self.stage = TutorialStage::VISUAL;
        }

        if self.stage != before {
            tracing::info!(kills = self.kills, "Tutorial advanced to {}", self.stage);
            Some(self.stage)
        } else {
            None
        }
    }
}

impl Default for TutorialProgress {
    fn default() -> Self {
        Self::new(TutorialStage::SHOOTING, 2, 5)
    }
}
