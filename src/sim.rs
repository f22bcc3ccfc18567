//! A headless stand-in for the arcade scene.
//!
//! Keeps just enough state to answer the interpreter's questions and to
//! show what each action did: the ship's x position, the enemies left in
//! the wave, the round flags and the tutorial progress.

use vimvaders_core::{Config, GameHost, TutorialProgress, TutorialStage};

use crate::report::{Record, Reporter};

/// Leftmost ship position.
const ARENA_MIN_X: i32 = 50;
/// Rightmost ship position.
const ARENA_MAX_X: i32 = 750;
/// Distance covered by one move.
const MOVE_STEP: i32 = 50;
/// Enemies spawned per wave.
const WAVE_SIZE: u32 = 5;
/// Points per enemy hit by a shot.
const SHOT_SCORE: u32 = 10;
/// Points per enemy removed by an area attack.
const AREA_SCORE: u32 = 20;

/// Simulated game state.
pub struct SimulatedHost {
    reporter: Reporter,
    progress: TutorialProgress,
    player_x: i32,
    enemies: u32,
    score: u32,
    round: u32,
    started: bool,
    paused: bool,
    over: bool,
}

impl SimulatedHost {
    /// Creates a fresh game from configuration.
    pub fn new(config: &Config, reporter: Reporter) -> Self {
        let gameplay = &config.gameplay;
        Self {
            reporter,
            progress: TutorialProgress::new(
                gameplay.starting_stage,
                gameplay.movement_unlock_kills,
                gameplay.visual_unlock_kills,
            ),
            player_x: 400,
            enemies: WAVE_SIZE,
            score: 0,
            round: 1,
            started: false,
            paused: true,
            over: false,
        }
    }

    /// Marks the game as lost.
    pub fn end_game(&mut self) {
        self.over = true;
        self.reporter.emit(&Record::GameOver { score: self.score });
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.score
    }

    fn kill(&mut self, count: u32, points: u32) {
        if self.over || self.enemies == 0 {
            return;
        }
        let killed = count.min(self.enemies);
        self.enemies -= killed;
        self.score += killed * points;
        self.reporter.emit(&Record::Kills {
            killed,
            remaining: self.enemies,
            score: self.score,
        });

        if let Some(stage) = self.progress.record_kills(killed) {
            self.reporter.emit(&Record::StageUnlocked { stage: stage.get() });
        }

        if self.started && !self.paused && self.enemies == 0 {
            self.paused = true;
            self.round += 1;
            self.reporter.emit(&Record::RoundCleared { next: self.round });
        }
    }

    fn shift(&mut self, delta: i32) {
        if self.over {
            return;
        }
        self.player_x = (self.player_x + delta).clamp(ARENA_MIN_X, ARENA_MAX_X);
        self.reporter.emit(&Record::Player { x: self.player_x });
    }
}

impl GameHost for SimulatedHost {
    fn move_player_left(&mut self) {
        self.shift(-MOVE_STEP);
    }

    fn move_player_right(&mut self) {
        self.shift(MOVE_STEP);
    }

    fn fire_shot(&mut self) {
        if self.over {
            return;
        }
        self.reporter.emit(&Record::Shot { x: self.player_x });
        // Every shot hits while the wave is live
        if self.started && !self.paused {
            self.kill(1, SHOT_SCORE);
        }
    }

    fn area_attack(&mut self, count: u32) {
        self.reporter.emit(&Record::AreaAttack { count });
        self.kill(count, AREA_SCORE);
    }

    fn start_round(&mut self) {
        if self.enemies == 0 {
            self.enemies = WAVE_SIZE;
        }
        self.started = true;
        self.paused = false;
        self.reporter.emit(&Record::RoundStarted {
            round: self.round,
            enemies: self.enemies,
        });
    }

    fn restart_game(&mut self) {
        self.progress.reset();
        self.player_x = 400;
        self.enemies = WAVE_SIZE;
        self.score = 0;
        self.round = 1;
        self.started = false;
        self.paused = true;
        self.over = false;
        self.reporter.emit(&Record::Restarted);
    }

    fn is_game_started(&self) -> bool {
        self.started
    }

    fn is_round_paused(&self) -> bool {
        self.paused
    }

    fn is_game_over(&self) -> bool {
        self.over
    }

    fn tutorial_stage(&self) -> TutorialStage {
        self.progress.stage()
    }
}
