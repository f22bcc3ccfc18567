//! End-to-end key scenarios through a `Session`.
//!
//! A recording host and overlay capture every call so each scenario can
//! check exactly which game actions fired.

use vimvaders_buffer::Position;
use vimvaders_core::{GameHost, ModeKind, OverlaySink, Session, TutorialStage};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Left,
    Right,
    Shot,
    Attack(u32),
    StartRound,
    Restart,
}

#[derive(Default)]
struct RecordingHost {
    calls: Vec<Call>,
    stage: u8,
    started: bool,
    paused: bool,
    over: bool,
}

impl RecordingHost {
    fn at_stage(stage: u8) -> Self {
        Self {
            stage,
            ..Self::default()
        }
    }

    fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl GameHost for RecordingHost {
    fn move_player_left(&mut self) {
        self.calls.push(Call::Left);
    }
    fn move_player_right(&mut self) {
        self.calls.push(Call::Right);
    }
    fn fire_shot(&mut self) {
        self.calls.push(Call::Shot);
    }
    fn area_attack(&mut self, count: u32) {
        self.calls.push(Call::Attack(count));
    }
    fn start_round(&mut self) {
        self.calls.push(Call::StartRound);
        self.started = true;
        self.paused = false;
    }
    fn restart_game(&mut self) {
        self.calls.push(Call::Restart);
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
        TutorialStage::new(self.stage)
    }
}

#[derive(Default)]
struct RecordingOverlay {
    modes: Vec<(ModeKind, Option<String>)>,
    command_line: String,
    cursor: Position,
    deleted: Vec<String>,
    labels: Vec<String>,
    flashes: usize,
}

impl OverlaySink for RecordingOverlay {
    fn on_mode_change(&mut self, mode: ModeKind, label: Option<&str>) {
        self.modes.push((mode, label.map(str::to_string)));
    }
    fn on_command_buffer_change(&mut self, text: &str) {
        self.command_line = text.to_string();
    }
    fn on_cursor_move(&mut self, position: Position) {
        self.cursor = position;
    }
    fn on_word_deleted(&mut self, text: &str) {
        self.deleted.push(text.to_string());
    }
    fn on_effect(&mut self, label: &str) {
        self.labels.push(label.to_string());
    }
    fn on_flash(&mut self) {
        self.flashes += 1;
    }
}

fn session(stage: u8, lines: &[&str]) -> Session<RecordingHost, RecordingOverlay> {
    let mut session = Session::new(RecordingHost::at_stage(stage), RecordingOverlay::default());
    let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    session.replace_document(&lines);
    session
}

fn type_keys(session: &mut Session<RecordingHost, RecordingOverlay>, keys: &[&str]) -> Vec<bool> {
    keys.iter().map(|k| session.handle_key(k)).collect()
}

#[test]
fn test_word_motions_across_lines() {
    let mut s = session(2, &["abc def", "ghi"]);

    s.handle_key("w");
    assert_eq!(s.cursor(), Position::new(0, 4));
    s.handle_key("w");
    assert_eq!(s.cursor(), Position::new(1, 0));
    assert_eq!(s.sink().cursor, Position::new(1, 0));
    assert_eq!(s.host().calls, vec![Call::Right, Call::Right]);
}

#[test]
fn test_next_word_wraps_from_document_end() {
    let mut s = session(2, &["abc def", "ghi"]);
    type_keys(&mut s, &["w", "w", "w"]);
    assert_eq!(s.cursor(), Position::new(1, 3));

    s.handle_key("w");
    assert_eq!(s.cursor(), Position::ZERO);
}

#[test]
fn test_stage_one_blocks_motion() {
    let mut s = session(1, &["abc def"]);

    assert!(!s.handle_key("w"));
    assert!(!s.handle_key("b"));
    assert_eq!(s.cursor(), Position::ZERO);
    assert!(s.host().calls.is_empty());
}

#[test]
fn test_visual_delete_scenario() {
    let mut s = session(3, &["abc def"]);

    let consumed = type_keys(&mut s, &["w", "v", "w", "d"]);
    assert!(consumed.iter().all(|c| *c));

    assert_eq!(s.document().lines(), vec!["abc    "]);
    assert_eq!(s.host().count(&Call::Attack(2)), 1);
    assert_eq!(s.sink().deleted, vec!["def"]);
    assert!(s.sink().labels.contains(&"delete: def".to_string()));
    assert_eq!(s.sink().flashes, 1);
    assert_eq!(s.mode().kind(), ModeKind::Normal);
}

#[test]
fn test_visual_toggle_has_no_side_effects() {
    let mut s = session(3, &["abc def"]);

    type_keys(&mut s, &["v", "v"]);
    assert_eq!(s.mode().kind(), ModeKind::Normal);
    assert_eq!(s.mode().anchor(), None);
    assert_eq!(s.document().lines(), vec!["abc def"]);
    assert!(s.host().calls.is_empty());
    assert_eq!(
        s.sink().modes,
        vec![
            (ModeKind::Visual, Some("visual-mode".to_string())),
            (ModeKind::Normal, Some("normal-mode".to_string())),
        ]
    );
}

#[test]
fn test_first_quit_starts_and_shoots() {
    let mut s = session(1, &["abc"]);

    type_keys(&mut s, &[":", "q", "Enter"]);
    assert_eq!(s.host().count(&Call::StartRound), 1);
    assert_eq!(s.host().count(&Call::Shot), 1);
    assert!(s.sink().labels.contains(&"game-start".to_string()));
    assert_eq!(s.sink().command_line, "");
    assert_eq!(s.mode().kind(), ModeKind::Normal);

    // Round now running: :q only shoots
    type_keys(&mut s, &[":", "q", "Enter"]);
    assert_eq!(s.host().count(&Call::StartRound), 1);
    assert_eq!(s.host().count(&Call::Shot), 2);
    assert!(s.sink().labels.contains(&"shoot".to_string()));
}

#[test]
fn test_quit_between_rounds() {
    let mut s = session(1, &["abc"]);
    s.host_mut().started = true;
    s.host_mut().paused = true;

    type_keys(&mut s, &[":", "q", "Enter"]);
    assert_eq!(s.host().calls, vec![Call::StartRound]);
    assert!(s.sink().labels.contains(&"round-start".to_string()));
    assert_eq!(s.sink().flashes, 1);
}

#[test]
fn test_force_quit_requires_game_over() {
    let mut s = session(1, &["abc"]);

    let consumed = type_keys(&mut s, &[":", "q", "!", "Enter"]);
    assert!(consumed.iter().all(|c| *c));
    assert_eq!(s.host().count(&Call::Restart), 0);
    assert_eq!(s.sink().command_line, "");
    assert_eq!(s.mode().kind(), ModeKind::Normal);

    s.host_mut().over = true;
    s.show_game_over_prompt();
    assert!(s.sink().command_line.contains(":q!"));

    type_keys(&mut s, &[":", "q", "!", "Enter"]);
    assert_eq!(s.host().count(&Call::Restart), 1);
}

#[test]
fn test_unknown_command_is_silent() {
    let mut s = session(3, &["abc"]);

    type_keys(&mut s, &[":", "w", "q", "Enter"]);
    assert!(s.host().calls.is_empty());
    assert_eq!(s.sink().flashes, 0);
    assert_eq!(s.mode().kind(), ModeKind::Normal);
}

#[test]
fn test_command_line_display_tracks_buffer() {
    let mut s = session(1, &["abc"]);

    type_keys(&mut s, &[":", "q"]);
    assert_eq!(s.sink().command_line, ":q");
    s.handle_key("Backspace");
    assert_eq!(s.sink().command_line, ":");
    s.handle_key("Backspace");
    assert_eq!(s.sink().command_line, ":");
}
