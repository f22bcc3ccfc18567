//! Console output for a replay.
//!
//! The simulated game and the overlay both report through a shared
//! [`Reporter`], so one replay produces a single ordered stream of
//! [`Record`]s, printed as text or as JSON lines.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use vimvaders_buffer::Position;
use vimvaders_core::{ModeKind, OverlaySink};

/// How records are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    /// Recorded but not printed
    #[cfg(test)]
    Silent,
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Record {
    Key { key: String },
    Ignored { key: String },
    Player { x: i32 },
    Shot { x: i32 },
    AreaAttack { count: u32 },
    Kills { killed: u32, remaining: u32, score: u32 },
    StageUnlocked { stage: u8 },
    RoundStarted { round: u32, enemies: u32 },
    RoundCleared { next: u32 },
    GameOver { score: u32 },
    Restarted,
    Mode { mode: ModeKind, label: Option<String> },
    CommandLine { text: String },
    Cursor { line: usize, column: usize },
    Deleted { text: String },
    Line { line: usize, text: String },
    Page { lines: Vec<String> },
    Label { label: String },
    Flash,
    Summary { score: u32, stage: u8, mode: ModeKind },
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Key { key } => write!(f, "key     {}", key),
            Record::Ignored { key } => write!(f, "ignored {}", key),
            Record::Player { x } => write!(f, "  ship   x={}", x),
            Record::Shot { x } => write!(f, "  shot   x={}", x),
            Record::AreaAttack { count } => write!(f, "  attack {} enemies", count),
            Record::Kills {
                killed,
                remaining,
                score,
            } => write!(
                f,
                "  kills  {} ({} left, score {})",
                killed, remaining, score
            ),
            Record::StageUnlocked { stage } => write!(f, "  stage  {} unlocked", stage),
            Record::RoundStarted { round, enemies } => {
                write!(f, "  round  {} started with {} enemies", round, enemies)
            }
            Record::RoundCleared { next } => write!(f, "  round  cleared, next is {}", next),
            Record::GameOver { score } => write!(f, "  game   over, score {}", score),
            Record::Restarted => write!(f, "  game   restarted"),
            Record::Mode { mode, label } => match label {
                Some(label) => write!(f, "  mode   {} ({})", mode.display_name(), label),
                None => write!(f, "  mode   {}", mode.display_name()),
            },
            Record::CommandLine { text } => write!(f, "  cmd    {:?}", text),
            Record::Cursor { line, column } => {
                write!(f, "  cursor {}", Position::new(*line, *column))
            }
            Record::Deleted { text } => write!(f, "  delete {:?}", text),
            Record::Line { line, text } => write!(f, "  line   {}: {:?}", line + 1, text),
            Record::Page { lines } => write!(f, "  page   {} lines", lines.len()),
            Record::Label { label } => write!(f, "  label  {}", label),
            Record::Flash => write!(f, "  flash"),
            Record::Summary { score, stage, mode } => write!(
                f,
                "done    score={} stage={} mode={}",
                score,
                stage,
                mode.display_name()
            ),
        }
    }
}

/// Shared, ordered record stream.
#[derive(Clone)]
pub struct Reporter {
    format: OutputFormat,
    log: Rc<RefCell<Vec<Record>>>,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A reporter that only records.
    #[cfg(test)]
    pub fn silent() -> Self {
        Self::new(OutputFormat::Silent)
    }

    /// Records and prints one record.
    pub fn emit(&self, record: &Record) {
        match self.format {
            OutputFormat::Text => println!("{}", record),
            OutputFormat::Json => match serde_json::to_string(record) {
                Ok(line) => println!("{}", line),
                Err(err) => tracing::error!("Failed to encode record: {}", err),
            },
            #[cfg(test)]
            OutputFormat::Silent => {}
        }
        self.log.borrow_mut().push(record.clone());
    }

    /// Everything reported so far.
    pub fn records(&self) -> Vec<Record> {
        self.log.borrow().clone()
    }
}

/// Overlay that reports every notification.
pub struct ConsoleOverlay {
    reporter: Reporter,
}

impl ConsoleOverlay {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }
}

impl OverlaySink for ConsoleOverlay {
    fn on_mode_change(&mut self, mode: ModeKind, label: Option<&str>) {
        self.reporter.emit(&Record::Mode {
            mode,
            label: label.map(str::to_string),
        });
    }

    fn on_command_buffer_change(&mut self, text: &str) {
        self.reporter.emit(&Record::CommandLine {
            text: text.to_string(),
        });
    }

    fn on_cursor_move(&mut self, position: Position) {
        self.reporter.emit(&Record::Cursor {
            line: position.line,
            column: position.column,
        });
    }

    fn on_word_deleted(&mut self, text: &str) {
        self.reporter.emit(&Record::Deleted {
            text: text.to_string(),
        });
    }

    fn on_line_changed(&mut self, line: usize, text: &str) {
        self.reporter.emit(&Record::Line {
            line,
            text: text.to_string(),
        });
    }

    fn on_document_replaced(&mut self, lines: &[String]) {
        self.reporter.emit(&Record::Page {
            lines: lines.to_vec(),
        });
    }

    fn on_effect(&mut self, label: &str) {
        self.reporter.emit(&Record::Label {
            label: label.to_string(),
        });
    }

    fn on_flash(&mut self) {
        self.reporter.emit(&Record::Flash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Record::Mode {
            mode: ModeKind::Visual,
            label: Some("visual-mode".to_string()),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"event":"mode","mode":"visual","label":"visual-mode"}"#
        );
    }

    #[test]
    fn test_overlay_shares_stream() {
        let reporter = Reporter::silent();
        let mut overlay = ConsoleOverlay::new(reporter.clone());
        overlay.on_flash();
        overlay.on_cursor_move(Position::new(1, 2));

        assert_eq!(
            reporter.records(),
            vec![Record::Flash, Record::Cursor { line: 1, column: 2 }]
        );
    }

    #[test]
    fn test_text_lines() {
        assert_eq!(
            Record::Cursor { line: 0, column: 4 }.to_string(),
            "  cursor 1:5"
        );
        assert_eq!(Record::Flash.to_string(), "  flash");
    }
}
