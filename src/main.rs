//! # Vimvaders - Replay Runner
//!
//! Feeds a scripted key sequence through the modal interpreter against a
//! simulated arena and prints every game action and overlay notification.
//!
//! ## Quick Start
//!
//! ```bash
//! # Shoot once from the first tutorial page
//! cargo run -- --keys ':q<Enter>'
//!
//! # Try a visual delete on stage 3, as JSON lines
//! cargo run -- --stage 3 --keys ':q<Enter>wvwd' --json
//!
//! # Print the effective configuration
//! cargo run -- --dump-config
//! ```

mod report;
mod sim;

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vimvaders_core::{
    Config, CoreResult, GameHost, Key, Session, TutorialStage, parse_key_script,
};

use report::{ConsoleOverlay, OutputFormat, Record, Reporter};
use sim::SimulatedHost;

/// Vimvaders - learn vim motions by shooting aliens
#[derive(Parser, Debug)]
#[command(name = "vimvaders")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Key script, e.g. `:q<Enter>wvwd`
    #[arg(short, long, value_name = "SEQ", default_value = "")]
    keys: String,

    /// Tutorial stage to start at
    #[arg(short, long, value_name = "1..3", value_parser = clap::value_parser!(u8).range(1..=3))]
    stage: Option<u8>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print records as JSON lines
    #[arg(long)]
    json: bool,

    /// End the game before replaying, so `:q!` can restart it
    #[arg(long)]
    game_over: bool,

    /// Print the effective config as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Logs go to stderr so stdout stays a clean record stream
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting Vimvaders v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config.as_deref())?;
    if let Some(stage) = args.stage {
        config.gameplay.starting_stage = TutorialStage::new(stage);
    }

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let keys = parse_key_script(&args.keys)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    replay(config, &keys, args.game_over, Reporter::new(format));
    Ok(())
}

fn load_config(path: Option<&Path>) -> CoreResult<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            Ok(Config::load_from(path)?)
        }
        None => Ok(Config::load()),
    }
}

/// Runs every key through a fresh session.
fn replay(config: Config, keys: &[String], game_over: bool, reporter: Reporter) {
    let host = SimulatedHost::new(&config, reporter.clone());
    let overlay = ConsoleOverlay::new(reporter.clone());
    let mut session = Session::with_config(host, overlay, config);

    if game_over {
        session.host_mut().end_game();
        session.show_game_over_prompt();
    }

    for key in keys {
        reporter.emit(&Record::Key { key: key.clone() });
        if session.handle_key(key) {
            continue;
        }
        if !fallback_movement(session.host_mut(), key) {
            reporter.emit(&Record::Ignored { key: key.clone() });
        }
    }

    reporter.emit(&Record::Summary {
        score: session.host().score(),
        stage: session.host().tutorial_stage().get(),
        mode: session.mode().kind(),
    });
    tracing::info!(records = reporter.records().len(), "Replay finished");
}

/// Arrow keys and raw `h`/`l` move the ship directly when the
/// interpreter passes on them.
fn fallback_movement(host: &mut impl GameHost, key: &str) -> bool {
    match Key::parse(key) {
        Some(Key::Left | Key::Char('h')) => {
            host.move_player_left();
            true
        }
        Some(Key::Right | Key::Char('l')) => {
            host.move_player_right();
            true
        }
        _ => false,
    }
}
