//! Formation board command-line driver.
//!
//! Runs a headless board session over a JSON key-value store directory:
//! roster and formation management, token placement through the same drag
//! pipeline an interactive front end uses, and match timing either simulated
//! with synthetic frames or run live against the wall clock.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- add-player "Alex Morgan" --position ST --number 13
//! cargo run --release -- place <ID> 120 200
//! cargo run --release -- simulate --minutes 45 --seconds 600
//! cargo run --release -- run --seconds 10 --fps 30
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::error;

use formationboard::board::Board;
use formationboard::components::dropzone::ZoneKind;
use formationboard::format::{BadgeTone, format_seconds, initials};
use formationboard::math::Vec2;
use formationboard::resources::boardconfig::BoardConfig;
use formationboard::resources::drag::DragOutcome;
use formationboard::resources::kvstore::JsonDirStore;
use formationboard::resources::roster::Position;
use formationboard::systems::time::{SimulatedFrames, WallClockFrames};

/// Formation board
#[derive(Parser)]
#[command(version, about = "Headless roster and formation board with match timing.")]
struct Cli {
    /// INI configuration file (default: ./formationboard.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Store directory; overrides `[store] dir` from the configuration.
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Viewport width in pixels used to lay out the field and bench.
    #[arg(long, default_value_t = 400.0)]
    width: f64,

    /// Viewport height in pixels used to lay out the field and bench.
    #[arg(long, default_value_t = 900.0)]
    height: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a player to the bench.
    AddPlayer {
        name: String,
        #[arg(long, default_value = "CM")]
        position: String,
        #[arg(long)]
        number: Option<u32>,
    },
    /// Edit a player's name, position and shirt number.
    EditPlayer {
        id: String,
        name: String,
        #[arg(long, default_value = "CM")]
        position: String,
        #[arg(long)]
        number: Option<u32>,
    },
    /// Remove a player.
    DeletePlayer { id: String },
    /// Show players and formations.
    List,
    /// Drop a bench player's token with its top-left corner at (X, Y) on the field.
    Place { id: String, x: f64, y: f64 },
    /// Drag an on-field token by (DX, DY) pixels.
    Move { id: String, dx: f64, dy: f64 },
    /// Drag an on-field token back to the bench.
    Bench { id: String },
    /// Snapshot the roster as a named formation.
    SaveFormation { name: String },
    /// Replace the roster with a saved formation.
    LoadFormation { id: String },
    /// Delete a saved formation.
    DeleteFormation { id: String },
    /// Toggle the elapsed-time badges.
    ToggleTimes,
    /// Run a match with synthetic frames and report playing times.
    Simulate {
        /// Match length in minutes (default from configuration).
        #[arg(long)]
        minutes: Option<f64>,
        /// Seconds of match to simulate.
        #[arg(long)]
        seconds: f64,
        /// Synthetic frame rate.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Added time in seconds, applied at the start.
        #[arg(long)]
        added_time: Option<f64>,
    },
    /// Run the match clock in real time for a number of wall clock seconds.
    Run {
        /// Match length in minutes (default from configuration).
        #[arg(long)]
        minutes: Option<f64>,
        /// Wall clock seconds to run for.
        #[arg(long)]
        seconds: f64,
        /// Frame rate the session is paced at.
        #[arg(long, default_value_t = 30.0)]
        fps: f64,
    },
}

fn parse_position(code: &str) -> Position {
    Position::from_code(code).unwrap_or_else(|| {
        eprintln!("Unknown position '{}', using CM", code);
        Position::CM
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BoardConfig::with_path(path),
        None => BoardConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults
    if let Some(dir) = &cli.store {
        config.store_dir = dir.clone();
    }

    let store = match JsonDirStore::open(&config.store_dir) {
        Ok(store) => store,
        Err(e) => {
            error!("Cannot open store {:?}: {}", config.store_dir, e);
            std::process::exit(1);
        }
    };

    let mut board = Board::new(config, store);
    board.resize_viewport(cli.width, cli.height);
    // First frame measures the field and runs the legacy migration
    board.run_frame(0.0);

    match cli.command {
        Command::AddPlayer {
            name,
            position,
            number,
        } => match board
            .roster_mut()
            .add_player(&name, parse_position(&position), number)
        {
            Some(id) => println!("Player added to bench: {}", id),
            None => eprintln!("A player needs a name"),
        },
        Command::EditPlayer {
            id,
            name,
            position,
            number,
        } => {
            if board
                .roster_mut()
                .update_player(&id, &name, parse_position(&position), number)
            {
                println!("Player updated");
            } else {
                eprintln!("No player {} (or empty name)", id);
            }
        }
        Command::DeletePlayer { id } => {
            if !board.roster_mut().delete_player(&id) {
                eprintln!("No player {}", id);
            }
        }
        Command::List => print_board(&board),
        Command::Place { id, x, y } => {
            let origin = board.geometry().origin;
            drag(&mut board, &id, origin + Vec2::new(x, y), Vec2::zero());
        }
        Command::Move { id, dx, dy } => {
            let normalized = board.roster().player(&id).map(|p| p.normalized());
            let Some(normalized) = normalized else {
                eprintln!("No player {}", id);
                return finish(board);
            };
            let start = board.geometry().origin + board.geometry().to_pixel(normalized);
            let delta = Vec2::new(dx, dy);
            drag(&mut board, &id, start + delta, delta);
        }
        Command::Bench { id } => match board.zone_rect(ZoneKind::Bench) {
            Some((origin, size)) => {
                let dot = board.geometry().dot_size;
                let center = origin + size.scale_by(0.5);
                drag(&mut board, &id, center - Vec2::new(dot / 2.0, dot / 2.0), Vec2::zero());
            }
            None => eprintln!("No bench zone laid out"),
        },
        Command::SaveFormation { name } => match board.roster_mut().save_formation(&name) {
            Some(id) => println!("Formation saved: {}", id),
            None => eprintln!("A formation needs a name"),
        },
        Command::LoadFormation { id } => {
            if !board.roster_mut().load_formation(&id) {
                eprintln!("No formation {}", id);
            }
        }
        Command::DeleteFormation { id } => {
            if !board.roster_mut().delete_formation(&id) {
                eprintln!("No formation {}", id);
            }
        }
        Command::ToggleTimes => {
            let show = board.roster_mut().toggle_show_times();
            println!("Times {}", if show { "ON" } else { "OFF" });
        }
        Command::Simulate {
            minutes,
            seconds,
            fps,
            added_time,
        } => {
            let minutes = minutes.unwrap_or(board.config().default_minutes);
            board.start_match(minutes);
            if let Some(extra) = added_time {
                board.add_time(extra);
            }
            let mut frames = SimulatedFrames::at_fps(if fps > 0.0 { fps } else { 60.0 });
            board.run_until(&mut frames, seconds);
            print_clock(&board);
            print_board(&board);
        }
        Command::Run {
            minutes,
            seconds,
            fps,
        } => {
            let minutes = minutes.unwrap_or(board.config().default_minutes);
            board.start_match(minutes);
            let mut frames = WallClockFrames::paced(fps);
            board.run_until(&mut frames, seconds);
            print_clock(&board);
            print_board(&board);
        }
    }

    finish(board);
}

fn drag(board: &mut Board, id: &str, token_pos: Vec2, delta: Vec2) {
    if !board.begin_drag(id) {
        eprintln!("No player {}", id);
        return;
    }
    match board.end_drag(token_pos, delta) {
        DragOutcome::PlacedOnField(pos) | DragOutcome::Moved(pos) => {
            println!("On field at ({:.3}, {:.3})", pos.x, pos.y)
        }
        DragOutcome::Benched => println!("Benched"),
        other => println!("Nothing changed ({:?})", other),
    }
}

fn print_clock(board: &Board) {
    let clock = board.clock();
    println!(
        "Clock {} (remaining {}){}",
        format_seconds(clock.current_time()),
        format_seconds(clock.remaining()),
        if clock.is_finished() { " - full time" } else { "" }
    );
}

fn print_board(board: &Board) {
    let roster = board.roster();
    println!(
        "On Field: {}  Bench: {}",
        roster.on_field_count(),
        roster.bench_count()
    );
    for p in roster.players() {
        let number = p.shirt_number.map(|n| format!("#{}", n)).unwrap_or_default();
        let place = if p.is_on_field {
            let pos = p.normalized();
            format!("field ({:.3}, {:.3})", pos.x, pos.y)
        } else {
            "bench".to_string()
        };
        let time = if roster.show_times() {
            format!(
                "  {} [{}]",
                format_seconds(p.playing_time),
                BadgeTone::for_seconds(p.playing_time).label()
            )
        } else {
            String::new()
        };
        println!(
            "{}  {:<4}{:<4}{:<4} {:<24} {}{}",
            p.id,
            initials(&p.name),
            p.position.code(),
            number,
            p.name,
            place,
            time
        );
    }
    for f in roster.formations() {
        let marker = if roster.selected_formation() == Some(f.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{} formation {}  {} ({} players)", marker, f.id, f.name, f.players.len());
    }
}

fn finish(mut board: Board) {
    board.teardown();
}
