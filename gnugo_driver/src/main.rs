use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gnugo_driver::{DriverConfig, Engine, OperationKind, OperationReport, Recorder, SessionRecording};
use goban::{
    parse_board_info, parse_score_estimate, visualize_board, BoardInfo, Color, GameOptions, Komi,
    Rules,
};
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the GNU Go executable [default: gnugo]
    #[arg(long)]
    gnugo: Option<PathBuf>,

    /// Kill the engine after this many milliseconds [default: 20000]
    #[arg(short, long)]
    timeout_millis: Option<u64>,

    /// Path to a config JSON file. Flags given here take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record every engine session as a JSON file into this directory
    #[arg(short, long)]
    record_sessions_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    operation: Operation,
}

#[derive(Subcommand)]
enum Operation {
    /// Start a new game and write its record to RECORD
    Init {
        record: PathBuf,
        #[arg(long, default_value_t = 17)]
        board_size: usize,
        /// The color you play
        #[arg(long, default_value = "black")]
        color: Color,
        #[arg(long, default_value_t = 0)]
        handicap: u8,
        #[arg(long, default_value = "6.5")]
        komi: Komi,
        /// The engine's strength, 1 to 6
        #[arg(long, default_value_t = 1)]
        level: u8,
        #[arg(long, default_value = "chinese")]
        rules: Rules,
    },
    /// Show the current board
    Board { record: PathBuf },
    /// Play a move such as D4, and let the engine answer
    Play {
        record: PathBuf,
        #[arg(value_name = "MOVE")]
        mv: String,
    },
    Pass { record: PathBuf },
    Resign { record: PathBuf },
    /// Take back the engine's last move and yours
    Undo { record: PathBuf },
    /// Show the final result, or estimate it
    Score { record: PathBuf },
    /// Parse the output of a recorded session again
    Replay { recording: PathBuf },
}

fn read_record(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Could not read game record '{}'", path.display()))
}

/// Prints the report and stores the updated record, if the engine accepted the move.
fn conclude(record_path: &Path, report: &OperationReport) -> anyhow::Result<()> {
    print_board_info(&report.info)?;
    if !report.completion.is_complete() {
        warn!(completion = ?report.completion, "Leaving the record unchanged");
        return Ok(());
    }
    match &report.info.updated_record_text {
        Some(updated) if report.info.is_persistable() => {
            std::fs::write(record_path, updated)?;
            info!(record = %record_path.display(), "Record updated");
        }
        _ => info!("Record unchanged"),
    }
    Ok(())
}

fn print_board_info(board_info: &BoardInfo) -> anyhow::Result<()> {
    if let Some(board) = &board_info.new_board {
        eprintln!("{}", visualize_board(board, board_info.last_move));
    }
    println!("{}", serde_json::to_string_pretty(board_info)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let mut config = match &args.config {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    };
    if let Some(gnugo) = args.gnugo {
        config.gnugo_executable = gnugo;
    }
    if let Some(timeout_millis) = args.timeout_millis {
        config.timeout_millis = timeout_millis;
    }

    let mut engine = Engine::from_config(&config);
    if let Some(dir_path) = args.record_sessions_to_directory {
        engine = engine.with_recorder(Recorder::new(dir_path)?);
    }

    match args.operation {
        Operation::Init {
            record,
            board_size,
            color,
            handicap,
            komi,
            level,
            rules,
        } => {
            let options = GameOptions::new(board_size, color, handicap, komi, level, rules)?;
            let report = engine.initialize(&options)?;
            print_board_info(&report.info)?;
            let updated = report
                .info
                .updated_record_text
                .filter(|_| report.completion.is_complete())
                .ok_or_else(|| anyhow::anyhow!("The engine did not save the new game"))?;
            std::fs::write(&record, updated)?;
            info!(record = %record.display(), "New game written");
        }
        Operation::Board { record } => {
            let report = engine.read_board(&read_record(&record)?)?;
            print_board_info(&report.info)?;
        }
        Operation::Play { record, mv } => {
            let report = engine.play_move(&read_record(&record)?, &mv)?;
            conclude(&record, &report)?;
        }
        Operation::Pass { record } => {
            let report = engine.pass(&read_record(&record)?)?;
            conclude(&record, &report)?;
        }
        Operation::Resign { record } => {
            let report = engine.resign(&read_record(&record)?)?;
            conclude(&record, &report)?;
        }
        Operation::Undo { record } => {
            let report = engine.undo(&read_record(&record)?)?;
            if !report.undone {
                eprintln!("Cannot undo. There is no previous position.");
            }
            conclude(&record, &report.report)?;
        }
        Operation::Score { record } => {
            let report = engine.estimate_score(&read_record(&record)?)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Operation::Replay { recording } => {
            let recording = SessionRecording::load(&recording)?;
            if recording.operation == OperationKind::EstimateScore {
                let result = parse_score_estimate(&recording.output, &recording.record);
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_board_info(&parse_board_info(&recording.output, &recording.record))?;
            }
        }
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
