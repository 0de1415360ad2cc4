use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use goban::{
    encode_options, parse_board_info, parse_score_estimate, score_estimate_args, BoardInfo,
    GameOptions, GameRecord, GameResult, MoveToken,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::DriverConfig;
use crate::error::OperationError;
use crate::recording::{Recorder, SessionRecording};
use crate::scratch::ScratchFile;
use crate::sequencer::{Automaton, Initialize, PlayMove, PromptDriven, ReadBoard, Sequencer, Silent, Undo};
use crate::session::{run_session, Completion, SessionOutcome};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Initialize,
    ReadBoard,
    PlayMove,
    Pass,
    Resign,
    Undo,
    EstimateScore,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationReport {
    pub info: BoardInfo,
    pub completion: Completion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UndoReport {
    #[serde(flatten)]
    pub report: OperationReport,
    /// The engine took back two moves. Otherwise the record is unchanged.
    pub undone: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: Option<GameResult>,
    pub completion: Completion,
}

/// Runs GNU Go once per operation on a game record.
///
/// Every operation starts a fresh engine process that loads the record,
/// answers its prompts and saves the game again. Callers must not run two
/// operations on the same record at once.
pub struct Engine {
    program: PathBuf,
    leading_args: Vec<OsString>,
    timeout: Duration,
    recorder: Option<Recorder>,
}

impl Engine {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout,
            recorder: None,
        }
    }

    pub fn from_config(config: &DriverConfig) -> Self {
        Self::new(config.gnugo_executable.clone(), config.timeout())
            .with_leading_args(config.leading_args.iter().map(OsString::from).collect())
    }

    pub fn with_leading_args(mut self, leading_args: Vec<OsString>) -> Self {
        self.leading_args = leading_args;
        self
    }

    pub fn with_recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    fn run(
        &mut self,
        operation: OperationKind,
        engine_args: Vec<OsString>,
        record_text: &str,
        sequencer: &mut dyn Sequencer,
    ) -> anyhow::Result<SessionOutcome> {
        let mut args = self.leading_args.clone();
        args.extend(engine_args);
        let outcome = run_session(&self.program, &args, self.timeout, sequencer)?;

        if let Some(recorder) = &mut self.recorder {
            recorder.write_session_recording(&SessionRecording {
                operation,
                args: args
                    .iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect(),
                record: String::from(record_text),
                commands: outcome.commands.clone(),
                completion: outcome.completion,
                output: outcome.output.clone(),
            })?;
        }
        Ok(outcome)
    }

    /// Loads the record into the engine, drives it with the automaton and
    /// reads the saved record back.
    fn run_on_record<A: Automaton>(
        &mut self,
        operation: OperationKind,
        record_text: &str,
        automaton: impl FnOnce(PathBuf) -> A,
    ) -> anyhow::Result<OperationReport> {
        let options = GameRecord::new(record_text)
            .decode_options()
            .map_err(OperationError::InvalidOptions)?;
        let scratch = ScratchFile::create(record_text)?;
        let mut sequencer =
            PromptDriven::new(options.color, automaton(scratch.path().to_owned()));
        let outcome = self.run(
            operation,
            options.engine_args(Some(scratch.path())),
            record_text,
            &mut sequencer,
        )?;

        let mut info = parse_board_info(&outcome.output, record_text);
        info.updated_record_text = scratch
            .read()?
            .map(|saved| GameRecord::new(&saved).with_marker_comment(options.color));
        Ok(finish(operation, info, outcome.completion))
    }

    /// Starts a new game. The engine sets up the board, including handicap
    /// stones, and saves it.
    pub fn initialize(&mut self, options: &GameOptions) -> anyhow::Result<OperationReport> {
        options.validate().map_err(OperationError::InvalidOptions)?;
        // Still a valid record if the engine never gets to save
        let scratch = ScratchFile::create(&encode_options(options))?;
        let mut sequencer = PromptDriven::new(
            options.color,
            Initialize::new(scratch.path().to_owned()),
        );
        let outcome = self.run(
            OperationKind::Initialize,
            options.engine_args(None),
            "",
            &mut sequencer,
        )?;

        let mut info = parse_board_info(&outcome.output, "");
        info.game_options = Some(options.clone());
        info.updated_record_text = scratch
            .read()?
            .map(|saved| GameRecord::new(&saved).with_marker_comment(options.color));
        Ok(finish(OperationKind::Initialize, info, outcome.completion))
    }

    pub fn read_board(&mut self, record_text: &str) -> anyhow::Result<OperationReport> {
        self.run_on_record(OperationKind::ReadBoard, record_text, |_| ReadBoard::new())
    }

    /// Plays a move given with a person's column letters, e.g. `D4` or `Q16`.
    pub fn play_move(&mut self, record_text: &str, input: &str) -> anyhow::Result<OperationReport> {
        let token = MoveToken::parse(input).map_err(OperationError::InvalidMoveToken)?;
        self.play(OperationKind::PlayMove, record_text, token)
    }

    pub fn pass(&mut self, record_text: &str) -> anyhow::Result<OperationReport> {
        self.play(OperationKind::Pass, record_text, MoveToken::pass())
    }

    pub fn resign(&mut self, record_text: &str) -> anyhow::Result<OperationReport> {
        self.play(OperationKind::Resign, record_text, MoveToken::resign())
    }

    fn play(
        &mut self,
        operation: OperationKind,
        record_text: &str,
        token: MoveToken,
    ) -> anyhow::Result<OperationReport> {
        self.run_on_record(operation, record_text, |path| PlayMove::new(token, path))
    }

    /// Takes back the engine's last move and the player's move before it.
    pub fn undo(&mut self, record_text: &str) -> anyhow::Result<UndoReport> {
        let mut report = self.run_on_record(OperationKind::Undo, record_text, Undo::new)?;
        let saved = report.info.updated_record_text.take().unwrap_or_default();
        let saved = GameRecord::new(&saved);
        let undone = !GameRecord::new(record_text).is_game_over()
            && !report.info.is_illegal
            && saved.has_undone_moves();
        report.info.updated_record_text = Some(if undone {
            saved.strip_undone_moves()
        } else {
            String::from(record_text)
        });
        info!(undone, "Undo finished");
        Ok(UndoReport { report, undone })
    }

    /// The final result if the game is over, otherwise the engine's estimate.
    pub fn estimate_score(&mut self, record_text: &str) -> anyhow::Result<ScoreReport> {
        GameRecord::new(record_text)
            .decode_options()
            .map_err(OperationError::InvalidOptions)?;
        let scratch = ScratchFile::create(record_text)?;
        let outcome = self.run(
            OperationKind::EstimateScore,
            score_estimate_args(scratch.path()),
            record_text,
            &mut Silent,
        )?;
        let result = parse_score_estimate(&outcome.output, record_text);
        info!(?result, completion = ?outcome.completion, "Score estimated");
        Ok(ScoreReport {
            result,
            completion: outcome.completion,
        })
    }
}

fn finish(operation: OperationKind, info: BoardInfo, completion: Completion) -> OperationReport {
    info!(
        ?operation,
        last_move = %info.last_move_text,
        illegal = info.is_illegal,
        ?completion,
        "Operation finished"
    );
    OperationReport { info, completion }
}
