use std::path::PathBuf;

use goban::{Color, MoveToken};
use regex::Regex;

/// One line written to the engine's stdin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineCommand {
    Save(PathBuf),
    Quit,
    Continue,
    Undo,
    Play(MoveToken),
}

impl std::fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineCommand::Save(path) => write!(f, "save {}", path.display()),
            EngineCommand::Quit => write!(f, "quit"),
            EngineCommand::Continue => write!(f, "continue"),
            EngineCommand::Undo => write!(f, "undo"),
            EngineCommand::Play(token) => write!(f, "{}", token),
        }
    }
}

/// What the engine has printed so far, reduced to what the automata care about.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Observation {
    /// How many times the engine asked the player for a move, e.g. `black(3):`.
    pub own: usize,
    /// How many times the engine asked the other color for a move.
    pub opponent: usize,
    pub offers_save: bool,
    pub offers_quit: bool,
    pub offers_continue: bool,
}

/// Counts the engine's readiness markers for both colors.
pub struct PromptCounter {
    own: Regex,
    opponent: Regex,
}

fn prompt_regex(color: Color) -> Regex {
    Regex::new(&format!(r"{}\(\d+\)", color)).unwrap()
}

impl PromptCounter {
    pub fn new(color: Color) -> Self {
        Self {
            own: prompt_regex(color),
            opponent: prompt_regex(color.opponent()),
        }
    }

    pub fn observe(&self, output: &str) -> Observation {
        Observation {
            own: self.own.find_iter(output).count(),
            opponent: self.opponent.find_iter(output).count(),
            offers_save: output.contains("to save"),
            offers_quit: output.contains("quit"),
            offers_continue: output.contains("continue"),
        }
    }
}

/// Decides what to type into the engine.
///
/// Called with the complete output every time more of it arrives, so the same
/// prompt is seen many times. Implementations must answer each prompt once.
pub trait Sequencer {
    fn react(&mut self, output: &str) -> Vec<EngineCommand>;
}

/// A state machine over [`Observation`]s whose phase only moves forward.
pub trait Automaton {
    fn step(&mut self, observation: &Observation) -> Vec<EngineCommand>;
}

/// Runs an [`Automaton`] on the prompts of one color.
pub struct PromptDriven<A> {
    counter: PromptCounter,
    automaton: A,
}

impl<A: Automaton> PromptDriven<A> {
    pub fn new(color: Color, automaton: A) -> Self {
        Self {
            counter: PromptCounter::new(color),
            automaton,
        }
    }

    pub fn automaton(&self) -> &A {
        &self.automaton
    }
}

impl<A: Automaton> Sequencer for PromptDriven<A> {
    fn react(&mut self, output: &str) -> Vec<EngineCommand> {
        let observation = self.counter.observe(output);
        self.automaton.step(&observation)
    }
}

/// For engine invocations that need no input.
pub struct Silent;

impl Sequencer for Silent {
    fn react(&mut self, _output: &str) -> Vec<EngineCommand> {
        Vec::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitializePhase {
    AwaitingFirstPrompt,
    Saved,
    Finished,
}

/// Saves the empty board at the first prompt and quits at the second.
pub struct Initialize {
    pub phase: InitializePhase,
    record_path: PathBuf,
}

impl Initialize {
    pub fn new(record_path: PathBuf) -> Self {
        Self {
            phase: InitializePhase::AwaitingFirstPrompt,
            record_path,
        }
    }
}

impl Automaton for Initialize {
    fn step(&mut self, observation: &Observation) -> Vec<EngineCommand> {
        match self.phase {
            InitializePhase::AwaitingFirstPrompt if observation.own == 1 => {
                self.phase = InitializePhase::Saved;
                vec![EngineCommand::Save(self.record_path.clone())]
            }
            InitializePhase::AwaitingFirstPrompt | InitializePhase::Saved
                if observation.own == 2 =>
            {
                self.phase = InitializePhase::Finished;
                vec![EngineCommand::Quit]
            }
            _ => Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadBoardPhase {
    AwaitingPrompt,
    Continued,
    Finished,
}

/// Quits at the first prompt. A finished game asks to `continue` before it
/// shows the board.
pub struct ReadBoard {
    pub phase: ReadBoardPhase,
}

impl ReadBoard {
    pub fn new() -> Self {
        Self {
            phase: ReadBoardPhase::AwaitingPrompt,
        }
    }
}

impl Default for ReadBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Automaton for ReadBoard {
    fn step(&mut self, observation: &Observation) -> Vec<EngineCommand> {
        let mut commands = Vec::new();
        if self.phase == ReadBoardPhase::AwaitingPrompt && observation.offers_continue {
            self.phase = ReadBoardPhase::Continued;
            commands.push(EngineCommand::Continue);
        }
        if self.phase != ReadBoardPhase::Finished && observation.own == 1 {
            self.phase = ReadBoardPhase::Finished;
            commands.push(EngineCommand::Quit);
        }
        commands
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PlayMovePhase {
    AwaitingPrompt,
    MoveSent,
    Saved,
    Finished,
}

/// Plays one move (or pass, or resign), lets the engine answer, saves and quits.
///
/// The engine's first board shows the position before the move, the second
/// one after the player's move and the last one after the engine's reply.
pub struct PlayMove {
    pub phase: PlayMovePhase,
    token: MoveToken,
    record_path: PathBuf,
}

impl PlayMove {
    pub fn new(token: MoveToken, record_path: PathBuf) -> Self {
        Self {
            phase: PlayMovePhase::AwaitingPrompt,
            token,
            record_path,
        }
    }
}

impl Automaton for PlayMove {
    fn step(&mut self, observation: &Observation) -> Vec<EngineCommand> {
        if self.phase < PlayMovePhase::Saved
            && (observation.offers_save || observation.own == 2)
        {
            self.phase = PlayMovePhase::Saved;
            vec![EngineCommand::Save(self.record_path.clone())]
        } else if self.phase < PlayMovePhase::Finished
            && (observation.offers_quit || observation.own == 3)
        {
            self.phase = PlayMovePhase::Finished;
            vec![EngineCommand::Quit]
        } else if self.phase == PlayMovePhase::AwaitingPrompt && observation.own == 1 {
            self.phase = PlayMovePhase::MoveSent;
            vec![EngineCommand::Play(self.token.clone())]
        } else {
            Vec::new()
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum UndoPhase {
    AwaitingPrompt,
    OpponentUndone,
    OwnUndone,
    Saved,
    Finished,
}

/// Takes back the engine's last move and then the player's, saves and quits.
///
/// If the engine asks the other color twice, the second undo had nothing to
/// take back and the session quits without saving.
pub struct Undo {
    pub phase: UndoPhase,
    record_path: PathBuf,
}

impl Undo {
    pub fn new(record_path: PathBuf) -> Self {
        Self {
            phase: UndoPhase::AwaitingPrompt,
            record_path,
        }
    }
}

impl Automaton for Undo {
    fn step(&mut self, observation: &Observation) -> Vec<EngineCommand> {
        if self.phase < UndoPhase::Saved && observation.own == 2 {
            self.phase = UndoPhase::Saved;
            vec![EngineCommand::Save(self.record_path.clone())]
        } else if self.phase < UndoPhase::Finished
            && (observation.own == 3 || observation.opponent == 2)
        {
            self.phase = UndoPhase::Finished;
            vec![EngineCommand::Quit]
        } else if self.phase == UndoPhase::AwaitingPrompt && observation.own == 1 {
            self.phase = UndoPhase::OpponentUndone;
            vec![EngineCommand::Undo]
        } else if self.phase == UndoPhase::OpponentUndone && observation.opponent == 1 {
            self.phase = UndoPhase::OwnUndone;
            vec![EngineCommand::Undo]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> PathBuf {
        PathBuf::from("/tmp/0123456789ABCDEF.sgf")
    }

    /// Feeds every prefix of `output` that ends a line or a prompt, the way
    /// chunks would arrive, and collects every command.
    fn feed(sequencer: &mut dyn Sequencer, output: &str) -> Vec<EngineCommand> {
        let mut commands = Vec::new();
        for end in 1..=output.len() {
            if output.is_char_boundary(end) {
                commands.extend(sequencer.react(&output[..end]));
            }
        }
        commands
    }

    #[test]
    fn prompts_are_counted_per_color() {
        let counter = PromptCounter::new(Color::White);
        let observation = counter.observe("black(1): D4\nwhite(2): \nwhite(3): ");
        assert_eq!(observation.own, 2);
        assert_eq!(observation.opponent, 1);
        assert!(!observation.offers_save);
        assert!(!counter.observe("black(): ").offers_quit);
    }

    #[test]
    fn commands_render_as_engine_input() {
        assert_eq!(
            EngineCommand::Save(path()).to_string(),
            "save /tmp/0123456789ABCDEF.sgf"
        );
        let token = MoveToken::parse("Q16").unwrap();
        assert_eq!(EngineCommand::Play(token).to_string(), "R16");
        assert_eq!(EngineCommand::Quit.to_string(), "quit");
    }

    #[test]
    fn initialize_saves_then_quits() {
        let mut sequencer = PromptDriven::new(Color::Black, Initialize::new(path()));
        let commands = feed(&mut sequencer, "Board\nblack(1): ");
        assert_eq!(commands, vec![EngineCommand::Save(path())]);
        let commands = feed(&mut sequencer, "Board\nblack(1): \nblack(2): ");
        assert_eq!(commands, vec![EngineCommand::Quit]);
        assert_eq!(sequencer.automaton().phase, InitializePhase::Finished);
        assert!(feed(&mut sequencer, "Board\nblack(1): \nblack(2): \nblack(3): ").is_empty());
    }

    #[test]
    fn read_board_quits_once() {
        let mut sequencer = PromptDriven::new(Color::White, ReadBoard::new());
        assert!(sequencer.react("white").is_empty());
        assert_eq!(sequencer.react("white(1): "), vec![EngineCommand::Quit]);
        assert!(sequencer.react("white(1): ").is_empty());
    }

    #[test]
    fn read_board_continues_a_finished_game() {
        let mut sequencer = PromptDriven::new(Color::Black, ReadBoard::new());
        let output = "Game over. Type continue to see the board\nblack(1): ";
        let commands = feed(&mut sequencer, output);
        assert_eq!(commands, vec![EngineCommand::Continue, EngineCommand::Quit]);

        // Both may be answered on the same observation
        let mut sequencer = PromptDriven::new(Color::Black, ReadBoard::new());
        assert_eq!(
            sequencer.react(output),
            vec![EngineCommand::Continue, EngineCommand::Quit]
        );
    }

    #[test]
    fn play_move_sends_move_save_quit_in_order() {
        let token = MoveToken::parse("I3").unwrap();
        let mut sequencer = PromptDriven::new(Color::Black, PlayMove::new(token.clone(), path()));
        let output = "black(1): J3\nwhite moves\nblack(2): save\nblack(3): ";
        let commands = feed(&mut sequencer, output);
        assert_eq!(
            commands,
            vec![
                EngineCommand::Play(token),
                EngineCommand::Save(path()),
                EngineCommand::Quit
            ]
        );
        assert_eq!(sequencer.automaton().phase, PlayMovePhase::Finished);
    }

    #[test]
    fn play_move_saves_when_offered() {
        let mut sequencer = PromptDriven::new(Color::White, PlayMove::new(MoveToken::pass(), path()));
        let output = "white(1): pass\nGame over. Type a filename to save, or quit.\n";
        let commands = feed(&mut sequencer, output);
        assert_eq!(
            commands,
            vec![
                EngineCommand::Play(MoveToken::pass()),
                EngineCommand::Save(path()),
                EngineCommand::Quit
            ]
        );
    }

    #[test]
    fn undo_takes_back_two_moves() {
        let mut sequencer = PromptDriven::new(Color::Black, Undo::new(path()));
        let output = "black(5): undo\nwhite(5): undo\nblack(4): save\nblack(4): ";
        let commands = feed(&mut sequencer, output);
        assert_eq!(
            commands,
            vec![
                EngineCommand::Undo,
                EngineCommand::Undo,
                EngineCommand::Save(path()),
                EngineCommand::Quit
            ]
        );
    }

    #[test]
    fn undo_with_nothing_to_take_back_quits_without_saving() {
        let mut sequencer = PromptDriven::new(Color::Black, Undo::new(path()));
        let output = "black(1): undo\nwhite(1): undo\nwhite(1): ";
        let commands = feed(&mut sequencer, output);
        assert_eq!(
            commands,
            vec![EngineCommand::Undo, EngineCommand::Undo, EngineCommand::Quit]
        );
        assert_eq!(sequencer.automaton().phase, UndoPhase::Finished);
    }

    #[test]
    fn silent_never_answers() {
        assert!(feed(&mut Silent, "black(1): to save quit continue").is_empty());
    }
}
