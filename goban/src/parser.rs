use serde::{Deserialize, Serialize};

use crate::{BoardSnapshot, Cell, Color, GameOptions, GameRecord, GameResult, MoveCoordinate};

/// Everything learned from one engine invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardInfo {
    /// The board before the operation, `None` if the engine printed no board.
    pub current_board: Option<BoardSnapshot>,
    /// The board after the operation, `None` if the engine printed no board.
    pub new_board: Option<BoardSnapshot>,
    /// `None` if the prior record was blank or did not decode.
    pub game_options: Option<GameOptions>,
    pub last_move: MoveCoordinate,
    /// The last move as it would be read out, e.g. `D 4`, `PASS` or `RESIGN`.
    pub last_move_text: String,
    /// The engine complained about an illegal or invalid move.
    pub is_illegal: bool,
    /// The result stored in the prior record.
    pub current_game_result: Option<GameResult>,
    /// The result the engine announced during this invocation.
    pub new_game_result: Option<GameResult>,
    /// The prior record.
    pub record_text: String,
    /// The record after the operation. Filled in by whoever ran the engine.
    pub updated_record_text: Option<String>,
}

impl BoardInfo {
    /// Whether the updated record should replace the prior one: the game was
    /// not already over and the engine accepted the move.
    pub fn is_persistable(&self) -> bool {
        !GameRecord::new(&self.record_text).is_game_over() && !self.is_illegal
    }
}

fn is_coordinate_row(line: &str) -> bool {
    line.contains("A B C D E")
}

/// Reads one row of the ASCII board, e.g. ` 5 X . + . +(O). 5`.
///
/// Text after the row (the engine prints capture counts there) is ignored.
fn parse_board_row(line: &str, size: usize) -> Option<Vec<Cell>> {
    let line = line.trim_start();
    let after_rank = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_rank.len() == line.len() {
        return None;
    }
    let cells: Vec<Cell> = after_rank
        .chars()
        .filter(|c| !matches!(c, ' ' | '(' | ')'))
        .take(size)
        .map(Cell::from_render_char)
        .collect();
    (cells.len() == size).then_some(cells)
}

fn parse_board_block(header: &str, rows: &[&str]) -> Option<BoardSnapshot> {
    let size = header
        .split_whitespace()
        .filter(|token| token.len() == 1 && token.chars().all(|c| c.is_ascii_uppercase()))
        .count();
    let rows = rows
        .iter()
        .map(|row| parse_board_row(row, size))
        .collect::<Option<Vec<Vec<Cell>>>>()?;
    BoardSnapshot::from_rows(rows)
}

/// Every board the engine rendered, in order.
///
/// A board is enclosed by two rows of column letters. Renderings that are cut
/// off or garbled are skipped.
pub fn board_blocks(lines: &[&str]) -> Vec<BoardSnapshot> {
    let headers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_coordinate_row(line))
        .map(|(idx, _)| idx)
        .collect();
    headers
        .chunks_exact(2)
        .filter_map(|pair| parse_board_block(lines[pair[0]], &lines[pair[0] + 1..pair[1]]))
        .collect()
}

/// The last word on the first line containing `needle`.
fn last_word_of_first_line<'a>(lines: &[&'a str], needle: &str) -> Option<&'a str> {
    lines
        .iter()
        .find(|line| line.contains(needle))
        .and_then(|line| line.split_whitespace().last())
}

/// The last word on the last line containing `needle`.
fn last_word_of_last_line<'a>(lines: &[&'a str], needle: &str) -> Option<&'a str> {
    lines
        .iter()
        .rev()
        .find(|line| line.contains(needle))
        .and_then(|line| line.split_whitespace().last())
}

fn has_illegal_warning(lines: &[&str]) -> bool {
    lines
        .iter()
        .any(|line| line.contains("Illegal") || line.contains("Invalid"))
}

/// Turns the console output of one engine invocation into a [`BoardInfo`].
///
/// `record_text` is the record the engine was started with, or empty for a new game.
pub fn parse_board_info(output: &str, record_text: &str) -> BoardInfo {
    let lines: Vec<&str> = output.lines().collect();
    let record = GameRecord::new(record_text);
    let game_options = record.decode_options().ok();

    let boards = board_blocks(&lines);
    let board_size = last_word_of_first_line(&lines, "Board Size")
        .and_then(|word| word.parse::<usize>().ok())
        .or_else(|| boards.first().map(BoardSnapshot::size))
        .or_else(|| game_options.as_ref().map(|options| options.board_size));

    let new_game_result = last_word_of_first_line(&lines, "Result:")
        .and_then(|word| GameResult::parse_token(word, false));

    let last_move = if new_game_result.is_some_and(|result| result.resigned) {
        MoveCoordinate::Resign
    } else {
        match (last_word_of_last_line(&lines, "Last move"), board_size) {
            (Some(word), Some(size)) => {
                MoveCoordinate::from_engine_token(word, size).unwrap_or(MoveCoordinate::NoPosition)
            }
            (Some(word), None) if word.eq_ignore_ascii_case("PASS") => MoveCoordinate::Pass,
            _ => MoveCoordinate::NoPosition,
        }
    };

    BoardInfo {
        current_board: boards.first().cloned(),
        new_board: boards.last().cloned(),
        game_options,
        last_move,
        last_move_text: last_move.human_text(board_size.unwrap_or(0)),
        is_illegal: has_illegal_warning(&lines),
        current_game_result: record.result(),
        new_game_result,
        record_text: String::from(record_text),
        updated_record_text: None,
    }
}

/// Reads the output of a `--score estimate` invocation.
///
/// A result already stored in the record takes precedence over the estimate.
pub fn parse_score_estimate(output: &str, record_text: &str) -> Option<GameResult> {
    if let Some(result) = GameRecord::new(record_text).result() {
        return Some(result);
    }
    // E.g. "White wins by 6.5 points"
    let line = output.lines().find(|line| line.contains("point"))?;
    let words: Vec<&str> = line.split_whitespace().collect();
    let winner = words.first().and_then(|word| word.parse::<Color>().ok());
    let raw_score: f64 = words.iter().rev().nth(1)?.parse().ok()?;
    Some(GameResult::estimate(winner, raw_score))
}
