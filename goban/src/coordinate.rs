use serde::{Deserialize, Serialize};

use crate::MoveTokenError;

/// The engine names its columns `A B C D E F G H J ..`, leaving out this letter.
pub const SKIPPED_LETTER: char = 'I';

/// The last human column letter that still has an engine counterpart.
pub const LAST_HUMAN_LETTER: char = 'Y';

/// Translates a column letter as a person says it into the engine's letter.
///
/// Letters from the skipped one onwards move up by one, e.g. `I` → `J`, `Q` → `R`.
pub fn human_to_engine_letter(letter: char) -> char {
    if (SKIPPED_LETTER..=LAST_HUMAN_LETTER).contains(&letter) {
        char::from(letter as u8 + 1)
    } else {
        letter
    }
}

/// The zero-based column index of one of the engine's column letters.
pub fn engine_letter_to_column(letter: char) -> Option<usize> {
    if !letter.is_ascii_uppercase() || letter == SKIPPED_LETTER {
        return None;
    }
    let index = (letter as u8 - b'A') as usize;
    let skipped_index = (SKIPPED_LETTER as u8 - b'A') as usize;
    Some(if index > skipped_index { index - 1 } else { index })
}

/// The letter a person uses for a zero-based column index.
pub fn column_to_human_letter(col: usize) -> Option<char> {
    let max = (LAST_HUMAN_LETTER as u8 - b'A') as usize;
    (col <= max).then(|| char::from(b'A' + col as u8))
}

/// The engine's letter for a zero-based column index.
pub fn column_to_engine_letter(col: usize) -> Option<char> {
    column_to_human_letter(col).map(human_to_engine_letter)
}

/// Where a move was played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCoordinate {
    /// Zero-based, row 0 is the highest rank.
    Point { row: usize, col: usize },
    Pass,
    Resign,
    /// The engine reported no move.
    NoPosition,
}

impl MoveCoordinate {
    /// Reads a move as the engine prints it, e.g. `R17` or `PASS`.
    pub fn from_engine_token(token: &str, board_size: usize) -> Option<Self> {
        if token.eq_ignore_ascii_case("PASS") {
            return Some(MoveCoordinate::Pass);
        }
        let mut chars = token.chars();
        let col = engine_letter_to_column(chars.next()?)?;
        let rank: usize = chars.as_str().parse().ok()?;
        if rank == 0 || rank > board_size || col >= board_size {
            return None;
        }
        Some(MoveCoordinate::Point {
            row: board_size - rank,
            col,
        })
    }

    /// The spoken form of the move, e.g. `D 4`, with human column letters.
    pub fn human_text(&self, board_size: usize) -> String {
        match *self {
            MoveCoordinate::Point { row, col } => match column_to_human_letter(col) {
                Some(letter) => format!("{} {}", letter, board_size - row),
                None => String::from("no position"),
            },
            MoveCoordinate::Pass => String::from("PASS"),
            MoveCoordinate::Resign => String::from("RESIGN"),
            MoveCoordinate::NoPosition => String::from("no position"),
        }
    }
}

/// A validated move for the engine's stdin, already in the engine's column vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveToken(String);

impl MoveToken {
    pub fn pass() -> Self {
        Self(String::from("pass"))
    }

    pub fn resign() -> Self {
        Self(String::from("resign"))
    }

    /// Validates a move such as `D4` or `Q16` given with human column letters.
    ///
    /// `pass` and `resign` are passed through unchanged.
    pub fn parse(input: &str) -> Result<Self, MoveTokenError> {
        if input == "pass" || input == "resign" {
            return Ok(Self(String::from(input)));
        }
        let mut chars = input.chars();
        let letter = chars.next().ok_or(MoveTokenError::Empty)?;
        if input.chars().count() > 3 {
            return Err(MoveTokenError::TooLong(String::from(input)));
        }
        if !letter.is_ascii_uppercase() {
            return Err(MoveTokenError::InvalidColumn(String::from(input)));
        }
        let rank = chars.as_str();
        if rank.is_empty() || !rank.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoveTokenError::InvalidRank(String::from(input)));
        }
        Ok(Self(format!("{}{}", human_to_engine_letter(letter), rank)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MoveToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::HumanLetter;

    quickcheck! {
        fn human_letters_survive_the_engine(letter: HumanLetter) -> bool {
            let engine_letter = human_to_engine_letter(letter.0);
            engine_letter != SKIPPED_LETTER
                && engine_letter_to_column(engine_letter)
                    .and_then(column_to_human_letter)
                    == Some(letter.0)
        }
    }

    #[test]
    fn engine_letters_round_trip() {
        for letter in ('A'..='Z').filter(|&c| c != SKIPPED_LETTER) {
            let col = engine_letter_to_column(letter).unwrap();
            assert_eq!(column_to_engine_letter(col), Some(letter));
        }
        assert_eq!(engine_letter_to_column(SKIPPED_LETTER), None);
    }

    #[test]
    fn letter_skip() {
        assert_eq!(human_to_engine_letter('A'), 'A');
        assert_eq!(human_to_engine_letter('H'), 'H');
        assert_eq!(human_to_engine_letter('I'), 'J');
        assert_eq!(human_to_engine_letter('Q'), 'R');
        assert_eq!(engine_letter_to_column('H'), Some(7));
        assert_eq!(engine_letter_to_column('J'), Some(8));
        assert_eq!(engine_letter_to_column('R'), Some(16));
    }

    #[test]
    fn engine_tokens() {
        assert_eq!(
            MoveCoordinate::from_engine_token("R17", 19),
            Some(MoveCoordinate::Point { row: 2, col: 16 })
        );
        assert_eq!(
            MoveCoordinate::from_engine_token("A1", 9),
            Some(MoveCoordinate::Point { row: 8, col: 0 })
        );
        assert_eq!(
            MoveCoordinate::from_engine_token("PASS", 9),
            Some(MoveCoordinate::Pass)
        );
        assert_eq!(MoveCoordinate::from_engine_token("A10", 9), None);
        assert_eq!(MoveCoordinate::from_engine_token("I3", 9), None);
        assert_eq!(MoveCoordinate::from_engine_token("", 9), None);
    }

    #[test]
    fn spoken_text_uses_human_letters() {
        let coordinate = MoveCoordinate::from_engine_token("J3", 9).unwrap();
        assert_eq!(coordinate.human_text(9), "I 3");
        assert_eq!(MoveCoordinate::Pass.human_text(9), "PASS");
        assert_eq!(MoveCoordinate::NoPosition.human_text(9), "no position");
    }

    #[test]
    fn move_tokens() {
        assert_eq!(MoveToken::parse("D4").unwrap().as_str(), "D4");
        assert_eq!(MoveToken::parse("I3").unwrap().as_str(), "J3");
        assert_eq!(MoveToken::parse("Q16").unwrap().as_str(), "R16");
        assert_eq!(MoveToken::parse("pass").unwrap(), MoveToken::pass());
        assert_eq!(MoveToken::parse("resign").unwrap(), MoveToken::resign());
        assert_eq!(
            MoveToken::parse("D100"),
            Err(MoveTokenError::TooLong(String::from("D100")))
        );
        assert_eq!(
            MoveToken::parse("d4"),
            Err(MoveTokenError::InvalidColumn(String::from("d4")))
        );
        assert_eq!(
            MoveToken::parse("4D"),
            Err(MoveTokenError::InvalidColumn(String::from("4D")))
        );
        assert_eq!(
            MoveToken::parse("DD"),
            Err(MoveTokenError::InvalidRank(String::from("DD")))
        );
        assert_eq!(MoveToken::parse(""), Err(MoveTokenError::Empty));
        assert!(MoveToken::parse("PASS").is_err());
    }
}
