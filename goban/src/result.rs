use serde::{Deserialize, Serialize};

use crate::Color;

/// The outcome of a game, final or estimated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// `None` for a draw or an unreadable result.
    pub winner: Option<Color>,
    pub resigned: bool,
    /// The margin in points, rounded up so that it reads as a whole number.
    pub score: Option<u32>,
    /// Read from a finished game rather than estimated from a game in progress.
    pub authoritative: bool,
}

impl GameResult {
    /// Parses a result such as `W+50.5`, `B+R` or `B+Resign`.
    pub fn parse_token(token: &str, authoritative: bool) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let (side, margin) = token.split_once('+').unwrap_or((token, ""));
        let winner = match side {
            "B" => Some(Color::Black),
            "W" => Some(Color::White),
            _ => None,
        };
        let resigned = margin == "R" || margin == "Resign";
        let score = margin.parse::<f64>().ok().and_then(round_up_score);
        Some(Self {
            winner,
            resigned,
            score,
            authoritative,
        })
    }

    /// A live estimate for a game that has not ended.
    pub fn estimate(winner: Option<Color>, raw_score: f64) -> Self {
        Self {
            winner,
            resigned: false,
            score: round_up_score(raw_score),
            authoritative: false,
        }
    }
}

/// Rounds a margin up to the next whole point, e.g. 6.5 → 7.
pub fn round_up_score(raw_score: f64) -> Option<u32> {
    if raw_score.is_finite() && raw_score >= 0.0 {
        Some(raw_score.ceil() as u32)
    } else {
        None
    }
}
