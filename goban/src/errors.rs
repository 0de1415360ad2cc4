/// The error type for decoding and validating [`GameOptions`](crate::GameOptions).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionsError {
    /// The record has no root node, or the root node lacks this key.
    MissingKey(&'static str),
    InvalidBoardSize(String),
    InvalidColor(String),
    InvalidHandicap(String),
    InvalidKomi(String),
    InvalidLevel(String),
    InvalidRules(String),
}

impl std::error::Error for OptionsError {}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::MissingKey(key) => {
                write!(f, "The game record does not specify {}", key)
            }
            OptionsError::InvalidBoardSize(value) => write!(
                f,
                "'{}' is not a supported board size, try one of 9, 11, 13, 15, 17, 19",
                value
            ),
            OptionsError::InvalidColor(value) => {
                write!(f, "'{}' is not a color, try black or white", value)
            }
            OptionsError::InvalidHandicap(value) => {
                write!(f, "'{}' is not a supported handicap, try 0 to 9", value)
            }
            OptionsError::InvalidKomi(value) => write!(
                f,
                "'{}' is not a supported compensation, try 0.5 to 8.5 in whole steps",
                value
            ),
            OptionsError::InvalidLevel(value) => {
                write!(f, "'{}' is not a supported level, try 1 to 6", value)
            }
            OptionsError::InvalidRules(value) => {
                write!(f, "'{}' are not supported rules, try chinese or japanese", value)
            }
        }
    }
}

/// The error type for [`MoveToken::parse()`](crate::MoveToken::parse).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveTokenError {
    Empty,
    TooLong(String),
    InvalidColumn(String),
    InvalidRank(String),
}

impl std::error::Error for MoveTokenError {}

impl std::fmt::Display for MoveTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveTokenError::Empty => write!(f, "No move was given"),
            MoveTokenError::TooLong(token) => {
                write!(f, "The move '{}' is longer than three characters", token)
            }
            MoveTokenError::InvalidColumn(token) => {
                write!(f, "The move '{}' does not start with a column letter", token)
            }
            MoveTokenError::InvalidRank(token) => {
                write!(f, "The move '{}' does not end with a row number", token)
            }
        }
    }
}
