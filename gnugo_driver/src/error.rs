use goban::{MoveTokenError, OptionsError};

/// A request the engine was never started for.
#[derive(Debug, PartialEq, Eq)]
pub enum OperationError {
    InvalidOptions(OptionsError),
    InvalidMoveToken(MoveTokenError),
}

impl std::error::Error for OperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OperationError::InvalidOptions(err) => Some(err),
            OperationError::InvalidMoveToken(err) => Some(err),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationError::InvalidOptions(_) => {
                write!(f, "The game options are not usable")
            }
            OperationError::InvalidMoveToken(_) => write!(f, "The move is not valid"),
        }
    }
}

impl From<OptionsError> for OperationError {
    fn from(err: OptionsError) -> Self {
        OperationError::InvalidOptions(err)
    }
}

impl From<MoveTokenError> for OperationError {
    fn from(err: MoveTokenError) -> Self {
        OperationError::InvalidMoveToken(err)
    }
}
