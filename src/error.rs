//! Error types for the tilecrush crate

use thiserror::Error;

use crate::board::Direction;

/// Main error type for the tilecrush crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cannot move {direction} from ({row}, {col}): target is out of bounds")]
    MoveOutOfBounds {
        row: usize,
        col: usize,
        direction: Direction,
    },

    #[error("moving {direction} from ({row}, {col}) produces no 3-match")]
    MoveWithoutMatch {
        row: usize,
        col: usize,
        direction: Direction,
    },

    #[error("invalid board dimensions {rows}x{cols} (both must be at least 3)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid cell code '{code}' at row {row}, column {col}")]
    InvalidCellCode {
        code: String,
        row: usize,
        col: usize,
    },

    #[error("invalid direction '{input}'. Expected one of: u, d, l, r")]
    ParseDirection { input: String },

    #[error("invalid goal mode '{input}'. Expected one of: {expected}")]
    ParseGoalMode { input: String, expected: String },

    #[error("invalid policy '{input}'. Expected one of: {expected}")]
    ParsePolicy { input: String, expected: String },

    #[error("no legal move found after {attempts} board shuffles")]
    ShuffleExhausted { attempts: usize },

    #[error("malformed move input '{input}'. Expected 'row,col,dir' or 'shuffle'")]
    ParseMoveInput { input: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for the recoverable invalid-move class: the board is guaranteed
    /// unchanged and the caller may simply try another move.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            Error::MoveOutOfBounds { .. } | Error::MoveWithoutMatch { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
