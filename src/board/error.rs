//! Error types for board operations.

use std::fmt;

/// The FEN field a parse failure points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenField {
    Placement,
    SideToMove,
    Castling,
    EnPassant,
}

impl fmt::Display for FenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FenField::Placement => "piece placement",
            FenField::SideToMove => "side to move",
            FenField::Castling => "castling rights",
            FenField::EnPassant => "en passant target",
        })
    }
}

/// A position string that is not valid FEN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Fewer than the four mandatory fields were present.
    MissingFields { found: usize },
    /// One of the fields could not be read; carries the offending token.
    BadField { field: FenField, token: String },
}

impl FenError {
    pub(crate) fn bad_field(field: FenField, token: &str) -> Self {
        FenError::BadField {
            field,
            token: token.to_string(),
        }
    }
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::MissingFields { found } => write!(
                f,
                "a FEN needs placement, side, castling and en passant fields; got {found}"
            ),
            FenError::BadField { field, token } => {
                write!(f, "cannot read '{token}' as the {field} field of a FEN")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// A move string the board could not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Not UCI long algebraic notation (`e2e4`, `e7e8q`).
    NotUci { text: String },
    /// Well-formed, but matches no legal move in this position.
    NoMatch { text: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::NotUci { text } => {
                write!(f, "'{text}' is not a move in long algebraic notation")
            }
            MoveParseError::NoMatch { text } => {
                write!(f, "the move '{text}' is not playable here")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// A square name that is not a file letter followed by a rank digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSquareError {
    pub(crate) text: String,
}

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' does not name a square", self.text)
    }
}

impl std::error::Error for ParseSquareError {}
