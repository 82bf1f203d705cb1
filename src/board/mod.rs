//! Chess position representation and rules.
//!
//! The board keeps per-piece bitboards plus an incrementally maintained
//! square-to-piece index (`pieces_map`) that the evaluator reads. Moves are
//! applied with [`Board::push`] and reverted with [`Board::pop`]; the undo
//! stack lives on the board itself so the search can explore the tree on a
//! single shared position.
//!
//! # Example
//! ```
//! use fianchetto::board::Board;
//!
//! let mut board = Board::new();
//! let moves = board.legal_moves();
//! assert_eq!(moves.len(), 20);
//! ```

mod attack_tables;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod san;
mod state;
mod types;
mod zobrist;

#[cfg(test)]
mod tests;

pub use error::{FenError, FenField, MoveParseError, ParseSquareError};
pub use san::san;
pub use state::{Board, Outcome};
pub use types::{Bitboard, Color, Move, MoveList, Piece, Square};

pub(crate) use types::{
    castle_bit, file_to_index, rank_to_index, ALL_CASTLING_RIGHTS, CASTLE_BLACK_K, CASTLE_BLACK_Q,
    CASTLE_WHITE_K, CASTLE_WHITE_Q,
};
