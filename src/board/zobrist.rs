//! Zobrist hashing for positions.
//!
//! One random key per hashable feature: piece on square, side to move, each
//! castling right, en passant file. The keys come from a fixed-seed
//! generator so hashes are stable across runs; push/pop fold them in and
//! out incrementally, and `calculate_hash` rebuilds from scratch for
//! verification.

use once_cell::sync::Lazy;
use rand::prelude::*;

use super::{Color, Piece, Square};

const KEY_SEED: u64 = 0x5EED_0F_C4A5_71E5;

pub(crate) struct ZobristKeys {
    /// One 64-square table per (color, piece) pair, color-major.
    piece_square: [[u64; 64]; 12],
    side_to_move: u64,
    /// Indexed by the bit position of the right in the castling mask.
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(KEY_SEED);
        let mut keys = ZobristKeys {
            piece_square: [[0; 64]; 12],
            side_to_move: rng.gen(),
            castling: [0; 4],
            en_passant_file: [0; 8],
        };
        for table in &mut keys.piece_square {
            rng.fill(&mut table[..]);
        }
        rng.fill(&mut keys.castling[..]);
        rng.fill(&mut keys.en_passant_file[..]);
        keys
    }

    #[inline]
    pub(crate) fn piece_key(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_square[color.index() * 6 + piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side_to_move_key(&self) -> u64 {
        self.side_to_move
    }

    /// Key for one castling right, identified by its `castle_bit` mask.
    #[inline]
    pub(crate) fn castling_key(&self, right: u8) -> u64 {
        debug_assert_eq!(right.count_ones(), 1);
        self.castling[right.trailing_zeros() as usize]
    }

    #[inline]
    pub(crate) fn en_passant_key(&self, file: usize) -> u64 {
        self.en_passant_file[file]
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);
