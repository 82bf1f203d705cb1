//! Applying and reverting moves.
//!
//! `push` mutates the bitboards, the square-to-piece index, the clocks, the
//! castling rights and the position hash, and records an [`UndoRecord`] on
//! the board's own stack. `pop` replays that record backwards. Only moves
//! coming from legal move generation may be pushed.

use super::state::UndoRecord;
use super::zobrist::ZOBRIST;
use super::{castle_bit, Board, Color, Move, Piece, Square};

/// The rook's fixed companion squares for each of the four castling king
/// moves, as (from, to) indices.
fn castling_rook_squares(mv: Move) -> (Square, Square) {
    let (rook_from, rook_to) = match (mv.from.index(), mv.to.index()) {
        (4, 6) => (7, 5),
        (4, 2) => (0, 3),
        (60, 62) => (63, 61),
        (60, 58) => (56, 59),
        _ => panic!("castling squares out of place: {mv}"),
    };
    (Square::from_index(rook_from), Square::from_index(rook_to))
}

impl Board {
    /// Apply a legal move.
    ///
    /// Pushing a move that legal move generation would not produce leaves
    /// the board in an unspecified state.
    pub fn push(&mut self, mv: Move) {
        debug_assert!(!mv.is_null(), "the null move is not playable");

        let was_castling = self.is_castling(mv);
        let was_en_passant = self.is_en_passant(mv);
        let color = self.turn();
        let opponent = color.opponent();

        let previous_hash = self.hash;
        let previous_en_passant = self.en_passant_target;
        let previous_castling_rights = self.castling_rights;
        let previous_halfmove_clock = self.halfmove_clock;

        let mut hash = self.hash ^ ZOBRIST.side_to_move_key();
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant_key(ep.file());
        }

        // The captured pawn sits beside the destination square on an en
        // passant capture, on the destination square otherwise.
        let capture_sq = if was_en_passant {
            Square::new(mv.from.rank(), mv.to.file())
        } else {
            mv.to
        };
        let captured = if was_castling {
            None
        } else {
            self.pieces_map[capture_sq.index()]
        };
        if let Some(cap) = captured {
            self.lift(capture_sq, opponent, cap);
            hash ^= ZOBRIST.piece_key(opponent, cap, capture_sq);
        }

        let moving = self.pieces_map[mv.from.index()].expect("push from an empty square");
        self.lift(mv.from, color, moving);
        hash ^= ZOBRIST.piece_key(color, moving, mv.from);

        let placed = mv.promotion.unwrap_or(moving);
        self.place(mv.to, color, placed);
        hash ^= ZOBRIST.piece_key(color, placed, mv.to);

        if was_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv);
            self.lift(rook_from, color, Piece::Rook);
            self.place(rook_to, color, Piece::Rook);
            hash ^= ZOBRIST.piece_key(color, Piece::Rook, rook_from);
            hash ^= ZOBRIST.piece_key(color, Piece::Rook, rook_to);
        }

        self.en_passant_target = None;
        if moving == Piece::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            let ep = Square::new((mv.from.rank() + mv.to.rank()) / 2, mv.from.file());
            self.en_passant_target = Some(ep);
            hash ^= ZOBRIST.en_passant_key(ep.file());
        }

        if moving == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        hash ^= self.strip_castling_rights(mv, moving, color, captured);

        if color == Color::Black {
            self.fullmove_number += 1;
        }
        self.white_to_move = !self.white_to_move;
        self.hash = hash;

        let previous_repetition_count = self.repetition_counts.get(hash);
        self.repetition_counts.increment(hash);

        self.undo_stack.push(UndoRecord {
            mv,
            captured,
            was_castling,
            was_en_passant,
            previous_castling_rights,
            previous_en_passant,
            previous_halfmove_clock,
            previous_hash,
            previous_repetition_count,
            made_hash: hash,
        });
    }

    /// Revert the most recent push and return the move it applied.
    ///
    /// # Panics
    /// Panics when there is no move to undo.
    pub fn pop(&mut self) -> Move {
        let record = self
            .undo_stack
            .pop()
            .expect("pop with no pushed move to undo");
        self.repetition_counts
            .set(record.made_hash, record.previous_repetition_count);

        self.white_to_move = !self.white_to_move;
        let color = self.turn();
        if color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.en_passant_target = record.previous_en_passant;
        self.castling_rights = record.previous_castling_rights;
        self.halfmove_clock = record.previous_halfmove_clock;
        self.hash = record.previous_hash;

        let mv = record.mv;
        let placed = self.pieces_map[mv.to.index()].expect("undo with an empty target square");
        self.lift(mv.to, color, placed);
        let original = if mv.promotion.is_some() {
            Piece::Pawn
        } else {
            placed
        };
        self.place(mv.from, color, original);

        if record.was_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv);
            self.lift(rook_to, color, Piece::Rook);
            self.place(rook_from, color, Piece::Rook);
        }

        if let Some(cap) = record.captured {
            let capture_sq = if record.was_en_passant {
                Square::new(mv.from.rank(), mv.to.file())
            } else {
                mv.to
            };
            self.place(capture_sq, color.opponent(), cap);
        }

        mv
    }

    /// Remove castling rights invalidated by `mv` and return the hash delta.
    fn strip_castling_rights(
        &mut self,
        mv: Move,
        moving: Piece,
        color: Color,
        captured: Option<Piece>,
    ) -> u64 {
        let mut delta = 0u64;
        let mut strip = |rights: &mut u8, color: Color, side: char| {
            let bit = castle_bit(color, side);
            if *rights & bit != 0 {
                *rights &= !bit;
                return ZOBRIST.castling_key(bit);
            }
            0
        };

        match moving {
            Piece::King => {
                delta ^= strip(&mut self.castling_rights, color, 'K');
                delta ^= strip(&mut self.castling_rights, color, 'Q');
            }
            Piece::Rook => {
                let home_rank = if color == Color::White { 0 } else { 7 };
                if mv.from == Square::new(home_rank, 0) {
                    delta ^= strip(&mut self.castling_rights, color, 'Q');
                } else if mv.from == Square::new(home_rank, 7) {
                    delta ^= strip(&mut self.castling_rights, color, 'K');
                }
            }
            _ => {}
        }

        if captured == Some(Piece::Rook) {
            let opponent = color.opponent();
            let home_rank = if opponent == Color::White { 0 } else { 7 };
            if mv.to == Square::new(home_rank, 0) {
                delta ^= strip(&mut self.castling_rights, opponent, 'Q');
            } else if mv.to == Square::new(home_rank, 7) {
                delta ^= strip(&mut self.castling_rights, opponent, 'K');
            }
        }

        delta
    }
}
