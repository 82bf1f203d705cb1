//! FEN parsing and emission, plus UCI move parsing.

use std::str::FromStr;

use super::error::{FenError, FenField, MoveParseError};
use super::{
    file_to_index, rank_to_index, Board, Color, Move, Piece, Square, CASTLE_BLACK_K,
    CASTLE_BLACK_Q, CASTLE_WHITE_K, CASTLE_WHITE_Q,
};

impl Board {
    /// Parse a position from Forsyth-Edwards Notation.
    ///
    /// The halfmove clock and fullmove number fields are optional and
    /// default to 0 and 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::MissingFields { found: parts.len() });
        }

        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::bad_field(FenField::Placement, parts[0]));
            }
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let piece = Piece::from_char(c)
                        .ok_or_else(|| FenError::bad_field(FenField::Placement, rank_str))?;
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::bad_field(FenField::Placement, rank_str));
                    }
                    board.place(Square::new(7 - rank_idx, file), color, piece);
                    file += 1;
                }
            }
        }

        match parts[1] {
            "w" => board.white_to_move = true,
            "b" => board.white_to_move = false,
            other => return Err(FenError::bad_field(FenField::SideToMove, other)),
        }

        for c in parts[2].chars() {
            match c {
                'K' => board.castling_rights |= CASTLE_WHITE_K,
                'Q' => board.castling_rights |= CASTLE_WHITE_Q,
                'k' => board.castling_rights |= CASTLE_BLACK_K,
                'q' => board.castling_rights |= CASTLE_BLACK_Q,
                '-' => {}
                _ => return Err(FenError::bad_field(FenField::Castling, parts[2])),
            }
        }

        board.en_passant_target = if parts[3] == "-" {
            None
        } else {
            let chars: Vec<char> = parts[3].chars().collect();
            match chars.as_slice() {
                [f @ 'a'..='h', r @ '1'..='8'] => {
                    Some(Square::new(rank_to_index(*r), file_to_index(*f)))
                }
                _ => return Err(FenError::bad_field(FenField::EnPassant, parts[3])),
            }
        };

        if let Some(clock) = parts.get(4) {
            board.halfmove_clock = clock.parse().unwrap_or(0);
        }
        if let Some(fullmove) = parts.get(5) {
            board.fullmove_number = fullmove.parse().unwrap_or(1);
        }

        board.hash = board.calculate_hash();
        board.repetition_counts.increment(board.hash);
        Ok(board)
    }

    /// Parse a position from FEN, panicking on malformed input.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid; use [`Board::try_from_fen`] for
    /// fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("invalid FEN string")
    }

    /// Emit the position as a six-field FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.piece_at(Square::new(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let mut castling = String::new();
        if self.castling_rights & CASTLE_WHITE_K != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WHITE_Q != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BLACK_K != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BLACK_Q != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            if self.white_to_move { "w" } else { "b" },
            castling,
            self.en_passant_target
                .map_or_else(|| "-".to_string(), |sq| sq.to_string()),
            self.halfmove_clock,
            self.fullmove_number,
        )
    }

    /// Resolve a move given in UCI long algebraic notation (e.g. `e2e4`,
    /// `e7e8q`) against the legal moves of this position.
    pub fn parse_move(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let not_uci = || MoveParseError::NotUci {
            text: uci.to_string(),
        };

        let chars: Vec<char> = uci.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(not_uci());
        }
        if !('a'..='h').contains(&chars[0])
            || !('1'..='8').contains(&chars[1])
            || !('a'..='h').contains(&chars[2])
            || !('1'..='8').contains(&chars[3])
        {
            return Err(not_uci());
        }

        let from = Square::new(rank_to_index(chars[1]), file_to_index(chars[0]));
        let to = Square::new(rank_to_index(chars[3]), file_to_index(chars[2]));

        let promotion = if let Some(&c) = chars.get(4) {
            match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(not_uci()),
            }
        } else {
            None
        };

        let candidate = Move { from, to, promotion };
        if self.legal_moves().contains(candidate) {
            Ok(candidate)
        } else {
            Err(MoveParseError::NoMatch {
                text: uci.to_string(),
            })
        }
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}
