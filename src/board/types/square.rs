//! Board squares as compact 0-63 indices.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::ParseSquareError;

pub(crate) fn file_to_index(file: char) -> usize {
    file as usize - 'a' as usize
}

pub(crate) fn rank_to_index(rank: char) -> usize {
    rank as usize - '1' as usize
}

/// A square on the board, stored as `rank * 8 + file` with a1 = 0, h8 = 63.
///
/// The file is `index & 7` and the rank is `index >> 3`; rank 0 is White's
/// first rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Build a square from rank and file, both 0-7. Not bounds-checked.
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank * 8 + file) as u8)
    }

    /// Rank 0-7, where 0 is White's back rank.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 >> 3) as usize
    }

    /// File 0-7, where 0 is the a-file.
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 & 7) as usize
    }

    /// The 0-63 index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Build a square from a 0-63 index.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// The same square seen from the other side of the board (a1 <-> a8).
    #[inline]
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Square(self.0 ^ 0x38)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f @ 'a'..='h'), Some(r @ '1'..='8'), None) => (f, r),
            _ => {
                return Err(ParseSquareError {
                    text: s.to_string(),
                })
            }
        };
        Ok(Square::new(rank_to_index(rank), file_to_index(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_and_file_decompose_the_index() {
        let sq = Square::new(3, 4);
        assert_eq!(sq.index(), 28);
        assert_eq!(sq.rank(), 3);
        assert_eq!(sq.file(), 4);
    }

    #[test]
    fn mirrored_flips_the_rank_only() {
        assert_eq!(Square::new(0, 0).mirrored(), Square::new(7, 0));
        assert_eq!(Square::new(2, 6).mirrored(), Square::new(5, 6));
        assert_eq!(Square::new(4, 3).mirrored().mirrored(), Square::new(4, 3));
    }

    #[test]
    fn display_uses_algebraic_notation() {
        assert_eq!(Square::new(0, 0).to_string(), "a1");
        assert_eq!(Square::new(7, 7).to_string(), "h8");
        assert_eq!(Square::new(3, 4).to_string(), "e4");
    }

    #[test]
    fn parses_algebraic_notation() {
        let sq: Square = "e4".parse().unwrap();
        assert_eq!(sq, Square::new(3, 4));
        assert!("z1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }
}
