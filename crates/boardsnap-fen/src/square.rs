use std::fmt;

use serde::{Deserialize, Serialize};

/// Squares per board edge.
pub const BOARD_SIZE: usize = 8;

/// A board square.
///
/// `rank` 0 is the **top** row as written in FEN (chess rank 8) and `file` 0
/// is the a-file, so `Square::new(4, 7)` is e1. The dense index is
/// `rank * 8 + file`, which is also FEN reading order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square name {0:?} (expected a1..h8)")]
pub struct SquareParseError(pub String);

impl Square {
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self { file, rank })
        } else {
            None
        }
    }

    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < BOARD_SIZE * BOARD_SIZE {
            Some(Self {
                file: (idx % BOARD_SIZE) as u8,
                rank: (idx / BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE + self.file as usize
    }

    /// Chess rank number (1..=8) of this square.
    #[inline]
    pub const fn chess_rank(self) -> u8 {
        BOARD_SIZE as u8 - self.rank
    }

    /// Square seen from the other side of the board.
    pub const fn rotated_180(self) -> Self {
        Self {
            file: BOARD_SIZE as u8 - 1 - self.file,
            rank: BOARD_SIZE as u8 - 1 - self.rank,
        }
    }

    /// All 64 squares in FEN order (rank-major, file-minor).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Square::from_index)
    }

    /// Parse algebraic notation such as `"e4"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let (f, r) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let file = (f.to_ascii_lowercase() as u32).checked_sub('a' as u32)?;
        let chess_rank = r.to_digit(10)?;
        if file >= BOARD_SIZE as u32 || !(1..=BOARD_SIZE as u32).contains(&chess_rank) {
            return None;
        }
        Self::new(file as u8, (BOARD_SIZE as u32 - chess_rank) as u8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.chess_rank())
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Square::from_name(&s).ok_or(SquareParseError(s))
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}
