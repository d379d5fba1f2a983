use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fen::{decode_placement, encode_placement};
use crate::{Color, Piece, PieceKind, Square, BOARD_SIZE};

const SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Dense 8×8 grid of optional pieces.
///
/// No invariant is enforced on piece counts: while editing, a board may hold
/// zero or several kings. Serializes as its FEN placement field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Board {
    squares: [Option<Piece>; SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            squares: [None; SQUARES],
        }
    }

    /// Standard starting arrangement, white at the bottom (ranks 6 and 7).
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (file, kind) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            board.put(file, 0, Some(Piece::black(kind)));
            board.put(file, 1, Some(Piece::black(PieceKind::Pawn)));
            board.put(file, 6, Some(Piece::white(PieceKind::Pawn)));
            board.put(file, 7, Some(Piece::white(kind)));
        }
        board
    }

    fn put(&mut self, file: u8, rank: u8, piece: Option<Piece>) {
        if let Some(sq) = Square::new(file, rank) {
            self.squares[sq.index()] = piece;
        }
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Replace the content of one square, returning what was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.squares[sq.index()], piece)
    }

    pub fn clear(&mut self) {
        self.squares = [None; SQUARES];
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// Every square with its content, in FEN order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::all().map(move |sq| (sq, self.get(sq)))
    }

    /// Occupied squares only, in FEN order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter_map(|(sq, p)| p.map(|p| (sq, p)))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.squares.iter().filter(|p| **p == Some(piece)).count()
    }

    /// Kings per color as `(white, black)`.
    pub fn count_kings(&self) -> (usize, usize) {
        (
            self.count(Piece::new(PieceKind::King, Color::White)),
            self.count(Piece::new(PieceKind::King, Color::Black)),
        )
    }

    /// The board seen from the other side (photo taken from black's seat).
    pub fn rotated_180(&self) -> Self {
        let mut out = Self::empty();
        for (sq, piece) in self.iter() {
            out.squares[sq.rotated_180().index()] = piece;
        }
        out
    }

    /// Board diagram, top rank first, `.` for empty squares.
    pub fn diagram(&self) -> String {
        let mut out = String::with_capacity(SQUARES * 2 + BOARD_SIZE);
        for rank in self.squares.chunks(BOARD_SIZE) {
            let row: Vec<String> = rank
                .iter()
                .map(|p| p.map_or('.', Piece::fen_char).to_string())
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&encode_placement(self)).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram())
    }
}

impl From<String> for Board {
    fn from(s: String) -> Self {
        decode_placement(&s)
    }
}

impl From<Board> for String {
    fn from(b: Board) -> Self {
        encode_placement(&b)
    }
}

/// Kings per color as `(white, black)`.
pub fn count_kings(board: &Board) -> (usize, usize) {
    board.count_kings()
}
