use serde::{Deserialize, Serialize};

use crate::fen::{decode_fen_with, encode_fen, FenDefaults};
use crate::{Board, CastlingRights, Color, Piece, Square};

/// Board plus side to move and castling rights.
///
/// The FEN of a position is always derived on demand through [`Position::fen`];
/// nothing caches it, so it cannot drift from the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub board: Board,
    #[serde(default)]
    pub side_to_move: Color,
    #[serde(default)]
    pub castling: CastlingRights,
}

impl Position {
    pub fn new(board: Board, side_to_move: Color, castling: CastlingRights) -> Self {
        Self {
            board,
            side_to_move,
            castling,
        }
    }

    /// Standard starting position, white to move, all castling rights.
    pub fn starting() -> Self {
        Self::new(Board::starting(), Color::White, CastlingRights::ALL)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode with [`FenDefaults::default`]. Never fails.
    pub fn from_fen(fen: &str) -> Self {
        decode_fen_with(fen, &FenDefaults::default())
    }

    /// Current FEN, regenerated from the board every call.
    pub fn fen(&self) -> String {
        encode_fen(self)
    }

    /// Place or clear one square, returning the previous content.
    pub fn set_square(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        self.board.set(sq, piece)
    }
}
