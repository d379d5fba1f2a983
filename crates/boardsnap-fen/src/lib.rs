//! Board model and FEN codec.
//!
//! Squares are indexed with rank 0 as the **top** row of the FEN placement
//! (chess rank 8) and file 0 as the a-file. Every consumer (codec, editor,
//! board projection) relies on this convention.
//!
//! ```
//! use boardsnap_fen::{decode_fen, encode_fen, validate_kings, Position, START_FEN};
//!
//! let pos = decode_fen(START_FEN);
//! assert_eq!(pos, Position::starting());
//! assert_eq!(encode_fen(&pos), START_FEN);
//! assert!(validate_kings(&pos.board).is_ok());
//! ```

mod board;
mod castling;
mod fen;
mod kings;
mod piece;
mod position;
mod square;

pub use board::{count_kings, Board};
pub use castling::{CastlingRight, CastlingRights};
pub use fen::{
    decode_fen, decode_fen_with, decode_placement, encode_fen, encode_placement, FenDefaults,
    FEN_SUFFIX, START_FEN,
};
pub use kings::{validate_kings, KingCountError};
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;
pub use square::{Square, SquareParseError, BOARD_SIZE};
