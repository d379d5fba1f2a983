//! FEN encoding and tolerant decoding.
//!
//! Encoding always emits all six fields, with the neutral placeholder
//! `- 0 1` for en-passant and the move counters (neither is tracked).
//!
//! Decoding never fails. Recognizer output is not fully trusted, so the
//! decoder skips unknown letters, discards squares past the h-file, ignores
//! ranks past the eighth and leaves missing ranks empty.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Board, CastlingRights, Color, Piece, Position, Square, BOARD_SIZE};

/// FEN of the standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Trailing en-passant and move-counter fields emitted by the encoder.
pub const FEN_SUFFIX: &str = " - 0 1";

/// Values used when a FEN omits its side-to-move or castling field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FenDefaults {
    #[serde(default)]
    pub side_to_move: Color,
    /// Rights assumed when the castling field is absent. Defaults to none.
    #[serde(default)]
    pub castling: CastlingRights,
}

impl FenDefaults {
    /// Assume every castling right when the field is absent.
    pub fn all_castling() -> Self {
        Self {
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
        }
    }
}

/// Placement field for a board: ranks top to bottom joined by `/`.
pub fn encode_placement(board: &Board) -> String {
    let mut out = String::with_capacity(71);
    for rank in 0..BOARD_SIZE as u8 {
        if rank > 0 {
            out.push('/');
        }
        let mut empty = 0u8;
        for file in 0..BOARD_SIZE as u8 {
            let piece = Square::new(file, rank).and_then(|sq| board.get(sq));
            match piece {
                None => empty += 1,
                Some(p) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(p.fen_char());
                }
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
    }
    out
}

/// Full six-field FEN for a position.
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip(pos)))]
pub fn encode_fen(pos: &Position) -> String {
    format!(
        "{} {} {}{}",
        encode_placement(&pos.board),
        pos.side_to_move.fen_char(),
        pos.castling.to_fen_field(),
        FEN_SUFFIX
    )
}

fn decode_rank(board: &mut Board, rank: u8, text: &str) {
    let mut file = 0usize;
    for c in text.chars() {
        if let Some(run) = c.to_digit(10).filter(|d| (1..=9).contains(d)) {
            file += run as usize;
            continue;
        }
        let Some(piece) = Piece::from_fen_char(c) else {
            log::debug!("skipping unknown placement character {c:?} in rank {rank}");
            continue;
        };
        match Square::new(file.min(u8::MAX as usize) as u8, rank) {
            Some(sq) => {
                board.set(sq, Some(piece));
            }
            None => log::debug!("discarding {piece} past the h-file in rank {rank}"),
        }
        file += 1;
    }
}

/// Decode a placement field. Never fails.
pub fn decode_placement(placement: &str) -> Board {
    let mut board = Board::empty();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() > BOARD_SIZE {
        log::debug!("ignoring {} ranks past the eighth", ranks.len() - BOARD_SIZE);
    } else if ranks.len() < BOARD_SIZE {
        log::debug!("placement has only {} ranks; the rest stay empty", ranks.len());
    }
    for (rank, text) in ranks.into_iter().take(BOARD_SIZE).enumerate() {
        decode_rank(&mut board, rank as u8, text);
    }
    board
}

fn decode_side(field: &str, default: Color) -> Color {
    match field {
        "w" | "W" => Color::White,
        "b" | "B" => Color::Black,
        other => {
            log::debug!("unknown side-to-move {other:?}, using {default}");
            default
        }
    }
}

/// Decode a FEN with explicit defaults for absent fields. Never fails.
#[cfg_attr(feature = "tracing", instrument(level = "trace", skip(defaults)))]
pub fn decode_fen_with(fen: &str, defaults: &FenDefaults) -> Position {
    let mut fields = fen.split_whitespace();
    let board = fields.next().map(decode_placement).unwrap_or_default();
    let side_to_move = fields
        .next()
        .map_or(defaults.side_to_move, |f| decode_side(f, defaults.side_to_move));
    let castling = fields
        .next()
        .map_or(defaults.castling, CastlingRights::from_fen_field);
    Position::new(board, side_to_move, castling)
}

/// Decode a FEN; absent fields fall back to white to move and no castling.
pub fn decode_fen(fen: &str) -> Position {
    decode_fen_with(fen, &FenDefaults::default())
}
