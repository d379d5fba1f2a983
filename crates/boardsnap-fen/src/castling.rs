use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Color;

/// One of the four castling rights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastlingRight {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

impl CastlingRight {
    /// FEN order: `K`, `Q`, `k`, `q`.
    pub const ALL: [CastlingRight; 4] = [
        CastlingRight::WhiteKingside,
        CastlingRight::WhiteQueenside,
        CastlingRight::BlackKingside,
        CastlingRight::BlackQueenside,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub const fn fen_char(self) -> char {
        match self {
            CastlingRight::WhiteKingside => 'K',
            CastlingRight::WhiteQueenside => 'Q',
            CastlingRight::BlackKingside => 'k',
            CastlingRight::BlackQueenside => 'q',
        }
    }

    pub const fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'K' => Some(CastlingRight::WhiteKingside),
            'Q' => Some(CastlingRight::WhiteQueenside),
            'k' => Some(CastlingRight::BlackKingside),
            'q' => Some(CastlingRight::BlackQueenside),
            _ => None,
        }
    }

    pub const fn color(self) -> Color {
        match self {
            CastlingRight::WhiteKingside | CastlingRight::WhiteQueenside => Color::White,
            CastlingRight::BlackKingside | CastlingRight::BlackQueenside => Color::Black,
        }
    }
}

/// Subset of the four castling rights, stored as a bit set.
///
/// Serializes as its FEN field (`"KQkq"`, `"Kq"`, `"-"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    pub const fn contains(self, right: CastlingRight) -> bool {
        self.0 & right.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, right: CastlingRight) {
        self.0 |= right.bit();
    }

    #[inline]
    pub fn remove(&mut self, right: CastlingRight) {
        self.0 &= !right.bit();
    }

    /// Flip one right; returns whether it is now present.
    pub fn toggle(&mut self, right: CastlingRight) -> bool {
        self.0 ^= right.bit();
        self.contains(right)
    }

    pub fn with(mut self, right: CastlingRight) -> Self {
        self.insert(right);
        self
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Present rights in FEN order.
    pub fn iter(self) -> impl Iterator<Item = CastlingRight> {
        CastlingRight::ALL
            .into_iter()
            .filter(move |r| self.contains(*r))
    }

    /// FEN castling field: present rights in `KQkq` order, or `-`.
    pub fn to_fen_field(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        self.iter().map(CastlingRight::fen_char).collect()
    }

    /// Parse a FEN castling field. Unknown characters are ignored, `-` is empty.
    pub fn from_fen_field(field: &str) -> Self {
        let mut rights = Self::NONE;
        for c in field.chars() {
            match CastlingRight::from_fen_char(c) {
                Some(r) => rights.insert(r),
                None if c == '-' => {}
                None => log::debug!("ignoring castling character {c:?}"),
            }
        }
        rights
    }
}

impl FromIterator<CastlingRight> for CastlingRights {
    fn from_iter<I: IntoIterator<Item = CastlingRight>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen_field())
    }
}

impl From<String> for CastlingRights {
    fn from(s: String) -> Self {
        Self::from_fen_field(&s)
    }
}

impl From<CastlingRights> for String {
    fn from(r: CastlingRights) -> Self {
        r.to_fen_field()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_is_emitted_in_fixed_order() {
        let rights: CastlingRights = [CastlingRight::BlackQueenside, CastlingRight::WhiteKingside]
            .into_iter()
            .collect();
        assert_eq!(rights.to_fen_field(), "Kq");
        assert_eq!(CastlingRights::ALL.to_fen_field(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_fen_field(), "-");
    }

    #[test]
    fn parsing_ignores_noise() {
        assert_eq!(CastlingRights::from_fen_field("qkQK"), CastlingRights::ALL);
        assert_eq!(CastlingRights::from_fen_field("-"), CastlingRights::NONE);
        assert_eq!(
            CastlingRights::from_fen_field("HAk"),
            CastlingRights::NONE.with(CastlingRight::BlackKingside)
        );
    }

    #[test]
    fn toggle_flips_one_right() {
        let mut r = CastlingRights::ALL;
        assert!(!r.toggle(CastlingRight::WhiteQueenside));
        assert_eq!(r.to_fen_field(), "Kkq");
        assert!(r.toggle(CastlingRight::WhiteQueenside));
        assert_eq!(r, CastlingRights::ALL);
    }

    #[test]
    fn serde_uses_the_fen_field() {
        let json = serde_json::to_string(&CastlingRights::ALL).expect("json");
        assert_eq!(json, "\"KQkq\"");
        let back: CastlingRights = serde_json::from_str("\"k\"").expect("parse");
        assert_eq!(back.to_fen_field(), "k");
    }
}
