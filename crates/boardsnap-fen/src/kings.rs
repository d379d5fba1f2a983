use crate::{Board, Color};

/// The board does not hold exactly one king per side.
///
/// `Display` is the user-facing message: one diagnostic per offending color,
/// joined with `", "` (e.g. `"missing white king, 2 black kings (need exactly 1)"`).
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}", join_diagnostics(.white, .black))]
pub struct KingCountError {
    pub white: usize,
    pub black: usize,
}

fn diagnostic(color: Color, count: usize) -> Option<String> {
    match count {
        1 => None,
        0 => Some(format!("missing {color} king")),
        n => Some(format!("{n} {color} kings (need exactly 1)")),
    }
}

fn join_diagnostics(white: &usize, black: &usize) -> String {
    [
        diagnostic(Color::White, *white),
        diagnostic(Color::Black, *black),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(", ")
}

impl KingCountError {
    /// Per-color diagnostics, white first.
    pub fn diagnostics(&self) -> Vec<String> {
        [
            diagnostic(Color::White, self.white),
            diagnostic(Color::Black, self.black),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Gate for evaluation requests: exactly one king of each color.
pub fn validate_kings(board: &Board) -> Result<(), KingCountError> {
    let (white, black) = board.count_kings();
    if white == 1 && black == 1 {
        return Ok(());
    }
    log::debug!("king check failed: white={white} black={black}");
    Err(KingCountError { white, black })
}
