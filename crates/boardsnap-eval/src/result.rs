use serde::{Deserialize, Serialize};

/// Outcome of a position evaluation, already parsed from the evaluator's wire format.
///
/// Signs are from white's point of view: positive favors white.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationResult {
    /// Advantage in pawns (not centipawns).
    Score { pawns: f64 },
    /// Forced mate in `moves`; negative when black mates.
    Mate { moves: i32 },
    /// The evaluator answered with an error.
    Error { message: String },
}

impl EvaluationResult {
    pub fn score(pawns: f64) -> Self {
        EvaluationResult::Score { pawns }
    }

    pub fn mate(moves: i32) -> Self {
        EvaluationResult::Mate { moves }
    }

    pub fn error(message: impl Into<String>) -> Self {
        EvaluationResult::Error {
            message: message.into(),
        }
    }

    /// Build from the loose optional fields evaluators usually return.
    ///
    /// An error wins over everything, then a mate count, then the score, so a
    /// result never carries both a score and a mate. All fields absent yields
    /// `None`.
    pub fn from_parts(
        score: Option<f64>,
        mate: Option<i32>,
        error: Option<String>,
    ) -> Option<Self> {
        if let Some(message) = error {
            return Some(Self::Error { message });
        }
        if let Some(moves) = mate {
            if score.is_some() {
                log::debug!("evaluator sent both score and mate; keeping mate {moves}");
            }
            return Some(Self::Mate { moves });
        }
        score.map(|pawns| Self::Score { pawns })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EvaluationResult::Error { .. })
    }
}
