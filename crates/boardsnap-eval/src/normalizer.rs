use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::EvaluationResult;

/// Bar fraction for an equal, unknown or failed evaluation.
pub const BAR_NEUTRAL: f64 = 0.5;
/// Lowest bar fraction (black winning / black mates).
pub const BAR_MIN: f64 = 0.05;
/// Highest bar fraction (white winning / white mates).
pub const BAR_MAX: f64 = 0.95;
/// Pawn advantage that saturates the bar.
pub const SCORE_SATURATION_PAWNS: f64 = 10.0;

/// White's share of the evaluation bar, in `[BAR_MIN, BAR_MAX]`.
///
/// - absent or error: [`BAR_NEUTRAL`]
/// - mate: `BAR_MAX` when white mates, `BAR_MIN` when black mates, regardless of distance
/// - score `s`: `clamp(0.5 + (s / 10) / 2, 0.05, 0.95)`
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub fn evaluation_to_bar_fraction(result: Option<&EvaluationResult>) -> f64 {
    match result {
        None | Some(EvaluationResult::Error { .. }) => BAR_NEUTRAL,
        Some(EvaluationResult::Mate { moves }) => match moves.signum() {
            1 => BAR_MAX,
            -1 => BAR_MIN,
            _ => BAR_NEUTRAL,
        },
        Some(EvaluationResult::Score { pawns }) => {
            if pawns.is_nan() {
                return BAR_NEUTRAL;
            }
            (0.5 + (pawns / SCORE_SATURATION_PAWNS) / 2.0).clamp(BAR_MIN, BAR_MAX)
        }
    }
}

/// Short label for the bar: `M<n>` for mate (no sign), one-decimal pawns otherwise.
///
/// Absent and error results read `0.0`.
pub fn evaluation_to_display_text(result: Option<&EvaluationResult>) -> String {
    match result {
        Some(EvaluationResult::Mate { moves }) => format!("M{}", moves.unsigned_abs()),
        Some(EvaluationResult::Score { pawns }) if !pawns.is_nan() => {
            let text = format!("{pawns:.1}");
            if text == "-0.0" {
                "0.0".to_string()
            } else {
                text
            }
        }
        _ => "0.0".to_string(),
    }
}

/// Ready-to-render evaluation bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalBar {
    /// White's share of the bar.
    pub fraction: f64,
    pub text: String,
}

impl EvalBar {
    pub fn from_result(result: Option<&EvaluationResult>) -> Self {
        Self {
            fraction: evaluation_to_bar_fraction(result),
            text: evaluation_to_display_text(result),
        }
    }

    /// Black's share of the bar.
    pub fn black_fraction(&self) -> f64 {
        1.0 - self.fraction
    }
}

impl Default for EvalBar {
    fn default() -> Self {
        Self::from_result(None)
    }
}
