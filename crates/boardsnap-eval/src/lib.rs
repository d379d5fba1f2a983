//! Evaluation normalizer.
//!
//! Turns an evaluator result into the fraction of the evaluation bar that
//! belongs to white, and into a short display label. Nothing here talks to
//! an engine; callers hand over results already parsed from the wire.

mod normalizer;
mod result;

pub use normalizer::{
    evaluation_to_bar_fraction, evaluation_to_display_text, EvalBar, BAR_MAX, BAR_MIN,
    BAR_NEUTRAL, SCORE_SATURATION_PAWNS,
};
pub use result::EvaluationResult;
