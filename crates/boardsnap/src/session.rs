//! Editing state for one captured photo.
//!
//! All UI-side state (selected palette tool, corner outline, last evaluated
//! FEN) lives in one explicit [`EditorSession`] value. Every gesture is a
//! method call on it; nothing is shared implicitly.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::core::{
    BoardProjection, CornerRole, CornerSet, ImageSize, PixelRounding, ViewTransform,
};
use crate::eval::{EvalBar, EvaluationResult};
use crate::fen::{
    decode_fen_with, validate_kings, Board, CastlingRight, Color, FenDefaults, KingCountError,
    Piece, Position, Square,
};
use crate::recognizer::{RecognizeRequest, RecognizeResponse};

/// What a tap on a board square does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Place(Piece),
    Erase,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no photo has been captured")]
    NoPhoto,
    #[error(transparent)]
    Kings(#[from] KingCountError),
}

/// Outcome of asking whether the current position needs an evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvaluationRequest {
    /// Send this FEN to the evaluator.
    Needed(String),
    /// The current FEN was already evaluated.
    Unchanged,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorSession {
    position: Position,
    corners: CornerSet,
    image: Option<ImageSize>,
    tool: Option<Tool>,
    fen_defaults: FenDefaults,
    last_evaluated: Option<String>,
    evaluation: Option<EvaluationResult>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Position::starting())
    }
}

impl EditorSession {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            corners: CornerSet::default(),
            image: None,
            tool: None,
            fen_defaults: FenDefaults::default(),
            last_evaluated: None,
            evaluation: None,
        }
    }

    /// Use these defaults for FEN fields missing from recognizer output.
    pub fn with_fen_defaults(mut self, defaults: FenDefaults) -> Self {
        self.fen_defaults = defaults;
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    /// Current FEN, re-encoded from the board on every call.
    pub fn fen(&self) -> String {
        self.position.fen()
    }

    pub fn corners(&self) -> &CornerSet {
        &self.corners
    }

    pub fn image(&self) -> Option<ImageSize> {
        self.image
    }

    pub fn tool(&self) -> Option<Tool> {
        self.tool
    }

    pub fn evaluation(&self) -> Option<&EvaluationResult> {
        self.evaluation.as_ref()
    }

    // ---- photo and corners ----

    /// Attach a freshly captured photo; corners reset to the default inset.
    pub fn capture_photo(&mut self, image: ImageSize) {
        log::debug!("photo captured: {}x{}", image.width(), image.height());
        self.image = Some(image);
        self.corners = CornerSet::default();
    }

    pub fn reset_corners(&mut self) {
        self.corners = CornerSet::default();
    }

    pub fn set_corner(&mut self, role: CornerRole, p: Point2<f64>) {
        self.corners.set(role, p);
    }

    pub fn drag_corner_to(&mut self, role: CornerRole, view_point: Point2<f64>, view: &ViewTransform) {
        self.corners.drag_to(role, view_point, view);
    }

    pub fn drag_corner_by(&mut self, role: CornerRole, view_delta: Vector2<f64>, view: &ViewTransform) {
        self.corners.drag_by(role, view_delta, view);
    }

    /// Build the recognizer payload from the current outline.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn recognize_request(&self, rounding: PixelRounding) -> Result<RecognizeRequest, SessionError> {
        let image = self.image.ok_or(SessionError::NoPhoto)?;
        Ok(RecognizeRequest::new(&self.corners, image, rounding))
    }

    /// Replace the position (and refined corners, if any) with the recognizer's answer.
    pub fn apply_recognition(&mut self, response: &RecognizeResponse) {
        self.position = response.position(&self.fen_defaults);
        if let Some(corners) = self.image.and_then(|img| response.corner_set(img)) {
            self.corners = corners;
        }
        log::info!("recognized position {}", self.fen());
    }

    /// Board projection for the current outline, if the quad is not degenerate.
    pub fn projection(&self) -> Option<BoardProjection> {
        BoardProjection::from_corners(&self.corners)
    }

    /// Square under a normalized photo point.
    pub fn square_at(&self, p: Point2<f64>) -> Option<Square> {
        let (file, rank) = self.projection()?.cell_at(p)?;
        Square::new(file, rank)
    }

    /// Centre of a square in normalized photo space.
    pub fn square_center(&self, sq: Square) -> Option<Point2<f64>> {
        Some(self.projection()?.cell_center(sq.file(), sq.rank()))
    }

    // ---- board editing ----

    pub fn select_tool(&mut self, tool: Option<Tool>) {
        self.tool = tool;
    }

    /// Apply the selected tool to a square. Returns whether the board changed.
    pub fn tap_square(&mut self, sq: Square) -> bool {
        let content = match self.tool {
            None => return false,
            Some(Tool::Place(piece)) => Some(piece),
            Some(Tool::Erase) => None,
        };
        self.set_square(sq, content)
    }

    /// Set one square. Returns whether the board changed.
    pub fn set_square(&mut self, sq: Square, piece: Option<Piece>) -> bool {
        self.position.set_square(sq, piece) != piece
    }

    /// Move whatever stands on `from` to `to`, replacing its content.
    pub fn move_piece(&mut self, from: Square, to: Square) -> bool {
        if from == to {
            return false;
        }
        let Some(piece) = self.position.set_square(from, None) else {
            return false;
        };
        self.position.set_square(to, Some(piece));
        true
    }

    pub fn clear_board(&mut self) {
        self.position.board.clear();
    }

    pub fn reset_to_start(&mut self) {
        self.position = Position::starting();
    }

    /// Turn the board around (photo taken from black's side).
    pub fn flip_board(&mut self) {
        self.position.board = self.position.board.rotated_180();
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.position.side_to_move = color;
    }

    /// Flip one castling right; returns whether it is now granted.
    pub fn toggle_castling(&mut self, right: CastlingRight) -> bool {
        self.position.castling.toggle(right)
    }

    /// Replace the position from FEN text using the session defaults.
    pub fn load_fen(&mut self, fen: &str) {
        self.position = decode_fen_with(fen, &self.fen_defaults);
    }

    // ---- evaluation ----

    /// Gate an evaluation request: kings must be exactly one per side, and an
    /// unchanged FEN is not sent twice.
    pub fn evaluation_request(&self) -> Result<EvaluationRequest, SessionError> {
        validate_kings(&self.position.board)?;
        let fen = self.fen();
        if self.last_evaluated.as_deref() == Some(fen.as_str()) {
            return Ok(EvaluationRequest::Unchanged);
        }
        Ok(EvaluationRequest::Needed(fen))
    }

    /// Record an evaluator answer for `fen`.
    ///
    /// Answers for a FEN that no longer matches the board are dropped and
    /// `false` is returned.
    pub fn record_evaluation(&mut self, fen: &str, result: Option<EvaluationResult>) -> bool {
        if fen != self.fen() {
            log::debug!("dropping stale evaluation for {fen}");
            return false;
        }
        self.last_evaluated = Some(fen.to_string());
        self.evaluation = result;
        true
    }

    pub fn eval_bar(&self) -> EvalBar {
        EvalBar::from_result(self.evaluation.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FitPolicy, ViewSize};
    use crate::fen::{PieceKind, START_FEN};
    use approx::assert_abs_diff_eq;

    fn sq(name: &str) -> Square {
        Square::from_name(name).expect("square")
    }

    fn photo_session() -> EditorSession {
        let mut s = EditorSession::default();
        s.capture_photo(ImageSize::new(1000, 1000).expect("image"));
        s
    }

    #[test]
    fn tapping_applies_the_selected_tool() {
        let mut s = EditorSession::new(Position::empty());
        assert!(!s.tap_square(sq("e4")));
        s.select_tool(Some(Tool::Place(Piece::white(PieceKind::Queen))));
        assert!(s.tap_square(sq("e4")));
        assert!(!s.tap_square(sq("e4")));
        assert_eq!(s.fen(), "8/8/8/8/4Q3/8/8/8 w - - 0 1");
        s.select_tool(Some(Tool::Erase));
        assert!(s.tap_square(sq("e4")));
        assert!(s.board().is_empty());
    }

    #[test]
    fn moving_a_piece_captures_the_target() {
        let mut s = EditorSession::default();
        assert!(s.move_piece(sq("d1"), sq("d7")));
        assert_eq!(s.board().get(sq("d7")), Some(Piece::white(PieceKind::Queen)));
        assert_eq!(s.board().get(sq("d1")), None);
        assert!(!s.move_piece(sq("d4"), sq("d5")));
        assert!(!s.move_piece(sq("e1"), sq("e1")));
    }

    #[test]
    fn side_castling_and_flip_reach_the_fen() {
        let mut s = EditorSession::default();
        s.set_side_to_move(Color::Black);
        assert!(!s.toggle_castling(CastlingRight::WhiteQueenside));
        assert_eq!(
            s.fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b Kkq - 0 1"
        );
        s.flip_board();
        assert_eq!(
            s.fen(),
            "RNBKQBNR/PPPPPPPP/8/8/8/8/pppppppp/rnbkqbnr b Kkq - 0 1"
        );
    }

    #[test]
    fn evaluation_is_gated_on_kings() {
        let mut s = EditorSession::new(Position::empty());
        let err = s.evaluation_request().expect_err("no kings");
        assert_eq!(err.to_string(), "missing white king, missing black king");
        s.load_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(s.evaluation_request(), Ok(EvaluationRequest::Needed(_))));
    }

    #[test]
    fn unchanged_fen_is_not_evaluated_twice() {
        let mut s = EditorSession::default();
        let EvaluationRequest::Needed(fen) = s.evaluation_request().expect("ok") else {
            panic!("expected a request");
        };
        assert_eq!(fen, START_FEN);
        assert!(s.record_evaluation(&fen, Some(EvaluationResult::score(0.3))));
        assert_eq!(s.evaluation_request(), Ok(EvaluationRequest::Unchanged));
        assert_eq!(s.eval_bar().text, "0.3");

        s.move_piece(sq("e2"), sq("e4"));
        assert!(matches!(s.evaluation_request(), Ok(EvaluationRequest::Needed(_))));
        // an answer for the old board arrives late
        assert!(!s.record_evaluation(&fen, Some(EvaluationResult::mate(1))));
        assert_eq!(s.eval_bar().text, "0.3");
    }

    #[test]
    fn recognizer_round_trip_through_the_session() {
        let mut s = photo_session();
        assert!(EditorSession::default()
            .recognize_request(PixelRounding::Truncate)
            .is_err());
        let req = s.recognize_request(PixelRounding::Truncate).expect("request");
        assert_eq!(
            req.corners,
            crate::PixelCorners::Integer([[100, 100], [900, 100], [900, 900], [100, 900]])
        );

        let resp = RecognizeResponse {
            fen: "4k3/8/8/8/8/8/8/4K3".into(),
            corners: Some([[50.0, 60.0], [950.0, 40.0], [990.0, 980.0], [20.0, 940.0]]),
        };
        s.apply_recognition(&resp);
        assert_eq!(s.fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_abs_diff_eq!(s.corners().get(CornerRole::TopLeft).x, 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(s.corners().get(CornerRole::BottomRight).y, 0.98, epsilon = 1e-12);
    }

    #[test]
    fn castling_default_follows_the_session() {
        let mut s = EditorSession::default().with_fen_defaults(FenDefaults::all_castling());
        s.load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(s.fen(), START_FEN);
    }

    #[test]
    fn dragging_in_the_editor_moves_one_corner() {
        let mut s = photo_session();
        let view = ViewTransform::new(
            ViewSize::new(200.0, 400.0).expect("view"),
            ImageSize::new(1000, 1000).expect("image"),
            FitPolicy::AspectFill,
        );
        let before = *s.corners();
        s.drag_corner_by(CornerRole::BottomRight, Vector2::new(-40.0, -40.0), &view);
        assert_eq!(s.corners().get(CornerRole::TopLeft), before.get(CornerRole::TopLeft));
        assert_eq!(s.corners().get(CornerRole::TopRight), before.get(CornerRole::TopRight));
        assert_eq!(s.corners().get(CornerRole::BottomLeft), before.get(CornerRole::BottomLeft));
        assert_abs_diff_eq!(s.corners().get(CornerRole::BottomRight).x, 0.8, epsilon = 1e-12);
        s.drag_corner_to(CornerRole::TopLeft, Point2::new(-1000.0, -1000.0), &view);
        assert_eq!(s.corners().get(CornerRole::TopLeft), Point2::new(0.0, 0.0));
    }

    #[test]
    fn squares_are_located_on_the_photo() {
        let s = photo_session();
        let e4 = sq("e4");
        let center = s.square_center(e4).expect("center");
        assert_abs_diff_eq!(center.x, 0.55, epsilon = 1e-9);
        assert_abs_diff_eq!(center.y, 0.55, epsilon = 1e-9);
        assert_eq!(s.square_at(center), Some(e4));
        assert_eq!(s.square_at(Point2::new(0.02, 0.02)), None);
    }
}
