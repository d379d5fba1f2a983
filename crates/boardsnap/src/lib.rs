//! Photo-to-FEN board editing in one crate.
//!
//! `boardsnap` ties together the geometry of a photographed board
//! ([`core`]), the board model and FEN codec ([`fen`]) and the evaluation
//! bar ([`eval`]), and adds the editor state that drives them:
//!
//! - [`EditorSession`]: palette taps, corner drags, FEN loading and the
//!   king gate in front of evaluation requests.
//! - [`RecognizeRequest`] / [`RecognizeResponse`]: the JSON exchanged with a
//!   remote position recognizer.
//! - [`io`]: JSON configuration and reports for the `boardsnap` binary.
//!
//! ```
//! use boardsnap::core::ImageSize;
//! use boardsnap::fen::{Piece, PieceKind, Position, Square};
//! use boardsnap::{EditorSession, EvaluationRequest, PixelRounding, Tool};
//!
//! let mut session = EditorSession::new(Position::empty());
//! session.capture_photo(ImageSize::new(3024, 4032).unwrap());
//!
//! session.select_tool(Some(Tool::Place(Piece::white(PieceKind::King))));
//! session.tap_square(Square::from_name("e1").unwrap());
//! assert!(session.evaluation_request().is_err());
//!
//! session.select_tool(Some(Tool::Place(Piece::black(PieceKind::King))));
//! session.tap_square(Square::from_name("e8").unwrap());
//! assert_eq!(
//!     session.evaluation_request().unwrap(),
//!     EvaluationRequest::Needed("4k3/8/8/8/8/8/8/4K3 w - - 0 1".to_string())
//! );
//!
//! let payload = session.recognize_request(PixelRounding::Truncate).unwrap();
//! assert_eq!(payload.image_width, 3024);
//! ```

pub use boardsnap_core as core;
pub use boardsnap_eval as eval;
pub use boardsnap_fen as fen;

pub mod io;
mod recognizer;
mod session;

pub use recognizer::{PixelCorners, RecognizeRequest, RecognizeResponse};
pub use session::{EditorSession, EvaluationRequest, SessionError, Tool};

pub use boardsnap_core::{CornerRole, CornerSet, FitPolicy, ImageSize, PixelRounding, ViewTransform};
pub use boardsnap_eval::{EvalBar, EvaluationResult};
pub use boardsnap_fen::{decode_fen, encode_fen, validate_kings, Board, FenDefaults, Position};
