//! Payloads exchanged with the remote position recognizer.
//!
//! The HTTP client lives outside this crate; these types only fix the JSON
//! shape and the conversions on both sides of the call.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::core::{CornerSet, ImageSize, PixelRounding};
use crate::fen::{decode_fen_with, FenDefaults, Position};

/// Pixel corners in TL, TR, BR, BL order.
///
/// Truncated corners serialize as JSON integers, exact ones as floats.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PixelCorners {
    Integer([[i64; 2]; 4]),
    Float([[f64; 2]; 4]),
}

impl PixelCorners {
    pub fn from_points(points: [Point2<f64>; 4], rounding: PixelRounding) -> Self {
        match rounding {
            PixelRounding::Truncate => {
                // `as` truncates toward zero
                PixelCorners::Integer(points.map(|p| [p.x as i64, p.y as i64]))
            }
            PixelRounding::Exact => PixelCorners::Float(points.map(|p| [p.x, p.y])),
        }
    }

    pub fn points(&self) -> [Point2<f64>; 4] {
        match self {
            PixelCorners::Integer(pts) => pts.map(|[x, y]| Point2::new(x as f64, y as f64)),
            PixelCorners::Float(pts) => pts.map(|[x, y]| Point2::new(x, y)),
        }
    }
}

/// Request body for the recognizer: the photo size and the board outline in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognizeRequest {
    pub image_width: u32,
    pub image_height: u32,
    pub corners: PixelCorners,
}

impl RecognizeRequest {
    pub fn new(corners: &CornerSet, image: ImageSize, rounding: PixelRounding) -> Self {
        Self {
            image_width: image.width(),
            image_height: image.height(),
            corners: PixelCorners::from_points(corners.to_pixels(image), rounding),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Recognizer answer: the detected FEN and, optionally, refined corners in pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecognizeResponse {
    pub fen: String,
    #[serde(default)]
    pub corners: Option<[[f64; 2]; 4]>,
}

impl RecognizeResponse {
    /// Decode the FEN. Malformed placements degrade to partial boards.
    pub fn position(&self, defaults: &FenDefaults) -> Position {
        decode_fen_with(&self.fen, defaults)
    }

    /// Refined corners mapped back to normalized space (clamped), if any.
    pub fn corner_set(&self, image: ImageSize) -> Option<CornerSet> {
        self.corners
            .map(|pts| CornerSet::from_pixels(pts.map(|[x, y]| Point2::new(x, y)), image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::START_FEN;

    fn image() -> ImageSize {
        ImageSize::new(3023, 4031).expect("image")
    }

    #[test]
    fn truncated_request_uses_integers() {
        let req = RecognizeRequest::new(&CornerSet::default(), image(), PixelRounding::Truncate);
        let json = req.to_json().expect("json");
        assert_eq!(
            json,
            r#"{"image_width":3023,"image_height":4031,"corners":[[302,403],[2720,403],[2720,3627],[302,3627]]}"#
        );
    }

    #[test]
    fn exact_request_keeps_fractions() {
        let req = RecognizeRequest::new(&CornerSet::default(), image(), PixelRounding::Exact);
        let pts = req.corners.points();
        assert!((pts[0].x - 302.3).abs() < 1e-9);
        assert!((pts[2].y - 3627.9).abs() < 1e-9);
        assert!(matches!(req.corners, PixelCorners::Float(_)));
    }

    #[test]
    fn response_maps_back_to_normalized_corners() {
        let resp: RecognizeResponse = serde_json::from_str(&format!(
            r#"{{"fen":"{START_FEN}","corners":[[0,0],[3023,0],[3023,4031],[-5,5000]]}}"#
        ))
        .expect("parse");
        let corners = resp.corner_set(image()).expect("corners");
        assert_eq!(corners, CornerSet::full());
        assert_eq!(resp.position(&FenDefaults::default()), Position::starting());
    }

    #[test]
    fn response_without_corners() {
        let resp: RecognizeResponse =
            serde_json::from_str(r#"{"fen":"8/8/8/8/8/8/8/8"}"#).expect("parse");
        assert!(resp.corner_set(image()).is_none());
        assert!(resp.position(&FenDefaults::default()).board.is_empty());
    }
}
