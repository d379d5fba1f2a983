use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{homography_from_4pt, CornerSet, Homography};

/// Number of squares along each board edge.
pub const BOARD_CELLS: u8 = 8;

/// Projective map between the 8×8 board plane and normalized image space.
///
/// Board-plane coordinates run `0..8` on both axes with `(0, 0)` at the
/// top-left corner of the corner set; cell `(file, rank)` covers
/// `[file, file + 1] × [rank, rank + 1]`, so rank 0 is the top row of the photo.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardProjection {
    pub h_img_from_board: Homography,
    pub h_board_from_img: Homography,
}

impl BoardProjection {
    /// Fit the projection to a corner set. Returns `None` for degenerate quads.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(corners)))]
    pub fn from_corners(corners: &CornerSet) -> Option<Self> {
        let n = f64::from(BOARD_CELLS);
        let board = [
            Point2::new(0.0, 0.0),
            Point2::new(n, 0.0),
            Point2::new(n, n),
            Point2::new(0.0, n),
        ];
        let Some(h_img_from_board) = homography_from_4pt(&board, corners.points()) else {
            log::warn!("corner quad is degenerate, no board projection");
            return None;
        };
        let h_board_from_img = h_img_from_board.inverse()?;
        Some(Self {
            h_img_from_board,
            h_board_from_img,
        })
    }

    /// Board-plane point to normalized image point (not clamped).
    #[inline]
    pub fn board_to_image(&self, p: Point2<f64>) -> Point2<f64> {
        self.h_img_from_board.apply(p)
    }

    /// Centre of cell `(file, rank)` in normalized image space.
    pub fn cell_center(&self, file: u8, rank: u8) -> Point2<f64> {
        self.board_to_image(Point2::new(
            f64::from(file) + 0.5,
            f64::from(rank) + 0.5,
        ))
    }

    /// Outline of cell `(file, rank)` in normalized image space (TL, TR, BR, BL).
    pub fn cell_quad(&self, file: u8, rank: u8) -> [Point2<f64>; 4] {
        let (x, y) = (f64::from(file), f64::from(rank));
        [
            Point2::new(x, y),
            Point2::new(x + 1.0, y),
            Point2::new(x + 1.0, y + 1.0),
            Point2::new(x, y + 1.0),
        ]
        .map(|p| self.board_to_image(p))
    }

    /// Cell `(file, rank)` under a normalized image point, if it lies on the board.
    pub fn cell_at(&self, p: Point2<f64>) -> Option<(u8, u8)> {
        let b = self.h_board_from_img.apply(p);
        if !b.x.is_finite() || !b.y.is_finite() {
            return None;
        }
        let n = f64::from(BOARD_CELLS);
        if b.x < 0.0 || b.y < 0.0 || b.x >= n || b.y >= n {
            return None;
        }
        Some((b.x.floor() as u8, b.y.floor() as u8))
    }
}
