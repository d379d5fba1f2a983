//! Corner geometry for photographed chessboards.
//!
//! This crate is purely geometric: it knows nothing about pieces or FEN.
//! It converts the user-adjusted board outline between normalized image
//! space, on-screen view space and source-image pixels, and fits the
//! projective map between the board plane and the photo.
//!
//! ```
//! use boardsnap_core::{CornerRole, CornerSet, FitPolicy, ImageSize, PixelRounding, ViewSize, ViewTransform};
//! use nalgebra::Point2;
//!
//! # fn main() -> Result<(), boardsnap_core::GeometryError> {
//! let image = ImageSize::new(3024, 4032)?;
//! let view = ViewTransform::new(ViewSize::new(390.0, 520.0)?, image, FitPolicy::AspectFill);
//!
//! let mut corners = CornerSet::default();
//! corners.drag_to(CornerRole::TopLeft, Point2::new(30.0, 42.0), &view);
//!
//! let payload = corners.to_pixels_rounded(image, PixelRounding::Truncate);
//! assert_eq!(payload[2], Point2::new(2721.0, 3628.0));
//! # Ok(())
//! # }
//! ```

mod corners;
mod error;
mod homography;
mod logger;
mod mapping;
mod projection;

pub use corners::{CornerRole, CornerSet, DEFAULT_CORNER_INSET};
pub use error::GeometryError;
pub use homography::{homography_from_4pt, Homography};
pub use mapping::{
    clamp_unit, normalized_to_pixel, normalized_to_view, pixel_to_normalized, view_to_normalized,
    FitPolicy, ImageSize, PixelRounding, ViewSize, ViewTransform,
};
pub use projection::{BoardProjection, BOARD_CELLS};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, level_from_str, LOG_ENV};
