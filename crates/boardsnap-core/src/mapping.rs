//! Conversions between the three coordinate frames used by the corner editor.
//!
//! - *normalized*: `[0, 1]²` relative to the source image, origin top-left.
//!   This is the storage frame of [`CornerSet`](crate::CornerSet).
//! - *pixel*: `width × height` of the full-resolution photo, as expected by
//!   the remote recognizer.
//! - *view*: the on-screen rectangle that displays the photo under an
//!   aspect-fit or aspect-fill policy.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::GeometryError;

/// Pixel dimensions of a source image. Both dimensions are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ImageSizeRepr")]
pub struct ImageSize {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct ImageSizeRepr {
    width: u32,
    height: u32,
}

impl TryFrom<ImageSizeRepr> for ImageSize {
    type Error = GeometryError;

    fn try_from(raw: ImageSizeRepr) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidImageSize { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn wf(&self) -> f64 {
        f64::from(self.width)
    }

    #[inline]
    fn hf(&self) -> f64 {
        f64::from(self.height)
    }
}

/// Size of the on-screen view that displays the photo, in view points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ViewSizeRepr")]
pub struct ViewSize {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct ViewSizeRepr {
    width: f64,
    height: f64,
}

impl TryFrom<ViewSizeRepr> for ViewSize {
    type Error = GeometryError;

    fn try_from(raw: ViewSizeRepr) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl ViewSize {
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(GeometryError::InvalidViewSize { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// How the photo is scaled into its view while preserving aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Contain the whole image (letterbox). Used by the live detection overlay.
    #[default]
    AspectFit,
    /// Cover the whole view (crop). Used by the interactive corner editor.
    AspectFill,
}

/// How normalized corners become pixel coordinates in the recognizer payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelRounding {
    /// Truncate toward zero (integer pixel API). Never rounds to nearest.
    #[default]
    Truncate,
    /// Keep full floating-point precision.
    Exact,
}

impl PixelRounding {
    #[inline]
    pub fn apply(self, p: Point2<f64>) -> Point2<f64> {
        match self {
            PixelRounding::Truncate => Point2::new(p.x.trunc(), p.y.trunc()),
            PixelRounding::Exact => p,
        }
    }
}

/// Clamp into `[0, 1]`; NaN collapses to the origin edge.
#[inline]
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Scale a normalized point into source-image pixels (no rounding).
#[inline]
pub fn normalized_to_pixel(p: Point2<f64>, image: ImageSize) -> Point2<f64> {
    Point2::new(p.x * image.wf(), p.y * image.hf())
}

/// Inverse of [`normalized_to_pixel`]. The result is not clamped.
#[inline]
pub fn pixel_to_normalized(p: Point2<f64>, image: ImageSize) -> Point2<f64> {
    Point2::new(p.x / image.wf(), p.y / image.hf())
}

/// Scale and offsets that place the image centered inside a view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// View points per image pixel.
    pub scale: f64,
    /// Left edge of the displayed image in view space; negative under fill.
    pub x_offset: f64,
    /// Top edge of the displayed image in view space; negative under fill.
    pub y_offset: f64,
    pub image: ImageSize,
}

impl ViewTransform {
    pub fn new(view: ViewSize, image: ImageSize, fit: FitPolicy) -> Self {
        let sx = view.width / image.wf();
        let sy = view.height / image.hf();
        let scale = match fit {
            FitPolicy::AspectFit => sx.min(sy),
            FitPolicy::AspectFill => sx.max(sy),
        };
        Self {
            scale,
            x_offset: (view.width - image.wf() * scale) / 2.0,
            y_offset: (view.height - image.hf() * scale) / 2.0,
            image,
        }
    }

    /// Map a view-space point to a clamped normalized point.
    pub fn view_to_normalized(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            clamp_unit((p.x - self.x_offset) / self.scale / self.image.wf()),
            clamp_unit((p.y - self.y_offset) / self.scale / self.image.hf()),
        )
    }

    /// Forward transform; inverse of [`Self::view_to_normalized`] on `[0, 1]²`.
    pub fn normalized_to_view(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            p.x * self.image.wf() * self.scale + self.x_offset,
            p.y * self.image.hf() * self.scale + self.y_offset,
        )
    }

    /// Convert a drag translation in view points into a normalized delta.
    pub fn view_delta_to_normalized(&self, d: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            d.x / self.scale / self.image.wf(),
            d.y / self.scale / self.image.hf(),
        )
    }

    /// Displayed image rectangle in view space as `(origin, size)`.
    pub fn displayed_rect(&self) -> (Point2<f64>, Vector2<f64>) {
        (
            Point2::new(self.x_offset, self.y_offset),
            Vector2::new(
                self.image.wf() * self.scale,
                self.image.hf() * self.scale,
            ),
        )
    }
}

/// One-shot form of [`ViewTransform::view_to_normalized`].
pub fn view_to_normalized(
    p: Point2<f64>,
    view: ViewSize,
    image: ImageSize,
    fit: FitPolicy,
) -> Point2<f64> {
    ViewTransform::new(view, image, fit).view_to_normalized(p)
}

/// One-shot form of [`ViewTransform::normalized_to_view`].
pub fn normalized_to_view(
    p: Point2<f64>,
    view: ViewSize,
    image: ImageSize,
    fit: FitPolicy,
) -> Point2<f64> {
    ViewTransform::new(view, image, fit).normalized_to_view(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn image(w: u32, h: u32) -> ImageSize {
        ImageSize::new(w, h).expect("image size")
    }

    fn view(w: f64, h: f64) -> ViewSize {
        ViewSize::new(w, h).expect("view size")
    }

    fn sample_points() -> Vec<Point2<f64>> {
        let mut pts = Vec::new();
        for i in 0..=10 {
            for j in 0..=10 {
                pts.push(Point2::new(i as f64 / 10.0, j as f64 / 10.0));
            }
        }
        pts.push(Point2::new(0.123456789, 0.987654321));
        pts
    }

    #[test]
    fn pixel_round_trip_is_exact() {
        for (w, h) in [(1, 1), (3024, 4032), (4032, 3024), (7, 13), (u32::MAX, 2)] {
            let img = image(w, h);
            for p in sample_points() {
                let back = pixel_to_normalized(normalized_to_pixel(p, img), img);
                assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-9);
                assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn normalized_to_pixel_scales_each_axis() {
        let p = normalized_to_pixel(Point2::new(0.25, 0.5), image(4000, 3000));
        assert_eq!(p, Point2::new(1000.0, 1500.0));
    }

    #[test]
    fn truncation_goes_toward_zero() {
        let p = PixelRounding::Truncate.apply(Point2::new(302.99, 403.5));
        assert_eq!(p, Point2::new(302.0, 403.0));
        let n = PixelRounding::Truncate.apply(Point2::new(-0.7, 1.9999));
        assert_eq!(n, Point2::new(0.0, 1.0));
        let e = PixelRounding::Exact.apply(Point2::new(302.99, 403.5));
        assert_eq!(e, Point2::new(302.99, 403.5));
    }

    #[test]
    fn aspect_fit_letterboxes_tall_image() {
        // 3000x4000 image inside a 400x400 view: height limits the scale.
        let t = ViewTransform::new(view(400.0, 400.0), image(3000, 4000), FitPolicy::AspectFit);
        assert_abs_diff_eq!(t.scale, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(t.x_offset, 50.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.y_offset, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn aspect_fill_overflows_with_negative_offset() {
        let t = ViewTransform::new(view(400.0, 400.0), image(3000, 4000), FitPolicy::AspectFill);
        assert_abs_diff_eq!(t.scale, 400.0 / 3000.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.x_offset, 0.0, epsilon = 1e-12);
        assert!(t.y_offset < 0.0);
        let (_, size) = t.displayed_rect();
        assert_abs_diff_eq!(size.x, 400.0, epsilon = 1e-9);
        assert!(size.y > 400.0);
    }

    #[test]
    fn view_transforms_are_mutual_inverses() {
        let cases = [
            (view(390.0, 844.0), image(3024, 4032)),
            (view(844.0, 390.0), image(3024, 4032)),
            (view(300.0, 300.0), image(640, 480)),
        ];
        for (v, img) in cases {
            for fit in [FitPolicy::AspectFit, FitPolicy::AspectFill] {
                for p in sample_points() {
                    let vp = normalized_to_view(p, v, img, fit);
                    let back = view_to_normalized(vp, v, img, fit);
                    assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-6);
                    assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn view_points_outside_the_image_are_clamped() {
        let t = ViewTransform::new(view(400.0, 400.0), image(3000, 4000), FitPolicy::AspectFit);
        let p = t.view_to_normalized(Point2::new(-500.0, 10_000.0));
        assert_eq!(p, Point2::new(0.0, 1.0));
        let nan = t.view_to_normalized(Point2::new(f64::NAN, 200.0));
        assert_eq!(nan.x, 0.0);
    }

    #[test]
    fn drag_delta_scales_by_displayed_size() {
        let t = ViewTransform::new(view(400.0, 400.0), image(4000, 4000), FitPolicy::AspectFit);
        let d = t.view_delta_to_normalized(Vector2::new(40.0, -20.0));
        assert_abs_diff_eq!(d.x, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(d.y, -0.05, epsilon = 1e-12);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(ImageSize::new(0, 10).is_err());
        assert!(ViewSize::new(10.0, 0.0).is_err());
        assert!(ViewSize::new(f64::INFINITY, 10.0).is_err());
        let err = serde_json::from_str::<ImageSize>(r#"{"width":0,"height":5}"#);
        assert!(err.is_err());
        let ok: ImageSize = serde_json::from_str(r#"{"width":8,"height":5}"#).expect("json");
        assert_eq!((ok.width(), ok.height()), (8, 5));
    }
}
