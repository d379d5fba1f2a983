use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::mapping::{clamp_unit, normalized_to_pixel, pixel_to_normalized};
use crate::{ImageSize, PixelRounding, ViewTransform};

/// Inset used for freshly captured photos, as a fraction of each axis.
pub const DEFAULT_CORNER_INSET: f64 = 0.1;

/// Fixed role of each corner in a [`CornerSet`], in canonical clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerRole {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl CornerRole {
    pub const ALL: [CornerRole; 4] = [
        CornerRole::TopLeft,
        CornerRole::TopRight,
        CornerRole::BottomRight,
        CornerRole::BottomLeft,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// The four user-adjustable board corners in normalized image space.
///
/// Order is TL, TR, BR, BL. Corners are addressed by role, never by spatial
/// position: a drag that crosses another corner does not reorder the set.
/// Every stored coordinate lies in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Point2<f64>; 4]", into = "[Point2<f64>; 4]")]
pub struct CornerSet {
    points: [Point2<f64>; 4],
}

impl Default for CornerSet {
    fn default() -> Self {
        Self::inset(DEFAULT_CORNER_INSET)
    }
}

impl From<[Point2<f64>; 4]> for CornerSet {
    fn from(points: [Point2<f64>; 4]) -> Self {
        Self::new(points)
    }
}

impl From<CornerSet> for [Point2<f64>; 4] {
    fn from(set: CornerSet) -> Self {
        set.points
    }
}

#[inline]
fn clamp_point(p: Point2<f64>) -> Point2<f64> {
    Point2::new(clamp_unit(p.x), clamp_unit(p.y))
}

impl CornerSet {
    /// Build from TL, TR, BR, BL points, clamping each into `[0, 1]`.
    pub fn new(points: [Point2<f64>; 4]) -> Self {
        Self {
            points: points.map(clamp_point),
        }
    }

    /// Axis-aligned rectangle inset by `margin` on every side.
    pub fn inset(margin: f64) -> Self {
        let lo = clamp_unit(margin);
        let hi = clamp_unit(1.0 - margin);
        Self::new([
            Point2::new(lo, lo),
            Point2::new(hi, lo),
            Point2::new(hi, hi),
            Point2::new(lo, hi),
        ])
    }

    /// The whole image.
    pub fn full() -> Self {
        Self::inset(0.0)
    }

    #[inline]
    pub fn get(&self, role: CornerRole) -> Point2<f64> {
        self.points[role.index()]
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f64>; 4] {
        &self.points
    }

    /// Move exactly one corner to `p` (clamped). Other corners are untouched.
    pub fn set(&mut self, role: CornerRole, p: Point2<f64>) {
        self.points[role.index()] = clamp_point(p);
    }

    /// Builder form of [`Self::set`].
    pub fn with_corner(mut self, role: CornerRole, p: Point2<f64>) -> Self {
        self.set(role, p);
        self
    }

    /// Translate one corner by a normalized delta (clamped).
    pub fn translate(&mut self, role: CornerRole, delta: Vector2<f64>) {
        let p = self.get(role) + delta;
        self.set(role, p);
    }

    /// Drag a corner to a view-space location.
    pub fn drag_to(&mut self, role: CornerRole, view_point: Point2<f64>, view: &ViewTransform) {
        self.set(role, view.view_to_normalized(view_point));
    }

    /// Drag a corner by a view-space translation.
    pub fn drag_by(&mut self, role: CornerRole, view_delta: Vector2<f64>, view: &ViewTransform) {
        self.translate(role, view.view_delta_to_normalized(view_delta));
    }

    /// Corners in source-image pixels, full precision.
    pub fn to_pixels(&self, image: ImageSize) -> [Point2<f64>; 4] {
        self.points.map(|p| normalized_to_pixel(p, image))
    }

    /// Corners in source-image pixels under the given rounding policy.
    pub fn to_pixels_rounded(&self, image: ImageSize, rounding: PixelRounding) -> [Point2<f64>; 4] {
        self.to_pixels(image).map(|p| rounding.apply(p))
    }

    /// Corners reported in pixels (e.g. by the recognizer), clamped to the image.
    pub fn from_pixels(points: [Point2<f64>; 4], image: ImageSize) -> Self {
        Self::new(points.map(|p| pixel_to_normalized(p, image)))
    }

    /// Corners in view space, for drawing handles.
    pub fn to_view(&self, view: &ViewTransform) -> [Point2<f64>; 4] {
        self.points.map(|p| view.normalized_to_view(p))
    }

    /// Corners as UI percentages `[x%, y%]` of the image.
    pub fn percentages(&self) -> [[f64; 2]; 4] {
        self.points.map(|p| [p.x * 100.0, p.y * 100.0])
    }

    /// Signed shoelace area in normalized units; positive for clockwise order
    /// in the y-down image frame.
    pub fn signed_area(&self) -> f64 {
        let mut acc = 0.0;
        for i in 0..4 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc / 2.0
    }

    /// True when the outline is a simple quad wound in canonical order.
    ///
    /// Dragging may produce a crossed or reversed outline; the set is still
    /// stored as-is, this only lets the UI flag it.
    pub fn is_convex_clockwise(&self) -> bool {
        (0..4).all(|i| {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            let c = self.points[(i + 2) % 4];
            let ab = b - a;
            let bc = c - b;
            ab.x * bc.y - ab.y * bc.x > 0.0
        })
    }
}
