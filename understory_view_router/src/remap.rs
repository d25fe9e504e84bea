// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping canvas-normalized positions into a view's own normalized space.
//!
//! Positions are normalized over inclusive pixel extents: `0.0` is the first
//! pixel and `1.0` the last. A canvas of `W` pixels therefore spans `W - 1`
//! pixel steps, and the same holds for a view. For a view at `origin` of size
//! `size` inside a canvas of size `canvas`:
//!
//! ```text
//! offset = origin / (canvas - 1)
//! scale  = (canvas - 1) / (size - 1)
//! local  = scale * (pos - offset)
//! ```
//!
//! The `- 1` denominators are clamped to at least `1` so single-pixel views
//! and canvases stay finite.
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_view_router::{View, ViewTransform};
//!
//! let view = View::new(10, 10, 100, 100);
//! let t = ViewTransform::new(&view, Size::new(200.0, 200.0));
//!
//! // The view's first pixel maps to 0 and its last pixel to 1.
//! let first = t.apply(Point::new(10.0 / 199.0, 10.0 / 199.0));
//! let last = t.apply(Point::new(109.0 / 199.0, 109.0 / 199.0));
//! assert!(first.x.abs() < 1e-12 && (last.y - 1.0).abs() < 1e-12);
//! ```

use kurbo::{Point, Size, Vec2};
use understory_picking::Ndc;

use crate::view::View;

/// Pixel steps across an extent of `n` pixels, never below one.
fn steps(n: f64) -> f64 {
    let s = n - 1.0;
    if s < 1.0 { 1.0 } else { s }
}

/// Precomputed remapping from canvas-normalized to view-normalized space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    offset: Vec2,
    scale: Vec2,
    view_size: Size,
}

impl ViewTransform {
    /// Builds the transform for `view` inside a canvas of `canvas` pixels.
    pub fn new(view: &View, canvas: Size) -> Self {
        let (cw, ch) = (steps(canvas.width), steps(canvas.height));
        let size = view.size();
        let origin = view.origin();
        Self {
            offset: Vec2::new(origin.x / cw, origin.y / ch),
            scale: Vec2::new(cw / steps(size.width), ch / steps(size.height)),
            view_size: size,
        }
    }

    /// Canvas-normalized position of the view's origin.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Per-axis scale from canvas-normalized to view-normalized units.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Size of the view; remapped events use it as their canvas size.
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Maps a canvas-normalized position into the view.
    pub fn apply(&self, pos: Point) -> Point {
        Point::new(
            self.scale.x * (pos.x - self.offset.x),
            self.scale.y * (pos.y - self.offset.y),
        )
    }

    /// Maps a canvas NDC into view NDC. Depth is unchanged.
    pub fn apply_ndc(&self, ndc: Ndc) -> Ndc {
        Ndc::from_normalized(self.apply(ndc.to_normalized()), ndc.depth)
    }
}

/// Maps the canvas-normalized `pos` into `view`'s normalized space.
pub fn remap(pos: Point, view: &View, canvas: Size) -> Point {
    ViewTransform::new(view, canvas).apply(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        a - b < 1e-9 && b - a < 1e-9
    }

    #[test]
    fn canvas_point_inside_offset_view() {
        let view = View::new(10, 10, 100, 100);
        let canvas = Size::new(200.0, 200.0);
        let local = remap(Point::new(60.0 / 199.0, 60.0 / 199.0), &view, canvas);
        assert!(close(local.x, 50.0 / 99.0), "x was {}", local.x);
        assert!(close(local.y, 50.0 / 99.0), "y was {}", local.y);
        assert!(close(local.x, 0.505_050_505));
    }

    #[test]
    fn full_canvas_view_is_identity() {
        let canvas = Size::new(64.0, 48.0);
        let t = ViewTransform::new(&View::new(0, 0, 64, 48), canvas);
        let p = Point::new(0.25, 0.75);
        let q = t.apply(p);
        assert!(close(q.x, p.x) && close(q.y, p.y));
        assert_eq!(t.view_size(), canvas);
    }

    #[test]
    fn single_pixel_extents_stay_finite() {
        let t = ViewTransform::new(&View::new(0, 0, 1, 1), Size::new(1.0, 1.0));
        let q = t.apply(Point::new(0.5, 0.5));
        assert!(q.x.is_finite() && q.y.is_finite());

        let t = ViewTransform::new(&View::new(3, 0, 1, 10), Size::new(10.0, 10.0));
        assert!(t.scale().x.is_finite());
        assert!(close(t.apply(Point::new(3.0 / 9.0, 0.0)).x, 0.0));
    }

    #[test]
    fn ndc_goes_through_normalized_space() {
        let view = View::new(50, 0, 51, 101);
        let t = ViewTransform::new(&view, Size::new(101.0, 101.0));
        // Canvas center is the left edge of the right half.
        let ndc = t.apply_ndc(Ndc::new(0.0, 0.0, 0.3));
        assert!(close(ndc.x, -1.0), "x was {}", ndc.x);
        assert!(close(ndc.y, 0.0), "y was {}", ndc.y);
        assert_eq!(ndc.depth, 0.3);
    }
}
