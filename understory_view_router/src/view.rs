// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangular screen regions in integer canvas pixels.

use kurbo::{Point, Size, Vec2};

/// A rectangular region of the canvas.
///
/// Origin and size are integer pixel coordinates. A view covers the pixels
/// `x..x + width` horizontally and `y..y + height` vertically.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct View {
    /// Left edge in canvas pixels.
    pub x: i32,
    /// Top edge in canvas pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl View {
    /// Creates a view from its origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Origin as an offset from the canvas origin.
    pub fn origin(&self) -> Vec2 {
        Vec2::new(f64::from(self.x), f64::from(self.y))
    }

    /// Size in pixels.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Returns `true` if the pixel containing `pos` lies inside the view.
    ///
    /// The far edges are exclusive. Since the bounds are integers this is the
    /// same as testing the floored pixel coordinate. Positions in `(-1, 0)`
    /// therefore fall outside a view at origin `0`; they are not truncated
    /// toward zero onto its first pixel.
    pub fn contains(&self, pos: Point) -> bool {
        let (x, y) = (f64::from(self.x), f64::from(self.y));
        x <= pos.x
            && pos.x < x + f64::from(self.width)
            && y <= pos.y
            && pos.y < y + f64::from(self.height)
    }
}
