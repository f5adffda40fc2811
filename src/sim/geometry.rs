//! Axis-aligned rectangles in field coordinates
//!
//! The field origin is the top-left corner, x grows right and y grows down.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `x`/`y` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns a rect of `size` horizontally centred on `self`, resting on its top edge
    pub fn centered_on_top(&self, size: [f32; 2]) -> Rect {
        Rect::new(
            self.x + (self.w - size[0]) / 2.0,
            self.y - size[1],
            size[0],
            size[1],
        )
    }

    /// The four outline segments, clockwise from the top-left corner
    pub fn outline(&self) -> [([f32; 2], [f32; 2]); 4] {
        let tl = [self.left(), self.top()];
        let tr = [self.right(), self.top()];
        let br = [self.right(), self.bottom()];
        let bl = [self.left(), self.bottom()];
        [(tl, tr), (tr, br), (br, bl), (bl, tl)]
    }
}
